use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};
use crate::app::App;

pub fn render_open_prompt(app: &App, area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);

    let lines = vec![
        Line::from("Path to a PDF, .txt or .docx file:"),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(app.prompt_input.as_str()),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]),
    ];

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .title(" Open Document (Enter: Open | Esc: Cancel) ")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan))
        )
        .wrap(Wrap { trim: false })
        .render(area, buf);
}
