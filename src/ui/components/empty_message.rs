use ratatui::{
    layout::Alignment,
    prelude::{Color, Stylize, Style},
    widgets::{Block, BorderType, Padding, Paragraph, Wrap},
};

use super::UiComponent;

impl UiComponent {
    /// Placeholder for a panel with nothing to show yet.
    pub fn empty_message<'a>(title: &'a str, text: &'a str) -> Paragraph<'a> {
        let block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .padding(Padding::symmetric(1, 1));

        Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(Color::Gray).italic())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }
}
