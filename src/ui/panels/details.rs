use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Stylize},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};
use crate::app::App;
use crate::ui::components::UiComponent;

/// File details as a pretty-printed JSON object.
pub fn render_details(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(view) = &app.view else {
        UiComponent::empty_message("File Details", "No document loaded").render(area, buf);
        return;
    };

    let json = serde_json::to_string_pretty(&view.details)
        .unwrap_or_else(|e| format!("Could not format details: {}", e));

    Paragraph::new(json)
        .block(
            Block::bordered()
                .title("File Details")
                .border_type(BorderType::Rounded)
        )
        .fg(Color::Green)
        .render(area, buf);
}

pub fn render_preview(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(view) = &app.view else {
        UiComponent::empty_message("Preview", "Press 'o' to open a PDF, text or Word document")
            .render(area, buf);
        return;
    };

    let text = if view.preview.is_empty() {
        "(no text extracted)".to_string()
    } else {
        view.preview.clone()
    };

    Paragraph::new(text)
        .block(
            Block::bordered()
                .title("Preview")
                .border_type(BorderType::Rounded)
        )
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
