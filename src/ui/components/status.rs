use ratatui::{
    layout::Alignment,
    prelude::{Color, Style},
    widgets::{Block, BorderType, Paragraph},
};

use super::UiComponent;

impl UiComponent {
    /// Failures are shown in red, everything else in green.
    pub fn status(status: &str) -> Paragraph<'_> {
        let is_error = status.contains("failed") || status.starts_with("Failed");
        let color = if is_error { Color::Red } else { Color::Green };

        Paragraph::new(status)
            .block(
                Block::bordered()
                    .title(" Status ")
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color))
            )
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
    }
}
