use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use crate::app::{App, AppMode};
use crate::config::Settings;
use crate::export::OutputFormat;
use crate::ui::components::UiComponent;
use crate::ui::style::dim_unless_focused;

fn row<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

/// `png [jpeg] webp` with the current choice bracketed.
fn format_selector(current: OutputFormat) -> String {
    OutputFormat::ALL
        .iter()
        .map(|format| {
            if *format == current { format!("[{}]", format) } else { format.to_string() }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_settings(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(session) = &app.session else {
        UiComponent::empty_message("Settings", "No document loaded").render(area, buf);
        return;
    };
    let settings: &Settings = &session.settings;
    let border_style = dim_unless_focused(app.mode == AppMode::Main, Style::default().fg(Color::Cyan));

    let lines = vec![
        row(
            "Stopwords",
            if settings.use_standard_stopwords { "standard ✓".into() } else { "standard ✗".into() },
        ),
        row("Resolution", format!("{} / 100", settings.resolution)),
        row("Format", format_selector(settings.format)),
        row("Excluded", settings.additional_stopwords.len().to_string()),
    ];

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .title("Settings")
                .border_type(BorderType::Rounded)
                .border_style(border_style)
        )
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_selector_marks_current() {
        assert_eq!(format_selector(OutputFormat::Jpeg), "png [jpeg] webp");
    }
}
