use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, List, ListItem, ListState, StatefulWidget, Widget},
};
use crate::app::{App, AppMode};
use crate::ui::components::UiComponent;
use crate::ui::style::dim_unless_focused;

/// The most frequent words, each toggleable as an additional stopword.
pub fn render_suggestions(app: &App, area: Rect, buf: &mut Buffer) {
    let (Some(view), Some(session)) = (&app.view, &app.session) else {
        UiComponent::empty_message("Exclude Words", "Open a document to see its most frequent words")
            .render(area, buf);
        return;
    };

    if view.suggestions.is_empty() {
        UiComponent::empty_message("Exclude Words", "The document has no words").render(area, buf);
        return;
    }

    let border_style = dim_unless_focused(app.mode == AppMode::Main, Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = view.suggestions
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let excluded = session.settings.is_excluded(word);
            let count = view.frequencies.get(word).unwrap_or(0);
            let style = match (i == app.selected_suggestion, excluded) {
                (true, _) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                (false, true) => Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
                (false, false) => Style::default().fg(Color::White),
            };

            let content = format!(
                "{} [{}] {} ({})",
                if i == app.selected_suggestion { "▶" } else { " " },
                if excluded { "x" } else { " " },
                word,
                count
            );
            ListItem::new(content).style(style)
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(app.selected_suggestion));

    let list = List::new(items)
        .block(
            Block::bordered()
                .title(format!("Exclude Words ({})", session.settings.additional_stopwords.len()))
                .border_type(BorderType::Rounded)
                .border_style(border_style)
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    StatefulWidget::render(list, area, buf, &mut state);
}
