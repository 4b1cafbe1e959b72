use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Cell, Row, Table, Widget},
};
use crate::app::App;
use crate::ui::components::UiComponent;

/// Full frequency table, unaffected by stopword settings.
pub fn render_word_table(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(view) = &app.view else {
        UiComponent::empty_message("Word Counts", "No document loaded").render(area, buf);
        return;
    };

    let rows: Vec<Row> = view.frequencies
        .iter()
        .skip(app.table_offset)
        .map(|entry| {
            Row::new(vec![
                Cell::from(entry.word.clone()),
                Cell::from(entry.count.to_string()),
            ])
        })
        .collect();

    let header = Row::new(vec!["Word", "Count"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, [Constraint::Min(10), Constraint::Length(8)])
        .header(header)
        .block(
            Block::bordered()
                .title(format!(
                    "Word Counts ({} distinct, {} total)",
                    view.frequencies.len(),
                    view.frequencies.total()
                ))
                .border_type(BorderType::Rounded)
        );

    Widget::render(table, area, buf);
}
