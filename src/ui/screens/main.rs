use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Stylize},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use crate::app::App;
use crate::ui::components::UiComponent;
use crate::ui::panels::{cloud, details, settings, suggestions, word_table};

const HELP_TEXT: &str = "o: Open • s: Stopwords • ←/→: Resolution • f: Format • ↑/↓: Move • Space: Exclude word • PgUp/PgDn: Scroll counts • g: Generate cloud • d: Download CSV • q: Quit";

pub fn render_main(app: &mut App, area: Rect, buf: &mut Buffer) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Min(10),    // Content
            Constraint::Length(3),  // Status
            Constraint::Length(4),  // Help
        ])
        .split(area);

    let title_text = match &app.view {
        Some(view) => format!("☁ Word Cloud Studio - {}", view.details.filename),
        None => "☁ Word Cloud Studio".to_string(),
    };
    Paragraph::new(title_text)
        .block(Block::bordered().border_type(BorderType::Rounded))
        .fg(Color::Cyan)
        .alignment(Alignment::Center)
        .render(main_layout[0], buf);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),  // Settings + suggestions
            Constraint::Percentage(40),  // Details + preview
            Constraint::Percentage(35),  // Cloud + counts
        ])
        .split(main_layout[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(columns[0]);
    settings::render_settings(app, left[0], buf);
    suggestions::render_suggestions(app, left[1], buf);

    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(columns[1]);
    details::render_details(app, middle[0], buf);
    details::render_preview(app, middle[1], buf);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[2]);
    cloud::render_cloud(app, right[0], buf);
    word_table::render_word_table(app, right[1], buf);

    UiComponent::status(&app.status).render(main_layout[2], buf);
    UiComponent::help(HELP_TEXT).render(main_layout[3], buf);
}
