use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, BorderType, Widget},
};
use crate::app::App;
use crate::ui::components::UiComponent;

pub fn render_cloud(app: &mut App, area: Rect, buf: &mut Buffer) {
    let Some(preview) = app.cloud_preview.as_mut() else {
        let text = if app.session.is_some() && app.picker.is_none() {
            "Press 'g' to generate. The image is saved to disk; this terminal cannot show it inline"
        } else {
            "Press 'g' to generate the word cloud"
        };
        UiComponent::empty_message("Word Cloud", text).render(area, buf);
        return;
    };

    let (width, height) = preview.dimensions();
    let block = Block::bordered()
        .title(format!("Word Cloud ({}x{})", width, height))
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    block.render(area, buf);

    preview.render(inner, buf);
}
