// src/util/image.rs
use image::{DynamicImage, RgbImage};
use ratatui::{buffer::Buffer, layout::Rect};
use ratatui_image::{
    picker::Picker,
    protocol::StatefulProtocol,
    Resize,
    StatefulImage,
};
use tracing::warn;

/// Character cell size assumed when the terminal cannot be queried.
const FALLBACK_FONT_SIZE: (u16, u16) = (8, 16);

/// Terminal graphics protocol detection. Must run after the terminal has
/// entered raw mode and before the event stream starts reading stdin.
pub fn detect_picker() -> Picker {
    match Picker::from_query_stdio() {
        Ok(picker) => picker,
        Err(e) => {
            warn!("Terminal image query failed ({}), falling back to half-blocks", e);
            Picker::from_fontsize(FALLBACK_FONT_SIZE)
        }
    }
}

/// Inline preview of the rendered cloud.
pub struct ImageRenderer {
    protocol: StatefulProtocol,
    image_dimensions: (u32, u32),
}

// Manual Debug implementation since StatefulProtocol doesn't implement Debug
impl std::fmt::Debug for ImageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRenderer")
            .field("protocol", &"<StatefulProtocol>")
            .field("image_dimensions", &self.image_dimensions)
            .finish()
    }
}

impl ImageRenderer {
    pub fn from_rgb(picker: &Picker, image: &RgbImage) -> Self {
        let dimensions = image.dimensions();
        let protocol = picker.new_resize_protocol(DynamicImage::ImageRgb8(image.clone()));

        Self {
            protocol,
            image_dimensions: dimensions,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image_dimensions
    }

    /// Render using buffer with Fit (letterbox)
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        use ratatui::widgets::StatefulWidget;

        let image = StatefulImage::default().resize(Resize::Fit(None));
        image.render(area, buf, &mut self.protocol);

        if let Err(e) = self.protocol.last_encoding_result().unwrap_or(Ok(())) {
            warn!("Image encoding error: {}", e);
        }
    }
}
