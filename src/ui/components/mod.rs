mod empty_message;
mod help;
mod status;

/// Namespace for small, reusable paragraphs.
pub struct UiComponent;
