pub mod analysis;
pub mod app;
pub mod cli;
pub mod cloud;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod export;
pub mod session;
pub mod stopwords;
pub mod ui;
pub mod util;

pub use config::{CloudConfig, Settings, StudioConfig};
pub use document::Document;
pub use error::{Result, StudioError};
pub use session::Session;
