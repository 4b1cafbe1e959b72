pub mod cloud;
pub mod details;
pub mod settings;
pub mod suggestions;
pub mod word_table;
