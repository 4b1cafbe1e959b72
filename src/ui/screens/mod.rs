pub mod main;
pub mod open_prompt;
