pub mod buttons;
pub mod commands;
