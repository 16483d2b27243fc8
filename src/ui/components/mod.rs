//! Reusable UI components

mod about;
mod converter;
mod folder_card;
mod settings_panel;
mod status_bar;

pub use about::AboutBox;
pub use converter::ConverterApp;
