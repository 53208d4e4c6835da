pub mod action;
pub mod app;
pub mod clipboard;
pub mod components;
pub mod event;
pub mod markdown;
pub mod theme;

pub use app::App;
