//! Full-screen chat front end.

mod app;
mod message;
mod render;
mod run;

pub use app::ChatApp;
pub use message::{Speaker, Turn};
pub use run::run_tui;
