pub mod core;
pub mod draw;
pub mod forms;
pub mod pages;
pub mod templates;

pub use self::core::{router, start_server, AppState, SharedState};
