// Library surface shared by the binary and the integration tests.
pub mod app;
pub mod config;
pub mod generator;
pub mod input;
pub mod keyboard;
pub mod report;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod ui;

pub use app::{App, AppState};
pub use session::{Outcome, SessionError, TypingSession};
