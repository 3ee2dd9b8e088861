mod controller;
mod dispatch;
mod events;
mod state;

pub use controller::Session;
pub use events::{GameOverReason, SessionEvent};
pub use state::{Role, SessionState};
