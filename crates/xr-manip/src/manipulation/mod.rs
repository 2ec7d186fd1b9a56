//! Grab sessions and the per-frame manipulation state machine

mod session;
mod machine;

pub use session::{ManipulationMode, OneHandAnchor, Session, TranslateAnchor, TwoHandAnchor};
pub use machine::ManipulationStateMachine;
