//! Validation and persistence orchestration behind the HTTP handlers.

pub mod account;
pub mod message;

pub use account::AccountManager;
pub use message::MessageManager;
