//! Authentication adapters that need no network.

mod local;
mod session;

pub use local::{LocalAuthGateway, SentCode};
pub use session::FileSessionStore;
