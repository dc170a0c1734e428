//! Adapters for the hosted real-time backend (feature `hosted`).
//!
//! Both adapters share one [`HostedClient`], which sends the `app-id`
//! header and, when configured, the admin token as a bearer credential.

mod auth;
mod client;
mod store;

pub use auth::HostedAuthGateway;
pub use client::{HostedClient, HostedError, HostedSettings};
pub use store::HostedQuestionStore;
