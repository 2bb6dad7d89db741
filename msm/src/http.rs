//! HTTP(S) utilities shared by the manifest, detail and download requests,
//! everything is based on async reqwest.

use reqwest::{Client, ClientBuilder};


/// The user agent sent with each HTTP request.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Get a new client builder for HTTP(S) requests with the crate user agent.
pub fn builder() -> ClientBuilder {
    Client::builder().user_agent(USER_AGENT)
}
