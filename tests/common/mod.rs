//! Integration test common infrastructure.
//!
//! Provides utilities for spawning the bot against a stub profile API and
//! driving it over HTTP.

pub mod client;
pub mod server;
pub mod stub;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use server::{Storage, TestServer};
#[allow(unused_imports)]
pub use stub::ProfileStub;
