// Twittquilibrium: keep a Twitter account's follow list in equilibrium.
//
// This is the library root. `engine` is the entry point; `pipeline` holds the
// individual stages and `twitter` the API client they run against.

pub mod config;
pub mod engine;
pub mod pipeline;
pub mod twitter;

pub use engine::{CleanReport, Engine};
pub use twitter::oauth::Credentials;
