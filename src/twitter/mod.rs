// Twitter API client — OAuth signing, list pagination pages, unfollowing.
//
// Each submodule handles one concern of talking to the REST v1.1 API. The
// engine only sees the `SocialGraph` trait.

pub mod client;
pub mod error;
pub mod models;
pub mod oauth;
pub mod traits;
