// Social graph trait — the seam between the engine and the remote API.
//
// `TwitterClient` is the production implementation. Tests drive the engine
// with an in-memory graph instead.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Account, UserPage};

/// The three remote operations the engine depends on.
#[async_trait]
pub trait SocialGraph: Send + Sync {
    /// One page of the accounts the authenticated user follows.
    async fn list_followed(&self, page_size: u32, cursor: i64) -> Result<UserPage>;

    /// One page of the accounts following the authenticated user.
    async fn list_followers(&self, page_size: u32, cursor: i64) -> Result<UserPage>;

    /// Unfollow an account. Returns the account as reported by the API.
    async fn destroy_friendship(&self, handle: &str, id: u64) -> Result<Account>;
}
