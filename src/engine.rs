// The equilibrium engine — owns the client and runs the pipeline once.
//
// Construction never touches the network. `clean` runs the four stages in
// order and returns the first error it hits; nothing is retried.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::pipeline::{self, keep::KeepSet, RunState};
use crate::twitter::client::{TwitterClient, DEFAULT_API_URL};
use crate::twitter::oauth::Credentials;
use crate::twitter::traits::SocialGraph;

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Accounts followed before the run.
    pub followed: usize,
    /// Accounts following back.
    pub followers: usize,
    /// Verified accounts among the followed.
    pub verified: usize,
    /// Size of the final keep set.
    pub kept: usize,
    /// Handles unfollowed, in order.
    pub unfollowed: Vec<String>,
}

/// Single-use engine for one account.
pub struct Engine {
    graph: Box<dyn SocialGraph>,
    keep: KeepSet,
}

impl Engine {
    /// Build an engine talking to the public Twitter API.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_api_url(credentials, DEFAULT_API_URL)
    }

    /// Build an engine talking to an alternate API host.
    pub fn with_api_url(credentials: Credentials, api_url: &str) -> Result<Self> {
        let client = TwitterClient::new(credentials, api_url)?;
        Ok(Self::with_graph(client))
    }

    /// Build an engine over any social graph implementation.
    pub fn with_graph(graph: impl SocialGraph + 'static) -> Self {
        Self {
            graph: Box::new(graph),
            keep: KeepSet::new(),
        }
    }

    /// Never unfollow `handle`, whatever the follow state.
    pub fn keep_following(&mut self, handle: &str) {
        self.keep.insert(handle);
    }

    /// Run the whole pipeline, writing audit lines to stdout.
    pub async fn clean(self) -> Result<CleanReport> {
        let mut stdout = std::io::stdout();
        self.clean_into(&mut stdout).await
    }

    /// Run the whole pipeline, writing audit lines to `out`.
    pub async fn clean_into<W: Write>(self, out: &mut W) -> Result<CleanReport> {
        let graph = &*self.graph;
        let mut state = RunState::with_keep(self.keep);

        let followed = pipeline::fetch_followed(graph, &mut state)
            .await
            .context("Could not retrieve followed accounts")?;
        let followers = pipeline::fetch_followers(graph, &mut state)
            .await
            .context("Could not retrieve followers")?;
        let verified = pipeline::mark_verified(&mut state);

        info!(
            followed = followed,
            followers = followers,
            verified = verified,
            kept = state.keep.len(),
            "Keep set complete, reconciling"
        );

        let unfollowed = pipeline::reconcile::unfollow_unkept(graph, &state, out).await?;
        out.flush().context("Failed to flush unfollow log")?;

        Ok(CleanReport {
            followed,
            followers,
            verified,
            kept: state.keep.len(),
            unfollowed,
        })
    }
}
