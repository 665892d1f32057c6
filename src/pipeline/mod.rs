// The follow-equilibrium pipeline.
//
// Four stages, always in this order:
//   1. fetch_followed   — page through friends/list into the run state
//   2. fetch_followers  — page through followers/list, keeping every follower
//   3. mark_verified    — keep every verified followed account
//   4. reconcile::unfollow_unkept — unfollow whatever is followed but not kept
//
// Each stage takes the run state explicitly so its inputs and outputs are
// visible at the call site.

pub mod fetch;
pub mod keep;
pub mod reconcile;

use anyhow::Result;
use tracing::info;

use crate::twitter::models::Account;
use crate::twitter::traits::SocialGraph;
use fetch::{paginate, FOLLOWED_INITIAL_CURSOR, FOLLOWERS_INITIAL_CURSOR};
use keep::KeepSet;

/// An account the operating user follows.
pub type FollowedAccount = Account;

/// Everything a run accumulates before the unfollow pass.
#[derive(Debug, Default)]
pub struct RunState {
    pub followed: Vec<FollowedAccount>,
    pub keep: KeepSet,
}

impl RunState {
    /// Start a run with a pre-populated whitelist.
    pub fn with_keep(keep: KeepSet) -> Self {
        Self {
            followed: Vec::new(),
            keep,
        }
    }
}

/// Stage 1: collect every followed account. Returns how many were fetched.
pub async fn fetch_followed(graph: &dyn SocialGraph, state: &mut RunState) -> Result<usize> {
    let followed = &mut state.followed;
    paginate(
        "followed accounts",
        FOLLOWED_INITIAL_CURSOR,
        move |size, cursor| graph.list_followed(size, cursor),
        |users| followed.extend(users),
    )
    .await
}

/// Stage 2: keep every follower. Returns how many followers were seen.
pub async fn fetch_followers(graph: &dyn SocialGraph, state: &mut RunState) -> Result<usize> {
    let keep = &mut state.keep;
    paginate(
        "followers",
        FOLLOWERS_INITIAL_CURSOR,
        move |size, cursor| graph.list_followers(size, cursor),
        |users| keep.extend(users.iter().map(|u| u.handle.as_str())),
    )
    .await
}

/// Stage 3: keep every verified followed account. No remote calls.
pub fn mark_verified(state: &mut RunState) -> usize {
    let mut verified = 0;
    for account in state.followed.iter().filter(|a| a.verified) {
        state.keep.insert(&account.handle);
        verified += 1;
    }
    info!(count = verified, "Marked verified accounts to keep");
    verified
}
