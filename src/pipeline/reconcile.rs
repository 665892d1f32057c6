// The unfollow pass: followed accounts minus the keep set.
//
// Runs only after the keep set is complete. Each unfollow is logged as a
// timestamped audit line; the first failed unfollow aborts the pass.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::info;

use super::RunState;
use crate::twitter::traits::SocialGraph;

/// Format the audit line for one unfollow: `[YYYY-MM-DD HH:MM] unfollowed user <handle>`.
pub fn audit_line(at: DateTime<Local>, handle: &str) -> String {
    format!("{} unfollowed user {}", at.format("[%Y-%m-%d %H:%M]"), handle)
}

/// Unfollow every followed account whose handle is not kept.
///
/// Returns the handles that were unfollowed, in the order they were processed.
pub async fn unfollow_unkept<W: Write>(
    graph: &dyn SocialGraph,
    state: &RunState,
    out: &mut W,
) -> Result<Vec<String>> {
    let mut unfollowed = Vec::new();

    for account in state.followed.iter().filter(|a| !state.keep.contains(&a.handle)) {
        let removed = graph
            .destroy_friendship(&account.handle, account.id)
            .await
            .with_context(|| format!("Failed to unfollow @{} ({})", account.handle, account.id))?;

        writeln!(out, "{}", audit_line(Local::now(), &removed.handle))
            .context("Failed to write unfollow log line")?;

        unfollowed.push(removed.handle);
    }

    info!(count = unfollowed.len(), "Unfollow pass complete");

    Ok(unfollowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_audit_line_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 59).unwrap();
        assert_eq!(audit_line(at, "dorsey"), "[2024-03-07 09:05] unfollowed user dorsey");
    }
}
