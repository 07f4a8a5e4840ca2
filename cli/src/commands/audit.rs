//! The membership audit command

use anyhow::Result;
use tracing::info;

use deckhand_api::ApiClient;
use deckhand_core::roster::{aggregate, sort_for_report};

use crate::report::{render, ReportMode};

/// Translate the audit flags into a report mode. `--user` wins, then
/// `--summary`; `--all` and no flags both mean the full report.
pub fn mode_from_flags(summary: bool, all: bool, user: Option<String>) -> ReportMode {
    match user {
        Some(username) => ReportMode::Member(username),
        None if summary && !all => ReportMode::Summary,
        None => ReportMode::Full,
    }
}

/// Fetch, aggregate, sort, and print the membership report for one
/// organization. With `json`, the merged member list is emitted as JSON
/// instead of tables.
pub async fn run(client: &ApiClient, org: &str, mode: ReportMode, json: bool) -> Result<()> {
    let org_memberships = client.org_memberships(org).await?;
    let boards = client.org_boards(org).await?;
    info!(
        org,
        members = org_memberships.len(),
        boards = boards.len(),
        "fetched organization rosters"
    );

    // One fetch per board, strictly sequential; large organizations may
    // run into API rate limits here
    let mut members = aggregate(&org_memberships, &boards, client).await?;
    sort_for_report(&mut members);

    if json {
        println!("{}", serde_json::to_string_pretty(&members)?);
    } else {
        print!("{}", render(&members, &mode));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_flag_selects_single_member_mode() {
        let mode = mode_from_flags(true, true, Some("alice".into()));
        assert_eq!(mode, ReportMode::Member("alice".into()));
    }

    #[test]
    fn test_summary_flag_selects_summary() {
        assert_eq!(mode_from_flags(true, false, None), ReportMode::Summary);
    }

    #[test]
    fn test_default_is_full_report() {
        assert_eq!(mode_from_flags(false, false, None), ReportMode::Full);
    }

    #[test]
    fn test_all_beats_summary() {
        assert_eq!(mode_from_flags(true, true, None), ReportMode::Full);
    }
}
