//! Lockdown and offboard commands

use anyhow::Result;

use deckhand_api::{manage, ApiClient, ApiError};
use deckhand_core::Error as CoreError;

/// Disable external members and remove non-org members from every board
/// in the organization. Dry run unless `execute`.
pub async fn lockdown(client: &ApiClient, org: &str, execute: bool) -> Result<()> {
    if !execute {
        println!("dry run; pass --execute to apply changes");
    }
    manage::lockdown(client, org, execute).await?;
    Ok(())
}

/// Deactivate or remove a member, found by username or email, across
/// every administered organization. Dry run unless `execute`.
pub async fn offboard(client: &ApiClient, query: &str, execute: bool) -> Result<()> {
    if !execute {
        println!("dry run; pass --execute to apply changes");
    }
    match manage::offboard_by_query(client, query, execute).await {
        // A lookup miss is a report, not a failure
        Err(ApiError::Core(CoreError::MemberNotFound(q))) => {
            println!("No member found matching {}.", q);
            Ok(())
        }
        other => Ok(other?),
    }
}
