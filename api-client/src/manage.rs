//! Organization management workflows
//!
//! Offboarding and lockdown passes over the organizations the
//! authenticated member administers. Every mutation is gated behind
//! `execute`; the default is a dry run that only logs what would happen.

use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::org::Organization;

/// Outcome of a [`deactivate_or_remove`] decision, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffboardAction {
    Deactivated,
    Removed,
    SkippedNotAdmin,
    SkippedNotMember,
}

/// Which action applies to a member of this organization: deactivate when
/// the paid tier allows it (keeps their memberships visible), otherwise
/// remove outright.
pub fn plan_offboard(org: &Organization, me_id: &str, member_id: &str) -> OffboardAction {
    if !org.is_admin(me_id) {
        return OffboardAction::SkippedNotAdmin;
    }
    if org.membership(member_id).is_none() {
        return OffboardAction::SkippedNotMember;
    }
    if org.can_deactivate() {
        OffboardAction::Deactivated
    } else {
        OffboardAction::Removed
    }
}

/// Deactivate a member if the organization's tier supports it, otherwise
/// remove them from the organization. Dry run unless `execute`.
pub async fn deactivate_or_remove(
    client: &ApiClient,
    org: &Organization,
    me_id: &str,
    member_id: &str,
    execute: bool,
) -> Result<OffboardAction> {
    let action = plan_offboard(org, me_id, member_id);
    let prefix = if execute { "" } else { "dry run: " };
    match action {
        OffboardAction::SkippedNotAdmin => {
            warn!(org = %org.name, "not an admin of this organization, skipping");
        }
        OffboardAction::SkippedNotMember => {
            info!(org = %org.name, member_id, "member does not belong to this organization");
        }
        OffboardAction::Deactivated => {
            if execute {
                client.set_member_deactivated(&org.id, member_id, true).await?;
            }
            info!(org = %org.name, member_id, "{}deactivated member", prefix);
        }
        OffboardAction::Removed => {
            if execute {
                client.remove_member_from_org(&org.id, member_id).await?;
            }
            info!(org = %org.name, member_id, "{}removed member", prefix);
        }
    }
    Ok(action)
}

/// Offboard a member across every administered organization, looking them
/// up by username or email first.
pub async fn offboard_by_query(client: &ApiClient, query: &str, execute: bool) -> Result<()> {
    let Some(member) = client.search_member(query).await? else {
        return Err(ApiError::Core(deckhand_core::Error::MemberNotFound(
            query.to_string(),
        )));
    };

    let me = client.me().await?;
    let orgs = client.my_organizations().await?;
    for org in &orgs {
        deactivate_or_remove(client, org, &me.id, &member.id, execute).await?;
    }
    Ok(())
}

/// Lock an organization down so only its members can reach its boards:
/// disable external members where the tier allows it, then remove every
/// non-org member from every board. Dry run unless `execute`.
pub async fn lockdown(client: &ApiClient, org_query: &str, execute: bool) -> Result<()> {
    let me = client.me().await?;
    let orgs = client.my_organizations().await?;
    let org = orgs
        .iter()
        .find(|o| o.matches(org_query))
        .ok_or_else(|| {
            ApiError::Core(deckhand_core::Error::NotFound(format!(
                "organization {} is not among those you belong to",
                org_query
            )))
        })?;

    if !org.is_admin(&me.id) {
        warn!(org = %org.name, "not an admin of this organization, nothing to do");
        return Ok(());
    }

    let prefix = if execute { "" } else { "dry run: " };

    if org.can_disable_external_members() {
        if execute {
            client.disable_external_members(&org.id).await?;
        }
        info!(org = %org.name, "{}disabled external members", prefix);
    } else {
        info!(org = %org.name, "cannot disable external members on this tier");
    }

    let super_admin = org.has_super_admins();
    for board_id in &org.id_boards {
        let board_members = client.board_members(board_id).await?;
        for member in &board_members {
            if org.membership(&member.id).is_some() {
                continue;
            }
            // Board mutations need org super-admin rights or board admin
            // rights on this specific board
            if !super_admin && !is_board_admin(client, board_id, &me.id).await? {
                warn!(board_id = %board_id, "not an admin of this board, skipping");
                continue;
            }
            if execute {
                client.remove_member_from_board(board_id, &member.id).await?;
            }
            info!(
                board_id = %board_id,
                member_id = %member.id,
                "{}removed non-org member from board",
                prefix
            );
        }
    }

    Ok(())
}

async fn is_board_admin(client: &ApiClient, board_id: &str, member_id: &str) -> Result<bool> {
    let admins = client.board_admins(board_id).await?;
    Ok(admins.iter().any(|m| m.id == member_id))
}
