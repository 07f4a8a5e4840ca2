//! Organization, board, and member endpoints
//!
//! Typed wrappers over the audit and management API surface. Path
//! segments are percent-encoded because organization names are accepted
//! in place of ids.

use async_trait::async_trait;
use serde::Deserialize;
use urlencoding::encode;

use deckhand_core::record::{Board, BoardMembershipRecord, OrgMembershipRecord};
use deckhand_core::roster::BoardMembershipSource;

use crate::client::ApiClient;
use crate::error::Result;

/// Minimal member identity, as returned by search and board member lists.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Per-member entry in an organization payload's `memberships` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipSummary {
    pub id_member: String,
    pub member_type: String,
}

/// An organization as returned by `members/me/organizations`, with the
/// fields the management flows need.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub id_boards: Vec<String>,
    #[serde(default)]
    pub memberships: Vec<MembershipSummary>,
    #[serde(default)]
    pub premium_features: Vec<String>,
}

impl Organization {
    /// Find a membership entry by member id.
    pub fn membership(&self, id_member: &str) -> Option<&MembershipSummary> {
        self.memberships.iter().find(|m| m.id_member == id_member)
    }

    /// Whether the given member administers this organization.
    pub fn is_admin(&self, id_member: &str) -> bool {
        self.membership(id_member)
            .is_some_and(|m| m.member_type == "admin")
    }

    pub fn has_premium_feature(&self, feature: &str) -> bool {
        self.premium_features.iter().any(|f| f == feature)
    }

    /// Paid tier allows deactivating members instead of removing them.
    pub fn can_deactivate(&self) -> bool {
        self.has_premium_feature("deactivated")
    }

    /// Paid tier allows blocking non-org members from joining boards.
    pub fn can_disable_external_members(&self) -> bool {
        self.has_premium_feature("disableExternalMembers")
    }

    /// Paid tier grants org admins admin rights on every board.
    pub fn has_super_admins(&self) -> bool {
        self.has_premium_feature("superAdmins")
    }

    /// Whether `query` names this organization by id or by name.
    pub fn matches(&self, query: &str) -> bool {
        self.id == query || self.name == query
    }
}

impl ApiClient {
    /// Full membership roster of an organization.
    pub async fn org_memberships(&self, org: &str) -> Result<Vec<OrgMembershipRecord>> {
        self.get_json(
            &format!("organizations/{}/memberships", encode(org)),
            &[("member", "true")],
        )
        .await
    }

    /// All boards under an organization, open and closed.
    pub async fn org_boards(&self, org: &str) -> Result<Vec<Board>> {
        self.get_json(
            &format!("organizations/{}/boards", encode(org)),
            &[
                ("filter", "all"),
                ("fields", "closed,name,shortUrl,shortLink"),
            ],
        )
        .await
    }

    /// Full membership roster of one board.
    pub async fn board_memberships(&self, board_id: &str) -> Result<Vec<BoardMembershipRecord>> {
        self.get_json(
            &format!("boards/{}/memberships", encode(board_id)),
            &[("member", "true")],
        )
        .await
    }

    /// The authenticated member's identity.
    pub async fn me(&self) -> Result<MemberSummary> {
        self.get_json("members/me", &[("fields", "id,username")]).await
    }

    /// Organizations the authenticated member belongs to, with the fields
    /// the management flows need.
    pub async fn my_organizations(&self) -> Result<Vec<Organization>> {
        self.get_json(
            "members/me/organizations",
            &[("fields", "name,idBoards,memberships,premiumFeatures")],
        )
        .await
    }

    /// Look up a member by username or email. Returns the best match, if
    /// any.
    pub async fn search_member(&self, query: &str) -> Result<Option<MemberSummary>> {
        let results: Vec<MemberSummary> = self
            .get_json("search/members", &[("query", query), ("limit", "1")])
            .await?;
        Ok(results.into_iter().next())
    }

    /// Members of a board (identity fields only).
    pub async fn board_members(&self, board_id: &str) -> Result<Vec<MemberSummary>> {
        self.get_json(
            &format!("boards/{}/members", encode(board_id)),
            &[("fields", "username")],
        )
        .await
    }

    /// Admins of a board (identity fields only).
    pub async fn board_admins(&self, board_id: &str) -> Result<Vec<MemberSummary>> {
        self.get_json(
            &format!("boards/{}/members", encode(board_id)),
            &[("filter", "admins"), ("fields", "username")],
        )
        .await
    }

    /// Set or clear a member's deactivated flag within an organization.
    pub async fn set_member_deactivated(
        &self,
        org_id: &str,
        member_id: &str,
        deactivated: bool,
    ) -> Result<()> {
        // The API wants a string, not a JSON boolean
        let value = if deactivated { "true" } else { "false" };
        self.put_form(
            &format!(
                "organizations/{}/members/{}/deactivated",
                encode(org_id),
                encode(member_id)
            ),
            &[("value", value)],
        )
        .await
    }

    /// Remove a member from an organization. Does not remove them from
    /// boards they already belong to.
    pub async fn remove_member_from_org(&self, org_id: &str, member_id: &str) -> Result<()> {
        self.delete_form(
            &format!("organizations/{}/members/{}", encode(org_id), encode(member_id)),
            &[("id", member_id)],
        )
        .await
    }

    /// Remove a member from one board.
    pub async fn remove_member_from_board(&self, board_id: &str, member_id: &str) -> Result<()> {
        self.delete_form(
            &format!("boards/{}/members/{}", encode(board_id), encode(member_id)),
            &[("idMember", member_id)],
        )
        .await
    }

    /// Block non-org members from being added to the organization's
    /// boards.
    pub async fn disable_external_members(&self, org_id: &str) -> Result<()> {
        self.put_form(
            &format!("organizations/{}/prefs/externalMembersDisabled", encode(org_id)),
            &[("value", "true")],
        )
        .await
    }
}

#[async_trait]
impl BoardMembershipSource for ApiClient {
    async fn board_memberships(
        &self,
        board: &Board,
    ) -> deckhand_core::Result<Vec<BoardMembershipRecord>> {
        ApiClient::board_memberships(self, &board.id)
            .await
            .map_err(Into::into)
    }
}
