//! Wire record types
//!
//! Raw shapes as returned by the boards API. These are read-only inputs:
//! the report model in [`crate::roster`] is built from them by explicit
//! merge constructors, never by mutating these records in place.

use serde::{Deserialize, Serialize};

/// Identity attributes nested under `member` on membership records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub id: String,
    pub username: String,
    pub full_name: String,
}

/// One member's association with an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgMembershipRecord {
    pub id_member: String,
    pub member: MemberProfile,
    /// Wire role string, usually "admin" or "normal"
    pub member_type: String,
    pub deactivated: bool,
    pub unconfirmed: bool,
}

/// A board as listed under an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    pub short_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_link: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

/// One member's association with a single board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMembershipRecord {
    pub id_member: String,
    pub member: MemberProfile,
    pub member_type: String,
    pub deactivated: bool,
    pub unconfirmed: bool,
}

/// Organization-level role, ranked for report ordering: admins first,
/// normal members next, non-members last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    Admin,
    Normal,
    None,
}

impl OrgRole {
    /// Parse a wire `memberType` string. Unknown strings map to `None`
    /// rather than guessing a privilege level.
    pub fn from_wire(member_type: &str) -> Self {
        match member_type {
            "admin" => Self::Admin,
            "normal" => Self::Normal,
            _ => Self::None,
        }
    }
}

impl Default for OrgRole {
    fn default() -> Self {
        Self::None
    }
}

impl std::fmt::Display for OrgRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Normal => write!(f, "normal"),
            Self::None => write!(f, "none"),
        }
    }
}
