//! Report model definitions
//!
//! `Member` and `BoardAccess` are the derived, owned report model. They are
//! constructed from wire records by the merge functions below and never
//! alias the raw API payloads.

use serde::Serialize;

use crate::record::{Board, BoardMembershipRecord, OrgMembershipRecord, OrgRole};

/// A member's access to one board, merged from the board's display fields
/// and the member's per-board status flags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardAccess {
    pub board_name: String,
    pub short_url: String,
    /// Per-board role string, usually "admin" or "normal"
    pub member_type: String,
    pub unconfirmed: bool,
    pub deactivated: bool,
    /// Whether the member can see the board given their unconfirmed and
    /// deactivated status. Does not account for public or org-visible
    /// board settings.
    pub readable: bool,
}

impl BoardAccess {
    /// Merge a board's display fields with one membership record's flags.
    pub fn new(board: &Board, record: &BoardMembershipRecord) -> Self {
        Self {
            board_name: board.name.clone(),
            short_url: board.short_url.clone(),
            member_type: record.member_type.clone(),
            unconfirmed: record.unconfirmed,
            deactivated: record.deactivated,
            readable: !record.unconfirmed && !record.deactivated,
        }
    }
}

/// One person's merged membership profile across the organization and its
/// boards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub username: String,
    pub full_name: String,
    /// Whether this member appears in the organization roster
    pub org_member: bool,
    pub org_deactivated: bool,
    /// `None` when the member was only observed on board rosters, where
    /// their organization-level confirmation status cannot be inferred
    pub org_unconfirmed: Option<bool>,
    pub org_role: OrgRole,
    pub boards: Vec<BoardAccess>,
}

impl Member {
    /// Seed a member from an organization membership record.
    pub fn from_org_membership(record: &OrgMembershipRecord) -> Self {
        Self {
            id: record.member.id.clone(),
            username: record.member.username.clone(),
            full_name: record.member.full_name.clone(),
            org_member: true,
            org_deactivated: record.deactivated,
            org_unconfirmed: Some(record.unconfirmed),
            org_role: OrgRole::from_wire(&record.member_type),
            boards: Vec::new(),
        }
    }

    /// Create a member first observed on a board roster. Organization
    /// status is unknown, so the org flags take their neutral values.
    pub fn from_board_membership(record: &BoardMembershipRecord, access: BoardAccess) -> Self {
        Self {
            id: record.member.id.clone(),
            username: record.member.username.clone(),
            full_name: record.member.full_name.clone(),
            org_member: false,
            org_deactivated: false,
            org_unconfirmed: None,
            org_role: OrgRole::None,
            boards: vec![access],
        }
    }

    /// Number of boards this member can currently read.
    pub fn readable_board_count(&self) -> usize {
        self.boards.iter().filter(|b| b.readable).count()
    }

    /// Number of boards on which this member is deactivated.
    pub fn deactivated_board_count(&self) -> usize {
        self.boards.iter().filter(|b| b.deactivated).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MemberProfile;

    fn board() -> Board {
        Board {
            id: "B1".into(),
            name: "Board1".into(),
            short_url: "https://example.com/b/B1".into(),
            short_link: None,
            closed: false,
        }
    }

    fn board_record(unconfirmed: bool, deactivated: bool) -> BoardMembershipRecord {
        BoardMembershipRecord {
            id_member: "X".into(),
            member: MemberProfile {
                id: "X".into(),
                username: "x".into(),
                full_name: "Xavier".into(),
            },
            member_type: "normal".into(),
            deactivated,
            unconfirmed,
        }
    }

    #[test]
    fn test_board_access_readable() {
        let access = BoardAccess::new(&board(), &board_record(false, false));
        assert!(access.readable);
        assert_eq!(access.board_name, "Board1");
    }

    #[test]
    fn test_board_access_unreadable_when_deactivated() {
        let access = BoardAccess::new(&board(), &board_record(false, true));
        assert!(!access.readable);
    }

    #[test]
    fn test_board_access_unreadable_when_unconfirmed() {
        let access = BoardAccess::new(&board(), &board_record(true, false));
        assert!(!access.readable);
    }

    #[test]
    fn test_member_from_board_membership_has_no_org_status() {
        let record = board_record(false, false);
        let access = BoardAccess::new(&board(), &record);
        let member = Member::from_board_membership(&record, access);
        assert!(!member.org_member);
        assert_eq!(member.org_role, OrgRole::None);
        assert_eq!(member.org_unconfirmed, None);
        assert_eq!(member.boards.len(), 1);
    }

    #[test]
    fn test_board_counts() {
        let record = board_record(false, false);
        let mut member = Member::from_board_membership(&record, BoardAccess::new(&board(), &record));
        member
            .boards
            .push(BoardAccess::new(&board(), &board_record(false, true)));
        assert_eq!(member.readable_board_count(), 1);
        assert_eq!(member.deactivated_board_count(), 1);
    }
}
