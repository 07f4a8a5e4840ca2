//! Report ordering policy

use crate::record::OrgRole;
use crate::roster::model::{BoardAccess, Member};

/// Rank for the `org_unconfirmed` column. Unknown status (board-only
/// members) sorts after both confirmed and unconfirmed org members.
fn unconfirmed_rank(unconfirmed: Option<bool>) -> u8 {
    match unconfirmed {
        Some(false) => 0,
        Some(true) => 1,
        None => 2,
    }
}

/// Order members for the report: organization members before outsiders,
/// active before deactivated, confirmed before unconfirmed (unknown last),
/// admins before normal members before non-members, then by full name.
///
/// The sort is stable, so members equal on the whole key keep their
/// aggregation order. Pure function of the input, safe to re-apply.
pub fn sort_for_report(members: &mut [Member]) {
    members.sort_by(|a, b| {
        b.org_member
            .cmp(&a.org_member)
            .then(a.org_deactivated.cmp(&b.org_deactivated))
            .then(unconfirmed_rank(a.org_unconfirmed).cmp(&unconfirmed_rank(b.org_unconfirmed)))
            .then(a.org_role.cmp(&b.org_role))
            .then(a.full_name.cmp(&b.full_name))
    });
}

/// Order one member's board accesses for the detail view: readable boards
/// first, then by board name.
pub fn sorted_board_access(member: &Member) -> Vec<&BoardAccess> {
    let mut boards: Vec<&BoardAccess> = member.boards.iter().collect();
    boards.sort_by(|a, b| {
        b.readable
            .cmp(&a.readable)
            .then_with(|| a.board_name.cmp(&b.board_name))
    });
    boards
}

/// Members holding an active admin or normal org role.
pub fn active_org_members(members: &[Member]) -> Vec<&Member> {
    members
        .iter()
        .filter(|m| m.org_member && !m.org_deactivated && m.org_role != OrgRole::None)
        .collect()
}

/// Members deactivated at the organization level.
pub fn deactivated_org_members(members: &[Member]) -> Vec<&Member> {
    members
        .iter()
        .filter(|m| m.org_member && m.org_deactivated)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, full_name: &str) -> Member {
        Member {
            id: id.into(),
            username: full_name.to_lowercase(),
            full_name: full_name.into(),
            org_member: true,
            org_deactivated: false,
            org_unconfirmed: Some(false),
            org_role: OrgRole::Normal,
            boards: Vec::new(),
        }
    }

    fn access(name: &str, readable: bool) -> BoardAccess {
        BoardAccess {
            board_name: name.into(),
            short_url: format!("https://example.com/b/{}", name),
            member_type: "normal".into(),
            unconfirmed: !readable,
            deactivated: false,
            readable,
        }
    }

    #[test]
    fn test_org_members_sort_before_outsiders() {
        let outsider = Member {
            org_member: false,
            org_role: OrgRole::None,
            org_unconfirmed: None,
            ..member("X", "Aaa")
        };
        let mut members = vec![outsider, member("A", "Zed")];
        sort_for_report(&mut members);
        assert_eq!(members[0].id, "A");
        assert_eq!(members[1].id, "X");
    }

    #[test]
    fn test_active_before_deactivated() {
        let deactivated = Member {
            org_deactivated: true,
            ..member("D", "Aaa")
        };
        let mut members = vec![deactivated, member("A", "Zed")];
        sort_for_report(&mut members);
        assert_eq!(members[0].id, "A");
    }

    #[test]
    fn test_admins_before_normal_members() {
        let admin = Member {
            org_role: OrgRole::Admin,
            ..member("A", "Zed")
        };
        let mut members = vec![member("N", "Aaa"), admin];
        sort_for_report(&mut members);
        assert_eq!(members[0].id, "A");
    }

    #[test]
    fn test_unknown_unconfirmed_sorts_last_within_tier() {
        let unknown = Member {
            org_unconfirmed: None,
            ..member("U", "Aaa")
        };
        let unconfirmed = Member {
            org_unconfirmed: Some(true),
            ..member("C", "Aaa")
        };
        let mut members = vec![unknown, unconfirmed, member("F", "Aaa")];
        sort_for_report(&mut members);
        let ids: Vec<&str> = members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["F", "C", "U"]);
    }

    #[test]
    fn test_full_name_breaks_ties() {
        let mut members = vec![member("B", "Bob"), member("A", "Alice")];
        sort_for_report(&mut members);
        assert_eq!(members[0].full_name, "Alice");
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut members = vec![
            member("B", "Bob"),
            Member {
                org_role: OrgRole::Admin,
                ..member("A", "Alice")
            },
            Member {
                org_member: false,
                org_unconfirmed: None,
                org_role: OrgRole::None,
                ..member("X", "Xavier")
            },
        ];
        sort_for_report(&mut members);
        let once: Vec<String> = members.iter().map(|m| m.id.clone()).collect();
        sort_for_report(&mut members);
        let twice: Vec<String> = members.iter().map(|m| m.id.clone()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_is_stable_on_equal_keys() {
        // Same full key, distinguished only by id
        let mut members = vec![member("first", "Same"), member("second", "Same")];
        sort_for_report(&mut members);
        assert_eq!(members[0].id, "first");
        assert_eq!(members[1].id, "second");
    }

    #[test]
    fn test_board_access_readable_first_then_name() {
        let mut m = member("A", "Alice");
        m.boards = vec![
            access("Charlie", false),
            access("Bravo", true),
            access("Alpha", true),
        ];
        let ordered = sorted_board_access(&m);
        let names: Vec<&str> = ordered.iter().map(|b| b.board_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
        assert!(!ordered[2].readable);
    }

    #[test]
    fn test_org_member_filters() {
        let deactivated = Member {
            org_deactivated: true,
            ..member("D", "Dora")
        };
        let outsider = Member {
            org_member: false,
            org_role: OrgRole::None,
            ..member("X", "Xavier")
        };
        let members = vec![member("A", "Alice"), deactivated, outsider];
        assert_eq!(active_org_members(&members).len(), 1);
        assert_eq!(deactivated_org_members(&members).len(), 1);
    }
}
