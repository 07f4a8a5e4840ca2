//! Membership aggregator
//!
//! Folds one organization roster and any number of board rosters into a
//! single member list. Fetching board rosters goes through the
//! [`BoardMembershipSource`] trait so callers can plug in the HTTP client
//! and tests can use a fixture.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::record::{Board, BoardMembershipRecord, OrgMembershipRecord};
use crate::roster::model::{BoardAccess, Member};
use crate::Result;

/// Supplies the membership roster for a single board.
#[async_trait]
pub trait BoardMembershipSource: Send + Sync {
    async fn board_memberships(&self, board: &Board) -> Result<Vec<BoardMembershipRecord>>;
}

/// Merge the organization roster with every board's roster.
///
/// Members are seeded from `org_memberships` in roster order. Each board is
/// then fetched and folded in strictly sequential order: a record for a
/// known member appends a [`BoardAccess`]; a record for an unseen member
/// inserts a new board-only [`Member`]. Every distinct member id across all
/// inputs appears exactly once in the output, in first-observation order.
///
/// A failed board fetch propagates immediately and aborts the run. There is
/// no retry and no partial-result recovery.
pub async fn aggregate(
    org_memberships: &[OrgMembershipRecord],
    boards: &[Board],
    source: &impl BoardMembershipSource,
) -> Result<Vec<Member>> {
    let mut members: Vec<Member> = Vec::with_capacity(org_memberships.len());
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for record in org_memberships {
        let member = Member::from_org_membership(record);
        index_by_id.insert(member.id.clone(), members.len());
        members.push(member);
    }

    for board in boards {
        let board_memberships = source.board_memberships(board).await?;
        for record in &board_memberships {
            let access = BoardAccess::new(board, record);
            match index_by_id.get(&record.id_member) {
                Some(&idx) => members[idx].boards.push(access),
                None => {
                    let member = Member::from_board_membership(record, access);
                    index_by_id.insert(member.id.clone(), members.len());
                    members.push(member);
                }
            }
        }
    }

    Ok(members)
}
