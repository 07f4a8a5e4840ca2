//! Merged membership roster
//!
//! Builds the per-member report model by folding organization and board
//! membership records together, then ordering the result for display.

pub mod aggregate;
pub mod model;
pub mod sort;

pub use aggregate::{aggregate, BoardMembershipSource};
pub use model::{BoardAccess, Member};
pub use sort::{active_org_members, deactivated_org_members, sort_for_report, sorted_board_access};
