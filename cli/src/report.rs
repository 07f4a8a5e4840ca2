//! Tabular report rendering
//!
//! Formats the sorted member list the audit produces. Rendering returns
//! strings rather than printing so the shapes can be asserted on in
//! tests.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use deckhand_core::roster::{
    active_org_members, deactivated_org_members, sorted_board_access, Member,
};

/// What the audit report should contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportMode {
    /// Only the member summary table
    Summary,
    /// Summary table followed by board details for every member
    Full,
    /// Board details for one member, looked up by username
    Member(String),
}

pub const NO_MEMBER_MESSAGE: &str = "There was no member found with that username who is a \
     member of the organization or any boards within the organization.";

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn display_unconfirmed(unconfirmed: Option<bool>) -> &'static str {
    match unconfirmed {
        Some(true) => "true",
        Some(false) => "false",
        None => "unknown",
    }
}

/// One row per member: role, identity, org status, and board counts.
pub fn summary_table(members: &[Member]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "org member type",
        "full name",
        "username",
        "org deactivated",
        "org unconfirmed",
        "# boards readable",
        "# boards deactivated",
    ]);
    for member in members {
        table.add_row(vec![
            member.org_role.to_string(),
            member.full_name.clone(),
            member.username.clone(),
            member.org_deactivated.to_string(),
            display_unconfirmed(member.org_unconfirmed).to_string(),
            member.readable_board_count().to_string(),
            member.deactivated_board_count().to_string(),
        ]);
    }
    table
}

/// The identity block printed above a member's board table.
pub fn member_header(member: &Member) -> String {
    format!(
        "org member type: {}\nfull name: {}\nusername: {}\norg deactivated: {}\norg unconfirmed: {}\n",
        member.org_role,
        member.full_name,
        member.username,
        member.org_deactivated,
        display_unconfirmed(member.org_unconfirmed),
    )
}

/// One member's boards, readable boards first, then by name.
pub fn member_board_table(member: &Member) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "readable?",
        "name",
        "URL",
        "member type",
        "board unconfirmed",
        "board deactivated",
    ]);
    for access in sorted_board_access(member) {
        table.add_row(vec![
            access.readable.to_string(),
            access.board_name.clone(),
            access.short_url.clone(),
            access.member_type.clone(),
            access.unconfirmed.to_string(),
            access.deactivated.to_string(),
        ]);
    }
    table
}

fn summary_section(members: &[Member]) -> String {
    format!(
        "{} active organization members, {} deactivated, {} total people with board access\n{}\n",
        active_org_members(members).len(),
        deactivated_org_members(members).len(),
        members.len(),
        summary_table(members),
    )
}

fn detail_section(member: &Member) -> String {
    format!("{}{}\n", member_header(member), member_board_table(member))
}

/// Render the full report for the given mode. Expects the member list to
/// already be in report order. A `Member` lookup miss renders the
/// no-member message instead of failing.
pub fn render(members: &[Member], mode: &ReportMode) -> String {
    match mode {
        ReportMode::Summary => summary_section(members),
        ReportMode::Full => {
            let mut out = summary_section(members);
            for member in members {
                out.push('\n');
                out.push_str(&detail_section(member));
            }
            out
        }
        ReportMode::Member(username) => match members.iter().find(|m| &m.username == username) {
            Some(member) => detail_section(member),
            None => format!("{}\n", NO_MEMBER_MESSAGE),
        },
    }
}
