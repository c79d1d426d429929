//! Identity reconciliation: intern profiles + platform accounts → roster.
//!
//! Profiles and accounts are fetched from independent collections and only
//! share an email address. The accounts are the source of truth for *who is
//! on the board*; profile data is overlaid by matching on the normalized
//! email. Every account record produces exactly one [`BoardMember`], tagged
//! with the join outcome.

use std::collections::HashMap;

use crate::types::{Account, BoardMember, InternProfile, MemberKind, ProfileJoin};

/// Display label fallbacks when no profile field is available.
const INTERN_DEFAULT_DOMAIN: &str = "Intern";
const INTERN_DEFAULT_PROJECT: &str = "Unassigned";
const SCRUM_MASTER_DOMAIN: &str = "Scrum Master";
const SCRUM_MASTER_PROJECT: &str = "Leadership";

/// Matching key for the profile/account join: lowercase + trim.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Index profiles by normalized email. Duplicate emails are last-write-wins.
fn profiles_by_email(profiles: &[InternProfile]) -> HashMap<String, &InternProfile> {
    let mut by_email = HashMap::with_capacity(profiles.len());
    for profile in profiles {
        by_email.insert(normalize_email(&profile.email), profile);
    }
    by_email
}

fn resolve_member(
    account: &Account,
    profile: Option<&InternProfile>,
    kind: MemberKind,
) -> BoardMember {
    let (default_domain, default_project) = match kind {
        MemberKind::Intern => (INTERN_DEFAULT_DOMAIN, INTERN_DEFAULT_PROJECT),
        MemberKind::ScrumMaster => (SCRUM_MASTER_DOMAIN, SCRUM_MASTER_PROJECT),
    };

    match profile {
        Some(profile) => BoardMember {
            id: profile.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            kind,
            domain: profile
                .domain
                .clone()
                .unwrap_or_else(|| default_domain.to_string()),
            project: profile
                .current_project
                .clone()
                .unwrap_or_else(|| default_project.to_string()),
            join: ProfileJoin::Matched,
        },
        None => BoardMember {
            id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            kind,
            domain: default_domain.to_string(),
            project: default_project.to_string(),
            join: ProfileJoin::AccountOnly,
        },
    }
}

/// Build the base roster: one member per account record, intern accounts
/// first, scrum masters appended only when `include_scrum_masters` is set
/// (see the filter pipeline's inclusion policy).
///
/// An account with no profile match is not an error; it degrades to
/// account-only fields. Empty account collections yield an empty roster.
pub fn build_roster(
    profiles: &[InternProfile],
    intern_accounts: &[Account],
    scrum_master_accounts: &[Account],
    include_scrum_masters: bool,
) -> Vec<BoardMember> {
    let by_email = profiles_by_email(profiles);

    let mut roster: Vec<BoardMember> = intern_accounts
        .iter()
        .map(|account| {
            let profile = by_email.get(normalize_email(&account.email).as_str()).copied();
            resolve_member(account, profile, MemberKind::Intern)
        })
        .collect();

    if include_scrum_masters {
        roster.extend(scrum_master_accounts.iter().map(|account| {
            let profile = by_email.get(normalize_email(&account.email).as_str()).copied();
            resolve_member(account, profile, MemberKind::ScrumMaster)
        }));
    }

    roster
}
