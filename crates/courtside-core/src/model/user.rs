//! Users and conversation participants.

use serde::{Deserialize, Serialize};

use crate::model::UserId;

/// Account category on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    /// An individual athlete.
    Player,
    /// A team account.
    Team,
    /// A spectator account.
    Fan,
    /// A talent scout.
    Scout,
    /// Platform administrator.
    Admin,
}

/// Directory entry from the user listing.
///
/// Used for participant enrichment and as the recipient picker source.
/// Never required for message delivery correctness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-issued identifier.
    pub id: UserId,
    /// Full display name.
    pub name: String,
    /// Account category.
    #[serde(rename = "type")]
    pub account_type: UserType,
    /// Email address, when the directory exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The authenticated user's own profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Server-issued identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account category.
    pub account_type: UserType,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CurrentUser {
    /// `first last` display form.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A conversation participant.
///
/// Participants arrive sparse from the conversation endpoints and are
/// progressively enriched in place as directory data becomes available.
/// Until then, name fields stay `None` and display resolution falls back to
/// the loading placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Server-issued identifier.
    pub id: UserId,
    /// Given name, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Email address, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar URL, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl Participant {
    /// Participant known only by id.
    pub fn bare(id: impl Into<UserId>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    /// Best-effort display name: `first last` when both are present and
    /// non-empty, else the local part of the email address, else `None`.
    pub fn display_name(&self) -> Option<String> {
        if let (Some(first), Some(last)) = (&self.first_name, &self.last_name) {
            if !first.is_empty() && !last.is_empty() {
                return Some(format!("{first} {last}"));
            }
        }
        self.email.as_ref().and_then(|email| {
            let local = email.split('@').next().unwrap_or_default();
            if local.is_empty() { None } else { Some(local.to_string()) }
        })
    }

    /// Merge richer identity data into this participant.
    ///
    /// Directory entries win; failing that, the current user's own profile
    /// fills in their own participant record. Anything already present is
    /// kept as the last resort. Returns true if a source was found.
    pub fn enrich(&mut self, directory: &[User], current_user: Option<&CurrentUser>) -> bool {
        if let Some(user) = directory.iter().find(|u| u.id == self.id) {
            let (first, last) = split_name(&user.name);
            self.first_name = Some(first);
            self.last_name = last;
            if self.email.is_none() {
                self.email.clone_from(&user.email);
            }
            return true;
        }
        if let Some(current) = current_user {
            if current.id == self.id {
                self.first_name = Some(current.first_name.clone());
                self.last_name = Some(current.last_name.clone());
                if self.email.is_none() {
                    self.email.clone_from(&current.email);
                }
                return true;
            }
        }
        false
    }
}

/// Split a full directory name into `(first, last)`.
///
/// Only the first two whitespace-separated tokens are used, matching the
/// directory's own display convention. An empty name yields `"Unknown"`.
fn split_name(name: &str) -> (String, Option<String>) {
    let mut parts = name.split_whitespace();
    let first = match parts.next() {
        Some(token) => token.to_string(),
        None => "Unknown".to_string(),
    };
    (first, parts.next().map(ToString::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_user(id: &str, name: &str) -> User {
        User { id: id.into(), name: name.into(), account_type: UserType::Player, email: None }
    }

    #[test]
    fn display_name_requires_both_name_parts() {
        let mut p = Participant::bare("u1");
        p.first_name = Some("Maya".into());
        assert_eq!(p.display_name(), None);

        p.last_name = Some("Okafor".into());
        assert_eq!(p.display_name().as_deref(), Some("Maya Okafor"));
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        let mut p = Participant::bare("u1");
        p.email = Some("maya.okafor@example.com".into());
        assert_eq!(p.display_name().as_deref(), Some("maya.okafor"));
    }

    #[test]
    fn enrich_prefers_directory_over_current_user() {
        let mut p = Participant::bare("u1");
        let current = CurrentUser {
            id: "u1".into(),
            first_name: "Self".into(),
            last_name: "Name".into(),
            account_type: UserType::Fan,
            email: None,
        };

        assert!(p.enrich(&[directory_user("u1", "Maya Okafor")], Some(&current)));
        assert_eq!(p.display_name().as_deref(), Some("Maya Okafor"));
    }

    #[test]
    fn enrich_uses_own_profile_for_self() {
        let mut p = Participant::bare("me");
        let current = CurrentUser {
            id: "me".into(),
            first_name: "Jo".into(),
            last_name: "Reyes".into(),
            account_type: UserType::Scout,
            email: None,
        };

        assert!(p.enrich(&[], Some(&current)));
        assert_eq!(p.display_name().as_deref(), Some("Jo Reyes"));
    }

    #[test]
    fn enrich_without_source_keeps_participant_pending() {
        let mut p = Participant::bare("stranger");
        assert!(!p.enrich(&[], None));
        assert_eq!(p.display_name(), None);
    }

    #[test]
    fn single_token_directory_name_has_no_last_name() {
        let mut p = Participant::bare("u1");
        p.enrich(&[directory_user("u1", "Cher")], None);
        assert_eq!(p.first_name.as_deref(), Some("Cher"));
        assert_eq!(p.last_name, None);
        // Both parts are required for a usable name.
        assert_eq!(p.display_name(), None);
    }
}
