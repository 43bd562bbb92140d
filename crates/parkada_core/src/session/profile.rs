//! Profile card resolution.
//!
//! # Invariants
//! - No user, no profile record, or a failed fetch all yield the guest card.
//! - The year line is shown only for the `Student` role.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;

pub const GUEST_EMAIL: &str = "Guest";
pub const MISSING_ROLE: &str = "N/A";
pub const MISSING_YEAR_LEVEL: &str = "Not Provided";
pub const STUDENT_ROLE: &str = "Student";

/// Authenticated user handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub uid: String,
}

/// Profile document as stored by the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub year_level: Option<String>,
}

/// Supplies the signed-in user, if any.
pub trait IdentityProvider {
    fn current_user(&self) -> Option<SessionUser>;
}

/// Remote profile lookup by user id.
pub trait ProfileDirectory {
    /// `Ok(None)` when the user has no profile document.
    fn fetch_profile(
        &self,
        uid: &str,
    ) -> impl Future<Output = Result<Option<UserProfile>, ProfileError>>;
}

/// Profile backend failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileError {
    pub message: String,
}

impl ProfileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "profile fetch failed: {}", self.message)
    }
}

impl Error for ProfileError {}

/// Display lines for the profile panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCard {
    pub email_line: String,
    pub role_line: String,
    /// `None` hides the year row.
    pub year_line: Option<String>,
}

impl ProfileCard {
    pub fn guest() -> Self {
        Self {
            email_line: format!("Email: {GUEST_EMAIL}"),
            role_line: format!("Role: {MISSING_ROLE}"),
            year_line: None,
        }
    }

    pub fn from_profile(profile: &UserProfile) -> Self {
        let year_line = (profile.role == STUDENT_ROLE).then(|| {
            let year = profile
                .year_level
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(MISSING_YEAR_LEVEL);
            format!("Year Level: {year}")
        });
        Self {
            email_line: format!("Email: {}", profile.email),
            role_line: format!("Role: {}", profile.role),
            year_line,
        }
    }
}

/// Resolves the card for the current session, falling back to guest.
pub async fn resolve_profile_card(
    identity: &impl IdentityProvider,
    directory: &impl ProfileDirectory,
) -> ProfileCard {
    let Some(user) = identity.current_user() else {
        debug!("event=profile_resolve module=session status=skip reason=signed_out");
        return ProfileCard::guest();
    };

    match directory.fetch_profile(user.uid.as_str()).await {
        Ok(Some(profile)) => ProfileCard::from_profile(&profile),
        Ok(None) => {
            debug!("event=profile_resolve module=session status=skip reason=no_profile");
            ProfileCard::guest()
        }
        Err(err) => {
            warn!("event=profile_resolve module=session status=error error={err}");
            ProfileCard::guest()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ProfileCard, UserProfile};

    #[test]
    fn student_without_year_shows_not_provided() {
        let card = ProfileCard::from_profile(&UserProfile {
            email: "ana@campus.edu".to_string(),
            role: "Student".to_string(),
            year_level: Some("   ".to_string()),
        });
        assert_eq!(card.year_line.as_deref(), Some("Year Level: Not Provided"));
    }

    #[test]
    fn non_student_hides_year_line() {
        let card = ProfileCard::from_profile(&UserProfile {
            email: "guard@campus.edu".to_string(),
            role: "Staff".to_string(),
            year_level: Some("3rd Year".to_string()),
        });
        assert_eq!(card.role_line, "Role: Staff");
        assert_eq!(card.year_line, None);
    }

    #[test]
    fn profile_document_uses_camel_case_fields() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "email": "ana@campus.edu",
            "role": "Student",
            "yearLevel": "2nd Year"
        }))
        .expect("profile document");
        assert_eq!(profile.year_level.as_deref(), Some("2nd Year"));

        let without_year: UserProfile = serde_json::from_value(serde_json::json!({
            "email": "guard@campus.edu",
            "role": "Staff"
        }))
        .expect("profile without year");
        assert_eq!(without_year.year_level, None);
    }
}
