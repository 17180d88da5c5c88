//! User profile and partial-patch updates.

use serde::{Deserialize, Serialize};

/// Profile of the signed-in (or anonymous) user.
///
/// The profile is session-only state: it is never written to, or restored
/// from, the snapshot store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub display_name: String,

    /// Company the account belongs to.
    pub company_name: String,

    /// Contact email.
    pub email: String,

    /// Whether the user is signed in.
    pub is_authenticated: bool,
}

/// A partial profile update. `None` fields leave the current value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// New display name, if changing.
    pub display_name: Option<String>,

    /// New company name, if changing.
    pub company_name: Option<String>,

    /// New contact email, if changing.
    pub email: Option<String>,

    /// New authentication flag, if changing.
    pub is_authenticated: Option<bool>,
}

impl UserProfile {
    /// Shallow-merge a patch into the profile.
    #[must_use]
    pub fn merged(mut self, patch: UserPatch) -> UserProfile {
        if let Some(display_name) = patch.display_name {
            self.display_name = display_name;
        }
        if let Some(company_name) = patch.company_name {
            self.company_name = company_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(is_authenticated) = patch.is_authenticated {
            self.is_authenticated = is_authenticated;
        }

        self
    }
}
