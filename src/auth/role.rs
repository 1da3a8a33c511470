//! Platform roles.

use serde::{Deserialize, Serialize};

/// User types known to the platform. Wire form is upper case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    /// Browses events and registers for them. Default for new accounts.
    #[default]
    Competitor,
    /// Creates and manages their own events
    Organizer,
    /// Full access to every admin dashboard
    Admin,
}

impl UserType {
    pub const ALL: [UserType; 3] = [UserType::Competitor, UserType::Organizer, UserType::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Competitor => "COMPETITOR",
            UserType::Organizer => "ORGANIZER",
            UserType::Admin => "ADMIN",
        }
    }

    /// Roles a user may pick for themselves at registration
    pub fn is_self_registrable(&self) -> bool {
        matches!(self, UserType::Competitor | UserType::Organizer)
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    /// Exact match only: "admin" or " ADMIN" are not roles.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPETITOR" => Ok(UserType::Competitor),
            "ORGANIZER" => Ok(UserType::Organizer),
            "ADMIN" => Ok(UserType::Admin),
            _ => Err(format!("Unknown user type: {}", s)),
        }
    }
}
