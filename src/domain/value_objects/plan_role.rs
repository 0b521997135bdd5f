//! Roles a user can hold on a plan.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a plan member, stored as text in `plan_members.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PlanRole {
    Owner,
    Editor,
    #[default]
    Viewer,
}

impl PlanRole {
    /// Convert from database string representation.
    ///
    /// Unknown values degrade to the least privileged role.
    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "owner" => Self::Owner,
            "editor" => Self::Editor,
            _ => Self::Viewer,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for PlanRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Owner", PlanRole::Owner)]
    #[test_case("owner", PlanRole::Owner)]
    #[test_case("EDITOR", PlanRole::Editor)]
    #[test_case("Viewer", PlanRole::Viewer)]
    #[test_case("admin", PlanRole::Viewer)]
    fn parses_database_values(raw: &str, expected: PlanRole) {
        assert_eq!(PlanRole::from_str(raw), expected);
    }

    #[test]
    fn serializes_with_capitalized_names() {
        assert_eq!(serde_json::to_string(&PlanRole::Owner).unwrap(), "\"Owner\"");
    }
}
