//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Review moderation status.
///
/// Gates public visibility of a review: submissions start out `pending`
/// and become `active` once approved. Stored in the database as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Submitted but not yet moderated; hidden from product pages.
    #[default]
    Pending,
    /// Approved by a moderator; publicly visible.
    Active,
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
        }
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            _ => Err(format!("invalid review status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrip() {
        for status in [ReviewStatus::Pending, ReviewStatus::Active] {
            let parsed: ReviewStatus = status.to_string().parse().expect("parse");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!("approved".parse::<ReviewStatus>().is_err());
        assert!("".parse::<ReviewStatus>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ReviewStatus::Pending).expect("serialize");
        assert_eq!(json, "\"pending\"");
    }
}
