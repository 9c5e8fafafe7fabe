//! Score-based rank tiers for forum users.
//!
//! A user's rank is derived from their integer score via fixed thresholds
//! and is never stored.

use std::fmt;

use serde::Serialize;

/// Rank tier derived from a user's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum Rank {
    /// score <= 100
    Rookie,
    /// score <= 200
    Beginner,
    /// score <= 300
    Intermediate,
    /// score <= 400
    Expert,
    /// score > 400
    Master,
}

impl Rank {
    /// Derive the rank tier for a score.
    pub fn from_score(score: i64) -> Self {
        if score <= 100 {
            Rank::Rookie
        } else if score <= 200 {
            Rank::Beginner
        } else if score <= 300 {
            Rank::Intermediate
        } else if score <= 400 {
            Rank::Expert
        } else {
            Rank::Master
        }
    }

    /// Get the display label for this rank.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Rookie => "Rookie",
            Rank::Beginner => "Beginner",
            Rank::Intermediate => "Intermediate",
            Rank::Expert => "Expert",
            Rank::Master => "Master",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_thresholds() {
        assert_eq!(Rank::from_score(0), Rank::Rookie);
        assert_eq!(Rank::from_score(100), Rank::Rookie);
        assert_eq!(Rank::from_score(101), Rank::Beginner);
        assert_eq!(Rank::from_score(200), Rank::Beginner);
        assert_eq!(Rank::from_score(201), Rank::Intermediate);
        assert_eq!(Rank::from_score(300), Rank::Intermediate);
        assert_eq!(Rank::from_score(301), Rank::Expert);
        assert_eq!(Rank::from_score(400), Rank::Expert);
        assert_eq!(Rank::from_score(401), Rank::Master);
        assert_eq!(Rank::from_score(10_000), Rank::Master);
    }

    #[test]
    fn test_negative_score_is_rookie() {
        assert_eq!(Rank::from_score(-50), Rank::Rookie);
    }

    #[test]
    fn test_rank_display() {
        assert_eq!(Rank::Rookie.to_string(), "Rookie");
        assert_eq!(Rank::Master.to_string(), "Master");
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::Rookie < Rank::Beginner);
        assert!(Rank::Expert < Rank::Master);
    }

    #[test]
    fn test_rank_serialize() {
        let json = serde_json::to_string(&Rank::Intermediate).unwrap();
        assert_eq!(json, "\"Intermediate\"");
    }
}
