//! Sponsor and influencer records.
//!
//! The marketplace only needs enough of each party to resolve ids, label
//! reports and reject requests that reference someone who does not exist.

use chrono::{DateTime, Utc};

use super::validation::required_text;
use super::{InfluencerId, SponsorId, ValidationError};

const NAME_MAX: usize = 100;
const LABEL_MAX: usize = 100;

/// An advertiser.
#[derive(Debug, Clone, PartialEq)]
pub struct Sponsor {
    /// Sponsor id.
    pub id: SponsorId,
    /// Display name.
    pub name: String,
    /// Industry the sponsor operates in.
    pub industry: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl Sponsor {
    /// Validates and creates a sponsor.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for blank or oversized fields.
    pub fn register(name: &str, industry: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: SponsorId::new(),
            name: required_text("name", name, NAME_MAX)?,
            industry: required_text("industry", industry, LABEL_MAX)?,
            created_at: Utc::now(),
        })
    }
}

/// Unvalidated influencer registration fields.
#[derive(Debug, Clone)]
pub struct InfluencerDraft {
    /// Display name.
    pub name: String,
    /// Content category (e.g. `"lifestyle"`).
    pub category: String,
    /// Niche within the category.
    pub niche: String,
    /// Audience size, e.g. `"12.5K"` or `"3M"`.
    pub reach: String,
    /// Social networks the influencer publishes on.
    pub social_networks: Vec<String>,
}

/// A content creator.
#[derive(Debug, Clone, PartialEq)]
pub struct Influencer {
    /// Influencer id.
    pub id: InfluencerId,
    /// Display name.
    pub name: String,
    /// Content category.
    pub category: String,
    /// Niche within the category.
    pub niche: String,
    /// Audience size in followers.
    pub reach: u64,
    /// Social networks, trimmed and de-duplicated.
    pub social_networks: Vec<String>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl Influencer {
    /// Validates and creates an influencer.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for blank/oversized fields or an
    /// unparsable reach.
    pub fn register(draft: &InfluencerDraft) -> Result<Self, ValidationError> {
        let mut social_networks: Vec<String> = draft
            .social_networks
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        social_networks.sort();
        social_networks.dedup();

        Ok(Self {
            id: InfluencerId::new(),
            name: required_text("name", &draft.name, NAME_MAX)?,
            category: required_text("category", &draft.category, LABEL_MAX)?,
            niche: required_text("niche", &draft.niche, LABEL_MAX)?,
            reach: parse_reach(&draft.reach)?,
            social_networks,
            created_at: Utc::now(),
        })
    }
}

/// Largest storable reach; the column is a signed 64-bit integer.
pub const MAX_REACH: u64 = i64::MAX.unsigned_abs();

/// Parses an audience size such as `"850"`, `"12.5K"`, `"3M"` or `"1b"`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidReach`] if the string is not a
/// non-negative number with an optional K/M/B suffix, or if the result
/// exceeds [`MAX_REACH`].
pub fn parse_reach(input: &str) -> Result<u64, ValidationError> {
    let invalid = || ValidationError::InvalidReach(input.to_string());
    let s = input.trim();
    let (number, multiplier) = match s.chars().last().map(|c| c.to_ascii_uppercase()) {
        Some('K') => (s.get(..s.len() - 1), 1_000.0),
        Some('M') => (s.get(..s.len() - 1), 1_000_000.0),
        Some('B') => (s.get(..s.len() - 1), 1_000_000_000.0),
        Some(_) => {
            return s
                .parse::<u64>()
                .ok()
                .filter(|n| *n <= MAX_REACH)
                .ok_or_else(invalid);
        }
        None => return Err(invalid()),
    };
    let value: f64 = number
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .and_then(|n| n.parse().ok())
        .ok_or_else(invalid)?;
    let scaled = value * multiplier;
    // Rounds up to 2^63, so `>=` below keeps the cast in range.
    #[allow(clippy::cast_precision_loss)]
    let limit = MAX_REACH as f64;
    if !scaled.is_finite() || scaled < 0.0 || scaled >= limit {
        return Err(invalid());
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let reach = scaled as u64;
    Ok(reach)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suffixed_reach() {
        assert_eq!(parse_reach("850"), Ok(850));
        assert_eq!(parse_reach("12.5K"), Ok(12_500));
        assert_eq!(parse_reach("3M"), Ok(3_000_000));
        assert_eq!(parse_reach("1.2b"), Ok(1_200_000_000));
        assert_eq!(parse_reach(" 40k "), Ok(40_000));
    }

    #[test]
    fn rejects_garbage_reach() {
        for bad in ["", "K", "lots", "-3M", "1.5", "M5"] {
            assert!(parse_reach(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_reach_beyond_storable_range() {
        for huge in ["1e30B", "9223372036854775808", "18446744073709551615", "10000000000B"] {
            assert_eq!(
                parse_reach(huge),
                Err(ValidationError::InvalidReach(huge.to_string())),
                "{huge:?} should be rejected"
            );
        }
        assert_eq!(parse_reach("9223372036854775807"), Ok(MAX_REACH));
        assert_eq!(parse_reach("9000000000B"), Ok(9_000_000_000_000_000_000));
    }

    #[test]
    fn register_normalizes_networks() {
        let draft = InfluencerDraft {
            name: "Ava Lens".to_string(),
            category: "lifestyle".to_string(),
            niche: "travel".to_string(),
            reach: "250K".to_string(),
            social_networks: vec![
                "Instagram".to_string(),
                " youtube".to_string(),
                "instagram".to_string(),
                String::new(),
            ],
        };
        let Ok(infl) = Influencer::register(&draft) else {
            return;
        };
        assert_eq!(infl.reach, 250_000);
        assert_eq!(infl.social_networks, vec!["instagram", "youtube"]);
    }

    #[test]
    fn sponsor_requires_industry() {
        assert_eq!(
            Sponsor::register("Acme", " ").err(),
            Some(ValidationError::EmptyField("industry"))
        );
    }
}
