//! Campaigns: sponsor-owned budgets that ad requests are opened against.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use super::validation::{optional_text, required_text};
use super::{CampaignId, Payment, SponsorId, ValidationError};

/// Maximum length of a campaign title.
pub const TITLE_MAX: usize = 100;
/// Maximum length of a campaign description.
pub const CAMPAIGN_DESCRIPTION_MAX: usize = 2000;
/// Maximum length of the image reference and niche.
pub const SHORT_FIELD_MAX: usize = 200;

/// Unvalidated campaign fields as submitted by a sponsor.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CampaignDraft {
    /// Campaign title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Optional image URL or key.
    #[serde(default)]
    pub image: Option<String>,
    /// Market niche (e.g. `"fitness"`).
    pub niche: String,
    /// Total budget; seeds the payment of campaign-derived ad requests.
    pub budget: f64,
    /// Whether influencers can discover and request this campaign.
    #[serde(default = "default_public")]
    pub is_public: bool,
    /// First day of the campaign.
    pub start_date: NaiveDate,
    /// Last day of the campaign.
    pub end_date: NaiveDate,
}

const fn default_public() -> bool {
    true
}

/// A sponsor's campaign.
#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    pub(crate) id: CampaignId,
    pub(crate) sponsor_id: SponsorId,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) image: Option<String>,
    pub(crate) niche: String,
    pub(crate) budget: Payment,
    pub(crate) is_public: bool,
    pub(crate) start_date: NaiveDate,
    pub(crate) end_date: NaiveDate,
    pub(crate) created_at: DateTime<Utc>,
}

struct Validated {
    title: String,
    description: String,
    image: Option<String>,
    niche: String,
    budget: Payment,
}

fn validate(draft: &CampaignDraft) -> Result<Validated, ValidationError> {
    if draft.end_date < draft.start_date {
        return Err(ValidationError::InvalidDateRange {
            start: draft.start_date,
            end: draft.end_date,
        });
    }
    Ok(Validated {
        title: required_text("title", &draft.title, TITLE_MAX)?,
        description: required_text("description", &draft.description, CAMPAIGN_DESCRIPTION_MAX)?,
        image: optional_text("image", draft.image.as_deref(), SHORT_FIELD_MAX)?,
        niche: required_text("niche", &draft.niche, SHORT_FIELD_MAX)?,
        budget: Payment::new(draft.budget)?,
    })
}

impl Campaign {
    /// Validates `draft` and creates a campaign owned by `sponsor_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for blank/oversized text, a negative
    /// budget, or an end date before the start date.
    pub fn create(sponsor_id: SponsorId, draft: &CampaignDraft) -> Result<Self, ValidationError> {
        let v = validate(draft)?;
        Ok(Self {
            id: CampaignId::new(),
            sponsor_id,
            title: v.title,
            description: v.description,
            image: v.image,
            niche: v.niche,
            budget: v.budget,
            is_public: draft.is_public,
            start_date: draft.start_date,
            end_date: draft.end_date,
            created_at: Utc::now(),
        })
    }

    /// Replaces all editable fields. Owner, id and creation time are kept.
    ///
    /// # Errors
    ///
    /// Same as [`Campaign::create`]; on error nothing is changed.
    pub fn revise(&mut self, draft: &CampaignDraft) -> Result<(), ValidationError> {
        let v = validate(draft)?;
        self.title = v.title;
        self.description = v.description;
        self.image = v.image;
        self.niche = v.niche;
        self.budget = v.budget;
        self.is_public = draft.is_public;
        self.start_date = draft.start_date;
        self.end_date = draft.end_date;
        Ok(())
    }

    /// Campaign id.
    #[must_use]
    pub const fn id(&self) -> CampaignId {
        self.id
    }

    /// Owning sponsor.
    #[must_use]
    pub const fn sponsor_id(&self) -> SponsorId {
        self.sponsor_id
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Image reference.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Niche.
    #[must_use]
    pub fn niche(&self) -> &str {
        &self.niche
    }

    /// Budget.
    #[must_use]
    pub const fn budget(&self) -> Payment {
        self.budget
    }

    /// Whether influencers may request this campaign themselves.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.is_public
    }

    /// Start date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// End date.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CampaignDraft {
        CampaignDraft {
            title: "Back to School".to_string(),
            description: "Stationery push".to_string(),
            image: Some("   ".to_string()),
            niche: "education".to_string(),
            budget: 1200.0,
            is_public: false,
            start_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap_or_default(),
        }
    }

    #[test]
    fn create_validates_and_trims() {
        let sponsor = SponsorId::new();
        let c = Campaign::create(sponsor, &draft());
        assert!(c.is_ok());
        let c = c.ok();
        assert_eq!(c.as_ref().map(Campaign::sponsor_id), Some(sponsor));
        assert_eq!(c.as_ref().and_then(Campaign::image), None);
        assert_eq!(c.as_ref().map(|c| c.budget().get()), Some(1200.0));
        assert_eq!(c.map(|c| c.is_public()), Some(false));
    }

    #[test]
    fn rejects_inverted_dates() {
        let mut d = draft();
        std::mem::swap(&mut d.start_date, &mut d.end_date);
        assert!(matches!(
            Campaign::create(SponsorId::new(), &d),
            Err(ValidationError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn rejects_negative_budget() {
        let mut d = draft();
        d.budget = -10.0;
        assert_eq!(
            Campaign::create(SponsorId::new(), &d).err(),
            Some(ValidationError::NegativePayment(-10.0))
        );
    }

    #[test]
    fn revise_is_all_or_nothing() {
        let Ok(mut c) = Campaign::create(SponsorId::new(), &draft()) else {
            return;
        };
        let original = c.clone();

        let mut bad = draft();
        bad.title = "Renamed".to_string();
        bad.niche = String::new();
        assert!(c.revise(&bad).is_err());
        assert_eq!(c, original);

        let mut good = draft();
        good.title = "Renamed".to_string();
        good.is_public = true;
        assert!(c.revise(&good).is_ok());
        assert_eq!(c.title(), "Renamed");
        assert!(c.is_public());
        assert_eq!(c.id(), original.id());
        assert_eq!(c.created_at(), original.created_at());
    }

    #[test]
    fn draft_defaults_to_public() {
        let json = serde_json::json!({
            "title": "t",
            "description": "d",
            "niche": "n",
            "budget": 10.0,
            "start_date": "2026-01-01",
            "end_date": "2026-01-31"
        });
        let d: Result<CampaignDraft, _> = serde_json::from_value(json);
        assert!(d.is_ok_and(|d| d.is_public && d.image.is_none()));
    }
}
