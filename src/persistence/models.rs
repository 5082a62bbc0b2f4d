//! Database row models and their conversion into domain types.
//!
//! Rows hold the flat column values exactly as stored. Converting a row
//! back into a domain value re-checks every invariant, so a row written
//! by something other than this service cannot smuggle an unknown status
//! or a half-staged counter-offer into the state machine.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{
    AdRequest, Campaign, Influencer, Negotiation, NegotiationStatus, PartyRole, Payment,
    RequestStatus, Sponsor, ValidationError,
};
use crate::error::MarketplaceError;

/// Columns selected for every `sponsors` query.
pub const SPONSOR_COLUMNS: &str = "id, name, industry, created_at";

/// Columns selected for every `influencers` query.
pub const INFLUENCER_COLUMNS: &str =
    "id, name, category, niche, reach, social_networks, created_at";

/// Columns selected for every `campaigns` query.
pub const CAMPAIGN_COLUMNS: &str = "id, sponsor_id, title, description, image, niche, budget, \
     is_public, start_date, end_date, created_at";

/// Columns selected for every `ad_requests` query.
pub const AD_REQUEST_COLUMNS: &str = "id, campaign_id, sponsor_id, influencer_id, ad_name, \
     description, terms, payment, modified_terms, modified_payment, negotiation_status, status, \
     created_by, created_at";

/// A row of the `sponsors` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SponsorRow {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Industry label.
    pub industry: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<SponsorRow> for Sponsor {
    fn from(row: SponsorRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            industry: row.industry,
            created_at: row.created_at,
        }
    }
}

/// A row of the `influencers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InfluencerRow {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Content category.
    pub category: String,
    /// Niche.
    pub niche: String,
    /// Audience size; `BIGINT` with a non-negative check.
    pub reach: i64,
    /// `TEXT[]` of networks.
    pub social_networks: Vec<String>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<InfluencerRow> for Influencer {
    type Error = MarketplaceError;

    fn try_from(row: InfluencerRow) -> Result<Self, Self::Error> {
        let reach = u64::try_from(row.reach)
            .map_err(|_| corrupt("influencer", row.id, &format!("negative reach {}", row.reach)))?;
        Ok(Self {
            id: row.id.into(),
            name: row.name,
            category: row.category,
            niche: row.niche,
            reach,
            social_networks: row.social_networks,
            created_at: row.created_at,
        })
    }
}

/// A row of the `campaigns` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CampaignRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning sponsor.
    pub sponsor_id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Optional image reference.
    pub image: Option<String>,
    /// Niche.
    pub niche: String,
    /// Budget.
    pub budget: f64,
    /// Public flag.
    pub is_public: bool,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CampaignRow> for Campaign {
    type Error = MarketplaceError;

    fn try_from(row: CampaignRow) -> Result<Self, Self::Error> {
        let budget = Payment::new(row.budget).map_err(|e| corrupt_with("campaign", row.id, &e))?;
        Ok(Self {
            id: row.id.into(),
            sponsor_id: row.sponsor_id.into(),
            title: row.title,
            description: row.description,
            image: row.image,
            niche: row.niche,
            budget,
            is_public: row.is_public,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
        })
    }
}

/// A row of the `ad_requests` table.
///
/// The staged counter-offer is flattened into `modified_terms` and
/// `modified_payment`; both are `NULL` unless `negotiation_status` is
/// `'pending'`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdRequestRow {
    /// Primary key.
    pub id: Uuid,
    /// Parent campaign.
    pub campaign_id: Uuid,
    /// Campaign owner.
    pub sponsor_id: Uuid,
    /// Engaged influencer.
    pub influencer_id: Option<Uuid>,
    /// Ad name.
    pub ad_name: String,
    /// Ad description.
    pub description: String,
    /// Committed terms.
    pub terms: Option<String>,
    /// Committed payment.
    pub payment: f64,
    /// Staged terms.
    pub modified_terms: Option<String>,
    /// Staged payment.
    pub modified_payment: Option<f64>,
    /// Negotiation axis.
    pub negotiation_status: String,
    /// Status axis.
    pub status: String,
    /// Latest proposer.
    pub created_by: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl AdRequestRow {
    /// Flattens a domain request into column values.
    #[must_use]
    pub fn from_domain(request: &AdRequest) -> Self {
        let staged = request.negotiation().staged();
        Self {
            id: request.id().into(),
            campaign_id: request.campaign_id().into(),
            sponsor_id: request.sponsor_id().into(),
            influencer_id: request.influencer_id().map(Into::into),
            ad_name: request.ad_name().to_string(),
            description: request.description().to_string(),
            terms: request.terms().map(str::to_string),
            payment: request.payment().get(),
            modified_terms: staged.map(|o| o.terms().to_string()),
            modified_payment: staged.map(|o| o.payment().get()),
            negotiation_status: request.negotiation_status().as_str().to_string(),
            status: request.status().as_str().to_string(),
            created_by: request.created_by().as_str().to_string(),
            created_at: request.created_at(),
        }
    }
}

impl TryFrom<AdRequestRow> for AdRequest {
    type Error = MarketplaceError;

    fn try_from(row: AdRequestRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let parse = || -> Result<Self, ValidationError> {
            let negotiation_status: NegotiationStatus = row.negotiation_status.parse()?;
            Ok(Self {
                id: row.id.into(),
                campaign_id: row.campaign_id.into(),
                sponsor_id: row.sponsor_id.into(),
                influencer_id: row.influencer_id.map(Into::into),
                ad_name: row.ad_name,
                description: row.description,
                terms: row.terms,
                payment: Payment::new(row.payment)?,
                status: row.status.parse::<RequestStatus>()?,
                negotiation: Negotiation::from_parts(
                    negotiation_status,
                    row.modified_terms,
                    row.modified_payment,
                )?,
                created_by: row.created_by.parse::<PartyRole>()?,
                created_at: row.created_at,
            })
        };
        parse().map_err(|e| corrupt_with("ad_request", id, &e))
    }
}

fn corrupt_with(table: &str, id: Uuid, e: &ValidationError) -> MarketplaceError {
    corrupt(table, id, &e.to_string())
}

fn corrupt(table: &str, id: Uuid, reason: &str) -> MarketplaceError {
    MarketplaceError::Persistence(format!("stored {table} {id} is invalid: {reason}"))
}
