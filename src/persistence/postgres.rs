//! PostgreSQL implementation of the persistence layer.
//!
//! Every mutating call runs in its own transaction. Lifecycle transitions
//! and campaign edits load the row with `SELECT ... FOR UPDATE` so two
//! concurrent operations on the same row serialize instead of overwriting
//! each other. The one-request-per-pair rule is a unique index; its
//! violation is mapped to [`MarketplaceError::DuplicateRequest`].

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::models::{
    AD_REQUEST_COLUMNS, AdRequestRow, CAMPAIGN_COLUMNS, CampaignRow, INFLUENCER_COLUMNS,
    InfluencerRow, SPONSOR_COLUMNS, SponsorRow,
};
use super::{AdRequestFilter, CampaignFilter, InfluencerFilter, MarketplaceStore};
use crate::config::MarketplaceConfig;
use crate::domain::{
    AdRequest, AdRequestId, Campaign, CampaignDraft, CampaignId, Influencer, InfluencerId,
    PartyRole, Sponsor, SponsorId, Transition,
};
use crate::error::MarketplaceError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wraps an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError::Persistence`] if the database is
    /// unreachable within the connect timeout.
    pub async fn connect(config: &MarketplaceConfig) -> Result<Self, MarketplaceError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(config.database_connect_timeout)
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError::Persistence`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), MarketplaceError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| MarketplaceError::Persistence(e.to_string()))
    }
}

/// Maps constraint violations on insert to domain errors.
fn map_insert_error(err: sqlx::Error, request: &AdRequest) -> MarketplaceError {
    let sqlx::Error::Database(db) = &err else {
        return err.into();
    };
    if db.is_unique_violation() {
        if let Some(influencer_id) = request.influencer_id() {
            return MarketplaceError::DuplicateRequest {
                campaign_id: request.campaign_id(),
                influencer_id,
            };
        }
    }
    if db.is_foreign_key_violation() {
        match db.constraint() {
            Some("ad_requests_campaign_id_fkey") => {
                return MarketplaceError::not_found("campaign", request.campaign_id());
            }
            Some("ad_requests_sponsor_id_fkey") => {
                return MarketplaceError::not_found("sponsor", request.sponsor_id());
            }
            Some("ad_requests_influencer_id_fkey") => {
                if let Some(id) = request.influencer_id() {
                    return MarketplaceError::not_found("influencer", id);
                }
            }
            _ => {}
        }
    }
    err.into()
}

async fn fetch_ad_request_for_update(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    id: AdRequestId,
) -> Result<AdRequest, MarketplaceError> {
    let row = sqlx::query_as::<_, AdRequestRow>(&format!(
        "SELECT {AD_REQUEST_COLUMNS} FROM ad_requests WHERE id = $1 FOR UPDATE"
    ))
    .bind(Uuid::from(id))
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| MarketplaceError::not_found("ad request", id))?;
    AdRequest::try_from(row)
}

impl MarketplaceStore for PostgresStore {
    async fn insert_sponsor(&self, sponsor: Sponsor) -> Result<Sponsor, MarketplaceError> {
        sqlx::query("INSERT INTO sponsors (id, name, industry, created_at) VALUES ($1, $2, $3, $4)")
            .bind(Uuid::from(sponsor.id))
            .bind(&sponsor.name)
            .bind(&sponsor.industry)
            .bind(sponsor.created_at)
            .execute(&self.pool)
            .await?;
        Ok(sponsor)
    }

    async fn get_sponsor(&self, id: SponsorId) -> Result<Sponsor, MarketplaceError> {
        let row = sqlx::query_as::<_, SponsorRow>(&format!(
            "SELECT {SPONSOR_COLUMNS} FROM sponsors WHERE id = $1"
        ))
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| MarketplaceError::not_found("sponsor", id))?;
        Ok(row.into())
    }

    async fn list_sponsors(&self) -> Result<Vec<Sponsor>, MarketplaceError> {
        let rows = sqlx::query_as::<_, SponsorRow>(&format!(
            "SELECT {SPONSOR_COLUMNS} FROM sponsors ORDER BY name, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Sponsor::from).collect())
    }

    async fn insert_influencer(&self, influencer: Influencer) -> Result<Influencer, MarketplaceError> {
        let reach = i64::try_from(influencer.reach).map_err(|_| {
            MarketplaceError::InvalidRequest(format!("reach {} is too large", influencer.reach))
        })?;
        sqlx::query(
            "INSERT INTO influencers (id, name, category, niche, reach, social_networks, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(Uuid::from(influencer.id))
        .bind(&influencer.name)
        .bind(&influencer.category)
        .bind(&influencer.niche)
        .bind(reach)
        .bind(&influencer.social_networks)
        .bind(influencer.created_at)
        .execute(&self.pool)
        .await?;
        Ok(influencer)
    }

    async fn get_influencer(&self, id: InfluencerId) -> Result<Influencer, MarketplaceError> {
        let row = sqlx::query_as::<_, InfluencerRow>(&format!(
            "SELECT {INFLUENCER_COLUMNS} FROM influencers WHERE id = $1"
        ))
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| MarketplaceError::not_found("influencer", id))?;
        Influencer::try_from(row)
    }

    async fn list_influencers(
        &self,
        filter: InfluencerFilter,
    ) -> Result<Vec<Influencer>, MarketplaceError> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {INFLUENCER_COLUMNS} FROM influencers WHERE TRUE"));
        if let Some(needle) = filter.name_contains {
            qb.push(" AND strpos(lower(name), lower(")
                .push_bind(needle)
                .push(")) > 0");
        }
        qb.push(" ORDER BY name, id");

        let rows = qb.build_query_as::<InfluencerRow>().fetch_all(&self.pool).await?;
        rows.into_iter().map(Influencer::try_from).collect()
    }

    async fn insert_campaign(&self, campaign: Campaign) -> Result<Campaign, MarketplaceError> {
        let result = sqlx::query(
            "INSERT INTO campaigns (id, sponsor_id, title, description, image, niche, budget, \
             is_public, start_date, end_date, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(Uuid::from(campaign.id()))
        .bind(Uuid::from(campaign.sponsor_id()))
        .bind(campaign.title())
        .bind(campaign.description())
        .bind(campaign.image())
        .bind(campaign.niche())
        .bind(campaign.budget().get())
        .bind(campaign.is_public())
        .bind(campaign.start_date())
        .bind(campaign.end_date())
        .bind(campaign.created_at())
        .execute(&self.pool)
        .await;
        match result {
            Ok(_) => Ok(campaign),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(MarketplaceError::not_found("sponsor", campaign.sponsor_id()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_campaign(&self, id: CampaignId) -> Result<Campaign, MarketplaceError> {
        let row = sqlx::query_as::<_, CampaignRow>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1"
        ))
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| MarketplaceError::not_found("campaign", id))?;
        Campaign::try_from(row)
    }

    async fn list_campaigns(&self, filter: CampaignFilter) -> Result<Vec<Campaign>, MarketplaceError> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE TRUE"));
        if let Some(sponsor_id) = filter.sponsor_id {
            qb.push(" AND sponsor_id = ").push_bind(Uuid::from(sponsor_id));
        }
        if filter.public_only {
            qb.push(" AND is_public");
        }
        if let Some(needle) = filter.title_contains {
            qb.push(" AND strpos(lower(title), lower(")
                .push_bind(needle)
                .push(")) > 0");
        }
        qb.push(" ORDER BY created_at DESC, id");

        let rows = qb.build_query_as::<CampaignRow>().fetch_all(&self.pool).await?;
        rows.into_iter().map(Campaign::try_from).collect()
    }

    async fn update_campaign(
        &self,
        id: CampaignId,
        draft: CampaignDraft,
    ) -> Result<Campaign, MarketplaceError> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, CampaignRow>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1 FOR UPDATE"
        ))
        .bind(Uuid::from(id))
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| MarketplaceError::not_found("campaign", id))?;
        let mut campaign = Campaign::try_from(row)?;
        campaign.revise(&draft)?;

        sqlx::query(
            "UPDATE campaigns SET title = $2, description = $3, image = $4, niche = $5, \
             budget = $6, is_public = $7, start_date = $8, end_date = $9 WHERE id = $1",
        )
        .bind(Uuid::from(id))
        .bind(campaign.title())
        .bind(campaign.description())
        .bind(campaign.image())
        .bind(campaign.niche())
        .bind(campaign.budget().get())
        .bind(campaign.is_public())
        .bind(campaign.start_date())
        .bind(campaign.end_date())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(campaign)
    }

    async fn delete_campaign(&self, id: CampaignId) -> Result<u64, MarketplaceError> {
        let mut tx = self.pool.begin().await?;
        let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM campaigns WHERE id = $1 FOR UPDATE")
            .bind(Uuid::from(id))
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(MarketplaceError::not_found("campaign", id));
        }
        let removed = sqlx::query("DELETE FROM ad_requests WHERE campaign_id = $1")
            .bind(Uuid::from(id))
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(removed)
    }

    async fn insert_ad_request(&self, request: AdRequest) -> Result<AdRequest, MarketplaceError> {
        let row = AdRequestRow::from_domain(&request);
        let result = sqlx::query(
            "INSERT INTO ad_requests (id, campaign_id, sponsor_id, influencer_id, ad_name, \
             description, terms, payment, modified_terms, modified_payment, negotiation_status, \
             status, created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(row.id)
        .bind(row.campaign_id)
        .bind(row.sponsor_id)
        .bind(row.influencer_id)
        .bind(&row.ad_name)
        .bind(&row.description)
        .bind(&row.terms)
        .bind(row.payment)
        .bind(&row.modified_terms)
        .bind(row.modified_payment)
        .bind(&row.negotiation_status)
        .bind(&row.status)
        .bind(&row.created_by)
        .bind(row.created_at)
        .execute(&self.pool)
        .await;
        match result {
            Ok(_) => Ok(request),
            Err(e) => Err(map_insert_error(e, &request)),
        }
    }

    async fn get_ad_request(&self, id: AdRequestId) -> Result<AdRequest, MarketplaceError> {
        let row = sqlx::query_as::<_, AdRequestRow>(&format!(
            "SELECT {AD_REQUEST_COLUMNS} FROM ad_requests WHERE id = $1"
        ))
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| MarketplaceError::not_found("ad request", id))?;
        AdRequest::try_from(row)
    }

    async fn list_ad_requests(
        &self,
        filter: AdRequestFilter,
    ) -> Result<Vec<AdRequest>, MarketplaceError> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {AD_REQUEST_COLUMNS} FROM ad_requests WHERE TRUE"));
        if let Some(id) = filter.campaign_id {
            qb.push(" AND campaign_id = ").push_bind(Uuid::from(id));
        }
        if let Some(id) = filter.sponsor_id {
            qb.push(" AND sponsor_id = ").push_bind(Uuid::from(id));
        }
        if let Some(id) = filter.influencer_id {
            qb.push(" AND influencer_id = ").push_bind(Uuid::from(id));
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(role) = filter.created_by {
            qb.push(" AND created_by = ").push_bind(role.as_str());
        }
        qb.push(" ORDER BY created_at DESC, id");

        let rows = qb.build_query_as::<AdRequestRow>().fetch_all(&self.pool).await?;
        rows.into_iter().map(AdRequest::try_from).collect()
    }

    async fn transition_ad_request(
        &self,
        id: AdRequestId,
        actor: PartyRole,
        transition: Transition,
    ) -> Result<AdRequest, MarketplaceError> {
        let mut tx = self.pool.begin().await?;
        let mut request = fetch_ad_request_for_update(&mut tx, id).await?;
        // A refused transition drops `tx`, which rolls back and releases the lock.
        request.apply(actor, transition)?;

        let row = AdRequestRow::from_domain(&request);
        sqlx::query(
            "UPDATE ad_requests SET terms = $2, payment = $3, modified_terms = $4, \
             modified_payment = $5, negotiation_status = $6, status = $7, created_by = $8 \
             WHERE id = $1",
        )
        .bind(row.id)
        .bind(&row.terms)
        .bind(row.payment)
        .bind(&row.modified_terms)
        .bind(row.modified_payment)
        .bind(&row.negotiation_status)
        .bind(&row.status)
        .bind(&row.created_by)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(request)
    }

    async fn delete_ad_request(&self, id: AdRequestId) -> Result<AdRequest, MarketplaceError> {
        let row = sqlx::query_as::<_, AdRequestRow>(&format!(
            "DELETE FROM ad_requests WHERE id = $1 RETURNING {AD_REQUEST_COLUMNS}"
        ))
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| MarketplaceError::not_found("ad request", id))?;
        AdRequest::try_from(row)
    }
}
