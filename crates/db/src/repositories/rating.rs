//! Rating repository and the derived-average maintenance path.
//!
//! Every rating mutation (create, update of the score or property,
//! delete) is followed by `recompute_average` on the affected
//! properties. Recomputation always re-derives the mean from the
//! current rows rather than applying a delta, so it is idempotent and
//! safe to re-run after a crash or a missed trigger.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::warn;
use uuid::Uuid;

use stayledger_core::rating::{mean_score, recompute_targets};

use crate::entities::{accounts, properties, ratings};

/// Error types for rating operations.
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    /// Rating not found.
    #[error("Rating not found: {0}")]
    NotFound(Uuid),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Property not found.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a rating.
#[derive(Debug, Clone)]
pub struct CreateRatingInput {
    /// The rating account.
    pub account_id: Uuid,
    /// The rated property.
    pub property_id: Uuid,
    /// Numeric score. The score domain is validated by the caller.
    pub score: i16,
    /// Optional free-text comment.
    pub comment: Option<String>,
}

/// Input for updating a rating. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateRatingInput {
    /// New score.
    pub score: Option<i16>,
    /// New comment (`Some(None)` clears it).
    pub comment: Option<Option<String>>,
    /// Reassign the rating to a different property.
    pub property_id: Option<Uuid>,
}

/// Rating repository with aggregate maintenance.
#[derive(Debug, Clone)]
pub struct RatingRepository {
    db: DatabaseConnection,
}

impl RatingRepository {
    /// Creates a new rating repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a rating, then recomputes the property's average.
    ///
    /// # Errors
    ///
    /// Returns an error if the account or property is missing, or the
    /// insert fails. A recompute failure after the insert committed is
    /// logged, not surfaced: the rating rows are the source of truth
    /// and the aggregate converges on the next write.
    pub async fn create_rating(
        &self,
        input: CreateRatingInput,
    ) -> Result<ratings::Model, RatingError> {
        let account = accounts::Entity::find_by_id(input.account_id)
            .one(&self.db)
            .await?;
        if account.is_none() {
            return Err(RatingError::AccountNotFound(input.account_id));
        }

        let property = properties::Entity::find_by_id(input.property_id)
            .one(&self.db)
            .await?;
        if property.is_none() {
            return Err(RatingError::PropertyNotFound(input.property_id));
        }

        let now = Utc::now().into();
        let rating = ratings::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(input.account_id),
            property_id: Set(input.property_id),
            score: Set(input.score),
            comment: Set(input.comment),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let rating = rating.insert(&self.db).await?;

        self.recompute_best_effort(rating.property_id).await;

        Ok(rating)
    }

    /// Updates a rating, then recomputes the affected averages.
    ///
    /// Recomputation is keyed off the *resulting* row's property. When
    /// the rating was reassigned, the previous property is recomputed
    /// as well, otherwise its aggregate would sit stale until an
    /// unrelated write. A pure comment edit skips recomputation.
    ///
    /// # Errors
    ///
    /// Returns an error if the rating is missing, a reassignment target
    /// does not exist, or the update fails.
    pub async fn update_rating(
        &self,
        id: Uuid,
        input: UpdateRatingInput,
    ) -> Result<ratings::Model, RatingError> {
        let rating = ratings::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RatingError::NotFound(id))?;

        let old_property = rating.property_id;
        let old_score = rating.score;

        if let Some(new_property) = input.property_id
            && new_property != old_property
        {
            let target = properties::Entity::find_by_id(new_property)
                .one(&self.db)
                .await?;
            if target.is_none() {
                return Err(RatingError::PropertyNotFound(new_property));
            }
        }

        let mut active: ratings::ActiveModel = rating.into();
        if let Some(score) = input.score {
            active.score = Set(score);
        }
        if let Some(comment) = input.comment {
            active.comment = Set(comment);
        }
        if let Some(property_id) = input.property_id {
            active.property_id = Set(property_id);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;

        let score_changed = updated.score != old_score;
        let property_changed = updated.property_id != old_property;

        if score_changed || property_changed {
            let targets = recompute_targets(old_property, updated.property_id);
            for property_id in targets.iter() {
                self.recompute_best_effort(property_id).await;
            }
        }

        Ok(updated)
    }

    /// Deletes a rating, then recomputes the property's average.
    ///
    /// The property id is captured before the delete; it is not
    /// derivable from the row afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the rating is missing or the delete fails.
    pub async fn delete_rating(&self, id: Uuid) -> Result<(), RatingError> {
        let rating = ratings::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RatingError::NotFound(id))?;

        let property_id = rating.property_id;
        rating.delete(&self.db).await?;

        self.recompute_best_effort(property_id).await;

        Ok(())
    }

    /// Lists ratings for a property, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<ratings::Model>, RatingError> {
        let ratings = ratings::Entity::find()
            .filter(ratings::Column::PropertyId.eq(property_id))
            .order_by_desc(ratings::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(ratings)
    }

    /// Recomputes a property's `rating_avg` from its current rating
    /// rows.
    ///
    /// Runs in a transaction with the property row locked, so a
    /// concurrent rating mutation cannot slip between the read of the
    /// rows and the write of the mean. Re-running without an
    /// intervening mutation leaves the value unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is missing or the transaction
    /// fails.
    pub async fn recompute_average(&self, property_id: Uuid) -> Result<(), RatingError> {
        let txn = self.db.begin().await?;

        // Lock closes the read-rows/write-average race against
        // concurrent mutations of the same property.
        let property = properties::Entity::find_by_id(property_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(RatingError::PropertyNotFound(property_id))?;

        let scores: Vec<i16> = ratings::Entity::find()
            .filter(ratings::Column::PropertyId.eq(property_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|r| r.score)
            .collect();

        let average = mean_score(&scores);

        let mut active: properties::ActiveModel = property.into();
        active.rating_avg = Set(average);
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await?;

        txn.commit().await?;

        Ok(())
    }

    /// Recomputes and logs failures instead of surfacing them: the base
    /// rating mutation already committed and stays successful.
    async fn recompute_best_effort(&self, property_id: Uuid) {
        if let Err(e) = self.recompute_average(property_id).await {
            warn!(
                property_id = %property_id,
                error = %e,
                "rating average recompute failed; aggregate converges on next write"
            );
        }
    }
}
