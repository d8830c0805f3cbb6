//! Booking repository: the atomic point-debit write path and the
//! booking lifecycle.
//!
//! `create_booking` is the only code path that reduces an account's
//! point balance. It runs as a single database transaction with the
//! account row locked `FOR UPDATE`, so concurrent debits against the
//! same account are serialized: the booking insert and the debit commit
//! together or not at all.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::Expr,
};
use tracing::info;
use uuid::Uuid;

use stayledger_core::booking::{BookingError as RuleError, DateRange, PaymentMethod, check_debit};
use stayledger_shared::Points;

use crate::entities::{accounts, bookings, properties, sea_orm_active_enums::BookingStatus};

/// Error types for booking operations.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Booking not found.
    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Property not found.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// A business rule rejected the operation (insufficient balance,
    /// bad date range, disallowed status transition).
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a booking.
#[derive(Debug, Clone)]
pub struct CreateBookingInput {
    /// The paying account.
    pub account_id: Uuid,
    /// The property being booked.
    pub property_id: Uuid,
    /// Stay period.
    pub range: DateRange,
    /// Total price in points; debited eagerly at creation.
    pub total_amount: Points,
    /// How the booking is paid for.
    pub payment_method: PaymentMethod,
}

/// Booking repository for the debit path and lifecycle updates.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    db: DatabaseConnection,
}

impl BookingRepository {
    /// Creates a new booking repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a booking and debits the account, atomically.
    ///
    /// Runs inside one database transaction:
    /// 1. Lock the account row (`SELECT ... FOR UPDATE`); concurrent
    ///    debits for the same account wait here.
    /// 2. Verify the property exists.
    /// 3. Check sufficiency against the locked balance.
    /// 4. Insert the booking with `payment_status = "paid"` and write
    ///    the reduced balance.
    /// 5. Commit. Any failure rolls the whole scope back: a debit
    ///    without its booking row (or the reverse) is never observable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account or property does not exist
    /// - The balance does not cover `total_amount` (no mutation occurs)
    /// - The database transaction fails
    pub async fn create_booking(
        &self,
        input: CreateBookingInput,
    ) -> Result<bookings::Model, BookingError> {
        let txn = self.db.begin().await?;

        // Exclusive lock serializes debits per account: a concurrent
        // create_booking for this account blocks until we commit or
        // roll back, and then sees the post-debit balance.
        let account = accounts::Entity::find_by_id(input.account_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(BookingError::AccountNotFound(input.account_id))?;

        let property = properties::Entity::find_by_id(input.property_id)
            .one(&txn)
            .await?
            .ok_or(BookingError::PropertyNotFound(input.property_id))?;

        // The points column carries a >= 0 check; a value that fails
        // conversion would only make the debit stricter.
        let balance = Points::new(account.points).unwrap_or(Points::ZERO);
        let remaining = check_debit(balance, input.total_amount).map_err(RuleError::from)?;

        let booking = Self::insert_booking(&txn, &input).await?;

        let now = Utc::now().into();
        let mut active: accounts::ActiveModel = account.into();
        active.points = Set(remaining.get());
        active.updated_at = Set(now);
        active.update(&txn).await?;

        txn.commit().await?;

        info!(
            booking_id = %booking.id,
            account_id = %input.account_id,
            property_id = %property.id,
            amount = %input.total_amount,
            remaining = %remaining,
            "booking created, points debited"
        );

        Ok(booking)
    }

    /// Inserts the booking row within the debit transaction.
    async fn insert_booking(
        txn: &DatabaseTransaction,
        input: &CreateBookingInput,
    ) -> Result<bookings::Model, BookingError> {
        let now = Utc::now().into();

        let booking = bookings::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(input.account_id),
            property_id: Set(input.property_id),
            start_date: Set(input.range.start),
            end_date: Set(input.range.end),
            status: Set(BookingStatus::Pending),
            payment_method: Set(input.payment_method.as_str().to_string()),
            // Points are debited eagerly at booking time, not deferred.
            payment_status: Set("paid".to_string()),
            total_amount: Set(input.total_amount.get()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(booking.insert(txn).await?)
    }

    /// Gets a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is not found or the query fails.
    pub async fn get_booking(&self, id: Uuid) -> Result<bookings::Model, BookingError> {
        bookings::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(BookingError::NotFound(id))
    }

    /// Lists bookings for an account, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<bookings::Model>, BookingError> {
        let bookings = bookings::Entity::find()
            .filter(bookings::Column::AccountId.eq(account_id))
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(bookings)
    }

    /// Confirms a pending booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is missing or not pending.
    pub async fn confirm_booking(&self, id: Uuid) -> Result<bookings::Model, BookingError> {
        self.transition(id, BookingStatus::Confirmed).await
    }

    /// Cancels a pending or confirmed booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is missing or already terminal.
    pub async fn cancel_booking(&self, id: Uuid) -> Result<bookings::Model, BookingError> {
        self.transition(id, BookingStatus::Cancelled).await
    }

    /// Completes a confirmed booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is missing or not confirmed.
    pub async fn complete_booking(&self, id: Uuid) -> Result<bookings::Model, BookingError> {
        self.transition(id, BookingStatus::Completed).await
    }

    /// Applies a status transition after validating it against the
    /// lifecycle rules.
    async fn transition(
        &self,
        id: Uuid,
        to: BookingStatus,
    ) -> Result<bookings::Model, BookingError> {
        let booking = self.get_booking(id).await?;

        let from: stayledger_core::booking::BookingStatus = booking.status.clone().into();
        from.transition_to(to.clone().into())
            .map_err(RuleError::from)?;

        let mut active: bookings::ActiveModel = booking.into();
        active.status = Set(to);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Completes every confirmed booking whose stay ended before
    /// `today`. Returns the number of bookings updated.
    ///
    /// This is the daily sweep; running it twice is harmless since only
    /// `confirmed` rows match.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn complete_expired(&self, today: NaiveDate) -> Result<u64, BookingError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let result = bookings::Entity::update_many()
            // as_enum casts to booking_status; a plain value would bind
            // as text and fail against the enum column.
            .col_expr(bookings::Column::Status, BookingStatus::Completed.as_enum())
            .col_expr(bookings::Column::UpdatedAt, Expr::value(now))
            .filter(bookings::Column::Status.eq(BookingStatus::Confirmed))
            .filter(bookings::Column::EndDate.lt(today))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            info!(count = result.rows_affected, "completed expired bookings");
        }

        Ok(result.rows_affected)
    }
}
