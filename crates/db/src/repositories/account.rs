//! Account repository for registration, login, and point grants.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use stayledger_core::auth::{PasswordError, hash_password, verify_password};
use stayledger_shared::Points;

use crate::entities::accounts;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Email already registered.
    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Email or password did not match.
    ///
    /// Deliberately does not say which, for both the unknown-email and
    /// wrong-password cases.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Point balance overflow on a grant.
    #[error("Point grant overflows the balance for account {0}")]
    BalanceOverflow(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering an account.
#[derive(Debug, Clone)]
pub struct RegisterAccountInput {
    /// Login email, unique across accounts.
    pub email: String,
    /// Plaintext password; only the Argon2id hash is stored.
    pub password: String,
    /// Display name.
    pub full_name: String,
}

/// Account repository for registration and balance credits.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new account with a zero point balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is taken, hashing fails, or the
    /// insert fails.
    pub async fn register(
        &self,
        input: RegisterAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(&input.email))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(AccountError::DuplicateEmail(input.email));
        }

        let password_hash = hash_password(&input.password)?;

        let now = Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email),
            password_hash: Set(password_hash),
            full_name: Set(input.full_name),
            points: Set(0),
            is_admin: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let account = account.insert(&self.db).await?;
        info!(account_id = %account.id, "account registered");

        Ok(account)
    }

    /// Verifies credentials and returns the account.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` for an unknown email or a wrong
    /// password; other errors indicate hashing or database failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<accounts::Model, AccountError> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(password, &account.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing or the query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    /// Lists accounts, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<accounts::Model>, AccountError> {
        let accounts = accounts::Entity::find()
            .order_by_asc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(accounts)
    }

    /// Credits points to an account (admin grant).
    ///
    /// Takes the same row lock as the debit path, so a grant can never
    /// interleave with a concurrent debit's read-check-write.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing, the grant would
    /// overflow, or the transaction fails.
    pub async fn grant_points(
        &self,
        id: Uuid,
        amount: Points,
    ) -> Result<accounts::Model, AccountError> {
        let txn = self.db.begin().await?;

        let account = accounts::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        let balance = Points::new(account.points).unwrap_or(Points::ZERO);
        let credited = balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow(id))?;

        let mut active: accounts::ActiveModel = account.into();
        active.points = Set(credited.get());
        active.updated_at = Set(Utc::now().into());
        let account = active.update(&txn).await?;

        txn.commit().await?;

        info!(account_id = %id, amount = %amount, balance = account.points, "points granted");

        Ok(account)
    }
}
