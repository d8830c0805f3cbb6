//! Initial database migration.
//!
//! Creates the enum types, core tables, and indexes for the rental
//! marketplace schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: ACCOUNTS
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: PROPERTIES & FACILITIES
        // ============================================================
        db.execute_unprepared(PROPERTIES_SQL).await?;
        db.execute_unprepared(FACILITIES_SQL).await?;
        db.execute_unprepared(PROPERTY_FACILITIES_SQL).await?;

        // ============================================================
        // PART 4: RATINGS
        // ============================================================
        db.execute_unprepared(RATINGS_SQL).await?;

        // ============================================================
        // PART 5: BOOKINGS
        // ============================================================
        db.execute_unprepared(BOOKINGS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Booking lifecycle
CREATE TYPE booking_status AS ENUM (
    'pending',
    'confirmed',
    'cancelled',
    'completed'
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    full_name VARCHAR(255) NOT NULL,
    -- Spendable balance; the check backs up the application-level
    -- guarantee that no debit path ever takes it below zero.
    points BIGINT NOT NULL DEFAULT 0 CHECK (points >= 0),
    is_admin BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_accounts_email ON accounts(email);
";

const PROPERTIES_SQL: &str = r"
CREATE TABLE properties (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL REFERENCES accounts(id),
    name VARCHAR(255) NOT NULL,
    description TEXT,
    address VARCHAR(500) NOT NULL,
    price_per_night BIGINT NOT NULL CHECK (price_per_night >= 0),
    image_url TEXT,
    -- Derived: mean of this property's rating rows, 0 with none.
    rating_avg NUMERIC(4,2) NOT NULL DEFAULT 0,
    is_listed BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_properties_owner ON properties(owner_id);
CREATE INDEX idx_properties_listed ON properties(is_listed);
";

const FACILITIES_SQL: &str = r"
CREATE TABLE facilities (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PROPERTY_FACILITIES_SQL: &str = r"
CREATE TABLE property_facilities (
    property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    facility_id UUID NOT NULL REFERENCES facilities(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (property_id, facility_id)
);
";

const RATINGS_SQL: &str = r"
CREATE TABLE ratings (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id),
    property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    score SMALLINT NOT NULL,
    comment TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_ratings_property ON ratings(property_id);
CREATE INDEX idx_ratings_account ON ratings(account_id);
";

const BOOKINGS_SQL: &str = r"
CREATE TABLE bookings (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id),
    property_id UUID NOT NULL REFERENCES properties(id),
    start_date DATE NOT NULL,
    end_date DATE NOT NULL CHECK (end_date > start_date),
    status booking_status NOT NULL DEFAULT 'pending',
    payment_method VARCHAR(50) NOT NULL DEFAULT 'points',
    payment_status VARCHAR(50) NOT NULL DEFAULT 'paid',
    total_amount BIGINT NOT NULL CHECK (total_amount >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_bookings_account ON bookings(account_id);
CREATE INDEX idx_bookings_property ON bookings(property_id);
-- The daily sweep scans confirmed bookings by end date.
CREATE INDEX idx_bookings_status_end ON bookings(status, end_date);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS bookings;
DROP TABLE IF EXISTS ratings;
DROP TABLE IF EXISTS property_facilities;
DROP TABLE IF EXISTS facilities;
DROP TABLE IF EXISTS properties;
DROP TABLE IF EXISTS accounts;
DROP TYPE IF EXISTS booking_status;
";
