//! Initial database migration.
//!
//! Creates the enums, tables, constraints and triggers of the trip ledger.

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
        // PART 2: TABLES
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(TRAVEL_PLANS_SQL).await?;
        db.execute_unprepared(ITINERARIES_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(TRAVEL_LOGS_SQL).await?;

        // ============================================================
        // PART 3: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

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
CREATE TYPE travel_status AS ENUM (
    'planning', 'confirmed', 'in_progress', 'completed', 'cancelled'
);

CREATE TYPE activity_type AS ENUM (
    'transportation', 'accommodation', 'sightseeing', 'dining',
    'shopping', 'entertainment', 'other'
);

CREATE TYPE expense_category AS ENUM (
    'transportation', 'accommodation', 'food', 'sightseeing', 'shopping',
    'entertainment', 'insurance', 'visa', 'other'
);

CREATE TYPE privacy_level AS ENUM ('private', 'public', 'friends');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username VARCHAR(50) NOT NULL UNIQUE,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    full_name VARCHAR(100),
    phone VARCHAR(32),
    avatar VARCHAR(500),
    bio TEXT,
    is_active BOOLEAN NOT NULL DEFAULT true,
    is_verified BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_username_length CHECK (char_length(username) >= 3)
);
";

const TRAVEL_PLANS_SQL: &str = r"
CREATE TABLE travel_plans (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title VARCHAR(200) NOT NULL,
    description TEXT,
    destination VARCHAR(200) NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    budget NUMERIC(19, 4),
    currency VARCHAR(3) NOT NULL DEFAULT 'CNY',
    status travel_status NOT NULL DEFAULT 'planning',
    is_public BOOLEAN NOT NULL DEFAULT false,
    share_code VARCHAR(16) UNIQUE,
    tags JSONB NOT NULL DEFAULT '[]',
    cover_image VARCHAR(500),
    total_cost NUMERIC NOT NULL DEFAULT 0,
    version BIGINT NOT NULL DEFAULT 1,
    archived_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_plan_dates CHECK (end_date >= start_date),
    CONSTRAINT chk_plan_budget CHECK (budget IS NULL OR budget >= 0),
    CONSTRAINT chk_plan_currency CHECK (
        currency IN ('CNY', 'USD', 'EUR', 'JPY', 'GBP', 'HKD', 'KRW', 'THB', 'SGD', 'AUD')
    ),
    CONSTRAINT chk_share_code_public CHECK (share_code IS NULL OR is_public)
);

CREATE INDEX idx_travel_plans_owner ON travel_plans(owner_id, created_at DESC);
CREATE INDEX idx_travel_plans_archivable ON travel_plans(end_date)
    WHERE status = 'completed' AND archived_at IS NULL;
";

const ITINERARIES_SQL: &str = r"
CREATE TABLE itineraries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    plan_id UUID NOT NULL REFERENCES travel_plans(id) ON DELETE CASCADE,
    day_number INTEGER NOT NULL,
    date DATE NOT NULL,
    title VARCHAR(200),
    location VARCHAR(200) NOT NULL,
    activity TEXT NOT NULL,
    activity_type activity_type NOT NULL DEFAULT 'other',
    start_time TIME,
    end_time TIME,
    description TEXT,
    address VARCHAR(500),
    latitude NUMERIC(9, 6),
    longitude NUMERIC(9, 6),
    estimated_cost NUMERIC(19, 4),
    actual_cost NUMERIC(19, 4),
    booking_reference VARCHAR(100),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_day_number CHECK (day_number > 0),
    CONSTRAINT chk_itinerary_times CHECK (
        start_time IS NULL OR end_time IS NULL OR end_time >= start_time
    ),
    CONSTRAINT chk_latitude CHECK (latitude IS NULL OR latitude BETWEEN -90 AND 90),
    CONSTRAINT chk_longitude CHECK (longitude IS NULL OR longitude BETWEEN -180 AND 180),
    CONSTRAINT chk_itinerary_costs CHECK (
        (estimated_cost IS NULL OR estimated_cost >= 0)
        AND (actual_cost IS NULL OR actual_cost >= 0)
    )
);

CREATE INDEX idx_itineraries_schedule ON itineraries(plan_id, day_number, start_time);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    plan_id UUID NOT NULL REFERENCES travel_plans(id) ON DELETE CASCADE,
    itinerary_id UUID REFERENCES itineraries(id) ON DELETE SET NULL,
    recorded_by UUID NOT NULL REFERENCES users(id),
    title VARCHAR(200) NOT NULL,
    description TEXT,
    amount NUMERIC(19, 4) NOT NULL,
    currency VARCHAR(3) NOT NULL,
    exchange_rate NUMERIC(19, 10) NOT NULL DEFAULT 1,
    amount_in_base_currency NUMERIC NOT NULL,
    category expense_category NOT NULL DEFAULT 'other',
    expense_date DATE NOT NULL,
    location VARCHAR(200),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expense_amount CHECK (amount >= 0),
    CONSTRAINT chk_expense_rate CHECK (exchange_rate > 0),
    CONSTRAINT chk_expense_base CHECK (amount_in_base_currency = amount * exchange_rate),
    CONSTRAINT chk_expense_currency CHECK (
        currency IN ('CNY', 'USD', 'EUR', 'JPY', 'GBP', 'HKD', 'KRW', 'THB', 'SGD', 'AUD')
    )
);

CREATE INDEX idx_expenses_plan ON expenses(plan_id, expense_date DESC);
CREATE INDEX idx_expenses_itinerary ON expenses(itinerary_id) WHERE itinerary_id IS NOT NULL;
";

const TRAVEL_LOGS_SQL: &str = r"
CREATE TABLE travel_logs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    plan_id UUID NOT NULL REFERENCES travel_plans(id) ON DELETE CASCADE,
    itinerary_id UUID REFERENCES itineraries(id) ON DELETE SET NULL,
    author_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title VARCHAR(200) NOT NULL,
    content TEXT NOT NULL,
    log_date DATE NOT NULL,
    privacy_level privacy_level NOT NULL DEFAULT 'private',
    rating SMALLINT,
    location VARCHAR(200),
    latitude NUMERIC(9, 6),
    longitude NUMERIC(9, 6),
    weather VARCHAR(50),
    mood VARCHAR(50),
    images JSONB NOT NULL DEFAULT '[]',
    tags JSONB NOT NULL DEFAULT '[]',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_log_rating CHECK (rating IS NULL OR rating BETWEEN 1 AND 5),
    CONSTRAINT chk_log_latitude CHECK (latitude IS NULL OR latitude BETWEEN -90 AND 90),
    CONSTRAINT chk_log_longitude CHECK (longitude IS NULL OR longitude BETWEEN -180 AND 180)
);

CREATE INDEX idx_travel_logs_plan ON travel_logs(plan_id, log_date DESC);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: touch_updated_at
-- Keeps updated_at current on every UPDATE
-- ============================================================
CREATE OR REPLACE FUNCTION touch_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();
CREATE TRIGGER trg_travel_plans_updated_at BEFORE UPDATE ON travel_plans
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();
CREATE TRIGGER trg_itineraries_updated_at BEFORE UPDATE ON itineraries
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();
CREATE TRIGGER trg_expenses_updated_at BEFORE UPDATE ON expenses
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();
CREATE TRIGGER trg_travel_logs_updated_at BEFORE UPDATE ON travel_logs
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();

-- ============================================================
-- FUNCTION: check_itinerary_plan
-- An expense or log may only reference an itinerary item of its own plan
-- ============================================================
CREATE OR REPLACE FUNCTION check_itinerary_plan()
RETURNS TRIGGER AS $$
BEGIN
    IF NEW.itinerary_id IS NOT NULL AND NOT EXISTS (
        SELECT 1 FROM itineraries WHERE id = NEW.itinerary_id AND plan_id = NEW.plan_id
    ) THEN
        RAISE EXCEPTION 'itinerary % does not belong to plan %', NEW.itinerary_id, NEW.plan_id;
    END IF;
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_expenses_itinerary_plan BEFORE INSERT OR UPDATE OF itinerary_id ON expenses
    FOR EACH ROW EXECUTE FUNCTION check_itinerary_plan();
CREATE TRIGGER trg_travel_logs_itinerary_plan BEFORE INSERT OR UPDATE OF itinerary_id ON travel_logs
    FOR EACH ROW EXECUTE FUNCTION check_itinerary_plan();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS travel_logs CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS itineraries CASCADE;
DROP TABLE IF EXISTS travel_plans CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP FUNCTION IF EXISTS check_itinerary_plan();
DROP FUNCTION IF EXISTS touch_updated_at();
DROP TYPE IF EXISTS privacy_level;
DROP TYPE IF EXISTS expense_category;
DROP TYPE IF EXISTS activity_type;
DROP TYPE IF EXISTS travel_status;
";
