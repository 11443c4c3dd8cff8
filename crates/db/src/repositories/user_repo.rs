//! Repository for the `users` table.

use sqlx::PgPool;

use funnel_core::scenario::Scenario;
use funnel_core::types::{DbId, ExternalId};

use crate::models::user::User;

/// Column list for `users` queries.
const USER_COLUMNS: &str = "id, external_id, display_name, phone, is_professional, \
     is_non_professional, dominant_scenario, started_at";

/// Provides read/write operations for user profiles.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by their stable external chat identity.
    pub async fn get_by_external_id(
        pool: &PgPool,
        external_id: ExternalId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE external_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(external_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a user by external identity, creating the row on first contact.
    ///
    /// The display name is only written on insert; an existing row keeps
    /// whatever name the user later confirmed during intake.
    pub async fn get_or_create(
        pool: &PgPool,
        external_id: ExternalId,
        display_name: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (external_id, display_name) VALUES ($1, $2) \
             ON CONFLICT (external_id) DO UPDATE SET external_id = EXCLUDED.external_id \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(external_id)
            .bind(display_name)
            .fetch_one(pool)
            .await
    }

    /// Store the confirmed display name.
    pub async fn set_display_name(
        pool: &PgPool,
        id: DbId,
        display_name: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET display_name = $2 WHERE id = $1")
            .bind(id)
            .bind(display_name)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Store the confirmed phone number.
    pub async fn set_phone(pool: &PgPool, id: DbId, phone: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET phone = $2 WHERE id = $1")
            .bind(id)
            .bind(phone)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Set the professional flag from the intake goal answer.
    ///
    /// The two booleans are always written together so the tri-state stays
    /// consistent (`true, false` or `false, true`).
    pub async fn set_professional(
        pool: &PgPool,
        id: DbId,
        is_professional: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET is_professional = $2, is_non_professional = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(is_professional)
        .bind(!is_professional)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mirror the finalized dominant scenario onto the user profile.
    pub async fn set_dominant_scenario(
        pool: &PgPool,
        id: DbId,
        scenario: Scenario,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET dominant_scenario = $2 WHERE id = $1")
            .bind(id)
            .bind(scenario.as_str())
            .execute(pool)
            .await?;
        Ok(())
    }
}
