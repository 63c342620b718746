//! Background archival of completed plans.
//!
//! Candidates are read without locks. Each archive is a conditional update on
//! `(id, version)` so a plan modified after it was read is skipped instead of
//! overwritten.

use chrono::{NaiveDate, Utc};
use journey_core::LedgerResult;
use journey_core::plan::TravelStatus;
use journey_core::trip::{ArchiveCandidate, ArchiveReport};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::{info, warn};
use uuid::Uuid;

use super::TripLedgerRepository;
use crate::entities::travel_plans;
use crate::repositories::mapping::{db_err, status_to_db};

impl TripLedgerRepository {
    /// Completed, unarchived plans whose trip ended before `cutoff`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn archive_candidates(&self, cutoff: NaiveDate) -> LedgerResult<Vec<ArchiveCandidate>> {
        let rows: Vec<(Uuid, i64)> = travel_plans::Entity::find()
            .select_only()
            .column(travel_plans::Column::Id)
            .column(travel_plans::Column::Version)
            .filter(travel_plans::Column::Status.eq(status_to_db(TravelStatus::Completed)))
            .filter(travel_plans::Column::ArchivedAt.is_null())
            .filter(travel_plans::Column::EndDate.lt(cutoff))
            .order_by_asc(travel_plans::Column::EndDate)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(id, version)| ArchiveCandidate {
                plan_id: id.into(),
                version,
            })
            .collect())
    }

    /// Archives the plan only if its version still matches the candidate.
    ///
    /// Returns true if the plan was archived.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn archive_if_unchanged(&self, candidate: ArchiveCandidate) -> LedgerResult<bool> {
        let now = Utc::now();
        let result = travel_plans::Entity::update_many()
            .col_expr(travel_plans::Column::ArchivedAt, Expr::value(now))
            .col_expr(travel_plans::Column::UpdatedAt, Expr::value(now))
            .col_expr(
                travel_plans::Column::Version,
                Expr::col(travel_plans::Column::Version).add(1),
            )
            .filter(travel_plans::Column::Id.eq(candidate.plan_id.into_inner()))
            .filter(travel_plans::Column::Version.eq(candidate.version))
            .filter(travel_plans::Column::ArchivedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected == 1)
    }

    /// Archives every completed plan that ended before `cutoff`.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails. Plans archived before the
    /// failure stay archived.
    pub async fn archive_completed_before(&self, cutoff: NaiveDate) -> LedgerResult<ArchiveReport> {
        let mut report = ArchiveReport::default();
        for candidate in self.archive_candidates(cutoff).await? {
            if self.archive_if_unchanged(candidate).await? {
                report.archived.push(candidate.plan_id);
            } else {
                warn!(plan_id = %candidate.plan_id, "Plan changed since it was read, skipping archive");
                report.skipped.push(candidate.plan_id);
            }
        }

        info!(
            %cutoff,
            archived = report.archived.len(),
            skipped = report.skipped.len(),
            "Archive pass finished"
        );
        Ok(report)
    }
}
