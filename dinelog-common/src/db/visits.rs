//! Visit queries
//!
//! The store exposes exactly two operations: append one visit and list all
//! visits newest first. Nothing is updated or deleted.

use crate::models::{VisitDraft, VisitRecord};
use crate::{uuid_utils, Error, Result};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

/// Persist `draft` under a freshly assigned id and return the stored record
///
/// Fields are stored exactly as given.
pub async fn append(pool: &SqlitePool, draft: VisitDraft) -> Result<VisitRecord> {
    let id = uuid_utils::generate();

    sqlx::query(
        r#"
        INSERT INTO visits (guid, name, location, dish, rating, date)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(&draft.name)
    .bind(&draft.location)
    .bind(&draft.dish)
    .bind(draft.rating)
    .bind(draft.date.to_string())
    .execute(pool)
    .await?;

    debug!("Stored visit {} ({})", id, draft.name);

    Ok(VisitRecord::from_draft(id, draft))
}

/// All visits ordered by date descending
///
/// Visits sharing a date are listed most recently stored first. The listing
/// is one SELECT, so it reflects a single consistent snapshot: appends that
/// commit after the statement starts are not included.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<VisitRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, name, location, dish, rating, date
        FROM visits
        ORDER BY date DESC, rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(visit_from_row).collect()
}

fn visit_from_row(row: &SqliteRow) -> Result<VisitRecord> {
    let guid: String = row.get("guid");
    let id = uuid_utils::parse(&guid)
        .map_err(|e| Error::InvalidInput(format!("visit id {}: {}", guid, e)))?;

    let date: String = row.get("date");
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|e| Error::InvalidInput(format!("visit {} date {}: {}", guid, date, e)))?;

    Ok(VisitRecord {
        id,
        name: row.get("name"),
        location: row.get("location"),
        dish: row.get("dish"),
        rating: row.get("rating"),
        date,
    })
}
