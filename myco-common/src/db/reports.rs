//! Sighting report queries
//!
//! Votes are applied with optimistic concurrency: read the report and its
//! version, compute the new tally, then write only if the version is still
//! the one that was read. A lost race re-reads and tries again.

use sqlx::types::Json;
use sqlx::SqliteConnection;
use tracing::{debug, info, warn};

use super::Store;
use crate::models::{Location, Report, SpeciesVote, ValidReport};
use crate::voting::Tally;
use crate::{Error, ObjectId, Result};

/// Attempts at the read-compute-write cycle before a vote gives up
pub const MAX_VOTE_ATTEMPTS: usize = 8;

const SELECT_REPORTS: &str = r#"
    SELECT id, version, lat, long, img_url, username, time_stamp, notes,
           species, alternate_species, credibility, prevalence
    FROM reports
"#;

#[derive(sqlx::FromRow)]
struct ReportRow {
    id: String,
    version: i64,
    lat: f64,
    long: f64,
    img_url: String,
    username: String,
    time_stamp: String,
    notes: Option<String>,
    species: Json<SpeciesVote>,
    alternate_species: Json<Vec<SpeciesVote>>,
    credibility: i64,
    prevalence: Option<f64>,
}

impl TryFrom<ReportRow> for Report {
    type Error = Error;

    fn try_from(row: ReportRow) -> Result<Self> {
        Ok(Report {
            id: ObjectId::parse(&row.id)?,
            location: Location {
                lat: row.lat,
                long: row.long,
            },
            img_url: row.img_url,
            username: row.username,
            time_stamp: row.time_stamp,
            notes: row.notes,
            species: row.species.0,
            alternate_species: row.alternate_species.0,
            credibility: row.credibility.clamp(0, 100) as u8,
            prevalence: row.prevalence,
            version: row.version,
        })
    }
}

impl Store {
    /// All reports in insertion order
    pub async fn list_reports(&self) -> Result<Vec<Report>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!("{SELECT_REPORTS} ORDER BY rowid"))
            .fetch_all(self.pool())
            .await?;

        rows.into_iter().map(Report::try_from).collect()
    }

    /// Fetch one report; [`Error::NotFound`] if the id matches nothing
    pub async fn get_report(&self, id: ObjectId) -> Result<Report> {
        let row = sqlx::query_as::<_, ReportRow>(&format!("{SELECT_REPORTS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await?;

        match row {
            Some(row) => Report::try_from(row),
            None => Err(Error::NotFound(format!("report {}", id))),
        }
    }

    /// Persist a new report whose only candidate is the submitted species
    pub async fn create_report(&self, submission: ValidReport) -> Result<Report> {
        let tally = Tally::open(submission.species);
        let report = Report {
            id: ObjectId::generate(),
            location: submission.location,
            img_url: submission.img_url,
            username: submission.username,
            time_stamp: submission.time_stamp,
            notes: submission.notes,
            species: tally.species,
            alternate_species: tally.alternate_species,
            credibility: tally.credibility,
            prevalence: submission.prevalence,
            version: 0,
        };

        let mut conn = self.pool().acquire().await?;
        insert_report(&mut *conn, &report).await?;

        info!("Created report {} ({})", report.id, report.species.species);
        Ok(report)
    }

    /// Remove a report, returning it exactly as stored
    pub async fn delete_report(&self, id: ObjectId) -> Result<Report> {
        let row = sqlx::query_as::<_, ReportRow>(
            r#"
            DELETE FROM reports
            WHERE id = ?
            RETURNING id, version, lat, long, img_url, username, time_stamp, notes,
                      species, alternate_species, credibility, prevalence
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await?;

        match row {
            Some(row) => {
                info!("Deleted report {}", id);
                Report::try_from(row)
            }
            None => Err(Error::NotFound(format!("report {}", id))),
        }
    }

    /// Record a vote for `suggested` on report `id`
    ///
    /// Fails with [`Error::UnknownSpecies`] if `suggested` is not in the
    /// catalog, [`Error::NotFound`] if the report does not exist, and
    /// [`Error::Conflict`] if every optimistic attempt lost a race.
    pub async fn cast_vote(&self, id: ObjectId, suggested: &str) -> Result<Report> {
        if !self.species_exists(suggested).await? {
            return Err(Error::UnknownSpecies(suggested.to_string()));
        }

        for attempt in 1..=MAX_VOTE_ATTEMPTS {
            let current = self.get_report(id).await?;
            let tally = Tally {
                species: current.species.clone(),
                alternate_species: current.alternate_species.clone(),
                credibility: current.credibility,
            }
            .cast(suggested);

            let updated = sqlx::query(
                r#"
                UPDATE reports
                SET species = ?, alternate_species = ?, credibility = ?, version = version + 1
                WHERE id = ? AND version = ?
                "#,
            )
            .bind(Json(&tally.species))
            .bind(Json(&tally.alternate_species))
            .bind(i64::from(tally.credibility))
            .bind(id.to_string())
            .bind(current.version)
            .execute(self.pool())
            .await?
            .rows_affected();

            if updated == 1 {
                debug!(
                    "Vote for '{}' on report {} -> leader '{}' ({}%)",
                    suggested, id, tally.species.species, tally.credibility
                );
                return Ok(Report {
                    species: tally.species,
                    alternate_species: tally.alternate_species,
                    credibility: tally.credibility,
                    version: current.version + 1,
                    ..current
                });
            }

            warn!(
                "Vote on report {} lost a concurrent update (attempt {}/{})",
                id, attempt, MAX_VOTE_ATTEMPTS
            );
        }

        Err(Error::Conflict(format!(
            "report {} changed during {} vote attempts",
            id, MAX_VOTE_ATTEMPTS
        )))
    }
}

pub(super) async fn insert_report(conn: &mut SqliteConnection, report: &Report) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO reports (
            id, version, lat, long, img_url, username, time_stamp, notes,
            species, alternate_species, credibility, prevalence
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(report.id.to_string())
    .bind(report.version)
    .bind(report.location.lat)
    .bind(report.location.long)
    .bind(&report.img_url)
    .bind(&report.username)
    .bind(&report.time_stamp)
    .bind(&report.notes)
    .bind(Json(&report.species))
    .bind(Json(&report.alternate_species))
    .bind(i64::from(report.credibility))
    .bind(report.prevalence)
    .execute(conn)
    .await?;

    Ok(())
}
