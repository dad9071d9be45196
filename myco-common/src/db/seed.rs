//! Data set loading
//!
//! Replaces both collections with the contents of a JSON document of the form
//! `{"mushrooms": [...], "reports": [...]}`. Reports are normalised through
//! the voting engine so the stored leader and credibility always agree with
//! the candidate list.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::mushrooms::insert_mushroom;
use super::reports::insert_report;
use super::Store;
use crate::models::{Mushroom, NewReport, Report, SpeciesVote};
use crate::voting::Tally;
use crate::{ObjectId, Result};

/// A full data set for both collections
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub mushrooms: Vec<Mushroom>,
    #[serde(default)]
    pub reports: Vec<SeedReport>,
}

/// Report entry in a data set: a submission plus optional prior votes
#[derive(Debug, Clone, Deserialize)]
pub struct SeedReport {
    #[serde(flatten)]
    pub report: NewReport,
    #[serde(default)]
    pub alternate_species: Vec<SpeciesVote>,
}

/// Counts of documents written by [`Store::seed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub mushrooms: usize,
    pub reports: usize,
}

impl SeedData {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

impl SeedReport {
    fn into_report(self) -> Result<Report> {
        let submission = self.report.validate()?;

        let tally = if self.alternate_species.is_empty() {
            Tally::open(submission.species)
        } else {
            Tally::rank(Some(submission.species.species.as_str()), self.alternate_species)
                .unwrap_or_else(|| Tally::open(submission.species.clone()))
        };

        Ok(Report {
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
        })
    }
}

impl Store {
    /// Drop every document and load `data` in a single transaction
    pub async fn seed(&self, data: &SeedData) -> Result<SeedSummary> {
        let reports = data
            .reports
            .iter()
            .cloned()
            .map(SeedReport::into_report)
            .collect::<Result<Vec<_>>>()?;

        let mut tx = self.pool().begin().await?;

        sqlx::query("DELETE FROM reports").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM mushrooms").execute(&mut *tx).await?;

        for mushroom in &data.mushrooms {
            insert_mushroom(&mut *tx, mushroom).await?;
        }
        for report in &reports {
            insert_report(&mut *tx, report).await?;
        }

        tx.commit().await?;

        let summary = SeedSummary {
            mushrooms: data.mushrooms.len(),
            reports: reports.len(),
        };
        info!(
            "Seeded {} mushrooms and {} reports",
            summary.mushrooms, summary.reports
        );
        Ok(summary)
    }
}
