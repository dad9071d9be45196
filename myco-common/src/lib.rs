//! # Mycolog Common Library
//!
//! Shared code for the Mycolog service:
//! - Document models (mushrooms, sighting reports)
//! - Document identifiers
//! - Voting and credibility engine
//! - Store (SQLite-backed document repository) and seeding
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod object_id;
pub mod voting;

pub use db::Store;
pub use error::{Error, Result};
pub use models::{Location, Mushroom, NewReport, Report, SpeciesVote, ValidReport};
pub use object_id::ObjectId;
