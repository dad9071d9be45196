//! Document models
//!
//! Field names follow the JSON wire format: mushrooms use camelCase,
//! reports use snake_case, and both expose their identifier as `_id`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ObjectId;

/// Month a species fruits in, either by name ("September") or number (9)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Month {
    Number(u8),
    Name(String),
}

/// Species reference record from the mushroom catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mushroom {
    #[serde(rename = "_id", default = "ObjectId::generate")]
    pub id: ObjectId,
    pub common_name: String,
    pub latin_name: String,
    pub order: String,
    pub genus: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    pub habitat: String,
    #[serde(default)]
    pub months: Vec<Month>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub toxic: bool,
    pub average_height: f64,
}

/// Sighting coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub long: f64,
}

/// A species name together with the votes it has received
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesVote {
    pub species: String,
    #[serde(default = "default_votes")]
    pub votes: u32,
}

fn default_votes() -> u32 {
    1
}

impl SpeciesVote {
    pub fn new(species: impl Into<String>, votes: u32) -> Self {
        Self {
            species: species.into(),
            votes,
        }
    }
}

/// Stored sighting report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub location: Location,
    pub img_url: String,
    pub username: String,
    pub time_stamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Current leading identification
    pub species: SpeciesVote,
    /// All candidate identifications, leader included, in insertion order
    pub alternate_species: Vec<SpeciesVote>,
    /// Percentage of all votes held by the leader
    pub credibility: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevalence: Option<f64>,
    /// Document version, bumped on every vote
    #[serde(rename = "__v", default)]
    pub version: i64,
}

/// Report submission as received from clients
///
/// Every field is optional at the wire level so that missing keys surface
/// as validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReport {
    pub location: Option<Location>,
    pub img_url: Option<String>,
    pub username: Option<String>,
    pub time_stamp: Option<String>,
    pub notes: Option<String>,
    pub species: Option<SpeciesVote>,
    pub prevalence: Option<f64>,
}

/// A submission with every required field present
#[derive(Debug, Clone, PartialEq)]
pub struct ValidReport {
    pub location: Location,
    pub img_url: String,
    pub username: String,
    pub time_stamp: String,
    pub notes: Option<String>,
    pub species: SpeciesVote,
    pub prevalence: Option<f64>,
}

impl NewReport {
    /// Check required fields: location, img_url, username, time_stamp, species
    pub fn validate(self) -> crate::Result<ValidReport> {
        let missing: Vec<&str> = [
            ("location", self.location.is_none()),
            ("img_url", self.img_url.is_none()),
            ("username", self.username.is_none()),
            ("time_stamp", self.time_stamp.is_none()),
            ("species", self.species.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        match (self.location, self.img_url, self.username, self.time_stamp, self.species) {
            (Some(location), Some(img_url), Some(username), Some(time_stamp), Some(species)) => {
                Ok(ValidReport {
                    location,
                    img_url,
                    username,
                    time_stamp,
                    notes: self.notes,
                    species,
                    prevalence: self.prevalence,
                })
            }
            _ => Err(crate::Error::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}
