//! Mushroom catalog queries

use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::SqliteConnection;

use super::Store;
use crate::models::{Month, Mushroom};
use crate::{Error, ObjectId, Result};

const SELECT_MUSHROOMS: &str = r#"
    SELECT id, common_name, latin_name, order_name, genus, attributes,
           habitat, months, colors, toxic, average_height
    FROM mushrooms
"#;

#[derive(sqlx::FromRow)]
struct MushroomRow {
    id: String,
    common_name: String,
    latin_name: String,
    order_name: String,
    genus: String,
    attributes: Json<Map<String, Value>>,
    habitat: String,
    months: Json<Vec<Month>>,
    colors: Json<Vec<String>>,
    toxic: bool,
    average_height: f64,
}

impl TryFrom<MushroomRow> for Mushroom {
    type Error = Error;

    fn try_from(row: MushroomRow) -> Result<Self> {
        Ok(Mushroom {
            id: ObjectId::parse(&row.id)?,
            common_name: row.common_name,
            latin_name: row.latin_name,
            order: row.order_name,
            genus: row.genus,
            attributes: row.attributes.0,
            habitat: row.habitat,
            months: row.months.0,
            colors: row.colors.0,
            toxic: row.toxic,
            average_height: row.average_height,
        })
    }
}

impl Store {
    /// All catalog entries in insertion order
    pub async fn list_mushrooms(&self) -> Result<Vec<Mushroom>> {
        let rows = sqlx::query_as::<_, MushroomRow>(&format!("{SELECT_MUSHROOMS} ORDER BY rowid"))
            .fetch_all(self.pool())
            .await?;

        rows.into_iter().map(Mushroom::try_from).collect()
    }

    /// Every entry whose common name matches exactly (case-sensitive)
    ///
    /// Fails with [`Error::NotFound`] when nothing matches.
    pub async fn find_mushrooms_by_name(&self, name: &str) -> Result<Vec<Mushroom>> {
        let rows = sqlx::query_as::<_, MushroomRow>(&format!(
            "{SELECT_MUSHROOMS} WHERE common_name = ? ORDER BY rowid"
        ))
        .bind(name)
        .fetch_all(self.pool())
        .await?;

        if rows.is_empty() {
            return Err(Error::NotFound(format!("mushroom '{}'", name)));
        }

        rows.into_iter().map(Mushroom::try_from).collect()
    }

    /// Whether `name` is a catalog species
    pub async fn species_exists(&self, name: &str) -> Result<bool> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM mushrooms WHERE common_name = ?)")
                .bind(name)
                .fetch_one(self.pool())
                .await?;

        Ok(exists != 0)
    }
}

pub(super) async fn insert_mushroom(conn: &mut SqliteConnection, mushroom: &Mushroom) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO mushrooms (
            id, common_name, latin_name, order_name, genus, attributes,
            habitat, months, colors, toxic, average_height
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(mushroom.id.to_string())
    .bind(&mushroom.common_name)
    .bind(&mushroom.latin_name)
    .bind(&mushroom.order)
    .bind(&mushroom.genus)
    .bind(Json(&mushroom.attributes))
    .bind(&mushroom.habitat)
    .bind(Json(&mushroom.months))
    .bind(Json(&mushroom.colors))
    .bind(mushroom.toxic)
    .bind(mushroom.average_height)
    .execute(conn)
    .await?;

    Ok(())
}
