use std::fmt::{Display, Write};

use anyhow::Result;
use derives::DbTable;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteQueryResult, FromRow};
use tracing::{debug, info};

use crate::{
    config::{Config, Styleable},
    traits::*,
    types::{
        text::Text,
        timestamp::{OptionalTimestamp, Timestamp},
        uuid::Uuid,
    },
};

/// Longest first or family name the schema accepts, in UTF-16 code units
pub const NAME_MAX_LENGTH: usize = 100;

const PATH_PREFIX: &str = "/catalog/author";

/// Path under which the author with `id` is served
pub fn canonical_path_for(id: impl Display) -> String {
    format!("{PATH_PREFIX}/{id}")
}

#[derive(Default, Debug, Clone, PartialEq, Eq, FromRow, DbTable, Serialize, Deserialize)]
pub struct Author {
    pub id:            Uuid,
    pub first_name:    Option<Text>,
    pub family_name:   Option<Text>,
    pub date_of_birth: OptionalTimestamp,
    pub date_of_death: OptionalTimestamp,
}

impl Author {
    pub fn new(first_name: impl Into<Text>, family_name: impl Into<Text>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: Some(first_name.into()),
            family_name: Some(family_name.into()),
            ..Self::default()
        }
    }

    pub fn born(mut self, date: Timestamp) -> Self {
        self.date_of_birth = date.into();
        self
    }

    pub fn died(mut self, date: Timestamp) -> Self {
        self.date_of_death = date.into();
        self
    }

    /// `"{family_name}, {first_name}"`, or empty unless both parts are present
    pub fn full_name(&self) -> String {
        match (non_empty(&self.first_name), non_empty(&self.family_name)) {
            (Some(first), Some(family)) => format!("{family}, {first}"),
            _ => String::new(),
        }
    }

    pub fn birth_date_iso(&self) -> String {
        self.date_of_birth.iso_date()
    }

    pub fn death_date_iso(&self) -> String {
        self.date_of_death.iso_date()
    }

    /// `"{birth_year} - {death_year}"`. The separator is kept even when a
    /// year is unknown, so a living author reads `"1920 - "`.
    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            self.date_of_birth.year_numeric(),
            self.date_of_death.year_numeric()
        )
    }

    pub fn canonical_path(&self) -> String {
        canonical_path_for(&self.id)
    }

    /// Constraints enforced before anything is written to the database
    pub fn validate(&self) -> Result<()> {
        validate_name("first_name", &self.first_name)?;
        validate_name("family_name", &self.family_name)?;
        Ok(())
    }

    /// Stored fields together with every derived one
    pub fn view(&self) -> AuthorView {
        AuthorView {
            id:            self.id.to_string(),
            first_name:    self.first_name.as_ref().map(|x| x.0.clone()),
            family_name:   self.family_name.as_ref().map(|x| x.0.clone()),
            name:          self.full_name(),
            date_of_birth: self.birth_date_iso(),
            date_of_death: self.death_date_iso(),
            lifespan:      self.lifespan(),
            url:           self.canonical_path(),
        }
    }

    fn has_dates(&self) -> bool {
        self.date_of_birth.0.is_some() || self.date_of_death.0.is_some()
    }
}

fn non_empty(name: &Option<Text>) -> Option<&str> {
    name.as_ref().map(|x| x.0.as_str()).filter(|x| !x.is_empty())
}

fn validate_name(field: &str, name: &Option<Text>) -> Result<()> {
    match name {
        None => anyhow::bail!("Path `{field}` is required"),
        Some(text) if text.is_empty() => anyhow::bail!("Path `{field}` is required"),
        Some(text) if text.utf16_len() > NAME_MAX_LENGTH => anyhow::bail!(
            "Path `{field}` is longer than the maximum allowed length ({NAME_MAX_LENGTH})"
        ),
        Some(_) => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    pub id:            String,
    pub first_name:    Option<String>,
    pub family_name:   Option<String>,
    pub name:          String,
    pub date_of_birth: String,
    pub date_of_death: String,
    pub lifespan:      String,
    pub url:           String,
}

impl Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.full_name();
        if name.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{name}")
        }
    }
}

impl DisplayTerminal for Author {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        let style = &config.output_author.style_content;
        match (non_empty(&self.first_name), non_empty(&self.family_name)) {
            (None, None) => write!(f, "{}", "(Name unknown)".style(style))?,
            (None, Some(family)) => {
                write!(f, "{}", format!("{family}, (First name unknown)").style(style))?
            }
            (Some(first), None) => {
                write!(f, "{}", format!("(Family name unknown), {first}").style(style))?
            }
            (Some(_), Some(_)) => write!(f, "{}", self.full_name().style(style))?,
        }
        if self.has_dates() {
            write!(f, " {}", config.output_lifespan.format_str(self.lifespan()))?;
        }
        if config.output_author.display_uuid {
            write!(f, " {}", config.output_uuid.format_str(&self.id))?;
        }
        Ok(())
    }
}

impl CreateTable for Author {
    async fn create_table(conn: &sqlx::SqlitePool) -> Result<()> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY NOT NULL,
                first_name TEXT NOT NULL CHECK (length(first_name) BETWEEN 1 AND {max}),
                family_name TEXT NOT NULL CHECK (length(family_name) BETWEEN 1 AND {max}),
                date_of_birth INTEGER,
                date_of_death INTEGER
            );"#,
            Self::TABLE_NAME,
            max = NAME_MAX_LENGTH,
        ))
        .execute(conn)
        .await?;
        Ok(())
    }
}

impl Insertable for Author {
    async fn insert(&self, conn: &sqlx::SqlitePool) -> Result<SqliteQueryResult> {
        self.validate()?;
        let result = sqlx::query(&format!(
            r#"
                    INSERT INTO {} ( id, first_name, family_name, date_of_birth, date_of_death )
                    VALUES ( ?1, ?2, ?3, ?4, ?5 )
                    "#,
            Self::TABLE_NAME
        ))
        .bind(&self.id)
        .bind(&self.first_name)
        .bind(&self.family_name)
        .bind(&self.date_of_birth)
        .bind(&self.date_of_death)
        .execute(conn)
        .await?;
        info!("Inserted {} {}.", Self::NAME_SINGULAR, self.id);
        Ok(result)
    }
}

impl Updateable for Author {
    async fn update(&self, conn: &sqlx::SqlitePool, new: Self) -> Result<SqliteQueryResult> {
        new.validate()?;
        let result = sqlx::query(&format!(
            r#"
            UPDATE {}
            SET 
                first_name = ?2,
                family_name = ?3,
                date_of_birth = ?4,
                date_of_death = ?5
            WHERE
                id = ?1;
            "#,
            Self::TABLE_NAME
        ))
        .bind(&self.id)
        .bind(&new.first_name)
        .bind(&new.family_name)
        .bind(&new.date_of_birth)
        .bind(&new.date_of_death)
        .execute(conn)
        .await?;
        if result.rows_affected() == 0 {
            anyhow::bail!("No {} with id {}", Self::NAME_SINGULAR, self.id);
        }
        info!("Updated {} {}.", Self::NAME_SINGULAR, self.id);
        Ok(result)
    }
}

impl Queryable for Author {
    async fn get_all(conn: &sqlx::SqlitePool) -> Result<Vec<Self>> {
        debug!("Querying all {}.", Self::NAME_PLURAL);
        Ok(sqlx::query_as::<_, Self>(&format!(
            "SELECT * FROM {} ORDER BY family_name, first_name;",
            Self::TABLE_NAME
        ))
        .fetch_all(conn)
        .await?)
    }

    async fn get_by_id(conn: &sqlx::SqlitePool, id: &Uuid) -> Result<Self> {
        debug!("Querying {} {}.", Self::NAME_SINGULAR, id);
        sqlx::query_as::<_, Self>(&format!(
            "SELECT * FROM {} WHERE id = ?1;",
            Self::TABLE_NAME
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| anyhow::anyhow!("No {} with id {}", Self::NAME_SINGULAR, id))
    }
}

impl Removeable for Author {
    async fn remove(&self, conn: &sqlx::SqlitePool) -> Result<SqliteQueryResult> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?1;", Self::TABLE_NAME))
            .bind(&self.id)
            .execute(conn)
            .await?;
        if result.rows_affected() == 0 {
            anyhow::bail!("No {} with id {}", Self::NAME_SINGULAR, self.id);
        }
        info!("Removed {} {}.", Self::NAME_SINGULAR, self.id);
        Ok(result)
    }
}
