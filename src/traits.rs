use anyhow::Result;
use sqlx::sqlite::SqliteQueryResult;

use crate::{config::Config, types::uuid::Uuid};

/// Names used for the table backing a type, generated by `#[derive(DbTable)]`
pub trait DbTable {
    const NAME_SINGULAR: &'static str;
    const NAME_PLURAL: &'static str;
    const TABLE_NAME: &'static str;
}

pub trait CreateTable {
    async fn create_table(conn: &sqlx::SqlitePool) -> Result<()>;
}

pub trait Insertable {
    async fn insert(&self, conn: &sqlx::SqlitePool) -> Result<SqliteQueryResult>
    where
        Self: Sized;
}

pub trait Updateable {
    /// Overwrite the stored row of `self` with the fields of `new`
    async fn update(&self, conn: &sqlx::SqlitePool, new: Self) -> Result<SqliteQueryResult>
    where
        Self: Sized;
}

pub trait Queryable {
    async fn get_all(conn: &sqlx::SqlitePool) -> Result<Vec<Self>>
    where
        Self: Sized;

    async fn get_by_id(conn: &sqlx::SqlitePool, id: &Uuid) -> Result<Self>
    where
        Self: Sized;
}

pub trait Removeable {
    async fn remove(&self, conn: &sqlx::SqlitePool) -> Result<SqliteQueryResult>
    where
        Self: Sized;
}

/// Styled output for the terminal
pub trait DisplayTerminal {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()>;

    fn fmt_to_string(&self, config: &Config) -> Result<String> {
        let mut s = String::new();
        DisplayTerminal::fmt(self, &mut s, config)?;
        Ok(s)
    }
}
