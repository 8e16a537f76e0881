use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;
use dotenvy::{dotenv, var as envar};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
    Pool, SqlitePool,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod command_parser;

use catalog::{
    config::Config,
    traits::*,
    types::{author::Author, timestamp::Timestamp, uuid::Uuid},
};

async fn handle_command(matches: ArgMatches, conn: &SqlitePool, config: &Config) -> Result<()> {
    match matches.subcommand() {
        Some(("add", matches)) => match matches.subcommand() {
            Some(("author", matches)) => {
                let mut author = Author::new(
                    required(matches, "first-name")?,
                    required(matches, "family-name")?,
                );
                if let Some(born) = matches.get_one::<String>("born") {
                    author = author.born(Timestamp::parse(born)?);
                }
                if let Some(died) = matches.get_one::<String>("died") {
                    author = author.died(Timestamp::parse(died)?);
                }
                author.insert(conn).await?;
                println!("{}", author.canonical_path());
            }
            Some((name, _)) => unimplemented!("{}", name),
            None => unreachable!("subcommand required"),
        },
        Some(("list", matches)) => match matches.subcommand() {
            Some(("authors", matches)) => {
                let authors = Author::get_all(conn).await?;
                if matches.get_flag("json") {
                    let views = authors.iter().map(Author::view).collect::<Vec<_>>();
                    println!("{}", serde_json::to_string_pretty(&views)?);
                } else {
                    for author in authors {
                        println!("{}", author.fmt_to_string(config)?);
                    }
                }
            }
            Some((name, _)) => unimplemented!("{}", name),
            None => unreachable!("subcommand required"),
        },
        Some(("show", matches)) => match matches.subcommand() {
            Some(("author", matches)) => {
                let author = Author::get_by_id(conn, &required(matches, "id")?.parse()?).await?;
                if matches.get_flag("json") {
                    println!("{}", serde_json::to_string_pretty(&author.view())?);
                } else {
                    println!("{}", author.fmt_to_string(config)?);
                }
            }
            Some((name, _)) => unimplemented!("{}", name),
            None => unreachable!("subcommand required"),
        },
        Some(("remove", matches)) => match matches.subcommand() {
            Some(("author", matches)) => {
                let id: Uuid = required(matches, "id")?.parse()?;
                Author::get_by_id(conn, &id).await?.remove(conn).await?;
            }
            Some((name, _)) => unimplemented!("{}", name),
            None => unreachable!("subcommand required"),
        },
        Some(("config", _)) => unreachable!("handled before connecting"),
        Some((name, _)) => unimplemented!("{}", name),
        None => unreachable!("subcommand required"),
    }
    Ok(())
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("Missing argument {name}"))
}

fn database_location(config: &Config) -> PathBuf {
    match dotenv() {
        Ok(_) => match envar("DATABASE_URL").ok() {
            Some(db_url) => PathBuf::from(shellexpand::tilde(&db_url).into_owned()),
            None => config.database_path(),
        },
        Err(_) => config.database_path(),
    }
}

async fn connect_to_db(config: &Config) -> Result<SqlitePool> {
    let db_location = database_location(config);
    if let Some(parent) = db_location.parent() {
        std::fs::create_dir_all(parent)?;
    }
    debug!("Connecting to {}.", db_location.display());

    Ok(Pool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_location)
            .journal_mode(SqliteJournalMode::Wal)
            .create_if_missing(true),
    )
    .await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = command_parser::arg_parser().get_matches();

    if let Some(("config", _)) = matches.subcommand() {
        print!("{}", Config::default_as_string()?);
        return Ok(());
    }

    let config = Config::read_config()?;

    let conn = connect_to_db(&config).await?;
    Author::create_table(&conn).await?;

    if let Err(e) = handle_command(matches, &conn, &config).await {
        error!("{e:#}");
        eprintln!("{}", config.output_error.format_str(e));
        std::process::exit(1);
    }

    Ok(())
}
