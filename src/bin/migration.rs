//! Schema management for the warehouse database.
//!
//! Uses `APP__DATABASE_URL` (falling back to `DATABASE_URL`) and applies the
//! embedded migrations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use warehouse_api::{
    db::{self, DbConfig},
    migrator::Migrator,
};

#[derive(Parser, Debug)]
#[command(name = "migration", about = "Manage the warehouse database schema")]
struct Cli {
    /// Database URL; overrides APP__DATABASE_URL and DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending migrations (default)
    Up {
        /// Apply at most this many migrations
        #[arg(short, long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations
    Down {
        #[arg(short, long, default_value_t = 1)]
        steps: u32,
    },
    /// Drop every table and re-apply all migrations
    Fresh,
    /// Print which migrations are applied
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    warehouse_api::config::init_tracing("info", false);

    let cli = Cli::parse();
    let url = cli
        .database_url
        .or_else(|| std::env::var("APP__DATABASE_URL").ok())
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite://warehouse.db?mode=rwc".to_string());

    let pool = db::establish_connection_with_config(&DbConfig {
        url,
        max_connections: 2,
        ..Default::default()
    })
    .await
    .context("connecting to the database")?;

    match cli.command.unwrap_or(Command::Up { steps: None }) {
        Command::Up { steps } => {
            Migrator::up(&pool, steps).await.context("applying migrations")?;
            info!("Migrations applied");
        }
        Command::Down { steps } => {
            Migrator::down(&pool, Some(steps))
                .await
                .context("rolling back migrations")?;
            info!(steps, "Migrations rolled back");
        }
        Command::Fresh => {
            Migrator::fresh(&pool).await.context("recreating schema")?;
            info!("Schema recreated");
        }
        Command::Status => {
            Migrator::status(&pool).await.context("reading migration status")?;
        }
    }

    db::close_pool(pool).await?;
    Ok(())
}
