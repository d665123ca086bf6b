//! Seeds a `PostgreSQL` database with demo users and tasks.
//!
//! Usage:
//!
//! ```text
//! seed --database-url postgres://localhost/taskwarden [--apply-schema]
//! ```
//!
//! `DATABASE_URL` may stand in for `--database-url`. Seeding is skipped when
//! the database already holds any user or task. Log verbosity follows
//! `RUST_LOG` and defaults to `info`.

use clap::Parser;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use eyre::{Result, WrapErr};
use mockable::DefaultClock;
use taskwarden::identity::adapters::postgres::PostgresUserDirectory;
use taskwarden::seed::{SeedOutcome, seed_demo_data};
use taskwarden::task::adapters::postgres::PostgresTaskRepository;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_users_and_tasks/up.sql");

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "seed", about = "Populate an empty database with demo data")]
struct Args {
    /// `PostgreSQL` connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Create the tables first when they do not exist.
    #[arg(long)]
    apply_schema: bool,

    /// Maximum pooled connections.
    #[arg(long, default_value_t = 4)]
    pool_size: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let manager = ConnectionManager::<PgConnection>::new(&args.database_url);
    let pool = Pool::builder()
        .max_size(args.pool_size)
        .build(manager)
        .wrap_err("failed to build connection pool")?;

    if args.apply_schema {
        let schema_pool = pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut connection = schema_pool.get().wrap_err("failed to check out connection")?;
            connection
                .batch_execute(SCHEMA_SQL)
                .wrap_err("failed to apply schema")
        })
        .await
        .wrap_err("schema task panicked")??;
        info!("schema applied");
    }

    let directory = PostgresUserDirectory::new(pool.clone());
    let repository = PostgresTaskRepository::new(pool);
    let outcome = seed_demo_data(&directory, &repository, &DefaultClock)
        .await
        .wrap_err("seeding failed")?;

    match outcome {
        SeedOutcome::Seeded { users, tasks } => info!(users, tasks, "database seeded"),
        SeedOutcome::Skipped { users, tasks } => {
            info!(users, tasks, "database already populated, nothing to do");
        }
    }
    Ok(())
}
