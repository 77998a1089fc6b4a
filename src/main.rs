//! Table bloat demo binary.
//!
//! Runs five full demo cycles against the configured database, sleeping two
//! minutes between cycles, and logs every phase to stdout.

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use table_bloat_demo::{Demo, DemoConfig, RawEventStore};

/// How many full demo sequences one invocation runs.
const RUNS: u32 = 5;

/// Pause between runs.
const SLEEP_BETWEEN_RUNS: Duration = Duration::from_secs(120);

#[async_std::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DemoConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
        .context("failed to connect to Postgres")?;

    let store = RawEventStore::new(pool, config.verbose);
    let mut demo = Demo::new(store, config);

    demo.run_forever(RUNS, SLEEP_BETWEEN_RUNS).await?;

    Ok(())
}
