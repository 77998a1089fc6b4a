//! The demo driver: phase sequencing, timing and pacing.

use crate::{config::DemoConfig, lorem, store::RawEventStore};
use rand::{rngs::StdRng, SeedableRng};
use std::future::Future;
use std::time::{Duration, Instant};

/// Character budget for freshly inserted payloads.
const INSERT_PAYLOAD_CHARS: usize = 2000;

/// Character budget for rewritten payloads.
const UPDATE_PAYLOAD_CHARS: usize = 1000;

/// Orchestrates the demo phases against one store.
pub struct Demo {
    store: RawEventStore,
    config: DemoConfig,
    rng: StdRng,
}

impl Demo {
    /// Build a driver around a store.
    ///
    /// The payload RNG is seeded with a fixed value, so every invocation of
    /// the binary produces the same sequence of texts.
    pub fn new(store: RawEventStore, config: DemoConfig) -> Self {
        Self {
            store,
            config,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Run one full demo sequence: schema, insert, rewrite, sweep.
    ///
    /// The insert, rewrite and sweep phases are individually timed and
    /// logged. The RNG advances on every payload, so successive cycles
    /// rewrite rows with different text.
    pub async fn run_once(&mut self) -> Result<(), sqlx::Error> {
        self.store.ensure_schema().await?;

        let insert_payload = lorem::text(&mut self.rng, INSERT_PAYLOAD_CHARS);
        let count = self.config.num_rows_to_generate;
        timed("generate", self.store.generate(count, &insert_payload)).await?;

        let update_payload = lorem::text(&mut self.rng, UPDATE_PAYLOAD_CHARS);
        timed("mutate_all", self.store.mutate_all(&update_payload)).await?;

        timed("sweep_all", self.store.sweep_all()).await?;

        log::info!("All done!");

        Ok(())
    }

    /// Run the demo sequence `cycles` times, sleeping `sleep` between runs.
    ///
    /// The pause also follows the final run, matching the cycle counter
    /// logging around it.
    pub async fn run_forever(&mut self, cycles: u32, sleep: Duration) -> Result<(), sqlx::Error> {
        for cycle in 1..=cycles {
            log::info!("RUN No :::::: {}", cycle);

            self.run_once().await?;

            log::info!(
                "Sleeping for {} seconds after RUN No: {}",
                sleep.as_secs(),
                cycle
            );

            async_std::task::sleep(sleep).await;
        }

        Ok(())
    }
}

/// Await `operation`, then log how long it took.
async fn timed<T, F>(name: &str, operation: F) -> Result<T, sqlx::Error>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    let start = Instant::now();
    let outcome = operation.await?;

    log::info!(
        "Function \"{}\" took {:.3} seconds to complete.",
        name,
        start.elapsed().as_secs_f64()
    );

    Ok(outcome)
}
