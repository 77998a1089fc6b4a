//! Storage access for the `public.raw_events` table.
//!
//! Every operation is a thin wrapper around one parameterized statement, so
//! all the churn the demo provokes comes from the statements themselves.

use crate::stats;
use sqlx::PgPool;

/// Handle to the `public.raw_events` table.
pub struct RawEventStore {
    /// sqlx [`PgPool`](sqlx::PgPool) used to communicate with the database.
    pub pool: PgPool,
    verbose: bool,
}

impl RawEventStore {
    /// Create a new store around an existing connection pool.
    ///
    /// When `verbose` is set the generator logs its SQL before executing it.
    pub fn new(pool: PgPool, verbose: bool) -> Self {
        Self { pool, verbose }
    }

    /// Create the events table and its two indexes if they do not exist yet.
    ///
    /// Idempotent; safe to call on every startup.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            create table if not exists public.raw_events (
                raw_event_id        serial primary key,
                created             timestamp(6) default now() not null,
                modified            timestamp(6) default now() not null,
                source_id           smallint not null check (source_id > 0 and source_id < 20),
                source_event_id     bigint not null,
                event_logs          text default '{}'::jsonb not null,
                deleted             boolean default false not null
            );
            "#,
        )
        .execute(&mut tx)
        .await?;

        sqlx::query(
            "create index if not exists idx_source_event_id on public.raw_events (source_event_id);",
        )
        .execute(&mut tx)
        .await?;

        sqlx::query(
            r#"
            create unique index if not exists idx_source_id_source_event_id
                on public.raw_events (source_id, source_event_id);
            "#,
        )
        .execute(&mut tx)
        .await?;

        tx.commit().await?;

        log::info!("Table created");

        Ok(())
    }

    /// Insert `count` synthetic rows all sharing one `payload`.
    ///
    /// `source_event_id` runs over a server-generated `1..=count` sequence
    /// and `source_id` cycles through the five categories (`mod(i, 5) + 1`).
    /// Rows colliding with an existing `(source_id, source_event_id)` pair
    /// are skipped, so overlapping ranges can be re-run without raising.
    ///
    /// Returns the number of rows actually inserted and reports table stats
    /// afterwards.
    pub async fn generate(&self, count: i64, payload: &str) -> Result<u64, sqlx::Error> {
        log::info!("Starting dummy data insertion");

        let insert_query = r#"
            insert into public.raw_events (
                source_id,
                source_event_id,
                event_logs
            )
            select
                mod(row_ids.i, 5) + 1,
                row_ids.i,
                $1 as event_logs
            from generate_series(1, $2) row_ids(i)
            on conflict (source_id, source_event_id)
            do nothing;
        "#;

        if self.verbose {
            log::info!("{}", insert_query);
        }

        log::info!("Starting insertion...");

        let inserted = sqlx::query(insert_query)
            .bind(payload)
            .bind(count)
            .execute(&self.pool)
            .await?
            .rows_affected();

        log::info!("{} rows generated in events table", inserted);

        stats::report(&self.pool).await?;

        Ok(inserted)
    }

    /// Rewrite every row, one bulk update per `source_id` category.
    ///
    /// Each update sets `event_logs` to `payload` and `modified` to a random
    /// instant up to 90 days in the future. The offset is a scalar subquery
    /// evaluated once per statement, so the whole batch shares a single
    /// target timestamp. Each category commits independently; a failure
    /// leaves earlier categories committed.
    pub async fn mutate_all(&self, payload: &str) -> Result<(), sqlx::Error> {
        log::info!("Starting to update data");

        for source_id in self.source_ids().await? {
            let updated = sqlx::query(
                r#"
                update  public.raw_events
                set     modified = (
                            select now() + (random() * (interval '90 days'))
                        ),
                        event_logs = $1
                where source_id = $2;
                "#,
            )
            .bind(payload)
            .bind(source_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

            log::info!("Update {} rows for source_id: {}", updated, source_id);
        }

        log::info!("All rows in events table are updated");

        stats::report(&self.pool).await?;

        Ok(())
    }

    /// Flag rows caught by the retention filter as deleted, one bulk update
    /// per `source_id` category, committing independently.
    ///
    /// The filter matches undeleted rows whose `modified` stamp lies at
    /// least 60 days in the future, i.e. the rows the last mutation pushed
    /// past the retention window. Flagged rows get `modified` reset to the
    /// sweep time. Nothing is ever physically removed.
    ///
    /// Returns the total number of rows flagged across all categories and
    /// reports table stats afterwards.
    pub async fn sweep_all(&self) -> Result<u64, sqlx::Error> {
        log::info!("Starting soft-deletion");

        let mut rows_deleted = 0;

        for source_id in self.source_ids().await? {
            let flagged = sqlx::query(
                r#"
                update public.raw_events
                set    deleted = true, modified = now()
                where  modified >= (
                    select now() + interval '60 days'
                )
                and source_id = $1
                and deleted is false;
                "#,
            )
            .bind(source_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

            rows_deleted += flagged;

            log::info!("{} rows soft deleted for source_id: {}", flagged, source_id);
        }

        log::info!("Total soft deleted rows: {}", rows_deleted);

        stats::report(&self.pool).await?;

        Ok(rows_deleted)
    }

    /// All `source_id` values currently present in the table.
    pub async fn source_ids(&self) -> Result<Vec<i16>, sqlx::Error> {
        let rows: Vec<(i16,)> = sqlx::query_as("select distinct source_id from public.raw_events")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(source_id,)| source_id).collect())
    }

    /// Remove every row and restart the primary key sequence.
    ///
    /// Not part of the demo cycle; a manual reset between experiments.
    pub async fn truncate_all(&self) -> Result<(), sqlx::Error> {
        sqlx::query("truncate table public.raw_events restart identity")
            .execute(&self.pool)
            .await?;

        log::info!("Truncated events table");

        Ok(())
    }
}
