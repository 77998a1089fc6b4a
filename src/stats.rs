//! Size and statistics reporting for the events table.

use sqlx::PgPool;

/// A snapshot of the table's on-disk footprint and collected statistics.
pub struct TableStats {
    /// Human-readable total relation size, including indexes and toast.
    pub size: String,

    /// The table's `pg_stat_user_tables` row, keyed by column name.
    pub stats: Option<serde_json::Value>,
}

impl TableStats {
    /// Query the current size and statistics of `public.raw_events`.
    pub async fn fetch(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let (size,): (String,) = sqlx::query_as(
            "select pg_size_pretty(pg_total_relation_size('public.raw_events'));",
        )
        .fetch_one(pool)
        .await?;

        let stats: Option<(serde_json::Value,)> = sqlx::query_as(
            "select row_to_json(s) from pg_stat_user_tables s where relname = 'raw_events';",
        )
        .fetch_optional(pool)
        .await?;

        Ok(Self {
            size,
            stats: stats.map(|(row,)| row),
        })
    }

    /// Log the size and every statistic column name/value pair.
    pub fn log(&self) {
        log::info!("raw_events table size: {}", self.size);

        match self.stats.as_ref().and_then(|row| row.as_object()) {
            Some(columns) => {
                log::info!("raw_events table stats:");
                for (name, value) in columns {
                    log::info!("{:25}: {}", name, value);
                }
            }
            None => log::warn!("No pg_stat_user_tables row for raw_events"),
        }
    }
}

/// Fetch and log the table's current size and statistics.
pub async fn report(pool: &PgPool) -> Result<(), sqlx::Error> {
    let snapshot = TableStats::fetch(pool).await?;

    snapshot.log();

    Ok(())
}
