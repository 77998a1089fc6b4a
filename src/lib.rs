//! # Postgres table bloat demo
//!
//! Provokes and visualizes table bloat in a single Postgres table. Each run
//! bulk-inserts synthetic rows into `public.raw_events`, rewrites every row
//! in place per `source_id` category, then soft-deletes the rows the rewrite
//! pushed past the retention window. Rewriting rows in place leaves the old
//! row versions behind as dead tuples, which is the point: the table's
//! on-disk size and `pg_stat_user_tables` statistics are reported after every
//! phase so the growth is visible while the live row count barely moves.
//!
//! All work happens over one connection, one parameterized statement at a
//! time. The binary runs five full cycles with a pause between them so
//! autovacuum activity shows up in the reported statistics.

#![deny(missing_docs)]

pub mod config;
pub mod demo;
pub mod lorem;
pub mod stats;
pub mod store;

pub use crate::{config::DemoConfig, demo::Demo, stats::TableStats, store::RawEventStore};
