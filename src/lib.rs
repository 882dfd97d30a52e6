//! # numflow
//!
//! Bounded unique-number window aggregation over timed upstream fetches.
//!
//! Bursts of numbers fetched from a number-generator service are folded into
//! a window of the most recently seen unique values (insertion-ordered,
//! oldest evicted first). Once the window reaches capacity, the arithmetic
//! mean of its contents is reported alongside each fetch. Every upstream
//! request races a fixed time budget; a request that loses the race is
//! aborted and can never mutate the window afterwards.
//!
//! The rendering layer on top of this crate is display-only: it receives
//! before/after snapshots, the raw numbers, and the average, and draws them
//! as given.
//!
//! ## Module organization
//!
//! - `window` - bounded unique window and the pure merge operation
//! - `source` - source categories and their endpoint table
//! - `client` - HTTP number source, fetch errors, payload normalization
//! - `aggregator` - timed fetch orchestration and window ownership
//! - `config` - environment-driven constants
//! - `auth` / `stocks` - authenticated stock data collaborator

pub mod aggregator;
pub mod auth;
pub mod client;
pub mod config;
pub mod source;
pub mod stocks;
pub mod window;

pub use aggregator::{FetchReport, WindowAggregator};
pub use client::{FetchError, HttpNumberSource, NumberSource};
pub use config::AggregatorConfig;
pub use source::SourceCategory;
pub use window::UniqueWindow;
