// Public fallible APIs in this crate share one concrete error contract (`RegroupError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod config;
pub mod error;
pub mod extract;
pub(crate) mod llm_io;
pub mod models;
pub mod pipeline;
pub mod rebalance;
pub mod summary;

pub use config::{LineMarkers, RegroupConfig, SizeBounds};
pub use error::{RegroupError, Result};
pub use extract::{ExtractOptions, Extraction, ParsedPayload, extract, extract_all};
pub use models::{GroupSet, RawGroup, SubGroup, ThemeEntry};
pub use pipeline::{RegroupOutcome, run_regroup, run_regroup_with_rng};
pub use rebalance::{rebalance, rebalance_with_rng};
