//! MarketPulse Screener
//!
//! Compiles human-readable screener filters into market-data search queries.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         SCREENER                              │
//! │                                                               │
//! │  "P/E: 10 - 15"  ┌──────────┐  typed   ┌──────────┐  params   │
//! │  ──────────────► │ Filters  │────────► │ Compiler │─────────┐ │
//! │                  └────┬─────┘ buckets  └──────────┘         │ │
//! │                       │                                     ▼ │
//! │                  ┌────▼─────┐                    ┌──────────┐ │
//! │                  │ Presets  │                    │  Client  │ │
//! │                  │ (labels) │                    │  (REST)  │ │
//! │                  └──────────┘                    └──────────┘ │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod compiler;
pub mod error;
pub mod filters;
pub mod presets;
pub mod query;

pub use client::{screener_url, MarketDataClient};
pub use compiler::{compile, QueryCompiler};
pub use error::{PresetError, PresetResult, ScreenerError};
pub use filters::{FilterId, ScreenerFilter, ScreenerFilterSelection};
pub use presets::{FilePresetStore, InMemoryPresetStore, Preset, PresetId, PresetStore};
pub use query::{Bounds, Metric, ScreenerQueryParams, ScreenerRow};
