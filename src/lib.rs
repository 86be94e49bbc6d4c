//! Certified run / luminosity-block mask.
//!
//! Loads a certification file (JSON mapping run numbers to inclusive
//! luminosity-block intervals) into an immutable in-memory index, queried
//! per event to decide whether a `(run, lumi_block)` pair was certified
//! good for analysis.
//!
//! ```text
//!  Cert_*.json
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  loader   │  parse + validate → LumiMask
//!  └──────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │ LumiMask  │  run → sorted disjoint ranges
//!  └──────────┘
//!       │
//!       ▼
//!  is_certified(run, lumi) / is_certified_many(runs, lumis)
//! ```
//!
//! The mask holds no interior mutability, so a single instance can be shared
//! by reference across threads for concurrent read-only queries.

pub mod error;
pub mod loader;
pub mod model;

pub use error::DataFormatError;
pub use loader::{load_file, load_reader, load_str};
pub use model::{LumiMask, LumiRange};
