//! Data layer: core types, loading, and smoothing.
//!
//! Architecture:
//! ```text
//!  results / results-vec  (whitespace-separated integers)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Series (sizes + timing columns)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  smooth   │  block averaging → SmoothedSeries
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod smooth;
