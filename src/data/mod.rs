//! Data layer: core types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  athlete_events.csv / .tsv
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ loader        │  parse file → MedalTable, memoized per path
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ MedalTable    │  Vec<ResultRow>, distinct years / teams
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ filter        │  year / season / medal predicates → MedalTable
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ aggregate     │  totals, dense rank, top sports, pivots, standings
//!   └──────────────┘
//! ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
