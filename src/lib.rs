//! Olympic medal explorer: the data core behind the dashboard.
//!
//! [`data`] loads, filters and aggregates the results table; [`config`]
//! resolves where the table lives. The desktop front-end in `main.rs` only
//! talks to these modules through plain function calls.

pub mod config;
pub mod data;
