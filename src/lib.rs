//! Star Tracker
//!
//! Kill-log filtering, grouping and killstreak stats for the Star Tracker
//! API, with a blocking client and terminal rendering used by the
//! `star-tracker` CLI.

pub mod analysis;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
