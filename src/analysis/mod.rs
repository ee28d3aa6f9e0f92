//! Kill-log aggregation: filtering, sorting, grouping and stats over kill
//! lists already fetched from the API. Nothing here does I/O or fails.

pub mod filter;
pub mod grouping;
pub mod leaderboard;
pub mod names;
pub mod options;
pub mod stats;
pub mod streak;
pub mod view;

pub use filter::{filter_events, sort_events, FilterConfig, KillTypeFilter, RawIdFilter, SortKey};
pub use grouping::{group_by_opponent, GroupField, KillGroup};
pub use leaderboard::{rank_leaderboard, KdTier, Leaderboard, LeaderboardRow};
pub use names::{normalize_weapon_name, normalize_zone_name};
pub use options::{build_filter_options, FilterOption, FilterOptions};
pub use stats::{compute_derived_stats, kd_ratio, profile_stats, DerivedStats};
pub use streak::{compute_best_killstreak, KILLSTREAK_WINDOW_SECS};
pub use view::{aggregate, Aggregation, Presentation, ViewState};
