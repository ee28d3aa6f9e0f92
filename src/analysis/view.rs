use super::filter::{filter_events, sort_events, FilterConfig};
use super::grouping::{group_by_opponent, GroupField, KillGroup};
use super::stats::{compute_derived_stats, is_same_player, DerivedStats};
use crate::api::models::KillEvent;
use crate::error::AppError;
use log::{debug, warn};
use std::str::FromStr;

/// Which list the page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    All,
    /// The viewer's kills, grouped by victim
    MyKills,
    /// The viewer's deaths, grouped by killer
    MyDeaths,
}

impl FromStr for ViewState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ViewState::All),
            "kills" | "my-kills" => Ok(ViewState::MyKills),
            "deaths" | "my-deaths" => Ok(ViewState::MyDeaths),
            other => Err(AppError::InvalidArgument(format!(
                "unknown view '{}' (expected all, kills or deaths)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Presentation<'a> {
    Flat(Vec<&'a KillEvent>),
    Grouped(Vec<KillGroup<'a>>),
}

impl Presentation<'_> {
    pub fn event_count(&self) -> usize {
        match self {
            Presentation::Flat(events) => events.len(),
            Presentation::Grouped(groups) => groups.iter().map(|g| g.kills.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.event_count() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation<'a> {
    pub view: ViewState,
    pub presentation: Presentation<'a>,
    /// Always over the full, unfiltered list
    pub stats: DerivedStats,
}

pub fn aggregate<'a>(
    events: &'a [KillEvent],
    filters: &FilterConfig,
    view: ViewState,
    viewer: &str,
) -> Aggregation<'a> {
    let unparseable = events.iter().filter(|e| e.killed_at().is_none()).count();
    if unparseable > 0 {
        warn!("{} kill events have an unreadable killTime; treating them as oldest", unparseable);
    }

    let source: Vec<&KillEvent> = match view {
        ViewState::All => events.iter().collect(),
        ViewState::MyKills => events
            .iter()
            .filter(|e| is_same_player(&e.killer_user, viewer))
            .collect(),
        ViewState::MyDeaths => events
            .iter()
            .filter(|e| is_same_player(&e.victim_user, viewer))
            .collect(),
    };

    let filtered = filter_events(source.iter().copied(), filters);
    let sorted = sort_events(filtered, filters.sort);

    debug!(
        "{:?} view: {} source events, {} after filters (sort {})",
        view,
        source.len(),
        sorted.len(),
        filters.sort
    );

    let presentation = match view {
        ViewState::All => Presentation::Flat(sorted),
        ViewState::MyKills => Presentation::Grouped(group_by_opponent(sorted, GroupField::Victim)),
        ViewState::MyDeaths => Presentation::Grouped(group_by_opponent(sorted, GroupField::Killer)),
    };

    Aggregation {
        view,
        presentation,
        stats: compute_derived_stats(events, viewer),
    }
}
