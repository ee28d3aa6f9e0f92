use super::names::{normalize_weapon_name, normalize_zone_name};
use crate::api::models::KillEvent;
use crate::error::AppError;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Weapon/zone filter over raw identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawIdFilter {
    #[default]
    None,
    Exact(String),
    /// Any of these raw ids, usually every id sharing one display label.
    AnyOf(Vec<String>),
}

impl RawIdFilter {
    /// One value becomes `Exact`, several become `AnyOf`, none clears the filter.
    pub fn from_values(mut values: Vec<String>) -> Self {
        match values.len() {
            0 => RawIdFilter::None,
            1 => RawIdFilter::Exact(values.remove(0)),
            _ => RawIdFilter::AnyOf(values),
        }
    }

    pub fn matches(&self, raw: &str) -> bool {
        match self {
            RawIdFilter::None => true,
            RawIdFilter::Exact(value) => value.is_empty() || value == raw,
            RawIdFilter::AnyOf(values) => values.is_empty() || values.iter().any(|v| v == raw),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            RawIdFilter::None => false,
            RawIdFilter::Exact(value) => !value.is_empty(),
            RawIdFilter::AnyOf(values) => !values.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KillTypeFilter {
    #[default]
    Any,
    Player,
    Npc,
}

impl KillTypeFilter {
    pub fn matches(self, event: &KillEvent) -> bool {
        match self {
            KillTypeFilter::Any => true,
            KillTypeFilter::Player => event.is_player_kill(),
            KillTypeFilter::Npc => !event.is_player_kill(),
        }
    }
}

impl FromStr for KillTypeFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "all" | "any" => Ok(KillTypeFilter::Any),
            "player" => Ok(KillTypeFilter::Player),
            "npc" => Ok(KillTypeFilter::Npc),
            other => Err(AppError::InvalidArgument(format!(
                "unknown kill type '{}' (expected player or npc)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    Killer,
    Victim,
    Weapon,
    Zone,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::Killer => "killer",
            SortKey::Victim => "victim",
            SortKey::Weapon => "weapon",
            SortKey::Zone => "zone",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "date-desc" => Ok(SortKey::DateDesc),
            "date-asc" => Ok(SortKey::DateAsc),
            "killer" => Ok(SortKey::Killer),
            "victim" => Ok(SortKey::Victim),
            "weapon" => Ok(SortKey::Weapon),
            "zone" => Ok(SortKey::Zone),
            other => Err(AppError::InvalidArgument(format!("unknown sort key '{}'", other))),
        }
    }
}

/// Current filter selection for one page view. `Default` is the reset state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterConfig {
    pub weapon: RawIdFilter,
    pub zone: RawIdFilter,
    pub damage_type: Option<String>,
    pub kill_type: KillTypeFilter,
    pub sort: SortKey,
    pub search: String,
}

impl FilterConfig {
    pub fn reset(&mut self) {
        *self = FilterConfig::default();
    }

    /// True when at least one predicate would drop events. Sort order is not a
    /// predicate.
    pub fn is_active(&self) -> bool {
        self.weapon.is_active()
            || self.zone.is_active()
            || self.damage_type.as_deref().is_some_and(|d| !d.is_empty())
            || self.kill_type != KillTypeFilter::Any
            || !self.search.is_empty()
    }

    pub fn matches(&self, event: &KillEvent) -> bool {
        self.weapon.matches(event.weapon())
            && self.zone.matches(event.zone())
            && self.matches_damage_type(event)
            && self.kill_type.matches(event)
            && self.matches_search(event)
    }

    fn matches_damage_type(&self, event: &KillEvent) -> bool {
        match self.damage_type.as_deref() {
            Some(wanted) if !wanted.is_empty() => event.damage_type() == wanted,
            _ => true,
        }
    }

    fn matches_search(&self, event: &KillEvent) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let haystack = format!(
            "{} {} {} {}",
            event.killer_user,
            event.victim_user,
            normalize_weapon_name(event.weapon()),
            normalize_zone_name(event.zone())
        )
        .to_lowercase();

        haystack.contains(&self.search.to_lowercase())
    }
}

pub fn filter_events<'a, I>(events: I, filters: &FilterConfig) -> Vec<&'a KillEvent>
where
    I: IntoIterator<Item = &'a KillEvent>,
{
    events.into_iter().filter(|e| filters.matches(e)).collect()
}

/// Stable sort into a new vector; the input order is left alone.
pub fn sort_events<'a, I>(events: I, sort_key: SortKey) -> Vec<&'a KillEvent>
where
    I: IntoIterator<Item = &'a KillEvent>,
{
    let mut sorted: Vec<&KillEvent> = events.into_iter().collect();

    // Unparseable times are None, which orders before every real instant
    match sort_key {
        SortKey::DateDesc => sorted.sort_by_cached_key(|e| Reverse(e.killed_at())),
        SortKey::DateAsc => sorted.sort_by_cached_key(|e| e.killed_at()),
        SortKey::Killer => sorted.sort_by_cached_key(|e| e.killer_user.to_lowercase()),
        SortKey::Victim => sorted.sort_by_cached_key(|e| e.victim_user.to_lowercase()),
        SortKey::Weapon => sorted.sort_by_cached_key(|e| normalize_weapon_name(e.weapon())),
        SortKey::Zone => sorted.sort_by_cached_key(|e| normalize_zone_name(e.zone())),
    }

    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kill(killer: &str, victim: &str, weapon: &str, zone: &str, time: &str) -> KillEvent {
        KillEvent {
            killer_user: killer.to_string(),
            victim_user: victim.to_string(),
            weapon: Some(weapon.to_string()),
            zone: Some(zone.to_string()),
            kill_time: time.to_string(),
            ..KillEvent::default()
        }
    }

    fn names(events: &[&KillEvent]) -> Vec<String> {
        events.iter().map(|e| format!("{}>{}", e.killer_user, e.victim_user)).collect()
    }

    #[test]
    fn test_raw_id_filter_from_values() {
        assert_eq!(RawIdFilter::from_values(vec![]), RawIdFilter::None);
        assert_eq!(
            RawIdFilter::from_values(vec!["A".into()]),
            RawIdFilter::Exact("A".into())
        );
        assert_eq!(
            RawIdFilter::from_values(vec!["A".into(), "B".into()]),
            RawIdFilter::AnyOf(vec!["A".into(), "B".into()])
        );
    }

    #[test]
    fn test_empty_exact_passes_everything() {
        let events = vec![kill("a", "b", "PISTOL", "Z", ""), kill("a", "c", "RIFLE", "Z", "")];
        let filters = FilterConfig { weapon: RawIdFilter::Exact(String::new()), ..FilterConfig::default() };
        assert_eq!(filter_events(&events, &filters).len(), 2);
        assert!(!filters.is_active());
    }

    #[test]
    fn test_empty_any_of_passes_everything() {
        let events = vec![kill("a", "b", "W", "HURSTON", ""), kill("a", "c", "W", "CRUSADER", "")];
        let filters = FilterConfig { zone: RawIdFilter::AnyOf(Vec::new()), ..FilterConfig::default() };
        assert_eq!(filter_events(&events, &filters).len(), 2);
        assert!(!filters.is_active());
    }

    #[test]
    fn test_weapon_any_of_matches_group() {
        let events = vec![
            kill("a", "b", "ESPR_RIFLE_01", "Z", "2024-01-01T00:00:00Z"),
            kill("a", "c", "ESPR_RIFLE_02", "Z", "2024-01-01T00:00:01Z"),
            kill("a", "d", "PISTOL", "Z", "2024-01-01T00:00:02Z"),
        ];
        let filters = FilterConfig {
            weapon: RawIdFilter::AnyOf(vec!["ESPR_RIFLE_01".into(), "ESPR_RIFLE_02".into()]),
            ..FilterConfig::default()
        };
        assert_eq!(names(&filter_events(&events, &filters)), vec!["a>b", "a>c"]);
    }

    #[test]
    fn test_missing_weapon_matches_unknown() {
        let mut event = kill("a", "b", "X", "Z", "");
        event.weapon = None;
        let filters = FilterConfig {
            weapon: RawIdFilter::Exact("Unknown".into()),
            ..FilterConfig::default()
        };
        assert_eq!(filter_events([&event], &filters).len(), 1);
    }

    #[test]
    fn test_kill_type_filter() {
        let mut player = kill("a", "b", "W", "Z", "");
        player.is_player = Some(true);
        let mut npc = kill("a", "pirate", "W", "Z", "");
        npc.is_player = Some(false);
        let unknown = kill("a", "c", "W", "Z", "");
        let events = vec![player, npc, unknown];

        let only = |kill_type| FilterConfig { kill_type, ..FilterConfig::default() };
        assert_eq!(names(&filter_events(&events, &only(KillTypeFilter::Player))), vec!["a>b"]);
        assert_eq!(
            names(&filter_events(&events, &only(KillTypeFilter::Npc))),
            vec!["a>pirate", "a>c"]
        );
        assert_eq!(filter_events(&events, &only(KillTypeFilter::Any)).len(), 3);
    }

    #[test]
    fn test_damage_type_exact() {
        let mut energy = kill("a", "b", "W", "Z", "");
        energy.damage_type = Some("Energy".into());
        let other = kill("a", "c", "W", "Z", "");
        let events = vec![energy, other];
        let filters = FilterConfig {
            damage_type: Some("Energy".into()),
            ..FilterConfig::default()
        };
        assert_eq!(names(&filter_events(&events, &filters)), vec!["a>b"]);

        let unknown = FilterConfig {
            damage_type: Some("Unknown".into()),
            ..FilterConfig::default()
        };
        assert_eq!(names(&filter_events(&events, &unknown)), vec!["a>c"]);
    }

    #[test]
    fn test_search_covers_names_and_labels() {
        let events = vec![
            kill("AquaRex", "Pirate", "ESPR_RIFLE_BALLISTIC_01", "GLSN_MICROTECH_02", ""),
            kill("Wolf", "Bandit", "PISTOL", "HURSTON", ""),
        ];
        let search = |s: &str| FilterConfig { search: s.into(), ..FilterConfig::default() };

        assert_eq!(names(&filter_events(&events, &search("aquarex"))), vec!["AquaRex>Pirate"]);
        assert_eq!(names(&filter_events(&events, &search("rifle ball"))), vec!["AquaRex>Pirate"]);
        assert_eq!(names(&filter_events(&events, &search("microtech"))), vec!["AquaRex>Pirate"]);
        assert_eq!(names(&filter_events(&events, &search("BANDIT"))), vec!["Wolf>Bandit"]);
        // raw prefixes aren't searchable
        assert!(filter_events(&events, &search("espr")).is_empty());
    }

    #[test]
    fn test_reset_and_is_active() {
        let mut filters = FilterConfig {
            search: "x".into(),
            sort: SortKey::Victim,
            ..FilterConfig::default()
        };
        assert!(filters.is_active());
        filters.reset();
        assert!(!filters.is_active());
        assert_eq!(filters.sort, SortKey::DateDesc);

        let sort_only = FilterConfig { sort: SortKey::Zone, ..FilterConfig::default() };
        assert!(!sort_only.is_active());
    }

    #[test]
    fn test_sort_date_desc_is_stable() {
        let events = vec![
            kill("first", "x", "W", "Z", "2024-01-01T00:00:00Z"),
            kill("second", "x", "W", "Z", "2024-01-01T00:00:00Z"),
            kill("newest", "x", "W", "Z", "2024-01-02T00:00:00Z"),
        ];
        let sorted = sort_events(&events, SortKey::DateDesc);
        assert_eq!(names(&sorted), vec!["newest>x", "first>x", "second>x"]);
    }

    #[test]
    fn test_unparseable_time_sorts_earliest() {
        let events = vec![
            kill("late", "x", "W", "Z", "2024-01-02T00:00:00Z"),
            kill("broken", "x", "W", "Z", "not a date"),
            kill("early", "x", "W", "Z", "2024-01-01T00:00:00Z"),
        ];
        assert_eq!(
            names(&sort_events(&events, SortKey::DateAsc)),
            vec!["broken>x", "early>x", "late>x"]
        );
        assert_eq!(
            names(&sort_events(&events, SortKey::DateDesc)),
            vec!["late>x", "early>x", "broken>x"]
        );
    }

    #[test]
    fn test_sort_by_names_and_labels() {
        let events = vec![
            kill("bravo", "Zulu", "ESPR_SMG_01", "GLSN_ZONE_B", ""),
            kill("Alpha", "yankee", "GLSN_AXE", "ZONE_A_3", ""),
        ];
        assert_eq!(names(&sort_events(&events, SortKey::Killer)), vec!["Alpha>yankee", "bravo>Zulu"]);
        assert_eq!(names(&sort_events(&events, SortKey::Victim)), vec!["Alpha>yankee", "bravo>Zulu"]);
        assert_eq!(names(&sort_events(&events, SortKey::Weapon)), vec!["Alpha>yankee", "bravo>Zulu"]);
        assert_eq!(names(&sort_events(&events, SortKey::Zone)), vec!["Alpha>yankee", "bravo>Zulu"]);
    }

    #[test]
    fn test_sort_does_not_touch_input() {
        let events = vec![
            kill("old", "x", "W", "Z", "2024-01-01T00:00:00Z"),
            kill("new", "x", "W", "Z", "2024-01-02T00:00:00Z"),
        ];
        let _ = sort_events(&events, SortKey::DateDesc);
        assert_eq!(events[0].killer_user, "old");
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("date-asc".parse::<SortKey>().unwrap(), SortKey::DateAsc);
        assert_eq!("WEAPON".parse::<SortKey>().unwrap(), SortKey::Weapon);
        assert!("sideways".parse::<SortKey>().is_err());
        assert_eq!(SortKey::default().to_string(), "date-desc");
    }
}
