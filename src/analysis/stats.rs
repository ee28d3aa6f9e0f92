use super::streak::compute_best_killstreak;
use crate::api::models::{KillEvent, Profile};
use std::collections::HashMap;

pub const NO_FAVORITE: &str = "None";

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedStats {
    pub kills: usize,
    pub deaths: usize,
    pub kd_ratio: f64,
    pub best_killstreak: usize,
    /// Raw weapon id used most often by the viewer, or "None"
    pub favorite_weapon: String,
    /// Raw zone id the viewer killed in most often, or "None"
    pub favorite_zone: String,
}

/// Kills over deaths; with no deaths the ratio is the kill count.
pub fn kd_ratio(kills: u64, deaths: u64) -> f64 {
    if deaths > 0 {
        kills as f64 / deaths as f64
    } else {
        kills as f64
    }
}

pub fn is_same_player(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub fn compute_derived_stats(events: &[KillEvent], viewer: &str) -> DerivedStats {
    let kills: Vec<&KillEvent> = events
        .iter()
        .filter(|e| is_same_player(&e.killer_user, viewer))
        .collect();
    let deaths = events
        .iter()
        .filter(|e| is_same_player(&e.victim_user, viewer))
        .count();

    DerivedStats {
        kills: kills.len(),
        deaths,
        kd_ratio: kd_ratio(kills.len() as u64, deaths as u64),
        best_killstreak: compute_best_killstreak(kills.iter().copied()),
        favorite_weapon: most_frequent(kills.iter().map(|k| k.weapon())),
        favorite_zone: most_frequent(kills.iter().map(|k| k.zone())),
    }
}

/// Stats for a profile page. Kills, deaths, K/D and the favourite weapon come
/// from the profile's stored totals; the streak and favourite zone can only be
/// read off the fetched activity. A profile without a stored favourite weapon
/// falls back to the activity.
pub fn profile_stats(profile: &Profile, activity: &[KillEvent]) -> DerivedStats {
    let from_activity = compute_derived_stats(activity, profile.display_name());

    let favorite_weapon = match profile.favorite_weapon.as_deref() {
        Some(weapon) if !weapon.is_empty() => weapon.to_string(),
        _ => from_activity.favorite_weapon,
    };

    DerivedStats {
        kills: profile.total_kills as usize,
        deaths: profile.total_deaths as usize,
        kd_ratio: kd_ratio(profile.total_kills, profile.total_deaths),
        best_killstreak: from_activity.best_killstreak,
        favorite_weapon,
        favorite_zone: from_activity.favorite_zone,
    }
}

/// Mode of the values. Ties go to the value seen first.
fn most_frequent<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for value in values {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for value in order {
        let count = counts[value];
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value.to_string())
        .unwrap_or_else(|| NO_FAVORITE.to_string())
}
