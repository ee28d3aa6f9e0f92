use super::filter::RawIdFilter;
use super::names::{normalize_weapon_name, normalize_zone_name};
use crate::api::models::KillEvent;
use std::collections::{BTreeMap, BTreeSet};

/// One dropdown entry: a display label and every raw id behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub raw_ids: Vec<String>,
}

impl FilterOption {
    pub fn to_filter(&self) -> RawIdFilter {
        RawIdFilter::AnyOf(self.raw_ids.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub weapons: Vec<FilterOption>,
    pub zones: Vec<FilterOption>,
    pub damage_types: Vec<String>,
}

impl FilterOptions {
    pub fn weapon_group(&self, label: &str) -> Option<&FilterOption> {
        find_label(&self.weapons, label)
    }

    pub fn zone_group(&self, label: &str) -> Option<&FilterOption> {
        find_label(&self.zones, label)
    }
}

fn find_label<'a>(options: &'a [FilterOption], label: &str) -> Option<&'a FilterOption> {
    options.iter().find(|o| o.label.eq_ignore_ascii_case(label))
}

pub fn build_filter_options(events: &[KillEvent]) -> FilterOptions {
    FilterOptions {
        weapons: group_labels(events.iter().map(|e| e.weapon()), normalize_weapon_name),
        zones: group_labels(events.iter().map(|e| e.zone()), normalize_zone_name),
        damage_types: events
            .iter()
            .map(|e| e.damage_type().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    }
}

fn group_labels<'a, I>(raw_ids: I, label_of: fn(&str) -> String) -> Vec<FilterOption>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut by_label: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for raw in raw_ids {
        let ids = by_label.entry(label_of(raw)).or_default();
        if !ids.iter().any(|id| id == raw) {
            ids.push(raw.to_string());
        }
    }

    by_label
        .into_iter()
        .map(|(label, raw_ids)| FilterOption { label, raw_ids })
        .collect()
}
