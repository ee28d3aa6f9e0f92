use crate::api::models::KillEvent;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Killer,
    Victim,
}

impl GroupField {
    pub fn value_of(self, event: &KillEvent) -> &str {
        match self {
            GroupField::Killer => &event.killer_user,
            GroupField::Victim => &event.victim_user,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KillGroup<'a> {
    pub name: String,
    pub kills: Vec<&'a KillEvent>,
}

/// Partitions events by opponent name, biggest groups first.
///
/// Members keep the order they arrived in, so sort the flat list before
/// grouping. Groups with equal counts stay in first-seen order.
pub fn group_by_opponent<'a, I>(events: I, field: GroupField) -> Vec<KillGroup<'a>>
where
    I: IntoIterator<Item = &'a KillEvent>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<KillGroup<'a>> = Vec::new();

    for event in events {
        let name = field.value_of(event);
        let slot = *index.entry(name).or_insert_with(|| {
            groups.push(KillGroup {
                name: name.to_string(),
                kills: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].kills.push(event);
    }

    groups.sort_by(|a, b| b.kills.len().cmp(&a.kills.len()));
    groups
}
