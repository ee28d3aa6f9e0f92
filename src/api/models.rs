use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub const UNKNOWN: &str = "Unknown";

// Kill record as returned by /api/kills and /api/profiles/{id}/activity
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KillEvent {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub killer_user: String,
    #[serde(default)]
    pub victim_user: String,
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub damage_type: Option<String>,
    #[serde(default)]
    pub kill_time: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_player: Option<bool>,
}

impl KillEvent {
    pub fn weapon(&self) -> &str {
        or_unknown(self.weapon.as_deref())
    }

    pub fn zone(&self) -> &str {
        or_unknown(self.zone.as_deref())
    }

    pub fn damage_type(&self) -> &str {
        or_unknown(self.damage_type.as_deref())
    }

    /// Absent `isPlayer` means the victim was an NPC.
    pub fn is_player_kill(&self) -> bool {
        self.is_player.unwrap_or(false)
    }

    /// Parsed `killTime`, or `None` when the API sent something unreadable.
    pub fn killed_at(&self) -> Option<DateTime<Utc>> {
        parse_kill_time(&self.kill_time)
    }
}

fn or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN,
    }
}

// ISO-8601 shapes with an explicit offset; %z takes both +0000 and +00:00
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

// Shapes without an offset, read as UTC. A literal Z is UTC too.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_kill_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    // Date-only means midnight UTC
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

// The API emits isPlayer as either true/false or 1/0
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = Option::<Flag>::deserialize(deserializer)?;
    Ok(flag.map(|f| match f {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    }))
}

// /api/profiles/{username}
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub in_game_name: Option<String>,
    #[serde(default)]
    pub total_kills: u64,
    #[serde(default)]
    pub total_deaths: u64,
    #[serde(default)]
    pub favorite_weapon: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        match self.in_game_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }
}

// /api/profiles/leaderboard
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub in_game_name: Option<String>,
    #[serde(default)]
    pub total_kills: Option<u64>,
    #[serde(default)]
    pub total_deaths: Option<u64>,
    #[serde(default)]
    pub best_killstreak: Option<usize>,
    #[serde(default)]
    pub kills: Vec<KillEvent>,
}
