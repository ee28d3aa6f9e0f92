pub mod client;
pub mod endpoints;
pub mod models;

use crate::error::AppError;
use log::debug;
use models::{KillEvent, LeaderboardEntry};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Reads a JSON array of kill records exported from the API.
pub fn load_events_from_file(path: &Path) -> Result<Vec<KillEvent>, AppError> {
    let events: Vec<KillEvent> = load_json_file(path)?;
    debug!("Loaded {} kill events from {}", events.len(), path.display());
    Ok(events)
}

/// Reads a saved /api/profiles/leaderboard response.
pub fn load_leaderboard_from_file(path: &Path) -> Result<Vec<LeaderboardEntry>, AppError> {
    let entries: Vec<LeaderboardEntry> = load_json_file(path)?;
    debug!("Loaded {} leaderboard entries from {}", entries.len(), path.display());
    Ok(entries)
}
