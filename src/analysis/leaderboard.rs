use super::stats::kd_ratio;
use super::streak::compute_best_killstreak;
use crate::api::models::LeaderboardEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdTier {
    Excellent,
    Good,
    Average,
    Below,
}

impl KdTier {
    pub fn classify(kd_ratio: f64) -> Self {
        if kd_ratio >= 3.0 {
            KdTier::Excellent
        } else if kd_ratio >= 2.0 {
            KdTier::Good
        } else if kd_ratio >= 1.0 {
            KdTier::Average
        } else {
            KdTier::Below
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub username: String,
    pub in_game_name: String,
    pub kills: u64,
    pub deaths: u64,
    pub kd_ratio: f64,
    pub best_streak: usize,
}

impl LeaderboardRow {
    pub fn tier(&self) -> KdTier {
        KdTier::classify(self.kd_ratio)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    pub rows: Vec<LeaderboardRow>,
    pub total_kills: u64,
    pub total_deaths: u64,
}

/// Ranks players by K/D, best first. Equal ratios keep API order.
pub fn rank_leaderboard(entries: &[LeaderboardEntry]) -> Leaderboard {
    let mut board = Leaderboard::default();

    let mut rows: Vec<LeaderboardRow> = entries
        .iter()
        .map(|entry| {
            let kills = entry.total_kills.unwrap_or(0);
            let deaths = entry.total_deaths.unwrap_or(0);
            board.total_kills += kills;
            board.total_deaths += deaths;

            let best_streak = match entry.best_killstreak {
                Some(streak) if streak > 0 => streak,
                _ => compute_best_killstreak(&entry.kills),
            };

            let in_game_name = match entry.in_game_name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => entry.username.clone(),
            };

            LeaderboardRow {
                rank: 0,
                username: entry.username.clone(),
                in_game_name,
                kills,
                deaths,
                kd_ratio: kd_ratio(kills, deaths),
                best_streak,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.kd_ratio.total_cmp(&a.kd_ratio));
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }

    board.rows = rows;
    board
}
