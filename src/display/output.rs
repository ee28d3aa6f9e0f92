use crate::analysis::{
    normalize_weapon_name, normalize_zone_name, Aggregation, DerivedStats, FilterOptions, KdTier,
    KillGroup, Leaderboard, Presentation, ViewState,
};
use crate::api::models::KillEvent;
use crate::analysis::stats::{is_same_player, NO_FAVORITE};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct KillRow {
    #[tabled(rename = "#")]
    number: String,
    time: String,
    killer: String,
    victim: String,
    weapon: String,
    zone: String,
    #[tabled(rename = "type")]
    kind: String,
}

#[derive(Tabled)]
struct LeaderboardTableRow {
    rank: String,
    player: String,
    kills: String,
    deaths: String,
    #[tabled(rename = "k/d")]
    kd: String,
    streak: String,
}

#[derive(Tabled)]
struct OptionRow {
    label: String,
    #[tabled(rename = "raw ids")]
    raw_ids: String,
}

/// `Jan 5, 2024 03:04 PM`, or the raw value when it can't be parsed.
pub fn format_kill_time(event: &KillEvent) -> String {
    match event.killed_at() {
        Some(time) => time.format("%b %-d, %Y %I:%M %p").to_string(),
        None => event.kill_time.clone(),
    }
}

pub fn format_kd(kd_ratio: f64) -> String {
    format!("{:.2}", kd_ratio)
}

fn favorite_label(raw: &str, label_of: fn(&str) -> String) -> String {
    if raw == NO_FAVORITE {
        "NONE".to_string()
    } else {
        label_of(raw)
    }
}

fn kill_rows(kills: &[&KillEvent], viewer: &str) -> Vec<KillRow> {
    kills
        .iter()
        .enumerate()
        .map(|(idx, k)| {
            let highlight = |name: &str| {
                if is_same_player(name, viewer) {
                    name.bold().green().to_string()
                } else {
                    name.to_string()
                }
            };
            KillRow {
                number: format!("{}", idx + 1),
                time: format_kill_time(k),
                killer: highlight(&k.killer_user),
                victim: highlight(&k.victim_user),
                weapon: normalize_weapon_name(k.weapon()),
                zone: normalize_zone_name(k.zone()),
                kind: if k.is_player_kill() { "PLAYER".to_string() } else { "NPC".to_string() },
            }
        })
        .collect()
}

pub fn display_stats(stats: &DerivedStats, player_name: &str) {
    println!(
        "\n{}",
        format!("🚀 STAR TRACKER · {}", player_name.to_uppercase()).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    println!(
        "{} {}   {} {}   {} {}   {} {}",
        "KILLS".bold(),
        stats.kills.to_string().green(),
        "DEATHS".bold(),
        stats.deaths.to_string().red(),
        "K/D".bold(),
        format_kd(stats.kd_ratio).yellow(),
        "BEST STREAK".bold(),
        stats.best_killstreak.to_string().magenta()
    );
    println!(
        "{} {}   {} {}\n",
        "MOST USED WEAPON:".bold(),
        favorite_label(&stats.favorite_weapon, normalize_weapon_name),
        "FAVORITE ZONE:".bold(),
        favorite_label(&stats.favorite_zone, normalize_zone_name)
    );
}

pub fn display_kill_list(kills: &[&KillEvent], viewer: &str) {
    if kills.is_empty() {
        println!("{}", "NO KILLS FOUND".yellow());
        return;
    }

    let mut table = Table::new(kill_rows(kills, viewer));
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_groups(groups: &[KillGroup], viewer: &str, view: ViewState) {
    if groups.is_empty() {
        println!("{}", "NO KILLS FOUND".yellow());
        return;
    }

    let verb = match view {
        ViewState::MyDeaths => "killed you",
        _ => "killed",
    };

    for group in groups {
        let times = if group.kills.len() == 1 { "time" } else { "times" };
        println!(
            "{} {} {} {}",
            "▸".cyan(),
            group.name.bold(),
            verb,
            format!("{} {}", group.kills.len(), times).yellow()
        );

        let mut table = Table::new(kill_rows(&group.kills, viewer));
        table.with(Style::rounded());
        println!("{}\n", table);
    }
}

pub fn display_aggregation(result: &Aggregation, viewer: &str) {
    display_stats(&result.stats, viewer);

    let title = match result.view {
        ViewState::All => "ALL KILLS",
        ViewState::MyKills => "MY KILLS",
        ViewState::MyDeaths => "MY DEATHS",
    };
    println!(
        "{}\n",
        format!("📋 {} ({})", title, result.presentation.event_count()).bold().cyan()
    );

    match &result.presentation {
        Presentation::Flat(kills) => display_kill_list(kills, viewer),
        Presentation::Grouped(groups) => display_groups(groups, viewer, result.view),
    }
}

pub fn display_leaderboard(board: &Leaderboard) {
    println!("\n{}", "🏆 LEADERBOARD".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if board.rows.is_empty() {
        println!("{}", "No players on the leaderboard yet".yellow());
        return;
    }

    println!(
        "{} {}   {} {}\n",
        "GLOBAL KILLS".bold(),
        board.total_kills.to_string().green(),
        "GLOBAL DEATHS".bold(),
        board.total_deaths.to_string().red()
    );

    let rows: Vec<LeaderboardTableRow> = board
        .rows
        .iter()
        .map(|row| {
            let kd = format_kd(row.kd_ratio);
            let kd = match row.tier() {
                KdTier::Excellent => kd.bold().magenta().to_string(),
                KdTier::Good => kd.green().to_string(),
                KdTier::Average => kd.yellow().to_string(),
                KdTier::Below => kd.red().to_string(),
            };
            let rank = match row.rank {
                1 => "🥇".to_string(),
                2 => "🥈".to_string(),
                3 => "🥉".to_string(),
                n => format!("#{}", n),
            };
            LeaderboardTableRow {
                rank,
                player: row.in_game_name.clone(),
                kills: row.kills.to_string(),
                deaths: row.deaths.to_string(),
                kd,
                streak: row.best_streak.to_string(),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_filter_options(options: &FilterOptions) {
    for (title, list) in [("WEAPONS", &options.weapons), ("ZONES", &options.zones)] {
        println!("\n{}", title.bold().cyan());
        let rows: Vec<OptionRow> = list
            .iter()
            .map(|o| OptionRow {
                label: o.label.clone(),
                raw_ids: o.raw_ids.join(", "),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }

    println!("\n{}", "DAMAGE TYPES".bold().cyan());
    println!("{}\n", options.damage_types.join(", "));
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
