use pretty_assertions::assert_eq;
use star_tracker::analysis::rank_leaderboard;
use star_tracker::api::{load_events_from_file, load_leaderboard_from_file};
use star_tracker::error::AppError;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_events_from_file() {
    let file = write_temp(
        r#"[{"killerUser":"AquaRex","victimUser":"Pirate","killTime":"2024-05-01T10:00:00Z","isPlayer":1},
            {"killerUser":"Wolf","victimUser":"AquaRex"}]"#,
    );

    let events = load_events_from_file(file.path()).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].is_player, Some(true));
    assert_eq!(events[1].weapon(), "Unknown");
    assert_eq!(events[1].killed_at(), None);
}

#[test]
fn test_load_events_rejects_non_array() {
    let file = write_temp(r#"{"killerUser":"AquaRex"}"#);
    let err = load_events_from_file(file.path()).unwrap_err();
    assert!(matches!(err, AppError::Json(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_events_from_file(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, AppError::Io(_)));
}

#[test]
fn test_load_and_rank_leaderboard() {
    let file = write_temp(
        r#"[
            {"username":"AquaRex","inGameName":"AquaRex","totalKills":47,"totalDeaths":12,"bestKillstreak":8,"kills":[]},
            {"username":"SpaceWolf","inGameName":"SpaceWolf-Alpha","totalKills":30,"totalDeaths":5},
            {"username":"newbie"}
        ]"#,
    );

    let entries = load_leaderboard_from_file(file.path()).unwrap();
    let board = rank_leaderboard(&entries);

    let names: Vec<&str> = board.rows.iter().map(|r| r.in_game_name.as_str()).collect();
    assert_eq!(names, vec!["SpaceWolf-Alpha", "AquaRex", "newbie"]);
    assert_eq!(board.total_kills, 77);
    assert_eq!(board.total_deaths, 17);
    assert_eq!(board.rows[1].best_streak, 8);
    assert_eq!(board.rows[2].best_streak, 0);
}
