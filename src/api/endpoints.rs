// Star Tracker REST paths, relative to the configured base URL

pub const KILLS_ENDPOINT: &str = "/api/kills";
pub const PROFILES_ENDPOINT: &str = "/api/profiles";
pub const LEADERBOARD_ENDPOINT: &str = "/api/profiles/leaderboard";
pub const ACTIVITY_SEGMENT: &str = "activity";
