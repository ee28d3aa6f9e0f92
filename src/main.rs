use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use log::debug;
use std::path::PathBuf;
use std::time::Duration;

use star_tracker::analysis::{
    aggregate, build_filter_options, profile_stats, rank_leaderboard, FilterConfig, FilterOptions,
    KillTypeFilter, RawIdFilter, SortKey, ViewState,
};
use star_tracker::api::client::StarTrackerClient;
use star_tracker::api::models::{KillEvent, Profile};
use star_tracker::api::{load_events_from_file, load_leaderboard_from_file};
use star_tracker::config::Config;
use star_tracker::display::output::{
    display_aggregation, display_error, display_filter_options, display_info, display_leaderboard,
    display_success, display_warning,
};
use star_tracker::error::AppError;

#[derive(Parser, Debug)]
#[command(name = "star-tracker")]
#[command(about = "Browse Star Tracker kill logs, profiles and the leaderboard", long_about = None)]
struct Args {
    /// Read data from a saved JSON file instead of the API
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// API base URL (overrides STAR_TRACKER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Kill dashboard for a player
    Kills {
        /// Player name (default: STAR_TRACKER_PLAYER)
        #[arg(short, long)]
        player: Option<String>,

        /// all, kills or deaths
        #[arg(short, long, default_value = "all")]
        view: ViewState,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Public profile of another player
    Profile {
        username: String,

        /// all, kills or deaths
        #[arg(short, long, default_value = "all")]
        view: ViewState,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Players ranked by K/D
    Leaderboard,

    /// List the weapon, zone and damage-type filter values
    Options,
}

#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Raw weapon id; repeat to match any of several
    #[arg(long)]
    weapon: Vec<String>,

    /// Every raw weapon id sharing this display name, e.g. "RIFLE BALLISTIC"
    #[arg(long, conflicts_with = "weapon")]
    weapon_group: Option<String>,

    /// Raw zone id; repeat to match any of several
    #[arg(long)]
    zone: Vec<String>,

    /// Every raw zone id sharing this display name
    #[arg(long, conflicts_with = "zone")]
    zone_group: Option<String>,

    #[arg(long)]
    damage_type: Option<String>,

    /// player or npc
    #[arg(long, default_value = "all")]
    kill_type: KillTypeFilter,

    /// date-desc, date-asc, killer, victim, weapon or zone
    #[arg(short, long, default_value = "date-desc")]
    sort: SortKey,

    /// Case-insensitive match on names, weapon and zone
    #[arg(long, default_value = "")]
    search: String,
}

impl FilterArgs {
    fn into_filter(self, options: &FilterOptions) -> Result<FilterConfig, AppError> {
        let weapon = match self.weapon_group {
            Some(label) => options
                .weapon_group(&label)
                .map(|o| o.to_filter())
                .ok_or_else(|| AppError::InvalidArgument(format!("no weapon named '{}'", label)))?,
            None => RawIdFilter::from_values(self.weapon),
        };

        let zone = match self.zone_group {
            Some(label) => options
                .zone_group(&label)
                .map(|o| o.to_filter())
                .ok_or_else(|| AppError::InvalidArgument(format!("no zone named '{}'", label)))?,
            None => RawIdFilter::from_values(self.zone),
        };

        Ok(FilterConfig {
            weapon,
            zone,
            damage_type: self.damage_type,
            kill_type: self.kill_type,
            sort: self.sort,
            search: self.search,
        })
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }
    debug!("Using API at {}", config.api_url);

    let client = StarTrackerClient::new(config.clone());

    match args.command {
        Command::Kills { player, view, filters } => {
            let player = player.or(config.player.clone()).ok_or_else(|| {
                AppError::InvalidArgument("no player given: pass --player or set STAR_TRACKER_PLAYER".to_string())
            })?;

            let events = match &args.file {
                Some(path) => load_events_from_file(path)
                    .with_context(|| format!("loading kills from {}", path.display()))?,
                None => with_spinner("Fetching kills", || client.get_kills())?,
            };

            show_dashboard(&events, filters, view, &player, None)?;
        }
        Command::Profile { username, view, filters } => {
            let (events, profile) = match &args.file {
                Some(path) => {
                    let events = load_events_from_file(path)
                        .with_context(|| format!("loading activity from {}", path.display()))?;
                    (events, None)
                }
                None => {
                    let profile = with_spinner("Fetching profile", || client.get_profile(&username))?;
                    if !profile.is_public {
                        display_warning(&format!("{}'s profile is private; showing what you can see", profile.display_name()));
                    }
                    let events = with_spinner("Fetching activity", || {
                        Ok(client.get_profile_activity_or_empty(profile.user_id))
                    })?;
                    (events, Some(profile))
                }
            };

            let viewer = profile.as_ref().map_or(username.as_str(), |p| p.display_name());
            show_dashboard(&events, filters, view, viewer, profile.as_ref())?;
        }
        Command::Leaderboard => {
            let entries = match &args.file {
                Some(path) => load_leaderboard_from_file(path)
                    .with_context(|| format!("loading leaderboard from {}", path.display()))?,
                None => with_spinner("Fetching leaderboard", || client.get_leaderboard())?,
            };

            display_leaderboard(&rank_leaderboard(&entries));
        }
        Command::Options => {
            let events = match &args.file {
                Some(path) => load_events_from_file(path)
                    .with_context(|| format!("loading kills from {}", path.display()))?,
                None => with_spinner("Fetching kills", || client.get_kills())?,
            };

            display_filter_options(&build_filter_options(&events));
        }
    }

    Ok(())
}

fn show_dashboard(
    events: &[KillEvent],
    filters: FilterArgs,
    view: ViewState,
    viewer: &str,
    profile: Option<&Profile>,
) -> Result<(), AppError> {
    let options = build_filter_options(events);
    let filters = filters.into_filter(&options)?;

    display_success(&format!("Loaded {} kill events", events.len()));
    if filters.is_active() {
        display_info("Filters active; stats still cover every event");
    }

    let mut result = aggregate(events, &filters, view, viewer);
    if let Some(profile) = profile {
        result.stats = profile_stats(profile, events);
    }
    display_aggregation(&result, viewer);
    Ok(())
}

fn with_spinner<T, F>(message: &str, fetch: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError>,
{
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = fetch();
    pb.finish_and_clear();
    result
}
