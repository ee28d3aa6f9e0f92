use crate::api::models::KillEvent;

/// Kills at most this many seconds apart belong to the same streak.
pub const KILLSTREAK_WINDOW_SECS: i64 = 30;

/// Longest run of kills with no gap over the streak window.
///
/// Kills are walked in time order. A gap touching an unparseable timestamp
/// always breaks the run. Returns 0 only for an empty list.
pub fn compute_best_killstreak<'a, I>(events: I) -> usize
where
    I: IntoIterator<Item = &'a KillEvent>,
{
    let mut times: Vec<_> = events.into_iter().map(|e| e.killed_at()).collect();
    if times.is_empty() {
        return 0;
    }
    times.sort();

    let mut best = 1;
    let mut current = 1;

    for pair in times.windows(2) {
        let within_window = match (pair[0], pair[1]) {
            (Some(prev), Some(curr)) => (curr - prev).num_milliseconds() <= KILLSTREAK_WINDOW_SECS * 1000,
            _ => false,
        };

        if within_window {
            current += 1;
            best = best.max(current);
        } else {
            current = 1;
        }
    }

    best
}
