use crate::config::Config;
use crate::error::AppError;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use url::Url;

use super::endpoints::*;
use super::models::*;

const USER_AGENT: &str = concat!("star_tracker/", env!("CARGO_PKG_VERSION"));

pub struct StarTrackerClient {
    config: Config,
    agent: ureq::Agent,
}

impl StarTrackerClient {
    pub fn new(config: Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build();
        StarTrackerClient { config, agent }
    }

    /// Joins an endpoint path and extra segments onto the base URL. Segments
    /// are percent-encoded, so usernames can contain anything.
    pub(crate) fn endpoint_url(&self, endpoint: &str, extra: &[&str]) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.config.api_url)
            .map_err(|e| AppError::Config(format!("Invalid API URL '{}': {}", self.config.api_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("API URL '{}' cannot take a path", self.config.api_url)))?
            .pop_if_empty()
            .extend(endpoint.trim_start_matches('/').split('/'))
            .extend(extra);

        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &Url, what: &str) -> Result<T, AppError> {
        debug!("GET {}", url.path());

        let mut request = self
            .agent
            .get(url.as_str())
            .set("Content-Type", "application/json");
        if let Some(token) = &self.config.token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        match request.call() {
            Ok(resp) => {
                let body = resp.into_string().map_err(|e| AppError::Http(e.to_string()))?;
                serde_json::from_str(&body).map_err(|e| AppError::Json(format!("{}: {}", what, e)))
            }
            Err(ureq::Error::Status(401, _)) => Err(AppError::Unauthorized),
            Err(ureq::Error::Status(403, _)) => Err(AppError::Forbidden),
            Err(ureq::Error::Status(404, _)) => Err(AppError::NotFound(what.to_string())),
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Err(AppError::Api(code, body))
            }
            Err(e) => Err(AppError::Http(e.to_string())),
        }
    }

    pub fn get_kills(&self) -> Result<Vec<KillEvent>, AppError> {
        let url = self.endpoint_url(KILLS_ENDPOINT, &[])?;
        self.get_json(&url, "kill list")
    }

    pub fn get_profile(&self, username: &str) -> Result<Profile, AppError> {
        let url = self.endpoint_url(PROFILES_ENDPOINT, &[username])?;
        self.get_json(&url, &format!("profile '{}'", username))
    }

    pub fn get_profile_activity(&self, user_id: i64) -> Result<Vec<KillEvent>, AppError> {
        let id = user_id.to_string();
        let url = self.endpoint_url(PROFILES_ENDPOINT, &[id.as_str(), ACTIVITY_SEGMENT])?;
        self.get_json(&url, &format!("activity for user {}", user_id))
    }

    /// Activity is best-effort: a profile without readable activity shows as
    /// having none.
    pub fn get_profile_activity_or_empty(&self, user_id: i64) -> Vec<KillEvent> {
        match self.get_profile_activity(user_id) {
            Ok(events) => events,
            Err(e) => {
                warn!("Could not load activity for user {}: {}", user_id, e);
                Vec::new()
            }
        }
    }

    pub fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        let url = self.endpoint_url(LEADERBOARD_ENDPOINT, &[])?;
        self.get_json(&url, "leaderboard")
    }
}
