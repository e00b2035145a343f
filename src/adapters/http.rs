use crate::core::{ConfigProvider, Gameweek, PlayerSource, Record};
use crate::utils::error::{EtlError, Result};
use serde::Deserialize;

pub const FPL_API_BASE: &str = "https://fantasy.premierleague.com/api";

#[derive(Debug, Deserialize)]
struct LiveResponse {
    elements: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct BootstrapResponse {
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
struct Event {
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    finished: bool,
    #[serde(default)]
    data_checked: bool,
}

/// Client for the public Fantasy Premier League API.
#[derive(Debug, Clone)]
pub struct FplClient {
    client: reqwest::Client,
    base_url: String,
}

impl FplClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Builds a client honouring the configured base URL and request timeout.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base().to_string(),
        })
    }

    pub fn live_url(&self, gameweek: Gameweek) -> String {
        format!(
            "{}/event/{}/live/",
            self.base_url.trim_end_matches('/'),
            gameweek.index()
        )
    }

    pub fn bootstrap_url(&self) -> String {
        format!("{}/bootstrap-static/", self.base_url.trim_end_matches('/'))
    }

    /// The most recent gameweek that has finished and whose data FPL has
    /// confirmed.
    pub async fn latest_finished_gameweek(&self) -> Result<Gameweek> {
        let url = self.bootstrap_url();
        tracing::debug!("Making API request to: {}", url);

        let bootstrap: BootstrapResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let event = bootstrap
            .events
            .into_iter()
            .rev()
            .find(|event| event.finished && event.data_checked)
            .ok_or(EtlError::NoFinishedGameweek)?;

        tracing::info!("Latest finished gameweek: {} (ID: {})", event.name, event.id);
        Ok(Gameweek::new(event.id))
    }
}

impl PlayerSource for FplClient {
    async fn fetch_live(&self, gameweek: Gameweek) -> Result<Vec<Record>> {
        let url = self.live_url(gameweek);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        let live: LiveResponse = response.error_for_status()?.json().await?;
        Ok(live.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::Stage;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_live_url_format() {
        let client = FplClient::new(FPL_API_BASE);
        assert_eq!(
            client.live_url(Gameweek::new(7)),
            "https://fantasy.premierleague.com/api/event/7/live/"
        );

        let trailing = FplClient::new("http://localhost:9000/api/");
        assert_eq!(
            trailing.live_url(Gameweek::new(13)),
            "http://localhost:9000/api/event/13/live/"
        );
    }

    #[tokio::test]
    async fn test_fetch_live_returns_elements_verbatim() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/event/13/live/");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({
                        "elements": [
                            {"id": 1, "stats": {"minutes": 90, "total_points": 5}},
                            {"id": 2, "stats": {"minutes": 0, "total_points": 0}}
                        ]
                    }));
            })
            .await;

        let client = FplClient::new(server.url("/api"));
        let players = client.fetch_live(Gameweek::new(13)).await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(players.len(), 2);
        assert_eq!(
            players[0].clone().into_value(),
            json!({"id": 1, "stats": {"minutes": 90, "total_points": 5}})
        );
        assert_eq!(players[1].get("id"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_fetch_live_empty_elements() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/event/1/live/");
                then.status(200).json_body(json!({ "elements": [] }));
            })
            .await;

        let client = FplClient::new(server.url("/api"));
        let players = client.fetch_live(Gameweek::new(1)).await.unwrap();

        assert!(players.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_live_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/event/13/live/");
                then.status(500);
            })
            .await;

        let client = FplClient::new(server.url("/api"));
        let err = client.fetch_live(Gameweek::new(13)).await.unwrap_err();

        assert_eq!(err.stage(), Stage::Fetch);
    }

    #[tokio::test]
    async fn test_fetch_live_malformed_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/event/13/live/");
                then.status(200).body("<html>The game is being updated.</html>");
            })
            .await;

        let client = FplClient::new(server.url("/api"));
        let err = client.fetch_live(Gameweek::new(13)).await.unwrap_err();

        assert_eq!(err.stage(), Stage::Fetch);
    }

    #[tokio::test]
    async fn test_fetch_live_missing_elements_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/event/13/live/");
                then.status(200).json_body(json!({ "detail": "Not found." }));
            })
            .await;

        let client = FplClient::new(server.url("/api"));
        let err = client.fetch_live(Gameweek::new(13)).await.unwrap_err();

        assert!(matches!(err, EtlError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_latest_finished_gameweek_requires_checked_data() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/bootstrap-static/");
                then.status(200).json_body(json!({
                    "events": [
                        {"id": 12, "name": "Gameweek 12", "finished": true, "data_checked": true},
                        {"id": 13, "name": "Gameweek 13", "finished": true, "data_checked": true},
                        {"id": 14, "name": "Gameweek 14", "finished": true, "data_checked": false},
                        {"id": 15, "name": "Gameweek 15", "finished": false, "data_checked": false}
                    ],
                    "elements": [],
                    "teams": []
                }));
            })
            .await;

        let client = FplClient::new(server.url("/api"));
        let gameweek = client.latest_finished_gameweek().await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(gameweek, Gameweek::new(13));
    }

    #[tokio::test]
    async fn test_latest_finished_gameweek_before_season_start() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/bootstrap-static/");
                then.status(200).json_body(json!({
                    "events": [
                        {"id": 1, "name": "Gameweek 1", "finished": false, "data_checked": false}
                    ]
                }));
            })
            .await;

        let client = FplClient::new(server.url("/api"));
        let err = client.latest_finished_gameweek().await.unwrap_err();

        assert!(matches!(err, EtlError::NoFinishedGameweek));
        assert_eq!(err.exit_code(), 2);
    }
}
