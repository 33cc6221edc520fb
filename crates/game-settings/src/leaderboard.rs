//! Online leaderboard (Supabase REST)
//!
//! Best-effort: scores are posted in the background and failures are only
//! logged. Nothing in a game waits on the network.

use crate::GameConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Leaderboard returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Row as stored in the `scores` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub id: String,
    #[serde(default)]
    pub player_name: Option<String>,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

/// Insert payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewScore {
    pub player_name: Option<String>,
    pub score: u64,
}

impl NewScore {
    pub fn new(player_name: Option<&str>, score: u64) -> Self {
        Self {
            player_name: player_name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            score,
        }
    }
}

/// Destination for finished-game scores
pub trait ScoreSink: Send + Sync {
    fn submit(&self, score: NewScore) -> impl Future<Output = Result<(), LeaderboardError>> + Send;
}

/// Supabase PostgREST client for the `scores` table
#[derive(Debug, Clone)]
pub struct LeaderboardClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LeaderboardClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, LeaderboardError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Client from config, or `None` when the leaderboard is not configured
    pub fn from_config(config: &GameConfig) -> Option<Self> {
        let (Some(url), Some(key)) = (&config.supabase_url, &config.supabase_key) else {
            debug!("Leaderboard disabled: URL or key not set");
            return None;
        };
        match Self::new(url, key, Duration::from_secs(config.http_timeout_sec)) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Leaderboard disabled: {}", e);
                None
            }
        }
    }

    pub fn scores_url(&self) -> String {
        format!("{}/rest/v1/scores", self.base_url)
    }

    /// Highest scores first
    pub async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRow>, LeaderboardError> {
        let response = self
            .client
            .get(self.scores_url())
            .query(&[
                ("select", "*".to_string()),
                ("order", "score.desc".to_string()),
                ("limit", limit.to_string()),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(response.json().await?)
    }
}

impl ScoreSink for LeaderboardClient {
    async fn submit(&self, score: NewScore) -> Result<(), LeaderboardError> {
        let response = self
            .client
            .post(self.scores_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(&score)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        info!("Submitted score {} to leaderboard", score.score);
        Ok(())
    }
}

async fn api_error(response: reqwest::Response) -> LeaderboardError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    LeaderboardError::Api { status, body }
}

/// Fire-and-forget submission on the current tokio runtime.
///
/// Failures are logged. Returns `None` outside a runtime.
pub fn submit_detached<S>(sink: Arc<S>, score: NewScore) -> Option<JoinHandle<()>>
where
    S: ScoreSink + 'static,
{
    if tokio::runtime::Handle::try_current().is_err() {
        warn!("No async runtime, score {} not submitted", score.score);
        return None;
    }
    Some(tokio::spawn(async move {
        let points = score.score;
        if let Err(e) = sink.submit(score).await {
            warn!("Score {} not submitted: {}", points, e);
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<NewScore>>,
        fail: bool,
    }

    impl ScoreSink for RecordingSink {
        async fn submit(&self, score: NewScore) -> Result<(), LeaderboardError> {
            if self.fail {
                return Err(LeaderboardError::Api {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(score);
            }
            Ok(())
        }
    }

    #[test]
    fn test_new_score_trims_name() {
        assert_eq!(NewScore::new(Some("  Ana "), 7).player_name.as_deref(), Some("Ana"));
        assert_eq!(NewScore::new(Some("   "), 7).player_name, None);
        assert_eq!(NewScore::new(None, 7).player_name, None);
    }

    #[test]
    fn test_payload_shape() {
        let json = serde_json::to_value(NewScore::new(None, 12)).unwrap();
        assert_eq!(json, serde_json::json!({"player_name": null, "score": 12}));
    }

    #[test]
    fn test_score_row_parse() {
        let rows: Vec<ScoreRow> = serde_json::from_str(
            r#"[
                {"id": "a1", "player_name": "Ana", "score": 9,
                 "created_at": "2025-01-02T03:04:05+00:00"},
                {"id": "b2", "player_name": null, "score": 4,
                 "created_at": "2025-01-02T03:04:05Z"}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows[0].player_name.as_deref(), Some("Ana"));
        assert_eq!(rows[1].player_name, None);
        assert_eq!(rows[1].score, 4);
    }

    #[test]
    fn test_client_urls_and_config() {
        let client =
            LeaderboardClient::new("https://x.supabase.co/", "pk", Duration::from_secs(1)).unwrap();
        assert_eq!(client.scores_url(), "https://x.supabase.co/rest/v1/scores");

        assert!(LeaderboardClient::from_config(&GameConfig::default()).is_none());
    }

    #[tokio::test]
    async fn test_submit_detached_delivers() {
        let sink = Arc::new(RecordingSink::default());
        let handle = submit_detached(sink.clone(), NewScore::new(Some("Kai"), 3)).unwrap();
        handle.await.unwrap();

        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), [NewScore::new(Some("Kai"), 3)]);
    }

    #[tokio::test]
    async fn test_submit_detached_swallows_failure() {
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let handle = submit_detached(sink, NewScore::new(None, 1)).unwrap();
        assert!(handle.await.is_ok());
    }

    #[test]
    fn test_submit_detached_without_runtime() {
        let sink = Arc::new(RecordingSink::default());
        assert!(submit_detached(sink, NewScore::new(None, 1)).is_none());
    }
}
