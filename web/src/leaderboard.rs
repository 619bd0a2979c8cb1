use gloo::net::http::{Request, Response};
use oddtile_core::{self as game, GatewayError, LeaderboardGateway, ScoreRecord};
use oddtile_protocol::{RunQueryRequest, RunQueryResponseItem, ScoreDocument};

use crate::game::GameProps;

const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Scores stored as documents of one Firestore collection.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FirestoreLeaderboard {
    project: String,
    api_key: Option<String>,
    collection: String,
}

impl FirestoreLeaderboard {
    pub(crate) fn new(project: String, api_key: Option<String>, collection: String) -> Self {
        Self {
            project,
            api_key,
            collection,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{FIRESTORE_URL}/projects/{}/databases/(default)/documents",
            self.project
        )
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.documents_url(), self.collection)
    }

    fn query_url(&self) -> String {
        format!("{}:runQuery", self.documents_url())
    }

    fn key_param(&self) -> Option<(&'static str, &str)> {
        self.api_key.as_deref().map(|key| ("key", key))
    }
}

fn transport(err: gloo::net::Error) -> GatewayError {
    GatewayError::Transport(err.to_string())
}

fn check_status(response: &Response) -> Result<(), GatewayError> {
    if response.ok() {
        Ok(())
    } else {
        Err(GatewayError::Status {
            code: response.status(),
            message: response.status_text(),
        })
    }
}

/// Keeps documents that carry both a name and a numeric score, in response order.
fn records_from_items(items: Vec<RunQueryResponseItem>) -> Vec<ScoreRecord> {
    items
        .into_iter()
        .filter_map(|item| item.document)
        .filter_map(|document| match (document.player_name(), document.score()) {
            (Some(name), Some(score)) => Some(ScoreRecord::new(name, score)),
            _ => {
                log::warn!("skipping malformed score document {:?}", document.name);
                None
            }
        })
        .collect()
}

impl LeaderboardGateway for FirestoreLeaderboard {
    async fn submit(&self, record: &ScoreRecord) -> Result<(), GatewayError> {
        let body = ScoreDocument::new(&record.name, record.score);
        let response = Request::post(&self.collection_url())
            .query(self.key_param())
            .json(&body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        check_status(&response)
    }

    async fn fetch_top(&self, limit: usize) -> Result<Vec<ScoreRecord>, GatewayError> {
        let body = RunQueryRequest::top_scores(&self.collection, u32::try_from(limit).unwrap_or(u32::MAX));
        let response = Request::post(&self.query_url())
            .query(self.key_param())
            .json(&body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        check_status(&response)?;

        let items: Vec<RunQueryResponseItem> = response
            .json()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))?;
        Ok(records_from_items(items))
    }
}

/// The store picked from the page options.
#[derive(Debug)]
pub(crate) enum WebLeaderboard {
    Firestore(FirestoreLeaderboard),
    Memory(game::MemoryLeaderboard),
}

impl WebLeaderboard {
    pub(crate) fn from_props(props: &GameProps) -> Self {
        match &props.project {
            Some(project) => {
                log::info!(
                    "leaderboard: firestore project {}, collection {}",
                    project,
                    props.collection
                );
                Self::Firestore(FirestoreLeaderboard::new(
                    project.clone(),
                    props.api_key.clone(),
                    props.collection.clone(),
                ))
            }
            None => {
                log::warn!("no leaderboard project configured, scores last until the page is closed");
                Self::Memory(game::MemoryLeaderboard::new())
            }
        }
    }
}

impl LeaderboardGateway for WebLeaderboard {
    async fn submit(&self, record: &ScoreRecord) -> Result<(), GatewayError> {
        match self {
            Self::Firestore(store) => store.submit(record).await,
            Self::Memory(store) => store.submit(record).await,
        }
    }

    async fn fetch_top(&self, limit: usize) -> Result<Vec<ScoreRecord>, GatewayError> {
        match self {
            Self::Firestore(store) => store.fetch_top(limit).await,
            Self::Memory(store) => store.fetch_top(limit).await,
        }
    }
}
