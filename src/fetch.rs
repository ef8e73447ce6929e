use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{header, Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use log::debug;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Group, Leader, Recommended, StructureRow, Voter};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("snapshot file {path} unreadable: {reason}")]
    Snapshot { path: String, reason: String },
    #[error("invalid entity service url: {0}")]
    BadUrl(String),
}

/// Source of raw entity collections. The backend data service owns all
/// persistence and business rules; implementations only move collections.
#[async_trait]
pub trait EntityFetcher: Send + Sync {
    async fn leaders(&self) -> Result<Vec<Leader>, FetchError>;
    async fn voters(&self) -> Result<Vec<Voter>, FetchError>;
    async fn recommended(&self) -> Result<Vec<Recommended>, FetchError>;
    async fn groups(&self) -> Result<Vec<Group>, FetchError>;
    /// Recommended people belonging to one group.
    async fn recommended_of(&self, group_id: i64) -> Result<Vec<Recommended>, FetchError>;
    /// Flattened leader-voter rows under one group's recommended tree.
    async fn full_structure_of(&self, group_id: i64) -> Result<Vec<StructureRow>, FetchError>;
}

/// Connection settings for the entity service, passed in at construction.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// JSON-over-HTTP client for the backend data service.
pub struct HttpFetcher {
    client: Client<HttpConnector, Empty<Bytes>>,
    config: ServiceConfig,
}

impl HttpFetcher {
    pub fn new(config: ServiceConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self { client, config }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        debug!("GET {url}");

        let uri: Uri = url
            .parse()
            .map_err(|_| FetchError::BadUrl(url.clone()))?;
        let request = Request::builder()
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let response = tokio::time::timeout(self.config.timeout, self.client.request(request))
            .await
            .map_err(|_| FetchError::Transport {
                url: url.clone(),
                reason: format!("timed out after {:?}", self.config.timeout),
            })?
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?
            .to_bytes();

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl EntityFetcher for HttpFetcher {
    async fn leaders(&self) -> Result<Vec<Leader>, FetchError> {
        self.get_json("/leaders").await
    }

    async fn voters(&self) -> Result<Vec<Voter>, FetchError> {
        self.get_json("/voters").await
    }

    async fn recommended(&self) -> Result<Vec<Recommended>, FetchError> {
        self.get_json("/recommended").await
    }

    async fn groups(&self) -> Result<Vec<Group>, FetchError> {
        self.get_json("/groups").await
    }

    async fn recommended_of(&self, group_id: i64) -> Result<Vec<Recommended>, FetchError> {
        self.get_json(&format!("/groups/{group_id}/recommended")).await
    }

    async fn full_structure_of(&self, group_id: i64) -> Result<Vec<StructureRow>, FetchError> {
        self.get_json(&format!("/groups/{group_id}/structure")).await
    }
}

/// Reads the same collections from JSON files in a directory, for offline
/// runs and fixtures. Expects `leaders.json`, `voters.json`,
/// `recommended.json`, `groups.json` and `structure-<group id>.json`.
pub struct SnapshotFetcher {
    dir: PathBuf,
}

impl SnapshotFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<T, FetchError> {
        let path = self.dir.join(file);
        let contents = std::fs::read_to_string(&path).map_err(|e| FetchError::Snapshot {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|e| FetchError::Decode {
            url: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl EntityFetcher for SnapshotFetcher {
    async fn leaders(&self) -> Result<Vec<Leader>, FetchError> {
        self.load("leaders.json")
    }

    async fn voters(&self) -> Result<Vec<Voter>, FetchError> {
        self.load("voters.json")
    }

    async fn recommended(&self) -> Result<Vec<Recommended>, FetchError> {
        self.load("recommended.json")
    }

    async fn groups(&self) -> Result<Vec<Group>, FetchError> {
        self.load("groups.json")
    }

    async fn recommended_of(&self, group_id: i64) -> Result<Vec<Recommended>, FetchError> {
        let all: Vec<Recommended> = self.load("recommended.json")?;
        Ok(all
            .into_iter()
            .filter(|r| r.group_id == Some(group_id))
            .collect())
    }

    async fn full_structure_of(&self, group_id: i64) -> Result<Vec<StructureRow>, FetchError> {
        self.load(&format!("structure-{group_id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn http_fetcher_decodes_leader_collection() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/leaders")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"identifier":"L1","name":"Marta","surname":"Quintero","target":10},
                    {"identifier":"L2","name":"Pablo","surname":"Mesa","target":0,
                     "recommenderId":"R1"}]"#,
            )
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(ServiceConfig::new(server.url()));
        let leaders = fetcher.leaders().await.unwrap();
        mock.assert_async().await;

        assert_eq!(leaders.len(), 2);
        assert_eq!(leaders[0].identifier, "L1");
        assert_eq!(leaders[0].target, 10);
        assert_eq!(leaders[1].recommender_id.as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn http_fetcher_surfaces_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/voters")
            .with_status(503)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(ServiceConfig::new(server.url()));
        match fetcher.voters().await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 503),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_fetcher_addresses_group_subresources() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/groups/7/structure")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"leaderId":"A","voterId":"X"},{"voterId":"Y"},{}]"#)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(ServiceConfig::new(server.url()));
        let rows = fetcher.full_structure_of(7).await.unwrap();
        mock.assert_async().await;

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].leader_id.as_deref(), Some("A"));
        assert_eq!(rows[1].leader_id, None);
        assert_eq!(rows[2].voter_id, None);
    }

    #[tokio::test]
    async fn snapshot_fetcher_reads_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("recommended.json"),
            r#"[{"identifier":"R1","name":"Sofia","surname":"Lema","groupId":3},
                {"identifier":"R2","name":"Teo","surname":"Diaz","groupId":4}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("structure-3.json"),
            r#"[{"leaderId":"L1","voterId":"V1"}]"#,
        )
        .unwrap();

        let fetcher = SnapshotFetcher::new(dir.path());
        let in_group = fetcher.recommended_of(3).await.unwrap();
        assert_eq!(in_group.len(), 1);
        assert_eq!(in_group[0].identifier, "R1");

        let rows = fetcher.full_structure_of(3).await.unwrap();
        assert_eq!(rows.len(), 1);

        match fetcher.full_structure_of(99).await {
            Err(FetchError::Snapshot { .. }) => {}
            other => panic!("expected snapshot error, got {other:?}"),
        }
    }
}
