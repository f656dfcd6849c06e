use crate::config::{AppConfig, ConfigError, RankingConfig};
use crate::pool::Item;
use crate::session::{RankingSession, SessionMeta, SessionTarget};
use crate::storage::{restore, SnapshotStore};
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

const CONFIG_URL: &str = "assets/config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumImage {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub image_path: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedAlbum {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "images")]
    pub items: Vec<AlbumImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRankingItem {
    #[serde(deserialize_with = "id_string", alias = "imageId")]
    pub item_id: String,
    pub points: i32,
    #[serde(default)]
    pub viewed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankingMetadata {
    pub name: String,
    pub description: String,
    pub is_public: bool,
    #[serde(deserialize_with = "id_string")]
    pub album_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRanking {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub items: Vec<SavedRankingItem>,
    #[serde(default)]
    pub metadata: RankingMetadata,
}

/// Body of the commit call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingPayload {
    pub metadata: RankingMetadata,
    pub items: Vec<SavedRankingItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
    #[serde(deserialize_with = "id_string", alias = "id")]
    ranking_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("{0} was not found")]
    NotFound(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status} while fetching {url}")]
    Http { status: u16, url: String },
    #[error("unexpected response: {0}")]
    Parse(String),
    #[error("{0} has no images to rank")]
    EmptyPool(String),
    #[error("invalid ranking config: {0}")]
    Config(#[from] ConfigError),
}

impl DataError {
    fn network<E: std::fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: std::fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Remote side of a ranking session.
#[async_trait(?Send)]
pub trait RankingBackend {
    async fn fetch_album(&self, album_id: &str) -> Result<LoadedAlbum, DataError>;

    async fn fetch_ranking(&self, ranking_id: &str) -> Result<SavedRanking, DataError>;

    /// Create the ranking when `ranking_id` is `None`, otherwise overwrite it.
    /// Returns the stored ranking id.
    async fn save_ranking(
        &self,
        ranking_id: Option<&str>,
        payload: &RankingPayload,
    ) -> Result<String, DataError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBackend {
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait(?Send)]
impl RankingBackend for HttpBackend {
    async fn fetch_album(&self, album_id: &str) -> Result<LoadedAlbum, DataError> {
        let url = self.url(&format!("albums/{}", album_id));
        let response = Request::get(&url)
            .send()
            .await
            .map_err(DataError::network)?;
        let text = read_body(response, &url, || format!("album {}", album_id)).await?;
        serde_json::from_str(&text).map_err(DataError::parse)
    }

    async fn fetch_ranking(&self, ranking_id: &str) -> Result<SavedRanking, DataError> {
        let url = self.url(&format!("rankings/{}", ranking_id));
        let response = Request::get(&url)
            .send()
            .await
            .map_err(DataError::network)?;
        let text = read_body(response, &url, || format!("ranking {}", ranking_id)).await?;
        serde_json::from_str(&text).map_err(DataError::parse)
    }

    async fn save_ranking(
        &self,
        ranking_id: Option<&str>,
        payload: &RankingPayload,
    ) -> Result<String, DataError> {
        let (url, request) = match ranking_id {
            Some(id) => {
                let url = self.url(&format!("rankings/{}", id));
                let request = Request::put(&url).json(payload);
                (url, request)
            }
            None => {
                let url = self.url("rankings");
                let request = Request::post(&url).json(payload);
                (url, request)
            }
        };
        let response = request
            .map_err(DataError::parse)?
            .send()
            .await
            .map_err(DataError::network)?;
        let text = read_body(response, &url, || "ranking".to_string()).await?;
        let created: CommitResponse = serde_json::from_str(&text).map_err(DataError::parse)?;
        Ok(created.ranking_id)
    }
}

async fn read_body(
    response: Response,
    url: &str,
    what: impl FnOnce() -> String,
) -> Result<String, DataError> {
    if response.status() == 404 {
        return Err(DataError::NotFound(what()));
    }
    if !response.ok() {
        return Err(DataError::Http {
            status: response.status(),
            url: url.to_string(),
        });
    }
    response.text().await.map_err(DataError::network)
}

/// `assets/config.json`, or the defaults when it is missing or invalid.
pub async fn fetch_app_config() -> AppConfig {
    let text = match Request::get(CONFIG_URL).send().await {
        Ok(response) if response.ok() => response.text().await.ok(),
        Ok(response) => {
            info!("No app config ({}), using defaults", response.status());
            None
        }
        Err(err) => {
            warn!("Failed to fetch app config: {}", err);
            None
        }
    };

    match text.map(|text| AppConfig::from_json(&text)) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            warn!("Ignoring invalid app config: {}", err);
            AppConfig::default()
        }
        None => AppConfig::default(),
    }
}

pub fn album_items(album: &LoadedAlbum) -> Vec<Item> {
    album
        .items
        .iter()
        .map(|image| {
            let mut item = Item::new(
                image.id.clone(),
                image.name.clone(),
                image.image_path.clone(),
            );
            item.description = image.description.clone();
            item
        })
        .collect()
}

/// Fresh session over every image of `album`.
pub fn album_session<R: Rng + ?Sized>(
    album: &LoadedAlbum,
    config: &RankingConfig,
    rng: &mut R,
) -> Result<RankingSession, DataError> {
    let items = album_items(album);
    if items.is_empty() {
        return Err(DataError::EmptyPool(format!("album {}", album.id)));
    }
    let meta = SessionMeta::for_album(album.id.clone(), album.name.clone());
    Ok(RankingSession::new(meta, items, config.clone(), rng)?)
}

/// Continue a saved ranking. Only the album images that the saved ranking
/// recorded take part.
pub fn saved_session<R: Rng + ?Sized>(
    album: &LoadedAlbum,
    saved: &SavedRanking,
    config: &RankingConfig,
    rng: &mut R,
) -> Result<RankingSession, DataError> {
    let progress: HashMap<&str, &SavedRankingItem> = saved
        .items
        .iter()
        .map(|entry| (entry.item_id.as_str(), entry))
        .collect();

    let items: Vec<Item> = album_items(album)
        .into_iter()
        .filter_map(|mut item| {
            let entry = progress.get(item.id.as_str())?;
            item.score = entry.points;
            item.viewed = entry.viewed;
            Some(item)
        })
        .collect();

    if items.is_empty() {
        return Err(DataError::EmptyPool(format!("ranking {}", saved.id)));
    }
    if items.len() < saved.items.len() {
        warn!(
            "Ranking {} references {} images missing from album {}",
            saved.id,
            saved.items.len() - items.len(),
            album.id
        );
    }

    let meta = SessionMeta {
        name: saved.metadata.name.clone(),
        description: saved.metadata.description.clone(),
        is_public: saved.metadata.is_public,
        album_id: album.id.clone(),
        ranking_id: Some(saved.id.clone()),
    };
    Ok(RankingSession::new(meta, items, config.clone(), rng)?)
}

/// Resume from the local snapshot if there is one, otherwise build the
/// session from the backend.
pub async fn load_session<B, S, R>(
    backend: &B,
    store: &S,
    target: &SessionTarget,
    config: &RankingConfig,
    rng: &mut R,
) -> Result<RankingSession, DataError>
where
    B: RankingBackend + ?Sized,
    S: SnapshotStore + ?Sized,
    R: Rng + ?Sized,
{
    if let Some(session) = restore(store, target, config, rng) {
        return Ok(session);
    }

    match target {
        SessionTarget::Album(album_id) => {
            let album = backend.fetch_album(album_id).await?;
            album_session(&album, config, rng)
        }
        SessionTarget::Ranking(ranking_id) => {
            let saved = backend.fetch_ranking(ranking_id).await?;
            let album = backend.fetch_album(&saved.metadata.album_id).await?;
            saved_session(&album, &saved, config, rng)
        }
    }
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Backend answering from fixed data and recording commits.
    #[derive(Default)]
    pub(crate) struct ScriptedBackend {
        pub albums: HashMap<String, LoadedAlbum>,
        pub rankings: HashMap<String, SavedRanking>,
        pub offline: Cell<bool>,
        pub fetches: Cell<usize>,
        pub commits: RefCell<Vec<(Option<String>, RankingPayload)>>,
    }

    impl ScriptedBackend {
        pub(crate) fn with_album(album: LoadedAlbum) -> Self {
            let mut backend = Self::default();
            backend.albums.insert(album.id.clone(), album);
            backend
        }
    }

    #[async_trait(?Send)]
    impl RankingBackend for ScriptedBackend {
        async fn fetch_album(&self, album_id: &str) -> Result<LoadedAlbum, DataError> {
            self.fetches.set(self.fetches.get() + 1);
            if self.offline.get() {
                return Err(DataError::Network("offline".into()));
            }
            self.albums
                .get(album_id)
                .cloned()
                .ok_or_else(|| DataError::NotFound(format!("album {}", album_id)))
        }

        async fn fetch_ranking(&self, ranking_id: &str) -> Result<SavedRanking, DataError> {
            self.fetches.set(self.fetches.get() + 1);
            if self.offline.get() {
                return Err(DataError::Network("offline".into()));
            }
            self.rankings
                .get(ranking_id)
                .cloned()
                .ok_or_else(|| DataError::NotFound(format!("ranking {}", ranking_id)))
        }

        async fn save_ranking(
            &self,
            ranking_id: Option<&str>,
            payload: &RankingPayload,
        ) -> Result<String, DataError> {
            if self.offline.get() {
                return Err(DataError::Network("offline".into()));
            }
            let mut commits = self.commits.borrow_mut();
            commits.push((ranking_id.map(str::to_string), payload.clone()));
            Ok(ranking_id
                .map(str::to_string)
                .unwrap_or_else(|| format!("r{}", commits.len())))
        }
    }

    pub(crate) fn album(id: &str, count: usize) -> LoadedAlbum {
        LoadedAlbum {
            id: id.to_string(),
            name: format!("Album {}", id),
            items: (0..count)
                .map(|i| AlbumImage {
                    id: format!("{}", i + 1),
                    name: format!("Image {}", i + 1),
                    image_path: format!("uploads/{}.jpg", i + 1),
                    description: None,
                    url: None,
                })
                .collect(),
        }
    }
}
