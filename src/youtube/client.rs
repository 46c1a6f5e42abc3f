// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::UpstreamError;

use super::model::{
    ChannelId, ChannelSnippet, PageToken, PlaylistId, PlaylistItemSnippet, PlaylistItemsPage,
    PlaylistSnippet, RelatedPlaylists, VideoContentDetails, VideoId, VideoSnippet,
};

/// Items per listing page; 50 is the Data API's maximum
pub const PAGE_SIZE: u8 = 50;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3/";

/// Upstream metadata capability, narrow enough to substitute a fixture
/// double in tests
///
/// Fetches return `None` when the entity does not exist upstream;
/// transport, auth, and rate-limit failures surface as [`UpstreamError`].
#[async_trait]
pub trait YoutubeClient: Send + Sync {
    /// Single-video metadata and content details
    async fn fetch_video(
        &self,
        id: &VideoId,
    ) -> Result<Option<(VideoSnippet, VideoContentDetails)>, UpstreamError>;

    /// Playlist-level metadata
    async fn fetch_playlist(
        &self,
        id: &PlaylistId,
    ) -> Result<Option<PlaylistSnippet>, UpstreamError>;

    /// Channel-level metadata and its designated system playlists
    async fn fetch_channel(
        &self,
        id: &ChannelId,
    ) -> Result<Option<(ChannelSnippet, RelatedPlaylists)>, UpstreamError>;

    /// One page of a playlist's items, in publisher-defined order
    async fn list_playlist_items(
        &self,
        id: &PlaylistId,
        page: Option<&PageToken>,
    ) -> Result<PlaylistItemsPage, UpstreamError>;

    /// Content details for a batch of videos, keyed by id; videos the
    /// upstream no longer knows are simply missing from the map
    async fn fetch_content_details(
        &self,
        ids: &[VideoId],
    ) -> Result<HashMap<VideoId, VideoContentDetails>, UpstreamError>;
}

/// [`YoutubeClient`] over the YouTube Data API v3 with API-key auth
#[derive(Clone)]
pub struct DataApiClient {
    client: reqwest::Client,
    api_base: Url,
    api_key: String,
}

impl DataApiClient {
    /// Create a client against the production API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base(
            api_key,
            Url::parse(API_BASE).expect("static API base URL"),
        )
    }

    /// Create a client against a custom base address (test servers)
    pub fn with_base(api_key: impl Into<String>, api_base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            api_key: api_key.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint);
        }
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", &self.api_key);
            for (name, value) in params {
                query.append_pair(name, value);
            }
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::Request {
                endpoint,
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| UpstreamError::Decode {
            endpoint,
            source: e,
        })
    }
}

/// Generic list envelope shared by every Data API endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ListResponse<T> {
    #[serde(default)]
    items: Vec<T>,
    next_page_token: Option<PageToken>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource {
    id: Option<String>,
    snippet: Option<VideoSnippet>,
    content_details: Option<VideoContentDetails>,
}

#[derive(Debug, Deserialize)]
struct PlaylistResource {
    snippet: Option<PlaylistSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelResource {
    snippet: Option<ChannelSnippet>,
    content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemResource {
    snippet: Option<PlaylistItemSnippet>,
}

#[async_trait]
impl YoutubeClient for DataApiClient {
    async fn fetch_video(
        &self,
        id: &VideoId,
    ) -> Result<Option<(VideoSnippet, VideoContentDetails)>, UpstreamError> {
        let response: ListResponse<VideoResource> = self
            .get_json(
                "videos",
                &[("part", "snippet,contentDetails"), ("id", id.as_str())],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(|item| Some((item.snippet?, item.content_details?))))
    }

    async fn fetch_playlist(
        &self,
        id: &PlaylistId,
    ) -> Result<Option<PlaylistSnippet>, UpstreamError> {
        let response: ListResponse<PlaylistResource> = self
            .get_json("playlists", &[("part", "snippet"), ("id", id.as_str())])
            .await?;

        Ok(response.items.into_iter().next().and_then(|item| item.snippet))
    }

    async fn fetch_channel(
        &self,
        id: &ChannelId,
    ) -> Result<Option<(ChannelSnippet, RelatedPlaylists)>, UpstreamError> {
        let response: ListResponse<ChannelResource> = self
            .get_json(
                "channels",
                &[("part", "snippet,contentDetails"), ("id", id.as_str())],
            )
            .await?;

        Ok(response.items.into_iter().next().and_then(|item| {
            let snippet = item.snippet?;
            let related = item
                .content_details
                .and_then(|d| d.related_playlists)
                .unwrap_or_default();
            Some((snippet, related))
        }))
    }

    async fn list_playlist_items(
        &self,
        id: &PlaylistId,
        page: Option<&PageToken>,
    ) -> Result<PlaylistItemsPage, UpstreamError> {
        let page_size = PAGE_SIZE.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("playlistId", id.as_str()),
            ("maxResults", page_size.as_str()),
        ];
        if let Some(token) = page {
            params.push(("pageToken", token.as_str()));
        }

        let response: ListResponse<PlaylistItemResource> =
            self.get_json("playlistItems", &params).await?;

        Ok(PlaylistItemsPage {
            items: response
                .items
                .into_iter()
                .filter_map(|item| item.snippet)
                .collect(),
            next_page_token: response.next_page_token,
        })
    }

    async fn fetch_content_details(
        &self,
        ids: &[VideoId],
    ) -> Result<HashMap<VideoId, VideoContentDetails>, UpstreamError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let joined = ids
            .iter()
            .map(VideoId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let response: ListResponse<VideoResource> = self
            .get_json(
                "videos",
                &[("part", "contentDetails"), ("id", joined.as_str())],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| {
                let id = VideoId::new(item.id?);
                Some((id, item.content_details?))
            })
            .collect())
    }
}
