// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use crate::thumbnail::{Quality, Thumbnail, ThumbnailSet};

/// Identifier of a single video
///
/// Video, playlist, and channel identifiers are all opaque strings upstream;
/// distinct wrapper types keep them from being assigned across kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

/// Identifier of a playlist
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistId(String);

/// Identifier of a channel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

/// Opaque continuation cursor returned by the paged listing API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageToken(String);

macro_rules! opaque_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(VideoId);
opaque_id!(PlaylistId);
opaque_id!(ChannelId);
opaque_id!(PageToken);

/// Per-video `snippet` part of the videos endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnails: Option<ThumbnailList>,
}

/// Per-video `contentDetails` part; only the duration is consumed
#[derive(Debug, Clone, Deserialize)]
pub struct VideoContentDetails {
    pub duration: Option<String>,
}

/// Playlist-level `snippet` part of the playlists endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnails: Option<ThumbnailList>,
}

/// Channel-level `snippet` part of the channels endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnails: Option<ThumbnailList>,
}

/// The channel's designated system playlists; only uploads matters here
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

/// One item of a playlistItems listing page
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel_title: Option<String>,
    pub video_owner_channel_title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub position: Option<u32>,
    pub thumbnails: Option<ThumbnailList>,
    pub resource_id: Option<ResourceId>,
}

/// The resource a playlist item points at
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: Option<String>,
}

/// One page of a playlist listing, in publisher-defined order
#[derive(Debug, Clone)]
pub struct PlaylistItemsPage {
    pub items: Vec<PlaylistItemSnippet>,
    pub next_page_token: Option<PageToken>,
}

/// The thumbnail object shape used by every snippet kind
#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailInfo {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Thumbnails keyed by the API's fixed quality labels
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThumbnailList {
    pub default: Option<ThumbnailInfo>,
    pub medium: Option<ThumbnailInfo>,
    pub high: Option<ThumbnailInfo>,
    pub standard: Option<ThumbnailInfo>,
    pub maxres: Option<ThumbnailInfo>,
}

impl ThumbnailList {
    /// Flatten into a [`ThumbnailSet`], dropping variants whose URL does
    /// not parse
    pub fn into_set(self) -> ThumbnailSet {
        let mut set = ThumbnailSet::new();
        let labeled = [
            (Quality::Default, self.default),
            (Quality::Medium, self.medium),
            (Quality::High, self.high),
            (Quality::Standard, self.standard),
            (Quality::Maxres, self.maxres),
        ];
        for (quality, info) in labeled {
            let Some(info) = info else { continue };
            if let Ok(url) = Url::parse(&info.url) {
                set.insert(
                    quality,
                    Thumbnail {
                        url,
                        width: info.width,
                        height: info.height,
                    },
                );
            }
        }
        set
    }
}

/// A video flattened from upstream metadata, immutable for the lifetime of
/// one synthesis request
#[derive(Debug, Clone)]
pub struct Video {
    pub id: VideoId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub position: Option<u32>,
    pub thumbnails: Option<ThumbnailSet>,
}

impl Video {
    /// Flatten a videos-endpoint snippet
    pub fn from_snippet(id: VideoId, snippet: VideoSnippet) -> Self {
        Self {
            id,
            title: snippet.title.map(decode_entities),
            description: snippet.description.map(decode_entities),
            channel_title: snippet.channel_title,
            published_at: snippet.published_at,
            position: None,
            thumbnails: snippet.thumbnails.map(ThumbnailList::into_set),
        }
    }

    /// Flatten a playlist item; `None` when the item does not point at a
    /// video (playlists can reference deleted or non-video resources)
    pub fn from_playlist_item(item: PlaylistItemSnippet) -> Option<Self> {
        let id = item.resource_id.and_then(|r| r.video_id)?;
        Some(Self {
            id: VideoId::new(id),
            title: item.title.map(decode_entities),
            description: item.description.map(decode_entities),
            // The item's own channelTitle names the playlist owner, not
            // the video's author
            channel_title: item.video_owner_channel_title.or(item.channel_title),
            published_at: item.published_at,
            position: item.position,
            thumbnails: item.thumbnails.map(ThumbnailList::into_set),
        })
    }
}

/// Upstream text occasionally carries HTML entities; decode once at
/// flattening time so document text is plain everywhere downstream
pub(crate) fn decode_entities(text: String) -> String {
    html_escape::decode_html_entities(&text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let video = VideoId::new("abc123");
        assert_eq!(video.as_str(), "abc123");
        assert_eq!(video.to_string(), "abc123");
    }

    #[test]
    fn thumbnail_list_flattens_known_labels() {
        let list = ThumbnailList {
            default: Some(ThumbnailInfo {
                url: "https://img.test/default.jpg".into(),
                width: Some(120),
                height: Some(90),
            }),
            maxres: Some(ThumbnailInfo {
                url: "https://img.test/maxres.jpg".into(),
                width: Some(1280),
                height: Some(720),
            }),
            ..Default::default()
        };

        let set = list.into_set();
        assert_eq!(set.best().unwrap().as_str(), "https://img.test/maxres.jpg");
    }

    #[test]
    fn playlist_item_without_video_id_is_dropped() {
        let item = PlaylistItemSnippet {
            title: Some("gone".into()),
            description: None,
            channel_title: None,
            video_owner_channel_title: None,
            published_at: None,
            position: Some(3),
            thumbnails: None,
            resource_id: None,
        };
        assert!(Video::from_playlist_item(item).is_none());
    }

    #[test]
    fn flattening_decodes_html_entities() {
        let snippet = VideoSnippet {
            title: Some("Tom &amp; Jerry".into()),
            description: None,
            channel_title: None,
            published_at: None,
            thumbnails: None,
        };
        let video = Video::from_snippet(VideoId::new("v1"), snippet);
        assert_eq!(video.title.as_deref(), Some("Tom & Jerry"));
    }
}
