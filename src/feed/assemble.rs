// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use url::Url;

use crate::duration::parse_duration;
use crate::error::{FeedError, SynthesisError};
use crate::link::{channel_link, playlist_link, video_link};
use crate::youtube::{ChannelId, PlaylistId, Video, VideoId, YoutubeClient};

use super::entry::synthesize_entry;
use super::model::{DublinCoreExt, FeedDocument, Player, PodcastFeedExt};
use super::paginate::collect_entries;

fn require<T>(
    value: Option<T>,
    kind: &'static str,
    id: &str,
    field: &'static str,
) -> Result<T, FeedError> {
    value.ok_or_else(|| FeedError::UpstreamMetadata {
        kind,
        id: id.to_string(),
        field,
    })
}

/// Assemble a single-entry feed for one video
pub async fn feed_for_video<C: YoutubeClient + ?Sized>(
    client: &C,
    base: &Url,
    id: &VideoId,
    player: Player,
) -> Result<FeedDocument, FeedError> {
    let (snippet, details) = require(
        client.fetch_video(id).await?,
        "Video",
        id.as_str(),
        "snippet",
    )?;
    let video = Video::from_snippet(id.clone(), snippet);

    let title = require(video.title.clone(), "Video", id.as_str(), "title")?;
    let published_at = require(video.published_at, "Video", id.as_str(), "publishedAt")?;

    let duration_text = details
        .duration
        .as_deref()
        .ok_or_else(|| SynthesisError::IncompleteVideoMetadata {
            video_id: id.to_string(),
            field: "contentDetails.duration",
        })?;
    let duration =
        parse_duration(duration_text).map_err(|source| SynthesisError::UnusableDuration {
            video_id: id.to_string(),
            source,
        })?;

    // The single entry is mandatory here; a synthesis failure fails the feed
    let entry = synthesize_entry(&video, duration, player, base)?;
    let image = video.thumbnails.as_ref().and_then(|s| s.best()).cloned();

    Ok(FeedDocument {
        title,
        link: video_link(id),
        description: video.description.clone(),
        author: video.channel_title.clone(),
        published_at,
        entries: vec![entry],
        podcast: PodcastFeedExt {
            image,
            author: video.channel_title.clone(),
        },
        dublin: DublinCoreExt {
            creator: video.channel_title,
            date: Some(published_at),
        },
    })
}

/// Assemble a feed for a playlist, one entry per listed item
pub async fn feed_for_playlist<C: YoutubeClient + ?Sized>(
    client: &C,
    base: &Url,
    id: &PlaylistId,
    player: Player,
) -> Result<FeedDocument, FeedError> {
    let snippet = require(
        client.fetch_playlist(id).await?,
        "Playlist",
        id.as_str(),
        "snippet",
    )?;

    let title = require(
        snippet.title.map(crate::youtube::decode_entities),
        "Playlist",
        id.as_str(),
        "title",
    )?;
    let published_at = require(snippet.published_at, "Playlist", id.as_str(), "publishedAt")?;
    let description = snippet.description.map(crate::youtube::decode_entities);
    let image = snippet
        .thumbnails
        .and_then(|t| t.into_set().best().cloned());

    let entries = collect_entries(client, base, id, player).await?;

    Ok(FeedDocument {
        title,
        link: playlist_link(id),
        description,
        author: snippet.channel_title.clone(),
        published_at,
        entries,
        podcast: PodcastFeedExt {
            image,
            author: snippet.channel_title.clone(),
        },
        dublin: DublinCoreExt {
            creator: snippet.channel_title,
            date: Some(published_at),
        },
    })
}

/// Assemble a feed for a channel via its uploads playlist
///
/// `Ok(None)` when the channel does not exist upstream or has no resolvable
/// uploads playlist; such a channel cannot produce a feed and callers render
/// a not-found response instead.
pub async fn feed_for_channel<C: YoutubeClient + ?Sized>(
    client: &C,
    base: &Url,
    id: &ChannelId,
    player: Player,
) -> Result<Option<FeedDocument>, FeedError> {
    let Some((snippet, related)) = client.fetch_channel(id).await? else {
        return Ok(None);
    };
    let Some(uploads) = related.uploads else {
        return Ok(None);
    };
    let uploads = PlaylistId::new(uploads);

    let title = require(
        snippet.title.map(crate::youtube::decode_entities),
        "Channel",
        id.as_str(),
        "title",
    )?;
    let published_at = require(snippet.published_at, "Channel", id.as_str(), "publishedAt")?;
    let description = snippet.description.map(crate::youtube::decode_entities);
    let image = snippet
        .thumbnails
        .and_then(|t| t.into_set().best().cloned());

    let entries = collect_entries(client, base, &uploads, player).await?;

    Ok(Some(FeedDocument {
        title: title.clone(),
        link: channel_link(id),
        description,
        // A channel is its own author
        author: Some(title.clone()),
        published_at,
        entries,
        podcast: PodcastFeedExt {
            image,
            author: Some(title.clone()),
        },
        dublin: DublinCoreExt {
            creator: Some(title),
            date: Some(published_at),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use crate::error::UpstreamError;
    use crate::youtube::{
        ChannelSnippet, PageToken, PlaylistItemSnippet, PlaylistItemsPage, PlaylistSnippet,
        RelatedPlaylists, ResourceId, ThumbnailInfo, ThumbnailList, VideoContentDetails,
        VideoSnippet,
    };

    /// Fixture client with one video, one playlist, and one channel
    #[derive(Clone, Default)]
    struct FixtureClient {
        video: Option<(VideoSnippet, VideoContentDetails)>,
        playlist: Option<PlaylistSnippet>,
        channel: Option<(ChannelSnippet, RelatedPlaylists)>,
        items: Vec<PlaylistItemSnippet>,
    }

    #[async_trait]
    impl YoutubeClient for FixtureClient {
        async fn fetch_video(
            &self,
            _id: &VideoId,
        ) -> Result<Option<(VideoSnippet, VideoContentDetails)>, UpstreamError> {
            Ok(self.video.clone())
        }

        async fn fetch_playlist(
            &self,
            _id: &PlaylistId,
        ) -> Result<Option<PlaylistSnippet>, UpstreamError> {
            Ok(self.playlist.clone())
        }

        async fn fetch_channel(
            &self,
            _id: &ChannelId,
        ) -> Result<Option<(ChannelSnippet, RelatedPlaylists)>, UpstreamError> {
            Ok(self.channel.clone())
        }

        async fn list_playlist_items(
            &self,
            _id: &PlaylistId,
            _page: Option<&PageToken>,
        ) -> Result<PlaylistItemsPage, UpstreamError> {
            Ok(PlaylistItemsPage {
                items: self.items.clone(),
                next_page_token: None,
            })
        }

        async fn fetch_content_details(
            &self,
            ids: &[VideoId],
        ) -> Result<HashMap<VideoId, VideoContentDetails>, UpstreamError> {
            Ok(ids
                .iter()
                .map(|id| {
                    (
                        id.clone(),
                        VideoContentDetails {
                            duration: Some("PT2M".to_string()),
                        },
                    )
                })
                .collect())
        }
    }

    fn thumbnails() -> ThumbnailList {
        ThumbnailList {
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
        }
    }

    fn video_snippet() -> VideoSnippet {
        VideoSnippet {
            title: Some("A talk".into()),
            description: Some("Slides and all".into()),
            channel_title: Some("Conf Channel".into()),
            published_at: Some(Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap()),
            thumbnails: Some(thumbnails()),
        }
    }

    fn playlist_item(id: &str, title: &str, position: u32) -> PlaylistItemSnippet {
        PlaylistItemSnippet {
            title: Some(title.into()),
            description: None,
            channel_title: Some("Conf Channel".into()),
            video_owner_channel_title: None,
            published_at: Some(Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 0).unwrap()),
            position: Some(position),
            thumbnails: None,
            resource_id: Some(ResourceId {
                video_id: Some(id.into()),
            }),
        }
    }

    fn base() -> Url {
        Url::parse("https://host/").unwrap()
    }

    #[tokio::test]
    async fn video_feed_has_a_single_entry() {
        let client = FixtureClient {
            video: Some((
                video_snippet(),
                VideoContentDetails {
                    duration: Some("PT12M34S".into()),
                },
            )),
            ..Default::default()
        };

        let doc = feed_for_video(&client, &base(), &VideoId::new("v1"), Player::Mp4)
            .await
            .unwrap();

        assert_eq!(doc.title, "A talk");
        assert_eq!(doc.link.as_str(), "https://www.youtube.com/watch?v=v1");
        assert_eq!(doc.author.as_deref(), Some("Conf Channel"));
        assert_eq!(
            doc.podcast.image.as_ref().unwrap().as_str(),
            "https://img.test/maxres.jpg"
        );
        assert_eq!(doc.entries.len(), 1);
        assert_eq!(doc.entries[0].media.duration_secs, 754);
    }

    #[tokio::test]
    async fn missing_video_is_upstream_metadata_error() {
        let client = FixtureClient::default();

        let err = feed_for_video(&client, &base(), &VideoId::new("v1"), Player::Mp4)
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::UpstreamMetadata { .. }));
    }

    #[tokio::test]
    async fn video_without_publish_date_is_fatal() {
        let mut snippet = video_snippet();
        snippet.published_at = None;
        let client = FixtureClient {
            video: Some((
                snippet,
                VideoContentDetails {
                    duration: Some("PT1M".into()),
                },
            )),
            ..Default::default()
        };

        let err = feed_for_video(&client, &base(), &VideoId::new("v1"), Player::Mp4)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FeedError::UpstreamMetadata {
                field: "publishedAt",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn playlist_feed_lists_items_in_order() {
        let client = FixtureClient {
            playlist: Some(PlaylistSnippet {
                title: Some("Lecture series".into()),
                description: Some("Weekly".into()),
                channel_title: Some("Uni".into()),
                published_at: Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()),
                thumbnails: Some(thumbnails()),
            }),
            items: vec![
                playlist_item("v1", "Lecture 1", 0),
                playlist_item("v2", "Lecture 2", 1),
            ],
            ..Default::default()
        };

        let doc = feed_for_playlist(&client, &base(), &PlaylistId::new("PL9"), Player::Webm)
            .await
            .unwrap();

        assert_eq!(doc.title, "Lecture series");
        assert_eq!(
            doc.link.as_str(),
            "https://www.youtube.com/playlist?list=PL9"
        );
        let titles: Vec<_> = doc.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Lecture 1", "Lecture 2"]);
        assert_eq!(doc.entries[0].enclosure.mime_type, "audio/webm");
        assert_eq!(doc.entries[0].podcast.order, Some(0));
    }

    #[tokio::test]
    async fn channel_feed_uses_uploads_playlist() {
        let client = FixtureClient {
            channel: Some((
                ChannelSnippet {
                    title: Some("Conf Channel".into()),
                    description: Some("Talks".into()),
                    published_at: Some(Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap()),
                    thumbnails: None,
                },
                RelatedPlaylists {
                    uploads: Some("UU123".into()),
                },
            )),
            items: vec![playlist_item("v1", "Opening keynote", 0)],
            ..Default::default()
        };

        let doc = feed_for_channel(&client, &base(), &ChannelId::new("UC123"), Player::Mp4)
            .await
            .unwrap()
            .expect("channel with uploads produces a feed");

        assert_eq!(doc.title, "Conf Channel");
        assert_eq!(doc.author.as_deref(), Some("Conf Channel"));
        assert_eq!(doc.link.as_str(), "https://www.youtube.com/channel/UC123");
        assert_eq!(doc.entries.len(), 1);
    }

    #[tokio::test]
    async fn channel_without_uploads_is_absent_not_an_error() {
        let client = FixtureClient {
            channel: Some((
                ChannelSnippet {
                    title: Some("Empty".into()),
                    description: None,
                    published_at: Some(Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap()),
                    thumbnails: None,
                },
                RelatedPlaylists { uploads: None },
            )),
            ..Default::default()
        };

        let result = feed_for_channel(&client, &base(), &ChannelId::new("UC123"), Player::Mp4)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn unknown_channel_is_absent_too() {
        let client = FixtureClient::default();

        let result = feed_for_channel(&client, &base(), &ChannelId::new("UC404"), Player::Mp4)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn assembly_is_idempotent_over_fixed_responses() {
        let client = FixtureClient {
            playlist: Some(PlaylistSnippet {
                title: Some("Series".into()),
                description: None,
                channel_title: Some("Uni".into()),
                published_at: Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()),
                thumbnails: None,
            }),
            items: vec![playlist_item("v1", "One", 0)],
            ..Default::default()
        };

        let id = PlaylistId::new("PL9");
        let first = feed_for_playlist(&client, &base(), &id, Player::Mp4)
            .await
            .unwrap();
        let second = feed_for_playlist(&client, &base(), &id, Player::Mp4)
            .await
            .unwrap();
        assert_eq!(first, second);
    }
}
