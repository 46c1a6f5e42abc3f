// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use url::Url;

/// The audio a podcast client should fetch for an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    pub url: Url,
    /// Advertised content type, selected by the caller's player descriptor
    pub mime_type: String,
}

/// Podcast extension data at document level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodcastFeedExt {
    pub image: Option<Url>,
    pub author: Option<String>,
}

/// Podcast extension data at entry level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodcastEntryExt {
    pub image: Option<Url>,
    pub author: Option<String>,
    pub duration_millis: u64,
    /// Episode-order hint, copied from the playlist position when present
    pub order: Option<u32>,
}

/// Media-content extension data carried per entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaExt {
    pub content_url: Url,
    pub duration_secs: u64,
}

/// Minimal bibliographic extension data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DublinCoreExt {
    pub creator: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// One episode of a feed
///
/// Built once from already-validated inputs and never mutated; owned by its
/// [`FeedDocument`] until serialized. Absent optionals are genuinely absent,
/// the renderer applies no defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: Url,
    pub author: Option<String>,
    pub description: Option<String>,
    pub published_at: DateTime<Utc>,
    pub enclosure: Enclosure,
    pub podcast: PodcastEntryExt,
    pub media: MediaExt,
    pub dublin: DublinCoreExt,
}

/// The complete podcast-feed output for one request
///
/// Root aggregate: owns its entries, lives for one synthesis request, and
/// is discarded after serialization. Entry order is the publisher-defined
/// order and is never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub title: String,
    pub link: Url,
    pub description: Option<String>,
    pub author: Option<String>,
    pub published_at: DateTime<Utc>,
    pub entries: Vec<FeedEntry>,
    pub podcast: PodcastFeedExt,
    pub dublin: DublinCoreExt,
}

/// Caller-supplied descriptor selecting the advertised audio content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Player {
    /// AAC in an MP4 container
    #[default]
    Mp4,
    /// Opus/Vorbis in a WebM container
    Webm,
}

impl Player {
    pub fn audio_type(&self) -> &'static str {
        match self {
            Player::Mp4 => "audio/mp4",
            Player::Webm => "audio/webm",
        }
    }
}
