// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use url::Url;

use crate::duration::ClipDuration;
use crate::error::SynthesisError;
use crate::link::{audio_url, video_link};
use crate::youtube::Video;

use super::model::{DublinCoreExt, Enclosure, FeedEntry, MediaExt, Player, PodcastEntryExt};

/// Build one feed entry from a video's metadata
///
/// Title and publish date are mandatory for a valid entry; everything else
/// degrades to absence. The enclosure URL comes from the audio link builder
/// against `base`, its content type from `player`.
pub fn synthesize_entry(
    video: &Video,
    duration: ClipDuration,
    player: Player,
    base: &Url,
) -> Result<FeedEntry, SynthesisError> {
    let missing = |field: &'static str| SynthesisError::IncompleteVideoMetadata {
        video_id: video.id.to_string(),
        field,
    };

    let title = video.title.clone().ok_or_else(|| missing("title"))?;
    let published_at = video.published_at.ok_or_else(|| missing("publishedAt"))?;

    let image = video
        .thumbnails
        .as_ref()
        .and_then(|set| set.best())
        .cloned();
    let url = audio_url(base, &video.id);

    Ok(FeedEntry {
        title,
        link: video_link(&video.id),
        author: video.channel_title.clone(),
        description: video.description.clone(),
        published_at,
        enclosure: Enclosure {
            url: url.clone(),
            mime_type: player.audio_type().to_string(),
        },
        podcast: PodcastEntryExt {
            image,
            author: video.channel_title.clone(),
            duration_millis: duration.as_millis(),
            order: video.position,
        },
        media: MediaExt {
            content_url: url,
            duration_secs: duration.as_secs(),
        },
        dublin: DublinCoreExt {
            creator: video.channel_title.clone(),
            date: Some(published_at),
        },
    })
}
