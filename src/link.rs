// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use url::Url;

use crate::youtube::{ChannelId, PlaylistId, VideoId};

const YOUTUBE: &str = "https://www.youtube.com/";

/// Compose the playable-audio URL for a video against the configured base
/// address: a fixed `audio` path segment plus a `v` query parameter
///
/// Deterministic and byte-stable for a given input, so podcast clients can
/// cache and dedupe by URL. The identifier is query-encoded by the URL
/// serializer.
pub fn audio_url(base: &Url, id: &VideoId) -> Url {
    let mut url = base.clone();
    // Base addresses are http(s), so they always have a path to extend
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("audio");
    }
    url.query_pairs_mut().append_pair("v", id.as_str());
    url
}

/// Canonical watch-page link for a video
pub fn video_link(id: &VideoId) -> Url {
    let mut url = youtube_root();
    url.set_path("watch");
    url.query_pairs_mut().append_pair("v", id.as_str());
    url
}

/// Canonical link for a playlist
pub fn playlist_link(id: &PlaylistId) -> Url {
    let mut url = youtube_root();
    url.set_path("playlist");
    url.query_pairs_mut().append_pair("list", id.as_str());
    url
}

/// Canonical link for a channel
pub fn channel_link(id: &ChannelId) -> Url {
    let mut url = youtube_root();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("channel").push(id.as_str());
    }
    url
}

fn youtube_root() -> Url {
    Url::parse(YOUTUBE).expect("static YouTube URL")
}
