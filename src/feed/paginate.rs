// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use log::warn;
use url::Url;

use crate::duration::parse_duration;
use crate::error::{FeedError, SynthesisError};
use crate::youtube::{PageToken, PlaylistId, Video, YoutubeClient};

use super::entry::synthesize_entry;
use super::model::{FeedEntry, Player};

/// Hard bound on listing pages per traversal. At the API's 50-items-per-page
/// cap this admits 10 000 items; a pathological upstream that keeps handing
/// out tokens gets truncated instead of stalling the request.
pub const MAX_PAGES: usize = 200;

/// Collect every entry of a playlist, in publisher-defined order
///
/// Pages through the listing API from no token until the upstream supplies
/// no further token, concatenating page order as the authoritative episode
/// order. Items whose metadata cannot be synthesized into an entry are
/// logged and skipped; only upstream failures abort the traversal.
pub async fn collect_entries<C: YoutubeClient + ?Sized>(
    client: &C,
    base: &Url,
    playlist_id: &PlaylistId,
    player: Player,
) -> Result<Vec<FeedEntry>, FeedError> {
    let mut entries = Vec::new();
    let mut page_token: Option<PageToken> = None;
    let mut pages = 0usize;

    loop {
        let page = client
            .list_playlist_items(playlist_id, page_token.as_ref())
            .await?;
        pages += 1;

        let videos: Vec<Video> = page
            .items
            .into_iter()
            .filter_map(|item| {
                let position = item.position;
                Video::from_playlist_item(item).or_else(|| {
                    warn!(
                        "Playlist {playlist_id}: item at position {position:?} \
                         references no video, skipping"
                    );
                    None
                })
            })
            .collect();

        let ids: Vec<_> = videos.iter().map(|v| v.id.clone()).collect();
        let details = client.fetch_content_details(&ids).await?;

        for video in videos {
            let duration = details
                .get(&video.id)
                .and_then(|d| d.duration.as_deref())
                .ok_or_else(|| SynthesisError::IncompleteVideoMetadata {
                    video_id: video.id.to_string(),
                    field: "contentDetails.duration",
                })
                .and_then(|text| {
                    parse_duration(text).map_err(|source| SynthesisError::UnusableDuration {
                        video_id: video.id.to_string(),
                        source,
                    })
                });

            let result =
                duration.and_then(|d| synthesize_entry(&video, d, player, base));
            match result {
                Ok(entry) => entries.push(entry),
                // One bad item must not abort the whole playlist
                Err(e) => warn!("Playlist {playlist_id}: skipping item: {e}"),
            }
        }

        match page.next_page_token {
            None => break,
            Some(_) if pages >= MAX_PAGES => {
                warn!(
                    "Playlist {playlist_id}: pagination limit of {MAX_PAGES} pages \
                     reached, truncating episode list at {} entries",
                    entries.len()
                );
                break;
            }
            Some(token) => page_token = Some(token),
        }
    }

    Ok(entries)
}
