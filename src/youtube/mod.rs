mod client;
mod model;

pub use client::{DataApiClient, PAGE_SIZE, YoutubeClient};
pub(crate) use model::decode_entities;
pub use model::{
    ChannelId, ChannelSnippet, PageToken, PlaylistId, PlaylistItemSnippet, PlaylistItemsPage,
    PlaylistSnippet, RelatedPlaylists, ResourceId, ThumbnailInfo, ThumbnailList, Video,
    VideoContentDetails, VideoId, VideoSnippet,
};
