pub mod duration;
pub mod error;
pub mod feed;
pub mod link;
pub mod render;
pub mod thumbnail;
pub mod youtube;

// Re-export main types for convenience
pub use duration::{ClipDuration, parse_duration};
pub use error::{FeedError, InvalidDuration, SynthesisError, UpstreamError};
pub use feed::{
    FeedDocument, FeedEntry, MAX_PAGES, Player, collect_entries, feed_for_channel,
    feed_for_playlist, feed_for_video, synthesize_entry,
};
pub use link::{audio_url, channel_link, playlist_link, video_link};
pub use render::{render_feed, render_xml};
pub use thumbnail::{Quality, Thumbnail, ThumbnailSet};
pub use youtube::{ChannelId, DataApiClient, PlaylistId, Video, VideoId, YoutubeClient};
