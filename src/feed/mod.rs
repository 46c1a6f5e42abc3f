mod assemble;
mod entry;
mod model;
mod paginate;

pub use assemble::{feed_for_channel, feed_for_playlist, feed_for_video};
pub use entry::synthesize_entry;
pub use model::{
    DublinCoreExt, Enclosure, FeedDocument, FeedEntry, MediaExt, Player, PodcastEntryExt,
    PodcastFeedExt,
};
pub use paginate::{MAX_PAGES, collect_entries};
