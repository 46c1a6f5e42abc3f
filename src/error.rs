use thiserror::Error;

/// A duration string that does not conform to the ISO-8601 duration grammar
/// or encodes a negative or unrepresentable span
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid ISO-8601 duration '{text}'")]
pub struct InvalidDuration {
    pub text: String,
}

/// Errors that can occur while building a single feed entry
///
/// These are fatal to the entry being built, never to the surrounding
/// playlist traversal.
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Video {video_id} is missing mandatory field '{field}'")]
    IncompleteVideoMetadata {
        video_id: String,
        field: &'static str,
    },

    #[error("Video {video_id} has an unusable duration: {source}")]
    UnusableDuration {
        video_id: String,
        #[source]
        source: InvalidDuration,
    },
}

/// Errors raised by the upstream YouTube API collaborator
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Request to YouTube API endpoint '{endpoint}' failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("YouTube API endpoint '{endpoint}' returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("Failed to decode YouTube API response from '{endpoint}': {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Top-level errors for feed assembly
///
/// Any of these means no document is returned; a feed is never delivered
/// partially assembled.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("{kind} {id} has no usable metadata: missing '{field}'")]
    UpstreamMetadata {
        kind: &'static str,
        id: String,
        field: &'static str,
    },

    #[error("Entry synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),
}
