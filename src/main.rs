use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use env_logger::Env;
use url::Url;

use podtube::{
    ChannelId, DataApiClient, Player, PlaylistId, VideoId, feed_for_channel, feed_for_playlist,
    feed_for_video, render_xml,
};

/// Generate podcast RSS feeds from YouTube videos, playlists, and channels
#[derive(Parser, Debug)]
#[command(name = "podtube")]
#[command(about = "Generate podcast RSS feeds from YouTube videos, playlists, and channels")]
#[command(version)]
struct Args {
    /// Kind of entity to build a feed for
    #[arg(value_enum)]
    kind: Kind,

    /// YouTube identifier of the entity
    id: String,

    /// Base address the generated audio links point at
    #[arg(long, default_value = "http://localhost:8080/")]
    base_url: Url,

    /// YouTube Data API key; defaults to the YOUTUBE_API_KEY environment variable
    #[arg(long)]
    api_key: Option<String>,

    /// Audio container advertised in enclosures
    #[arg(long, value_enum, default_value_t = Format::Mp4)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Video,
    Playlist,
    Channel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Mp4,
    Webm,
}

impl From<Format> for Player {
    fn from(format: Format) -> Self {
        match format {
            Format::Mp4 => Player::Mp4,
            Format::Webm => Player::Webm,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let api_key = match args.api_key {
        Some(key) => key,
        None => std::env::var("YOUTUBE_API_KEY")
            .context("No API key: pass --api-key or set YOUTUBE_API_KEY")?,
    };

    let client = DataApiClient::new(api_key);
    let player = Player::from(args.format);

    let document = match args.kind {
        Kind::Video => {
            feed_for_video(&client, &args.base_url, &VideoId::new(args.id.as_str()), player).await?
        }
        Kind::Playlist => {
            feed_for_playlist(&client, &args.base_url, &PlaylistId::new(args.id.as_str()), player).await?
        }
        Kind::Channel => {
            let channel_id = ChannelId::new(args.id.as_str());
            match feed_for_channel(&client, &args.base_url, &channel_id, player).await? {
                Some(document) => document,
                None => {
                    eprintln!(
                        "{} channel {} has no uploads playlist, no feed available",
                        "Not found:".red().bold(),
                        args.id.yellow()
                    );
                    std::process::exit(2);
                }
            }
        }
    };

    println!("{}", render_xml(&document));

    Ok(())
}
