// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use rss::extension::dublincore::{DublinCoreExtension, DublinCoreExtensionBuilder};
use rss::extension::itunes::{ITunesChannelExtensionBuilder, ITunesItemExtensionBuilder};
use rss::extension::{ExtensionBuilder, ExtensionMap};
use rss::{Channel, ChannelBuilder, EnclosureBuilder, GuidBuilder, Item, ItemBuilder};
use url::Url;

use crate::feed::{DublinCoreExt, FeedDocument, FeedEntry};

const MEDIA_NAMESPACE: &str = "http://search.yahoo.com/mrss/";

/// Render a feed document as an RSS 2.0 channel with itunes, media, and
/// dublin-core extensions
///
/// Pure field mapping: every absent option in the document stays absent in
/// the channel, nothing is defaulted or derived here.
pub fn render_feed(doc: &FeedDocument) -> Channel {
    let itunes = ITunesChannelExtensionBuilder::default()
        .author(doc.podcast.author.clone())
        .image(doc.podcast.image.as_ref().map(Url::to_string))
        .build();

    let mut namespaces = BTreeMap::new();
    namespaces.insert("media".to_string(), MEDIA_NAMESPACE.to_string());

    ChannelBuilder::default()
        .title(doc.title.clone())
        .link(doc.link.to_string())
        // RSS requires a description element even when the entity has none
        .description(doc.description.clone().unwrap_or_default())
        .pub_date(Some(doc.published_at.to_rfc2822()))
        .itunes_ext(Some(itunes))
        .dublin_core_ext(Some(dublin_ext(&doc.dublin)))
        .namespaces(namespaces)
        .items(doc.entries.iter().map(render_entry).collect::<Vec<_>>())
        .build()
}

/// Render a feed document straight to an XML string
pub fn render_xml(doc: &FeedDocument) -> String {
    render_feed(doc).to_string()
}

fn render_entry(entry: &FeedEntry) -> Item {
    let enclosure = EnclosureBuilder::default()
        .url(entry.enclosure.url.to_string())
        // Byte length is unknown before the audio endpoint is hit
        .length("0")
        .mime_type(entry.enclosure.mime_type.clone())
        .build();

    // The enclosure URL is stable per video, which makes it a usable guid
    let guid = GuidBuilder::default()
        .value(entry.enclosure.url.to_string())
        .permalink(false)
        .build();

    let itunes = ITunesItemExtensionBuilder::default()
        .author(entry.podcast.author.clone())
        .image(entry.podcast.image.as_ref().map(Url::to_string))
        .duration(Some(itunes_duration(entry.podcast.duration_millis)))
        .order(entry.podcast.order.map(|o| o.to_string()))
        .build();

    let media_content = ExtensionBuilder::default()
        .name("media:content")
        .attrs(BTreeMap::from([
            ("url".to_string(), entry.media.content_url.to_string()),
            (
                "duration".to_string(),
                entry.media.duration_secs.to_string(),
            ),
            ("type".to_string(), entry.enclosure.mime_type.clone()),
        ]))
        .build();
    let mut extensions = ExtensionMap::default();
    extensions
        .entry("media".to_string())
        .or_default()
        .insert("content".to_string(), vec![media_content]);

    ItemBuilder::default()
        .title(Some(entry.title.clone()))
        .link(Some(entry.link.to_string()))
        .author(entry.author.clone())
        .description(entry.description.clone())
        .pub_date(Some(entry.published_at.to_rfc2822()))
        .guid(Some(guid))
        .enclosure(Some(enclosure))
        .itunes_ext(Some(itunes))
        .dublin_core_ext(Some(dublin_ext(&entry.dublin)))
        .extensions(extensions)
        .build()
}

fn dublin_ext(ext: &DublinCoreExt) -> DublinCoreExtension {
    DublinCoreExtensionBuilder::default()
        .creators(ext.creator.iter().cloned().collect::<Vec<_>>())
        .dates(
            ext.date
                .iter()
                .map(|d| d.to_rfc3339())
                .collect::<Vec<_>>(),
        )
        .build()
}

/// Format milliseconds as the HH:MM:SS form podcast clients expect
fn itunes_duration(millis: u64) -> String {
    let secs = millis / 1000;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}
