// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use url::Url;

/// Quality labels used by the upstream thumbnail sets, ordered lowest to
/// highest so that `Ord` doubles as the fallback priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quality {
    Default,
    Medium,
    High,
    Standard,
    Maxres,
}

/// One thumbnail variant; dimensions are not always declared upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: Url,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Thumbnail {
    fn area(&self) -> Option<u64> {
        Some(u64::from(self.width?) * u64::from(self.height?))
    }
}

/// The thumbnail variants of one entity, at most one per quality label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailSet {
    variants: BTreeMap<Quality, Thumbnail>,
}

impl ThumbnailSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variant; a later insert for the same label replaces it
    pub fn insert(&mut self, quality: Quality, thumbnail: Thumbnail) {
        self.variants.insert(quality, thumbnail);
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Pick the best variant: largest declared area when every variant
    /// declares dimensions, otherwise the highest quality label present.
    /// An empty set has no best thumbnail, which callers must tolerate.
    pub fn best(&self) -> Option<&Url> {
        if self.variants.values().all(|t| t.area().is_some()) {
            self.variants
                .iter()
                // Label order breaks area ties deterministically
                .max_by_key(|&(quality, t)| (t.area(), *quality))
                .map(|(_, t)| &t.url)
        } else {
            self.variants.values().next_back().map(|t| &t.url)
        }
    }
}
