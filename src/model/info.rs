//! Document-level metadata assembled from the poppler listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the `pdfimages -list` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// 1-based page the image is drawn on
    pub page: u32,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Every column of the row keyed by its header token
    pub columns: BTreeMap<String, String>,
}

impl ImageRecord {
    /// Create a record without the extra columns.
    pub fn new(page: u32, width: u32, height: u32) -> Self {
        Self {
            page,
            width,
            height,
            columns: BTreeMap::new(),
        }
    }

    /// Pixel area of the image.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Look up a raw column value by header token.
    pub fn column(&self, name: &str) -> Option<&str> {
        self.columns.get(name).map(String::as_str)
    }
}

/// The subset of the `pdfinfo` dump the extractor keeps.
///
/// Every field is `None` when the dump did not carry it or it failed to
/// parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaInfo {
    /// Modification date, falling back to the creation date
    pub touch_date: Option<DateTime<Utc>>,

    /// Number of pages
    pub page_count: Option<u32>,

    /// Whether the document declares structure tags
    pub tagged: Option<bool>,
}

impl MetaInfo {
    /// Whether the structure tree may be extracted.
    pub fn is_tagged(&self) -> bool {
        self.tagged == Some(true)
    }
}

/// Aggregated metadata, image statistics and scan heuristics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Modification date, falling back to the creation date
    pub touch_date: Option<DateTime<Utc>>,

    /// Number of pages
    pub page_count: Option<u32>,

    /// Whether the document declares structure tags
    pub tagged: Option<bool>,

    /// Number of embedded images
    pub image_count: usize,

    /// Sum of `width * height` over all images
    pub image_total_area: u64,

    /// Heuristic: the first page is a single large image
    pub frontpage_is_image: bool,

    /// Heuristic: no embedded fonts but at least one image
    pub scanned: bool,

    /// Per-image rows backing the statistics
    pub images: Vec<ImageRecord>,
}

impl DocumentInfo {
    /// The metadata part of this record.
    pub fn meta(&self) -> MetaInfo {
        MetaInfo {
            touch_date: self.touch_date,
            page_count: self.page_count,
            tagged: self.tagged,
        }
    }
}
