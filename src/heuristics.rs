//! Image statistics and the scanned-document classifier.
//!
//! Both thresholds are empirical. Downstream consumers compare against
//! classifications made with exactly these values, so they stay fixed.

use serde::{Deserialize, Serialize};

use crate::model::{DocumentInfo, ImageRecord, MetaInfo};

/// An image on page 1 larger than this many square pixels marks the front
/// page as an image.
pub const FRONTPAGE_MIN_AREA: u64 = 1000;

/// Reduced view of the image listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageStats {
    /// Number of images
    pub count: usize,

    /// Sum of image areas
    pub total_area: u64,

    /// First listed image sits on page 1 and exceeds [`FRONTPAGE_MIN_AREA`]
    pub frontpage_is_image: bool,
}

impl ImageStats {
    /// Aggregate a list of image records.
    pub fn from_records(records: &[ImageRecord]) -> Self {
        let frontpage_is_image = records
            .first()
            .map(|first| first.page == 1 && first.area() > FRONTPAGE_MIN_AREA)
            .unwrap_or(false);

        Self {
            count: records.len(),
            total_area: records.iter().map(ImageRecord::area).sum(),
            frontpage_is_image,
        }
    }
}

/// No embedded fonts plus at least one image suggests a rasterized scan.
///
/// This only looks at the font and image listings, never at rendered
/// pages, so vector-only drawings without text are not detected and a scan
/// with an OCR text layer is not flagged.
pub fn is_scanned(font_count: usize, image_count: usize) -> bool {
    font_count == 0 && image_count > 0
}

/// Combine metadata, image rows and the font count into a [`DocumentInfo`].
pub fn assemble_info(meta: MetaInfo, images: Vec<ImageRecord>, font_count: usize) -> DocumentInfo {
    let stats = ImageStats::from_records(&images);
    let scanned = is_scanned(font_count, stats.count);

    log::debug!(
        "images={} area={} frontpage={} fonts={} scanned={}",
        stats.count,
        stats.total_area,
        stats.frontpage_is_image,
        font_count,
        scanned
    );

    DocumentInfo {
        touch_date: meta.touch_date,
        page_count: meta.page_count,
        tagged: meta.tagged,
        image_count: stats.count,
        image_total_area: stats.total_area,
        frontpage_is_image: stats.frontpage_is_image,
        scanned,
        images,
    }
}
