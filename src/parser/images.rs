//! Parser for `pdfimages -list` output.
//!
//! ```text
//! page   num  type   width height color comp bpc  enc interp  object ID x-ppi y-ppi size ratio
//! --------------------------------------------------------------------------------------------
//!    1     0 image    2480  3508  rgb     3   8  jpeg   no         7  0   300   300  843K 3.3%
//! ```

use std::collections::BTreeMap;

use crate::model::ImageRecord;

const PAGE_COLUMN: &str = "page";
const WIDTH_COLUMN: &str = "width";
const HEIGHT_COLUMN: &str = "height";
const OBJECT_COLUMN: &str = "object";

/// Printed as one token in place of the two `object ID` columns.
const UNREFERENCED_MARKERS: [&str; 2] = ["[inline]", "[none]"];

/// Parse the image table into records, in listing order.
///
/// The first non-blank line is the header. The dashed separator and blank
/// lines are ignored. Inline and unreferenced images print `[inline]` or
/// `[none]` as a single token across `object ID`; such rows keep the marker
/// under `object` and have no `ID` column. Other rows whose column count
/// differs from the header, or whose page/width/height are not integers,
/// are skipped with a warning.
pub fn parse_image_list(text: &str) -> Vec<ImageRecord> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header: Vec<&str> = match lines.next() {
        Some(line) => line.split_whitespace().collect(),
        None => return Vec::new(),
    };

    let position = |name: &str| header.iter().position(|h| *h == name);
    let (page_idx, width_idx, height_idx) =
        match (position(PAGE_COLUMN), position(WIDTH_COLUMN), position(HEIGHT_COLUMN)) {
            (Some(p), Some(w), Some(h)) => (p, w, h),
            _ => {
                log::warn!("image list header lacks page/width/height: {:?}", header);
                return Vec::new();
            }
        };

    let object_idx = position(OBJECT_COLUMN);

    let mut records = Vec::new();
    for line in lines {
        if is_separator(line) {
            continue;
        }

        let values: Vec<&str> = line.split_whitespace().collect();
        let unreferenced = match object_idx {
            Some(idx) if values.len() + 1 == header.len() => values
                .get(idx)
                .map_or(false, |v| UNREFERENCED_MARKERS.contains(v)),
            _ => false,
        };
        if values.len() != header.len() && !unreferenced {
            log::warn!(
                "skipping image row with {} columns (expected {}): {}",
                values.len(),
                header.len(),
                line.trim()
            );
            continue;
        }

        let parsed = (
            values[page_idx].parse::<u32>(),
            values[width_idx].parse::<u32>(),
            values[height_idx].parse::<u32>(),
        );
        let (page, width, height) = match parsed {
            (Ok(p), Ok(w), Ok(h)) => (p, w, h),
            _ => {
                log::warn!("skipping image row with non-numeric size: {}", line.trim());
                continue;
            }
        };

        // The marker spans `object` and the column after it.
        let names = header.iter().enumerate().filter(|(i, _)| {
            !unreferenced || object_idx.map_or(true, |idx| *i != idx + 1)
        });
        let columns: BTreeMap<String, String> = names
            .zip(values.iter())
            .map(|((_, h), v)| (h.to_string(), v.to_string()))
            .collect();

        records.push(ImageRecord {
            page,
            width,
            height,
            columns,
        });
    }

    records
}

fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '-')
}
