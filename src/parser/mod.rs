//! Parsers for the text emitted by the poppler utilities.
//!
//! All parsers are pure functions over captured output; none of them
//! spawn processes.

mod fonts;
mod images;
mod info;
mod structure;

pub use fonts::{count_fonts, FONT_LIST_HEADER_LINES};
pub use images::parse_image_list;
pub use info::{meta_from_fields, parse_info_dump, parse_iso_date, parse_meta_info, InfoValue};
pub use structure::{build_tree, indent_level, parse_struct_trace, TreeBuilder};
