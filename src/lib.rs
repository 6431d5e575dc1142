//! Rule-based syllable segmentation of Myanmar text.
//!
//! Each code point is classified into one of twelve categories, then the
//! category sequence is walked left to right and the break status of the next
//! two, three or four categories is looked up in letter sequence tables.
//!
//! ```
//! use myanmar_rs::MyanmarSegmenter;
//!
//! let segmenter = MyanmarSegmenter::new();
//! assert_eq!(segmenter.segment("မြန်မာ"), "မြန်|မာ");
//! assert_eq!(segmenter.segment_categories("CMCACV").unwrap(), "CMCA|CV");
//! ```

pub mod category;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod output;
pub mod rules;
pub mod segmenter;

pub use category::{categorize, categorize_to_string, classify, Category};
pub use config::SegmenterConfig;
pub use error::{Error, Result};
pub use rules::{BreakStatus, RuleSet};
pub use segmenter::{MyanmarSegmenter, Segment, SegmentKind};
