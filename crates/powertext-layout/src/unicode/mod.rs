pub mod emoji;
pub mod graphemes;

pub use graphemes::{Segment, Segmenter, Segments, UnitKind};
