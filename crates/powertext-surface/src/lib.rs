//! powertext-surface: concrete collaborators for `powertext-layout`.
//!
//! [`RasterCanvas`] draws into an in-memory `image::RgbaImage` and
//! [`FontdueFont`] supplies metrics and glyph masks from a TrueType/OpenType
//! file via `fontdue`.

pub mod canvas;
pub mod error;
pub mod font;

pub use canvas::RasterCanvas;
pub use error::SurfaceError;
pub use font::{FontdueFont, load_font};
