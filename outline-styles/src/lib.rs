//! Geometric style transforms for glyph outlines.
//!
//! This crate operates on already decoded outlines: an [`Outline`] is an
//! ordered list of [`PathCommand`]s (move, line, quadratic, cubic and close)
//! for a single glyph. On top of that model it provides:
//!
//! * a fixed catalog of pure [transforms](transform) that deform coordinates
//!   while preserving the structure of the path (bold, slant, pixelate, ...),
//!   collected in the [`Style`] enum,
//! * a [batch applicator](batch) that runs one style over every glyph of a
//!   [`GlyphCollection`],
//! * [control point extraction](points) for editors, and
//! * a human readable [path syntax](syntax) for display.
//!
//! Reading and writing font binaries is left to other crates. The [`Pen`]
//! trait is the bridge: a font library draws into an [`Outline`], and an
//! outline can be replayed into any pen (including a [`kurbo::BezPath`]).
//!
//! ```
//! use outline_styles::{Outline, Style};
//!
//! let square: Outline = "M 0 0 L 100 0 L 100 100 L 0 100 Z".parse().unwrap();
//! let condensed = Style::AxisScale { x: 0.5, y: 1.0 }.apply(&square);
//! assert_eq!(condensed.to_string(), "M 25 0 L 75 0 L 75 100 L 25 100 Z");
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod batch;
mod command;
mod error;
pub mod pen;
pub mod points;
pub mod syntax;
pub mod transform;

pub use batch::{apply_style, apply_to_all, BatchReport, GlyphCollection};
pub use command::{Outline, PathCommand, PointKey};
pub use error::{BatchError, OutlineError};
pub use pen::Pen;
pub use points::{ControlPoint, ControlPoints};
pub use transform::{Preset, Style};

/// Re-export of the geometry crate used for points and affine maps.
pub extern crate kurbo;
