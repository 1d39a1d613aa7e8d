//! Restyling TrueType fonts.
//!
//! Glyph outlines are decoded with [skrifa], handed to
//! [`outline_styles`] as a [`GlyphCollection`], and written back into new
//! `glyf` and `loca` tables with [write_fonts].
//!
//! [`GlyphCollection`]: outline_styles::GlyphCollection

mod error;
pub mod font;
pub mod names;

pub use error::{EncodeError, Error};
pub use font::FontGlyphs;
pub use names::{set_names, FontMetadata, NameField};

use kurbo::Point;
use outline_styles::{apply_style, BatchError, BatchReport, GlyphCollection, PointKey, Style};
use rand::Rng;

/// A change to a single glyph.
#[derive(Clone, Debug, PartialEq)]
pub enum GlyphEdit {
    /// Move one coordinate pair of one command.
    MovePoint {
        command: usize,
        key: PointKey,
        to: Point,
    },
    /// Apply a style to this glyph only.
    Restyle(Style),
}

/// Applies `style` to every glyph of the font in `data` and returns the
/// compiled result.
pub fn restyle_font<R: Rng + ?Sized>(
    data: &[u8],
    style: &Style,
    rng: &mut R,
) -> Result<(Vec<u8>, BatchReport), Error> {
    let font = skrifa::FontRef::new(data).map_err(Error::Read)?;
    let mut glyphs = FontGlyphs::decode(&font)?;
    let report = apply_style(&mut glyphs, style, rng)?;
    let source = write_fonts::read::FontRef::new(data).map_err(Error::ReadTables)?;
    let compiled = glyphs.compile(&source)?;
    Ok((compiled, report))
}

/// Applies `edit` to the glyph `gid` of the font in `data` and returns the
/// compiled result.
///
/// Every other glyph is written back as decoded.
pub fn edit_glyph<R: Rng + ?Sized>(
    data: &[u8],
    gid: u32,
    edit: &GlyphEdit,
    rng: &mut R,
) -> Result<Vec<u8>, Error> {
    let font = skrifa::FontRef::new(data).map_err(Error::Read)?;
    let mut glyphs = FontGlyphs::decode(&font)?;
    let outline = glyphs.get(gid)?;
    let edited = match edit {
        GlyphEdit::MovePoint { command, key, to } => outline.with_point(*command, *key, *to)?,
        GlyphEdit::Restyle(style) => {
            style.validate().map_err(BatchError::InvalidStyle)?;
            style.apply_with_rng(outline, rng)
        }
    };
    glyphs.set_outline(gid as usize, edited)?;
    log::info!("edited glyph {gid}");
    let source = write_fonts::read::FontRef::new(data).map_err(Error::ReadTables)?;
    glyphs.compile(&source)
}
