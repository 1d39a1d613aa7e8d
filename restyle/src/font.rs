//! Moving glyph outlines between a font and [`Outline`]s.

use outline_styles::{pen::Pen, GlyphCollection, Outline};
use skrifa::{
    outline::{DrawSettings, OutlinePen},
    prelude::{LocationRef, Size},
    raw::TableProvider,
    FontRef, GlyphId, MetadataProvider,
};
use write_fonts::{
    from_obj::ToOwnedTable,
    read::{FontRef as SourceFont, TableProvider as _},
    tables::{
        glyf::{Bbox, GlyfLocaBuilder, Glyph, SimpleGlyph},
        head::Head,
        maxp::Maxp,
    },
    types::Tag,
    FontBuilder,
};

use crate::error::{EncodeError, Error};

const GLYF: Tag = Tag::new(b"glyf");

// Tables keyed to the original point numbering. Restyled contours no longer
// match them, so they are left out of the output.
const STALE_TABLES: [Tag; 8] = [
    Tag::new(b"gvar"),
    Tag::new(b"cvar"),
    Tag::new(b"cvt "),
    Tag::new(b"fpgm"),
    Tag::new(b"prep"),
    Tag::new(b"hdmx"),
    Tag::new(b"LTSH"),
    Tag::new(b"VDMX"),
];

/// Adapts an [`Outline`] to skrifa's f32 pen.
struct OutlineSink<'a>(&'a mut Outline);

impl OutlinePen for OutlineSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        Pen::move_to(self.0, x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        Pen::line_to(self.0, x as f64, y as f64);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        Pen::quad_to(self.0, cx0 as f64, cy0 as f64, x as f64, y as f64);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        Pen::curve_to(
            self.0,
            cx0 as f64,
            cy0 as f64,
            cx1 as f64,
            cy1 as f64,
            x as f64,
            y as f64,
        );
    }

    fn close(&mut self) {
        Pen::close(self.0);
    }
}

/// The outlines of every glyph in a font, in glyph id order.
///
/// Glyphs without an outline (spaces, bitmap-only glyphs) hold an empty
/// [`Outline`]. Composite glyphs are decomposed on decode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontGlyphs {
    outlines: Vec<Outline>,
}

impl FontGlyphs {
    /// Draws every glyph of `font` in font units at the default location.
    pub fn decode(font: &FontRef) -> Result<Self, Error> {
        let glyph_count = font.maxp().map_err(Error::Read)?.num_glyphs();
        let glyphs = font.outline_glyphs();
        let mut outlines = Vec::with_capacity(glyph_count as usize);
        for gid in 0..glyph_count {
            let mut outline = Outline::new();
            if let Some(glyph) = glyphs.get(GlyphId::from(gid)) {
                let settings = DrawSettings::unhinted(Size::unscaled(), LocationRef::default());
                glyph
                    .draw(settings, &mut OutlineSink(&mut outline))
                    .map_err(|reason| Error::Draw {
                        glyph: gid as u32,
                        reason,
                    })?;
            } else {
                log::trace!("no outline for glyph {gid}");
            }
            outlines.push(outline);
        }
        log::debug!("decoded {glyph_count} glyphs");
        Ok(Self { outlines })
    }

    pub fn from_outlines(outlines: Vec<Outline>) -> Self {
        Self { outlines }
    }

    pub fn len(&self) -> usize {
        self.outlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    pub fn get(&self, gid: u32) -> Result<&Outline, Error> {
        self.outlines.get(gid as usize).ok_or(Error::InvalidGid(gid))
    }

    pub fn outlines(&self) -> &[Outline] {
        &self.outlines
    }

    /// Builds a new font from `font`, with `glyf` and `loca` replaced by
    /// these outlines.
    ///
    /// The bounding box in `head` and the glyph statistics in `maxp` are
    /// recomputed. Every other table is copied as is, except for those that
    /// refer to the old point numbering (variation deltas and hinting data),
    /// which are dropped.
    pub fn compile(&self, font: &SourceFont) -> Result<Vec<u8>, Error> {
        if font.table_data(GLYF).is_none() {
            return Err(compile_error("glyf", "source font has no glyf table"));
        }
        let mut builder = GlyfLocaBuilder::new();
        let mut stats = GlyphStats::default();
        for (gid, outline) in self.outlines.iter().enumerate() {
            let glyph = encode(gid, outline)?;
            stats.update(&glyph);
            let glyph = if glyph.contours.is_empty() {
                Glyph::Empty
            } else {
                Glyph::Simple(glyph)
            };
            builder
                .add_glyph(&glyph)
                .map_err(|e| compile_error("glyf", format!("glyph {gid}: {e}")))?;
        }
        let (glyf, loca, loca_format) = builder.build();

        let mut head: Head = font.head().map_err(Error::ReadTables)?.to_owned_table();
        head.index_to_loc_format = loca_format as i16;
        stats.update_head(&mut head);
        let mut maxp: Maxp = font.maxp().map_err(Error::ReadTables)?.to_owned_table();
        stats.update_maxp(&mut maxp);

        let mut output = FontBuilder::new();
        output
            .add_table(&glyf)
            .map_err(|e| compile_error("glyf", e))?
            .add_table(&loca)
            .map_err(|e| compile_error("loca", e))?
            .add_table(&head)
            .map_err(|e| compile_error("head", e))?
            .add_table(&maxp)
            .map_err(|e| compile_error("maxp", e))?;
        copy_tables(&mut output, font, |tag| {
            let stale = STALE_TABLES.contains(&tag);
            if stale {
                log::warn!("Dropping table {tag}, it no longer matches the outlines");
            }
            stale
        });
        Ok(output.build())
    }
}

/// Extremes across all glyphs, for `head` and `maxp`.
#[derive(Clone, Copy, Debug, Default)]
struct GlyphStats {
    bbox: Option<Bbox>,
    max_points: u16,
    max_contours: u16,
}

impl GlyphStats {
    fn update(&mut self, glyph: &SimpleGlyph) {
        if glyph.contours.is_empty() {
            return;
        }
        self.bbox = Some(match self.bbox {
            Some(bbox) => bbox.union(glyph.bbox),
            None => glyph.bbox,
        });
        let points: usize = glyph.contours.iter().map(|c| c.len()).sum();
        self.max_points = self.max_points.max(points.min(u16::MAX as usize) as u16);
        self.max_contours = self
            .max_contours
            .max(glyph.contours.len().min(u16::MAX as usize) as u16);
    }

    fn update_head(&self, head: &mut Head) {
        let bbox = self.bbox.unwrap_or_default();
        head.x_min = bbox.x_min;
        head.y_min = bbox.y_min;
        head.x_max = bbox.x_max;
        head.y_max = bbox.y_max;
    }

    /// Only version 1.0 tables carry statistics. Every glyph is written as a
    /// simple glyph without instructions, so the composite and hinting
    /// limits are reset as well.
    fn update_maxp(&self, maxp: &mut Maxp) {
        if maxp.max_points.is_none() {
            return;
        }
        maxp.max_points = Some(self.max_points);
        maxp.max_contours = Some(self.max_contours);
        maxp.max_composite_points = Some(0);
        maxp.max_composite_contours = Some(0);
        maxp.max_component_elements = Some(0);
        maxp.max_component_depth = Some(0);
        maxp.max_zones = Some(1);
        maxp.max_twilight_points = Some(0);
        maxp.max_storage = Some(0);
        maxp.max_function_defs = Some(0);
        maxp.max_instruction_defs = Some(0);
        maxp.max_stack_elements = Some(0);
        maxp.max_size_of_instructions = Some(0);
    }
}

pub(crate) fn compile_error(table: &'static str, reason: impl std::fmt::Display) -> Error {
    Error::Compile {
        table,
        reason: reason.to_string(),
    }
}

/// Copies every table of `font` that `output` does not have yet, unless
/// `skip` returns `true` for its tag.
pub(crate) fn copy_tables<'a>(
    output: &mut FontBuilder<'a>,
    font: &SourceFont<'a>,
    mut skip: impl FnMut(Tag) -> bool,
) {
    for record in font.table_directory().table_records() {
        let tag = record.tag();
        if output.contains(tag) || skip(tag) {
            continue;
        }
        if let Some(data) = font.table_data(tag) {
            output.add_raw(tag, data.as_bytes());
        }
    }
}

/// Coordinates a glyf point can hold.
const COORD_RANGE: std::ops::RangeInclusive<f64> = (i16::MIN as f64)..=(i16::MAX as f64);

/// Converts an outline to a simple glyph. Empty outlines give a glyph
/// without contours.
fn encode(glyph: usize, outline: &Outline) -> Result<SimpleGlyph, EncodeError> {
    if outline.is_empty() {
        return Ok(SimpleGlyph::default());
    }
    let fits = |v: f64| COORD_RANGE.contains(&v.round());
    if let Some(pt) = outline
        .control_points()
        .find(|pt| !(fits(pt.point.x) && fits(pt.point.y)))
    {
        return Err(EncodeError {
            glyph,
            reason: format!(
                "point ({}, {}) of command {} is outside the 16-bit coordinate range",
                pt.point.x, pt.point.y, pt.command
            ),
        });
    }
    SimpleGlyph::from_bezpath(&outline.to_bezpath()).map_err(|reason| EncodeError {
        glyph,
        reason: format!("{reason:?}"),
    })
}

impl GlyphCollection for FontGlyphs {
    type Error = EncodeError;

    fn glyph_count(&self) -> usize {
        self.outlines.len()
    }

    fn outline(&self, index: usize) -> Option<Outline> {
        self.outlines.get(index).cloned()
    }

    /// Rejects outlines that cannot be stored as a simple glyph, such as
    /// those containing cubic segments.
    fn set_outline(&mut self, index: usize, outline: Outline) -> Result<(), EncodeError> {
        encode(index, &outline)?;
        if let Some(slot) = self.outlines.get_mut(index) {
            *slot = outline;
        }
        Ok(())
    }
}
