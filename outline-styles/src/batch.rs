//! Applying one transform to every glyph of a font.

use rand::Rng;

use crate::{
    command::Outline,
    error::{BatchError, OutlineError},
    transform::Style,
};

/// An indexed set of glyph outlines, such as the glyphs of a font.
///
/// The batch applicator reads outlines as copies and writes results back
/// through [`set_outline`](GlyphCollection::set_outline); it never holds
/// on to the collection's internal state.
pub trait GlyphCollection {
    /// The error returned when a glyph rejects an outline.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The number of glyphs.
    fn glyph_count(&self) -> usize;

    /// A copy of the outline of the glyph at `index`, or `None` if the glyph
    /// has no outline.
    fn outline(&self, index: usize) -> Option<Outline>;

    /// Replaces the outline of the glyph at `index`.
    fn set_outline(&mut self, index: usize, outline: Outline) -> Result<(), Self::Error>;
}

impl GlyphCollection for Vec<Option<Outline>> {
    type Error = std::convert::Infallible;

    fn glyph_count(&self) -> usize {
        self.len()
    }

    fn outline(&self, index: usize) -> Option<Outline> {
        self.get(index).cloned().flatten()
    }

    fn set_outline(&mut self, index: usize, outline: Outline) -> Result<(), Self::Error> {
        if let Some(slot) = self.get_mut(index) {
            *slot = Some(outline);
        }
        Ok(())
    }
}

/// What a batch run did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Glyphs whose outline was transformed and written back.
    pub transformed: usize,
    /// Glyphs without an outline, or with an empty one.
    pub skipped: usize,
}

/// Runs `transform` over every glyph with a non-empty outline, in index
/// order, writing each result back before moving on.
///
/// The first failure stops the run. Glyphs processed before it keep their
/// new outlines; the error reports the failing glyph's index.
pub fn apply_to_all<C, F>(glyphs: &mut C, mut transform: F) -> Result<BatchReport, BatchError>
where
    C: GlyphCollection + ?Sized,
    F: FnMut(&Outline) -> Result<Outline, OutlineError>,
{
    let mut report = BatchReport::default();
    for glyph in 0..glyphs.glyph_count() {
        let outline = match glyphs.outline(glyph) {
            Some(outline) if !outline.is_empty() => outline,
            _ => {
                log::debug!("glyph {glyph} has no outline, skipping");
                report.skipped += 1;
                continue;
            }
        };
        let result =
            transform(&outline).map_err(|source| BatchError::Transform { glyph, source })?;
        glyphs
            .set_outline(glyph, result)
            .map_err(|source| BatchError::WriteBack {
                glyph,
                source: Box::new(source),
            })?;
        report.transformed += 1;
    }
    log::debug!(
        "transformed {} glyphs, skipped {}",
        report.transformed,
        report.skipped
    );
    Ok(report)
}

/// Applies `style` to every glyph with an outline, drawing noise from `rng`.
pub fn apply_style<C, R>(
    glyphs: &mut C,
    style: &Style,
    rng: &mut R,
) -> Result<BatchReport, BatchError>
where
    C: GlyphCollection + ?Sized,
    R: Rng + ?Sized,
{
    style.validate().map_err(BatchError::InvalidStyle)?;
    log::info!("applying {style} to {} glyphs", glyphs.glyph_count());
    apply_to_all(glyphs, |outline| Ok(style.apply_with_rng(outline, rng)))
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::transform::{self, Preset};

    fn three_glyphs() -> Vec<Option<Outline>> {
        vec![
            Some("M 0 0 Q 50 100 100 0 Z".parse().unwrap()),
            Some(Outline::new()),
            Some("M 0 0 L 0 100 C 10 110 20 110 30 100 Z".parse().unwrap()),
        ]
    }

    #[test]
    fn skips_empty_outlines() {
        let mut glyphs = three_glyphs();
        glyphs.push(None);
        let report =
            apply_style(&mut glyphs, &Style::Flatten, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(
            report,
            BatchReport {
                transformed: 2,
                skipped: 2
            }
        );
        assert_eq!(glyphs[0].as_ref().unwrap().to_string(), "M 0 0 L 100 0 Z");
        assert_eq!(glyphs[1], Some(Outline::new()));
        assert_eq!(
            glyphs[2].as_ref().unwrap().to_string(),
            "M 0 0 L 0 100 L 30 100 Z"
        );
        assert_eq!(glyphs[3], None);
    }

    #[test]
    fn every_preset_skips_empty_glyph() {
        for preset in Preset::ALL {
            let mut glyphs = three_glyphs();
            apply_style(&mut glyphs, &preset.style(), &mut StdRng::seed_from_u64(9)).unwrap();
            assert_eq!(glyphs[1], Some(Outline::new()), "{preset:?}");
        }
    }

    #[test]
    fn matches_single_glyph_transform() {
        let mut glyphs = three_glyphs();
        let expected = transform::slant(glyphs[2].as_ref().unwrap(), 15.0);
        apply_style(
            &mut glyphs,
            &Style::Slant { degrees: 15.0 },
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();
        assert_eq!(glyphs[2].as_ref(), Some(&expected));
    }

    #[test]
    fn transform_failure_keeps_earlier_glyphs() {
        let mut glyphs = three_glyphs();
        let original = glyphs.clone();
        let mut calls = 0;
        let err = apply_to_all(&mut glyphs, |outline| {
            calls += 1;
            if calls == 2 {
                return Err(OutlineError::MissingMove(0));
            }
            Ok(transform::flatten(outline))
        })
        .unwrap_err();
        assert_eq!(err.glyph(), Some(2));
        assert!(matches!(err, BatchError::Transform { glyph: 2, .. }));
        // glyph 0 stays committed, glyph 2 is untouched
        assert_eq!(glyphs[0].as_ref().unwrap().to_string(), "M 0 0 L 100 0 Z");
        assert_eq!(glyphs[2], original[2]);
    }

    #[derive(Debug)]
    struct Rejected;

    impl fmt::Display for Rejected {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("glyph is locked")
        }
    }

    impl std::error::Error for Rejected {}

    /// Refuses writes to one glyph and records the order of writes.
    struct LockedGlyph {
        glyphs: Vec<Option<Outline>>,
        locked: usize,
        writes: Vec<usize>,
    }

    impl GlyphCollection for LockedGlyph {
        type Error = Rejected;

        fn glyph_count(&self) -> usize {
            self.glyphs.len()
        }

        fn outline(&self, index: usize) -> Option<Outline> {
            self.glyphs[index].clone()
        }

        fn set_outline(&mut self, index: usize, outline: Outline) -> Result<(), Rejected> {
            if index == self.locked {
                return Err(Rejected);
            }
            self.writes.push(index);
            self.glyphs[index] = Some(outline);
            Ok(())
        }
    }

    #[test]
    fn write_back_failure_stops_the_batch() {
        let mut glyphs = three_glyphs();
        glyphs.push(Some("M 0 0 L 1 1".parse().unwrap()));
        let mut font = LockedGlyph {
            glyphs,
            locked: 2,
            writes: Vec::new(),
        };
        let err = apply_style(&mut font, &Style::Flatten, &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, BatchError::WriteBack { glyph: 2, .. }));
        assert_eq!(err.to_string(), "writing back glyph 2 failed: glyph is locked");
        assert_eq!(font.writes, vec![0]);
    }

    #[test]
    fn invalid_style_is_rejected_before_any_write() {
        let mut glyphs = three_glyphs();
        let original = glyphs.clone();
        let result = apply_style(
            &mut glyphs,
            &Style::Pixelate { grid: 0.0 },
            &mut StdRng::seed_from_u64(0),
        );
        assert!(matches!(result, Err(BatchError::InvalidStyle(_))));
        assert_eq!(glyphs, original);
    }
}
