//! Geometric operators over whole outlines.
//!
//! Every operator takes an outline by reference and returns a new one. The
//! command count, order and types are preserved, with the single exception
//! of [`flatten`], which replaces curves by lines one for one. Closes are
//! never touched. Empty outlines come back empty.

use std::fmt;

use kurbo::{Affine, Point};
use rand::Rng;

use crate::{
    command::{Outline, PathCommand, PointKey},
    error::OutlineError,
};

/// Adds uniform noise in `[-intensity / 2, intensity / 2)` to every
/// coordinate, each axis of each point drawn separately.
pub fn jitter<R: Rng + ?Sized>(outline: &Outline, intensity: f64, rng: &mut R) -> Outline {
    perturb(outline, intensity, rng, |_| true)
}

/// Like [`jitter`], but only control points move; on-curve points stay put.
pub fn punk<R: Rng + ?Sized>(outline: &Outline, intensity: f64, rng: &mut R) -> Outline {
    perturb(outline, intensity, rng, |key| !key.is_on_curve())
}

fn perturb<R: Rng + ?Sized>(
    outline: &Outline,
    intensity: f64,
    rng: &mut R,
    mut select: impl FnMut(PointKey) -> bool,
) -> Outline {
    outline.map(|cmd| {
        cmd.map_points(|key, pt| {
            if !select(key) {
                return pt;
            }
            let dx = (rng.gen::<f64>() - 0.5) * intensity;
            let dy = (rng.gen::<f64>() - 0.5) * intensity;
            Point::new(pt.x + dx, pt.y + dy)
        })
    })
}

/// Scales every point, control points included, about the outline's
/// [centroid](Outline::centroid).
///
/// Factors above one embolden, below one lighten.
pub fn expand(outline: &Outline, factor: f64) -> Outline {
    axis_scale(outline, factor, factor)
}

/// Scales about the outline's [centroid](Outline::centroid) with separate
/// horizontal and vertical factors.
///
/// An outline without end points has no centroid and is returned as is.
pub fn axis_scale(outline: &Outline, scale_x: f64, scale_y: f64) -> Outline {
    let Some(center) = outline.centroid() else {
        return outline.clone();
    };
    outline.map(|cmd| {
        cmd.map_points(|_, pt| {
            let delta = pt - center;
            Point::new(center.x + delta.x * scale_x, center.y + delta.y * scale_y)
        })
    })
}

/// Shears horizontally by `degrees`; positive angles lean to the right.
///
/// Each point is shifted by its own y, so control points keep their
/// position relative to the curve.
pub fn slant(outline: &Outline, degrees: f64) -> Outline {
    let shear = Affine::skew(degrees.to_radians().tan(), 0.0);
    transform(outline, shear)
}

/// Applies an affine map to every point.
pub fn transform(outline: &Outline, affine: Affine) -> Outline {
    outline.map(|cmd| cmd.map_points(|_, pt| affine * pt))
}

/// Snaps every coordinate to the nearest multiple of `grid`, rounding half
/// away from zero.
///
/// `grid` must be positive and finite; anything else leaves the outline
/// unchanged. Use [`Style::pixelate`] to reject such values up front.
pub fn pixelate(outline: &Outline, grid: f64) -> Outline {
    if !(grid.is_finite() && grid > 0.0) {
        log::warn!("ignoring pixelate with grid size {grid}");
        return outline.clone();
    }
    let snap = |v: f64| (v / grid).round() * grid;
    outline.map(|cmd| cmd.map_points(|_, pt| Point::new(snap(pt.x), snap(pt.y))))
}

/// Replaces every curve with a straight line to its end point.
pub fn flatten(outline: &Outline) -> Outline {
    outline.map(|cmd| match *cmd {
        PathCommand::QuadTo { x, y, .. } | PathCommand::CubicTo { x, y, .. } => {
            PathCommand::LineTo { x, y }
        }
        other => other,
    })
}

/// One operator from the catalog, with its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Style {
    /// See [`jitter`].
    Jitter { intensity: f64 },
    /// See [`expand`].
    Expand { factor: f64 },
    /// See [`axis_scale`].
    AxisScale { x: f64, y: f64 },
    /// See [`slant`].
    Slant { degrees: f64 },
    /// See [`pixelate`].
    Pixelate { grid: f64 },
    /// See [`flatten`].
    Flatten,
    /// See [`punk`].
    Punk { intensity: f64 },
}

impl Style {
    /// A pixelate style, rejecting grids that are not positive and finite.
    pub fn pixelate(grid: f64) -> Result<Style, OutlineError> {
        let style = Style::Pixelate { grid };
        style.validate()?;
        Ok(style)
    }

    /// Checks that the parameters are usable.
    pub fn validate(&self) -> Result<(), OutlineError> {
        let invalid = |reason| {
            Err(OutlineError::InvalidParameter {
                style: self.name(),
                reason,
            })
        };
        match *self {
            Style::Pixelate { grid } if !(grid.is_finite() && grid > 0.0) => {
                invalid("grid size must be positive")
            }
            Style::Jitter { intensity: v }
            | Style::Punk { intensity: v }
            | Style::Expand { factor: v }
            | Style::Slant { degrees: v }
                if !v.is_finite() =>
            {
                invalid("parameter must be finite")
            }
            Style::AxisScale { x, y } if !(x.is_finite() && y.is_finite()) => {
                invalid("scale factors must be finite")
            }
            _ => Ok(()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Style::Jitter { .. } => "jitter",
            Style::Expand { .. } => "expand",
            Style::AxisScale { .. } => "axis-scale",
            Style::Slant { .. } => "slant",
            Style::Pixelate { .. } => "pixelate",
            Style::Flatten => "flatten",
            Style::Punk { .. } => "punk",
        }
    }

    /// Returns `true` if this style draws from a random source.
    pub fn is_random(&self) -> bool {
        matches!(self, Style::Jitter { .. } | Style::Punk { .. })
    }

    /// Applies the style, using the thread local generator for the random
    /// styles.
    pub fn apply(&self, outline: &Outline) -> Outline {
        self.apply_with_rng(outline, &mut rand::thread_rng())
    }

    /// Applies the style, drawing any noise from `rng`.
    pub fn apply_with_rng<R: Rng + ?Sized>(&self, outline: &Outline, rng: &mut R) -> Outline {
        match *self {
            Style::Jitter { intensity } => jitter(outline, intensity, rng),
            Style::Expand { factor } => expand(outline, factor),
            Style::AxisScale { x, y } => axis_scale(outline, x, y),
            Style::Slant { degrees } => slant(outline, degrees),
            Style::Pixelate { grid } => pixelate(outline, grid),
            Style::Flatten => flatten(outline),
            Style::Punk { intensity } => punk(outline, intensity, rng),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Style::Jitter { intensity } | Style::Punk { intensity } => {
                write!(f, "{}({intensity})", self.name())
            }
            Style::Expand { factor } => write!(f, "{}({factor})", self.name()),
            Style::AxisScale { x, y } => write!(f, "{}({x}, {y})", self.name()),
            Style::Slant { degrees } => write!(f, "{}({degrees})", self.name()),
            Style::Pixelate { grid } => write!(f, "{}({grid})", self.name()),
            Style::Flatten => write!(f, "{}", self.name()),
        }
    }
}

/// Named styles with tuned parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Expand by 15%.
    Bold,
    /// Contract both axes by 10%.
    Thin,
    /// Stretch horizontally by 30%.
    Wide,
    /// Compress horizontally by 25%.
    Condensed,
    /// Lean right by 15 degrees.
    Italic,
    /// Curves to lines.
    Flatten,
    /// Snap to a 50 unit grid.
    Pixelate,
    /// Hand drawn noise of 20 units.
    Jitter,
    /// Handle noise of 80 units.
    Punk,
}

impl Preset {
    pub const ALL: [Preset; 9] = [
        Preset::Bold,
        Preset::Thin,
        Preset::Wide,
        Preset::Condensed,
        Preset::Italic,
        Preset::Flatten,
        Preset::Pixelate,
        Preset::Jitter,
        Preset::Punk,
    ];

    /// The preset's main parameter.
    ///
    /// This is the factor, angle, grid size or intensity, depending on the
    /// underlying operator. Flatten has none and reports zero.
    pub fn default_amount(self) -> f64 {
        match self {
            Preset::Bold => 1.15,
            Preset::Thin => 0.9,
            Preset::Wide => 1.3,
            Preset::Condensed => 0.75,
            Preset::Italic => 15.0,
            Preset::Flatten => 0.0,
            Preset::Pixelate => 50.0,
            Preset::Jitter => 20.0,
            Preset::Punk => 80.0,
        }
    }

    pub fn style(self) -> Style {
        self.style_with(self.default_amount())
    }

    /// The preset's operator with `amount` in place of the default parameter.
    pub fn style_with(self, amount: f64) -> Style {
        match self {
            Preset::Bold => Style::Expand { factor: amount },
            Preset::Thin => Style::AxisScale {
                x: amount,
                y: amount,
            },
            Preset::Wide | Preset::Condensed => Style::AxisScale { x: amount, y: 1.0 },
            Preset::Italic => Style::Slant { degrees: amount },
            Preset::Flatten => Style::Flatten,
            Preset::Pixelate => Style::Pixelate { grid: amount },
            Preset::Jitter => Style::Jitter { intensity: amount },
            Preset::Punk => Style::Punk { intensity: amount },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    use super::*;

    const EPSILON: f64 = 1e-9;

    fn square() -> Outline {
        "M 0 0 L 100 0 L 100 100 L 0 100 Z".parse().unwrap()
    }

    // two subpaths, both curve types, an open contour and a trailing close
    fn mixed() -> Outline {
        "M 10 -20 Q 40 40 60 10 L 100 10 C 125 10 150 50 125 60 Z \
         M 300 300 C 320 310 330 350 310 390 L 250 380 \
         M -5.5 7.25 Q 0 0 3 -4 Z"
            .parse()
            .unwrap()
    }

    fn samples() -> Vec<Outline> {
        vec![
            square(),
            mixed(),
            Outline::new(),
            Outline::from_commands(vec![PathCommand::Close]),
        ]
    }

    fn coords(outline: &Outline) -> Vec<f64> {
        outline
            .iter()
            .flat_map(|cmd| cmd.points())
            .flat_map(|(_, pt)| [pt.x, pt.y])
            .collect()
    }

    fn assert_close(a: &Outline, b: &Outline) {
        let kinds = |o: &Outline| o.iter().map(PathCommand::letter).collect::<String>();
        assert_eq!(kinds(a), kinds(b));
        for (x, y) in coords(a).into_iter().zip(coords(b)) {
            assert!((x - y).abs() < EPSILON, "{a} != {b}");
        }
    }

    #[test]
    fn condensed_square() {
        let result = axis_scale(&square(), 0.5, 1.0);
        assert_eq!(result.to_string(), "M 25 0 L 75 0 L 75 100 L 25 100 Z");
    }

    #[test]
    fn expand_scales_controls_about_anchor_centroid() {
        let outline: Outline = "M 0 0 Q 10 30 20 0 Z".parse().unwrap();
        // centroid is (10, 0): the control point does not contribute
        let result = expand(&outline, 2.0);
        assert_eq!(result.to_string(), "M -10 0 Q 10 60 30 0 Z");
    }

    #[rstest]
    #[case::expand(Style::Expand { factor: 1.0 })]
    #[case::axis_scale(Style::AxisScale { x: 1.0, y: 1.0 })]
    #[case::slant(Style::Slant { degrees: 0.0 })]
    #[case::jitter(Style::Jitter { intensity: 0.0 })]
    #[case::punk(Style::Punk { intensity: 0.0 })]
    fn identity_parameters(#[case] style: Style) {
        let mut rng = StdRng::seed_from_u64(7);
        for outline in samples() {
            assert_close(&style.apply_with_rng(&outline, &mut rng), &outline);
        }
    }

    #[rstest]
    #[case::expand(Style::Expand { factor: 1.15 })]
    #[case::axis_scale(Style::AxisScale { x: 1.3, y: 0.8 })]
    #[case::slant(Style::Slant { degrees: 15.0 })]
    #[case::pixelate(Style::Pixelate { grid: 50.0 })]
    #[case::flatten(Style::Flatten)]
    fn deterministic_styles(#[case] style: Style) {
        assert!(!style.is_random());
        for outline in samples() {
            let a = style.apply(&outline);
            let b = style.apply(&outline);
            assert_eq!(
                coords(&a).iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
                coords(&b).iter().map(|v| v.to_bits()).collect::<Vec<_>>()
            );
        }
    }

    #[rstest]
    #[case::jitter(Style::Jitter { intensity: 20.0 })]
    #[case::expand(Style::Expand { factor: 1.15 })]
    #[case::axis_scale(Style::AxisScale { x: 1.3, y: 0.8 })]
    #[case::slant(Style::Slant { degrees: -12.0 })]
    #[case::pixelate(Style::Pixelate { grid: 50.0 })]
    #[case::punk(Style::Punk { intensity: 80.0 })]
    fn structure_is_preserved(#[case] style: Style) {
        let outline = mixed();
        let result = style.apply(&outline);
        assert_eq!(result.len(), outline.len());
        assert_eq!(result.subpath_count(), outline.subpath_count());
        for (before, after) in outline.iter().zip(result.iter()) {
            assert_eq!(before.letter(), after.letter());
        }
        assert!(style.apply(&Outline::new()).is_empty());
    }

    #[test]
    fn slant_uses_each_points_own_y() {
        let outline: Outline = "M 0 0 C 0 10 0 20 0 30".parse().unwrap();
        let result = slant(&outline, 45.0);
        let PathCommand::CubicTo {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        } = result.commands()[1]
        else {
            panic!("expected a cubic");
        };
        assert!((x1 - 10.0).abs() < EPSILON && y1 == 10.0);
        assert!((x2 - 20.0).abs() < EPSILON && y2 == 20.0);
        assert!((x - 30.0).abs() < EPSILON && y == 30.0);
    }

    #[test]
    fn slant_is_invertible() {
        for outline in samples() {
            let there = slant(&outline, 15.0);
            let back = slant(&there, -15.0);
            assert_close(&back, &outline);
        }
    }

    #[test]
    fn pixelate_snaps_to_grid() {
        let outline = mixed();
        let grid = 7.5;
        let snapped = pixelate(&outline, grid);
        for v in coords(&snapped) {
            let steps = v / grid;
            assert_eq!(steps, steps.round(), "{v} is off grid");
        }
        assert_eq!(pixelate(&snapped, grid), snapped);
    }

    #[test]
    fn pixelate_rounds_half_away_from_zero() {
        let outline: Outline = "M 25 -25 L 24.9 -75".parse().unwrap();
        assert_eq!(
            pixelate(&outline, 50.0).to_string(),
            "M 50 -50 L 0 -100"
        );
    }

    #[test]
    fn pixelate_ignores_bad_grid() {
        assert_eq!(pixelate(&mixed(), 0.0), mixed());
        assert_eq!(pixelate(&mixed(), -2.0), mixed());
        assert!(Style::pixelate(0.0).is_err());
        assert!(Style::pixelate(f64::NAN).is_err());
        assert_eq!(Style::pixelate(4.0), Ok(Style::Pixelate { grid: 4.0 }));
    }

    #[test]
    fn flatten_keeps_end_points() {
        let result = flatten(&mixed());
        assert_eq!(
            result.to_string(),
            "M 10 -20 L 60 10 L 100 10 L 125 60 Z \
             M 300 300 L 310 390 L 250 380 \
             M -5.5 7.25 L 3 -4 Z"
        );
        assert_eq!(flatten(&result), result);
    }

    #[test]
    fn jitter_moves_something() {
        let mut rng = StdRng::seed_from_u64(42);
        let outline = mixed();
        let result = jitter(&outline, 20.0, &mut rng);
        assert_ne!(result, outline);
        for (a, b) in coords(&outline).into_iter().zip(coords(&result)) {
            assert!((a - b).abs() <= 10.0);
        }
    }

    #[test]
    fn jitter_is_reproducible_with_seed() {
        let outline = mixed();
        let a = jitter(&outline, 5.0, &mut StdRng::seed_from_u64(1));
        let b = jitter(&outline, 5.0, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn punk_leaves_anchors_alone() {
        let mut rng = StdRng::seed_from_u64(3);
        let outline = mixed();
        let result = punk(&outline, 80.0, &mut rng);
        assert_ne!(result, outline);
        for (before, after) in outline.iter().zip(result.iter()) {
            assert_eq!(before.end_point(), after.end_point());
        }
    }

    #[test]
    fn close_only_outline_is_untouched() {
        let outline = Outline::from_commands(vec![PathCommand::Close]);
        assert_eq!(expand(&outline, 3.0), outline);
        assert_eq!(axis_scale(&outline, 3.0, 0.5), outline);
    }

    #[test]
    fn presets() {
        assert_eq!(Preset::Bold.style(), Style::Expand { factor: 1.15 });
        assert_eq!(
            Preset::Condensed.style(),
            Style::AxisScale { x: 0.75, y: 1.0 }
        );
        assert_eq!(
            Preset::Thin.style_with(0.5),
            Style::AxisScale { x: 0.5, y: 0.5 }
        );
        for preset in Preset::ALL {
            assert!(preset.style().validate().is_ok(), "{preset:?}");
        }
        assert!(Preset::Pixelate.style_with(0.0).validate().is_err());
    }

    #[test]
    fn display_names() {
        assert_eq!(Preset::Wide.style().to_string(), "axis-scale(1.3, 1)");
        assert_eq!(Style::Flatten.to_string(), "flatten");
    }
}
