//! Streaming outlines in and out of other path representations.
//!
//! Font libraries decode glyphs by calling into a pen. Implementing [`Pen`]
//! for [`Outline`] makes decoding a 1:1 structural copy, and
//! [`Outline::draw`] replays commands in order for re-encoding.

use kurbo::{BezPath, PathEl, Point};

use crate::command::{Outline, PathCommand};

/// A sink for outline commands in `f64` font units.
///
/// Coordinates are absolute. A font decoder calls these in drawing order;
/// [`Outline::draw`] calls them when replaying an outline.
pub trait Pen {
    /// Starts a subpath at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);

    /// Adds a straight segment ending at `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Adds a quadratic segment with handle `(cx0, cy0)`, ending at `(x, y)`.
    fn quad_to(&mut self, cx0: f64, cy0: f64, x: f64, y: f64);

    /// Adds a cubic segment with handles `(cx0, cy0)` and `(cx1, cy1)`,
    /// ending at `(x, y)`.
    fn curve_to(&mut self, cx0: f64, cy0: f64, cx1: f64, cy1: f64, x: f64, y: f64);

    /// Ends the subpath, joining it back to its start.
    fn close(&mut self);
}

impl Pen for Outline {
    fn move_to(&mut self, x: f64, y: f64) {
        self.push(PathCommand::MoveTo { x, y })
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(PathCommand::LineTo { x, y })
    }

    fn quad_to(&mut self, cx0: f64, cy0: f64, x: f64, y: f64) {
        self.push(PathCommand::QuadTo {
            x1: cx0,
            y1: cy0,
            x,
            y,
        })
    }

    fn curve_to(&mut self, cx0: f64, cy0: f64, cx1: f64, cy1: f64, x: f64, y: f64) {
        self.push(PathCommand::CubicTo {
            x1: cx0,
            y1: cy0,
            x2: cx1,
            y2: cy1,
            x,
            y,
        })
    }

    fn close(&mut self) {
        self.push(PathCommand::Close)
    }
}

impl Pen for BezPath {
    fn move_to(&mut self, x: f64, y: f64) {
        BezPath::move_to(self, (x, y))
    }

    fn line_to(&mut self, x: f64, y: f64) {
        BezPath::line_to(self, (x, y))
    }

    fn quad_to(&mut self, cx0: f64, cy0: f64, x: f64, y: f64) {
        BezPath::quad_to(self, (cx0, cy0), (x, y))
    }

    fn curve_to(&mut self, cx0: f64, cy0: f64, cx1: f64, cy1: f64, x: f64, y: f64) {
        BezPath::curve_to(self, (cx0, cy0), (cx1, cy1), (x, y))
    }

    fn close(&mut self) {
        self.close_path()
    }
}

impl PathCommand {
    /// Send this command to `pen`.
    pub fn apply_to(&self, pen: &mut impl Pen) {
        match *self {
            PathCommand::MoveTo { x, y } => pen.move_to(x, y),
            PathCommand::LineTo { x, y } => pen.line_to(x, y),
            PathCommand::QuadTo { x1, y1, x, y } => pen.quad_to(x1, y1, x, y),
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => pen.curve_to(x1, y1, x2, y2, x, y),
            PathCommand::Close => pen.close(),
        }
    }
}

impl Outline {
    /// Replays every command, in order, into `pen`.
    pub fn draw(&self, pen: &mut impl Pen) {
        self.iter().for_each(|cmd| cmd.apply_to(pen));
    }

    /// Converts this outline to a kurbo path.
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        self.draw(&mut path);
        path
    }
}

impl From<&BezPath> for Outline {
    fn from(path: &BezPath) -> Self {
        let mut outline = Outline::new();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(Point { x, y }) => outline.move_to(x, y),
                PathEl::LineTo(Point { x, y }) => outline.line_to(x, y),
                PathEl::QuadTo(c0, p) => outline.quad_to(c0.x, c0.y, p.x, p.y),
                PathEl::CurveTo(c0, c1, p) => outline.curve_to(c0.x, c0.y, c1.x, c1.y, p.x, p.y),
                PathEl::ClosePath => outline.close(),
            }
        }
        outline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_closed_test_shape(pen: &mut impl Pen) {
        pen.move_to(125.0, 100.0);
        pen.quad_to(200.0, 150.0, 175.0, 300.0);
        pen.curve_to(150.0, 150.0, 50.0, 150.0, 25.0, 300.0);
        pen.quad_to(0.0, 150.0, 75.0, 100.0);
        pen.line_to(100.0, 50.0);
        pen.close();
    }

    #[test]
    fn outline_pen_copies_structure() {
        let mut outline = Outline::new();
        draw_closed_test_shape(&mut outline);
        assert_eq!(outline.len(), 6);
        assert_eq!(
            outline.commands()[2],
            PathCommand::CubicTo {
                x1: 150.0,
                y1: 150.0,
                x2: 50.0,
                y2: 150.0,
                x: 25.0,
                y: 300.0
            }
        );
        assert_eq!(outline.commands()[5], PathCommand::Close);
    }

    #[test]
    fn draw_into_bezpath() {
        let mut outline = Outline::new();
        draw_closed_test_shape(&mut outline);
        assert_eq!(
            outline.to_bezpath().elements(),
            &[
                PathEl::MoveTo((125.0, 100.0).into()),
                PathEl::QuadTo((200.0, 150.0).into(), (175.0, 300.0).into()),
                PathEl::CurveTo(
                    (150.0, 150.0).into(),
                    (50.0, 150.0).into(),
                    (25.0, 300.0).into()
                ),
                PathEl::QuadTo((0.0, 150.0).into(), (75.0, 100.0).into()),
                PathEl::LineTo((100.0, 50.0).into()),
                PathEl::ClosePath,
            ]
        );
    }

    #[test]
    fn bezpath_round_trip() {
        let mut bez = BezPath::new();
        draw_closed_test_shape(&mut bez);
        let outline = Outline::from(&bez);
        assert_eq!(outline.to_bezpath(), bez);
    }

    #[test]
    fn open_subpath_stays_open() {
        let mut outline = Outline::new();
        outline.move_to(10.0, 10.0);
        outline.line_to(100.0, 10.0);
        assert_eq!(
            outline.to_bezpath().elements(),
            &[
                PathEl::MoveTo((10.0, 10.0).into()),
                PathEl::LineTo((100.0, 10.0).into()),
            ]
        );
    }
}
