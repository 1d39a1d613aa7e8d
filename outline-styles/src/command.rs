//! The path command model shared by every transform.

use std::fmt;

use kurbo::{Point, Vec2};

use crate::error::OutlineError;

/// Single element of a glyph outline.
///
/// Each variant carries exactly the coordinates its segment type needs, so
/// a quadratic can never be missing its control point and a close can never
/// carry coordinates.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathCommand {
    /// Begin a new subpath at (x, y).
    MoveTo { x: f64, y: f64 },
    /// Draw a line from the current point to (x, y).
    LineTo { x: f64, y: f64 },
    /// Draw a quadratic bezier from the current point with a control point at
    /// (x1, y1) and ending at (x, y).
    QuadTo { x1: f64, y1: f64, x: f64, y: f64 },
    /// Draw a cubic bezier from the current point with control points at
    /// (x1, y1) and (x2, y2) and ending at (x, y).
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    /// Close the current subpath.
    Close,
}

/// Identifies one coordinate pair on a [`PathCommand`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointKey {
    /// The on-curve end point, `(x, y)`.
    Main,
    /// The first off-curve control point, `(x1, y1)`.
    Control1,
    /// The second off-curve control point of a cubic, `(x2, y2)`.
    Control2,
}

impl PointKey {
    /// Returns `true` for the on-curve key.
    pub fn is_on_curve(self) -> bool {
        self == PointKey::Main
    }
}

impl fmt::Display for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PointKey::Main => "main",
            PointKey::Control1 => "c1",
            PointKey::Control2 => "c2",
        })
    }
}

impl PathCommand {
    /// The single letter used for this command in path syntax.
    pub fn letter(&self) -> char {
        match self {
            PathCommand::MoveTo { .. } => 'M',
            PathCommand::LineTo { .. } => 'L',
            PathCommand::QuadTo { .. } => 'Q',
            PathCommand::CubicTo { .. } => 'C',
            PathCommand::Close => 'Z',
        }
    }

    /// The number of coordinate values carried by this command.
    pub fn arity(&self) -> usize {
        match self {
            PathCommand::MoveTo { .. } | PathCommand::LineTo { .. } => 2,
            PathCommand::QuadTo { .. } => 4,
            PathCommand::CubicTo { .. } => 6,
            PathCommand::Close => 0,
        }
    }

    /// The on-curve point this command ends at, if any.
    pub fn end_point(&self) -> Option<Point> {
        self.point(PointKey::Main)
    }

    /// Returns the coordinate pair identified by `key`, if this command has one.
    pub fn point(&self, key: PointKey) -> Option<Point> {
        match (*self, key) {
            (PathCommand::MoveTo { x, y }, PointKey::Main)
            | (PathCommand::LineTo { x, y }, PointKey::Main)
            | (PathCommand::QuadTo { x, y, .. }, PointKey::Main)
            | (PathCommand::CubicTo { x, y, .. }, PointKey::Main) => Some(Point::new(x, y)),
            (PathCommand::QuadTo { x1, y1, .. }, PointKey::Control1)
            | (PathCommand::CubicTo { x1, y1, .. }, PointKey::Control1) => {
                Some(Point::new(x1, y1))
            }
            (PathCommand::CubicTo { x2, y2, .. }, PointKey::Control2) => Some(Point::new(x2, y2)),
            _ => None,
        }
    }

    /// The off-curve control points, in order. Empty for moves, lines and
    /// closes.
    pub fn controls(&self) -> impl Iterator<Item = Point> + Clone {
        self.points()
            .filter(|(key, _)| !key.is_on_curve())
            .map(|(_, pt)| pt)
    }

    /// Iterates the coordinate pairs of this command in drawing order:
    /// control points first, then the on-curve point.
    pub fn points(&self) -> impl Iterator<Item = (PointKey, Point)> + Clone {
        let cmd = *self;
        [PointKey::Control1, PointKey::Control2, PointKey::Main]
            .into_iter()
            .filter_map(move |key| cmd.point(key).map(|pt| (key, pt)))
    }

    /// Returns a copy of this command with every coordinate pair replaced by
    /// the result of `f`.
    ///
    /// Control points are visited before the end point. A close is returned
    /// unchanged without calling `f`.
    pub fn map_points(self, mut f: impl FnMut(PointKey, Point) -> Point) -> Self {
        match self {
            PathCommand::MoveTo { x, y } => {
                let p = f(PointKey::Main, Point::new(x, y));
                PathCommand::MoveTo { x: p.x, y: p.y }
            }
            PathCommand::LineTo { x, y } => {
                let p = f(PointKey::Main, Point::new(x, y));
                PathCommand::LineTo { x: p.x, y: p.y }
            }
            PathCommand::QuadTo { x1, y1, x, y } => {
                let c1 = f(PointKey::Control1, Point::new(x1, y1));
                let p = f(PointKey::Main, Point::new(x, y));
                PathCommand::QuadTo {
                    x1: c1.x,
                    y1: c1.y,
                    x: p.x,
                    y: p.y,
                }
            }
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let c1 = f(PointKey::Control1, Point::new(x1, y1));
                let c2 = f(PointKey::Control2, Point::new(x2, y2));
                let p = f(PointKey::Main, Point::new(x, y));
                PathCommand::CubicTo {
                    x1: c1.x,
                    y1: c1.y,
                    x2: c2.x,
                    y2: c2.y,
                    x: p.x,
                    y: p.y,
                }
            }
            PathCommand::Close => PathCommand::Close,
        }
    }

    /// Returns a copy with the pair at `key` moved to `point`, or `None` if
    /// this command has no such pair.
    pub fn with_point(self, key: PointKey, point: Point) -> Option<Self> {
        self.point(key)?;
        Some(self.map_points(|k, p| if k == key { point } else { p }))
    }
}

/// The ordered sequence of path commands describing one glyph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    commands: Vec<PathCommand>,
}

impl Outline {
    /// Creates an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an outline from a list of commands, taken as is.
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PathCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathCommand> {
        self.commands.iter()
    }

    /// Appends a command to the end of the outline.
    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// The number of subpaths, which is the number of moves.
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, PathCommand::MoveTo { .. }))
            .count()
    }

    /// Checks that every subpath begins with a move.
    pub fn validate(&self) -> Result<(), OutlineError> {
        match self.commands.first() {
            None | Some(PathCommand::MoveTo { .. }) => Ok(()),
            Some(_) => Err(OutlineError::MissingMove(0)),
        }
    }

    /// The mean of all on-curve end points, or `None` if the outline has no
    /// coordinate bearing commands.
    ///
    /// Control points do not contribute.
    pub fn centroid(&self) -> Option<Point> {
        let (sum, count) = self
            .commands
            .iter()
            .filter_map(PathCommand::end_point)
            .fold((Vec2::ZERO, 0usize), |(sum, count), pt| {
                (sum + pt.to_vec2(), count + 1)
            });
        (count != 0).then(|| (sum / count as f64).to_point())
    }

    /// Returns a new outline with the pair at (`index`, `key`) moved to
    /// `point`.
    ///
    /// This is how an editor commits a drag: the input is left untouched.
    pub fn with_point(
        &self,
        index: usize,
        key: PointKey,
        point: Point,
    ) -> Result<Outline, OutlineError> {
        let moved = self
            .commands
            .get(index)
            .and_then(|cmd| cmd.with_point(key, point))
            .ok_or(OutlineError::NoSuchPoint { index, key })?;
        let mut commands = self.commands.clone();
        commands[index] = moved;
        Ok(Outline { commands })
    }

    /// Applies `f` to every command, producing a new outline.
    pub(crate) fn map(&self, f: impl FnMut(&PathCommand) -> PathCommand) -> Outline {
        Outline {
            commands: self.commands.iter().map(f).collect(),
        }
    }
}

impl From<Vec<PathCommand>> for Outline {
    fn from(commands: Vec<PathCommand>) -> Self {
        Self::from_commands(commands)
    }
}

impl FromIterator<PathCommand> for Outline {
    fn from_iter<I: IntoIterator<Item = PathCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Outline {
    type Item = PathCommand;
    type IntoIter = std::vec::IntoIter<PathCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a PathCommand;
    type IntoIter = std::slice::Iter<'a, PathCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl AsRef<[PathCommand]> for Outline {
    fn as_ref(&self) -> &[PathCommand] {
        &self.commands
    }
}
