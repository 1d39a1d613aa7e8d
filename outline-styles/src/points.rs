//! Control point extraction for editors.
//!
//! This is a read-only view: each [`ControlPoint`] records where it came
//! from so an editor can build a modified outline with
//! [`Outline::with_point`].

use kurbo::Point;

use crate::command::{Outline, PathCommand, PointKey};

/// A point of an outline, as shown in an editor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ControlPoint {
    pub point: Point,
    /// `true` for points the outline passes through, `false` for bezier
    /// handles.
    pub on_curve: bool,
    /// Index of the command this point belongs to.
    pub command: usize,
    /// Which coordinate pair of that command this point is.
    pub key: PointKey,
    /// Set on the final on-curve point of each subpath.
    pub last_of_contour: bool,
}

const KEY_ORDER: [PointKey; 3] = [PointKey::Control1, PointKey::Control2, PointKey::Main];

/// Iterator over the [`ControlPoint`]s of an outline.
///
/// Lines and moves yield one on-curve point, quadratics one off-curve point
/// followed by one on-curve point, cubics two off-curve points followed by
/// one on-curve point. Closes yield nothing.
#[derive(Clone, Debug)]
pub struct ControlPoints<'a> {
    commands: &'a [PathCommand],
    index: usize,
    key: usize,
}

impl<'a> ControlPoints<'a> {
    pub fn new(outline: &'a Outline) -> Self {
        Self {
            commands: outline.commands(),
            index: 0,
            key: 0,
        }
    }

    fn ends_contour(&self, index: usize) -> bool {
        match self.commands[index + 1..]
            .iter()
            .find(|cmd| !matches!(cmd, PathCommand::Close))
        {
            None | Some(PathCommand::MoveTo { .. }) => true,
            Some(_) => false,
        }
    }
}

impl Iterator for ControlPoints<'_> {
    type Item = ControlPoint;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cmd = self.commands.get(self.index)?;
            while let Some(key) = KEY_ORDER.get(self.key).copied() {
                self.key += 1;
                if let Some(point) = cmd.point(key) {
                    let on_curve = key.is_on_curve();
                    return Some(ControlPoint {
                        point,
                        on_curve,
                        command: self.index,
                        key,
                        last_of_contour: on_curve && self.ends_contour(self.index),
                    });
                }
            }
            self.index += 1;
            self.key = 0;
        }
    }
}

impl Outline {
    /// Returns the editable points of this outline, in drawing order.
    ///
    /// The iterator is lazy; call again (or clone it) to start over.
    pub fn control_points(&self) -> ControlPoints<'_> {
        ControlPoints::new(self)
    }
}
