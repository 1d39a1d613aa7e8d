//! Errors produced while building, editing or batch transforming outlines.

use thiserror::Error;

use crate::command::PointKey;

/// An outline or transform parameter was not usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutlineError {
    /// A command lacks coordinates its segment type requires.
    #[error("'{command}' at command {index} expects {expected} coordinates, found {found}")]
    MalformedCommand {
        index: usize,
        command: char,
        expected: usize,
        found: usize,
    },

    #[error("unknown path command '{0}'")]
    UnknownCommand(String),

    #[error("invalid coordinate '{0}'")]
    InvalidNumber(String),

    /// A drawing command appears before any move.
    #[error("subpath at command {0} does not begin with a move")]
    MissingMove(usize),

    #[error("command {index} has no {key} point")]
    NoSuchPoint { index: usize, key: PointKey },

    #[error("invalid parameter for {style}: {reason}")]
    InvalidParameter {
        style: &'static str,
        reason: &'static str,
    },
}

/// A batch run stopped early.
///
/// Glyphs before the failing one have already been written back.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The style's parameters were rejected before any glyph was touched.
    #[error("invalid style: {0}")]
    InvalidStyle(#[source] OutlineError),

    #[error("transforming glyph {glyph} failed: {source}")]
    Transform {
        glyph: usize,
        #[source]
        source: OutlineError,
    },

    #[error("writing back glyph {glyph} failed: {source}")]
    WriteBack {
        glyph: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl BatchError {
    /// The index of the glyph that failed, if the run got that far.
    pub fn glyph(&self) -> Option<usize> {
        match self {
            BatchError::InvalidStyle(_) => None,
            BatchError::Transform { glyph, .. } | BatchError::WriteBack { glyph, .. } => {
                Some(*glyph)
            }
        }
    }
}
