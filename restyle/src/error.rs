//! Errors for the restyle tool.

use outline_styles::{BatchError, OutlineError};
use skrifa::outline::DrawError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error reading font data: {0}")]
    Read(skrifa::raw::ReadError),

    #[error("Error reading font tables: {0}")]
    ReadTables(write_fonts::read::ReadError),

    #[error("Failed to draw glyph {glyph}: {reason}")]
    Draw { glyph: u32, reason: DrawError },

    #[error("Invalid glyph id {0}")]
    InvalidGid(u32),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Outline(#[from] OutlineError),

    #[error("Unknown name field '{0}'")]
    UnknownNameField(String),

    #[error("Compiling '{table}' failed: {reason}")]
    Compile { table: &'static str, reason: String },

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An outline that cannot be stored as a TrueType simple glyph.
#[derive(Debug, Error)]
#[error("glyph {glyph} cannot be written to glyf: {reason}")]
pub struct EncodeError {
    pub glyph: usize,
    pub reason: String,
}
