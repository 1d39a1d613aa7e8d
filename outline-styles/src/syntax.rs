//! Human readable path syntax.
//!
//! Each command is written as its letter followed by its coordinates, all
//! separated by single spaces: `M x y`, `L x y`, `Q x1 y1 x y`,
//! `C x1 y1 x2 y2 x y` and `Z`.
//!
//! Without an explicit precision numbers use the shortest representation
//! that parses back to the same value, so `display -> parse` is lossless.
//! A precision (`format!("{:.2}", outline)`) rounds every coordinate for
//! display only.

use std::{fmt, str::FromStr};

use crate::{
    command::{Outline, PathCommand},
    error::OutlineError,
};

fn write_coords(f: &mut fmt::Formatter<'_>, letter: char, coords: &[f64]) -> fmt::Result {
    write!(f, "{letter}")?;
    for value in coords {
        match f.precision() {
            Some(prec) => write!(f, " {value:.prec$}")?,
            None => write!(f, " {value}")?,
        }
    }
    Ok(())
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.letter();
        match *self {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                write_coords(f, letter, &[x, y])
            }
            PathCommand::QuadTo { x1, y1, x, y } => write_coords(f, letter, &[x1, y1, x, y]),
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => write_coords(f, letter, &[x1, y1, x2, y2, x, y]),
            PathCommand::Close => write_coords(f, letter, &[]),
        }
    }
}

impl fmt::Display for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(cmd, f)?;
        }
        Ok(())
    }
}

impl FromStr for Outline {
    type Err = OutlineError;

    /// Parses path syntax. Commas are accepted as separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|tok| !tok.is_empty())
            .peekable();
        let mut commands = Vec::new();
        while let Some(token) = tokens.next() {
            let index = commands.len();
            let letter = match token.as_bytes() {
                [b] if b.is_ascii_alphabetic() => *b as char,
                _ => return Err(OutlineError::UnknownCommand(token.to_owned())),
            };
            let expected = match letter {
                'M' | 'L' => 2,
                'Q' => 4,
                'C' => 6,
                'Z' => 0,
                _ => return Err(OutlineError::UnknownCommand(token.to_owned())),
            };
            let mut coords = [0.0f64; 6];
            for (found, slot) in coords.iter_mut().take(expected).enumerate() {
                let malformed = OutlineError::MalformedCommand {
                    index,
                    command: letter,
                    expected,
                    found,
                };
                let Some(next) = tokens.peek() else {
                    return Err(malformed);
                };
                match next.parse::<f64>() {
                    Ok(value) => {
                        *slot = value;
                        tokens.next();
                    }
                    Err(_) if next.chars().all(|c| c.is_ascii_alphabetic()) => {
                        return Err(malformed)
                    }
                    Err(_) => return Err(OutlineError::InvalidNumber((*next).to_owned())),
                }
            }
            let [a, b, c, d, e, g] = coords;
            commands.push(match letter {
                'M' => PathCommand::MoveTo { x: a, y: b },
                'L' => PathCommand::LineTo { x: a, y: b },
                'Q' => PathCommand::QuadTo {
                    x1: a,
                    y1: b,
                    x: c,
                    y: d,
                },
                'C' => PathCommand::CubicTo {
                    x1: a,
                    y1: b,
                    x2: c,
                    y2: d,
                    x: e,
                    y: g,
                },
                _ => PathCommand::Close,
            });
        }
        let outline = Outline::from_commands(commands);
        outline.validate()?;
        Ok(outline)
    }
}
