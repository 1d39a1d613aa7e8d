use std::path::{Path, PathBuf};

use clap::Parser;
use kurbo::Point;
use outline_styles::{PointKey, Preset};
use rand::{rngs::StdRng, SeedableRng};
use restyle::{names::parse_assignment, Error, FontGlyphs, FontMetadata, GlyphEdit, NameField};

#[derive(Parser, Debug)]
#[command(about = "Apply geometric styles to the glyph outlines of a font")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// A named style.
#[derive(clap::ValueEnum, Copy, Clone, Debug)]
enum StyleArg {
    /// Grow each glyph about its center.
    Bold,
    /// Shrink each glyph about its center.
    Thin,
    /// Stretch horizontally.
    Wide,
    /// Squeeze horizontally.
    Condensed,
    /// Shear to the right.
    Italic,
    /// Replace curves with straight lines.
    Flatten,
    /// Snap points to a grid.
    Pixelate,
    /// Randomly displace every point.
    Jitter,
    /// Randomly displace curve handles only.
    Punk,
}

impl From<StyleArg> for Preset {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Bold => Preset::Bold,
            StyleArg::Thin => Preset::Thin,
            StyleArg::Wide => Preset::Wide,
            StyleArg::Condensed => Preset::Condensed,
            StyleArg::Italic => Preset::Italic,
            StyleArg::Flatten => Preset::Flatten,
            StyleArg::Pixelate => Preset::Pixelate,
            StyleArg::Jitter => Preset::Jitter,
            StyleArg::Punk => Preset::Punk,
        }
    }
}

/// Which coordinate pair of a command to move.
#[derive(clap::ValueEnum, Copy, Clone, Debug)]
enum KeyArg {
    /// The on-curve end point.
    Main,
    /// The first control point.
    C1,
    /// The second control point of a cubic.
    C2,
}

impl From<KeyArg> for PointKey {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::Main => PointKey::Main,
            KeyArg::C1 => PointKey::Control1,
            KeyArg::C2 => PointKey::Control2,
        }
    }
}

fn parse_point(text: &str) -> Result<Point, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected 'x,y', found '{text}'"))?;
    let coord = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate '{s}': {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

fn parse_name(text: &str) -> Result<(NameField, String), String> {
    parse_assignment(text).map_err(|e| e.to_string())
}

#[derive(clap::Subcommand, Debug)]
enum Change {
    /// Move one point of one command
    Point {
        /// Index of the command in the glyph's outline
        #[arg(short, long)]
        command: usize,
        #[arg(short, long, value_enum, default_value = "main")]
        key: KeyArg,
        /// The new position, as 'x,y'
        #[arg(short, long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Point,
    },
    /// Restyle this glyph only
    Style {
        #[arg(value_enum)]
        style: StyleArg,
        #[command(flatten)]
        options: StyleOptions,
    },
}

#[derive(clap::Args, Debug)]
struct StyleOptions {
    /// Overrides the style's strength: factor, angle, grid size or noise intensity
    #[arg(long)]
    amount: Option<f64>,
    /// Seed for the random styles, for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

impl StyleOptions {
    fn style(&self, arg: StyleArg) -> outline_styles::Style {
        let preset = Preset::from(arg);
        preset.style_with(self.amount.unwrap_or_else(|| preset.default_amount()))
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Restyle every glyph and write a new font
    Apply {
        /// The font to read
        font: PathBuf,
        /// Where to write the restyled font
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long, value_enum)]
        style: StyleArg,
        #[command(flatten)]
        options: StyleOptions,
    },
    /// Print the outline of one glyph in path syntax
    Path {
        font: PathBuf,
        #[arg(short, long)]
        gid: u32,
        /// Digits after the decimal point
        #[arg(short, long)]
        precision: Option<usize>,
        /// Restyle the glyph before printing it
        #[arg(short, long, value_enum)]
        style: Option<StyleArg>,
        #[command(flatten)]
        options: StyleOptions,
    },
    /// List the control points of one glyph
    Points {
        font: PathBuf,
        #[arg(short, long)]
        gid: u32,
    },
    /// Change one glyph and write a new font
    Edit {
        font: PathBuf,
        #[arg(short, long)]
        gid: u32,
        /// Where to write the edited font
        #[arg(short, long)]
        output: PathBuf,
        #[command(subcommand)]
        change: Change,
    },
    /// Print the descriptive strings of the name table, or rewrite them
    Names {
        font: PathBuf,
        /// A 'field=value' replacement, e.g. 'family=My Sans'
        #[arg(long = "set", value_parser = parse_name, requires = "output")]
        set: Vec<(NameField, String)>,
        /// Where to write the font with the new names
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args.command) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::Apply {
            font,
            output,
            style,
            options,
        } => {
            let data = read(&font)?;
            let style = options.style(style);
            let (compiled, report) = restyle::restyle_font(&data, &style, &mut options.rng())?;
            std::fs::write(&output, compiled)?;
            log::info!(
                "wrote {}: {} glyphs restyled, {} without outlines",
                output.display(),
                report.transformed,
                report.skipped
            );
        }
        Command::Path {
            font,
            gid,
            precision,
            style,
            options,
        } => {
            let data = read(&font)?;
            let glyphs = decode(&data)?;
            let mut outline = glyphs.get(gid)?.clone();
            if let Some(style) = style {
                let style = options.style(style);
                style.validate().map_err(outline_styles::BatchError::InvalidStyle)?;
                outline = style.apply_with_rng(&outline, &mut options.rng());
            }
            match precision {
                Some(precision) => println!("{outline:.precision$}"),
                None => println!("{outline}"),
            }
        }
        Command::Points { font, gid } => {
            let data = read(&font)?;
            let glyphs = decode(&data)?;
            for pt in glyphs.get(gid)?.control_points() {
                println!(
                    "{:>4} {:<4} {:>8} {:>8} {}{}",
                    pt.command,
                    pt.key.to_string(),
                    pt.point.x,
                    pt.point.y,
                    if pt.on_curve { "on" } else { "off" },
                    if pt.last_of_contour { " end" } else { "" },
                );
            }
        }
        Command::Edit {
            font,
            gid,
            output,
            change,
        } => {
            let data = read(&font)?;
            let (edit, mut rng) = match change {
                Change::Point { command, key, to } => (
                    GlyphEdit::MovePoint {
                        command,
                        key: key.into(),
                        to,
                    },
                    StdRng::seed_from_u64(0),
                ),
                Change::Style { style, options } => {
                    (GlyphEdit::Restyle(options.style(style)), options.rng())
                }
            };
            let compiled = restyle::edit_glyph(&data, gid, &edit, &mut rng)?;
            std::fs::write(&output, compiled)?;
            log::info!("wrote {}", output.display());
        }
        Command::Names { font, set, output } => {
            let data = read(&font)?;
            match output {
                Some(output) => {
                    let source =
                        write_fonts::read::FontRef::new(&data).map_err(Error::ReadTables)?;
                    std::fs::write(&output, restyle::set_names(&source, &set)?)?;
                    log::info!("wrote {} with {} names changed", output.display(), set.len());
                }
                None => {
                    let font = skrifa::FontRef::new(&data).map_err(Error::Read)?;
                    print!("{}", FontMetadata::from_font(&font));
                }
            }
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<Vec<u8>, Error> {
    log::debug!("reading {}", path.display());
    Ok(std::fs::read(path)?)
}

fn decode(data: &[u8]) -> Result<FontGlyphs, Error> {
    let font = skrifa::FontRef::new(data).map_err(Error::Read)?;
    FontGlyphs::decode(&font)
}
