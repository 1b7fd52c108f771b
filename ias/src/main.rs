//! ias CLI - select an image area by color and trace its perimeter.
//!
//! Commands are applied to a single analyzer in the order they appear on
//! the command line, e.g.
//!
//! ```text
//! ias --image=photo.png --findRegion=120,80,30,40,200,12 --findPerimeter --savePixels=out.png
//! ```

use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};
use ias::{Color, FileDisplay, Point, RegionAnalyzer};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ias")]
#[command(about = "Select a color region from a seed pixel and extract its perimeter")]
#[command(version)]
struct Cli {
    /// Open the image at PATH.
    #[arg(long = "image", value_name = "PATH", action = ArgAction::Append)]
    image: Vec<PathBuf>,

    /// Find the region around pixel pX,pY whose color is within T of B,G,R.
    #[arg(long = "findRegion", value_name = "pX,pY,B,G,R,T", action = ArgAction::Append)]
    find_region: Vec<String>,

    /// Replace the result with the perimeter of the current region.
    #[arg(
        long = "findPerimeter",
        action = ArgAction::Append,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool),
        hide_possible_values = true
    )]
    find_perimeter: Vec<bool>,

    /// Replace the result with the smoothed perimeter of the current region.
    #[arg(
        long = "findSmoothPerimeter",
        action = ArgAction::Append,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool),
        hide_possible_values = true
    )]
    find_smooth_perimeter: Vec<bool>,

    /// Display the opened image.
    #[arg(
        long = "displayImage",
        action = ArgAction::Append,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool),
        hide_possible_values = true
    )]
    display_image: Vec<bool>,

    /// Display the result of the last find command.
    #[arg(
        long = "displayPixels",
        action = ArgAction::Append,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool),
        hide_possible_values = true
    )]
    display_pixels: Vec<bool>,

    /// Display the image and the result side by side.
    #[arg(
        long = "displayJoin",
        action = ArgAction::Append,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool),
        hide_possible_values = true
    )]
    display_join: Vec<bool>,

    /// Save the result of the last find command to PATH.
    #[arg(long = "savePixels", value_name = "PATH", action = ArgAction::Append)]
    save_pixels: Vec<PathBuf>,

    /// Append log output to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Directory that display commands write their previews to.
    #[arg(long, default_value = "ias-display")]
    display_dir: PathBuf,
}

/// One analyzer step, in command-line order.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Image(PathBuf),
    FindRegion(String),
    FindPerimeter,
    FindSmoothPerimeter,
    DisplayImage,
    DisplayPixels,
    DisplayJoin,
    SavePixels(PathBuf),
}

impl Cli {
    /// Commands sorted by their position on the command line.
    fn commands(&self, matches: &ArgMatches) -> Vec<Command> {
        let mut ordered = Vec::new();

        let values = |id: &str| matches.indices_of(id).into_iter().flatten();
        let flag = |id: &str, values: &[bool], command: Command, out: &mut Vec<(usize, Command)>| {
            for (index, &on) in matches.indices_of(id).into_iter().flatten().zip(values) {
                if on {
                    out.push((index, command.clone()));
                }
            }
        };

        for (index, path) in values("image").zip(&self.image) {
            ordered.push((index, Command::Image(path.clone())));
        }
        for (index, input) in values("find_region").zip(&self.find_region) {
            ordered.push((index, Command::FindRegion(input.clone())));
        }
        for (index, path) in values("save_pixels").zip(&self.save_pixels) {
            ordered.push((index, Command::SavePixels(path.clone())));
        }
        flag("find_perimeter", &self.find_perimeter, Command::FindPerimeter, &mut ordered);
        flag(
            "find_smooth_perimeter",
            &self.find_smooth_perimeter,
            Command::FindSmoothPerimeter,
            &mut ordered,
        );
        flag("display_image", &self.display_image, Command::DisplayImage, &mut ordered);
        flag("display_pixels", &self.display_pixels, Command::DisplayPixels, &mut ordered);
        flag("display_join", &self.display_join, Command::DisplayJoin, &mut ordered);

        ordered.sort_by_key(|(index, _)| *index);
        ordered.into_iter().map(|(_, command)| command).collect()
    }
}

/// Arguments of `--findRegion`: seed pixel, target color and tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RegionParams {
    seed: Point,
    color: Color,
    tolerance: u8,
}

#[derive(Debug, thiserror::Error)]
#[error("expected pX,pY,B,G,R,T but got '{0}'")]
struct RegionParamsError(String);

impl FromStr for RegionParams {
    type Err = RegionParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || RegionParamsError(s.to_string());
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, b, g, r, t] = fields.as_slice() else {
            return Err(err());
        };
        let coord = |v: &str| v.parse::<i32>().map_err(|_| err());
        let byte = |v: &str| v.parse::<u8>().map_err(|_| err());

        Ok(Self {
            seed: Point::new(coord(x)?, coord(y)?),
            color: Color::bgr(byte(b)?, byte(g)?, byte(r)?),
            tolerance: byte(t)?,
        })
    }
}

fn init_logging(log_file: Option<&Path>) -> CliResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> CliResult<()> {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    init_logging(cli.log_file.as_deref())?;

    let commands = cli.commands(&matches);
    if commands.is_empty() {
        tracing::error!("no parameters given");
        return Err("no parameters given, see --help".into());
    }

    let mut analyzer = RegionAnalyzer::new();
    let mut display = FileDisplay::new(&cli.display_dir);
    for command in commands {
        run_command(&mut analyzer, &mut display, command)?;
    }
    Ok(())
}

fn run_command(
    analyzer: &mut RegionAnalyzer,
    display: &mut FileDisplay,
    command: Command,
) -> CliResult<()> {
    match command {
        Command::Image(path) => {
            tracing::info!("loading image: {}", path.display());
            analyzer.load(&path).map_err(|e| -> CliError {
                tracing::error!("unable to load file: {}", path.display());
                format!("unable to load file {}: {}", path.display(), e).into()
            })?;
        }
        Command::FindRegion(input) => {
            let params: RegionParams = input.parse().map_err(|e| -> CliError {
                tracing::error!("unable to parse: {}", input);
                Box::new(e)
            })?;
            tracing::info!("calculating region: {}", input);
            analyzer.find_region(params.seed, params.color, params.tolerance);
            if analyzer.result().is_empty() {
                tracing::warn!("no region found");
            }
        }
        Command::FindPerimeter => {
            tracing::info!("calculating perimeter");
            analyzer.find_perimeter();
        }
        Command::FindSmoothPerimeter => {
            tracing::info!("calculating smooth perimeter");
            analyzer.find_smooth_perimeter();
        }
        Command::DisplayImage => {
            tracing::info!("displaying image");
            if !analyzer.display_image(display)? {
                tracing::warn!("no image to display");
            }
        }
        Command::DisplayPixels => {
            tracing::info!("displaying result");
            if !analyzer.display_result(display)? {
                tracing::warn!("no result to display");
            }
        }
        Command::DisplayJoin => {
            tracing::info!("displaying image and result side by side");
            if !analyzer.display_join(display)? {
                tracing::warn!("nothing to join");
            }
        }
        Command::SavePixels(path) => {
            tracing::info!("saving result to file: {}", path.display());
            if !analyzer.store_result(&path)? {
                tracing::warn!("result is empty, nothing saved");
            }
        }
    }
    Ok(())
}
