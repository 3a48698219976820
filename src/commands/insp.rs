//! Insp command
//!
//! Usage: rio insp <INPUT> [--mode r|r+]
//!
//! Opens a dataset and reads commands from the input until `quit` or EOF.

use clap::{Args, ValueEnum};
use itertools::Itertools;
use log::{info, warn};
use serde::Serialize;
use std::{
    io::{BufRead, Write},
    path::PathBuf,
    str::FromStr,
};

use crate::{
    commands::write_json,
    components::{reader::par_stats, BandStats, File, GdalFile},
    errors::{Result, RioError},
    Indexes,
};

pub const PROMPT: &str = ">>> ";

const HELP: &str = "\
commands:
  help                      show this message
  meta                      dataset metadata
  tags [NS]                 dataset tags of namespace NS
  band N                    description of band N
  stats [N ...]             statistics of bands, all when omitted
  bounds                    dataset bounds
  crs                       dataset crs
  sample X Y                band values at world coordinate X Y
  set-tag KEY VALUE [NS]    write a tag (mode r+ only)
  quit                      leave the session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Read only
    #[default]
    #[value(name = "r")]
    Read,
    /// Read and write
    #[value(name = "r+")]
    Update,
}

#[derive(Debug, Args)]
pub struct InspArgs {
    /// Input raster dataset
    pub input: PathBuf,

    /// Opening mode
    #[arg(short, long, value_enum, default_value_t = Mode::Read)]
    pub mode: Mode,
}

/// A line of the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Meta,
    Tags(String),
    Band(usize),
    Stats(Indexes),
    Bounds,
    Crs,
    Sample(f64, f64),
    SetTag {
        key: String,
        value: String,
        namespace: String,
    },
    Quit,
}

fn parse_arg<T: FromStr>(arg: Option<&str>, name: &str) -> Result<T> {
    let arg = arg.ok_or_else(|| RioError::InvalidCommand(format!("missing {name}")))?;
    arg.parse()
        .map_err(|_| RioError::InvalidCommand(format!("invalid {name}: {arg}")))
}

impl FromStr for Command {
    type Err = RioError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let command = match name {
            "help" | "?" => Command::Help,
            "meta" => Command::Meta,
            "tags" => Command::Tags(words.next().unwrap_or_default().to_string()),
            "band" => Command::Band(parse_arg(words.next(), "band index")?),
            "stats" => {
                let indexes: Vec<usize> = words
                    .by_ref()
                    .map(|word| parse_arg::<usize>(Some(word), "band index"))
                    .try_collect()?;
                if indexes.is_empty() {
                    Command::Stats(Indexes::all())
                } else {
                    Command::Stats(Indexes::from(indexes))
                }
            }
            "bounds" => Command::Bounds,
            "crs" => Command::Crs,
            "sample" => {
                let x = parse_arg(words.next(), "x")?;
                let y = parse_arg(words.next(), "y")?;
                Command::Sample(x, y)
            }
            "set-tag" => Command::SetTag {
                key: parse_arg(words.next(), "key")?,
                value: parse_arg(words.next(), "value")?,
                namespace: words.next().unwrap_or_default().to_string(),
            },
            "quit" | "exit" => Command::Quit,
            other => return Err(RioError::InvalidCommand(other.to_string())),
        };
        match words.next() {
            Some(extra) => Err(RioError::InvalidCommand(format!(
                "unexpected argument: {extra}"
            ))),
            None => Ok(command),
        }
    }
}

#[derive(Debug, Serialize)]
struct BandStatsReport {
    band: usize,
    #[serde(flatten)]
    stats: BandStats,
}

/// Interactive session over an open dataset.
pub struct Session<'a, F: File, W: Write> {
    file: F,
    out: &'a mut W,
}

impl<'a, F: File, W: Write> Session<'a, F, W> {
    pub fn new(file: F, out: &'a mut W) -> Self {
        Self { file, out }
    }

    fn banner(&mut self) -> Result<()> {
        let (width, height) = self.file.size();
        writeln!(
            self.out,
            "rio {} interactive inspector",
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(
            self.out,
            "{} ({}, {}x{}, {} band(s)), type \"help\" for commands",
            self.file.path().display(),
            self.file.driver(),
            width,
            height,
            self.file.num_bands()
        )?;
        Ok(())
    }

    /// Runs until `quit` or the end of `input`.
    ///
    /// Command errors are reported and the session goes on.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        self.banner()?;
        let mut lines = input.lines();
        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;
            let Some(line) = lines.next() else {
                writeln!(self.out)?;
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    if let Err(error) = self.dispatch(command) {
                        warn!("{line}: {error}");
                        writeln!(self.out, "error: {error}")?;
                    }
                }
                Err(error) => writeln!(self.out, "error: {error}")?,
            }
        }
        info!("leaving session on {}", self.file.path().display());
        Ok(())
    }

    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Meta => write_json(&mut *self.out, &self.file.metadata()?, Some(2))?,
            Command::Tags(namespace) => {
                write_json(&mut *self.out, &self.file.tags(&namespace, None)?, Some(2))?
            }
            Command::Band(index) => {
                write_json(&mut *self.out, &self.file.band_info(index)?, Some(2))?
            }
            Command::Stats(indexes) => {
                let readers = self.file.band_readers(&indexes)?;
                let reports: Vec<BandStatsReport> = par_stats(&readers)?
                    .into_iter()
                    .map(|(band, stats)| BandStatsReport { band, stats })
                    .collect();
                write_json(&mut *self.out, &reports, Some(2))?
            }
            Command::Bounds => writeln!(
                self.out,
                "{}",
                self.file.geo_bounds()?.to_array().iter().join(" ")
            )?,
            Command::Crs => writeln!(self.out, "{}", self.file.crs())?,
            Command::Sample(x, y) => {
                let values = self.sample(x, y)?;
                write_json(&mut *self.out, &values, None)?
            }
            Command::SetTag {
                key,
                value,
                namespace,
            } => {
                self.file.set_tag(&key, &value, &namespace)?;
                writeln!(self.out, "ok")?
            }
            Command::Quit => {}
        }
        Ok(())
    }

    /// Values of every band at world coordinate (x, y).
    fn sample(&self, x: f64, y: f64) -> Result<Vec<f64>> {
        let pixel = self.file.transform()?.world_to_pixel(x, y)?;
        let (width, height) = self.file.size();
        let (col, row) = (pixel.x.floor(), pixel.y.floor());
        if col < 0. || row < 0. || col >= width as f64 || row >= height as f64 {
            return Err(RioError::InvalidCommand(format!(
                "({x}, {y}) is outside the dataset"
            )));
        }
        self.file
            .band_readers(&Indexes::all())?
            .iter()
            .map(|reader| reader.read_pixel((col as usize, row as usize)))
            .collect()
    }
}

/// Execute insp command
pub fn execute<R: BufRead, W: Write>(args: InspArgs, input: R, out: &mut W) -> Result<()> {
    let file = match args.mode {
        Mode::Read => GdalFile::open(&args.input)?,
        Mode::Update => GdalFile::open_update(&args.input)?,
    };
    Session::new(file, out).run(input)
}
