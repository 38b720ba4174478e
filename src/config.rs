//! Command line and run configuration
//!
//! The command line is parsed by clap into [`Cli`] and then turned into an
//! explicit [`Config`] that is passed down to [`crate::run`]. Nothing here
//! is global.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// Errors in how the program was invoked
#[derive(Debug, Error)]
pub enum UsageError {
    /// A flag other than `-v`
    #[error("option {0} not understood")]
    UnknownOption(String),

    /// No edge file was named
    #[error("too few arguments")]
    TooFewArguments,

    /// The edge file could not be opened
    #[error("unable to open {} for reading: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other clap outcome, help output included
    #[error(transparent)]
    Cli(#[from] clap::Error),
}

/// Compute the minimum spanning tree of an edge file
#[derive(Parser, Debug)]
#[command(name = "prim", about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Print the author and version banner, then exit
    #[arg(short = 'v')]
    pub banner: bool,

    /// Edge file to read, or `-` for standard input
    #[arg(value_name = "FILE")]
    pub file: Option<String>,
}

/// Where the edge records come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl From<&str> for InputSource {
    fn from(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }
}

/// Everything a run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Edge file to read; `None` only when the banner was requested
    pub input: Option<InputSource>,
    pub show_banner: bool,
}

impl Config {
    /// Configuration reading from `input`
    pub fn new(input: InputSource) -> Self {
        Self {
            input: Some(input),
            show_banner: false,
        }
    }

    /// Parses a full argument list, program name first
    ///
    /// ```rust
    /// use prim_mst::config::{Config, InputSource};
    ///
    /// let config = Config::from_args(["prim", "-"]).unwrap();
    /// assert_eq!(config.input, Some(InputSource::Stdin));
    /// ```
    pub fn from_args<I, T>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).map_err(classify)?;
        Self::try_from(cli)
    }
}

impl TryFrom<Cli> for Config {
    type Error = UsageError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let input = cli.file.as_deref().map(InputSource::from);
        if input.is_none() && !cli.banner {
            return Err(UsageError::TooFewArguments);
        }
        Ok(Self {
            input,
            show_banner: cli.banner,
        })
    }
}

/// Maps clap's unknown-flag error onto ours; everything else passes through
fn classify(err: clap::Error) -> UsageError {
    if err.kind() == ErrorKind::UnknownArgument {
        if let Some(ContextValue::String(arg)) = err.get(ContextKind::InvalidArg) {
            if arg.starts_with('-') {
                return UsageError::UnknownOption(arg.clone());
            }
        }
    }
    UsageError::Cli(err)
}

/// Text printed by `-v`: name, version and authors
pub fn banner() -> String {
    format!(
        "{} {}: minimum spanning trees with Prim's algorithm\nWritten by {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS").replace(':', ", ")
    )
}
