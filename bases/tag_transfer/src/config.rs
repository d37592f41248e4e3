use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use track_record::LengthFormat;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--jobs must be at least 1")]
    ZeroJobs,

    #[error("export needs at least one MP3 directory followed by the CSV table")]
    MissingExportPaths,
}

/// Tag transfer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Log at debug level unless RUST_LOG overrides it
    pub verbose: bool,

    pub task: Task,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Export(ExportConfig),
    Import(ImportConfig),
    Index(IndexConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub mp3_dirs: Vec<PathBuf>,
    pub csv: PathBuf,
    pub length_format: LengthFormat,
    pub jobs: NonZeroUsize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub csv: PathBuf,
    pub mp3_dir: PathBuf,
    pub jobs: NonZeroUsize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    pub inputs: Vec<PathBuf>,
    /// JSON object of genre name to acronym; the built-in table when unset
    pub acronyms: Option<PathBuf>,
    pub output: PathBuf,
}

/// Copy ID3 metadata between MP3 files and CSV tables
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Read tags from every MP3 under the given directories and append them to a CSV table
    Export {
        /// How the length column is written
        #[arg(long, value_enum, default_value_t = LengthArg::Seconds)]
        length_format: LengthArg,

        /// Files processed in parallel (defaults to the number of cores)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// One or more MP3 directories, then the CSV table
        #[arg(num_args = 2.., required = true)]
        paths: Vec<PathBuf>,
    },

    /// Write the rows of a CSV table back into the MP3 files they name
    Import {
        /// Files processed in parallel (defaults to the number of cores)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Table to read
        csv: PathBuf,

        /// Directory holding the files named in the table
        mp3_dir: PathBuf,
    },

    /// Combine CSV tables into one JSON index keyed by genre acronym
    Index {
        /// JSON object mapping genre names to acronyms
        #[arg(long)]
        acronyms: Option<PathBuf>,

        /// Where to write the index (defaults to mp3-metadata.json beside the first input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// CSV files or directories of CSV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthArg {
    /// Whole seconds
    Seconds,
    /// Minutes and seconds
    #[value(name = "mm:ss")]
    MinutesSeconds,
}

impl From<LengthArg> for LengthFormat {
    fn from(arg: LengthArg) -> Self {
        match arg {
            LengthArg::Seconds => LengthFormat::Seconds,
            LengthArg::MinutesSeconds => LengthFormat::MinutesSeconds,
        }
    }
}

impl Config {
    /// Create configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let task = match args.command {
            Command::Export {
                length_format,
                jobs,
                mut paths,
            } => {
                let csv = paths.pop().ok_or(ConfigError::MissingExportPaths)?;
                if paths.is_empty() {
                    return Err(ConfigError::MissingExportPaths);
                }
                Task::Export(ExportConfig {
                    mp3_dirs: paths,
                    csv,
                    length_format: length_format.into(),
                    jobs: resolve_jobs(jobs)?,
                })
            }
            Command::Import { jobs, csv, mp3_dir } => Task::Import(ImportConfig {
                csv,
                mp3_dir,
                jobs: resolve_jobs(jobs)?,
            }),
            Command::Index {
                acronyms,
                output,
                inputs,
            } => {
                let output =
                    output.unwrap_or_else(|| metadata_table::default_index_path(&inputs));
                Task::Index(IndexConfig {
                    inputs,
                    acronyms,
                    output,
                })
            }
        };

        Ok(Self {
            verbose: args.verbose,
            task,
        })
    }

    /// Log filter used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "tag_transfer=debug,id3_metadata=debug,metadata_table=debug"
        } else {
            "tag_transfer=info,id3_metadata=info,metadata_table=info"
        }
    }
}

fn resolve_jobs(jobs: Option<usize>) -> Result<NonZeroUsize, ConfigError> {
    match jobs {
        Some(n) => NonZeroUsize::new(n).ok_or(ConfigError::ZeroJobs),
        None => Ok(std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)),
    }
}
