//! Command-line interface of the `cpe2csv` binary.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{ConvertConfig, ConvertConfigBuilder};
use crate::core::ConvertError;

#[derive(Parser, Debug)]
#[command(name = "cpe2csv")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert SUNAT electronic tax documents (UBL 2.1 XML) to CSV reports")]
#[command(after_help = "EXAMPLES:\n  \
    cpe2csv comprobantes/\n  \
    cpe2csv comprobantes/ --output_dir reportes --delimiter ';'\n  \
    cpe2csv comprobantes/ --config cpe2csv.toml -v")]
pub struct Cli {
    /// Directory containing the XML (and ZIP) files to convert
    pub input_dir: PathBuf,

    /// Directory for the CSV reports [default: output]
    #[arg(long = "output_dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory for the process log file [default: logs]
    #[arg(long = "log_dir", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// CSV field delimiter [default: ,]
    #[arg(long, value_name = "C")]
    pub delimiter: Option<char>,

    /// Do not read XML documents inside ZIP archives
    #[arg(long = "no_zip")]
    pub no_zip: bool,

    /// Only convert files directly inside the input directory
    #[arg(long = "no_recursive")]
    pub no_recursive: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Resolve the run configuration: defaults, then the config file, then
    /// the flags given on the command line.
    pub fn resolve_config(&self) -> Result<ConvertConfig, ConvertError> {
        let base = match &self.config {
            Some(path) => ConvertConfig::load_from_file(path)?,
            None => ConvertConfig::default(),
        };

        let mut builder = ConvertConfigBuilder::from_config(base);
        if let Some(dir) = &self.output_dir {
            builder = builder.output_dir(dir.clone());
        }
        if let Some(dir) = &self.log_dir {
            builder = builder.log_dir(dir.clone());
        }
        if let Some(delimiter) = self.delimiter {
            builder = builder.delimiter(delimiter);
        }
        if self.no_zip {
            builder = builder.include_zip_archives(false);
        }
        if self.no_recursive {
            builder = builder.recursive(false);
        }
        builder.build()
    }

    /// Default tracing directive for the crate when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> &'static str {
        if self.quiet {
            return "cpe2csv=warn";
        }
        match self.verbose {
            0 => "cpe2csv=info",
            1 => "cpe2csv=debug",
            _ => "cpe2csv=trace",
        }
    }
}
