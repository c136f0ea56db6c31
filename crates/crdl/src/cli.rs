use std::ffi::OsString;

use clap::Parser;
use clap::error::ErrorKind;

pub const USAGE: &str = "Usage: crdl <version>";

#[derive(Clone, Debug, Parser)]
#[command(name = "crdl", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Chromium milestone, e.g. 119
    #[arg(id = "milestone", value_name = "VERSION")]
    pub version: String,
}

/// Parse arguments. `None` means anything other than exactly one positional
/// was given; `--help` and `--version` print and exit here.
pub fn parse_from<I, T>(args: I) -> Option<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Some(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => None,
    }
}
