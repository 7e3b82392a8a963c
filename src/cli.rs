//! Argument parsing via clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, crate_description, crate_name, crate_version};

const ABOUT: &str = "netspeed calculates KiB in/out per second and optionally writes the output to a JSON file.";

/// The arguments for netspeed.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = crate_name!(),
    version = crate_version!(),
    about = ABOUT,
    long_about = crate_description!(),
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(
        short = 'i',
        long,
        value_name = "NAME",
        help = "The name of the network interface to use, e.g. en0."
    )]
    pub interface: Option<String>,

    #[arg(
        short = 'a',
        long,
        conflicts_with = "interface",
        help = "Report every interface in bytes instead of a single one in KiB."
    )]
    pub all: bool,

    #[arg(
        short = 'o',
        long,
        value_name = "PATH",
        help = "Location of the JSON output file; output will not be written to screen."
    )]
    pub outfile: Option<PathBuf>,

    #[arg(short = 'l', long, help = "Display a list of interfaces and exit.")]
    pub list: bool,

    #[arg(
        long,
        value_name = "PATH",
        global = true,
        help = "Location of the pidfile. Defaults to ~/.netspeed.pid."
    )]
    pub pidfile: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Stop the running netspeed instance.
    Stop,
}
