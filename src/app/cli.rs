use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Upload GNSS observation files and review their accuracy analyses
#[derive(Parser, Debug)]
#[command(name = "gnss_client")]
#[command(about = "Client for the GNSS accuracy analysis backend", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the configured base stations
    Stations,

    /// Upload an observation file and process it
    Upload {
        /// NMEA, RINEX or UBX file to upload
        file: PathBuf,

        /// Base station to reference the analysis against
        #[arg(long)]
        base_station: Option<String>,
    },

    /// Show all analysed datasets
    Dashboard,

    /// Show the full statistics of one dataset
    Details {
        /// Dataset identifier
        id: String,
    },

    /// Delete a dataset and its results
    Delete {
        /// Dataset identifier
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
