use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;

use crate::prelude::{FromStr, Side, Square};

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), version = env!("APP_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Console log level [default: RUST_LOG, else info]
    #[arg(short, long, global = true)]
    pub log_level: Option<Level>,

    /// Also write debug logs to /tmp/kpk_logs
    #[arg(long, global = true, default_value = "false")]
    pub log_file: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the table and print its statistics
    #[clap(visible_alias = "g")]
    Generate {
        /// Write the statistics to a TOML file
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Build the table and compare its counts with the reference totals
    #[clap(visible_alias = "s")]
    Selfcheck {
        /// TOML file with reference counts [default: Edwards 1996]
        #[arg(short, long)]
        reference: Option<PathBuf>,
    },

    /// Look up a single position, e.g. `probe w e1 e2 e8`
    #[clap(visible_alias = "p")]
    Probe {
        /// Side to move: w, white, b or black
        #[arg(value_parser = parse_side)]
        side: Side,
        /// White king square
        #[arg(value_parser = parse_square)]
        white_king: Square,
        /// White pawn square
        #[arg(value_parser = parse_square)]
        white_pawn: Square,
        /// Black king square
        #[arg(value_parser = parse_square)]
        black_king: Square,
    },
}

fn parse_side(s: &str) -> Result<Side, String> {
    Side::from_str(s).map_err(|e| e.to_string())
}

fn parse_square(s: &str) -> Result<Square, String> {
    Square::from_str(s).map_err(|e| e.to_string())
}
