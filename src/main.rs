use clap::Parser;
use kpk::cli::{Cli, Commands};
use kpk::prelude::*;

fn main() -> miette::Result<()> {
    init();

    let cli = Cli::parse();
    if let Some(level) = cli.log_level {
        set_log_level(level)?;
    }
    if cli.log_file {
        toggle_file_logging(true)?;
    }

    let span = span!(Level::DEBUG, "main");
    let _guard = span.enter();
    match cli.command {
        Commands::Generate { report } => {
            trace!("Generating table, report: {:?}", report);
            let bytes = generate();
            let stats = TableStats::collect(&KPK_TABLE);
            println!("generated {bytes} bytes");
            println!("{stats}");
            if let Some(path) = report {
                stats
                    .save_to_file(&path)
                    .with_context(|| format!("Writing report to {}", path.display()))?;
                info!("Report written to {}", path.display());
            }
        }
        Commands::Selfcheck { reference } => {
            trace!("Running self check, reference: {:?}", reference);
            let reference = match reference {
                Some(path) => ReferenceCounts::load_from_file(path)?,
                None => ReferenceCounts::default(),
            };
            let stats = TableStats::collect(&KPK_TABLE);
            println!("{stats}");
            miette::ensure!(
                stats.matches(&reference),
                "Self check failed, table counts differ from {reference:?}"
            );
            println!("self check passed");
        }
        Commands::Probe {
            side,
            white_king,
            white_pawn,
            black_king,
        } => {
            trace!("Probing {side} K{white_king} P{white_pawn} k{black_king}");
            let outcome = probe_checked(side, white_king, white_pawn, black_king)?;
            let value = probe(side, white_king, white_pawn, black_king);
            println!("{value:+} {outcome}");
        }
    }
    Ok(())
}
