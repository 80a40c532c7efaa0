//! dotforge's main application entry point and orchestration logic.
//! Handles command-line argument parsing, the import pipeline flow, and
//! the final run report.

use dotforge::{
    cli::{get_args, Command, ImportArgs},
    error::{default_error_handler, Result},
    logger::init_logger,
    vars::{load_vars, write_vars},
    walker::{ImportOptions, Importer},
};
use log::info;

/// Main application entry point.
fn main() {
    let args = get_args();

    let result = match args.command {
        Command::Import(opts) => {
            init_logger(opts.verbose);
            run_import(opts)
        }
    };

    if let Err(err) = result {
        default_error_handler(err);
    }
}

/// Runs the import pipeline and prints the run report.
///
/// # Flow
/// 1. Loads the optional variable table (fatal if present but invalid)
/// 2. Walks the source tree, writing or reporting the destination tree
/// 3. Re-emits the variable table at the destination root
/// 4. Prints the counters; per-entry errors are reported, not fatal
fn run_import(args: ImportArgs) -> Result<()> {
    let vars = match &args.data {
        Some(path) => Some(load_vars(path)?),
        None => None,
    };

    let importer = Importer::new(ImportOptions {
        source_dir: args.source_dir.clone(),
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
    })?;
    let stats = importer.run()?;

    if let Some(table) = &vars {
        if args.dry_run {
            info!("would write {} variables to the destination root", table.len());
        } else {
            let path = write_vars(table, &args.output_dir)?;
            info!("wrote variable table '{}'", path.display());
        }
    }

    println!(
        "Imported {} files ({} templates) and {} directories into '{}'.",
        stats.files,
        stats.templates,
        stats.dirs,
        args.output_dir.display()
    );
    println!("Skipped {} reserved entries; {} errors.", stats.skipped, stats.errors);
    if args.dry_run {
        println!("Dry run: nothing was written.");
    }

    Ok(())
}
