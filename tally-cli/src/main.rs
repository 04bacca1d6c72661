/*!
  Binary for the CLI of tally: tly
*/

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences
)]

pub mod cli;
pub mod error;

use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};

use clap::Parser;
use cli::CliApp;
use colored::Colorize;
use error::CliError;
use tally::{
    classifier::{aggregatable_columns, weight_candidates},
    engine::AggregationEngine,
    error::Error,
    io::{DsvReader, DsvWriter},
    table::{ColumnSpec, Schema, Table},
};

fn join_names(columns: &[&ColumnSpec]) -> String {
    columns
        .iter()
        .map(|column| column.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_columns(schema: &Schema) {
    println!(
        "{} {}",
        "Aggregatable columns:".bold(),
        join_names(&aggregatable_columns(schema))
    );
    println!(
        "{} {}",
        "Weight candidates:".bold(),
        join_names(&weight_candidates(schema))
    );
}

/// Writes `table` to the file at `path`, or to stdout if there is none.
fn write_table(
    table: &Table,
    path: Option<&Path>,
    delimiter: u8,
    missing_token: &str,
) -> Result<(), CliError> {
    match path {
        Some(path) => {
            log::info!("writing {}", path.display());
            let file = File::create(path).map_err(|error| Error::IoWriting {
                error,
                filename: path.display().to_string(),
            })?;

            let mut writer = DsvWriter::new(delimiter, file).missing_token(missing_token);
            writer.write_table(table)?;
            writer.into_inner()?;
        }
        None => {
            let mut writer =
                DsvWriter::new(delimiter, io::stdout().lock()).missing_token(missing_token);
            writer.write_table(table)?;
            writer.into_inner()?.flush()?;
        }
    }

    Ok(())
}

fn run(cli: CliApp) -> Result<(), CliError> {
    let delimiter = cli.format.delimiter()?;

    log::info!("Reading input ...");
    let table = DsvReader::new(delimiter)
        .missing_token(cli.format.missing_token.as_str())
        .read_file(&cli.input)?;

    if cli.list_columns {
        print_columns(table.schema());
        return Ok(());
    }

    let engine = AggregationEngine::new(cli.config()?);
    log::debug!("Configuration: {:?}", engine.config());

    let output = engine.execute_table(&table)?;

    let mut printed = false;
    if let Some(aggregated) = &output.aggregated {
        write_table(
            aggregated,
            cli.format.output.as_deref(),
            delimiter,
            &cli.format.missing_token,
        )?;
        printed = cli.format.output.is_none();
    }

    if let Some(totals) = &output.totals {
        if printed && cli.format.totals_output.is_none() {
            println!();
        }
        write_table(
            totals,
            cli.format.totals_output.as_deref(),
            delimiter,
            &cli.format.missing_token,
        )?;
    }

    Ok(())
}

fn main() {
    let cli = CliApp::parse();

    cli.logging.initialize_logging();
    log::info!("Version: {}", clap::crate_version!());
    log::debug!("Input file: {:?}", cli.input);

    run(cli).unwrap_or_else(|err| {
        eprintln!("{} {err}", "error:".red().bold());
        std::process::exit(1)
    })
}
