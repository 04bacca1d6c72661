//! Contains structures and functionality for the binary
use std::path::PathBuf;

use clap::ArgAction;
use tally::config::{AggregationConfig, AggregationSpec};

use crate::error::CliError;

/// Cli Arguments related to logging
#[derive(clap::Args, Debug)]
pub(crate) struct LoggingArgs {
    /// Increase log verbosity (multiple uses increase verbosity further)
    #[arg(short, long, action = ArgAction::Count, group = "verbosity")]
    verbose: u8,
    /// Reduce log verbosity to show only errors (equivalent to --log error)
    #[arg(short, long, group = "verbosity")]
    quiet: bool,
    /// Set log verbosity (default is "warn")
    #[arg(long = "log", value_parser=clap::builder::PossibleValuesParser::new(["error", "warn", "info", "debug", "trace"]), group = "verbosity")]
    log_level: Option<String>,
}

impl LoggingArgs {
    /// Initialising Logging
    ///
    /// Sets the logging verbosity to the given log-level in the following order:
    ///  * `Info`, `Debug`, `Trace`; depending on the count of `-v`
    ///  * `Error` when `-q` is used
    ///  * The `TALLY_LOG` environment variable value
    ///  * `Warn` otherwise
    pub(crate) fn initialize_logging(&self) {
        let mut builder = env_logger::Builder::new();

        // Default log level
        builder.filter_level(log::LevelFilter::Warn);

        builder.parse_env("TALLY_LOG");
        if let Some(ref level) = self.log_level {
            builder.parse_filters(level);
        } else if self.quiet {
            builder.filter_level(log::LevelFilter::Error);
        } else if self.verbose > 0 {
            builder.filter_level(match self.verbose {
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                3 => log::LevelFilter::Trace,
                _ => log::LevelFilter::Warn,
            });
        }
        builder.init();
    }
}

/// Cli arguments related to file input and output
#[derive(Debug, clap::Args)]
pub(crate) struct FormatArgs {
    /// Field delimiter of the input and output files
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,
    /// Field content that denotes a missing value
    #[arg(long = "missing", default_value = "")]
    pub(crate) missing_token: String,
    /// File for the aggregated table (printed to stdout if omitted)
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
    /// File for the grand totals (printed to stdout if omitted)
    #[arg(long = "totals-output")]
    pub(crate) totals_output: Option<PathBuf>,
}

impl FormatArgs {
    /// Returns the delimiter as a single byte.
    pub(crate) fn delimiter(&self) -> Result<u8, CliError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(CliError::InvalidDelimiter {
                delimiter: self.delimiter,
            })
    }
}

/// Tally CLI
#[derive(clap::Parser, Debug)]
#[command(author, version, about)]
pub struct CliApp {
    /// Delimiter-separated input file with a header line
    #[arg(value_parser)]
    pub(crate) input: PathBuf,
    /// Column whose values form the groups
    #[arg(short, long = "group-by")]
    pub(crate) group_by: Option<String>,
    /// Aggregation as FUNCTION:COLUMN with FUNCTION one of sum, average, count, min, max;
    /// may be given multiple times
    #[arg(short, long = "aggregate", action = ArgAction::Append, required_unless_present = "list_columns")]
    pub(crate) aggregates: Vec<String>,
    /// Weight column applied to every aggregation
    #[arg(short, long)]
    pub(crate) weight: Option<String>,
    /// Compute the grand total over all groups as a separate table
    #[arg(short, long)]
    pub(crate) totals: bool,
    /// Print the columns that can be aggregated or used as weight, then exit
    #[arg(long = "list-columns")]
    pub(crate) list_columns: bool,
    /// Arguments related to input and output
    #[command(flatten)]
    pub(crate) format: FormatArgs,
    /// Arguments related to logging
    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}

impl CliApp {
    /// Builds the [AggregationConfig] described by the arguments.
    pub(crate) fn config(&self) -> Result<AggregationConfig, CliError> {
        let mut config = AggregationConfig::new().grand_totals(self.totals);

        if let Some(column) = &self.group_by {
            config = config.group_by(column);
        }

        for argument in &self.aggregates {
            let mut spec: AggregationSpec =
                argument.parse().map_err(|_| CliError::InvalidAggregate {
                    argument: argument.clone(),
                })?;

            if let Some(weight) = &self.weight {
                spec = spec.weighted_by(weight);
            }

            config = config.aggregate(spec);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::CliApp;
    use crate::error::CliError;
    use clap::Parser;
    use tally::config::{AggregationConfig, AggregationSpec};
    use test_log::test;

    #[test]
    fn config_from_arguments() {
        let cli = CliApp::parse_from([
            "tly", "data.csv", "-g", "region", "-a", "sum:price", "-a", "mean:price", "-w",
            "units", "-t",
        ]);

        assert_eq!(
            cli.config().unwrap(),
            AggregationConfig::new()
                .group_by("region")
                .aggregate(AggregationSpec::sum("price").weighted_by("units"))
                .aggregate(AggregationSpec::average("price").weighted_by("units"))
                .grand_totals(true)
        );
    }

    #[test]
    fn invalid_aggregate() {
        let cli = CliApp::parse_from(["tly", "data.csv", "-a", "median:price"]);

        assert!(matches!(
            cli.config(),
            Err(CliError::InvalidAggregate { argument }) if argument == "median:price"
        ));
    }

    #[test]
    fn delimiter() {
        let cli = CliApp::parse_from(["tly", "data.csv", "-a", "sum:x", "-d", ";"]);
        assert_eq!(cli.format.delimiter().unwrap(), b';');

        let cli = CliApp::parse_from(["tly", "data.csv", "-a", "sum:x", "-d", "§"]);
        assert!(cli.format.delimiter().is_err());
    }

    #[test]
    fn aggregate_is_required() {
        assert!(CliApp::try_parse_from(["tly", "data.csv"]).is_err());
        assert!(CliApp::try_parse_from(["tly", "data.csv", "--list-columns"]).is_ok());
    }
}
