//! Command-line interface definitions for Courtside.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the Courtside application.
///
/// # Examples
///
/// ```sh
/// # Top 4 teams, next 7 days
/// courtside
///
/// # Top 10 teams over the next 3 days, also written as JSON
/// courtside --top 10 --days 3 --json-out report.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// How many top-ranked teams to report on
    #[arg(short = 'n', long, default_value_t = 4)]
    pub top: usize,

    /// Length of the schedule window in days, starting today
    #[arg(short, long, default_value_t = 7)]
    pub days: u32,

    /// Maximum number of article candidates fetched for validation
    #[arg(long, default_value_t = 12)]
    pub probe_limit: usize,

    /// Optional path to also write the report as JSON
    #[arg(long)]
    pub json_out: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(&["courtside"]);
        assert_eq!(cli.top, 4);
        assert_eq!(cli.days, 7);
        assert_eq!(cli.probe_limit, 12);
        assert!(cli.json_out.is_none());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(&[
            "courtside",
            "-n",
            "10",
            "--days",
            "3",
            "--json-out",
            "/tmp/report.json",
        ]);
        assert_eq!(cli.top, 10);
        assert_eq!(cli.days, 3);
        assert_eq!(cli.json_out.as_deref(), Some("/tmp/report.json"));
    }
}
