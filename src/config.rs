use clap::Parser;
use serde::Serialize;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::*;
use crate::fetch::Source;
use crate::history::HistoryRecorder;

#[derive(Parser, Debug, Clone)]
#[command(name = "covid19_watch")]
#[command(about = "Grab and process the latest COVID-19 data")]
#[command(after_help = "E.g.: covid19_watch -i 600 -c")]
pub struct Cli {
    /// Interval in seconds between retrieving the data again
    #[arg(short, long, default_value_t = DEFAULT_INTERVAL)]
    pub interval: u64,

    /// View the record of all changes in a continuously running loop
    #[arg(short, long)]
    pub stored: bool,

    /// Compact display to fit smaller terminals
    #[arg(short, long)]
    pub compact: bool,

    /// Publish the report whenever it changes
    #[arg(short, long)]
    pub tweet: bool,

    /// Publish the report once, immediately, then exit (also `-ft`)
    #[arg(long = "force_tweet")]
    pub force_tweet: bool,

    /// Bypass safety rails
    #[arg(short, long)]
    pub force: bool,

    /// Print fetched data and the parsed options
    #[arg(short, long)]
    pub verbose: bool,

    /// Run against the local test files (also `-test`)
    #[arg(long)]
    pub test: bool,

    #[arg(long, env = "COVID19_DEATHS_URL", default_value = DEATHS_URL)]
    pub deaths_url: String,

    #[arg(long, env = "COVID19_CONFIRMED_URL", default_value = CONFIRMED_URL)]
    pub confirmed_url: String,

    /// Defaults to covid19_history.dat in the home directory
    #[arg(long, env = "COVID19_HISTORY_FILE")]
    pub history_file: Option<PathBuf>,
}

/// Rewrite the multi-letter short flags clap can't express, so `-ft` is not
/// read as `-f -t`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some("-ft") => OsString::from("--force_tweet"),
            Some("-test") => OsString::from("--test"),
            _ => arg,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub interval: u64,
    pub stored: bool,
    pub compact: bool,
    pub tweet: bool,
    pub force_tweet: bool,
    pub force: bool,
    pub verbose: bool,
    pub test: bool,
    pub deaths: Source,
    pub confirmed: Source,
    pub history_file: PathBuf,
}

impl Settings {
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let cli = Cli::try_parse_from(normalize_args(args))?;
        Ok(Settings::from(cli))
    }

    /// Whether a real broadcast channel is needed.
    pub fn publishes(&self) -> bool {
        self.tweet || self.force_tweet
    }

    /// Sleep before the next poll.
    pub fn next_interval(&self, confirmed: u64, deaths: u64) -> Duration {
        let secs = if self.test {
            TEST_INTERVAL
        } else if confirmed == 0 || deaths == 0 {
            ERROR_INTERVAL
        } else {
            self.interval
        };
        Duration::from_secs(secs)
    }
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        let (deaths, confirmed) = if cli.test {
            (
                Source::Local(PathBuf::from(DEATHS_FIXTURE)),
                Source::Local(PathBuf::from(CONFIRMED_FIXTURE)),
            )
        } else {
            (
                Source::Remote(cli.deaths_url),
                Source::Remote(cli.confirmed_url),
            )
        };
        Settings {
            interval: cli.interval,
            stored: cli.stored,
            compact: cli.compact,
            tweet: cli.tweet,
            force_tweet: cli.force_tweet,
            force: cli.force,
            verbose: cli.verbose,
            test: cli.test,
            deaths,
            confirmed,
            history_file: cli
                .history_file
                .unwrap_or_else(HistoryRecorder::default_path),
        }
    }
}
