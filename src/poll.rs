use chrono::prelude::*;
use colored::Colorize;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io;
use std::time::Duration;
use tokio::time::delay_for;
use tracing::{error, info, warn};

use crate::classify::{percent_died, round2, Baselines, Metric};
use crate::config::Settings;
use crate::constants::STORED_INTERVAL;
use crate::error::Result;
use crate::fetch::MetricFetcher;
use crate::history::HistoryRecorder;
use crate::notify::Notifier;
use crate::report::{self, Reading, Report};

/// What one fetch/classify/report pass did.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub report: Report,
    pub text: String,
    pub recorded: bool,
    pub published: bool,
    pub next_interval: Duration,
    pub exit: bool,
}

pub struct PollLoop<F> {
    settings: Settings,
    fetcher: F,
    notifier: Option<Box<dyn Notifier>>,
    history: HistoryRecorder,
    baselines: Baselines,
}

impl<F: MetricFetcher> PollLoop<F> {
    pub fn new(settings: Settings, fetcher: F, notifier: Option<Box<dyn Notifier>>) -> Self {
        let history = HistoryRecorder::new(settings.history_file.clone());
        PollLoop {
            settings,
            fetcher,
            notifier,
            history,
            baselines: Baselines::new(),
        }
    }

    pub fn baselines(&self) -> &Baselines {
        &self.baselines
    }

    /// Poll until killed, or once when a forced publish was requested.
    ///
    /// Fetch and history failures end the loop: the error is printed and
    /// returned rather than retried.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let outcome = match self.cycle().await {
                Ok(outcome) => outcome,
                Err(e) => {
                    eprintln!("{}", "Exception caught:".red().bold());
                    eprintln!("{:?}", e);
                    error!(error = %e, "poll cycle failed");
                    return Err(e);
                }
            };
            if outcome.exit {
                info!("forced publish done, exiting");
                return Ok(());
            }
            info!(secs = outcome.next_interval.as_secs(), "sleeping");
            delay_for(outcome.next_interval).await;
        }
    }

    pub async fn cycle(&mut self) -> Result<CycleOutcome> {
        let timestamp = Local::now();

        let deaths = self.fetcher.fetch_total(&self.settings.deaths).await?;
        let confirmed = self.fetcher.fetch_total(&self.settings.confirmed).await?;
        let percent = round2(percent_died(deaths, confirmed));

        let report = Report {
            timestamp,
            interval_secs: self.settings.interval,
            test_data: self.settings.test,
            confirmed: Reading {
                value: confirmed as f64,
                classification: self.baselines.classify(Metric::Confirmed, confirmed as f64),
            },
            deaths: Reading {
                value: deaths as f64,
                classification: self.baselines.classify(Metric::Deaths, deaths as f64),
            },
            percent_died: Reading {
                value: percent,
                classification: self.baselines.classify(Metric::PercentDied, percent),
            },
        };
        info!(confirmed, deaths, percent, changed = report.any_changed(), "polled");

        let text = report::render(&report, self.settings.compact);
        report::print_report(&report, self.settings.compact);

        let mut recorded = false;
        let mut published = false;
        if report.any_changed() && report.is_valid() && !self.settings.test {
            self.history.append(&text).await?;
            recorded = true;
            if self.settings.tweet && !self.settings.force_tweet {
                published = self.publish(&text).await;
            }
        }

        if self.settings.force_tweet {
            published = self.publish(&text).await;
        }

        Ok(CycleOutcome {
            next_interval: self.settings.next_interval(confirmed, deaths),
            exit: self.settings.force_tweet,
            report,
            text,
            recorded,
            published,
        })
    }

    async fn publish(&self, text: &str) -> bool {
        let notifier = match &self.notifier {
            Some(notifier) => notifier,
            None => {
                warn!("publishing requested but no notifier is configured");
                return false;
            }
        };
        match notifier.publish(text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "publish failed, continuing");
                false
            }
        }
    }
}

pub fn banner(description: &str) -> String {
    let stars = "*".repeat(description.chars().count().min(200));
    format!("\n\n{}\n{}\n{}\n", stars, description, stars)
}

pub fn print_banner(description: &str) {
    println!("{}", banner(description));
}

/// One screen of the stored display. Test runs never touch the real log.
pub async fn stored_page(history: &HistoryRecorder, test: bool) -> Result<String> {
    let mut page = banner("Historical Data, five minute loop:");
    if test {
        return Ok(page);
    }
    let contents = history.replay().await?;
    if !contents.is_empty() {
        page += "\n";
        page += &contents;
    }
    Ok(page)
}

/// Read-only monitoring: reprint the history log every five minutes.
pub async fn display_stored(history: &HistoryRecorder, test: bool) -> Result<()> {
    loop {
        let page = stored_page(history, test).await?;
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        println!("{}", page);
        delay_for(Duration::from_secs(STORED_INTERVAL)).await;
    }
}
