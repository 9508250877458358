use anyhow::{Context, Result};
use covid19_watch::fetch::CsvFetcher;
use covid19_watch::history::HistoryRecorder;
use covid19_watch::notify::{ConsoleNotifier, Notifier, TwilioCredentials, TwilioNotifier};
use covid19_watch::poll::{display_stored, print_banner, PollLoop};
use covid19_watch::Settings;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("covid19_watch={}", level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. parse args
    let settings = Settings::from_args(env::args_os()).unwrap_or_else(|e| e.exit());
    init_tracing(settings.verbose);
    if settings.verbose {
        print_banner(&serde_json::to_string(&settings)?);
    }

    // 2. history only, never returns
    if settings.stored {
        let history = HistoryRecorder::new(settings.history_file.clone());
        display_stored(&history, settings.test).await?;
        return Ok(());
    }

    // 3. fetch, report and publish on a loop
    let notifier: Option<Box<dyn Notifier>> = if settings.test {
        Some(Box::new(ConsoleNotifier))
    } else if settings.publishes() {
        let credentials =
            TwilioCredentials::from_env().context("Publishing needs Twilio credentials")?;
        Some(Box::new(TwilioNotifier::new(credentials)))
    } else {
        None
    };
    let fetcher = CsvFetcher::new(settings.verbose);
    PollLoop::new(settings, fetcher, notifier).run().await?;
    Ok(())
}
