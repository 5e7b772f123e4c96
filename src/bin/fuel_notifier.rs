// fuel_notifier - Tankerkoenig fuel prices delivered to Telegram
//
// Copyright 2024 Nick Pillitteri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use clap::Parser;
use fuel_notifier::client::TankerkoenigClient;
use fuel_notifier::config::Credentials;
use fuel_notifier::notify::TelegramMessenger;
use fuel_notifier::run::{self, Delivery};
use fuel_notifier::stations::StationRegistry;
use reqwest::{Client, Url};
use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::Level;

const DEFAULT_LOG_LEVEL: Level = Level::INFO;
const DEFAULT_API_URL: &str = "https://creativecommons.tankerkoenig.de/";
const DEFAULT_STATIONS: &str = "stations.toml";

/// Send current fuel prices for a set of stations to a Telegram chat.
///
/// Credentials are read from the TG_API_KEY, TANKERKOENIG_API_KEY, and TARGET_CHAT_ID
/// environment variables (or a .env file in the working directory).
#[derive(Debug, Parser)]
#[clap(name = "fuel_notifier", version = clap::crate_version!())]
struct FuelNotifierApplication {
    /// Path to a TOML file with a [[station]] table (id and name) for each station
    #[clap(long, default_value = DEFAULT_STATIONS)]
    stations: PathBuf,

    /// Base URL for the Tankerkoenig API
    #[clap(long, default_value = DEFAULT_API_URL)]
    api_url: Url,

    /// Logging verbosity. Allowed values are 'trace', 'debug', 'info', 'warn', and 'error'
    /// (case insensitive)
    #[clap(long, default_value_t = DEFAULT_LOG_LEVEL)]
    log_level: Level,

    /// Timeout for requests to the Tankerkoenig and Telegram APIs, in milliseconds. By
    /// default requests do not time out.
    #[clap(long)]
    timeout_millis: Option<u64>,

    /// Log every message sent by the Telegram bot along with the response to it
    #[clap(long)]
    bot_debug: bool,

    /// Fetch prices and log the resulting report without sending it to Telegram
    #[clap(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let opts = FuelNotifierApplication::parse();
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(opts.log_level)
            .finish(),
    )
    .expect("failed to set tracing subscriber");

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(message = "unable to load .env file", error = %e);
        }
    }

    let credentials = Credentials::from_env().unwrap_or_else(|e| {
        tracing::error!(message = "invalid configuration", error = %e);
        process::exit(1)
    });

    let stations = StationRegistry::from_file(&opts.stations).unwrap_or_else(|e| {
        tracing::error!(message = "unable to load stations", path = %opts.stations.display(), error = %e);
        process::exit(1)
    });

    let mut builder = Client::builder();
    if let Some(millis) = opts.timeout_millis {
        builder = builder.timeout(Duration::from_millis(millis));
    }

    let http_client = builder.build().unwrap_or_else(|e| {
        tracing::error!(message = "unable to initialize HTTP client", error = %e);
        process::exit(1)
    });

    let client = TankerkoenigClient::new(http_client.clone(), &opts.api_url, &credentials.api_key).unwrap_or_else(|e| {
        tracing::error!(message = "unable to initialize Tankerkoenig client", error = %e);
        process::exit(1)
    });

    if opts.dry_run {
        let report = run::collect_report(&stations, &client).await;
        match report.message() {
            Some(text) => tracing::info!(message = "dry run, not sending price report", report = %text),
            None => tracing::info!(message = "dry run, no station prices available"),
        }

        return Ok(());
    }

    // Bot session must be valid before any station is fetched.
    let messenger = TelegramMessenger::connect(http_client, &credentials.bot_token, opts.bot_debug)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(message = "unable to initialize Telegram bot", error = %e);
            process::exit(1)
        });

    tracing::info!(message = "fetching station prices", api_url = %opts.api_url, stations = stations.len());
    let summary = run::run(&stations, &client, &messenger, credentials.chat_id).await;
    let sent = summary.delivery == Delivery::Sent;
    tracing::info!(
        message = "run finished",
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        failed = summary.failed(),
        sent = sent,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::FuelNotifierApplication;
    use clap::Parser;

    #[test]
    fn test_defaults_have_no_timeout() {
        let opts = FuelNotifierApplication::try_parse_from(["fuel_notifier"]).unwrap();
        assert_eq!(None, opts.timeout_millis);
        assert_eq!("stations.toml", opts.stations.to_str().unwrap());
        assert!(!opts.dry_run);
    }

    #[test]
    fn test_timeout_millis() {
        let opts = FuelNotifierApplication::try_parse_from(["fuel_notifier", "--timeout-millis", "2500"]).unwrap();
        assert_eq!(Some(2500), opts.timeout_millis);
    }
}
