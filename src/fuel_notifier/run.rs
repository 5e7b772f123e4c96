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

use crate::client::PriceSource;
use crate::notify::Messenger;
use crate::report::Report;
use crate::stations::StationRegistry;
use tracing::Instrument;

/// What happened to the report at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// No station had prices so nothing was sent
    Skipped,
    Sent,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub delivery: Delivery,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

/// Fetch prices for each station in order, one at a time.
///
/// Stations that can't be priced are logged and left out of the report, they never
/// prevent other stations from being fetched.
pub async fn collect_report<P>(stations: &StationRegistry, source: &P) -> Report
where
    P: PriceSource + ?Sized,
{
    let mut report = Report::new();

    for station in stations {
        let span = tracing::debug_span!("station_prices", station = %station.id);
        match source.prices(&station.id).instrument(span).await {
            Ok(quote) => {
                tracing::debug!(message = "fetched station prices", station = %station.name, e10 = quote.e10, e5 = quote.e5);
                report.push(&station.name, &quote);
            }
            Err(e) => {
                tracing::error!(message = "failed to fetch station prices", station = %station.name, station_id = %station.id, error = %e);
            }
        }
    }

    report
}

/// Send the report as a single message unless it is empty.
pub async fn deliver<M>(report: &Report, messenger: &M, chat_id: i64) -> Delivery
where
    M: Messenger + ?Sized,
{
    let text = match report.message() {
        Some(text) => text,
        None => {
            tracing::info!(message = "no station prices available, not sending report");
            return Delivery::Skipped;
        }
    };

    match messenger.send(chat_id, &text).await {
        Ok(_) => {
            tracing::info!(message = "sent price report", chat_id = chat_id, lines = report.len());
            Delivery::Sent
        }
        Err(e) => {
            tracing::error!(message = "failed to send price report", chat_id = chat_id, error = %e);
            Delivery::Failed
        }
    }
}

/// Fetch prices for every station and send a report of them to `chat_id`.
pub async fn run<P, M>(stations: &StationRegistry, source: &P, messenger: &M, chat_id: i64) -> RunSummary
where
    P: PriceSource + ?Sized,
    M: Messenger + ?Sized,
{
    let report = collect_report(stations, source).await;
    let delivery = deliver(&report, messenger, chat_id).await;

    RunSummary {
        attempted: stations.len(),
        succeeded: report.len(),
        delivery,
    }
}
