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

//! Tankerkoenig fuel prices delivered to Telegram
//!
//! ## Features
//!
//! `fuel_notifier` fetches current fuel prices for a list of gas stations using the
//! [Tankerkoenig] API and sends a summary of them to a Telegram chat. Each run fetches
//! prices once, sends at most one message, and exits. Each line of the message looks
//! like the example below.
//!
//! ```text
//! Shell Diez Wilhelmstr. 58 A[e10: 1.779, e5: 1.839]
//! ```
//!
//! Stations that don't currently report both `e10` and `e5` prices are left out of the
//! message. If no station has prices, no message is sent.
//!
//! [Tankerkoenig]: https://creativecommons.tankerkoenig.de/
//!
//! ## Build
//!
//! `fuel_notifier` is a Rust program and must be built from source using a [Rust toolchain](https://rustup.rs/).
//!
//! ```text
//! cargo build --release
//! ```
//!
//! ## Usage
//!
//! ### Credentials
//!
//! `fuel_notifier` reads the following required environment variables. If a `.env` file
//! exists in the working directory, it is loaded first.
//!
//! * `TANKERKOENIG_API_KEY` - Key for the Tankerkoenig API.
//! * `TG_API_KEY` - Token of the Telegram bot used to send messages.
//! * `TARGET_CHAT_ID` - Numeric ID of the chat to send messages to.
//!
//! ### Picking stations
//!
//! Stations are read from a TOML file, `stations.toml` in the working directory by
//! default. Each station needs its Tankerkoenig ID and the name to use for it in
//! messages. See the [sample station file](ext/stations.toml).
//!
//! ```toml
//! [[station]]
//! id = "5ee86c30-2760-4a35-b582-f492cb6fee82"
//! name = "ED Diez"
//! ```
//!
//! Station IDs can be found with the `list.php` endpoint of the Tankerkoenig API.
//!
//! ```text
//! curl -sS 'https://creativecommons.tankerkoenig.de/json/list.php?lat=50.38&lng=8.01&rad=5&type=all&apikey=YOUR_KEY' | jq
//! ```
//!
//! ### Run
//!
//! `fuel_notifier` runs once and exits, use a scheduler to run it periodically. You can
//! use the [provided unit file](ext/fuel_notifier.service) and [timer](ext/fuel_notifier.timer)
//! to run it with Systemd. The unit file assumes that you have copied the resulting
//! `fuel_notifier` binary to `/usr/local/bin/fuel_notifier`, your stations to
//! `/etc/fuel_notifier/stations.toml`, and your credentials to `/etc/fuel_notifier/env`.
//!
//! ```text
//! sudo cp target/release/fuel_notifier /usr/local/bin/fuel_notifier
//! sudo mkdir -p /etc/fuel_notifier
//! sudo cp ext/stations.toml /etc/fuel_notifier/stations.toml
//! sudo cp ext/fuel_notifier.service ext/fuel_notifier.timer /etc/systemd/system/
//! sudo systemctl daemon-reload
//! sudo systemctl enable --now fuel_notifier.timer
//! ```
//!
//! Use `--dry-run` to log the report instead of sending it.
//!

pub mod client;
pub mod config;
pub mod notify;
pub mod report;
pub mod run;
pub mod stations;
