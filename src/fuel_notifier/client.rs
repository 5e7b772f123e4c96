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

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Deserializer};
use std::error;
use std::fmt;

/// Fuel grades reported for each station, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelType {
    /// Regular gasoline with up to 10% ethanol
    E10,
    /// Regular gasoline with up to 5% ethanol
    E5,
}

impl FuelType {
    /// Label used for this fuel type by the Tankerkoenig API and in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::E10 => "e10",
            Self::E5 => "e5",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Prices for every required fuel type at a single station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub e10: f64,
    pub e5: f64,
}

impl PriceQuote {
    pub fn price(&self, fuel: FuelType) -> f64 {
        match fuel {
            FuelType::E10 => self.e10,
            FuelType::E5 => self.e5,
        }
    }
}

#[derive(Debug)]
pub enum ClientError {
    Internal(reqwest::Error),
    Decode(serde_json::Error),
    Api(String),
    InvalidBaseUrl(Url),
    MissingStation,
    MissingFuelType(FuelType),
    Unexpected(StatusCode, String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal(e) => write!(f, "{}", e),
            Self::Decode(e) => write!(f, "unable to decode response: {}", e),
            Self::Api(msg) => write!(f, "api error: {}", msg),
            Self::InvalidBaseUrl(url) => write!(f, "invalid base URL {}", url),
            Self::MissingStation => write!(f, "station not found in response"),
            Self::MissingFuelType(fuel) => write!(f, "fuel type not found: {}", fuel),
            Self::Unexpected(status, station) => write!(f, "unexpected status {} for station {}", status, station),
        }
    }
}

impl error::Error for ClientError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Internal(e) => Some(e),
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

/// Source of current fuel prices for a station, keyed by station ID.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn prices(&self, station: &str) -> Result<PriceQuote, ClientError>;
}

/// Client for the station detail endpoint of the Tankerkoenig API.
///
/// The API key is sent as a query parameter so request URLs are never logged and
/// transport errors have their URL stripped before being returned.
pub struct TankerkoenigClient {
    client: Client,
    detail_url: Url,
    api_key: String,
}

impl TankerkoenigClient {
    const USER_AGENT: &'static str = concat!("fuel_notifier/", env!("CARGO_PKG_VERSION"));
    const JSON_RESPONSE: &'static str = "application/json";

    /// Create a new client for the API rooted at `base_url`.
    ///
    /// Returns an error if `base_url` cannot have path segments appended (e.g. `mailto:` URLs).
    pub fn new(client: Client, base_url: &Url, api_key: &str) -> Result<Self, ClientError> {
        let mut detail_url = base_url.clone();
        detail_url
            .path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(base_url.clone()))?
            .pop_if_empty()
            .push("json")
            .push("detail.php");

        Ok(TankerkoenigClient {
            client,
            detail_url,
            api_key: api_key.to_owned(),
        })
    }

    fn request_url(&self, station: &str) -> Url {
        let mut url = self.detail_url.clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("id", station);
        url
    }
}

impl fmt::Debug for TankerkoenigClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TankerkoenigClient")
            .field("detail_url", &self.detail_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl PriceSource for TankerkoenigClient {
    async fn prices(&self, station: &str) -> Result<PriceQuote, ClientError> {
        tracing::debug!(message = "making station detail request", url = %self.detail_url, station = %station);

        let res = self
            .client
            .get(self.request_url(station))
            .header(USER_AGENT, Self::USER_AGENT)
            .header(ACCEPT, Self::JSON_RESPONSE)
            .send()
            .await
            .map_err(|e| ClientError::Internal(e.without_url()))?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(ClientError::Unexpected(status, station.to_owned()));
        }

        let body = res.text().await.map_err(|e| ClientError::Internal(e.without_url()))?;
        parse_detail(&body)
    }
}

/// Extract the prices of all required fuel types from a station detail response body.
///
/// A response that is missing any required fuel type is an error, no partial quote
/// is ever returned.
pub fn parse_detail(body: &str) -> Result<PriceQuote, ClientError> {
    let detail: DetailResponse = serde_json::from_str(body).map_err(ClientError::Decode)?;
    if !detail.ok {
        return Err(ClientError::Api(
            detail.message.unwrap_or_else(|| "request was not successful".to_owned()),
        ));
    }

    let station = detail.station.ok_or(ClientError::MissingStation)?;
    tracing::trace!(message = "extracting prices from station", station = ?station);

    Ok(PriceQuote {
        e10: station.price(FuelType::E10)?,
        e5: station.price(FuelType::E5)?,
    })
}

#[derive(Deserialize, Debug)]
struct DetailResponse {
    #[serde(default = "default_ok")]
    ok: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    station: Option<StationPrices>,
}

fn default_ok() -> bool {
    true
}

#[derive(Deserialize, Debug)]
struct StationPrices {
    #[serde(default, deserialize_with = "optional_price")]
    e10: Option<f64>,
    #[serde(default, deserialize_with = "optional_price")]
    e5: Option<f64>,
}

impl StationPrices {
    fn price(&self, fuel: FuelType) -> Result<f64, ClientError> {
        let price = match fuel {
            FuelType::E10 => self.e10,
            FuelType::E5 => self.e5,
        };

        price.ok_or(ClientError::MissingFuelType(fuel))
    }
}

/// Prices are reported as `false` or `null` when a station doesn't currently sell a fuel.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Price(f64),
    Unavailable(bool),
}

fn optional_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawPrice>::deserialize(deserializer)? {
        Some(RawPrice::Price(p)) => Some(p),
        Some(RawPrice::Unavailable(_)) | None => None,
    })
}
