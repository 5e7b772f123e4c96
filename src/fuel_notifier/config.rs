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

use std::env;
use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

pub const ENV_BOT_TOKEN: &str = "TG_API_KEY";
pub const ENV_API_KEY: &str = "TANKERKOENIG_API_KEY";
pub const ENV_CHAT_ID: &str = "TARGET_CHAT_ID";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    InvalidChatId(String),
    Read(PathBuf, io::Error),
    Parse(toml::de::Error),
    InvalidStation(String),
    DuplicateStation(String),
    NoStations,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(var) => write!(f, "missing required environment variable {}", var),
            Self::InvalidChatId(v) => write!(f, "invalid chat ID {:?}, must be a non-zero integer", v),
            Self::Read(path, e) => write!(f, "unable to read {}: {}", path.display(), e),
            Self::Parse(e) => write!(f, "unable to parse stations: {}", e),
            Self::InvalidStation(msg) => write!(f, "invalid station: {}", msg),
            Self::DuplicateStation(id) => write!(f, "duplicate station ID {}", id),
            Self::NoStations => write!(f, "no stations configured"),
        }
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Read(_, e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// Secrets and destination required before any request can be made.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub bot_token: String,
    pub api_key: String,
    pub chat_id: i64,
}

impl Credentials {
    /// Load credentials from `TG_API_KEY`, `TANKERKOENIG_API_KEY`, and `TARGET_CHAT_ID`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load credentials using `lookup` to resolve each variable by name.
    ///
    /// Values that are missing or blank are rejected, as is a chat ID that isn't a
    /// non-zero integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = required(&lookup, ENV_BOT_TOKEN)?;
        let api_key = required(&lookup, ENV_API_KEY)?;
        let raw_chat_id = required(&lookup, ENV_CHAT_ID)?;
        let chat_id = raw_chat_id
            .parse::<i64>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or(ConfigError::InvalidChatId(raw_chat_id))?;

        Ok(Credentials {
            bot_token,
            api_key,
            chat_id,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Credentials, ENV_API_KEY, ENV_BOT_TOKEN, ENV_CHAT_ID};
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_all_present() {
        let creds = Credentials::from_lookup(lookup(&[
            (ENV_BOT_TOKEN, "123:abc"),
            (ENV_API_KEY, "00000000-0000-0000-0000-000000000002"),
            (ENV_CHAT_ID, "-100123"),
        ]))
        .unwrap();

        assert_eq!("123:abc", creds.bot_token);
        assert_eq!("00000000-0000-0000-0000-000000000002", creds.api_key);
        assert_eq!(-100123, creds.chat_id);
    }

    #[test]
    fn test_missing_bot_token() {
        let res = Credentials::from_lookup(lookup(&[(ENV_API_KEY, "key"), (ENV_CHAT_ID, "1")]));
        assert!(matches!(res, Err(ConfigError::Missing(ENV_BOT_TOKEN))));
    }

    #[test]
    fn test_blank_api_key() {
        let res = Credentials::from_lookup(lookup(&[(ENV_BOT_TOKEN, "123:abc"), (ENV_API_KEY, "  "), (ENV_CHAT_ID, "1")]));
        assert!(matches!(res, Err(ConfigError::Missing(ENV_API_KEY))));
    }

    #[test]
    fn test_missing_chat_id() {
        let res = Credentials::from_lookup(lookup(&[(ENV_BOT_TOKEN, "123:abc"), (ENV_API_KEY, "key")]));
        assert!(matches!(res, Err(ConfigError::Missing(ENV_CHAT_ID))));
    }

    #[test]
    fn test_zero_chat_id() {
        let res = Credentials::from_lookup(lookup(&[(ENV_BOT_TOKEN, "123:abc"), (ENV_API_KEY, "key"), (ENV_CHAT_ID, "0")]));
        assert!(matches!(res, Err(ConfigError::InvalidChatId(_))));
    }

    #[test]
    fn test_non_numeric_chat_id() {
        let res = Credentials::from_lookup(lookup(&[
            (ENV_BOT_TOKEN, "123:abc"),
            (ENV_API_KEY, "key"),
            (ENV_CHAT_ID, "@channel"),
        ]));
        assert!(matches!(res, Err(ConfigError::InvalidChatId(v)) if v == "@channel"));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = Credentials {
            bot_token: "123:abc".to_owned(),
            api_key: "key".to_owned(),
            chat_id: 42,
        };

        let out = format!("{:?}", creds);
        assert!(!out.contains("123:abc"));
        assert!(out.contains("42"));
    }
}
