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
use reqwest::Client;
use std::error;
use std::fmt;
use teloxide::prelude::*;
use teloxide::RequestError;

#[derive(Debug)]
pub enum NotifyError {
    Session(RequestError),
    Send(RequestError),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(e) => write!(f, "unable to establish bot session: {}", e),
            Self::Send(e) => write!(f, "unable to send message: {}", e),
        }
    }
}

impl error::Error for NotifyError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Session(e) => Some(e),
            Self::Send(e) => Some(e),
        }
    }
}

/// Destination for plain text messages.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), NotifyError>;
}

/// Telegram bot session used to deliver reports.
pub struct TelegramMessenger {
    bot: Bot,
    debug: bool,
}

impl TelegramMessenger {
    /// Create a bot session with `token` and verify it with the Telegram API.
    ///
    /// When `debug` is set, every outgoing message and the response to it are logged
    /// at `INFO` level regardless of the configured verbosity for other events.
    pub async fn connect(client: Client, token: &str, debug: bool) -> Result<Self, NotifyError> {
        let bot = Bot::with_client(token, client);
        let me = bot.get_me().await.map_err(NotifyError::Session)?;
        tracing::info!(message = "authorized bot session", username = %me.username());

        Ok(TelegramMessenger { bot, debug })
    }
}

impl fmt::Debug for TelegramMessenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramMessenger").field("debug", &self.debug).finish()
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        if self.debug {
            tracing::info!(message = "sending bot message", chat_id = chat_id, text = %text);
        }

        let res = self.bot.send_message(ChatId(chat_id), text.to_owned()).await;
        match res {
            Ok(msg) => {
                if self.debug {
                    tracing::info!(message = "bot message accepted", chat_id = chat_id, message_id = msg.id.0);
                }
                Ok(())
            }
            Err(e) => {
                if self.debug {
                    tracing::info!(message = "bot message rejected", chat_id = chat_id, error = ?e);
                }
                Err(NotifyError::Send(e))
            }
        }
    }
}
