//! Client configuration, read once from the environment at startup.
use std::{env, fmt, str::FromStr};

use clap::ValueEnum;
use tracing::info;

use crate::error::{PacketError, Result};

pub const TOKEN_VAR: &str = "PACKET_TOKEN";
pub const SERVER_VAR: &str = "PACKET_SERVER";
pub const ORDER_VAR: &str = "PACKET_ORDER";
pub const DEFAULT_SERVER: &str = "packet.csh.rit.edu";

/// Which packet counts as "first" when a freshman has several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PacketOrder {
    /// Keep the order the server lists packets in.
    #[default]
    Listed,
    /// Highest packet id first.
    Newest,
}

impl FromStr for PacketOrder {
    type Err = PacketError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "listed" => Ok(Self::Listed),
            "newest" => Ok(Self::Newest),
            _ => Err(PacketError::InvalidOrder(s.to_string())),
        }
    }
}

impl fmt::Display for PacketOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Listed => "listed",
            Self::Newest => "newest",
        })
    }
}

/// Immutable settings handed to [`crate::api::ApiClient::new`].
#[derive(Clone)]
pub struct Config {
    pub token: String,
    /// Host, optionally with a scheme (`http://` is assumed otherwise).
    pub server: String,
    pub order: PacketOrder,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("server", &self.server)
            .field("order", &self.order)
            .finish()
    }
}

impl Config {
    /// Load from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `MissingToken` when `PACKET_TOKEN` is unset or empty and
    /// `InvalidOrder` when `PACKET_ORDER` holds an unknown value.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load using `var` to look up each variable.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = var(TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or(PacketError::MissingToken)?;

        let server = var(SERVER_VAR)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                info!("{SERVER_VAR} not set, using default: {DEFAULT_SERVER}");
                DEFAULT_SERVER.to_string()
            });

        let order = match var(ORDER_VAR) {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => PacketOrder::default(),
        };

        Ok(Self {
            token,
            server,
            order,
        })
    }

    /// Apply command-line overrides on top of the environment.
    #[must_use]
    pub fn with_overrides(mut self, server: Option<String>, order: Option<PacketOrder>) -> Self {
        if let Some(server) = server {
            self.server = server;
        }
        if let Some(order) = order {
            self.order = order;
        }
        self
    }
}
