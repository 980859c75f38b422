use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{network::Network, params::Coin, Error, Result};

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;

/// Daemon settings. Loaded from an optional JSON file and overridden by
/// command line flags.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub datadir: Option<PathBuf>,
    pub rpcaddress: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub coin: Option<Coin>,
    pub network: Option<Network>,
    pub start_height: Option<u32>,
    pub poll_interval_ms: Option<u64>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Values set in `overrides` win.
    pub fn merge(self, overrides: Config) -> Config {
        Config {
            datadir: overrides.datadir.or(self.datadir),
            rpcaddress: overrides.rpcaddress.or(self.rpcaddress),
            user: overrides.user.or(self.user),
            pass: overrides.pass.or(self.pass),
            coin: overrides.coin.or(self.coin),
            network: overrides.network.or(self.network),
            start_height: overrides.start_height.or(self.start_height),
            poll_interval_ms: overrides.poll_interval_ms.or(self.poll_interval_ms),
        }
    }

    pub fn datadir(&self) -> Result<&Path> {
        self.datadir.as_deref().ok_or(Error::InvalidField {
            field: "datadir",
            msg: "no data directory configured".to_string(),
        })
    }

    pub fn rpcaddress(&self) -> Result<&str> {
        self.rpcaddress.as_deref().ok_or(Error::InvalidField {
            field: "rpcaddress",
            msg: "no node address configured".to_string(),
        })
    }

    pub fn auth(&self) -> Option<(&str, &str)> {
        match (&self.user, &self.pass) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }

    pub fn coin(&self) -> Coin {
        self.coin.unwrap_or_default()
    }

    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS)
    }
}
