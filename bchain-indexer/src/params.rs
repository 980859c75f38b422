use std::{collections::BTreeMap, fmt, str::FromStr, sync::Arc};

use log::{debug, info};
use parking_lot::RwLock;
use serde::{de, Deserialize, Deserializer};

use crate::{network::Network, Error, Result};

/// Per-network constants needed to turn scripts into addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    pub name: String,
    pub net: Network,
    pub magic: u32,
    pub pubkey_hash_addr_id: Vec<u8>,
    pub script_hash_addr_id: Vec<u8>,
}

/// Chain parameter table shared by everything that derives addresses.
///
/// Sets are keyed by their network magic. A set is registered at most once;
/// registering an identical set again is a no-op while a different set
/// claiming a taken magic is rejected.
#[derive(Debug, Default)]
pub struct Registry {
    sets: RwLock<BTreeMap<u32, Arc<ParameterSet>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every built-in network family.
    pub fn with_defaults() -> Result<Arc<Self>> {
        let registry = Arc::new(Self::new());
        for coin in [Coin::Dash, Coin::Bcd] {
            registry.ensure_registered(&coin.family())?;
        }
        Ok(registry)
    }

    pub fn register(&self, params: ParameterSet) -> Result<()> {
        let mut sets = self.sets.write();
        if Self::check(&sets, &params)? {
            return Ok(());
        }
        debug!("[register] {} magic {:#010x}", params.name, params.magic);
        sets.insert(params.magic, Arc::new(params));
        Ok(())
    }

    /// Registers every set in `family` that is not registered yet. The check
    /// and the inserts happen under one write lock so concurrent callers end
    /// up with the same table, and a conflict leaves the table untouched.
    pub fn ensure_registered(&self, family: &[ParameterSet]) -> Result<()> {
        let mut sets = self.sets.write();
        let mut missing = Vec::new();
        for params in family {
            if !Self::check(&sets, params)? {
                missing.push(params);
            }
        }
        for params in missing {
            info!("Registered chain parameters {}", params.name);
            sets.insert(params.magic, Arc::new(params.clone()));
        }
        Ok(())
    }

    pub fn is_registered(&self, params: &ParameterSet) -> bool {
        self.sets
            .read()
            .get(&params.magic)
            .map_or(false, |existing| existing.as_ref() == params)
    }

    /// Looks up the registered member of `family` for a chain name as
    /// reported by the node. Unknown names, and networks the family has no
    /// member for, fall back to the family's main network.
    pub fn resolve(&self, family: &[ParameterSet], name: &str) -> Result<Arc<ParameterSet>> {
        let sets = self.sets.read();
        let net = name.parse::<Network>().unwrap_or(Network::Mainnet);
        let find = |net: Network| {
            family
                .iter()
                .filter(|params| params.net == net)
                .find_map(|params| {
                    sets.get(&params.magic)
                        .filter(|existing| ***existing == *params)
                        .cloned()
                })
        };
        find(net)
            .or_else(|| find(Network::Mainnet))
            .ok_or(Error::NotRegistered)
    }

    /// `Ok(true)` when an identical set is already present.
    fn check(sets: &BTreeMap<u32, Arc<ParameterSet>>, params: &ParameterSet) -> Result<bool> {
        match sets.get(&params.magic) {
            Some(existing) if existing.as_ref() == params => Ok(true),
            Some(existing) => Err(Error::RegistryConflict {
                magic: params.magic,
                name: params.name.clone(),
                existing: existing.name.clone(),
            }),
            None => Ok(false),
        }
    }
}

/// Built-in network families.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Coin {
    #[default]
    Dash,
    Bcd,
}

impl Coin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Coin::Dash => "dash",
            Coin::Bcd => "bcd",
        }
    }

    pub fn family(&self) -> Vec<ParameterSet> {
        match self {
            Coin::Dash => dash::all(),
            Coin::Bcd => bcd::all(),
        }
    }
}

impl FromStr for Coin {
    type Err = &'static str;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dash" => Ok(Coin::Dash),
            "bcd" | "bdiamond" => Ok(Coin::Bcd),
            _ => Err("invalid coin"),
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for Coin {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

pub mod dash {
    use super::ParameterSet;
    use crate::network::Network;

    pub const MAINNET_MAGIC: u32 = 0xbd6b_0cbf;
    pub const TESTNET_MAGIC: u32 = 0xffca_e2ce;
    pub const REGTEST_MAGIC: u32 = 0xdcb7_c1fc;

    pub fn main() -> ParameterSet {
        ParameterSet {
            name: "main".to_string(),
            net: Network::Mainnet,
            magic: MAINNET_MAGIC,
            pubkey_hash_addr_id: vec![76],
            script_hash_addr_id: vec![16],
        }
    }

    pub fn test() -> ParameterSet {
        ParameterSet {
            name: "test".to_string(),
            net: Network::Testnet,
            magic: TESTNET_MAGIC,
            pubkey_hash_addr_id: vec![140],
            script_hash_addr_id: vec![19],
        }
    }

    pub fn regtest() -> ParameterSet {
        ParameterSet {
            name: "regtest".to_string(),
            net: Network::Regtest,
            magic: REGTEST_MAGIC,
            pubkey_hash_addr_id: vec![140],
            script_hash_addr_id: vec![19],
        }
    }

    pub fn all() -> Vec<ParameterSet> {
        vec![main(), test(), regtest()]
    }
}

/// Bitcoin Diamond. Shares the bitcoin magics and has no regtest set, so
/// regtest nodes resolve to main.
pub mod bcd {
    use super::ParameterSet;
    use crate::network::Network;

    pub const MAINNET_MAGIC: u32 = 0xf9be_b4d9;
    pub const TESTNET_MAGIC: u32 = 0x0b11_0907;

    pub fn main() -> ParameterSet {
        ParameterSet {
            name: "bcd-main".to_string(),
            net: Network::Mainnet,
            magic: MAINNET_MAGIC,
            pubkey_hash_addr_id: vec![145],
            script_hash_addr_id: vec![23],
        }
    }

    pub fn test() -> ParameterSet {
        ParameterSet {
            name: "bcd-test".to_string(),
            net: Network::Testnet,
            magic: TESTNET_MAGIC,
            pubkey_hash_addr_id: vec![145],
            script_hash_addr_id: vec![23],
        }
    }

    pub fn all() -> Vec<ParameterSet> {
        vec![main(), test()]
    }
}
