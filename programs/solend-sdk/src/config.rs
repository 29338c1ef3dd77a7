//! Program deployments and their known lending markets

use solana_program::{pubkey, pubkey::Pubkey};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Program id of the mainnet deployment
pub const MAINNET_PROGRAM_ID: Pubkey = pubkey!("So1endDq2YkqhipRh3WViPa8hdiSpxWy6z3Z6tMCpAo");

/// Program id of the devnet deployment
pub const DEVNET_PROGRAM_ID: Pubkey = pubkey!("ALend7Ketfx5bxh6ghsCDXAoDrhvEmsXT3cynB6aPLgx");

/// Name reported for decoded instructions
pub const DEFAULT_PROGRAM_NAME: &str = "Solend Program";

const MAINNET_MARKETS: &[(&str, Pubkey)] = &[
    ("Main Pool", pubkey!("4UpD2fh7xH3VP9QQaXtsS1YY3bxzWhtfpks7FatyKvdY")),
    ("TURBO SOL", pubkey!("7RCz8wb6WXxUhAigok9ttgrVgDFFFbibcirECzWSBauM")),
    ("Invictus", pubkey!("5i8SzwX2LjpGUxLZRJ8EiYohpuKgW2FYDFhVjhGj66P1")),
    ("Bonfida", pubkey!("91taAt3bocVZwcChVgZTTaQYt2WpBVE3M9PkWekFQx4J")),
    ("Step", pubkey!("DxdnNmdWHcW6RGTYiD5ms5f7LNZBaA7Kd1nMfASnzwdY")),
    ("Star Atlas", pubkey!("99S4iReDsyxKDViKdXQKWDcB6C3waDmfPWWyb5HAbcZF")),
];

const DEVNET_MARKETS: &[(&str, Pubkey)] = &[(
    "Main Pool",
    pubkey!("GvjoVKNjBvQcFaSKUW1gTE7DxhSpjHbE69umVR5nPuQp"),
)];

/// Cluster a deployment lives on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    MainNet,
    DevNet,
}

impl Network {
    pub fn program_id(&self) -> Pubkey {
        match self {
            Self::MainNet => MAINNET_PROGRAM_ID,
            Self::DevNet => DEVNET_PROGRAM_ID,
        }
    }

    pub fn program_config(&self) -> ProgramConfig {
        ProgramConfig::new(self.program_id())
    }

    /// Lending markets known on this network
    pub fn lending_markets(&self) -> Vec<MarketInfo> {
        let markets = match self {
            Self::MainNet => MAINNET_MARKETS,
            Self::DevNet => DEVNET_MARKETS,
        };

        markets
            .iter()
            .map(|(name, address)| MarketInfo {
                name: name.to_string(),
                address: *address,
            })
            .collect()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainNet => f.write_str("mainnet"),
            Self::DevNet => f.write_str("devnet"),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Unknown network {0}")]
pub struct UnknownNetwork(String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Ok(Self::MainNet),
            "devnet" => Ok(Self::DevNet),
            _ => Err(UnknownNetwork(s.to_string())),
        }
    }
}

/// Program a decoder or builder works against
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramConfig {
    pub program_id: Pubkey,
    pub program_name: String,
}

impl ProgramConfig {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            program_name: DEFAULT_PROGRAM_NAME.to_string(),
        }
    }
}

/// A named lending market
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketInfo {
    pub name: String,
    pub address: Pubkey,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_cluster_names() {
        assert_eq!("mainnet-beta".parse::<Network>(), Ok(Network::MainNet));
        assert_eq!("MainNet".parse::<Network>(), Ok(Network::MainNet));
        assert_eq!("devnet".parse::<Network>(), Ok(Network::DevNet));
        assert!("testnet".parse::<Network>().is_err());
        assert_eq!(Network::DevNet.to_string().parse::<Network>(), Ok(Network::DevNet));
    }

    #[test]
    fn networks_have_distinct_programs() {
        let mainnet = Network::MainNet.program_config();
        assert_eq!(mainnet.program_id, MAINNET_PROGRAM_ID);
        assert_eq!(mainnet.program_name, "Solend Program");
        assert_ne!(Network::DevNet.program_id(), mainnet.program_id);
    }

    #[test]
    fn known_markets() {
        let markets = Network::MainNet.lending_markets();
        assert_eq!(markets.len(), 6);
        assert_eq!(markets[0].name, "Main Pool");
        assert_eq!(
            markets[0].address.to_string(),
            "4UpD2fh7xH3VP9QQaXtsS1YY3bxzWhtfpks7FatyKvdY"
        );
        assert_eq!(Network::DevNet.lending_markets().len(), 1);
    }
}
