use clap::ValueEnum;
use serde::Deserialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet3,
    Simnet,
    Regnet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainParams {
    pub name: &'static str,
    /// Confirmations a ticket needs before it may vote.
    pub ticket_maturity: u16,
    pub rpc_port: u16,
}

pub const MAINNET: ChainParams = ChainParams {
    name: "mainnet",
    ticket_maturity: 256,
    rpc_port: 9109,
};

pub const TESTNET3: ChainParams = ChainParams {
    name: "testnet3",
    ticket_maturity: 16,
    rpc_port: 19109,
};

pub const SIMNET: ChainParams = ChainParams {
    name: "simnet",
    ticket_maturity: 16,
    rpc_port: 19556,
};

pub const REGNET: ChainParams = ChainParams {
    name: "regnet",
    ticket_maturity: 16,
    rpc_port: 18656,
};

impl Network {
    pub const fn params(self) -> &'static ChainParams {
        match self {
            Network::Mainnet => &MAINNET,
            Network::Testnet3 => &TESTNET3,
            Network::Simnet => &SIMNET,
            Network::Regnet => &REGNET,
        }
    }

    pub fn default_rpc_server(self) -> String {
        format!("localhost:{}", self.params().rpc_port)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.params().name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn params() {
        assert_eq!(Network::Mainnet.params().ticket_maturity, 256);
        assert_eq!(Network::Testnet3.params().ticket_maturity, 16);
        assert_eq!(Network::default(), Network::Mainnet);
        assert_eq!(Network::Mainnet.default_rpc_server(), "localhost:9109");
        assert_eq!(Network::Simnet.to_string(), "simnet");
    }
}
