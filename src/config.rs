use crate::params::Network;
use anyhow::{anyhow, Context};
use clap::Parser;
use log::LevelFilter;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Mean wait between ticket maturity and vote")]
pub struct Args {
    /// RPC server address. Defaults to localhost on the network's RPC port.
    #[arg(long = "rpcserver")]
    pub rpc_server: Option<String>,
    /// RPC server username
    #[arg(long = "rpcuser")]
    pub rpc_user: Option<String>,
    /// RPC server passphrase
    #[arg(long = "rpcpass")]
    pub rpc_pass: Option<String>,
    #[arg(long, value_enum)]
    pub network: Option<Network>,
    /// JSON file with `rpcserver`, `rpcuser`, `rpcpass` and `network`
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print details about every vote
    #[arg(long)]
    pub verbose: bool,
    #[arg(long, default_value = "warn")]
    pub log_level: LevelFilter,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub rpcserver: Option<String>,
    pub rpcuser: Option<String>,
    pub rpcpass: Option<String>,
    pub network: Option<Network>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Cannot open config {}", path.display()))?;
        serde_json::from_reader(file).with_context(|| format!("Invalid config {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rpc_server: String,
    pub rpc_user: String,
    pub rpc_pass: String,
    pub network: Network,
    pub verbose: bool,
}

impl Config {
    /// Flags win over the file, the file wins over defaults.
    pub fn merge(args: Args, file: FileConfig) -> anyhow::Result<Self> {
        let network = args.network.or(file.network).unwrap_or_default();
        let rpc_server = args
            .rpc_server
            .or(file.rpcserver)
            .unwrap_or_else(|| network.default_rpc_server());
        let rpc_user = args
            .rpc_user
            .or(file.rpcuser)
            .filter(|x| !x.is_empty())
            .ok_or_else(|| anyhow!("No RPC username given (--rpcuser)"))?;
        let rpc_pass = args
            .rpc_pass
            .or(file.rpcpass)
            .filter(|x| !x.is_empty())
            .ok_or_else(|| anyhow!("No RPC passphrase given (--rpcpass)"))?;

        Ok(Self {
            rpc_server,
            rpc_user,
            rpc_pass,
            network,
            verbose: args.verbose,
        })
    }

    pub fn from_args(mut args: Args) -> anyhow::Result<Self> {
        let file = match args.config.take() {
            Some(path) => FileConfig::load(&path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }
}
