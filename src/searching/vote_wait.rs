//! Mean wait between ticket maturity and vote, over the whole chain.
//!
//! Scans from block 1 to the node's best block. On mainnet this makes two RPC
//! calls per block, so a full run takes a while.

use anyhow::Context;
use clap::Parser;
use log::info;
use std::io::stdout;
use vote_wait::config::{Args, Config};
use vote_wait::rpc::RpcBlockSource;
use vote_wait::scan::scan;
use vote_wait::{ScriptClassifier, VoteWaitAccumulator};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    vote_wait::set_up_logging(args.log_level)?;
    let config = Config::from_args(args)?;

    let params = config.network.params();
    info!("Network: {}", config.network);
    info!("Ticket maturity: {}", params.ticket_maturity);
    info!("RPC server: {}", config.rpc_server);

    let source = RpcBlockSource::new(&config.rpc_server, &config.rpc_user, &config.rpc_pass)
        .with_context(|| format!("Cannot connect to RPC server {}", config.rpc_server))?;
    let mut acc = VoteWaitAccumulator::new(ScriptClassifier, params.ticket_maturity);

    scan(&source, &mut acc, &mut stdout().lock(), config.verbose)?;
    Ok(())
}
