pub mod accumulator;
pub mod chain;
pub mod classify;
pub mod config;
pub mod params;
pub mod rpc;
pub mod scan;
pub mod source;
pub mod types;

pub use accumulator::{ScanError, VoteWait, VoteWaitAccumulator, VoteWaitStats};
pub use classify::{ScriptClassifier, TxClassifier, TxType};
pub use source::{BlockSource, MemoryChain};

use log::LevelFilter;
use std::io;

/// Logs go to stderr; stdout carries the report.
pub fn set_up_logging(level: LevelFilter) -> anyhow::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339(std::time::SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}
