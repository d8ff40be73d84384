use crate::accumulator::{VoteWait, VoteWaitAccumulator, VoteWaitStats};
use crate::classify::TxClassifier;
use crate::source::BlockSource;
use anyhow::Context;
use log::{debug, info};
use std::io::Write;

/// Prints `..<height>` every 1000 blocks and breaks the line every 10000.
pub fn report_progress(out: &mut impl Write, height: i64) -> std::io::Result<()> {
    if height % 10000 == 0 && height != 0 {
        writeln!(out)?;
    }
    if height % 1000 == 0 && height != 0 {
        write!(out, "..{height}")?;
        out.flush()?;
    }
    Ok(())
}

pub fn write_vote(out: &mut impl Write, vote: &VoteWait) -> std::io::Result<()> {
    writeln!(
        out,
        "Ticket {}... ({}) mined in block {}, voted {} blocks ({:.2} days) after maturity",
        vote.ticket.short(),
        vote.price,
        vote.mined_height,
        vote.wait_blocks,
        vote.wait_days()
    )
}

pub fn write_summary(out: &mut impl Write, stats: &VoteWaitStats) -> std::io::Result<()> {
    writeln!(
        out,
        "Mean wait for {} votes: {:.1} blocks, {:.2} days",
        stats.votes, stats.mean_wait_blocks, stats.mean_wait_days
    )
}

/// Feeds every block from height 1 to the source's best height into `acc`
/// and prints the summary line.
///
/// A chain without votes fails with [`crate::ScanError::NoVotes`] behind a message
/// naming the scanned height.
pub fn scan<S, C>(
    source: &S,
    acc: &mut VoteWaitAccumulator<C>,
    out: &mut impl Write,
    verbose: bool,
) -> anyhow::Result<VoteWaitStats>
where
    S: BlockSource,
    C: TxClassifier,
{
    let best_height = source.best_height().context("Failed to fetch best block")?;
    info!("Best block height: {best_height}");

    writeln!(
        out,
        "Calculating average vote time through block height {best_height}..."
    )?;
    if !verbose {
        write!(out, "Height")?;
    }

    for height in 1..=best_height {
        if !verbose {
            report_progress(out, height)?;
        }

        let hash = source
            .block_hash(height)
            .with_context(|| format!("Failed to fetch block hash at height {height}"))?;
        let block = source
            .block(&hash)
            .with_context(|| format!("Failed to fetch block {hash}"))?;
        let votes = acc.process_block(&block)?;

        if verbose {
            for vote in &votes {
                write_vote(out, vote)?;
            }
        }
        if height % 1000 == 0 {
            debug!(
                "Block #{height}: {} votes, {} pending tickets",
                acc.votes(),
                acc.pending_tickets()
            );
        }
    }

    if !verbose {
        writeln!(out, "..done")?;
    }

    let stats = acc
        .finish()
        .with_context(|| format!("No votes found through block height {best_height}"))?;
    write_summary(out, &stats)?;
    Ok(stats)
}
