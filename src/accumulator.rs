//! Ticket maturity / vote wait accounting.
//!
//! Blocks are fed in height order starting at 1. Every ticket purchase is
//! remembered until the vote that spends it shows up, at which point the wait
//! between the ticket's maturity block and the vote block is added to the
//! running totals.

use crate::chain::Block;
use crate::classify::{TxClassifier, TxType};
use crate::types::{Amount, Hash};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;

pub const SECONDS_PER_DAY: f64 = 86400.0;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Ticket {0} not found")]
    TicketNotFound(Hash),
    #[error("No block time recorded for maturity height {0}")]
    MissingBlockTime(i64),
    #[error("Blocks out of order: expected height {expected}, got {got}")]
    OutOfOrder { expected: i64, got: i64 },
    #[error("Malformed transaction {hash}: {reason}")]
    MalformedTx { hash: Hash, reason: &'static str },
    #[error("No votes observed")]
    NoVotes,
}

#[derive(Debug, Clone, Copy)]
struct TicketData {
    mined_height: i64,
    price: Amount,
}

/// One vote and how long its ticket waited.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteWait {
    pub ticket: Hash,
    pub price: Amount,
    pub mined_height: i64,
    pub wait_blocks: i64,
    pub wait: TimeDelta,
}

impl VoteWait {
    pub fn wait_days(&self) -> f64 {
        self.wait.num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoteWaitStats {
    pub votes: u64,
    pub mean_wait_blocks: f64,
    pub mean_wait_days: f64,
}

pub struct VoteWaitAccumulator<C: TxClassifier> {
    classifier: C,
    ticket_maturity: i64,
    next_height: i64,
    tickets: HashMap<Hash, TicketData>,
    block_times: HashMap<i64, DateTime<Utc>>,
    total_votes: u64,
    total_wait_blocks: i64,
    total_wait_seconds: f64,
}

impl<C: TxClassifier> VoteWaitAccumulator<C> {
    pub fn new(classifier: C, ticket_maturity: u16) -> Self {
        Self {
            classifier,
            ticket_maturity: ticket_maturity as i64,
            next_height: 1,
            tickets: HashMap::new(),
            block_times: HashMap::new(),
            total_votes: 0,
            total_wait_blocks: 0,
            total_wait_seconds: 0.0,
        }
    }

    pub fn votes(&self) -> u64 {
        self.total_votes
    }

    pub fn pending_tickets(&self) -> usize {
        self.tickets.len()
    }

    /// Returns the votes found in `block`. On error the accumulator must not
    /// be used further.
    pub fn process_block(&mut self, block: &Block) -> Result<Vec<VoteWait>, ScanError> {
        let height = block.height;
        if height != self.next_height {
            return Err(ScanError::OutOfOrder {
                expected: self.next_height,
                got: height,
            });
        }
        self.next_height += 1;
        self.block_times.insert(height, block.time);

        let mut votes = Vec::new();
        for stx in &block.stake_txs {
            match self.classifier.classify(stx) {
                TxType::Purchase => {
                    let Some(out) = stx.outputs.first() else {
                        return Err(ScanError::MalformedTx {
                            hash: stx.hash,
                            reason: "ticket purchase without outputs",
                        });
                    };
                    self.tickets.insert(
                        stx.hash,
                        TicketData {
                            mined_height: height,
                            price: out.value,
                        },
                    );
                }
                TxType::Vote => {
                    let Some(&ticket_hash) = stx.inputs.get(1).and_then(|x| x.prev_hash()) else {
                        return Err(ScanError::MalformedTx {
                            hash: stx.hash,
                            reason: "vote without a ticket input",
                        });
                    };
                    let ticket = self
                        .tickets
                        .get(&ticket_hash)
                        .copied()
                        .ok_or(ScanError::TicketNotFound(ticket_hash))?;

                    // maturity is reached one block after the raw confirmation count,
                    // and the maturity block itself counts as one block of waiting
                    let maturity_height = ticket.mined_height + self.ticket_maturity + 1;
                    let wait_blocks = (height - maturity_height) + 1;
                    let maturity_time = self
                        .block_times
                        .get(&maturity_height)
                        .ok_or(ScanError::MissingBlockTime(maturity_height))?;
                    let wait = block.time - *maturity_time;

                    self.total_votes += 1;
                    self.total_wait_blocks += wait_blocks;
                    self.total_wait_seconds += wait.num_milliseconds() as f64 / 1000.0;
                    self.tickets.remove(&ticket_hash);

                    votes.push(VoteWait {
                        ticket: ticket_hash,
                        price: ticket.price,
                        mined_height: ticket.mined_height,
                        wait_blocks,
                        wait,
                    });
                }
                TxType::Other => {}
            }
        }
        Ok(votes)
    }

    pub fn finish(&self) -> Result<VoteWaitStats, ScanError> {
        if self.total_votes == 0 {
            return Err(ScanError::NoVotes);
        }
        let votes = self.total_votes as f64;
        Ok(VoteWaitStats {
            votes: self.total_votes,
            mean_wait_blocks: self.total_wait_blocks as f64 / votes,
            mean_wait_days: self.total_wait_seconds / votes / SECONDS_PER_DAY,
        })
    }
}
