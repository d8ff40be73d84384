//! Block and stake transaction model, independent of where blocks come from.

use crate::types::{Amount, Hash};
use chrono::{DateTime, Utc};

/// Output script class as reported by the node (`scriptPubKey.type`).
///
/// dcrd 1.7+ suffixes stake classes with the script they wrap
/// (`stakegen-pubkeyhash`, `stakesubmission-scripthash`); older nodes report
/// the bare name. Both map to the same variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptClass {
    StakeSubmission,
    StakeGen,
    StakeRevoke,
    StakeChange,
    NullData,
    PubKeyHash,
    ScriptHash,
    Other(String),
}

impl From<&str> for ScriptClass {
    fn from(value: &str) -> Self {
        let base = value.split_once('-').map_or(value, |x| x.0);
        match base {
            "stakesubmission" => return Self::StakeSubmission,
            "stakegen" => return Self::StakeGen,
            "stakerevoke" => return Self::StakeRevoke,
            "stakechange" => return Self::StakeChange,
            _ => {}
        }
        match value {
            "nulldata" => Self::NullData,
            "pubkeyhash" => Self::PubKeyHash,
            "scripthash" => Self::ScriptHash,
            other => Self::Other(other.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxIn {
    /// First input of a vote. Spends nothing.
    Stakebase,
    Coinbase,
    /// Input of the per-block treasury payout.
    Treasurybase,
    /// Input of a treasury spend; carries a signature, spends nothing.
    TreasurySpend,
    PrevOut { hash: Hash, index: u32 },
}

impl TxIn {
    pub fn prev_hash(&self) -> Option<&Hash> {
        match self {
            TxIn::PrevOut { hash, .. } => Some(hash),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    pub value: Amount,
    pub class: ScriptClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeTx {
    pub hash: Hash,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub hash: Hash,
    pub height: i64,
    pub time: DateTime<Utc>,
    pub stake_txs: Vec<StakeTx>,
}

impl StakeTx {
    /// A ticket purchase: output 0 is the stake submission carrying the price.
    pub fn purchase(hash: Hash, price: Amount) -> Self {
        Self {
            hash,
            inputs: vec![TxIn::PrevOut {
                hash: Hash::from_bytes([0; 32]),
                index: 0,
            }],
            outputs: vec![
                TxOut {
                    value: price,
                    class: ScriptClass::StakeSubmission,
                },
                TxOut {
                    value: Amount::ZERO,
                    class: ScriptClass::NullData,
                },
                TxOut {
                    value: Amount::ZERO,
                    class: ScriptClass::StakeChange,
                },
            ],
        }
    }

    /// A vote spending `ticket`: stakebase first, the ticket second.
    pub fn vote(hash: Hash, ticket: Hash) -> Self {
        Self {
            hash,
            inputs: vec![
                TxIn::Stakebase,
                TxIn::PrevOut {
                    hash: ticket,
                    index: 0,
                },
            ],
            outputs: vec![
                TxOut {
                    value: Amount::ZERO,
                    class: ScriptClass::NullData,
                },
                TxOut {
                    value: Amount::ZERO,
                    class: ScriptClass::NullData,
                },
                TxOut {
                    value: Amount::ZERO,
                    class: ScriptClass::StakeGen,
                },
            ],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn script_class_names() {
        assert_eq!(ScriptClass::from("stakesubmission"), ScriptClass::StakeSubmission);
        assert_eq!(ScriptClass::from("stakegen"), ScriptClass::StakeGen);
        assert_eq!(ScriptClass::from("nulldata"), ScriptClass::NullData);
        assert_eq!(
            ScriptClass::from("pubkeyhash-alt"),
            ScriptClass::Other("pubkeyhash-alt".into())
        );
        assert_eq!(
            ScriptClass::from("treasuryadd"),
            ScriptClass::Other("treasuryadd".into())
        );
    }

    #[test]
    fn suffixed_stake_script_classes() {
        assert_eq!(
            ScriptClass::from("stakesubmission-pubkeyhash"),
            ScriptClass::StakeSubmission
        );
        assert_eq!(
            ScriptClass::from("stakesubmission-scripthash"),
            ScriptClass::StakeSubmission
        );
        assert_eq!(ScriptClass::from("stakegen-pubkeyhash"), ScriptClass::StakeGen);
        assert_eq!(ScriptClass::from("stakegen-scripthash"), ScriptClass::StakeGen);
        assert_eq!(ScriptClass::from("stakerevoke-pubkeyhash"), ScriptClass::StakeRevoke);
        assert_eq!(ScriptClass::from("stakechange-scripthash"), ScriptClass::StakeChange);
        assert_eq!(
            ScriptClass::from("treasurygen-pubkeyhash"),
            ScriptClass::Other("treasurygen-pubkeyhash".into())
        );
    }

    #[test]
    fn vote_references_ticket_in_second_input() {
        let ticket = Hash::from_bytes([7; 32]);
        let vote = StakeTx::vote(Hash::from_bytes([8; 32]), ticket);
        assert_eq!(vote.inputs[0].prev_hash(), None);
        assert_eq!(vote.inputs[1].prev_hash(), Some(&ticket));
    }
}
