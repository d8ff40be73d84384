//! dcrd JSON-RPC block source.
//!
//! The node has to serve plain HTTP (`dcrd --notls` on localhost, or a
//! TLS-terminating proxy in front of it).

use crate::chain::{Block, ScriptClass, StakeTx, TxIn, TxOut};
use crate::source::BlockSource;
use crate::types::{Amount, Hash};
use anyhow::anyhow;
use bitcoincore_rpc::{Auth, Client, RpcApi};
use chrono::DateTime;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct BestBlockResult {
    pub hash: Hash,
    pub height: i64,
}

#[derive(Debug, Deserialize)]
pub struct ScriptPubKeyResult {
    #[serde(rename = "type")]
    pub class: String,
}

#[derive(Debug, Deserialize)]
pub struct VoutResult {
    pub value: f64,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKeyResult,
}

#[derive(Debug, Deserialize)]
pub struct VinResult {
    pub coinbase: Option<String>,
    pub stakebase: Option<String>,
    pub treasurybase: Option<bool>,
    pub treasuryspend: Option<String>,
    pub txid: Option<Hash>,
    pub vout: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TxRawResult {
    pub txid: Hash,
    #[serde(default)]
    pub vin: Vec<VinResult>,
    #[serde(default)]
    pub vout: Vec<VoutResult>,
}

/// `getblock <hash> true true`, fields this crate uses only.
#[derive(Debug, Deserialize)]
pub struct BlockVerboseResult {
    pub hash: Hash,
    pub height: i64,
    pub time: i64,
    #[serde(default)]
    pub rawstx: Vec<TxRawResult>,
}

impl TryFrom<VinResult> for TxIn {
    type Error = anyhow::Error;

    fn try_from(value: VinResult) -> Result<Self, Self::Error> {
        if value.stakebase.is_some() {
            return Ok(TxIn::Stakebase);
        }
        if value.coinbase.is_some() {
            return Ok(TxIn::Coinbase);
        }
        if value.treasurybase == Some(true) {
            return Ok(TxIn::Treasurybase);
        }
        if value.treasuryspend.is_some() {
            return Ok(TxIn::TreasurySpend);
        }
        match (value.txid, value.vout) {
            (Some(hash), Some(index)) => Ok(TxIn::PrevOut { hash, index }),
            _ => Err(anyhow!(
                "Input is neither a previous outpoint nor a stakebase/coinbase/treasury input"
            )),
        }
    }
}

impl TryFrom<BlockVerboseResult> for Block {
    type Error = anyhow::Error;

    fn try_from(value: BlockVerboseResult) -> Result<Self, Self::Error> {
        let time = DateTime::from_timestamp(value.time, 0)
            .ok_or_else(|| anyhow!("Block {} has invalid time {}", value.hash, value.time))?;
        let stake_txs = value
            .rawstx
            .into_iter()
            .map(|tx| -> anyhow::Result<StakeTx> {
                Ok(StakeTx {
                    hash: tx.txid,
                    inputs: tx
                        .vin
                        .into_iter()
                        .map(TxIn::try_from)
                        .collect::<anyhow::Result<_>>()?,
                    outputs: tx
                        .vout
                        .into_iter()
                        .map(|x| TxOut {
                            value: Amount::from_coins(x.value),
                            class: ScriptClass::from(x.script_pub_key.class.as_str()),
                        })
                        .collect(),
                })
            })
            .collect::<anyhow::Result<_>>()?;

        Ok(Block {
            hash: value.hash,
            height: value.height,
            time,
            stake_txs,
        })
    }
}

pub struct RpcBlockSource {
    client: Client,
}

impl RpcBlockSource {
    pub fn new(server: &str, user: &str, pass: &str) -> bitcoincore_rpc::Result<Self> {
        let client = Client::new(server, Auth::UserPass(user.into(), pass.into()))?;
        Ok(Self { client })
    }
}

impl BlockSource for RpcBlockSource {
    fn best_height(&self) -> anyhow::Result<i64> {
        let best: BestBlockResult = self.client.call("getbestblock", &[])?;
        Ok(best.height)
    }

    fn block_hash(&self, height: i64) -> anyhow::Result<Hash> {
        Ok(self.client.call("getblockhash", &[json!(height)])?)
    }

    fn block(&self, hash: &Hash) -> anyhow::Result<Block> {
        let block: BlockVerboseResult = self.client.call(
            "getblock",
            &[json!(hash.to_string()), json!(true), json!(true)],
        )?;
        block.try_into()
    }
}
