use crate::chain::{ScriptClass, StakeTx, TxIn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxType {
    /// Ticket purchase (SStx).
    Purchase,
    /// Vote (SSGen).
    Vote,
    Other,
}

pub trait TxClassifier {
    fn classify(&self, tx: &StakeTx) -> TxType;
}

/// Classifies from the output script classes the node already computed.
///
/// Revocations and treasury transactions fall through to [`TxType::Other`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptClassifier;

impl TxClassifier for ScriptClassifier {
    fn classify(&self, tx: &StakeTx) -> TxType {
        if matches!(
            tx.outputs.first().map(|x| &x.class),
            Some(ScriptClass::StakeSubmission)
        ) {
            return TxType::Purchase;
        }

        let is_vote = tx.inputs.len() >= 2
            && tx.inputs[0] == TxIn::Stakebase
            && tx.outputs.iter().any(|x| x.class == ScriptClass::StakeGen);
        if is_vote {
            return TxType::Vote;
        }

        TxType::Other
    }
}
