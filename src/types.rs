use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const ATOMS_PER_COIN: i64 = 100_000_000;

#[derive(Debug, thiserror::Error)]
pub enum HashParseError {
    #[error("invalid hash length: {0} hex characters, expected 64")]
    Length(usize),
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// 32-byte chain hash.
///
/// The text form is the byte-reversed hex string the node prints, the same
/// convention Bitcoin uses for txids and block hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct Hash([u8; 32]);

impl Hash {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The first 8 characters of the text form.
    pub fn short(&self) -> String {
        let mut s = self.to_string();
        s.truncate(8);
        s
    }
}

impl FromStr for Hash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 64 {
            return Err(HashParseError::Length(s.len()));
        }
        let mut bytes = [0_u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        bytes.reverse();
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Hash {
    type Error = HashParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        f.write_str(&hex::encode(reversed))
    }
}

/// Coin amount in atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_atoms(atoms: i64) -> Self {
        Self(atoms)
    }

    /// Rounds to the nearest atom. The node reports values as floating-point
    /// coins.
    pub fn from_coins(coins: f64) -> Self {
        Self((coins * ATOMS_PER_COIN as f64).round() as i64)
    }

    pub const fn to_atoms(self) -> i64 {
        self.0
    }
}

impl Display for Amount {
    /// Shortest decimal coin value, e.g. `12.5 DCR`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / ATOMS_PER_COIN as u64;
        let frac = abs % ATOMS_PER_COIN as u64;
        if frac == 0 {
            return write!(f, "{sign}{whole} DCR");
        }
        let frac = format!("{frac:08}");
        write!(f, "{sign}{whole}.{} DCR", frac.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn hash_text_form_is_reversed() {
        let hash: Hash = "00000000000000000000000000000000000000000000000000000000000000ff"
            .parse()
            .unwrap();
        let mut expected = [0_u8; 32];
        expected[0] = 0xff;
        assert_eq!(hash.as_bytes(), &expected);
        assert_eq!(
            hash.to_string(),
            "00000000000000000000000000000000000000000000000000000000000000ff"
        );
    }

    #[test]
    fn hash_short() {
        let hash = Hash::from_bytes(hex!(
            "0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20"
        ));
        assert_eq!(hash.short(), "201f1e1d");
    }

    #[test]
    fn hash_rejects_bad_input() {
        assert!(matches!(
            "abcd".parse::<Hash>(),
            Err(HashParseError::Length(4))
        ));
        let bad = "zz".repeat(32);
        assert!(matches!(bad.parse::<Hash>(), Err(HashParseError::Hex(_))));
    }

    #[test]
    fn hash_from_json() {
        let text = "298e5cc3d985bfe7f81dc135f360abe089edd4396b86d2de66b0cef42b21d980";
        let hash: Hash = serde_json::from_value(serde_json::json!(text)).unwrap();
        assert_eq!(hash.to_string(), text);
    }

    #[test]
    fn amount_display() {
        assert_eq!(Amount::from_atoms(100 * ATOMS_PER_COIN).to_string(), "100 DCR");
        assert_eq!(Amount::from_atoms(1_250_000_000).to_string(), "12.5 DCR");
        assert_eq!(Amount::from_atoms(1).to_string(), "0.00000001 DCR");
        assert_eq!(Amount::from_atoms(-150_000_000).to_string(), "-1.5 DCR");
        assert_eq!(Amount::ZERO.to_string(), "0 DCR");
    }

    #[test]
    fn amount_from_coins() {
        assert_eq!(Amount::from_coins(2.0).to_atoms(), 200_000_000);
        assert_eq!(Amount::from_coins(0.1).to_atoms(), 10_000_000);
        assert_eq!(Amount::from_coins(139.58254327).to_atoms(), 13_958_254_327);
    }
}
