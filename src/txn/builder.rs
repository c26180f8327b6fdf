//! Transaction record construction and encoding.
//!
//! # Responsibilities
//! - Build payment, asset transfer, asset create, and application call
//!   records sharing one set of suggested parameters
//! - Stamp the flat fee (max of node minimum and configured floor)
//! - Provide the deterministic encoding that signatures and ids cover
//!
//! The canonical ledger wire codec belongs to the external SDK; this
//! gateway encodes transactions deterministically as JSON and derives
//! ids from a domain-separated SHA-512/256 of that encoding.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512_256};

use crate::ledger::client::SuggestedParams;
use crate::ledger::types::{Address, AppId, AssetId, MicroAlgos, Round, TxId};

mod b64 {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        BASE64.decode(s).map_err(serde::de::Error::custom)
    }
}

/// Atomic group id: SHA-512/256 over the member encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupId(pub [u8; 32]);

impl Serialize for GroupId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use base64::engine::general_purpose::STANDARD as BASE64;
        use base64::Engine as _;
        serializer.serialize_str(&BASE64.encode(self.0))
    }
}

impl<'de> Deserialize<'de> for GroupId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use base64::engine::general_purpose::STANDARD as BASE64;
        use base64::Engine as _;
        let s = String::deserialize(deserializer)?;
        let bytes = BASE64.decode(s).map_err(serde::de::Error::custom)?;
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("group id must be 32 bytes"))?;
        Ok(GroupId(array))
    }
}

/// An opaque application call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppArg(#[serde(with = "b64")] pub Vec<u8>);

/// Application call completion action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnComplete {
    NoOp,
    OptIn,
}

/// Parameters for creating a ledger-native asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetParams {
    pub asset_name: String,
    pub unit_name: String,
    /// Total supply in base units.
    pub total: u64,
    pub decimals: u32,
    pub default_frozen: bool,
    pub manager: Address,
    pub reserve: Address,
    pub freeze: Address,
    pub clawback: Address,
}

/// Operation-specific transaction fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TxnBody {
    Pay {
        receiver: Address,
        amount: MicroAlgos,
    },
    AssetTransfer {
        receiver: Address,
        amount: u64,
        asset_id: AssetId,
    },
    AssetCreate {
        params: AssetParams,
    },
    AppCall {
        app_id: AppId,
        on_complete: OnComplete,
        args: Vec<AppArg>,
        foreign_assets: Vec<AssetId>,
    },
}

/// An unsigned transaction: common header plus operation body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: Address,
    pub fee: MicroAlgos,
    pub first_valid: Round,
    pub last_valid: Round,
    pub genesis_id: String,
    pub genesis_hash: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub group: Option<GroupId>,
    pub body: TxnBody,
}

/// Validity window length in rounds.
const VALIDITY_WINDOW: u64 = 1_000;

impl Transaction {
    fn header(sender: Address, params: &SuggestedParams, flat_fee: u64, body: TxnBody) -> Self {
        Self {
            sender,
            fee: MicroAlgos(params.min_fee.max(flat_fee)),
            first_valid: Round(params.last_round),
            last_valid: Round(params.last_round + VALIDITY_WINDOW),
            genesis_id: params.genesis_id.clone(),
            genesis_hash: params.genesis_hash.clone(),
            group: None,
            body,
        }
    }

    /// A payment in microalgos.
    pub fn payment(
        sender: Address,
        receiver: Address,
        amount: MicroAlgos,
        params: &SuggestedParams,
        flat_fee: u64,
    ) -> Self {
        Self::header(sender, params, flat_fee, TxnBody::Pay { receiver, amount })
    }

    /// An asset transfer in base units.
    pub fn asset_transfer(
        sender: Address,
        receiver: Address,
        amount: u64,
        asset_id: AssetId,
        params: &SuggestedParams,
        flat_fee: u64,
    ) -> Self {
        Self::header(
            sender,
            params,
            flat_fee,
            TxnBody::AssetTransfer {
                receiver,
                amount,
                asset_id,
            },
        )
    }

    /// An asset creation.
    pub fn asset_create(
        sender: Address,
        asset_params: AssetParams,
        params: &SuggestedParams,
        flat_fee: u64,
    ) -> Self {
        Self::header(
            sender,
            params,
            flat_fee,
            TxnBody::AssetCreate {
                params: asset_params,
            },
        )
    }

    /// An application call.
    pub fn app_call(
        sender: Address,
        app_id: AppId,
        on_complete: OnComplete,
        args: Vec<AppArg>,
        foreign_assets: Vec<AssetId>,
        params: &SuggestedParams,
        flat_fee: u64,
    ) -> Self {
        Self::header(
            sender,
            params,
            flat_fee,
            TxnBody::AppCall {
                app_id,
                on_complete,
                args,
                foreign_assets,
            },
        )
    }

    /// Deterministic encoding covered by signatures and ids.
    pub fn encode(&self) -> Vec<u8> {
        // Serialization of these types cannot fail: no maps, no
        // non-finite floats.
        serde_json::to_vec(self).expect("transaction encoding is infallible")
    }

    /// Transaction id: hash of the domain-separated encoding.
    pub fn txid(&self) -> TxId {
        let mut hasher = Sha512_256::new();
        hasher.update(b"TX");
        hasher.update(self.encode());
        let digest = hasher.finalize();
        TxId(bs58::encode(digest).into_string())
    }
}

/// A signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTxn {
    pub txn: Transaction,
    #[serde(with = "b64")]
    pub sig: Vec<u8>,
}

/// Encode a signed group for submission.
pub fn encode_group(signed: &[SignedTxn]) -> Vec<u8> {
    serde_json::to_vec(signed).expect("group encoding is infallible")
}
