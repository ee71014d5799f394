//! Local transaction signing for endpoints that do not expose `eth_sendTransaction`.

use std::fmt;

use alloy_core::{
    primitives::{Address, B256, Bytes, U256, keccak256},
    rlp::{EMPTY_STRING_CODE, Encodable, Header},
};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};

/// A legacy transaction, signed with EIP-155 replay protection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    /// `None` creates a contract.
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
}

impl LegacyTransaction {
    fn encode_fields(&self, out: &mut Vec<u8>) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        match self.to {
            Some(to) => to.encode(out),
            None => out.push(EMPTY_STRING_CODE),
        }
        self.value.encode(out);
        self.input.encode(out);
    }

    /// The hash the sender signs.
    pub fn signature_hash(&self) -> B256 {
        let mut payload = Vec::new();
        self.encode_fields(&mut payload);
        self.chain_id.encode(&mut payload);
        0u8.encode(&mut payload);
        0u8.encode(&mut payload);
        keccak256(rlp_list(payload))
    }

    fn encode_signed(&self, v: u64, r: U256, s: U256) -> Bytes {
        let mut payload = Vec::new();
        self.encode_fields(&mut payload);
        v.encode(&mut payload);
        r.encode(&mut payload);
        s.encode(&mut payload);
        rlp_list(payload).into()
    }
}

fn rlp_list(payload: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 9);
    Header {
        list: true,
        payload_length: payload.len(),
    }
    .encode(&mut out);
    out.extend(payload);
    out
}

/// A private key held by this process.
#[derive(Clone)]
pub struct LocalWallet {
    signer: PrivateKeySigner,
    address: Address,
}

impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl LocalWallet {
    /// Parse a hex-encoded secp256k1 private key, with or without `0x`.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key
            .trim()
            .trim_start_matches("0x")
            .parse()
            .context("Invalid private key")?;
        let address = Address::from(signer.address().0.0);

        Ok(Self { signer, address })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign `tx`, returning the raw bytes for `eth_sendRawTransaction`.
    pub fn sign(&self, tx: &LegacyTransaction) -> Result<Bytes> {
        let hash = tx.signature_hash();
        let signature = self
            .signer
            .sign_hash_sync(&hash.0.into())
            .context("Failed to sign transaction")?;

        let v = tx.chain_id * 2 + 35 + u64::from(signature.v());
        let r = U256::from_be_bytes(signature.r().to_be_bytes::<32>());
        let s = U256::from_be_bytes(signature.s().to_be_bytes::<32>());

        Ok(tx.encode_signed(v, r, s))
    }
}
