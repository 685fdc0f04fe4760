//! Downstream address derivation and account-history probing
//!
//! Consumes a written result file: derives the BIP39 seed for each phrase,
//! walks the BIP49 path m/49'/0'/0'/0/0, encodes a P2WPKH-in-P2SH address,
//! and asks an account-history service whether it has ever been used.

use crate::error::{CryptoError, Result};
use bip39::{Language, Mnemonic};
use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::secp256k1::Secp256k1;
use bitcoin::{Address, CompressedPublicKey, Network};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Derivation path probed for each surviving phrase
pub const DERIVATION_PATH: &str = "m/49'/0'/0'/0/0";

/// Default account-history API base (BlockCypher address endpoint)
pub const DEFAULT_API_BASE: &str = "https://api.blockcypher.com/v1/btc/main";

/// A phrase together with its derived address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAccount {
    pub phrase: String,
    pub address: String,
}

/// Derives the P2WPKH-in-P2SH address for one mnemonic phrase.
pub fn derive_account(phrase: &str, passphrase: &str) -> Result<DerivedAccount> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|e| CryptoError::Bip39(e.to_string()))?;
    let seed = mnemonic.to_seed(passphrase);

    let secp = Secp256k1::new();
    let master = Xpriv::new_master(Network::Bitcoin, &seed).map_err(CryptoError::Bip32)?;
    let path = DerivationPath::from_str(DERIVATION_PATH).map_err(CryptoError::Bip32)?;
    let child = master.derive_priv(&secp, &path).map_err(CryptoError::Bip32)?;

    let private_key = child.to_priv();
    let public_key = CompressedPublicKey::from_private_key(&secp, &private_key)
        .map_err(|e| CryptoError::KeyEncoding(e.to_string()))?;
    let address = Address::p2shwpkh(&public_key, Network::Bitcoin);

    Ok(DerivedAccount {
        phrase: phrase.to_string(),
        address: address.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct AddressSummary {
    n_tx: u64,
}

/// Client for the remote transaction-history lookup
#[derive(Debug)]
pub struct HistoryClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HistoryClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Total number of transactions ever seen for an address.
    ///
    /// Network failures and non-success statuses propagate; the caller
    /// decides whether to retry.
    pub fn transaction_count(&self, address: &str) -> Result<u64> {
        let url = format!("{}/addrs/{}?limit=0", self.base_url, address);
        let summary: AddressSummary = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(summary.n_tx)
    }
}

/// Derives an address per phrase and returns the first with past
/// transactions, or `None` when no probed address has history.
pub fn probe_phrases(
    phrases: &[Vec<String>],
    passphrase: &str,
    client: &HistoryClient,
) -> Result<Option<DerivedAccount>> {
    info!("Deriving addresses");
    let accounts: Vec<DerivedAccount> = phrases
        .iter()
        .map(|words| derive_account(&words.join(" "), passphrase))
        .collect::<Result<_>>()?;
    info!("{} addresses derived", accounts.len());

    for account in accounts {
        info!("Checking address {}", account.address);
        if client.transaction_count(&account.address)? > 0 {
            return Ok(Some(account));
        }
    }

    Ok(None)
}
