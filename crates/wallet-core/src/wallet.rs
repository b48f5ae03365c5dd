// xHD Wallet Core — ARC-0052 BIP32-Ed25519 wallet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// wallet: the public, seed-holding entry point (§2, §5, §6)
//
// Types:
//   Wallet — constructed once from a seed, immutable thereafter
// Functions:
//   verify() — free-standing Ed25519 detached verify

use crate::context::{bip44_path, KeyContext};
use crate::derivation::{self, ExtendedPrivateKey};
use crate::domain_guard::{self, SignMetadata};
use crate::ecdh as ecdh_mod;
use crate::error::WalletError;
use crate::profile::DerivationProfile;
use crate::seed::{self, Seed};
use crate::signing;

/// A BIP32-Ed25519 wallet over a single 64-byte seed. Stateless beyond the
/// seed: every public operation recomputes the extended key chain for that
/// call and discards it. Safe to share read-only across threads (the seed
/// is never mutated after construction).
pub struct Wallet {
    seed: Seed,
}

impl Wallet {
    /// Construct a wallet from a raw 64-byte BIP-39 seed. No config file, no
    /// env vars: the constructor arguments *are* the configuration.
    pub fn from_seed(seed: [u8; 64]) -> Self {
        Self { seed: Seed::new(seed) }
    }

    /// Construct a wallet from a BIP-39 mnemonic phrase (the out-of-scope
    /// helper §6 calls for so test vectors can start from a mnemonic).
    pub fn from_mnemonic(phrase: &str, passphrase: &str) -> Result<Self, WalletError> {
        let seed = crate::bip39_utils::mnemonic_to_seed(phrase, passphrase)
            .map_err(WalletError::CryptoBackend)?;
        Ok(Self::from_seed(seed))
    }

    fn root(&self) -> Result<ExtendedPrivateKey, WalletError> {
        seed::from_seed(&self.seed)
    }

    fn derive(
        &self,
        ctx: KeyContext,
        account: u32,
        change: u32,
        index: u32,
        profile: DerivationProfile,
    ) -> Result<ExtendedPrivateKey, WalletError> {
        let root = self.root()?;
        let path = bip44_path(ctx, account, change, index);
        derivation::derive_private_path(&root, &path, profile)
    }

    /// `keyGen(ctx, account, change, index, profile) -> pk[32]`.
    pub fn key_gen(
        &self,
        ctx: KeyContext,
        account: u32,
        change: u32,
        index: u32,
        profile: DerivationProfile,
    ) -> Result<[u8; 32], WalletError> {
        let ext = self.derive(ctx, account, change, index, profile)?;
        Ok(derivation::scalar_mul_base(ext.k_l()))
    }

    /// `signData(ctx, account, change, index, data, metadata, profile) -> sig[64]`.
    /// Runs the domain guard first; `DataValidation` on rejection.
    pub fn sign_data(
        &self,
        ctx: KeyContext,
        account: u32,
        change: u32,
        index: u32,
        data: &[u8],
        metadata: &SignMetadata,
        profile: DerivationProfile,
    ) -> Result<[u8; 64], WalletError> {
        domain_guard::validate_data(data, metadata)?;
        let ext = self.derive(ctx, account, change, index, profile)?;
        Ok(signing::raw_sign(&ext, data))
    }

    /// `signAlgoTransaction(ctx, account, change, index, prefixedTxBytes, profile) -> sig[64]`.
    /// Does not invoke the domain guard: this is the one escape hatch for
    /// payloads the host chain has already tagged with its own prefix.
    pub fn sign_algo_transaction(
        &self,
        ctx: KeyContext,
        account: u32,
        change: u32,
        index: u32,
        prefixed_tx: &[u8],
        profile: DerivationProfile,
    ) -> Result<[u8; 64], WalletError> {
        let ext = self.derive(ctx, account, change, index, profile)?;
        Ok(signing::raw_sign(&ext, prefixed_tx))
    }

    /// `ECDH(ctx, account, change, index, peerPk, meFirst, profile) -> secret[32]`.
    pub fn ecdh(
        &self,
        ctx: KeyContext,
        account: u32,
        change: u32,
        index: u32,
        peer_pk: &[u8; 32],
        me_first: bool,
        profile: DerivationProfile,
    ) -> Result<[u8; 32], WalletError> {
        let ext = self.derive(ctx, account, change, index, profile)?;
        let self_pk = derivation::scalar_mul_base(ext.k_l());
        ecdh_mod::ecdh(ext.k_l(), &self_pk, peer_pk, me_first)
    }
}

/// `verify(sig, msg, pk) -> bool`, free-standing per §6.
pub fn verify(sig: &[u8; 64], msg: &[u8], pk: &[u8; 32]) -> bool {
    signing::verify(sig, msg, pk)
}
