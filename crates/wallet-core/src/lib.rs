// xHD Wallet Core — ARC-0052 BIP32-Ed25519 wallet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// wallet-core: ARC-0052 BIP32-Ed25519 hierarchical deterministic wallet core
//
// Modules:
//   seed          — seed -> extended root key (§4.1)
//   derivation    — hardened/non-hardened child derivation, path walk (§4.2-4.6)
//   profile       — Peikert / Khovratovich derivation-safety profiles (§3, §9)
//   context       — Address / Identity key contexts, BIP-44 path construction
//   signing       — pre-clamped EdDSA sign, standard Ed25519 verify (§4.7, §4.8)
//   domain_guard  — reserved-prefix + JSON-Schema payload gate (§4.9)
//   ecdh          — Ed25519->Curve25519 conversion, X25519, hash binding (§4.10)
//   address       — base32 address helper (§6, out of scope for the core)
//   wallet        — Wallet: the public, seed-holding entry point (§2, §5, §6)
//   bip39_utils   — out-of-scope mnemonic helper, kept for test vectors (§11)
//   error         — the closed WalletError taxonomy (§7)

pub mod address;
pub mod bip39_utils;
pub mod context;
pub mod derivation;
pub mod domain_guard;
pub mod ecdh;
pub mod error;
pub mod profile;
pub mod seed;
pub mod signing;
pub mod wallet;

pub use context::KeyContext;
pub use derivation::{derive_child_node_public, derive_key, ExtendedPrivateKey, ExtendedPublicKey};
pub use domain_guard::{Encoding, SignMetadata};
pub use error::WalletError;
pub use profile::DerivationProfile;
pub use seed::Seed;
pub use wallet::{verify, Wallet};
