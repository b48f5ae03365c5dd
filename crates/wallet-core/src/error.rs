// xHD Wallet Core — ARC-0052 BIP32-Ed25519 wallet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// error: the closed error taxonomy the wallet surfaces to callers
//
// Types:
//   WalletError — DerivationOverflow, InvalidIndex, DataValidation, SeedRejected, CryptoBackend

use thiserror::Error;

/// Errors the wallet core can return. Verification failure is deliberately not
/// a variant here — `verify()` returns `bool`, never an error.
#[derive(Debug, Error)]
pub enum WalletError {
    /// `8*zL + kL` no longer fits in 256 bits at this derivation depth.
    /// Fatal for the requested path: retrying with the same path and profile
    /// will fail identically.
    #[error("derivation overflow: 8*zL + kL exceeded 256 bits at this depth")]
    DerivationOverflow,

    /// `deriveChildNodePublic` was called with a hardened index.
    #[error("invalid index: {0} is hardened, expected a soft index < 2^31")]
    InvalidIndex(u32),

    /// The domain guard rejected the payload: reserved-prefix match, decode
    /// failure, or JSON-Schema violation.
    #[error("data validation failed: {0}")]
    DataValidation(String),

    /// `fromSeed`'s iterated HMAC did not terminate within the implementation cap.
    #[error("seed rejected: iterated HMAC did not terminate within {0} iterations")]
    SeedRejected(u32),

    /// Any underlying crypto-primitive failure (HMAC key length, malformed
    /// curve point, etc.), collapsed into one variant.
    #[error("crypto backend error: {0}")]
    CryptoBackend(String),
}
