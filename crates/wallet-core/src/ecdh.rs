// xHD Wallet Core — ARC-0052 BIP32-Ed25519 wallet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// ecdh: Ed25519->Curve25519 conversion, X25519, and shared-point hash
// binding (§4.10)
//
// Functions:
//   ecdh() — X25519(kL, peer_M) bound to both parties' Montgomery keys

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use curve25519_dalek::edwards::CompressedEdwardsY;
use x25519_dalek::{PublicKey, StaticSecret};

use crate::error::WalletError;

type Blake2b256 = Blake2b<U32>;

/// Convert an Ed25519 point to its Curve25519 (Montgomery) u-coordinate.
fn edwards_to_montgomery(pk: &[u8; 32]) -> Result<[u8; 32], WalletError> {
    let point = CompressedEdwardsY(*pk)
        .decompress()
        .ok_or_else(|| WalletError::CryptoBackend("not a valid Ed25519 point".into()))?;
    Ok(point.to_montgomery().to_bytes())
}

/// Perform X25519 Diffie-Hellman between the derived `kL` and `peer_pk`, then
/// bind the shared point to both parties' Montgomery-converted public keys
/// in the caller-chosen order (`me_first`), hashed with BLAKE2b-256.
///
/// `kL` is used directly as the X25519 scalar: it already satisfies the
/// RFC 7748 clamp bits from the root derivation (§4.1), so the clamp
/// `x25519_dalek::StaticSecret` applies internally is a no-op.
pub fn ecdh(
    k_l: &[u8; 32],
    self_pk: &[u8; 32],
    peer_pk: &[u8; 32],
    me_first: bool,
) -> Result<[u8; 32], WalletError> {
    let self_m = edwards_to_montgomery(self_pk)?;
    let peer_m = edwards_to_montgomery(peer_pk)?;

    let secret = StaticSecret::from(*k_l);
    let peer_public = PublicKey::from(peer_m);
    let shared = secret.diffie_hellman(&peer_public);

    let mut hasher = Blake2b256::new();
    hasher.update(shared.as_bytes());
    if me_first {
        hasher.update(self_m);
        hasher.update(peer_m);
    } else {
        hasher.update(peer_m);
        hasher.update(self_m);
    }
    Ok(hasher.finalize().into())
}
