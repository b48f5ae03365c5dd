// xHD Wallet Core — ARC-0052 BIP32-Ed25519 wallet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// signing: the non-standard EdDSA signing pipeline and standard Ed25519
// verification (§4.7, §4.8)
//
// Functions:
//   raw_sign() — sign with a pre-clamped scalar and a derived nonce seed
//   verify()   — standard detached Ed25519 verify

use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::scalar::Scalar;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha512};

use crate::derivation::ExtendedPrivateKey;

/// Sign `message` with the derived extended private key.
///
/// This differs from RFC 8032 standard Ed25519 in two ways: the secret
/// scalar is already in clamped form (no per-sign SHA-512 of a seed), and the
/// nonce seed is `kR`, the right half of the *derived* extended key, rather
/// than the lower half of `H(seed)`. Verification is standard Ed25519.
pub fn raw_sign(ext: &ExtendedPrivateKey, message: &[u8]) -> [u8; 64] {
    let scalar = Scalar::from_bytes_mod_order(*ext.k_l());
    let a_point = &scalar * &ED25519_BASEPOINT_TABLE;
    let a_bytes = a_point.compress().to_bytes();

    let mut r_hasher = Sha512::new();
    r_hasher.update(ext.k_r());
    r_hasher.update(message);
    let r_digest: [u8; 64] = r_hasher.finalize().into();
    let r_scalar = Scalar::from_bytes_mod_order_wide(&r_digest);
    let r_point = &r_scalar * &ED25519_BASEPOINT_TABLE;
    let r_bytes = r_point.compress().to_bytes();

    let mut h_hasher = Sha512::new();
    h_hasher.update(r_bytes);
    h_hasher.update(a_bytes);
    h_hasher.update(message);
    let h_digest: [u8; 64] = h_hasher.finalize().into();
    let h_scalar = Scalar::from_bytes_mod_order_wide(&h_digest);

    let s_scalar = r_scalar + h_scalar * scalar;

    let mut sig = [0u8; 64];
    sig[..32].copy_from_slice(&r_bytes);
    sig[32..].copy_from_slice(s_scalar.as_bytes());
    sig
}

/// Standard Ed25519 detached verify (§4.8). No extensions: a malformed
/// public key or signature simply fails to verify rather than erroring.
pub fn verify(sig: &[u8; 64], msg: &[u8], pk: &[u8; 32]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(pk) else {
        return false;
    };
    let signature = Signature::from_bytes(sig);
    verifying_key.verify(msg, &signature).is_ok()
}
