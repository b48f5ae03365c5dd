// xHD Wallet Core — ARC-0052 BIP32-Ed25519 wallet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// seed: 64-byte seed -> 96-byte extended root key (§4.1 fromSeed)
//
// Types:
//   Seed — owned, zeroizing 64-byte BIP-39 seed
// Functions:
//   from_seed() — SHA-512 + iterated HMAC-SHA512 until kL[31] bit 5 clears, then clamp

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::derivation::ExtendedPrivateKey;
use crate::error::WalletError;

type HmacSha512 = Hmac<Sha512>;

/// Iteration cap for the root-derivation HMAC loop (spec: "an implementation
/// may cap iterations at a fixed constant"). The loop terminates with
/// overwhelming probability on the first pass; this cap only guards against
/// a malformed seed.
const MAX_SEED_ITERATIONS: u32 = 256;

/// A 64-byte BIP-39 seed, owned exclusively by the wallet for its lifetime.
/// Treated as secret: zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    pub fn new(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl From<[u8; 64]> for Seed {
    fn from(bytes: [u8; 64]) -> Self {
        Self::new(bytes)
    }
}

/// Derive the 96-byte extended root key from a 64-byte seed (§4.1).
pub fn from_seed(seed: &Seed) -> Result<ExtendedPrivateKey, WalletError> {
    let mut k = Sha512::digest(seed.as_bytes());
    let mut k_l = [0u8; 32];
    let mut k_r = [0u8; 32];

    let mut iterations = 0u32;
    loop {
        k_l.copy_from_slice(&k[..32]);
        k_r.copy_from_slice(&k[32..]);

        if k_l[31] & 0b0010_0000 == 0 {
            break;
        }

        iterations += 1;
        if iterations >= MAX_SEED_ITERATIONS {
            return Err(WalletError::SeedRejected(MAX_SEED_ITERATIONS));
        }

        let mut mac = HmacSha512::new_from_slice(&k_l)
            .map_err(|e| WalletError::CryptoBackend(e.to_string()))?;
        mac.update(&k_r);
        k = mac.finalize().into_bytes();
    }

    k_l[0] &= 0b1111_1000;
    k_l[31] &= 0b0111_1111;
    k_l[31] |= 0b0100_0000;

    let mut chain_input = Vec::with_capacity(65);
    chain_input.push(0x01);
    chain_input.extend_from_slice(seed.as_bytes());
    let chain_code: [u8; 32] = Sha256::digest(&chain_input).into();
    chain_input.zeroize();

    Ok(ExtendedPrivateKey::new(k_l, k_r, chain_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_seed() -> Seed {
        // "abandon...about" BIP-39 test seed, passphrase "".
        Seed::new([
            0x5e, 0xb0, 0x0b, 0xbd, 0xdc, 0xf0, 0x69, 0x08, 0x48, 0x89, 0xa8, 0xab, 0x91, 0x55,
            0x56, 0x81, 0x65, 0xf5, 0xc4, 0x53, 0xcc, 0xb8, 0x5e, 0x70, 0x81, 0x1a, 0xae, 0xd6,
            0xf6, 0xda, 0x5f, 0xc1, 0x9a, 0x5a, 0xc4, 0x0b, 0x38, 0x9c, 0xd3, 0x70, 0xd0, 0x86,
            0x20, 0x6d, 0xec, 0x8a, 0xa6, 0xc4, 0x3d, 0xae, 0xa6, 0x69, 0x0f, 0x20, 0xad, 0x3d,
            0x8d, 0x48, 0xb2, 0xd2, 0xce, 0x9e, 0x38, 0xe4,
        ])
    }

    #[test]
    fn clamp_invariants_hold() {
        let xprv = from_seed(&test_seed()).unwrap();
        let kl = xprv.k_l();
        assert_eq!(kl[0] & 0b0000_0111, 0, "low 3 bits of kL[0] must be clear");
        assert_eq!(kl[31] & 0b1000_0000, 0, "bit 7 of kL[31] must be clear");
        assert_eq!(kl[31] & 0b0100_0000, 0b0100_0000, "bit 6 of kL[31] must be set");
        assert_eq!(kl[31] & 0b0010_0000, 0, "bit 5 of kL[31] must be zero");
    }

    #[test]
    fn deterministic() {
        let a = from_seed(&test_seed()).unwrap();
        let b = from_seed(&test_seed()).unwrap();
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn different_seeds_different_roots() {
        let mut other = test_seed();
        other.0[0] ^= 0xff;
        let a = from_seed(&test_seed()).unwrap();
        let b = from_seed(&other).unwrap();
        assert_ne!(a.to_bytes(), b.to_bytes());
    }
}
