// xHD Wallet Core — ARC-0052 BIP32-Ed25519 wallet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// address: host-chain address-encoding helper (§6) — out of scope for the
// core, kept because the test vectors reference it.
//
// Functions:
//   encode() — base32(pubkey || SHA-512/256(pubkey)[28..32]), '=' stripped

use data_encoding::BASE32;
use sha2::{Digest, Sha512_256};

/// Encode a 32-byte Ed25519 public key as a 58-character address:
/// `base32(pk || SHA-512/256(pk)[28..32])` with `=` padding stripped.
///
/// Uses the last 4 bytes of the digest rather than the first 4: this is the
/// real-world Algorand address-checksum convention this scheme is modeled
/// on (see DESIGN.md's Open Questions), not the `[0..4]` reading some
/// transcriptions of the spec text give.
pub fn encode(pk: &[u8; 32]) -> String {
    let checksum = Sha512_256::digest(pk);

    let mut buf = Vec::with_capacity(36);
    buf.extend_from_slice(pk);
    buf.extend_from_slice(&checksum[28..32]);

    BASE32.encode(&buf).trim_end_matches('=').to_string()
}
