// xHD Wallet Core — ARC-0052 BIP32-Ed25519 wallet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// profile: derivation-safety profile (§3, §9 — "profile values are semantic,
// not numeric labels")
//
// Types:
//   DerivationProfile — Peikert | Khovratovich, carrying zL truncation width
//                        and safe derivation depth directly

/// Controls how much of `zL` is folded into `kL` at each non-root derivation
/// step, and therefore how many steps can be taken before `8*zL + kL` can
/// overflow 256 bits.
///
/// `Peikert` truncates aggressively (9 bytes) and is only safe to depth 8;
/// `Khovratovich` is the original BIP32-Ed25519 paper's 28-byte truncation,
/// safe to depth 2^26.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivationProfile {
    Peikert,
    Khovratovich,
}

impl DerivationProfile {
    /// Number of low-order bytes of `zL` folded into `kL` at each step.
    pub fn truncation_width(self) -> usize {
        match self {
            DerivationProfile::Peikert => 9,
            DerivationProfile::Khovratovich => 28,
        }
    }

    /// Maximum derivation depth before `8*zL + kL` can overflow 256 bits,
    /// for documentation/testing purposes only — the overflow itself is
    /// what `derive_child_node_private` actually enforces.
    pub fn max_depth(self) -> u64 {
        match self {
            DerivationProfile::Peikert => 8,
            DerivationProfile::Khovratovich => 1 << 26,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_widths_match_spec() {
        assert_eq!(DerivationProfile::Peikert.truncation_width(), 9);
        assert_eq!(DerivationProfile::Khovratovich.truncation_width(), 28);
    }

    #[test]
    fn max_depths_match_spec() {
        assert_eq!(DerivationProfile::Peikert.max_depth(), 8);
        assert_eq!(DerivationProfile::Khovratovich.max_depth(), 67_108_864);
    }
}
