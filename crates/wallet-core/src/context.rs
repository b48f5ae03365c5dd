// xHD Wallet Core — ARC-0052 BIP32-Ed25519 wallet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// context: key context (coin component) and BIP-44 path construction (§3, §6)
//
// Types:
//   KeyContext — Address | Identity, selecting the ARC-0052 coin component
// Functions:
//   bip44_path() — build the [44', coin', account', change, index] path

/// Hardening offset: `i' = 2^31 + i`.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Which ARC-0052 coin component a derivation uses. `Address` signs/derives
/// blockchain account keys; `Identity` is used for non-address identity keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Address,
    Identity,
}

impl KeyContext {
    /// The (non-hardened) coin type; hardening is applied by `bip44_path`.
    pub fn coin_type(self) -> u32 {
        match self {
            KeyContext::Address => 283,
            KeyContext::Identity => 0,
        }
    }
}

/// Build the five-index BIP-44 path `[44', coin', account', change, index]`.
/// `44`, the coin type, and `account` are always hardened; `change` and
/// `index` are never hardened — the caller is responsible for passing soft
/// values there (the spec does not hardened-guard them at this layer).
pub fn bip44_path(ctx: KeyContext, account: u32, change: u32, index: u32) -> [u32; 5] {
    [
        44 | HARDENED_OFFSET,
        ctx.coin_type() | HARDENED_OFFSET,
        account | HARDENED_OFFSET,
        change,
        index,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_types_match_spec() {
        assert_eq!(KeyContext::Address.coin_type(), 283);
        assert_eq!(KeyContext::Identity.coin_type(), 0);
    }

    #[test]
    fn path_hardens_first_three_components_only() {
        let path = bip44_path(KeyContext::Address, 7, 1, 2);
        assert_eq!(path[0], 44 | HARDENED_OFFSET);
        assert_eq!(path[1], 283 | HARDENED_OFFSET);
        assert_eq!(path[2], 7 | HARDENED_OFFSET);
        assert_eq!(path[3], 1);
        assert_eq!(path[4], 2);
    }
}
