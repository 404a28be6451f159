//! Deterministic identifiers derived from Keccak-256 over seed strings.
//!
//! Every value a block carries (hash, miner, nonce, difficulty, size) comes
//! from hashing a seed string with a distinguishing `|suffix`, so a single
//! hash primitive yields unrelated-looking but reproducible values.

use tiny_keccak::{Hasher, Keccak};

pub const HASH_LEN: usize = 32;
pub const ADDRESS_LEN: usize = 20;

/// `0x` followed by 64 zeros; parent of block 1.
pub const ZERO_HASH: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";

/// `0x` followed by 40 zeros; sender of the genesis mint.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub fn keccak256(data: &[u8]) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    let mut hasher = Keccak::v256();
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

/// Keccak-256 of the UTF-8 bytes of `input`, as `0x`-prefixed lowercase hex.
pub fn digest(input: &str) -> String {
    prefixed(&keccak256(input.as_bytes()))
}

/// First 8 bytes of the digest read as a big-endian integer.
pub fn uint_from_hash(hash: &[u8; HASH_LEN]) -> u64 {
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash[..8]);
    u64::from_be_bytes(head)
}

/// `"{chain_seed}|block|{index}"`
pub fn block_seed(chain_seed: &str, index: u64) -> String {
    format!("{chain_seed}|block|{index}")
}

pub fn block_hash(chain_seed: &str, index: u64) -> String {
    digest(&block_seed(chain_seed, index))
}

/// Miner address: the low 20 bytes of `digest(seed|miner)`.
pub fn miner_address(block_seed: &str) -> String {
    let hash = keccak256(format!("{block_seed}|miner").as_bytes());
    prefixed(&hash[HASH_LEN - ADDRESS_LEN..])
}

/// 8-byte block nonce taken from the head of `digest(seed|nonce)`.
pub fn block_nonce(block_seed: &str) -> String {
    let hash = keccak256(format!("{block_seed}|nonce").as_bytes());
    prefixed(&hash[..8])
}

/// `uint_from_hash(digest(seed|suffix)) % modulus`
pub fn bounded(block_seed: &str, suffix: &str, modulus: u64) -> u64 {
    let hash = keccak256(format!("{block_seed}|{suffix}").as_bytes());
    uint_from_hash(&hash) % modulus
}

/// `digest("{block_seed}|tx|{unique_seed}")`
pub fn tx_hash(block_seed: &str, unique_seed: &str) -> String {
    digest(&format!("{block_seed}|tx|{unique_seed}"))
}

/// `0x` + 40 hex digits, any case.
pub fn is_address(s: &str) -> bool {
    is_prefixed_hex(s, ADDRESS_LEN * 2)
}

/// `0x` + 64 hex digits, any case.
pub fn is_hash(s: &str) -> bool {
    is_prefixed_hex(s, HASH_LEN * 2)
}

fn is_prefixed_hex(s: &str, digits: usize) -> bool {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(body) => body.len() == digits && body.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

fn prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_of_empty_string_is_keccak_not_sha3() {
        assert_eq!(
            digest(""),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn digest_is_deterministic_and_well_formed() {
        let a = digest("KrossChain|block|42");
        let b = digest("KrossChain|block|42");
        assert_eq!(a, b);
        assert!(is_hash(&a));
        assert_eq!(a, a.to_lowercase());
        assert_ne!(a, digest("KrossChain|block|43"));
    }

    #[test]
    fn suffixes_separate_domains() {
        let seed = block_seed("KrossChain", 7);
        assert_eq!(seed, "KrossChain|block|7");
        let miner = miner_address(&seed);
        let nonce = block_nonce(&seed);
        assert!(is_address(&miner));
        assert_eq!(nonce.len(), 2 + 16);
        assert_ne!(block_hash("KrossChain", 7), digest(&format!("{seed}|miner")));
        assert!(digest(&format!("{seed}|miner")).ends_with(&miner[2..]));
        assert!(digest(&format!("{seed}|nonce")).starts_with(&nonce));
    }

    #[test]
    fn uint_from_hash_reads_leading_bytes_big_endian() {
        let mut hash = [0u8; HASH_LEN];
        hash[7] = 1;
        hash[31] = 0xff;
        assert_eq!(uint_from_hash(&hash), 1);
        hash[0] = 0x01;
        assert_eq!(uint_from_hash(&hash), (1u64 << 56) + 1);
    }

    #[test]
    fn bounded_stays_below_modulus() {
        for i in 1..50 {
            let seed = block_seed("KrossChain", i);
            assert!(bounded(&seed, "difficulty", 1_000_000) < 1_000_000);
        }
    }

    #[test]
    fn address_and_hash_shapes() {
        assert!(is_address(ZERO_ADDRESS));
        assert!(is_address("0xB9ff77d1a6b9802C32632298eB5CC2FDb278049b"));
        assert!(!is_address("B9ff77d1a6b9802C32632298eB5CC2FDb278049b"));
        assert!(!is_address("0xB9ff77d1a6b9802C32632298eB5CC2FDb27804"));
        assert!(!is_address("0xZ9ff77d1a6b9802C32632298eB5CC2FDb278049b"));
        assert!(is_hash(ZERO_HASH));
        assert!(!is_hash(ZERO_ADDRESS));
    }
}
