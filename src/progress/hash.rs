//! Non-cryptographic hashes used for the progress checksum and flag checks.
//!
//! Neither function resists a motivated user. They keep honest users from
//! editing `state.bin` by hand and from reading the flag out of it.

/// Salt mixed into every progress checksum
pub const SECRET_KEY: &str = "bashquest_internal_secret";

const DJB2_SEED: u32 = 5381;
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Bytes enter the checksum sign-extended, as a C `char` would.
fn widen(byte: u8) -> u32 {
    byte as i8 as i32 as u32
}

/// DJB2 variant with xor mixing: `h = (h * 33) ^ byte`
pub fn djb2_xor(bytes: &[u8]) -> u32 {
    bytes.iter().fold(DJB2_SEED, |h, &b| {
        (h << 5).wrapping_add(h) ^ widen(b)
    })
}

/// Running checksum over the progress fields.
///
/// `path_buffer` is the whole fixed-capacity buffer, padding included.
pub fn checksum(challenge: u32, flag_hash: u64, path_buffer: &[u8]) -> u32 {
    let mut h = djb2_xor(SECRET_KEY.as_bytes());
    h ^= challenge;
    h ^= (flag_hash as u32) ^ ((flag_hash >> 32) as u32);
    for &b in path_buffer {
        h ^= widen(b);
    }
    h
}

/// FNV-1a 64-bit hash of the exact flag bytes
pub fn flag_hash(flag: &str) -> u64 {
    flag.as_bytes().iter().fold(FNV_OFFSET_BASIS, |h, &b| {
        (h ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_hash_reference_vectors() {
        assert_eq!(flag_hash(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(flag_hash("a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_flag_hash_is_exact() {
        assert_ne!(flag_hash("treasure"), flag_hash("Treasure"));
        assert_ne!(flag_hash("treasure"), flag_hash("treasure "));
    }

    #[test]
    fn test_djb2_empty_is_seed() {
        assert_eq!(djb2_xor(b""), 5381);
        assert_eq!(djb2_xor(b"a"), (5381u32 * 33) ^ 0x61);
    }

    #[test]
    fn test_high_bytes_are_sign_extended() {
        assert_eq!(widen(0x7f), 0x7f);
        assert_eq!(widen(0x80), 0xffff_ff80);
    }

    #[test]
    fn test_checksum_sees_high_half_of_flag() {
        let buf = [0u8; 16];
        let low = checksum(1, 0x0000_0000_0000_0001, &buf);
        let high = checksum(1, 0x0000_0001_0000_0000, &buf);
        assert_eq!(low, high, "folding xors both halves together");
        assert_ne!(checksum(1, 0x0000_0001_0000_0000, &buf), checksum(1, 0, &buf));
    }

    #[test]
    fn test_checksum_sees_padding() {
        let mut buf = [0u8; 16];
        let before = checksum(2, 42, &buf);
        buf[15] = 1;
        assert_ne!(before, checksum(2, 42, &buf));
    }
}
