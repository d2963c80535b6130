use super::ValueData;

// Discriminant tags. Without them Integer(0) and Bytes([0; 8]) would hash
// identically, as would Empty and Bytes([]).
const TAG_EMPTY: u8 = 0x00;
const TAG_BYTES: u8 = 0x01;
const TAG_INTEGER: u8 = 0x02;

/// CRC-32 binding `data` to `key`.
///
/// Hashed layout:
/// ```text
/// ┌─────────────┬───────────┬─────────┬──────────────────────────────┐
/// │ Key Len(4B) │ Key (var) │ Tag(1B) │ Payload (var) / Integer (8B) │
/// └─────────────┴───────────┴─────────┴──────────────────────────────┘
/// ```
///
/// The key length keeps ("ab", "c") apart from ("a", "bc"). Integers are
/// big-endian two's complement.
pub(super) fn compute(key: &[u8], data: &ValueData) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&(key.len() as u32).to_le_bytes());
    hasher.update(key);

    match data {
        ValueData::Empty => hasher.update(&[TAG_EMPTY]),
        ValueData::Bytes(bytes) => {
            hasher.update(&[TAG_BYTES]);
            hasher.update(bytes);
        }
        ValueData::Integer(i) => {
            hasher.update(&[TAG_INTEGER]);
            hasher.update(&i.to_be_bytes());
        }
    }

    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_separate_variants() {
        let key = b"key";
        let empty = compute(key, &ValueData::Empty);
        let no_bytes = compute(key, &ValueData::Bytes(Vec::new()));
        let zero = compute(key, &ValueData::Integer(0));
        let zero_bytes = compute(key, &ValueData::Bytes(vec![0; 8]));

        assert_ne!(empty, no_bytes);
        assert_ne!(empty, zero);
        assert_ne!(zero, zero_bytes);
    }

    #[test]
    fn test_key_boundary() {
        let a = compute(b"ab", &ValueData::Bytes(b"c".to_vec()));
        let b = compute(b"a", &ValueData::Bytes(b"bc".to_vec()));
        assert_ne!(a, b);
    }
}
