use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest key, in bytes, the store will address.
pub const KEY_MAX_LENGTH: usize = 4096;

/// The bytes of the largest key: `KEY_MAX_LENGTH` bytes of 0xff.
pub const KEY_MAX_BYTES: [u8; KEY_MAX_LENGTH] = [0xff; KEY_MAX_LENGTH];

/// The smallest key. Every other key sorts after it.
pub const KEY_MIN: Key = Key(Vec::new());

/// An ordered, length-bounded byte string addressing a record.
///
/// Ordering is unsigned byte-lexicographic, so the empty key is the least
/// key and a proper prefix sorts before its extensions:
///
/// ```text
/// ""  <  "\x00"  <  "a"  <  "a\x00"  <  "a\x01"  <  "b"
/// ```
///
/// Keys are never mutated in place. `next`, `prev` and `prefix_end` each
/// return a freshly allocated key that shares nothing with `self`.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Key(Vec<u8>);

impl Key {
    /// Build a key, rejecting input longer than `KEY_MAX_LENGTH`.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.len() > KEY_MAX_LENGTH {
            return Err(Error::KeyTooLong {
                len: bytes.len(),
                max: KEY_MAX_LENGTH,
            });
        }
        Ok(Key(bytes))
    }

    /// The largest key, `KEY_MAX_BYTES`.
    pub fn max() -> Self {
        Key(KEY_MAX_BYTES.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `self` is a byte prefix of `other` (every key is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Key) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Smallest key strictly greater than `self`: `self` with a 0x00 appended.
    ///
    /// # Panics
    /// Panics if `self` is already `KEY_MAX_LENGTH` bytes long. Use
    /// [`Key::try_next`] where that can't be ruled out.
    pub fn next(&self) -> Key {
        match self.try_next() {
            Ok(next) => next,
            Err(e) => panic!("Key::next on {self:?}: {e}"),
        }
    }

    /// Checked form of [`Key::next`].
    pub fn try_next(&self) -> Result<Key> {
        if self.0.len() >= KEY_MAX_LENGTH {
            return Err(Error::KeyTooLong {
                len: self.0.len() + 1,
                max: KEY_MAX_LENGTH,
            });
        }
        let mut next = Vec::with_capacity(self.0.len() + 1);
        next.extend_from_slice(&self.0);
        next.push(0x00);
        Ok(Key(next))
    }

    /// Largest key strictly less than `self` within the bounded key space.
    ///
    /// Between `p + b` and `p + (b-1)` lie all keys starting with
    /// `p + (b-1)`; the largest of them is `p + (b-1)` padded with 0xff out
    /// to `KEY_MAX_LENGTH`:
    ///
    /// ```text
    /// "a\x00"  -> "a"
    /// "a\x01"  -> "a\x00\xff\xff...\xff"   (KEY_MAX_LENGTH bytes)
    /// ""       -> Error::NoPredecessor
    /// ```
    pub fn prev(&self) -> Result<Key> {
        let Some((&last, rest)) = self.0.split_last() else {
            return Err(Error::NoPredecessor("minimum key"));
        };

        if last == 0x00 {
            return Ok(Key(rest.to_vec()));
        }

        let mut prev = Vec::with_capacity(KEY_MAX_LENGTH);
        prev.extend_from_slice(rest);
        prev.push(last - 1);
        prev.resize(KEY_MAX_LENGTH, 0xff);
        Ok(Key(prev))
    }

    /// Exclusive upper bound of every key having `self` as a prefix, turning
    /// a prefix scan into the half-open range `[self, self.prefix_end())`.
    ///
    /// Increments `self` as a big-endian number with carry, keeping its
    /// length: `00 ff` -> `01 00`. The empty prefix covers the whole key
    /// space and maps to `KEY_MAX`. A key made only of 0xff bytes has no
    /// tighter bound and is returned unchanged, marking an open-ended range.
    pub fn prefix_end(&self) -> Key {
        if self.0.is_empty() {
            return Key::max();
        }

        let mut end = self.0.clone();
        for byte in end.iter_mut().rev() {
            *byte = byte.wrapping_add(1);
            if *byte != 0 {
                return Key(end);
            }
        }
        // Every byte carried: all 0xff.
        self.clone()
    }

    /// Offset at which a trailing `KEY_MAX` suffix starts, if there is one.
    fn key_max_suffix_start(&self) -> Option<usize> {
        let start = self.0.len().checked_sub(KEY_MAX_LENGTH)?;
        (self.0[start..] == KEY_MAX_BYTES[..]).then_some(start)
    }
}

impl fmt::Display for Key {
    /// Printable ASCII renders as-is, other bytes as escapes. A trailing
    /// `KEY_MAX` collapses to `\xff...` so boundary keys stay readable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key_max_suffix_start() {
            Some(start) => write!(f, "{}\\xff...", self.0[..start].escape_ascii()),
            None => write!(f, "{}", self.0.escape_ascii()),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key(\"{self}\")")
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for Key {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Key::new(bytes)
    }
}

impl From<Key> for Vec<u8> {
    fn from(key: Key) -> Self {
        key.0
    }
}

// Literal conversions. An over-long literal is a programming error.

/// # Panics
/// Panics if `bytes` is longer than `KEY_MAX_LENGTH`. Use [`Key::new`] for
/// input that isn't a known-short literal.
impl From<&[u8]> for Key {
    fn from(bytes: &[u8]) -> Self {
        match Key::new(bytes) {
            Ok(key) => key,
            Err(e) => panic!("{e}"),
        }
    }
}

/// # Panics
/// Panics if `N` exceeds `KEY_MAX_LENGTH`.
impl<const N: usize> From<&[u8; N]> for Key {
    fn from(bytes: &[u8; N]) -> Self {
        Key::from(&bytes[..])
    }
}

/// # Panics
/// Panics if `s` is longer than `KEY_MAX_LENGTH` bytes.
impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::from(s.as_bytes())
    }
}

/// A half-open span of keys, `[start, end)`. `end == None` is unbounded above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRange {
    pub start: Key,
    pub end: Option<Key>,
}

impl KeyRange {
    pub fn new(start: Key, end: Key) -> Self {
        KeyRange {
            start,
            end: Some(end),
        }
    }

    /// Every key having `prefix` as a prefix.
    ///
    /// The empty prefix and all-0xff prefixes reach `KEY_MAX` itself, so
    /// their ranges are unbounded above.
    pub fn prefix(prefix: &Key) -> Self {
        let end = prefix.prefix_end();
        // prefix_end hands back an all-0xff prefix unchanged: no finite bound.
        let end = (!prefix.is_empty() && end != *prefix).then_some(end);
        KeyRange {
            start: prefix.clone(),
            end,
        }
    }

    pub fn contains(&self, key: &Key) -> bool {
        *key >= self.start && self.end.as_ref().is_none_or(|end| key < end)
    }

    /// True if every key in `other` is also in `self`.
    pub fn contains_range(&self, other: &KeyRange) -> bool {
        if other.start < self.start {
            return false;
        }
        match (&self.end, &other.end) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(end), Some(other_end)) => other_end <= end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basics() {
        let a = Key::from("a");
        assert!(a < a.next());
        assert_eq!(a.next().prev().unwrap(), a);
        assert!(KEY_MIN.prev().is_err());
    }

    #[test]
    fn test_arithmetic_never_aliases() {
        let a = Key::from(b"\x00\xff");
        let end = a.prefix_end();
        assert_eq!(a.as_bytes(), &[0x00, 0xff]);
        assert_eq!(end.as_bytes(), &[0x01, 0x00]);
    }
}
