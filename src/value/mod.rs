mod checksum;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};
use crate::types::Timestamp;

/// Content of a [`Value`]: nothing, an opaque payload, or a signed integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ValueData {
    #[default]
    Empty,
    Bytes(Vec<u8>),
    Integer(i64),
}

/// A checksum-protected value as exchanged with the read/write path.
///
/// Lifecycle:
///   1. the writer builds the value and calls [`Value::init_checksum`] with
///      the key it will be stored under;
///   2. readers call [`Value::verify`] with the key they read it from, any
///      number of times.
///
/// A checksum mismatch means corruption or key confusion and must be
/// surfaced to the caller. A value that was never stamped always verifies:
/// the checksum is opt-in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawValue", into = "RawValue")]
pub struct Value {
    data: ValueData,
    checksum: Option<u32>,
    timestamp: Option<Timestamp>,
}

impl Value {
    pub fn empty() -> Self {
        Value::default()
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::from_data(ValueData::Bytes(bytes.into()))
    }

    pub fn from_integer(i: i64) -> Self {
        Value::from_data(ValueData::Integer(i))
    }

    pub fn from_data(data: ValueData) -> Self {
        Value {
            data,
            checksum: None,
            timestamp: None,
        }
    }

    /// Build from the two independently optional fields of the wire form.
    ///
    /// Fails with [`Error::InvalidValue`] if both are set.
    pub fn from_parts(bytes: Option<Vec<u8>>, integer: Option<i64>) -> Result<Self> {
        let data = match (bytes, integer) {
            (Some(_), Some(_)) => {
                return Err(Error::InvalidValue(
                    "both bytes and integer fields are set".into(),
                ));
            }
            (Some(bytes), None) => ValueData::Bytes(bytes),
            (None, Some(i)) => ValueData::Integer(i),
            (None, None) => ValueData::Empty,
        };
        Ok(Value::from_data(data))
    }

    /// Attach the MVCC version this value was written at.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn data(&self) -> &ValueData {
        &self.data
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.data {
            ValueData::Bytes(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    pub fn integer(&self) -> Option<i64> {
        match self.data {
            ValueData::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data == ValueData::Empty
    }

    pub fn checksum(&self) -> Option<u32> {
        self.checksum
    }

    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    // Content setters leave any stamped checksum in place, so a value changed
    // after init_checksum fails verify until it is stamped again.

    pub fn set_bytes(&mut self, bytes: impl Into<Vec<u8>>) {
        self.data = ValueData::Bytes(bytes.into());
    }

    pub fn set_integer(&mut self, i: i64) {
        self.data = ValueData::Integer(i);
    }

    pub fn clear(&mut self) {
        self.data = ValueData::Empty;
    }

    /// Stamp a checksum binding the current content to `key`.
    /// Stamping again with the same key and content is a no-op.
    pub fn init_checksum(&mut self, key: impl AsRef<[u8]>) {
        let crc = checksum::compute(key.as_ref(), &self.data);
        trace!(checksum = crc, "stamped value checksum");
        self.checksum = Some(crc);
    }

    /// Check the stamped checksum, if any, against `key` and the current content.
    pub fn verify(&self, key: impl AsRef<[u8]>) -> Result<()> {
        let Some(expected) = self.checksum else {
            return Ok(());
        };

        let computed = checksum::compute(key.as_ref(), &self.data);
        if expected != computed {
            return Err(Error::ChecksumMismatch { expected, computed });
        }
        Ok(())
    }
}

/// Serialized shape: the payload and the integer as independent optional
/// fields. Decoding routes through [`Value::from_parts`] so a value carrying
/// both is rejected before it can be used.
#[derive(Serialize, Deserialize)]
struct RawValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bytes: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    integer: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    checksum: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<Timestamp>,
}

impl TryFrom<RawValue> for Value {
    type Error = Error;

    fn try_from(raw: RawValue) -> Result<Self> {
        let mut value = Value::from_parts(raw.bytes, raw.integer)?;
        value.checksum = raw.checksum;
        value.timestamp = raw.timestamp;
        Ok(value)
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        let (bytes, integer) = match value.data {
            ValueData::Empty => (None, None),
            ValueData::Bytes(bytes) => (Some(bytes), None),
            ValueData::Integer(i) => (None, Some(i)),
        };
        RawValue {
            bytes,
            integer,
            checksum: value.checksum,
            timestamp: value.timestamp,
        }
    }
}
