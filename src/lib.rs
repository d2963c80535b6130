//! # kv-proto
//!
//! The value types every layer of a distributed, ordered key-value store
//! exchanges and compares: keys, versions, checksummed values, GC volume
//! estimates and node sets.
//!
//! ## Core idea
//! Range splitting, scan boundaries, MVCC version resolution, compaction
//! scheduling and quorum bookkeeping all reduce to arithmetic on these
//! types. They have to be exact at the edges: the empty key, a
//! `KEY_MAX_LENGTH` key, all-0xff keys, the zero timestamp, integer 0.
//!
//! Everything here is a pure value type: no I/O, no background work, no
//! internal locking. Storage, transport and transactions live elsewhere.

pub mod config;
pub mod error;
pub mod gc;
pub mod key;
pub mod node_list;
pub mod types;
pub mod value;

// Public re-exports for the top-level API
pub use config::GcPolicy;
pub use error::{Error, Result};
pub use gc::GcMetadata;
pub use key::{KEY_MAX_BYTES, KEY_MAX_LENGTH, KEY_MIN, Key, KeyRange};
pub use node_list::NodeList;
pub use types::{MvccKey, Timestamp};
pub use value::{Value, ValueData};
