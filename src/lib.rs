//! probe-collections: an open-addressing hash map and hash set with
//! linear probing, backward-shift deletion, and in-place set algebra.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a single flat slot array per container, no per-entry heap
//!   allocation, no tombstones, and set algebra that works against any
//!   sequence rather than only another set.
//! - Layers:
//!   - SlotTable<K, V>: boxed slice of `Slot::Empty` /
//!     `Slot::Occupied { key, value, hash }` plus the live count.
//!     Knows nothing about hashers.
//!   - Probe engine (`probe`): home index, wraparound probe sequence,
//!     lookup, vacant-slot search, and backward-shift deletion, all
//!     working from cached hashes.
//!   - Resize policy (`resize`): grow/shrink thresholds and rehash by
//!     building a new SlotTable and moving entries across.
//!   - RawTable<K, V, S>: pairs a SlotTable with a `BuildHasher`; the
//!     only layer that hashes keys. Shared by both containers.
//!   - ProbeMap<K, V, S> / ProbeSet<T, S>: public façades. The set stores
//!     `()` as its value.
//!   - Set algebra (`set_algebra`) and reload/snapshot (`snapshot`) are
//!     further `impl` blocks on the façades.
//!
//! Constraints
//! - Single-threaded containers with ordinary `&`/`&mut` access; they are
//!   `Send`/`Sync` exactly when their keys, values and hasher are.
//! - Outside a call, `len < capacity` whenever `capacity >= 1`, so at
//!   least one slot is Empty and every probe terminates.
//! - Every occupied slot is reachable from its home index without
//!   crossing an Empty slot. Deletion repairs this by shifting later
//!   cluster members back; bulk removal repairs it with one rebuild.
//! - Iteration order is slot order. It is unrelated to insertion order
//!   and changes on every resize.
//!
//! Hashing and rehash invariants
//! - The hash of a key is computed once, on insert, and cached in its
//!   slot. Lookups compare the cached hash before calling `Eq`; resizes
//!   place entries by cached hash and never call `Hash` again.
//! - The home index is `normalize(hash) % capacity`, where `normalize`
//!   reads the hash as `i64` and takes its unsigned magnitude.
//! - Two distinct keys with identical hashes are both stored; only
//!   hash-and-`Eq` identifies a key.
//!
//! Resizing
//! - Grow doubles the capacity (an unallocated table goes to one slot).
//!   It is checked before every insert, even one that ends as an update
//!   or rejection, and again after a new slot is filled.
//! - After a removal the table halves while `len <= capacity / 4`,
//!   computing the final size first and rehashing once.
//! - `clear` drops everything and leaves a single Empty slot.
//!
//! Errors and logging
//! - `CollectionError` covers duplicate keys, missing keys on checked
//!   reads, and short copy destinations. Absence on ordinary lookups is
//!   `Option`/`bool`.
//! - Grow, shrink and rebuild emit `tracing` events at trace level.
//!
//! Notes and non-goals
//! - No concurrent mutation and no iterator invalidation detection;
//!   the borrow checker rules out mutation during iteration.
//! - Slot indices are internal and never escape a single call.
//! - With the `serde` feature both containers serialize as sequences in
//!   slot order and reject duplicate keys on load.

mod error;
pub mod map;
mod probe;
mod raw_table;
mod resize;
pub mod set;
mod set_algebra;
mod slot_table;
mod snapshot;
mod table_proptest;

// Public surface
pub use error::CollectionError;
pub use map::ProbeMap;
pub use set::ProbeSet;
