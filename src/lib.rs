//! A Fenwick tree (binary indexed tree) for point updates and range-sum queries.
//!
//! [`PrefixSumIndex`] keeps an array of `i64` values addressed by 1-based positions and supports
//! additive point updates plus prefix/range sums, each in `O(log n)`.
//!
//! On top of it, [`Session`] drives an index from a plain-text command stream: an initial array
//! followed by `q a b` (range-sum query) and `u p d` (add `d` at `p`) commands.
//!
//! Optional features:
//! - `serde`: `Serialize`/`Deserialize` for [`Command`] and [`IndexSnapshot`].
//! - `tracing`: emits events under the `fentree` target.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod command;
mod error;
mod fenwick;
mod state;


pub use command::{Command, CommandError, Session};
pub use error::IndexError;
pub use fenwick::PrefixSumIndex;
pub use state::IndexSnapshot;
