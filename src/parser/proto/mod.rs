//!
//! ## Decoded Record Types
//!
//! - `Block`: `block::Block`, a `BlockHeader` plus its transactions.
//! - `Transaction`: `transaction::Transaction`, with its `TxIn`s and `TxOut`s.
//!
//! Every record is plain data. Hashes are `[u8; 32]` in wire byte order,
//! scripts are opaque `Vec<u8>`, and counts and lengths are kept exactly
//! as they were declared on the wire.
//!
//! Each type has a `parse(reader, options)` constructor that consumes
//! exactly its own bytes from the reader. A record is either returned
//! fully populated or not at all.
//!

/// block header and block
pub mod block;

/// transaction, inputs and outputs
pub mod transaction;
