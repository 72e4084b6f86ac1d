//!
//! Crate APIs, essential structs and functions are all here!
//!
//! # Example
//!
//! ```rust
//! use blk_decoder::decode_blocks;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = BufReader::new(File::open("blocks.bin").unwrap());
//! let decoded = decode_blocks(file);
//! for block in &decoded.blocks {
//!     println!("{}", block);
//! }
//! if let Some(e) = decoded.error {
//!     eprintln!("stopped after {} blocks: {}", decoded.blocks.len(), e);
//! }
//! ```
//!

use crate::parser::errors::OpResult;
use crate::parser::reader::BlockchainRead;
use bitcoin_hashes::hex::ToHex;
use bitcoin_hashes::{sha256, Hash};
use std::io::Read;
// re-exports
pub use crate::parser::errors::{OpError, OpErrorKind};
pub use crate::parser::options::DecodeOptions;
pub use crate::parser::proto::block::{Block, BlockHeader, BLOCK_HEADER_LEN};
pub use crate::parser::proto::transaction::{OutPoint, Transaction, TxIn, TxOut};
pub use crate::parser::stream::{BlockStream, Decoded};

///
/// Decode every block of a byte stream, without limits.
///
/// Decoding stops at the first malformed block. Blocks decoded before it
/// are still returned, see `Decoded`.
///
pub fn decode_blocks<R: Read>(reader: R) -> Decoded {
    decode_blocks_with(reader, DecodeOptions::default())
}

/// Decode every block of a byte stream under the given bounds.
pub fn decode_blocks_with<R: Read>(reader: R, options: DecodeOptions) -> Decoded {
    iter_blocks(reader, options).decode_all()
}

///
/// Lazily decode the blocks of a byte stream.
///
/// The source is only read as far as the block being yielded. Wrap
/// unbuffered sources such as `File` in a `BufReader`.
///
pub fn iter_blocks<R: Read>(reader: R, options: DecodeOptions) -> BlockStream<R> {
    BlockStream::new(reader, options)
}

/// Decode a single block from the front of `reader`.
#[inline]
pub fn decode_block<R: Read>(mut reader: R) -> OpResult<Block> {
    reader.read_block()
}

/// Decode a single transaction from the front of `reader`.
#[inline]
pub fn decode_transaction<R: Read>(mut reader: R) -> OpResult<Transaction> {
    reader.read_transaction()
}

///
/// Single SHA-256 of `bytes`.
///
/// Note that block and transaction ids are double SHA-256 of the
/// serialized record, which this crate does not produce.
///
#[inline]
pub fn hash(bytes: &[u8]) -> [u8; 32] {
    sha256::Hash::hash(bytes).into_inner()
}

/// `hash`, rendered as lowercase hex in digest byte order.
pub fn hash_hex(bytes: &[u8]) -> String {
    hash(bytes)[..].to_hex()
}
