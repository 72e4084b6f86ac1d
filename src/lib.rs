//!
//! # Introduction
//!
//! This library decodes the binary Bitcoin block format into plain Rust
//! structs: a stream of concatenated blocks becomes a `Vec<Block>`, each
//! with its header and transactions, each transaction with its inputs
//! and outputs.
//!
//! Decoding is read-only and structural. Scripts are kept as opaque
//! bytes, hashes as 32 byte arrays in wire order, and nothing is
//! validated beyond the byte layout itself.
//!
//! # Example
//!
//! ```rust
//! use blk_decoder::{decode_blocks, DecodeOptions, iter_blocks};
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! // decode everything at once
//! let file = BufReader::new(File::open("blocks.bin").unwrap());
//! let blocks = decode_blocks(file).into_result().unwrap();
//!
//! // or one block at a time, with bounds on declared counts
//! let file = BufReader::new(File::open("blocks.bin").unwrap());
//! let options = DecodeOptions::default().with_max_tx_count(100_000);
//! for block in iter_blocks(file, options) {
//!     println!("{}", block.unwrap().header.time);
//! }
//! ```
//!

pub(crate) mod api;
pub mod parser;

#[doc(inline)]
pub use crate::api::*;
