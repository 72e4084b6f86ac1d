use crate::parser::errors::OpResult;
use crate::parser::options::{check_limit, prealloc, DecodeOptions, MAX_PREALLOC_ITEMS};
use crate::parser::proto::transaction::Transaction;
use crate::parser::reader::BlockchainRead;
use bitcoin_hashes::hex::ToHex;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serialized size of a block header.
pub const BLOCK_HEADER_LEN: usize = 80;

///
/// The 80 byte block header.
///
/// Hashes are kept in wire byte order. `bits` is the compact
/// difficulty target, left encoded.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_blockhash: [u8; 32],
    pub merkle_root: [u8; 32],
    /// seconds since the unix epoch
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    pub fn parse<R>(r: &mut R) -> OpResult<BlockHeader>
    where
        R: BlockchainRead + ?Sized,
    {
        Ok(BlockHeader {
            version: r.read_i32().map_err(|e| e.context("version"))?,
            prev_blockhash: r
                .read_u256()
                .map_err(|e| e.context("previous block hash"))?,
            merkle_root: r.read_u256().map_err(|e| e.context("merkle root"))?,
            time: r.read_u32().map_err(|e| e.context("timestamp"))?,
            bits: r.read_u32().map_err(|e| e.context("bits"))?,
            nonce: r.read_u32().map_err(|e| e.context("nonce"))?,
        })
    }
}

///
/// A block: header followed by its transactions.
///
/// `tx_count` is the count read off the wire and always equals
/// `txdata.len()` for a decoded block.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub tx_count: u64,
    pub txdata: Vec<Transaction>,
}

impl Block {
    pub fn parse<R>(r: &mut R, options: &DecodeOptions) -> OpResult<Block>
    where
        R: BlockchainRead + ?Sized,
    {
        let header = BlockHeader::parse(r)?;
        let tx_count = r
            .read_varint()
            .map_err(|e| e.context("transaction count"))?;
        check_limit("transaction count", tx_count, options.max_tx_count)?;

        let mut txdata = Vec::with_capacity(prealloc(tx_count, MAX_PREALLOC_ITEMS));
        for i in 0..tx_count {
            let tx = Transaction::parse(r, options)
                .map_err(|e| e.context(&format!("transaction {}", i)))?;
            txdata.push(tx);
        }
        debug!(
            "decoded block at time {} with {} transactions",
            header.time, tx_count
        );
        Ok(Block {
            header,
            tx_count,
            txdata,
        })
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version: {}", self.header.version)?;
        write!(f, "\nPrevious Block: {}", self.header.prev_blockhash[..].to_hex())?;
        write!(f, "\nMerkleRoot: {}", self.header.merkle_root[..].to_hex())?;
        write!(f, "\nTimestamp: {}", self.header.time)?;
        write!(f, "\nBits: {}", self.header.bits)?;
        write!(f, "\nNonce: {}", self.header.nonce)?;
        write!(f, "\nTransaction Count: {}", self.tx_count)?;
        write!(f, "\nTransactions:")?;
        for tx in &self.txdata {
            write!(f, "\n\t{}", tx)?;
        }
        Ok(())
    }
}
