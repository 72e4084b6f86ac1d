use crate::parser::errors::OpResult;
use crate::parser::options::{check_limit, prealloc, DecodeOptions, MAX_PREALLOC_ITEMS};
use crate::parser::reader::BlockchainRead;
use bitcoin_hashes::hex::ToHex;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to an output of an earlier transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: [u8; 32],
    pub index: u32,
}

///
/// A transaction input.
///
/// `script_len` is the length declared on the wire, always equal to
/// `script_sig.len()` for a decoded record.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIn {
    pub previous_output: OutPoint,
    pub script_len: u64,
    pub script_sig: Vec<u8>,
    pub sequence: u32,
}

impl TxIn {
    pub fn parse<R>(r: &mut R, options: &DecodeOptions) -> OpResult<TxIn>
    where
        R: BlockchainRead + ?Sized,
    {
        let hash = r
            .read_u256()
            .map_err(|e| e.context("previous output hash"))?;
        let index = r
            .read_u32()
            .map_err(|e| e.context("previous output index"))?;
        let script_len = r.read_varint().map_err(|e| e.context("script length"))?;
        check_limit("script length", script_len, options.max_script_len)?;
        let script_sig = r
            .read_u8_vec(script_len)
            .map_err(|e| e.context("script"))?;
        let sequence = r.read_u32().map_err(|e| e.context("sequence"))?;
        Ok(TxIn {
            previous_output: OutPoint { hash, index },
            script_len,
            script_sig,
            sequence,
        })
    }
}

impl fmt::Display for TxIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Previous Hash: {}, Script Length: {}, Script: {}, Sequence: {}",
            self.previous_output.hash[..].to_hex(),
            self.script_len,
            self.script_sig[..].to_hex(),
            self.sequence
        )
    }
}

/// A transaction output. `value` is in satoshis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    pub value: i64,
    pub script_len: u64,
    pub script_pubkey: Vec<u8>,
}

impl TxOut {
    pub fn parse<R>(r: &mut R, options: &DecodeOptions) -> OpResult<TxOut>
    where
        R: BlockchainRead + ?Sized,
    {
        let value = r.read_i64().map_err(|e| e.context("value"))?;
        let script_len = r
            .read_varint()
            .map_err(|e| e.context("pk script length"))?;
        check_limit("pk script length", script_len, options.max_script_len)?;
        let script_pubkey = r
            .read_u8_vec(script_len)
            .map_err(|e| e.context("pk script"))?;
        Ok(TxOut {
            value,
            script_len,
            script_pubkey,
        })
    }
}

impl fmt::Display for TxOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Value: {}, Pk Script Length: {}, Pk Script: {}",
            self.value,
            self.script_len,
            self.script_pubkey[..].to_hex()
        )
    }
}

///
/// A transaction in its legacy (non-witness) layout.
///
/// `input_count` and `output_count` are stored as read off the wire.
/// They always match `input.len()` and `output.len()`.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub input_count: u64,
    /// List of inputs, in wire order
    pub input: Vec<TxIn>,
    pub output_count: u64,
    /// List of outputs, in wire order
    pub output: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn parse<R>(r: &mut R, options: &DecodeOptions) -> OpResult<Transaction>
    where
        R: BlockchainRead + ?Sized,
    {
        let version = r.read_i32().map_err(|e| e.context("version"))?;

        let input_count = r.read_varint().map_err(|e| e.context("input count"))?;
        check_limit("input count", input_count, options.max_input_count)?;
        let mut input = Vec::with_capacity(prealloc(input_count, MAX_PREALLOC_ITEMS));
        for i in 0..input_count {
            let tx_in =
                TxIn::parse(r, options).map_err(|e| e.context(&format!("input {}", i)))?;
            input.push(tx_in);
        }

        let output_count = r.read_varint().map_err(|e| e.context("output count"))?;
        check_limit("output count", output_count, options.max_output_count)?;
        let mut output = Vec::with_capacity(prealloc(output_count, MAX_PREALLOC_ITEMS));
        for i in 0..output_count {
            let tx_out =
                TxOut::parse(r, options).map_err(|e| e.context(&format!("output {}", i)))?;
            output.push(tx_out);
        }

        let lock_time = r.read_u32().map_err(|e| e.context("lock time"))?;
        trace!(
            "decoded transaction with {} inputs, {} outputs",
            input_count,
            output_count
        );
        Ok(Transaction {
            version,
            input_count,
            input,
            output_count,
            output,
            lock_time,
        })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Version:{} InTxCount:{} Inputs:[", self.version, self.input_count)?;
        for (i, tx_in) in self.input.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", tx_in)?;
        }
        write!(f, "] OutTxCount:{} Outputs:[", self.output_count)?;
        for (i, tx_out) in self.output.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", tx_out)?;
        }
        write!(f, "] LockTime:{}}}", self.lock_time)
    }
}
