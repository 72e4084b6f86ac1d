use crate::parser::errors::{OpError, OpResult};
use crate::parser::options::DecodeOptions;
use crate::parser::proto::block::Block;
use log::{info, warn};
use std::io::{self, Read};

/// forwards reads and counts the bytes that came through
struct CountingReader<R> {
    inner: R,
    consumed: u64,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.consumed += n as u64;
        Ok(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Reading,
    Done,
}

///
/// Iterate over the blocks of a byte stream.
///
/// Blocks are decoded one after another until the source is exhausted.
/// Exhaustion is only clean when it happens before the first byte of a
/// block; running dry anywhere else is a truncation error. After the end
/// of the stream, or after the first error, the iterator only yields
/// `None`.
///
/// # Example
///
/// ```rust
/// use blk_decoder::{iter_blocks, DecodeOptions};
/// use std::fs::File;
/// use std::io::BufReader;
///
/// let file = BufReader::new(File::open("blocks.bin").unwrap());
/// for block in iter_blocks(file, DecodeOptions::default()) {
///     let block = block.unwrap();
///     println!("{} transactions", block.tx_count);
/// }
/// ```
///
pub struct BlockStream<R> {
    reader: CountingReader<R>,
    options: DecodeOptions,
    state: State,
    decoded: usize,
}

impl<R: Read> BlockStream<R> {
    pub fn new(reader: R, options: DecodeOptions) -> Self {
        BlockStream {
            reader: CountingReader {
                inner: reader,
                consumed: 0,
            },
            options,
            state: State::Reading,
            decoded: 0,
        }
    }

    /// number of bytes taken from the source so far
    pub fn bytes_consumed(&self) -> u64 {
        self.reader.consumed
    }

    /// number of blocks successfully decoded so far
    pub fn blocks_decoded(&self) -> usize {
        self.decoded
    }

    ///
    /// Drain the stream.
    ///
    /// Blocks decoded before a failure are kept in `Decoded::blocks`,
    /// next to the failure itself.
    ///
    pub fn decode_all(mut self) -> Decoded {
        let mut blocks = Vec::new();
        let mut error = None;
        for result in &mut self {
            match result {
                Ok(block) => blocks.push(block),
                Err(e) => error = Some(e),
            }
        }
        info!(
            "decoded {} blocks from {} bytes",
            blocks.len(),
            self.bytes_consumed()
        );
        Decoded { blocks, error }
    }
}

impl<R: Read> Iterator for BlockStream<R> {
    type Item = OpResult<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Done {
            return None;
        }
        let start = self.reader.consumed;
        match Block::parse(&mut self.reader, &self.options) {
            Ok(block) => {
                self.decoded += 1;
                Some(Ok(block))
            }
            Err(e) if e.is_unexpected_eof() && self.reader.consumed == start => {
                self.state = State::Done;
                None
            }
            Err(e) => {
                self.state = State::Done;
                let e = e.context(&format!("block {}", self.decoded));
                warn!("stream stopped at byte {}: {}", start, e);
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for BlockStream<R> {}

///
/// Outcome of decoding a whole stream.
///
/// `error` is `None` when the stream ended cleanly at a block boundary.
/// Otherwise `blocks` holds everything decoded before the failure.
///
#[derive(Debug)]
pub struct Decoded {
    pub blocks: Vec<Block>,
    pub error: Option<OpError>,
}

impl Decoded {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// all-or-nothing view, dropping partial progress on failure
    pub fn into_result(self) -> OpResult<Vec<Block>> {
        match self.error {
            None => Ok(self.blocks),
            Some(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::errors::OpErrorKind;

    fn block_bytes(nonce: u32, tx_count: u8) -> Vec<u8> {
        let mut raw = Vec::new();
        raw.extend_from_slice(&1i32.to_le_bytes());
        raw.extend_from_slice(&[0u8; 64]);
        raw.extend_from_slice(&0u32.to_le_bytes());
        raw.extend_from_slice(&0u32.to_le_bytes());
        raw.extend_from_slice(&nonce.to_le_bytes());
        raw.push(tx_count);
        for _ in 0..tx_count {
            raw.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        }
        raw
    }

    #[test]
    fn test_empty_source() {
        let mut stream = BlockStream::new(&[][..] as &[u8], DecodeOptions::default());
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());

        let decoded = BlockStream::new(&[][..] as &[u8], DecodeOptions::default()).decode_all();
        assert!(decoded.is_complete());
        assert!(decoded.blocks.is_empty());
    }

    #[test]
    fn test_multiple_blocks() {
        let mut raw = block_bytes(1, 1);
        raw.extend(block_bytes(2, 0));
        raw.extend(block_bytes(3, 2));
        let mut stream = BlockStream::new(raw.as_slice(), DecodeOptions::default());
        let nonces: Vec<u32> = (&mut stream).map(|b| b.unwrap().header.nonce).collect();
        assert_eq!(nonces, vec![1, 2, 3]);
        assert_eq!(stream.blocks_decoded(), 3);
        assert_eq!(stream.bytes_consumed(), raw.len() as u64);
    }

    #[test]
    fn test_truncated_trailing_block_keeps_progress() {
        let mut raw = block_bytes(1, 1);
        let second = block_bytes(2, 1);
        raw.extend_from_slice(&second[..second.len() - 3]);

        let decoded = BlockStream::new(raw.as_slice(), DecodeOptions::default()).decode_all();
        assert!(!decoded.is_complete());
        assert_eq!(decoded.blocks.len(), 1);
        assert_eq!(decoded.blocks[0].header.nonce, 1);
        let err = decoded.error.unwrap();
        assert!(err.is_unexpected_eof());
        assert_eq!(err.message(), "block 1: transaction 0: lock time");
    }

    #[test]
    fn test_single_trailing_byte_is_truncation() {
        let mut raw = block_bytes(1, 0);
        raw.push(0x01);
        let mut stream = BlockStream::new(raw.as_slice(), DecodeOptions::default());
        assert!(stream.next().unwrap().is_ok());
        let err = stream.next().unwrap().unwrap_err();
        assert!(err.is_unexpected_eof());
        assert_eq!(err.message(), "block 1: version");
        // fused after the error
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_limit_error_stops_stream() {
        let raw = block_bytes(1, 2);
        let options = DecodeOptions::default().with_max_tx_count(1);
        let decoded = BlockStream::new(raw.as_slice(), options).decode_all();
        assert!(decoded.blocks.is_empty());
        let err = decoded.into_result().unwrap_err();
        assert!(matches!(err.kind(), OpErrorKind::LimitExceeded));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_source_failure_is_not_clean_end() {
        let decoded = BlockStream::new(FailingReader, DecodeOptions::default()).decode_all();
        let err = decoded.error.unwrap();
        assert!(matches!(err.kind(), OpErrorKind::IoError(_)));
    }
}
