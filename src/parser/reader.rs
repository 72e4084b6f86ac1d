use crate::parser::errors::{OpError, OpErrorKind, OpResult};
use crate::parser::options::{prealloc, DecodeOptions, MAX_PREALLOC_BYTES};
use crate::parser::proto::block::Block;
use crate::parser::proto::transaction::{Transaction, TxIn, TxOut};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

///
/// Field readers over any byte source.
///
/// All multi-byte integers are little-endian. Every method either fills
/// its field completely or fails; a source that runs dry part way through
/// a field yields `OpErrorKind::UnexpectedEof`.
///
pub trait BlockchainRead: Read {
    ///
    /// Read a variable length integer (`CompactSize`).
    ///
    /// | prefix      | followed by        |
    /// |-------------|--------------------|
    /// | `0x00-0xFC` | nothing, the value |
    /// | `0xFD`      | `u16`              |
    /// | `0xFE`      | `u32`              |
    /// | `0xFF`      | `u64`              |
    ///
    fn read_varint(&mut self) -> OpResult<u64> {
        let prefix = self.read_u8()?;
        let n = match prefix {
            0xFD => self.read_u16().map_err(|e| e.context("0xFD varint"))? as u64,
            0xFE => self.read_u32().map_err(|e| e.context("0xFE varint"))? as u64,
            0xFF => self.read_u64().map_err(|e| e.context("0xFF varint"))?,
            _ => prefix as u64,
        };
        Ok(n)
    }

    #[inline]
    fn read_u8(&mut self) -> OpResult<u8> {
        let mut slice = [0u8; 1];
        self.read_exact(&mut slice)?;
        Ok(slice[0])
    }

    #[inline]
    fn read_u16(&mut self) -> OpResult<u16> {
        let u = ReadBytesExt::read_u16::<LittleEndian>(self)?;
        Ok(u)
    }

    #[inline]
    fn read_u32(&mut self) -> OpResult<u32> {
        let u = ReadBytesExt::read_u32::<LittleEndian>(self)?;
        Ok(u)
    }

    #[inline]
    fn read_i32(&mut self) -> OpResult<i32> {
        let u = ReadBytesExt::read_i32::<LittleEndian>(self)?;
        Ok(u)
    }

    #[inline]
    fn read_u64(&mut self) -> OpResult<u64> {
        let u = ReadBytesExt::read_u64::<LittleEndian>(self)?;
        Ok(u)
    }

    #[inline]
    fn read_i64(&mut self) -> OpResult<i64> {
        let u = ReadBytesExt::read_i64::<LittleEndian>(self)?;
        Ok(u)
    }

    #[inline]
    fn read_u256(&mut self) -> OpResult<[u8; 32]> {
        let mut arr = [0u8; 32];
        self.read_exact(&mut arr)?;
        Ok(arr)
    }

    ///
    /// Read exactly `count` bytes.
    ///
    /// The buffer grows as bytes arrive, so a bogus `count` costs at most
    /// `MAX_PREALLOC_BYTES` before the source runs dry.
    ///
    fn read_u8_vec(&mut self, count: u64) -> OpResult<Vec<u8>> {
        let mut arr = Vec::with_capacity(prealloc(count, MAX_PREALLOC_BYTES));
        let got = Read::take(&mut *self, count).read_to_end(&mut arr)? as u64;
        if got < count {
            return Err(OpError::new(OpErrorKind::UnexpectedEof)
                .join_msg(&format!("expected {} bytes, got {}", count, got)));
        }
        Ok(arr)
    }

    #[inline]
    fn read_block(&mut self) -> OpResult<Block> {
        Block::parse(self, &DecodeOptions::default())
    }

    #[inline]
    fn read_transaction(&mut self) -> OpResult<Transaction> {
        Transaction::parse(self, &DecodeOptions::default())
    }

    #[inline]
    fn read_tx_in(&mut self) -> OpResult<TxIn> {
        TxIn::parse(self, &DecodeOptions::default())
    }

    #[inline]
    fn read_tx_out(&mut self) -> OpResult<TxOut> {
        TxOut::parse(self, &DecodeOptions::default())
    }
}

impl<R: Read + ?Sized> BlockchainRead for R {}

#[cfg(test)]
mod tests {
    use crate::parser::reader::BlockchainRead;
    use std::io::Cursor;

    #[test]
    fn test_read_varint() {
        let cases: Vec<(Vec<u8>, u64)> = vec![
            (vec![0x12], 0x12),
            (vec![0xFC], 0xFC),
            (vec![0xFD, 0x34, 0x12], 0x1234),
            (vec![0xFE, 0x01, 0x00, 0x00, 0x00], 0x1),
            (
                vec![0xFF, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
                0x1,
            ),
            (
                vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
                u64::MAX,
            ),
        ];
        for (bytes, want) in cases {
            let mut r = Cursor::new(bytes.as_slice());
            assert_eq!(r.read_varint().unwrap(), want);
            assert_eq!(r.position() as usize, bytes.len());
        }
    }

    #[test]
    fn test_read_varint_leaves_trailing_bytes() {
        let bytes = [0xFF, 0x01, 0, 0, 0, 0, 0, 0, 0, 0xAA, 0xBB];
        let mut r = Cursor::new(&bytes[..]);
        assert_eq!(r.read_varint().unwrap(), 1);
        assert_eq!(r.position(), 9);
    }

    #[test]
    fn test_read_varint_truncated() {
        let mut r = Cursor::new(&[0xFD, 0x34][..]);
        let err = r.read_varint().unwrap_err();
        assert!(err.is_unexpected_eof());
        assert_eq!(err.message(), "0xFD varint");

        let mut r = Cursor::new(&[0u8; 0][..]);
        assert!(r.read_varint().unwrap_err().is_unexpected_eof());
    }

    #[test]
    fn test_read_little_endian() {
        let bytes = [
            0x01, 0x00, 0x00, 0x00, // i32
            0xff, 0xff, 0x00, 0x1d, // u32
            0x00, 0xf2, 0x05, 0x2a, 0x01, 0x00, 0x00, 0x00, // i64
        ];
        let mut r = Cursor::new(&bytes[..]);
        assert_eq!(r.read_i32().unwrap(), 1);
        assert_eq!(r.read_u32().unwrap(), 486604799);
        assert_eq!(r.read_i64().unwrap(), 5_000_000_000);
        assert!(r.read_u8().unwrap_err().is_unexpected_eof());
    }

    #[test]
    fn test_read_u8_vec() {
        let bytes = [1u8, 2, 3, 4, 5];
        let mut r = Cursor::new(&bytes[..]);
        assert_eq!(r.read_u8_vec(3).unwrap(), vec![1, 2, 3]);
        assert_eq!(r.read_u8_vec(0).unwrap(), Vec::<u8>::new());
        assert!(r.read_u8_vec(3).unwrap_err().is_unexpected_eof());
    }

    #[test]
    fn test_read_u8_vec_huge_declared_length() {
        let mut r = Cursor::new(&[0u8; 4][..]);
        let err = r.read_u8_vec(u64::MAX).unwrap_err();
        assert!(err.is_unexpected_eof());
    }
}
