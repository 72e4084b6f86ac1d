use crate::parser::errors::{OpError, OpErrorKind, OpResult};
use log::warn;

/// Upper bound on elements reserved ahead of time from a declared count.
pub const MAX_PREALLOC_ITEMS: u64 = 1024;

/// Upper bound on bytes reserved ahead of time from a declared length.
pub const MAX_PREALLOC_BYTES: u64 = 64 * 1024;

///
/// Sanity bounds applied while decoding.
///
/// Every bound defaults to `None`, which accepts any value the wire
/// format can express. Independently of these bounds, declared counts
/// never reserve more than `MAX_PREALLOC_ITEMS` elements (or
/// `MAX_PREALLOC_BYTES` bytes) up front.
///
/// # Example
///
/// ```rust
/// use blk_decoder::DecodeOptions;
///
/// let options = DecodeOptions::default()
///     .with_max_tx_count(100_000)
///     .with_max_script_len(10_000);
/// ```
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub max_tx_count: Option<u64>,
    pub max_input_count: Option<u64>,
    pub max_output_count: Option<u64>,
    pub max_script_len: Option<u64>,
}

impl DecodeOptions {
    pub fn with_max_tx_count(mut self, n: u64) -> Self {
        self.max_tx_count = Some(n);
        self
    }

    pub fn with_max_input_count(mut self, n: u64) -> Self {
        self.max_input_count = Some(n);
        self
    }

    pub fn with_max_output_count(mut self, n: u64) -> Self {
        self.max_output_count = Some(n);
        self
    }

    pub fn with_max_script_len(mut self, n: u64) -> Self {
        self.max_script_len = Some(n);
        self
    }
}

/// reject `declared` when a bound is configured and exceeded
pub(crate) fn check_limit(what: &str, declared: u64, limit: Option<u64>) -> OpResult<()> {
    match limit {
        Some(max) if declared > max => {
            warn!("{} {} exceeds configured maximum {}", what, declared, max);
            Err(OpError::new(OpErrorKind::LimitExceeded)
                .join_msg(&format!("{} {} exceeds maximum {}", what, declared, max)))
        }
        _ => Ok(()),
    }
}

/// initial capacity for a collection whose length comes off the wire
#[inline]
pub(crate) fn prealloc(declared: u64, cap: u64) -> usize {
    declared.min(cap) as usize
}
