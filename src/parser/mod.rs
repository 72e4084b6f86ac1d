//!
//! This module defines how to decode the binary block format into the
//! structs defined in proto.
//!

/// field readers over any `std::io::Read`
pub mod reader;

/// decoding bounds
pub mod options;

/// decode a stream of concatenated blocks
pub mod stream;

/// decoded blockchain records
pub mod proto;

/// error handling
pub mod errors;
