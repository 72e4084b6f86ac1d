use std::error::Error;
use std::fmt;
use std::io;

pub type OpResult<T> = Result<T, OpError>;

///
/// Error returned by every decoder in this crate.
///
/// `kind` tells what went wrong, `message` tells where: each decoding
/// stage prefixes the message with its own name on the way up, so a
/// failure deep inside a script read surfaces as
/// `block 2: transaction 0: input 1: script: unexpected end of data`.
///
#[derive(Debug)]
pub struct OpError {
    kind: OpErrorKind,
    message: String,
}

#[derive(Debug)]
pub enum OpErrorKind {
    /// the byte source failed for a reason other than running dry
    IoError(io::Error),
    /// fewer bytes were available than a field declared
    UnexpectedEof,
    /// a declared count or length is above a configured bound
    LimitExceeded,
    RuntimeError,
}

impl OpError {
    pub fn new(kind: OpErrorKind) -> Self {
        OpError {
            kind,
            message: String::new(),
        }
    }

    /// append to the diagnostic message
    pub fn join_msg(mut self, msg: &str) -> Self {
        self.message.push_str(msg);
        self
    }

    /// prefix the diagnostic message with the stage that failed
    pub fn context(mut self, stage: &str) -> Self {
        if self.message.is_empty() {
            self.message = stage.to_owned();
        } else {
            self.message = format!("{}: {}", stage, self.message);
        }
        self
    }

    pub fn kind(&self) -> &OpErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self.kind, OpErrorKind::UnexpectedEof)
    }
}

impl fmt::Display for OpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpErrorKind::IoError(e) => write!(f, "io error: {}", e),
            OpErrorKind::UnexpectedEof => write!(f, "unexpected end of data"),
            OpErrorKind::LimitExceeded => write!(f, "limit exceeded"),
            OpErrorKind::RuntimeError => write!(f, "runtime error"),
        }
    }
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.message, self.kind)
        }
    }
}

impl Error for OpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            OpErrorKind::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for OpError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => OpError::new(OpErrorKind::UnexpectedEof),
            _ => OpError::new(OpErrorKind::IoError(err)),
        }
    }
}

impl From<&str> for OpError {
    fn from(err: &str) -> Self {
        OpError::new(OpErrorKind::RuntimeError).join_msg(err)
    }
}

impl From<String> for OpError {
    fn from(err: String) -> Self {
        OpError::new(OpErrorKind::RuntimeError).join_msg(&err)
    }
}
