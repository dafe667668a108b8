use thiserror::Error;

pub type Result<T> = std::result::Result<T, EncodeError>;

/// Layouts the wire format cannot express.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The whole payload does not fit the 16-bit length prefix.
    #[error("Payload of {len} bytes exceeds the 16-bit length prefix")]
    PayloadTooLarge { len: usize },
}
