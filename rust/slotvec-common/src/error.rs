use thiserror::Error;

/// The error type shared by all slotvec crates.
///
/// The failure kind is boxed so that `Error` stays one pointer wide and
/// `Result<T>` stays cheap to return on the success path.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn index_out_of_bounds(index: usize, len: usize) -> Error {
        Error(ErrorKind::IndexOutOfBounds { index, len }.into())
    }

    pub fn element_size_mismatch(expected: usize, actual: usize) -> Error {
        Error(ErrorKind::ElementSizeMismatch { expected, actual }.into())
    }

    pub fn out_of_memory(requested_bytes: usize) -> Error {
        Error(ErrorKind::OutOfMemory { requested_bytes }.into())
    }

    pub fn capacity_overflow(capacity: usize, element_size: usize) -> Error {
        Error(
            ErrorKind::CapacityOverflow {
                capacity,
                element_size,
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("element size mismatch: expected {expected} bytes, got {actual}")]
    ElementSizeMismatch { expected: usize, actual: usize },

    #[error("failed to allocate {requested_bytes} bytes")]
    OutOfMemory { requested_bytes: usize },

    #[error("capacity overflow: {capacity} slots of {element_size} bytes each")]
    CapacityOverflow { capacity: usize, element_size: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
