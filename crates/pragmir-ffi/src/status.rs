use pragmir_core::Error;

/// Status code returned by every exported entry point.
///
/// Out-pointers are written only when the returned status is `Success`.
/// Discriminants are part of the ABI and never renumbered.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success = 0,
    InvalidHandle = 1,
    InvalidUtf8 = 2,
    NullPointer = 3,
    OutOfBounds = 4,
    ParseError = 5,
    TypeMismatch = 6,
    EmptyResult = 7,
}

impl Status {
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }
}

impl From<&Error> for Status {
    fn from(error: &Error) -> Status {
        match error {
            Error::InvalidEncoding => Status::InvalidUtf8,
            Error::NoDirective | Error::UnknownDirective(_) | Error::MalformedClause(_) => {
                Status::ParseError
            }
            Error::TypeMismatch => Status::TypeMismatch,
            Error::OutOfBounds => Status::OutOfBounds,
            Error::EmptyResult => Status::EmptyResult,
        }
    }
}

/// Opaque 64-bit handle naming a registry-owned object. Zero is invalid.
pub type Handle = u64;

pub const INVALID_HANDLE: Handle = 0;
