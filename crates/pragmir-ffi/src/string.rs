//! Incremental byte-string builder, for C callers assembling directive text
//! one byte at a time before handing it to the parser.

use crate::registry::{self, ByteString, HandleTag, Resource};
use crate::status::{Handle, Status};
use crate::copy_out_str;
use std::os::raw::c_char;

#[no_mangle]
pub unsafe extern "C" fn pragmir_str_new(out_handle: *mut Handle) -> Status {
    if out_handle.is_null() {
        return Status::NullPointer;
    }
    let handle = registry::write(|r| {
        r.insert(HandleTag::Builder, Resource::Builder(ByteString::default()))
    });
    *out_handle = handle;
    Status::Success
}

#[no_mangle]
pub extern "C" fn pragmir_str_push_byte(handle: Handle, byte: u8) -> Status {
    registry::write(|r| match r.get_mut(handle) {
        Some(Resource::Builder(builder)) => {
            builder.bytes.push(byte);
            Status::Success
        }
        _ => Status::InvalidHandle,
    })
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_str_len(handle: Handle, out_len: *mut usize) -> Status {
    if out_len.is_null() {
        return Status::NullPointer;
    }
    match registry::read(|r| match r.get(handle) {
        Some(Resource::Builder(builder)) => Some(builder.bytes.len()),
        _ => None,
    }) {
        Some(len) => {
            *out_len = len;
            Status::Success
        }
        None => Status::InvalidHandle,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_str_capacity(handle: Handle, out_capacity: *mut usize) -> Status {
    if out_capacity.is_null() {
        return Status::NullPointer;
    }
    match registry::read(|r| match r.get(handle) {
        Some(Resource::Builder(builder)) => Some(builder.bytes.capacity()),
        _ => None,
    }) {
        Some(capacity) => {
            *out_capacity = capacity;
            Status::Success
        }
        None => Status::InvalidHandle,
    }
}

/// Copy the accumulated bytes out NUL-terminated. The builder must hold
/// valid UTF-8 by this point; callers that pushed arbitrary bytes get
/// `InvalidUtf8` here rather than at the parse entry.
#[no_mangle]
pub unsafe extern "C" fn pragmir_str_copy(
    handle: Handle,
    buffer: *mut c_char,
    capacity: usize,
    out_len: *mut usize,
) -> Status {
    let bytes = match registry::read(|r| match r.get(handle) {
        Some(Resource::Builder(builder)) => Some(builder.bytes.clone()),
        _ => None,
    }) {
        Some(bytes) => bytes,
        None => return Status::InvalidHandle,
    };
    match std::str::from_utf8(&bytes) {
        Ok(text) => copy_out_str(text, buffer, capacity, out_len),
        Err(_) => Status::InvalidUtf8,
    }
}

#[no_mangle]
pub extern "C" fn pragmir_str_clear(handle: Handle) -> Status {
    registry::write(|r| match r.get_mut(handle) {
        Some(Resource::Builder(builder)) => {
            builder.bytes.clear();
            Status::Success
        }
        _ => Status::InvalidHandle,
    })
}

#[no_mangle]
pub extern "C" fn pragmir_str_free(handle: Handle) -> Status {
    registry::write(|r| {
        if !matches!(r.get(handle), Some(Resource::Builder(_))) {
            return Status::InvalidHandle;
        }
        r.remove(handle);
        Status::Success
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::INVALID_HANDLE;

    fn build(text: &str) -> Handle {
        let mut handle: Handle = INVALID_HANDLE;
        assert_eq!(unsafe { pragmir_str_new(&mut handle) }, Status::Success);
        for byte in text.bytes() {
            assert_eq!(pragmir_str_push_byte(handle, byte), Status::Success);
        }
        handle
    }

    #[test]
    fn test_build_and_copy_out() {
        let handle = build("#pragma omp barrier");

        let mut len = 0usize;
        assert_eq!(unsafe { pragmir_str_len(handle, &mut len) }, Status::Success);
        assert_eq!(len, 19);

        let mut buffer = [0 as c_char; 64];
        let mut copied = 0usize;
        assert_eq!(
            unsafe { pragmir_str_copy(handle, buffer.as_mut_ptr(), buffer.len(), &mut copied) },
            Status::Success
        );
        assert_eq!(copied, 19);
        assert_eq!(buffer[19], 0);

        assert_eq!(pragmir_str_free(handle), Status::Success);
    }

    #[test]
    fn test_copy_rejects_small_buffer() {
        let handle = build("barrier");
        let mut buffer = [0 as c_char; 4];
        let mut copied = 0usize;
        assert_eq!(
            unsafe { pragmir_str_copy(handle, buffer.as_mut_ptr(), buffer.len(), &mut copied) },
            Status::OutOfBounds
        );
        assert_eq!(pragmir_str_free(handle), Status::Success);
    }

    #[test]
    fn test_copy_rejects_invalid_utf8() {
        let mut handle: Handle = INVALID_HANDLE;
        assert_eq!(unsafe { pragmir_str_new(&mut handle) }, Status::Success);
        assert_eq!(pragmir_str_push_byte(handle, 0xff), Status::Success);

        let mut buffer = [0 as c_char; 8];
        let mut copied = 0usize;
        assert_eq!(
            unsafe { pragmir_str_copy(handle, buffer.as_mut_ptr(), buffer.len(), &mut copied) },
            Status::InvalidUtf8
        );
        assert_eq!(pragmir_str_free(handle), Status::Success);
    }

    #[test]
    fn test_clear_and_double_free() {
        let handle = build("abc");
        assert_eq!(pragmir_str_clear(handle), Status::Success);
        let mut len = usize::MAX;
        assert_eq!(unsafe { pragmir_str_len(handle, &mut len) }, Status::Success);
        assert_eq!(len, 0);

        assert_eq!(pragmir_str_free(handle), Status::Success);
        assert_eq!(pragmir_str_free(handle), Status::InvalidHandle);
        assert_eq!(pragmir_str_push_byte(handle, b'x'), Status::InvalidHandle);
    }

    #[test]
    fn test_null_out_pointers() {
        assert_eq!(
            unsafe { pragmir_str_new(std::ptr::null_mut()) },
            Status::NullPointer
        );
        let handle = build("x");
        assert_eq!(
            unsafe { pragmir_str_len(handle, std::ptr::null_mut()) },
            Status::NullPointer
        );
        assert_eq!(pragmir_str_free(handle), Status::Success);
    }
}
