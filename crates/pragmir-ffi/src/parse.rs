//! Parse entry points and the process-wide default language.

use crate::registry::{self, HandleTag, Resource};
use crate::status::{Handle, Status};
use pragmir_core::Language;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::atomic::{AtomicU32, Ordering};

static DEFAULT_LANGUAGE: AtomicU32 = AtomicU32::new(Language::C as u32);

/// Default host language used by callers that omit an explicit one. Reads
/// and writes are atomic; a change never affects a parse already running.
pub fn default_language() -> Language {
    Language::from_repr(DEFAULT_LANGUAGE.load(Ordering::SeqCst)).unwrap_or_default()
}

pub fn set_default_language(language: Language) {
    DEFAULT_LANGUAGE.store(language as u32, Ordering::SeqCst);
}

#[no_mangle]
pub extern "C" fn pragmir_set_default_language(language: u32) -> Status {
    match Language::from_repr(language) {
        Some(language) => {
            set_default_language(language);
            Status::Success
        }
        None => Status::OutOfBounds,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_get_default_language(out_language: *mut u32) -> Status {
    if out_language.is_null() {
        return Status::NullPointer;
    }
    *out_language = default_language() as u32;
    Status::Success
}

/// Parse text and register the resulting directive, for Rust-side callers
/// (the compatibility façades use this too).
pub fn parse_to_handle(text: &str, language: Language) -> Result<Handle, Status> {
    match pragmir_parser::parse(text, language) {
        Ok(directive) => {
            let handle = registry::write(|r| {
                r.insert(HandleTag::Directive, Resource::Directive(directive))
            });
            log::debug!("registered directive handle {handle:#x}");
            Ok(handle)
        }
        Err(error) => Err(Status::from(&error)),
    }
}

/// Convenience mode: parse one directive and hand its handle back directly.
#[no_mangle]
pub unsafe extern "C" fn pragmir_parse(
    text: *const c_char,
    language: u32,
    out_directive: *mut Handle,
) -> Status {
    if text.is_null() || out_directive.is_null() {
        return Status::NullPointer;
    }
    let language = match Language::from_repr(language) {
        Some(language) => language,
        None => return Status::OutOfBounds,
    };
    let text = match CStr::from_ptr(text).to_str() {
        Ok(text) => text,
        Err(_) => return Status::InvalidUtf8,
    };
    match parse_to_handle(text, language) {
        Ok(handle) => {
            *out_directive = handle;
            Status::Success
        }
        Err(status) => status,
    }
}

/// Parse the contents of a string builder handle.
#[no_mangle]
pub unsafe extern "C" fn pragmir_parse_str(
    builder: Handle,
    language: u32,
    out_directive: *mut Handle,
) -> Status {
    if out_directive.is_null() {
        return Status::NullPointer;
    }
    let language = match Language::from_repr(language) {
        Some(language) => language,
        None => return Status::OutOfBounds,
    };
    let bytes = match registry::read(|r| match r.get(builder) {
        Some(Resource::Builder(builder)) => Some(builder.bytes.clone()),
        _ => None,
    }) {
        Some(bytes) => bytes,
        None => return Status::InvalidHandle,
    };
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => return Status::InvalidUtf8,
    };
    match parse_to_handle(&text, language) {
        Ok(handle) => {
            *out_directive = handle;
            Status::Success
        }
        Err(status) => status,
    }
}

/// Aggregate mode: parse into a result object whose directives are drained
/// by [`pragmir_result_take`].
#[no_mangle]
pub unsafe extern "C" fn pragmir_parse_to_result(
    text: *const c_char,
    language: u32,
    out_result: *mut Handle,
) -> Status {
    if text.is_null() || out_result.is_null() {
        return Status::NullPointer;
    }
    let language = match Language::from_repr(language) {
        Some(language) => language,
        None => return Status::OutOfBounds,
    };
    let text = match CStr::from_ptr(text).to_str() {
        Ok(text) => text,
        Err(_) => return Status::InvalidUtf8,
    };
    let directive = match parse_to_handle(text, language) {
        Ok(handle) => handle,
        Err(status) => return status,
    };
    let result = registry::write(|r| {
        r.insert(HandleTag::Result, Resource::ParseResult(vec![directive]))
    });
    *out_result = result;
    Status::Success
}

/// Drain a parse result into a caller-allocated array, transferring
/// ownership of each directive. Draining an already-empty result is
/// `EmptyResult`.
#[no_mangle]
pub unsafe extern "C" fn pragmir_result_take(
    result: Handle,
    out_directives: *mut Handle,
    capacity: usize,
    out_count: *mut usize,
) -> Status {
    if out_directives.is_null() || out_count.is_null() {
        return Status::NullPointer;
    }
    registry::write(|r| {
        let handles = match r.get_mut(result) {
            Some(Resource::ParseResult(handles)) => handles,
            _ => return Status::InvalidHandle,
        };
        if handles.is_empty() {
            return Status::EmptyResult;
        }
        if capacity < handles.len() {
            return Status::OutOfBounds;
        }
        let drained = std::mem::take(handles);
        unsafe {
            for (offset, handle) in drained.iter().enumerate() {
                *out_directives.add(offset) = *handle;
            }
            *out_count = drained.len();
        }
        Status::Success
    })
}

/// Free a parse result. Directives still owned by the aggregate are freed
/// with it; after a drain this is a no-op on them.
#[no_mangle]
pub extern "C" fn pragmir_result_free(result: Handle) -> Status {
    registry::write(|r| {
        let owned = match r.get(result) {
            Some(Resource::ParseResult(handles)) => handles.clone(),
            _ => return Status::InvalidHandle,
        };
        r.remove(result);
        for directive in owned {
            r.remove_directive(directive);
        }
        Status::Success
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::INVALID_HANDLE;
    use std::ffi::CString;

    fn c(text: &str) -> CString {
        CString::new(text).unwrap()
    }

    #[test]
    fn test_parse_direct_mode() {
        let text = c("#pragma omp parallel num_threads(4)");
        let mut handle: Handle = INVALID_HANDLE;
        let status =
            unsafe { pragmir_parse(text.as_ptr(), Language::C as u32, &mut handle) };
        assert_eq!(status, Status::Success);
        assert_ne!(handle, INVALID_HANDLE);
        assert_eq!(crate::directive::pragmir_directive_free(handle), Status::Success);
    }

    #[test]
    fn test_parse_failures_do_not_write_outputs() {
        let mut handle: Handle = 42;
        let status = unsafe {
            pragmir_parse(std::ptr::null(), Language::C as u32, &mut handle)
        };
        assert_eq!(status, Status::NullPointer);
        assert_eq!(handle, 42);

        let text = c("not a pragma");
        let status =
            unsafe { pragmir_parse(text.as_ptr(), Language::C as u32, &mut handle) };
        assert_eq!(status, Status::ParseError);
        assert_eq!(handle, 42);

        let text = c("#pragma omp parallel");
        let status = unsafe { pragmir_parse(text.as_ptr(), 99, &mut handle) };
        assert_eq!(status, Status::OutOfBounds);
        assert_eq!(handle, 42);
    }

    #[test]
    fn test_parse_from_builder_validates_utf8() {
        let mut builder: Handle = INVALID_HANDLE;
        assert_eq!(
            unsafe { crate::string::pragmir_str_new(&mut builder) },
            Status::Success
        );
        assert_eq!(
            crate::string::pragmir_str_push_byte(builder, 0xf0),
            Status::Success
        );
        let mut handle: Handle = INVALID_HANDLE;
        assert_eq!(
            unsafe { pragmir_parse_str(builder, Language::C as u32, &mut handle) },
            Status::InvalidUtf8
        );
        assert_eq!(crate::string::pragmir_str_free(builder), Status::Success);
    }

    #[test]
    fn test_result_drain_transfers_ownership() {
        let text = c("#pragma omp task untied priority(3)");
        let mut result: Handle = INVALID_HANDLE;
        assert_eq!(
            unsafe { pragmir_parse_to_result(text.as_ptr(), Language::C as u32, &mut result) },
            Status::Success
        );

        let mut directives = [INVALID_HANDLE; 4];
        let mut count = 0usize;
        assert_eq!(
            unsafe {
                pragmir_result_take(result, directives.as_mut_ptr(), directives.len(), &mut count)
            },
            Status::Success
        );
        assert_eq!(count, 1);
        assert_ne!(directives[0], INVALID_HANDLE);

        // A second drain finds nothing.
        assert_eq!(
            unsafe {
                pragmir_result_take(result, directives.as_mut_ptr(), directives.len(), &mut count)
            },
            Status::EmptyResult
        );

        // Freeing the drained result must not free the taken directive.
        assert_eq!(pragmir_result_free(result), Status::Success);
        let mut clause_count = 0usize;
        assert_eq!(
            unsafe {
                crate::directive::pragmir_directive_clause_count(directives[0], &mut clause_count)
            },
            Status::Success
        );
        assert_eq!(clause_count, 2);
        assert_eq!(
            crate::directive::pragmir_directive_free(directives[0]),
            Status::Success
        );
    }

    #[test]
    fn test_result_free_without_drain_frees_directives() {
        let text = c("#pragma omp single nowait");
        let mut result: Handle = INVALID_HANDLE;
        assert_eq!(
            unsafe { pragmir_parse_to_result(text.as_ptr(), Language::C as u32, &mut result) },
            Status::Success
        );
        assert_eq!(pragmir_result_free(result), Status::Success);
        assert_eq!(pragmir_result_free(result), Status::InvalidHandle);
    }

    #[test]
    fn test_default_language_round_trip() {
        assert_eq!(
            pragmir_set_default_language(Language::FortranFree as u32),
            Status::Success
        );
        let mut language = 0u32;
        assert_eq!(
            unsafe { pragmir_get_default_language(&mut language) },
            Status::Success
        );
        assert_eq!(language, Language::FortranFree as u32);
        assert_eq!(pragmir_set_default_language(Language::C as u32), Status::Success);
        assert_eq!(pragmir_set_default_language(1234), Status::OutOfBounds);
    }
}
