//! Status-coded queries over a directive handle.

use crate::copy_out_str;
use crate::registry::{self, Resource};
use crate::status::{Handle, Status};
use std::os::raw::c_char;

#[no_mangle]
pub unsafe extern "C" fn pragmir_directive_kind(handle: Handle, out_kind: *mut u32) -> Status {
    if out_kind.is_null() {
        return Status::NullPointer;
    }
    match registry::with_directive(handle, |d| d.kind().repr()) {
        Ok(kind) => {
            *out_kind = kind;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_directive_dialect(handle: Handle, out_dialect: *mut u32) -> Status {
    if out_dialect.is_null() {
        return Status::NullPointer;
    }
    match registry::with_directive(handle, |d| d.dialect() as u32) {
        Ok(dialect) => {
            *out_dialect = dialect;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_directive_language(
    handle: Handle,
    out_language: *mut u32,
) -> Status {
    if out_language.is_null() {
        return Status::NullPointer;
    }
    match registry::with_directive(handle, |d| d.language() as u32) {
        Ok(language) => {
            *out_language = language;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_directive_clause_count(
    handle: Handle,
    out_count: *mut usize,
) -> Status {
    if out_count.is_null() {
        return Status::NullPointer;
    }
    match registry::with_directive(handle, |d| d.clause_count()) {
        Ok(count) => {
            *out_count = count;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_directive_line(handle: Handle, out_line: *mut u32) -> Status {
    if out_line.is_null() {
        return Status::NullPointer;
    }
    match registry::with_directive(handle, |d| d.location().line) {
        Ok(line) => {
            *out_line = line;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_directive_column(handle: Handle, out_column: *mut u32) -> Status {
    if out_column.is_null() {
        return Status::NullPointer;
    }
    match registry::with_directive(handle, |d| d.location().column) {
        Ok(column) => {
            *out_column = column;
            Status::Success
        }
        Err(status) => status,
    }
}

/// Canonical rendering of the directive in its own host language.
#[no_mangle]
pub unsafe extern "C" fn pragmir_directive_render(
    handle: Handle,
    buffer: *mut c_char,
    capacity: usize,
    out_len: *mut usize,
) -> Status {
    match registry::with_directive(handle, pragmir_emit::render) {
        Ok(rendered) => copy_out_str(&rendered, buffer, capacity, out_len),
        Err(status) => status,
    }
}

/// Free a directive and every clause handle or cursor derived from it.
/// Freeing twice reports `InvalidHandle`.
#[no_mangle]
pub extern "C" fn pragmir_directive_free(handle: Handle) -> Status {
    registry::write(|r| {
        if !matches!(r.get(handle), Some(Resource::Directive(_))) {
            return Status::InvalidHandle;
        }
        r.remove_directive(handle);
        Status::Success
    })
}

/// Total number of live registry entries, all kinds included.
#[no_mangle]
pub unsafe extern "C" fn pragmir_registry_count(out_count: *mut usize) -> Status {
    if out_count.is_null() {
        return Status::NullPointer;
    }
    *out_count = registry::read(|r| r.len());
    Status::Success
}
