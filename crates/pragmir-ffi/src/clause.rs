//! Status-coded queries over clause handles, including the typed accessors
//! that report `TypeMismatch` when aimed at the wrong payload variant.

use crate::copy_out_str;
use crate::registry::{self, Resource};
use crate::status::{Handle, Status};
use pragmir_core::{Clause, Error};
use std::os::raw::c_char;

#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_at(
    directive: Handle,
    index: usize,
    out_clause: *mut Handle,
) -> Status {
    if out_clause.is_null() {
        return Status::NullPointer;
    }
    match registry::register_clause(directive, index) {
        Ok(clause) => {
            *out_clause = clause;
            Status::Success
        }
        Err(status) => status,
    }
}

fn typed_scalar<T>(
    handle: Handle,
    accessor: impl FnOnce(&Clause) -> Result<T, Error>,
) -> Result<T, Status> {
    match registry::with_clause(handle, accessor) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(Status::from(&error)),
        Err(status) => Err(status),
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_kind(handle: Handle, out_kind: *mut u32) -> Status {
    if out_kind.is_null() {
        return Status::NullPointer;
    }
    match registry::with_clause(handle, |c| c.kind() as u32) {
        Ok(kind) => {
            *out_kind = kind;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_variant(handle: Handle, out_variant: *mut u32) -> Status {
    if out_variant.is_null() {
        return Status::NullPointer;
    }
    match registry::with_clause(handle, |c| c.variant() as u32) {
        Ok(variant) => {
            *out_variant = variant;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_is_bare(handle: Handle, out_bare: *mut bool) -> Status {
    if out_bare.is_null() {
        return Status::NullPointer;
    }
    match registry::with_clause(handle, Clause::is_bare) {
        Ok(bare) => {
            *out_bare = bare;
            Status::Success
        }
        Err(status) => status,
    }
}

/// Canonical keyword of the clause (`num_threads`, `copy`, ...); aliases
/// were normalized at parse time, so `pcopy` reads back as `copy`.
#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_name(
    handle: Handle,
    buffer: *mut c_char,
    capacity: usize,
    out_len: *mut usize,
) -> Status {
    match registry::with_clause(handle, |c| c.kind().name()) {
        Ok(name) => copy_out_str(name, buffer, capacity, out_len),
        Err(status) => status,
    }
}

/// Opaque expression body; serves `num_threads`, `if`, `collapse`, and
/// every other expression clause.
#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_expression(
    handle: Handle,
    buffer: *mut c_char,
    capacity: usize,
    out_len: *mut usize,
) -> Status {
    match typed_scalar(handle, |c| c.expression().map(str::to_string)) {
        Ok(expression) => copy_out_str(&expression, buffer, capacity, out_len),
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_default_kind(
    handle: Handle,
    out_kind: *mut u32,
) -> Status {
    if out_kind.is_null() {
        return Status::NullPointer;
    }
    match typed_scalar(handle, |c| c.default_kind().map(|k| k as u32)) {
        Ok(kind) => {
            *out_kind = kind;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_schedule_kind(
    handle: Handle,
    out_kind: *mut u32,
) -> Status {
    if out_kind.is_null() {
        return Status::NullPointer;
    }
    match typed_scalar(handle, |c| c.schedule().map(|(kind, _)| kind as u32)) {
        Ok(kind) => {
            *out_kind = kind;
            Status::Success
        }
        Err(status) => status,
    }
}

/// Chunk expression of a schedule clause; `EmptyResult` when none was given.
#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_schedule_chunk(
    handle: Handle,
    buffer: *mut c_char,
    capacity: usize,
    out_len: *mut usize,
) -> Status {
    let chunk = typed_scalar(handle, |c| {
        c.schedule().map(|(_, chunk)| chunk.map(str::to_string))
    });
    match chunk {
        Ok(Some(chunk)) => copy_out_str(&chunk, buffer, capacity, out_len),
        Ok(None) => Status::EmptyResult,
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_reduction_op(handle: Handle, out_op: *mut u32) -> Status {
    if out_op.is_null() {
        return Status::NullPointer;
    }
    match typed_scalar(handle, |c| c.reduction().map(|(op, _, _)| op as u32)) {
        Ok(op) => {
            *out_op = op;
            Status::Success
        }
        Err(status) => status,
    }
}

/// User-defined reduction identifier; `EmptyResult` for built-in operators.
#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_reduction_identifier(
    handle: Handle,
    buffer: *mut c_char,
    capacity: usize,
    out_len: *mut usize,
) -> Status {
    let identifier = typed_scalar(handle, |c| {
        c.reduction()
            .map(|(_, identifier, _)| identifier.map(str::to_string))
    });
    match identifier {
        Ok(Some(identifier)) => copy_out_str(&identifier, buffer, capacity, out_len),
        Ok(None) => Status::EmptyResult,
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_item_count(
    handle: Handle,
    out_count: *mut usize,
) -> Status {
    if out_count.is_null() {
        return Status::NullPointer;
    }
    match typed_scalar(handle, |c| c.items().map(<[String]>::len)) {
        Ok(count) => {
            *out_count = count;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_item_at(
    handle: Handle,
    index: usize,
    buffer: *mut c_char,
    capacity: usize,
    out_len: *mut usize,
) -> Status {
    let item = typed_scalar(handle, |c| {
        c.items().map(|items| items.get(index).cloned())
    });
    match item {
        Ok(Some(item)) => copy_out_str(&item, buffer, capacity, out_len),
        Ok(None) => Status::OutOfBounds,
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_modifier_count(
    handle: Handle,
    out_count: *mut usize,
) -> Status {
    if out_count.is_null() {
        return Status::NullPointer;
    }
    match registry::with_clause(handle, |c| c.modifiers().len()) {
        Ok(count) => {
            *out_count = count;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_clause_modifier_at(
    handle: Handle,
    index: usize,
    buffer: *mut c_char,
    capacity: usize,
    out_len: *mut usize,
) -> Status {
    match registry::with_clause(handle, |c| c.modifiers().get(index).cloned()) {
        Ok(Some(modifier)) => copy_out_str(&modifier, buffer, capacity, out_len),
        Ok(None) => Status::OutOfBounds,
        Err(status) => status,
    }
}

#[no_mangle]
pub extern "C" fn pragmir_clause_free(handle: Handle) -> Status {
    registry::write(|r| {
        if !matches!(r.get(handle), Some(Resource::Clause { .. })) {
            return Status::InvalidHandle;
        }
        r.remove(handle);
        Status::Success
    })
}
