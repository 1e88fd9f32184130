//! Stateful iteration over a directive's clause list, addressable by its
//! own handle. Cursors are derived objects: freeing the directive kills
//! them.

use crate::registry::{self, Cursor, HandleTag, Resource};
use crate::status::{Handle, Status};

#[no_mangle]
pub unsafe extern "C" fn pragmir_cursor_new(directive: Handle, out_cursor: *mut Handle) -> Status {
    if out_cursor.is_null() {
        return Status::NullPointer;
    }
    let created = registry::write(|r| {
        if !matches!(r.get(directive), Some(Resource::Directive(_))) {
            return Err(Status::InvalidHandle);
        }
        Ok(r.insert(
            HandleTag::Cursor,
            Resource::Cursor(Cursor {
                parent: directive,
                position: 0,
            }),
        ))
    });
    match created {
        Ok(cursor) => {
            *out_cursor = cursor;
            Status::Success
        }
        Err(status) => status,
    }
}

fn cursor_state(r: &registry::Registry, cursor: Handle) -> Result<(Handle, usize, usize), Status> {
    let (parent, position) = match r.get(cursor) {
        Some(Resource::Cursor(cursor)) => (cursor.parent, cursor.position),
        _ => return Err(Status::InvalidHandle),
    };
    let total = match r.get(parent) {
        Some(Resource::Directive(directive)) => directive.clause_count(),
        _ => return Err(Status::InvalidHandle),
    };
    Ok((parent, position, total))
}

fn clause_handle_at(advance: bool, cursor: Handle) -> Result<Handle, Status> {
    registry::write(|r| {
        let (parent, position, total) = cursor_state(r, cursor)?;
        if position >= total {
            return Err(Status::OutOfBounds);
        }
        let clause = r.insert(
            HandleTag::Clause,
            Resource::Clause {
                parent,
                index: position,
            },
        );
        if advance {
            if let Some(Resource::Cursor(state)) = r.get_mut(cursor) {
                state.position = position + 1;
            }
        }
        Ok(clause)
    })
}

/// Hand out a handle for the clause under the cursor, then advance. Past
/// the end this is `OutOfBounds` and the cursor does not move.
#[no_mangle]
pub unsafe extern "C" fn pragmir_cursor_next(cursor: Handle, out_clause: *mut Handle) -> Status {
    if out_clause.is_null() {
        return Status::NullPointer;
    }
    match clause_handle_at(true, cursor) {
        Ok(clause) => {
            *out_clause = clause;
            Status::Success
        }
        Err(status) => status,
    }
}

/// Like `next` without advancing.
#[no_mangle]
pub unsafe extern "C" fn pragmir_cursor_current(cursor: Handle, out_clause: *mut Handle) -> Status {
    if out_clause.is_null() {
        return Status::NullPointer;
    }
    match clause_handle_at(false, cursor) {
        Ok(clause) => {
            *out_clause = clause;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_cursor_is_done(cursor: Handle, out_done: *mut bool) -> Status {
    if out_done.is_null() {
        return Status::NullPointer;
    }
    match registry::read(|r| cursor_state(r, cursor)) {
        Ok((_, position, total)) => {
            *out_done = position >= total;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub extern "C" fn pragmir_cursor_reset(cursor: Handle) -> Status {
    registry::write(|r| match r.get_mut(cursor) {
        Some(Resource::Cursor(state)) => {
            state.position = 0;
            Status::Success
        }
        _ => Status::InvalidHandle,
    })
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_cursor_total(cursor: Handle, out_total: *mut usize) -> Status {
    if out_total.is_null() {
        return Status::NullPointer;
    }
    match registry::read(|r| cursor_state(r, cursor)) {
        Ok((_, _, total)) => {
            *out_total = total;
            Status::Success
        }
        Err(status) => status,
    }
}

#[no_mangle]
pub unsafe extern "C" fn pragmir_cursor_position(
    cursor: Handle,
    out_position: *mut usize,
) -> Status {
    if out_position.is_null() {
        return Status::NullPointer;
    }
    match registry::read(|r| match r.get(cursor) {
        Some(Resource::Cursor(state)) => Some(state.position),
        _ => None,
    }) {
        Some(position) => {
            *out_position = position;
            Status::Success
        }
        None => Status::InvalidHandle,
    }
}

#[no_mangle]
pub extern "C" fn pragmir_cursor_free(cursor: Handle) -> Status {
    registry::write(|r| {
        if !matches!(r.get(cursor), Some(Resource::Cursor(_))) {
            return Status::InvalidHandle;
        }
        r.remove(cursor);
        Status::Success
    })
}
