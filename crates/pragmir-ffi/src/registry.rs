use crate::status::{Handle, Status, INVALID_HANDLE};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use pragmir_core::{Clause, Directive};
use std::collections::HashMap;

/// Object kind carried in the high byte of every handle. A freed handle is
/// never reused, and the tag makes a handle of one kind unmistakable for
/// another even across wraparound of the low bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HandleTag {
    Builder = 1,
    Directive = 2,
    Clause = 3,
    Cursor = 4,
    Result = 5,
}

const TAG_SHIFT: u32 = 56;

fn make_handle(tag: HandleTag, sequence: u64) -> Handle {
    ((tag as u64) << TAG_SHIFT) | (sequence & ((1u64 << TAG_SHIFT) - 1))
}

pub fn handle_tag(handle: Handle) -> Option<HandleTag> {
    match (handle >> TAG_SHIFT) as u8 {
        1 => Some(HandleTag::Builder),
        2 => Some(HandleTag::Directive),
        3 => Some(HandleTag::Clause),
        4 => Some(HandleTag::Cursor),
        5 => Some(HandleTag::Result),
        _ => None,
    }
}

/// Incrementally built byte string for C callers.
#[derive(Debug, Default)]
pub struct ByteString {
    pub bytes: Vec<u8>,
}

/// Iteration state over a directive's clause list.
#[derive(Debug)]
pub struct Cursor {
    pub parent: Handle,
    pub position: usize,
}

/// Everything the registry can own. Clause and cursor entries are derived:
/// they name their parent directive and die with it.
#[derive(Debug)]
pub enum Resource {
    Builder(ByteString),
    Directive(Directive),
    Clause { parent: Handle, index: usize },
    Cursor(Cursor),
    ParseResult(Vec<Handle>),
}

#[derive(Debug, Default)]
pub struct Registry {
    next_sequence: u64,
    resources: HashMap<Handle, Resource>,
}

impl Registry {
    pub fn insert(&mut self, tag: HandleTag, resource: Resource) -> Handle {
        self.next_sequence = self.next_sequence.wrapping_add(1);
        let mut handle = make_handle(tag, self.next_sequence);
        // Wraparound of the 56-bit counter could revisit a live handle.
        while handle == INVALID_HANDLE || self.resources.contains_key(&handle) {
            self.next_sequence = self.next_sequence.wrapping_add(1);
            handle = make_handle(tag, self.next_sequence);
        }
        self.resources.insert(handle, resource);
        handle
    }

    pub fn get(&self, handle: Handle) -> Option<&Resource> {
        self.resources.get(&handle)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Resource> {
        self.resources.get_mut(&handle)
    }

    pub fn remove(&mut self, handle: Handle) -> Option<Resource> {
        self.resources.remove(&handle)
    }

    /// Remove a directive together with every clause handle and cursor
    /// derived from it.
    pub fn remove_directive(&mut self, handle: Handle) -> Option<Resource> {
        let removed = self.resources.remove(&handle)?;
        self.resources.retain(|_, resource| match resource {
            Resource::Clause { parent, .. } => *parent != handle,
            Resource::Cursor(cursor) => cursor.parent != handle,
            _ => true,
        });
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Number of live clause/cursor entries derived from one directive.
    pub fn derived_count(&self, parent: Handle) -> usize {
        self.resources
            .values()
            .filter(|resource| match resource {
                Resource::Clause { parent: p, .. } => *p == parent,
                Resource::Cursor(cursor) => cursor.parent == parent,
                _ => false,
            })
            .count()
    }
}

static REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::default()));

/// Shared read access; concurrent `get`s from multiple threads are fine.
pub fn read<R>(f: impl FnOnce(&Registry) -> R) -> R {
    f(&REGISTRY.read())
}

/// Exclusive access for insert/remove.
pub fn write<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    f(&mut REGISTRY.write())
}

/// Run `f` against the directive behind `handle`, or report `InvalidHandle`.
pub fn with_directive<R>(handle: Handle, f: impl FnOnce(&Directive) -> R) -> Result<R, Status> {
    read(|registry| match registry.get(handle) {
        Some(Resource::Directive(directive)) => Ok(f(directive)),
        _ => Err(Status::InvalidHandle),
    })
}

/// Resolve a derived clause handle through its parent directive.
pub fn with_clause<R>(handle: Handle, f: impl FnOnce(&Clause) -> R) -> Result<R, Status> {
    read(|registry| {
        let (parent, index) = match registry.get(handle) {
            Some(Resource::Clause { parent, index }) => (*parent, *index),
            _ => return Err(Status::InvalidHandle),
        };
        match registry.get(parent) {
            Some(Resource::Directive(directive)) => match directive.clause_at(index) {
                Ok(clause) => Ok(f(clause)),
                Err(_) => Err(Status::InvalidHandle),
            },
            _ => Err(Status::InvalidHandle),
        }
    })
}

/// Register a clause handle for `index` within an existing directive.
pub fn register_clause(directive: Handle, index: usize) -> Result<Handle, Status> {
    write(|registry| {
        let count = match registry.get(directive) {
            Some(Resource::Directive(d)) => d.clause_count(),
            _ => return Err(Status::InvalidHandle),
        };
        if index >= count {
            return Err(Status::OutOfBounds);
        }
        Ok(registry.insert(
            HandleTag::Clause,
            Resource::Clause {
                parent: directive,
                index,
            },
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pragmir_parser::parse;
    use pragmir_core::Language;

    #[test]
    fn test_handles_are_tagged_and_monotonic() {
        let (a, b) = write(|registry| {
            let a = registry.insert(HandleTag::Builder, Resource::Builder(ByteString::default()));
            let b = registry.insert(HandleTag::Builder, Resource::Builder(ByteString::default()));
            (a, b)
        });
        assert_eq!(handle_tag(a), Some(HandleTag::Builder));
        assert_ne!(a, b);
        assert!(b > a);
        write(|registry| {
            registry.remove(a);
            registry.remove(b);
        });
    }

    #[test]
    fn test_directive_cascade_removes_derived_handles() {
        let directive = parse("#pragma omp parallel private(x) nowait", Language::C).unwrap();

        let handle = write(|r| r.insert(HandleTag::Directive, Resource::Directive(directive)));
        let clause = register_clause(handle, 0).unwrap();
        let cursor = write(|r| {
            r.insert(
                HandleTag::Cursor,
                Resource::Cursor(Cursor {
                    parent: handle,
                    position: 0,
                }),
            )
        });

        assert!(with_clause(clause, |c| c.kind()).is_ok());
        assert_eq!(read(|r| r.derived_count(handle)), 2);

        write(|r| r.remove_directive(handle));
        assert_eq!(read(|r| r.derived_count(handle)), 0);
        assert_eq!(with_clause(clause, |c| c.kind()), Err(Status::InvalidHandle));
        assert_eq!(
            with_directive(handle, |d| d.clause_count()),
            Err(Status::InvalidHandle)
        );
        assert!(read(|r| r.get(cursor).is_none()));
    }

    #[test]
    fn test_register_clause_bounds() {
        let directive = parse("#pragma omp parallel nowait", Language::C).unwrap();
        let handle = write(|r| r.insert(HandleTag::Directive, Resource::Directive(directive)));
        assert!(register_clause(handle, 0).is_ok());
        assert_eq!(register_clause(handle, 1), Err(Status::OutOfBounds));
        assert_eq!(register_clause(INVALID_HANDLE, 0), Err(Status::InvalidHandle));
        write(|r| r.remove_directive(handle));
    }
}
