/*! Core IR types for OpenMP and OpenACC directives.
 *
 * Source-to-source tools need a structured view of a pragma before they can
 * rewrite it. This crate provides the directive/clause value tree that the
 * parser produces and the renderer consumes: closed kind enumerations for
 * both dialects, typed clause payloads, and the ordered-plus-indexed clause
 * storage that preserves what the programmer actually wrote.
 */

pub mod clause;
pub mod directive;
pub mod kind;
pub mod lang;
pub mod payload;

pub use clause::{ClauseKind, ClauseRule};
pub use directive::{Clause, Directive, DirectiveBuilder, SourceLocation};
pub use kind::{AccDirectiveKind, DirectiveKind, OmpDirectiveKind};
pub use lang::{Dialect, Language};
pub use payload::{
    ClausePayload, ClauseVariant, DefaultKind, MemoryOrderKind, ProcBindKind, ReductionOperator,
    ScheduleKind,
};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("input is not valid UTF-8")]
    InvalidEncoding,
    #[error("no directive sentinel found")]
    NoDirective,
    #[error("unknown directive: {0}")]
    UnknownDirective(String),
    #[error("malformed clause: {0}")]
    MalformedClause(String),
    #[error("accessor does not match clause variant")]
    TypeMismatch,
    #[error("index out of bounds")]
    OutOfBounds,
    #[error("no pending result")]
    EmptyResult,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
