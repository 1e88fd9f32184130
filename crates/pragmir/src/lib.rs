/*! Unified interface for directive parsing, IR, and rendering.
 *
 * Single import for everything: parsing OpenMP/OpenACC pragmas into IR,
 * querying clauses, rendering canonical text, converting between host
 * languages, and the handle-based C ABI with its legacy façades.
 */

pub use pragmir_core as core;
pub use pragmir_emit as emit;
pub use pragmir_ffi as ffi;
pub use pragmir_parser as parser;

pub use pragmir_core::{
    AccDirectiveKind, Clause, ClauseKind, ClausePayload, ClauseVariant, DefaultKind, Dialect,
    Directive, DirectiveKind, Error, Language, MemoryOrderKind, OmpDirectiveKind, ProcBindKind,
    ReductionOperator, Result, ScheduleKind, SourceLocation,
};

pub use pragmir_emit::{convert, render, render_for};
pub use pragmir_parser::{parse, parse_at};

pub use pragmir_ffi::compat::{OpenACCDirective, OpenMPDirective};
