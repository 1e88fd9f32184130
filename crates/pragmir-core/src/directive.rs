use crate::clause::ClauseKind;
use crate::kind::DirectiveKind;
use crate::lang::{Dialect, Language};
use crate::payload::{
    ClausePayload, ClauseVariant, DefaultKind, MemoryOrderKind, ProcBindKind, ReductionOperator,
    ScheduleKind,
};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Position of the directive in its enclosing file; both fields zero when
/// unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn is_known(&self) -> bool {
        self.line != 0 || self.column != 0
    }
}

/// One parsed clause: canonical kind, typed payload, normalized modifiers.
///
/// Modifiers are the lowercase keywords that preceded a `:` inside the
/// argument body (`readonly`, `always`, `to`, `monotonic`, ...). The payload
/// holds everything after them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    kind: ClauseKind,
    payload: ClausePayload,
    modifiers: Vec<String>,
}

impl Clause {
    pub fn new(kind: ClauseKind, payload: ClausePayload, modifiers: Vec<String>) -> Self {
        Self {
            kind,
            payload,
            modifiers,
        }
    }

    pub fn bare(kind: ClauseKind) -> Self {
        Self::new(kind, ClausePayload::Bare, Vec::new())
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    pub fn variant(&self) -> ClauseVariant {
        self.payload.variant()
    }

    pub fn payload(&self) -> &ClausePayload {
        &self.payload
    }

    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    pub fn is_bare(&self) -> bool {
        matches!(self.payload, ClausePayload::Bare)
    }

    /// Opaque expression body; `TypeMismatch` for any other variant.
    pub fn expression(&self) -> Result<&str> {
        match &self.payload {
            ClausePayload::Expression(expr) => Ok(expr),
            _ => Err(Error::TypeMismatch),
        }
    }

    /// Item list; `TypeMismatch` unless this is a list clause.
    pub fn items(&self) -> Result<&[String]> {
        match &self.payload {
            ClausePayload::Items(items) => Ok(items),
            ClausePayload::Reduction { items, .. } => Ok(items),
            ClausePayload::Wait { items, .. } => Ok(items),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn schedule(&self) -> Result<(ScheduleKind, Option<&str>)> {
        match &self.payload {
            ClausePayload::Schedule { kind, chunk } => Ok((*kind, chunk.as_deref())),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn default_kind(&self) -> Result<DefaultKind> {
        match &self.payload {
            ClausePayload::Default(kind) => Ok(*kind),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn proc_bind(&self) -> Result<ProcBindKind> {
        match &self.payload {
            ClausePayload::ProcBind(kind) => Ok(*kind),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn memory_order(&self) -> Result<MemoryOrderKind> {
        match &self.payload {
            ClausePayload::MemoryOrder(kind) => Ok(*kind),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn reduction(&self) -> Result<(ReductionOperator, Option<&str>, &[String])> {
        match &self.payload {
            ClausePayload::Reduction {
                op,
                identifier,
                items,
            } => Ok((*op, identifier.as_deref(), items)),
            _ => Err(Error::TypeMismatch),
        }
    }

    pub fn wait(&self) -> Result<(Option<&str>, bool, &[String])> {
        match &self.payload {
            ClausePayload::Wait {
                devnum,
                queues,
                items,
            } => Ok((devnum.as_deref(), *queues, items)),
            _ => Err(Error::TypeMismatch),
        }
    }
}

/// A fully parsed directive. Immutable once built; the ordered clause list
/// and the kind index always describe the same clauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    kind: DirectiveKind,
    language: Language,
    location: SourceLocation,
    argument: Option<String>,
    clauses: Vec<Clause>,
    by_kind: IndexMap<ClauseKind, Vec<usize>>,
}

impl Directive {
    pub fn kind(&self) -> DirectiveKind {
        self.kind
    }

    pub fn dialect(&self) -> Dialect {
        self.kind.dialect()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// The directive-level parenthesized payload, e.g. the name in
    /// `critical(name)` or the list in `flush(a, b)`.
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    /// Clauses exactly as they appeared in the source.
    pub fn clauses_in_original_order(&self) -> &[Clause] {
        &self.clauses
    }

    /// Positions into the ordered list, partitioned by canonical kind.
    pub fn clauses_by_kind(&self) -> &IndexMap<ClauseKind, Vec<usize>> {
        &self.by_kind
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub fn clause_at(&self, index: usize) -> Result<&Clause> {
        self.clauses.get(index).ok_or(Error::OutOfBounds)
    }

    /// All clauses of one kind, in source order.
    pub fn clauses_of_kind(&self, kind: ClauseKind) -> impl Iterator<Item = &Clause> {
        self.by_kind
            .get(&kind)
            .map(|positions| positions.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&pos| &self.clauses[pos])
    }
}

/// Parse-time construction of a [`Directive`]; the only place the clause
/// list and its index are mutated.
#[derive(Debug)]
pub struct DirectiveBuilder {
    kind: DirectiveKind,
    language: Language,
    location: SourceLocation,
    argument: Option<String>,
    clauses: Vec<Clause>,
    by_kind: IndexMap<ClauseKind, Vec<usize>>,
}

impl DirectiveBuilder {
    pub fn new(kind: DirectiveKind, language: Language) -> Self {
        Self {
            kind,
            language,
            location: SourceLocation::default(),
            argument: None,
            clauses: Vec::new(),
            by_kind: IndexMap::new(),
        }
    }

    pub fn location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn argument(mut self, argument: String) -> Self {
        self.argument = Some(argument);
        self
    }

    pub fn push_clause(&mut self, clause: Clause) {
        let position = self.clauses.len();
        self.by_kind.entry(clause.kind()).or_default().push(position);
        self.clauses.push(clause);
    }

    pub fn build(self) -> Directive {
        Directive {
            kind: self.kind,
            language: self.language,
            location: self.location,
            argument: self.argument,
            clauses: self.clauses,
            by_kind: self.by_kind,
        }
    }
}
