//! Emulation of the legacy class surfaces: `OpenMPDirective`/`OpenMPClause`
//! and `OpenACCDirective`/`OpenACCClause` as thin wrappers over a directive
//! handle. Method names follow the historical API, so they are camelCase.
//!
//! The per-object clause caches are built lazily and die with the wrapper;
//! dropping a directive façade frees its handle (and with it every derived
//! clause handle).

use crate::parse::{default_language, set_default_language};
use crate::registry::{self, HandleTag, Resource};
use crate::status::Handle;
use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use pragmir_core::{
    AccDirectiveKind, Clause, ClauseKind, Error, Language, OmpDirectiveKind, Result,
};
use pragmir_emit::render::{render_clause_string, render_keywords};

/// Set the process-wide language used by [`OpenMPDirective::parse`] and
/// [`OpenACCDirective::parse`] when no explicit language is given.
pub fn set_lang(language: Language) {
    set_default_language(language);
}

pub fn current_lang() -> Language {
    default_language()
}

macro_rules! legacy_surface {
    ($directive:ident, $clause:ident, $kind:ty, $extract:ident) => {
        pub struct $clause {
            handle: Handle,
            kind: ClauseKind,
        }

        impl $clause {
            fn from_handle(handle: Handle) -> Option<Self> {
                let kind = registry::with_clause(handle, Clause::kind).ok()?;
                Some(Self { handle, kind })
            }

            pub fn handle(&self) -> Handle {
                self.handle
            }

            #[allow(non_snake_case)]
            pub fn getKind(&self) -> ClauseKind {
                self.kind
            }

            #[allow(non_snake_case)]
            pub fn toString(&self) -> String {
                registry::with_clause(self.handle, render_clause_string).unwrap_or_default()
            }
        }

        impl Drop for $clause {
            fn drop(&mut self) {
                registry::write(|r| {
                    r.remove(self.handle);
                });
            }
        }

        pub struct $directive {
            handle: Handle,
            kind: $kind,
            language: Language,
            ordered: OnceCell<Vec<$clause>>,
            by_kind: OnceCell<IndexMap<ClauseKind, Vec<$clause>>>,
        }

        impl $directive {
            /// Parse using the process-wide default language.
            pub fn parse(text: &str) -> Result<Self> {
                Self::parse_with(text, current_lang())
            }

            pub fn parse_with(text: &str, language: Language) -> Result<Self> {
                let directive = pragmir_parser::parse(text, language)?;
                let kind = directive.kind().$extract().ok_or(Error::NoDirective)?;
                let handle = registry::write(|r| {
                    r.insert(HandleTag::Directive, Resource::Directive(directive))
                });
                Ok(Self {
                    handle,
                    kind,
                    language,
                    ordered: OnceCell::new(),
                    by_kind: OnceCell::new(),
                })
            }

            pub fn handle(&self) -> Handle {
                self.handle
            }

            #[allow(non_snake_case)]
            pub fn getKind(&self) -> $kind {
                self.kind
            }

            #[allow(non_snake_case)]
            pub fn getBaseLang(&self) -> Language {
                self.language
            }

            /// Clauses exactly as they appeared in the source.
            #[allow(non_snake_case)]
            pub fn getClausesInOriginalOrder(&self) -> &[$clause] {
                self.ordered.get_or_init(|| {
                    let count = registry::with_directive(self.handle, |d| d.clause_count())
                        .unwrap_or(0);
                    (0..count)
                        .filter_map(|index| registry::register_clause(self.handle, index).ok())
                        .filter_map($clause::from_handle)
                        .collect()
                })
            }

            /// Indexed view: clause kind to the non-empty ordered sequence of
            /// clauses of that kind.
            #[allow(non_snake_case)]
            pub fn getAllClauses(&self) -> &IndexMap<ClauseKind, Vec<$clause>> {
                self.by_kind.get_or_init(|| {
                    let kinds: Vec<ClauseKind> = registry::with_directive(self.handle, |d| {
                        d.clauses_in_original_order()
                            .iter()
                            .map(Clause::kind)
                            .collect()
                    })
                    .unwrap_or_default();

                    let mut map: IndexMap<ClauseKind, Vec<$clause>> = IndexMap::new();
                    for (index, kind) in kinds.into_iter().enumerate() {
                        if let Ok(handle) = registry::register_clause(self.handle, index) {
                            if let Some(clause) = $clause::from_handle(handle) {
                                map.entry(kind).or_default().push(clause);
                            }
                        }
                    }
                    map
                })
            }

            /// Canonical rendering with the default sentinel prefix.
            #[allow(non_snake_case)]
            pub fn toString(&self) -> String {
                registry::with_directive(self.handle, pragmir_emit::render).unwrap_or_default()
            }

            /// Legacy pragma emitter. `prefix` replaces the sentinel prefix,
            /// `suffix` is appended verbatim, and `continuation`, when given,
            /// is emitted before the line break that precedes each clause.
            #[allow(non_snake_case)]
            pub fn generatePragmaString(
                &self,
                prefix: Option<&str>,
                suffix: Option<&str>,
                continuation: Option<&str>,
            ) -> String {
                let rendered = registry::with_directive(self.handle, |d| {
                    let mut out = String::new();
                    out.push_str(prefix.unwrap_or(d.language().prefix(d.dialect())));
                    out.push_str(&render_keywords(d.kind(), d.language()));
                    if let Some(argument) = d.argument() {
                        out.push('(');
                        out.push_str(argument);
                        out.push(')');
                    }
                    for clause in d.clauses_in_original_order() {
                        match continuation {
                            Some(continuation) => {
                                out.push(' ');
                                out.push_str(continuation);
                                out.push('\n');
                            }
                            None => out.push(' '),
                        }
                        out.push_str(&render_clause_string(clause));
                    }
                    if let Some(suffix) = suffix {
                        out.push_str(suffix);
                    }
                    out
                });
                rendered.unwrap_or_default()
            }
        }

        impl Drop for $directive {
            fn drop(&mut self) {
                registry::write(|r| {
                    r.remove_directive(self.handle);
                });
            }
        }
    };
}

legacy_surface!(OpenMPDirective, OpenMPClause, OmpDirectiveKind, as_omp);
legacy_surface!(OpenACCDirective, OpenACCClause, AccDirectiveKind, as_acc);
