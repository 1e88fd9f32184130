/*! Two-phase parser for OpenMP and OpenACC directives.
 *
 * Phase one normalizes the physical source: the host-language sentinel is
 * stripped and continuation lines are folded into one logical line. Phase two
 * tokenizes the remainder, recognizes the (possibly combined) directive kind
 * by longest match, and dispatches each clause keyword to its typed builder.
 * Expression bodies stay opaque; nothing here evaluates host-language code.
 */

use pest_derive::Parser;

pub mod clauses;
pub mod recognize;
pub mod sentinel;
pub mod token;

use pragmir_core::{Directive, DirectiveBuilder, Language, Result, SourceLocation};
use token::Token;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub(crate) struct TokenParser;

/// Parse one directive line (or folded continuation group).
///
/// The dialect is inferred from the sentinel (`omp` vs `acc`). Fails with
/// `NoDirective` when the sentinel is absent, `UnknownDirective` when no
/// keyword sequence matches, and `MalformedClause` on any clause-level
/// grammar violation. No partial results are produced.
pub fn parse(text: &str, language: Language) -> Result<Directive> {
    parse_at(text, language, SourceLocation::default())
}

/// Like [`parse`], recording a known source position on the directive.
pub fn parse_at(text: &str, language: Language, location: SourceLocation) -> Result<Directive> {
    let folded = sentinel::fold_continuations(text, language);
    let (dialect, body) = sentinel::strip_sentinel(&folded, language)?;
    let tokens = token::tokenize(body)?;

    let (kind, consumed) = recognize::recognize(&tokens, dialect, language)?;
    log::debug!("recognized {} ({} keyword tokens)", kind.name(), consumed);

    let mut rest = &tokens[consumed..];
    let mut builder = DirectiveBuilder::new(kind, language).location(location);
    if kind.takes_argument() {
        if let Some(Token::ParenBody(arg)) = rest.first() {
            builder = builder.argument(arg.trim().to_string());
            rest = &rest[1..];
        }
    }

    clauses::parse_clauses(rest, &mut builder)?;
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pragmir_core::{
        ClauseKind, Dialect, DirectiveKind, Error, OmpDirectiveKind, ScheduleKind,
    };

    #[test]
    fn test_parallel_with_clauses() {
        let directive =
            parse("#pragma omp parallel num_threads(4) private(x, y) shared(z)", Language::C)
                .unwrap();
        assert_eq!(
            directive.kind(),
            DirectiveKind::Omp(OmpDirectiveKind::Parallel)
        );
        let kinds: Vec<_> = directive
            .clauses_in_original_order()
            .iter()
            .map(|c| c.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![ClauseKind::NumThreads, ClauseKind::Private, ClauseKind::Shared]
        );
        assert_eq!(
            directive.clauses_in_original_order()[0].expression().unwrap(),
            "4"
        );
        assert_eq!(
            directive.clauses_in_original_order()[1].items().unwrap(),
            &["x", "y"]
        );
    }

    #[test]
    fn test_backslash_continuation() {
        let text = "#pragma omp parallel for \\\n    schedule(dynamic, 4) \\\n    private(i, j)";
        let directive = parse(text, Language::C).unwrap();
        assert_eq!(
            directive.kind(),
            DirectiveKind::Omp(OmpDirectiveKind::ParallelFor)
        );
        assert_eq!(directive.clause_count(), 2);
        let (kind, chunk) = directive.clauses_in_original_order()[0].schedule().unwrap();
        assert_eq!(kind, ScheduleKind::Dynamic);
        assert_eq!(chunk, Some("4"));
    }

    #[test]
    fn test_fortran_free_continuation() {
        let text = "!$omp target teams distribute &\n!$omp parallel do &\n!$omp& private(i, j)";
        let directive = parse(text, Language::FortranFree).unwrap();
        assert_eq!(
            directive.kind(),
            DirectiveKind::Omp(OmpDirectiveKind::TargetTeamsDistributeParallelFor)
        );
        assert_eq!(directive.clause_count(), 1);
    }

    #[test]
    fn test_fortran_fixed_continuation() {
        let text = "c$omp parallel do\nc$omp&private(i, j)";
        let directive = parse(text, Language::FortranFixed).unwrap();
        assert_eq!(
            directive.kind(),
            DirectiveKind::Omp(OmpDirectiveKind::ParallelFor)
        );
        assert_eq!(directive.clause_count(), 1);
        assert_eq!(
            directive.clauses_in_original_order()[0].items().unwrap(),
            &["i", "j"]
        );
    }

    #[test]
    fn test_acc_dialect_inferred_from_sentinel() {
        let directive = parse("acc data pcopy(a) present_or_copy(b)", Language::C).unwrap();
        assert_eq!(directive.dialect(), Dialect::OpenAcc);
        let copies = directive.clauses_by_kind().get(&ClauseKind::Copy).unwrap();
        assert_eq!(copies.len(), 2);
    }

    #[test]
    fn test_rejects_unparsable_inputs() {
        assert_eq!(parse("", Language::C), Err(Error::NoDirective));
        assert_eq!(parse("not a pragma", Language::C), Err(Error::NoDirective));
        assert!(matches!(
            parse("#pragma omp unknown_directive_xyz", Language::C),
            Err(Error::UnknownDirective(_))
        ));
    }

    #[test]
    fn test_directive_argument() {
        let directive = parse("#pragma omp critical (lock) hint(1)", Language::C).unwrap();
        assert_eq!(
            directive.kind(),
            DirectiveKind::Omp(OmpDirectiveKind::Critical)
        );
        assert_eq!(directive.argument(), Some("lock"));
        assert_eq!(directive.clause_count(), 1);
        assert_eq!(
            directive.clauses_in_original_order()[0].kind(),
            ClauseKind::Hint
        );
    }

    #[test]
    fn test_location_is_recorded() {
        let directive = parse_at(
            "#pragma omp barrier",
            Language::C,
            SourceLocation::new(12, 3),
        )
        .unwrap();
        assert_eq!(directive.location().line, 12);
        assert_eq!(directive.location().column, 3);
    }
}
