use crate::{
    Clause, ClauseKind, ClausePayload, Dialect, Directive, DirectiveBuilder, DirectiveKind,
    Language, OmpDirectiveKind,
};

fn directive_with(kinds: &[(ClauseKind, ClausePayload)]) -> Directive {
    let mut builder = DirectiveBuilder::new(
        DirectiveKind::Omp(OmpDirectiveKind::ParallelFor),
        Language::C,
    );
    for (kind, payload) in kinds {
        builder.push_clause(Clause::new(*kind, payload.clone(), Vec::new()));
    }
    builder.build()
}

#[test]
fn test_interleaved_kinds_keep_source_order() {
    let directive = directive_with(&[
        (ClauseKind::Private, ClausePayload::Items(vec!["a".into()])),
        (ClauseKind::Shared, ClausePayload::Items(vec!["b".into()])),
        (ClauseKind::Private, ClausePayload::Items(vec!["c".into()])),
        (ClauseKind::Nowait, ClausePayload::Bare),
        (ClauseKind::Private, ClausePayload::Items(vec!["d".into()])),
    ]);

    let order: Vec<_> = directive
        .clauses_in_original_order()
        .iter()
        .map(|c| c.kind())
        .collect();
    assert_eq!(
        order,
        vec![
            ClauseKind::Private,
            ClauseKind::Shared,
            ClauseKind::Private,
            ClauseKind::Nowait,
            ClauseKind::Private,
        ]
    );

    let private_items: Vec<_> = directive
        .clauses_of_kind(ClauseKind::Private)
        .map(|c| c.items().unwrap()[0].as_str())
        .collect();
    assert_eq!(private_items, vec!["a", "c", "d"]);
}

#[test]
fn test_map_is_partition_under_kind() {
    let directive = directive_with(&[
        (ClauseKind::Firstprivate, ClausePayload::Items(vec!["x".into()])),
        (ClauseKind::Nowait, ClausePayload::Bare),
        (ClauseKind::Firstprivate, ClausePayload::Items(vec!["y".into()])),
    ]);

    for (kind, positions) in directive.clauses_by_kind() {
        let expected: Vec<usize> = directive
            .clauses_in_original_order()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind() == *kind)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(positions, &expected);
    }

    let total: usize = directive.clauses_by_kind().values().map(Vec::len).sum();
    assert_eq!(total, directive.clause_count());
}

#[test]
fn test_dialect_follows_kind() {
    let directive = directive_with(&[]);
    assert_eq!(directive.dialect(), Dialect::OpenMp);
    assert_eq!(directive.kind().name(), "parallel for");
}
