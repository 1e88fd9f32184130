//! End-to-end scenarios through the umbrella crate: parse, query, render,
//! convert.

use pragmir::{
    convert, parse, render, render_for, ClauseKind, DirectiveKind, Language, OmpDirectiveKind,
    ReductionOperator, ScheduleKind,
};

#[test]
fn test_parallel_scenario() {
    let directive = parse(
        "#pragma omp parallel num_threads(4) private(x, y) shared(z)",
        Language::C,
    )
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
    assert_eq!(
        render(&directive),
        "#pragma omp parallel num_threads(4) private(x, y) shared(z)"
    );
}

#[test]
fn test_continuation_scenario() {
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
fn test_fortran_combined_directive_scenario() {
    let text = "!$omp target teams distribute &\n!$omp parallel do &\n!$omp& private(i, j)";
    let directive = parse(text, Language::FortranFree).unwrap();
    assert_eq!(
        directive.kind(),
        DirectiveKind::Omp(OmpDirectiveKind::TargetTeamsDistributeParallelFor)
    );
    assert_eq!(directive.clause_count(), 1);
}

#[test]
fn test_reduction_scenario() {
    let directive = parse("#pragma omp parallel for reduction(+:sum)", Language::C).unwrap();
    let (op, _, items) = directive.clauses_in_original_order()[0].reduction().unwrap();
    assert_eq!(op, ReductionOperator::Add);
    assert_eq!(items, &["sum"]);
}

#[test]
fn test_acc_alias_scenario() {
    let directive = parse(
        "acc data pcopy(a) present_or_copy(b) pcopyin(c) present_or_copyin(d) \
         pcopyout(e) present_or_copyout(f) pcreate(g) present_or_create(h)",
        Language::C,
    )
    .unwrap();

    let by_kind = directive.clauses_by_kind();
    assert_eq!(by_kind.get(&ClauseKind::Copy).map(Vec::len), Some(2));
    assert_eq!(by_kind.get(&ClauseKind::Copyin).map(Vec::len), Some(2));
    assert_eq!(by_kind.get(&ClauseKind::Copyout).map(Vec::len), Some(2));
    assert_eq!(by_kind.get(&ClauseKind::Create).map(Vec::len), Some(2));
    assert_eq!(
        render(&directive),
        "#pragma acc data copy(a) copy(b) copyin(c) copyin(d) copyout(e) copyout(f) \
         create(g) create(h)"
    );
}

#[test]
fn test_conversion_scenarios() {
    assert_eq!(
        convert(
            "#pragma omp parallel for private(i, j)",
            Language::C,
            Language::FortranFree
        )
        .unwrap(),
        "!$omp parallel do private(i, j)"
    );
    assert_eq!(
        convert("!$OMP DO SCHEDULE(DYNAMIC)", Language::FortranFree, Language::C).unwrap(),
        "#pragma omp for schedule(dynamic)"
    );
}

#[test]
fn test_language_round_trip_property() {
    for source in [
        "#pragma omp parallel for private(i, j)",
        "#pragma omp for simd schedule(static, 8) reduction(max: m)",
        "#pragma omp distribute parallel for collapse(2)",
    ] {
        let canonical = render(&parse(source, Language::C).unwrap());
        let fortran = convert(&canonical, Language::C, Language::FortranFree).unwrap();
        let back = convert(&fortran, Language::FortranFree, Language::C).unwrap();
        assert_eq!(back, canonical);
    }
}

#[test]
fn test_parse_render_idempotence_property() {
    let inputs = [
        "#pragma omp parallel if(n > 64) default(shared) proc_bind(spread)",
        "#pragma omp target enter data map(to: a[0:n]) depend(in: a) nowait",
        "#pragma omp taskloop grainsize(8) collapse(2) untied",
        "#pragma omp atomic capture acq_rel hint(4)",
        "#pragma acc enter data copyin(a, b) async(1) wait(2)",
        "#pragma acc kernels loop independent gang worker vector",
        "#pragma acc update host(x) device_type(*) if_present",
    ];
    for input in inputs {
        let canonical = render(&parse(input, Language::C).unwrap());
        assert_eq!(render(&parse(&canonical, Language::C).unwrap()), canonical);
    }
}

#[test]
fn test_fixed_form_render_prefix() {
    let directive = parse("c$omp parallel do\nc$omp&reduction(+: s)", Language::FortranFixed)
        .unwrap();
    assert_eq!(
        render_for(&directive, Language::FortranFixed),
        "c$omp parallel do reduction(+: s)"
    );
}

#[test]
fn test_rejections() {
    assert!(parse("", Language::C).is_err());
    assert!(parse("not a pragma", Language::C).is_err());
    assert!(parse("#pragma omp unknown_directive_xyz", Language::C).is_err());
    assert!(parse("#pragma omp parallel private(", Language::C).is_err());
}
