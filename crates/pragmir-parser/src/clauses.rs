use crate::token::{find_top_level, split_top_level, Token};
use pragmir_core::clause::lookup_clause;
use pragmir_core::{
    Clause, ClauseKind, ClausePayload, ClauseRule, DefaultKind, DirectiveBuilder, Error,
    MemoryOrderKind, ProcBindKind, ReductionOperator, Result, ScheduleKind,
};

/// Keywords accepted before the `:` in a list clause body. Anything else
/// before a colon is treated as part of the items (array sections and the
/// like already keep their colons via depth tracking).
const LIST_MODIFIERS: &[&str] = &[
    "readonly", "always", "close", "present", "zero", "to", "from", "tofrom", "alloc", "release",
    "delete", "in", "out", "inout", "inoutset", "mutexinoutset", "depobj", "source", "sink",
    "val", "ref", "uval", "conditional",
];

const SCHEDULE_MODIFIERS: &[&str] = &["monotonic", "nonmonotonic", "simd"];

const REDUCTION_MODIFIERS: &[&str] = &["inscan", "task", "default"];

/// Consume the clause stream after the directive keywords, appending each
/// parsed clause to the builder in source order. Any violation fails the
/// whole directive; nothing partial is kept.
pub fn parse_clauses(tokens: &[Token<'_>], builder: &mut DirectiveBuilder) -> Result<()> {
    let mut index = 0;
    while index < tokens.len() {
        // Fortran separates clauses with commas.
        if matches!(tokens[index], Token::Comma) {
            index += 1;
            continue;
        }

        let keyword = match tokens[index] {
            Token::Ident(word) => word,
            Token::ParenBody(_) => {
                return Err(Error::MalformedClause(
                    "parenthesized group without a clause keyword".to_string(),
                ))
            }
            Token::Comma => unreachable!(),
        };
        index += 1;

        let kind =
            lookup_clause(keyword).ok_or_else(|| Error::MalformedClause(keyword.to_string()))?;

        let body = match tokens.get(index) {
            Some(Token::ParenBody(body)) => {
                index += 1;
                Some(*body)
            }
            _ => None,
        };

        builder.push_clause(build_clause(kind, keyword, body)?);
    }
    Ok(())
}

fn build_clause(kind: ClauseKind, keyword: &str, body: Option<&str>) -> Result<Clause> {
    match kind.rule() {
        ClauseRule::Bare => match body {
            None => Ok(Clause::bare(kind)),
            Some(_) => Err(malformed(keyword)),
        },
        ClauseRule::Expression => build_expression(kind, keyword, required(keyword, body)?),
        ClauseRule::OptionalExpression => match body {
            None => Ok(Clause::bare(kind)),
            Some(body) => build_expression(kind, keyword, body),
        },
        ClauseRule::List => build_list(kind, keyword, required(keyword, body)?),
        ClauseRule::OptionalList => match body {
            None => Ok(Clause::bare(kind)),
            Some(body) => build_list(kind, keyword, body),
        },
        ClauseRule::Schedule => build_schedule(kind, keyword, required(keyword, body)?),
        ClauseRule::Default => {
            let word = single_keyword(keyword, required(keyword, body)?)?;
            let value = DefaultKind::from_keyword(&word).ok_or_else(|| malformed(keyword))?;
            Ok(Clause::new(kind, ClausePayload::Default(value), Vec::new()))
        }
        ClauseRule::ProcBind => {
            let word = single_keyword(keyword, required(keyword, body)?)?;
            let value = ProcBindKind::from_keyword(&word).ok_or_else(|| malformed(keyword))?;
            Ok(Clause::new(kind, ClausePayload::ProcBind(value), Vec::new()))
        }
        ClauseRule::MemoryOrder => {
            let word = single_keyword(keyword, required(keyword, body)?)?;
            let value = MemoryOrderKind::from_keyword(&word).ok_or_else(|| malformed(keyword))?;
            Ok(Clause::new(kind, ClausePayload::MemoryOrder(value), Vec::new()))
        }
        ClauseRule::Reduction => build_reduction(kind, keyword, required(keyword, body)?),
        ClauseRule::Wait => build_wait(kind, keyword, body),
    }
}

fn malformed(keyword: &str) -> Error {
    Error::MalformedClause(keyword.to_ascii_lowercase())
}

fn required<'a>(keyword: &str, body: Option<&'a str>) -> Result<&'a str> {
    body.ok_or_else(|| malformed(keyword))
}

fn single_keyword(keyword: &str, body: &str) -> Result<String> {
    let word = body.trim();
    if word.is_empty() || word.contains(|c: char| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Err(malformed(keyword));
    }
    Ok(word.to_string())
}

fn build_expression(kind: ClauseKind, keyword: &str, body: &str) -> Result<Clause> {
    let expression = body.trim();
    if expression.is_empty() {
        return Err(malformed(keyword));
    }
    Ok(Clause::new(
        kind,
        ClausePayload::Expression(expression.to_string()),
        Vec::new(),
    ))
}

fn build_list(kind: ClauseKind, keyword: &str, body: &str) -> Result<Clause> {
    let (modifiers, items_part) = split_leading_modifiers(body, LIST_MODIFIERS);
    let items = parse_items(items_part);
    if items.is_empty() {
        return Err(malformed(keyword));
    }
    Ok(Clause::new(kind, ClausePayload::Items(items), modifiers))
}

fn build_schedule(kind: ClauseKind, keyword: &str, body: &str) -> Result<Clause> {
    let (modifiers, rest) = split_leading_modifiers(body, SCHEDULE_MODIFIERS);
    let pieces = split_top_level(rest, ',');

    let schedule_kind =
        ScheduleKind::from_keyword(pieces[0].trim()).ok_or_else(|| malformed(keyword))?;
    let chunk = match pieces.len() {
        1 => None,
        2 => {
            let chunk = pieces[1].trim();
            if chunk.is_empty() {
                return Err(malformed(keyword));
            }
            Some(chunk.to_string())
        }
        _ => return Err(malformed(keyword)),
    };

    Ok(Clause::new(
        kind,
        ClausePayload::Schedule {
            kind: schedule_kind,
            chunk,
        },
        modifiers,
    ))
}

fn build_reduction(kind: ClauseKind, keyword: &str, body: &str) -> Result<Clause> {
    let colon = find_top_level(body, ':').ok_or_else(|| malformed(keyword))?;
    let head = &body[..colon];
    let tail = &body[colon + 1..];

    let mut head_parts: Vec<&str> = split_top_level(head, ',')
        .into_iter()
        .map(str::trim)
        .collect();
    let op_token = head_parts.pop().filter(|t| !t.is_empty()).ok_or_else(|| malformed(keyword))?;

    let mut modifiers = Vec::new();
    for part in head_parts {
        let lowered = part.to_ascii_lowercase();
        if !REDUCTION_MODIFIERS.contains(&lowered.as_str()) {
            return Err(malformed(keyword));
        }
        modifiers.push(lowered);
    }

    let (op, identifier) = match ReductionOperator::from_token(op_token) {
        Some(op) => (op, None),
        None => (ReductionOperator::Custom, Some(op_token.to_string())),
    };

    let items = parse_items(tail);
    if items.is_empty() {
        return Err(malformed(keyword));
    }

    Ok(Clause::new(
        kind,
        ClausePayload::Reduction {
            op,
            identifier,
            items,
        },
        modifiers,
    ))
}

fn build_wait(kind: ClauseKind, keyword: &str, body: Option<&str>) -> Result<Clause> {
    let body = match body {
        None => return Ok(Clause::bare(kind)),
        Some(body) => body,
    };

    let segments = split_top_level(body, ':');
    let mut devnum = None;
    let mut queues = false;
    let mut index = 0;

    if segments.len() >= 3 && segments[0].trim().eq_ignore_ascii_case("devnum") {
        devnum = Some(segments[1].trim().to_string());
        index = 2;
    }
    if segments.len() - index == 2 && segments[index].trim().eq_ignore_ascii_case("queues") {
        queues = true;
        index += 1;
    }
    if segments.len() - index != 1 {
        return Err(malformed(keyword));
    }

    let items = parse_items(segments[index]);
    if items.is_empty() {
        return Err(malformed(keyword));
    }

    Ok(Clause::new(
        kind,
        ClausePayload::Wait {
            devnum,
            queues,
            items,
        },
        Vec::new(),
    ))
}

/// Peel `modifier[, modifier]* :` off the front of a clause body when every
/// word before the first top-level colon belongs to `allowed`.
fn split_leading_modifiers<'a>(body: &'a str, allowed: &[&str]) -> (Vec<String>, &'a str) {
    let Some(colon) = find_top_level(body, ':') else {
        return (Vec::new(), body);
    };

    let head = &body[..colon];
    let words: Vec<&str> = head
        .split([',', ' ', '\t'])
        .filter(|word| !word.is_empty())
        .collect();

    let all_known = !words.is_empty()
        && words.iter().all(|word| {
            let lowered = word.to_ascii_lowercase();
            allowed.contains(&lowered.as_str())
        });
    if !all_known {
        return (Vec::new(), body);
    }

    let modifiers = words.iter().map(|word| word.to_ascii_lowercase()).collect();
    (modifiers, &body[colon + 1..])
}

fn parse_items(body: &str) -> Vec<String> {
    split_top_level(body, ',')
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pragmir_core::{DirectiveKind, Language, OmpDirectiveKind};

    fn parse_stream(text: &str) -> Result<Vec<Clause>> {
        let tokens = crate::token::tokenize(text)?;
        let mut builder = DirectiveBuilder::new(
            DirectiveKind::Omp(OmpDirectiveKind::Parallel),
            Language::C,
        );
        parse_clauses(&tokens, &mut builder)?;
        Ok(builder.build().clauses_in_original_order().to_vec())
    }

    #[test]
    fn test_bare_clause_rejects_body() {
        assert!(parse_stream("nowait").is_ok());
        assert!(matches!(
            parse_stream("nowait(x)"),
            Err(Error::MalformedClause(_))
        ));
    }

    #[test]
    fn test_expression_clause_keeps_inner_slice() {
        let clauses = parse_stream("if (a > (b + 1))").unwrap();
        assert_eq!(clauses[0].expression().unwrap(), "a > (b + 1)");
    }

    #[test]
    fn test_list_with_modifier() {
        let clauses = parse_stream("copyin(readonly: a, b)").unwrap();
        assert_eq!(clauses[0].modifiers(), &["readonly"]);
        assert_eq!(clauses[0].items().unwrap(), &["a", "b"]);
    }

    #[test]
    fn test_map_with_two_modifiers() {
        let clauses = parse_stream("map(always, to: buf)").unwrap();
        assert_eq!(clauses[0].modifiers(), &["always", "to"]);
        assert_eq!(clauses[0].items().unwrap(), &["buf"]);
    }

    #[test]
    fn test_array_section_colon_is_not_a_modifier_split() {
        let clauses = parse_stream("depend(in: a[0:n])").unwrap();
        assert_eq!(clauses[0].modifiers(), &["in"]);
        assert_eq!(clauses[0].items().unwrap(), &["a[0:n]"]);
    }

    #[test]
    fn test_linear_step_is_not_mistaken_for_modifier() {
        let clauses = parse_stream("linear(x : 2)").unwrap();
        assert!(clauses[0].modifiers().is_empty());
        assert_eq!(clauses[0].items().unwrap(), &["x : 2"]);
    }

    #[test]
    fn test_empty_list_body_is_malformed() {
        assert!(matches!(
            parse_stream("private()"),
            Err(Error::MalformedClause(_))
        ));
    }

    #[test]
    fn test_schedule_kinds_and_chunk() {
        let clauses = parse_stream("schedule(static, 16)").unwrap();
        let (kind, chunk) = clauses[0].schedule().unwrap();
        assert_eq!(kind, ScheduleKind::Static);
        assert_eq!(chunk, Some("16"));

        let clauses = parse_stream("schedule(monotonic: dynamic)").unwrap();
        assert_eq!(clauses[0].modifiers(), &["monotonic"]);
        let (kind, chunk) = clauses[0].schedule().unwrap();
        assert_eq!(kind, ScheduleKind::Dynamic);
        assert_eq!(chunk, None);

        assert!(parse_stream("schedule(sometimes)").is_err());
    }

    #[test]
    fn test_default_keywords() {
        let clauses = parse_stream("default(none)").unwrap();
        assert_eq!(clauses[0].default_kind().unwrap(), DefaultKind::None);
        assert!(parse_stream("default(whatever)").is_err());
    }

    #[test]
    fn test_reduction_operator_and_items() {
        let clauses = parse_stream("reduction(+: sum, total)").unwrap();
        let (op, identifier, items) = clauses[0].reduction().unwrap();
        assert_eq!(op, ReductionOperator::Add);
        assert_eq!(identifier, None);
        assert_eq!(items, &["sum", "total"]);
    }

    #[test]
    fn test_reduction_custom_identifier() {
        let clauses = parse_stream("reduction(my_add: a)").unwrap();
        let (op, identifier, _) = clauses[0].reduction().unwrap();
        assert_eq!(op, ReductionOperator::Custom);
        assert_eq!(identifier, Some("my_add"));
    }

    #[test]
    fn test_reduction_with_inscan_modifier() {
        let clauses = parse_stream("reduction(inscan, +: x)").unwrap();
        assert_eq!(clauses[0].modifiers(), &["inscan"]);
        let (op, _, _) = clauses[0].reduction().unwrap();
        assert_eq!(op, ReductionOperator::Add);
    }

    #[test]
    fn test_reduction_without_colon_is_malformed() {
        assert!(matches!(
            parse_stream("reduction(+)"),
            Err(Error::MalformedClause(_))
        ));
    }

    #[test]
    fn test_wait_composite_forms() {
        let clauses = parse_stream("wait").unwrap();
        assert!(clauses[0].is_bare());

        let clauses = parse_stream("wait(1, 2)").unwrap();
        let (devnum, queues, items) = clauses[0].wait().unwrap();
        assert_eq!(devnum, None);
        assert!(!queues);
        assert_eq!(items, &["1", "2"]);

        let clauses = parse_stream("wait(devnum: 1: queues: 2, 3)").unwrap();
        let (devnum, queues, items) = clauses[0].wait().unwrap();
        assert_eq!(devnum, Some("1"));
        assert!(queues);
        assert_eq!(items, &["2", "3"]);

        let clauses = parse_stream("wait(queues: 4)").unwrap();
        let (devnum, queues, items) = clauses[0].wait().unwrap();
        assert_eq!(devnum, None);
        assert!(queues);
        assert_eq!(items, &["4"]);
    }

    #[test]
    fn test_optional_expression_clauses() {
        let clauses = parse_stream("ordered").unwrap();
        assert!(clauses[0].is_bare());

        let clauses = parse_stream("ordered(2)").unwrap();
        assert_eq!(clauses[0].expression().unwrap(), "2");
    }

    #[test]
    fn test_device_type_optional_list() {
        let clauses = parse_stream("device_type(*)").unwrap();
        assert_eq!(clauses[0].items().unwrap(), &["*"]);

        let clauses = parse_stream("dtype(nvidia, radeon)").unwrap();
        assert_eq!(clauses[0].kind(), ClauseKind::DeviceType);
        assert_eq!(clauses[0].items().unwrap(), &["nvidia", "radeon"]);
    }

    #[test]
    fn test_unknown_clause_keyword_fails_directive() {
        assert!(matches!(
            parse_stream("frobnicate(x)"),
            Err(Error::MalformedClause(ref k)) if k == "frobnicate"
        ));
    }

    #[test]
    fn test_atomic_clause_set_parses_as_clauses() {
        let clauses = parse_stream("update seq_cst hint(1)").unwrap();
        let kinds: Vec<_> = clauses.iter().map(Clause::kind).collect();
        assert_eq!(
            kinds,
            vec![ClauseKind::Update, ClauseKind::SeqCst, ClauseKind::Hint]
        );
    }
}
