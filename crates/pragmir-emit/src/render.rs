use pragmir_core::{Clause, ClausePayload, Dialect, Directive, DirectiveKind, Language};
use std::fmt::Write;

/// Render in the directive's own host language.
pub fn render(directive: &Directive) -> String {
    render_for(directive, directive.language())
}

/// Render with an explicit host language, selecting that language's
/// sentinel prefix and keyword spelling (`for` becomes `do` in Fortran).
pub fn render_for(directive: &Directive, language: Language) -> String {
    let mut output = String::new();

    output.push_str(language.prefix(directive.dialect()));
    output.push_str(&directive_keywords(directive.kind(), language));

    if let Some(argument) = directive.argument() {
        write!(&mut output, "({})", argument).unwrap();
    }

    for clause in directive.clauses_in_original_order() {
        output.push(' ');
        render_clause(&mut output, clause);
    }

    output
}

/// The directive keyword sequence as spelled in `language` (`parallel do`
/// instead of `parallel for` in Fortran).
pub fn render_keywords(kind: DirectiveKind, language: Language) -> String {
    directive_keywords(kind, language)
}

fn directive_keywords(kind: DirectiveKind, language: Language) -> String {
    let name = kind.name();
    if language.is_fortran() && kind.dialect() == Dialect::OpenMp && name.contains("for") {
        name.split(' ')
            .map(|word| if word == "for" { "do" } else { word })
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        name.to_string()
    }
}

/// Canonical rendering of a single clause, exactly as it appears inside a
/// rendered directive.
pub fn render_clause_string(clause: &Clause) -> String {
    let mut output = String::new();
    render_clause(&mut output, clause);
    output
}

fn render_clause(output: &mut String, clause: &Clause) {
    output.push_str(clause.kind().name());

    let modifiers = clause.modifiers();
    match clause.payload() {
        ClausePayload::Bare => {}
        ClausePayload::Expression(expression) => {
            write!(output, "({})", expression).unwrap();
        }
        ClausePayload::Items(items) => {
            output.push('(');
            push_modifiers(output, modifiers);
            output.push_str(&items.join(", "));
            output.push(')');
        }
        ClausePayload::Schedule { kind, chunk } => {
            output.push('(');
            push_modifiers(output, modifiers);
            write!(output, "{}", kind).unwrap();
            if let Some(chunk) = chunk {
                write!(output, ", {}", chunk).unwrap();
            }
            output.push(')');
        }
        ClausePayload::Default(kind) => {
            write!(output, "({})", kind).unwrap();
        }
        ClausePayload::ProcBind(kind) => {
            write!(output, "({})", kind).unwrap();
        }
        ClausePayload::MemoryOrder(kind) => {
            write!(output, "({})", kind).unwrap();
        }
        ClausePayload::Reduction {
            op,
            identifier,
            items,
        } => {
            output.push('(');
            if !modifiers.is_empty() {
                output.push_str(&modifiers.join(", "));
                output.push_str(", ");
            }
            match identifier {
                Some(identifier) => output.push_str(identifier),
                None => write!(output, "{}", op).unwrap(),
            }
            output.push_str(": ");
            output.push_str(&items.join(", "));
            output.push(')');
        }
        ClausePayload::Wait {
            devnum,
            queues,
            items,
        } => {
            output.push('(');
            if let Some(devnum) = devnum {
                write!(output, "devnum: {}: ", devnum).unwrap();
            }
            if *queues {
                output.push_str("queues: ");
            }
            output.push_str(&items.join(", "));
            output.push(')');
        }
    }
}

fn push_modifiers(output: &mut String, modifiers: &[String]) {
    if !modifiers.is_empty() {
        output.push_str(&modifiers.join(", "));
        output.push_str(": ");
    }
}
