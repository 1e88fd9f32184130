use crate::render::render_for;
use pragmir_core::{Language, Result};

/// Translate a directive between host-language surface syntaxes.
///
/// Defined as parse-then-render: the output is the canonical rendering in
/// the target language, and failures are exactly the parser's failures.
pub fn convert(text: &str, from: Language, to: Language) -> Result<String> {
    let directive = pragmir_parser::parse(text, from)?;
    Ok(render_for(&directive, to))
}
