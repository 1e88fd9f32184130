use crate::{Rule, TokenParser};
use pest::Parser;
use pragmir_core::{Error, Result};

/// One token of the post-sentinel stream. Paren bodies are the inner slice
/// of a balanced `( )` group, kept opaque for the clause builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Ident(&'a str),
    ParenBody(&'a str),
    Comma,
}

pub fn tokenize(body: &str) -> Result<Vec<Token<'_>>> {
    let stream = TokenParser::parse(Rule::stream, body)
        .map_err(|err| Error::MalformedClause(format!("unbalanced or stray token: {err}")))?
        .next()
        .ok_or_else(|| Error::MalformedClause("empty token stream".to_string()))?;

    let mut tokens = Vec::new();
    for pair in stream.into_inner() {
        match pair.as_rule() {
            Rule::ident => tokens.push(Token::Ident(pair.as_str())),
            Rule::comma => tokens.push(Token::Comma),
            Rule::paren_group => {
                let inner = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
                tokens.push(Token::ParenBody(inner));
            }
            _ => {}
        }
    }
    Ok(tokens)
}

/// Split on a separator at zero paren/bracket depth. Array sections like
/// `a[0:n]` keep their colons and commas intact.
pub fn split_top_level(body: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (index, ch) in body.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ if ch == separator && depth == 0 => {
                pieces.push(&body[start..index]);
                start = index + ch.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&body[start..]);
    pieces
}

/// Position of the first top-level occurrence of `separator`, if any.
pub fn find_top_level(body: &str, separator: char) -> Option<usize> {
    let mut depth = 0usize;
    for (index, ch) in body.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ if ch == separator && depth == 0 => return Some(index),
            _ => {}
        }
    }
    None
}
