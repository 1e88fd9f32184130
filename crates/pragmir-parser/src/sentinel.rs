use pragmir_core::{Dialect, Error, Language, Result};

/// Join a physical line group into one logical directive line.
///
/// C and C++ splice on backslash-newline. Fortran free form joins a trailing
/// `&` with the next line's `!$omp&`/`!$acc&` continuation sentinel. Fortran
/// fixed form continues on any line whose column 6 holds a character other
/// than blank or `0`.
pub fn fold_continuations(text: &str, language: Language) -> String {
    match language {
        Language::C | Language::Cxx => text.replace("\\\r\n", "").replace("\\\n", ""),
        Language::FortranFree => fold_fortran_free(text),
        Language::FortranFixed => fold_fortran_fixed(text),
    }
}

fn fold_fortran_free(text: &str) -> String {
    let mut logical = String::with_capacity(text.len());
    let mut pending = false;

    for (index, raw) in text.split('\n').enumerate() {
        let line = raw.trim_end_matches('\r');
        let piece = if index == 0 {
            line
        } else {
            if !pending {
                break;
            }
            let trimmed = line.trim_start();
            strip_continuation_sentinel(trimmed).unwrap_or(trimmed)
        };

        let trimmed_end = piece.trim_end();
        if let Some(stripped) = trimmed_end.strip_suffix('&') {
            logical.push_str(stripped);
            logical.push(' ');
            pending = true;
        } else {
            logical.push_str(piece);
            pending = false;
        }
    }

    logical
}

fn strip_continuation_sentinel(line: &str) -> Option<&str> {
    let lower = line.to_ascii_lowercase();
    for sentinel in ["!$omp", "!$acc"] {
        if lower.starts_with(sentinel) {
            let rest = &line[sentinel.len()..];
            return Some(rest.strip_prefix('&').unwrap_or(rest));
        }
    }
    None
}

fn fold_fortran_fixed(text: &str) -> String {
    let mut logical = String::with_capacity(text.len());

    for (index, raw) in text.split('\n').enumerate() {
        let line = raw.trim_end_matches('\r');
        if index == 0 {
            logical.push_str(line.trim_end());
            continue;
        }

        let bytes = line.as_bytes();
        let continued =
            bytes.len() > 5 && bytes[5] != b' ' && bytes[5] != b'0' && has_fixed_sentinel(line);
        if !continued {
            break;
        }
        logical.push(' ');
        logical.push_str(line[6..].trim_end());
    }

    logical
}

fn has_fixed_sentinel(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    ["!$omp", "c$omp", "*$omp", "!$acc", "c$acc", "*$acc"]
        .iter()
        .any(|sentinel| lower.starts_with(sentinel))
}

/// Remove the pragma sentinel and report which dialect it names.
///
/// C accepts `#pragma omp`, `omp`, `#pragma acc`, `acc`. Fortran accepts the
/// `!$`/`c$`/`*$` sentinels, at column 1 in fixed form and after arbitrary
/// leading whitespace in free form. Matching is case-insensitive throughout.
pub fn strip_sentinel(line: &str, language: Language) -> Result<(Dialect, &str)> {
    match language {
        Language::C | Language::Cxx => strip_c(line),
        Language::FortranFree => strip_fortran(line.trim_start()),
        Language::FortranFixed => strip_fortran(line),
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    (&s[..end], &s[end..])
}

fn strip_c(line: &str) -> Result<(Dialect, &str)> {
    let mut rest = line.trim_start();

    if let Some(after_hash) = rest.strip_prefix('#') {
        let (word, tail) = split_word(after_hash.trim_start());
        if !word.eq_ignore_ascii_case("pragma") {
            return Err(Error::NoDirective);
        }
        rest = tail.trim_start();
    }

    let (word, tail) = split_word(rest);
    let dialect = match_dialect(word).ok_or(Error::NoDirective)?;
    Ok((dialect, tail))
}

fn strip_fortran(line: &str) -> Result<(Dialect, &str)> {
    let bytes = line.as_bytes();
    if bytes.len() < 5 || !matches!(bytes[0], b'!' | b'c' | b'C' | b'*') || bytes[1] != b'$' {
        return Err(Error::NoDirective);
    }
    let dialect = match_dialect(&line[2..5]).ok_or(Error::NoDirective)?;
    Ok((dialect, &line[5..]))
}

fn match_dialect(word: &str) -> Option<Dialect> {
    if word.eq_ignore_ascii_case("omp") {
        Some(Dialect::OpenMp)
    } else if word.eq_ignore_ascii_case("acc") {
        Some(Dialect::OpenAcc)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_sentinel_forms() {
        for text in [
            "#pragma omp parallel",
            "  #pragma omp parallel",
            "omp parallel",
            "#PRAGMA OMP parallel",
            "OMP parallel",
        ] {
            let (dialect, rest) = strip_sentinel(text, Language::C).unwrap();
            assert_eq!(dialect, Dialect::OpenMp);
            assert_eq!(rest.trim(), "parallel");
        }
        let (dialect, _) = strip_sentinel("#pragma acc data", Language::Cxx).unwrap();
        assert_eq!(dialect, Dialect::OpenAcc);
    }

    #[test]
    fn test_fortran_sentinel_forms() {
        for text in ["!$omp parallel", "!$OMP parallel", "c$omp parallel", "*$omp parallel"] {
            let (dialect, rest) = strip_sentinel(text, Language::FortranFixed).unwrap();
            assert_eq!(dialect, Dialect::OpenMp);
            assert_eq!(rest.trim(), "parallel");
        }
        let (dialect, _) = strip_sentinel("   !$acc loop", Language::FortranFree).unwrap();
        assert_eq!(dialect, Dialect::OpenAcc);
    }

    #[test]
    fn test_fixed_form_sentinel_must_start_at_column_one() {
        assert_eq!(
            strip_sentinel("   c$omp parallel", Language::FortranFixed),
            Err(Error::NoDirective)
        );
    }

    #[test]
    fn test_missing_sentinel() {
        assert_eq!(
            strip_sentinel("int x = 0;", Language::C),
            Err(Error::NoDirective)
        );
        assert_eq!(
            strip_sentinel("#pragma once", Language::C),
            Err(Error::NoDirective)
        );
        assert_eq!(
            strip_sentinel("! a comment", Language::FortranFree),
            Err(Error::NoDirective)
        );
    }

    #[test]
    fn test_c_backslash_splice() {
        let folded = fold_continuations("a \\\nb \\\r\nc", Language::C);
        assert_eq!(folded, "a b c");
    }

    #[test]
    fn test_fortran_free_fold() {
        let folded = fold_continuations(
            "!$omp parallel do &\n!$omp& private(i), &\n!$omp shared(j)",
            Language::FortranFree,
        );
        assert_eq!(folded, "!$omp parallel do  private(i),  shared(j)");
    }

    #[test]
    fn test_fortran_fixed_fold_column_six() {
        let folded = fold_continuations(
            "c$omp parallel do\nc$omp&private(i)\nc$omp0 not a continuation",
            Language::FortranFixed,
        );
        assert_eq!(folded, "c$omp parallel do private(i)");
    }

    #[test]
    fn test_free_fold_stops_without_trailing_ampersand() {
        let folded = fold_continuations(
            "!$omp parallel\n!$omp& private(i)",
            Language::FortranFree,
        );
        assert_eq!(folded, "!$omp parallel");
    }
}
