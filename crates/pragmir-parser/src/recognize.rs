use crate::token::Token;
use once_cell::sync::Lazy;
use pragmir_core::{
    AccDirectiveKind, Dialect, DirectiveKind, Error, Language, OmpDirectiveKind, Result,
};
use std::collections::HashMap;

/// Static trie over directive keyword sequences, one per dialect.
///
/// Matching is greedy longest-match: the walk remembers the deepest
/// accepting node and backs off to it when an edge is missing, so
/// `target teams distribute parallel for simd` wins over every prefix.
#[derive(Debug)]
struct KeywordTrie {
    nodes: Vec<TrieNode>,
}

#[derive(Debug, Default)]
struct TrieNode {
    kind: Option<DirectiveKind>,
    children: HashMap<&'static str, usize>,
}

impl KeywordTrie {
    fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    fn insert(&mut self, name: &'static str, kind: DirectiveKind) {
        let mut current = 0;
        for word in name.split(' ') {
            let next = match self.nodes[current].children.get(word) {
                Some(&index) => index,
                None => {
                    let index = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children.insert(word, index);
                    index
                }
            };
            current = next;
        }
        self.nodes[current].kind = Some(kind);
    }

    fn longest_match(&self, words: &[String]) -> Option<(DirectiveKind, usize)> {
        let mut current = 0;
        let mut best = None;
        for (depth, word) in words.iter().enumerate() {
            match self.nodes[current].children.get(word.as_str()) {
                Some(&next) => {
                    current = next;
                    if let Some(kind) = self.nodes[current].kind {
                        best = Some((kind, depth + 1));
                    }
                }
                None => break,
            }
        }
        best
    }
}

static OMP_TRIE: Lazy<KeywordTrie> = Lazy::new(|| {
    let mut trie = KeywordTrie::new();
    for kind in OmpDirectiveKind::ALL {
        trie.insert(kind.name(), DirectiveKind::Omp(*kind));
    }
    trie
});

static ACC_TRIE: Lazy<KeywordTrie> = Lazy::new(|| {
    let mut trie = KeywordTrie::new();
    for kind in AccDirectiveKind::ALL {
        trie.insert(kind.name(), DirectiveKind::Acc(*kind));
    }
    for (alias, kind) in AccDirectiveKind::ALIASES {
        trie.insert(alias, DirectiveKind::Acc(*kind));
    }
    trie
});

/// Identify the directive kind at the head of the token stream.
///
/// Returns the kind and the number of keyword tokens it consumed. Fortran
/// `do` matches trie edges labeled `for`, which is the only keyword the two
/// surface syntaxes disagree on.
pub fn recognize(
    tokens: &[Token<'_>],
    dialect: Dialect,
    language: Language,
) -> Result<(DirectiveKind, usize)> {
    let mut words = Vec::new();
    for token in tokens {
        match token {
            Token::Ident(word) => {
                let mut lowered = word.to_ascii_lowercase();
                if lowered == "do" && language.is_fortran() && dialect == Dialect::OpenMp {
                    lowered = "for".to_string();
                }
                words.push(lowered);
            }
            _ => break,
        }
    }

    let trie = match dialect {
        Dialect::OpenMp => &*OMP_TRIE,
        Dialect::OpenAcc => &*ACC_TRIE,
    };

    match trie.longest_match(&words) {
        Some((kind, consumed)) if consumed > 0 => Ok((kind, consumed)),
        _ => Err(Error::UnknownDirective(words.join(" "))),
    }
}
