//! Turn free problem text into an expression string for [`crate::parser`].
//!
//! The text is lower-cased and split into word and symbol tokens. Filler
//! phrases are dropped only when they occur as whole words, so `sin` in
//! `sine` or `as` in `basis` are never cut apart. What remains is joined
//! without whitespace, `^` becomes `**`, and an equation `lhs = rhs` becomes
//! the zero form `lhs-(rhs)`.

use std::sync::LazyLock;

use regex::Regex;

/// Word sequences removed wherever they occur as whole words.
pub const FILLER_PHRASES: &[&[&str]] = &[
    &["what", "is"],
    &["find"],
    &["the"],
    &["solve"],
    &["derivative"],
    &["differentiate"],
    &["of"],
    &["limit"],
    &["as"],
    &["approaches"],
    &["calculate"],
    &["compute"],
    &["evaluate"],
];

/// Phrases naming the unknown; removed together with the single letter after them.
pub const VARIABLE_CLAUSES: &[&[&str]] = &[&["with", "respect", "to"], &["wrt"], &["for"]];

/// Punctuation that never belongs to an expression.
const DROPPED_SYMBOLS: &[char] = &['?', '!', ':', ';', ','];

static DERIVATIVE_NOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bd[a-z]?/d[a-z]\b").unwrap());

static FUNCTION_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]\([a-z]\)$").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Symbol(char),
}

/// Normalize `text` into a parser-ready expression string.
pub fn extract_expression(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_notation = DERIVATIVE_NOTATION.replace_all(&lowered, " ");
    let tokens = tokenize(&without_notation);
    let kept = strip_fillers(&tokens);
    let joined = join_tokens(&kept).replace('^', "**");
    zero_form(&joined)
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start = None;
    for (idx, ch) in text.char_indices() {
        if ch.is_ascii_alphabetic() {
            word_start.get_or_insert(idx);
            continue;
        }
        if let Some(start) = word_start.take() {
            tokens.push(Token::Word(&text[start..idx]));
        }
        tokens.push(Token::Symbol(ch));
    }
    if let Some(start) = word_start {
        tokens.push(Token::Word(&text[start..]));
    }
    tokens
}

fn strip_fillers<'a>(tokens: &[Token<'a>]) -> Vec<Token<'a>> {
    let words: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| matches!(token, Token::Word(_)))
        .map(|(idx, _)| idx)
        .collect();
    let mut removed = vec![false; tokens.len()];

    let mut w = 0;
    while w < words.len() {
        match matched_length(tokens, &words[w..]) {
            Some(len) => {
                for &idx in &words[w..w + len] {
                    removed[idx] = true;
                }
                w += len;
            }
            None => w += 1,
        }
    }

    tokens
        .iter()
        .zip(removed)
        .filter(|(_, gone)| !gone)
        .map(|(token, _)| *token)
        .collect()
}

/// Number of words, starting at `words[0]`, covered by a filler or variable clause.
fn matched_length(tokens: &[Token<'_>], words: &[usize]) -> Option<usize> {
    for clause in VARIABLE_CLAUSES {
        let len = clause.len();
        if phrase_matches(tokens, words, clause) && words.len() > len {
            let letter = matches!(tokens[words[len]], Token::Word(w) if w.len() == 1);
            if letter && separated_by_space(tokens, words[len - 1], words[len]) {
                return Some(len + 1);
            }
        }
    }
    FILLER_PHRASES
        .iter()
        .filter(|phrase| phrase_matches(tokens, words, phrase))
        .map(|phrase| phrase.len())
        .max()
}

fn phrase_matches(tokens: &[Token<'_>], words: &[usize], phrase: &[&str]) -> bool {
    if words.len() < phrase.len() {
        return false;
    }
    let same_words = phrase
        .iter()
        .zip(words)
        .all(|(expected, &idx)| tokens[idx] == Token::Word(*expected));
    same_words
        && words[..phrase.len()]
            .windows(2)
            .all(|pair| separated_by_space(tokens, pair[0], pair[1]))
}

fn separated_by_space(tokens: &[Token<'_>], from: usize, to: usize) -> bool {
    tokens[from + 1..to]
        .iter()
        .all(|token| matches!(token, Token::Symbol(c) if c.is_whitespace()))
}

fn join_tokens(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for (idx, token) in tokens.iter().enumerate() {
        match token {
            Token::Word(word) => out.push_str(word),
            Token::Symbol(c) if c.is_whitespace() || DROPPED_SYMBOLS.contains(c) => {}
            // A full stop ends the sentence unless a digit follows it.
            Token::Symbol('.') => {
                if matches!(tokens.get(idx + 1), Some(Token::Symbol(d)) if d.is_ascii_digit()) {
                    out.push('.');
                }
            }
            Token::Symbol(c) => out.push(*c),
        }
    }
    out
}

/// `lhs=rhs` becomes `lhs-(rhs)`. A definition such as `f(x)=...` keeps only
/// its right-hand side.
fn zero_form(expr: &str) -> String {
    match expr.split_once('=') {
        Some((lhs, rhs)) if lhs.is_empty() || FUNCTION_DEFINITION.is_match(lhs) => rhs.to_string(),
        Some((lhs, rhs)) if rhs.is_empty() => lhs.to_string(),
        Some((lhs, rhs)) => format!("{lhs}-({rhs})"),
        None => expr.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_separates_words_and_symbols() {
        assert_eq!(
            tokenize("2x+sin(y)"),
            vec![
                Token::Symbol('2'),
                Token::Word("x"),
                Token::Symbol('+'),
                Token::Word("sin"),
                Token::Symbol('('),
                Token::Word("y"),
                Token::Symbol(')'),
            ]
        );
    }

    #[test]
    fn zero_form_variants() {
        assert_eq!(zero_form("x+2=5"), "x+2-(5)");
        assert_eq!(zero_form("f(x)=x**2"), "x**2");
        assert_eq!(zero_form("x**2"), "x**2");
        assert_eq!(zero_form("x**2="), "x**2");
    }

    #[test]
    fn fillers_inside_words_survive() {
        assert_eq!(extract_expression("basis + theta"), "basis+theta");
    }
}
