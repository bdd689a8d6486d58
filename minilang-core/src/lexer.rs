//! Lexeme classifier for mini-language source.
//!
//! Each line is cut into runs of whitespace, word characters and other
//! characters. Whitespace runs are kept so the lexeme list can be shown
//! next to the source without losing its layout. Every run is then
//! classified by `CLASSIFIERS`, in order; the first predicate that
//! accepts the text decides the type. Runs nothing accepts are dropped.

use serde::Serialize;

/// Reserved words of the mini-language. These are the declaration and
/// block markers every valid program contains, so they are reported as
/// keywords rather than identifiers.
pub const KEYWORDS: &[&str] = &["Int", "Begin", "End"];

const OPERATOR_CHARS: &[char] = &['+', '-', '*', '/', '%', '=', '<', '>', '!', '&', '|'];
const PUNCTUATION_CHARS: &[char] = &['{', '}', '(', ')', '[', ']', ',', ';', '.', ':'];
const QUOTE_CHARS: &[char] = &['"', '\''];

/// Category assigned to a raw token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LexemeType {
    Keyword,
    Identifier,
    Number,
    Operator,
    Punctuation,
    String,
    Whitespace,
}

/// A classified token with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexeme {
    #[serde(rename = "type")]
    pub kind: LexemeType,
    pub value: String,
    pub line: usize,
}

/// Classification order. Categories overlap (every keyword is also an
/// identifier), so this order is part of the contract.
const CLASSIFIERS: &[(LexemeType, fn(&str) -> bool)] = &[
    (LexemeType::Keyword, is_keyword),
    (LexemeType::Identifier, is_identifier),
    (LexemeType::Number, is_number),
    (LexemeType::Operator, has_operator),
    (LexemeType::Punctuation, has_punctuation),
    (LexemeType::String, has_string_literal),
    (LexemeType::Whitespace, is_blank_run),
];

/// Classify a single raw token. Pure in the token text.
pub fn classify(token: &str) -> Option<LexemeType> {
    CLASSIFIERS
        .iter()
        .find(|(_, accepts)| accepts(token))
        .map(|(kind, _)| *kind)
}

/// Tokenize and classify the whole source.
pub fn tokenize(source: &str) -> Vec<Lexeme> {
    let mut lexemes = Vec::new();
    for (index, line) in source.split('\n').enumerate() {
        for token in split_runs(line) {
            if let Some(kind) = classify(token) {
                lexemes.push(Lexeme {
                    kind,
                    value: token.to_string(),
                    line: index + 1,
                });
            }
        }
    }
    lexemes
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RunClass {
    Space,
    Word,
    Other,
}

fn run_class(ch: char) -> RunClass {
    if ch.is_whitespace() {
        RunClass::Space
    } else if is_word_char(ch) {
        RunClass::Word
    } else {
        RunClass::Other
    }
}

/// Split a line into maximal runs of one character class.
fn split_runs(line: &str) -> Vec<&str> {
    let mut lexer = Lexer { line, index: 0 };
    let mut runs = Vec::new();
    while let Some(ch) = lexer.peek_char() {
        let start = lexer.index;
        let class = run_class(ch);
        while lexer.peek_char().is_some_and(|next| run_class(next) == class) {
            lexer.consume_char();
        }
        runs.push(&line[start..lexer.index]);
    }
    runs
}

struct Lexer<'src> {
    line: &'src str,
    index: usize,
}

impl Lexer<'_> {
    fn peek_char(&self) -> Option<char> {
        self.line[self.index..].chars().next()
    }

    fn consume_char(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.index += ch.len_utf8();
        }
    }
}

fn is_keyword(token: &str) -> bool {
    KEYWORDS.contains(&token)
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|ch| ch.is_ascii_digit())
}

fn has_operator(token: &str) -> bool {
    token.contains(OPERATOR_CHARS)
}

fn has_punctuation(token: &str) -> bool {
    token.contains(PUNCTUATION_CHARS)
}

/// True when some quote character is closed later in the token.
fn has_string_literal(token: &str) -> bool {
    token.char_indices().any(|(offset, ch)| {
        QUOTE_CHARS.contains(&ch) && token[offset + ch.len_utf8()..].contains(ch)
    })
}

fn is_blank_run(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_whitespace)
}

/// `[A-Za-z0-9_]`
pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some_and(is_ident_start) && chars.all(is_word_char)
}

/// True when `line` starts with the whole word `word`, e.g. `Int` in
/// `Int a;` but not in `Integer`.
pub fn starts_with_word(line: &str, word: &str) -> bool {
    line.strip_prefix(word)
        .is_some_and(|rest| !rest.starts_with(is_word_char))
}
