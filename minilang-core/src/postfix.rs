//! Infix to postfix translation, one statement per physical line.
//!
//! An assignment `x := <expr>;` becomes `<expr-postfix> x :=`. The
//! target follows its value; `regen` relies on exactly this order to
//! rebuild the statement.

use crate::lexer::{is_ident_start, is_identifier, is_word_char};
use crate::stack::Stack;

pub const ASSIGN: &str = ":=";

/// Translate every statement line of `source` and join the results
/// with single spaces. Lines starting with `Int`, and the bare `Begin`
/// and `End` lines, produce nothing.
pub fn to_postfix(source: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    for raw in source.split('\n') {
        let line = raw.trim();
        if line.starts_with("Int") || line == "Begin" || line == "End" {
            continue;
        }
        translate_line(line, &mut output);
    }
    output.join(" ")
}

/// Postfix for a single statement line.
pub fn line_to_postfix(line: &str) -> String {
    let mut output = Vec::new();
    translate_line(line.trim(), &mut output);
    output.join(" ")
}

fn translate_line<'src>(line: &'src str, output: &mut Vec<&'src str>) {
    let tokens = scan_tokens(line);
    match tokens.iter().position(|token| *token == ASSIGN) {
        Some(at) => {
            shunting_yard(&tokens[at + 1..], output);
            if let Some(target) = at.checked_sub(1).map(|before| tokens[before]) {
                output.push(target);
            }
            output.push(ASSIGN);
        }
        None => shunting_yard(&tokens, output),
    }
}

fn precedence(op: &str) -> Option<i8> {
    match op {
        "+" | "-" => Some(1),
        "*" | "/" => Some(2),
        ASSIGN => Some(0),
        "(" => Some(-1),
        _ => None,
    }
}

fn is_operand(token: &str) -> bool {
    token.starts_with(|ch: char| ch.is_ascii_digit()) || is_identifier(token)
}

/// Operator-precedence rewrite of one token list. Equal precedence pops
/// first, which makes every operator left-associative.
fn shunting_yard<'src>(tokens: &[&'src str], output: &mut Vec<&'src str>) {
    let mut operators: Stack<&'src str> = Stack::new();

    for &token in tokens {
        if is_operand(token) {
            output.push(token);
        } else if token == "(" {
            operators.push(token);
        } else if token == ")" {
            while let Some(top) = operators.pop() {
                if top == "(" {
                    break;
                }
                output.push(top);
            }
        } else if let Some(current) = precedence(token) {
            while let Some(&top) = operators.peek() {
                let stronger = precedence(top).is_some_and(|prec| prec >= current);
                if top == "(" || !stronger {
                    break;
                }
                output.push(top);
                operators.pop();
            }
            operators.push(token);
        }
    }

    output.extend(operators.drain_top());
}

/// Split a line into numbers (`12`, `3.5`), identifiers, `:=`, the four
/// arithmetic operators and parentheses. Anything else is skipped.
pub fn scan_tokens(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < bytes.len() {
        let start = index;
        let ch = bytes[index];
        if ch.is_ascii_digit() {
            index = skip_digits(bytes, index);
            if bytes.get(index) == Some(&b'.')
                && bytes.get(index + 1).is_some_and(u8::is_ascii_digit)
            {
                index = skip_digits(bytes, index + 1);
            }
        } else if is_ident_start(ch as char) {
            while bytes.get(index).is_some_and(|&next| is_word_char(next as char)) {
                index += 1;
            }
        } else if ch == b':' && bytes.get(index + 1) == Some(&b'=') {
            index += 2;
        } else if matches!(ch, b'+' | b'-' | b'*' | b'/' | b'(' | b')') {
            index += 1;
        } else {
            // Skip the whole character, which may span several bytes.
            index += line[index..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        tokens.push(&line[start..index]);
    }

    tokens
}

fn skip_digits(bytes: &[u8], mut index: usize) -> usize {
    while bytes.get(index).is_some_and(u8::is_ascii_digit) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_PROGRAM;

    #[test]
    fn translates_sample_program() {
        assert_eq!(to_postfix(SAMPLE_PROGRAM), "10 a := 20 b := a b + c :=");
    }

    #[test]
    fn respects_precedence_and_parentheses() {
        assert_eq!(line_to_postfix("x := a + b * c;"), "a b c * + x :=");
        assert_eq!(line_to_postfix("x := (a + b) * c;"), "a b + c * x :=");
        assert_eq!(line_to_postfix("x := a - b - c;"), "a b - c - x :=");
        assert_eq!(line_to_postfix("x := a / b * c;"), "a b / c * x :=");
    }

    #[test]
    fn translates_lines_without_assignment() {
        assert_eq!(line_to_postfix("a * (b - 2.5)"), "a b 2.5 - *");
    }

    #[test]
    fn skips_declaration_and_block_lines() {
        let source = "Int x, y;\nBegin\n\n    x := 1;\nEnd";
        assert_eq!(to_postfix(source), "1 x :=");
    }

    #[test]
    fn tolerates_unbalanced_parentheses() {
        assert_eq!(line_to_postfix("x := a + b);"), "a b + x :=");
        assert_eq!(line_to_postfix("x := (a + b;"), "a b + ( x :=");
    }

    #[test]
    fn assignment_without_target_keeps_marker() {
        assert_eq!(line_to_postfix(":= 5;"), "5 :=");
    }

    #[test]
    fn scans_expected_tokens() {
        assert_eq!(
            scan_tokens("total := 3.25*(x_1-7);"),
            vec!["total", ":=", "3.25", "*", "(", "x_1", "-", "7", ")"]
        );
        assert_eq!(scan_tokens("a : b ^ c;"), vec!["a", "b", "c"]);
        assert_eq!(scan_tokens("7."), vec!["7"]);
    }
}
