//! Rebuild mini-language source from a postfix stream.
//!
//! This inverts `postfix::to_postfix`: `:=` pops the value first and the
//! target second, matching the `<expr> <target> :=` order the translator
//! emits. Operators are re-joined without parentheses.

use indexmap::IndexSet;

use crate::error::CoreError;
use crate::postfix::ASSIGN;
use crate::stack::Stack;

const OPERATORS: &[&str] = &["+", "-", "*", "/"];

/// Regenerate a complete program (`Int …; Begin … End`) from `postfix`.
pub fn regenerate(postfix: &str) -> Result<String, CoreError> {
    let mut operands: Stack<String> = Stack::new();
    let mut variables: IndexSet<String> = IndexSet::new();
    let mut body = String::new();

    for (position, token) in postfix.split_whitespace().enumerate() {
        let missing = || CoreError::MissingOperand {
            token: token.to_string(),
            position,
        };

        if token == ASSIGN {
            let value = operands.pop().ok_or_else(missing)?;
            let target = operands.pop().ok_or_else(missing)?;
            body.push_str(&format!("    {value} := {target};\n"));
            if is_variable(&value) {
                variables.insert(value);
            }
        } else if OPERATORS.contains(&token) {
            let right = operands.pop().ok_or_else(missing)?;
            let left = operands.pop().ok_or_else(missing)?;
            operands.push(format!("{left} {token} {right}"));
        } else {
            if is_variable(token) {
                variables.insert(token.to_string());
            }
            operands.push(token.to_string());
        }
    }

    let declared = variables.into_iter().collect::<Vec<_>>().join(", ");
    Ok(format!("Int {declared};\nBegin\n{body}End"))
}

/// `[A-Za-z][A-Za-z0-9_]*`
fn is_variable(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some_and(|ch| ch.is_ascii_alphabetic())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postfix::line_to_postfix;

    #[test]
    fn regenerates_sample_postfix() {
        let source = regenerate("10 a := 20 b := a b + c :=").expect("regenerate");
        assert_eq!(
            source,
            "Int a, b, c;\nBegin\n    a := 10;\n    b := 20;\n    c := a + b;\nEnd"
        );
    }

    #[test]
    fn inverts_single_assignment() {
        let postfix = line_to_postfix("total := price * qty - 5;");
        let source = regenerate(&postfix).expect("regenerate");
        assert!(source.contains("    total := price * qty - 5;\n"));
        assert!(source.starts_with("Int price, qty, total;\n"));
    }

    #[test]
    fn drops_parentheses() {
        let postfix = line_to_postfix("x := (a + b) * c;");
        let source = regenerate(&postfix).expect("regenerate");
        assert!(source.contains("    x := a + b * c;\n"));
    }

    #[test]
    fn handles_empty_input() {
        assert_eq!(regenerate("").expect("regenerate"), "Int ;\nBegin\nEnd");
    }

    #[test]
    fn reports_operator_without_operands() {
        let err = regenerate("1 +").unwrap_err();
        assert_eq!(
            err,
            CoreError::MissingOperand {
                token: "+".to_string(),
                position: 1
            }
        );
        assert!(matches!(
            regenerate("x :=").unwrap_err(),
            CoreError::MissingOperand { position: 1, .. }
        ));
    }
}
