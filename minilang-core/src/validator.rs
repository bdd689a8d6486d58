//! Single-pass structural checker for mini-language source.
//!
//! Rules run in a fixed order on every physical line and are not
//! mutually exclusive, so one line may collect several diagnostics.
//! File-scope findings (`Begin`/`End` missing) are appended after the
//! scan with line number 0.

use crate::diagnostic::{Diagnostic, Issue};
use crate::lexer::{is_word_char, starts_with_word};

const RESTRICTED_SYMBOLS: &[char] = &['@', '#', '$', '%', '^', '&'];
const OPERATOR_RUN_CHARS: &[char] = &['+', '-', '*', '/', '%', '='];

#[derive(Debug, Default)]
struct ScanState {
    int_seen: bool,
    begin_seen: bool,
    end_seen: bool,
    int_prefix_logged: bool,
}

/// Validate `source`. An empty result means the program may be compiled.
pub fn validate(source: &str) -> Vec<Diagnostic> {
    let mut state = ScanState::default();
    let mut diagnostics = Vec::new();

    for (index, raw) in source.split('\n').enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        let mut report = |issue: Issue| diagnostics.push(Diagnostic::at_line(line_no, issue));

        if let Some(first) = line.chars().next() {
            if !is_word_char(first) && first != '#' {
                report(Issue::InvalidLeadingCharacter(first));
            }
        }

        if let Some(symbol) = line.chars().find(|ch| RESTRICTED_SYMBOLS.contains(ch)) {
            report(Issue::RestrictedSymbol(symbol));
        }

        let is_int = starts_with_word(line, "Int");
        if !state.int_seen && !state.int_prefix_logged && !is_int && !line.is_empty() {
            let prefix = line.split_whitespace().next().unwrap_or_default();
            report(Issue::ConstructBeforeInt(prefix.to_string()));
            state.int_prefix_logged = true;
        }

        if is_int {
            state.int_seen = true;
            if !line.ends_with(';') {
                report(Issue::MissingSemicolon);
            }
        }

        let is_begin = starts_with_word(line, "Begin");
        if is_begin {
            state.begin_seen = true;
        }

        let is_end = starts_with_word(line, "End");
        if is_end {
            let suffix = line["End".len()..].trim_start();
            if !suffix.is_empty() {
                report(Issue::ConstructAfterEnd(suffix.to_string()));
            }
            state.end_seen = true;
        } else if state.end_seen && !line.is_empty() {
            report(Issue::ConstructAfterEnd(line.to_string()));
        }

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if !is_end && !is_begin && line.contains(":=") && !line.ends_with(';') {
            report(Issue::MissingSemicolon);
        }

        if line.contains('=') && !line.contains(":=") {
            report(Issue::BareEquals);
        }

        if let Some(run) = first_operator_run(line) {
            report(Issue::DuplicatedOperator(run.to_string()));
        }
    }

    if !state.begin_seen {
        diagnostics.push(Diagnostic::file_scope(Issue::MissingBegin));
    } else if !state.end_seen {
        diagnostics.push(Diagnostic::file_scope(Issue::MissingEnd));
    }

    diagnostics
}

/// Leftmost run of two or more operator characters, e.g. `+=` or `**`.
fn first_operator_run(line: &str) -> Option<&str> {
    let mut start = None;
    for (offset, ch) in line.char_indices() {
        if OPERATOR_RUN_CHARS.contains(&ch) {
            start.get_or_insert(offset);
            continue;
        }
        if let Some(begin) = start.take() {
            if line[begin..offset].len() >= 2 {
                return Some(&line[begin..offset]);
            }
        }
    }
    start
        .map(|begin| &line[begin..])
        .filter(|run| run.len() >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_PROGRAM;

    fn issues(source: &str) -> Vec<(usize, Issue)> {
        validate(source)
            .into_iter()
            .map(|diag| (diag.line, diag.issue))
            .collect()
    }

    #[test]
    fn accepts_sample_program() {
        assert!(validate(SAMPLE_PROGRAM).is_empty());
    }

    #[test]
    fn accepts_blank_lines_inside_body() {
        let source = "Int a;\nBegin\n\n    a := 1;\nEnd\n";
        assert!(validate(source).is_empty());
    }

    #[test]
    fn reports_missing_begin_once() {
        let source = "Int a;\n    a := 1;\n    a := 2;\nEnd";
        let found = issues(source);
        assert_eq!(found, vec![(0, Issue::MissingBegin)]);
    }

    #[test]
    fn reports_missing_end_only_when_begin_present() {
        assert_eq!(issues("Int a;\nBegin\n    a := 1;"), vec![(0, Issue::MissingEnd)]);
        let without_either = issues("Int a;");
        assert_eq!(without_either, vec![(0, Issue::MissingBegin)]);
    }

    #[test]
    fn reports_construct_before_int_once() {
        let source = "foo bar\nbaz\nInt a;\nBegin\nEnd";
        assert_eq!(
            issues(source),
            vec![(1, Issue::ConstructBeforeInt("foo".to_string()))]
        );
    }

    #[test]
    fn blank_lines_before_int_are_not_constructs() {
        assert!(validate("\n\n   \nInt a;\nBegin\nEnd").is_empty());
    }

    #[test]
    fn begin_and_end_lines_need_no_semicolon_after_assignment() {
        assert!(validate("Int a;\nBegin a := 1\nEnd").is_empty());
        assert_eq!(
            issues("Int a;\nBegin\nEnd a := 1"),
            vec![(3, Issue::ConstructAfterEnd("a := 1".to_string()))]
        );
    }

    #[test]
    fn reports_every_line_after_end() {
        let source = "Int a;\nBegin\nEnd\nx := 1;\n\ny := 2;";
        let found = issues(source);
        assert_eq!(
            found,
            vec![
                (4, Issue::ConstructAfterEnd("x := 1;".to_string())),
                (6, Issue::ConstructAfterEnd("y := 2;".to_string())),
            ]
        );
    }

    #[test]
    fn reports_trailing_text_on_end_line() {
        let found = issues("Int a;\nBegin\nEnd now");
        assert_eq!(found, vec![(3, Issue::ConstructAfterEnd("now".to_string()))]);
    }

    #[test]
    fn reports_missing_semicolons() {
        let found = issues("Int a\nBegin\n    a := 1\nEnd");
        assert_eq!(
            found,
            vec![(1, Issue::MissingSemicolon), (3, Issue::MissingSemicolon)]
        );
    }

    #[test]
    fn reports_bare_equals_and_duplicated_operators() {
        let found = issues("Int a;\nBegin\n    a = 1;\n    a := 1 ++ 2;\nEnd");
        assert_eq!(
            found,
            vec![
                (3, Issue::BareEquals),
                (4, Issue::DuplicatedOperator("++".to_string())),
            ]
        );
    }

    #[test]
    fn rules_stack_on_one_line() {
        let found = issues("Int a;\nBegin\n    a == 1\nEnd");
        assert_eq!(
            found,
            vec![
                (3, Issue::BareEquals),
                (3, Issue::DuplicatedOperator("==".to_string())),
            ]
        );
    }

    #[test]
    fn comment_lines_still_hit_character_rules() {
        let found = issues("Int a;\nBegin\n# a = 1\nEnd");
        assert_eq!(found, vec![(3, Issue::RestrictedSymbol('#'))]);
    }

    #[test]
    fn reports_invalid_leading_and_restricted_characters() {
        let found = issues("Int a;\nBegin\n    a := 1 $ 2;\n    !a := 1;\nEnd");
        assert_eq!(
            found,
            vec![
                (3, Issue::RestrictedSymbol('$')),
                (4, Issue::InvalidLeadingCharacter('!')),
            ]
        );
    }

    #[test]
    fn finds_operator_run_at_end_of_line() {
        assert_eq!(first_operator_run("a := b --"), Some("--"));
        assert_eq!(first_operator_run("a := b - -c"), None);
        assert_eq!(first_operator_run("a := b */ c"), Some("*/"));
    }
}
