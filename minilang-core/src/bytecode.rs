//! Descriptive per-line bytecode listing.
//!
//! This is a line classifier for display, not an executable encoding.

/// One record per physical line, newline-joined. Line numbers are 1-based.
pub fn emit_bytecode(source: &str) -> String {
    source
        .split('\n')
        .enumerate()
        .map(|(index, raw)| describe_line(index + 1, raw.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_line(number: usize, line: &str) -> String {
    if line.starts_with("print") {
        format!("PRINT {number}: {line}")
    } else if line.contains('=') {
        format!("ASSIGN {number}: {line}")
    } else if line.starts_with("def ") {
        format!("FUNC_DEF {number}: {line}")
    } else if line.is_empty() {
        format!("EMPTY_LINE {number}")
    } else {
        format!("LINE {number}: {line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_PROGRAM;

    #[test]
    fn describes_sample_program() {
        let expected = "LINE 1: Int a, b, c;\n\
                        LINE 2: Begin\n\
                        ASSIGN 3: a := 10;\n\
                        ASSIGN 4: b := 20;\n\
                        ASSIGN 5: c := a + b;\n\
                        LINE 6: End";
        assert_eq!(emit_bytecode(SAMPLE_PROGRAM), expected);
    }

    #[test]
    fn applies_priority_order() {
        assert_eq!(describe_line(1, "print x = 1"), "PRINT 1: print x = 1");
        assert_eq!(describe_line(2, "def f(x=1):"), "ASSIGN 2: def f(x=1):");
        assert_eq!(describe_line(3, "def f():"), "FUNC_DEF 3: def f():");
        assert_eq!(describe_line(4, ""), "EMPTY_LINE 4");
    }

    #[test]
    fn keeps_one_record_per_line() {
        let listing = emit_bytecode("a\n\n  b  \n");
        assert_eq!(listing, "LINE 1: a\nEMPTY_LINE 2\nLINE 3: b\nEMPTY_LINE 4");
    }
}
