use serde::Serialize;

use crate::bytecode::emit_bytecode;
use crate::diagnostic::Diagnostic;
use crate::error::CoreError;
use crate::lexer::{Lexeme, tokenize};
use crate::machine::{self, MachineProgram};
use crate::postfix::to_postfix;
use crate::regen;
use crate::validator::validate;

/// Default program shown to new users.
pub const SAMPLE_PROGRAM: &str = concat!(
    "Int a, b, c;\n",
    "Begin\n",
    "    a := 10;\n",
    "    b := 20;\n",
    "    c := a + b;\n",
    "End",
);

/// Everything produced for a source file that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilationArtifact {
    pub lexemes: Vec<Lexeme>,
    pub postfix: String,
    pub bytecode: String,
}

/// Validate `source` and, when it is clean, run the tokenizer, the
/// postfix translator and the bytecode emitter over it.
///
/// On failure the full, ordered diagnostic list is returned and none of
/// the later stages run.
pub fn compile(source: &str) -> Result<CompilationArtifact, Vec<Diagnostic>> {
    let diagnostics = validate(source);
    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    Ok(CompilationArtifact {
        lexemes: tokenize(source),
        postfix: to_postfix(source),
        bytecode: emit_bytecode(source),
    })
}

/// Postfix text to renamed stack-machine code.
pub fn translate_to_machine(postfix: &str) -> MachineProgram {
    machine::assign_slots(&machine::generate(postfix))
}

/// Postfix text to reconstructed mini-language source.
pub fn regenerate_source(postfix: &str) -> Result<String, CoreError> {
    regen::regenerate(postfix)
}
