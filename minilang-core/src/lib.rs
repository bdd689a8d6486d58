//! Core of the mini-language toolchain.
//!
//! The pipeline for source text is roughly:
//!
//!   source (`Int …; Begin … End`)
//!     -> validator  (diagnostics; gates everything below)
//!     -> lexer      (classified lexemes)
//!     -> postfix    (infix -> postfix, one statement per line)
//!     -> bytecode   (descriptive per-line listing)
//!
//! Postfix text, whether produced above or supplied by hand, feeds two
//! independent back ends:
//!
//!   postfix
//!     -> machine    (LIT/STO/LOAD/ADD/… mnemonics, then slot renaming)
//!     -> regen      (reconstructed mini-language source)
//!
//! Every operation is a pure function over in-memory text. Reading and
//! writing files is left to the front ends (see `minilang-cli`).

// ---------------------------------------------------------------------
// Error handling and diagnostics
// ---------------------------------------------------------------------

pub mod diagnostic;
pub mod error;

// ---------------------------------------------------------------------
// Front-end: validation, lexing, postfix translation
// ---------------------------------------------------------------------

pub mod stack;
pub mod validator;
pub mod lexer;
pub mod postfix;
pub mod bytecode;

// ---------------------------------------------------------------------
// Back-end: stack machine and source regeneration
// ---------------------------------------------------------------------

pub mod machine;
pub mod regen;

// ---------------------------------------------------------------------
// Orchestration and public API re-exports
// ---------------------------------------------------------------------

pub mod compiler;

pub use compiler::{
    CompilationArtifact, SAMPLE_PROGRAM, compile, regenerate_source, translate_to_machine,
};
pub use diagnostic::{Diagnostic, Issue};
pub use error::CoreError;
pub use lexer::{Lexeme, LexemeType};
pub use machine::{Instruction, MachineProgram, Operand};
