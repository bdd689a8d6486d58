//! Postfix to stack-machine mnemonics.
//!
//! The generator is a single linear scan without an operand stack. A
//! variable's first mention anywhere in the stream is emitted as `STO`,
//! every later mention as `LOAD`. Tokens that are neither numbers,
//! variables, arithmetic operators nor `:=` (a stray `(` flushed by the
//! translator, for instance) produce no instruction.
//!
//! [`assign_slots`] is the follow-up renaming pass: each variable operand
//! is replaced by a slot index handed out in first-encounter order.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::lexer::is_identifier;
use crate::postfix::ASSIGN;

/// Operand of a `STO`/`LOAD` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Name(String),
    Slot(usize),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Name(name) => f.write_str(name),
            Operand::Slot(slot) => write!(f, "{slot}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Lit(String),
    Sto(Operand),
    Load(Operand),
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Lit(value) => write!(f, "LIT {value}"),
            Instruction::Sto(operand) => write!(f, "STO {operand}"),
            Instruction::Load(operand) => write!(f, "LOAD {operand}"),
            Instruction::Add => f.write_str("ADD"),
            Instruction::Sub => f.write_str("SUB"),
            Instruction::Mul => f.write_str("MUL"),
            Instruction::Div => f.write_str("DIV"),
        }
    }
}

impl Instruction {
    fn operand_mut(&mut self) -> Option<&mut Operand> {
        match self {
            Instruction::Sto(operand) | Instruction::Load(operand) => Some(operand),
            _ => None,
        }
    }
}

/// Instructions after the renaming pass, together with the name to slot
/// map that produced them (in first-encounter order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineProgram {
    pub instructions: Vec<Instruction>,
    pub slots: IndexMap<String, usize>,
}

impl MachineProgram {
    pub fn render(&self) -> String {
        render(&self.instructions)
    }
}

/// Newline-joined mnemonic text.
pub fn render(instructions: &[Instruction]) -> String {
    instructions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate mnemonics for a whitespace-separated postfix stream.
pub fn generate(postfix: &str) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut pending: Option<&str> = None;

    for token in postfix.split_whitespace() {
        if token == ASSIGN {
            if let Some(name) = pending.take() {
                store_once(name, &mut seen, &mut instructions);
            }
            continue;
        }

        if let Some(op) = arithmetic(token) {
            instructions.push(op);
        } else if is_numeric(token) {
            instructions.push(Instruction::Lit(token.to_string()));
        } else if is_variable(token) {
            if seen.insert(token) {
                instructions.push(Instruction::Sto(Operand::Name(token.to_string())));
            } else {
                instructions.push(Instruction::Load(Operand::Name(token.to_string())));
            }
            pending = Some(token);
            continue;
        }
        pending = None;
    }

    if let Some(name) = pending {
        store_once(name, &mut seen, &mut instructions);
    }

    instructions
}

fn store_once<'src>(
    name: &'src str,
    seen: &mut HashSet<&'src str>,
    instructions: &mut Vec<Instruction>,
) {
    if seen.insert(name) {
        instructions.push(Instruction::Sto(Operand::Name(name.to_string())));
    }
}

fn arithmetic(token: &str) -> Option<Instruction> {
    match token {
        "+" => Some(Instruction::Add),
        "-" => Some(Instruction::Sub),
        "*" => Some(Instruction::Mul),
        "/" => Some(Instruction::Div),
        _ => None,
    }
}

fn is_variable(token: &str) -> bool {
    is_identifier(token) || token.contains(|ch: char| ch.is_ascii_alphabetic())
}

/// Decimal literal with an optional sign and at most one `.`.
fn is_numeric(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    let mut dots = 0;
    let mut has_digit = false;
    for ch in digits.chars() {
        match ch {
            '0'..='9' => has_digit = true,
            '.' => dots += 1,
            _ => return false,
        }
    }
    has_digit && dots <= 1
}

/// Replace every variable operand with a slot index, assigned from 0 in
/// first-encounter order. Operands that are already slots are kept.
pub fn assign_slots(instructions: &[Instruction]) -> MachineProgram {
    let mut slots: IndexMap<String, usize> = IndexMap::new();
    let mut renamed = instructions.to_vec();

    for operand in renamed.iter_mut().filter_map(Instruction::operand_mut) {
        if let Operand::Name(name) = operand {
            let next = slots.len();
            let slot = *slots.entry(name.clone()).or_insert(next);
            *operand = Operand::Slot(slot);
        }
    }

    MachineProgram {
        instructions: renamed,
        slots,
    }
}
