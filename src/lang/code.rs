use crate::{
    lang::source_buffer::SourceLocation,
    runtime::data_structures::{
        dictionary::{Dictionary, WordId},
        value::Value,
    },
};
use std::fmt::{self, Display, Formatter, Write};

/// The operations that can appear in the body of a secondary word.
#[derive(Clone, PartialEq)]
pub enum Op {
    /// Invoke a word through its handler.  A primary runs its procedure, a secondary is walked by
    /// whichever inner interpreter it was defined with.
    Execute(WordId),

    /// Push a literal value onto the active task's data stack.
    PushConstantValue(Value),

    /// Move the instruction pointer by a relative amount, measured from the jump instruction
    /// itself.  Only meaningful for composite secondaries.
    Jump(isize),

    /// Pop the top of the stack and jump by the relative amount if it is a false value, otherwise
    /// fall through to the next instruction.  Only meaningful for composite secondaries.
    JumpIfZero(isize),
}

impl Op {
    /// Does this operation need the jump capable inner interpreter?
    pub fn is_jump(&self) -> bool {
        matches!(self, Op::Jump(_) | Op::JumpIfZero(_))
    }
}

/// Represents a single instruction in a word's body.
#[derive(Clone, PartialEq)]
pub struct Instruction {
    /// Location in the source code this instruction was generated from.  Instructions built
    /// directly by native code will not have a location.
    pub location: Option<SourceLocation>,

    /// The operation to perform and its operand.
    pub op: Op,
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.op {
            Op::Execute(word) => write!(f, "Execute           {}", word),
            Op::PushConstantValue(value) => write!(f, "PushConstantValue {:?}", value),
            Op::Jump(offset) => write!(f, "Jump              {}", offset),
            Op::JumpIfZero(offset) => write!(f, "JumpIfZero        {}", offset),
        }
    }
}

/// The body of a secondary word.
pub type ByteCode = Vec<Instruction>;

impl Instruction {
    /// Create a new instruction with a location and operation.
    pub fn new(location: Option<SourceLocation>, op: Op) -> Instruction {
        Instruction { location, op }
    }

    /// Shorthand for an instruction that calls the given word.
    pub fn execute(word: WordId) -> Instruction {
        Instruction::new(None, Op::Execute(word))
    }

    /// Shorthand for an instruction that pushes a literal.
    pub fn push<T: Into<Value>>(value: T) -> Instruction {
        Instruction::new(None, Op::PushConstantValue(value.into()))
    }
}

/// Pretty print a word body, resolving called words to their names.  Instruction numbers are 1
/// based to match the inner interpreter's instruction pointers.
pub fn pretty_print_code(dictionary: &Dictionary, code: &ByteCode) -> String {
    let mut result = String::with_capacity(code.len() * 24);

    for (index, instruction) in code.iter().enumerate() {
        let _ = match &instruction.op {
            Op::Execute(word) => writeln!(
                &mut result,
                "{:4}: Execute           {}",
                index + 1,
                dictionary.word(*word).name()
            ),
            _ => writeln!(&mut result, "{:4}: {}", index + 1, instruction),
        };
    }

    result
}
