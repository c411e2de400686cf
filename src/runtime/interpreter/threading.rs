use crate::{
    lang::code::{Instruction, Op},
    runtime::{
        data_structures::{
            dictionary::{Handler, WordId},
            value::Value,
        },
        error::{self, ErrorKind, script_error},
        interpreter::{CallItem, forth_runtime::Runtime},
    },
};
use iceoryx2_bb_log::trace;

/// Invoke a word through its handler against the runtime's active task.  Primaries run their
/// procedure, secondaries are walked by the inner interpreter they were created with.
pub fn execute_word(runtime: &mut Runtime, word: WordId) -> error::Result<Value> {
    match runtime.dictionary().word(word).handler() {
        Handler::Primitive(function) => function(runtime),
        Handler::AtomicSecondary => execute_atomic(runtime, word),
        Handler::CompositeSecondary => execute_composite(runtime, word),
    }
}

/// Perform one non-jump operation.
fn execute_op(runtime: &mut Runtime, op: &Op) -> error::Result<Value> {
    match op {
        Op::Execute(word) => execute_word(runtime, *word),

        Op::PushConstantValue(value) => {
            runtime.push(value.clone())?;
            Ok(Value::None)
        }

        Op::Jump(_) | Op::JumpIfZero(_) => script_error(
            runtime,
            ErrorKind::UnexpectedJump,
            "Jumps are only supported in composite words.".to_string(),
        ),
    }
}

/// Fetch a copy of the instruction at the 1 based index of a word's body.
fn instruction_at(runtime: &Runtime, word: WordId, index: usize) -> Option<Instruction> {
    if index == 0 {
        return None;
    }

    runtime.dictionary().word(word).body().get(index - 1).cloned()
}

fn enter_word(runtime: &mut Runtime, word: WordId) -> error::Result<String> {
    let (name, location) = {
        let word = runtime.dictionary().word(word);
        (word.name().clone(), word.location().clone())
    };

    runtime
        .context_mut()?
        .call_stack_push(CallItem::new(name.clone(), location));

    Ok(name)
}

/// Walk a body with no internal control flow.  Every instruction runs once, in order.  A failing
/// instruction only empties the status slot; the walk always moves on to the next one.
pub fn execute_atomic(runtime: &mut Runtime, word: WordId) -> error::Result<Value> {
    let name = enter_word(runtime, word)?;
    let length = runtime.dictionary().word(word).body().len();

    for index in 1..=length {
        let Some(instruction) = instruction_at(runtime, word, index) else {
            break;
        };

        runtime.set_current_location(instruction.location.clone());

        let result = execute_op(runtime, &instruction.op);
        runtime.record_status(&name, result);
    }

    runtime.context_mut()?.call_stack_pop();
    Ok(Value::None)
}

/// Walk a body that may call other secondaries and contain relative jumps.  The instruction pointer
/// lives in the active task, keyed by nesting level, so nested calls each get their own slot and
/// never disturb the caller's.
pub fn execute_composite(runtime: &mut Runtime, word: WordId) -> error::Result<Value> {
    let name = enter_word(runtime, word)?;
    let level = runtime.context_mut()?.enter_level();

    trace!("entering {} at level {}", name, level);

    loop {
        let index = runtime.context()?.instruction_pointer(level).unwrap_or(1);

        let Some(instruction) = instruction_at(runtime, word, index) else {
            break;
        };

        runtime.set_current_location(instruction.location.clone());

        let next = match instruction.op {
            Op::Jump(offset) => match jump_target(runtime, index, offset) {
                Ok(target) => {
                    runtime.record_status(&name, Ok(Value::None));
                    target
                }
                Err(error) => {
                    runtime.record_status(&name, Err(error));
                    index + 1
                }
            },

            Op::JumpIfZero(offset) => {
                let outcome = runtime.pop().and_then(|condition| {
                    if condition.get_bool_val() {
                        Ok(index + 1)
                    } else {
                        jump_target(runtime, index, offset)
                    }
                });

                match outcome {
                    Ok(target) => {
                        runtime.record_status(&name, Ok(Value::None));
                        target
                    }
                    Err(error) => {
                        runtime.record_status(&name, Err(error));
                        index + 1
                    }
                }
            }

            ref op => {
                let result = execute_op(runtime, op);
                runtime.record_status(&name, result);
                index + 1
            }
        };

        runtime.context_mut()?.set_instruction_pointer(level, next);
    }

    let context = runtime.context_mut()?;

    context.leave_level(level);
    context.call_stack_pop();

    trace!("left {} at level {}", name, level);

    Ok(Value::None)
}

/// Resolve a relative jump.  Targets past the end of the body end the word, targets before its
/// start are rejected.
fn jump_target(runtime: &Runtime, index: usize, offset: isize) -> error::Result<usize> {
    match index.checked_add_signed(offset) {
        Some(target) if target >= 1 => Ok(target),
        _ => script_error(
            runtime,
            ErrorKind::UnexpectedJump,
            format!("Jump from instruction {} by {} leaves the word.", index, offset),
        ),
    }
}
