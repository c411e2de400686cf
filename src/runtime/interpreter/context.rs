use crate::runtime::{
    data_structures::{dictionary::WordId, value::Value},
    error::{self, ErrorKind, ScriptError},
    interpreter::{CallItem, CallStack, InterpreterStack, ValueStack},
};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

/// Identity of one execution context.  Two contexts registered under the same task name over time
/// never share an id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ContextId(pub(crate) usize);

/// What a front end holds on to between init and run.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TaskHandle {
    name: String,
    id: ContextId,
}

impl TaskHandle {
    pub(crate) fn new(name: &str, id: ContextId) -> TaskHandle {
        TaskHandle {
            name: name.to_string(),
            id,
        }
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn id(&self) -> ContextId {
        self.id
    }
}

impl Display for TaskHandle {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id.0)
    }
}

/// The state of one task.
pub struct ExecutionContext {
    id: ContextId,
    name: String,
    entry: WordId,

    stack: ValueStack,
    max_depth: usize,

    /// Takes pushes and pops but never steers execution.
    return_stack: ValueStack,

    /// What the last instruction produced, None if it failed.
    status: Option<Value>,

    /// Variables bound locally to this task.
    variables: HashMap<String, Value>,

    /// Nesting level to the 1 based index of the next instruction at that level.
    instruction_pointers: HashMap<usize, usize>,
    level: usize,

    call_stack: CallStack,
}

impl ExecutionContext {
    pub(crate) fn new(id: ContextId, name: &str, entry: WordId) -> ExecutionContext {
        ExecutionContext {
            id,
            name: name.to_string(),
            entry,
            stack: ValueStack::new(),
            max_depth: 0,
            return_stack: ValueStack::new(),
            status: None,
            variables: HashMap::new(),
            instruction_pointers: HashMap::new(),
            level: 0,
            call_stack: CallStack::new(),
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    /// The word run executes for this task.
    pub fn entry(&self) -> WordId {
        self.entry
    }

    pub fn status(&self) -> &Option<Value> {
        &self.status
    }

    pub fn set_status(&mut self, status: Option<Value>) {
        self.status = status;
    }

    pub fn variables(&self) -> &HashMap<String, Value> {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.variables
    }

    pub fn return_stack(&self) -> &ValueStack {
        &self.return_stack
    }

    /// Push onto the return stack.
    pub fn rpush(&mut self, value: Value) {
        self.return_stack.push(value);
    }

    /// Pop from the return stack.  An empty return stack gives back Value::None, so unbalanced use
    /// can't derail the task.
    pub fn rpop(&mut self) -> Value {
        self.return_stack.pop().unwrap_or_default()
    }

    /// The current nesting level of composite words.  Zero when none is running.
    pub fn level(&self) -> usize {
        self.level
    }

    /// The instruction pointer of a nesting level, if that level is active.
    pub fn instruction_pointer(&self, level: usize) -> Option<usize> {
        self.instruction_pointers.get(&level).copied()
    }

    pub(crate) fn set_instruction_pointer(&mut self, level: usize, index: usize) {
        let _ = self.instruction_pointers.insert(level, index);
    }

    /// Open the next nesting level.  A level that already has an instruction pointer resumes from
    /// it, otherwise it starts at the first instruction.
    pub(crate) fn enter_level(&mut self) -> usize {
        self.level += 1;
        let _ = self.instruction_pointers.entry(self.level).or_insert(1);

        self.level
    }

    /// Close a nesting level and drop its instruction pointer.
    pub(crate) fn leave_level(&mut self, level: usize) {
        let _ = self.instruction_pointers.remove(&level);
        self.level = level.saturating_sub(1);
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    pub(crate) fn call_stack_push(&mut self, item: CallItem) {
        self.call_stack.push(item);
    }

    pub(crate) fn call_stack_pop(&mut self) {
        let _ = self.call_stack.pop();
    }

    fn error<T>(&self, kind: ErrorKind, message: String) -> error::Result<T> {
        ScriptError::new_as_result(kind, None, message, Some(self.call_stack.clone()))
    }
}

impl InterpreterStack for ExecutionContext {
    fn stack_max_depth(&self) -> usize {
        self.max_depth
    }

    fn stack(&self) -> &ValueStack {
        &self.stack
    }

    fn push(&mut self, value: Value) {
        self.stack.push(value);

        if self.stack.len() > self.max_depth {
            self.max_depth = self.stack.len();
        }
    }

    fn pop(&mut self) -> error::Result<Value> {
        match self.stack.pop() {
            Some(value) => Ok(value),
            None => self.error(
                ErrorKind::StackUnderflow,
                format!("Stack underflow in task {}.", self.name),
            ),
        }
    }

    fn pop_as_name(&mut self) -> error::Result<String> {
        match self.pop()? {
            Value::String(name) => Ok(name),
            other => self.error(
                ErrorKind::NotAVariableName,
                format!("Expected a variable name, found {:?}.", other),
            ),
        }
    }
}
