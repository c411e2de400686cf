use crate::{
    lang::source_buffer::SourceLocation,
    runtime::{
        config::RuntimeConfig,
        data_structures::{dictionary::{Dictionary, WordId}, value::Value},
        error::{self, ErrorKind, ScriptError, script_error},
        interpreter::{
            CallStack, InterpreterStack,
            context::{ContextId, ExecutionContext, TaskHandle},
            threading::execute_word,
        },
    },
};
use iceoryx2_bb_log::{debug, trace, warn};
use lazy_static::lazy_static;
use std::{
    collections::HashMap,
    io::{self, Stdout, Write},
    sync::Mutex,
};

/// Where the print and newline words send their text.
pub enum Output {
    /// Straight to the process's standard output.
    Stdout(Stdout),

    /// Into an in-memory buffer that can be taken with Runtime::take_output.
    Captured(Vec<u8>),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(stdout) => stdout.write(buf),
            Output::Captured(buffer) => buffer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(stdout) => stdout.flush(),
            Output::Captured(_) => Ok(()),
        }
    }
}

/// The runtime object.  It owns the dictionary, the process wide variables and the task registry,
/// and it knows which task is active.  Every dictionary operation, inner interpreter and primitive
/// works through a reference to it.
pub struct Runtime {
    dictionary: Dictionary,

    /// Variables visible to every task.
    globals: HashMap<String, Value>,

    /// Registered tasks by name.
    tasks: HashMap<String, ContextId>,

    /// Every live context, registered or not.
    contexts: HashMap<ContextId, ExecutionContext>,

    /// The context the inner interpreters and primitives work against.
    active: Option<ContextId>,

    next_context_id: usize,

    /// Location of the instruction being executed, if it has one.
    current_location: Option<SourceLocation>,

    output: Output,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    // One runtime for embeddings that want a single process wide instance.  The mutex serializes
    // dictionary and variable access between threads.
    static ref SHARED_RUNTIME: Mutex<Runtime> = {
        let config = RuntimeConfig::from_env();
        let mut runtime = Runtime::with_config(&config);

        crate::runtime::built_ins::register_builtin_words(&mut runtime);
        Mutex::new(runtime)
    };
}

/// The process wide runtime, built with the environment's configuration and the built-in words the
/// first time it is asked for.
pub fn shared_runtime() -> &'static Mutex<Runtime> {
    &SHARED_RUNTIME
}

impl Runtime {
    /// Create a runtime with the default configuration.  The dictionary starts with just the
    /// pre-registered vocabularies, searching and defining in the root.
    pub fn new() -> Runtime {
        Runtime::with_config(&RuntimeConfig::default())
    }

    pub fn with_config(config: &RuntimeConfig) -> Runtime {
        let output = if config.capture_output {
            Output::Captured(Vec::new())
        } else {
            Output::Stdout(io::stdout())
        };

        Runtime {
            dictionary: Dictionary::new(),
            globals: HashMap::new(),
            tasks: HashMap::new(),
            contexts: HashMap::new(),
            active: None,
            next_context_id: 0,
            current_location: None,
            output,
        }
    }

    /// A runtime whose output is captured in memory.
    pub fn captured() -> Runtime {
        Runtime::with_config(&RuntimeConfig {
            capture_output: true,
            ..RuntimeConfig::default()
        })
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    /// Create a new task bound to an entry word and register it under the task name.  A task
    /// already registered under that name is displaced, but stays alive until it is run or
    /// discarded.
    pub fn init(&mut self, task_name: &str, entry: WordId) -> TaskHandle {
        let id = ContextId(self.next_context_id);

        self.next_context_id += 1;

        let _ = self
            .contexts
            .insert(id, ExecutionContext::new(id, task_name, entry));

        if let Some(displaced) = self.tasks.insert(task_name.to_string(), id) {
            debug!("task {} displaced context #{}", task_name, displaced.0);
        }

        debug!(
            "initialized task {} with entry word {}",
            task_name,
            self.dictionary.word(entry).name()
        );

        TaskHandle::new(task_name, id)
    }

    /// Drop a task without running it, for example one displaced by a later init under the same
    /// name.  The registry entry is only removed if it still belongs to this task.  Gives back the
    /// context if it was still alive.
    pub fn discard(&mut self, task: &TaskHandle) -> Option<ExecutionContext> {
        if self.tasks.get(task.name()) == Some(&task.id()) {
            let _ = self.tasks.remove(task.name());
        }

        let context = self.contexts.remove(&task.id());

        if context.is_some() {
            debug!("task {} discarded", task);
        }

        context
    }

    /// How many contexts are alive, registered or displaced.
    pub fn live_contexts(&self) -> usize {
        self.contexts.len()
    }

    /// Same as init, but the entry word is looked up by name.
    pub fn init_named(&mut self, task_name: &str, entry: &str) -> error::Result<TaskHandle> {
        let entry = self.dictionary.find_word(entry)?;
        Ok(self.init(task_name, entry))
    }

    /// The handle of the task currently registered under the name.
    pub fn task_handle(&self, task_name: &str) -> Option<TaskHandle> {
        self.tasks
            .get(task_name)
            .map(|id| TaskHandle::new(task_name, *id))
    }

    /// Names of all registered tasks, sorted.
    pub fn task_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tasks.keys().cloned().collect();

        names.sort();
        names
    }

    pub fn task(&self, task: &TaskHandle) -> Option<&ExecutionContext> {
        self.contexts.get(&task.id())
    }

    /// Get at a task's context, for example to seed its stack before running it.
    pub fn task_mut(&mut self, task: &TaskHandle) -> error::Result<&mut ExecutionContext> {
        self.contexts.get_mut(&task.id()).ok_or_else(|| {
            ScriptError::new(
                ErrorKind::UnknownTask,
                None,
                format!("Task {} is not alive.", task),
                None,
            )
        })
    }

    /// Run a task's entry word to completion with the task as the active context.  Afterwards the
    /// task is deregistered, if it is still the one registered under its name, and its finished
    /// context is handed back.
    pub fn run(&mut self, task: &TaskHandle) -> error::Result<ExecutionContext> {
        let entry = match self.contexts.get(&task.id()) {
            Some(context) => context.entry(),
            None => {
                return script_error(
                    self,
                    ErrorKind::UnknownTask,
                    format!("Task {} is not alive.", task),
                );
            }
        };

        let previous = self.active.replace(task.id());
        let name = self.dictionary.word(entry).name().clone();
        let primitive = self.dictionary.word(entry).handler().is_primitive();

        trace!("running task {}", task);

        // A secondary entry word leaves the status of its last instruction in place.
        let result = execute_word(self, entry);

        if primitive {
            self.record_status(&name, result);
        } else if let Err(error) = result {
            warn!("{}: {}", name, error);
        }

        self.active = previous;
        self.current_location = None;

        if self.tasks.get(task.name()) == Some(&task.id()) {
            let _ = self.tasks.remove(task.name());
            debug!("task {} finished and was deregistered", task);
        } else {
            debug!("task {} finished, its name now belongs to another context", task);
        }

        match self.contexts.remove(&task.id()) {
            Some(context) => Ok(context),
            None => script_error(
                self,
                ErrorKind::UnknownTask,
                format!("Task {} vanished while running.", task),
            ),
        }
    }

    /// The active task's context.
    pub fn context(&self) -> error::Result<&ExecutionContext> {
        match self.active.and_then(|id| self.contexts.get(&id)) {
            Some(context) => Ok(context),
            None => script_error(self, ErrorKind::NoActiveContext, "No task is running.".to_string()),
        }
    }

    /// The active task's context, mutably.
    pub fn context_mut(&mut self) -> error::Result<&mut ExecutionContext> {
        self.active
            .and_then(|id| self.contexts.get_mut(&id))
            .ok_or_else(|| {
                ScriptError::new(
                    ErrorKind::NoActiveContext,
                    None,
                    "No task is running.".to_string(),
                    None,
                )
            })
    }

    /// Push onto the active task's data stack.
    pub fn push(&mut self, value: Value) -> error::Result<()> {
        self.context_mut()?.push(value);
        Ok(())
    }

    /// Pop from the active task's data stack.
    pub fn pop(&mut self) -> error::Result<Value> {
        self.context_mut()?.pop()
    }

    /// Pop a variable name from the active task's data stack.
    pub fn pop_as_name(&mut self) -> error::Result<String> {
        self.context_mut()?.pop_as_name()
    }

    /// Bind a process wide variable.
    pub fn define_global(&mut self, name: &str, value: Value) {
        let _ = self.globals.insert(name.to_string(), value);
    }

    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    pub fn globals(&self) -> &HashMap<String, Value> {
        &self.globals
    }

    /// Read a variable, looking in the active task's bindings first and then the process wide
    /// ones.
    pub fn fetch_variable(&self, name: &str) -> error::Result<Value> {
        if let Some(value) = self.context()?.variables().get(name) {
            return Ok(value.clone());
        }

        match self.globals.get(name) {
            Some(value) => Ok(value.clone()),
            None => script_error(
                self,
                ErrorKind::UndefinedVariable,
                format!("Variable {} is not defined.", name),
            ),
        }
    }

    /// Write a variable.  An existing task binding wins, then an existing process wide binding,
    /// otherwise a new task binding is created.
    pub fn store_variable(&mut self, name: &str, value: Value) -> error::Result<()> {
        let context = self.context_mut()?;

        if let Some(slot) = context.variables_mut().get_mut(name) {
            *slot = value;
            return Ok(());
        }

        if let Some(slot) = self.globals.get_mut(name) {
            *slot = value;
            return Ok(());
        }

        let _ = self
            .context_mut()?
            .variables_mut()
            .insert(name.to_string(), value);

        Ok(())
    }

    /// Send text to the runtime's output.
    pub fn write_output(&mut self, text: &str) -> error::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;

        Ok(())
    }

    /// Take everything captured so far.  Always empty when writing to stdout.
    pub fn take_output(&mut self) -> String {
        match &mut self.output {
            Output::Captured(buffer) => String::from_utf8_lossy(&std::mem::take(buffer)).to_string(),
            Output::Stdout(_) => String::new(),
        }
    }

    pub fn current_location(&self) -> &Option<SourceLocation> {
        &self.current_location
    }

    pub(crate) fn set_current_location(&mut self, location: Option<SourceLocation>) {
        self.current_location = location;
    }

    /// The active task's call stack, if a task is active.
    pub fn call_stack(&self) -> Option<CallStack> {
        self.active
            .and_then(|id| self.contexts.get(&id))
            .map(|context| context.call_stack().clone())
    }

    /// Record the outcome of one instruction in the active task's status slot.  Failures are
    /// reported and leave the status empty, nothing else happens to them.
    pub(crate) fn record_status(&mut self, word: &str, result: error::Result<Value>) {
        let status = match result {
            Ok(value) => Some(value),
            Err(error) => {
                warn!("{}: {}", word, error);
                None
            }
        };

        if let Some(context) = self.active.and_then(|id| self.contexts.get_mut(&id)) {
            context.set_status(status);
        }
    }
}
