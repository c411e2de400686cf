
use std::{ error::Error,
           process::Termination,
           fmt::{ self, Debug, Display, Formatter }, process::ExitCode };
use crate::{ runtime::interpreter::{ CallStack, forth_runtime::Runtime },
             lang::source_buffer::SourceLocation };



pub type Result<T> = std::result::Result<T, ScriptError>;



/// The classes of failure the runtime can report.  Instruction level failures are advisory, the
/// inner interpreter records them as an empty status and carries on with the next instruction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind
{
    /// A pop was attempted on an empty data stack.
    StackUnderflow,

    /// A value used as a variable name was not a string.
    NotAVariableName,

    /// The variable is neither bound in the active task nor process wide.
    UndefinedVariable,

    /// A word could not be found through the search vocabulary chain.
    UndefinedWord,

    /// A vocabulary of that name is already registered.
    DuplicateVocabulary,

    /// No vocabulary of that name is registered.
    UnknownVocabulary,

    /// A new vocabulary was asked to extend the compiler vocabulary.
    SealedVocabulary,

    /// An instruction needed the active task, but none is running.
    NoActiveContext,

    /// The task handle does not refer to a live execution context.
    UnknownTask,

    /// A jump was found where relative jumps aren't supported, or its target is out of range.
    UnexpectedJump,

    /// Reading source lines or writing output failed.
    Io
}


impl Display for ErrorKind
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        let text = match self
            {
                ErrorKind::StackUnderflow      => "stack underflow",
                ErrorKind::NotAVariableName    => "not a variable name",
                ErrorKind::UndefinedVariable   => "undefined variable",
                ErrorKind::UndefinedWord       => "undefined word",
                ErrorKind::DuplicateVocabulary => "duplicate vocabulary",
                ErrorKind::UnknownVocabulary   => "unknown vocabulary",
                ErrorKind::SealedVocabulary    => "sealed vocabulary",
                ErrorKind::NoActiveContext     => "no active context",
                ErrorKind::UnknownTask         => "unknown task",
                ErrorKind::UnexpectedJump      => "unexpected jump",
                ErrorKind::Io                  => "i/o error"
            };

        write!(f, "{}", text)
    }
}



/// Any error that occurs while building or running words.
#[derive(Clone)]
pub struct ScriptError
{
    /// What went wrong, in a form that code can match on.
    kind: ErrorKind,

    /// The location in the source code the error occurred, if available.
    location: Option<SourceLocation>,

    /// The description of the error.
    error: String,

    /// The task's call stack at the time of the error, if available.
    call_stack: Option<CallStack>
}


impl Error for ScriptError
{
}


/// When returned from main, convert the error result to an operating system exit code.
impl Termination for ScriptError
{
    fn report(self) -> ExitCode
    {
        eprintln!("Error: {}", self);
        ExitCode::FAILURE
    }
}


impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}: {}", location, self.kind, self.error)?,
            None => write!(f, "{}: {}", self.kind, self.error)?
        }

        if let Some(call_stack) = &self.call_stack
            && !call_stack.is_empty()
        {
            write!(f, "\n\nCall stack\n")?;

            for item in call_stack.iter().rev()
            {
                writeln!(f, "  {}", item)?;
            }
        }

        Ok(())
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(kind: ErrorKind,
               location: Option<SourceLocation>,
               error: String,
               call_stack: Option<CallStack>) -> ScriptError
    {
        ScriptError
            {
                kind,
                location,
                error,
                call_stack
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(kind: ErrorKind,
                            location: Option<SourceLocation>,
                            error: String,
                            call_stack: Option<CallStack>) -> Result<T>
    {
        Err(ScriptError::new(kind, location, error, call_stack))
    }

    /// The class of the error.
    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    /// If available, the location in the source code the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// The description of the error.
    pub fn error(&self) -> &String
    {
        &self.error
    }

    /// If available, the task's call stack at the time of the error.
    pub fn call_stack(&self) -> &Option<CallStack>
    {
        &self.call_stack
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(ErrorKind::Io, None, format!("I/O error: {}", error), None)
    }
}



/// Create a ScriptError wrapped in a Result::Err using the runtime's current location and the
/// active task's call stack.
pub fn script_error<T>(runtime: &Runtime, kind: ErrorKind, message: String) -> Result<T>
{
    let location = runtime.current_location().clone();
    let call_stack = runtime.call_stack();

    ScriptError::new_as_result(kind, location, message, call_stack)
}
