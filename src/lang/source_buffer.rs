use std::{ fmt::{ self,
                  Display,
                  Formatter },
           hash::{ Hash,
                   Hasher } };



/// The location in the source code where a token was found, or where a word was defined.  Used by
/// the tokenizer, the dictionary and the error reporting.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, PartialEq, PartialOrd, Eq)]
pub struct SourceLocation
{
    /// Either the path to the file or a description of the source code.  For example lines handed
    /// over directly by a front end will carry a tag like "\<input\>".
    path: String,

    /// The 1 based line number in the source.
    line: usize,

    /// The 1 based column number in the source.
    column: usize
}


impl Default for SourceLocation
{
    fn default() -> Self
    {
        Self::new()
    }
}


impl Hash for SourceLocation
{
    fn hash<H: Hasher>(&self, state: &mut H)
    {
        self.path.hash(state);
        self.line.hash(state);
        self.column.hash(state);
    }
}


impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl fmt::Debug for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{}", self)
    }
}


impl SourceLocation
{
    /// Crate a new SourceLocation with default values.
    pub fn new() -> SourceLocation
    {
        SourceLocation { path: "unspecified".to_string(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.  This is useful in
    /// conjunction with the location_here! macro.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }

    /// The path to the source code or a meaningful description of the source code.
    pub fn path(&self) -> &String
    {
        &self.path
    }

    /// The 1 based line number in the source code.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// The 1 based column number in the source code.
    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// Helper macro to get the location of the macro invocation.  Primitive words record where in the
/// Rust code they were registered from.
#[macro_export]
macro_rules! location_here
{
    () =>
    {
        $crate::lang::source_buffer::SourceLocation::new_from_info(file!(),
                                                                   line!() as usize,
                                                                   column!() as usize)
    };
}



/// A cursor over a single line of source text.  The tokenizer pulls one line at a time from a line
/// source and walks it with this buffer.  The location of the cursor is kept up to date as
/// characters are consumed so tokens can report where they started.
pub struct LineBuffer
{
    /// The characters of the current line, without any line terminator.
    chars: Vec<char>,

    /// Index of the next character to hand out.
    position: usize,

    /// The logical location of the cursor in the source code.
    location: SourceLocation
}


impl LineBuffer
{
    /// Create an empty buffer for the named source.  Call load_line before reading from it.
    pub fn new(path: &str) -> Self
    {
        LineBuffer
            {
                chars: Vec::new(),
                position: 0,
                location: SourceLocation::new_from_info(path, 0, 1)
            }
    }

    /// Replace the buffer's contents with the next line of the source.  Trailing line terminators
    /// are dropped, the line counter advances and the column resets.
    pub fn load_line(&mut self, line: &str)
    {
        self.chars = line.trim_end_matches(['\n', '\r']).chars().collect();
        self.position = 0;
        self.location.line += 1;
        self.location.column = 1;
    }

    /// The location the cursor is at in the source code being processed.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Have all of the characters in the current line been consumed?
    pub fn is_exhausted(&self) -> bool
    {
        self.position >= self.chars.len()
    }

    /// Take a peek at the next character in the line without consuming it.
    pub fn peek_next(&self) -> Option<char>
    {
        self.chars.get(self.position).copied()
    }

    /// Get and consume the next character in the line.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = self.chars.get(self.position).copied();

        if next.is_some()
        {
            self.position += 1;
            self.location.column += 1;
        }

        next
    }

    /// Drop the rest of the current line.
    pub fn skip_line(&mut self)
    {
        self.location.column += self.chars.len().saturating_sub(self.position);
        self.position = self.chars.len();
    }
}
