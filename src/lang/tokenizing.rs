use crate::{
    lang::source_buffer::{LineBuffer, SourceLocation},
    runtime::{data_structures::value::Value, error},
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    fs::File,
    hash::{Hash, Hasher},
    io::{self, BufRead, BufReader},
};

/// A token is a simple unit of the language.  It is either a quoted string, kept with its quote
/// characters and with its escapes resolved, or a bare word folded to lower case.
///
/// The token also holds the location in the original source code where it was found.
#[derive(Clone, PartialEq, Eq, PartialOrd)]
pub enum Token {
    /// A single line or multi-line string literal, quotes included.
    String(SourceLocation, String),

    /// Anything else, lower cased.
    Word(SourceLocation, String),
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Token::String(location, value) => {
                0.hash(state);
                location.hash(state);
                value.hash(state);
            }

            Token::Word(location, value) => {
                1.hash(state);
                location.hash(state);
                value.hash(state);
            }
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Include the original location, and escape the string literals so they print on one line.
impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::String(location, string) => {
                write!(f, "{}: {}", location, Value::stringify(string))
            }
            Token::Word(location, string) => write!(f, "{}: {}", location, string),
        }
    }
}

impl Token {
    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Token::String(location, _) => location,
            Token::Word(location, _) => location,
        }
    }

    /// The token's text exactly as it will be handed to a compiler.
    pub fn text(&self) -> &String {
        match self {
            Token::String(_, text) => text,
            Token::Word(_, text) => text,
        }
    }

    /// Check if the token is a string literal.
    pub fn is_string(&self) -> bool {
        matches!(self, Token::String(_, _))
    }

    /// Check if the token is a word.
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_, _))
    }

    /// The contents of a string literal without its quote characters.  An unterminated literal
    /// only loses its opening quote.
    pub fn string_value(&self) -> Option<&str> {
        match self {
            Token::String(_, text) => {
                let inner = text.strip_prefix('"').unwrap_or(text);
                Some(inner.strip_suffix('"').unwrap_or(inner))
            }
            Token::Word(_, _) => None,
        }
    }
}

/// One source of lines for the tokenizer, along with a tag used in token locations.
pub struct LineSource {
    path: String,
    lines: Box<dyn Iterator<Item = io::Result<String>>>,
}

impl LineSource {
    /// Wrap any sequence of lines.
    pub fn new<I>(path: &str, lines: I) -> LineSource
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: 'static,
    {
        LineSource {
            path: path.to_string(),
            lines: Box::new(lines.into_iter().map(Ok)),
        }
    }

    /// Split a block of text into lines.
    pub fn from_text(path: &str, text: &str) -> LineSource {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        LineSource::new(path, lines)
    }

    /// Pull lines from a buffered reader as they are needed.
    pub fn from_reader<R>(path: &str, reader: R) -> LineSource
    where
        R: BufRead + 'static,
    {
        LineSource {
            path: path.to_string(),
            lines: Box::new(reader.lines()),
        }
    }

    /// Read lines from a file as they are needed.
    pub fn from_file(path: &str) -> error::Result<LineSource> {
        let file = File::open(path)?;
        Ok(LineSource::from_reader(path, BufReader::new(file)))
    }

    pub fn path(&self) -> &String {
        &self.path
    }
}

/// Check if the given character is considered whitespace.  Any Unicode white space separates
/// tokens.
fn is_whitespace(next: &char) -> bool {
    next.is_whitespace()
}

/// Skip over whitespace in the line.  Stopping only at either the end of the line or the next
/// non-whitespace character.
fn skip_whitespace(buffer: &mut LineBuffer) {
    while let Some(next) = buffer.peek_next() {
        if !is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Read up to count hex digits.  Gives back the character they encode, or the digits read if they
/// don't make a full, valid character.
fn read_hex_escape(buffer: &mut LineBuffer, count: usize) -> Result<char, String> {
    let mut digits = String::new();

    while digits.len() < count {
        match buffer.peek_next() {
            Some(next) if next.is_ascii_hexdigit() => {
                let _ = buffer.next_char();
                digits.push(next);
            }
            _ => break,
        }
    }

    if digits.len() < count {
        return Err(digits);
    }

    u32::from_str_radix(&digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or(digits)
}

/// Resolve one escape sequence.  The backslash has already been consumed.  Sequences that aren't
/// recognized are kept as written, backslash included.
fn process_escape(buffer: &mut LineBuffer, text: &mut String) {
    let Some(next) = buffer.next_char() else {
        text.push('\\');
        return;
    };

    match next {
        'n' => text.push('\n'),
        'r' => text.push('\r'),
        't' => text.push('\t'),
        'a' => text.push('\x07'),
        'b' => text.push('\x08'),
        'f' => text.push('\x0c'),
        'v' => text.push('\x0b'),
        '\\' => text.push('\\'),
        '\'' => text.push('\''),
        '"' => text.push('"'),

        // Up to three octal digits.
        '0'..='7' => {
            let mut value = next.to_digit(8).unwrap_or(0);

            for _ in 0..2 {
                match buffer.peek_next().and_then(|digit| digit.to_digit(8)) {
                    Some(digit) => {
                        let _ = buffer.next_char();
                        value = value * 8 + digit;
                    }
                    None => break,
                }
            }

            text.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
        }

        'x' | 'u' | 'U' => {
            let count = match next {
                'x' => 2,
                'u' => 4,
                _ => 8,
            };

            match read_hex_escape(buffer, count) {
                Ok(character) => text.push(character),
                Err(digits) => {
                    text.push('\\');
                    text.push(next);
                    text.push_str(&digits);
                }
            }
        }

        _ => {
            text.push('\\');
            text.push(next);
        }
    }
}

/// Pull text out of the line until we hit a whitespace character.  Words can contain any character
/// except whitespace.
fn process_until_whitespace(buffer: &mut LineBuffer) -> (SourceLocation, String) {
    let location = buffer.location().clone();
    let mut text = String::new();

    while let Some(next) = buffer.peek_next() {
        if is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char();
        text.push(next);
    }

    (location, text.to_lowercase())
}

/// The tokenizer's state for the source it is currently reading.
struct SourceScanner {
    lines: Box<dyn Iterator<Item = io::Result<String>>>,
    buffer: LineBuffer,

    /// A quoted string still waiting for its closing quote, with where it started.
    open_string: Option<(SourceLocation, String)>,
}

impl SourceScanner {
    fn new(source: LineSource) -> SourceScanner {
        SourceScanner {
            buffer: LineBuffer::new(&source.path),
            lines: source.lines,
            open_string: None,
        }
    }

    /// Continue the open string on the current line.  Returns true once the closing quote has been
    /// consumed, false if the line ran out first.
    fn scan_string(&mut self) -> bool {
        let Some((_, text)) = self.open_string.as_mut() else {
            return false;
        };

        while let Some(next) = self.buffer.next_char() {
            match next {
                '"' => {
                    text.push('"');
                    skip_whitespace(&mut self.buffer);
                    return true;
                }

                '\\' => process_escape(&mut self.buffer, text),

                _ => text.push(next),
            }
        }

        false
    }

    /// Produce the next token of this source, or None once it is used up.
    fn next_token(&mut self) -> error::Result<Option<Token>> {
        loop {
            if self.buffer.is_exhausted() {
                match self.lines.next() {
                    Some(line) => {
                        let line = line?;

                        if let Some((_, text)) = self.open_string.as_mut() {
                            text.push('\n');
                        }

                        self.buffer.load_line(&line);
                    }

                    None => {
                        // Whatever the unterminated string holds is kept.
                        return Ok(self
                            .open_string
                            .take()
                            .map(|(location, text)| Token::String(location, text)));
                    }
                }

                continue;
            }

            if self.open_string.is_some() {
                if self.scan_string() {
                    if let Some((location, text)) = self.open_string.take() {
                        return Ok(Some(Token::String(location, text)));
                    }
                }

                continue;
            }

            match self.buffer.peek_next() {
                Some(next) if is_whitespace(&next) => skip_whitespace(&mut self.buffer),

                // A comment runs to the end of the line and produces nothing.
                Some('#') => self.buffer.skip_line(),

                Some('"') => {
                    let location = self.buffer.location().clone();

                    let _ = self.buffer.next_char();
                    self.open_string = Some((location, "\"".to_string()));
                }

                Some(_) => {
                    let (location, text) = process_until_whitespace(&mut self.buffer);
                    return Ok(Some(Token::Word(location, text)));
                }

                None => {}
            }
        }
    }
}

/// A lazy stream of tokens over a sequence of line sources.  Lines are only pulled from a source
/// when the tokens before them have been consumed.  Each source starts with a clean state, so an
/// unterminated string never leaks into the next source.
pub struct Tokenizer<S>
where
    S: Iterator<Item = LineSource>,
{
    sources: S,
    current: Option<SourceScanner>,
}

impl<S> Tokenizer<S>
where
    S: Iterator<Item = LineSource>,
{
    pub fn new<I>(sources: I) -> Tokenizer<S>
    where
        I: IntoIterator<Item = LineSource, IntoIter = S>,
    {
        Tokenizer {
            sources: sources.into_iter(),
            current: None,
        }
    }
}

impl<S> Iterator for Tokenizer<S>
where
    S: Iterator<Item = LineSource>,
{
    type Item = error::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() {
                self.current = Some(SourceScanner::new(self.sources.next()?));
            }

            let scanner = self.current.as_mut()?;

            match scanner.next_token() {
                Ok(Some(token)) => return Some(Ok(token)),

                Ok(None) => self.current = None,

                // The rest of a source that failed to read is abandoned.
                Err(error) => {
                    self.current = None;
                    return Some(Err(error));
                }
            }
        }
    }
}

/// Tokenize a sequence of line sources lazily.
pub fn tokenize<I>(sources: I) -> Tokenizer<I::IntoIter>
where
    I: IntoIterator<Item = LineSource>,
{
    Tokenizer::new(sources)
}

/// Tokenize the source code from a string.
pub fn tokenize_from_source(path: &str, source: &str) -> error::Result<TokenList> {
    tokenize([LineSource::from_text(path, source)]).collect()
}

/// Load the code from a file and then tokenize it.
pub fn tokenize_from_file(path: &str) -> error::Result<TokenList> {
    tokenize([LineSource::from_file(path)?]).collect()
}
