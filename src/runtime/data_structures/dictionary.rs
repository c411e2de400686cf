use crate::{
    lang::{
        code::{ByteCode, pretty_print_code},
        source_buffer::SourceLocation,
    },
    runtime::{
        data_structures::value::Value,
        error::{self, ErrorKind, ScriptError},
        interpreter::forth_runtime::Runtime,
    },
};
use iceoryx2_bb_log::{debug, warn};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

/// The name of the vocabulary every search chain ends in.  The primitive words live here.
pub const ROOT_VOCABULARY: &str = "forth";

/// The name of the vocabulary user definitions are expected to go into.  It extends the root.
pub const USER_VOCABULARY: &str = "user";

/// The name of the vocabulary holding compile-time-only words.  It has no parent, and
/// new_vocabulary refuses to extend it, so it is never part of an ordinary search chain.
pub const COMPILER_VOCABULARY: &str = "compiler";

/// Stable handle of a word in the dictionary's word arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct WordId(usize);

/// Stable handle of a vocabulary in the dictionary's vocabulary arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VocabularyId(usize);

impl Display for WordId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Procedure implementing a primary word.  It works against the runtime's active task and returns
/// the value to record in that task's status slot.
pub type PrimitiveFn = fn(&mut Runtime) -> error::Result<Value>;

/// How a word is executed.  Fixed when the word is created.
#[derive(Clone, Copy)]
pub enum Handler {
    /// The word is a primary implemented in Rust.
    Primitive(PrimitiveFn),

    /// The body is walked strictly in order and may not contain jumps.
    AtomicSecondary,

    /// The body is walked with a per nesting level instruction pointer, allowing relative jumps.
    CompositeSecondary,
}

impl Handler {
    /// Is this a primary word's handler?
    pub fn is_primitive(&self) -> bool {
        matches!(self, Handler::Primitive(_))
    }
}

impl Display for Handler {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Handler::Primitive(_) => write!(f, "primitive"),
            Handler::AtomicSecondary => write!(f, "atomic"),
            Handler::CompositeSecondary => write!(f, "composite"),
        }
    }
}

/// The information stored in the dictionary for each word.
#[derive(Clone)]
pub struct Word {
    /// The location in the source code where the word was defined.
    location: SourceLocation,

    /// The name of the word.
    name: String,

    /// How the word gets executed.
    handler: Handler,

    /// The instructions of a secondary, empty for primaries.
    body: ByteCode,

    /// The word defined just before this one in the same vocabulary.
    prev: Option<WordId>,

    /// The previous word of the same name in the same vocabulary.
    hmnym: Option<WordId>,

    /// The vocabulary the word was defined in.
    vocabulary: VocabularyId,

    /// A simple description of the word.
    description: String,

    /// The stack signature of the word.
    signature: String,
}

impl Word {
    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn handler(&self) -> Handler {
        self.handler
    }

    pub fn body(&self) -> &ByteCode {
        &self.body
    }

    pub fn prev(&self) -> Option<WordId> {
        self.prev
    }

    pub fn hmnym(&self) -> Option<WordId> {
        self.hmnym
    }

    pub fn vocabulary(&self) -> VocabularyId {
        self.vocabulary
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn description(&self) -> &String {
        &self.description
    }

    pub fn signature(&self) -> &String {
        &self.signature
    }

    /// Attach the descriptive information shown in word listings.
    pub fn set_info(&mut self, location: SourceLocation, description: String, signature: String) {
        self.location = location;
        self.description = description;
        self.signature = signature;
    }
}

/// A named, chainable scope of word definitions.
#[derive(Clone)]
pub struct Vocabulary {
    /// The name the vocabulary is registered under.
    name: String,

    /// The vocabulary this one extended when it was created.  Never changes afterwards.
    prev: Option<VocabularyId>,

    /// The most recent definition of each name in this vocabulary.
    hmnym: HashMap<String, WordId>,

    /// The most recent definition in this vocabulary.
    top: Option<WordId>,
}

impl Vocabulary {
    fn new(name: &str, prev: Option<VocabularyId>) -> Vocabulary {
        Vocabulary {
            name: name.to_string(),
            prev,
            hmnym: HashMap::new(),
            top: None,
        }
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn prev(&self) -> Option<VocabularyId> {
        self.prev
    }

    pub fn top(&self) -> Option<WordId> {
        self.top
    }

    /// Look up a name in this vocabulary only.
    pub fn get(&self, name: &str) -> Option<WordId> {
        self.hmnym.get(name).copied()
    }
}

/// The dictionary of all vocabularies and words.  Words and vocabularies live in arenas and refer
/// to each other by handle, so forgetting a word only unlinks it.  Instructions already holding its
/// handle stay valid.
pub struct Dictionary {
    words: Vec<Word>,
    vocabularies: Vec<Vocabulary>,
    vocabulary_names: HashMap<String, VocabularyId>,

    /// Where searches start.
    search: VocabularyId,

    /// Where new definitions go.
    definitions: VocabularyId,

    /// The compile-time-only vocabulary, which no other vocabulary may extend.
    compiler: VocabularyId,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    /// Create the dictionary with its pre-registered vocabularies.  Both the search and definition
    /// vocabularies start out as the root.
    pub fn new() -> Dictionary {
        let mut dictionary = Dictionary {
            words: Vec::new(),
            vocabularies: Vec::new(),
            vocabulary_names: HashMap::new(),
            search: VocabularyId(0),
            definitions: VocabularyId(0),
            compiler: VocabularyId(0),
        };

        let root = dictionary.register_vocabulary(ROOT_VOCABULARY, None);
        let compiler = dictionary.register_vocabulary(COMPILER_VOCABULARY, None);
        let _ = dictionary.register_vocabulary(USER_VOCABULARY, Some(root));

        dictionary.search = root;
        dictionary.definitions = root;
        dictionary.compiler = compiler;

        dictionary
    }

    fn register_vocabulary(&mut self, name: &str, prev: Option<VocabularyId>) -> VocabularyId {
        let id = VocabularyId(self.vocabularies.len());

        self.vocabularies.push(Vocabulary::new(name, prev));
        let _ = self.vocabulary_names.insert(name.to_string(), id);

        id
    }

    /// Create a new vocabulary extending the current definition vocabulary.  The new vocabulary
    /// keeps that parent for good, whatever happens to the definition pointer later.  Fails while
    /// defining into the compiler vocabulary, which must stay out of every search chain.
    pub fn new_vocabulary(&mut self, name: &str) -> error::Result<VocabularyId> {
        if self.vocabulary_names.contains_key(name) {
            return ScriptError::new_as_result(
                ErrorKind::DuplicateVocabulary,
                None,
                format!("Vocabulary {} is already defined.", name),
                None,
            );
        }

        if self.definitions == self.compiler {
            return ScriptError::new_as_result(
                ErrorKind::SealedVocabulary,
                None,
                format!(
                    "Vocabulary {} can't extend the {} vocabulary.",
                    name, COMPILER_VOCABULARY
                ),
                None,
            );
        }

        let prev = self.definitions;
        let id = self.register_vocabulary(name, Some(prev));

        debug!(
            "new vocabulary {} extending {}",
            name,
            self.vocabularies[prev.0].name
        );

        Ok(id)
    }

    /// Find a vocabulary by name.
    pub fn vocabulary_named(&self, name: &str) -> Option<VocabularyId> {
        self.vocabulary_names.get(name).copied()
    }

    fn require_vocabulary(&self, name: &str) -> error::Result<VocabularyId> {
        match self.vocabulary_named(name) {
            Some(id) => Ok(id),
            None => ScriptError::new_as_result(
                ErrorKind::UnknownVocabulary,
                None,
                format!("Vocabulary {} is not defined.", name),
                None,
            ),
        }
    }

    pub fn vocabulary(&self, id: VocabularyId) -> &Vocabulary {
        &self.vocabularies[id.0]
    }

    /// The vocabulary searches start from.
    pub fn search_vocabulary(&self) -> VocabularyId {
        self.search
    }

    /// The vocabulary new definitions are added to.
    pub fn definition_vocabulary(&self) -> VocabularyId {
        self.definitions
    }

    /// Point searches at the named vocabulary.
    pub fn set_search_vocabulary(&mut self, name: &str) -> error::Result<()> {
        self.search = self.require_vocabulary(name)?;
        Ok(())
    }

    /// Send new definitions to the named vocabulary.
    pub fn set_definition_vocabulary(&mut self, name: &str) -> error::Result<()> {
        self.definitions = self.require_vocabulary(name)?;
        Ok(())
    }

    /// Search and define in the named vocabulary.
    pub fn use_vocabulary(&mut self, name: &str) -> error::Result<()> {
        let id = self.require_vocabulary(name)?;

        self.search = id;
        self.definitions = id;

        Ok(())
    }

    /// The vocabularies visited by a search, in the order they are visited.
    pub fn search_order(&self) -> Vec<VocabularyId> {
        self.chain_from(self.search)
    }

    fn chain_from(&self, start: VocabularyId) -> Vec<VocabularyId> {
        let mut chain = Vec::new();
        let mut cursor = Some(start);

        while let Some(id) = cursor {
            chain.push(id);
            cursor = self.vocabularies[id.0].prev;
        }

        chain
    }

    /// Find the newest visible definition of a name, starting at the search vocabulary and walking
    /// back through the vocabularies it extends.
    pub fn search(&self, name: &str) -> Option<WordId> {
        self.search_from(self.search, name)
    }

    /// Same as search, but starting from an explicit vocabulary.  This is how compile-time-only
    /// words in the compiler vocabulary are reached.
    pub fn search_from(&self, start: VocabularyId, name: &str) -> Option<WordId> {
        let mut cursor = Some(start);

        while let Some(id) = cursor {
            let vocabulary = &self.vocabularies[id.0];

            if let Some(found) = vocabulary.hmnym.get(name) {
                return Some(*found);
            }

            cursor = vocabulary.prev;
        }

        None
    }

    /// Look up a word for compilation, failing if it can't be found.
    pub fn find_word(&self, name: &str) -> error::Result<WordId> {
        match self.search(name) {
            Some(id) => Ok(id),
            None => ScriptError::new_as_result(
                ErrorKind::UndefinedWord,
                None,
                format!("Word {} not found.", name),
                None,
            ),
        }
    }

    /// Define a new word in the definition vocabulary.  It shadows any earlier word of the same
    /// name there and becomes the vocabulary's newest definition.
    pub fn create(&mut self, name: &str, handler: Handler, body: ByteCode) -> WordId {
        let vocabulary_id = self.definitions;
        let id = WordId(self.words.len());

        if matches!(handler, Handler::AtomicSecondary)
            && body.iter().any(|instruction| instruction.op.is_jump())
        {
            warn!("atomic word {} contains jumps, they will fail when run", name);
        }

        let vocabulary = &mut self.vocabularies[vocabulary_id.0];

        let word = Word {
            location: SourceLocation::new(),
            name: name.to_string(),
            handler,
            body,
            prev: vocabulary.top,
            hmnym: vocabulary.hmnym.get(name).copied(),
            vocabulary: vocabulary_id,
            description: String::new(),
            signature: String::new(),
        };

        vocabulary.top = Some(id);
        let _ = vocabulary.hmnym.insert(name.to_string(), id);

        debug!(
            "created {} word {} {} in {}",
            handler, name, id, vocabulary.name
        );

        self.words.push(word);
        id
    }

    /// Forget the newest definition of a name in the definition vocabulary, along with every word
    /// defined after it there.  Earlier homonyms become visible again.  Unknown names are ignored.
    ///
    /// Returns how many words were unlinked.
    pub fn forget(&mut self, name: &str) -> usize {
        let vocabulary_id = self.definitions;
        let target = match self.vocabularies[vocabulary_id.0].hmnym.get(name) {
            Some(target) => *target,
            None => return 0,
        };

        let mut removed = 0;
        let mut cursor = self.vocabularies[vocabulary_id.0].top;

        while let Some(current) = cursor {
            let word = &self.words[current.0];
            let vocabulary = &mut self.vocabularies[vocabulary_id.0];

            match word.hmnym {
                Some(older) => {
                    let _ = vocabulary.hmnym.insert(word.name.clone(), older);
                }
                None => {
                    let _ = vocabulary.hmnym.remove(&word.name);
                }
            }

            removed += 1;
            cursor = word.prev;

            if current == target {
                break;
            }
        }

        self.vocabularies[vocabulary_id.0].top = self.words[target.0].prev;

        debug!(
            "forgot {} and {} later word(s) in {}",
            name,
            removed - 1,
            self.vocabularies[vocabulary_id.0].name
        );

        removed
    }

    pub fn word(&self, id: WordId) -> &Word {
        &self.words[id.0]
    }

    pub fn word_mut(&mut self, id: WordId) -> &mut Word {
        &mut self.words[id.0]
    }

    /// Show a word's header and, for secondaries, its body.
    pub fn describe(&self, id: WordId) -> String {
        let word = self.word(id);
        let mut text = format!(
            "{} ({}, {}) {} -- {}\n",
            word.name,
            self.vocabularies[word.vocabulary.0].name,
            word.handler,
            word.signature,
            word.description
        );

        if !word.body.is_empty() {
            text += &pretty_print_code(self, &word.body);
        }

        text
    }

    /// The words visible through the search chain, each name once, nearest definition wins.
    pub fn visible_words(&self) -> Vec<WordId> {
        let mut seen = HashMap::new();

        for vocabulary_id in self.search_order() {
            for (name, id) in self.vocabularies[vocabulary_id.0].hmnym.iter() {
                let _ = seen.entry(name.clone()).or_insert(*id);
            }
        }

        let mut words: Vec<WordId> = seen.into_values().collect();
        words.sort_by(|a, b| self.word(*a).name.cmp(&self.word(*b).name));

        words
    }
}

/// Pretty print the words visible from the search vocabulary.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let words = self.visible_words();
        let max_size = words
            .iter()
            .map(|id| self.word(*id).name.len())
            .max()
            .unwrap_or(0);

        writeln!(formatter, "{} words visible.\n", words.len())?;

        for id in words {
            let word = self.word(id);

            writeln!(
                formatter,
                "{:width$}  {:10}  {:9}  --  {}",
                word.name,
                self.vocabularies[word.vocabulary.0].name,
                word.handler.to_string(),
                word.description,
                width = max_size
            )?;
        }

        Ok(())
    }
}
