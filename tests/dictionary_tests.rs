// Dictionary behavior: shadowing, forgetting and vocabulary chains.

use test_case::test_case;
use tforth::runtime::{
    data_structures::dictionary::{
        COMPILER_VOCABULARY, Dictionary, Handler, ROOT_VOCABULARY, USER_VOCABULARY, WordId,
    },
    error::ErrorKind,
};

fn define(dictionary: &mut Dictionary, name: &str) -> WordId {
    dictionary.create(name, Handler::AtomicSecondary, Vec::new())
}

fn vocabulary_name(dictionary: &Dictionary, name: &str) -> Option<String> {
    dictionary
        .vocabulary_named(name)
        .map(|id| dictionary.vocabulary(id).name().clone())
}

#[test]
fn starts_in_the_root_vocabulary() {
    let dictionary = Dictionary::new();
    let root = dictionary.vocabulary_named(ROOT_VOCABULARY);

    assert_eq!(Some(dictionary.search_vocabulary()), root);
    assert_eq!(Some(dictionary.definition_vocabulary()), root);
}

#[test_case(ROOT_VOCABULARY, None; "root has no parent")]
#[test_case(COMPILER_VOCABULARY, None; "compiler has no parent")]
#[test_case(USER_VOCABULARY, Some(ROOT_VOCABULARY); "user extends root")]
fn pre_registered_vocabularies(name: &str, parent: Option<&str>) {
    let dictionary = Dictionary::new();
    let id = dictionary.vocabulary_named(name).unwrap();

    let prev = dictionary
        .vocabulary(id)
        .prev()
        .map(|prev| dictionary.vocabulary(prev).name().clone());

    assert_eq!(prev.as_deref(), parent);
    assert_eq!(vocabulary_name(&dictionary, name).as_deref(), Some(name));
}

#[test]
fn newer_definition_shadows_older() {
    let mut dictionary = Dictionary::new();

    let first = define(&mut dictionary, "dup");
    let second = define(&mut dictionary, "dup");

    assert_ne!(first, second);
    assert_eq!(dictionary.search("dup"), Some(second));
    assert_eq!(dictionary.word(second).hmnym(), Some(first));
    assert_eq!(dictionary.word(second).prev(), Some(first));
}

#[test]
fn forget_removes_later_definitions() {
    let mut dictionary = Dictionary::new();

    let a = define(&mut dictionary, "a");
    let _ = define(&mut dictionary, "b");
    let _ = define(&mut dictionary, "c");

    assert_eq!(dictionary.forget("b"), 2);

    assert_eq!(dictionary.search("a"), Some(a));
    assert_eq!(dictionary.search("b"), None);
    assert_eq!(dictionary.search("c"), None);

    let root = dictionary.definition_vocabulary();
    assert_eq!(dictionary.vocabulary(root).top(), Some(a));
}

#[test]
fn forget_restores_the_older_homonym() {
    let mut dictionary = Dictionary::new();

    let older = define(&mut dictionary, "x");
    let y = define(&mut dictionary, "y");
    let _ = define(&mut dictionary, "x");

    assert_eq!(dictionary.forget("x"), 1);
    assert_eq!(dictionary.search("x"), Some(older));
    assert_eq!(dictionary.search("y"), Some(y));

    assert_eq!(dictionary.forget("x"), 2);
    assert_eq!(dictionary.search("x"), None);
    assert_eq!(dictionary.search("y"), None);
}

#[test]
fn forgotten_words_stay_addressable() {
    let mut dictionary = Dictionary::new();

    let word = define(&mut dictionary, "gone");
    let _ = dictionary.forget("gone");

    assert_eq!(dictionary.word(word).name(), "gone");
}

#[test_case("missing"; "name never defined")]
#[test_case(""; "empty name")]
fn forget_of_unknown_name_is_a_no_op(name: &str) {
    let mut dictionary = Dictionary::new();
    let a = define(&mut dictionary, "a");

    assert_eq!(dictionary.forget(name), 0);
    assert_eq!(dictionary.search("a"), Some(a));
}

#[test]
fn forget_only_touches_the_definition_vocabulary() {
    let mut dictionary = Dictionary::new();

    let in_root = define(&mut dictionary, "w");

    dictionary.use_vocabulary(USER_VOCABULARY).unwrap();
    let in_user = define(&mut dictionary, "w");

    assert_eq!(dictionary.search("w"), Some(in_user));

    assert_eq!(dictionary.forget("w"), 1);
    assert_eq!(dictionary.search("w"), Some(in_root));

    // Words only defined in the root can't be forgotten from the user vocabulary.
    assert_eq!(dictionary.forget("w"), 0);
    assert_eq!(dictionary.search("w"), Some(in_root));
}

#[test]
fn search_walks_the_vocabulary_chain() {
    let mut dictionary = Dictionary::new();

    let root_word = define(&mut dictionary, "base");
    dictionary.use_vocabulary(USER_VOCABULARY).unwrap();

    let order: Vec<String> = dictionary
        .search_order()
        .into_iter()
        .map(|id| dictionary.vocabulary(id).name().clone())
        .collect();

    assert_eq!(order, vec![USER_VOCABULARY, ROOT_VOCABULARY]);
    assert_eq!(dictionary.search("base"), Some(root_word));
}

#[test]
fn vocabulary_parent_is_fixed_at_creation() {
    let mut dictionary = Dictionary::new();

    let first = dictionary.new_vocabulary("first").unwrap();

    dictionary.set_definition_vocabulary(USER_VOCABULARY).unwrap();
    let second = dictionary.new_vocabulary("second").unwrap();

    dictionary.set_definition_vocabulary(ROOT_VOCABULARY).unwrap();

    let root = dictionary.vocabulary_named(ROOT_VOCABULARY);
    let user = dictionary.vocabulary_named(USER_VOCABULARY);

    assert_eq!(dictionary.vocabulary(first).prev(), root);
    assert_eq!(dictionary.vocabulary(second).prev(), user);
}

#[test_case("extra"; "new name")]
#[test_case(ROOT_VOCABULARY; "root")]
#[test_case(COMPILER_VOCABULARY; "compiler")]
fn duplicate_vocabulary_is_rejected(name: &str) {
    let mut dictionary = Dictionary::new();
    let _ = dictionary.new_vocabulary("extra").unwrap();

    let error = dictionary.new_vocabulary(name).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::DuplicateVocabulary);
}

#[test]
fn unknown_vocabulary_is_rejected() {
    let mut dictionary = Dictionary::new();

    let error = dictionary.set_search_vocabulary("nowhere").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnknownVocabulary);

    let error = dictionary.use_vocabulary("nowhere").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnknownVocabulary);
}

#[test]
fn compiler_words_are_not_searched() {
    let mut dictionary = Dictionary::new();

    dictionary.set_definition_vocabulary(COMPILER_VOCABULARY).unwrap();
    let immediate = define(&mut dictionary, "if");
    dictionary.set_definition_vocabulary(ROOT_VOCABULARY).unwrap();

    assert_eq!(dictionary.search("if"), None);

    dictionary.use_vocabulary(USER_VOCABULARY).unwrap();
    assert_eq!(dictionary.search("if"), None);

    let compiler = dictionary.vocabulary_named(COMPILER_VOCABULARY).unwrap();
    assert_eq!(dictionary.search_from(compiler, "if"), Some(immediate));
}

#[test]
fn find_word_reports_undefined_words() {
    let dictionary = Dictionary::new();

    let error = dictionary.find_word("nothing").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UndefinedWord);
}

#[test]
fn visible_words_prefer_the_nearest_definition() {
    let mut dictionary = Dictionary::new();

    let _ = define(&mut dictionary, "shared");
    let only_root = define(&mut dictionary, "root-only");

    dictionary.use_vocabulary(USER_VOCABULARY).unwrap();
    let shared = define(&mut dictionary, "shared");

    let visible = dictionary.visible_words();

    assert_eq!(visible, vec![only_root, shared]);
    assert!(dictionary.to_string().starts_with("2 words visible."));
}

#[test]
fn no_new_vocabulary_can_extend_the_compiler_vocabulary() {
    let mut dictionary = Dictionary::new();

    dictionary.set_definition_vocabulary(COMPILER_VOCABULARY).unwrap();
    let _ = define(&mut dictionary, "secret");

    let error = dictionary.new_vocabulary("ordinary").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::SealedVocabulary);
    assert_eq!(dictionary.vocabulary_named("ordinary"), None);

    // Vocabularies created anywhere else never reach the compiler words.
    dictionary.set_definition_vocabulary(USER_VOCABULARY).unwrap();
    let _ = dictionary.new_vocabulary("ordinary").unwrap();
    dictionary.use_vocabulary("ordinary").unwrap();

    assert_eq!(dictionary.search("secret"), None);

    let compiler = dictionary.vocabulary_named(COMPILER_VOCABULARY);
    assert!(!dictionary.search_order().iter().any(|id| Some(*id) == compiler));
}

#[test]
fn vocabulary_lookup_is_local() {
    let mut dictionary = Dictionary::new();

    let in_root = define(&mut dictionary, "local");
    let root = dictionary.definition_vocabulary();
    let user = dictionary.vocabulary_named(USER_VOCABULARY).unwrap();

    assert_eq!(dictionary.vocabulary(root).get("local"), Some(in_root));
    assert_eq!(dictionary.vocabulary(user).get("local"), None);
}
