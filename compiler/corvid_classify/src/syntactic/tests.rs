#![allow(clippy::unwrap_used)]

use corvid_ir::CancellationToken;
use corvid_parse::parse;
use pretty_assertions::assert_eq;

use crate::{classify, ClassificationOptions, ClassifierRegistry};

fn classify_syntactic(source: &str) -> Vec<(&str, &'static str)> {
    let parse = parse(source);
    let root = parse.syntax();
    let registry = ClassifierRegistry::builtin(&ClassificationOptions::syntactic());
    classify(
        root,
        &[root.full_span()],
        &registry,
        None,
        &CancellationToken::new(),
    )
    .unwrap()
    .into_iter()
    .map(|classified| (&source[classified.span.to_range()], classified.ty.as_str()))
    .collect()
}

#[test]
fn tokens_are_classified_by_kind() {
    assert_eq!(
        classify_syntactic("void M() { if (x) return 1.5; }"),
        [
            ("M", "method name"),
            ("void", "keyword"),
            ("M", "identifier"),
            ("(", "punctuation"),
            (")", "punctuation"),
            ("{", "punctuation"),
            ("if", "keyword - control"),
            ("(", "punctuation"),
            ("x", "identifier"),
            (")", "punctuation"),
            ("return", "keyword - control"),
            ("1.5", "number"),
            (";", "punctuation"),
            ("}", "punctuation"),
        ]
    );
}

#[test]
fn literals_and_operators() {
    assert_eq!(
        classify_syntactic("x = \"s\" + 'c';"),
        [
            ("x", "identifier"),
            ("=", "operator"),
            ("\"s\"", "string"),
            ("+", "operator"),
            ("'c'", "string"),
            (";", "punctuation"),
        ]
    );
}

#[test]
fn declaration_names_follow_their_declaring_node() {
    let source = "\
struct Point { static int count; const int Max = 3; }
class C {
    C(int seed) { }
    void Run() {
        int total = 0;
        retry: goto retry;
        try { } catch (Exception e) { }
    }
}";
    let names: Vec<_> = classify_syntactic(source)
        .into_iter()
        .filter(|(_, tag)| tag.ends_with(" name"))
        .collect();
    assert_eq!(
        names,
        [
            ("Point", "struct name"),
            ("count", "field name"),
            ("Max", "field name"),
            ("C", "class name"),
            ("C", "class name"),
            ("seed", "parameter name"),
            ("Run", "method name"),
            ("total", "local name"),
            ("retry", "label name"),
            ("retry", "label name"),
            ("e", "local name"),
        ]
    );
}

#[test]
fn directives_split_keyword_and_text() {
    let source = "#if DEBUG\n// note\nint x;\n#endif\n";
    let classified = classify_syntactic(source);
    assert!(classified.contains(&("#if", "preprocessor keyword")));
    assert!(classified.contains(&("DEBUG", "preprocessor text")));
    assert!(classified.contains(&("#endif", "preprocessor keyword")));
    assert!(classified.contains(&("// note", "comment")));
}

#[test]
fn missing_tokens_are_not_classified() {
    let classified = classify_syntactic("class { }");
    assert_eq!(
        classified,
        [
            ("class", "keyword"),
            ("{", "punctuation"),
            ("}", "punctuation"),
        ]
    );
}
