//! Whole-document classification through the public API.

#![allow(clippy::unwrap_used)]

use corvid_classify::{
    classify, ClassificationOptions, ClassificationType, ClassifiedSpan, ClassifierRegistry,
    DeclarationIndex,
};
use corvid_ir::{CancellationToken, Span};
use corvid_parse::parse;
use proptest::prelude::*;
use rustc_hash::FxHashSet;

const FRAGMENTS: &[&str] = &[
    "int a = 1;\n",
    "x = y + 2 * z;\n",
    "if (a) { b(); } else c = 3;\n",
    "// note\n",
    "class K { static int f; void M(int p) { return; } }\n",
    "#region R\n",
    "#endregion\n",
    "switch (s) { case 1: break; default: goto end; }\n",
    "string t = \"{\\\"k\\\": [1, true]}\";\n",
    "string u = /* lang=json */ \"[2]\";\n",
    "end: ;\n",
    "try { } catch (E e) { } finally { }\n",
];

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 1..10).prop_map(|parts| parts.concat())
}

fn classify_span(source: &str, targets: &[Span]) -> Vec<ClassifiedSpan> {
    let parse = parse(source);
    let root = parse.syntax();
    let index = DeclarationIndex::build(root);
    let registry = ClassifierRegistry::builtin(&ClassificationOptions::default());
    classify(
        root,
        targets,
        &registry,
        Some(&index),
        &CancellationToken::new(),
    )
    .unwrap()
}

fn whole(source: &str) -> Span {
    Span::new(0, u32::try_from(source.len()).unwrap())
}

proptest! {
    #[test]
    fn classification_is_idempotent_and_duplicate_free(source in document()) {
        let first = classify_span(&source, &[whole(&source)]);
        let second = classify_span(&source, &[whole(&source)]);
        prop_assert_eq!(&first, &second);

        let unique: FxHashSet<_> = first.iter().copied().collect();
        prop_assert_eq!(unique.len(), first.len());
        prop_assert!(first.iter().all(|classified| !classified.span.is_empty()));
    }

    #[test]
    fn restricted_classification_is_part_of_the_full_one(
        (source, start, len) in document().prop_flat_map(|doc| {
            let max = doc.len();
            (Just(doc), 0..=max).prop_flat_map(move |(doc, start)| {
                (Just(doc), Just(start), 0..=(max - start))
            })
        })
    ) {
        let full: FxHashSet<_> = classify_span(&source, &[whole(&source)]).into_iter().collect();
        let start = u32::try_from(start).unwrap();
        let target = Span::new(start, start + u32::try_from(len).unwrap());
        let partial = classify_span(&source, &[target]);
        for classified in &partial {
            prop_assert!(full.contains(classified), "{} missing from full run", classified);
        }
    }
}

#[test]
fn a_small_program_classifies_end_to_end() {
    let source = "\
class Greeter {
    static string greeting = \"{\\\"text\\\": \\\"hi\\\"}\";
    void Greet() { print(greeting); }
}";
    let spans = classify_span(source, &[whole(source)]);
    let tags_of = |needle: &str, nth: usize| -> Vec<&'static str> {
        let (offset, _) = source.match_indices(needle).nth(nth).unwrap();
        let start = u32::try_from(offset).unwrap();
        spans
            .iter()
            .filter(|classified| classified.span.start == start)
            .map(|classified| classified.ty.as_str())
            .collect()
    };

    assert_eq!(tags_of("class", 0), ["keyword"]);
    assert_eq!(tags_of("Greeter", 0), ["class name", "identifier"]);
    assert_eq!(
        tags_of("greeting", 1),
        ["identifier", "field name", "static symbol"]
    );
    assert_eq!(tags_of("print", 0), ["identifier"]);
    let property = u32::try_from(source.find("\\\"text\\\"").unwrap()).unwrap();
    assert!(spans.contains(&ClassifiedSpan::new(
        Span::at(property, 8),
        ClassificationType::JSON_PROPERTY_NAME,
    )));
}
