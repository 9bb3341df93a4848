//! Soundness of syntactic change ranges over incremental reparses.
//!
//! For any single edit, the change range between the old tree and the
//! reparsed tree must contain the edited region, and splicing the new text of
//! the range into the old text must reproduce the new document.

use corvid_ir::{CancellationToken, Span};
use corvid_parse::{parse, reparse};
use corvid_syntax::{compute_change_range, ChangeRange, ChangeRangeOptions, TextChange};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "int a = 1;\n",
    "x = y + 2 * z;\n",
    "if (a) { b(); } else c = 3;\n",
    "while (c > 0) c--;\n",
    "// note\n",
    "class K { int f; void M() { return; } }\n",
    "#region R\n",
    "switch (s) { case 1: break; default: goto end; }\n",
    "string t = \"hi\";\n",
    "end: ;\n",
];

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 1..12).prop_map(|parts| parts.concat())
}

fn edit() -> impl Strategy<Value = (String, usize, usize, String)> {
    document().prop_flat_map(|doc| {
        let len = doc.len();
        (Just(doc), 0..=len).prop_flat_map(|(doc, start)| {
            let max_delete = (doc.len() - start).min(12);
            (
                Just(doc),
                Just(start),
                0..=max_delete,
                "[a-z0-9 ;{}()=+\"\n]{0,8}",
            )
        })
    })
}

fn change_range_for(old_text: &str, change: &TextChange) -> (ChangeRange, String) {
    let old = parse(old_text);
    let new = match reparse(&old, change) {
        Ok(new) => new,
        Err(err) => panic!("edit should apply: {err}"),
    };
    let new_text = new.text();
    assert_eq!(new.green(), parse(&new_text).green(), "reuse must not change the tree");
    let range = compute_change_range(
        old.green(),
        new.green(),
        &ChangeRangeOptions::default(),
        &CancellationToken::new(),
    );
    match range {
        Ok(range) => {
            assert!(range.span.end as usize <= old_text.len());
            assert!((range.span.start + range.new_len) as usize <= new_text.len());
            (range, new_text)
        }
        Err(_) => panic!("not cancelled"),
    }
}

proptest! {
    #[test]
    fn change_range_contains_the_edit((doc, start, delete, insert) in edit()) {
        prop_assume!(doc[start..start + delete] != insert);
        let span = Span::new(
            u32::try_from(start).unwrap_or(u32::MAX),
            u32::try_from(start + delete).unwrap_or(u32::MAX),
        );
        let change = TextChange::new(span, insert);
        let (range, new_text) = change_range_for(&doc, &change);

        prop_assert!(range.span.contains_span(span), "{range:?} does not contain {span:?}");

        let old_start = range.span.start as usize;
        let old_end = range.span.end as usize;
        let replacement = &new_text[old_start..old_start + range.new_len as usize];
        let spliced = format!("{}{}{}", &doc[..old_start], replacement, &doc[old_end..]);
        prop_assert_eq!(spliced, new_text);
    }
}

#[test]
fn identical_reparse_has_empty_range() {
    let doc = FRAGMENTS.concat();
    let old = parse(&doc);
    let same = corvid_parse::reparse_text(&old, &doc);
    let range = compute_change_range(
        old.green(),
        same.green(),
        &ChangeRangeOptions::default(),
        &CancellationToken::new(),
    );
    assert_eq!(range, Ok(ChangeRange::NONE));
}
