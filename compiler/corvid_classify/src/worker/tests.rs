#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use corvid_ir::{CancellationToken, Cancelled, Span};
use corvid_parse::parse;
use corvid_syntax::{SyntaxKind, SyntaxToken};
use pretty_assertions::assert_eq;

use crate::syntactic::{CommentClassifier, DirectiveClassifier, TokenClassifier};
use crate::{
    classify, ClassificationContext, ClassificationType, ClassifiedSpan, ClassifierRegistry,
    SyntaxClassifier,
};

/// Tags every identifier with a fixed tag, and optionally an empty span.
struct Tagger {
    ty: ClassificationType,
    empty_span: bool,
}

impl SyntaxClassifier for Tagger {
    fn name(&self) -> &'static str {
        "tagger"
    }

    fn handles_token(&self, kind: SyntaxKind) -> bool {
        kind == SyntaxKind::IDENT
    }

    fn classify_token(
        &self,
        token: SyntaxToken<'_>,
        _cx: &ClassificationContext<'_>,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        out.push(ClassifiedSpan::new(token.span(), self.ty));
        if self.empty_span {
            out.push(ClassifiedSpan::new(
                Span::point(token.span().start),
                self.ty,
            ));
        }
        Ok(())
    }
}

fn tagger(tag: &'static str) -> Arc<dyn SyntaxClassifier> {
    Arc::new(Tagger {
        ty: ClassificationType::new(tag),
        empty_span: false,
    })
}

fn texts<'s>(source: &'s str, spans: &[ClassifiedSpan]) -> Vec<(&'s str, &'static str)> {
    spans
        .iter()
        .map(|classified| (&source[classified.span.to_range()], classified.ty.as_str()))
        .collect()
}

fn classify_all(source: &str, registry: &ClassifierRegistry) -> Vec<ClassifiedSpan> {
    let parse = parse(source);
    let root = parse.syntax();
    classify(
        root,
        &[root.full_span()],
        registry,
        None,
        &CancellationToken::new(),
    )
    .unwrap()
}

fn tokens_only() -> ClassifierRegistry {
    ClassifierRegistry::new().with(Arc::new(TokenClassifier))
}

#[test]
fn results_follow_document_order() {
    let source = "class C { int x; }";
    let spans = classify_all(source, &tokens_only());
    assert_eq!(
        texts(source, &spans),
        [
            ("class", "keyword"),
            ("C", "identifier"),
            ("{", "punctuation"),
            ("int", "keyword"),
            ("x", "identifier"),
            (";", "punctuation"),
            ("}", "punctuation"),
        ]
    );
}

#[test]
fn trivia_is_visited_around_its_token() {
    let source = "// one\nclass C { } /* two */";
    let registry = tokens_only().with(Arc::new(CommentClassifier));
    let spans = classify_all(source, &registry);
    assert_eq!(
        texts(source, &spans),
        [
            ("// one", "comment"),
            ("class", "keyword"),
            ("C", "identifier"),
            ("{", "punctuation"),
            ("}", "punctuation"),
            ("/* two */", "comment"),
        ]
    );
}

#[test]
fn structured_trivia_is_walked_as_a_node() {
    let source = "#region Setup\nclass C { }";
    let registry = ClassifierRegistry::new().with(Arc::new(DirectiveClassifier));
    let spans = classify_all(source, &registry);
    assert_eq!(
        texts(source, &spans),
        [
            ("#region", "preprocessor keyword"),
            ("Setup", "preprocessor text"),
        ]
    );
}

#[test]
fn duplicate_pairs_are_reported_once() {
    let source = "class C { int x; }";
    let registry = ClassifierRegistry::new()
        .with(tagger("name"))
        .with(tagger("name"))
        .with(tagger("other"));
    let first = classify_all(source, &registry);
    assert_eq!(
        texts(source, &first),
        [
            ("C", "name"),
            ("C", "other"),
            ("x", "name"),
            ("x", "other"),
        ]
    );

    let second = classify_all(source, &registry);
    assert_eq!(first, second);
}

#[test]
fn empty_spans_and_empty_tags_are_dropped() {
    let source = "class C { }";
    let registry = ClassifierRegistry::new()
        .with(Arc::new(Tagger {
            ty: ClassificationType::new("name"),
            empty_span: true,
        }))
        .with(tagger(""));
    let spans = classify_all(source, &registry);
    assert_eq!(texts(source, &spans), [("C", "name")]);
}

#[test]
fn only_elements_intersecting_a_target_are_classified() {
    let source = "class A { }\nclass B { }";
    let parse = parse(source);
    let b = u32::try_from(source.find('B').unwrap()).unwrap();
    let spans = classify(
        parse.syntax(),
        &[Span::new(b, b + 1)],
        &tokens_only(),
        None,
        &CancellationToken::new(),
    )
    .unwrap();
    assert_eq!(texts(source, &spans), [("B", "identifier")]);
}

#[test]
fn several_targets_are_honored_in_document_order() {
    let source = "class A { }\nclass B { }";
    let parse = parse(source);
    let a = u32::try_from(source.find('A').unwrap()).unwrap();
    let b = u32::try_from(source.find('B').unwrap()).unwrap();
    let spans = classify(
        parse.syntax(),
        &[Span::new(b, b + 1), Span::new(a, a + 1)],
        &tokens_only(),
        None,
        &CancellationToken::new(),
    )
    .unwrap();
    assert_eq!(
        texts(source, &spans),
        [("A", "identifier"), ("B", "identifier")]
    );
}

#[test]
fn no_targets_classify_nothing() {
    let parse = parse("class C { }");
    let spans = classify(
        parse.syntax(),
        &[],
        &tokens_only(),
        None,
        &CancellationToken::new(),
    )
    .unwrap();
    assert!(spans.is_empty());
}

#[test]
fn cancellation_stops_the_walk() {
    let parse = parse("class C { int x; }");
    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = classify(
        parse.syntax(),
        &[parse.syntax().full_span()],
        &tokens_only(),
        None,
        &cancel,
    );
    assert_eq!(result, Err(Cancelled));

    let spans = classify_all("class C { int x; }", &tokens_only());
    assert_eq!(spans.len(), 7);
}

#[test]
fn recycled_stacks_are_empty() {
    let parse = parse("class C { }");
    let stack = vec![super::WorkItem::Node(parse.syntax()); 3];
    let recycled: Vec<super::WorkItem<'static>> = super::recycle(stack);
    assert!(recycled.is_empty());
}

#[test]
fn deeply_nested_trees_do_not_overflow() {
    let depth = 2_000;
    let source = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let spans = classify_all(&source, &tokens_only());
    let parens = spans
        .iter()
        .filter(|classified| classified.ty == ClassificationType::PUNCTUATION)
        .count();
    assert_eq!(parens, depth * 2 + 1);
    assert_eq!(
        spans.last().map(|classified| classified.span.end),
        u32::try_from(source.len()).ok()
    );
}
