//! The classification walk.
//!
//! [`classify`] visits the elements of a tree whose full span intersects one
//! of the target spans, in document order, with an explicit work stack:
//!
//! - a node runs its classifiers, then its children are pushed in reverse;
//! - a token expands into its leading trivia, its own text, then its trailing
//!   trivia; structured trivia (preprocessor directives) is walked as a node;
//! - every classifier's output is merged right after it runs, dropping empty
//!   spans and empty tags and every `(span, tag)` pair already reported.
//!
//! Cancellation is checked before every pop.

use corvid_ir::{CancellationToken, Cancelled, Span};
use corvid_syntax::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTrivia};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::pool::{ObjectPool, Pooled};
use crate::semantic::SemanticModel;
use crate::{ClassificationContext, ClassifiedSpan, ClassifierRegistry};

static SCRATCH: ObjectPool<Vec<ClassifiedSpan>> = ObjectPool::new(16);
static SEEN: ObjectPool<FxHashSet<ClassifiedSpan>> = ObjectPool::new(16);
static STACKS: ObjectPool<Vec<WorkItem<'static>>> = ObjectPool::new(16);

#[derive(Copy, Clone, Debug)]
enum WorkItem<'a> {
    Node(SyntaxNode<'a>),
    /// A token and its trivia, not yet expanded.
    Token(SyntaxToken<'a>),
    /// The text of a token whose leading trivia has been handled.
    TokenText(SyntaxToken<'a>),
    Trivia(SyntaxTrivia<'a>),
}

/// Classify the parts of `root` that intersect `targets`.
///
/// The result is in traversal order and holds no duplicate pairs. With no
/// targets nothing is classified.
#[tracing::instrument(level = "debug", skip_all, fields(targets = targets.len()))]
pub fn classify(
    root: SyntaxNode<'_>,
    targets: &[Span],
    registry: &ClassifierRegistry,
    semantic: Option<&dyn SemanticModel>,
    cancel: &CancellationToken,
) -> Result<Vec<ClassifiedSpan>, Cancelled> {
    let cx = ClassificationContext::new(root, semantic, cancel);
    let mut worker = Worker {
        registry,
        cx,
        targets,
        output: Vec::new(),
        seen: SEEN.take(),
        scratch: SCRATCH.take(),
    };
    match worker.run(root) {
        Ok(()) => {
            tracing::debug!(spans = worker.output.len(), "classified");
            Ok(worker.output)
        }
        Err(cancelled) => {
            tracing::debug!("classification cancelled");
            Err(cancelled)
        }
    }
}

struct Worker<'a, 'r> {
    registry: &'r ClassifierRegistry,
    cx: ClassificationContext<'a>,
    targets: &'r [Span],
    output: Vec<ClassifiedSpan>,
    seen: Pooled<'static, FxHashSet<ClassifiedSpan>>,
    scratch: Pooled<'static, Vec<ClassifiedSpan>>,
}

/// Empty `stack` so it can be reused for a tree of any lifetime. The
/// in-place collect keeps the allocation.
fn recycle<'b>(stack: Vec<WorkItem<'_>>) -> Vec<WorkItem<'b>> {
    stack.into_iter().filter_map(|_| None).collect()
}

impl<'a> Worker<'a, '_> {
    fn run(&mut self, root: SyntaxNode<'a>) -> Result<(), Cancelled> {
        let mut pooled = STACKS.take();
        let mut stack: Vec<WorkItem<'a>> = std::mem::take(&mut *pooled);
        stack.push(WorkItem::Node(root));
        let result = self.walk(&mut stack);
        *pooled = recycle(stack);
        result
    }

    fn walk(&mut self, stack: &mut Vec<WorkItem<'a>>) -> Result<(), Cancelled> {
        let cancel = self.cx.cancel();
        loop {
            cancel.check()?;
            let Some(item) = stack.pop() else {
                return Ok(());
            };
            match item {
                WorkItem::Node(node) => {
                    if !self.wanted(node.full_span()) {
                        continue;
                    }
                    self.visit_node(node)?;
                    stack.extend(node.children().rev().map(|child| match child {
                        SyntaxElement::Node(node) => WorkItem::Node(node),
                        SyntaxElement::Token(token) => WorkItem::Token(token),
                    }));
                }
                WorkItem::Token(token) => {
                    if !self.wanted(token.full_span()) {
                        continue;
                    }
                    let trailing: SmallVec<[_; 4]> = token.trailing_trivia().collect();
                    stack.extend(trailing.into_iter().rev().map(WorkItem::Trivia));
                    stack.push(WorkItem::TokenText(token));
                    let leading: SmallVec<[_; 4]> = token.leading_trivia().collect();
                    stack.extend(leading.into_iter().rev().map(WorkItem::Trivia));
                }
                WorkItem::TokenText(token) => {
                    if self.wanted(token.span()) {
                        self.visit_token(token)?;
                    }
                }
                WorkItem::Trivia(trivia) => {
                    if !self.wanted(trivia.span()) {
                        continue;
                    }
                    match trivia.structure() {
                        Some(structure) => stack.push(WorkItem::Node(structure)),
                        None => self.visit_trivia(trivia)?,
                    }
                }
            }
        }
    }

    fn wanted(&self, span: Span) -> bool {
        self.targets.iter().any(|target| target.intersects(span))
    }

    fn visit_node(&mut self, node: SyntaxNode<'a>) -> Result<(), Cancelled> {
        let registry = self.registry;
        for classifier in registry.node_classifiers(node.kind()) {
            classifier.classify_node(node, &self.cx, &mut self.scratch)?;
            self.flush();
        }
        Ok(())
    }

    fn visit_token(&mut self, token: SyntaxToken<'a>) -> Result<(), Cancelled> {
        let registry = self.registry;
        for classifier in registry.token_classifiers(token.kind()) {
            classifier.classify_token(token, &self.cx, &mut self.scratch)?;
            self.flush();
        }
        Ok(())
    }

    fn visit_trivia(&mut self, trivia: SyntaxTrivia<'a>) -> Result<(), Cancelled> {
        let registry = self.registry;
        for classifier in registry.token_classifiers(trivia.kind()) {
            classifier.classify_trivia(trivia, &self.cx, &mut self.scratch)?;
            self.flush();
        }
        Ok(())
    }

    /// Move the scratch output of one classifier into the result.
    fn flush(&mut self) {
        for classified in self.scratch.drain(..) {
            if classified.span.is_empty() || classified.ty.is_empty() {
                continue;
            }
            if self.seen.insert(classified) {
                self.output.push(classified);
            }
        }
    }
}

#[cfg(test)]
mod tests;
