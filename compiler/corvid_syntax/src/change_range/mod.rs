//! Syntactic change ranges.
//!
//! Given the trees of two versions of a document, find the smallest region of
//! the old text outside of which both trees are incrementally identical. The
//! sweeps only trust pointer identity: two subtrees that merely look the same
//! are treated as changed, which keeps the result sound at the cost of
//! precision.
//!
//! The answer is allowed to be coarse. If the sweep takes longer than
//! [`ChangeRangeOptions::timeout`] it stops and reports what it has, which only
//! widens the range.

use std::time::{Duration, Instant};

use corvid_ir::{CancellationToken, Cancelled, Span};

use crate::green::{GreenElement, GreenNode};

/// Region of the old text that was replaced, and the length of its
/// replacement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChangeRange {
    pub span: Span,
    pub new_len: u32,
}

impl ChangeRange {
    pub const NONE: ChangeRange = ChangeRange {
        span: Span::DUMMY,
        new_len: 0,
    };

    pub const fn new(span: Span, new_len: u32) -> Self {
        ChangeRange { span, new_len }
    }

    /// No text changed.
    pub const fn is_empty(&self) -> bool {
        self.span.is_empty() && self.new_len == 0
    }

    /// The replaced region, in new-text coordinates.
    pub const fn new_span(&self) -> Span {
        Span::at(self.span.start, self.new_len)
    }

    pub fn delta(&self) -> i64 {
        i64::from(self.new_len) - i64::from(self.span.len())
    }

    /// Map a span of the old text into the new text.
    ///
    /// Spans ending before the change are unchanged and spans starting after
    /// it are shifted. Spans that touch the changed region have no
    /// counterpart.
    pub fn adjust_span(&self, span: Span) -> Option<Span> {
        if self.is_empty() || span.end < self.span.start {
            Some(span)
        } else if span.start > self.span.end {
            Some(span.shift(self.delta()))
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeRangeOptions {
    /// Upper bound on the time spent in each sweep.
    pub timeout: Duration,
}

impl ChangeRangeOptions {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ChangeRangeOptions {
    fn default() -> Self {
        ChangeRangeOptions {
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// Compute the change range between two versions of a tree.
///
/// Cancellation is checked once per visited element.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(old_width = old.full_width(), new_width = new.full_width())
)]
pub fn compute_change_range(
    old: &GreenNode,
    new: &GreenNode,
    options: &ChangeRangeOptions,
    cancel: &CancellationToken,
) -> Result<ChangeRange, Cancelled> {
    if old.ptr_eq(new) {
        return Ok(ChangeRange::NONE);
    }

    let started = Instant::now();
    let deadline = started + options.timeout;
    let old_width = old.full_width();
    let new_width = new.full_width();

    let left = common_width(old, new, Direction::Left, deadline, cancel)?;
    let mut right = common_width(old, new, Direction::Right, deadline, cancel)?;

    // Both sweeps may claim the same text.
    if left + right > old_width {
        right = old_width - left;
    }
    if left + right > new_width {
        right = new_width - left;
    }

    let range = ChangeRange::new(Span::new(left, old_width - right), new_width - left - right);
    tracing::debug!(
        old_width,
        new_width,
        left,
        right,
        elapsed_us = started.elapsed().as_micros(),
        "computed change range"
    );
    Ok(range)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

struct SweepStack<'a> {
    elements: Vec<&'a GreenElement>,
    direction: Direction,
}

impl<'a> SweepStack<'a> {
    fn new(root: &'a GreenNode, direction: Direction) -> Self {
        let mut stack = SweepStack {
            elements: Vec::new(),
            direction,
        };
        stack.push_children(root);
        stack
    }

    // The element to visit next ends up on top.
    fn push_children(&mut self, node: &'a GreenNode) {
        match self.direction {
            Direction::Left => self.elements.extend(node.children().iter().rev()),
            Direction::Right => self.elements.extend(node.children().iter()),
        }
    }

    fn peek(&self) -> Option<&'a GreenElement> {
        self.elements.last().copied()
    }

    fn pop(&mut self) -> Option<&'a GreenElement> {
        self.elements.pop()
    }
}

fn common_width(
    old: &GreenNode,
    new: &GreenNode,
    direction: Direction,
    deadline: Instant,
    cancel: &CancellationToken,
) -> Result<u32, Cancelled> {
    let mut old_stack = SweepStack::new(old, direction);
    let mut new_stack = SweepStack::new(new, direction);
    let mut width = 0u32;

    loop {
        cancel.check()?;
        if Instant::now() >= deadline {
            tracing::debug!(?direction, width, "change range sweep timed out");
            return Ok(width);
        }
        let (Some(old_top), Some(new_top)) = (old_stack.peek(), new_stack.peek()) else {
            return Ok(width);
        };

        if old_top.is_incrementally_identical(new_top) {
            width += old_top.full_width();
            old_stack.pop();
            new_stack.pop();
            continue;
        }

        match (old_top, new_top) {
            (GreenElement::Node(old_node), GreenElement::Node(new_node)) => {
                old_stack.pop();
                new_stack.pop();
                old_stack.push_children(old_node);
                new_stack.push_children(new_node);
            }
            _ => return Ok(width),
        }
    }
}

#[cfg(test)]
mod tests;
