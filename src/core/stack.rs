//! The automaton's shared, append-only context log.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::slice;

/// Append-only sequence of values shared by every guard, action and hook.
///
/// Despite the name, nothing is ever popped: the stack is an episodic log that
/// guards read arbitrary suffixes of.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextStack<V> {
    values: Vec<V>,
}

impl<V> Default for ContextStack<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ContextStack<V> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append a value. Always succeeds; returns `self` so calls can be chained.
    pub fn append(&mut self, value: V) -> &mut Self {
        self.values.push(value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[V] {
        &self.values
    }

    pub fn iter(&self) -> slice::Iter<'_, V> {
        self.values.iter()
    }

    pub fn last(&self) -> Option<&V> {
        self.values.last()
    }

    /// The last `n` entries, or the whole stack if it holds fewer.
    ///
    /// ```rust
    /// use dialomata::core::ContextStack;
    ///
    /// let mut stack = ContextStack::new();
    /// stack.append(-1).append(1).append(1);
    ///
    /// assert_eq!(stack.suffix(2), &[1, 1]);
    /// assert_eq!(stack.suffix(10), &[-1, 1, 1]);
    /// ```
    pub fn suffix(&self, n: usize) -> &[V] {
        let start = self.values.len().saturating_sub(n);
        &self.values[start..]
    }

    /// Whether the most recent entries equal `tail`, oldest first.
    pub fn ends_with(&self, tail: &[V]) -> bool
    where
        V: PartialEq,
    {
        self.values.ends_with(tail)
    }

    /// Render every value for diagnostics.
    pub fn render(&self) -> Vec<String>
    where
        V: Display,
    {
        self.values.iter().map(ToString::to_string).collect()
    }

    pub fn into_vec(self) -> Vec<V> {
        self.values
    }
}

impl<V> From<Vec<V>> for ContextStack<V> {
    fn from(values: Vec<V>) -> Self {
        Self { values }
    }
}

impl<'a, V> IntoIterator for &'a ContextStack<V> {
    type Item = &'a V;
    type IntoIter = slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_chains_and_preserves_order() {
        let mut stack = ContextStack::new();
        stack.append(1).append(0).append(-1);

        assert_eq!(stack.as_slice(), &[1, 0, -1]);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.last(), Some(&-1));
    }

    #[test]
    fn suffix_of_empty_stack_is_empty() {
        let stack: ContextStack<i32> = ContextStack::new();
        assert!(stack.suffix(3).is_empty());
        assert!(stack.is_empty());
    }

    #[test]
    fn ends_with_checks_recent_entries() {
        let stack = ContextStack::from(vec![0, 1, 1, 1]);

        assert!(stack.ends_with(&[1, 1, 1]));
        assert!(!stack.ends_with(&[0, 1]));
        assert!(stack.ends_with(&[]));
    }

    #[test]
    fn render_uses_display() {
        let stack = ContextStack::from(vec!["carrots", "exercise"]);
        assert_eq!(stack.render(), vec!["carrots", "exercise"]);
    }

    #[test]
    fn serializes_as_plain_sequence() {
        let stack = ContextStack::from(vec![1, -1]);
        assert_eq!(serde_json::to_string(&stack).unwrap(), "[1,-1]");
    }
}
