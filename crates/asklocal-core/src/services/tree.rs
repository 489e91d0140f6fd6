//! Answer reply trees.
//!
//! Answers are held in an arena keyed by id; the tree is rebuilt from each
//! answer's `parent_id` by indexing children at read time.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::Answer;

/// The answers of one question arranged as a reply forest.
#[derive(Debug, Clone, Default)]
pub struct AnswerThread {
    arena: BTreeMap<i32, Answer>,
    roots: Vec<i32>,
    children: BTreeMap<i32, Vec<i32>>,
}

impl AnswerThread {
    /// Index a flat list of answers. An answer whose parent is not in the list
    /// is treated as a root.
    pub fn build(answers: impl IntoIterator<Item = Answer>) -> Self {
        let arena: BTreeMap<i32, Answer> = answers.into_iter().map(|a| (a.id, a)).collect();
        let mut roots = Vec::new();
        let mut children: BTreeMap<i32, Vec<i32>> = BTreeMap::new();

        for answer in arena.values() {
            match answer.parent_id {
                Some(parent) if parent != answer.id && arena.contains_key(&parent) => {
                    children.entry(parent).or_default().push(answer.id);
                }
                _ => roots.push(answer.id),
            }
        }

        Self {
            arena,
            roots,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn get(&self, id: i32) -> Option<&Answer> {
        self.arena.get(&id)
    }

    /// Top-level answers, oldest id first.
    pub fn roots(&self) -> impl Iterator<Item = &Answer> {
        self.roots.iter().filter_map(|id| self.arena.get(id))
    }

    /// Direct replies to an answer.
    pub fn replies(&self, id: i32) -> impl Iterator<Item = &Answer> {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|child| self.arena.get(child))
    }

    /// Ids of every transitive reply below `id`, excluding `id` itself.
    pub fn descendants(&self, id: i32) -> Vec<i32> {
        let mut seen = BTreeSet::from([id]);
        let mut stack = vec![id];
        let mut out = Vec::new();

        while let Some(current) = stack.pop() {
            for child in self.children.get(&current).into_iter().flatten() {
                if seen.insert(*child) {
                    out.push(*child);
                    stack.push(*child);
                }
            }
        }
        out
    }

    /// Depth-first walk yielding `(depth, answer)`, roots at depth 0.
    pub fn walk(&self) -> Vec<(usize, &Answer)> {
        let mut out = Vec::with_capacity(self.arena.len());
        let mut seen = BTreeSet::new();
        let mut stack: Vec<(usize, i32)> = self.roots.iter().rev().map(|id| (0, *id)).collect();

        while let Some((depth, id)) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Some(answer) = self.arena.get(&id) else {
                continue;
            };
            out.push((depth, answer));
            if let Some(kids) = self.children.get(&id) {
                stack.extend(kids.iter().rev().map(|kid| (depth + 1, *kid)));
            }
        }
        out
    }
}
