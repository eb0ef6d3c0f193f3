//! Per-traversal memoization store

use crate::model::EmittedDeclaration;
use std::collections::{HashMap, HashSet};

/// In-progress set and completed map for one root-class traversal.
///
/// A fresh (or cleared) state must back every traversal. Sharing one across
/// concurrent traversals is not supported; give each job its own instance.
#[derive(Debug, Default)]
pub struct TraversalState {
    in_progress: HashSet<String>,
    completed: HashMap<String, EmittedDeclaration>,
    discovery: Vec<String>,
    renamed: HashMap<String, String>,
    claimed: HashMap<String, String>,
}

impl TraversalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self, qualified_name: &str) -> bool {
        self.completed.contains_key(qualified_name)
    }

    pub fn is_in_progress(&self, qualified_name: &str) -> bool {
        self.in_progress.contains(qualified_name)
    }

    /// True when the name is already being expanded or has been emitted
    pub fn is_known(&self, qualified_name: &str) -> bool {
        self.is_completed(qualified_name) || self.is_in_progress(qualified_name)
    }

    /// Start expanding `qualified_name`.
    ///
    /// Returns false (and changes nothing) when the name is already known.
    pub fn mark_in_progress(&mut self, qualified_name: &str) -> bool {
        if self.is_known(qualified_name) {
            return false;
        }
        self.in_progress.insert(qualified_name.to_string());
        self.discovery.push(qualified_name.to_string());
        true
    }

    /// Record a finished declaration and leave the in-progress set.
    ///
    /// The first declaration stored under a name wins; returns false when one
    /// already existed.
    pub fn store(&mut self, declaration: EmittedDeclaration) -> bool {
        let name = declaration.qualified_name.clone();
        self.in_progress.remove(&name);
        if self.completed.contains_key(&name) {
            return false;
        }
        if !self.discovery.contains(&name) {
            self.discovery.push(name.clone());
        }
        self.completed.insert(name, declaration);
        true
    }

    /// Leave the in-progress set without emitting anything
    pub fn abandon(&mut self, qualified_name: &str) {
        if self.in_progress.remove(qualified_name) && !self.is_completed(qualified_name) {
            self.discovery.retain(|name| name != qualified_name);
        }
    }

    pub fn get(&self, qualified_name: &str) -> Option<&EmittedDeclaration> {
        self.completed.get(qualified_name)
    }

    /// Completed declarations in the order their expansion started
    pub fn declarations(&self) -> impl Iterator<Item = &EmittedDeclaration> {
        self.discovery
            .iter()
            .filter_map(|name| self.completed.get(name))
    }

    /// Name assigned to `qualified_name` by [`TraversalState::assign_name`]
    pub fn assigned_name(&self, qualified_name: &str) -> Option<&str> {
        self.renamed.get(qualified_name).map(String::as_str)
    }

    /// Declare `qualified_name` under `name` for the rest of the walk.
    ///
    /// Returns false (and changes nothing) when another class already holds
    /// the name.
    pub fn assign_name(&mut self, qualified_name: &str, name: &str) -> bool {
        match self.claimed.get(name) {
            Some(owner) if owner != qualified_name => false,
            _ => {
                self.claimed
                    .insert(name.to_string(), qualified_name.to_string());
                self.renamed
                    .insert(qualified_name.to_string(), name.to_string());
                true
            }
        }
    }

    pub fn completed_len(&self) -> usize {
        self.completed.len()
    }

    pub fn in_progress_len(&self) -> usize {
        self.in_progress.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.in_progress.is_empty()
    }

    /// Forget everything from the previous traversal
    pub fn clear(&mut self) {
        self.in_progress.clear();
        self.completed.clear();
        self.discovery.clear();
        self.renamed.clear();
        self.claimed.clear();
    }
}

#[cfg(test)]
#[path = "state/state_tests.rs"]
mod state_tests;
