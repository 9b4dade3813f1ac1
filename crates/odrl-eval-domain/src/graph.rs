//! Graph query facade consumed by the engine, plus an in-memory implementation.
//!
//! Node identifiers are plain strings: IRIs without angle brackets, blank nodes as `_:label`,
//! literals with their surrounding quotes. The engine never mutates a graph.

use odrl_eval_types::vocab;
use std::collections::{BTreeMap, HashSet};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// Pattern-match access to a loaded policy graph.
///
/// `query` must return matches in an order that is stable for the lifetime of the graph so
/// traces are reproducible.
pub trait PolicyGraph {
    fn query(
        &self,
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
    ) -> Vec<Triple>;

    /// Objects reachable from `subject` via `predicate`, in query order.
    fn objects(&self, subject: &str, predicate: &str) -> Vec<String> {
        self.query(Some(subject), Some(predicate), None)
            .into_iter()
            .map(|t| t.object)
            .collect()
    }

    fn first_object(&self, subject: &str, predicate: &str) -> Option<String> {
        self.query(Some(subject), Some(predicate), None)
            .into_iter()
            .next()
            .map(|t| t.object)
    }

    /// Like [`PolicyGraph::objects`], but RDF list heads are expanded in list order.
    ///
    /// JSON-LD `@list` containers (used by ODRL for logical operands) arrive as
    /// `rdf:first`/`rdf:rest` chains.
    fn members(&self, subject: &str, predicate: &str) -> Vec<String> {
        let mut out = Vec::new();
        for object in self.objects(subject, predicate) {
            if object == vocab::RDF_NIL {
                continue;
            }
            if self.first_object(&object, vocab::RDF_FIRST).is_some() {
                out.extend(self.list_items(&object));
            } else {
                out.push(object);
            }
        }
        out
    }

    fn list_items(&self, head: &str) -> Vec<String> {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = head.to_string();
        while cursor != vocab::RDF_NIL && seen.insert(cursor.clone()) {
            let Some(item) = self.first_object(&cursor, vocab::RDF_FIRST) else {
                break;
            };
            items.push(item);
            match self.first_object(&cursor, vocab::RDF_REST) {
                Some(rest) => cursor = rest,
                None => break,
            }
        }
        items
    }
}

impl<G: PolicyGraph + ?Sized> PolicyGraph for &G {
    fn query(
        &self,
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
    ) -> Vec<Triple> {
        (**self).query(subject, predicate, object)
    }
}

/// Insertion-ordered triple store with a subject index.
///
/// Duplicate triples are dropped on insert, the way RDF stores treat them.
#[derive(Clone, Debug, Default)]
pub struct InMemoryGraph {
    triples: Vec<Triple>,
    by_subject: BTreeMap<String, Vec<usize>>,
    seen: HashSet<Triple>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the triple was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if !self.seen.insert(triple.clone()) {
            return false;
        }
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(self.triples.len());
        self.triples.push(triple);
        true
    }

    pub fn add(
        &mut self,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> bool {
        self.insert(Triple::new(subject, predicate, object))
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for InMemoryGraph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = InMemoryGraph::new();
        for triple in iter {
            graph.insert(triple);
        }
        graph
    }
}

impl PolicyGraph for InMemoryGraph {
    fn query(
        &self,
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
    ) -> Vec<Triple> {
        let matches = |t: &Triple| {
            predicate.is_none_or(|p| t.predicate == p) && object.is_none_or(|o| t.object == o)
        };
        match subject {
            Some(s) => self
                .by_subject
                .get(s)
                .into_iter()
                .flatten()
                .map(|&i| &self.triples[i])
                .filter(|t| matches(t))
                .cloned()
                .collect(),
            None => self
                .triples
                .iter()
                .filter(|t| matches(t))
                .cloned()
                .collect(),
        }
    }
}
