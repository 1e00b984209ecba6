use std::collections::{BTreeSet, HashMap};

pub trait StringTable {
    fn to_str(&self, id: usize) -> Option<&str>;
    fn to_id(&self, s: &str) -> Option<usize>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bidirectional mapping between strings and dense ids.
#[derive(Debug, Default, Clone)]
pub struct Quark {
    v: Vec<String>,
    m: HashMap<String, usize>,
}

impl From<Vec<String>> for Quark {
    fn from(value: Vec<String>) -> Self {
        let m = value
            .iter()
            .enumerate()
            .map(|(i, s)| (s.to_string(), i))
            .collect();
        Self { v: value, m }
    }
}

impl From<BTreeSet<String>> for Quark {
    /// Ids follow the lexicographic order of the set.
    fn from(value: BTreeSet<String>) -> Self {
        Self::from(value.into_iter().collect::<Vec<_>>())
    }
}

impl StringTable for Quark {
    fn to_str(&self, id: usize) -> Option<&str> {
        self.v.get(id).map(|x| x.as_str())
    }

    fn to_id(&self, s: &str) -> Option<usize> {
        self.m.get(s).copied()
    }

    fn len(&self) -> usize {
        self.v.len()
    }
}

impl Quark {
    pub fn as_slice(&self) -> &[String] {
        &self.v
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.v.iter().enumerate().map(|(i, s)| (i, s.as_str()))
    }
}
