use std::collections::BTreeMap;
use std::collections::btree_map::{self, Entry};

use crate::label::normalize_label;
use crate::options::DuplicatePolicy;

/// One declared reference target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDefinition {
    /// The id as spelled by the first declaration seen for its normalized key.
    pub id: String,
    /// Target URL with enclosing angle brackets stripped. Never empty.
    pub url: String,
    /// `None` when no title clause exists; `Some("")` for an empty one like `""`.
    pub title: Option<String>,
}

/// Case-insensitive map from link id to its definition.
///
/// Built once per document by [`scan`](crate::scan()) and read-only afterwards. Iteration is
/// ordered by normalized id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DefinitionIndex {
    definitions: BTreeMap<String, LinkDefinition>,
}

impl DefinitionIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&LinkDefinition> {
        self.definitions.get(normalize_label(id).as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// `(normalized id, definition)` pairs.
    pub fn iter(&self) -> IndexIter<'_> {
        IndexIter {
            inner: self.definitions.iter(),
        }
    }

    /// Returns `false` if the definition was dropped by `policy`.
    pub(crate) fn insert(&mut self, definition: LinkDefinition, policy: DuplicatePolicy) -> bool {
        let key = normalize_label(&definition.id).into_owned();
        match self.definitions.entry(key) {
            Entry::Vacant(v) => {
                v.insert(definition);
                true
            }
            Entry::Occupied(mut o) => match policy {
                DuplicatePolicy::FirstWins => {
                    tracing::debug!(id = %definition.id, "duplicate link definition ignored");
                    false
                }
                DuplicatePolicy::LastWins => {
                    tracing::debug!(
                        id = %definition.id,
                        previous_url = %o.get().url,
                        url = %definition.url,
                        "duplicate link definition overrides earlier one"
                    );
                    let existing = o.get_mut();
                    existing.url = definition.url;
                    existing.title = definition.title;
                    true
                }
            },
        }
    }
}

/// Case-insensitive lookup; `None` is an ordinary outcome for undeclared ids.
pub fn lookup<'a>(index: &'a DefinitionIndex, id: &str) -> Option<&'a LinkDefinition> {
    index.get(id)
}

#[derive(Debug, Clone)]
pub struct IndexIter<'a> {
    inner: btree_map::Iter<'a, String, LinkDefinition>,
}

impl<'a> Iterator for IndexIter<'a> {
    type Item = (&'a str, &'a LinkDefinition);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IndexIter<'_> {}

impl<'a> IntoIterator for &'a DefinitionIndex {
    type Item = (&'a str, &'a LinkDefinition);
    type IntoIter = IndexIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
