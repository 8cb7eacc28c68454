//! Tag index builder - glossary cards and tag back-references
//!
//! A single pass over the canonical definition sequence produces one
//! [`Card`] per definition and a [`TagIndex`] mapping every tag to the ids
//! of the cards that declare it. Buckets keep traversal order; only the tag
//! keys are sorted, and only for display.

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Card, Definition};
use crate::store::{DefinitionStore, GlossaryError};
use crate::text::{dedent, strip_markers};

/// Insertion-ordered mapping of tag to card ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagIndex {
    buckets: IndexMap<String, Vec<String>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a card id to a tag's bucket, skipping a repeat at the tail
    fn record(&mut self, tag: &str, card_id: &str) {
        let bucket = self.buckets.entry(tag.to_string()).or_default();
        if bucket.last().map(String::as_str) != Some(card_id) {
            bucket.push(card_id.to_string());
        }
    }

    /// Card ids for a tag, in traversal order
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.buckets.get(tag).map(Vec::as_slice)
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.buckets.contains_key(tag)
    }

    /// Number of distinct tags
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Tags in first-seen order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Tags in lexicographic order, for the navigable index view
    pub fn sorted_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tags().collect();
        tags.sort_unstable();
        tags
    }

    /// (tag, card ids) pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.buckets
            .iter()
            .map(|(tag, ids)| (tag.as_str(), ids.as_slice()))
    }
}

/// Cards and tag index for one render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlossaryIndex {
    pub cards: Vec<Card>,
    pub tags: TagIndex,
}

impl GlossaryIndex {
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }
}

impl Card {
    /// Display view of a definition
    pub fn from_definition(definition: &Definition) -> Self {
        let code = definition
            .code
            .as_deref()
            .map(|code| dedent(code).trim().to_string())
            .filter(|code| !code.is_empty());

        Self {
            id: definition.id.clone(),
            title: definition.label.clone(),
            body: strip_markers(&definition.description),
            tags: definition.tags.clone(),
            code,
        }
    }
}

/// Builds cards and the tag index from definitions in canonical order
#[derive(Debug, Clone, Copy, Default)]
pub struct TagIndexBuilder;

impl TagIndexBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build<'a, I>(&self, definitions: I) -> GlossaryIndex
    where
        I: IntoIterator<Item = &'a Definition>,
    {
        let mut index = GlossaryIndex::default();

        for definition in definitions {
            let card = Card::from_definition(definition);
            for tag in &card.tags {
                index.tags.record(tag, &card.id);
            }
            index.cards.push(card);
        }

        tracing::debug!(
            cards = index.cards.len(),
            tags = index.tags.len(),
            "Built glossary tag index"
        );

        index
    }

    /// Traverse the store and build; resolution errors propagate unchanged
    pub fn build_from_store(&self, store: &DefinitionStore) -> Result<GlossaryIndex, GlossaryError> {
        let definitions = store.definitions()?;
        Ok(self.build(definitions))
    }
}
