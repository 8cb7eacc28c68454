//! Definition store - immutable glossary lookups for one language

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::model::{Category, Definition, GlossarySpec, Localized, Topic};

/// Kind of glossary entity, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Topic,
    Category,
    Definition,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Topic => "topic",
            Self::Category => "category",
            Self::Definition => "definition",
        })
    }
}

/// Errors raised while building or traversing the glossary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlossaryError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },
    #[error("{kind} #{position} is missing required field '{field}'")]
    MissingField {
        kind: EntityKind,
        position: usize,
        field: &'static str,
    },
    #[error("{kind} '{id}' has no '{field}' text for language '{lang}'")]
    MissingTranslation {
        kind: EntityKind,
        id: String,
        field: &'static str,
        lang: String,
    },
    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: EntityKind, id: String },
    #[error("{kind} '{id}' is listed by both '{first}' and '{second}'")]
    ListedTwice {
        kind: EntityKind,
        id: String,
        first: String,
        second: String,
    },
}

impl GlossaryError {
    /// Whether the error is an unresolved reference rather than a malformed entry
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// One category with its definitions resolved
#[derive(Debug, Clone)]
pub struct CategoryOutline<'a> {
    pub category: &'a Category,
    pub definitions: Vec<&'a Definition>,
}

/// One topic with its categories resolved
#[derive(Debug, Clone)]
pub struct TopicOutline<'a> {
    pub topic: &'a Topic,
    pub categories: Vec<CategoryOutline<'a>>,
}

impl<'a> TopicOutline<'a> {
    /// Definitions of this topic in display order
    pub fn definitions(&self) -> impl Iterator<Item = &'a Definition> + '_ {
        self.categories
            .iter()
            .flat_map(|c| c.definitions.iter().copied())
    }
}

/// Glossary data for one language; no mutation after construction
#[derive(Debug, Clone, Default)]
pub struct DefinitionStore {
    topics: Vec<Topic>,
    categories: HashMap<String, Category>,
    definitions: HashMap<String, Definition>,
}

impl DefinitionStore {
    /// Build a store from already resolved entities.
    ///
    /// Ids must be non-empty and unique per kind, and a category or
    /// definition may be listed by at most one parent. References are not
    /// checked here; they fail with `NotFound` when resolved.
    pub fn from_parts(
        topics: Vec<Topic>,
        categories: Vec<Category>,
        definitions: Vec<Definition>,
    ) -> Result<Self, GlossaryError> {
        let mut topic_ids = HashMap::new();
        for (position, topic) in topics.iter().enumerate() {
            require_id(EntityKind::Topic, position, &topic.id)?;
            if topic_ids.insert(topic.id.as_str(), position).is_some() {
                return Err(GlossaryError::DuplicateId {
                    kind: EntityKind::Topic,
                    id: topic.id.clone(),
                });
            }
        }

        require_single_owner(
            EntityKind::Category,
            topics.iter().map(|t| (t.id.as_str(), t.categories.as_slice())),
        )?;
        require_single_owner(
            EntityKind::Definition,
            categories
                .iter()
                .map(|c| (c.id.as_str(), c.definitions.as_slice())),
        )?;

        let mut category_map = HashMap::with_capacity(categories.len());
        for (position, category) in categories.into_iter().enumerate() {
            require_id(EntityKind::Category, position, &category.id)?;
            if category_map.contains_key(&category.id) {
                return Err(GlossaryError::DuplicateId {
                    kind: EntityKind::Category,
                    id: category.id,
                });
            }
            category_map.insert(category.id.clone(), category);
        }

        let mut definition_map = HashMap::with_capacity(definitions.len());
        for (position, definition) in definitions.into_iter().enumerate() {
            require_id(EntityKind::Definition, position, &definition.id)?;
            if definition.label.trim().is_empty() {
                return Err(GlossaryError::MissingField {
                    kind: EntityKind::Definition,
                    position,
                    field: "label",
                });
            }
            if definition_map.contains_key(&definition.id) {
                return Err(GlossaryError::DuplicateId {
                    kind: EntityKind::Definition,
                    id: definition.id,
                });
            }
            definition_map.insert(definition.id.clone(), definition);
        }

        Ok(Self {
            topics,
            categories: category_map,
            definitions: definition_map,
        })
    }

    /// Resolve the glossary section of a site document for one language
    pub fn from_glossary(spec: &GlossarySpec, lang: &str) -> Result<Self, GlossaryError> {
        let topics = spec
            .topics
            .iter()
            .enumerate()
            .map(|(position, t)| {
                let id = spec_id(EntityKind::Topic, position, t.id.as_deref())?;
                Ok(Topic {
                    title: translate(EntityKind::Topic, &id, "title", &t.title, lang)?,
                    categories: t.categories.clone(),
                    id,
                })
            })
            .collect::<Result<Vec<_>, GlossaryError>>()?;

        let categories = spec
            .categories
            .iter()
            .enumerate()
            .map(|(position, c)| {
                let id = spec_id(EntityKind::Category, position, c.id.as_deref())?;
                Ok(Category {
                    title: translate(EntityKind::Category, &id, "title", &c.title, lang)?,
                    definitions: c.definitions.clone(),
                    id,
                })
            })
            .collect::<Result<Vec<_>, GlossaryError>>()?;

        let definitions = spec
            .definitions
            .iter()
            .enumerate()
            .map(|(position, d)| {
                let id = spec_id(EntityKind::Definition, position, d.id.as_deref())?;
                let label = d.label.as_ref().ok_or(GlossaryError::MissingField {
                    kind: EntityKind::Definition,
                    position,
                    field: "label",
                })?;
                Ok(Definition {
                    label: translate(EntityKind::Definition, &id, "label", label, lang)?,
                    description: d.description.get(lang).unwrap_or_default().to_string(),
                    tags: d.tags.clone(),
                    code: d.code.clone(),
                    id,
                })
            })
            .collect::<Result<Vec<_>, GlossaryError>>()?;

        Self::from_parts(topics, categories, definitions)
    }

    /// Topics in configuration order
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn resolve_topic(&self, topic_id: &str) -> Result<&Topic, GlossaryError> {
        self.topics
            .iter()
            .find(|t| t.id == topic_id)
            .ok_or_else(|| not_found(EntityKind::Topic, topic_id))
    }

    pub fn resolve_category(&self, category_id: &str) -> Result<&Category, GlossaryError> {
        self.categories
            .get(category_id)
            .ok_or_else(|| not_found(EntityKind::Category, category_id))
    }

    pub fn resolve_definition(&self, definition_id: &str) -> Result<&Definition, GlossaryError> {
        self.definitions
            .get(definition_id)
            .ok_or_else(|| not_found(EntityKind::Definition, definition_id))
    }

    /// Resolve every topic, category and definition reference.
    ///
    /// Fails on the first reference that does not resolve.
    pub fn outline(&self) -> Result<Vec<TopicOutline<'_>>, GlossaryError> {
        self.topics
            .iter()
            .map(|topic| {
                let categories = topic
                    .categories
                    .iter()
                    .map(|category_id| {
                        let category = self.resolve_category(category_id)?;
                        let definitions = category
                            .definitions
                            .iter()
                            .map(|id| self.resolve_definition(id))
                            .collect::<Result<Vec<_>, _>>()?;
                        Ok(CategoryOutline {
                            category,
                            definitions,
                        })
                    })
                    .collect::<Result<Vec<_>, GlossaryError>>()?;
                Ok(TopicOutline { topic, categories })
            })
            .collect()
    }

    /// All definitions in canonical traversal order: topic order, then
    /// category order within a topic, then definition order within a category
    pub fn definitions(&self) -> Result<Vec<&Definition>, GlossaryError> {
        Ok(self
            .outline()?
            .iter()
            .flat_map(|t| t.definitions())
            .collect())
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }
}

fn not_found(kind: EntityKind, id: &str) -> GlossaryError {
    GlossaryError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn require_id(kind: EntityKind, position: usize, id: &str) -> Result<(), GlossaryError> {
    if id.trim().is_empty() {
        return Err(GlossaryError::MissingField {
            kind,
            position,
            field: "id",
        });
    }
    Ok(())
}

/// Fail when a child id is listed by two parents, or twice by one
fn require_single_owner<'a>(
    kind: EntityKind,
    parents: impl Iterator<Item = (&'a str, &'a [String])>,
) -> Result<(), GlossaryError> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    for (parent, children) in parents {
        for child in children {
            if let Some(first) = owners.insert(child.as_str(), parent) {
                return Err(GlossaryError::ListedTwice {
                    kind,
                    id: child.clone(),
                    first: first.to_string(),
                    second: parent.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn spec_id(kind: EntityKind, position: usize, id: Option<&str>) -> Result<String, GlossaryError> {
    let id = id.unwrap_or_default();
    require_id(kind, position, id)?;
    Ok(id.to_string())
}

fn translate(
    kind: EntityKind,
    id: &str,
    field: &'static str,
    text: &Localized,
    lang: &str,
) -> Result<String, GlossaryError> {
    text.get(lang)
        .map(str::to_string)
        .ok_or_else(|| GlossaryError::MissingTranslation {
            kind,
            id: id.to_string(),
            field,
            lang: lang.to_string(),
        })
}
