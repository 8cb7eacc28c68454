//! Structural checks over a whole site document
//!
//! Rendering fails fast on the first problem it meets; these checks collect
//! every problem so a document can be fixed in one pass.

use std::collections::{HashMap, HashSet};

use crate::model::{GlossarySpec, Localized, SiteDocument};

/// Every structural problem in the document, in document order
pub fn check_document(doc: &SiteDocument) -> Vec<String> {
    let mut problems = Vec::new();

    if doc.languages.is_empty() {
        problems.push("No languages configured".to_string());
    }
    let mut seen_langs = HashSet::new();
    for lang in &doc.languages {
        if lang.trim().is_empty() {
            problems.push("Empty language code".to_string());
        } else if !seen_langs.insert(lang.as_str()) {
            problems.push(format!("Language '{}' listed twice", lang));
        }
    }

    require_translations(&mut problems, doc, "site_title", &doc.site_title);

    let mut slugs = HashSet::new();
    for (position, page) in doc.pages.iter().enumerate() {
        if page.slug.trim().is_empty() {
            problems.push(format!("Page #{} has an empty slug", position));
        } else if !slugs.insert(page.slug.as_str()) {
            problems.push(format!("Page slug '{}' used twice", page.slug));
        }
        require_translations(
            &mut problems,
            doc,
            &format!("page '{}' title", page.slug),
            &page.title,
        );
    }

    for lang in doc.labels.keys() {
        if !seen_langs.contains(lang.as_str()) {
            problems.push(format!("Labels given for unknown language '{}'", lang));
        }
    }

    if let Some(glossary) = &doc.glossary {
        check_glossary(&mut problems, doc, glossary);
    }

    problems
}

fn check_glossary(problems: &mut Vec<String>, doc: &SiteDocument, glossary: &GlossarySpec) {
    let topic_ids = collect_ids(
        problems,
        "topic",
        glossary.topics.iter().map(|t| t.id.as_deref()),
    );
    let category_ids = collect_ids(
        problems,
        "category",
        glossary.categories.iter().map(|c| c.id.as_deref()),
    );
    let definition_ids = collect_ids(
        problems,
        "definition",
        glossary.definitions.iter().map(|d| d.id.as_deref()),
    );

    let mut category_owner: HashMap<&str, &str> = HashMap::new();
    for topic in &glossary.topics {
        let topic_id = topic.id.as_deref().unwrap_or("?");
        require_translations(problems, doc, &format!("topic '{}' title", topic_id), &topic.title);
        for category_id in &topic.categories {
            if !category_ids.contains(category_id.as_str()) {
                problems.push(format!(
                    "Topic '{}' references unknown category '{}'",
                    topic_id, category_id
                ));
            } else if let Some(owner) = category_owner.insert(category_id, topic_id) {
                problems.push(format!(
                    "Category '{}' is listed by both '{}' and '{}'",
                    category_id, owner, topic_id
                ));
            }
        }
    }

    let mut definition_owner: HashMap<&str, &str> = HashMap::new();
    for category in &glossary.categories {
        let category_id = category.id.as_deref().unwrap_or("?");
        require_translations(
            problems,
            doc,
            &format!("category '{}' title", category_id),
            &category.title,
        );
        for definition_id in &category.definitions {
            if !definition_ids.contains(definition_id.as_str()) {
                problems.push(format!(
                    "Category '{}' references unknown definition '{}'",
                    category_id, definition_id
                ));
            } else if let Some(owner) = definition_owner.insert(definition_id, category_id) {
                problems.push(format!(
                    "Definition '{}' is listed by both '{}' and '{}'",
                    definition_id, owner, category_id
                ));
            }
        }
    }

    for (position, definition) in glossary.definitions.iter().enumerate() {
        let Some(id) = definition.id.as_deref() else {
            continue;
        };
        match &definition.label {
            Some(label) => {
                require_translations(problems, doc, &format!("definition '{}' label", id), label)
            }
            None => problems.push(format!(
                "Definition '{}' (#{}) is missing required field 'label'",
                id, position
            )),
        }
        if !definition_owner.contains_key(id) {
            problems.push(format!("Definition '{}' is not listed by any category", id));
        }
    }

    if topic_ids.is_empty() && !glossary.categories.is_empty() {
        problems.push("Glossary has categories but no topics".to_string());
    }
}

/// Record missing and duplicate ids, returning the set of valid ones
fn collect_ids<'a>(
    problems: &mut Vec<String>,
    kind: &str,
    ids: impl Iterator<Item = Option<&'a str>>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for (position, id) in ids.enumerate() {
        match id.filter(|id| !id.trim().is_empty()) {
            None => problems.push(format!(
                "{} #{} is missing required field 'id'",
                kind, position
            )),
            Some(id) => {
                if !seen.insert(id) {
                    problems.push(format!("Duplicate {} id '{}'", kind, id));
                }
            }
        }
    }
    seen
}

fn require_translations(
    problems: &mut Vec<String>,
    doc: &SiteDocument,
    what: &str,
    text: &Localized,
) {
    for lang in &doc.languages {
        if text.get(lang).is_none() {
            problems.push(format!("Missing '{}' text for {}", lang, what));
        }
    }
}
