//! Build use case - renders every site language and writes the pages

use std::sync::Arc;
use thiserror::Error;

use crate::compute_content_hash;
use crate::model::{BuildReport, PageReport, RenderedPage, SiteDocument};
use crate::ports::{PageSink, PageSinkError, SiteSource, SiteSourceError};
use crate::store::DefinitionStore;
use crate::tag_index::TagIndexBuilder;
use crate::usecases::render::{GlossaryView, PageRenderer, RenderConfig, RenderError};

/// Configuration for a site build
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    /// Restrict the build to these languages (None = all site languages)
    pub languages: Option<Vec<String>>,
    pub render: RenderConfig,
}

/// Error type for site builds
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to load site document: {0}")]
    Source(#[from] SiteSourceError),
    #[error("Failed to render '{lang}' page: {source}")]
    Render {
        lang: String,
        #[source]
        source: RenderError,
    },
    #[error("Failed to write page: {0}")]
    Sink(#[from] PageSinkError),
    #[error("No languages to build")]
    NoLanguages,
}

/// Site build orchestrator
pub struct SiteBuilder<S, W>
where
    S: SiteSource + ?Sized,
    W: PageSink + ?Sized,
{
    source: Arc<S>,
    sink: Arc<W>,
    renderer: PageRenderer,
    config: BuildConfig,
}

impl<S, W> SiteBuilder<S, W>
where
    S: SiteSource + ?Sized,
    W: PageSink + ?Sized,
{
    pub fn new(source: Arc<S>, sink: Arc<W>, config: BuildConfig) -> Self {
        Self {
            source,
            sink,
            renderer: PageRenderer::new(config.render.clone()),
            config,
        }
    }

    /// Load the document, then render and write one page per language.
    ///
    /// Each page is written only after it rendered completely. A failure
    /// stops the batch; pages already written stay in place.
    pub async fn build(&self) -> Result<BuildReport, BuildError> {
        let doc = self.source.load().await?;
        let languages = self.languages(&doc)?;

        tracing::info!(
            languages = ?languages,
            pages = doc.pages.len(),
            glossary = doc.glossary.is_some(),
            "Building site"
        );

        let mut report = BuildReport::default();
        for lang in &languages {
            let page = self.render_page(&doc, lang)?;
            let destination = self.sink.write(&page).await?;

            let page_report = PageReport {
                lang: page.lang.clone(),
                path: page.path.clone(),
                bytes: page.html.len(),
                sha256: compute_content_hash(&page.html),
                cards: page.card_count,
                tags: page.tag_count,
            };

            tracing::info!(
                lang = %page.lang,
                destination = %destination.display(),
                bytes = page_report.bytes,
                cards = page_report.cards,
                tags = page_report.tags,
                "Wrote page"
            );

            report.pages.push(page_report);
        }

        Ok(report)
    }

    /// Render one language without writing it
    pub fn render_page(&self, doc: &SiteDocument, lang: &str) -> Result<RenderedPage, BuildError> {
        let render_error = |source: RenderError| BuildError::Render {
            lang: lang.to_string(),
            source,
        };

        let Some(glossary) = &doc.glossary else {
            return self.renderer.render(doc, lang, None).map_err(render_error);
        };

        let store = DefinitionStore::from_glossary(glossary, lang)
            .map_err(|e| render_error(e.into()))?;
        let outline = store.outline().map_err(|e| render_error(e.into()))?;
        let index = TagIndexBuilder::new().build(outline.iter().flat_map(|t| t.definitions()));

        tracing::debug!(
            lang,
            topics = outline.len(),
            cards = index.cards.len(),
            tags = index.tags.len(),
            "Resolved glossary"
        );

        self.renderer
            .render(
                doc,
                lang,
                Some(GlossaryView {
                    outline: &outline,
                    index: &index,
                }),
            )
            .map_err(render_error)
    }

    fn languages(&self, doc: &SiteDocument) -> Result<Vec<String>, BuildError> {
        let languages = match &self.config.languages {
            Some(only) => doc
                .languages
                .iter()
                .filter(|l| only.contains(l))
                .cloned()
                .collect(),
            None => doc.languages.clone(),
        };

        if languages.is_empty() {
            return Err(BuildError::NoLanguages);
        }
        Ok(languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EntityKind, GlossaryError};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct FakeSource {
        json: String,
    }

    #[async_trait]
    impl SiteSource for FakeSource {
        async fn load(&self) -> Result<SiteDocument, SiteSourceError> {
            serde_json::from_str(&self.json).map_err(|e| SiteSourceError::Parse {
                file: "fake.json".to_string(),
                message: e.to_string(),
            })
        }

        async fn validate(&self) -> Result<(), SiteSourceError> {
            self.load().await.map(|_| ())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        pages: Mutex<Vec<RenderedPage>>,
    }

    #[async_trait]
    impl PageSink for RecordingSink {
        async fn write(&self, page: &RenderedPage) -> Result<PathBuf, PageSinkError> {
            self.pages.lock().unwrap().push(page.clone());
            Ok(PathBuf::from("/out").join(&page.path))
        }
    }

    const SITE: &str = r#"{
        "site_title": {"en": "Notes", "pl": "Notatki"},
        "glossary": {
            "topics": [{"id": "rust", "title": {"en": "Rust", "pl": "Rust"}, "categories": ["basics"]}],
            "categories": [{"id": "basics", "title": {"en": "Basics", "pl": "Podstawy"},
                            "definitions": ["a", "b"]}],
            "definitions": [
                {"id": "a", "label": {"en": "A", "pl": "A"}, "tags": ["x", "y"]},
                {"id": "b", "label": {"en": "B", "pl": "B"}, "tags": ["y"]}
            ]
        }
    }"#;

    fn builder(
        json: &str,
        config: BuildConfig,
    ) -> (SiteBuilder<FakeSource, RecordingSink>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let builder = SiteBuilder::new(
            Arc::new(FakeSource {
                json: json.to_string(),
            }),
            sink.clone(),
            config,
        );
        (builder, sink)
    }

    #[tokio::test]
    async fn test_build_writes_every_language() {
        let (builder, sink) = builder(SITE, BuildConfig::default());

        let report = builder.build().await.unwrap();

        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.pages[0].lang, "en");
        assert_eq!(report.pages[0].path, PathBuf::from("index.html"));
        assert_eq!(report.pages[1].path, PathBuf::from("pl").join("index.html"));
        assert_eq!(report.pages[0].cards, 2);
        assert_eq!(report.pages[0].tags, 2);
        assert_eq!(report.pages[0].sha256.len(), 64);

        let pages = sink.pages.lock().unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[1].html.contains("<h3>Podstawy</h3>"));
    }

    #[tokio::test]
    async fn test_build_language_filter() {
        let (builder, sink) = builder(
            SITE,
            BuildConfig {
                languages: Some(vec!["pl".to_string()]),
                ..Default::default()
            },
        );

        let report = builder.build().await.unwrap();
        assert_eq!(report.pages.len(), 1);
        assert_eq!(sink.pages.lock().unwrap()[0].lang, "pl");
    }

    #[tokio::test]
    async fn test_build_with_no_matching_language() {
        let (builder, sink) = builder(
            SITE,
            BuildConfig {
                languages: Some(vec!["de".to_string()]),
                ..Default::default()
            },
        );

        assert!(matches!(builder.build().await, Err(BuildError::NoLanguages)));
        assert!(sink.pages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_category_aborts_before_writing() {
        let json = SITE.replace(r#""categories": ["basics"]"#, r#""categories": ["missing"]"#);
        let (builder, sink) = builder(&json, BuildConfig::default());

        let err = builder.build().await.unwrap_err();

        match err {
            BuildError::Render {
                lang,
                source: RenderError::Glossary(e),
            } => {
                assert_eq!(lang, "en");
                assert!(e.is_not_found());
                assert!(e.to_string().contains("missing"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(sink.pages.lock().unwrap().is_empty());
    }

    /// Build must fail for the first language with a glossary error and write nothing
    async fn build_glossary_error(json: &str) -> GlossaryError {
        let (builder, sink) = builder(json, BuildConfig::default());

        let err = builder.build().await.unwrap_err();
        assert!(sink.pages.lock().unwrap().is_empty());

        match err {
            BuildError::Render {
                lang,
                source: RenderError::Glossary(e),
            } => {
                assert_eq!(lang, "en");
                e
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_definition_listed_by_two_categories_aborts() {
        let json = r#"{
            "languages": ["en"],
            "site_title": {"en": "Notes"},
            "glossary": {
                "topics": [{"id": "t", "title": {"en": "T"}, "categories": ["c1", "c2"]}],
                "categories": [
                    {"id": "c1", "title": {"en": "C1"}, "definitions": ["d"]},
                    {"id": "c2", "title": {"en": "C2"}, "definitions": ["e", "d"]}
                ],
                "definitions": [
                    {"id": "d", "label": {"en": "D"}, "tags": ["z"]},
                    {"id": "e", "label": {"en": "E"}, "tags": ["z"]}
                ]
            }
        }"#;

        let err = build_glossary_error(json).await;
        assert_eq!(
            err,
            GlossaryError::ListedTwice {
                kind: EntityKind::Definition,
                id: "d".to_string(),
                first: "c1".to_string(),
                second: "c2".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_category_listed_twice_aborts() {
        let json = SITE.replace(
            r#""categories": ["basics"]"#,
            r#""categories": ["basics", "basics"]"#,
        );

        let err = build_glossary_error(&json).await;
        assert!(matches!(
            err,
            GlossaryError::ListedTwice { kind: EntityKind::Category, ref id, .. } if id == "basics"
        ));
    }

    #[tokio::test]
    async fn test_duplicate_definition_id_aborts() {
        let json = SITE.replace(r#"{"id": "b", "label""#, r#"{"id": "a", "label""#);

        let err = build_glossary_error(&json).await;
        assert!(matches!(
            err,
            GlossaryError::DuplicateId { kind: EntityKind::Definition, ref id } if id == "a"
        ));
    }

    #[tokio::test]
    async fn test_missing_label_aborts() {
        let json = SITE.replace(
            r#"{"id": "b", "label": {"en": "B", "pl": "B"}, "#,
            r#"{"id": "b", "#,
        );
        assert_ne!(json, SITE);

        let err = build_glossary_error(&json).await;
        assert!(matches!(
            err,
            GlossaryError::MissingField {
                kind: EntityKind::Definition,
                position: 1,
                field: "label"
            }
        ));
    }

    #[tokio::test]
    async fn test_later_language_failure_keeps_earlier_pages() {
        let json = SITE.replace(
            r#""title": {"en": "Basics", "pl": "Podstawy"}"#,
            r#""title": {"en": "Basics"}"#,
        );
        let (builder, sink) = builder(&json, BuildConfig::default());

        let err = builder.build().await.unwrap_err();

        assert!(matches!(err, BuildError::Render { ref lang, .. } if lang == "pl"));
        let pages = sink.pages.lock().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lang, "en");
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        let (builder, _) = builder("{ not json", BuildConfig::default());
        assert!(matches!(builder.build().await, Err(BuildError::Source(_))));
    }

    #[test]
    fn test_render_page_is_idempotent() {
        let (builder, _) = builder(SITE, BuildConfig::default());
        let doc: SiteDocument = serde_json::from_str(SITE).unwrap();

        let first = builder.render_page(&doc, "en").unwrap();
        let second = builder.render_page(&doc, "en").unwrap();
        assert_eq!(first.html, second.html);
        assert_eq!(compute_content_hash(&first.html), compute_content_hash(&second.html));
    }
}
