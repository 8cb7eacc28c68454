//! Rendering use case - turns the site document and glossary index into HTML

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::{Card, Labels, Localized, RenderedPage, SiteDocument};
use crate::store::{GlossaryError, TopicOutline};
use crate::tag_index::{GlossaryIndex, TagIndex};
use crate::text::{banner, escape_html, slugify};

/// Filters glossary cards by tag using the index embedded in the page
const TAG_SCRIPT: &str = r#"(function () {
  var source = document.getElementById('tag-index');
  if (!source) return;
  var index = JSON.parse(source.textContent);
  var cards = document.querySelectorAll('article.card');
  var active = null;
  document.querySelectorAll('a.tag-link').forEach(function (link) {
    link.addEventListener('click', function () {
      var tag = link.getAttribute('data-tag');
      active = active === tag ? null : tag;
      var ids = active ? (index[active] || []) : null;
      cards.forEach(function (card) {
        var id = card.id.slice(4);
        card.classList.toggle('dimmed', ids !== null && ids.indexOf(id) < 0);
      });
    });
  });
})();"#;

/// Configuration for the page renderer
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Stylesheet path relative to the site root
    pub stylesheet: String,
    /// Whether to emit decorative comment banners
    pub banners: bool,
    /// Whether to embed the tag index and the filtering script
    pub tag_script: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            stylesheet: "styles/main.css".to_string(),
            banners: true,
            tag_script: true,
        }
    }
}

/// Error type for rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Language '{0}' is not configured for this site")]
    UnknownLanguage(String),
    #[error("Missing '{lang}' text for {what}")]
    MissingTranslation { what: String, lang: String },
    #[error(transparent)]
    Glossary(#[from] GlossaryError),
    #[error("Failed to serialize tag index: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Resolved glossary data handed to the renderer
#[derive(Debug, Clone, Copy)]
pub struct GlossaryView<'a> {
    pub outline: &'a [TopicOutline<'a>],
    pub index: &'a GlossaryIndex,
}

/// Page renderer
pub struct PageRenderer {
    config: RenderConfig,
}

impl PageRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Output path of a language's page, relative to the site root
    pub fn output_path(doc: &SiteDocument, lang: &str) -> PathBuf {
        if doc.default_language() == Some(lang) {
            PathBuf::from("index.html")
        } else {
            PathBuf::from(lang).join("index.html")
        }
    }

    /// Render the page for one language
    pub fn render(
        &self,
        doc: &SiteDocument,
        lang: &str,
        glossary: Option<GlossaryView<'_>>,
    ) -> Result<RenderedPage, RenderError> {
        if !doc.languages.iter().any(|l| l == lang) {
            return Err(RenderError::UnknownLanguage(lang.to_string()));
        }

        let labels = doc.labels_for(lang);
        let site_title = localized(&doc.site_title, "site_title", lang)?;
        let root = if doc.default_language() == Some(lang) {
            ""
        } else {
            "../"
        };
        let anchors = glossary
            .map(|g| TagAnchors::new(&g.index.tags))
            .unwrap_or_default();
        let has_tags = glossary.is_some_and(|g| !g.index.tags.is_empty());

        let mut html = String::with_capacity(8 * 1024);
        html.push_str("<!DOCTYPE html>\n");
        let _ = writeln!(html, "<html lang=\"{}\">", escape_html(lang));
        html.push_str("<head>\n<meta charset=\"UTF-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", site_title);
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" href=\"{}{}\">",
            root, self.config.stylesheet
        );
        html.push_str("</head>\n<body>\n");
        html.push_str("<input type=\"checkbox\" id=\"theme-toggle\">\n");
        html.push_str("<div class=\"wrapper\">\n");

        self.push_banner(&mut html, "Navigation");
        html.push_str("<nav class=\"sidebar\">\n<div class=\"top-bar\">\n");
        html.push_str(&language_switch(doc, lang));
        html.push_str("\n  <label for=\"theme-toggle\" class=\"theme-switch\"></label>\n");
        html.push_str("</div>\n<ul>\n");
        html.push_str(&menu(doc, lang, &labels, glossary, has_tags)?);
        html.push_str("\n</ul>\n</nav>\n");

        html.push_str("<main class=\"content\">\n");
        self.push_banner(&mut html, "Content");
        let _ = writeln!(
            html,
            "<section id=\"home\"><h2>{}</h2>{}</section>",
            site_title,
            doc.index_content.get(lang).unwrap_or_default()
        );
        for page in &doc.pages {
            let title = localized(&page.title, &format!("page '{}' title", page.slug), lang)?;
            let _ = writeln!(
                html,
                "<section id=\"{}\"><h2>{}</h2>{}</section>",
                escape_html(&page.slug),
                title,
                page.content.get(lang).unwrap_or_default()
            );
        }

        if let Some(glossary) = glossary {
            let cards: HashMap<&str, &Card> = glossary
                .index
                .cards
                .iter()
                .map(|c| (c.id.as_str(), c))
                .collect();

            self.push_banner(&mut html, &labels.glossary);
            for outline in glossary.outline {
                render_topic(&mut html, outline, &cards, &anchors, &labels);
            }

            if has_tags {
                self.push_banner(&mut html, &labels.tags);
                render_tag_index(&mut html, &glossary.index.tags, &cards, &anchors, &labels);
            }
        }

        let _ = writeln!(html, "<footer><p>{}</p></footer>", labels.footer);
        html.push_str("</main>\n</div>\n");

        if let Some(glossary) = glossary.filter(|_| has_tags && self.config.tag_script) {
            self.push_banner(&mut html, "Scripts");
            let json = serde_json::to_string(&glossary.index.tags)?.replace("</", "<\\/");
            let _ = writeln!(
                html,
                "<script type=\"application/json\" id=\"tag-index\">{}</script>",
                json
            );
            let _ = writeln!(html, "<script>\n{}\n</script>", TAG_SCRIPT);
        }

        html.push_str("</body>\n</html>\n");

        Ok(RenderedPage {
            lang: lang.to_string(),
            path: Self::output_path(doc, lang),
            html,
            card_count: glossary.map_or(0, |g| g.index.cards.len()),
            tag_count: glossary.map_or(0, |g| g.index.tags.len()),
        })
    }

    fn push_banner(&self, html: &mut String, name: &str) {
        if self.config.banners {
            html.push_str(&banner(name));
            html.push('\n');
        }
    }
}

fn localized<'a>(
    text: &'a Localized,
    what: &str,
    lang: &str,
) -> Result<&'a str, RenderError> {
    text.get(lang).ok_or_else(|| RenderError::MissingTranslation {
        what: what.to_string(),
        lang: lang.to_string(),
    })
}

/// Language switch listing every site language with relative links
fn language_switch(doc: &SiteDocument, lang: &str) -> String {
    let root = if doc.default_language() == Some(lang) {
        ""
    } else {
        "../"
    };

    let mut out = String::new();
    out.push_str("  <details class=\"language\">\n");
    let _ = writeln!(out, "    <summary>{}</summary>", escape_html(&lang.to_uppercase()));
    for target in &doc.languages {
        let href = if target == lang {
            "index.html".to_string()
        } else {
            let path = PageRenderer::output_path(doc, target);
            let segments: Vec<_> = path.iter().map(|s| s.to_string_lossy()).collect();
            format!("{}{}", root, segments.join("/"))
        };
        let _ = writeln!(
            out,
            "    <a href=\"{}\">{}</a>",
            escape_html(&href),
            escape_html(&target.to_uppercase())
        );
    }
    out.push_str("  </details>");
    out
}

fn menu(
    doc: &SiteDocument,
    lang: &str,
    labels: &Labels,
    glossary: Option<GlossaryView<'_>>,
    has_tags: bool,
) -> Result<String, RenderError> {
    let mut items = vec![format!("<li><a href=\"#home\">{}</a></li>", labels.home)];

    for page in &doc.pages {
        let title = localized(&page.title, &format!("page '{}' title", page.slug), lang)?;
        items.push(format!(
            "<li><a href=\"#{}\">{}</a></li>",
            escape_html(&page.slug),
            title
        ));
    }

    if let Some(glossary) = glossary.filter(|g| !g.outline.is_empty()) {
        items.push(format!("<li class=\"menu-heading\">{}</li>", labels.glossary));
        for outline in glossary.outline {
            items.push(format!(
                "<li><a href=\"#topic-{}\">{}</a></li>",
                escape_html(&outline.topic.id),
                outline.topic.title
            ));
        }
    }

    if has_tags {
        items.push(format!("<li><a href=\"#tags\">{}</a></li>", labels.tags));
    }

    Ok(items.join("\n"))
}

fn render_topic(
    html: &mut String,
    outline: &TopicOutline<'_>,
    cards: &HashMap<&str, &Card>,
    anchors: &TagAnchors,
    labels: &Labels,
) {
    let _ = writeln!(
        html,
        "<section id=\"topic-{}\" class=\"glossary\"><h2>{}</h2>",
        escape_html(&outline.topic.id),
        outline.topic.title
    );
    for category in &outline.categories {
        let _ = writeln!(
            html,
            "<div class=\"category\" id=\"category-{}\"><h3>{}</h3>",
            escape_html(&category.category.id),
            category.category.title
        );
        for definition in &category.definitions {
            if let Some(card) = cards.get(definition.id.as_str()) {
                render_card(html, card, anchors, labels);
            }
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");
}

fn render_card(html: &mut String, card: &Card, anchors: &TagAnchors, labels: &Labels) {
    let _ = writeln!(html, "<article class=\"card\" id=\"def-{}\">", escape_html(&card.id));
    let _ = writeln!(html, "<h4>{}</h4>", card.title);
    if !card.body.is_empty() {
        let _ = writeln!(html, "<p>{}</p>", card.body);
    }
    if !card.tags.is_empty() {
        html.push_str("<ul class=\"card-tags\">");
        for tag in &card.tags {
            let _ = write!(
                html,
                "<li><a class=\"tag-link\" href=\"#{}\" data-tag=\"{}\">{}</a></li>",
                anchors.anchor(tag),
                escape_html(tag),
                escape_html(tag)
            );
        }
        html.push_str("</ul>\n");
    }
    if let Some(code) = &card.code {
        let _ = writeln!(
            html,
            "<figure class=\"example\"><figcaption>{}</figcaption><pre><code>{}</code></pre></figure>",
            labels.example,
            escape_html(code)
        );
    }
    html.push_str("</article>\n");
}

fn render_tag_index(
    html: &mut String,
    tags: &TagIndex,
    cards: &HashMap<&str, &Card>,
    anchors: &TagAnchors,
    labels: &Labels,
) {
    let _ = writeln!(
        html,
        "<section id=\"tags\" class=\"tag-index\"><h2>{}</h2>\n<ul>",
        labels.tags
    );
    for tag in tags.sorted_tags() {
        let links: Vec<String> = tags
            .get(tag)
            .unwrap_or_default()
            .iter()
            .map(|id| {
                let title = cards.get(id.as_str()).map_or(id.as_str(), |c| c.title.as_str());
                format!("<a href=\"#def-{}\">{}</a>", escape_html(id), title)
            })
            .collect();
        let _ = writeln!(
            html,
            "<li id=\"{}\"><span class=\"tag-name\">{}</span> {}</li>",
            anchors.anchor(tag),
            escape_html(tag),
            links.join(", ")
        );
    }
    html.push_str("</ul>\n</section>\n");
}

/// Unique `tag-<slug>` anchors, assigned in sorted tag order
#[derive(Debug, Default)]
struct TagAnchors {
    anchors: HashMap<String, String>,
}

impl TagAnchors {
    fn new(tags: &TagIndex) -> Self {
        let mut issued: HashSet<String> = HashSet::with_capacity(tags.len());
        let mut anchors = HashMap::with_capacity(tags.len());

        for tag in tags.sorted_tags() {
            let mut slug = slugify(tag);
            if slug.is_empty() {
                slug = "tag".to_string();
            }
            let mut anchor = format!("tag-{}", slug);
            let mut suffix = 2;
            // A suffixed anchor may equal another tag's plain slug
            while issued.contains(&anchor) {
                anchor = format!("tag-{}-{}", slug, suffix);
                suffix += 1;
            }
            issued.insert(anchor.clone());
            anchors.insert(tag.to_string(), anchor);
        }

        Self { anchors }
    }

    fn anchor(&self, tag: &str) -> String {
        self.anchors
            .get(tag)
            .cloned()
            .unwrap_or_else(|| format!("tag-{}", slugify(tag)))
    }
}
