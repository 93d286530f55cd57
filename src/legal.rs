use chrono::NaiveDate;
use dashmap::DashMap;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

#[cfg(feature = "ssr")]
use gray_matter::{engine::YAML, Matter};
#[cfg(feature = "ssr")]
use pulldown_cmark::{Options, Parser};

pub static GLOBAL_LEGAL_CACHE: LazyLock<DashMap<LegalPage, LegalDocument>> =
    LazyLock::new(DashMap::new);

#[derive(Embed)]
#[folder = "legal"]
#[cfg_attr(feature = "hydrate", metadata_only = true)]
pub struct Documents;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalPage {
    Cookies,
    Privacy,
    Dsar,
}

impl LegalPage {
    pub const ALL: [LegalPage; 3] = [LegalPage::Cookies, LegalPage::Privacy, LegalPage::Dsar];

    pub fn slug(self) -> &'static str {
        match self {
            LegalPage::Cookies => "cookies",
            LegalPage::Privacy => "privacy",
            LegalPage::Dsar => "dsar",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug() == slug)
    }

    fn file_name(self) -> String {
        format!("{}.md", self.slug())
    }
}

#[cfg(feature = "ssr")]
#[derive(Deserialize, Debug)]
struct FrontMatter {
    title: String,
    description: String,
    updated: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalDocument {
    pub title: String,
    pub description: String,
    pub updated: NaiveDate,
    /// Rendered HTML body.
    pub content: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LegalError {
    #[error("Document not found")]
    NotFound,
    #[error("Couldn't parse document")]
    ParseError,
}

#[cfg(feature = "ssr")]
fn render(source: &str) -> Result<LegalDocument, LegalError> {
    let matter = Matter::<YAML>::new();
    let fm = matter
        .parse_with_struct::<FrontMatter>(source)
        .ok_or(LegalError::ParseError)?;

    let parser = Parser::new_ext(&fm.content, Options::all());
    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, parser);

    Ok(LegalDocument {
        title: fm.data.title,
        description: fm.data.description,
        updated: fm.data.updated,
        content: html_output,
    })
}

/// Renders an embedded document once and serves it from the cache afterwards.
#[cfg(feature = "ssr")]
pub fn get_document(page: LegalPage) -> Result<LegalDocument, LegalError> {
    let cache = &*GLOBAL_LEGAL_CACHE;
    if let Some(doc) = cache.get(&page) {
        return Ok(doc.clone());
    }
    let file = Documents::get(&page.file_name()).ok_or(LegalError::NotFound)?;
    let source = std::str::from_utf8(&file.data).map_err(|_| LegalError::ParseError)?;
    let doc = render(source)?;
    cache.insert(page, doc.clone());
    Ok(doc)
}
