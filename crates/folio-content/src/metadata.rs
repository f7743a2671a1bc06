//! Page metadata: the descriptive fields a site layout uses for navigation,
//! previews, and "edit this page" links.

use folio_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Descriptive fields attached to a document.
///
/// `title` and `description` are required; [`DocumentMetadata::validate`]
/// rejects empty values. `date` is free-form display text and `edit_url`
/// is a path relative to the site root; neither is checked here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Short summary used for previews and SEO.
    #[serde(default)]
    pub description: String,

    /// Publication date as written by the author, e.g. `"26 May 2018"`.
    #[serde(default)]
    pub date: String,

    /// Author identifiers, in display order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Source location of this page relative to the site root.
    #[serde(default, alias = "editUrl")]
    pub edit_url: String,
}

impl DocumentMetadata {
    /// Create metadata with the two required fields.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the publication date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Append an author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// Replace the author list.
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the edit-source path.
    pub fn with_edit_url(mut self, edit_url: impl Into<String>) -> Self {
        self.edit_url = edit_url.into();
        self
    }

    /// Check the required fields.
    ///
    /// A value made only of whitespace counts as empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMetadata`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_metadata(field, "must not be empty"));
    }
    Ok(())
}
