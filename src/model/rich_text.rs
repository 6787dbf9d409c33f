// src/model/rich_text.rs
//! Rich text: runs of styled text, mentions and inline equations.

use super::date::DateOrDateRange;
use super::user::User;
use crate::types::{Color, DatabaseId, PageId, UserId};

/// Styling of a rich text run.
///
/// `Annotations::DEFAULT` is the canonical unstyled value; the out-converter
/// skips serializing annotations that equal it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl Annotations {
    pub const DEFAULT: Annotations = Annotations {
        bold: false,
        italic: false,
        strikethrough: false,
        underline: false,
        code: false,
        color: Color::Default,
    };

    pub const BOLD: Annotations = Annotations {
        bold: true,
        ..Self::DEFAULT
    };

    pub const ITALIC: Annotations = Annotations {
        italic: true,
        ..Self::DEFAULT
    };

    pub const STRIKETHROUGH: Annotations = Annotations {
        strikethrough: true,
        ..Self::DEFAULT
    };

    pub const UNDERLINE: Annotations = Annotations {
        underline: true,
        ..Self::DEFAULT
    };

    pub const CODE: Annotations = Annotations {
        code: true,
        ..Self::DEFAULT
    };

    pub fn colored(color: Color) -> Self {
        Self {
            color,
            ..Self::DEFAULT
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl Default for Annotations {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One run of rich text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RichText {
    pub plain_text: String,
    pub href: Option<String>,
    pub annotations: Annotations,
    pub kind: RichTextKind,
}

/// The kind of rich text content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RichTextKind {
    Text { link_url: Option<String> },
    Mention(Mention),
    Equation { expression: String },
    /// A rich text type this client doesn't recognize yet
    Unknown { type_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mention {
    User(User),
    Page(PageId),
    Database(DatabaseId),
    Date(DateOrDateRange),
    /// A mention type this client doesn't recognize yet
    Unknown { type_name: String },
}

impl RichText {
    /// Unstyled, unlinked text.
    pub fn plain(content: impl Into<String>) -> Self {
        Self::text(content, None, Annotations::DEFAULT)
    }

    pub fn text(content: impl Into<String>, link_url: Option<String>, annotations: Annotations) -> Self {
        Self {
            plain_text: content.into(),
            href: link_url.clone(),
            annotations,
            kind: RichTextKind::Text { link_url },
        }
    }

    pub fn mention(mention: Mention, annotations: Annotations) -> Self {
        Self {
            plain_text: String::new(),
            href: None,
            annotations,
            kind: RichTextKind::Mention(mention),
        }
    }

    pub fn equation(expression: impl Into<String>, annotations: Annotations) -> Self {
        let expression = expression.into();
        Self {
            plain_text: expression.clone(),
            href: None,
            annotations,
            kind: RichTextKind::Equation { expression },
        }
    }
}

/// An ordered sequence of rich text runs, with chainable builders.
///
/// ```ignore
/// let text = RichTextList::new()
///     .text("Ping ")
///     .user_mention(user_id)
///     .styled_text("!", None, Annotations::BOLD);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RichTextList {
    items: Vec<RichText>,
}

impl RichTextList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<RichText>) -> Self {
        Self { items }
    }

    /// A list holding a single plain text run.
    pub fn plain(content: impl Into<String>) -> Self {
        Self::new().text(content)
    }

    pub fn items(&self) -> &[RichText] {
        &self.items
    }

    pub fn into_items(self) -> Vec<RichText> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RichText> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Concatenated plain text of all runs, or `None` when the list is empty.
    pub fn plain_text(&self) -> Option<String> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.iter().map(|r| r.plain_text.as_str()).collect())
        }
    }

    pub fn push(mut self, rich_text: RichText) -> Self {
        self.items.push(rich_text);
        self
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.push(RichText::plain(content))
    }

    pub fn styled_text(
        self,
        content: impl Into<String>,
        link_url: Option<String>,
        annotations: Annotations,
    ) -> Self {
        self.push(RichText::text(content, link_url, annotations))
    }

    pub fn user_mention(self, user_id: UserId) -> Self {
        self.push(RichText::mention(
            Mention::User(User::reference(user_id)),
            Annotations::DEFAULT,
        ))
    }

    pub fn page_mention(self, page_id: PageId) -> Self {
        self.push(RichText::mention(Mention::Page(page_id), Annotations::DEFAULT))
    }

    pub fn database_mention(self, database_id: DatabaseId) -> Self {
        self.push(RichText::mention(
            Mention::Database(database_id),
            Annotations::DEFAULT,
        ))
    }

    pub fn date_mention(self, date: impl Into<DateOrDateRange>) -> Self {
        self.push(RichText::mention(
            Mention::Date(date.into()),
            Annotations::DEFAULT,
        ))
    }

    pub fn equation(self, expression: impl Into<String>) -> Self {
        self.push(RichText::equation(expression, Annotations::DEFAULT))
    }
}

impl From<Vec<RichText>> for RichTextList {
    fn from(items: Vec<RichText>) -> Self {
        Self::from_items(items)
    }
}

impl From<&str> for RichTextList {
    fn from(content: &str) -> Self {
        Self::plain(content)
    }
}

impl From<String> for RichTextList {
    fn from(content: String) -> Self {
        Self::plain(content)
    }
}

impl<'a> IntoIterator for &'a RichTextList {
    type Item = &'a RichText;
    type IntoIter = std::slice::Iter<'a, RichText>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
