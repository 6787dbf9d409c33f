use super::common::BlockCommon;
use super::emoji_or_file::EmojiOrFile;
use super::rich_text::RichTextList;
use crate::types::Color;

/// Text content block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlockContent {
    pub text: RichTextList,
    pub color: Color,
}

impl TextBlockContent {
    pub fn new(text: RichTextList) -> Self {
        Self {
            text,
            color: Color::Default,
        }
    }
}

/// Paragraph block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading 1 block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Heading1Block {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading 2 block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Heading2Block {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading 3 block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Heading3Block {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Bulleted list item block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulletedListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Numbered list item block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberedListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Toggle block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToggleBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// To-do block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

/// Quote block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuoteBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub icon: Option<EmojiOrFile>,
    pub content: TextBlockContent,
}

/// Code block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub caption: RichTextList,
    pub content: TextBlockContent,
}

/// Equation block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EquationBlock {
    pub common: BlockCommon,
    pub expression: String,
}

/// Child page block: a sub-page embedded in its parent
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChildPageBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Child database block: an inline database
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChildDatabaseBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Embed block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbedBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: RichTextList,
}

/// Bookmark block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookmarkBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: RichTextList,
}

/// Divider block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DividerBlock {
    pub common: BlockCommon,
}

/// Table of contents block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableOfContentsBlock {
    pub common: BlockCommon,
    pub color: Color,
}

/// A block type this client doesn't recognize yet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnknownTypeBlock {
    pub common: BlockCommon,
    pub block_type: String,
}
