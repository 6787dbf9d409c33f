// src/model/block_list.rs
//! Builder for block content sent with page creation and block appends.

use super::block::Block;
use super::blocks::*;
use super::common::BlockCommon;
use super::emoji_or_file::EmojiOrFile;
use super::rich_text::RichTextList;
use crate::types::Color;

/// Blocks accumulated for an outbound request.
///
/// Every block gets the synthetic empty ID. Nested content is supplied
/// through a closure receiving a fresh builder:
///
/// ```ignore
/// let content = MutableBlockList::new()
///     .heading1("Shopping")
///     .bullet_with("Fruit", |b| b.to_do("Apples", false).to_do("Pears", true))
///     .divider();
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutableBlockList {
    blocks: Vec<Block>,
}

fn nested<F>(children: F) -> Option<Vec<Block>>
where
    F: FnOnce(MutableBlockList) -> MutableBlockList,
{
    Some(children(MutableBlockList::new()).into_blocks())
}

impl MutableBlockList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn push(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    fn paragraph_block(self, text: RichTextList, children: Option<Vec<Block>>) -> Self {
        self.push(Block::Paragraph(ParagraphBlock {
            common: BlockCommon::outbound(children),
            content: TextBlockContent::new(text),
        }))
    }

    pub fn paragraph(self, text: impl Into<RichTextList>) -> Self {
        self.paragraph_block(text.into(), None)
    }

    pub fn paragraph_with<F>(self, text: impl Into<RichTextList>, children: F) -> Self
    where
        F: FnOnce(MutableBlockList) -> MutableBlockList,
    {
        self.paragraph_block(text.into(), nested(children))
    }

    pub fn heading1(self, text: impl Into<RichTextList>) -> Self {
        self.push(Block::Heading1(Heading1Block {
            common: BlockCommon::outbound(None),
            content: TextBlockContent::new(text.into()),
        }))
    }

    pub fn heading2(self, text: impl Into<RichTextList>) -> Self {
        self.push(Block::Heading2(Heading2Block {
            common: BlockCommon::outbound(None),
            content: TextBlockContent::new(text.into()),
        }))
    }

    pub fn heading3(self, text: impl Into<RichTextList>) -> Self {
        self.push(Block::Heading3(Heading3Block {
            common: BlockCommon::outbound(None),
            content: TextBlockContent::new(text.into()),
        }))
    }

    fn bullet_block(self, text: RichTextList, children: Option<Vec<Block>>) -> Self {
        self.push(Block::BulletedListItem(BulletedListItemBlock {
            common: BlockCommon::outbound(children),
            content: TextBlockContent::new(text),
        }))
    }

    pub fn bullet(self, text: impl Into<RichTextList>) -> Self {
        self.bullet_block(text.into(), None)
    }

    pub fn bullet_with<F>(self, text: impl Into<RichTextList>, children: F) -> Self
    where
        F: FnOnce(MutableBlockList) -> MutableBlockList,
    {
        self.bullet_block(text.into(), nested(children))
    }

    fn number_block(self, text: RichTextList, children: Option<Vec<Block>>) -> Self {
        self.push(Block::NumberedListItem(NumberedListItemBlock {
            common: BlockCommon::outbound(children),
            content: TextBlockContent::new(text),
        }))
    }

    pub fn number(self, text: impl Into<RichTextList>) -> Self {
        self.number_block(text.into(), None)
    }

    pub fn number_with<F>(self, text: impl Into<RichTextList>, children: F) -> Self
    where
        F: FnOnce(MutableBlockList) -> MutableBlockList,
    {
        self.number_block(text.into(), nested(children))
    }

    fn to_do_block(self, text: RichTextList, checked: bool, children: Option<Vec<Block>>) -> Self {
        self.push(Block::ToDo(ToDoBlock {
            common: BlockCommon::outbound(children),
            content: TextBlockContent::new(text),
            checked,
        }))
    }

    pub fn to_do(self, text: impl Into<RichTextList>, checked: bool) -> Self {
        self.to_do_block(text.into(), checked, None)
    }

    pub fn to_do_with<F>(self, text: impl Into<RichTextList>, checked: bool, children: F) -> Self
    where
        F: FnOnce(MutableBlockList) -> MutableBlockList,
    {
        self.to_do_block(text.into(), checked, nested(children))
    }

    fn toggle_block(self, text: RichTextList, children: Option<Vec<Block>>) -> Self {
        self.push(Block::Toggle(ToggleBlock {
            common: BlockCommon::outbound(children),
            content: TextBlockContent::new(text),
        }))
    }

    pub fn toggle(self, text: impl Into<RichTextList>) -> Self {
        self.toggle_block(text.into(), None)
    }

    pub fn toggle_with<F>(self, text: impl Into<RichTextList>, children: F) -> Self
    where
        F: FnOnce(MutableBlockList) -> MutableBlockList,
    {
        self.toggle_block(text.into(), nested(children))
    }

    pub fn quote(self, text: impl Into<RichTextList>) -> Self {
        self.push(Block::Quote(QuoteBlock {
            common: BlockCommon::outbound(None),
            content: TextBlockContent::new(text.into()),
        }))
    }

    pub fn callout(self, text: impl Into<RichTextList>, icon: Option<EmojiOrFile>) -> Self {
        self.push(Block::Callout(CalloutBlock {
            common: BlockCommon::outbound(None),
            icon,
            content: TextBlockContent::new(text.into()),
        }))
    }

    pub fn code(self, text: impl Into<RichTextList>, language: impl Into<String>) -> Self {
        self.push(Block::Code(CodeBlock {
            common: BlockCommon::outbound(None),
            language: language.into(),
            caption: RichTextList::new(),
            content: TextBlockContent::new(text.into()),
        }))
    }

    pub fn equation(self, expression: impl Into<String>) -> Self {
        self.push(Block::Equation(EquationBlock {
            common: BlockCommon::outbound(None),
            expression: expression.into(),
        }))
    }

    pub fn embed(self, url: impl Into<String>) -> Self {
        self.push(Block::Embed(EmbedBlock {
            common: BlockCommon::outbound(None),
            url: url.into(),
            caption: RichTextList::new(),
        }))
    }

    pub fn bookmark(self, url: impl Into<String>) -> Self {
        self.push(Block::Bookmark(BookmarkBlock {
            common: BlockCommon::outbound(None),
            url: url.into(),
            caption: RichTextList::new(),
        }))
    }

    pub fn divider(self) -> Self {
        self.push(Block::Divider(DividerBlock {
            common: BlockCommon::outbound(None),
        }))
    }

    pub fn table_of_contents(self) -> Self {
        self.push(Block::TableOfContents(TableOfContentsBlock {
            common: BlockCommon::outbound(None),
            color: Color::Default,
        }))
    }
}
