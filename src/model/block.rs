use super::blocks::*;
use super::common::{BlockCommon, Children};
use super::rich_text::RichTextList;
use crate::types::BlockId;

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::TableOfContents($pattern) => $result,
            Block::UnknownType($pattern) => $result,
        }
    };
}

/// Block represents all supported Notion block types
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(Heading1Block),
    Heading2(Heading2Block),
    Heading3(Heading3Block),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    ChildPage(ChildPageBlock),
    ChildDatabase(ChildDatabaseBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Callout(CalloutBlock),
    Quote(QuoteBlock),
    Embed(EmbedBlock),
    Bookmark(BookmarkBlock),
    Divider(DividerBlock),
    TableOfContents(TableOfContentsBlock),
    UnknownType(UnknownTypeBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get mutable common block data
    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    /// Get the block's children state
    pub fn children(&self) -> &Children {
        &self.common().children
    }

    /// Replace the children state, e.g. once they have been fetched
    pub fn set_children(&mut self, children: Children) {
        self.common_mut().children = children;
    }

    /// The block's rich text, for the variants that carry one.
    pub fn text(&self) -> Option<&RichTextList> {
        match self {
            Block::Paragraph(b) => Some(&b.content.text),
            Block::Heading1(b) => Some(&b.content.text),
            Block::Heading2(b) => Some(&b.content.text),
            Block::Heading3(b) => Some(&b.content.text),
            Block::BulletedListItem(b) => Some(&b.content.text),
            Block::NumberedListItem(b) => Some(&b.content.text),
            Block::ToDo(b) => Some(&b.content.text),
            Block::Toggle(b) => Some(&b.content.text),
            Block::Code(b) => Some(&b.content.text),
            Block::Callout(b) => Some(&b.content.text),
            Block::Quote(b) => Some(&b.content.text),
            Block::ChildPage(_)
            | Block::ChildDatabase(_)
            | Block::Equation(_)
            | Block::Embed(_)
            | Block::Bookmark(_)
            | Block::Divider(_)
            | Block::TableOfContents(_)
            | Block::UnknownType(_) => None,
        }
    }

    /// Get block type name as it appears on the wire
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::ChildPage(_) => "child_page",
            Block::ChildDatabase(_) => "child_database",
            Block::Code(_) => "code",
            Block::Equation(_) => "equation",
            Block::Callout(_) => "callout",
            Block::Quote(_) => "quote",
            Block::Embed(_) => "embed",
            Block::Bookmark(_) => "bookmark",
            Block::Divider(_) => "divider",
            Block::TableOfContents(_) => "table_of_contents",
            Block::UnknownType(b) => &b.block_type,
        }
    }

    /// Number of blocks in this subtree, counting only loaded children.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children()
            .fetched()
            .map(|children| children.iter().map(Block::subtree_len).sum())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_type() {
        let block = Block::Paragraph(ParagraphBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(RichTextList::plain("hi")),
        });
        assert_eq!(block.block_type(), "paragraph");
        assert_eq!(block.text().and_then(|t| t.plain_text()).as_deref(), Some("hi"));

        let divider = Block::Divider(DividerBlock::default());
        assert!(divider.text().is_none());
    }

    #[test]
    fn test_unknown_keeps_raw_type() {
        let block = Block::UnknownType(UnknownTypeBlock {
            common: BlockCommon::default(),
            block_type: "synced_block".to_string(),
        });
        assert_eq!(block.block_type(), "synced_block");
    }

    #[test]
    fn test_subtree_len_counts_fetched_children() {
        let leaf = Block::Divider(DividerBlock::default());
        let mut parent = Block::Toggle(ToggleBlock::default());
        parent.set_children(Children::Fetched(vec![leaf.clone(), leaf]));
        assert_eq!(parent.subtree_len(), 3);
    }
}
