use super::Block;
use crate::types::BlockId;
use chrono::{DateTime, Utc};

/// Children of a block, tracked in three states so that "may have children
/// but they have not been loaded" is never confused with "has none".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Children {
    /// The block has no children (server `has_children: false`), or the
    /// client-built block carries none.
    #[default]
    NotApplicable,
    /// The server reported `has_children: true`; fetch them by block ID.
    NotYetFetched,
    Fetched(Vec<Block>),
}

impl Children {
    /// State decoded from the wire `has_children` flag.
    pub fn from_has_children(has_children: bool) -> Self {
        if has_children {
            Children::NotYetFetched
        } else {
            Children::NotApplicable
        }
    }

    pub fn needs_fetch(&self) -> bool {
        matches!(self, Children::NotYetFetched)
    }

    /// Sentinel view: `None` when children are not applicable, an empty
    /// slice while they are still to be fetched.
    pub fn as_slice(&self) -> Option<&[Block]> {
        match self {
            Children::NotApplicable => None,
            Children::NotYetFetched => Some(&[]),
            Children::Fetched(blocks) => Some(blocks),
        }
    }

    /// Loaded children only.
    pub fn fetched(&self) -> Option<&[Block]> {
        match self {
            Children::Fetched(blocks) => Some(blocks),
            _ => None,
        }
    }
}

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockCommon {
    pub id: BlockId,
    /// `None` on blocks built client-side
    pub created: Option<DateTime<Utc>>,
    pub last_edited: Option<DateTime<Utc>>,
    pub children: Children,
}

impl BlockCommon {
    /// Common fields of a block built client-side for a create or append request.
    pub fn outbound(children: Option<Vec<Block>>) -> Self {
        Self {
            id: BlockId::empty(),
            created: None,
            last_edited: None,
            children: children.map(Children::Fetched).unwrap_or_default(),
        }
    }
}
