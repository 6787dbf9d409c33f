// src/api/block_tree.rs
//! Recursive materialization of a block tree.
//!
//! Each level lists its parent's children in full, then fetches the
//! subtrees of every child marked as having children concurrently. The
//! tasks of one level live in a `JoinSet` owned by that level's call, so
//! they are joined before it returns and aborted if it fails.

use super::client::ClientCore;
use crate::error::{NotionClientError, Result};
use crate::model::{Block, Children};
use crate::types::BlockId;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Fetches every descendant of `parent_id`, keeping sibling order.
///
/// The first failure anywhere in the tree fails the whole call; sibling
/// fetches still in flight are cancelled.
pub(crate) fn fetch_block_tree(
    core: Arc<ClientCore>,
    parent_id: BlockId,
) -> BoxFuture<'static, Result<Vec<Block>>> {
    async move {
        let mut blocks = core.get_all_block_list(&parent_id).await?;

        let mut subtrees = JoinSet::new();
        for (index, block) in blocks.iter().enumerate() {
            if block.children().needs_fetch() {
                let core = Arc::clone(&core);
                let child_id = block.id().clone();
                subtrees.spawn(async move {
                    fetch_block_tree(core, child_id)
                        .await
                        .map(|children| (index, children))
                });
            }
        }

        while let Some(joined) = subtrees.join_next().await {
            let (index, children) = joined.map_err(|e| NotionClientError::Client {
                message: format!("Block fetch under {} did not complete", parent_id),
                source: Some(Box::new(e)),
            })??;
            blocks[index].set_children(Children::Fetched(children));
        }

        Ok(blocks)
    }
    .boxed()
}
