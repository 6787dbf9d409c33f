use crate::types::{DatabaseId, PageId};

/// Where a page or database lives.
///
/// `Workspace` is only ever read: the API does not accept a workspace as the
/// parent of a created object, and the out-converter rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    Database(DatabaseId),
    Page(PageId),
    Workspace,
    /// A parent type this client doesn't recognize yet
    Unknown { type_name: String },
}

impl Reference {
    pub fn database_id(&self) -> Option<&DatabaseId> {
        match self {
            Reference::Database(id) => Some(id),
            _ => None,
        }
    }

    pub fn page_id(&self) -> Option<&PageId> {
        match self {
            Reference::Page(id) => Some(id),
            _ => None,
        }
    }
}
