/// Where to resume a paginated listing.
///
/// The cursor is issued by the server and only ever passed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub start_cursor: String,
}

impl Pagination {
    pub fn new(start_cursor: impl Into<String>) -> Self {
        Self {
            start_cursor: start_cursor.into(),
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage<T> {
    pub results: Vec<T>,
    /// `None` on the last page
    pub next_pagination: Option<Pagination>,
}

impl<T> ResultPage<T> {
    pub fn has_more(&self) -> bool {
        self.next_pagination.is_some()
    }

    pub fn map<U, F>(self, f: F) -> ResultPage<U>
    where
        F: FnMut(T) -> U,
    {
        ResultPage {
            results: self.results.into_iter().map(f).collect(),
            next_pagination: self.next_pagination,
        }
    }
}

impl<T> Default for ResultPage<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            next_pagination: None,
        }
    }
}
