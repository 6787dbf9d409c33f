use crate::types::UserId;

/// A workspace member or integration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub kind: UserKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserKind {
    Person { email: Option<String> },
    Bot,
    /// Only the ID is known, e.g. `created_by` on a page.
    Partial,
    /// A user type this client doesn't recognize yet
    Unknown { type_name: String },
}

impl User {
    /// A user known only by ID, as used in outbound mentions and people values.
    pub fn reference(id: UserId) -> Self {
        Self {
            id,
            name: None,
            avatar_url: None,
            kind: UserKind::Partial,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match &self.kind {
            UserKind::Person { email } => email.as_deref(),
            _ => None,
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.kind, UserKind::Bot)
    }
}
