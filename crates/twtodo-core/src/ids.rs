//! Newtype wrappers for identifiers to ensure type safety.
//!
//! Remote ids are opaque strings handed out by Microsoft Graph; the local
//! uuid is the Taskwarrior record identity.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new id from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the inner string reference.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }

            /// True if the id is empty or whitespace only.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

string_id!(
    /// Identifier of a Microsoft To-Do list.
    ListId
);

string_id!(
    /// Identifier of a task inside a Microsoft To-Do list.
    TodoTaskId
);

string_id!(
    /// Taskwarrior's own uuid for a local record.
    LocalUuid
);

/// The join key between remote tasks and local records.
///
/// A task id is only unique within its list, so both halves are needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityKey {
    pub list_id: ListId,
    pub task_id: TodoTaskId,
}

impl IdentityKey {
    pub fn new(list_id: impl Into<ListId>, task_id: impl Into<TodoTaskId>) -> Self {
        Self {
            list_id: list_id.into(),
            task_id: task_id.into(),
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.list_id, self.task_id)
    }
}
