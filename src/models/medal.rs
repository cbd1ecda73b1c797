use serde::{Deserialize, Serialize};

/// A medal, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Medal {
    pub name: String,
}
