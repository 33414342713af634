use crate::classifier::classifier;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub document_count: i32,
    pub name: String,
    pub slug: String,
    pub owner: Option<i32>,
    #[serde(default)]
    pub is_inbox_tag: bool,
}

classifier!(Tag, "/api/tags/", "tag");
