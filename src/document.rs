use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: i32,
    pub title: String,
    pub tags: Vec<i32>,
    pub correspondent: Option<i32>,
    pub document_type: Option<i32>,
    #[serde(default)]
    pub created: Option<String>,
}

impl Document {
    pub fn has_tag(&self, tag: i32) -> bool {
        self.tags.contains(&tag)
    }
}
