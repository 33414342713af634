use crate::classifier::classifier;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Correspondent {
    pub id: i32,
    pub document_count: i32,
    pub name: String,
    pub slug: String,
    pub owner: Option<i32>,
}

classifier!(Correspondent, "/api/correspondents/", "correspondent");
