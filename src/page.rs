use serde::{Deserialize, Serialize};

/// One page of a Paperless list endpoint. `all` carries the ids of every
/// matching item, not only the ones on this page.
#[derive(Serialize, Deserialize, Debug)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "for<'de2> T: Deserialize<'de2>"
))]
pub struct Page<T> {
    pub count: i32,
    #[serde(default)]
    pub all: Vec<i32>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}
