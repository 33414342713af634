use crate::{document::Document, errors::PaperlessError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A single operation applied to a set of documents through
/// `POST /api/documents/bulk_edit/`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "WireBulkEdit", into = "WireBulkEdit")]
pub struct BulkEdit {
    pub documents: Vec<i32>,
    pub method: BulkEditMethod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkEditMethod {
    ModifyTags {
        add_tags: Vec<i32>,
        remove_tags: Vec<i32>,
    },
    AddTag(i32),
    RemoveTag(i32),
    SetCorrespondent(Option<i32>),
    SetDocumentType(Option<i32>),
}

#[derive(Deserialize, Debug)]
pub(crate) struct BulkEditResult {
    pub result: String,
}

impl BulkEditResult {
    pub(crate) fn into_result(self) -> Result<(), PaperlessError> {
        if self.result != "OK" {
            return Err(PaperlessError::BulkEditRejected(self.result));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct WireBulkEdit {
    documents: Vec<i32>,
    method: String,
    #[serde(default)]
    parameters: Value,
}

#[derive(Deserialize)]
struct ModifyTags {
    #[serde(default)]
    add_tags: Vec<i32>,
    #[serde(default)]
    remove_tags: Vec<i32>,
}

#[derive(Deserialize)]
struct SingleTag {
    tag: i32,
}

#[derive(Deserialize)]
struct SetCorrespondent {
    correspondent: Option<i32>,
}

#[derive(Deserialize)]
struct SetDocumentType {
    document_type: Option<i32>,
}

impl BulkEdit {
    pub fn new(documents: impl IntoIterator<Item = i32>, method: BulkEditMethod) -> BulkEdit {
        BulkEdit {
            documents: documents.into_iter().collect(),
            method,
        }
    }

    pub fn add_tags(documents: impl IntoIterator<Item = i32>, tags: &[i32]) -> BulkEdit {
        BulkEdit::new(
            documents,
            BulkEditMethod::ModifyTags {
                add_tags: tags.to_vec(),
                remove_tags: Vec::new(),
            },
        )
    }

    pub fn remove_tags(documents: impl IntoIterator<Item = i32>, tags: &[i32]) -> BulkEdit {
        BulkEdit::new(
            documents,
            BulkEditMethod::ModifyTags {
                add_tags: Vec::new(),
                remove_tags: tags.to_vec(),
            },
        )
    }

    pub fn set_correspondent(
        documents: impl IntoIterator<Item = i32>,
        correspondent: Option<i32>,
    ) -> BulkEdit {
        BulkEdit::new(documents, BulkEditMethod::SetCorrespondent(correspondent))
    }

    pub fn set_document_type(
        documents: impl IntoIterator<Item = i32>,
        document_type: Option<i32>,
    ) -> BulkEdit {
        BulkEdit::new(documents, BulkEditMethod::SetDocumentType(document_type))
    }

    /// Applies the edit to every targeted document in `docs`; others are
    /// left alone. Added tags are appended once, never duplicated.
    pub fn apply(&self, docs: &mut [Document]) {
        for doc in docs.iter_mut().filter(|d| self.documents.contains(&d.id)) {
            match &self.method {
                BulkEditMethod::ModifyTags {
                    add_tags,
                    remove_tags,
                } => {
                    doc.tags.retain(|t| !remove_tags.contains(t));
                    for t in add_tags {
                        add_tag(doc, *t);
                    }
                }
                BulkEditMethod::AddTag(t) => add_tag(doc, *t),
                BulkEditMethod::RemoveTag(t) => doc.tags.retain(|x| x != t),
                BulkEditMethod::SetCorrespondent(c) => doc.correspondent = *c,
                BulkEditMethod::SetDocumentType(dt) => doc.document_type = *dt,
            }
        }
    }
}

fn add_tag(doc: &mut Document, tag: i32) {
    if !doc.has_tag(tag) {
        doc.tags.push(tag);
    }
}

impl BulkEditMethod {
    pub fn name(&self) -> &'static str {
        match self {
            BulkEditMethod::ModifyTags { .. } => "modify_tags",
            BulkEditMethod::AddTag(_) => "add_tag",
            BulkEditMethod::RemoveTag(_) => "remove_tag",
            BulkEditMethod::SetCorrespondent(_) => "set_correspondent",
            BulkEditMethod::SetDocumentType(_) => "set_document_type",
        }
    }

    fn parameters(&self) -> Value {
        match self {
            BulkEditMethod::ModifyTags {
                add_tags,
                remove_tags,
            } => json!({ "add_tags": add_tags, "remove_tags": remove_tags }),
            BulkEditMethod::AddTag(tag) | BulkEditMethod::RemoveTag(tag) => json!({ "tag": tag }),
            BulkEditMethod::SetCorrespondent(correspondent) => {
                json!({ "correspondent": correspondent })
            }
            BulkEditMethod::SetDocumentType(document_type) => {
                json!({ "document_type": document_type })
            }
        }
    }
}

impl TryFrom<WireBulkEdit> for BulkEdit {
    type Error = PaperlessError;

    fn try_from(wire: WireBulkEdit) -> Result<Self, Self::Error> {
        let params = wire.parameters;
        let method = match wire.method.as_str() {
            "modify_tags" => {
                let p: ModifyTags = serde_json::from_value(params)?;
                BulkEditMethod::ModifyTags {
                    add_tags: p.add_tags,
                    remove_tags: p.remove_tags,
                }
            }
            "add_tag" => BulkEditMethod::AddTag(serde_json::from_value::<SingleTag>(params)?.tag),
            "remove_tag" => {
                BulkEditMethod::RemoveTag(serde_json::from_value::<SingleTag>(params)?.tag)
            }
            "set_correspondent" => BulkEditMethod::SetCorrespondent(
                serde_json::from_value::<SetCorrespondent>(params)?.correspondent,
            ),
            "set_document_type" => BulkEditMethod::SetDocumentType(
                serde_json::from_value::<SetDocumentType>(params)?.document_type,
            ),
            other => return Err(PaperlessError::UnsupportedBulkEdit(other.to_owned())),
        };
        Ok(BulkEdit {
            documents: wire.documents,
            method,
        })
    }
}

impl From<BulkEdit> for WireBulkEdit {
    fn from(edit: BulkEdit) -> Self {
        WireBulkEdit {
            parameters: edit.method.parameters(),
            method: edit.method.name().to_owned(),
            documents: edit.documents,
        }
    }
}
