use serde::{Deserialize, Serialize};

/// A named label that documents are filed under: correspondents, tags and
/// document types all share the same list endpoint shape.
pub trait Classifier: for<'de> Deserialize<'de> + Serialize + Clone {
    /// Collection path, e.g. `/api/tags/`.
    const ENDPOINT: &'static str;
    /// Human readable kind used in error messages.
    const KIND: &'static str;

    fn id(&self) -> i32;
    fn name(&self) -> &str;
}

macro_rules! classifier {
    ($ty:ident, $endpoint:literal, $kind:literal) => {
        impl $crate::classifier::Classifier for $ty {
            const ENDPOINT: &'static str = $endpoint;
            const KIND: &'static str = $kind;

            fn id(&self) -> i32 {
                self.id
            }
            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

pub(crate) use classifier;
