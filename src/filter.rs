use crate::{document::Document, errors::PaperlessError};
use log::warn;
use std::{cmp::Ordering, collections::HashMap};

pub const TAGS_ALL: &str = "tags__id__all";
pub const CORRESPONDENT_IN: &str = "correspondent__id__in";
pub const CORRESPONDENT_NONE: &str = "correspondent__id__none";
pub const ORDERING: &str = "ordering";
pub const PAGE_SIZE: &str = "page_size";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrespondentFilter {
    /// Documents filed under any of these correspondents.
    In(Vec<i32>),
    /// Documents filed under none of these, including unassigned ones.
    NotIn(Vec<i32>),
}

/// Query for `GET /api/documents/`.
///
/// Conditions combine with AND. Built with chained setters and turned into
/// query pairs with [`DocumentFilter::to_query`]; the mock backend parses
/// the same pairs back with [`DocumentFilter::from_query`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub tags_all: Vec<i32>,
    pub correspondent: Option<CorrespondentFilter>,
    pub ordering: Option<String>,
    pub page_size: Option<u32>,
}

impl DocumentFilter {
    pub fn tag(mut self, id: i32) -> DocumentFilter {
        if !self.tags_all.contains(&id) {
            self.tags_all.push(id);
        }
        self
    }

    pub fn correspondent_in(mut self, ids: impl IntoIterator<Item = i32>) -> DocumentFilter {
        self.correspondent = Some(CorrespondentFilter::In(ids.into_iter().collect()));
        self
    }

    pub fn correspondent_none(mut self, ids: impl IntoIterator<Item = i32>) -> DocumentFilter {
        self.correspondent = Some(CorrespondentFilter::NotIn(ids.into_iter().collect()));
        self
    }

    pub fn ordering(mut self, ordering: &str) -> DocumentFilter {
        self.ordering = Some(ordering.to_owned());
        self
    }

    pub fn page_size(mut self, size: u32) -> DocumentFilter {
        self.page_size = Some(size);
        self
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(size) = self.page_size {
            query.push((PAGE_SIZE, size.to_string()));
        }
        if let Some(o) = &self.ordering {
            query.push((ORDERING, o.clone()));
        }
        if !self.tags_all.is_empty() {
            query.push((TAGS_ALL, join_ids(&self.tags_all)));
        }
        match &self.correspondent {
            Some(CorrespondentFilter::In(ids)) => query.push((CORRESPONDENT_IN, join_ids(ids))),
            Some(CorrespondentFilter::NotIn(ids)) => {
                query.push((CORRESPONDENT_NONE, join_ids(ids)))
            }
            None => {}
        }
        query
    }

    pub fn from_query(query: &HashMap<String, String>) -> Result<DocumentFilter, PaperlessError> {
        let mut filter = DocumentFilter::default();

        if let Some(v) = query.get(TAGS_ALL) {
            filter.tags_all = parse_ids(TAGS_ALL, v)?;
        }
        match (query.get(CORRESPONDENT_IN), query.get(CORRESPONDENT_NONE)) {
            (Some(v), other) => {
                if other.is_some() {
                    warn!("Both {CORRESPONDENT_IN} and {CORRESPONDENT_NONE} given, ignoring exclusion");
                }
                filter.correspondent =
                    Some(CorrespondentFilter::In(parse_ids(CORRESPONDENT_IN, v)?));
            }
            (None, Some(v)) => {
                filter.correspondent =
                    Some(CorrespondentFilter::NotIn(parse_ids(CORRESPONDENT_NONE, v)?));
            }
            (None, None) => {}
        }
        if let Some(o) = query.get(ORDERING) {
            filter.ordering = Some(o.clone());
        }
        if let Some(v) = query.get(PAGE_SIZE) {
            let size = v.parse::<u32>().map_err(|_| invalid(PAGE_SIZE, v))?;
            filter.page_size = Some(size);
        }

        Ok(filter)
    }

    pub fn matches(&self, doc: &Document) -> bool {
        if !self.tags_all.iter().all(|t| doc.has_tag(*t)) {
            return false;
        }
        match &self.correspondent {
            Some(CorrespondentFilter::In(ids)) => {
                doc.correspondent.is_some_and(|c| ids.contains(&c))
            }
            Some(CorrespondentFilter::NotIn(ids)) => {
                !doc.correspondent.is_some_and(|c| ids.contains(&c))
            }
            None => true,
        }
    }

    /// Orders documents by the `ordering` field. Unknown fields leave the
    /// order untouched.
    pub fn sort(&self, docs: &mut [Document]) {
        let Some(ordering) = &self.ordering else {
            return;
        };
        let (descending, field) = match ordering.strip_prefix('-') {
            Some(f) => (true, f),
            None => (false, ordering.as_str()),
        };
        let cmp: fn(&Document, &Document) -> Ordering = match field {
            "id" => |a, b| a.id.cmp(&b.id),
            "title" => |a, b| a.title.cmp(&b.title),
            "created" => |a, b| a.created.cmp(&b.created),
            _ => {
                warn!("Unsupported ordering field {field:?}");
                return;
            }
        };
        docs.sort_by(|a, b| {
            let o = cmp(a, b);
            if descending {
                o.reverse()
            } else {
                o
            }
        });
    }
}

fn join_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_ids(param: &str, value: &str) -> Result<Vec<i32>, PaperlessError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i32>().map_err(|_| invalid(param, value)))
        .collect()
}

fn invalid(param: &str, value: &str) -> PaperlessError {
    PaperlessError::InvalidQuery {
        param: param.to_owned(),
        value: value.to_owned(),
    }
}
