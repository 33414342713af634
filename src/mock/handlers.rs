use super::{error::MockError, MockState};
use crate::{
    bulk_edit::BulkEdit, classifier::Classifier, document::Document, filter::DocumentFilter,
    page::Page, selection::SelectionData,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use log::{debug, info};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};

pub(crate) const DEFAULT_PAGE_SIZE: usize = 25;

type Params = Query<HashMap<String, String>>;

#[derive(Serialize)]
pub(crate) struct BulkEditReply {
    result: &'static str,
}

#[derive(Deserialize)]
pub(crate) struct SelectionBody {
    documents: Vec<i32>,
}

pub(crate) async fn list_documents(
    State(state): State<Arc<MockState>>,
    Query(params): Params,
) -> Result<Json<Page<Document>>, MockError> {
    let filter = DocumentFilter::from_query(&params)?;
    debug!("Listing documents with {:?}", filter);

    let mut docs: Vec<Document> = state
        .documents()
        .into_iter()
        .filter(|d| filter.matches(d))
        .collect();
    filter.sort(&mut docs);

    Ok(Json(paginate(
        &state.base_url,
        "/api/documents/",
        &params,
        docs,
        |d| d.id,
    )?))
}

pub(crate) async fn get_document(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i32>,
) -> Result<Json<Document>, MockError> {
    state
        .documents()
        .into_iter()
        .find(|d| d.id == id)
        .map(Json)
        .ok_or(MockError::DocumentNotFound(id))
}

pub(crate) async fn bulk_edit(
    State(state): State<Arc<MockState>>,
    Json(edit): Json<BulkEdit>,
) -> Json<BulkEditReply> {
    info!(
        "Recording bulk edit {} on {:?}",
        edit.method.name(),
        edit.documents
    );
    state.record(edit);
    Json(BulkEditReply { result: "OK" })
}

pub(crate) async fn selection_data(
    State(state): State<Arc<MockState>>,
    Json(body): Json<SelectionBody>,
) -> Json<SelectionData> {
    let docs = state.documents();
    let selected: Vec<&Document> = docs
        .iter()
        .filter(|d| body.documents.contains(&d.id))
        .collect();
    let fixtures = &state.fixtures;

    Json(SelectionData::compute(
        &selected,
        &ids(&fixtures.correspondents),
        &ids(&fixtures.tags),
        &ids(&fixtures.document_types),
    ))
}

pub(crate) async fn list_correspondents(
    State(state): State<Arc<MockState>>,
    Query(params): Params,
) -> Result<Json<Page<crate::correspondent::Correspondent>>, MockError> {
    classifier_page(&state, &params, &state.fixtures.correspondents).map(Json)
}

pub(crate) async fn list_tags(
    State(state): State<Arc<MockState>>,
    Query(params): Params,
) -> Result<Json<Page<crate::tag::Tag>>, MockError> {
    classifier_page(&state, &params, &state.fixtures.tags).map(Json)
}

pub(crate) async fn list_document_types(
    State(state): State<Arc<MockState>>,
    Query(params): Params,
) -> Result<Json<Page<crate::document_type::DocumentType>>, MockError> {
    classifier_page(&state, &params, &state.fixtures.document_types).map(Json)
}

fn ids<T: Classifier>(items: &[T]) -> Vec<i32> {
    items.iter().map(Classifier::id).collect()
}

fn classifier_page<T: Classifier>(
    state: &MockState,
    params: &HashMap<String, String>,
    items: &[T],
) -> Result<Page<T>, MockError> {
    let needle = params.get("name__icontains").map(|n| n.to_lowercase());
    let matching: Vec<T> = items
        .iter()
        .filter(|c| {
            needle
                .as_deref()
                .map_or(true, |n| c.name().to_lowercase().contains(n))
        })
        .cloned()
        .collect();
    paginate(&state.base_url, T::ENDPOINT, params, matching, |c| c.id())
}

fn positive(params: &HashMap<String, String>, key: &str, default: usize) -> Result<usize, MockError> {
    match params.get(key) {
        None => Ok(default),
        Some(v) => match v.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(MockError::BadRequest(format!("{key}={v}"))),
        },
    }
}

/// Cuts `items` down to the requested page and links its neighbours with
/// absolute URLs that keep every other query parameter.
fn paginate<T>(
    base_url: &str,
    path: &str,
    params: &HashMap<String, String>,
    items: Vec<T>,
    id: impl Fn(&T) -> i32,
) -> Result<Page<T>, MockError> {
    let page = positive(params, "page", 1)?;
    let page_size = positive(params, "page_size", DEFAULT_PAGE_SIZE)?;

    let count = items.len();
    let start = match (page - 1).checked_mul(page_size) {
        Some(start) if start < count || page == 1 => start,
        _ => return Err(MockError::InvalidPage),
    };

    let all = items.iter().map(&id).collect();
    let link = |p: usize| page_link(base_url, path, params, p);
    let next = if start.checked_add(page_size).is_some_and(|end| end < count) {
        Some(link(page + 1)?)
    } else {
        None
    };
    let previous = if page > 1 { Some(link(page - 1)?) } else { None };

    Ok(Page {
        count: count as i32,
        all,
        next,
        previous,
        results: items.into_iter().skip(start).take(page_size).collect(),
    })
}

fn page_link(
    base_url: &str,
    path: &str,
    params: &HashMap<String, String>,
    page: usize,
) -> Result<String, MockError> {
    let mut pairs: Vec<(&str, String)> = params
        .iter()
        .filter(|(k, _)| k.as_str() != "page")
        .map(|(k, v)| (k.as_str(), v.clone()))
        .collect();
    pairs.sort();
    pairs.insert(0, ("page", page.to_string()));

    Url::parse_with_params(&format!("{base_url}{path}"), &pairs)
        .map(String::from)
        .map_err(|e| MockError::BadRequest(e.to_string()))
}
