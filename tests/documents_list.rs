use assert_matches::assert_matches;
use paperless_documents::{
    mock::{Fixtures, MockBackend},
    BulkEdit, Document, DocumentFilter, PaperlessError, SelectionState,
};

async fn backend() -> MockBackend {
    let _ = env_logger::builder().is_test(true).try_init();
    MockBackend::start(Fixtures::sample().unwrap()).await.unwrap()
}

fn ids(docs: &[Document]) -> Vec<i32> {
    docs.iter().map(|d| d.id).collect()
}

#[tokio::test]
async fn lists_every_document_with_thumbnails() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    let page = client
        .documents_page(&DocumentFilter::default().page_size(50).ordering("id"))
        .await
        .unwrap();
    assert_eq!(page.count, 4);
    assert_eq!(page.results[0].title, "lorem ipsum");
    assert!(page.next.is_none());
    assert_eq!(
        client.thumbnail_url(page.results[0].id),
        format!("{}/api/documents/1/thumb/", backend.url())
    );
}

#[tokio::test]
async fn follows_next_links_across_pages() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    let filter = DocumentFilter::default().page_size(3).ordering("-created");
    let first = client.documents_page(&filter).await.unwrap();
    assert_eq!(first.results.len(), 3);
    assert_eq!(first.all.len(), 4);
    assert!(first.next.is_some());

    let docs = client.documents(&filter).await.unwrap();
    assert_eq!(ids(&docs), vec![4, 2, 1, 3]);
}

#[tokio::test]
async fn filters_by_single_tag() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    let tag = client.tag_for_name("tag 2".to_string()).await.unwrap();
    let docs = client
        .documents(&DocumentFilter::default().tag(tag.id))
        .await
        .unwrap();
    assert_eq!(ids(&docs), vec![1]);
    assert!(docs.iter().all(|d| d.has_tag(tag.id)));
}

#[tokio::test]
async fn filters_including_and_excluding_correspondents() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    let abc = client
        .correspondent_for_name("ABC Test Correspondent".to_string())
        .await
        .unwrap();
    let c11 = client
        .correspondent_for_name("Corresp 11".to_string())
        .await
        .unwrap();

    let included = client
        .documents(&DocumentFilter::default().correspondent_in([abc.id, c11.id]))
        .await
        .unwrap();
    assert_eq!(ids(&included), vec![1, 4]);

    let excluded = client
        .documents(&DocumentFilter::default().correspondent_none([abc.id, c11.id]))
        .await
        .unwrap();
    assert_eq!(ids(&excluded), vec![2, 3]);
}

#[tokio::test]
async fn unknown_names_are_reported() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    let err = client
        .document_type_for_name("Receipt".to_string())
        .await
        .unwrap_err();
    assert_matches!(err, PaperlessError::UnknownName { kind: "document type", .. });
}

#[tokio::test]
async fn shows_partial_tag_selection() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    let selected = [1, 4];
    let data = client.selection_data(&selected).await.unwrap();
    assert_eq!(data.tag_state(4, selected.len()), SelectionState::All);
    assert_eq!(data.tag_state(2, selected.len()), SelectionState::Partial);
    assert_eq!(data.tag_state(3, selected.len()), SelectionState::None);
    assert_eq!(data.selected_tags.len(), 4);
}

#[tokio::test]
async fn applies_tags() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    let tag = client.tag_for_name("Test Tag".to_string()).await.unwrap();
    let edit = BulkEdit::add_tags([1], &[tag.id]);
    client.bulk_edit(&edit).await.unwrap();
    assert_eq!(backend.last_bulk_edit(), Some(edit));

    let doc = client.document_get(&1).await.unwrap();
    assert_eq!(doc.tags, vec![2, 4, tag.id]);
    let untouched = client.document_get(&2).await.unwrap();
    assert!(!untouched.has_tag(tag.id));

    backend.reset();
    let doc = client.document_get(&1).await.unwrap();
    assert_eq!(doc.tags, vec![2, 4]);
}

#[tokio::test]
async fn removes_tags_in_bulk() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    client
        .bulk_edit(&BulkEdit::remove_tags([1, 4], &[4]))
        .await
        .unwrap();

    let data = client.selection_data(&[1, 4]).await.unwrap();
    assert_eq!(data.tag_state(4, 2), SelectionState::None);
}

#[tokio::test]
async fn applies_correspondent() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    let abc = client
        .correspondent_for_name("abc test correspondent".to_string())
        .await
        .unwrap();
    client
        .bulk_edit(&BulkEdit::set_correspondent([2, 3], Some(abc.id)))
        .await
        .unwrap();

    let docs = client
        .documents(&DocumentFilter::default().correspondent_in([abc.id]))
        .await
        .unwrap();
    assert_eq!(ids(&docs), vec![1, 2, 3]);
}

#[tokio::test]
async fn applies_document_type() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    let dt = client
        .document_type_for_name("Test Doc Type".to_string())
        .await
        .unwrap();
    client
        .bulk_edit(&BulkEdit::set_document_type([1], Some(dt.id)))
        .await
        .unwrap();

    let doc = client.document_get(&1).await.unwrap();
    assert_eq!(doc.document_type, Some(dt.id));
}

#[tokio::test]
async fn missing_document_is_not_found() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    let err = client.document_get(&42).await.unwrap_err();
    assert_matches!(err, PaperlessError::API(e) if e.status() == Some(reqwest::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn malformed_requests_are_rejected() {
    let backend = backend().await;
    let http = reqwest::Client::new();

    let resp = http
        .get(format!("{}/api/documents/?tags__id__all=abc", backend.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    let resp = http
        .get(format!(
            "{}/api/documents/?page={}&page_size=2",
            backend.url(),
            u64::MAX
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let resp = http
        .post(format!("{}/api/documents/bulk_edit/", backend.url()))
        .json(&serde_json::json!({
            "documents": [1],
            "method": "rotate",
            "parameters": { "degrees": 90 }
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
    assert!(backend.last_bulk_edit().is_none());
}
