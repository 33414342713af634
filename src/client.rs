use crate::{
    bulk_edit::{BulkEdit, BulkEditResult},
    classifier::Classifier,
    correspondent::Correspondent,
    document::Document,
    document_type::DocumentType,
    errors::PaperlessError,
    filter::DocumentFilter,
    page::Page,
    selection::{SelectionData, SelectionRequest},
    tag::Tag,
};
use log::{debug, info};
use reqwest::{Response, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub const URL_ENV: &str = "PAPERLESS_URL";
pub const AUTH_TOKEN_ENV: &str = "PAPERLESS_AUTH_TOKEN";

pub struct PaperlessNgxClient {
    url: String,
    auth: String,
    client: reqwest::Client,
}

#[derive(Default)]
pub struct PaperlessNgxClientBuilder {
    url: Option<String>,
    auth: Option<String>,
}

impl PaperlessNgxClientBuilder {
    /// Seeds the builder from `PAPERLESS_URL` and `PAPERLESS_AUTH_TOKEN`.
    /// Either may still be overridden with the setters.
    pub fn from_env() -> PaperlessNgxClientBuilder {
        let mut builder = PaperlessNgxClientBuilder::default();
        if let Ok(url) = std::env::var(URL_ENV) {
            builder = builder.set_url(&url);
        }
        if let Ok(auth) = std::env::var(AUTH_TOKEN_ENV) {
            builder = builder.set_auth_token(&auth);
        }
        builder
    }
    pub fn set_url(mut self, url: &str) -> PaperlessNgxClientBuilder {
        self.url = Some(url.trim_end_matches('/').to_owned());
        self
    }
    pub fn set_auth_token(mut self, auth: &str) -> PaperlessNgxClientBuilder {
        self.auth = Some(auth.to_owned());
        self
    }
    pub fn build(&self) -> Result<PaperlessNgxClient, PaperlessError> {
        if let (Some(url), Some(auth)) = (self.url.clone(), self.auth.clone()) {
            return Ok(PaperlessNgxClient::new(url, auth));
        }

        Err(PaperlessError::IncompleteConfig())
    }
}

impl PaperlessNgxClient {
    fn new(url: String, auth: String) -> PaperlessNgxClient {
        PaperlessNgxClient {
            url,
            auth,
            client: reqwest::Client::new(),
        }
    }

    fn url_from_path(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    pub fn thumbnail_url(&self, id: i32) -> String {
        self.url_from_path(&format!("/api/documents/{}/thumb/", id))
    }

    pub(crate) async fn raw_get(&self, url: &str) -> Result<Response, reqwest::Error> {
        self.client
            .get(url)
            .header("Authorization", format!("Token {}", self.auth))
            .send()
            .await
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Response, reqwest::Error> {
        let url = self.url_from_path(path);
        self.raw_get(&url).await
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, PaperlessError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let resp = self
            .client
            .post(self.url_from_path(path))
            .header("Authorization", format!("Token {}", self.auth))
            .json(body)
            .send()
            .await?;
        resp.error_for_status_ref()?;
        Ok(resp.json::<R>().await?)
    }

    fn url_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<String, PaperlessError> {
        let base = self.url_from_path(path);
        let parsed = if query.is_empty() {
            Url::parse(&base)
        } else {
            Url::parse_with_params(&base, query)
        };
        let url = parsed.map_err(|e| PaperlessError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;
        Ok(url.into())
    }

    async fn get_paginated<T>(&self, url: &str) -> Result<Page<T>, PaperlessError>
    where
        for<'de2> T: Deserialize<'de2>,
    {
        let resp = self.raw_get(url).await?;
        resp.error_for_status_ref()?;
        Ok(resp.json::<Page<T>>().await?)
    }

    async fn get_all_pages<T>(&self, url: String) -> Result<Vec<T>, PaperlessError>
    where
        for<'de2> T: Deserialize<'de2>,
    {
        let mut all: Vec<T> = Vec::new();
        let mut next_url = url;

        loop {
            let mut page: Page<T> = self.get_paginated(&next_url).await?;
            debug!(
                "Page len={}, next={:?}, previous={:?}",
                page.count, page.next, page.previous
            );
            all.append(&mut page.results);
            match page.next {
                Some(n) => next_url = n,
                None => return Ok(all),
            }
        }
    }

    /// Every document matching `filter`, following `next` links.
    pub async fn documents(&self, filter: &DocumentFilter) -> Result<Vec<Document>, PaperlessError> {
        let url = self.url_with_query("/api/documents/", &filter.to_query())?;
        self.get_all_pages(url).await
    }

    /// Only the first page of matches. `count` still covers all of them.
    pub async fn documents_page(
        &self,
        filter: &DocumentFilter,
    ) -> Result<Page<Document>, PaperlessError> {
        let mut query = vec![("page", "1".to_string())];
        query.extend(filter.to_query());
        let url = self.url_with_query("/api/documents/", &query)?;
        self.get_paginated(&url).await
    }

    pub async fn document_get(&self, id: &i32) -> Result<Document, PaperlessError> {
        let url = format!("/api/documents/{}/", id);
        let resp = self.get(&url).await?;
        resp.error_for_status_ref()?;
        Ok(resp.json::<Document>().await?)
    }

    pub async fn bulk_edit(&self, edit: &BulkEdit) -> Result<(), PaperlessError> {
        info!(
            "Bulk edit {} on {} document(s)",
            edit.method.name(),
            edit.documents.len()
        );

        let resp: BulkEditResult = self.post_json("/api/documents/bulk_edit/", edit).await?;
        resp.into_result()
    }

    pub async fn selection_data(&self, documents: &[i32]) -> Result<SelectionData, PaperlessError> {
        debug!("Selection data for {:?}", documents);
        self.post_json(
            "/api/documents/selection_data/",
            &SelectionRequest { documents },
        )
        .await
    }

    async fn classifiers<T: Classifier>(&self, name: Option<String>) -> Result<Vec<T>, PaperlessError> {
        let mut query = Vec::new();
        if let Some(n) = name {
            query.push(("name__icontains", n));
        }
        let url = self.url_with_query(T::ENDPOINT, &query)?;
        self.get_all_pages(url).await
    }

    async fn classifier_for_name<T: Classifier>(&self, name: String) -> Result<T, PaperlessError> {
        let all: Vec<T> = self.classifiers(Some(name.clone())).await?;
        for c in all {
            if name.eq_ignore_ascii_case(c.name()) {
                return Ok(c);
            }
        }
        Err(PaperlessError::UnknownName {
            kind: T::KIND,
            name,
        })
    }

    pub async fn correspondents(
        &self,
        name: Option<String>,
    ) -> Result<Vec<Correspondent>, PaperlessError> {
        self.classifiers(name).await
    }

    pub async fn correspondent_for_name(
        &self,
        name: String,
    ) -> Result<Correspondent, PaperlessError> {
        self.classifier_for_name(name).await
    }

    pub async fn tags(&self, name: Option<String>) -> Result<Vec<Tag>, PaperlessError> {
        self.classifiers(name).await
    }

    pub async fn tag_for_name(&self, name: String) -> Result<Tag, PaperlessError> {
        self.classifier_for_name(name).await
    }

    pub async fn document_types(
        &self,
        name: Option<String>,
    ) -> Result<Vec<DocumentType>, PaperlessError> {
        self.classifiers(name).await
    }

    pub async fn document_type_for_name(
        &self,
        name: String,
    ) -> Result<DocumentType, PaperlessError> {
        self.classifier_for_name(name).await
    }
}
