//! Firestore REST v1 adapter.

mod types;

use self::types::{
    Document, FieldValue, ListDocumentsResponse, RunQueryItem, draft_fields, identity_fields,
};
use super::traits::SampleStore;
use super::types::{
    Collection, IDENTITY_COLLECTION, IDENTITY_DOCUMENT, IdentityCard, SampleDraft, SampleType,
    WritingSample, now_timestamp,
};
use crate::error::StoreError;
use crate::providers::{api_error_message, build_http_client, sanitize_api_error};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::json;

const PAGE_SIZE: u32 = 300;

/// Fields replaced by an update. `created_at` is absent so it survives.
const UPDATE_MASK: [&str; 5] = ["content", "context", "category", "type", "updated_at"];

pub struct FirestoreStore {
    documents_url: String,
    api_key: Option<String>,
    client: Client,
}

impl FirestoreStore {
    pub fn new(base_url: &str, project_id: &str, database: &str, api_key: Option<&str>) -> Self {
        Self::with_client(base_url, project_id, database, api_key, build_http_client())
    }

    pub fn with_client(
        base_url: &str,
        project_id: &str,
        database: &str,
        api_key: Option<&str>,
        client: Client,
    ) -> Self {
        Self {
            documents_url: format!(
                "{}/projects/{project_id}/databases/{database}/documents",
                base_url.trim_end_matches('/')
            ),
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(ToOwned::to_owned),
            client,
        }
    }

    fn keyed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.query(&[("key", key.as_str())]),
            None => builder,
        }
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.documents_url)
    }

    async fn list_documents(
        &self,
        collection: &str,
        page_size: u32,
        first_page_only: bool,
    ) -> Result<Vec<Document>, StoreError> {
        let unreadable = |message: String| StoreError::Unreadable {
            collection: collection.to_string(),
            message,
        };

        let url = format!("{}/{collection}", self.documents_url);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .keyed(self.client.get(&url))
                .query(&[("pageSize", page_size.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| unreadable(sanitize_api_error(&e.to_string())))?;

            if response.status() == StatusCode::NOT_FOUND {
                return Ok(documents);
            }
            if !response.status().is_success() {
                return Err(unreadable(api_error_message("Firestore", response).await));
            }

            let page: ListDocumentsResponse = response
                .json()
                .await
                .map_err(|e| unreadable(format!("invalid list response: {e}")))?;
            documents.extend(page.documents);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) if !first_page_only => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(collection, count = documents.len(), "listed documents");
        Ok(documents)
    }

    fn write_error(collection: &str, message: String) -> StoreError {
        StoreError::Write {
            collection: collection.to_string(),
            message,
        }
    }

    async fn send_write(
        &self,
        collection: Collection,
        id: &str,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| Self::write_error(collection.as_str(), sanitize_api_error(&e.to_string())))?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
            _ => Err(Self::write_error(
                collection.as_str(),
                api_error_message("Firestore", response).await,
            )),
        }
    }

    async fn decode_written(
        collection: Collection,
        response: reqwest::Response,
    ) -> Result<WritingSample, StoreError> {
        let document: Document = response.json().await.map_err(|e| {
            Self::write_error(collection.as_str(), format!("invalid write response: {e}"))
        })?;
        Ok(document.into_sample())
    }
}

fn validate(draft: &SampleDraft) -> Result<(), StoreError> {
    if draft.content.trim().is_empty() {
        return Err(StoreError::Invalid("content must not be empty".into()));
    }
    Ok(())
}

#[async_trait]
impl SampleStore for FirestoreStore {
    fn name(&self) -> &str {
        "firestore"
    }

    async fn list(&self, collection: Collection) -> Result<Vec<WritingSample>, StoreError> {
        Ok(self
            .list_documents(collection.as_str(), PAGE_SIZE, false)
            .await?
            .into_iter()
            .map(Document::into_sample)
            .collect())
    }

    async fn list_by_type(
        &self,
        collection: Collection,
        sample_type: SampleType,
    ) -> Result<Vec<WritingSample>, StoreError> {
        let unreadable = |message: String| StoreError::Unreadable {
            collection: collection.to_string(),
            message,
        };

        let body = json!({
            "structuredQuery": {
                "from": [{"collectionId": collection.as_str()}],
                "where": {
                    "fieldFilter": {
                        "field": {"fieldPath": "type"},
                        "op": "EQUAL",
                        "value": {"stringValue": sample_type.as_str()}
                    }
                }
            }
        });

        let response = self
            .keyed(
                self.client
                    .post(format!("{}:runQuery", self.documents_url))
                    .json(&body),
            )
            .send()
            .await
            .map_err(|e| unreadable(sanitize_api_error(&e.to_string())))?;

        if !response.status().is_success() {
            return Err(unreadable(api_error_message("Firestore", response).await));
        }

        let items: Vec<RunQueryItem> = response
            .json()
            .await
            .map_err(|e| unreadable(format!("invalid query response: {e}")))?;

        let samples: Vec<WritingSample> = items
            .into_iter()
            .filter_map(|item| item.document)
            .map(Document::into_sample)
            .collect();
        tracing::debug!(
            collection = collection.as_str(),
            sample_type = sample_type.as_str(),
            count = samples.len(),
            "queried samples"
        );
        Ok(samples)
    }

    async fn identity(&self) -> Result<Option<IdentityCard>, StoreError> {
        Ok(self
            .list_documents(IDENTITY_COLLECTION, 1, true)
            .await?
            .into_iter()
            .next()
            .map(Document::into_identity))
    }

    async fn create_sample(
        &self,
        collection: Collection,
        draft: &SampleDraft,
    ) -> Result<WritingSample, StoreError> {
        validate(draft)?;
        let mut fields = draft_fields(draft);
        fields.insert("created_at".into(), FieldValue::string(now_timestamp()));

        let request = self.keyed(
            self.client
                .post(format!("{}/{}", self.documents_url, collection.as_str()))
                .json(&Document {
                    name: String::new(),
                    fields,
                }),
        );
        let response = self.send_write(collection, "", request).await?;
        let sample = Self::decode_written(collection, response).await?;
        tracing::info!(collection = collection.as_str(), id = %sample.id, "created sample");
        Ok(sample)
    }

    async fn update_sample(
        &self,
        collection: Collection,
        id: &str,
        draft: &SampleDraft,
    ) -> Result<WritingSample, StoreError> {
        validate(draft)?;
        let mut fields = draft_fields(draft);
        fields.insert("updated_at".into(), FieldValue::string(now_timestamp()));

        let mut query: Vec<(&str, &str)> = UPDATE_MASK
            .iter()
            .map(|path| ("updateMask.fieldPaths", *path))
            .collect();
        query.push(("currentDocument.exists", "true"));

        let request = self.keyed(
            self.client
                .patch(self.document_url(collection.as_str(), id))
                .query(&query)
                .json(&Document {
                    name: String::new(),
                    fields,
                }),
        );
        let response = self.send_write(collection, id, request).await?;
        let sample = Self::decode_written(collection, response).await?;
        tracing::info!(collection = collection.as_str(), id, "updated sample");
        Ok(sample)
    }

    async fn delete_sample(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let request = self.keyed(
            self.client
                .delete(self.document_url(collection.as_str(), id))
                .query(&[("currentDocument.exists", "true")]),
        );
        self.send_write(collection, id, request).await?;
        tracing::info!(collection = collection.as_str(), id, "deleted sample");
        Ok(())
    }

    async fn put_identity(&self, card: &IdentityCard) -> Result<(), StoreError> {
        let request = self.keyed(
            self.client
                .patch(self.document_url(IDENTITY_COLLECTION, IDENTITY_DOCUMENT))
                .json(&Document {
                    name: String::new(),
                    fields: identity_fields(card),
                }),
        );
        let response = request
            .send()
            .await
            .map_err(|e| Self::write_error(IDENTITY_COLLECTION, sanitize_api_error(&e.to_string())))?;
        if !response.status().is_success() {
            return Err(Self::write_error(
                IDENTITY_COLLECTION,
                api_error_message("Firestore", response).await,
            ));
        }
        tracing::info!("identity card saved");
        Ok(())
    }
}
