use std::future::Future;

use async_trait::async_trait;
use futures_util::future::{select, Either};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use transdesk_core::api::{
    endpoints, CreateGlossaryRequest, GlossaryApi, StartTranslationRequest, TermPair,
    TranslationApi, UpdateGlossaryRequest, UpsertTermsRequest,
};
use transdesk_core::envelope::{decode, decode_list, server_error};
use transdesk_core::{
    ApiError, ClientConfig, Glossary, HistoryEntry, StartedJob, Term, TranslationJob,
    UploadedDocument, UpsertSummary,
};

use crate::config::client_config;
use crate::storage::auth_token;

/// REST client for the Translation & Glossary API
#[derive(Debug, Clone, PartialEq)]
pub struct HttpApi {
    config: ClientConfig,
}

impl HttpApi {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Client for the configured backend
    pub fn from_env() -> Self {
        Self::new(client_config().clone())
    }

    fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    /// Send with the configured timeout and turn non-2xx into `ApiError::Server`.
    async fn dispatch(
        &self,
        request: Result<Request, gloo_net::Error>,
    ) -> Result<Response, ApiError> {
        let request = request.map_err(|e| ApiError::Network(format!("Invalid request: {e}")))?;
        let timeout_ms = self.config.request_timeout_ms.min(u32::MAX as u64) as u32;
        let response = with_timeout(timeout_ms, request.send()).await?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(server_error(status, &body));
        }
        Ok(response)
    }

    async fn fetch_one<T: DeserializeOwned>(
        &self,
        request: Result<Request, gloo_net::Error>,
    ) -> Result<T, ApiError> {
        let body = read_body(self.dispatch(request).await?).await?;
        decode(&body)
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: Result<Request, gloo_net::Error>,
    ) -> Result<Vec<T>, ApiError> {
        let body = read_body(self.dispatch(request).await?).await?;
        decode_list(&body)
    }

    async fn fetch_empty(&self, request: Result<Request, gloo_net::Error>) -> Result<(), ApiError> {
        self.dispatch(request).await.map(|_| ())
    }
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match auth_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

async fn read_body(response: Response) -> Result<String, ApiError> {
    response
        .text()
        .await
        .map_err(|e| ApiError::Decode(format!("Failed to read body: {e}")))
}

async fn with_timeout<T, F>(timeout_ms: u32, future: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, gloo_net::Error>>,
{
    let request = Box::pin(future);
    let timer = Box::pin(TimeoutFuture::new(timeout_ms));
    match select(request, timer).await {
        Either::Left((result, _)) => {
            result.map_err(|e| ApiError::Network(format!("Request failed: {e}")))
        }
        Either::Right(_) => Err(ApiError::Network(format!(
            "Request timed out after {timeout_ms} ms"
        ))),
    }
}

#[async_trait(?Send)]
impl GlossaryApi for HttpApi {
    async fn list_glossaries(&self) -> Result<Vec<Glossary>, ApiError> {
        let url = self.url(endpoints::GLOSSARIES);
        self.fetch_list(authorized(Request::get(&url)).build()).await
    }

    async fn get_glossary(&self, id: &str) -> Result<Glossary, ApiError> {
        let url = self.url(&endpoints::glossary(id));
        self.fetch_one(authorized(Request::get(&url)).build()).await
    }

    async fn create_glossary(&self, request: &CreateGlossaryRequest) -> Result<Glossary, ApiError> {
        let url = self.url(endpoints::GLOSSARIES);
        self.fetch_one(authorized(Request::post(&url)).json(request))
            .await
    }

    async fn update_glossary(
        &self,
        id: &str,
        request: &UpdateGlossaryRequest,
    ) -> Result<Glossary, ApiError> {
        let url = self.url(&endpoints::glossary(id));
        self.fetch_one(authorized(Request::put(&url)).json(request))
            .await
    }

    async fn delete_glossary(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&endpoints::glossary(id));
        self.fetch_empty(authorized(Request::delete(&url)).build())
            .await
    }

    async fn update_term(
        &self,
        glossary_id: &str,
        term_id: &str,
        term: &TermPair,
    ) -> Result<Term, ApiError> {
        let url = self.url(&endpoints::term(glossary_id, term_id));
        self.fetch_one(authorized(Request::put(&url)).json(term)).await
    }

    async fn delete_term(&self, glossary_id: &str, term_id: &str) -> Result<(), ApiError> {
        let url = self.url(&endpoints::term(glossary_id, term_id));
        self.fetch_empty(authorized(Request::delete(&url)).build())
            .await
    }

    async fn upsert_terms(
        &self,
        glossary_id: &str,
        request: &UpsertTermsRequest,
    ) -> Result<UpsertSummary, ApiError> {
        let url = self.url(&endpoints::terms_upsert(glossary_id));
        self.fetch_one(authorized(Request::post(&url)).json(request))
            .await
    }
}

#[async_trait(?Send)]
impl TranslationApi for HttpApi {
    type Upload = web_sys::File;

    async fn upload_document(
        &self,
        file: &Self::Upload,
        source_language: &str,
        target_language: &str,
    ) -> Result<UploadedDocument, ApiError> {
        let form = web_sys::FormData::new()
            .map_err(|e| ApiError::Network(format!("FormData unavailable: {e:?}")))?;
        let fields = [
            form.append_with_blob("file", file),
            form.append_with_str("sourceLanguage", source_language),
            form.append_with_str("targetLanguage", target_language),
        ];
        if let Some(Err(e)) = fields.into_iter().find(Result::is_err) {
            return Err(ApiError::Network(format!("Failed to build upload form: {e:?}")));
        }

        let url = self.url(endpoints::DOCUMENT_UPLOAD);
        self.fetch_one(authorized(Request::post(&url)).body(form))
            .await
    }

    async fn start_translation(
        &self,
        request: &StartTranslationRequest,
    ) -> Result<StartedJob, ApiError> {
        let url = self.url(endpoints::TRANSLATIONS);
        self.fetch_one(authorized(Request::post(&url)).json(request))
            .await
    }

    async fn translation_status(&self, job_id: &str) -> Result<TranslationJob, ApiError> {
        let url = self.url(&endpoints::translation(job_id));
        self.fetch_one(authorized(Request::get(&url)).build()).await
    }

    async fn cancel_translation(&self, job_id: &str) -> Result<(), ApiError> {
        let url = self.url(&endpoints::translation_cancel(job_id));
        self.fetch_empty(authorized(Request::post(&url)).build())
            .await
    }

    async fn download_document(&self, document_id: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.url(&endpoints::document_download(document_id));
        let response = self
            .dispatch(authorized(Request::get(&url)).build())
            .await?;
        response
            .binary()
            .await
            .map_err(|e| ApiError::Decode(format!("Failed to read download: {e}")))
    }

    async fn translation_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let url = self.url(endpoints::TRANSLATIONS);
        self.fetch_list(authorized(Request::get(&url)).build()).await
    }
}
