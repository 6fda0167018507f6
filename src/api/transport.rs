use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use serde_json::Value;

use crate::api::endpoint::{Endpoint, Method};
use crate::api::ApiError;
use crate::auth::Session;

/// Seam between the typed client and whatever produces responses.
/// Exactly one implementation is selected at startup.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, endpoint: &Endpoint) -> Result<Value, ApiError>;

    /// Multipart receipt upload; kept separate because it carries a
    /// browser `File` and its own header handling.
    async fn upload(&self, file: web_sys::File, doc_type: String) -> Result<Value, ApiError>;
}

/// Live transport over the REST backend.
pub struct HttpTransport {
    base_url: String,
    session: Session,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        HttpTransport {
            base_url: base_url.into(),
            session,
        }
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };
        // anonymous when no live token exists; the backend decides
        if let Some(token) = self.session.bearer_token() {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }
        builder
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: &Endpoint) -> Result<Value, ApiError> {
        let mut builder = self
            .builder(endpoint.method(), &endpoint.path())
            .header("Content-Type", "application/json");
        let query = endpoint.query();
        if !query.is_empty() {
            builder = builder.query(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        let response = match endpoint.body() {
            Some(body) => builder
                .json(&body)
                .map_err(|err| ApiError::Network(err.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|err| ApiError::Network(err.to_string()))?;

        if !response.ok() {
            log::error!(
                "{} {} failed with status {}",
                endpoint.method().as_str(),
                endpoint.path(),
                response.status()
            );
            return Err(ApiError::Status(response.status()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn upload(&self, file: web_sys::File, doc_type: String) -> Result<Value, ApiError> {
        let form = web_sys::FormData::new()
            .map_err(|_| ApiError::Network("could not build form data".to_string()))?;
        form.append_with_blob("file", &file)
            .map_err(|_| ApiError::Network("could not attach file".to_string()))?;
        form.append_with_str("type", &doc_type)
            .map_err(|_| ApiError::Network("could not attach document type".to_string()))?;

        let response = self
            .builder(Method::Post, "/upload")
            .body(form)
            .map_err(|err| ApiError::Network(err.to_string()))?
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        if !response.ok() {
            log::error!("upload failed with status {}", response.status());
            return Err(ApiError::Status(response.status()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}
