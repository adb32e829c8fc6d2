use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    config::ClientConfig,
    core::api::{ApiError, ApiResult, FeedbackApi},
    models::{Course, Feedback, FeedbackPage, NewFeedback},
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// URL builder for the backend routes, rooted at the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: &str) -> ApiResult<Self> {
        let mut url =
            Url::parse(base).map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!("{base}: not a base URL")));
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self { base: url })
    }

    pub fn feedback(&self) -> Url {
        self.join(&["feedback"])
    }

    pub fn feedbacks(&self, page: u32, limit: u32) -> Url {
        paged(self.join(&["feedbacks"]), page, limit)
    }

    /// The subject is encoded as a single path segment, so names with spaces
    /// or slashes stay intact.
    pub fn feedbacks_by_subject(&self, subject: &str, page: u32, limit: u32) -> Url {
        paged(self.join(&["feedbacks", subject]), page, limit)
    }

    pub fn courses(&self) -> Url {
        self.join(&["courses"])
    }

    pub fn init_courses(&self) -> Url {
        self.join(&["init-courses"])
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn paged(mut url: Url, page: u32, limit: u32) -> Url {
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("limit", &limit.to_string());
    url
}

/// [`FeedbackApi`] over HTTP/JSON. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let endpoints = Endpoints::new(&config.api_url)?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.request_timeout))
            .build()?;
        Ok(Self { client, endpoints })
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        debug!(%url, "GET");
        send(self.client.get(url)).await
    }

    async fn post<T: DeserializeOwned>(&self, url: Url, body: Option<&NewFeedback>) -> ApiResult<T> {
        debug!(%url, "POST");
        let request = match body {
            Some(body) => self.client.post(url).json(body),
            None => self.client.post(url),
        };
        send(request).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
    let response = request.send().await?;
    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status,
            message: error_message(status, &body),
        });
    }
    Ok(response.json::<T>().await?)
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Prefers the backend's own `message`/`error` field over a generic status line.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
}

impl FeedbackApi for HttpApi {
    async fn submit_feedback(&self, feedback: &NewFeedback) -> ApiResult<Feedback> {
        self.post(self.endpoints.feedback(), Some(feedback)).await
    }

    async fn list_feedbacks(&self, page: u32, limit: u32) -> ApiResult<FeedbackPage> {
        self.get(self.endpoints.feedbacks(page, limit)).await
    }

    async fn list_feedbacks_by_subject(
        &self,
        subject: &str,
        page: u32,
        limit: u32,
    ) -> ApiResult<FeedbackPage> {
        self.get(self.endpoints.feedbacks_by_subject(subject, page, limit))
            .await
    }

    async fn list_courses(&self) -> ApiResult<Vec<Course>> {
        self.get(self.endpoints.courses()).await
    }

    async fn init_courses(&self) -> ApiResult<Vec<Course>> {
        self.post(self.endpoints.init_courses(), None).await
    }
}
