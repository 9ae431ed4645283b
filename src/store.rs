use crate::config::ClientConfig;
use crate::errors::{ClientError, ValidationError};
use crate::models::{Mood, MoodBody, MoodSummary, UsageStat};
use reqwest::{Client, Response, StatusCode};
use std::future::Future;

/// The operations the client needs from the remote store.
///
/// Implementations report a missing record as [`ClientError::NotFound`] and
/// any network or unexpected HTTP failure as a transport-class error.
pub trait MoodStore {
    fn list_moods(&self) -> impl Future<Output = Result<Vec<MoodSummary>, ClientError>> + Send;

    fn get_mood(&self, id: &str) -> impl Future<Output = Result<Mood, ClientError>> + Send;

    fn create_mood(&self, body: &MoodBody) -> impl Future<Output = Result<Mood, ClientError>> + Send;

    fn update_mood(
        &self,
        id: &str,
        body: &MoodBody,
    ) -> impl Future<Output = Result<Mood, ClientError>> + Send;

    fn delete_mood(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Exact-match lookup on the mood name.
    fn find_moods_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<Mood>, ClientError>> + Send;

    /// Records one usage event for `id`.
    fn record_mood_view(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn list_statistics(&self) -> impl Future<Output = Result<Vec<UsageStat>, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpMoodStore {
    http: Client,
    base_url: String,
}

impl HttpMoodStore {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl MoodStore for HttpMoodStore {
    async fn list_moods(&self) -> Result<Vec<MoodSummary>, ClientError> {
        let response = self.http.get(self.url("/humores")).send().await?;
        Ok(check(response, None, None).await?.json().await?)
    }

    async fn get_mood(&self, id: &str) -> Result<Mood, ClientError> {
        let response = self.http.get(self.url(&format!("/humores/{id}"))).send().await?;
        Ok(check(response, Some(id), None).await?.json().await?)
    }

    async fn create_mood(&self, body: &MoodBody) -> Result<Mood, ClientError> {
        let response = self.http.post(self.url("/humores")).json(body).send().await?;
        Ok(check(response, None, Some(body.name.as_str())).await?.json().await?)
    }

    async fn update_mood(&self, id: &str, body: &MoodBody) -> Result<Mood, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/humores/{id}")))
            .json(body)
            .send()
            .await?;
        Ok(check(response, Some(id), Some(body.name.as_str())).await?.json().await?)
    }

    async fn delete_mood(&self, id: &str) -> Result<(), ClientError> {
        let response = self.http.delete(self.url(&format!("/humores/{id}"))).send().await?;
        check(response, Some(id), None).await?;
        Ok(())
    }

    async fn find_moods_by_name(&self, name: &str) -> Result<Vec<Mood>, ClientError> {
        let response = self
            .http
            .get(self.url("/humores/filtro"))
            .query(&[("humor", name)])
            .send()
            .await?;
        Ok(check(response, None, None).await?.json().await?)
    }

    async fn record_mood_view(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/estatisticas/registrar/{id}")))
            .send()
            .await?;
        check(response, Some(id), None).await?;
        Ok(())
    }

    async fn list_statistics(&self) -> Result<Vec<UsageStat>, ClientError> {
        let response = self.http.get(self.url("/estatisticas")).send().await?;
        Ok(check(response, None, None).await?.json().await?)
    }
}

/// Maps a non-success status onto the client taxonomy. A 409 means the store
/// itself refused a duplicate name.
async fn check(
    response: Response,
    id: Option<&str>,
    name: Option<&str>,
) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match (status, id, name) {
        (StatusCode::NOT_FOUND, Some(id), _) => Err(ClientError::NotFound { id: id.to_string() }),
        (StatusCode::CONFLICT, _, Some(name)) => Err(ValidationError::DuplicateName {
            name: name.to_string(),
        }
        .into()),
        _ => Err(ClientError::Status {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        }),
    }
}
