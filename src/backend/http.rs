//! reqwest implementation of the backend contract
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Backend;
use crate::core::{SyncError, SyncResult};
use crate::models::{
    CreatedEvent, EventDraft, EventId, EventRecord, NewParent, NewVolunteer, ParticipantRecord,
    Profile, Student, VolunteerAssignment, VolunteerSignup, WireEvent, into_records,
};
use crate::session::Scope;

#[derive(Clone, Debug)]
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, scope: &Scope, path: &str) -> String {
        format!("{}{}{}", self.base_url, scope.prefix(), path)
    }

    /// Body of a successful response, or the status and body of a failed one
    async fn read(res: Response) -> SyncResult<String> {
        let status = res.status();
        let text = res.text().await;
        if !status.is_success() {
            return Err(SyncError::Status {
                status: status.as_u16(),
                body: text.unwrap_or_default(),
            });
        }
        Ok(text?)
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        scope: &Scope,
        path: &str,
        body: Option<&B>,
    ) -> SyncResult<String> {
        let url = self.url(scope, path);
        tracing::debug!("{} {}", method, url);

        let mut req = self
            .http
            .request(method.clone(), &url)
            .bearer_auth(&scope.token)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await.inspect_err(|e| {
            tracing::error!("{} {} failed: {}", method, url, e);
        })?;
        Self::read(res).await.inspect_err(|e| {
            tracing::error!("{} {} failed: {}", method, url, e);
        })
    }

    async fn get<T: DeserializeOwned>(&self, scope: &Scope, path: &str) -> SyncResult<T> {
        let text = self.request::<()>(Method::GET, scope, path, None).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// A `null` list is an empty list
    async fn get_list<T: DeserializeOwned>(&self, scope: &Scope, path: &str) -> SyncResult<Vec<T>> {
        let items: Option<Vec<T>> = self.get(scope, path).await?;
        Ok(items.unwrap_or_default())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_profile(&self, scope: &Scope) -> SyncResult<Profile> {
        self.get(scope, "").await
    }

    async fn fetch_events(&self, scope: &Scope) -> SyncResult<Vec<EventRecord>> {
        let events: Vec<WireEvent> = self.get_list(scope, "/events").await?;
        into_records(events)
    }

    async fn fetch_students(&self, scope: &Scope) -> SyncResult<Vec<Student>> {
        self.get_list(scope, "/students").await
    }

    async fn fetch_student_events(
        &self,
        scope: &Scope,
        student_id: i64,
    ) -> SyncResult<Vec<EventRecord>> {
        let path = format!("/students/{}/events", student_id);
        let events: Vec<WireEvent> = self.get_list(scope, &path).await?;
        into_records(events)
    }

    async fn create_event(&self, scope: &Scope, draft: &EventDraft) -> SyncResult<EventRecord> {
        let text = self
            .request(Method::POST, scope, "/events", Some(draft))
            .await?;
        let created: CreatedEvent = serde_json::from_str(&text)?;
        created.event.into_record()
    }

    async fn update_event(
        &self,
        scope: &Scope,
        id: EventId,
        patch: &EventDraft,
    ) -> SyncResult<EventRecord> {
        let path = format!("/events/{}", id);
        let text = self.request(Method::PUT, scope, &path, Some(patch)).await?;
        let updated: WireEvent = serde_json::from_str(&text)?;
        updated.into_record()
    }

    async fn delete_event(&self, scope: &Scope, id: EventId) -> SyncResult<()> {
        let path = format!("/events/{}", id);
        self.request::<()>(Method::DELETE, scope, &path, None)
            .await?;
        Ok(())
    }

    async fn fetch_event_students(
        &self,
        scope: &Scope,
        id: EventId,
    ) -> SyncResult<Vec<ParticipantRecord>> {
        self.get_list(scope, &format!("/events/{}/students", id))
            .await
    }

    async fn fetch_event_volunteers(
        &self,
        scope: &Scope,
        id: EventId,
    ) -> SyncResult<Vec<VolunteerAssignment>> {
        self.get_list(scope, &format!("/events/{}/volunteers", id))
            .await
    }

    async fn mark_absent(
        &self,
        scope: &Scope,
        student_id: i64,
        event_id: EventId,
    ) -> SyncResult<()> {
        let path = format!("/students/{}/events/{}/absent", student_id, event_id);
        self.request::<()>(Method::POST, scope, &path, None).await?;
        Ok(())
    }

    async fn create_parent(&self, scope: &Scope, parent: &NewParent) -> SyncResult<()> {
        self.request(Method::POST, scope, "/parents", Some(parent))
            .await?;
        Ok(())
    }

    async fn create_volunteer(
        &self,
        scope: &Scope,
        volunteer: &NewVolunteer,
        school_id: Option<i64>,
    ) -> SyncResult<()> {
        let body = VolunteerSignup::new(volunteer, school_id);
        self.request(Method::POST, scope, "/volunteers", Some(&body))
            .await?;
        Ok(())
    }
}
