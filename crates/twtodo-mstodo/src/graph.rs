//! Microsoft Graph client for the `me/todo` endpoints.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use twtodo_core::status::REMOTE_STATUS_NOT_STARTED;
use twtodo_core::{timestamp, IdentityKey, ListId, Task, TaskStatus};

use crate::error::RemoteError;
use crate::source::RemoteSource;

/// Graph v1.0 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// A To-Do list as listed by `GET /me/todo/lists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    pub id: String,
    pub display_name: String,
}

/// OData collection envelope.
#[derive(Debug, Deserialize)]
struct Collection<T> {
    value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphTask {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    status: String,
    completed_date_time: Option<DateTimeTimeZone>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DateTimeTimeZone {
    date_time: String,
    time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Me {
    display_name: Option<String>,
    user_principal_name: Option<String>,
}

/// Authenticated Graph client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct GraphClient {
    inner: reqwest::Client,
    base_url: Url,
    access_token: String,
}

impl GraphClient {
    /// Create a client for the given base URL and bearer token.
    pub fn new(base_url: &str, access_token: impl Into<String>) -> Result<Self, RemoteError> {
        let base_url =
            Url::parse(base_url).map_err(|e| RemoteError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            inner: reqwest::Client::new(),
            base_url,
            access_token: access_token.into(),
        })
    }

    /// Display name of the signed-in user. Used to verify the token.
    pub async fn whoami(&self) -> Result<String, RemoteError> {
        let me: Me = self.get_json(self.endpoint(&["me"])?).await?;
        Ok(me
            .display_name
            .or(me.user_principal_name)
            .unwrap_or_else(|| "<unnamed>".to_string()))
    }

    /// All To-Do lists of the signed-in user.
    pub async fn lists(&self) -> Result<Vec<TodoList>, RemoteError> {
        let url = self.endpoint(&["me", "todo", "lists"])?;
        let lists: Collection<TodoList> = self.get_json(url).await?;
        if lists.next_link.is_some() {
            warn!("More To-Do lists available than returned in the first page");
        }
        Ok(lists.value)
    }

    /// Base URL extended by percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RemoteError> {
        let path = url.path().to_string();
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED => Err(RemoteError::Unauthorized),
            StatusCode::NOT_FOUND => Err(RemoteError::NotFound(path)),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(RemoteError::UnexpectedStatus {
                    status: status.as_u16(),
                    path,
                    body,
                })
            }
        }
    }
}

#[async_trait]
impl RemoteSource for GraphClient {
    async fn fetch_open_tasks(&self, list_id: &ListId) -> Result<Vec<Task>, RemoteError> {
        let mut url = self.endpoint(&["me", "todo", "lists", list_id.as_str(), "tasks"])?;
        url.set_query(Some(&format!(
            "$filter=status eq '{REMOTE_STATUS_NOT_STARTED}'"
        )));

        let page: Collection<GraphTask> = self.get_json(url).await?;
        if page.next_link.is_some() {
            warn!(list_id = %list_id, "Open tasks span several pages; only the first is imported");
        }
        info!(list_id = %list_id, count = page.value.len(), "Open tasks fetched");

        Ok(page
            .value
            .into_iter()
            .map(|t| Task::new(IdentityKey::new(list_id.clone(), t.id), t.title))
            .collect())
    }

    async fn fetch_task(&self, key: &IdentityKey) -> Result<Task, RemoteError> {
        let url = self.endpoint(&[
            "me",
            "todo",
            "lists",
            key.list_id.as_str(),
            "tasks",
            key.task_id.as_str(),
        ])?;

        let task: GraphTask = self.get_json(url).await?;
        debug!(key = %key, title = %task.title, "Task read");
        into_task(key, task)
    }
}

fn into_task(key: &IdentityKey, task: GraphTask) -> Result<Task, RemoteError> {
    let mapping = |source| RemoteError::Mapping {
        task_id: key.task_id.to_string(),
        source,
    };

    let status = TaskStatus::from_remote(&task.status).map_err(mapping)?;

    let completed_at = match task.completed_date_time {
        Some(dt) => {
            if let Some(zone) = dt.time_zone.as_deref().filter(|z| *z != "UTC") {
                warn!(key = %key, time_zone = %zone, "Completion time not in UTC, reading it as UTC");
            }
            Some(timestamp::parse_remote(&dt.date_time).map_err(mapping)?)
        }
        None => None,
    };

    Ok(Task {
        key: key.clone(),
        title: task.title,
        completed_at,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    const TOKEN: &str = "test-token";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {TOKEN}"))
            .unwrap_or(false)
    }

    async fn open_tasks(
        headers: HeaderMap,
        Path(list_id): Path<String>,
        Query(query): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        if !authorized(&headers) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        if query.get("$filter").map(String::as_str) != Some("status eq 'notStarted'") {
            return StatusCode::BAD_REQUEST.into_response();
        }
        Json(json!({
            "value": [
                {"id": "T1", "title": "Buy milk", "status": "notStarted"},
                {"id": "T2", "title": format!("Pay rent ({list_id})"), "status": "notStarted"}
            ]
        }))
        .into_response()
    }

    async fn one_task(Path((_list_id, task_id)): Path<(String, String)>) -> impl IntoResponse {
        match task_id.as_str() {
            "T1" => Json(json!({"id": "T1", "title": "Buy milk", "status": "notStarted"}))
                .into_response(),
            "T2" => Json(json!({
                "id": "T2",
                "title": "Pay rent",
                "status": "completed",
                "completedDateTime": {"dateTime": "2022-08-02T00:00:00.0000000", "timeZone": "UTC"}
            }))
            .into_response(),
            "T3" => Json(json!({"id": "T3", "title": "Odd", "status": "archived"})).into_response(),
            "T4" => Json(json!({
                "id": "T4",
                "title": "Water plants",
                "status": "notStarted",
                "completedDateTime": {"dateTime": "2022-08-02T00:00:00.0000000", "timeZone": "UTC"}
            }))
            .into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn me() -> impl IntoResponse {
        Json(json!({"displayName": "Test User"}))
    }

    async fn lists() -> impl IntoResponse {
        Json(json!({"value": [{"id": "L1", "displayName": "Tasks"}]}))
    }

    async fn serve() -> String {
        let graph = Router::new()
            .route("/me", get(me))
            .route("/me/todo/lists", get(lists))
            .route("/me/todo/lists/:list_id/tasks", get(open_tasks))
            .route("/me/todo/lists/:list_id/tasks/:task_id", get(one_task));
        let app = Router::new().nest("/v1.0", graph);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1.0/")
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            GraphClient::new("not a url", TOKEN),
            Err(RemoteError::InvalidUrl(_))
        ));
        assert!(matches!(
            GraphClient::new("mailto:someone@example.com", TOKEN),
            Err(RemoteError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = GraphClient::new("https://graph.microsoft.com/v1.0", TOKEN).unwrap();
        let url = client.endpoint(&["me", "todo", "lists", "a/b c"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://graph.microsoft.com/v1.0/me/todo/lists/a%2Fb%20c"
        );
    }

    #[tokio::test]
    async fn test_fetch_open_tasks() {
        let client = GraphClient::new(&serve().await, TOKEN).unwrap();
        let tasks = client.fetch_open_tasks(&ListId::new("L1")).await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].key, IdentityKey::new("L1", "T1"));
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].status, TaskStatus::Pending);
        assert!(tasks[0].completed_at.is_none());
        assert_eq!(tasks[1].title, "Pay rent (L1)");
    }

    #[tokio::test]
    async fn test_bad_token() {
        let client = GraphClient::new(&serve().await, "wrong").unwrap();
        let result = client.fetch_open_tasks(&ListId::new("L1")).await;
        assert!(matches!(result, Err(RemoteError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_fetch_task_completed_is_mapping_error() {
        let client = GraphClient::new(&serve().await, TOKEN).unwrap();
        let result = client.fetch_task(&IdentityKey::new("L1", "T2")).await;

        match result {
            Err(RemoteError::Mapping { task_id, .. }) => assert_eq!(task_id, "T2"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_task_reads_completion_time() {
        let client = GraphClient::new(&serve().await, TOKEN).unwrap();
        let task = client
            .fetch_task(&IdentityKey::new("L1", "T4"))
            .await
            .unwrap();

        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(
            task.completed_at,
            Some(Utc.with_ymd_and_hms(2022, 8, 2, 0, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn test_fetch_task_not_found() {
        let client = GraphClient::new(&serve().await, TOKEN).unwrap();
        let result = client.fetch_task(&IdentityKey::new("L1", "gone")).await;
        assert!(matches!(result, Err(RemoteError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_task_unknown_status() {
        let client = GraphClient::new(&serve().await, TOKEN).unwrap();
        let result = client.fetch_task(&IdentityKey::new("L1", "T3")).await;
        assert!(matches!(result, Err(RemoteError::Mapping { .. })));
    }

    #[tokio::test]
    async fn test_whoami_and_lists() {
        let client = GraphClient::new(&serve().await, TOKEN).unwrap();
        assert_eq!(client.whoami().await.unwrap(), "Test User");

        let lists = client.lists().await.unwrap();
        assert_eq!(
            lists,
            vec![TodoList {
                id: "L1".to_string(),
                display_name: "Tasks".to_string()
            }]
        );
    }
}
