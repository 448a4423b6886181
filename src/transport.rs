//! HTTP access to the task API
//!
//! Thin wrapper over the five REST operations at `{base_url}/api/tasks`.
//! Every call is single-shot: no retry, no configured timeout. Failure
//! is reported uniformly for connection errors and non-success
//! statuses; callers only learn which operation failed. The underlying
//! cause is logged at debug level.

use reqwest::Client;

use crate::error::{Error, Result};
use crate::task::{Task, TaskDraft};

/// Client for the task API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    http: Client,
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder().build().map_err(|err| {
            tracing::debug!(error = %err, "failed to build HTTP client");
            Error::OperationFailed("failed to build HTTP client".to_string())
        })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn task_url(&self, id: i64) -> String {
        format!("{}/api/tasks/{id}", self.base_url)
    }

    /// GET `/api/tasks`
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        const OP: &str = "fetch tasks";
        let resp = self
            .http
            .get(self.tasks_url())
            .send()
            .await
            .map_err(|err| transport_error(OP, &err))?;
        if !resp.status().is_success() {
            return Err(status_error(OP, resp.status()));
        }
        resp.json().await.map_err(|err| transport_error(OP, &err))
    }

    /// POST `/api/tasks`; the backend assigns the id.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        const OP: &str = "create task";
        let resp = self
            .http
            .post(self.tasks_url())
            .json(draft)
            .send()
            .await
            .map_err(|err| transport_error(OP, &err))?;
        if !resp.status().is_success() {
            return Err(status_error(OP, resp.status()));
        }
        resp.json().await.map_err(|err| transport_error(OP, &err))
    }

    /// PUT `/api/tasks/{id}` — full replacement, not a partial patch.
    pub async fn update_task(&self, id: i64, draft: &TaskDraft) -> Result<Task> {
        const OP: &str = "update task";
        let resp = self
            .http
            .put(self.task_url(id))
            .json(draft)
            .send()
            .await
            .map_err(|err| transport_error(OP, &err))?;
        if !resp.status().is_success() {
            return Err(status_error(OP, resp.status()));
        }
        resp.json().await.map_err(|err| transport_error(OP, &err))
    }

    /// PATCH `/api/tasks/{id}/toggle` — flips `completed` server-side.
    pub async fn toggle_task(&self, id: i64) -> Result<Task> {
        const OP: &str = "toggle task status";
        let resp = self
            .http
            .patch(format!("{}/toggle", self.task_url(id)))
            .send()
            .await
            .map_err(|err| transport_error(OP, &err))?;
        if !resp.status().is_success() {
            return Err(status_error(OP, resp.status()));
        }
        resp.json().await.map_err(|err| transport_error(OP, &err))
    }

    /// DELETE `/api/tasks/{id}`
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        const OP: &str = "delete task";
        let resp = self
            .http
            .delete(self.task_url(id))
            .send()
            .await
            .map_err(|err| transport_error(OP, &err))?;
        if !resp.status().is_success() {
            return Err(status_error(OP, resp.status()));
        }
        Ok(())
    }
}

fn transport_error(op: &'static str, err: &reqwest::Error) -> Error {
    tracing::debug!(operation = op, error = %err, "transport failure");
    Error::Transport(op)
}

fn status_error(op: &'static str, status: reqwest::StatusCode) -> Error {
    tracing::debug!(operation = op, %status, "non-success response");
    Error::Transport(op)
}
