//! Project verbs and the post-mutation wait loop.
//!
//! Projects are not generic resources: they have their own endpoints and the
//! gateway may take a moment to expose a created or updated project. Create
//! and Update therefore poll Get until the project is readable.

use crate::client::GatewayClient;
use crate::context::CallContext;
use crate::decode;
use crate::encoding::{find_project_path, project_collection_path, project_path};
use crate::error::ClientError;
use ignition_api_model::Project;
use reqwest::Method;
use std::time::Duration;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

/// Cadence of the wait loop.
pub const PROJECT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// How long the wait loop polls before its final attempt.
pub const PROJECT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

impl GatewayClient {
    /// Read a project.
    ///
    /// # Errors
    ///
    /// Returns error on network, API or decode errors.
    pub async fn get_project(&self, ctx: &CallContext, name: &str) -> Result<Project, ClientError> {
        let body = self
            .transport
            .execute(ctx, Method::GET, &find_project_path(name), None)
            .await?;
        decode::decode_json(&body)
    }

    /// Create a project and wait until the gateway serves it.
    ///
    /// # Errors
    ///
    /// Returns error if the create fails, the context ends, or the project is
    /// still unreadable after the wait deadline.
    pub async fn create_project(
        &self,
        ctx: &CallContext,
        project: &Project,
    ) -> Result<Project, ClientError> {
        let payload = to_payload(project)?;
        self.transport
            .execute(ctx, Method::POST, &project_collection_path(), Some(payload))
            .await?;
        self.wait_for_project(ctx, &project.name).await
    }

    /// Update a project and wait until the gateway serves it.
    ///
    /// # Errors
    ///
    /// Returns error if the update fails, the context ends, or the project is
    /// still unreadable after the wait deadline.
    pub async fn update_project(
        &self,
        ctx: &CallContext,
        project: &Project,
    ) -> Result<Project, ClientError> {
        let payload = to_payload(project)?;
        self.transport
            .execute(ctx, Method::PUT, &project_path(&project.name), Some(payload))
            .await?;
        self.wait_for_project(ctx, &project.name).await
    }

    /// Delete a project.
    ///
    /// # Errors
    ///
    /// Returns error on network or API errors.
    pub async fn delete_project(&self, ctx: &CallContext, name: &str) -> Result<(), ClientError> {
        self.transport
            .execute(ctx, Method::DELETE, &project_path(name), None)
            .await?;
        Ok(())
    }

    async fn wait_for_project(&self, ctx: &CallContext, name: &str) -> Result<Project, ClientError> {
        let start = Instant::now();
        let mut ticker = interval_at(start + PROJECT_POLL_INTERVAL, PROJECT_POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let deadline = sleep(PROJECT_WAIT_TIMEOUT);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                biased;
                err = ctx.done() => return Err(err),
                () = &mut deadline => {
                    tracing::debug!(project = name, "wait deadline reached, final read");
                    return self.get_project(ctx, name).await;
                }
                _ = ticker.tick() => {
                    match self.get_project(ctx, name).await {
                        Ok(project) => return Ok(project),
                        Err(e @ (ClientError::Cancelled | ClientError::DeadlineExceeded)) => {
                            return Err(e);
                        }
                        Err(e) => {
                            tracing::debug!(
                                project = name,
                                elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                                error = %e,
                                "project not visible yet"
                            );
                        }
                    }
                }
            }
        }
    }
}

fn to_payload(project: &Project) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(project).map_err(|e| ClientError::Serialize(e.to_string()))
}
