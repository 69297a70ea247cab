//! Gateway redundancy settings.

use crate::client::GatewayClient;
use crate::context::CallContext;
use crate::decode;
use crate::encoding::redundancy_path;
use crate::error::ClientError;
use ignition_api_model::kinds::RedundancyConfig;
use reqwest::Method;

impl GatewayClient {
    /// Read the redundancy settings.
    ///
    /// # Errors
    ///
    /// Returns error on network, API or decode errors.
    pub async fn get_redundancy_config(
        &self,
        ctx: &CallContext,
    ) -> Result<RedundancyConfig, ClientError> {
        let body = self
            .transport
            .execute(ctx, Method::GET, &redundancy_path(), None)
            .await?;
        decode::decode_json(&body)
    }

    /// Replace the redundancy settings. The gateway's reply body is ignored.
    ///
    /// # Errors
    ///
    /// Returns error on network or API errors.
    pub async fn update_redundancy_config(
        &self,
        ctx: &CallContext,
        config: &RedundancyConfig,
    ) -> Result<(), ClientError> {
        let payload =
            serde_json::to_vec(config).map_err(|e| ClientError::Serialize(e.to_string()))?;
        self.transport
            .execute(ctx, Method::POST, &redundancy_path(), Some(payload))
            .await?;
        Ok(())
    }
}
