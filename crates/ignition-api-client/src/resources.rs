//! Generic resource verbs.
//!
//! Every verb is addressed by `(module, type, name)` and parameterized over
//! the payload type. The `_default` shorthands use the `ignition` module;
//! the kind-typed verbs take module and type from a [`ResourceKind`].

use crate::client::GatewayClient;
use crate::context::CallContext;
use crate::decode::{self, Resolution};
use crate::encoding::{delete_resource_path, find_resource_path, resource_collection_path};
use crate::error::ClientError;
use ignition_api_model::{ResourceEnvelope, ResourceKind, DEFAULT_MODULE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

impl GatewayClient {
    /// Read a resource. An empty `name` reads the singleton of that type.
    ///
    /// # Errors
    ///
    /// Returns error on network, API or decode errors.
    pub async fn get_resource<C: DeserializeOwned + Default>(
        &self,
        ctx: &CallContext,
        module: &str,
        kind: &str,
        name: &str,
    ) -> Result<ResourceEnvelope<C>, ClientError> {
        let path = find_resource_path(module, kind, name);
        let body = self.transport.execute(ctx, Method::GET, &path, None).await?;
        decode::decode_envelope(&body)
    }

    /// Create a resource and return the gateway's view of it.
    ///
    /// # Errors
    ///
    /// Returns error on network, API or decode errors.
    pub async fn create_resource<C>(
        &self,
        ctx: &CallContext,
        module: &str,
        kind: &str,
        item: &ResourceEnvelope<C>,
    ) -> Result<ResourceEnvelope<C>, ClientError>
    where
        C: Serialize + DeserializeOwned + Default,
    {
        self.mutate(ctx, Method::POST, module, kind, item).await
    }

    /// Update a resource. `item.signature` must be the latest observed one.
    ///
    /// # Errors
    ///
    /// Returns error on network, API or decode errors.
    pub async fn update_resource<C>(
        &self,
        ctx: &CallContext,
        module: &str,
        kind: &str,
        item: &ResourceEnvelope<C>,
    ) -> Result<ResourceEnvelope<C>, ClientError>
    where
        C: Serialize + DeserializeOwned + Default,
    {
        self.mutate(ctx, Method::PUT, module, kind, item).await
    }

    /// Delete one revision of a resource.
    ///
    /// A stale `signature` is rejected by the gateway with an API error.
    ///
    /// # Errors
    ///
    /// Returns error on network or API errors.
    pub async fn delete_resource(
        &self,
        ctx: &CallContext,
        module: &str,
        kind: &str,
        name: &str,
        signature: &str,
    ) -> Result<(), ClientError> {
        let path = delete_resource_path(module, kind, name, signature);
        self.transport
            .execute(ctx, Method::DELETE, &path, None)
            .await?;
        Ok(())
    }

    /// [`get_resource`](Self::get_resource) in the default module.
    ///
    /// # Errors
    ///
    /// Returns error on network, API or decode errors.
    pub async fn get_resource_default<C: DeserializeOwned + Default>(
        &self,
        ctx: &CallContext,
        kind: &str,
        name: &str,
    ) -> Result<ResourceEnvelope<C>, ClientError> {
        self.get_resource(ctx, DEFAULT_MODULE, kind, name).await
    }

    /// [`create_resource`](Self::create_resource) in the default module.
    ///
    /// # Errors
    ///
    /// Returns error on network, API or decode errors.
    pub async fn create_resource_default<C>(
        &self,
        ctx: &CallContext,
        kind: &str,
        item: &ResourceEnvelope<C>,
    ) -> Result<ResourceEnvelope<C>, ClientError>
    where
        C: Serialize + DeserializeOwned + Default,
    {
        self.create_resource(ctx, DEFAULT_MODULE, kind, item).await
    }

    /// [`update_resource`](Self::update_resource) in the default module.
    ///
    /// # Errors
    ///
    /// Returns error on network, API or decode errors.
    pub async fn update_resource_default<C>(
        &self,
        ctx: &CallContext,
        kind: &str,
        item: &ResourceEnvelope<C>,
    ) -> Result<ResourceEnvelope<C>, ClientError>
    where
        C: Serialize + DeserializeOwned + Default,
    {
        self.update_resource(ctx, DEFAULT_MODULE, kind, item).await
    }

    /// [`delete_resource`](Self::delete_resource) in the default module.
    ///
    /// # Errors
    ///
    /// Returns error on network or API errors.
    pub async fn delete_resource_default(
        &self,
        ctx: &CallContext,
        kind: &str,
        name: &str,
        signature: &str,
    ) -> Result<(), ClientError> {
        self.delete_resource(ctx, DEFAULT_MODULE, kind, name, signature)
            .await
    }

    /// Read a resource of kind `K`.
    ///
    /// # Errors
    ///
    /// Returns error on network, API or decode errors.
    pub async fn get<K: ResourceKind>(
        &self,
        ctx: &CallContext,
        name: &str,
    ) -> Result<ResourceEnvelope<K::Config>, ClientError> {
        self.get_resource(ctx, K::MODULE, K::TYPE, name).await
    }

    /// Read the singleton of kind `K`.
    ///
    /// # Errors
    ///
    /// Returns error on network, API or decode errors.
    pub async fn get_singleton<K: ResourceKind>(
        &self,
        ctx: &CallContext,
    ) -> Result<ResourceEnvelope<K::Config>, ClientError> {
        self.get_resource(ctx, K::MODULE, K::TYPE, "").await
    }

    /// Create a resource of kind `K`.
    ///
    /// # Errors
    ///
    /// Returns error on network, API or decode errors.
    pub async fn create<K: ResourceKind>(
        &self,
        ctx: &CallContext,
        item: &ResourceEnvelope<K::Config>,
    ) -> Result<ResourceEnvelope<K::Config>, ClientError> {
        self.create_resource(ctx, K::MODULE, K::TYPE, item).await
    }

    /// Update a resource of kind `K`.
    ///
    /// # Errors
    ///
    /// Returns error on network, API or decode errors.
    pub async fn update<K: ResourceKind>(
        &self,
        ctx: &CallContext,
        item: &ResourceEnvelope<K::Config>,
    ) -> Result<ResourceEnvelope<K::Config>, ClientError> {
        self.update_resource(ctx, K::MODULE, K::TYPE, item).await
    }

    /// Delete a resource of kind `K`.
    ///
    /// # Errors
    ///
    /// Returns error on network or API errors.
    pub async fn delete<K: ResourceKind>(
        &self,
        ctx: &CallContext,
        name: &str,
        signature: &str,
    ) -> Result<(), ClientError> {
        self.delete_resource(ctx, K::MODULE, K::TYPE, name, signature)
            .await
    }

    async fn mutate<C>(
        &self,
        ctx: &CallContext,
        method: Method,
        module: &str,
        kind: &str,
        item: &ResourceEnvelope<C>,
    ) -> Result<ResourceEnvelope<C>, ClientError>
    where
        C: Serialize + DeserializeOwned + Default,
    {
        // The gateway accepts mutations as a batch; we always send one.
        let payload =
            serde_json::to_vec(&[item]).map_err(|e| ClientError::Serialize(e.to_string()))?;
        let path = resource_collection_path(module, kind);
        let body = self
            .transport
            .execute(ctx, method, &path, Some(payload))
            .await?;

        match decode::classify(&body)?.resolve()? {
            Resolution::Envelope(envelope) => Ok(envelope),
            Resolution::FollowUp(name) => {
                tracing::debug!(
                    module,
                    kind,
                    name = %name,
                    "change-set reply, reading resource back"
                );
                self.get_resource(ctx, module, kind, &name).await
            }
        }
    }
}
