//! Secret encryption endpoint.

use crate::client::GatewayClient;
use crate::context::CallContext;
use crate::decode;
use crate::encoding::encrypt_path;
use crate::error::ClientError;
use ignition_api_model::Secret;
use serde_json::Value;

impl GatewayClient {
    /// Encrypt `plaintext` on the gateway and wrap the result as an
    /// embedded [`Secret`].
    ///
    /// The call is sent exactly once; it is not subject to the retry policy.
    ///
    /// # Errors
    ///
    /// Returns error on network or API errors, or if the gateway does not
    /// answer with a JSON object.
    pub async fn encrypt_secret(
        &self,
        ctx: &CallContext,
        plaintext: &str,
    ) -> Result<Secret, ClientError> {
        let body = self
            .transport
            .execute_text_once(ctx, &encrypt_path(), plaintext.to_string())
            .await?;

        match decode::decode_json::<Value>(&body)? {
            data @ Value::Object(_) => Ok(Secret::embedded(data)),
            _ => Err(ClientError::Unmarshal(
                "encryption result is not a JSON object".to_string(),
            )),
        }
    }
}
