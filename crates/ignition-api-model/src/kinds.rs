//! Typed payloads for the resource kinds the gateway ships with.
//!
//! Each kind is a unit marker implementing [`ResourceKind`], which pins the
//! `(module, type)` address and the `config` payload type. Client code is
//! generic over the marker, so adding a kind is a matter of declaring one.
//!
//! Attribute sets with open-ended or type-dependent shapes keep those parts
//! as `serde_json` values rather than guessing at the gateway's schema.

use crate::envelope::DEFAULT_MODULE;
use crate::secret::Secret;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Binds a resource kind to its address and payload type.
pub trait ResourceKind {
    /// Module owning the kind.
    const MODULE: &'static str = DEFAULT_MODULE;
    /// Type identifier inside the module.
    const TYPE: &'static str;
    /// Kind-specific `config` payload.
    type Config: Serialize + DeserializeOwned + Default + Send + Sync;
}

macro_rules! resource_kind {
    ($(#[$doc:meta])* $marker:ident, $ty:literal => $config:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $marker;

        impl ResourceKind for $marker {
            const TYPE: &'static str = $ty;
            type Config = $config;
        }
    };
    ($(#[$doc:meta])* $marker:ident, $module:literal / $ty:literal => $config:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $marker;

        impl ResourceKind for $marker {
            const MODULE: &'static str = $module;
            const TYPE: &'static str = $ty;
            type Config = $config;
        }
    };
}

resource_kind!(
    /// JDBC database connection.
    DatabaseConnection, "database-connection" => DatabaseConfig
);
resource_kind!(
    /// Realtime tag provider.
    TagProvider, "tag-provider" => TagProviderConfig
);
resource_kind!(
    /// Authentication user source.
    UserSource, "user-source" => UserSourceConfig
);
resource_kind!(
    /// Audit log profile.
    AuditProfile, "audit-profile" => AuditProfileConfig
);
resource_kind!(
    /// Alarm notification profile, owned by the alarm-notification module.
    AlarmNotificationProfile,
    "com.inductiveautomation.alarm-notification" / "alarm-notification-profile" => AlarmNotificationProfileConfig
);
resource_kind!(
    /// Outgoing OPC UA server connection.
    OpcUaConnection, "opc-connection" => OpcUaConnectionConfig
);
resource_kind!(
    /// Alarm journal.
    AlarmJournal, "alarm-journal" => AlarmJournalConfig
);
resource_kind!(
    /// Email (SMTP) profile.
    SmtpProfile, "email-profile" => SmtpProfileConfig
);
resource_kind!(
    /// Store-and-forward engine.
    StoreAndForward, "store-and-forward-engine" => StoreAndForwardConfig
);
resource_kind!(
    /// Identity provider (internal, OIDC or SAML).
    IdentityProvider, "identity-provider" => IdentityProviderConfig
);
resource_kind!(
    /// Outgoing gateway-network connection.
    GanOutgoing, "gateway-network-outgoing" => GanOutgoingConfig
);
resource_kind!(
    /// OPC UA device (driver), owned by the OPC UA module.
    Device, "com.inductiveautomation.opcua" / "device" => DeviceConfig
);
resource_kind!(
    /// Gateway-network general settings. Singleton: address it with an empty name.
    GanGeneralSettings, "gateway-network-settings" => GanGeneralSettingsConfig
);

/// Device driver parameters. The keys depend on the driver type
/// (`ModbusTcp`, `S71500`, `ProgrammableSimulatorDevice`, ...).
pub type DeviceConfig = Map<String, Value>;

/// Database connection attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConfig {
    /// JDBC driver name
    #[serde(default)]
    pub driver: String,
    /// SQL translator
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub translator: String,
    /// JDBC connect URL
    #[serde(rename = "connectURL", default)]
    pub connect_url: String,
    /// Username
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    /// Password as a secret envelope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Secret>,
}

/// Tag provider attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagProviderConfig {
    /// Provider type (e.g. `STANDARD`)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// User source attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSourceConfig {
    /// Profile section
    #[serde(default)]
    pub profile: UserSourceProfile,
}

/// Profile section of a user source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSourceProfile {
    /// Source type (e.g. `INTERNAL`)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Failover profile name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub failover_profile: String,
    /// Failover mode
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub failover_mode: String,
    /// Whether logins are restricted by schedule
    #[serde(default)]
    pub schedule_restricted: bool,
}

/// Audit profile attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditProfileConfig {
    /// Profile section
    #[serde(default)]
    pub profile: AuditProfileProfile,
    /// Type-specific settings
    #[serde(default)]
    pub settings: AuditProfileSettings,
}

/// Profile section of an audit profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditProfileProfile {
    /// Profile type (e.g. `DATABASE`)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Days to keep audit events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_days: Option<u32>,
}

/// Settings section of an audit profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditProfileSettings {
    /// Database connection name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub database_name: String,
    /// Whether pruning is enabled
    #[serde(default)]
    pub prune_enabled: bool,
    /// Whether the table is created automatically
    #[serde(default)]
    pub auto_create: bool,
    /// Table name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub table_name: String,
    /// Remote gateway (remote profiles)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub remote_server: String,
    /// Remote profile name (remote profiles)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub remote_profile: String,
    /// Whether to route through store-and-forward
    #[serde(default)]
    pub enable_store_and_forward: bool,
}

/// Alarm notification profile attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlarmNotificationProfileConfig {
    /// Profile section
    #[serde(default)]
    pub profile: TypedProfile,
    /// Type-specific settings, shape depends on `profile.type`
    #[serde(default)]
    pub settings: Map<String, Value>,
}

/// Profile section that only names a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedProfile {
    /// Profile type identifier
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// OPC UA connection attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpcUaConnectionConfig {
    /// Profile section (e.g. `com.inductiveautomation.OpcUaServerType`)
    #[serde(default)]
    pub profile: TypedProfile,
    /// Connection settings
    #[serde(default)]
    pub settings: OpcUaConnectionSettings,
}

/// Settings section of an OPC UA connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpcUaConnectionSettings {
    /// Endpoint selection
    #[serde(default)]
    pub endpoint: OpcUaEndpoint,
}

/// OPC UA endpoint selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpcUaEndpoint {
    /// Discovery URL
    #[serde(default)]
    pub discovery_url: String,
    /// Endpoint URL
    #[serde(default)]
    pub endpoint_url: String,
    /// Security policy
    #[serde(default)]
    pub security_policy: String,
    /// Security mode
    #[serde(default)]
    pub security_mode: String,
}

/// Alarm journal attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlarmJournalConfig {
    /// Profile section
    #[serde(default)]
    pub profile: AlarmJournalProfile,
    /// Settings; `DATASOURCE` and `REMOTE` journals use different subsets
    #[serde(default)]
    pub settings: Map<String, Value>,
}

/// Profile section of an alarm journal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmJournalProfile {
    /// Journal type (e.g. `DATASOURCE`)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Whether the journal only serves queries
    #[serde(default)]
    pub query_only: bool,
}

/// Email profile attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmtpProfileConfig {
    /// Profile section (`smtp.classic` or `smtp.oauth2`)
    #[serde(default)]
    pub profile: TypedProfile,
    /// Settings wrapper
    #[serde(default)]
    pub settings: SmtpProfileSettings,
}

/// Settings wrapper of an email profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmtpProfileSettings {
    /// Classic SMTP settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SmtpClassicSettings>,
}

/// Classic SMTP server settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpClassicSettings {
    /// SMTP host
    #[serde(default)]
    pub hostname: String,
    /// SMTP port
    #[serde(default)]
    pub port: u16,
    /// Whether to connect on the SSL port
    #[serde(default)]
    pub use_ssl_port: bool,
    /// Whether to negotiate STARTTLS
    #[serde(default)]
    pub start_tls_enabled: bool,
    /// Username
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    /// Password as a secret envelope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Secret>,
}

/// Store-and-forward engine attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAndForwardConfig {
    /// Time threshold before forwarding (ms)
    #[serde(default)]
    pub time_threshold_ms: u64,
    /// Forwarding rate (ms)
    #[serde(default)]
    pub forward_rate_ms: u64,
    /// Forwarding policy
    #[serde(default)]
    pub forwarding_policy: String,
    /// Forwarding schedule
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub forwarding_schedule: String,
    /// Whether the engine serves third-party data
    #[serde(default)]
    pub is_third_party: bool,
    /// Record count threshold before forwarding
    #[serde(default)]
    pub data_threshold: u64,
    /// Records per forward batch
    #[serde(default)]
    pub batch_size: u64,
    /// Scan rate (ms)
    #[serde(default)]
    pub scan_rate_ms: u64,
    /// Maintenance policy of the primary store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_maintenance_policy: Option<MaintenancePolicy>,
    /// Maintenance policy of the secondary store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_maintenance_policy: Option<MaintenancePolicy>,
}

/// Store-and-forward maintenance policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenancePolicy {
    /// Action taken when the limit is hit
    #[serde(default)]
    pub action: String,
    /// Limit definition
    #[serde(default)]
    pub limit: MaintenanceLimit,
}

/// Limit of a maintenance policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLimit {
    /// Limit type
    #[serde(default)]
    pub limit_type: String,
    /// Limit value
    #[serde(default)]
    pub value: u64,
}

/// Identity provider attributes. `config` is shaped by `type`
/// (`internal`, `oidc` or `saml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityProviderConfig {
    /// Provider type
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Type-specific configuration
    #[serde(default)]
    pub config: Value,
}

/// Outgoing gateway-network connection attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanOutgoingConfig {
    /// Remote host
    #[serde(default)]
    pub host: String,
    /// Remote port
    #[serde(default)]
    pub port: u16,
    /// Whether to use SSL
    #[serde(rename = "useSSL", default)]
    pub use_ssl: bool,
    /// Ping rate (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ping_rate_millis: Option<f64>,
    /// Ping timeout (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ping_timeout_millis: Option<f64>,
    /// Missed pings before the connection is faulted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ping_max_missed: Option<f64>,
    /// Websocket timeout (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_timeout_millis: Option<f64>,
    /// HTTP connect timeout (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_connect_timeout_millis: Option<f64>,
    /// HTTP read timeout (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_read_timeout_millis: Option<f64>,
    /// Sender threads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_threads: Option<f64>,
    /// Receiver threads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_threads: Option<f64>,
}

/// Gateway-network general settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanGeneralSettingsConfig {
    /// Require SSL on gateway-network connections
    #[serde(rename = "requireSSL", default)]
    pub require_ssl: bool,
    /// Require two-way authentication
    #[serde(default)]
    pub require_two_way_auth: bool,
    /// Accept incoming connections
    #[serde(default)]
    pub allow_incoming: bool,
    /// Connection security policy
    #[serde(default)]
    pub security_policy: String,
    /// Allowed remote addresses
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub whitelist: String,
    /// Maximum proxy hops
    #[serde(default)]
    pub allowed_proxy_hops: f64,
    /// Websocket session idle timeout
    #[serde(default)]
    pub websocket_session_idle_timeout: f64,
    /// Maximum age of temporary files (hours)
    #[serde(default)]
    pub temp_files_max_age_hours: f64,
}

/// Gateway redundancy settings, served by a dedicated singleton endpoint
/// rather than the generic resource surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedundancyConfig {
    /// `Independent`, `Master` or `Backup`
    #[serde(default)]
    pub role: String,
    /// History level while active
    #[serde(default)]
    pub active_history_level: String,
    /// Join wait time (ms)
    #[serde(default)]
    pub join_wait_time: u64,
    /// Recovery mode
    #[serde(default)]
    pub recovery_mode: String,
    /// Whether history cleanup is allowed
    #[serde(default)]
    pub allow_history_cleanup: bool,
    /// Gateway-network connection to the peer, when not independent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_network_setup: Option<Map<String, Value>>,
}
