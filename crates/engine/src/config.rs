use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// Deserializable so deployments can load it from their config files; the
/// defaults match the hosted tracking site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL interpolated into notification bodies (tracking, scheduling
    /// and review links).
    pub public_base_url: String,
    /// Days a client has to review the delivery before the order
    /// auto-completes.
    pub evaluation_response_days: i64,
    /// Recipient of trade-in manager-approval alerts.
    pub manager_email: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            public_base_url: "https://acompanhe.pista.app".to_string(),
            evaluation_response_days: 7,
            manager_email: "gerente@concessionaria.com".to_string(),
        }
    }
}
