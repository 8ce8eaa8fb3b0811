use core_config::AppInfo;
use serde::Serialize;

/// Liveness payload: fixed status plus service identity, with
/// service-specific fields flattened alongside.
#[derive(Debug, Serialize)]
pub struct HealthResponse<T> {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    #[serde(flatten)]
    pub details: T,
}

impl<T: Serialize> HealthResponse<T> {
    pub fn healthy(app: AppInfo, details: T) -> Self {
        Self {
            status: "healthy",
            service: app.name,
            version: app.version,
            details,
        }
    }
}
