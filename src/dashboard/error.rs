use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Dashboard host failed to {action}")]
    Host {
        action: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Forecast at {timestamp} has confidence {confidence}, expected a value in [0, 1]")]
    InvalidConfidence {
        timestamp: NaiveDateTime,
        confidence: f64,
    },
}

impl DashboardError {
    /// Wraps an error raised by a GUI host while performing `action`.
    pub fn host(
        action: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        DashboardError::Host {
            action,
            source: source.into(),
        }
    }
}
