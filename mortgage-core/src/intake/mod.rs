//! Hand-off point for completed applications.
//!
//! The wizard only guarantees that a record is complete and field-validated.
//! What happens to it next (an HTTP endpoint, a queue, a printout) is up to
//! an [`ApplicationIntake`] implementation supplied by the caller.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ApplicationRecord;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("application rejected: {0}")]
    Rejected(String),

    #[error("intake unavailable: {0}")]
    Unavailable(String),
}

/// Acknowledgement returned by an intake once it has accepted a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeReceipt {
    /// Intake-assigned reference for follow-up.
    pub reference: String,
    pub received_at: DateTime<Utc>,
}

#[async_trait]
pub trait ApplicationIntake: Send + Sync {
    /// Accepts a completed application. Called once per successful submit;
    /// implementations must not expect retries.
    async fn submit(
        &self,
        record: &ApplicationRecord,
    ) -> Result<IntakeReceipt, IntakeError>;
}
