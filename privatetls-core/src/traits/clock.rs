use time::OffsetDateTime;

use crate::error::CredentialError;

pub trait Clock: Send + Sync {
    fn now_secs(&self) -> Result<u64, CredentialError>;

    /// Current time in UTC, whole seconds only.
    fn now_utc(&self) -> Result<OffsetDateTime, CredentialError> {
        let secs = self.now_secs()?;
        let secs = i64::try_from(secs)
            .map_err(|_| CredentialError::Platform(format!("clock value {secs} out of range")))?;

        OffsetDateTime::from_unix_timestamp(secs)
            .map_err(|e| CredentialError::Platform(format!("clock value {secs} out of range: {e}")))
    }
}
