//! Point queries for "does the calling thread currently hold privilege X?",
//! answered by whichever backend the target platform selects at build time.
//!
//! On Linux the answer comes from the thread's effective capability set. On
//! Fuchsia it comes from the rights carried by the handle that confers the
//! privilege. Nothing is cached: every call re-reads live state.

mod capability;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "fuchsia")]
pub mod fuchsia;

#[cfg(not(any(target_os = "linux", target_os = "fuchsia")))]
compile_error!("Unhandled platform: capability queries are only implemented for linux and fuchsia");

pub use capability::CapabilityId;

/// The backend compiled into this build.
#[cfg(target_os = "linux")]
pub type ActiveBackend = linux::PosixCapabilities;

/// The backend compiled into this build.
#[cfg(target_os = "fuchsia")]
pub type ActiveBackend = fuchsia::HandleRights;

/// One platform's way of answering a capability query.
pub trait CapabilityBackend {
    /// Platform-native form of a [`CapabilityId`].
    type Native: std::fmt::Debug;

    fn native(cap: CapabilityId) -> Self::Native;

    /// `Ok(true)` if the privilege is currently effective, `Ok(false)` if it
    /// is absent.
    fn query(cap: CapabilityId) -> Result<bool, QueryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[cfg(target_os = "linux")]
    #[error("capget failed: {0}")]
    Capget(#[from] linux::CapgetError),
    #[cfg(target_os = "fuchsia")]
    #[error("handle rights lookup failed: {0}")]
    Zircon(#[from] fuchsia::ZirconError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityQueryResult {
    Held,
    NotHeld,
    QueryFailed(QueryError),
}

impl CapabilityQueryResult {
    pub fn is_held(&self) -> bool {
        matches!(self, CapabilityQueryResult::Held)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CapabilityQueryResult::QueryFailed(_))
    }

    pub fn into_result(self) -> Result<bool, QueryError> {
        self.into()
    }
}

impl From<Result<bool, QueryError>> for CapabilityQueryResult {
    fn from(res: Result<bool, QueryError>) -> Self {
        match res {
            Ok(true) => CapabilityQueryResult::Held,
            Ok(false) => CapabilityQueryResult::NotHeld,
            Err(e) => CapabilityQueryResult::QueryFailed(e),
        }
    }
}

impl From<CapabilityQueryResult> for Result<bool, QueryError> {
    fn from(res: CapabilityQueryResult) -> Self {
        match res {
            CapabilityQueryResult::Held => Ok(true),
            CapabilityQueryResult::NotHeld => Ok(false),
            CapabilityQueryResult::QueryFailed(e) => Err(e),
        }
    }
}

/// Asks the active backend whether `cap` is currently held by the calling
/// thread.
pub fn have_capability(cap: CapabilityId) -> CapabilityQueryResult {
    ActiveBackend::query(cap).into()
}
