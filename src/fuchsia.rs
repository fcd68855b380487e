//! Handle-rights backend.
//!
//! Zircon has no ambient per-process privilege. Authority comes from holding
//! a handle with the right rights, or from a service being routed into the
//! component namespace. A handle that is not reachable from this process means
//! the privilege is not held.

pub(crate) mod zircon;

use getset::CopyGetters;

use crate::{CapabilityBackend, CapabilityId, QueryError};

use zircon::{zx_handle_t, zx_obj_type_t, zx_rights_t, zx_status_t};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ZirconError {
    #[error("zx_object_get_info failed with status {status}")]
    GetInfo { status: zx_status_t },
    #[error("{handle:?} handle has object type {actual}, expected {expected}")]
    WrongType {
        handle: HandleSource,
        expected: zx_obj_type_t,
        actual: zx_obj_type_t,
    },
    #[error("Failed to look up {path}: {kind}")]
    Namespace {
        path: &'static str,
        kind: std::io::ErrorKind,
    },
}

/// Where the handle conferring a privilege comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSource {
    DefaultJob,
    UtcClock,
}

impl HandleSource {
    fn handle(&self) -> zx_handle_t {
        unsafe {
            match self {
                HandleSource::DefaultJob => zircon::zx_job_default(),
                HandleSource::UtcClock => zircon::zx_utc_reference_get(),
            }
        }
    }

    fn object_type(&self) -> zx_obj_type_t {
        match self {
            HandleSource::DefaultJob => zircon::ZX_OBJ_TYPE_JOB,
            HandleSource::UtcClock => zircon::ZX_OBJ_TYPE_CLOCK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightsRequirement {
    /// A handle from `source` carrying every bit of `rights`.
    Handle {
        source: HandleSource,
        rights: zx_rights_t,
    },
    /// A protocol routed into the component namespace.
    Service(&'static str),
}

/// Basic information about a handle held by this process.
#[derive(Debug, Clone, Copy, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct HandleInfo {
    koid: u64,
    rights: zx_rights_t,
    object_type: zx_obj_type_t,
}

impl HandleInfo {
    /// `None` if `source` has no handle in this process.
    pub fn lookup(source: HandleSource) -> Result<Option<Self>, ZirconError> {
        let handle = source.handle();
        if handle == zircon::ZX_HANDLE_INVALID {
            log::debug!("No {source:?} handle available");
            return Ok(None);
        }
        let mut info = zircon::zx_info_handle_basic_t::default();
        let mut actual = 0;
        let mut avail = 0;
        let status = unsafe {
            zircon::zx_object_get_info(
                handle,
                zircon::ZX_INFO_HANDLE_BASIC,
                &mut info as *mut _ as *mut libc::c_void,
                std::mem::size_of::<zircon::zx_info_handle_basic_t>(),
                &mut actual,
                &mut avail,
            )
        };
        if status != zircon::ZX_OK {
            return Err(ZirconError::GetInfo { status });
        }
        if info.type_ != source.object_type() {
            return Err(ZirconError::WrongType {
                handle: source,
                expected: source.object_type(),
                actual: info.type_,
            });
        }
        Ok(Some(Self {
            koid: info.koid,
            rights: info.rights,
            object_type: info.type_,
        }))
    }

    pub fn has_rights(&self, required: zx_rights_t) -> bool {
        carries(Some(self.rights), required)
    }
}

/// A missing handle carries no rights.
fn carries(rights: Option<zx_rights_t>, required: zx_rights_t) -> bool {
    rights.is_some_and(|rights| rights & required == required)
}

fn service_routed(path: &'static str) -> Result<bool, ZirconError> {
    std::path::Path::new(path)
        .try_exists()
        .map_err(|e| ZirconError::Namespace {
            path,
            kind: e.kind(),
        })
}

/// Backend matching handle rights against the privilege asked for.
#[derive(Debug)]
pub struct HandleRights;

impl CapabilityBackend for HandleRights {
    type Native = RightsRequirement;

    fn native(cap: CapabilityId) -> RightsRequirement {
        use zircon::*;
        match cap {
            CapabilityId::Kill => RightsRequirement::Handle {
                source: HandleSource::DefaultJob,
                rights: ZX_RIGHT_DESTROY,
            },
            CapabilityId::RawSocket => {
                RightsRequirement::Service("/svc/fuchsia.posix.socket.raw.Provider")
            }
            CapabilityId::TraceProcess => RightsRequirement::Handle {
                source: HandleSource::DefaultJob,
                rights: ZX_RIGHT_ENUMERATE | ZX_RIGHT_INSPECT,
            },
            CapabilityId::SystemAdmin => RightsRequirement::Handle {
                source: HandleSource::DefaultJob,
                rights: ZX_RIGHT_MANAGE_JOB | ZX_RIGHT_SET_POLICY,
            },
            CapabilityId::SetSystemTime => RightsRequirement::Handle {
                source: HandleSource::UtcClock,
                rights: ZX_RIGHT_WRITE,
            },
        }
    }

    fn query(cap: CapabilityId) -> Result<bool, QueryError> {
        let requirement = Self::native(cap);
        log::trace!("Query {cap} as {requirement:?}");
        let held = match requirement {
            RightsRequirement::Handle { source, rights } => HandleInfo::lookup(source)
                .map(|info| info.is_some_and(|info| info.has_rights(rights))),
            RightsRequirement::Service(path) => service_routed(path),
        }
        .inspect_err(|e| log::debug!("Unable to query {cap}: {e}"))?;
        Ok(held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zircon::*;

    #[test]
    fn missing_handle_is_not_held() {
        assert!(!carries(None, ZX_RIGHT_DESTROY));
        assert!(!carries(None, 0));
    }

    #[test]
    fn every_required_right_must_be_present() {
        let required = ZX_RIGHT_ENUMERATE | ZX_RIGHT_INSPECT;
        assert!(carries(Some(required | ZX_RIGHT_WRITE), required));
        assert!(!carries(Some(ZX_RIGHT_INSPECT), required));
    }

    #[test]
    fn default_job_lookup_succeeds_or_is_absent() {
        // test runners may launch without a default job
        if let Some(info) = HandleInfo::lookup(HandleSource::DefaultJob).unwrap() {
            assert_eq!(info.object_type(), ZX_OBJ_TYPE_JOB);
        }
    }

    #[test]
    fn unrouted_service_is_not_held() {
        assert_eq!(service_routed("/svc/does.not.Exist"), Ok(false));
    }
}
