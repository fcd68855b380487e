//! POSIX capability backend.
//!
//! Answers from the calling thread's effective capability set as reported by
//! `capget(2)`. Capability sets are per thread, so a thread that drops a
//! capability only changes its own answers.

mod capget;

use nix::errno::Errno;

pub use capget::CapabilitySets;

use crate::{CapabilityBackend, CapabilityId, QueryError};

const CAP_CHOWN: u8 = 0;
const CAP_DAC_OVERRIDE: u8 = 1;
const CAP_FOWNER: u8 = 3;
const CAP_KILL: u8 = 5;
const CAP_SETGID: u8 = 6;
const CAP_SETUID: u8 = 7;
const CAP_NET_BIND_SERVICE: u8 = 10;
const CAP_NET_ADMIN: u8 = 12;
const CAP_NET_RAW: u8 = 13;
const CAP_IPC_LOCK: u8 = 14;
const CAP_SYS_CHROOT: u8 = 18;
const CAP_SYS_PTRACE: u8 = 19;
const CAP_SYS_ADMIN: u8 = 21;
const CAP_SYS_NICE: u8 = 23;
const CAP_SYS_RESOURCE: u8 = 24;
const CAP_SYS_TIME: u8 = 25;
const CAP_MKNOD: u8 = 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CapgetError {
    #[error("Not allowed to read own capabilities ({0})")]
    PermissionDenied(Errno),
    #[error("Kernel does not implement capget")]
    Unsupported,
    #[error("Kernel rejected capability version, prefers {preferred:#x}")]
    UnsupportedVersion { preferred: u32 },
    #[error("Capability bit {0} is outside the capability mask")]
    BitOutOfRange(u8),
    #[error("Unexpected OS error {0}")]
    Os(Errno),
}

impl CapgetError {
    /// `version` is the header version after the failed call; the kernel
    /// overwrites it with its preferred version when it rejects ours.
    fn from_errno(err: Errno, version: u32) -> Self {
        match err {
            Errno::EPERM | Errno::EACCES => CapgetError::PermissionDenied(err),
            Errno::ENOSYS => CapgetError::Unsupported,
            Errno::EINVAL if version != capget::LINUX_CAPABILITY_VERSION_3 => {
                CapgetError::UnsupportedVersion { preferred: version }
            }
            err => CapgetError::Os(err),
        }
    }
}

/// Backend reading the effective set of the calling thread.
#[derive(Debug)]
pub struct PosixCapabilities;

impl CapabilityBackend for PosixCapabilities {
    /// `CAP_*` bit position.
    type Native = u8;

    fn native(cap: CapabilityId) -> u8 {
        match cap {
            CapabilityId::ChangeOwnership => CAP_CHOWN,
            CapabilityId::OverrideAccessControl => CAP_DAC_OVERRIDE,
            CapabilityId::OverrideOwnership => CAP_FOWNER,
            CapabilityId::Kill => CAP_KILL,
            CapabilityId::SetGroupId => CAP_SETGID,
            CapabilityId::SetUserId => CAP_SETUID,
            CapabilityId::BindPrivilegedPort => CAP_NET_BIND_SERVICE,
            CapabilityId::NetworkAdmin => CAP_NET_ADMIN,
            CapabilityId::RawSocket => CAP_NET_RAW,
            CapabilityId::LockMemory => CAP_IPC_LOCK,
            CapabilityId::ChangeRoot => CAP_SYS_CHROOT,
            CapabilityId::TraceProcess => CAP_SYS_PTRACE,
            CapabilityId::SystemAdmin => CAP_SYS_ADMIN,
            CapabilityId::RaiseSchedulingPriority => CAP_SYS_NICE,
            CapabilityId::OverrideResourceLimits => CAP_SYS_RESOURCE,
            CapabilityId::SetSystemTime => CAP_SYS_TIME,
            CapabilityId::MakeNode => CAP_MKNOD,
        }
    }

    fn query(cap: CapabilityId) -> Result<bool, QueryError> {
        let bit = Self::native(cap);
        log::trace!("Query {cap} as capability bit {bit}");
        let held = CapabilitySets::current()
            .and_then(|sets| sets.is_effective(bit))
            .inspect_err(|e| log::debug!("Unable to query {cap}: {e}"))?;
        Ok(held)
    }
}

#[cfg(feature = "userns")]
#[derive(Debug, thiserror::Error)]
pub enum UserNamespaceProbeError {
    #[error("Failed to fork probe process {0}")]
    Fork(Errno),
    #[error("Failed to wait for probe process {0}")]
    Wait(Errno),
    #[error("Probe process ended unexpectedly: {0:?}")]
    UnexpectedStatus(nix::sys::wait::WaitStatus),
}

/// Reports whether this process could create a new user namespace.
///
/// The attempt happens in a forked child, so the caller's namespaces and
/// credentials stay as they are.
#[cfg(feature = "userns")]
pub fn can_create_user_namespace() -> Result<bool, UserNamespaceProbeError> {
    use nix::{
        sched::{unshare, CloneFlags},
        sys::wait::{waitpid, WaitStatus},
        unistd::{fork, ForkResult},
    };

    const CREATED: libc::c_int = 0;
    const REFUSED: libc::c_int = 1;
    const FAILED: libc::c_int = 2;

    match unsafe { fork() }.map_err(UserNamespaceProbeError::Fork)? {
        ForkResult::Child => {
            let code = match unshare(CloneFlags::CLONE_NEWUSER) {
                Ok(()) => CREATED,
                Err(Errno::EPERM | Errno::EUSERS | Errno::ENOSPC | Errno::EINVAL) => REFUSED,
                Err(_) => FAILED,
            };
            unsafe { libc::_exit(code) }
        }
        ForkResult::Parent { child } => {
            let status = waitpid(child, None).map_err(UserNamespaceProbeError::Wait)?;
            log::debug!("User namespace probe {child} finished with {status:?}");
            match status {
                WaitStatus::Exited(_, CREATED) => Ok(true),
                WaitStatus::Exited(_, REFUSED) => Ok(false),
                status => Err(UserNamespaceProbeError::UnexpectedStatus(status)),
            }
        }
    }
}
