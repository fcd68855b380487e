#![cfg(target_os = "linux")]

use capability_util::{have_capability, CapabilityId, CapabilityQueryResult};
use caps::{CapSet, Capability};
use simplelog::{Config, LevelFilter, TestLogger};

fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

fn oracle(cap: CapabilityId) -> Capability {
    match cap {
        CapabilityId::ChangeOwnership => Capability::CAP_CHOWN,
        CapabilityId::OverrideAccessControl => Capability::CAP_DAC_OVERRIDE,
        CapabilityId::OverrideOwnership => Capability::CAP_FOWNER,
        CapabilityId::Kill => Capability::CAP_KILL,
        CapabilityId::SetGroupId => Capability::CAP_SETGID,
        CapabilityId::SetUserId => Capability::CAP_SETUID,
        CapabilityId::BindPrivilegedPort => Capability::CAP_NET_BIND_SERVICE,
        CapabilityId::NetworkAdmin => Capability::CAP_NET_ADMIN,
        CapabilityId::RawSocket => Capability::CAP_NET_RAW,
        CapabilityId::LockMemory => Capability::CAP_IPC_LOCK,
        CapabilityId::ChangeRoot => Capability::CAP_SYS_CHROOT,
        CapabilityId::TraceProcess => Capability::CAP_SYS_PTRACE,
        CapabilityId::SystemAdmin => Capability::CAP_SYS_ADMIN,
        CapabilityId::RaiseSchedulingPriority => Capability::CAP_SYS_NICE,
        CapabilityId::OverrideResourceLimits => Capability::CAP_SYS_RESOURCE,
        CapabilityId::SetSystemTime => Capability::CAP_SYS_TIME,
        CapabilityId::MakeNode => Capability::CAP_MKNOD,
    }
}

#[test]
fn mapping_matches_kernel_numbering() {
    use capability_util::{ActiveBackend, CapabilityBackend};
    for cap in CapabilityId::ALL {
        assert_eq!(ActiveBackend::native(*cap), oracle(*cap).index(), "{cap}");
    }
}

#[test]
fn agrees_with_effective_set_reported_by_caps() {
    init_logger();
    for cap in CapabilityId::ALL {
        let expected = caps::has_cap(None, CapSet::Effective, oracle(*cap)).unwrap();
        assert_eq!(have_capability(*cap).into_result(), Ok(expected), "{cap}");
    }
}

#[test]
fn repeated_queries_agree() {
    init_logger();
    for cap in CapabilityId::ALL {
        let first = have_capability(*cap);
        let second = have_capability(*cap);
        assert!(!first.is_failed(), "{cap}: {first:?}");
        assert_eq!(first, second, "{cap}");
    }
}

#[test]
fn dropping_on_one_thread_does_not_leak_to_another() {
    init_logger();
    let before = have_capability(CapabilityId::TraceProcess);
    std::thread::spawn(|| {
        caps::drop(None, CapSet::Effective, Capability::CAP_SYS_PTRACE).unwrap();
        assert_eq!(
            have_capability(CapabilityId::TraceProcess),
            CapabilityQueryResult::NotHeld
        );
    })
    .join()
    .unwrap();
    assert_eq!(have_capability(CapabilityId::TraceProcess), before);
}
