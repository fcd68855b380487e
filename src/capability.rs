use std::fmt::Display;

/// A privilege concept that a test may need before exercising privileged
/// behavior.
///
/// Variants without an equivalent on the target platform are not compiled
/// there, so asking for them is a build error rather than a silent
/// "not held".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityId {
    #[cfg(target_os = "linux")]
    ChangeOwnership,
    #[cfg(target_os = "linux")]
    OverrideAccessControl,
    #[cfg(target_os = "linux")]
    OverrideOwnership,
    Kill,
    #[cfg(target_os = "linux")]
    SetGroupId,
    #[cfg(target_os = "linux")]
    SetUserId,
    #[cfg(target_os = "linux")]
    BindPrivilegedPort,
    #[cfg(target_os = "linux")]
    NetworkAdmin,
    RawSocket,
    #[cfg(target_os = "linux")]
    LockMemory,
    #[cfg(target_os = "linux")]
    ChangeRoot,
    TraceProcess,
    SystemAdmin,
    #[cfg(target_os = "linux")]
    RaiseSchedulingPriority,
    #[cfg(target_os = "linux")]
    OverrideResourceLimits,
    SetSystemTime,
    #[cfg(target_os = "linux")]
    MakeNode,
}

impl CapabilityId {
    /// Every identifier compiled for this platform, in declaration order.
    #[cfg(target_os = "linux")]
    pub const ALL: &'static [CapabilityId] = &[
        CapabilityId::ChangeOwnership,
        CapabilityId::OverrideAccessControl,
        CapabilityId::OverrideOwnership,
        CapabilityId::Kill,
        CapabilityId::SetGroupId,
        CapabilityId::SetUserId,
        CapabilityId::BindPrivilegedPort,
        CapabilityId::NetworkAdmin,
        CapabilityId::RawSocket,
        CapabilityId::LockMemory,
        CapabilityId::ChangeRoot,
        CapabilityId::TraceProcess,
        CapabilityId::SystemAdmin,
        CapabilityId::RaiseSchedulingPriority,
        CapabilityId::OverrideResourceLimits,
        CapabilityId::SetSystemTime,
        CapabilityId::MakeNode,
    ];

    /// Every identifier compiled for this platform, in declaration order.
    #[cfg(target_os = "fuchsia")]
    pub const ALL: &'static [CapabilityId] = &[
        CapabilityId::Kill,
        CapabilityId::RawSocket,
        CapabilityId::TraceProcess,
        CapabilityId::SystemAdmin,
        CapabilityId::SetSystemTime,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(target_os = "linux")]
            CapabilityId::ChangeOwnership => "change ownership",
            #[cfg(target_os = "linux")]
            CapabilityId::OverrideAccessControl => "override access control",
            #[cfg(target_os = "linux")]
            CapabilityId::OverrideOwnership => "override ownership",
            CapabilityId::Kill => "kill",
            #[cfg(target_os = "linux")]
            CapabilityId::SetGroupId => "set group id",
            #[cfg(target_os = "linux")]
            CapabilityId::SetUserId => "set user id",
            #[cfg(target_os = "linux")]
            CapabilityId::BindPrivilegedPort => "bind privileged port",
            #[cfg(target_os = "linux")]
            CapabilityId::NetworkAdmin => "network admin",
            CapabilityId::RawSocket => "raw socket",
            #[cfg(target_os = "linux")]
            CapabilityId::LockMemory => "lock memory",
            #[cfg(target_os = "linux")]
            CapabilityId::ChangeRoot => "change root",
            CapabilityId::TraceProcess => "trace process",
            CapabilityId::SystemAdmin => "system admin",
            #[cfg(target_os = "linux")]
            CapabilityId::RaiseSchedulingPriority => "raise scheduling priority",
            #[cfg(target_os = "linux")]
            CapabilityId::OverrideResourceLimits => "override resource limits",
            CapabilityId::SetSystemTime => "set system time",
            #[cfg(target_os = "linux")]
            CapabilityId::MakeNode => "make node",
        }
    }
}

impl Display for CapabilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_variant_in_order() {
        for (index, cap) in CapabilityId::ALL.iter().enumerate() {
            assert_eq!(*cap as usize, index, "{cap} is out of order");
        }
    }

    #[test]
    fn names_are_unique() {
        let names = CapabilityId::ALL
            .iter()
            .map(CapabilityId::name)
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(names.len(), CapabilityId::ALL.len());
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(CapabilityId::RawSocket.to_string(), "raw socket");
    }
}
