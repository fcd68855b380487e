use getset::CopyGetters;
use nix::errno::Errno;

use super::CapgetError;

pub(super) const LINUX_CAPABILITY_VERSION_3: u32 = 0x2008_0522;
const LINUX_CAPABILITY_U32S_3: usize = 2;

#[repr(C)]
struct CapUserHeader {
    version: u32,
    pid: libc::c_int,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CapUserData {
    pub(crate) effective: u32,
    pub(crate) permitted: u32,
    pub(crate) inheritable: u32,
}

/// Capability sets of a thread, each decoded into one 64 bit mask indexed by
/// `CAP_*` number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct CapabilitySets {
    effective: u64,
    permitted: u64,
    inheritable: u64,
}

impl CapabilitySets {
    /// Reads the sets of the calling thread.
    pub fn current() -> Result<Self, CapgetError> {
        let mut header = CapUserHeader {
            version: LINUX_CAPABILITY_VERSION_3,
            pid: 0,
        };
        let mut data = [CapUserData::default(); LINUX_CAPABILITY_U32S_3];
        let res = unsafe {
            libc::syscall(
                libc::SYS_capget,
                &mut header as *mut CapUserHeader,
                data.as_mut_ptr(),
            )
        };
        if res == -1 {
            return Err(CapgetError::from_errno(Errno::last(), header.version));
        }
        Ok(Self::from_raw(&data))
    }

    pub(crate) fn from_raw(data: &[CapUserData; LINUX_CAPABILITY_U32S_3]) -> Self {
        let [low, high] = data;
        let join = |lo: u32, hi: u32| u64::from(lo) | (u64::from(hi) << 32);
        Self {
            effective: join(low.effective, high.effective),
            permitted: join(low.permitted, high.permitted),
            inheritable: join(low.inheritable, high.inheritable),
        }
    }

    pub fn is_effective(&self, bit: u8) -> Result<bool, CapgetError> {
        let mask = 1u64
            .checked_shl(u32::from(bit))
            .ok_or(CapgetError::BitOutOfRange(bit))?;
        Ok(self.effective & mask != 0)
    }
}
