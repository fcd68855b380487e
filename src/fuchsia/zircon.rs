#![allow(non_camel_case_types)]

pub type zx_handle_t = u32;
pub type zx_status_t = i32;
pub type zx_rights_t = u32;
pub type zx_obj_type_t = u32;
pub type zx_koid_t = u64;
pub type zx_object_info_topic_t = u32;

pub const ZX_HANDLE_INVALID: zx_handle_t = 0;

pub const ZX_OK: zx_status_t = 0;
pub const ZX_ERR_ACCESS_DENIED: zx_status_t = -30;

pub const ZX_INFO_HANDLE_BASIC: zx_object_info_topic_t = 2;

pub const ZX_OBJ_TYPE_JOB: zx_obj_type_t = 17;
pub const ZX_OBJ_TYPE_CLOCK: zx_obj_type_t = 30;

pub const ZX_RIGHT_WRITE: zx_rights_t = 1 << 3;
pub const ZX_RIGHT_ENUMERATE: zx_rights_t = 1 << 8;
pub const ZX_RIGHT_DESTROY: zx_rights_t = 1 << 9;
pub const ZX_RIGHT_SET_POLICY: zx_rights_t = 1 << 10;
pub const ZX_RIGHT_INSPECT: zx_rights_t = 1 << 15;
pub const ZX_RIGHT_MANAGE_JOB: zx_rights_t = 1 << 16;

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct zx_info_handle_basic_t {
    pub koid: zx_koid_t,
    pub rights: zx_rights_t,
    pub type_: zx_obj_type_t,
    pub related_koid: zx_koid_t,
    pub reserved: u32,
    pub padding1: [u8; 4],
}

#[link(name = "zircon")]
extern "C" {
    pub fn zx_object_get_info(
        handle: zx_handle_t,
        topic: zx_object_info_topic_t,
        buffer: *mut libc::c_void,
        buffer_size: usize,
        actual: *mut usize,
        avail: *mut usize,
    ) -> zx_status_t;
}

// Provided by the process runtime, not the vDSO.
extern "C" {
    pub fn zx_job_default() -> zx_handle_t;
    pub fn zx_utc_reference_get() -> zx_handle_t;
}
