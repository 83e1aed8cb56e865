use crate::Core::error::QueueError;
use crate::MsgQueue::Structs::BlockingMode;
use crate::MsgQueue::{MessageQueue, QueueBuilder};
use libc::{c_char, c_int, size_t};
use std::ffi::CStr;
use std::ptr;

// Status codes
pub const RTMQ_OK: c_int = 0;
pub const RTMQ_QUEUE_FULL: c_int = -1;
pub const RTMQ_QUEUE_EMPTY: c_int = -2;
pub const RTMQ_SIZE_ERROR: c_int = -3;
pub const RTMQ_UNINITIALIZED: c_int = -4;
pub const RTMQ_CLOSED: c_int = -5;
pub const RTMQ_INVALID_ARG: c_int = -6;

/// Handle to a queue instance (opaque pointer)
pub struct QueueHandle {
    inner: MessageQueue,
}

fn status_of(err: &QueueError) -> c_int {
    match err {
        QueueError::Full => RTMQ_QUEUE_FULL,
        QueueError::Empty => RTMQ_QUEUE_EMPTY,
        QueueError::SizeError { .. } => RTMQ_SIZE_ERROR,
        QueueError::Uninitialized => RTMQ_UNINITIALIZED,
        QueueError::Closed => RTMQ_CLOSED,
        QueueError::AlreadyCreated
        | QueueError::InvalidConfig(_)
        | QueueError::BufferTooSmall { .. } => RTMQ_INVALID_ARG,
    }
}

// -----------------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------------

/// Create a new queue.
///
/// # Arguments
/// * `name` - NUL terminated queue name, or NULL for the default name.
/// * `depth` - Number of message slots.
/// * `message_size` - Maximum payload size in bytes.
///
/// # Returns
/// * Pointer to `QueueHandle`, or NULL on failure.
#[no_mangle]
pub extern "C" fn rtmq_queue_new(
    name: *const c_char,
    depth: size_t,
    message_size: size_t,
) -> *mut QueueHandle {
    let mut builder = QueueBuilder::new()
        .with_depth(depth)
        .with_message_size(message_size);

    if !name.is_null() {
        let name = unsafe { CStr::from_ptr(name) };
        builder = builder.with_name(name.to_string_lossy().into_owned());
    }

    match builder.build() {
        Ok(queue) => Box::into_raw(Box::new(QueueHandle { inner: queue })),
        Err(e) => {
            log::error!("FFI Error: Failed to build queue: {}", e);
            ptr::null_mut()
        }
    }
}

/// Free a queue handle.
///
/// No other thread may be using the handle when it is freed.
#[no_mangle]
pub extern "C" fn rtmq_queue_free(handle: *mut QueueHandle) {
    if !handle.is_null() {
        unsafe {
            drop(Box::from_raw(handle));
        }
    }
}

/// Close the queue and wake every blocked sender and receiver.
#[no_mangle]
pub extern "C" fn rtmq_close(handle: *const QueueHandle) -> c_int {
    if handle.is_null() {
        return RTMQ_UNINITIALIZED;
    }
    let queue = unsafe { &(*handle).inner };
    match queue.close() {
        Ok(()) => RTMQ_OK,
        Err(e) => status_of(&e),
    }
}

// -----------------------------------------------------------------------------
// Send / receive
// -----------------------------------------------------------------------------

/// Send a message.
///
/// # Arguments
/// * `handle` - Pointer to `QueueHandle`.
/// * `data` - Pointer to the payload (may be NULL when `len` is 0).
/// * `len` - Length of the payload.
/// * `priority` - Higher values are received first.
/// * `blocking` - If true, wait for a free slot.
///
/// # Returns
/// * `RTMQ_OK` on success, a negative status code otherwise.
#[no_mangle]
pub extern "C" fn rtmq_send(
    handle: *const QueueHandle,
    data: *const u8,
    len: size_t,
    priority: i32,
    blocking: bool,
) -> c_int {
    if handle.is_null() {
        return RTMQ_UNINITIALIZED;
    }
    if data.is_null() && len != 0 {
        return RTMQ_INVALID_ARG;
    }

    let queue = unsafe { &(*handle).inner };
    let payload: &[u8] = if len == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(data, len) }
    };

    match queue.send(payload, priority, BlockingMode::from(blocking)) {
        Ok(()) => RTMQ_OK,
        Err(e) => status_of(&e),
    }
}

/// Receive a message.
///
/// # Arguments
/// * `handle` - Pointer to `QueueHandle`.
/// * `buf` - Buffer the payload is copied into.
/// * `buf_len` - Size of `buf`.
/// * `out_len` - Receives the payload length.
/// * `out_priority` - Receives the message priority (may be NULL).
/// * `blocking` - If true, wait for a message.
///
/// # Returns
/// * `RTMQ_OK` on success.
/// * `RTMQ_QUEUE_EMPTY` if non-blocking and empty.
/// * `RTMQ_INVALID_ARG` if `buf` cannot hold the next message; the message
///   stays queued and `out_len` receives the size needed.
#[no_mangle]
pub extern "C" fn rtmq_receive(
    handle: *const QueueHandle,
    buf: *mut u8,
    buf_len: size_t,
    out_len: *mut size_t,
    out_priority: *mut i32,
    blocking: bool,
) -> c_int {
    if handle.is_null() {
        return RTMQ_UNINITIALIZED;
    }
    if out_len.is_null() || (buf.is_null() && buf_len != 0) {
        return RTMQ_INVALID_ARG;
    }

    let queue = unsafe { &(*handle).inner };
    let out: &mut [u8] = if buf_len == 0 {
        &mut []
    } else {
        unsafe { std::slice::from_raw_parts_mut(buf, buf_len) }
    };

    match queue.receive_into(out, BlockingMode::from(blocking)) {
        Ok(meta) => {
            unsafe {
                *out_len = meta.payload_len;
                if !out_priority.is_null() {
                    *out_priority = meta.priority;
                }
            }
            RTMQ_OK
        }
        Err(QueueError::BufferTooSmall { len, .. }) => {
            unsafe { *out_len = len };
            RTMQ_INVALID_ARG
        }
        Err(e) => status_of(&e),
    }
}

// -----------------------------------------------------------------------------
// Telemetry
// -----------------------------------------------------------------------------

/// Messages currently queued (0 for a NULL handle).
#[no_mangle]
pub extern "C" fn rtmq_occupancy(handle: *const QueueHandle) -> size_t {
    if handle.is_null() {
        return 0;
    }
    unsafe { (*handle).inner.occupancy() }
}

/// Number of message slots (0 for a NULL handle).
#[no_mangle]
pub extern "C" fn rtmq_capacity(handle: *const QueueHandle) -> size_t {
    if handle.is_null() {
        return 0;
    }
    unsafe { (*handle).inner.capacity() }
}
