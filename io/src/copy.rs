//! Bulk append with a non-temporal fast path.
//!
//! Payloads at or above [`NON_TEMPORAL_THRESHOLD`] are copied with
//! streaming stores on x86_64, bypassing the cache; anything smaller goes
//! through `extend_from_slice` and stays hot. The two paths produce
//! identical bytes.

/// Payload size at which the streaming-store path takes over.
pub const NON_TEMPORAL_THRESHOLD: usize = 64 * 1024;

/// Append `src` to `buf`.
#[inline]
pub fn append_bytes(buf: &mut Vec<u8>, src: &[u8]) {
    #[cfg(target_arch = "x86_64")]
    if src.len() >= NON_TEMPORAL_THRESHOLD {
        // SAFETY: the helper reserves capacity before writing and sets the
        // length only over initialized bytes.
        unsafe { append_non_temporal(buf, src) };
        return;
    }
    buf.extend_from_slice(src);
}

/// Streaming-store copy into the reserved tail of `buf`.
///
/// SSE2 is part of the x86_64 baseline, so no runtime dispatch is needed.
#[cfg(target_arch = "x86_64")]
unsafe fn append_non_temporal(buf: &mut Vec<u8>, src: &[u8]) {
    use std::arch::x86_64::{_mm_loadu_si128, _mm_sfence, _mm_stream_si128, __m128i};

    let old_len = buf.len();
    buf.reserve(src.len());

    let mut dst = buf.as_mut_ptr().add(old_len);
    let mut src_ptr = src.as_ptr();
    let mut len = src.len();

    // Head copy up to a 16-byte destination boundary; streaming stores
    // require an aligned destination.
    let head = dst.align_offset(16).min(len);
    std::ptr::copy_nonoverlapping(src_ptr, dst, head);
    dst = dst.add(head);
    src_ptr = src_ptr.add(head);
    len -= head;

    while len >= 64 {
        let a = _mm_loadu_si128(src_ptr as *const __m128i);
        let b = _mm_loadu_si128(src_ptr.add(16) as *const __m128i);
        let c = _mm_loadu_si128(src_ptr.add(32) as *const __m128i);
        let d = _mm_loadu_si128(src_ptr.add(48) as *const __m128i);
        _mm_stream_si128(dst as *mut __m128i, a);
        _mm_stream_si128(dst.add(16) as *mut __m128i, b);
        _mm_stream_si128(dst.add(32) as *mut __m128i, c);
        _mm_stream_si128(dst.add(48) as *mut __m128i, d);
        src_ptr = src_ptr.add(64);
        dst = dst.add(64);
        len -= 64;
    }
    _mm_sfence();

    std::ptr::copy_nonoverlapping(src_ptr, dst, len);
    buf.set_len(old_len + src.len());
}
