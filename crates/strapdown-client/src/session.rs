//! Session information reassembly.
//!
//! The device splits its session descriptor (one UTF-8 blob) over numbered
//! pages delivered in order from page 0. This context accumulates the pages
//! and exposes the blob once the last page has landed.
//!
//! # State machine
//!
//! ```text
//!             page 0                    page == expected
//! ┌───────┐ ─────────> ┌────────────┐ ──────────────────┐
//! │ Empty │            │ Assembling │ <─────────────────┘
//! └───────┘ <───────── └────────────┘ ─────> ┌──────────┐
//!    ^   unexpected page │                   │ Complete │
//!    │                   │ overflow          └──────────┘
//!    └───────────────────┘      (next page 0 restarts)
//! ```

use tracing::warn;

use strapdown_proto::ErrorCode;

/// Fixed capacity of the session blob, trailing null slot included.
pub const SESSION_INFO_CAPACITY: usize = 2048;

/// Progress reported by [`SessionInfoCtx::process`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionProgress {
    /// More pages are needed.
    Pending,
    /// The blob is complete and readable.
    Complete,
}

/// Reassembly context for the paged session descriptor.
///
/// Owned by one consumer; not safe under concurrent mutation.
#[derive(Debug)]
pub struct SessionInfoCtx {
    buffer: [u8; SESSION_INFO_CAPACITY],
    length: usize,
    page_index: u16,
    nr_pages: u16,
}

impl Default for SessionInfoCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionInfoCtx {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self { buffer: [0; SESSION_INFO_CAPACITY], length: 0, page_index: 0, nr_pages: 0 }
    }

    /// Feed one page.
    ///
    /// Pages must arrive in order starting at 0; an out-of-order page resets
    /// the context (with a warning, unless it is a page 0 restarting after a
    /// completed blob) and the page itself is dropped unless it restarts the
    /// sequence. Appending past the capacity returns
    /// [`ErrorCode::BufferOverflow`] and resets.
    pub fn process(
        &mut self,
        page_index: u16,
        nr_pages: u16,
        data: &[u8],
    ) -> Result<SessionProgress, ErrorCode> {
        if page_index >= nr_pages {
            return Err(ErrorCode::InvalidParameter);
        }

        if self.page_index != page_index {
            if page_index != 0 || self.page_index != self.nr_pages {
                warn!(
                    expected = self.page_index,
                    received = page_index,
                    "unexpected session info page, context reset"
                );
            }
            self.reset();
        }

        if page_index == 0 {
            self.nr_pages = nr_pages;
        }

        if self.page_index != page_index {
            // A reset context only accepts page 0; this one was not it.
            return Ok(SessionProgress::Pending);
        }

        let new_length = self.length + data.len();
        // One slot stays free for the trailing null byte.
        if new_length >= SESSION_INFO_CAPACITY {
            warn!(new_length, "session info too large, context reset");
            self.reset();
            return Err(ErrorCode::BufferOverflow);
        }

        self.buffer[self.length..new_length].copy_from_slice(data);
        self.buffer[new_length] = 0;
        self.length = new_length;
        self.page_index += 1;

        if self.page_index == self.nr_pages {
            Ok(SessionProgress::Complete)
        } else {
            Ok(SessionProgress::Pending)
        }
    }

    /// The completed blob, `None` while assembling or if the bytes are not
    /// valid UTF-8.
    #[must_use]
    pub fn string(&self) -> Option<&str> {
        if self.nr_pages != 0 && self.page_index == self.nr_pages {
            core::str::from_utf8(&self.buffer[..self.length]).ok()
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.buffer[0] = 0;
        self.length = 0;
        self.page_index = 0;
        self.nr_pages = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_in_order_complete_the_blob() {
        let mut ctx = SessionInfoCtx::new();
        assert_eq!(ctx.process(0, 2, b"hello "), Ok(SessionProgress::Pending));
        assert_eq!(ctx.string(), None);
        assert_eq!(ctx.process(1, 2, b"world"), Ok(SessionProgress::Complete));
        assert_eq!(ctx.string(), Some("hello world"));
    }

    #[test]
    fn three_pages() {
        let mut ctx = SessionInfoCtx::new();
        assert_eq!(ctx.process(0, 3, b"ab"), Ok(SessionProgress::Pending));
        assert_eq!(ctx.process(1, 3, b"cd"), Ok(SessionProgress::Pending));
        assert_eq!(ctx.process(2, 3, b"ef"), Ok(SessionProgress::Complete));
        assert_eq!(ctx.string(), Some("abcdef"));
    }

    #[test]
    fn out_of_order_page_resets_then_restart_succeeds() {
        let mut ctx = SessionInfoCtx::new();
        assert_eq!(ctx.process(0, 3, b"ab"), Ok(SessionProgress::Pending));
        // Page 2 while expecting 1: reset, page dropped.
        assert_eq!(ctx.process(2, 3, b"ef"), Ok(SessionProgress::Pending));
        assert_eq!(ctx.string(), None);
        // Restart from page 0 works.
        assert_eq!(ctx.process(0, 3, b"ab"), Ok(SessionProgress::Pending));
        assert_eq!(ctx.process(1, 3, b"cd"), Ok(SessionProgress::Pending));
        assert_eq!(ctx.process(2, 3, b"ef"), Ok(SessionProgress::Complete));
        assert_eq!(ctx.string(), Some("abcdef"));
    }

    #[test]
    fn page_zero_after_completion_restarts_silently() {
        let mut ctx = SessionInfoCtx::new();
        assert_eq!(ctx.process(0, 1, b"first"), Ok(SessionProgress::Complete));
        assert_eq!(ctx.string(), Some("first"));
        assert_eq!(ctx.process(0, 1, b"second"), Ok(SessionProgress::Complete));
        assert_eq!(ctx.string(), Some("second"));
    }

    #[test]
    fn blob_is_immutable_until_next_restart() {
        let mut ctx = SessionInfoCtx::new();
        assert_eq!(ctx.process(0, 1, b"stable"), Ok(SessionProgress::Complete));
        // A mid-sequence page after completion invalidates the blob until
        // the next page 0.
        assert_eq!(ctx.process(1, 2, b"junk"), Ok(SessionProgress::Pending));
        assert_eq!(ctx.string(), None);
        assert_eq!(ctx.process(0, 1, b"fresh"), Ok(SessionProgress::Complete));
        assert_eq!(ctx.string(), Some("fresh"));
    }

    #[test]
    fn capacity_overflow_resets() {
        let mut ctx = SessionInfoCtx::new();
        let big = vec![b'x'; SESSION_INFO_CAPACITY - 1];
        // Fills everything but the null slot: still fine.
        assert_eq!(ctx.process(0, 2, &big), Ok(SessionProgress::Pending));
        // One more byte would evict the null slot.
        assert_eq!(ctx.process(1, 2, b"y"), Err(ErrorCode::BufferOverflow));
        assert_eq!(ctx.string(), None);
        // The context is usable again.
        assert_eq!(ctx.process(0, 1, b"ok"), Ok(SessionProgress::Complete));
        assert_eq!(ctx.string(), Some("ok"));
    }

    #[test]
    fn page_index_must_stay_below_count() {
        let mut ctx = SessionInfoCtx::new();
        assert_eq!(ctx.process(3, 3, b"x"), Err(ErrorCode::InvalidParameter));
        assert_eq!(ctx.process(0, 0, b"x"), Err(ErrorCode::InvalidParameter));
    }
}
