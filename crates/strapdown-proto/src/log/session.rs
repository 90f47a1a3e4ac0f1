//! Session information pages.
//!
//! The device describes the running session (serial number, firmware,
//! configuration digest) as one UTF-8 blob, delivered in numbered pages
//! because it does not fit a single payload. This module only codes the
//! page; reassembly lives in the client crate.

use bytes::Bytes;

use crate::{
    error::{ErrorCode, Result},
    stream::{StreamReader, StreamWriter},
};

/// One page of the session information blob.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionInfoPage {
    /// Zero-based index of this page.
    pub page_index: u16,
    /// Total number of pages in the blob.
    pub nr_pages: u16,
    /// Fragment carried by this page.
    pub data: Bytes,
}

impl SessionInfoPage {
    pub(crate) fn read(r: &mut StreamReader<'_>, payload: &Bytes) -> Result<Self> {
        let page_index = r.read_u16_le();
        let nr_pages = r.read_u16_le();
        let size = usize::from(r.read_u16_le());
        if size > r.space() {
            return Err(ErrorCode::BufferOverflow);
        }
        let start = r.cursor();
        let data = payload.slice(start..start + size);
        r.skip(size);
        r.finish()?;
        if page_index >= nr_pages {
            return Err(ErrorCode::InvalidFrame);
        }
        Ok(Self { page_index, nr_pages, data })
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u16_le(self.page_index);
        w.write_u16_le(self.nr_pages);
        w.write_u16_le(self.data.len() as u16);
        w.write_bytes(&self.data);
    }
}
