//! Windows-format metafiles, kept for reading and writing old `.wmf` pictures.

#![allow(deprecated)]

use crate::{DeviceContext, WStr};
use crate::error::{non_null, non_zero, log_drop_failure};
use std::io;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{null, NonNull};
use winapi::shared::minwindef::HMETAFILE__;
use winapi::um::wingdi::{CloseMetaFile, CreateMetaFileW, DeleteMetaFile};

/// A device context recording into a Windows-format metafile.
#[deprecated(note = "Windows-format metafiles exist for compatibility only; use EnhMetafileRecorder")]
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct MetafileRecorder(DeviceContext);

impl MetafileRecorder {
    /// Forwards to `CreateMetaFileW`. A `file_name` of `None` records into memory.
    pub fn new(file_name: Option<WStr>) -> io::Result<MetafileRecorder> {
        let h_dc = non_null("CreateMetaFileW", || unsafe { CreateMetaFileW(file_name.map_or(null(), |s| s.as_ptr())) })?;
        log::trace!("CreateMetaFileW({}) -> {:?}", file_name.map_or_else(String::new, |s| s.to_string()), h_dc);
        Ok(MetafileRecorder(unsafe { DeviceContext::from_h_dc(h_dc) }))
    }

    /// Forwards to `CloseMetaFile`.
    pub fn close(self) -> io::Result<Metafile> {
        let h_dc = self.0.as_h_dc();
        mem::forget(self);
        let h = non_null("CloseMetaFile", || unsafe { CloseMetaFile(h_dc.as_ptr()) })?;
        log::trace!("CloseMetaFile({:?}) -> {:?}", h_dc, h);
        Ok(Metafile(h))
    }
}

impl Deref for MetafileRecorder {
    type Target = DeviceContext;

    fn deref(&self) -> &DeviceContext { &self.0 }
}

impl DerefMut for MetafileRecorder {
    fn deref_mut(&mut self) -> &mut DeviceContext { &mut self.0 }
}

impl Drop for MetafileRecorder {
    fn drop(&mut self) {
        let h_dc = self.0.as_h_dc();
        let res = non_null("CloseMetaFile", || unsafe { CloseMetaFile(h_dc.as_ptr()) })
            .and_then(|h| unsafe { delete_metafile(h) });
        log_drop_failure(res, "metafile recorder");
    }
}

/// Forwards to `DeleteMetaFile`.
///
/// # Safety
///
/// `h_metafile` must be a valid Windows-format metafile handle not used afterwards.
#[deprecated(note = "Windows-format metafiles exist for compatibility only; use delete_enh_metafile")]
pub unsafe fn delete_metafile(h_metafile: NonNull<HMETAFILE__>) -> io::Result<()> {
    non_zero("DeleteMetaFile", || DeleteMetaFile(h_metafile.as_ptr()))?;
    log::trace!("DeleteMetaFile({:?})", h_metafile);
    Ok(())
}

#[deprecated(note = "Windows-format metafiles exist for compatibility only; use EnhMetafile")]
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Metafile(NonNull<HMETAFILE__>);

impl Metafile {
    pub fn as_h_metafile(&self) -> NonNull<HMETAFILE__> { self.0 }

    pub fn delete(self) -> io::Result<()> {
        let h = self.0;
        mem::forget(self);
        unsafe { delete_metafile(h) }
    }
}

impl Drop for Metafile {
    fn drop(&mut self) {
        log_drop_failure(unsafe { delete_metafile(self.0) }, "metafile");
    }
}
