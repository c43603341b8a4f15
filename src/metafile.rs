use crate::{Rect, WStr, WString};
use std::io;
#[cfg(windows)]
use crate::DeviceContext;
#[cfg(windows)]
use crate::error::{non_null, non_zero, log_drop_failure};
#[cfg(windows)]
use std::mem::{self, MaybeUninit};
#[cfg(windows)]
use std::ops::{Deref, DerefMut};
#[cfg(windows)]
use std::ptr::{null, null_mut, NonNull};
#[cfg(windows)]
use winapi::shared::windef::{HENHMETAFILE__, RECT};
#[cfg(windows)]
use winapi::um::wingdi::{CloseEnhMetaFile, CreateEnhMetaFileW, DeleteEnhMetaFile, GetEnhMetaFileHeader, ENHMETAHEADER};

/// The `application\0picture\0\0` description stored in an enhanced metafile
/// header. GDI reads both strings, so only [`enh_metafile_description`] builds one.
#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct EnhMetafileDescription(WString);

impl EnhMetafileDescription {
    /// The application name; the picture name follows its terminator.
    pub fn as_w_str(&self) -> WStr<'_> { self.0.as_w_str() }

    /// Code units up to and including the picture name's terminator.
    pub fn as_units(&self) -> &[u16] { self.0.as_units() }
}

/// Fails on a nul character in either part.
pub fn enh_metafile_description(application: &str, picture: &str) -> io::Result<EnhMetafileDescription> {
    let mut units = Vec::with_capacity(application.len() + picture.len() + 3);
    for part in &[application, picture] {
        let start = units.len();
        units.extend(part.encode_utf16());
        if units[start ..].contains(&0) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "nul character in metafile description"));
        }
        units.push(0);
    }
    units.push(0);
    Ok(EnhMetafileDescription(WString(units)))
}

/// A device context recording into an enhanced metafile.
#[cfg(windows)]
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct EnhMetafileRecorder(DeviceContext);

#[cfg(windows)]
impl EnhMetafileRecorder {
    /// Forwards to `CreateEnhMetaFileW`.
    ///
    /// `frame` is in .01 mm units; `None` lets GDI fit the frame to the drawing.
    /// A `file_name` of `None` records into memory.
    pub fn new(reference: Option<&DeviceContext>, file_name: Option<WStr>, frame: Option<Rect>, description: Option<&EnhMetafileDescription>) -> io::Result<EnhMetafileRecorder> {
        let reference = reference.map_or(null_mut(), |dc| dc.as_h_dc().as_ptr());
        let frame = frame.map(RECT::from);
        let frame_ptr = frame.as_ref().map_or(null(), |r| r as *const RECT);
        let h_dc = non_null("CreateEnhMetaFileW", || unsafe { CreateEnhMetaFileW(
            reference,
            file_name.map_or(null(), |s| s.as_ptr()),
            frame_ptr,
            description.map_or(null(), |d| d.as_w_str().as_ptr())
        ) })?;
        log::trace!("CreateEnhMetaFileW({}) -> {:?}", file_name.map_or_else(String::new, |s| s.to_string()), h_dc);
        Ok(EnhMetafileRecorder(unsafe { DeviceContext::from_h_dc(h_dc) }))
    }

    /// Forwards to `CloseEnhMetaFile`, which also deletes the recording device context.
    pub fn close(self) -> io::Result<EnhMetafile> {
        let h_dc = self.0.as_h_dc();
        mem::forget(self);
        let h = non_null("CloseEnhMetaFile", || unsafe { CloseEnhMetaFile(h_dc.as_ptr()) })?;
        log::trace!("CloseEnhMetaFile({:?}) -> {:?}", h_dc, h);
        Ok(EnhMetafile(h))
    }
}

#[cfg(windows)]
impl Deref for EnhMetafileRecorder {
    type Target = DeviceContext;

    fn deref(&self) -> &DeviceContext { &self.0 }
}

#[cfg(windows)]
impl DerefMut for EnhMetafileRecorder {
    fn deref_mut(&mut self) -> &mut DeviceContext { &mut self.0 }
}

#[cfg(windows)]
impl Drop for EnhMetafileRecorder {
    fn drop(&mut self) {
        let h_dc = self.0.as_h_dc();
        let res = non_null("CloseEnhMetaFile", || unsafe { CloseEnhMetaFile(h_dc.as_ptr()) })
            .and_then(|h| unsafe { delete_enh_metafile(h) });
        log_drop_failure(res, "enhanced metafile recorder");
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct EnhMetafileHeader {
    /// Bounds of the picture in device units.
    pub bounds: Rect,
    /// Picture frame in .01 mm units.
    pub frame: Rect,
    pub bytes: u32,
    pub records: u32,
    pub handles: u16,
    pub palette_entries: u32,
}

/// Forwards to `DeleteEnhMetaFile`.
///
/// # Safety
///
/// `h_enh_metafile` must be a valid enhanced metafile handle not used afterwards.
#[cfg(windows)]
pub unsafe fn delete_enh_metafile(h_enh_metafile: NonNull<HENHMETAFILE__>) -> io::Result<()> {
    non_zero("DeleteEnhMetaFile", || DeleteEnhMetaFile(h_enh_metafile.as_ptr()))?;
    log::trace!("DeleteEnhMetaFile({:?})", h_enh_metafile);
    Ok(())
}

#[cfg(windows)]
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct EnhMetafile(NonNull<HENHMETAFILE__>);

#[cfg(windows)]
impl EnhMetafile {
    pub fn as_h_enh_metafile(&self) -> NonNull<HENHMETAFILE__> { self.0 }

    pub fn header(&self) -> io::Result<EnhMetafileHeader> {
        let mut header = MaybeUninit::<ENHMETAHEADER>::zeroed();
        non_zero("GetEnhMetaFileHeader", || unsafe {
            GetEnhMetaFileHeader(self.0.as_ptr(), mem::size_of::<ENHMETAHEADER>() as u32, header.as_mut_ptr())
        })?;
        let header = unsafe { header.assume_init() };
        Ok(EnhMetafileHeader {
            bounds: Rect::new(header.rclBounds.left, header.rclBounds.top, header.rclBounds.right, header.rclBounds.bottom),
            frame: Rect::new(header.rclFrame.left, header.rclFrame.top, header.rclFrame.right, header.rclFrame.bottom),
            bytes: header.nBytes,
            records: header.nRecords,
            handles: header.nHandles,
            palette_entries: header.nPalEntries,
        })
    }

    pub fn delete(self) -> io::Result<()> {
        let h = self.into_raw();
        unsafe { delete_enh_metafile(h) }
    }

    pub fn into_raw(self) -> NonNull<HENHMETAFILE__> {
        let h = self.0;
        mem::forget(self);
        h
    }

    /// # Safety
    ///
    /// `h_enh_metafile` must be a valid enhanced metafile handle exclusively owned by the caller.
    pub unsafe fn from_raw(h_enh_metafile: NonNull<HENHMETAFILE__>) -> EnhMetafile { EnhMetafile(h_enh_metafile) }
}

#[cfg(windows)]
impl Drop for EnhMetafile {
    fn drop(&mut self) {
        log_drop_failure(unsafe { delete_enh_metafile(self.0) }, "enhanced metafile");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_is_double_nul_terminated() {
        let description = enh_metafile_description("Paint", "Logo").unwrap();
        let expected: Vec<u16> = "Paint\0Logo\0".encode_utf16().collect();
        assert_eq!(description.as_units(), &expected[..]);
        assert_eq!(description.as_w_str().to_string(), "Paint");
    }

    #[test]
    fn empty_description_parts() {
        let description = enh_metafile_description("", "").unwrap();
        assert_eq!(description.as_units(), &[0, 0]);
    }

    #[test]
    fn description_parts_reject_nul() {
        let err = enh_metafile_description("Pa\0int", "Logo").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(enh_metafile_description("Paint", "\0").is_err());
    }

    #[test]
    fn picture_name_follows_application_terminator() {
        let description = enh_metafile_description("tiny-gdi", "frame").unwrap();
        let ptr = description.as_w_str().as_ptr();
        let units = unsafe { std::slice::from_raw_parts(ptr, description.as_units().len() + 1) };
        assert_eq!(units[8], 0);
        assert_eq!(String::from_utf16_lossy(&units[9 .. 14]), "frame");
        assert_eq!(&units[14 ..], &[0, 0]);
    }
}
