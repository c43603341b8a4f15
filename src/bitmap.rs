use std::os::raw::c_int;
#[cfg(windows)]
use crate::DeviceContext;
#[cfg(windows)]
use crate::error::{non_null, log_drop_failure};
#[cfg(windows)]
use crate::object::{delete_object, GdiObject};
#[cfg(windows)]
use std::io;
#[cfg(windows)]
use std::mem;
#[cfg(windows)]
use std::ptr::{null, NonNull};
#[cfg(windows)]
use winapi::ctypes::c_void;
#[cfg(windows)]
use winapi::shared::windef::HBITMAP__;
#[cfg(windows)]
use winapi::um::wingdi::{CreateBitmap, CreateCompatibleBitmap};

/// Bytes `CreateBitmap` reads from its bits buffer.
///
/// GDI first merges `planes * bits_per_pixel` into a single plane and rounds
/// it up to 1, 4, 8, 16, 24 or 32 bits; each scan line is then padded to a
/// whole number of 16-bit words.
///
/// `None` for negative dimensions, more than 32 bits per pixel in total, or
/// when the size overflows.
pub fn bitmap_bits_len(width: c_int, height: c_int, planes: u32, bits_per_pixel: u32) -> Option<usize> {
    if width < 0 || height < 0 { return None; }
    let pixel_bits: u64 = match planes.checked_mul(bits_per_pixel)? {
        1 => 1,
        0 ..= 4 => 4,
        5 ..= 8 => 8,
        9 ..= 16 => 16,
        17 ..= 24 => 24,
        25 ..= 32 => 32,
        _ => return None,
    };
    let line_bits = (width as u64).checked_mul(pixel_bits)?;
    let stride = line_bits.checked_add(15)? / 16 * 2;
    let len = stride.checked_mul(height as u64)?;
    if len > usize::MAX as u64 { None } else { Some(len as usize) }
}

#[cfg(windows)]
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Bitmap(NonNull<HBITMAP__>);

#[cfg(windows)]
impl Bitmap {
    /// Forwards to `CreateBitmap`.
    ///
    /// `bits`, when given, must cover [`bitmap_bits_len`] bytes; the native
    /// call would read past a shorter buffer.
    pub fn new(width: c_int, height: c_int, planes: u32, bits_per_pixel: u32, bits: Option<&[u8]>) -> io::Result<Bitmap> {
        if let Some(bits) = bits {
            let required = bitmap_bits_len(width, height, planes, bits_per_pixel).ok_or_else(|| io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bitmap size {}x{}x{}x{}", width, height, planes, bits_per_pixel)
            ))?;
            if bits.len() < required {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("bitmap bits hold {} bytes, {} required", bits.len(), required)
                ));
            }
        }
        let bits = bits.map_or(null(), |bits| bits.as_ptr()) as *const c_void;
        let h = non_null("CreateBitmap", || unsafe { CreateBitmap(width, height, planes, bits_per_pixel, bits) })?;
        log::trace!("CreateBitmap({}, {}, {}, {}) -> {:?}", width, height, planes, bits_per_pixel, h);
        Ok(Bitmap(h))
    }

    pub fn compatible(dc: &DeviceContext, width: c_int, height: c_int) -> io::Result<Bitmap> {
        let h = non_null("CreateCompatibleBitmap", || unsafe {
            CreateCompatibleBitmap(dc.as_h_dc().as_ptr(), width, height)
        })?;
        log::trace!("CreateCompatibleBitmap({:?}, {}, {}) -> {:?}", dc.as_h_dc(), width, height, h);
        Ok(Bitmap(h))
    }

    pub fn as_h_bitmap(&self) -> NonNull<HBITMAP__> { self.0 }

    pub fn into_raw(self) -> NonNull<HBITMAP__> {
        let h = self.0;
        mem::forget(self);
        h
    }

    /// # Safety
    ///
    /// `h_bitmap` must be a valid bitmap handle exclusively owned by the caller.
    pub unsafe fn from_raw(h_bitmap: NonNull<HBITMAP__>) -> Bitmap { Bitmap(h_bitmap) }
}

#[cfg(windows)]
impl Drop for Bitmap {
    fn drop(&mut self) {
        log_drop_failure(unsafe { delete_object(self.as_h_gdi_obj()) }, "bitmap");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monochrome_lines_pad_to_words() {
        assert_eq!(bitmap_bits_len(1, 1, 1, 1), Some(2));
        assert_eq!(bitmap_bits_len(16, 3, 1, 1), Some(6));
        assert_eq!(bitmap_bits_len(17, 3, 1, 1), Some(12));
    }

    #[test]
    fn color_depths() {
        assert_eq!(bitmap_bits_len(3, 2, 1, 24), Some(20));
        assert_eq!(bitmap_bits_len(8, 8, 1, 32), Some(256));
    }

    #[test]
    fn odd_depths_round_up_like_gdi() {
        assert_eq!(bitmap_bits_len(8, 1, 1, 2), Some(4));
        assert_eq!(bitmap_bits_len(8, 1, 1, 3), Some(4));
        assert_eq!(bitmap_bits_len(8, 1, 1, 12), Some(16));
        assert_eq!(bitmap_bits_len(8, 1, 1, 20), Some(24));
        assert_eq!(bitmap_bits_len(1, 1, 1, 0), Some(2));
    }

    #[test]
    fn planes_merge_before_rounding() {
        assert_eq!(bitmap_bits_len(8, 8, 4, 1), Some(32));
        assert_eq!(bitmap_bits_len(8, 1, 2, 4), Some(8));
        assert_eq!(bitmap_bits_len(8, 1, 3, 1), Some(4));
        assert_eq!(bitmap_bits_len(8, 1, 2, 16), Some(32));
    }

    #[test]
    fn depths_beyond_32_bits_are_rejected() {
        assert_eq!(bitmap_bits_len(8, 1, 1, 33), None);
        assert_eq!(bitmap_bits_len(8, 1, 4, 16), None);
        assert_eq!(bitmap_bits_len(8, 1, u32::MAX, 2), None);
    }

    #[test]
    fn empty_and_invalid_sizes() {
        assert_eq!(bitmap_bits_len(0, 10, 1, 32), Some(0));
        assert_eq!(bitmap_bits_len(-1, 10, 1, 32), None);
        assert_eq!(bitmap_bits_len(10, -1, 1, 32), None);
    }
}
