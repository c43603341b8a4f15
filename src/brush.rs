use enum_primitive_derive::Primitive;
#[cfg(windows)]
use crate::{Bitmap, Rgb};
#[cfg(windows)]
use crate::error::{non_null, log_drop_failure};
#[cfg(windows)]
use crate::object::{delete_object, GdiObject};
#[cfg(windows)]
use std::io;
#[cfg(windows)]
use std::mem;
#[cfg(windows)]
use std::os::raw::c_int;
#[cfg(windows)]
use std::ptr::NonNull;
#[cfg(windows)]
use winapi::shared::windef::HBRUSH__;
#[cfg(windows)]
use winapi::um::wingdi::{CreateHatchBrush, CreatePatternBrush, CreateSolidBrush};

#[derive(Primitive)]
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone)]
#[derive(Debug)]
#[repr(i32)]
pub enum HatchStyle {
    Horizontal = 0,
    Vertical = 1,
    ForwardDiagonal = 2,
    BackwardDiagonal = 3,
    Cross = 4,
    DiagonalCross = 5,
}

#[cfg(windows)]
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Brush(NonNull<HBRUSH__>);

#[cfg(windows)]
impl Brush {
    pub fn solid(color: Rgb) -> io::Result<Brush> {
        let h = non_null("CreateSolidBrush", || unsafe { CreateSolidBrush(color.to_colorref()) })?;
        log::trace!("CreateSolidBrush({:?}) -> {:?}", color, h);
        Ok(Brush(h))
    }

    pub fn hatch(style: HatchStyle, color: Rgb) -> io::Result<Brush> {
        let h = non_null("CreateHatchBrush", || unsafe { CreateHatchBrush(style as c_int, color.to_colorref()) })?;
        log::trace!("CreateHatchBrush({:?}, {:?}) -> {:?}", style, color, h);
        Ok(Brush(h))
    }

    /// The brush keeps its own copy of the pattern, so `bitmap` may be dropped afterwards.
    pub fn pattern(bitmap: &Bitmap) -> io::Result<Brush> {
        let h = non_null("CreatePatternBrush", || unsafe { CreatePatternBrush(bitmap.as_h_bitmap().as_ptr()) })?;
        log::trace!("CreatePatternBrush({:?}) -> {:?}", bitmap.as_h_bitmap(), h);
        Ok(Brush(h))
    }

    pub fn as_h_brush(&self) -> NonNull<HBRUSH__> { self.0 }

    pub fn into_raw(self) -> NonNull<HBRUSH__> {
        let h = self.0;
        mem::forget(self);
        h
    }

    /// # Safety
    ///
    /// `h_brush` must be a valid brush handle exclusively owned by the caller.
    pub unsafe fn from_raw(h_brush: NonNull<HBRUSH__>) -> Brush { Brush(h_brush) }
}

#[cfg(windows)]
impl Drop for Brush {
    fn drop(&mut self) {
        log_drop_failure(unsafe { delete_object(self.as_h_gdi_obj()) }, "brush");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{FromPrimitive, ToPrimitive};

    #[test]
    fn hatch_style_codes() {
        assert_eq!(HatchStyle::from_i32(0), Some(HatchStyle::Horizontal));
        assert_eq!(HatchStyle::from_i32(5), Some(HatchStyle::DiagonalCross));
        assert_eq!(HatchStyle::from_i32(6), None);
        assert_eq!(HatchStyle::BackwardDiagonal.to_i32(), Some(3));
    }

    #[cfg(windows)]
    #[test]
    fn hatch_style_codes_match_native() {
        use winapi::um::wingdi as w;
        assert_eq!(HatchStyle::Horizontal as c_int, w::HS_HORIZONTAL as c_int);
        assert_eq!(HatchStyle::Vertical as c_int, w::HS_VERTICAL as c_int);
        assert_eq!(HatchStyle::ForwardDiagonal as c_int, w::HS_FDIAGONAL as c_int);
        assert_eq!(HatchStyle::BackwardDiagonal as c_int, w::HS_BDIAGONAL as c_int);
        assert_eq!(HatchStyle::Cross as c_int, w::HS_CROSS as c_int);
        assert_eq!(HatchStyle::DiagonalCross as c_int, w::HS_DIAGCROSS as c_int);
    }
}
