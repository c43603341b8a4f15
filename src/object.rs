use enum_primitive_derive::Primitive;
#[cfg(windows)]
use crate::{Bitmap, Brush, Font, Palette};
#[cfg(windows)]
use crate::error::non_zero;
#[cfg(windows)]
use sealed::sealed;
#[cfg(windows)]
use std::fmt::{self, Debug, Formatter};
#[cfg(windows)]
use std::io;
#[cfg(windows)]
use std::mem::{self, ManuallyDrop};
#[cfg(windows)]
use std::ops::Deref;
#[cfg(windows)]
use std::os::raw::c_int;
#[cfg(windows)]
use std::ptr::NonNull;
#[cfg(windows)]
use winapi::um::wingdi::{DeleteObject, GetStockObject, DEFAULT_PALETTE};

#[cfg(windows)]
#[allow(non_camel_case_types)]
pub type HGDIOBJ__ = winapi::ctypes::c_void;

/// A GDI object released by `DeleteObject`.
#[cfg(windows)]
#[sealed]
pub trait GdiObject {
    fn as_h_gdi_obj(&self) -> NonNull<HGDIOBJ__>;

    /// Deletes the object, returning the `DeleteObject` status instead of logging it.
    fn delete(self) -> io::Result<()> where Self: Sized {
        let h = self.as_h_gdi_obj();
        mem::forget(self);
        unsafe { delete_object(h) }
    }
}

/// A GDI object that `SelectObject` can put into a device context.
#[cfg(windows)]
#[sealed]
pub trait SelectableObject: GdiObject { }

#[cfg(windows)]
#[sealed]
impl GdiObject for Bitmap {
    fn as_h_gdi_obj(&self) -> NonNull<HGDIOBJ__> { self.as_h_bitmap().cast() }
}

#[cfg(windows)]
#[sealed]
impl GdiObject for Brush {
    fn as_h_gdi_obj(&self) -> NonNull<HGDIOBJ__> { self.as_h_brush().cast() }
}

#[cfg(windows)]
#[sealed]
impl GdiObject for Font {
    fn as_h_gdi_obj(&self) -> NonNull<HGDIOBJ__> { self.as_h_font().cast() }
}

#[cfg(windows)]
#[sealed]
impl GdiObject for Palette {
    fn as_h_gdi_obj(&self) -> NonNull<HGDIOBJ__> { self.as_h_palette().cast() }
}

#[cfg(windows)]
#[sealed]
impl SelectableObject for Bitmap { }

#[cfg(windows)]
#[sealed]
impl SelectableObject for Brush { }

#[cfg(windows)]
#[sealed]
impl SelectableObject for Font { }

/// Forwards to `DeleteObject`.
///
/// # Safety
///
/// `h_gdi_obj` must be a pen, brush, font, bitmap, region or palette handle
/// that is not selected into a device context and is not used afterwards.
#[cfg(windows)]
pub unsafe fn delete_object(h_gdi_obj: NonNull<HGDIOBJ__>) -> io::Result<()> {
    non_zero("DeleteObject", || DeleteObject(h_gdi_obj.as_ptr()))?;
    log::trace!("DeleteObject({:?})", h_gdi_obj);
    Ok(())
}

#[derive(Primitive)]
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone)]
#[derive(Debug)]
#[repr(i32)]
pub enum StockBrush {
    White = 0,
    LightGray = 1,
    Gray = 2,
    DarkGray = 3,
    Black = 4,
    Null = 5,
    DcBrush = 18,
}

#[derive(Primitive)]
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone)]
#[derive(Debug)]
#[repr(i32)]
pub enum StockFont {
    OemFixed = 10,
    AnsiFixed = 11,
    AnsiVar = 12,
    System = 13,
    DeviceDefault = 14,
    SystemFixed = 16,
    DefaultGui = 17,
}

/// A system-owned object. Never deleted.
#[cfg(windows)]
pub struct StockObject<T: GdiObject>(ManuallyDrop<T>);

#[cfg(windows)]
impl<T: GdiObject> Deref for StockObject<T> {
    type Target = T;

    fn deref(&self) -> &T { &self.0 }
}

#[cfg(windows)]
impl<T: GdiObject + Debug> Debug for StockObject<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StockObject").field(&*self.0).finish()
    }
}

#[cfg(windows)]
pub enum Stock { }

#[cfg(windows)]
impl Stock {
    fn object(index: c_int) -> io::Result<NonNull<HGDIOBJ__>> {
        crate::error::non_null("GetStockObject", || unsafe { GetStockObject(index) })
    }

    pub fn brush(brush: StockBrush) -> io::Result<StockObject<Brush>> {
        let h = Stock::object(brush as c_int)?;
        Ok(StockObject(ManuallyDrop::new(unsafe { Brush::from_raw(h.cast()) })))
    }

    pub fn font(font: StockFont) -> io::Result<StockObject<Font>> {
        let h = Stock::object(font as c_int)?;
        Ok(StockObject(ManuallyDrop::new(unsafe { Font::from_raw(h.cast()) })))
    }

    pub fn default_palette() -> io::Result<StockObject<Palette>> {
        let h = Stock::object(DEFAULT_PALETTE as c_int)?;
        Ok(StockObject(ManuallyDrop::new(unsafe { Palette::from_raw(h.cast()) })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn stock_indices_round_trip_through_primitive() {
        assert_eq!(StockBrush::from_i32(4), Some(StockBrush::Black));
        assert_eq!(StockBrush::from_i32(6), None);
        assert_eq!(StockFont::from_i32(17), Some(StockFont::DefaultGui));
        assert_eq!(StockFont::from_i32(15), None);
    }

    #[cfg(windows)]
    #[test]
    fn stock_indices_match_native() {
        use winapi::um::wingdi as w;
        assert_eq!(StockBrush::White as i32, w::WHITE_BRUSH as i32);
        assert_eq!(StockBrush::Null as i32, w::NULL_BRUSH as i32);
        assert_eq!(StockBrush::DcBrush as i32, w::DC_BRUSH as i32);
        assert_eq!(StockFont::System as i32, w::SYSTEM_FONT as i32);
        assert_eq!(StockFont::DefaultGui as i32, w::DEFAULT_GUI_FONT as i32);
    }
}
