use crate::{Brush, Palette, Rect, Rgb, WStr};
use crate::error::{non_null, non_zero, log_drop_failure};
use crate::object::{HGDIOBJ__, GdiObject, SelectableObject};
use educe::Educe;
use std::io;
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::os::raw::c_int;
use std::ptr::{null, null_mut, NonNull};
use winapi::shared::windef::{HDC__, HPALETTE__, HWND__, RECT};
use winapi::um::wingdi::{CreateCompatibleDC, CreateDCW, DeleteDC, GetPixel, LineTo, MoveToEx, RealizePalette};
use winapi::um::wingdi::{Rectangle, SelectObject, SelectPalette, SetPixel, CLR_INVALID, DEVMODEW, GDI_ERROR};
use winapi::um::winuser::{FillRect, GetDC, ReleaseDC};

/// A device context that is drawn on but not owned.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct DeviceContext {
    h_dc: NonNull<HDC__>,
}

impl DeviceContext {
    /// # Safety
    ///
    /// `h_dc` must stay a valid device context for the lifetime of the result.
    pub unsafe fn from_h_dc(h_dc: NonNull<HDC__>) -> DeviceContext { DeviceContext { h_dc } }

    pub fn as_h_dc(&self) -> NonNull<HDC__> { self.h_dc }

    pub fn set_pixel(&mut self, x: c_int, y: c_int, color: Rgb) -> Option<Rgb> {
        let res = unsafe { SetPixel(self.h_dc.as_ptr(), x, y, color.to_colorref()) };
        if res == CLR_INVALID { None } else { Some(Rgb::from_colorref(res)) }
    }

    pub fn get_pixel(&self, x: c_int, y: c_int) -> Option<Rgb> {
        let res = unsafe { GetPixel(self.h_dc.as_ptr(), x, y) };
        if res == CLR_INVALID { None } else { Some(Rgb::from_colorref(res)) }
    }

    /// Returns the previous current position.
    pub fn move_to_ex(&mut self, x: c_int, y: c_int) -> io::Result<(c_int, c_int)> {
        let mut res = MaybeUninit::uninit();
        non_zero("MoveToEx", || unsafe { MoveToEx(self.h_dc.as_ptr(), x, y, res.as_mut_ptr()) })?;
        let res = unsafe { res.assume_init() };
        Ok((res.x, res.y))
    }

    pub fn line_to(&mut self, x: c_int, y: c_int) -> io::Result<()> {
        non_zero("LineTo", || unsafe { LineTo(self.h_dc.as_ptr(), x, y) })?;
        Ok(())
    }

    pub fn rectangle(&mut self, rect: Rect) -> io::Result<()> {
        non_zero("Rectangle", || unsafe {
            Rectangle(self.h_dc.as_ptr(), rect.left, rect.top, rect.right, rect.bottom)
        })?;
        Ok(())
    }

    pub fn fill_rect(&mut self, rect: Rect, brush: &Brush) -> io::Result<()> {
        let rect = RECT::from(rect);
        non_zero("FillRect", || unsafe { FillRect(self.h_dc.as_ptr(), &rect as *const _, brush.as_h_brush().as_ptr()) })?;
        Ok(())
    }

    pub fn select_object<'a, 'b, T: SelectableObject>(&'a mut self, object: &'b T) -> io::Result<DeviceContextWithSelectedObject<'a, 'b, T>> {
        let original = non_null("SelectObject", || unsafe { SelectObject(self.h_dc.as_ptr(), object.as_h_gdi_obj().as_ptr()) })?;
        Ok(DeviceContextWithSelectedObject { context: self, object: PhantomData, original })
    }

    pub fn select_palette<'a, 'b>(&'a mut self, palette: &'b Palette, force_background: bool) -> io::Result<DeviceContextWithSelectedPalette<'a, 'b>> {
        let original = non_null("SelectPalette", || unsafe {
            SelectPalette(self.h_dc.as_ptr(), palette.as_h_palette().as_ptr(), force_background as c_int)
        })?;
        Ok(DeviceContextWithSelectedPalette { context: self, palette: PhantomData, original, force_background })
    }

    /// Maps the selected palette into the system palette, returning the number of changed entries.
    pub fn realize_palette(&mut self) -> io::Result<u32> {
        let res = unsafe { RealizePalette(self.h_dc.as_ptr()) };
        if res == GDI_ERROR as u32 {
            log::debug!("RealizePalette({:?}) returned GDI_ERROR", self.h_dc);
            Err(io::Error::new(io::ErrorKind::Other, "RealizePalette failed"))
        } else {
            Ok(res)
        }
    }
}

pub struct DeviceContextWithSelectedObject<'a, 'b, T: SelectableObject> where 'a: 'b {
    context: &'a mut DeviceContext,
    object: PhantomData<&'b T>,
    original: NonNull<HGDIOBJ__>,
}

impl<'a, 'b, T: SelectableObject> Deref for DeviceContextWithSelectedObject<'a, 'b, T> {
    type Target = DeviceContext;

    fn deref(&self) -> &DeviceContext { self.context }
}

impl<'a, 'b, T: SelectableObject> DerefMut for DeviceContextWithSelectedObject<'a, 'b, T> {
    fn deref_mut(&mut self) -> &mut DeviceContext { self.context }
}

impl<'a, 'b, T: SelectableObject> Drop for DeviceContextWithSelectedObject<'a, 'b, T> {
    fn drop(&mut self) {
        let object = unsafe { SelectObject(self.context.h_dc.as_ptr(), self.original.as_ptr()) };
        if object.is_null() {
            log::error!("failed to restore object {:?} into {:?}", self.original, self.context.h_dc);
        }
    }
}

pub struct DeviceContextWithSelectedPalette<'a, 'b> where 'a: 'b {
    context: &'a mut DeviceContext,
    palette: PhantomData<&'b Palette>,
    original: NonNull<HPALETTE__>,
    force_background: bool,
}

impl<'a, 'b> Deref for DeviceContextWithSelectedPalette<'a, 'b> {
    type Target = DeviceContext;

    fn deref(&self) -> &DeviceContext { self.context }
}

impl<'a, 'b> DerefMut for DeviceContextWithSelectedPalette<'a, 'b> {
    fn deref_mut(&mut self) -> &mut DeviceContext { self.context }
}

impl<'a, 'b> Drop for DeviceContextWithSelectedPalette<'a, 'b> {
    fn drop(&mut self) {
        let palette = unsafe {
            SelectPalette(self.context.h_dc.as_ptr(), self.original.as_ptr(), self.force_background as c_int)
        };
        if palette.is_null() {
            log::error!("failed to restore palette {:?} into {:?}", self.original, self.context.h_dc);
        }
    }
}

/// Forwards to `DeleteDC`.
///
/// # Safety
///
/// `h_dc` must come from `CreateDCW` or `CreateCompatibleDC` and must not be used afterwards.
pub unsafe fn delete_dc(h_dc: NonNull<HDC__>) -> io::Result<()> {
    non_zero("DeleteDC", || DeleteDC(h_dc.as_ptr()))?;
    log::trace!("DeleteDC({:?})", h_dc);
    Ok(())
}

/// Forwards to `ReleaseDC`.
///
/// # Safety
///
/// `h_dc` must come from `GetDC(h_wnd)` and must not be used afterwards.
pub unsafe fn release_dc(h_wnd: Option<NonNull<HWND__>>, h_dc: NonNull<HDC__>) -> io::Result<()> {
    let h_wnd = h_wnd.map_or(null_mut(), |h| h.as_ptr());
    let res = ReleaseDC(h_wnd, h_dc.as_ptr());
    if res == 0 {
        log::debug!("ReleaseDC({:?}, {:?}) returned 0", h_wnd, h_dc);
        return Err(io::Error::new(io::ErrorKind::Other, "ReleaseDC failed"));
    }
    log::trace!("ReleaseDC({:?}, {:?})", h_wnd, h_dc);
    Ok(())
}

/// A device context owned by the caller and deleted with `DeleteDC`.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct CreatedDeviceContext(DeviceContext);

impl CreatedDeviceContext {
    /// Forwards to `CreateDCW`. The port argument is always null; the platform ignores it.
    ///
    /// `init_data` must have `dmSize` equal to the size of `DEVMODEW` and no
    /// driver extra bytes, since the native call reads `dmSize + dmDriverExtra`
    /// bytes from it.
    pub fn new(driver: Option<WStr>, device: Option<WStr>, init_data: Option<&DEVMODEW>) -> io::Result<CreatedDeviceContext> {
        if let Some(d) = init_data {
            if d.dmSize as usize != mem::size_of::<DEVMODEW>() || d.dmDriverExtra != 0 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("DEVMODEW with dmSize {} and dmDriverExtra {}", d.dmSize, d.dmDriverExtra)
                ));
            }
        }
        let driver_ptr = driver.map_or(null(), |s| s.as_ptr());
        let device_ptr = device.map_or(null(), |s| s.as_ptr());
        let init_data = init_data.map_or(null(), |d| d as *const DEVMODEW);
        let h_dc = non_null("CreateDCW", || unsafe { CreateDCW(driver_ptr, device_ptr, null(), init_data) })?;
        log::trace!(
            "CreateDCW({}, {}) -> {:?}",
            driver.map_or_else(String::new, |s| s.to_string()),
            device.map_or_else(String::new, |s| s.to_string()),
            h_dc
        );
        Ok(CreatedDeviceContext(DeviceContext { h_dc }))
    }

    pub fn display() -> io::Result<CreatedDeviceContext> {
        CreatedDeviceContext::new(Some(crate::w_str!("DISPLAY")), None, None)
    }

    /// A memory device context compatible with `dc`.
    pub fn compatible(dc: &DeviceContext) -> io::Result<CreatedDeviceContext> {
        let h_dc = non_null("CreateCompatibleDC", || unsafe { CreateCompatibleDC(dc.h_dc.as_ptr()) })?;
        log::trace!("CreateCompatibleDC({:?}) -> {:?}", dc.h_dc, h_dc);
        Ok(CreatedDeviceContext(DeviceContext { h_dc }))
    }

    pub fn delete(self) -> io::Result<()> {
        let h_dc = self.into_raw();
        unsafe { delete_dc(h_dc) }
    }

    pub fn into_raw(self) -> NonNull<HDC__> {
        let h_dc = self.0.h_dc;
        mem::forget(self);
        h_dc
    }

    /// # Safety
    ///
    /// `h_dc` must be a created device context exclusively owned by the caller.
    pub unsafe fn from_raw(h_dc: NonNull<HDC__>) -> CreatedDeviceContext {
        CreatedDeviceContext(DeviceContext { h_dc })
    }
}

impl Deref for CreatedDeviceContext {
    type Target = DeviceContext;

    fn deref(&self) -> &DeviceContext { &self.0 }
}

impl DerefMut for CreatedDeviceContext {
    fn deref_mut(&mut self) -> &mut DeviceContext { &mut self.0 }
}

impl Drop for CreatedDeviceContext {
    fn drop(&mut self) {
        log_drop_failure(unsafe { delete_dc(self.0.h_dc) }, "device context");
    }
}

/// A common device context of a window or of the screen, returned with `ReleaseDC`.
#[derive(Educe)]
#[educe(Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct WindowDeviceContext {
    dc: DeviceContext,
    #[educe(PartialOrd(ignore), Ord(ignore), PartialEq(ignore), Eq(ignore), Hash(ignore))]
    h_wnd: Option<NonNull<HWND__>>,
}

impl WindowDeviceContext {
    pub fn screen() -> io::Result<WindowDeviceContext> {
        let h_dc = non_null("GetDC", || unsafe { GetDC(null_mut()) })?;
        log::trace!("GetDC(NULL) -> {:?}", h_dc);
        Ok(WindowDeviceContext { dc: DeviceContext { h_dc }, h_wnd: None })
    }

    pub fn for_window(h_wnd: NonNull<HWND__>) -> io::Result<WindowDeviceContext> {
        let h_dc = non_null("GetDC", || unsafe { GetDC(h_wnd.as_ptr()) })?;
        log::trace!("GetDC({:?}) -> {:?}", h_wnd, h_dc);
        Ok(WindowDeviceContext { dc: DeviceContext { h_dc }, h_wnd: Some(h_wnd) })
    }

    pub fn h_wnd(&self) -> Option<NonNull<HWND__>> { self.h_wnd }

    pub fn release(self) -> io::Result<()> {
        let (h_wnd, h_dc) = (self.h_wnd, self.dc.h_dc);
        mem::forget(self);
        unsafe { release_dc(h_wnd, h_dc) }
    }
}

impl Deref for WindowDeviceContext {
    type Target = DeviceContext;

    fn deref(&self) -> &DeviceContext { &self.dc }
}

impl DerefMut for WindowDeviceContext {
    fn deref_mut(&mut self) -> &mut DeviceContext { &mut self.dc }
}

impl Drop for WindowDeviceContext {
    fn drop(&mut self) {
        log_drop_failure(unsafe { release_dc(self.h_wnd, self.dc.h_dc) }, "window device context");
    }
}
