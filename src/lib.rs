//! Minimal safe wrap around Windows GDI.
//!
//! Every wrapper forwards to exactly one native call. Handles are owned values
//! released by the matching native call when dropped; `delete`, `release` and
//! `close` do the same explicitly and report the native status.

use null_terminated::Nul;
use std::fmt::{self, Display, Formatter};
use std::io;

#[cfg(windows)]
mod error;

mod bitmap;
mod brush;
mod color;
#[cfg(windows)]
mod dc;
mod font;
mod metafile;
mod object;
mod palette;
mod rect;
#[cfg(windows)]
mod wmf;

pub use bitmap::bitmap_bits_len;
pub use brush::HatchStyle;
pub use color::{COLORREF, Rgb};
pub use font::{CharSet, ClipPrecision, Family, FontDesc, FontWeight, OutputPrecision, Pitch, Quality};
pub use metafile::{enh_metafile_description, EnhMetafileDescription, EnhMetafileHeader};
pub use object::{StockBrush, StockFont};
pub use palette::{LogPalette, PaletteEntry, PaletteEntryFlags, PALETTE_VERSION};
pub use rect::Rect;

#[cfg(windows)]
pub use bitmap::Bitmap;
#[cfg(windows)]
pub use brush::Brush;
#[cfg(windows)]
pub use dc::{CreatedDeviceContext, DeviceContext, DeviceContextWithSelectedObject, DeviceContextWithSelectedPalette};
#[cfg(windows)]
pub use dc::{delete_dc, release_dc, WindowDeviceContext};
#[cfg(windows)]
pub use font::Font;
#[cfg(windows)]
pub use metafile::{delete_enh_metafile, EnhMetafile, EnhMetafileRecorder};
#[cfg(windows)]
pub use object::{delete_object, GdiObject, SelectableObject, Stock, StockObject, HGDIOBJ__};
#[cfg(windows)]
pub use palette::Palette;
#[cfg(windows)]
#[allow(deprecated)]
pub use wmf::{delete_metafile, Metafile, MetafileRecorder};

#[cfg(windows)]
pub use winapi::um::wingdi::DEVMODEW as DEVMODEW;

#[doc(hidden)]
pub use utf16_lit::utf16_null as utf16_lit_utf16_null;
#[doc(hidden)]
pub use null_terminated::Nul as null_terminated_Nul;

/// A borrowed nul-terminated UTF-16 string.
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct WStr<'a>(pub &'a Nul<u16>);

impl<'a> WStr<'a> {
    pub fn as_ptr(self) -> *const u16 { self.0.as_ptr() }
}

impl<'a> Display for WStr<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        String::from_utf16_lossy(&self.0[..]).fmt(f)
    }
}

/// An owned nul-terminated UTF-16 string, for names known only at run time.
#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct WString(Vec<u16>);

impl WString {
    pub fn new(s: &str) -> io::Result<WString> {
        let mut units: Vec<u16> = s.encode_utf16().collect();
        if units.contains(&0) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("nul character in {:?}", s)));
        }
        units.push(0);
        Ok(WString(units))
    }

    pub fn as_w_str(&self) -> WStr<'_> {
        WStr(unsafe { Nul::new_unchecked(self.0.as_ptr()) })
    }

    /// Code units without the final terminator.
    pub fn as_units(&self) -> &[u16] { &self.0[.. self.0.len() - 1] }
}

#[macro_export]
macro_rules! w_str {
    ($($tokens:tt)*) => {
        $crate::WStr(unsafe {
            $crate::null_terminated_Nul::new_unchecked(
                &$crate::utf16_lit_utf16_null!($($tokens)*) as *const _
            )
        })
    };
}
