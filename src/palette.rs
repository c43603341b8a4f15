use std::io;
use std::ops::BitOr;
#[cfg(windows)]
use crate::error::{non_null, non_zero, log_drop_failure};
#[cfg(windows)]
use crate::object::{delete_object, GdiObject};
#[cfg(windows)]
use std::mem;
#[cfg(windows)]
use std::ptr::{null_mut, NonNull};
#[cfg(windows)]
use winapi::shared::windef::HPALETTE__;
#[cfg(windows)]
use winapi::um::wingdi::{CreatePalette, GetPaletteEntries, LOGPALETTE, PALETTEENTRY};

/// `peFlags` of a palette entry.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct PaletteEntryFlags(pub u8);

impl PaletteEntryFlags {
    pub const NONE: PaletteEntryFlags = PaletteEntryFlags(0x00);
    pub const RESERVED: PaletteEntryFlags = PaletteEntryFlags(0x01);
    pub const EXPLICIT: PaletteEntryFlags = PaletteEntryFlags(0x02);
    pub const NO_COLLAPSE: PaletteEntryFlags = PaletteEntryFlags(0x04);

    pub fn contains(self, other: PaletteEntryFlags) -> bool { self.0 & other.0 == other.0 }
}

impl BitOr for PaletteEntryFlags {
    type Output = PaletteEntryFlags;

    fn bitor(self, rhs: PaletteEntryFlags) -> PaletteEntryFlags { PaletteEntryFlags(self.0 | rhs.0) }
}

#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct PaletteEntry {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub flags: PaletteEntryFlags,
}

impl PaletteEntry {
    pub const fn new(red: u8, green: u8, blue: u8) -> PaletteEntry {
        PaletteEntry { red, green, blue, flags: PaletteEntryFlags::NONE }
    }

    /// The entry in native `PALETTEENTRY` memory order.
    pub fn to_word(self) -> u32 {
        u32::from_ne_bytes([self.red, self.green, self.blue, self.flags.0])
    }

    pub fn from_word(word: u32) -> PaletteEntry {
        let [red, green, blue, flags] = word.to_ne_bytes();
        PaletteEntry { red, green, blue, flags: PaletteEntryFlags(flags) }
    }
}

pub const PALETTE_VERSION: u16 = 0x300;

/// A logical palette: the `LOGPALETTE` header and its entries.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct LogPalette {
    pub version: u16,
    pub entries: Vec<PaletteEntry>,
}

impl LogPalette {
    pub fn new(entries: Vec<PaletteEntry>) -> LogPalette {
        LogPalette { version: PALETTE_VERSION, entries }
    }

    /// Encodes the variable-length native `LOGPALETTE`: one word for
    /// `palVersion` and `palNumEntries`, then one word per entry.
    pub fn to_words(&self) -> io::Result<Vec<u32>> {
        if self.entries.len() > u16::MAX as usize {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} palette entries do not fit LOGPALETTE", self.entries.len())
            ));
        }
        let [v0, v1] = self.version.to_ne_bytes();
        let [n0, n1] = (self.entries.len() as u16).to_ne_bytes();
        let mut words = Vec::with_capacity(1 + self.entries.len());
        words.push(u32::from_ne_bytes([v0, v1, n0, n1]));
        words.extend(self.entries.iter().map(|e| e.to_word()));
        Ok(words)
    }
}

#[cfg(windows)]
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Palette(NonNull<HPALETTE__>);

#[cfg(windows)]
impl Palette {
    pub fn new(log_palette: &LogPalette) -> io::Result<Palette> {
        let words = log_palette.to_words()?;
        let h = non_null("CreatePalette", || unsafe { CreatePalette(words.as_ptr() as *const LOGPALETTE) })?;
        log::trace!("CreatePalette({} entries) -> {:?}", log_palette.entries.len(), h);
        Ok(Palette(h))
    }

    pub fn as_h_palette(&self) -> NonNull<HPALETTE__> { self.0 }

    pub fn into_raw(self) -> NonNull<HPALETTE__> {
        let h = self.0;
        mem::forget(self);
        h
    }

    /// # Safety
    ///
    /// `h_palette` must be a valid palette handle exclusively owned by the caller.
    pub unsafe fn from_raw(h_palette: NonNull<HPALETTE__>) -> Palette { Palette(h_palette) }

    pub fn entry_count(&self) -> usize {
        unsafe { GetPaletteEntries(self.0.as_ptr(), 0, 0, null_mut()) as usize }
    }

    /// Reads up to `count` entries from `start`; the count is clamped to the
    /// entries the palette has.
    pub fn entries(&self, start: u32, count: u32) -> io::Result<Vec<PaletteEntry>> {
        let available = (self.entry_count() as u64).saturating_sub(start as u64);
        let count = (count as u64).min(available) as u32;
        if count == 0 { return Ok(Vec::new()); }
        let mut words = vec![0u32; count as usize];
        let read = non_zero("GetPaletteEntries", || unsafe {
            GetPaletteEntries(self.0.as_ptr(), start, count, words.as_mut_ptr() as *mut PALETTEENTRY)
        })?;
        words.truncate(read as usize);
        Ok(words.into_iter().map(PaletteEntry::from_word).collect())
    }
}

#[cfg(windows)]
impl Drop for Palette {
    fn drop(&mut self) {
        log_drop_failure(unsafe { delete_object(self.as_h_gdi_obj()) }, "palette");
    }
}
