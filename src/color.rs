/// Native `COLORREF`: `0x00bbggrr`.
#[allow(clippy::upper_case_acronyms)]
pub type COLORREF = u32;

#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Rgb { Rgb { red, green, blue } }

    pub const fn to_colorref(self) -> COLORREF {
        (self.red as u32) | (self.green as u32) << 8 | (self.blue as u32) << 16
    }

    /// Ignores the high byte, which carries palette-relative flags rather than color.
    pub const fn from_colorref(color: COLORREF) -> Rgb {
        Rgb { red: color as u8, green: (color >> 8) as u8, blue: (color >> 16) as u8 }
    }
}

impl From<Rgb> for COLORREF {
    fn from(rgb: Rgb) -> COLORREF { rgb.to_colorref() }
}

impl From<COLORREF> for Rgb {
    fn from(color: COLORREF) -> Rgb { Rgb::from_colorref(color) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_red_into_low_byte() {
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).to_colorref(), 0x0056_3412);
        assert_eq!(COLORREF::from(Rgb::new(0xFF, 0, 0)), 0x0000_00FF);
    }

    #[test]
    fn unpacking_drops_flag_byte() {
        assert_eq!(Rgb::from_colorref(0x0100_00FF), Rgb::new(0xFF, 0, 0));
        assert_eq!(Rgb::from(0x00AB_CDEF), Rgb::new(0xEF, 0xCD, 0xAB));
    }

    #[cfg(windows)]
    #[test]
    fn matches_native_rgb_macro() {
        assert_eq!(Rgb::new(1, 2, 3).to_colorref(), winapi::um::wingdi::RGB(1, 2, 3));
    }
}
