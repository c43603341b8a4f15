use crate::WStr;
use enum_primitive_derive::Primitive;
use num_traits::FromPrimitive;
use std::ops::BitOr;
use std::os::raw::c_int;
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
use winapi::shared::windef::HFONT__;
#[cfg(windows)]
use winapi::um::wingdi::CreateFontW;

/// Stroke weight, `0..=1000`. Several native names share a value, hence constants.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct FontWeight(pub c_int);

impl FontWeight {
    pub const DONT_CARE: FontWeight = FontWeight(0);
    pub const THIN: FontWeight = FontWeight(100);
    pub const EXTRA_LIGHT: FontWeight = FontWeight(200);
    pub const ULTRA_LIGHT: FontWeight = FontWeight(200);
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const REGULAR: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const SEMI_BOLD: FontWeight = FontWeight(600);
    pub const DEMI_BOLD: FontWeight = FontWeight(600);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const EXTRA_BOLD: FontWeight = FontWeight(800);
    pub const ULTRA_BOLD: FontWeight = FontWeight(800);
    pub const HEAVY: FontWeight = FontWeight(900);
    pub const BLACK: FontWeight = FontWeight(900);
}

#[derive(Primitive)]
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone)]
#[derive(Debug)]
#[repr(u32)]
pub enum CharSet {
    Ansi = 0,
    Default = 1,
    Symbol = 2,
    Mac = 77,
    ShiftJis = 128,
    Hangul = 129,
    Johab = 130,
    Gb2312 = 134,
    ChineseBig5 = 136,
    Greek = 161,
    Turkish = 162,
    Vietnamese = 163,
    Hebrew = 177,
    Arabic = 178,
    Baltic = 186,
    Russian = 204,
    Thai = 222,
    EastEurope = 238,
    Oem = 255,
}

#[derive(Primitive)]
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone)]
#[derive(Debug)]
#[repr(u32)]
pub enum OutputPrecision {
    Default = 0,
    String = 1,
    Character = 2,
    Stroke = 3,
    TrueType = 4,
    Device = 5,
    Raster = 6,
    TrueTypeOnly = 7,
    Outline = 8,
    ScreenOutline = 9,
    PostScriptOnly = 10,
}

/// `fdwClipPrecision`: one precision value combined with any of the flags.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct ClipPrecision(pub u32);

impl ClipPrecision {
    pub const DEFAULT: ClipPrecision = ClipPrecision(0x00);
    pub const CHARACTER: ClipPrecision = ClipPrecision(0x01);
    pub const STROKE: ClipPrecision = ClipPrecision(0x02);
    pub const LH_ANGLES: ClipPrecision = ClipPrecision(0x10);
    pub const TT_ALWAYS: ClipPrecision = ClipPrecision(0x20);
    pub const DFA_DISABLE: ClipPrecision = ClipPrecision(0x40);
    pub const EMBEDDED: ClipPrecision = ClipPrecision(0x80);
}

impl BitOr for ClipPrecision {
    type Output = ClipPrecision;

    fn bitor(self, rhs: ClipPrecision) -> ClipPrecision { ClipPrecision(self.0 | rhs.0) }
}

#[derive(Primitive)]
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone)]
#[derive(Debug)]
#[repr(u32)]
pub enum Quality {
    Default = 0,
    Draft = 1,
    Proof = 2,
    NonAntialiased = 3,
    Antialiased = 4,
    ClearType = 5,
    ClearTypeNatural = 6,
}

#[derive(Primitive)]
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone)]
#[derive(Debug)]
#[repr(u32)]
pub enum Pitch {
    Default = 0,
    Fixed = 1,
    Variable = 2,
    Mono = 8,
}

#[derive(Primitive)]
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone)]
#[derive(Debug)]
#[repr(u32)]
pub enum Family {
    DontCare = 0x00,
    Roman = 0x10,
    Swiss = 0x20,
    Modern = 0x30,
    Script = 0x40,
    Decorative = 0x50,
}

/// The `CreateFontW` parameters.
///
/// Height and width are in logical units; escapement and orientation in tenths
/// of a degree. The default asks the font mapper for its defaults everywhere.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct FontDesc<'a> {
    pub height: c_int,
    pub width: c_int,
    pub escapement: c_int,
    pub orientation: c_int,
    pub weight: FontWeight,
    pub italic: bool,
    pub underline: bool,
    pub strike_out: bool,
    pub char_set: CharSet,
    pub output_precision: OutputPrecision,
    pub clip_precision: ClipPrecision,
    pub quality: Quality,
    pub pitch: Pitch,
    pub family: Family,
    pub face: Option<WStr<'a>>,
}

impl<'a> Default for FontDesc<'a> {
    fn default() -> FontDesc<'a> {
        FontDesc {
            height: 0,
            width: 0,
            escapement: 0,
            orientation: 0,
            weight: FontWeight::DONT_CARE,
            italic: false,
            underline: false,
            strike_out: false,
            char_set: CharSet::Default,
            output_precision: OutputPrecision::Default,
            clip_precision: ClipPrecision::DEFAULT,
            quality: Quality::Default,
            pitch: Pitch::Default,
            family: Family::DontCare,
            face: None,
        }
    }
}

impl<'a> FontDesc<'a> {
    pub fn pitch_and_family(&self) -> u32 { self.pitch as u32 | self.family as u32 }

    pub fn set_pitch_and_family(&mut self, pitch_and_family: u32) -> bool {
        let pitch = Pitch::from_u32(pitch_and_family & 0x0F);
        let family = Family::from_u32(pitch_and_family & 0xF0);
        match (pitch, family) {
            (Some(pitch), Some(family)) => {
                self.pitch = pitch;
                self.family = family;
                true
            },
            _ => false,
        }
    }
}

#[cfg(windows)]
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Font(NonNull<HFONT__>);

#[cfg(windows)]
impl Font {
    pub fn new(desc: &FontDesc) -> io::Result<Font> {
        let face = desc.face.map_or(null(), |face| face.as_ptr());
        let h = non_null("CreateFontW", || unsafe { CreateFontW(
            desc.height,
            desc.width,
            desc.escapement,
            desc.orientation,
            desc.weight.0,
            desc.italic as u32,
            desc.underline as u32,
            desc.strike_out as u32,
            desc.char_set as u32,
            desc.output_precision as u32,
            desc.clip_precision.0,
            desc.quality as u32,
            desc.pitch_and_family(),
            face
        ) })?;
        log::trace!("CreateFontW({:?}) -> {:?}", desc, h);
        Ok(Font(h))
    }

    pub fn as_h_font(&self) -> NonNull<HFONT__> { self.0 }

    pub fn into_raw(self) -> NonNull<HFONT__> {
        let h = self.0;
        mem::forget(self);
        h
    }

    /// # Safety
    ///
    /// `h_font` must be a valid font handle exclusively owned by the caller.
    pub unsafe fn from_raw(h_font: NonNull<HFONT__>) -> Font { Font(h_font) }
}

#[cfg(windows)]
impl Drop for Font {
    fn drop(&mut self) {
        log_drop_failure(unsafe { delete_object(self.as_h_gdi_obj()) }, "font");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_desc_is_all_defaults() {
        let desc = FontDesc::default();
        assert_eq!(desc.weight, FontWeight::DONT_CARE);
        assert_eq!(desc.char_set as u32, 1);
        assert_eq!(desc.pitch_and_family(), 0);
        assert!(desc.face.is_none());
    }

    #[test]
    fn aliased_weights_share_values() {
        assert_eq!(FontWeight::NORMAL, FontWeight::REGULAR);
        assert_eq!(FontWeight::SEMI_BOLD, FontWeight::DEMI_BOLD);
        assert_eq!(FontWeight::HEAVY.0, 900);
        assert!(FontWeight::BOLD > FontWeight::MEDIUM);
    }

    #[test]
    fn pitch_and_family_packs_nibbles() {
        let mut desc = FontDesc { pitch: Pitch::Variable, family: Family::Swiss, ..FontDesc::default() };
        assert_eq!(desc.pitch_and_family(), 0x22);
        assert!(desc.set_pitch_and_family(0x31));
        assert_eq!((desc.pitch, desc.family), (Pitch::Fixed, Family::Modern));
        assert!(!desc.set_pitch_and_family(0x63));
        assert_eq!((desc.pitch, desc.family), (Pitch::Fixed, Family::Modern));
    }

    #[test]
    fn mono_pitch_is_accepted() {
        let mut desc = FontDesc::default();
        assert!(desc.set_pitch_and_family(0x08));
        assert_eq!((desc.pitch, desc.family), (Pitch::Mono, Family::DontCare));
        assert!(desc.set_pitch_and_family(0x38));
        assert_eq!(desc.pitch_and_family(), 0x38);
    }

    #[test]
    fn clip_flags_combine() {
        let clip = ClipPrecision::STROKE | ClipPrecision::LH_ANGLES;
        assert_eq!(clip.0, 0x12);
    }

    #[test]
    fn char_set_codes() {
        assert_eq!(CharSet::from_u32(204), Some(CharSet::Russian));
        assert_eq!(CharSet::from_u32(3), None);
        assert_eq!(OutputPrecision::from_u32(7), Some(OutputPrecision::TrueTypeOnly));
        assert_eq!(Quality::from_u32(5), Some(Quality::ClearType));
    }

    #[test]
    fn face_is_carried_by_reference() {
        let desc = FontDesc { face: Some(crate::w_str!("Arial")), ..FontDesc::default() };
        assert_eq!(desc.face.map(|f| f.to_string()), Some("Arial".to_string()));
    }

    #[cfg(windows)]
    #[test]
    fn codes_match_native() {
        use winapi::um::wingdi as w;
        assert_eq!(FontWeight::BOLD.0, w::FW_BOLD as c_int);
        assert_eq!(CharSet::ShiftJis as u32, w::SHIFTJIS_CHARSET as u32);
        assert_eq!(CharSet::Oem as u32, w::OEM_CHARSET as u32);
        assert_eq!(OutputPrecision::Outline as u32, w::OUT_OUTLINE_PRECIS as u32);
        assert_eq!(ClipPrecision::EMBEDDED.0, w::CLIP_EMBEDDED as u32);
        assert_eq!(Quality::ClearTypeNatural as u32, w::CLEARTYPE_NATURAL_QUALITY as u32);
        assert_eq!(Family::Decorative as u32, w::FF_DECORATIVE as u32);
        assert_eq!(Pitch::Variable as u32, w::VARIABLE_PITCH as u32);
        assert_eq!(Pitch::Mono as u32, w::MONO_FONT as u32);
    }
}
