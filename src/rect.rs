use std::os::raw::c_int;

/// A rectangle given by its upper-left and lower-right corners.
///
/// Mirrors the native `RECT` layout. Enhanced metafile frames use it in .01 mm units.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[repr(C)]
pub struct Rect {
    pub left: c_int,
    pub top: c_int,
    pub right: c_int,
    pub bottom: c_int,
}

impl Rect {
    pub const fn new(left: c_int, top: c_int, right: c_int, bottom: c_int) -> Rect {
        Rect { left, top, right, bottom }
    }

    pub fn width(&self) -> c_int { self.right.wrapping_sub(self.left) }

    pub fn height(&self) -> c_int { self.bottom.wrapping_sub(self.top) }

    pub fn is_empty(&self) -> bool { self.right <= self.left || self.bottom <= self.top }
}

#[cfg(windows)]
mod native {
    use super::Rect;
    use winapi::shared::windef::RECT;

    impl From<Rect> for RECT {
        fn from(r: Rect) -> RECT { RECT { left: r.left, top: r.top, right: r.right, bottom: r.bottom } }
    }

    impl From<RECT> for Rect {
        fn from(r: RECT) -> Rect { Rect { left: r.left, top: r.top, right: r.right, bottom: r.bottom } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent() {
        let r = Rect::new(10, 20, 110, 70);
        assert_eq!(r.width(), 100);
        assert_eq!(r.height(), 50);
        assert!(!r.is_empty());
    }

    #[test]
    fn inverted_rect_is_empty() {
        assert!(Rect::new(5, 5, 5, 10).is_empty());
        assert!(Rect::new(0, 10, 10, 0).is_empty());
        assert!(Rect::default().is_empty());
    }

    #[test]
    fn layout_is_four_ints() {
        assert_eq!(std::mem::size_of::<Rect>(), 4 * std::mem::size_of::<c_int>());
    }
}
