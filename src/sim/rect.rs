//! Axis-aligned pixel rectangles for paddle, balls, tiles and bonuses
//!
//! Screen coordinates: x grows right, y grows down. A rectangle spans
//! `[left, right)` horizontally and `[top, bottom)` vertically.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An integer rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size whose center is `center`
    pub fn from_center(center: IVec2, w: i32, h: i32) -> Self {
        Self::new(center.x - w / 2, center.y - h / 2, w, h)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    #[inline]
    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    pub fn set_center(&mut self, center: IVec2) {
        self.x = center.x - self.w / 2;
        self.y = center.y - self.h / 2;
    }

    /// Translate in place
    pub fn translate(&mut self, delta: IVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Same center, new size
    pub fn resized(&self, w: i32, h: i32) -> Self {
        Self::from_center(self.center(), w, h)
    }

    /// True if the two rectangles share interior area
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10, 20, 60, 30);
        assert_eq!(r.right(), 70);
        assert_eq!(r.bottom(), 50);
        assert_eq!(r.center(), IVec2::new(40, 35));
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0, 0, 10, 10);
        // Touching edges do not overlap
        assert!(!a.overlaps(&Rect::new(10, 0, 10, 10)));
        assert!(a.overlaps(&Rect::new(9, 9, 10, 10)));
        assert!(!a.overlaps(&Rect::new(3, 3, 0, 4)));
    }

    #[test]
    fn test_resize_keeps_center() {
        let r = Rect::from_center(IVec2::new(520, 760), 144, 20);
        let wide = r.resized(288, 20);
        assert_eq!(wide.center(), r.center());
        assert_eq!(wide.w, 288);
    }
}
