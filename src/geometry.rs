//! Screen-space rectangles and image fitting.
//!
//! All on-screen geometry is integral. Origins are signed because a centred
//! puzzle area may overhang the render surface by a few pixels; sizes are
//! unsigned.

/// An axis-aligned rectangle with a top-left origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`), which belongs to the rectangle for hit-testing.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Bottom edge (`y + height`), which belongs to the rectangle for hit-testing.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Returns true if the point lies inside or on any of the four edges.
    ///
    /// Cells are separated by margin gaps, so the inclusive far edge never
    /// makes two neighbouring cells claim the same point.
    #[inline]
    pub const fn contains_inclusive(&self, px: i32, py: i32) -> bool {
        self.x <= px && px <= self.right() && self.y <= py && py <= self.bottom()
    }

    pub const fn center(&self) -> (i32, i32) {
        (
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    /// Grows the rectangle by `amount` on every side.
    pub const fn inflate(&self, amount: u32) -> Self {
        Self {
            x: self.x - amount as i32,
            y: self.y - amount as i32,
            width: self.width + 2 * amount,
            height: self.height + 2 * amount,
        }
    }

    /// Returns the part of this rectangle that lies inside `0..width, 0..height`.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Rect> {
        let left = self.x.max(0);
        let top = self.y.max(0);
        let right = self.right().min(width as i32);
        let bottom = self.bottom().min(height as i32);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(
            left,
            top,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }
}

/// Computes the size an image should be scaled to so it fits a `max_size`
/// square without being enlarged.
///
/// Aspect ratio is preserved; the result is truncated to whole pixels but
/// never drops below one pixel per axis.
pub fn fit_within(width: u32, height: u32, max_size: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_size {
        return (width, height);
    }
    // exact rational scale max_size / longest, floored
    let scale_axis =
        |axis: u32| ((axis as u64 * max_size as u64) / longest as u64).max(1) as u32;
    (scale_axis(width), scale_axis(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive_on_all_edges() {
        let rect = Rect::new(10, 20, 5, 5);
        for (px, py) in [(10, 20), (15, 20), (10, 25), (15, 25), (12, 22)] {
            assert!(rect.contains_inclusive(px, py), "({px},{py}) should hit");
        }
        for (px, py) in [(9, 20), (16, 22), (12, 19), (12, 26)] {
            assert!(!rect.contains_inclusive(px, py), "({px},{py}) should miss");
        }
    }

    #[test]
    fn test_inflate_grows_every_side() {
        let rect = Rect::new(4, 4, 10, 6).inflate(2);
        assert_eq!(rect, Rect::new(2, 2, 14, 10));
    }

    #[test]
    fn test_clip_to_surface() {
        assert_eq!(
            Rect::new(-5, -5, 20, 20).clip_to(10, 10),
            Some(Rect::new(0, 0, 10, 10))
        );
        assert_eq!(Rect::new(12, 0, 4, 4).clip_to(10, 10), None);
        assert_eq!(Rect::new(2, 3, 4, 4).clip_to(10, 10), Some(Rect::new(2, 3, 4, 4)));
    }

    #[test]
    fn test_fit_within_scales_down_preserving_aspect() {
        assert_eq!(fit_within(1400, 700, 700), (700, 350));
        assert_eq!(fit_within(1000, 2000, 700), (350, 700));
    }

    #[test]
    fn test_fit_within_never_scales_up() {
        assert_eq!(fit_within(300, 200, 700), (300, 200));
        assert_eq!(fit_within(700, 700, 700), (700, 700));
    }

    #[test]
    fn test_fit_within_truncates_and_keeps_one_pixel() {
        assert_eq!(fit_within(1403, 701, 700), (700, 349));
        assert_eq!(fit_within(10_000, 1, 700), (700, 1));
    }
}
