use std::cmp;
use tracing::{debug, trace};

use crate::{Error, MAX_ATLAS_SIZE, Placement};
use crate::search::best_fit;
use crate::skyline::Skyline;

/// Growable rectangle packer.
///
/// Starts out small and doubles one side at a time, up to `max_size` on each side, whenever a
/// request doesn't fit. Placements are never moved once handed out.
pub struct Atlas {
    max_size: u32,
    skyline: Skyline,
}

impl Atlas {
    /// Create an empty `1 × 1` atlas that may grow to `max_size × max_size`.
    pub fn new(max_size: u32) -> Result<Atlas, Error> {
        if max_size == 0 || max_size > MAX_ATLAS_SIZE {
            return Err(Error::MaxSize(max_size));
        }
        Ok(Atlas { max_size, skyline: Skyline::new(1, 1) })
    }

    pub fn max_size(&self) -> u32 { self.max_size }
    pub fn draw_width(&self) -> u32 { self.skyline.width() }
    pub fn draw_height(&self) -> u32 { self.skyline.height() }
    pub fn draw_size(&self) -> (u32, u32) { (self.draw_width(), self.draw_height()) }

    /// True when nothing has been placed since construction or the last reset.
    pub fn is_empty(&self) -> bool { self.skyline.is_flat() }

    /// Throw away every placement and shrink back to `width × height`.
    ///
    /// Both sides must lie in `1..=max_size`.
    pub fn reset(&mut self, width: u32, height: u32) {
        debug_assert!(width >= 1 && width <= self.max_size);
        debug_assert!(height >= 1 && height <= self.max_size);
        trace!(width, height, "reset atlas");
        self.skyline.reinitialize(width, height);
    }

    /// Reserve a `width × height` rectangle, growing the atlas if necessary.
    ///
    /// On failure the atlas is left exactly as it was.
    pub fn add_rect(&mut self, width: u32, height: u32) -> Result<Placement, Error> {
        if width == 0 || height == 0 {
            return Err(Error::Empty { width, height });
        }
        if width > self.max_size || height > self.max_size {
            return Err(Error::TooLarge { width, height, max_size: self.max_size });
        }

        // Try progressively larger bounds, but only commit to the first one that fits.
        let (mut bound_width, mut bound_height) = self.draw_size();
        let placement = loop {
            if let Some(placement) = best_fit(&self.skyline, width, height, (bound_width, bound_height)) {
                break placement;
            }
            if bound_width == self.max_size && bound_height == self.max_size {
                debug!(width, height, max_size = self.max_size, "atlas out of space");
                return Err(Error::OutOfSpace { width, height });
            }

            // Grow the shorter side to keep the atlas roughly square.
            if bound_width <= bound_height {
                bound_width = cmp::min(bound_width * 2, self.max_size);
            } else {
                bound_height = cmp::min(bound_height * 2, self.max_size);
            }
        };

        if (bound_width, bound_height) != self.draw_size() {
            debug!(
                from_width = self.draw_width(), from_height = self.draw_height(),
                width = bound_width, height = bound_height,
                "grow atlas"
            );
            self.skyline.extend(bound_width, bound_height);
        }

        let Placement { x, y } = placement;
        self.skyline.occupy(x, width, y + height);
        trace!(x, y, width, height, "place rectangle");
        Ok(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::Atlas;
    use crate::{Error, Placement};

    #[test]
    fn new() {
        assert!(matches!(Atlas::new(0), Err(Error::MaxSize(0))));
        assert!(matches!(Atlas::new(65537), Err(Error::MaxSize(65537))));

        let atlas = Atlas::new(65536).unwrap();
        assert_eq!(atlas.draw_size(), (1, 1));
        assert_eq!(atlas.max_size(), 65536);
        assert!(atlas.is_empty());
    }

    #[test]
    fn grows_shorter_side() {
        let mut atlas = Atlas::new(64).unwrap();
        atlas.reset(4, 4);
        assert_eq!(atlas.add_rect(4, 4), Ok(Placement { x: 0, y: 0 }));

        // Equal sides grow the width first.
        assert_eq!(atlas.add_rect(4, 4), Ok(Placement { x: 4, y: 0 }));
        assert_eq!(atlas.draw_size(), (8, 4));

        assert_eq!(atlas.add_rect(4, 4), Ok(Placement { x: 0, y: 4 }));
        assert_eq!(atlas.draw_size(), (8, 8));
    }

    #[test]
    fn grows_until_fit() {
        let mut atlas = Atlas::new(4096).unwrap();
        assert_eq!(atlas.add_rect(100, 3), Ok(Placement { x: 0, y: 0 }));
        assert_eq!(atlas.draw_size(), (128, 64));
        assert!(!atlas.is_empty());
    }

    #[test]
    fn grows_capped() {
        let mut atlas = Atlas::new(24).unwrap();
        atlas.reset(16, 16);
        assert_eq!(atlas.add_rect(16, 16), Ok(Placement { x: 0, y: 0 }));
        assert_eq!(atlas.add_rect(8, 8), Ok(Placement { x: 16, y: 0 }));
        assert_eq!(atlas.draw_size(), (24, 16));
    }

    #[test]
    fn invalid_requests() {
        let mut atlas = Atlas::new(16).unwrap();
        assert_eq!(atlas.add_rect(0, 4), Err(Error::Empty { width: 0, height: 4 }));
        assert_eq!(atlas.add_rect(17, 1), Err(Error::TooLarge { width: 17, height: 1, max_size: 16 }));
        assert_eq!(atlas.add_rect(1, 17), Err(Error::TooLarge { width: 1, height: 17, max_size: 16 }));
        assert_eq!(atlas.draw_size(), (1, 1));
        assert!(atlas.is_empty());
    }

    #[test]
    fn out_of_space_is_clean() {
        let mut atlas = Atlas::new(16).unwrap();
        atlas.reset(8, 16);
        assert_eq!(atlas.add_rect(8, 12), Ok(Placement { x: 0, y: 0 }));
        assert_eq!(atlas.draw_size(), (8, 16));

        // Growth to 16 × 16 would be needed but still not suffice.
        assert_eq!(atlas.add_rect(12, 8), Err(Error::OutOfSpace { width: 12, height: 8 }));
        assert_eq!(atlas.draw_size(), (8, 16));

        assert_eq!(atlas.add_rect(8, 4), Ok(Placement { x: 0, y: 12 }));
        assert_eq!(atlas.draw_size(), (8, 16));
    }
}
