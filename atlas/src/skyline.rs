/// Height profile of the occupied area of an atlas.
///
/// Segments cover `0..width` contiguously, in order, and no two neighbors share a height.
pub struct Skyline {
    width: u32,
    height: u32,
    segments: Vec<Segment>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    pub x: u32,
    pub width: u32,
    pub height: u32,
}

impl Segment {
    pub fn right(&self) -> u32 { self.x + self.width }
}

impl Skyline {
    pub fn new(width: u32, height: u32) -> Skyline {
        let mut skyline = Skyline { width: 0, height: 0, segments: Vec::default() };
        skyline.reinitialize(width, height);
        skyline
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn segments(&self) -> &[Segment] { &self.segments[..] }

    /// True when nothing has been placed since the last reinitialization.
    pub fn is_flat(&self) -> bool {
        self.segments.iter().all(|&Segment { height, .. }| height == 0)
    }

    /// Discard all occupancy and start over with a single empty segment.
    pub fn reinitialize(&mut self, width: u32, height: u32) {
        debug_assert!(width > 0 && height > 0);
        self.width = width;
        self.height = height;

        self.segments.clear();
        self.segments.push(Segment { x: 0, width, height: 0 });
    }

    /// Enlarge the bounds, keeping existing occupancy. The new columns start out empty.
    pub fn extend(&mut self, width: u32, height: u32) {
        debug_assert!(width >= self.width && height >= self.height);
        if width > self.width {
            let x = self.width;
            self.segments.push(Segment { x, width: width - x, height: 0 });
            self.merge();
        }
        self.width = width;
        self.height = height;
    }

    /// The highest point of the skyline over `x..x + width`.
    ///
    /// Columns beyond the current width count as empty.
    pub fn height_at(&self, x: u32, width: u32) -> u32 {
        let right = x + width;
        self.segments.iter()
            .skip_while(|segment| segment.right() <= x)
            .take_while(|segment| segment.x < right)
            .map(|&Segment { height, .. }| height)
            .max()
            .unwrap_or(0)
    }

    /// Raise `x..x + width` to `height`, replacing everything underneath it.
    pub fn occupy(&mut self, x: u32, width: u32, height: u32) {
        let right = x + width;
        debug_assert!(width > 0 && right <= self.width && height <= self.height);

        let start = self.segments.iter()
            .position(|segment| segment.right() > x)
            .unwrap_or(self.segments.len());
        let end = self.segments.iter()
            .position(|segment| segment.x >= right)
            .unwrap_or(self.segments.len());

        // Keep whatever sticks out on either side of the new segment.
        let first = self.segments[start];
        let last = self.segments[end - 1];
        let left = (first.x < x).then(|| Segment { x: first.x, width: x - first.x, ..first });
        let rest = (last.right() > right).then(|| Segment { x: right, width: last.right() - right, ..last });

        let segment = Segment { x, width, height };
        self.segments.splice(start..end, [left, Some(segment), rest].into_iter().flatten());
        self.merge();
    }

    fn merge(&mut self) {
        self.segments.dedup_by(|next, prev| {
            if next.height != prev.height {
                return false;
            }
            prev.width += next.width;
            true
        });
    }
}
