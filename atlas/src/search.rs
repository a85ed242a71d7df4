use crate::Placement;
use crate::skyline::{Segment, Skyline};

/// Find the lowest spot on the skyline that fits `width × height` within `bounds`.
///
/// Uses the Skyline Bottom-Left heuristic: the lowest candidate wins, ties go to the leftmost.
/// Only segment starts are tried, since sliding a candidate left to the start of its segment
/// never raises it. `bounds` may exceed the skyline's own size, in which case the extra columns
/// are treated as empty. This lets growth be tried without touching the skyline.
pub fn best_fit(skyline: &Skyline, width: u32, height: u32, bounds: (u32, u32)) -> Option<Placement> {
    let (bound_width, bound_height) = bounds;
    debug_assert!(bound_width >= skyline.width() && bound_height >= skyline.height());

    let tail = (bound_width > skyline.width()).then(|| skyline.width());
    let candidates = skyline.segments().iter()
        .map(|&Segment { x, .. }| x)
        .chain(tail);

    let mut best: Option<Placement> = None;
    for x in candidates {
        if x + width > bound_width {
            break;
        }

        let y = skyline.height_at(x, width);
        if y + height > bound_height {
            continue;
        }
        if best.is_none_or(|best| y < best.y) {
            best = Some(Placement { x, y });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::best_fit;
    use crate::Placement;
    use crate::skyline::Skyline;

    #[test]
    fn empty() {
        let skyline = Skyline::new(8, 8);
        assert_eq!(best_fit(&skyline, 8, 8, (8, 8)), Some(Placement { x: 0, y: 0 }));
        assert_eq!(best_fit(&skyline, 9, 1, (8, 8)), None);
        assert_eq!(best_fit(&skyline, 1, 9, (8, 8)), None);
    }

    #[test]
    fn lowest_first() {
        let mut skyline = Skyline::new(12, 12);
        skyline.occupy(0, 4, 6);
        skyline.occupy(4, 4, 2);
        skyline.occupy(8, 4, 4);
        assert_eq!(best_fit(&skyline, 4, 4, (12, 12)), Some(Placement { x: 4, y: 2 }));

        // Wider requests straddle segments and take the highest one underneath.
        assert_eq!(best_fit(&skyline, 8, 2, (12, 12)), Some(Placement { x: 4, y: 4 }));
    }

    #[test]
    fn ties_go_left() {
        let mut skyline = Skyline::new(12, 12);
        skyline.occupy(0, 3, 2);
        skyline.occupy(3, 3, 5);
        skyline.occupy(6, 3, 2);
        skyline.occupy(9, 3, 5);
        assert_eq!(best_fit(&skyline, 3, 3, (12, 12)), Some(Placement { x: 0, y: 2 }));
    }

    #[test]
    fn too_tall() {
        let mut skyline = Skyline::new(8, 8);
        skyline.occupy(0, 4, 6);
        skyline.occupy(4, 4, 7);
        assert_eq!(best_fit(&skyline, 2, 2, (8, 8)), Some(Placement { x: 0, y: 6 }));
        assert_eq!(best_fit(&skyline, 2, 3, (8, 8)), None);
    }

    #[test]
    fn larger_bounds() {
        let mut skyline = Skyline::new(4, 4);
        skyline.occupy(0, 4, 4);
        assert_eq!(best_fit(&skyline, 4, 4, (4, 4)), None);
        assert_eq!(best_fit(&skyline, 4, 4, (8, 4)), Some(Placement { x: 4, y: 0 }));
        assert_eq!(best_fit(&skyline, 4, 4, (4, 8)), Some(Placement { x: 0, y: 4 }));
    }
}
