//! Dynamic texture atlas allocation.
//!
//! [`Atlas`] packs rectangles online into a surface that starts small and grows on demand up
//! to a fixed maximum. [`Cache`] pairs it with a CPU-side RGBA texture that follows that growth.

pub use crate::atlas::Atlas;
pub use crate::cache::{Cache, Image, Texture};

mod atlas;
mod cache;
pub mod search;
pub mod skyline;

/// Largest supported atlas side, so that coordinates fit in the 16-bit halves of a packed
/// placement.
pub const MAX_ATLAS_SIZE: u32 = 1 << 16;

/// Packed form of a failed placement.
pub const PACKED_FAILURE: i32 = -1;

/// Top-left corner of a reserved rectangle.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
}

impl Placement {
    /// Encode as `(y << 16) | x`, for hosts without tuple returns.
    ///
    /// A placement at `(65535, 65535)` packs to the same bits as [`PACKED_FAILURE`].
    pub fn pack(self) -> i32 {
        debug_assert!(self.x < MAX_ATLAS_SIZE && self.y < MAX_ATLAS_SIZE);
        ((self.y << 16) | self.x) as i32
    }

    pub fn unpack(packed: i32) -> Option<Placement> {
        if packed == PACKED_FAILURE {
            return None;
        }
        let packed = packed as u32;
        Some(Placement { x: packed & 0xffff, y: packed >> 16 })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("atlas size {0} is outside 1..={max}", max = MAX_ATLAS_SIZE)]
    MaxSize(u32),
    #[error("initial size {width}x{height} is outside 1..={max_size}")]
    InitialSize { width: u32, height: u32, max_size: u32 },
    #[error("cannot place an empty {width}x{height} rectangle")]
    Empty { width: u32, height: u32 },
    #[error("{width}x{height} rectangle exceeds the maximum atlas size {max_size}")]
    TooLarge { width: u32, height: u32, max_size: u32 },
    #[error("no room left for a {width}x{height} rectangle")]
    OutOfSpace { width: u32, height: u32 },
    #[error("expected {expected} bytes of image data, got {len}")]
    DataLength { expected: usize, len: usize },
}
