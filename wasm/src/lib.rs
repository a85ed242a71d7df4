//! JavaScript bindings for the atlas allocator.
//!
//! Placements cross the boundary packed into a single integer as `(y << 16) | x`, with `-1`
//! for failure, so the renderer can test and fall back without allocating.

use tracing::warn;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use atlas::{Atlas, Error, PACKED_FAILURE};

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct DynamicRectanizer {
    atlas: Atlas,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl DynamicRectanizer {
    #[wasm_bindgen(constructor)]
    pub fn construct(max_atlas_size: i32) -> Result<DynamicRectanizer, JsError> {
        DynamicRectanizer::new(max_atlas_size).map_err(|error| JsError::new(&error.to_string()))
    }
}

impl DynamicRectanizer {
    pub fn new(max_atlas_size: i32) -> Result<DynamicRectanizer, Error> {
        let max_size = u32::try_from(max_atlas_size).unwrap_or(0);
        Ok(DynamicRectanizer { atlas: Atlas::new(max_size)? })
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl DynamicRectanizer {
    /// Forget every placement and start over at `initial_width × initial_height`.
    pub fn reset(&mut self, initial_width: i32, initial_height: i32) {
        let max_size = self.atlas.max_size();
        let valid = |size: i32| u32::try_from(size).is_ok_and(|size| size >= 1 && size <= max_size);
        if !valid(initial_width) || !valid(initial_height) {
            warn!(initial_width, initial_height, max_size, "ignoring out of range atlas reset");
            return;
        }
        self.atlas.reset(initial_width as u32, initial_height as u32);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(js_name = addRect))]
    pub fn add_rect(&mut self, width: i32, height: i32) -> i32 {
        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            return PACKED_FAILURE;
        };
        match self.atlas.add_rect(width, height) {
            Ok(placement) => placement.pack(),
            Err(_) => PACKED_FAILURE,
        }
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(js_name = drawWidth))]
    pub fn draw_width(&self) -> i32 { self.atlas.draw_width() as i32 }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(js_name = drawHeight))]
    pub fn draw_height(&self) -> i32 { self.atlas.draw_height() as i32 }
}
