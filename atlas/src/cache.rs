use tracing::debug;

use crate::{Atlas, Error, Placement};

/// CPU-side RGBA8 surface backing an atlas.
pub struct Texture {
    pub size: (u32, u32),
    pub data: Vec<u8>,
}

/// A region of the texture holding one inserted image.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Image {
    pub pos: (u32, u32),
    pub size: (u32, u32),
}

/// Image cache that keeps its texture the same size as its atlas.
pub struct Cache {
    atlas: Atlas,
    initial_size: (u32, u32),
    texture: Texture,
    images: Vec<Image>,
    area: u64,
}

impl Texture {
    fn new(size: (u32, u32)) -> Texture {
        let (width, height) = size;
        let mut data = Vec::default();
        data.resize_with(width as usize * height as usize * 4, u8::default);
        Texture { size, data }
    }

    /// Resize to `size`, keeping every existing pixel at the same position.
    fn grow(&mut self, size: (u32, u32)) {
        let (width, height) = size;
        let (old_width, old_height) = self.size;
        debug_assert!(width >= old_width && height >= old_height);

        // Rows stay contiguous when only the height changes.
        let len = width as usize * height as usize * 4;
        if width == old_width {
            self.data.resize_with(len, u8::default);
            self.size = size;
            return;
        }

        let mut data = Vec::default();
        data.resize_with(len, u8::default);
        let stride = width as usize * 4;
        for (i, row) in self.data.chunks_exact(old_width as usize * 4).take(old_height as usize).enumerate() {
            let start = i * stride;
            data[start..start + row.len()].copy_from_slice(row);
        }
        self.data = data;
        self.size = size;
    }

    fn blit(&mut self, pos: (u32, u32), size: (u32, u32), data: &[u8]) {
        let (x, y) = pos;
        let (width, _) = size;
        let (texture_width, _) = self.size;
        for (i, row) in data.chunks_exact(width as usize * 4).enumerate() {
            let start = (y as usize + i) * (texture_width as usize * 4) + (x as usize * 4);
            self.data[start..start + row.len()].copy_from_slice(row);
        }
    }
}

impl Cache {
    /// Create a cache starting from a `1 × 1` texture.
    pub fn new(max_size: u32) -> Result<Cache, Error> {
        Cache::with_size(max_size, 1, 1)
    }

    pub fn with_size(max_size: u32, width: u32, height: u32) -> Result<Cache, Error> {
        let mut atlas = Atlas::new(max_size)?;
        if width == 0 || height == 0 || width > max_size || height > max_size {
            return Err(Error::InitialSize { width, height, max_size });
        }
        atlas.reset(width, height);

        let initial_size = (width, height);
        let texture = Texture::new(initial_size);
        Ok(Cache { atlas, initial_size, texture, images: Vec::default(), area: 0 })
    }

    pub fn atlas(&self) -> &Atlas { &self.atlas }
    pub fn texture(&self) -> &Texture { &self.texture }
    pub fn images(&self) -> &[Image] { &self.images[..] }
    pub fn len(&self) -> usize { self.images.len() }
    pub fn is_empty(&self) -> bool { self.images.is_empty() }

    /// Copy a tightly packed RGBA8 image into the atlas.
    pub fn insert(&mut self, size: (u32, u32), data: &[u8]) -> Result<Image, Error> {
        let (width, height) = size;
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Error::DataLength { expected, len: data.len() });
        }

        let Placement { x, y } = self.atlas.add_rect(width, height)?;
        let draw_size = self.atlas.draw_size();
        if draw_size != self.texture.size {
            debug!(
                from_width = self.texture.size.0, from_height = self.texture.size.1,
                width = draw_size.0, height = draw_size.1,
                "grow texture"
            );
            self.texture.grow(draw_size);
        }

        let image = Image { pos: (x, y), size };
        self.texture.blit(image.pos, size, data);
        self.images.push(image);
        self.area += u64::from(width) * u64::from(height);
        Ok(image)
    }

    /// Drop every image and shrink back to the initial size.
    pub fn clear(&mut self) {
        let (width, height) = self.initial_size;
        self.atlas.reset(width, height);
        self.texture = Texture::new(self.initial_size);
        self.images.clear();
        self.area = 0;
    }

    /// Fraction of the texture covered by images.
    pub fn utilization(&self) -> f32 {
        let (width, height) = self.texture.size;
        self.area as f32 / (u64::from(width) * u64::from(height)) as f32
    }
}
