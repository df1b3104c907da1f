use std::ops::{Deref, DerefMut};

use crate::config::PipelineConfig;
use crate::format::FormatTag;
use crate::foundation::core::{Color, FilterMode};
use crate::foundation::error::{PixelError, PixelResult};
use crate::pixels::buffer::PixelBuffer;
use crate::surface::filters::{
    color_fill_rgba8_in_place, gaussian_blur_rgba8_in_place, rgba8_len, unpremultiply_rgba8,
};
use crate::surface::texture::{MemoryTexture, Texture, TextureFactory};

/// Deferred draw operation: receives the premultiplied RGBA8 store and its dimensions.
pub type DrawOp = Box<dyn FnOnce(&mut [u8], u32, u32) + Send>;

/// Mutable premultiplied RGBA8 drawing target backed by one lazily created texture.
pub struct Surface<T = MemoryTexture> {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    min_filter: FilterMode,
    mag_filter: FilterMode,
    texture: Option<T>,
    pending: Vec<DrawOp>,
    dirty: bool,
}

/// [`Surface`] uploading into [`MemoryTexture`].
pub type MemorySurface = Surface<MemoryTexture>;

/// Exclusive write access to a surface's pixel store.
///
/// Dereferences to the RGBA8 bytes. Dropping the guard releases the lock and marks the surface
/// dirty.
pub struct SurfaceLock<'a> {
    pixels: &'a mut [u8],
    dirty: &'a mut bool,
}

impl Deref for SurfaceLock<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.pixels
    }
}

impl DerefMut for SurfaceLock<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.pixels
    }
}

impl Drop for SurfaceLock<'_> {
    fn drop(&mut self) {
        *self.dirty = true;
    }
}

impl<T: Texture> Surface<T> {
    /// Transparent `width x height` surface with linear filters.
    pub fn new(width: u32, height: u32) -> PixelResult<Self> {
        Self::with_config(width, height, &PipelineConfig::default())
    }

    /// Transparent surface taking its filters from `cfg`.
    pub fn with_config(width: u32, height: u32, cfg: &PipelineConfig) -> PixelResult<Self> {
        let pixels = zeroed_store(width, height)?;
        Ok(Self {
            width,
            height,
            pixels,
            min_filter: cfg.min_filter,
            mag_filter: cfg.mag_filter,
            texture: None,
            pending: Vec::new(),
            dirty: false,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Minification filter for the texture.
    pub fn min_filter(&self) -> FilterMode {
        self.min_filter
    }

    /// Magnification filter for the texture.
    pub fn mag_filter(&self) -> FilterMode {
        self.mag_filter
    }

    /// Takes effect when the texture is created; an existing texture keeps its filters.
    pub fn set_min_filter(&mut self, mode: FilterMode) {
        self.min_filter = mode;
    }

    /// Takes effect when the texture is created; an existing texture keeps its filters.
    pub fn set_mag_filter(&mut self, mode: FilterMode) {
        self.mag_filter = mode;
    }

    /// Whether the store changed since the last texture upload.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The texture, once [`Surface::update_texture`] has created it.
    pub fn texture(&self) -> Option<&T> {
        self.texture.as_ref()
    }

    /// Lock the store for writing.
    pub fn lock_memory(&mut self) -> SurfaceLock<'_> {
        SurfaceLock {
            pixels: &mut self.pixels,
            dirty: &mut self.dirty,
        }
    }

    /// Lock the store for reading.
    pub fn lock_memory_read(&self) -> &[u8] {
        &self.pixels
    }

    /// Queue a draw operation to run on the next [`Surface::flush`].
    pub fn queue_draw(&mut self, op: impl FnOnce(&mut [u8], u32, u32) + Send + 'static) {
        self.pending.push(Box::new(op));
    }

    /// Number of queued draw operations.
    pub fn pending_draws(&self) -> usize {
        self.pending.len()
    }

    /// Run queued draw operations in submission order.
    pub fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let (w, h) = (self.width, self.height);
        let ops = std::mem::take(&mut self.pending);
        tracing::trace!(ops = ops.len(), "flushing draws");
        let mut lock = self.lock_memory();
        for op in ops {
            op(&mut *lock, w, h);
        }
    }

    /// Replace the store with a transparent `width x height` one.
    ///
    /// An existing texture is resized in place. Queued draws stay queued and run against the new
    /// store.
    pub fn resize(&mut self, width: u32, height: u32) -> PixelResult<()> {
        self.pixels = zeroed_store(width, height)?;
        self.width = width;
        self.height = height;
        if let Some(texture) = self.texture.as_mut() {
            texture.set_width(width);
            texture.set_height(height);
        }
        self.dirty = true;
        Ok(())
    }

    /// Separable Gaussian blur of the store (see [`gaussian_blur_rgba8_in_place`]).
    #[tracing::instrument(skip(self), fields(width = self.width, height = self.height))]
    pub fn gaussian_blur(&mut self, hradius: f32, vradius: f32) -> PixelResult<()> {
        let (w, h) = (self.width, self.height);
        let mut lock = self.lock_memory();
        gaussian_blur_rgba8_in_place(&mut lock, w, h, hradius, vradius)
    }

    /// Tint every pixel with `color` inside its existing alpha coverage.
    pub fn color_fill(&mut self, color: Color) {
        let mut lock = self.lock_memory();
        color_fill_rgba8_in_place(&mut lock, color);
    }

    /// Flush, then upload a straight-alpha copy of the store.
    ///
    /// The texture is created through `factory` on the first call, with the surface's current
    /// filters. The store itself stays premultiplied.
    pub fn update_texture<F>(&mut self, factory: &mut F) -> PixelResult<&T>
    where
        F: TextureFactory<Texture = T>,
    {
        self.flush();

        let texture = match self.texture.take() {
            Some(texture) => texture,
            None => {
                tracing::debug!(
                    width = self.width,
                    height = self.height,
                    min_filter = ?self.min_filter,
                    mag_filter = ?self.mag_filter,
                    "creating texture"
                );
                factory.create_texture(self.width, self.height, self.min_filter, self.mag_filter)?
            }
        };
        let texture = self.texture.insert(texture);

        let straight = unpremultiply_rgba8(&self.pixels);
        texture.update_data(&straight)?;
        self.dirty = false;
        Ok(&*texture)
    }

    /// Straight-alpha single-level [`FormatTag::Rgba8`] snapshot of the store.
    pub fn to_pixel_buffer(&self) -> PixelResult<PixelBuffer> {
        PixelBuffer::from_bytes(
            FormatTag::Rgba8,
            self.width,
            self.height,
            1,
            0,
            unpremultiply_rgba8(&self.pixels),
        )
    }
}

fn zeroed_store(width: u32, height: u32) -> PixelResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(PixelError::invalid_argument(format!(
            "surface dimensions must be non-zero, got {width}x{height}"
        )));
    }
    Ok(vec![0u8; rgba8_len(width, height)?])
}

#[cfg(test)]
#[path = "../../tests/unit/surface/canvas.rs"]
mod tests;
