use crate::foundation::core::FilterMode;
use crate::foundation::error::{PixelError, PixelResult};
use crate::surface::filters::rgba8_len;

/// GPU-side texture handle fed by [`crate::Surface::update_texture`].
pub trait Texture {
    /// Current width in texels.
    fn width(&self) -> u32;
    /// Current height in texels.
    fn height(&self) -> u32;
    /// Resize in place.
    fn set_width(&mut self, width: u32);
    /// Resize in place.
    fn set_height(&mut self, height: u32);
    /// Upload straight-alpha RGBA8 texels covering the whole texture.
    fn update_data(&mut self, rgba: &[u8]) -> PixelResult<()>;
}

/// Creates [`Texture`]s on first upload.
pub trait TextureFactory {
    /// Texture type produced by this factory.
    type Texture: Texture;

    /// Create a `width x height` texture sampled with the given filters.
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        min_filter: FilterMode,
        mag_filter: FilterMode,
    ) -> PixelResult<Self::Texture>;
}

/// In-memory [`Texture`] that keeps the last upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryTexture {
    width: u32,
    height: u32,
    min_filter: FilterMode,
    mag_filter: FilterMode,
    data: Vec<u8>,
    uploads: usize,
}

impl MemoryTexture {
    /// Empty texture with no uploads yet.
    pub fn new(width: u32, height: u32, min_filter: FilterMode, mag_filter: FilterMode) -> Self {
        Self {
            width,
            height,
            min_filter,
            mag_filter,
            data: Vec::new(),
            uploads: 0,
        }
    }

    /// Minification filter given at creation.
    pub fn min_filter(&self) -> FilterMode {
        self.min_filter
    }

    /// Magnification filter given at creation.
    pub fn mag_filter(&self) -> FilterMode {
        self.mag_filter
    }

    /// Bytes of the most recent upload (empty before the first one).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of successful uploads.
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

impl Texture for MemoryTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    fn update_data(&mut self, rgba: &[u8]) -> PixelResult<()> {
        let expected = rgba8_len(self.width, self.height)?;
        if rgba.len() != expected {
            return Err(PixelError::invalid_argument(format!(
                "texture upload expects {expected} bytes for {}x{}, got {}",
                self.width,
                self.height,
                rgba.len()
            )));
        }
        self.data.clear();
        self.data.extend_from_slice(rgba);
        self.uploads += 1;
        Ok(())
    }
}

/// [`TextureFactory`] producing [`MemoryTexture`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryTextureFactory {
    created: usize,
}

impl MemoryTextureFactory {
    /// Number of textures created so far.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl TextureFactory for MemoryTextureFactory {
    type Texture = MemoryTexture;

    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        min_filter: FilterMode,
        mag_filter: FilterMode,
    ) -> PixelResult<MemoryTexture> {
        self.created += 1;
        Ok(MemoryTexture::new(width, height, min_filter, mag_filter))
    }
}
