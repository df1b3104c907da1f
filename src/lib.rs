//! Pixel/texture data pipeline for a software 2D canvas.
//!
//! The crate covers the part of a canvas engine that works on raw pixels:
//!
//! - [`PixelBuffer`]: owned image storage in one of the [`FormatTag`] formats, with a full mip
//!   chain when requested, plus the size/offset arithmetic behind it
//! - [`Converter`]: format conversion, including block compression through a pluggable
//!   [`BlockEncoder`] and 16-bit packing through a [`Ditherer`]
//! - [`PixelBuffer::scale`] / [`PixelBuffer::create_mipmaps`]: resampling and box-filtered mips
//! - [`Surface`]: a premultiplied RGBA8 drawing target with Gaussian blur, coverage fill, and
//!   straight-alpha upload to a [`Texture`]
//!
//! Every transform returns a fresh buffer; failures are reported as [`PixelError`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod format;
mod foundation;
mod pixels;
mod surface;

pub use crate::config::PipelineConfig;
pub use crate::format::{Compression, FormatDescriptor, FormatTag};
pub use crate::foundation::core::{ChannelOrder, Color, FilterMode};
pub use crate::foundation::error::{PixelError, PixelResult};

pub use crate::pixels::buffer::{
    PixelBuffer, calculate_offset, calculate_size, level_dims, level_size,
};
pub use crate::pixels::convert::Converter;
pub use crate::pixels::dither::{Ditherer, FloydSteinberg};
pub use crate::pixels::encoder::BlockEncoder;
pub use crate::pixels::scale::{ImageResampler, Resampler};

pub use crate::surface::canvas::{DrawOp, MemorySurface, Surface, SurfaceLock};
pub use crate::surface::filters::{
    color_fill_rgba8_in_place, gaussian_blur_rgba8_in_place, gaussian_kernel, unpremultiply_rgba8,
};
pub use crate::surface::texture::{MemoryTexture, MemoryTextureFactory, Texture, TextureFactory};
