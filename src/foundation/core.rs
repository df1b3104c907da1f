use crate::foundation::math::unit_to_byte;

/// Straight-alpha color with unit-range float channels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red in `[0, 1]`.
    pub r: f32,
    /// Green in `[0, 1]`.
    pub g: f32,
    /// Blue in `[0, 1]`.
    pub b: f32,
    /// Alpha in `[0, 1]`.
    pub a: f32,
}

impl Color {
    /// Create a straight-alpha color.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Premultiply and quantize to RGBA8 bytes (`trunc(v * 255)`, clamped).
    pub fn to_premul_rgba8(self) -> [u8; 4] {
        [
            unit_to_byte(self.r * self.a),
            unit_to_byte(self.g * self.a),
            unit_to_byte(self.b * self.a),
            unit_to_byte(self.a),
        ]
    }
}

/// Texture sampling filter requested from the GPU.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Nearest-texel sampling.
    Nearest,
    /// Bilinear sampling.
    #[default]
    Linear,
}

/// Nibble order used when packing 4-bit-per-channel words.
///
/// The order names channels from the highest nibble down; alpha is always the lowest nibble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// `R,G,B,A`: red in bits 12..16.
    Rgba,
    /// `B,G,R,A`: blue in bits 12..16.
    Bgra,
}

impl ChannelOrder {
    /// Order expected by the GPU drivers of the compilation target.
    ///
    /// Apple and Android drivers take `R,G,B,A`; every other target takes `B,G,R,A`. This split
    /// follows the behaviour of the shipping drivers; set
    /// [`PipelineConfig::channel_order`](crate::PipelineConfig) to force the other order.
    pub fn platform_default() -> Self {
        if cfg!(any(
            target_os = "macos",
            target_os = "ios",
            target_os = "android"
        )) {
            Self::Rgba
        } else {
            Self::Bgra
        }
    }

    /// Pack four 4-bit channels into one word in this order.
    pub fn pack_4444(self, r: u8, g: u8, b: u8, a: u8) -> u16 {
        let (r, g, b, a) = (
            u16::from(r & 0xf),
            u16::from(g & 0xf),
            u16::from(b & 0xf),
            u16::from(a & 0xf),
        );
        match self {
            Self::Rgba => (r << 12) | (g << 8) | (b << 4) | a,
            Self::Bgra => (b << 12) | (g << 8) | (r << 4) | a,
        }
    }
}

impl Default for ChannelOrder {
    fn default() -> Self {
        Self::platform_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
