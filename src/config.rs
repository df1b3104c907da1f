use crate::foundation::core::{ChannelOrder, FilterMode};
use crate::foundation::error::{PixelError, PixelResult};

/// Pipeline-wide settings for converters and surfaces.
///
/// Every field has a default, so a partial (or empty) JSON object is valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Nibble order for 4444 packing. Defaults to [`ChannelOrder::platform_default`].
    pub channel_order: ChannelOrder,
    /// Route 4444/565 targets through the built-in Floyd-Steinberg ditherer.
    pub dither: bool,
    /// Minification filter for new surfaces.
    pub min_filter: FilterMode,
    /// Magnification filter for new surfaces.
    pub mag_filter: FilterMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel_order: ChannelOrder::platform_default(),
            dither: true,
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON configuration object.
    pub fn from_json_str(json: &str) -> PixelResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| PixelError::config(format!("invalid pipeline config: {e}")))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> PixelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PixelError::config(format!("serialize pipeline config: {e}")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
