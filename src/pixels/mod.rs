pub(crate) mod buffer;
pub(crate) mod convert;
pub(crate) mod dither;
pub(crate) mod encoder;
pub(crate) mod scale;
