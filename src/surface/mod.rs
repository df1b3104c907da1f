pub(crate) mod canvas;
pub(crate) mod filters;
pub(crate) mod texture;
