//! Core building blocks: adjustment and crop parameters, the page layout
//! description, and the pure image transforms. These are internal primitives
//! consumed by the high-level `api` module.
pub mod layout;
pub mod params;
pub mod processing;
