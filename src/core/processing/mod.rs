//! Pure image transforms: border crop, bleed extension, tone adjustment,
//! resizing, page composition and pagination.
pub mod adjust;
pub mod bleed;
pub mod compose;
pub mod crop;
pub mod paginate;
pub mod resize;
