//! Helpers for raw NV12/NV21 captures: frame slicing and RGB conversion.
pub mod conversions;
pub mod load_frames;

pub use self::conversions::Layout;
pub use self::load_frames::{FrameGeometry, NvFrame, YuvFile};
