use std::fs::File;
use std::{io, ops};

use memmap::Mmap;

fn invalid_input(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}

/// Dimensions of 4:2:0 semi-planar frames
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FrameGeometry {
    pub width: usize,
    pub height: usize,
}

impl FrameGeometry {
    /// Both dimensions must be non-zero and even, otherwise chroma samples
    /// can't be shared by 2x2 luma blocks.
    pub fn new(width: u32, height: u32) -> io::Result<Self> {
        if width == 0 || height == 0 {
            Err(invalid_input(format!(
                "frame size must be positive: {}x{}", width, height,
            )))?
        }
        if width % 2 != 0 || height % 2 != 0 {
            Err(invalid_input(format!(
                "frame size must be even: {}x{}", width, height,
            )))?
        }
        // RGB output needs `3*width*height` bytes, the largest derived size
        let rgb_size = (width as usize).checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3));
        if rgb_size.is_none() {
            Err(invalid_input(format!(
                "frame size too large: {}x{}", width, height,
            )))?
        }
        Ok(Self { width: width as usize, height: height as usize })
    }

    pub fn luma_size(&self) -> usize {
        self.width*self.height
    }

    /// Frame size in bytes, i.e. `width*height*1.5`
    pub fn frame_size(&self) -> usize {
        self.width*self.height*3/2
    }

    /// Number of whole frames which fit into `len` bytes. Trailing bytes are
    /// ignored.
    pub fn frame_count(&self, len: usize) -> usize {
        len / self.frame_size()
    }

    /// Byte range of frame `index` inside the input buffer
    pub fn frame_range(&self, index: usize) -> ops::Range<usize> {
        let offset = index*self.frame_size();
        offset..offset + self.frame_size()
    }
}

/// Read-only view over a single NV12/NV21 frame: `height` rows of luma
/// followed by `height/2` rows of interleaved chroma pairs.
#[derive(Copy, Clone, Debug)]
pub struct NvFrame<'a> {
    luma: &'a [u8],
    chroma: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> NvFrame<'a> {
    pub fn new(data: &'a [u8], geometry: FrameGeometry) -> io::Result<Self> {
        if data.len() != geometry.frame_size() {
            Err(io::Error::new(io::ErrorKind::InvalidData, format!(
                "frame buffer has {} bytes, expected {}",
                data.len(), geometry.frame_size(),
            )))?
        }
        Ok(Self::split(data, geometry))
    }

    fn split(data: &'a [u8], geometry: FrameGeometry) -> Self {
        debug_assert_eq!(data.len(), geometry.frame_size());
        let (luma, chroma) = data.split_at(geometry.luma_size());
        Self {
            luma, chroma,
            width: geometry.width,
            height: geometry.height,
            stride: geometry.width,
        }
    }

    pub fn width(&self) -> usize { self.width }

    pub fn height(&self) -> usize { self.height }

    pub fn stride(&self) -> usize { self.stride }

    /// Luma samples of row `y`
    pub fn luma_row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height, "luma row out of bounds");
        let pos = y*self.stride;
        &self.luma[pos..pos + self.width]
    }

    /// Interleaved chroma pairs shared by luma row `y` and its neighbour
    pub fn chroma_row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height, "chroma row out of bounds");
        let pos = (y/2)*self.stride;
        &self.chroma[pos..pos + self.width]
    }
}

/// Memory mapped raw capture consisting of back-to-back frames
pub struct YuvFile {
    mmap: Mmap,
    geometry: FrameGeometry,
}

impl YuvFile {
    /// Maps `file` read-only. The file must hold at least one whole frame.
    pub fn map(file: &File, geometry: FrameGeometry) -> io::Result<Self> {
        let mmap = unsafe { Mmap::map(file)? };
        if mmap.len() < geometry.frame_size() {
            Err(io::Error::new(io::ErrorKind::InvalidData, format!(
                "file has {} bytes, frame needs {}",
                mmap.len(), geometry.frame_size(),
            )))?
        }
        Ok(Self { mmap, geometry })
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    pub fn frame_count(&self) -> usize {
        self.geometry.frame_count(self.len())
    }

    pub fn frame(&self, index: usize) -> Option<NvFrame<'_>> {
        if index >= self.frame_count() { return None; }
        let data = &self.mmap[self.geometry.frame_range(index)];
        Some(NvFrame::split(data, self.geometry))
    }

    /// Iterates over all whole frames in file order
    pub fn frames(&self) -> impl Iterator<Item=NvFrame<'_>> {
        let geometry = self.geometry;
        self.mmap.chunks_exact(geometry.frame_size())
            .map(move |chunk| NvFrame::split(chunk, geometry))
    }
}
