//! Core data types shared across the analysis pipeline
//!
//! Every value here is created by one stage, consumed by the next and
//! discarded when the invocation finishes; no stage mutates its input.

use crate::error::{Result, SoftproofError};
use ndarray::Array2;
use palette::Lab;

/// Per-pixel colorimetric difference map, row-major `(height, width)`
pub type DeltaMap = Array2<f32>;

/// Numeric kind of a raw device-space sample
///
/// Closed enumeration of the pixel element types a transform engine can hand
/// back; unknown formats are rejected at the boundary instead of being
/// guessed at later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// Unsigned 8-bit
    U8,
    /// Signed 8-bit
    I8,
    /// Unsigned 16-bit
    U16,
    /// Signed 16-bit
    I16,
    /// Unsigned 32-bit
    U32,
    /// Signed 32-bit
    I32,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
}

impl SampleKind {
    /// Size of one sample in bytes
    #[must_use]
    pub const fn element_size(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }
}

/// Raw raster in an arbitrary device color space (e.g. CMYK)
///
/// Samples are stored row-major with interleaved channels. The buffer length
/// invariant `data.len() == width * height * channels * element_size` is
/// enforced at construction.
#[derive(Debug, Clone)]
pub struct DeviceImage {
    width: u32,
    height: u32,
    channels: usize,
    kind: SampleKind,
    data: Vec<u8>,
}

impl DeviceImage {
    /// Create a device image, validating the buffer-length invariant
    ///
    /// # Errors
    ///
    /// Returns [`SoftproofError::Processing`] when the buffer length does not
    /// match `width * height * channels * element_size`.
    pub fn new(
        width: u32,
        height: u32,
        channels: usize,
        kind: SampleKind,
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = width as usize * height as usize * channels * kind.element_size();
        if data.len() != expected {
            return Err(SoftproofError::processing(format!(
                "device buffer length {} does not match {}x{}x{} ({} bytes expected)",
                data.len(),
                width,
                height,
                channels,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            kind,
            data,
        })
    }

    /// Image width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of interleaved channels per pixel
    #[must_use]
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Sample numeric kind
    #[must_use]
    pub const fn kind(&self) -> SampleKind {
        self.kind
    }

    /// Raw sample buffer
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.data
    }

    /// Total pixel count
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Decode all samples to `f32`, channel-interleaved
    #[must_use]
    pub fn samples_f32(&self) -> Vec<f32> {
        match self.kind {
            SampleKind::U8 => self.data.iter().map(|&v| f32::from(v)).collect(),
            SampleKind::I8 => self.data.iter().map(|&v| f32::from(v as i8)).collect(),
            SampleKind::U16 => self
                .data
                .chunks_exact(2)
                .map(|c| f32::from(u16::from_ne_bytes([c[0], c[1]])))
                .collect(),
            SampleKind::I16 => self
                .data
                .chunks_exact(2)
                .map(|c| f32::from(i16::from_ne_bytes([c[0], c[1]])))
                .collect(),
            SampleKind::U32 => self
                .data
                .chunks_exact(4)
                .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]) as f32)
                .collect(),
            SampleKind::I32 => self
                .data
                .chunks_exact(4)
                .map(|c| i32::from_ne_bytes([c[0], c[1], c[2], c[3]]) as f32)
                .collect(),
            SampleKind::F32 => self
                .data
                .chunks_exact(4)
                .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
            SampleKind::F64 => self
                .data
                .chunks_exact(8)
                .map(|c| {
                    f64::from_ne_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]) as f32
                })
                .collect(),
        }
    }
}

/// Raster specialized to three floating-point Lab channels
///
/// Geometrically aligned 1:1 with the (possibly resized) working image it was
/// derived from.
#[derive(Debug, Clone)]
pub struct LabImage {
    width: u32,
    height: u32,
    pixels: Vec<Lab>,
}

impl LabImage {
    /// Create a Lab image from pre-converted pixels
    ///
    /// # Errors
    ///
    /// Returns [`SoftproofError::Processing`] on a pixel count mismatch.
    pub fn new(width: u32, height: u32, pixels: Vec<Lab>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(SoftproofError::processing(format!(
                "Lab pixel count {} does not match {}x{}",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Lab pixels, row-major
    #[must_use]
    pub fn pixels(&self) -> &[Lab] {
        &self.pixels
    }
}
