//! ICC transform stage
//!
//! Drives lcms2 to produce the three rasters the analysis needs from one
//! working image: the original's Lab rendition under the input profile, the
//! device-space proof under the output profile, and the proof's Lab rendition
//! back through a perceptual reference space (sRGB). The same rendering
//! intent and black-point-compensation flag apply to every transform in the
//! chain.

use crate::config::{AnalysisConfig, ProfileRef};
use crate::error::{Result, SoftproofError};
use crate::types::{DeviceImage, LabImage, SampleKind};
use image::RgbImage;
use lcms2::{ColorSpaceSignature, Flags, InfoType, Locale, PixelFormat, Profile, Transform};
use log::debug;
use palette::{IntoColor, Lab, Srgb};

/// Device color-space traits derived from the output profile
#[derive(Debug, Clone, Copy)]
struct DeviceSpace {
    label: &'static str,
    channels: usize,
    format: PixelFormat,
}

fn device_space(signature: ColorSpaceSignature) -> Result<DeviceSpace> {
    let space = match signature {
        ColorSpaceSignature::GrayData => DeviceSpace {
            label: "GRAY",
            channels: 1,
            format: PixelFormat::GRAY_8,
        },
        ColorSpaceSignature::RgbData => DeviceSpace {
            label: "RGB",
            channels: 3,
            format: PixelFormat::RGB_8,
        },
        ColorSpaceSignature::CmyData => DeviceSpace {
            label: "CMY",
            channels: 3,
            format: PixelFormat::CMY_8,
        },
        ColorSpaceSignature::CmykData => DeviceSpace {
            label: "CMYK",
            channels: 4,
            format: PixelFormat::CMYK_8,
        },
        other => {
            return Err(SoftproofError::transform(format!(
                "unsupported device color space {other:?}"
            )))
        },
    };
    Ok(space)
}

fn open_profile(profile: &ProfileRef) -> Result<Profile> {
    match profile {
        ProfileRef::Srgb => Ok(Profile::new_srgb()),
        ProfileRef::File(path) => Profile::new_file(path).map_err(|e| {
            SoftproofError::transform(format!(
                "cannot open ICC profile {}: {}",
                path.display(),
                e
            ))
        }),
    }
}

/// All color conversions for one analysis invocation
///
/// Profiles are opened once at construction; each conversion builds its own
/// lcms2 transform from them.
#[derive(Debug)]
pub struct ProofTransformer {
    input: Profile,
    output: Profile,
    srgb: Profile,
    intent: lcms2::Intent,
    black_point_compensation: bool,
    device: DeviceSpace,
}

impl ProofTransformer {
    /// Open the configured profiles and inspect the output device space
    ///
    /// # Errors
    ///
    /// Returns [`SoftproofError::Transform`] when a profile cannot be opened,
    /// the input profile is not RGB, or the output device space has no 8-bit
    /// pixel layout.
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        let input = open_profile(&config.input_profile)?;
        if input.color_space() != ColorSpaceSignature::RgbData {
            return Err(SoftproofError::transform(format!(
                "input profile must be RGB, got {:?}",
                input.color_space()
            )));
        }

        let output = open_profile(&config.output_profile)?;
        let device = device_space(output.color_space())?;
        debug!(
            "output profile device space {} ({} channels)",
            device.label, device.channels
        );

        Ok(Self {
            input,
            output,
            srgb: Profile::new_srgb(),
            intent: config.intent.to_lcms(),
            black_point_compensation: config.black_point_compensation,
            device,
        })
    }

    /// Number of channels in the output device space
    #[must_use]
    pub fn device_channels(&self) -> usize {
        self.device.channels
    }

    /// Short label of the output device space (`RGB`, `CMYK`, ...)
    #[must_use]
    pub fn device_color_space(&self) -> &'static str {
        self.device.label
    }

    /// Description text embedded in the output profile, when present
    #[must_use]
    pub fn output_description(&self) -> Option<String> {
        self.output
            .info(InfoType::Description, Locale::none())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn flags(&self) -> Flags {
        if self.black_point_compensation {
            Flags::BLACKPOINT_COMPENSATION
        } else {
            Flags::default()
        }
    }

    /// Render the working image into sRGB under the input profile
    ///
    /// # Errors
    ///
    /// Returns [`SoftproofError::Transform`] when lcms2 rejects the
    /// conversion.
    pub fn original_srgb(&self, image: &RgbImage) -> Result<Vec<u8>> {
        let transform: Transform<u8, u8> = Transform::new_flags(
            &self.input,
            PixelFormat::RGB_8,
            &self.srgb,
            PixelFormat::RGB_8,
            self.intent,
            self.flags(),
        )
        .map_err(|e| SoftproofError::transform(format!("input->sRGB: {e}")))?;

        let mut out = vec![0u8; image.as_raw().len()];
        transform.transform_pixels(image.as_raw(), &mut out);
        Ok(out)
    }

    /// Simulate the device reproduction: working image through input→output
    ///
    /// # Errors
    ///
    /// Returns [`SoftproofError::Transform`] when lcms2 rejects the
    /// conversion.
    pub fn proof_device(&self, image: &RgbImage) -> Result<DeviceImage> {
        let transform: Transform<u8, u8> = Transform::new_flags(
            &self.input,
            PixelFormat::RGB_8,
            &self.output,
            self.device.format,
            self.intent,
            self.flags(),
        )
        .map_err(|e| SoftproofError::transform(format!("input->output: {e}")))?;

        let (width, height) = image.dimensions();
        let mut out = vec![0u8; width as usize * height as usize * self.device.channels];
        transform.transform_pixels(image.as_raw(), &mut out);
        DeviceImage::new(width, height, self.device.channels, SampleKind::U8, out)
    }

    /// Render the device-space proof back into sRGB under the output profile
    ///
    /// # Errors
    ///
    /// Returns [`SoftproofError::Transform`] when lcms2 rejects the
    /// conversion.
    pub fn proof_srgb(&self, proof: &DeviceImage) -> Result<Vec<u8>> {
        let transform: Transform<u8, u8> = Transform::new_flags(
            &self.output,
            self.device.format,
            &self.srgb,
            PixelFormat::RGB_8,
            self.intent,
            self.flags(),
        )
        .map_err(|e| SoftproofError::transform(format!("output->sRGB: {e}")))?;

        let mut out = vec![0u8; proof.pixel_count() * 3];
        transform.transform_pixels(proof.raw(), &mut out);
        Ok(out)
    }
}

/// Convert an interleaved sRGB8 buffer into a Lab image
///
/// This is the `toLab` half of the transform stage: a plain colorspace
/// conversion out of the perceptual reference space, no profiles involved.
///
/// # Errors
///
/// Returns [`SoftproofError::Processing`] when the buffer is not
/// `width * height * 3` bytes.
pub fn lab_from_srgb8(width: u32, height: u32, srgb: &[u8]) -> Result<LabImage> {
    if srgb.len() != width as usize * height as usize * 3 {
        return Err(SoftproofError::processing(format!(
            "sRGB buffer length {} does not match {}x{}x3",
            srgb.len(),
            width,
            height
        )));
    }
    let pixels: Vec<Lab> = srgb
        .chunks_exact(3)
        .map(|px| {
            Srgb::new(px[0], px[1], px[2])
                .into_format::<f32>()
                .into_color()
        })
        .collect();
    LabImage::new(width, height, pixels)
}
