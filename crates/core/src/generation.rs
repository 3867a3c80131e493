//! Fixed image generation parameters and the provider-neutral request type.
//!
//! The quality parameters are constants rather than user settings: the
//! `quality` field on [`crate::pack::PackSettings`] is stored with the pack
//! but does not reach the image provider.

// ---------------------------------------------------------------------------
// Generation defaults
// ---------------------------------------------------------------------------

/// Output width in pixels.
pub const IMAGE_WIDTH: u32 = 1024;
/// Output height in pixels.
pub const IMAGE_HEIGHT: u32 = 1024;
/// Sampling steps sent with every request.
pub const GENERATION_STEPS: u32 = 30;
/// Classifier-free guidance scale sent with every request.
pub const GUIDANCE_SCALE: f64 = 7.5;
/// Sampler name sent with every request.
pub const SCHEDULER: &str = "DPM++ 2M";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// One image generation call: a prompt and how many images to return.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    pub count: u32,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub guidance_scale: f64,
    pub scheduler: &'static str,
}

impl ImageRequest {
    /// Build a request with the fixed size and quality parameters.
    pub fn new(prompt: impl Into<String>, count: u32) -> Self {
        Self {
            prompt: prompt.into(),
            count,
            width: IMAGE_WIDTH,
            height: IMAGE_HEIGHT,
            steps: GENERATION_STEPS,
            guidance_scale: GUIDANCE_SCALE,
            scheduler: SCHEDULER,
        }
    }

    /// Size in `WIDTHxHEIGHT` form, e.g. `1024x1024`.
    pub fn size(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_uses_fixed_parameters() {
        let request = ImageRequest::new("a hero", 3);
        assert_eq!(request.count, 3);
        assert_eq!(request.size(), "1024x1024");
        assert_eq!(request.steps, 30);
        assert_eq!(request.guidance_scale, 7.5);
        assert_eq!(request.scheduler, "DPM++ 2M");
    }
}
