use super::ProjectionError;

/// Camera ratios shared by the projection models.
///
/// Every distance is expressed as a multiple of the source width or height, so the camera
/// field of view follows the image shape. The defaults reproduce the reference imagery.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProjectionParams {
    /// Cylinder radius as a multiple of the width.
    pub radius_ratio: f32,
    /// Distance from the camera to the ceiling as a multiple of the height.
    pub ceiling_ratio: f32,
    /// Distance from the camera to the screen for the flat model, as a multiple of the height.
    pub flat_screen_ratio: f32,
    /// Distance from the screen to the flat background, as a multiple of the height.
    pub back_ratio: f32,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            radius_ratio: 0.5,
            ceiling_ratio: 0.75,
            flat_screen_ratio: 2.0,
            back_ratio: 0.5,
        }
    }
}

impl ProjectionParams {
    /// Check that every ratio is finite and within its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidParameter`] naming the first rejected ratio.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        let checks = [
            ("radius_ratio", self.radius_ratio, self.radius_ratio > 0.0),
            ("ceiling_ratio", self.ceiling_ratio, true),
            (
                "flat_screen_ratio",
                self.flat_screen_ratio,
                self.flat_screen_ratio > 0.0,
            ),
            ("back_ratio", self.back_ratio, self.back_ratio >= 0.0),
        ];

        for (name, value, in_range) in checks {
            if !value.is_finite() || !in_range {
                return Err(ProjectionError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}
