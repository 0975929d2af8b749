//! Generation parameters and presets.

use lut_types::{MAX_MATERIALS, MaterialTable, Rgb};
use serde::{Deserialize, Serialize};

use crate::error::{LutError, LutResult};

/// What to do when the target count exceeds the number of distinct stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaddingPolicy {
    /// Pad the tail with the default stack and log a warning.
    ///
    /// Downstream consumers must tolerate duplicate rows.
    #[default]
    Warn,

    /// Refuse to generate; report a configuration error instead.
    Reject,
}

/// Parameters for lookup table generation.
///
/// One immutable value is passed by reference to every stage; nothing reads
/// ambient state.
///
/// # Example
///
/// ```
/// use lut_generate::LutParams;
///
/// let params = LutParams::eight_color();
/// assert_eq!(params.layer_count, 5);
/// assert_eq!(params.target_count, 2738);
/// assert_eq!(params.stack_space_len().unwrap(), 32_768);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LutParams {
    /// Available materials in slot order.
    pub materials: MaterialTable,

    /// Printed layer height, same unit as material transmission distance / 10.
    pub layer_height: f64,

    /// Number of colour layers per stack.
    pub layer_count: usize,

    /// Exact number of rows in the published table.
    pub target_count: usize,

    /// Minimum device-RGB distance between colours accepted by threshold
    /// selection.
    pub distance_threshold: f64,

    /// Substrate colour beneath the bottom layer.
    pub backing_color: Rgb,

    /// Material used for padding rows.
    pub default_material: u8,

    /// Material reported on by diagnostics as "black".
    pub black_material: Option<u8>,

    /// Behaviour when the target exceeds the distinct stack space.
    pub padding: PaddingPolicy,

    /// Mix candidates on the rayon thread pool.
    pub parallel: bool,

    /// Include CIELAB statistics in diagnostics.
    pub perceptual_diagnostics: bool,
}

impl Default for LutParams {
    fn default() -> Self {
        Self::eight_color()
    }
}

impl LutParams {
    /// The eight-colour, five-layer table (37 x 37 x 2 = 2738 rows).
    #[must_use]
    pub fn eight_color() -> Self {
        Self {
            materials: MaterialTable::eight_color(),
            layer_height: 0.08,
            layer_count: 5,
            target_count: 2738,
            distance_threshold: 8.0,
            backing_color: Rgb::WHITE,
            default_material: 0,
            black_material: Some(4),
            padding: PaddingPolicy::Warn,
            parallel: true,
            perceptual_diagnostics: false,
        }
    }

    /// Parameters for an arbitrary material table, with the eight-colour
    /// printing defaults and no designated black.
    #[must_use]
    pub fn with_materials(materials: MaterialTable) -> Self {
        Self {
            materials,
            black_material: None,
            ..Self::eight_color()
        }
    }

    /// Set layer height.
    #[must_use]
    pub const fn with_layer_height(mut self, height: f64) -> Self {
        self.layer_height = height;
        self
    }

    /// Set layers per stack.
    #[must_use]
    pub const fn with_layer_count(mut self, count: usize) -> Self {
        self.layer_count = count;
        self
    }

    /// Set the number of rows to publish.
    #[must_use]
    pub const fn with_target_count(mut self, count: usize) -> Self {
        self.target_count = count;
        self
    }

    /// Set the RGB distance threshold.
    #[must_use]
    pub const fn with_distance_threshold(mut self, threshold: f64) -> Self {
        self.distance_threshold = threshold;
        self
    }

    /// Set the backing colour.
    #[must_use]
    pub const fn with_backing_color(mut self, color: Rgb) -> Self {
        self.backing_color = color;
        self
    }

    /// Set the padding policy.
    #[must_use]
    pub const fn with_padding(mut self, padding: PaddingPolicy) -> Self {
        self.padding = padding;
        self
    }

    /// Enable or disable parallel mixing.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable or disable CIELAB statistics.
    #[must_use]
    pub const fn with_perceptual_diagnostics(mut self, enabled: bool) -> Self {
        self.perceptual_diagnostics = enabled;
        self
    }

    /// Set the material diagnostics treat as black.
    #[must_use]
    pub const fn with_black_material(mut self, id: Option<u8>) -> Self {
        self.black_material = id;
        self
    }

    /// Number of materials.
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Number of distinct stacks, `materials ^ layers`.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::StackSpaceOverflow`] if the count does not fit
    /// in a `u64`.
    pub fn stack_space_len(&self) -> LutResult<u64> {
        let overflow = || LutError::StackSpaceOverflow {
            material_count: self.material_count(),
            layer_count: self.layer_count,
        };
        let base = u64::try_from(self.material_count()).map_err(|_| overflow())?;
        let exp = u32::try_from(self.layer_count).map_err(|_| overflow())?;
        base.checked_pow(exp).ok_or_else(overflow)
    }

    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`LutError`] describing the first problem found.
    pub fn validate(&self) -> LutResult<()> {
        let material_count = self.material_count();
        if material_count == 0 {
            return Err(LutError::EmptyMaterialTable);
        }
        if material_count > MAX_MATERIALS {
            return Err(LutError::TooManyMaterials {
                count: material_count,
            });
        }
        for (id, material) in self.materials.iter() {
            if !material.transmission_distance.is_finite() {
                return Err(LutError::InvalidTransmissionDistance {
                    id,
                    value: material.transmission_distance,
                });
            }
        }
        if self.layer_count == 0 {
            return Err(LutError::ZeroLayers);
        }
        if self.target_count == 0 {
            return Err(LutError::ZeroTarget);
        }
        if self
            .target_count
            .checked_mul(self.layer_count)
            .is_none_or(|cells| cells > isize::MAX.unsigned_abs())
        {
            return Err(LutError::TableTooLarge {
                target: self.target_count,
                layer_count: self.layer_count,
            });
        }
        if !self.layer_height.is_finite() {
            return Err(LutError::InvalidLayerHeight(self.layer_height));
        }
        if !self.distance_threshold.is_finite() || self.distance_threshold < 0.0 {
            return Err(LutError::InvalidThreshold(self.distance_threshold));
        }
        if usize::from(self.default_material) >= material_count {
            return Err(LutError::UnknownMaterial {
                role: "default",
                id: self.default_material,
                material_count,
            });
        }
        if let Some(black) = self.black_material {
            if usize::from(black) >= material_count {
                return Err(LutError::UnknownMaterial {
                    role: "black",
                    id: black,
                    material_count,
                });
            }
        }

        let space = self.stack_space_len()?;
        if self.padding == PaddingPolicy::Reject && target_exceeds(self.target_count, space) {
            return Err(LutError::TargetExceedsStackSpace {
                target: self.target_count,
                space,
            });
        }
        Ok(())
    }
}

/// Whether `target` rows cannot all be distinct stacks.
pub(crate) fn target_exceeds(target: usize, space: u64) -> bool {
    u64::try_from(target).map_or(true, |t| t > space)
}
