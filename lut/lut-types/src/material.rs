//! Printable materials and the material table.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{TableError, TableResult};

/// Largest number of materials a table can hold (ids are `u8`).
pub const MAX_MATERIALS: usize = 256;

/// A printable filament.
///
/// The transmission distance is the thickness, in tenths of the layer-height
/// unit, needed to fully hide whatever is printed beneath. Lower values are
/// more opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Display name.
    pub name: String,

    /// Base color of a fully opaque slab.
    pub color: Rgb,

    /// Transmission distance (TD) as printed on the spool.
    pub transmission_distance: f64,
}

impl Material {
    /// Create a new material.
    #[must_use]
    pub fn new(name: impl Into<String>, color: Rgb, transmission_distance: f64) -> Self {
        Self {
            name: name.into(),
            color,
            transmission_distance,
        }
    }

    /// Opacity of a single layer of this material at the given layer height.
    ///
    /// Always in `[0, 1]`; a non-positive transmission distance is fully
    /// opaque.
    ///
    /// # Example
    ///
    /// ```
    /// use lut_types::{Material, Rgb};
    ///
    /// let black = Material::new("Black", Rgb::BLACK, 0.6);
    /// assert_eq!(black.alpha(0.08), 1.0);
    /// ```
    #[must_use]
    pub fn alpha(&self, layer_height: f64) -> f64 {
        layer_alpha(self.transmission_distance, layer_height)
    }
}

/// Opacity of one layer of `layer_height` for a material with the given
/// transmission distance.
///
/// `alpha = clamp(layer_height / (td / 10), 0, 1)`, and `1` when `td <= 0`.
///
/// # Example
///
/// ```
/// use lut_types::layer_alpha;
///
/// assert!((layer_alpha(4.0, 0.08) - 0.2).abs() < 1e-12);
/// assert_eq!(layer_alpha(0.0, 0.08), 1.0);
/// assert_eq!(layer_alpha(-1.0, 0.08), 1.0);
/// ```
#[must_use]
pub fn layer_alpha(transmission_distance: f64, layer_height: f64) -> f64 {
    let blending_distance = transmission_distance / 10.0;
    if blending_distance <= 0.0 {
        return 1.0;
    }
    (layer_height / blending_distance).clamp(0.0, 1.0)
}

/// Ordered set of available materials.
///
/// A material's id is its index in the table, so the order matters: it must
/// match the slot order of the printer the table is generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    /// Create a table from materials in slot order.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty or has more than
    /// [`MAX_MATERIALS`] entries.
    pub fn new(materials: Vec<Material>) -> TableResult<Self> {
        if materials.is_empty() {
            return Err(TableError::EmptyMaterialTable);
        }
        if materials.len() > MAX_MATERIALS {
            return Err(TableError::TooManyMaterials {
                count: materials.len(),
            });
        }
        Ok(Self { materials })
    }

    /// The eight-colour CMYK+RGB+White filament set.
    ///
    /// Slot order: White, Cyan, Magenta, Yellow, Black, Red, Deep Blue,
    /// Green.
    #[must_use]
    pub fn eight_color() -> Self {
        let materials = vec![
            Material::new("White (Jade)", Rgb::new(255, 255, 255), 5.0),
            Material::new("Cyan", Rgb::new(0, 134, 214), 3.5),
            Material::new("Magenta", Rgb::new(236, 0, 140), 3.0),
            Material::new("Yellow", Rgb::new(244, 238, 42), 6.0),
            Material::new("Black", Rgb::new(0, 0, 0), 0.6),
            Material::new("Red", Rgb::new(193, 46, 31), 4.0),
            Material::new("Deep Blue", Rgb::new(10, 41, 137), 2.3),
            Material::new("Green", Rgb::new(0, 174, 66), 2.0),
        ];
        Self { materials }
    }

    /// Number of materials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the table has no materials.
    ///
    /// Tables built through [`MaterialTable::new`] are never empty, but one
    /// deserialized from configuration may be.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Material by id.
    #[must_use]
    pub fn get(&self, id: u8) -> Option<&Material> {
        self.materials.get(usize::from(id))
    }

    /// Iterate over `(id, material)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Material)> {
        // Construction caps the table at 256 entries, so ids fit in u8.
        (0..=u8::MAX).zip(self.materials.iter())
    }

    /// Materials as a slice, in slot order.
    #[must_use]
    pub fn as_slice(&self) -> &[Material] {
        &self.materials
    }

    /// Find a material id by case-insensitive name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<u8> {
        self.iter()
            .find(|(_, m)| m.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::eight_color()
    }
}
