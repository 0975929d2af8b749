//! Translucent layer compositing.
//!
//! Each layer is alpha-blended over everything beneath it, starting from the
//! backing colour, in the same device space the material colours are given
//! in.

use lut_types::{Rgb, Stack, layer_alpha};

use crate::params::LutParams;

/// Simulates the visible colour of a stack.
///
/// Per-material opacity is computed once at construction; [`Mixer::mix`] is
/// then a pure function of the stack.
#[derive(Debug, Clone)]
pub struct Mixer {
    backing: [f64; 3],
    layers: Vec<MixLayer>,
}

#[derive(Debug, Clone, Copy)]
struct MixLayer {
    color: [f64; 3],
    alpha: f64,
}

impl Mixer {
    /// Create a mixer for the given parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use lut_generate::{LutParams, Mixer};
    /// use lut_types::{Rgb, Stack};
    ///
    /// let mixer = Mixer::new(&LutParams::eight_color());
    /// assert_eq!(mixer.mix(&Stack::uniform(4, 5)), Rgb::BLACK);
    /// ```
    #[must_use]
    pub fn new(params: &LutParams) -> Self {
        let layers = params
            .materials
            .iter()
            .map(|(_, material)| MixLayer {
                color: material.color.to_f64(),
                alpha: layer_alpha(material.transmission_distance, params.layer_height),
            })
            .collect();
        Self {
            backing: params.backing_color.to_f64(),
            layers,
        }
    }

    /// Number of materials this mixer knows.
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.layers.len()
    }

    /// Opacity of one layer of material `id`.
    #[must_use]
    pub fn alpha(&self, id: u8) -> Option<f64> {
        self.layers.get(usize::from(id)).map(|l| l.alpha)
    }

    /// Real-valued colour of a stack before truncation.
    ///
    /// Layers with an unknown material id are skipped; check tables from
    /// outside with [`StackTable::validate_ids`](lut_types::StackTable::validate_ids)
    /// first.
    #[must_use]
    pub fn mix_exact(&self, stack: &Stack) -> [f64; 3] {
        let mut current = self.backing;
        for &id in stack.layers() {
            let Some(layer) = self.layers.get(usize::from(id)) else {
                continue;
            };
            let keep = 1.0 - layer.alpha;
            for (c, m) in current.iter_mut().zip(layer.color) {
                *c = m * layer.alpha + *c * keep;
            }
        }
        current
    }

    /// Visible colour of a stack, channels truncated toward zero.
    #[must_use]
    pub fn mix(&self, stack: &Stack) -> Rgb {
        Rgb::truncate(self.mix_exact(stack))
    }
}
