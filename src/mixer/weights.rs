//! Feature-to-mix-weight mapping.
//!
//! A fixed-topology feed-forward transform (8 -> 16 -> 8 -> 4). Parameters are
//! laid out so every feature has a dedicated path through the hidden layers,
//! then perturbed by a small jitter from a fixed-seed ChaCha8 stream. Nothing
//! is learned; the same seed always yields the same tables.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::audio::features::FEATURE_COUNT;

pub const DEFAULT_SEED: u64 = 0x6d6f_6e6f_6d69_7821;

const HIDDEN_1: usize = 16;
const HIDDEN_2: usize = 8;
const OUTPUTS: usize = 4;

const HIDDEN_1_JITTER: f32 = 0.01;
const HIDDEN_2_JITTER: f32 = 0.005;
const OUTPUT_JITTER: f32 = 0.005;

// Feature slots, see `AnalysisResult::feature_vector`
const WIDTH: usize = 0;
const RICHNESS: usize = 1;
const PHASE: usize = 4;
const HIGH_BAND: usize = 7;

/// Channel blend and reinjection gains for one conversion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MixWeights {
    /// [0.3, 0.7]
    pub left_weight: f32,
    /// [0.3, 0.7]
    pub right_weight: f32,
    /// [0.0, 0.5]
    pub side_gain: f32,
    /// [0.0, 0.3]
    pub harmonic_gain: f32,
}

impl MixWeights {
    fn from_raw(raw: [f32; OUTPUTS]) -> Self {
        Self {
            left_weight: (0.5 + raw[0] * 0.2).clamp(0.3, 0.7),
            right_weight: (0.5 + raw[1] * 0.2).clamp(0.3, 0.7),
            side_gain: raw[2].clamp(0.0, 0.5),
            harmonic_gain: raw[3].clamp(0.0, 0.3),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Activation {
    Relu,
    Linear,
}

impl Activation {
    #[inline]
    fn apply(self, x: f32) -> f32 {
        match self {
            Activation::Relu => x.max(0.0),
            Activation::Linear => x,
        }
    }
}

#[derive(Clone, Debug)]
struct Layer {
    /// Row per output unit
    weights: Vec<Vec<f32>>,
    biases: Vec<f32>,
    activation: Activation,
}

impl Layer {
    fn forward(&self, input: &[f32]) -> Vec<f32> {
        self.weights
            .iter()
            .zip(self.biases.iter())
            .map(|(row, &bias)| {
                let sum = row
                    .iter()
                    .zip(input.iter())
                    .fold(bias, |acc, (w, x)| acc + w * x);
                self.activation.apply(sum)
            })
            .collect()
    }
}

/// Builds a layer from a structured base plus uniform jitter.
fn build_layer(
    rng: &mut ChaCha8Rng,
    outputs: usize,
    inputs: usize,
    jitter: f32,
    activation: Activation,
    base_weight: impl Fn(usize, usize) -> f32,
    base_bias: impl Fn(usize) -> f32,
) -> Layer {
    let mut weights = Vec::with_capacity(outputs);
    let mut biases = Vec::with_capacity(outputs);
    for unit in 0..outputs {
        let row = (0..inputs)
            .map(|input| base_weight(unit, input) + rng.random_range(-jitter..=jitter))
            .collect();
        weights.push(row);
        biases.push(base_bias(unit) + rng.random_range(-jitter..=jitter));
    }
    Layer {
        weights,
        biases,
        activation,
    }
}

/// Deterministic 8-feature to 4-weight transform.
///
/// Read-only after construction, so one instance can serve concurrent
/// conversions.
#[derive(Clone, Debug)]
pub struct WeightMapper {
    layers: [Layer; 3],
}

impl Default for WeightMapper {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl WeightMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        // Units 0..8 carry each feature at full gain, 8..16 at half gain
        let hidden_1 = build_layer(
            &mut rng,
            HIDDEN_1,
            FEATURE_COUNT,
            HIDDEN_1_JITTER,
            Activation::Relu,
            |unit, input| match (unit % FEATURE_COUNT == input, unit < FEATURE_COUNT) {
                (true, true) => 1.0,
                (true, false) => 0.5,
                _ => 0.0,
            },
            |_| 0.1,
        );

        // Recombine both copies of a feature
        let hidden_2 = build_layer(
            &mut rng,
            HIDDEN_2,
            HIDDEN_1,
            HIDDEN_2_JITTER,
            Activation::Relu,
            |unit, input| {
                if input == unit || input == unit + HIDDEN_2 {
                    0.5
                } else {
                    0.0
                }
            },
            |_| 0.05,
        );

        // Hidden feature m settles near 0.75 * x[m] + 0.15. Out-of-phase
        // material pushes the blend off-center so the sum does not cancel;
        // width and top-band energy open the side gain; richness drives
        // harmonic gain.
        let output = build_layer(
            &mut rng,
            OUTPUTS,
            HIDDEN_2,
            OUTPUT_JITTER,
            Activation::Linear,
            |unit, input| match (unit, input) {
                (0, PHASE) => -1.0,
                (1, PHASE) => 1.0,
                (2, WIDTH) => 0.4,
                (2, HIGH_BAND) => 0.1,
                (3, RICHNESS) => 0.2,
                (3, HIGH_BAND) => 0.1,
                _ => 0.0,
            },
            |unit| match unit {
                0 => 0.9,
                1 => -0.9,
                3 => -0.03,
                _ => 0.0,
            },
        );

        Self {
            layers: [hidden_1, hidden_2, output],
        }
    }

    /// Unclamped network outputs. Inputs are clamped to [0, 1] first.
    pub fn forward(&self, features: &[f32; FEATURE_COUNT]) -> [f32; OUTPUTS] {
        let mut activations: Vec<f32> = features.iter().map(|f| f.clamp(0.0, 1.0)).collect();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }

        let mut raw = [0.0f32; OUTPUTS];
        raw.copy_from_slice(&activations[..OUTPUTS]);
        raw
    }

    pub fn map_features(&self, features: &[f32; FEATURE_COUNT]) -> MixWeights {
        let weights = MixWeights::from_raw(self.forward(features));
        log::debug!(
            "Mix weights: left={:.4}, right={:.4}, side={:.4}, harmonic={:.4}",
            weights.left_weight,
            weights.right_weight,
            weights.side_gain,
            weights.harmonic_gain
        );
        weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_in_range(weights: &MixWeights) {
        assert!((0.3..=0.7).contains(&weights.left_weight));
        assert!((0.3..=0.7).contains(&weights.right_weight));
        assert!((0.0..=0.5).contains(&weights.side_gain));
        assert!((0.0..=0.3).contains(&weights.harmonic_gain));
    }

    #[test]
    fn same_seed_same_weights() {
        let features = [0.4, 0.2, 0.3, 0.8, 0.6, 0.7, 0.2, 0.1];
        let a = WeightMapper::new().forward(&features);
        let b = WeightMapper::new().forward(&features);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ_but_stay_in_range() {
        let features = [0.4, 0.2, 0.3, 0.8, 0.6, 0.7, 0.2, 0.1];
        let a = WeightMapper::with_seed(1).forward(&features);
        let b = WeightMapper::with_seed(2).forward(&features);
        assert_ne!(a, b);
        assert_in_range(&WeightMapper::with_seed(1).map_features(&features));
        assert_in_range(&WeightMapper::with_seed(2).map_features(&features));
    }

    #[test]
    fn outputs_always_in_documented_ranges() {
        let mapper = WeightMapper::new();
        for features in [[0.0; 8], [1.0; 8], [0.5; 8], [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]] {
            assert_in_range(&mapper.map_features(&features));
        }
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let mapper = WeightMapper::new();
        let wild = [5.0, -3.0, 2.0, -1.0, 9.0, -0.5, 1.5, 100.0];
        let tamed = [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0];
        assert_eq!(mapper.forward(&wild), mapper.forward(&tamed));
    }

    #[test]
    fn in_phase_material_blends_evenly() {
        let weights = WeightMapper::new().map_features(&[0.0, 0.2, 0.3, 0.5, 1.0, 1.0, 0.0, 0.0]);
        assert!(
            (weights.left_weight - weights.right_weight).abs() < 0.15,
            "expected near-even blend, got {:?}",
            weights
        );
    }

    #[test]
    fn out_of_phase_material_favours_one_channel() {
        let weights = WeightMapper::new().map_features(&[1.0, 0.2, 0.3, 0.5, 0.0, 1.0, 0.0, 0.0]);
        assert!(weights.left_weight > weights.right_weight, "{:?}", weights);
    }

    #[test]
    fn wider_images_get_more_side_gain() {
        let mapper = WeightMapper::new();
        let narrow = mapper.map_features(&[0.0, 0.2, 0.3, 0.5, 0.9, 1.0, 0.0, 0.0]);
        let wide = mapper.map_features(&[1.0, 0.2, 0.3, 0.5, 0.9, 1.0, 0.0, 0.0]);
        assert!(wide.side_gain > narrow.side_gain);
        assert!(narrow.side_gain > 0.0);
    }

    #[test]
    fn relu_layer_zeroes_negative_sums() {
        let layer = Layer {
            weights: vec![vec![1.0, -1.0], vec![-1.0, 1.0]],
            biases: vec![0.0, 0.0],
            activation: Activation::Relu,
        };
        assert_eq!(layer.forward(&[0.75, 0.25]), vec![0.5, 0.0]);
    }
}
