//! Assign quantized swatches to the six named luminance/saturation targets.

use super::{Swatch, SwatchName};
use ::palette::{FromColor, Hsl, Srgb};
use std::collections::{BTreeMap, HashSet};

const WEIGHT_SATURATION: f32 = 0.24;
const WEIGHT_LUMA: f32 = 0.52;
const WEIGHT_POPULATION: f32 = 0.24;

struct Target {
    name: SwatchName,
    min_luma: f32,
    target_luma: f32,
    max_luma: f32,
    min_saturation: f32,
    target_saturation: f32,
    max_saturation: f32,
}

const TARGETS: [Target; 6] = [
    Target {
        name: SwatchName::Vibrant,
        min_luma: 0.3,
        target_luma: 0.5,
        max_luma: 0.7,
        min_saturation: 0.35,
        target_saturation: 1.0,
        max_saturation: 1.0,
    },
    Target {
        name: SwatchName::LightVibrant,
        min_luma: 0.55,
        target_luma: 0.74,
        max_luma: 1.0,
        min_saturation: 0.35,
        target_saturation: 1.0,
        max_saturation: 1.0,
    },
    Target {
        name: SwatchName::DarkVibrant,
        min_luma: 0.0,
        target_luma: 0.26,
        max_luma: 0.45,
        min_saturation: 0.35,
        target_saturation: 1.0,
        max_saturation: 1.0,
    },
    Target {
        name: SwatchName::Muted,
        min_luma: 0.3,
        target_luma: 0.5,
        max_luma: 0.7,
        min_saturation: 0.0,
        target_saturation: 0.3,
        max_saturation: 0.4,
    },
    Target {
        name: SwatchName::LightMuted,
        min_luma: 0.55,
        target_luma: 0.74,
        max_luma: 1.0,
        min_saturation: 0.0,
        target_saturation: 0.3,
        max_saturation: 0.4,
    },
    Target {
        name: SwatchName::DarkMuted,
        min_luma: 0.0,
        target_luma: 0.26,
        max_luma: 0.45,
        min_saturation: 0.0,
        target_saturation: 0.3,
        max_saturation: 0.4,
    },
];

impl Target {
    fn accepts(&self, saturation: f32, luma: f32) -> bool {
        (self.min_saturation..=self.max_saturation).contains(&saturation)
            && (self.min_luma..=self.max_luma).contains(&luma)
    }

    fn score(&self, saturation: f32, luma: f32, population: u32, max_population: u32) -> f32 {
        let population_share = population as f32 / max_population.max(1) as f32;
        WEIGHT_SATURATION * (1.0 - (saturation - self.target_saturation).abs())
            + WEIGHT_LUMA * (1.0 - (luma - self.target_luma).abs())
            + WEIGHT_POPULATION * population_share
    }
}

/// Saturation and lightness in the HSL model, both in `0.0..=1.0`.
pub(super) fn saturation_and_lightness(swatch: &Swatch) -> (f32, f32) {
    let [r, g, b] = swatch.rgb.0;
    let hsl: Hsl = Hsl::from_color(Srgb::<u8>::new(r, g, b).into_format::<f32>());
    (hsl.saturation.clamp(0.0, 1.0), hsl.lightness.clamp(0.0, 1.0))
}

/// Pick one swatch per name. A swatch chosen for one target is not reused
/// for another; targets left without a candidate get the dominant swatch.
pub(super) fn select(candidates: &[Swatch]) -> BTreeMap<SwatchName, Swatch> {
    let mut chosen = BTreeMap::new();
    let Some(dominant) = candidates.iter().max_by_key(|s| s.population) else {
        return chosen;
    };
    let max_population = dominant.population;
    let hsl: Vec<(f32, f32)> = candidates.iter().map(saturation_and_lightness).collect();
    let mut used = HashSet::new();

    for target in &TARGETS {
        let best = candidates
            .iter()
            .zip(&hsl)
            .enumerate()
            .filter(|(i, (_, (s, l)))| !used.contains(i) && target.accepts(*s, *l))
            .map(|(i, (swatch, (s, l)))| {
                (i, target.score(*s, *l, swatch.population, max_population))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1));

        let swatch = match best {
            Some((i, _)) => {
                used.insert(i);
                candidates[i]
            }
            None => *dominant,
        };
        chosen.insert(target.name, swatch);
    }
    chosen
}
