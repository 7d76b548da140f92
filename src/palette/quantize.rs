//! Candidate colors via k-means clustering in CIE Lab.
//!
//! Opaque pixels are clustered with `kmeans_colors`; each centroid becomes a
//! [`Swatch`] whose population is the number of pixels assigned to it. Large
//! rasters are thumbnailed first so clustering cost stays flat.

use super::Swatch;
use ::palette::{IntoColor, Lab, LinSrgb, Srgb};
use image::{DynamicImage, GenericImageView, Rgb};
use kmeans_colors::get_kmeans;
use std::collections::HashSet;

/// Pixels below this alpha are ignored.
const MIN_ALPHA: u8 = 125;

/// Longest side sampled for clustering.
const MAX_SAMPLE_SIDE: u32 = 128;

const MAX_ITERATIONS: usize = 20;
const CONVERGENCE: f32 = 1e-4;
const SEED: u64 = 0;

/// Opaque pixels of the (possibly thumbnailed) raster.
pub(super) fn opaque_pixels(raster: &DynamicImage) -> Vec<[u8; 3]> {
    let sampled;
    let raster = if raster.width() > MAX_SAMPLE_SIDE || raster.height() > MAX_SAMPLE_SIDE {
        sampled = raster.thumbnail(MAX_SAMPLE_SIDE, MAX_SAMPLE_SIDE);
        &sampled
    } else {
        raster
    };
    raster
        .pixels()
        .filter(|(_, _, pixel)| pixel.0[3] >= MIN_ALPHA)
        .map(|(_, _, pixel)| [pixel.0[0], pixel.0[1], pixel.0[2]])
        .collect()
}

/// Cluster `pixels` into at most `max_colors` swatches.
///
/// The cluster count never exceeds the number of distinct colors, so an image
/// with few colors gets those colors back exactly.
pub(super) fn cluster(pixels: &[[u8; 3]], max_colors: usize) -> Vec<Swatch> {
    let distinct: HashSet<&[u8; 3]> = pixels.iter().collect();
    let k = max_colors.min(distinct.len());
    if k == 0 {
        return Vec::new();
    }

    let lab: Vec<Lab> = pixels
        .iter()
        .map(|&[r, g, b]| {
            let linear: LinSrgb<f32> = Srgb::<u8>::new(r, g, b).into_format::<f32>().into_linear();
            linear.into_color()
        })
        .collect();
    let result = get_kmeans(k, MAX_ITERATIONS, CONVERGENCE, false, &lab, SEED);

    let mut populations = vec![0u32; result.centroids.len()];
    for &index in &result.indices {
        populations[usize::from(index)] += 1;
    }

    result
        .centroids
        .iter()
        .zip(populations)
        .filter(|(_, population)| *population > 0)
        .map(|(&centroid, population)| {
            let linear: LinSrgb<f32> = centroid.into_color();
            let rgb_f32: Srgb<f32> = Srgb::from_linear(linear);
            let rgb: Srgb<u8> = rgb_f32.into_format();
            Swatch {
                rgb: Rgb([rgb.red, rgb.green, rgb.blue]),
                population,
            }
        })
        .collect()
}
