// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Augmentation pipeline — deterministic print/scan degradations. Each
// technique is a pure function of the single source image; techniques never
// compose (every output is computed from the original, not from a previous
// augmentation).

use image::{GrayImage, Luma};
use image::imageops;
use imageproc::geometric_transformations::{Interpolation, Projection, rotate_about_center, warp};
use imageproc::morphology::{Mask, grayscale_dilate, grayscale_erode};
use naqsh_core::Augmentation;
use tracing::warn;

/// Paper-white fill for pixels exposed by a geometric transform.
const BACKGROUND: Luma<u8> = Luma([255u8]);

/// Apply every requested technique to `source`, preserving request order.
///
/// Returns one `(image, technique label)` pair per technique. The label is
/// the filename vocabulary (`none`, `erosion`, ...); the writer appends it
/// to the word's token.
pub fn apply(source: &GrayImage, techniques: &[Augmentation]) -> Vec<(GrayImage, &'static str)> {
    techniques
        .iter()
        .map(|technique| (apply_one(source, technique), technique.label()))
        .collect()
}

/// Apply a single technique to `source`.
pub fn apply_one(source: &GrayImage, technique: &Augmentation) -> GrayImage {
    match technique {
        Augmentation::Identity => source.clone(),
        Augmentation::Erosion { radius } => {
            grayscale_erode(source, &Mask::square(*radius))
        }
        Augmentation::Dilation { radius } => {
            grayscale_dilate(source, &Mask::square(*radius))
        }
        Augmentation::Rotation { degrees } => rotate_expanded(source, *degrees),
        Augmentation::Shear { factor } => shear(source, *factor),
    }
}

/// Rotate about the image center, expanding the canvas first so no content
/// is clipped.
fn rotate_expanded(source: &GrayImage, degrees: f32) -> GrayImage {
    let (width, height) = source.dimensions();
    let radians = degrees.to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());

    let expanded_width = (width as f32 * cos + height as f32 * sin).ceil() as u32;
    let expanded_height = (width as f32 * sin + height as f32 * cos).ceil() as u32;

    let mut canvas = GrayImage::from_pixel(expanded_width, expanded_height, BACKGROUND);
    imageops::overlay(
        &mut canvas,
        source,
        ((expanded_width - width) / 2) as i64,
        ((expanded_height - height) / 2) as i64,
    );

    rotate_about_center(&canvas, radians, Interpolation::Bilinear, BACKGROUND)
}

/// Horizontal shear at constant canvas size; content may clip at the edges,
/// simulating a skewed scan.
fn shear(source: &GrayImage, factor: f32) -> GrayImage {
    let matrix = [1.0, factor, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    match Projection::from_matrix(matrix) {
        Some(projection) => warp(source, &projection, Interpolation::Bilinear, BACKGROUND),
        None => {
            // A shear matrix is always invertible; reachable only with a
            // non-finite factor, which configuration validation rejects.
            warn!(factor, "shear projection not invertible, passing image through");
            source.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A white cell with a black bar in the middle.
    fn barred_cell() -> GrayImage {
        let mut cell = GrayImage::from_pixel(60, 40, Luma([255u8]));
        for y in 18..22 {
            for x in 10..50 {
                cell.put_pixel(x, y, Luma([0u8]));
            }
        }
        cell
    }

    fn dark_pixels(image: &GrayImage) -> usize {
        image.pixels().filter(|p| p.0[0] < 128).count()
    }

    /// n requested techniques produce exactly n outputs, in request order,
    /// each tagged with its technique label.
    #[test]
    fn one_output_per_technique_in_request_order() {
        let source = barred_cell();
        let techniques = Augmentation::default_set();

        let outputs = apply(&source, &techniques);
        assert_eq!(outputs.len(), techniques.len());

        let labels: Vec<&str> = outputs.iter().map(|(_, label)| *label).collect();
        assert_eq!(labels, ["none", "erosion", "dilation", "rotation", "shear"]);
    }

    /// The identity technique is a bit-for-bit copy.
    #[test]
    fn identity_copies_source() {
        let source = barred_cell();
        let outputs = apply(&source, &[Augmentation::Identity]);
        assert_eq!(outputs[0].0, source);
    }

    /// Techniques read the original, never a previously-augmented output:
    /// reordering the request does not change any individual result.
    #[test]
    fn techniques_are_independent_of_request_order() {
        let source = barred_cell();
        let forward = apply(
            &source,
            &[
                Augmentation::Erosion { radius: 1 },
                Augmentation::Rotation { degrees: 15.0 },
            ],
        );
        let reversed = apply(
            &source,
            &[
                Augmentation::Rotation { degrees: 15.0 },
                Augmentation::Erosion { radius: 1 },
            ],
        );
        assert_eq!(forward[0].0, reversed[1].0);
        assert_eq!(forward[1].0, reversed[0].0);
    }

    /// Erosion (min filter) grows dark strokes; dilation shrinks them.
    #[test]
    fn morphology_moves_dark_mass_in_opposite_directions() {
        let source = barred_cell();
        let baseline = dark_pixels(&source);

        let eroded = apply_one(&source, &Augmentation::Erosion { radius: 1 });
        let dilated = apply_one(&source, &Augmentation::Dilation { radius: 1 });

        assert!(dark_pixels(&eroded) > baseline);
        assert!(dark_pixels(&dilated) < baseline);
    }

    /// Rotation expands the canvas and keeps the stroke mass.
    #[test]
    fn rotation_expands_canvas_without_losing_content() {
        let source = barred_cell();
        let rotated = apply_one(&source, &Augmentation::Rotation { degrees: 15.0 });

        assert!(rotated.width() > source.width());
        assert!(rotated.height() > source.height());
        // Bilinear resampling smears edges, so compare loosely.
        let original = dark_pixels(&source) as f64;
        let kept = dark_pixels(&rotated) as f64;
        assert!(kept > original * 0.8, "rotation lost stroke content");
    }

    /// Shear keeps the canvas size.
    #[test]
    fn shear_keeps_canvas_size() {
        let source = barred_cell();
        let sheared = apply_one(&source, &Augmentation::Shear { factor: 0.2 });
        assert_eq!(sheared.dimensions(), source.dimensions());
    }

    /// Identical inputs give identical outputs on repeated application.
    #[test]
    fn augmentation_is_deterministic() {
        let source = barred_cell();
        for technique in Augmentation::default_set() {
            let first = apply_one(&source, &technique);
            let second = apply_one(&source, &technique);
            assert_eq!(first, second, "{} not deterministic", technique.label());
        }
    }
}
