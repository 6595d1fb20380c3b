//! Rating histogram: equal-width bins over the observed rating range,
//! drawn as a PNG bar chart.

use crate::catalog::stats::StatsError;
use crate::render::RenderResult;
use image::{Rgb, RgbImage};
use std::path::Path;

pub const DEFAULT_BINS: usize = 30;

const IMAGE_WIDTH: u32 = 900;
const IMAGE_HEIGHT: u32 = 540;
const MARGIN: u32 = 40;
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const BAR_FILL: Rgb<u8> = Rgb([31, 119, 180]);
const EDGE: Rgb<u8> = Rgb([0, 0, 0]);

/// Counts of ratings per equal-width bin.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingHistogram {
    /// `counts.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl RatingHistogram {
    /// Buckets `ratings` into `bins` bins spanning `[min, max]`.
    ///
    /// A single distinct value is widened to `[v - 0.5, v + 0.5]`. The last
    /// bin includes its right edge. `bins == 0` is treated as one bin.
    pub fn from_ratings(ratings: &[f64], bins: usize) -> Result<Self, StatsError> {
        let bins = bins.max(1);
        let (Some(min), Some(max)) = (
            ratings.iter().copied().reduce(f64::min),
            ratings.iter().copied().reduce(f64::max),
        ) else {
            return Err(StatsError::EmptyCollection);
        };
        let (low, high) = if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };

        let width = (high - low) / bins as f64;
        let edges = (0..=bins)
            .map(|i| low + width * i as f64)
            .collect::<Vec<_>>();
        let mut counts = vec![0; bins];
        for rating in ratings {
            let index = (((rating - low) / width).floor() as usize).min(bins - 1);
            counts[index] += 1;
        }

        Ok(Self { edges, counts })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Draws the histogram as an image, bars scaled to the tallest bin.
    pub fn to_image(&self) -> RgbImage {
        let mut img = RgbImage::from_pixel(IMAGE_WIDTH, IMAGE_HEIGHT, BACKGROUND);
        let plot_width = IMAGE_WIDTH - 2 * MARGIN;
        let plot_height = IMAGE_HEIGHT - 2 * MARGIN;
        let baseline = IMAGE_HEIGHT - MARGIN;
        let tallest = self.counts.iter().copied().max().unwrap_or(0).max(1);
        let bar_width = (plot_width / self.counts.len() as u32).max(1);

        for (i, count) in self.counts.iter().enumerate() {
            if *count == 0 {
                continue;
            }
            let height = ((*count as f64 / tallest as f64) * plot_height as f64).round() as u32;
            let left = MARGIN + i as u32 * bar_width;
            let right = (left + bar_width).min(IMAGE_WIDTH - MARGIN) - 1;
            let top = baseline - height;
            for x in left..=right {
                for y in top..baseline {
                    let on_edge = x == left || x == right || y == top;
                    img.put_pixel(x, y, if on_edge { EDGE } else { BAR_FILL });
                }
            }
        }

        for x in MARGIN..(IMAGE_WIDTH - MARGIN) {
            img.put_pixel(x, baseline, EDGE);
        }
        for y in MARGIN..=baseline {
            img.put_pixel(MARGIN, y, EDGE);
        }
        img
    }

    /// Writes the chart as PNG to `path`.
    pub fn render_png(&self, path: &Path) -> RenderResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RatingHistogram;
    use crate::catalog::stats::StatsError;

    #[test]
    fn ratings_are_bucketed_across_the_observed_range() {
        let histogram = RatingHistogram::from_ratings(&[1.0, 2.0, 2.5, 10.0], 3).unwrap();
        assert_eq!(histogram.edges, vec![1.0, 4.0, 7.0, 10.0]);
        assert_eq!(histogram.counts, vec![3, 0, 1]);
        assert_eq!(histogram.total(), 4);
    }

    #[test]
    fn single_value_gets_a_unit_wide_range() {
        let histogram = RatingHistogram::from_ratings(&[7.0, 7.0], 2).unwrap();
        assert_eq!(histogram.edges, vec![6.5, 7.0, 7.5]);
        assert_eq!(histogram.counts, vec![0, 2]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            RatingHistogram::from_ratings(&[], 30),
            Err(StatsError::EmptyCollection)
        );
    }

    #[test]
    fn image_has_fixed_dimensions() {
        let histogram = RatingHistogram::from_ratings(&[5.0, 6.0, 9.0], 30).unwrap();
        let img = histogram.to_image();
        assert_eq!(img.dimensions(), (900, 540));
    }
}
