// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Earth Mover's Distance between two point clouds
//!
//! Both clouds are treated as one bag of coordinate samples each (x, y and z
//! values pooled). The samples are binned into a shared set of uniform bins
//! and the EMD between the two normalized histograms is taken with the
//! distance between bin centres as ground distance. For 1-D histograms of
//! equal mass that is the area between the two cumulative distributions.

use crate::geometry::PointCloud;

/// EMD between two clouds, computed only when their point counts match.
pub fn earth_movers_distance(original: &PointCloud, decoded: &PointCloud) -> Option<f64> {
    log::info!(
        "Point counts: original {} / decoded {}",
        original.len(),
        decoded.len()
    );

    if original.len() != decoded.len() {
        log::info!("Point counts differ, skipping Earth Mover's distance");
        return None;
    }

    let a: Vec<f64> = original.coordinates().collect();
    let b: Vec<f64> = decoded.coordinates().collect();
    Some(emd_samples(&a, &b))
}

/// EMD between two sets of scalar samples.
///
/// Returns 0 when either set is empty.
pub fn emd_samples(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let bins = Bins::auto(a, b);
    let hist_a = bins.normalized_histogram(a);
    let hist_b = bins.normalized_histogram(b);

    let mut cdf_a = 0.0;
    let mut cdf_b = 0.0;
    let mut area = 0.0;
    // The last bin's cumulative masses are both 1 and contribute nothing
    for (pa, pb) in hist_a.iter().zip(&hist_b).take(bins.count - 1) {
        cdf_a += pa;
        cdf_b += pb;
        area += (cdf_a - cdf_b).abs();
    }

    area * bins.width()
}

/// Uniform bins over a closed range
#[derive(Debug, Clone, PartialEq)]
struct Bins {
    first: f64,
    last: f64,
    count: usize,
}

impl Bins {
    /// Shared bins for both sample sets, sized by the `auto` rule: the
    /// narrower of the Freedman-Diaconis and Sturges widths, falling back to
    /// Sturges when the interquartile range is zero.
    fn auto(a: &[f64], b: &[f64]) -> Self {
        let mut samples: Vec<f64> = a.iter().chain(b).copied().collect();
        samples.sort_by(f64::total_cmp);

        let min = samples[0];
        let max = samples[samples.len() - 1];
        let (first, last) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };

        let width = auto_width(&samples);
        let count = if width > 0.0 && (last - first).is_finite() {
            ((last - first) / width).ceil() as usize
        } else {
            1
        };

        Self {
            first,
            last,
            count: count.max(1),
        }
    }

    fn width(&self) -> f64 {
        (self.last - self.first) / self.count as f64
    }

    fn edge(&self, i: usize) -> f64 {
        if i == self.count {
            self.last
        } else {
            self.first + (self.last - self.first) * i as f64 / self.count as f64
        }
    }

    fn index_of(&self, value: f64) -> usize {
        let scale = self.count as f64 / (self.last - self.first);
        let mut index = (((value - self.first) * scale) as usize).min(self.count - 1);

        // Floating-point slop near an edge: trust the edges over the scaling
        if index > 0 && value < self.edge(index) {
            index -= 1;
        } else if index + 1 < self.count && value >= self.edge(index + 1) {
            index += 1;
        }
        index
    }

    fn normalized_histogram(&self, samples: &[f64]) -> Vec<f64> {
        let mut counts = vec![0usize; self.count];
        for &value in samples {
            counts[self.index_of(value)] += 1;
        }

        let total = samples.len() as f64;
        counts.into_iter().map(|c| c as f64 / total).collect()
    }
}

fn auto_width(sorted: &[f64]) -> f64 {
    let n = sorted.len() as f64;
    let ptp = sorted[sorted.len() - 1] - sorted[0];

    let sturges = ptp / (n.log2() + 1.0);
    let iqr = percentile(sorted, 75.0) - percentile(sorted, 25.0);
    let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);

    if fd > 0.0 {
        fd.min(sturges)
    } else {
        sturges
    }
}

/// Linearly interpolated percentile of sorted samples
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
