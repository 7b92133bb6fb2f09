//! Deterministic palette selection: maximin seeding followed by weighted
//! Lloyd (k-means) refinement over the colour histogram.

use crate::palette::{distance_sq, nearest_index};

/// A distinct colour and how many pixels have it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    /// RGBA value.
    pub rgba: [u8; 4],
    /// Number of pixels.
    pub count: u64,
}

fn key(rgba: [u8; 4]) -> u32 {
    u32::from_be_bytes(rgba)
}

/// Distinct colours of `pixels` with their counts, sorted by value.
pub fn histogram(pixels: impl Iterator<Item = [u8; 4]>) -> Vec<ColorCount> {
    // Sort and count runs
    let mut keys: Vec<u32> = pixels.map(key).collect();
    keys.sort_unstable();

    let mut colors: Vec<ColorCount> = Vec::new();
    for k in keys {
        if let Some(last) = colors.last_mut()
            && key(last.rgba) == k
        {
            last.count += 1;
            continue;
        }
        colors.push(ColorCount {
            rgba: k.to_be_bytes(),
            count: 1,
        });
    }
    colors
}

/// Position of `rgba` in a histogram built by [`histogram`].
pub fn lookup(colors: &[ColorCount], rgba: [u8; 4]) -> Option<usize> {
    colors.binary_search_by_key(&key(rgba), |c| key(c.rgba)).ok()
}

/// Pick `k` starting centroids from a histogram with more than `k` colours.
///
/// The first is the most frequent colour (smallest value on ties); each next
/// one is the colour farthest from every centroid chosen so far (first in
/// sorted order on ties).
pub fn maximin_seeds(colors: &[ColorCount], k: usize) -> Vec<[u8; 4]> {
    let Some(first) = colors
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.count.cmp(&b.count).then(ib.cmp(ia)))
        .map(|(_, c)| c.rgba)
    else {
        return Vec::new();
    };

    let mut seeds = vec![first];
    let mut min_dist: Vec<u32> = colors.iter().map(|c| distance_sq(c.rgba, first)).collect();

    while seeds.len() < k {
        let mut best = 0;
        for (i, &d) in min_dist.iter().enumerate() {
            if d > min_dist[best] {
                best = i;
            }
        }
        if min_dist[best] == 0 {
            break;
        }
        let next = colors[best].rgba;
        seeds.push(next);
        for (d, c) in min_dist.iter_mut().zip(colors) {
            *d = (*d).min(distance_sq(c.rgba, next));
        }
    }
    seeds
}

/// Result of [`refine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement {
    /// Final centroids, same length and order as the seeds.
    pub centroids: Vec<[u8; 4]>,
    /// Lloyd iterations performed.
    pub iterations: u32,
    /// Whether the centroids stopped moving before the iteration cap.
    pub converged: bool,
}

/// Weighted Lloyd iterations starting from `seeds`.
///
/// Each histogram colour joins its nearest centroid (lowest index on ties);
/// each centroid moves to the rounded count-weighted mean of its members and
/// stays in place when it has none. Stops when nothing moves or after
/// `max_iterations`.
pub fn refine(colors: &[ColorCount], seeds: Vec<[u8; 4]>, max_iterations: u32) -> Refinement {
    let mut centroids = seeds;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < max_iterations {
        iterations += 1;

        let mut sums = vec![[0u64; 4]; centroids.len()];
        let mut weights = vec![0u64; centroids.len()];
        for color in colors {
            let idx = nearest_index(color.rgba, &centroids);
            weights[idx] += color.count;
            for (sum, &channel) in sums[idx].iter_mut().zip(&color.rgba) {
                *sum += channel as u64 * color.count;
            }
        }

        let mut moved = false;
        for ((centroid, sum), weight) in centroids.iter_mut().zip(sums).zip(weights) {
            if weight == 0 {
                continue;
            }
            let mean = sum.map(|s| ((s + weight / 2) / weight) as u8);
            if mean != *centroid {
                *centroid = mean;
                moved = true;
            }
        }

        if !moved {
            converged = true;
            break;
        }
    }

    Refinement {
        centroids,
        iterations,
        converged,
    }
}

/// Remove duplicate centroids and those no histogram colour is nearest to,
/// keeping the original order.
pub fn prune(colors: &[ColorCount], centroids: &[[u8; 4]]) -> Vec<[u8; 4]> {
    let mut unique: Vec<[u8; 4]> = Vec::with_capacity(centroids.len());
    for &c in centroids {
        if !unique.contains(&c) {
            unique.push(c);
        }
    }

    let mut used = vec![false; unique.len()];
    for color in colors {
        used[nearest_index(color.rgba, &unique)] = true;
    }
    unique
        .into_iter()
        .zip(used)
        .filter_map(|(c, u)| u.then_some(c))
        .collect()
}
