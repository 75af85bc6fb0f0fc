//! Venn/Euler diagram of two or three gene sets.
//!
//! Circle areas are proportional to set sizes and pairwise overlaps are
//! matched to intersection sizes as closely as circles allow. With three
//! sets the triple overlap is whatever the pairwise fits leave over, as in
//! any circle-based Euler layout.

use crate::error::{GenevizError, Result};
use crate::request::GeneSet;
use std::f64::consts::PI;

/// Fill colours for sets 1-3 (red, green, blue).
pub const SET_COLORS: [(u8, u8, u8); 3] = [(228, 26, 28), (77, 175, 74), (55, 126, 184)];

const BISECTION_STEPS: usize = 64;
const ANCHOR_GRID: usize = 160;

/// One set drawn as a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VennCircle {
    /// Centre x.
    pub x: f64,
    /// Centre y.
    pub y: f64,
    /// Radius.
    pub r: f64,
}

impl VennCircle {
    fn contains(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (x - self.x, y - self.y);
        dx * dx + dy * dy <= self.r * self.r
    }
}

/// One exclusive region of the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct VennRegion {
    /// Membership bit mask: bit `i` set means "inside set `i`".
    pub mask: u8,
    /// Number of genes in exactly these sets.
    pub size: usize,
    /// Where to print the size, if the region is visible in the layout.
    pub anchor: Option<(f64, f64)>,
}

/// A rendered Venn diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct VennFigure {
    /// Chart title.
    pub title: String,
    /// One label per set.
    pub labels: Vec<String>,
    /// Set sizes.
    pub sizes: Vec<usize>,
    /// Circle layout, centred on the origin.
    pub circles: Vec<VennCircle>,
    /// All `2^n - 1` exclusive regions, ordered by mask.
    pub regions: Vec<VennRegion>,
}

impl VennFigure {
    /// Size of the region with the given mask.
    pub fn region_size(&self, mask: u8) -> usize {
        self.regions
            .iter()
            .find(|r| r.mask == mask)
            .map_or(0, |r| r.size)
    }

    /// Axis-aligned bounds `(x_min, x_max, y_min, y_max)` of all circles.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        circle_bounds(&self.circles)
    }

    /// Human-readable name of a region, e.g. `A & B only`.
    pub fn region_name(&self, mask: u8) -> String {
        let names: Vec<&str> = self
            .labels
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, l)| l.as_str())
            .collect();
        if names.len() == self.labels.len() {
            names.join(" & ")
        } else {
            format!("{} only", names.join(" & "))
        }
    }

    /// Tab-separated `region, size`.
    pub fn to_tsv(&self) -> String {
        let mut text = String::from("region\tsize\n");
        for region in &self.regions {
            text.push_str(&format!("{}\t{}\n", self.region_name(region.mask), region.size));
        }
        text
    }
}

/// Build a Venn diagram of 2 or 3 non-empty sets.
pub fn venn_diagram(sets: &[GeneSet], labels: &[String], title: &str) -> Result<VennFigure> {
    if !(2..=3).contains(&sets.len()) {
        return Err(GenevizError::InvalidSetCount { count: sets.len() });
    }
    if labels.len() != sets.len() {
        return Err(GenevizError::LabelCountMismatch {
            sets: sets.len(),
            labels: labels.len(),
        });
    }
    if let Some(i) = sets.iter().position(GeneSet::is_empty) {
        return Err(GenevizError::EmptyGeneSet {
            label: labels[i].clone(),
        });
    }

    let region_sizes = exclusive_region_sizes(sets);
    let circles = layout(sets);
    let anchors = region_anchors(&circles);

    let regions = (1..(1u8 << sets.len()))
        .map(|mask| VennRegion {
            mask,
            size: region_sizes[mask as usize],
            anchor: anchors[mask as usize],
        })
        .collect();

    Ok(VennFigure {
        title: title.to_string(),
        labels: labels.to_vec(),
        sizes: sets.iter().map(GeneSet::len).collect(),
        circles,
        regions,
    })
}

/// Count genes per membership mask. Index 0 is unused.
fn exclusive_region_sizes(sets: &[GeneSet]) -> Vec<usize> {
    let mut sizes = vec![0usize; 1 << sets.len()];
    let mut seen = std::collections::BTreeSet::new();

    for gene in sets.iter().flat_map(|s| s.iter()) {
        if !seen.insert(gene) {
            continue;
        }
        let mask = sets
            .iter()
            .enumerate()
            .filter(|(_, s)| s.contains(gene))
            .fold(0usize, |m, (i, _)| m | (1 << i));
        sizes[mask] += 1;
    }
    sizes
}

fn intersection_size(a: &GeneSet, b: &GeneSet) -> usize {
    a.iter().filter(|g| b.contains(g)).count()
}

fn layout(sets: &[GeneSet]) -> Vec<VennCircle> {
    let radii: Vec<f64> = sets.iter().map(|s| (s.len() as f64 / PI).sqrt()).collect();
    let distance = |i: usize, j: usize| {
        let overlap = intersection_size(&sets[i], &sets[j]) as f64;
        distance_for_overlap(radii[i], radii[j], overlap)
    };

    let d_ab = distance(0, 1);
    let mut circles = vec![
        VennCircle {
            x: 0.0,
            y: 0.0,
            r: radii[0],
        },
        VennCircle {
            x: d_ab,
            y: 0.0,
            r: radii[1],
        },
    ];

    if sets.len() == 3 {
        let (d_ac, d_bc) = (distance(0, 2), distance(1, 2));
        let (x, y) = if d_ab > f64::EPSILON {
            let x = (d_ac * d_ac - d_bc * d_bc + d_ab * d_ab) / (2.0 * d_ab);
            // clamp when the three distances cannot form a triangle
            (x, (d_ac * d_ac - x * x).max(0.0).sqrt())
        } else {
            (d_ac, 0.0)
        };
        circles.push(VennCircle {
            x,
            y: -y,
            r: radii[2],
        });
    }

    let (x_min, x_max, y_min, y_max) = circle_bounds(&circles);
    let (cx, cy) = ((x_min + x_max) / 2.0, (y_min + y_max) / 2.0);
    for c in &mut circles {
        c.x -= cx;
        c.y -= cy;
    }
    circles
}

/// Area of the lens where two circles at distance `d` overlap.
pub(crate) fn lens_area(r1: f64, r2: f64, d: f64) -> f64 {
    if d >= r1 + r2 {
        return 0.0;
    }
    if d <= (r1 - r2).abs() {
        let r = r1.min(r2);
        return PI * r * r;
    }
    let a1 = ((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1)).clamp(-1.0, 1.0).acos();
    let a2 = ((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2)).clamp(-1.0, 1.0).acos();
    let k = ((-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2)).max(0.0);
    r1 * r1 * a1 + r2 * r2 * a2 - 0.5 * k.sqrt()
}

/// Centre distance giving a lens of the requested area.
fn distance_for_overlap(r1: f64, r2: f64, overlap: f64) -> f64 {
    let (lo, hi) = ((r1 - r2).abs(), r1 + r2);
    let max_overlap = PI * r1.min(r2).powi(2);

    if overlap <= 0.0 {
        return hi;
    }
    if overlap >= max_overlap {
        return lo;
    }

    // lens area shrinks monotonically as the circles move apart
    let (mut lo, mut hi) = (lo, hi);
    for _ in 0..BISECTION_STEPS {
        let mid = (lo + hi) / 2.0;
        if lens_area(r1, r2, mid) > overlap {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

fn circle_bounds(circles: &[VennCircle]) -> (f64, f64, f64, f64) {
    circles.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(x0, x1, y0, y1), c| {
            (
                x0.min(c.x - c.r),
                x1.max(c.x + c.r),
                y0.min(c.y - c.r),
                y1.max(c.y + c.r),
            )
        },
    )
}

/// Centroid of grid samples per membership mask. Index 0 is unused.
fn region_anchors(circles: &[VennCircle]) -> Vec<Option<(f64, f64)>> {
    let n = circles.len();
    let mut sums = vec![(0.0f64, 0.0f64, 0usize); 1 << n];
    let (x_min, x_max, y_min, y_max) = circle_bounds(circles);

    for i in 0..ANCHOR_GRID {
        for j in 0..ANCHOR_GRID {
            let x = x_min + (x_max - x_min) * (i as f64 + 0.5) / ANCHOR_GRID as f64;
            let y = y_min + (y_max - y_min) * (j as f64 + 0.5) / ANCHOR_GRID as f64;
            let mask = circles
                .iter()
                .enumerate()
                .filter(|(_, c)| c.contains(x, y))
                .fold(0usize, |m, (k, _)| m | (1 << k));
            let entry = &mut sums[mask];
            entry.0 += x;
            entry.1 += y;
            entry.2 += 1;
        }
    }

    sums.into_iter()
        .map(|(sx, sy, count)| (count > 0).then(|| (sx / count as f64, sy / count as f64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Set {i}")).collect()
    }

    #[test]
    fn two_set_regions() {
        let sets = vec![GeneSet::parse("A,B,C,D"), GeneSet::parse("C,D,E")];
        let fig = venn_diagram(&sets, &labels(2), "V").unwrap();

        assert_eq!(fig.regions.len(), 3);
        assert_eq!(fig.region_size(0b01), 2);
        assert_eq!(fig.region_size(0b10), 1);
        assert_eq!(fig.region_size(0b11), 2);
        assert_eq!(fig.sizes, vec![4, 3]);
    }

    #[test]
    fn three_set_regions() {
        let sets = vec![
            GeneSet::parse("A,B,C,G"),
            GeneSet::parse("B,D,G"),
            GeneSet::parse("C,D,E,G"),
        ];
        let fig = venn_diagram(&sets, &labels(3), "V").unwrap();

        assert_eq!(fig.regions.len(), 7);
        assert_eq!(fig.region_size(0b001), 1); // A
        assert_eq!(fig.region_size(0b011), 1); // B
        assert_eq!(fig.region_size(0b101), 1); // C
        assert_eq!(fig.region_size(0b110), 1); // D
        assert_eq!(fig.region_size(0b100), 1); // E
        assert_eq!(fig.region_size(0b111), 1); // G
        assert_eq!(fig.region_size(0b010), 0);
        assert_eq!(fig.circles.len(), 3);
    }

    #[test]
    fn rejects_wrong_set_counts() {
        for n in [0usize, 1, 4, 5] {
            let sets: Vec<GeneSet> = (0..n).map(|i| GeneSet::parse(&format!("G{i}"))).collect();
            let err = venn_diagram(&sets, &labels(n), "V").unwrap_err();
            assert!(matches!(err, GenevizError::InvalidSetCount { count } if count == n));
        }
    }

    #[test]
    fn rejects_empty_set() {
        let sets = vec![GeneSet::parse("A"), GeneSet::parse(" , ")];
        let err = venn_diagram(&sets, &labels(2), "V").unwrap_err();
        assert!(matches!(err, GenevizError::EmptyGeneSet { ref label } if label == "Set 2"));
    }

    #[test]
    fn rejects_label_mismatch() {
        let sets = vec![GeneSet::parse("A"), GeneSet::parse("B")];
        let err = venn_diagram(&sets, &labels(3), "V").unwrap_err();
        assert!(matches!(err, GenevizError::LabelCountMismatch { sets: 2, labels: 3 }));
    }

    #[test]
    fn overlap_area_matches_intersection() {
        let (r1, r2) = ((10.0 / PI).sqrt(), (6.0 / PI).sqrt());
        let d = distance_for_overlap(r1, r2, 3.0);
        assert!((lens_area(r1, r2, d) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn disjoint_and_nested_sets() {
        let disjoint = vec![GeneSet::parse("A,B"), GeneSet::parse("C,D")];
        let fig = venn_diagram(&disjoint, &labels(2), "V").unwrap();
        let (a, b) = (fig.circles[0], fig.circles[1]);
        let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
        assert!(d >= a.r + b.r - 1e-9);
        assert!(fig.regions[2].anchor.is_none());

        let nested = vec![GeneSet::parse("A,B,C,D"), GeneSet::parse("A,B")];
        let fig = venn_diagram(&nested, &labels(2), "V").unwrap();
        assert_eq!(fig.region_size(0b10), 0);
        assert!(fig.regions[0].anchor.is_some());
        assert!(fig.regions[2].anchor.is_some());
    }
}
