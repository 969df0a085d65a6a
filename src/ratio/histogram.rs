//! Minimal 1-D histogram: bin edges, contents and per-bin errors.
use ndarray::{Array1, Zip};

use crate::error::{Error, Result};

/// Drawing attributes carried along for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramStyle {
    pub line_color: u32,
    pub marker_style: u32,
    pub line_width: f64,
}

impl Default for HistogramStyle {
    fn default() -> Self {
        Self {
            line_color: 1,
            marker_style: 20,
            line_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub style: HistogramStyle,
    edges: Array1<f64>,
    contents: Array1<f64>,
    errors: Array1<f64>,
}

impl Histogram {
    /// Empty histogram over `edges` (strictly increasing, at least two).
    pub fn new(name: impl Into<String>, edges: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if edges.len() < 2 {
            return Err(Error::InvalidBinEdges {
                name,
                reason: format!("need at least two edges, got {}", edges.len()),
            });
        }
        if edges.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(Error::InvalidBinEdges {
                name,
                reason: "edges must be strictly increasing".to_string(),
            });
        }

        let bins = edges.len() - 1;
        Ok(Self {
            title: name.clone(),
            name,
            x_label: String::new(),
            y_label: String::new(),
            style: HistogramStyle::default(),
            edges: Array1::from(edges),
            contents: Array1::zeros(bins),
            errors: Array1::zeros(bins),
        })
    }

    /// `bins` equal-width bins over `[low, high)`.
    pub fn uniform(name: impl Into<String>, bins: usize, low: f64, high: f64) -> Result<Self> {
        let edges = Array1::linspace(low, high, bins + 1).to_vec();
        Self::new(name, edges)
    }

    /// Histogram with Poisson errors (`sqrt(content)`).
    pub fn from_counts(name: impl Into<String>, edges: Vec<f64>, counts: Vec<f64>) -> Result<Self> {
        let mut hist = Self::new(name, edges)?;
        if counts.len() != hist.bins() {
            let reason = format!("{} counts for {} bins", counts.len(), hist.bins());
            return Err(Error::InvalidBinEdges {
                name: hist.name,
                reason,
            });
        }
        hist.contents = Array1::from(counts);
        hist.errors = hist.contents.mapv(|c| c.abs().sqrt());
        Ok(hist)
    }

    pub fn bins(&self) -> usize {
        self.contents.len()
    }

    pub fn edges(&self) -> &Array1<f64> {
        &self.edges
    }

    pub fn contents(&self) -> &Array1<f64> {
        &self.contents
    }

    pub fn errors(&self) -> &Array1<f64> {
        &self.errors
    }

    pub fn x_min(&self) -> f64 {
        self.edges[0]
    }

    pub fn x_max(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Bin index containing `x`; the last edge is exclusive.
    pub fn find_bin(&self, x: f64) -> Option<usize> {
        if !(x >= self.x_min() && x < self.x_max()) {
            return None;
        }
        let upper = self.edges.iter().position(|&edge| edge > x)?;
        Some(upper - 1)
    }

    /// Add `weight` at `x`. Values outside the axis are dropped.
    pub fn fill(&mut self, x: f64, weight: f64) -> Option<usize> {
        let bin = self.find_bin(x)?;
        self.contents[bin] += weight;
        let err = self.errors[bin];
        self.errors[bin] = (err * err + weight * weight).sqrt();
        Some(bin)
    }

    pub fn maximum(&self) -> f64 {
        self.contents.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn minimum(&self) -> f64 {
        self.contents.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn scale(&mut self, factor: f64) {
        self.contents *= factor;
        self.errors *= factor.abs();
    }

    fn same_binning(&self, other: &Histogram) -> bool {
        self.edges.len() == other.edges.len()
            && self
                .edges
                .iter()
                .zip(other.edges.iter())
                .all(|(a, b)| (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0))
    }

    /// Bin-wise `self / denominator` with uncorrelated error propagation.
    /// Bins with an empty denominator are set to zero.
    pub fn divide(&self, denominator: &Histogram, name: impl Into<String>) -> Result<Histogram> {
        if !self.same_binning(denominator) {
            return Err(Error::BinningMismatch {
                numerator: self.name.clone(),
                denominator: denominator.name.clone(),
            });
        }

        let mut ratio = self.clone();
        ratio.name = name.into();
        ratio.title = String::new();

        Zip::from(&mut ratio.contents)
            .and(&mut ratio.errors)
            .and(&self.contents)
            .and(&self.errors)
            .and(&denominator.contents)
            .and(&denominator.errors)
            .for_each(|content, error, &a, &ea, &b, &eb| {
                if b == 0.0 {
                    *content = 0.0;
                    *error = 0.0;
                } else {
                    let b2 = b * b;
                    *content = a / b;
                    *error = ((ea * ea * b2 + eb * eb * a * a) / (b2 * b2)).sqrt();
                }
            });

        Ok(ratio)
    }
}
