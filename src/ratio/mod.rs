//! Ratio-histogram plots: several histograms superimposed, with bin-wise
//! ratios underneath. This module resolves options and histograms into a
//! [`PlotPlan`]; drawing it is left to a [`PlotRenderer`] implementation.
pub mod histogram;
pub mod plot;
pub mod settings;

pub use histogram::{Histogram, HistogramStyle};
pub use plot::{LegendLayout, PlotPlan, PlotRenderer, PlotRequest, RatioEntry, RatioPlot};
