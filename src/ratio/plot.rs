use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::logging::{ConsoleLogger, LogLevel, Logger};
use crate::options::OptionStore;
use crate::types::OptionValue;

use super::histogram::Histogram;
use super::settings::*;

/// Legend rows per column when columns are chosen automatically.
const LEGEND_ROWS_PER_COLUMN: usize = 6;
const RATIO_LOG_MINIMUM: f64 = 0.1;
const MAXIMUM_HEADROOM: f64 = 1.15;
const MAXIMUM_HEADROOM_LOG_LABEL: f64 = 5.0;

/// Per-call drawing choices that are not stored as options.
#[derive(Debug, Clone)]
pub struct PlotRequest {
    pub output_file_name: String,
    pub canvas_name: String,
    pub log_scale: bool,
    pub ratio_log_scale: bool,
    /// `(numerator, denominator)` indices into the ordered histogram list.
    /// `None` divides every histogram by the first one.
    pub ratio_map: Option<Vec<(usize, usize)>>,
    pub plot_ratios: bool,
    pub sort: Option<fn(&str, &str) -> Ordering>,
}

impl PlotRequest {
    pub fn new(output_file_name: impl Into<String>) -> Self {
        Self {
            output_file_name: output_file_name.into(),
            canvas_name: "canvas".to_string(),
            log_scale: false,
            ratio_log_scale: false,
            ratio_map: None,
            plot_ratios: true,
            sort: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendLayout {
    pub x: [f64; 2],
    pub y: [f64; 2],
    pub text_size: f64,
    pub columns: usize,
    /// `"lp"` when ratios are drawn, `"l"` otherwise.
    pub entry_option: &'static str,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatioEntry {
    pub numerator: String,
    pub denominator: String,
    pub histogram: Histogram,
}

/// Everything a renderer needs; no further option lookups required.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPlan {
    pub output_path: PathBuf,
    pub output_file_type: String,
    pub canvas_name: String,
    pub batch_mode: bool,
    pub opt_stat: i64,
    pub show_title: bool,
    pub draw_grid: bool,
    pub log_scale: bool,
    pub ratio_log_scale: bool,
    /// Legend label and histogram, in drawing order. The first one owns the axes.
    pub histograms: Vec<(String, Histogram)>,
    pub y_maximum: f64,
    /// `None` on a logarithmic axis.
    pub y_minimum: Option<f64>,
    pub text_scale: f64,
    pub ratios: Vec<RatioEntry>,
    pub ratio_minimum: f64,
    /// `None` on a logarithmic ratio axis.
    pub ratio_maximum: Option<f64>,
    pub ratio_y_label: String,
    pub ratio_divisions: (i64, i64),
    /// Dashed line at 1 when there is no grid to read it from.
    pub draw_unity_line: bool,
    pub legend: Option<LegendLayout>,
    pub atlas_label: Option<String>,
}

/// The drawing backend. Implementations turn a plan into an image file.
pub trait PlotRenderer {
    fn render(&self, plan: &PlotPlan) -> Result<()>;
}

/// Several histograms superimposed, with a ratio panel underneath.
pub struct RatioPlot {
    options: OptionStore,
    histograms: Vec<(String, Histogram)>,
    logger: Arc<dyn Logger>,
}

impl Default for RatioPlot {
    fn default() -> Self {
        Self::new(Arc::new(ConsoleLogger))
    }
}

impl RatioPlot {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        let mut plot = Self {
            options: OptionStore::with_logger(Arc::clone(&logger)),
            histograms: Vec::new(),
            logger,
        };
        plot.load_defaults();
        plot
    }

    fn load_defaults(&mut self) {
        // fresh store and defaults that pass their own validators: cannot fail
        if let Err(e) =
            self.options
                .load_defaults_with(default_options(), default_validators(), false)
        {
            self.logger.log(
                &format!("Could not load the default plot options: {}", e),
                LogLevel::Error,
                false,
            );
        }
    }

    pub fn options(&self) -> &OptionStore {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut OptionStore {
        &mut self.options
    }

    /// Swap the sink for the plot and its option store.
    pub fn set_logger(&mut self, logger: Arc<dyn Logger>) {
        self.options.set_logger(Arc::clone(&logger));
        self.logger = logger;
    }

    pub fn load_options(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.options.parse_config_file(path)
    }

    pub fn print_settings(&self) {
        self.logger.log_rule(LogLevel::Info, false);
        self.options.print_options(LogLevel::Info);
        self.logger.log_rule(LogLevel::Info, false);
    }

    /// Add a histogram under `name_in_legend` (its own name if `None`).
    /// The styler runs before the histogram is stored. Reusing a legend
    /// name replaces that entry in place.
    pub fn add_histogram(
        &mut self,
        mut histogram: Histogram,
        name_in_legend: Option<&str>,
        styler: Option<&dyn Fn(&mut Histogram, &str)>,
    ) {
        let label = name_in_legend.unwrap_or(&histogram.name).to_string();

        if let Some(styler) = styler {
            styler(&mut histogram, &label);
        }

        match self.histograms.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = histogram,
            None => self.histograms.push((label, histogram)),
        }
    }

    pub fn histograms(&self) -> &[(String, Histogram)] {
        &self.histograms
    }

    pub fn plot(&self, request: &PlotRequest, renderer: &dyn PlotRenderer) -> Result<PathBuf> {
        let plan = self.plan(request)?;
        renderer.render(&plan)?;
        Ok(plan.output_path)
    }

    /// Resolve options and histograms into a [`PlotPlan`].
    pub fn plan(&self, request: &PlotRequest) -> Result<PlotPlan> {
        let count = self.histograms.len();
        self.logger.log(
            &format!(
                "Output file is named: {} and superimposes {} histograms.",
                request.output_file_name, count
            ),
            LogLevel::Info,
            false,
        );

        if count == 0 || (count < 2 && request.plot_ratios) {
            self.logger.log(
                "Need at least two histograms to create a ratio plot!",
                LogLevel::Warning,
                false,
            );
            return Err(Error::TooFewHistograms { count });
        }

        let mut histograms = self.histograms.clone();
        if let Some(sort) = request.sort {
            histograms.sort_by(|(a, _), (b, _)| sort(a, b));
        }

        let line_width_scale = self.number(LINE_WIDTH_SCALE)?;
        let ratios = if request.plot_ratios {
            self.ratios(&histograms, request.ratio_map.as_deref(), line_width_scale)?
        } else {
            Vec::new()
        };

        let first_width = histograms[0].1.style.line_width * line_width_scale;
        for (_, h) in histograms.iter_mut() {
            h.style.line_width = first_width;
        }
        if histograms[0].1.y_label.is_empty() {
            histograms[0].1.y_label = "Untitled".to_string();
        }

        let (y_maximum, y_minimum) = self.y_range(&histograms, request.log_scale)?;

        let ratio_minimum = self.number(RATIO_MINIMUM)?;
        let (ratio_minimum, ratio_maximum) = if request.ratio_log_scale {
            let minimum = if ratio_minimum > 0.0 {
                ratio_minimum
            } else {
                RATIO_LOG_MINIMUM
            };
            (minimum, None)
        } else {
            (ratio_minimum, Some(self.number(RATIO_MAXIMUM)?))
        };

        let draw_grid = self.flag(DRAW_GRID)?;
        let output_file_type = self.text(OUTPUT_FILE_TYPE)?;

        Ok(PlotPlan {
            output_path: PathBuf::from(format!(
                "{}.{}",
                request.output_file_name, output_file_type
            )),
            output_file_type,
            canvas_name: request.canvas_name.clone(),
            batch_mode: self.flag(BATCH_MODE)?,
            opt_stat: self.integer(OPT_STAT)?,
            show_title: !self.flag(OMIT_TITLE)?,
            draw_grid,
            log_scale: request.log_scale,
            ratio_log_scale: request.ratio_log_scale,
            legend: self.legend(&histograms, request.plot_ratios)?,
            histograms,
            y_maximum,
            y_minimum,
            text_scale: self.number(OVERALL_TEXT_SCALE)?,
            draw_unity_line: request.plot_ratios && !draw_grid,
            ratios,
            ratio_minimum,
            ratio_maximum,
            ratio_y_label: self.text(RATIO_Y_LABEL)?,
            ratio_divisions: (
                self.integer(RATIO_XAXIS_NDIVISIONS)?,
                self.integer(RATIO_YAXIS_NDIVISIONS)?,
            ),
            atlas_label: if self.flag(DO_ATLAS_LABEL)? {
                Some(self.text(ATLAS_LABEL)?)
            } else {
                None
            },
        })
    }

    fn y_range(&self, histograms: &[(String, Histogram)], log_scale: bool) -> Result<(f64, Option<f64>)> {
        let maximum = if self.flag(OVERRIDE_MAXIMUM)? {
            self.number(MAXIMUM_VALUE)?
        } else {
            histograms
                .iter()
                .map(|(_, h)| h.maximum())
                .fold(f64::NEG_INFINITY, f64::max)
        };

        let minimum = if self.flag(OVERRIDE_MINIMUM)? {
            self.number(MINIMUM_VALUE)?
        } else {
            histograms
                .iter()
                .map(|(_, h)| h.minimum())
                .fold(f64::INFINITY, f64::min)
        };

        let headroom = if log_scale && self.flag(DO_ATLAS_LABEL)? {
            MAXIMUM_HEADROOM_LOG_LABEL
        } else {
            MAXIMUM_HEADROOM
        };

        Ok((maximum * headroom, (!log_scale).then_some(minimum)))
    }

    fn ratios(
        &self,
        histograms: &[(String, Histogram)],
        ratio_map: Option<&[(usize, usize)]>,
        line_width_scale: f64,
    ) -> Result<Vec<RatioEntry>> {
        let default_map: Vec<(usize, usize)>;
        let pairs = match ratio_map {
            Some(map) => map,
            None => {
                default_map = (1..histograms.len()).map(|i| (i, 0)).collect();
                &default_map
            }
        };

        let mut ratios = Vec::with_capacity(pairs.len());
        for &(num, den) in pairs {
            let (Some((num_label, numerator)), Some((den_label, denominator))) =
                (histograms.get(num), histograms.get(den))
            else {
                self.logger.log(
                    &format!("Skipping ratio {} / {}: index out of range", num, den),
                    LogLevel::Debug,
                    false,
                );
                continue;
            };

            let mut histogram =
                numerator.divide(denominator, format!("{}/{}", num_label, den_label))?;
            histogram.style.line_width *= line_width_scale;
            ratios.push(RatioEntry {
                numerator: num_label.clone(),
                denominator: den_label.clone(),
                histogram,
            });
        }
        Ok(ratios)
    }

    fn legend(&self, histograms: &[(String, Histogram)], plot_ratios: bool) -> Result<Option<LegendLayout>> {
        if !self.flag(DRAW_LEGEND)? {
            return Ok(None);
        }

        let labels: Vec<String> = histograms.iter().map(|(l, _)| l.clone()).collect();
        let columns = if self.flag(LEGEND_AUTOMATIC_COLUMNS)? {
            labels.len().div_ceil(LEGEND_ROWS_PER_COLUMN).max(1)
        } else {
            usize::try_from(self.integer(LEGEND_N_COLUMNS)?)
                .ok()
                .filter(|&n| n > 0)
                .unwrap_or(1)
        };

        Ok(Some(LegendLayout {
            x: self.pair(LEGEND_X_VALUES)?,
            y: self.pair(LEGEND_Y_VALUES)?,
            text_size: self.number(LEGEND_TEXT_SIZE)?,
            columns,
            entry_option: if plot_ratios { "lp" } else { "l" },
            labels,
        }))
    }

    /// Read `key` through `read`, failing with `InvalidOption` when the key
    /// is missing or holds the wrong kind of value.
    fn typed<T>(
        &self,
        key: &str,
        expected: &'static str,
        read: impl FnOnce(&OptionValue) -> Option<T>,
    ) -> Result<T> {
        let invalid = || Error::InvalidOption {
            key: key.to_string(),
            expected,
        };
        let value = self.options.get(key).ok_or_else(invalid)?;
        read(value).ok_or_else(|| {
            self.logger.log(
                &format!(
                    "Option {} holds a {} ({}), expected {}",
                    key,
                    value.type_name(),
                    value,
                    expected
                ),
                LogLevel::Error,
                false,
            );
            invalid()
        })
    }

    fn flag(&self, key: &str) -> Result<bool> {
        self.typed(key, "a boolean", OptionValue::as_bool)
    }

    fn number(&self, key: &str) -> Result<f64> {
        self.typed(key, "a number", OptionValue::as_f64)
    }

    fn integer(&self, key: &str) -> Result<i64> {
        self.typed(key, "an integer", OptionValue::as_i64)
    }

    fn text(&self, key: &str) -> Result<String> {
        self.typed(key, "text", |v| v.as_str().map(str::to_string))
    }

    fn pair(&self, key: &str) -> Result<[f64; 2]> {
        self.typed(key, "a list of two numbers", |v| match v.as_f64_list().as_deref() {
            Some(&[a, b]) => Some([a, b]),
            _ => None,
        })
    }
}
