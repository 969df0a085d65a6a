//! Default plot options and the validators guarding them.
use crate::options::validator::{
    Validator, in_range, is_bool, is_integer, is_number, is_text, list_of_len, one_of,
};
use crate::types::OptionValue;

pub const BATCH_MODE: &str = "batch_mode";
pub const OUTPUT_FILE_TYPE: &str = "output_file_type";
pub const SAVE_TO_ROOT_FILE: &str = "save_to_root_file";
pub const USE_ATLAS_STYLE: &str = "use_atlas_style";
pub const DRAW_LEGEND: &str = "draw_legend";
pub const LEGEND_TEXT_SIZE: &str = "legend_text_size";
pub const LEGEND_X_VALUES: &str = "legend_x_values";
pub const LEGEND_Y_VALUES: &str = "legend_y_values";
pub const OPT_STAT: &str = "opt_stat";
pub const DRAW_GRID: &str = "draw_grid";
pub const RATIO_MAXIMUM: &str = "ratio_maximum";
pub const RATIO_MINIMUM: &str = "ratio_minimum";
pub const RATIO_XAXIS_NDIVISIONS: &str = "ratio_xaxis_ndivisions";
pub const RATIO_YAXIS_NDIVISIONS: &str = "ratio_yaxis_ndivisions";
pub const LINE_WIDTH_SCALE: &str = "line_width_scale";
pub const OVERRIDE_MINIMUM: &str = "override_minimum";
pub const OVERRIDE_MAXIMUM: &str = "override_maximum";
pub const MINIMUM_VALUE: &str = "minimum_value";
pub const MAXIMUM_VALUE: &str = "maximum_value";
pub const DO_ATLAS_LABEL: &str = "do_atlas_label";
pub const ATLAS_LABEL: &str = "atlas_label";
pub const RATIO_Y_LABEL: &str = "ratio_y_label";
pub const OMIT_TITLE: &str = "omit_title";
pub const LEGEND_AUTOMATIC_COLUMNS: &str = "legend_automatic_columns";
pub const LEGEND_N_COLUMNS: &str = "legend_n_columns";
pub const OVERALL_TEXT_SCALE: &str = "overall_text_scale";

pub const OUTPUT_FILE_TYPES: [&str; 7] = ["pdf", "png", "eps", "ps", "svg", "jpg", "root"];

pub fn default_options() -> Vec<(&'static str, OptionValue)> {
    vec![
        (BATCH_MODE, true.into()),
        (OUTPUT_FILE_TYPE, "pdf".into()),
        (SAVE_TO_ROOT_FILE, false.into()),
        (USE_ATLAS_STYLE, false.into()),
        (DRAW_LEGEND, true.into()),
        (LEGEND_TEXT_SIZE, 0.045.into()),
        (LEGEND_X_VALUES, vec![0.69, 0.86].into()),
        (LEGEND_Y_VALUES, vec![0.65, 0.85].into()),
        (OPT_STAT, 0.into()),
        (DRAW_GRID, false.into()),
        (RATIO_MAXIMUM, 2.0.into()),
        (RATIO_MINIMUM, 0.5.into()),
        (RATIO_XAXIS_NDIVISIONS, 306.into()),
        (RATIO_YAXIS_NDIVISIONS, 602.into()),
        (LINE_WIDTH_SCALE, 1.5.into()),
        (OVERRIDE_MINIMUM, false.into()),
        (OVERRIDE_MAXIMUM, false.into()),
        (MINIMUM_VALUE, 0.0.into()),
        (MAXIMUM_VALUE, 1.0.into()),
        (DO_ATLAS_LABEL, false.into()),
        (ATLAS_LABEL, "Preliminary".into()),
        (RATIO_Y_LABEL, "Ratio".into()),
        (OMIT_TITLE, false.into()),
        (LEGEND_AUTOMATIC_COLUMNS, true.into()),
        (LEGEND_N_COLUMNS, (-1).into()),
        (OVERALL_TEXT_SCALE, 1.5.into()),
    ]
}

pub fn default_validators() -> Vec<(&'static str, Validator)> {
    let mut validators = vec![
        (OUTPUT_FILE_TYPE, one_of(&OUTPUT_FILE_TYPES)),
        (LEGEND_TEXT_SIZE, in_range(0.0, 1.0)),
        (LEGEND_X_VALUES, list_of_len(2)),
        (LEGEND_Y_VALUES, list_of_len(2)),
        (OPT_STAT, is_integer()),
        (RATIO_MAXIMUM, is_number()),
        (RATIO_MINIMUM, is_number()),
        (RATIO_XAXIS_NDIVISIONS, is_integer()),
        (RATIO_YAXIS_NDIVISIONS, is_integer()),
        (LINE_WIDTH_SCALE, positive()),
        (MINIMUM_VALUE, is_number()),
        (MAXIMUM_VALUE, is_number()),
        (ATLAS_LABEL, is_text()),
        (RATIO_Y_LABEL, is_text()),
        (LEGEND_N_COLUMNS, is_integer()),
        (OVERALL_TEXT_SCALE, positive()),
    ];

    for key in [
        BATCH_MODE,
        SAVE_TO_ROOT_FILE,
        USE_ATLAS_STYLE,
        DRAW_LEGEND,
        DRAW_GRID,
        OVERRIDE_MINIMUM,
        OVERRIDE_MAXIMUM,
        DO_ATLAS_LABEL,
        OMIT_TITLE,
        LEGEND_AUTOMATIC_COLUMNS,
    ] {
        validators.push((key, is_bool()));
    }

    validators
}

fn positive() -> Validator {
    Validator::new("positive", |v| v.as_f64().is_some_and(|n| n > 0.0))
}
