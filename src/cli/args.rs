use ratioplot::ratio::settings::{
    DRAW_GRID, DRAW_LEGEND, OUTPUT_FILE_TYPE, OVERALL_TEXT_SCALE, RATIO_MAXIMUM, RATIO_MINIMUM,
};
use ratioplot::{OptionStore, OptionValue};

/// A flag the binary exposes on top of the built-in `--config` and `--debug`.
pub struct TerminalFlag {
    pub short: char,
    pub long: &'static str,
    pub help: &'static str,
    pub dest: &'static str,
}

pub const TERMINAL_FLAGS: [TerminalFlag; 6] = [
    TerminalFlag {
        short: 'o',
        long: "output-type",
        help: "Output file type (pdf, png, eps, ps, svg, jpg or root)",
        dest: OUTPUT_FILE_TYPE,
    },
    TerminalFlag {
        short: 'm',
        long: "ratio-max",
        help: "Upper bound of the ratio axis",
        dest: RATIO_MAXIMUM,
    },
    TerminalFlag {
        short: 'n',
        long: "ratio-min",
        help: "Lower bound of the ratio axis",
        dest: RATIO_MINIMUM,
    },
    TerminalFlag {
        short: 's',
        long: "text-scale",
        help: "Scale factor applied to all axis labels and titles",
        dest: OVERALL_TEXT_SCALE,
    },
    TerminalFlag {
        short: 'g',
        long: "grid",
        help: "Draw a grid on both pads (true/false)",
        dest: DRAW_GRID,
    },
    TerminalFlag {
        short: 'l',
        long: "legend",
        help: "Draw the legend (true/false)",
        dest: DRAW_LEGEND,
    },
];

/// Register every terminal flag, using the option's current value as default.
pub fn register_terminal_flags(options: &mut OptionStore) -> ratioplot::Result<()> {
    for flag in &TERMINAL_FLAGS {
        let default = options
            .get(flag.dest)
            .cloned()
            .unwrap_or(OptionValue::Bool(false));
        options.register_flag(flag.short, flag.long, flag.help, flag.dest, default)?;
    }
    Ok(())
}
