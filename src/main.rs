//! ratioplot CLI entrypoint.
//!
//! Loads the ratio-plot defaults, applies command line flags and an optional
//! `--config` file, then prints and validates the resulting settings.
//! For programmatic use, prefer the library API (`ratioplot::RatioPlot`).

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    cli::run()
}
