//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fwscope",
    version,
    about = "Turn firmware benchmark logs and linker maps into report tables",
    after_help = "\
EXAMPLES:
    fwscope uart.log                                  Print benchmark tables
    fwscope uart.log build/firmware.map               Add the flash/RAM footprint
    fwscope uart.log firmware.map --report docs/FINAL_REPORT.md
                                                      Update marked sections in place
    fwscope --dump-config > fwscope.toml              Start a custom config"
)]
pub struct Args {
    /// UART capture from the benchmark firmware
    #[arg(value_name = "LOG", required_unless_present = "dump_config")]
    pub log: Option<PathBuf>,

    /// Linker map of the firmware image (optional)
    #[arg(value_name = "MAP")]
    pub map: Option<PathBuf>,

    /// Report to update between <!-- NAME_START --> / <!-- NAME_END --> markers
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// TOML file overriding clock, capacities, catalog and baselines
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the aggregated dataset as JSON (for plotting)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Core clock in Hz used to convert cycles to milliseconds
    #[arg(long, value_name = "HZ")]
    pub clock_hz: Option<u64>,

    /// Tag preceding each result line in the log
    #[arg(long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Print Markdown tables instead of console tables
    #[arg(long, conflicts_with = "report")]
    pub markdown: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub dump_config: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}
