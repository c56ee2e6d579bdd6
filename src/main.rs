use clap::Parser;
use eve_flows::prelude::*;
use log::*;
use std::path::PathBuf;

/// Flatten suricata eve json lines into one CSV row per flow id.
#[derive(Parser, Debug)]
#[command(name = "eve-flows", version, about, long_about = None)]
struct Cli {
    /// Eve json lines file to read
    #[arg(default_value = "eve.json")]
    input: PathBuf,

    /// CSV file to write
    #[arg(short, long, default_value = "flows.csv")]
    output: PathBuf,

    /// Merge policy for addresses, ports, protocol, timestamp and interface (first or last)
    #[arg(long, value_name = "POLICY", default_value_t = MergePolicy::FirstWins)]
    common: MergePolicy,

    /// Merge policy for flow, alert, http and tcp fields (first or last)
    #[arg(long, value_name = "POLICY", default_value_t = MergePolicy::LastWins)]
    event: MergePolicy,

    /// Render flowbits as a count or as a joined list (count or joined)
    #[arg(long, value_name = "MODE", default_value_t = FlowbitsMode::Count)]
    flowbits: FlowbitsMode,

    /// Fixed column list or the sorted union of every populated column (fixed or union)
    #[arg(long, value_name = "POLICY", default_value_t = ColumnPolicy::Fixed)]
    columns: ColumnPolicy,

    /// Explicit output column, repeat for more. Implies fixed columns.
    #[arg(long = "column", value_name = "NAME", conflicts_with = "legacy")]
    column: Vec<String>,

    /// Use the 27 column layout of the older flow exporter
    #[arg(long)]
    legacy: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config, Error> {
        let columns = match self.columns {
            ColumnPolicy::Union if self.legacy || !self.column.is_empty() => {
                return Err(Error::Config {
                    msg: "--column and --legacy need fixed columns".into(),
                })
            }
            ColumnPolicy::Union => ColumnSet::Union,
            ColumnPolicy::Fixed if self.legacy => ColumnSet::Fixed(columns::legacy_columns()),
            ColumnPolicy::Fixed if !self.column.is_empty() => ColumnSet::Fixed(self.column),
            ColumnPolicy::Fixed => ColumnSet::Fixed(columns::default_columns(self.flowbits)),
        };
        Ok(Config {
            input: self.input,
            output: self.output,
            common_policy: self.common,
            event_policy: self.event,
            flowbits: self.flowbits,
            columns,
        })
    }
}

fn run(cli: Cli) -> Result<Stats, Error> {
    let config = cli.into_config()?;
    eve_flows::convert(&config)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(stats) => info!("Done: {}", stats),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
