//! # eve-flows
//!
//! Flatten suricata eve json output into one CSV row per flow. Records are grouped by
//! `flow_id`; `flow`, `alert`, `http` and `tcp` fields from every record of a flow are merged
//! into a single row.
//!
//! ```rust,no_run
//! # use eve_flows::prelude::*;
//! # use std::path::PathBuf;
//!
//! fn main() {
//!     let mut config = Config::default();
//!     config.input = PathBuf::from("/var/log/suricata/eve.json");
//!     config.output = PathBuf::from("flows.csv");
//!     config.columns = ColumnSet::Union;
//!
//!     let stats = eve_flows::convert(&config).expect("Failed to convert");
//!     println!("{}", stats);
//! }
//! ```
//!
//! Aggregation can also be driven record by record, without any file io:
//!
//! ```rust
//! # use eve_flows::prelude::*;
//! let mut flows = FlowAggregator::new(&Config::default());
//! flows.ingest_line(r#"{"flow_id":1,"event_type":"flow","flow":{"pkts_toserver":5}}"#);
//! flows.ingest_line(r#"{"flow_id":1,"event_type":"alert","alert":{"severity":2}}"#);
//!
//! let table = flows.finalize();
//! let row = table.row("1").expect("No flow");
//! assert_eq!(row.render("pkts_toserver"), "5");
//! assert_eq!(row.render("alert_severity"), "2");
//! ```
#![deny(unused_must_use, unused_imports, bare_trait_objects)]
mod aggregate;
pub mod config;
mod errors;
mod eve;
pub mod output;
mod serde_helpers;
mod value;

pub mod prelude {
    pub use super::aggregate::{AggregatedFlow, FlowAggregator, FlowTable, IngestOutcome, Stats};
    pub use super::config::columns;
    pub use super::config::{ColumnPolicy, ColumnSet, Config, FlowbitsMode, MergePolicy};
    pub use super::errors::Error;
    pub use super::eve::*;
    pub use super::output::CsvOutput;
    pub use super::value::FieldValue;

    pub use chrono;
}

use log::*;
use prelude::*;
use std::io::{BufRead, Write};

/// Aggregate every record `reader` yields. Io failures abort; bad lines are skipped and counted.
pub fn aggregate_reader<R: BufRead>(config: &Config, reader: R) -> Result<FlowTable, Error> {
    config.validate()?;
    aggregate(config, EveReader::from(reader))
}

/// Aggregate `reader` and write the resulting table as CSV to `writer`
pub fn convert_reader<R: BufRead, W: Write>(
    config: &Config,
    reader: R,
    writer: W,
) -> Result<Stats, Error> {
    let table = aggregate_reader(config, reader)?;
    let mut output = CsvOutput::new(writer);
    output.write_table(&table)?;
    Ok(table.stats().clone())
}

/// Read `config.input`, aggregate it and write `config.output`
pub fn convert(config: &Config) -> Result<Stats, Error> {
    config.validate()?;
    info!(
        "Converting {:?} (common fields: {}, event fields: {}, flowbits: {}, columns: {})",
        config.input,
        config.common_policy,
        config.event_policy,
        config.flowbits,
        config.columns.policy()
    );

    let reader = EveReader::from_path(&config.input)?;
    let table = aggregate(config, reader)?;

    let mut output = CsvOutput::from_path(&config.output)?;
    let rows = output.write_table(&table)?;
    info!("Wrote {} flows to {:?}", rows, config.output);

    Ok(table.stats().clone())
}

fn aggregate<R: BufRead>(config: &Config, mut reader: EveReader<R>) -> Result<FlowTable, Error> {
    let mut flows = FlowAggregator::new(config);
    for parsed in reader.by_ref() {
        flows.ingest_parsed(parsed?);
    }
    flows.skip_blank_lines(reader.blank());
    Ok(flows.finalize())
}
