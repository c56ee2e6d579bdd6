//! CSV rendering of a `FlowTable`.

use crate::aggregate::FlowTable;
use crate::errors::Error;

use log::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub struct CsvOutput<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvOutput<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let p: &Path = path.as_ref();
        let f = File::create(p).map_err(Error::Io)?;
        debug!("Writing flows to {:?}", p);
        Ok(Self::new(f))
    }
}

impl<W: Write> CsvOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Write the header and one record per flow, then flush. Returns the number of rows written.
    pub fn write_table(&mut self, table: &FlowTable) -> Result<usize, Error> {
        self.writer.write_record(table.columns())?;
        let mut rows = 0;
        for record in table.records() {
            self.writer.write_record(&record)?;
            rows += 1;
        }
        self.writer.flush().map_err(Error::Io)?;
        trace!("Wrote {} rows", rows);
        Ok(rows)
    }

    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::FlowAggregator;
    use crate::config::{ColumnSet, Config};

    fn table(columns: ColumnSet, lines: &[&str]) -> FlowTable {
        let mut config = Config::default();
        config.columns = columns;
        let mut agg = FlowAggregator::new(&config);
        for line in lines {
            agg.ingest_line(line);
        }
        agg.finalize()
    }

    fn render(table: &FlowTable) -> String {
        let mut output = CsvOutput::new(vec![]);
        output.write_table(table).expect("Failed to write table");
        let bytes = output.into_inner().expect("Failed to get buffer");
        String::from_utf8(bytes).expect("Not utf8")
    }

    #[test]
    fn writes_header_and_rows() {
        let _ = env_logger::try_init();

        let table = table(
            ColumnSet::Fixed(vec!["flow_id".into(), "pkts_toserver".into(), "duration".into()]),
            &[
                r#"{"flow_id":1,"event_type":"flow","flow":{"pkts_toserver":5,"start":"2024-01-01T00:00:00.000000+0000","end":"2024-01-01T00:00:10.000000+0000"}}"#,
                r#"{"flow_id":2,"event_type":"alert","alert":{"severity":2}}"#,
            ],
        );

        assert_eq!(render(&table), "flow_id,pkts_toserver,duration\n1,5,10.0\n2,,\n");
    }

    #[test]
    fn quotes_cells_that_need_it() {
        let _ = env_logger::try_init();

        let table = table(
            ColumnSet::Fixed(vec!["flow_id".into(), "http_user_agent".into()]),
            &[
                r#"{"flow_id":1,"event_type":"http","http":{"http_user_agent":"Mozilla/4.0 (compatible; MSIE 7.0, \"quoted\")"}}"#,
            ],
        );

        assert_eq!(
            render(&table),
            "flow_id,http_user_agent\n1,\"Mozilla/4.0 (compatible; MSIE 7.0, \"\"quoted\"\")\"\n"
        );
    }

    #[test]
    fn writes_header_for_empty_input() {
        let _ = env_logger::try_init();

        let table = table(ColumnSet::Union, &[]);
        assert_eq!(render(&table), "flow_id\n");
    }
}
