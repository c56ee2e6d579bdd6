use crate::errors::Error;
use crate::eve::EveMessage;

use log::*;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const BUFFER_SIZE: usize = 4_096;

/// Reads eve json lines one at a time.
///
/// The outer `Result` is an io failure on the underlying source, which ends the read. The inner
/// `Result` is the parse of a single line; a bad line does not stop the reader. Blank lines are
/// skipped and counted.
pub struct EveReader<R> {
    inner: R,
    buf: Vec<u8>,
    line: usize,
    blank: usize,
}

impl EveReader<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let f = File::open(path).map_err(Error::Io)?;
        info!("Reading eve records from {:?}", path);
        Ok(Self::from(BufReader::new(f)))
    }
}

impl<R> EveReader<R> {
    /// Number of lines consumed so far, blank lines included
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of whitespace-only lines skipped so far
    pub fn blank(&self) -> usize {
        self.blank
    }
}

impl<R: BufRead> From<R> for EveReader<R> {
    fn from(v: R) -> Self {
        Self {
            inner: v,
            buf: Vec::with_capacity(BUFFER_SIZE),
            line: 0,
            blank: 0,
        }
    }
}

impl<R: BufRead> Iterator for EveReader<R> {
    type Item = Result<Result<EveMessage, Error>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.inner.read_until(b'\n', &mut self.buf) {
                Err(e) => return Some(Err(Error::Io(e))),
                Ok(0) => return None,
                Ok(bytes_read) => {
                    self.line += 1;
                    trace!("Read {}B from line {}", bytes_read, self.line);

                    if self.buf.iter().all(|b| b.is_ascii_whitespace()) {
                        self.blank += 1;
                        continue;
                    }

                    let parsed = EveMessage::try_from(self.buf.as_slice());
                    if let Err(ref e) = parsed {
                        debug!("Skipping line {}: {}", self.line, e);
                    }
                    return Some(Ok(parsed));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ALERT: &str = r#"{"timestamp":"2017-12-18T10:48:14.627130-0700","flow_id":2061665895874790,"pcap_cnt":7,"event_type":"alert","src_ip":"10.151.223.136","src_port":26475,"dest_ip":"203.0.113.99","dest_port":80,"proto":"TCP","tx_id":0,"alert":{"action":"allowed","gid":4113433437,"signature_id":600074,"rev":1,"signature":"ProtectWise Canary Test 1.3 - Not Malicious","category":"","severity":3},"app_proto":"http"}"#;

    #[test]
    fn reads_eve() {
        let _ = env_logger::try_init();

        let input = format!("{}\n{}\n", ALERT, ALERT);

        let alerts: Result<Vec<_>, Error> = EveReader::from(Cursor::new(input)).collect();
        let alerts: Result<Vec<_>, Error> = alerts
            .expect("Failed to read lines")
            .into_iter()
            .collect();
        let alerts = alerts.expect("Failed to parse alerts");

        assert_eq!(alerts.len(), 2);
    }

    #[test]
    fn reads_last_line_without_newline() {
        let _ = env_logger::try_init();

        let input = format!("{}\r\n{}", ALERT, ALERT);

        let alerts: Vec<_> = EveReader::from(Cursor::new(input))
            .map(|r| r.expect("Failed to read line"))
            .collect();

        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn skips_blank_lines() {
        let _ = env_logger::try_init();

        let input = format!("\n   \n{}\n\n", ALERT);
        let mut reader = EveReader::from(Cursor::new(input));

        let first = reader.next().expect("No record").expect("Failed to read");
        assert!(first.is_ok());
        assert!(reader.next().is_none());
        assert_eq!(reader.line(), 4);
        assert_eq!(reader.blank(), 3);
    }

    #[test]
    fn reports_malformed_lines_and_continues() {
        let _ = env_logger::try_init();

        let mut bytes = Vec::new();
        bytes.extend_from_slice(ALERT.as_bytes());
        bytes.extend_from_slice(b"\n{\"flow_id\": 1, broken\n");
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        bytes.extend_from_slice(ALERT.as_bytes());
        bytes.push(b'\n');

        let results: Vec<_> = EveReader::from(Cursor::new(bytes))
            .map(|r| r.expect("Failed to read line"))
            .collect();

        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_err());
        assert!(results[3].is_ok());
    }
}
