//! Groups eve records by flow id and flattens them into one row per flow.
//!
//! Aggregation is two passes. `FlowAggregator::ingest` builds rows as records arrive, and
//! `FlowAggregator::finalize` resolves the output columns once the input is exhausted. Nothing is
//! emitted before `finalize`.
mod flow;
mod table;

pub use flow::AggregatedFlow;
pub use table::{FlowTable, Stats};

use crate::config::columns::*;
use crate::config::{ColumnSet, Config, FlowbitsMode, MergePolicy};
use crate::errors::Error;
use crate::eve::{
    seconds_between, EveAlertInfo, EveEventFields, EveEventType, EveFlowInfo, EveHttpInfo,
    EveMessage, EveTcp,
};
use crate::value::FieldValue;

use log::*;
use std::collections::{BTreeSet, HashMap};
use std::convert::TryFrom;

/// What happened to a single input line or record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Merged into the row for its flow id
    Merged,
    /// No flow id, dropped
    MissingFlowId,
    /// Not a parseable eve record, dropped and counted
    Malformed,
    /// Nothing but whitespace
    Blank,
}

pub struct FlowAggregator {
    common_policy: MergePolicy,
    event_policy: MergePolicy,
    flowbits: FlowbitsMode,
    columns: ColumnSet,
    index: HashMap<String, usize>,
    flows: Vec<AggregatedFlow>,
    stats: Stats,
}

impl FlowAggregator {
    pub fn new(config: &Config) -> Self {
        Self {
            common_policy: config.common_policy,
            event_policy: config.event_policy,
            flowbits: config.flowbits,
            columns: config.columns.clone(),
            index: HashMap::default(),
            flows: vec![],
            stats: Stats::default(),
        }
    }

    /// Distinct flow ids seen so far
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Parse and ingest one raw line. Never fails: bad input is classified, counted and dropped.
    pub fn ingest_line(&mut self, line: &str) -> IngestOutcome {
        if line.trim().is_empty() {
            self.skip_blank_lines(1);
            return IngestOutcome::Blank;
        }
        self.ingest_parsed(EveMessage::try_from(line))
    }

    /// Count `n` whitespace-only lines that were skipped before reaching the aggregator
    pub fn skip_blank_lines(&mut self, n: usize) {
        self.stats.lines += n;
        self.stats.blank += n;
    }

    /// Ingest the result of parsing one line, e.g. an item from `EveReader`
    pub fn ingest_parsed(&mut self, parsed: Result<EveMessage, Error>) -> IngestOutcome {
        match parsed {
            Ok(message) => self.ingest(message),
            Err(e) => {
                trace!("Malformed record: {}", e);
                self.stats.lines += 1;
                self.stats.malformed += 1;
                IngestOutcome::Malformed
            }
        }
    }

    pub fn ingest(&mut self, message: EveMessage) -> IngestOutcome {
        self.stats.lines += 1;

        let EveMessage {
            flow_id,
            event_type,
            event_fields,
            flow,
            alert,
            http,
            tcp,
            metadata,
        } = message;

        let flow_id = match flow_id {
            Some(id) if !id.is_empty() => id,
            _ => {
                self.stats.missing_flow_id += 1;
                return IngestOutcome::MissingFlowId;
            }
        };

        let common_policy = self.common_policy;
        let event_policy = self.event_policy;
        let flowbits = self.flowbits;
        let row = self.row_mut(flow_id);

        merge_common(row, event_fields, common_policy);

        let mut duration_failed = false;
        match event_type {
            Some(EveEventType::Flow) => {
                if let Some(info) = flow {
                    duration_failed = !merge_flow(row, info, event_policy);
                }
            }
            Some(EveEventType::Alert) => {
                if let Some(info) = alert {
                    merge_alert(row, info, event_policy);
                }
            }
            Some(EveEventType::Http) => {
                if let Some(info) = http {
                    merge_http(row, info, event_policy);
                }
            }
            Some(EveEventType::Tcp) | Some(EveEventType::Other(_)) | None => {}
        }

        // tcp rides along on flow events as well as its own event type
        if let Some(tcp) = tcp {
            merge_tcp(row, tcp, event_policy);
        }

        if let Some(bits) = metadata.and_then(|m| m.flowbits) {
            let value = match flowbits {
                FlowbitsMode::Count => FieldValue::from(bits.len() as u64),
                FlowbitsMode::Joined => FieldValue::Text(bits.join(",")),
            };
            row.merge(flowbits.column(), Some(value), event_policy);
        }

        if duration_failed {
            self.stats.duration_errors += 1;
        }
        self.stats.merged += 1;
        IngestOutcome::Merged
    }

    /// Resolve the output columns and hand back every row in first-seen order
    pub fn finalize(self) -> FlowTable {
        let columns = match self.columns {
            ColumnSet::Fixed(list) => list,
            ColumnSet::Union => {
                let populated: BTreeSet<&'static str> = self
                    .flows
                    .iter()
                    .flat_map(|f| f.columns())
                    .filter(|c| *c != FLOW_ID)
                    .collect();
                std::iter::once(FLOW_ID)
                    .chain(populated)
                    .map(String::from)
                    .collect()
            }
        };

        let mut stats = self.stats;
        stats.flows = self.flows.len();
        info!("Aggregated {}", stats);

        FlowTable {
            columns,
            rows: self.flows,
            stats,
        }
    }

    fn row_mut(&mut self, flow_id: String) -> &mut AggregatedFlow {
        let idx = match self.index.get(&flow_id).copied() {
            Some(idx) => idx,
            None => {
                debug!("New flow {}", flow_id);
                let idx = self.flows.len();
                self.flows.push(AggregatedFlow::new(flow_id.clone()));
                self.index.insert(flow_id, idx);
                idx
            }
        };
        &mut self.flows[idx]
    }
}

fn merge_common(row: &mut AggregatedFlow, fields: EveEventFields, policy: MergePolicy) {
    row.merge(TIMESTAMP, fields.timestamp, policy);
    row.merge(SRC_IP, fields.src_ip, policy);
    row.merge(SRC_PORT, fields.src_port, policy);
    row.merge(DEST_IP, fields.dest_ip, policy);
    row.merge(DEST_PORT, fields.dest_port, policy);
    row.merge(PROTO, fields.proto, policy);
    row.merge(APP_PROTO, fields.app_proto, policy);
    row.merge(IN_IFACE, fields.in_iface, policy);
    row.merge(COMMUNITY_ID, fields.community_id, policy);
    row.merge(VLAN, fields.vlan, policy);
}

/// Returns false when the row's start and end cells are both set but give no duration
fn merge_flow(row: &mut AggregatedFlow, info: EveFlowInfo, policy: MergePolicy) -> bool {
    let touches_times = info.start.is_some() || info.end.is_some();

    row.merge(PKTS_TOSERVER, info.pkts_toserver, policy);
    row.merge(PKTS_TOCLIENT, info.pkts_toclient, policy);
    row.merge(BYTES_TOSERVER, info.bytes_toserver, policy);
    row.merge(BYTES_TOCLIENT, info.bytes_toclient, policy);
    row.merge(FLOW_STATE, info.state, policy);
    row.merge(FLOW_REASON, info.reason, policy);
    row.merge(FLOW_AGE, info.age, policy);
    row.merge(FLOW_START, info.start, policy);
    row.merge(FLOW_END, info.end, policy);
    row.merge(FLOW_ALERTED, info.alerted, policy);

    if !touches_times {
        return true;
    }

    // duration always follows the start/end cells the row ended up with
    let duration = match (row.get(FLOW_START), row.get(FLOW_END)) {
        (Some(start), Some(end)) => seconds_between(start, end),
        _ => return true,
    };
    match duration {
        Ok(secs) => {
            row.merge(DURATION, Some(FieldValue::Float(secs)), MergePolicy::LastWins);
            true
        }
        Err(e) => {
            debug!("No duration for flow {}: {}", row.flow_id(), e);
            row.clear(DURATION);
            false
        }
    }
}

fn merge_alert(row: &mut AggregatedFlow, info: EveAlertInfo, policy: MergePolicy) {
    row.merge(ALERT_SIGNATURE, info.signature, policy);
    row.merge(ALERT_SIGNATURE_ID, info.signature_id, policy);
    row.merge(ALERT_SEVERITY, info.severity, policy);
    row.merge(ALERT_ACTION, info.action, policy);
    row.merge(ALERT_CATEGORY, info.category, policy);
    row.merge(ALERT_GID, info.gid, policy);
    row.merge(ALERT_REV, info.rev, policy);
}

fn merge_http(row: &mut AggregatedFlow, info: EveHttpInfo, policy: MergePolicy) {
    row.merge(HTTP_METHOD, info.http_method, policy);
    row.merge(HTTP_URL, info.url, policy);
    row.merge(HTTP_STATUS, info.status, policy);
    row.merge(HTTP_LENGTH, info.length, policy);
    row.merge(HTTP_USER_AGENT, info.http_user_agent, policy);
    row.merge(HTTP_HOST, info.hostname, policy);
    row.merge(HTTP_CONTENT_TYPE, info.http_content_type, policy);
    row.merge(HTTP_PROTOCOL, info.protocol, policy);
    row.merge(HTTP_REFER, info.http_refer, policy);
}

fn merge_tcp(row: &mut AggregatedFlow, tcp: EveTcp, policy: MergePolicy) {
    row.merge(TCP_FLAGS, tcp.tcp_flags, policy);
    row.merge(TCP_FLAGS_TS, tcp.tcp_flags_ts, policy);
    row.merge(TCP_FLAGS_TC, tcp.tcp_flags_tc, policy);
    row.merge(TCP_SYN, tcp.syn, policy);
    row.merge(TCP_ACK, tcp.ack, policy);
    row.merge(TCP_FIN, tcp.fin, policy);
    row.merge(TCP_PSH, tcp.psh, policy);
    row.merge(TCP_RST, tcp.rst, policy);
    row.merge(TCP_STATE, tcp.state, policy);
}
