//! Output column names.

use crate::config::FlowbitsMode;

pub const FLOW_ID: &str = "flow_id";

pub const TIMESTAMP: &str = "timestamp";
pub const SRC_IP: &str = "src_ip";
pub const SRC_PORT: &str = "src_port";
pub const DEST_IP: &str = "dest_ip";
pub const DEST_PORT: &str = "dest_port";
pub const PROTO: &str = "proto";
pub const APP_PROTO: &str = "app_proto";
pub const IN_IFACE: &str = "in_iface";
pub const COMMUNITY_ID: &str = "community_id";
pub const VLAN: &str = "vlan";

pub const PKTS_TOSERVER: &str = "pkts_toserver";
pub const PKTS_TOCLIENT: &str = "pkts_toclient";
pub const BYTES_TOSERVER: &str = "bytes_toserver";
pub const BYTES_TOCLIENT: &str = "bytes_toclient";
pub const FLOW_STATE: &str = "flow_state";
pub const FLOW_REASON: &str = "flow_reason";
pub const FLOW_AGE: &str = "flow_age";
pub const FLOW_START: &str = "flow_start";
pub const FLOW_END: &str = "flow_end";
pub const FLOW_ALERTED: &str = "flow_alerted";
pub const DURATION: &str = "duration";

pub const TCP_FLAGS: &str = "tcp_flags";
pub const TCP_FLAGS_TS: &str = "tcp_flags_ts";
pub const TCP_FLAGS_TC: &str = "tcp_flags_tc";
pub const TCP_SYN: &str = "tcp_syn";
pub const TCP_ACK: &str = "tcp_ack";
pub const TCP_FIN: &str = "tcp_fin";
pub const TCP_PSH: &str = "tcp_psh";
pub const TCP_RST: &str = "tcp_rst";
pub const TCP_STATE: &str = "tcp_state";

pub const ALERT_SIGNATURE: &str = "alert_signature";
pub const ALERT_SIGNATURE_ID: &str = "alert_signature_id";
pub const ALERT_SEVERITY: &str = "alert_severity";
pub const ALERT_ACTION: &str = "alert_action";
pub const ALERT_CATEGORY: &str = "alert_category";
pub const ALERT_GID: &str = "alert_gid";
pub const ALERT_REV: &str = "alert_rev";

pub const HTTP_METHOD: &str = "http_method";
pub const HTTP_URL: &str = "http_url";
pub const HTTP_STATUS: &str = "http_status";
pub const HTTP_LENGTH: &str = "http_length";
pub const HTTP_USER_AGENT: &str = "http_user_agent";
pub const HTTP_HOST: &str = "http_host";
pub const HTTP_CONTENT_TYPE: &str = "http_content_type";
pub const HTTP_PROTOCOL: &str = "http_protocol";
pub const HTTP_REFER: &str = "http_refer";

pub const FLOWBITS: &str = "flowbits";
pub const FLOWBITS_COUNT: &str = "flowbits_count";

const COMMON: &[&str] = &[
    TIMESTAMP,
    SRC_IP,
    SRC_PORT,
    DEST_IP,
    DEST_PORT,
    PROTO,
    APP_PROTO,
    IN_IFACE,
    COMMUNITY_ID,
    VLAN,
];

const FLOW: &[&str] = &[
    PKTS_TOSERVER,
    PKTS_TOCLIENT,
    BYTES_TOSERVER,
    BYTES_TOCLIENT,
    FLOW_STATE,
    FLOW_REASON,
    FLOW_AGE,
    FLOW_START,
    FLOW_END,
    FLOW_ALERTED,
    DURATION,
];

const TCP: &[&str] = &[
    TCP_FLAGS,
    TCP_FLAGS_TS,
    TCP_FLAGS_TC,
    TCP_SYN,
    TCP_ACK,
    TCP_FIN,
    TCP_PSH,
    TCP_RST,
    TCP_STATE,
];

const ALERT: &[&str] = &[
    ALERT_SIGNATURE,
    ALERT_SIGNATURE_ID,
    ALERT_SEVERITY,
    ALERT_ACTION,
    ALERT_CATEGORY,
    ALERT_GID,
    ALERT_REV,
];

const HTTP: &[&str] = &[
    HTTP_METHOD,
    HTTP_URL,
    HTTP_STATUS,
    HTTP_LENGTH,
    HTTP_USER_AGENT,
    HTTP_HOST,
    HTTP_CONTENT_TYPE,
    HTTP_PROTOCOL,
    HTTP_REFER,
];

const LEGACY: &[&str] = &[
    FLOW_ID,
    TIMESTAMP,
    SRC_IP,
    SRC_PORT,
    DEST_IP,
    DEST_PORT,
    PROTO,
    APP_PROTO,
    IN_IFACE,
    PKTS_TOSERVER,
    PKTS_TOCLIENT,
    BYTES_TOSERVER,
    BYTES_TOCLIENT,
    FLOW_START,
    FLOW_END,
    DURATION,
    FLOW_STATE,
    TCP_FLAGS,
    ALERT_SIGNATURE,
    ALERT_SEVERITY,
    ALERT_ACTION,
    HTTP_METHOD,
    HTTP_URL,
    HTTP_STATUS,
    HTTP_USER_AGENT,
    HTTP_LENGTH,
    FLOWBITS_COUNT,
];

/// Every column the aggregator can fill, ending with the flowbits column for `mode`
pub fn default_columns(mode: FlowbitsMode) -> Vec<String> {
    std::iter::once(FLOW_ID)
        .chain(COMMON.iter().copied())
        .chain(FLOW.iter().copied())
        .chain(TCP.iter().copied())
        .chain(ALERT.iter().copied())
        .chain(HTTP.iter().copied())
        .chain(std::iter::once(mode.column()))
        .map(String::from)
        .collect()
}

/// Header of the single-file flow exporter this tool replaces. That exporter wrote `0` for a flow
/// without flowbits; here `flowbits_count` stays empty unless some record of the flow carried a
/// flowbits list. Only valid with `FlowbitsMode::Count`.
pub fn legacy_columns() -> Vec<String> {
    LEGACY.iter().copied().map(String::from).collect()
}
