mod alert;
mod date_format;
mod flow;
mod http;
mod metadata;
mod tcp;

pub use alert::AlertInfo;
pub use date_format::{parse_date_time, seconds_between};
pub use flow::FlowInfo;
pub use http::HttpInfo;
pub use metadata::Metadata;
pub use tcp::Tcp;

use crate::errors::Error;
use crate::serde_helpers::{
    deserialize_event_type, deserialize_flow_id, deserialize_scalar, deserialize_section,
};
use crate::value::FieldValue;
use serde::Deserialize;
use serde_json::Value;

/// Event types that carry fields into a flow row. Anything else is kept by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventType {
    Alert,
    Flow,
    Http,
    Tcp,
    Other(String),
}

impl From<&str> for EventType {
    fn from(v: &str) -> Self {
        match v {
            "alert" => Self::Alert,
            "flow" => Self::Flow,
            "http" => Self::Http,
            "tcp" => Self::Tcp,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alert => write!(f, "alert"),
            Self::Flow => write!(f, "flow"),
            Self::Http => write!(f, "http"),
            Self::Tcp => write!(f, "tcp"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Top level fields every eve record may carry, regardless of event type
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EventFields {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub timestamp: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub src_ip: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub src_port: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub dest_ip: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub dest_port: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub proto: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub app_proto: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub in_iface: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub community_id: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub vlan: Option<FieldValue>,
}

/// One eve record. Every field is optional; a line only has to be a json object to parse.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "deserialize_flow_id")]
    pub flow_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_event_type")]
    pub event_type: Option<EventType>,
    #[serde(flatten)]
    pub event_fields: EventFields,
    #[serde(default, deserialize_with = "deserialize_section")]
    pub flow: Option<FlowInfo>,
    #[serde(default, deserialize_with = "deserialize_section")]
    pub alert: Option<AlertInfo>,
    #[serde(default, deserialize_with = "deserialize_section")]
    pub http: Option<HttpInfo>,
    #[serde(default, deserialize_with = "deserialize_section")]
    pub tcp: Option<Tcp>,
    #[serde(default, deserialize_with = "deserialize_section")]
    pub metadata: Option<Metadata>,
}

impl std::convert::TryFrom<&[u8]> for Message {
    type Error = Error;
    fn try_from(v: &[u8]) -> Result<Self, Self::Error> {
        log::trace!("Deserializing {}", String::from_utf8_lossy(v));
        let value: Value = serde_json::from_slice(v).map_err(|e| {
            let s = String::from_utf8_lossy(v);
            log::debug!("Failed to deserialize: {}", s);
            Error::from(e)
        })?;
        if !value.is_object() {
            return Err(Error::Custom {
                msg: format!("Eve record is not a json object: {}", value),
            });
        }
        serde_json::from_value(value).map_err(Error::from)
    }
}

impl std::convert::TryFrom<&str> for Message {
    type Error = Error;
    fn try_from(v: &str) -> Result<Self, Self::Error> {
        Message::try_from(v.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn should_deserialize_eve_alert() {
        let msg = r#"{"timestamp":"2017-12-18T10:48:14.627130-0700","flow_id":2061665895874790,"pcap_cnt":7,"event_type":"alert","src_ip":"10.151.223.136","src_port":26475,"dest_ip":"203.0.113.99","dest_port":80,"proto":"TCP","tx_id":0,"alert":{"action":"allowed","gid":4113433437,"signature_id":600074,"rev":1,"signature":"ProtectWise Canary Test 1.3 - Not Malicious","category":"","severity":3},"app_proto":"http","flow":{"pkts_toserver":4,"pkts_toclient":3,"bytes_toserver":582,"bytes_toclient":302,"start":"2017-12-18T10:48:14.622822-0700"}}"#;

        let eve = Message::try_from(msg).expect("Failed to read eve message");

        assert_eq!(eve.flow_id.as_deref(), Some("2061665895874790"));
        assert_eq!(eve.event_type, Some(EventType::Alert));
        assert_eq!(
            eve.event_fields.src_ip,
            Some(FieldValue::from("10.151.223.136"))
        );
        assert_eq!(eve.event_fields.src_port, Some(FieldValue::Unsigned(26475)));
        assert_eq!(eve.event_fields.app_proto, Some(FieldValue::from("http")));

        let alert = eve.alert.expect("Not an alert");
        assert_eq!(alert.signature_id, Some(FieldValue::Unsigned(600074)));
        assert_eq!(alert.severity, Some(FieldValue::Unsigned(3)));
        assert_eq!(alert.category, Some(FieldValue::from("")));
    }

    #[test]
    fn should_deserialize_eve_flow() {
        let msg = r#"{"timestamp":"1969-12-31T17:00:00.000000-0700","flow_id":1042873772049837,"event_type":"flow","src_ip":"10.10.10.30","src_port":57656,"dest_ip":"10.10.10.10","dest_port":102,"proto":"TCP","flow":{"pkts_toserver":3,"pkts_toclient":8,"bytes_toserver":186,"bytes_toclient":480,"start":"2015-10-20T11:24:10.230829-0600","end":"2015-10-20T11:24:46.195059-0600","age":36,"state":"closed","reason":"shutdown","alerted":false},"tcp":{"tcp_flags":"16","tcp_flags_ts":"16","tcp_flags_tc":"16","syn":true,"rst":true,"ack":true,"state":"closed"}}"#;

        let eve = Message::try_from(msg).expect("Failed to read eve message");

        assert_eq!(eve.event_type, Some(EventType::Flow));
        assert!(eve.event_fields.app_proto.is_none());

        let flow = eve.flow.expect("Not flow");
        assert_eq!(flow.pkts_toserver, Some(FieldValue::Unsigned(3)));
        assert_eq!(flow.alerted, Some(FieldValue::Bool(false)));
        assert_eq!(flow.reason, Some(FieldValue::from("shutdown")));

        let tcp = eve.tcp.expect("No tcp");
        assert_eq!(tcp.tcp_flags, Some(FieldValue::from("16")));
        assert_eq!(tcp.rst, Some(FieldValue::Bool(true)));
        assert!(tcp.fin.is_none());
    }

    #[test]
    fn should_decode_http() {
        let msg = r#"{"timestamp":"2020-08-05T13:32:29.341318+0000","flow_id":1925256485615034,"event_type":"http","src_ip":"16.0.0.1","src_port":41668,"dest_ip":"48.0.0.1","dest_port":80,"proto":"TCP","tx_id":0,"community_id":"1:p1ceBUuGcR8ILP4a2kUZp97NUQM=","http":{"hostname":"22.0.0.3","url":"/3384","http_user_agent":"Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 5.1; SV1; .NET CLR 1.1.4322; .NET CLR 2.0.50727)","http_content_type":"text/html","http_method":"GET","status":200,"length":32000,"request_headers":[{"name":"Host","value":"22.0.0.3"}]}}"#;

        let eve = Message::try_from(msg).expect("Failed to read eve message");

        assert_eq!(
            eve.event_fields.community_id,
            Some(FieldValue::from("1:p1ceBUuGcR8ILP4a2kUZp97NUQM="))
        );
        let http = eve.http.expect("Not http");
        assert_eq!(http.hostname, Some(FieldValue::from("22.0.0.3")));
        assert_eq!(http.status, Some(FieldValue::Unsigned(200)));
        assert!(http.protocol.is_none());
    }

    #[test]
    fn should_keep_unknown_event_types() {
        let msg = r#"{"timestamp":"2015-10-20T16:08:08.083366-0600","flow_id":2002523053901222,"event_type":"dns","src_ip":"192.168.89.2","src_port":36414,"dest_ip":"8.8.8.8","dest_port":53,"proto":"UDP","dns":{"type":"query","id":25510,"rrname":"localhost","rrtype":"A","tx_id":0}}"#;

        let eve = Message::try_from(msg).expect("Failed to read eve message");

        assert_eq!(eve.event_type, Some(EventType::Other("dns".to_owned())));
        assert_eq!(eve.event_fields.proto, Some(FieldValue::from("UDP")));
    }

    #[test]
    fn should_tolerate_odd_field_types() {
        let msg = r#"{"flow_id":"7","event_type":42,"vlan":[100,200],"flow":"not a section","metadata":{"flowbits":["ET-POLICY","TOR"]}}"#;

        let eve = Message::try_from(msg).expect("Failed to read eve message");

        assert_eq!(eve.flow_id.as_deref(), Some("7"));
        assert!(eve.event_type.is_none());
        assert!(eve.flow.is_none());
        assert_eq!(eve.event_fields.vlan, Some(FieldValue::from("100,200")));
        assert_eq!(
            eve.metadata.and_then(|m| m.flowbits),
            Some(vec!["ET-POLICY".to_owned(), "TOR".to_owned()])
        );
    }

    #[test]
    fn should_reject_malformed_lines() {
        assert!(matches!(
            Message::try_from(r#"{"flow_id":1,"event_type":"#),
            Err(Error::SerdeJson(_))
        ));
        assert!(matches!(
            Message::try_from("[1,2,3]"),
            Err(Error::Custom { .. })
        ));
        assert!(Message::try_from(&[0xffu8, 0xfe][..]).is_err());
    }
}
