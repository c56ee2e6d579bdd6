mod message;
mod reader;

pub use message::{
    parse_date_time, seconds_between, AlertInfo as EveAlertInfo, EventFields as EveEventFields,
    EventType as EveEventType, FlowInfo as EveFlowInfo, HttpInfo as EveHttpInfo,
    Message as EveMessage, Metadata as EveMetadata, Tcp as EveTcp,
};
pub use reader::EveReader;
