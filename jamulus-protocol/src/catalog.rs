//! The static message catalog: symbolic name ↔ numeric id ↔ schema ↔
//! repeatable flag, for every message kind this toolkit understands.
//!
//! `AUDIO` is deliberately absent — it carries no main frame and is handled
//! directly by the endpoint layer.

use crate::field::FieldKind::{Bytes2, Ipv4, Rest, Str1, Str2, U16, U32, U8};
use crate::schema::Schema;

/// One entry of the static message table.
#[derive(Debug, Clone, Copy)]
pub struct MessageDef {
    pub name: &'static str,
    pub id: u16,
    pub schema: Schema,
    pub repeatable: bool,
}

const ACKN: Schema = &[("id", U16)];
const JITT_BUF_SIZE: Schema = &[("blocks", U16)];
const CHANNEL_GAIN: Schema = &[("id", U8), ("gain", U16)];
const CHAT_TEXT: Schema = &[("string", Str2)];
const NETW_TRANSPORT_PROPS: Schema = &[
    ("base_netw_size", U32),
    ("block_size_fact", U16),
    ("num_chan", U8),
    ("sam_rate", U32),
    ("audiocod_type", U16),
    ("flags", U16),
    ("audiocod_arg", U32),
];
const CHANNEL_INFOS: Schema = &[
    ("country", U16),
    ("instrument", U32),
    ("skill", U8),
    ("name", Str2),
    ("city", Str2),
];
const CONN_CLIENTS_LIST: Schema = &[
    ("id", U8),
    ("country", U16),
    ("instrument", U32),
    ("skill", U8),
    ("zero", U32),
    ("name", Str2),
    ("city", Str2),
];
const LICENCE_REQUIRED: Schema = &[("licence_type", U8)];
const REQ_CHANNEL_LEVEL_LIST: Schema = &[("data", U8)];
const VERSION_AND_OS: Schema = &[("os", U8), ("version", Str2)];
const CHANNEL_PAN: Schema = &[("id", U8), ("panning", U16)];
const MUTE_STATE_CHANGED: Schema = &[("id", U8), ("muted", U8)];
const CLIENT_ID: Schema = &[("id", U8)];
const RECORDER_STATE: Schema = &[("state", U8)];

const CLM_PING_MS: Schema = &[("time", U32)];
const CLM_PING_MS_WITHNUMCLIENTS: Schema = &[("time", U32), ("clients", U8)];
const CLM_REGISTER_SERVER: Schema = &[
    ("port", U16),
    ("country_id", U16),
    ("max_clients", U8),
    ("permanent", U8),
    ("name", Str2),
    ("internal_address", Str2),
    ("city", Str2),
];
const CLM_REGISTER_SERVER_EX: Schema = &[
    ("port", U16),
    ("country_id", U16),
    ("max_clients", U8),
    ("permanent", U8),
    ("name", Str2),
    ("internal_address", Str2),
    ("city", Str2),
    ("os", U8),
    ("version", Str2),
];
const CLM_SERVER_LIST: Schema = &[
    ("ip", Ipv4),
    ("port", U16),
    ("country_id", U16),
    ("max_clients", U8),
    ("permanent", U8),
    ("name", Str2),
    ("internal_address", Str2),
    ("city", Str2),
];
const CLM_RED_SERVER_LIST: Schema = &[("ip", Ipv4), ("port", U16), ("name", Str1)];
const CLM_SEND_EMPTY_MESSAGE: Schema = &[("ip", Ipv4), ("port", U16)];
const CLM_CHANNEL_LEVEL_LIST: Schema = &[("levels", Rest)];
const CLM_REGISTER_SERVER_RESP: Schema = &[("status", U8)];

const EMPTY: Schema = &[];

/// The full static catalog, in id order.
pub static CATALOG: &[MessageDef] = &[
    MessageDef { name: "ACKN", id: 1, schema: ACKN, repeatable: false },
    MessageDef { name: "JITT_BUF_SIZE", id: 10, schema: JITT_BUF_SIZE, repeatable: false },
    MessageDef { name: "REQ_JITT_BUF_SIZE", id: 11, schema: EMPTY, repeatable: false },
    MessageDef { name: "CHANNEL_GAIN", id: 13, schema: CHANNEL_GAIN, repeatable: false },
    MessageDef { name: "REQ_CONN_CLIENTS_LIST", id: 16, schema: EMPTY, repeatable: false },
    MessageDef { name: "CHAT_TEXT", id: 18, schema: CHAT_TEXT, repeatable: false },
    MessageDef { name: "NETW_TRANSPORT_PROPS", id: 20, schema: NETW_TRANSPORT_PROPS, repeatable: false },
    MessageDef { name: "REQ_NETW_TRANSPORT_PROPS", id: 21, schema: EMPTY, repeatable: false },
    MessageDef { name: "REQ_CHANNEL_INFOS", id: 23, schema: EMPTY, repeatable: false },
    MessageDef { name: "CONN_CLIENTS_LIST", id: 24, schema: CONN_CLIENTS_LIST, repeatable: true },
    MessageDef { name: "CHANNEL_INFOS", id: 25, schema: CHANNEL_INFOS, repeatable: false },
    MessageDef { name: "OPUS_SUPPORTED", id: 26, schema: EMPTY, repeatable: false },
    MessageDef { name: "LICENCE_REQUIRED", id: 27, schema: LICENCE_REQUIRED, repeatable: false },
    MessageDef { name: "REQ_CHANNEL_LEVEL_LIST", id: 28, schema: REQ_CHANNEL_LEVEL_LIST, repeatable: false },
    MessageDef { name: "VERSION_AND_OS", id: 29, schema: VERSION_AND_OS, repeatable: false },
    MessageDef { name: "CHANNEL_PAN", id: 30, schema: CHANNEL_PAN, repeatable: false },
    MessageDef { name: "MUTE_STATE_CHANGED", id: 31, schema: MUTE_STATE_CHANGED, repeatable: false },
    MessageDef { name: "CLIENT_ID", id: 32, schema: CLIENT_ID, repeatable: false },
    MessageDef { name: "RECORDER_STATE", id: 33, schema: RECORDER_STATE, repeatable: false },
    MessageDef { name: "REQ_SPLIT_MESS_SUPPORT", id: 34, schema: EMPTY, repeatable: false },
    MessageDef { name: "SPLIT_MESS_SUPPORTED", id: 35, schema: EMPTY, repeatable: false },
    MessageDef { name: "CLM_PING_MS", id: 1001, schema: CLM_PING_MS, repeatable: false },
    MessageDef { name: "CLM_PING_MS_WITHNUMCLIENTS", id: 1002, schema: CLM_PING_MS_WITHNUMCLIENTS, repeatable: false },
    MessageDef { name: "CLM_SERVER_FULL", id: 1003, schema: EMPTY, repeatable: false },
    MessageDef { name: "CLM_REGISTER_SERVER", id: 1004, schema: CLM_REGISTER_SERVER, repeatable: false },
    MessageDef { name: "CLM_UNREGISTER_SERVER", id: 1005, schema: EMPTY, repeatable: false },
    MessageDef { name: "CLM_SERVER_LIST", id: 1006, schema: CLM_SERVER_LIST, repeatable: true },
    MessageDef { name: "CLM_REQ_SERVER_LIST", id: 1007, schema: EMPTY, repeatable: false },
    MessageDef { name: "CLM_SEND_EMPTY_MESSAGE", id: 1008, schema: CLM_SEND_EMPTY_MESSAGE, repeatable: false },
    MessageDef { name: "CLM_EMPTY_MESSAGE", id: 1009, schema: EMPTY, repeatable: false },
    MessageDef { name: "CLM_DISCONNECTION", id: 1010, schema: EMPTY, repeatable: false },
    MessageDef { name: "CLM_VERSION_AND_OS", id: 1011, schema: VERSION_AND_OS, repeatable: false },
    MessageDef { name: "CLM_REQ_VERSION_AND_OS", id: 1012, schema: EMPTY, repeatable: false },
    MessageDef { name: "CLM_CONN_CLIENTS_LIST", id: 1013, schema: CONN_CLIENTS_LIST, repeatable: true },
    MessageDef { name: "CLM_REQ_CONN_CLIENTS_LIST", id: 1014, schema: EMPTY, repeatable: false },
    MessageDef { name: "CLM_CHANNEL_LEVEL_LIST", id: 1015, schema: CLM_CHANNEL_LEVEL_LIST, repeatable: false },
    MessageDef { name: "CLM_REGISTER_SERVER_RESP", id: 1016, schema: CLM_REGISTER_SERVER_RESP, repeatable: false },
    MessageDef { name: "CLM_REGISTER_SERVER_EX", id: 1017, schema: CLM_REGISTER_SERVER_EX, repeatable: false },
    MessageDef { name: "CLM_RED_SERVER_LIST", id: 1018, schema: CLM_RED_SERVER_LIST, repeatable: true },
];

/// Id below which a message requires acknowledgement (`ACKN`'s own id).
pub const ACKN_ID: u16 = 1;
/// First id of the connectionless (`CLM_*`) range; ids at or above this are
/// never acknowledged.
pub const CLM_START: u16 = 1000;

pub fn by_id(id: u16) -> Option<&'static MessageDef> {
    CATALOG.iter().find(|def| def.id == id)
}

pub fn by_name(name: &str) -> Option<&'static MessageDef> {
    CATALOG.iter().find(|def| def.name == name)
}

/// True for ids strictly between `ACKN` and the start of the
/// connectionless range — the only ids an endpoint ever acknowledges.
pub fn requires_ack(id: u16) -> bool {
    id > ACKN_ID && id < CLM_START
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_round_trips_by_name_and_id() {
        for def in CATALOG {
            assert_eq!(by_id(def.id).unwrap().name, def.name);
            assert_eq!(by_name(def.name).unwrap().id, def.id);
        }
    }

    #[test]
    fn ack_discipline_matches_spec() {
        assert!(!requires_ack(0));
        assert!(!requires_ack(1));
        assert!(requires_ack(2));
        assert!(requires_ack(999));
        assert!(!requires_ack(1000));
        assert!(!requires_ack(1001));
    }

    #[test]
    fn id_zero_and_unknown_ids_are_absent() {
        assert!(by_id(0).is_none());
        assert!(by_id(9999).is_none());
    }
}
