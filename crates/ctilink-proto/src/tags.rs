//! Floating-field tag dictionary.
//!
//! Protocol-version-24 tag ids for the floating region. The dictionary is
//! flat and fixed at implementation time; messages list which tags they
//! recognize, everything else is skipped on decode.

/// Client identifier (string).
pub const CLIENT_ID: u16 = 1;
/// Client password (string).
pub const CLIENT_PASSWORD: u16 = 2;
/// Agent's extension (string).
pub const AGENT_EXTENSION: u16 = 3;
/// Agent id (string).
pub const AGENT_ID: u16 = 4;
/// Agent's instrument (string).
pub const AGENT_INSTRUMENT: u16 = 5;
/// Peripheral id (u32).
pub const PERIPHERAL_ID: u16 = 6;
/// Service number (u32).
pub const SERVICE_NUMBER: u16 = 7;
/// Service id (u32).
pub const SERVICE_ID: u16 = 8;
/// Skill group number (u32).
pub const SKILL_GROUP_NUMBER: u16 = 9;
/// Skill group id (u32).
pub const SKILL_GROUP_ID: u16 = 10;
/// Skill group priority (u16).
pub const SKILL_GROUP_PRIORITY: u16 = 11;
/// Calling device id (string).
pub const CALLING_DEVICE_ID: u16 = 12;
/// Called device id (string).
pub const CALLED_DEVICE_ID: u16 = 13;
/// Last redirecting device id (string).
pub const LAST_REDIRECT_DEVICE_ID: u16 = 14;
/// Automatic number identification — the caller's number (string).
pub const ANI: u16 = 15;
/// Dialed number identification service — the dialed number (string).
pub const DNIS: u16 = 16;
/// User-to-user information (string).
pub const USER_TO_USER_INFO: u16 = 17;
/// Call variable 1 (string).
pub const CALL_VARIABLE_1: u16 = 18;
/// Call variable 2 (string).
pub const CALL_VARIABLE_2: u16 = 19;
/// Call variable 3 (string).
pub const CALL_VARIABLE_3: u16 = 20;
/// Call variable 4 (string).
pub const CALL_VARIABLE_4: u16 = 21;
/// Call variable 5 (string).
pub const CALL_VARIABLE_5: u16 = 22;
/// Call variable 6 (string).
pub const CALL_VARIABLE_6: u16 = 23;
/// Call variable 7 (string).
pub const CALL_VARIABLE_7: u16 = 24;
/// Call variable 8 (string).
pub const CALL_VARIABLE_8: u16 = 25;
/// Call variable 9 (string).
pub const CALL_VARIABLE_9: u16 = 26;
/// Call variable 10 (string).
pub const CALL_VARIABLE_10: u16 = 27;
/// CTI client signature (string).
pub const CTI_CLIENT_SIGNATURE: u16 = 28;
/// CTI client timestamp (u32).
pub const CTI_CLIENT_TIMESTAMP: u16 = 29;
/// Call wrap-up data (string).
pub const CALL_WRAPUP_DATA: u16 = 30;
/// Connection device id (string).
pub const CONNECTION_DEVICE_ID: u16 = 31;
/// Alerting device id (string).
pub const ALERTING_DEVICE_ID: u16 = 32;
/// Answering device id (string).
pub const ANSWERING_DEVICE_ID: u16 = 33;
/// Holding device id (string).
pub const HOLDING_DEVICE_ID: u16 = 34;
/// Retrieving device id (string).
pub const RETRIEVING_DEVICE_ID: u16 = 35;
/// Releasing device id (string).
pub const RELEASING_DEVICE_ID: u16 = 36;
/// Failing device id (string).
pub const FAILING_DEVICE_ID: u16 = 37;
/// Transferring device id (string).
pub const TRANSFERRING_DEVICE_ID: u16 = 38;
/// Transferred device id (string).
pub const TRANSFERRED_DEVICE_ID: u16 = 39;
/// Dialed number (string).
pub const DIALED_NUMBER: u16 = 40;
/// Caller-entered digits (string).
pub const CALLER_ENTERED_DIGITS: u16 = 41;
/// Controller device id (string).
pub const CONTROLLER_DEVICE_ID: u16 = 42;
/// Added party device id (string).
pub const ADDED_PARTY_DEVICE_ID: u16 = 43;
/// Consulting device id (string).
pub const CONSULTING_DEVICE_ID: u16 = 44;
/// Consulted device id (string).
pub const CONSULTED_DEVICE_ID: u16 = 45;
/// Primary device id (string).
pub const PRIMARY_DEVICE_ID: u16 = 46;
/// Secondary device id (string).
pub const SECONDARY_DEVICE_ID: u16 = 47;
/// Primary call id (u32).
pub const PRIMARY_CALL_ID: u16 = 48;
/// Secondary call id (u32).
pub const SECONDARY_CALL_ID: u16 = 49;
/// Contact service queue id (u32).
pub const CSQ_ID: u16 = 62;
/// Router call key: day (u32).
pub const ROUTER_CALL_KEY_DAY: u16 = 72;
/// Router call key: call id (u32).
pub const ROUTER_CALL_KEY_CALL_ID: u16 = 73;
/// Named variable (string).
pub const NAMED_VARIABLE: u16 = 82;
/// Named array (string).
pub const NAMED_ARRAY: u16 = 83;
/// Application path id (i32).
pub const APPLICATION_PATH_ID: u16 = 90;
/// Trunk number (u32).
pub const TRUNK_NUMBER: u16 = 121;
/// Trunk group number (u32).
pub const TRUNK_GROUP_NUMBER: u16 = 122;
/// Next agent state (u16).
pub const NEXT_AGENT_STATE: u16 = 123;
/// Duration in seconds (u32).
pub const DURATION: u16 = 126;
/// Active terminal (string).
pub const ACTIVE_TERMINAL: u16 = 127;
/// Direction (u32).
pub const DIRECTION: u16 = 128;
/// First name of a configured agent (string).
pub const FIRST_NAME: u16 = 137;
/// Last name of a configured agent (string).
pub const LAST_NAME: u16 = 138;
/// Secondary connection call id (u32).
pub const SECONDARY_CONN_CALL_ID: u16 = 171;
/// Multiline agent control (u16).
pub const MULTILINE_AGENT_CONTROL: u16 = 180;
/// Config record type (u16).
pub const RECORD_TYPE: u16 = 183;
/// New connection device id (string).
pub const NEW_CONNECTION_DEVICE_ID: u16 = 186;
/// Agent type (u16).
pub const AGENT_TYPE: u16 = 189;
/// Login id (string).
pub const LOGIN_ID: u16 = 190;
/// Number of CSQs in a config record (u16).
pub const NUM_CSQ: u16 = 191;
/// Supervisor action (u16).
pub const SUPERVISOR_ACTION: u16 = 192;
/// Agent's connection call id (u32).
pub const AGENT_CONNECTION_CALL_ID: u16 = 193;
/// Agent's peripheral id (u32).
pub const AGENT_PERIPHERAL_ID: u16 = 194;
/// Agent's peripheral number (u32).
pub const AGENT_PERIPHERAL_NUMBER: u16 = 195;
/// Config operation (u16).
pub const CONFIG_OPERATION: u16 = 196;
/// Router call key: sequence number (u32).
pub const ROUTER_CALL_KEY_SEQ_NUM: u16 = 214;
/// Number of peripherals (u16).
pub const NUM_PERIPHERALS: u16 = 232;
/// Campaign id (u32).
pub const CAMPAIGN_ID: u16 = 234;
/// Query rule id (u32).
pub const QUERY_RULE_ID: u16 = 235;
/// Call reference id (string).
pub const CALL_REFERENCE_ID: u16 = 248;
/// Pre-call invoke id (u32).
pub const PRE_CALL_INVOKE_ID: u16 = 249;
/// Call type id (u32).
pub const CALL_TYPE_ID: u16 = 250;
