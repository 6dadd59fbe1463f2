//! The persisted description of a started database instance.
//!
//! Records are stored as a single JSON object:
//!
//! ```text
//! {
//!   "pid": 41872,
//!   "listen": ["127.0.0.1", "::1"],
//!   "port": 9193,
//!   "database": "analytics",
//!   "user": "app",
//!   "password": "...",
//!   "invoker": "service"
//! }
//! ```
//!
//! Keys not modelled here are kept in [`ConnectionDetails::extra`] so a
//! record written by a newer launcher is passed through unchanged.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The last instance a launcher recorded as started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// OS process identifier of the instance.
    pub pid: NonZeroU32,

    /// How to reach the instance.
    #[serde(flatten)]
    pub connection: ConnectionDetails,
}

/// Connection parameters for a recorded instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDetails {
    /// Addresses the database listens on
    #[serde(default)]
    pub listen: Vec<String>,

    /// TCP port
    #[serde(default)]
    pub port: u16,

    /// Database name
    #[serde(default)]
    pub database: String,

    /// Role used to connect
    #[serde(default)]
    pub user: String,

    /// Password for `user`, if the launcher recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Component that started the instance (e.g. `service`, `query`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoker: Option<String>,

    /// Any other keys present in the record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InstanceRecord {
    /// Creates a record for `pid` with the given connection details.
    #[must_use]
    pub const fn new(pid: NonZeroU32, connection: ConnectionDetails) -> Self {
        Self { pid, connection }
    }
}

impl ConnectionDetails {
    /// Returns the first listen address, defaulting to `localhost`.
    #[must_use]
    pub fn host(&self) -> &str {
        self.listen.first().map_or("localhost", String::as_str)
    }

    /// Renders a `postgres://` URL for display.
    ///
    /// The password is never included.
    #[must_use]
    pub fn connection_string(&self) -> String {
        let host = self.host();
        let host = if host.contains(':') {
            format!("[{host}]")
        } else {
            host.to_string()
        };
        format!(
            "postgres://{}@{host}:{}/{}",
            self.user, self.port, self.database
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn test_parse_record_keeps_unknown_keys() {
        let json = r#"{
            "pid": 41872,
            "listen": ["127.0.0.1"],
            "port": 9193,
            "database": "analytics",
            "user": "app",
            "resolved_listen": ["127.0.0.1:9193"]
        }"#;

        let record: InstanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.pid.get(), 41872);
        assert_eq!(record.connection.port, 9193);
        assert_eq!(record.connection.password, None);
        assert_eq!(
            record.connection.extra.get("resolved_listen"),
            Some(&serde_json::json!(["127.0.0.1:9193"]))
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["resolved_listen"], serde_json::json!(["127.0.0.1:9193"]));
    }

    #[test]
    fn test_zero_pid_is_rejected() {
        let json = r#"{"pid": 0, "port": 9193}"#;
        assert!(serde_json::from_str::<InstanceRecord>(json).is_err());
    }

    #[test]
    fn test_missing_pid_is_rejected() {
        let json = r#"{"port": 9193, "database": "analytics"}"#;
        assert!(serde_json::from_str::<InstanceRecord>(json).is_err());
    }

    #[test]
    fn test_connection_string_omits_password() {
        let details = ConnectionDetails {
            listen: vec!["127.0.0.1".to_string()],
            port: 9193,
            database: "analytics".to_string(),
            user: "app".to_string(),
            password: Some("hunter2".to_string()),
            ..ConnectionDetails::default()
        };

        assert_eq!(
            details.connection_string(),
            "postgres://app@127.0.0.1:9193/analytics"
        );
    }

    #[test]
    fn test_connection_string_brackets_ipv6_and_defaults_host() {
        let mut details = ConnectionDetails {
            listen: vec!["::1".to_string()],
            port: 5432,
            database: "db".to_string(),
            user: "u".to_string(),
            ..ConnectionDetails::default()
        };
        assert_eq!(details.connection_string(), "postgres://u@[::1]:5432/db");

        details.listen.clear();
        assert_eq!(details.connection_string(), "postgres://u@localhost:5432/db");
    }
}
