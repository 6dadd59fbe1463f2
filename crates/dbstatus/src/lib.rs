//! # dbstatus
//!
//! Determines whether a previously started background database instance is
//! still alive, using only the on-disk instance record and an OS-level
//! process check. No connection to the database is attempted.
//!
//! A record whose process has died (crash, `kill -9`, reboot) is removed by
//! the query that discovers it, so the next caller sees a clean
//! [`Status::Absent`].
//!
//! ## Example
//!
//! ```no_run
//! use dbstatus::{Config, FileStore, Status, StatusResolver};
//!
//! # fn example() -> dbstatus::Result<()> {
//! let store = FileStore::from_config(&Config::load()?)?;
//! let resolver = StatusResolver::for_file(store);
//!
//! match resolver.status()? {
//!     Status::Running(record) => {
//!         println!("running at {}", record.connection.connection_string());
//!     }
//!     Status::Absent | Status::StaleCleaned { .. } => println!("not running"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod observer;
pub mod paths;
pub mod probe;
pub mod record;
pub mod resolver;
pub mod store;

pub use config::Config;
pub use error::{ProbeError, Result, StatusError};
pub use observer::{NoopObserver, StatusObserver, TracingObserver};
pub use probe::{ProcessProbe, SystemProbe};
pub use record::{ConnectionDetails, InstanceRecord};
pub use resolver::{Status, StatusResolver};
pub use store::{FileStore, InstanceInfoStore};
