//! Display utilities for CLI output formatting

use colored::Colorize;
use dbstatus::{InstanceRecord, Status};

/// Returns a copy of `status` with any recorded password removed.
pub fn redact(status: &Status) -> Status {
    match status {
        Status::Running(record) => {
            let mut record = record.clone();
            record.connection.password = None;
            Status::Running(record)
        }
        other => other.clone(),
    }
}

/// Renders `status` as pretty-printed JSON.
pub fn render_json(status: &Status, show_password: bool) -> serde_json::Result<String> {
    if show_password {
        serde_json::to_string_pretty(status)
    } else {
        serde_json::to_string_pretty(&redact(status))
    }
}

/// Renders `status` for a terminal.
pub fn render_human(status: &Status, show_password: bool) -> String {
    match status {
        Status::Absent => format!("{} Database instance is not running", "○".bright_white()),
        Status::StaleCleaned { pid } => format!(
            "{} Database instance is not running {}",
            "○".bright_white(),
            format!("(removed stale record for PID {pid})").dimmed()
        ),
        Status::Running(record) => render_running(record, show_password),
    }
}

fn render_running(record: &InstanceRecord, show_password: bool) -> String {
    let conn = &record.connection;
    let mut lines = vec![
        format!(
            "{} Database instance is running",
            "●".bright_green()
        ),
        format!("  PID:        {}", record.pid.to_string().bright_cyan()),
        format!("  Connection: {}", conn.connection_string().bright_yellow()),
        format!("  Listen:     {}", conn.listen.join(", ")),
        format!("  Port:       {}", conn.port),
        format!("  Database:   {}", conn.database),
        format!("  User:       {}", conn.user),
    ];

    if let Some(password) = &conn.password {
        if show_password {
            lines.push(format!("  Password:   {password}"));
        } else {
            lines.push(format!(
                "  Password:   {}",
                "******** (use --show-password to reveal)".dimmed()
            ));
        }
    }

    if let Some(invoker) = &conn.invoker {
        lines.push(format!("  Started by: {invoker}"));
    }

    lines.join("\n")
}
