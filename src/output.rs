//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Check, Recipient, StatusPage};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Trait for human-readable key-value output.
///
/// Implemented by model types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Check {
    fn pretty_print(&self) -> String {
        let header = format!("Check: {}", self.token);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Alias:          {}", self.alias.as_deref().unwrap_or("-")),
            format!("URL:            {}", self.url),
        ];

        let state = match (self.enabled, self.down) {
            (false, _) => "disabled",
            (true, true) => "DOWN",
            (true, false) => "up",
        };
        lines.push(format!("Status:         {}", state));

        if let Some(ref error) = self.error {
            lines.push(format!("Error:          {}", error));
        }

        if let Some(uptime) = self.uptime {
            lines.push(format!("Uptime:         {:.3}%", uptime));
        }

        if let Some(period) = self.period {
            lines.push(format!("Period:         {}s", period));
        }

        if let Some(ref last) = self.last_check_at {
            lines.push(format!("Last Check:     {}", last.format(TIME_FORMAT)));
        }

        if let Some(ref ssl) = self.ssl {
            if let Some(ref expires) = ssl.expires_at {
                lines.push(format!("SSL Expires:    {}", expires.format(TIME_FORMAT)));
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for StatusPage {
    fn pretty_print(&self) -> String {
        let header = format!("Status Page: {}", self.token);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(ref name) = self.name {
            lines.push(format!("Name:           {}", name));
        }

        if let Some(ref url) = self.url {
            lines.push(format!("URL:            {}", url));
        }

        if let Some(visibility) = self.visibility {
            lines.push(format!("Visibility:     {}", visibility.as_str()));
        }

        lines.push(format!("Checks:         {}", self.checks.join(", ")));

        lines.join("\n")
    }
}

impl PrettyPrint for Recipient {
    fn pretty_print(&self) -> String {
        let header = format!("Recipient: {}", self.id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider, format!("Type:           {}", self.kind)];

        if let Some(ref name) = self.name {
            lines.push(format!("Name:           {}", name));
        }

        if let Some(ref value) = self.value {
            lines.push(format!("Value:          {}", value));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_pretty_print_format() {
        let check: Check = serde_json::from_value(serde_json::json!({
            "token": "ngg8",
            "url": "https://updown.io",
            "alias": "Main site",
            "enabled": true,
            "down": true,
            "error": "Connection refused"
        }))
        .unwrap();

        let output = check.pretty_print();
        assert!(output.starts_with("Check: ngg8"));
        assert!(output.contains("Main site"));
        assert!(output.contains("DOWN"));
        assert!(output.contains("Connection refused"));
    }
}
