//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the updown binary.

use clap::{Parser, Subcommand, ValueEnum};

use crate::MetricGroup;

/// updown.io command-line interface.
#[derive(Parser, Debug)]
#[command(name = "updown", about = "updown.io API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by token.
    Get {
        /// The type of entity to get (checks or status pages).
        entity: Entity,

        /// The token, or the check alias with --alias.
        id: String,

        /// Treat the identifier as a check alias and resolve it first.
        #[arg(long)]
        alias: bool,
    },

    /// List entities.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Check token (required for downtimes and metrics).
        #[arg(long)]
        check: Option<String>,

        /// Page number for downtimes (1-indexed); all pages when omitted.
        #[arg(long)]
        page: Option<u32>,

        /// Start of the metrics range (e.g. 2024-05-01).
        #[arg(long)]
        from: Option<String>,

        /// End of the metrics range.
        #[arg(long)]
        to: Option<String>,

        /// Group metrics by time or host.
        #[arg(long, value_enum)]
        group: Option<MetricGroup>,
    },

    /// Create an entity (checks or recipients).
    Add {
        /// The type of entity to create.
        entity: Entity,

        /// URL to monitor (checks).
        #[arg(long)]
        url: Option<String>,

        /// Alias of the new check.
        #[arg(long)]
        alias: Option<String>,

        /// Check interval in seconds.
        #[arg(long)]
        period: Option<u32>,

        /// Recipient type (email, sms, webhook, ...).
        #[arg(long)]
        kind: Option<String>,

        /// Recipient address or URL.
        #[arg(long)]
        value: Option<String>,
    },

    /// Update a check.
    Update {
        /// The type of entity to update.
        entity: Entity,

        /// The token of the entity to update.
        id: String,

        /// New URL.
        #[arg(long)]
        url: Option<String>,

        /// New alias.
        #[arg(long)]
        alias: Option<String>,

        /// New check interval in seconds.
        #[arg(long)]
        period: Option<u32>,

        /// Enable or disable the check.
        #[arg(long)]
        enabled: Option<bool>,
    },

    /// Delete an entity.
    Remove {
        /// The type of entity to delete.
        entity: Entity,

        /// Token (checks, status pages) or ID (recipients).
        id: String,
    },

    /// Resolve a check alias to its token.
    Token {
        /// The check alias.
        alias: String,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A monitored URL or host.
    #[value(alias = "checks")]
    Check,
    /// A downtime period of a check.
    #[value(alias = "downtimes")]
    Downtime,
    /// Performance metrics of a check.
    #[value(alias = "metrics")]
    Metric,
    /// A monitoring location.
    #[value(alias = "nodes")]
    Node,
    /// IPv4 addresses of the monitoring nodes.
    Ipv4,
    /// IPv6 addresses of the monitoring nodes.
    Ipv6,
    /// An alert recipient.
    #[value(alias = "recipients")]
    Recipient,
    /// A status page.
    #[value(alias = "status-pages")]
    StatusPage,
}
