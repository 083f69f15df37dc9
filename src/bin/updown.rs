//! updown.io CLI binary.
//!
//! A command-line interface for interacting with the updown.io API.

use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;
use updown::cli::{Cli, Command, Entity};
use updown::{
    get_downtimes, get_downtimes_page, get_grouped_metrics, get_metrics, list_ipv4, list_ipv6,
    Add, Check, CheckParams, Downtime, Get, List, MetricGroup, MetricsQuery, Node, PrettyPrint,
    Recipient, RecipientParams, RecipientType, Remove, StatusPage, Update, UpdownClient,
    UpdownError,
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match UpdownClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set UPDOWN_API_KEY environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &UpdownClient, cli: Cli) -> updown::Result<()> {
    match cli.command {
        Command::Get { entity, id, alias } => handle_get(client, entity, &id, alias, cli.json).await,
        Command::List {
            entity,
            check,
            page,
            from,
            to,
            group,
        } => {
            let range = MetricsQuery { from, to };
            handle_list(client, entity, check.as_deref(), page, range, group, cli.json).await
        }
        Command::Add {
            entity,
            url,
            alias,
            period,
            kind,
            value,
        } => handle_add(client, entity, url, alias, period, kind, value, cli.json).await,
        Command::Update {
            entity,
            id,
            url,
            alias,
            period,
            enabled,
        } => {
            let params = CheckParams {
                url,
                alias,
                period,
                enabled,
                ..Default::default()
            };
            handle_update(client, entity, &id, params, cli.json).await
        }
        Command::Remove { entity, id } => handle_remove(client, entity, id, cli.json).await,
        Command::Token { alias } => {
            let token = Check::token_for_alias(client, &alias).await?;
            if cli.json {
                println!("{}", serde_json::json!({ "alias": alias, "token": token }));
            } else {
                println!("{token}");
            }
            Ok(())
        }
    }
}

fn invalid_argument(message: &str) -> UpdownError {
    UpdownError::InvalidArgument(message.to_string())
}

async fn handle_get(
    client: &UpdownClient,
    entity: Entity,
    id: &str,
    by_alias: bool,
    json: bool,
) -> updown::Result<()> {
    match entity {
        Entity::Check => {
            let check = if by_alias {
                Check::get_by_alias(client, id).await?
            } else {
                Check::get(client, id.to_string()).await?
            };
            output_single(&check, json)?;
        }
        Entity::StatusPage => {
            let page = StatusPage::get(client, id.to_string()).await?;
            output_single(&page, json)?;
        }
        _ => {
            eprintln!("Hint: Use 'updown list' for this entity");
            return Err(invalid_argument(
                "only checks and status pages can be fetched individually",
            ));
        }
    }
    Ok(())
}

async fn handle_list(
    client: &UpdownClient,
    entity: Entity,
    check: Option<&str>,
    page: Option<u32>,
    range: MetricsQuery,
    group: Option<MetricGroup>,
    json: bool,
) -> updown::Result<()> {
    match entity {
        Entity::Check => {
            let checks = Check::list(client, &()).await?;
            output_list(&checks, json, |x| CheckRow::from(x))?;
        }
        Entity::Downtime => {
            let token = require_check(check)?;
            let downtimes = match page {
                Some(page) => get_downtimes_page(client, token, page).await?.items,
                None => get_downtimes(client, token).await?,
            };
            output_list(&downtimes, json, |x| DowntimeRow::from(x))?;
        }
        Entity::Metric => {
            let token = require_check(check)?;
            match group {
                Some(group) => {
                    let metrics = get_grouped_metrics(client, token, &range, group).await?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&metrics)?);
                    } else {
                        let rows: Vec<MetricRow> = metrics
                            .iter()
                            .map(|(key, m)| MetricRow::new(key, m))
                            .collect();
                        println!("{}", Table::new(rows));
                    }
                }
                None => {
                    let metric = get_metrics(client, token, &range).await?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&metric)?);
                    } else {
                        println!("{}", Table::new([MetricRow::new("total", &metric)]));
                    }
                }
            }
        }
        Entity::Node => {
            let nodes = Node::list(client, &()).await?;
            output_list(&nodes, json, |x| NodeRow::from(x))?;
        }
        Entity::Ipv4 => {
            let ips = list_ipv4(client).await?;
            output_addresses(&ips, json)?;
        }
        Entity::Ipv6 => {
            let ips = list_ipv6(client).await?;
            output_addresses(&ips, json)?;
        }
        Entity::Recipient => {
            let recipients = Recipient::list(client, &()).await?;
            output_list(&recipients, json, |x| RecipientRow::from(x))?;
        }
        Entity::StatusPage => {
            let pages = StatusPage::list(client, &()).await?;
            output_list(&pages, json, |x| StatusPageRow::from(x))?;
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn handle_add(
    client: &UpdownClient,
    entity: Entity,
    url: Option<String>,
    alias: Option<String>,
    period: Option<u32>,
    kind: Option<String>,
    value: Option<String>,
    json: bool,
) -> updown::Result<()> {
    match entity {
        Entity::Check => {
            let url = url.ok_or_else(|| invalid_argument("--url required for adding a check"))?;
            let params = CheckParams {
                url: Some(url),
                alias,
                period,
                ..Default::default()
            };
            let check = Check::add(client, params).await?;
            output_single(&check, json)?;
        }
        Entity::Recipient => {
            let (kind, value) = kind.zip(value).ok_or_else(|| {
                invalid_argument("--kind and --value required for adding a recipient")
            })?;
            let kind: RecipientType = match kind.parse() {
                Ok(k) => k,
                Err(never) => match never {},
            };
            let recipient = Recipient::add(client, RecipientParams::new(kind, value)).await?;
            output_single(&recipient, json)?;
        }
        _ => return Err(invalid_argument("only checks and recipients can be added via CLI")),
    }
    Ok(())
}

async fn handle_update(
    client: &UpdownClient,
    entity: Entity,
    id: &str,
    params: CheckParams,
    json: bool,
) -> updown::Result<()> {
    match entity {
        Entity::Check => {
            let check = Check::update(client, id.to_string(), params).await?;
            output_single(&check, json)?;
        }
        _ => return Err(invalid_argument("only checks can be updated via CLI")),
    }
    Ok(())
}

async fn handle_remove(
    client: &UpdownClient,
    entity: Entity,
    id: String,
    json: bool,
) -> updown::Result<()> {
    let deleted = match entity {
        Entity::Check => Check::remove(client, id.clone()).await?,
        Entity::Recipient => Recipient::remove(client, id.clone()).await?,
        Entity::StatusPage => StatusPage::remove(client, id.clone()).await?,
        _ => return Err(invalid_argument("only checks, recipients and status pages can be removed")),
    };

    if json {
        println!("{}", serde_json::json!({ "id": id, "deleted": deleted }));
    } else if deleted {
        println!("Deleted {id}");
    } else {
        println!("{id} was not deleted");
    }
    Ok(())
}

fn require_check(check: Option<&str>) -> updown::Result<&str> {
    check.ok_or_else(|| invalid_argument("--check <token> required for this listing"))
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> updown::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> updown::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} item(s)", items.len());
    }
    Ok(())
}

fn output_addresses<T: Serialize + std::fmt::Display>(ips: &[T], json: bool) -> updown::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(ips)?);
    } else {
        for ip in ips {
            println!("{ip}");
        }
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct CheckRow {
    token: String,
    alias: String,
    url: String,
    status: String,
    uptime: String,
}

impl From<&Check> for CheckRow {
    fn from(c: &Check) -> Self {
        Self {
            token: c.token.clone(),
            alias: c.alias.clone().unwrap_or_default(),
            url: c.url.clone(),
            status: if !c.enabled {
                "disabled".to_string()
            } else if c.down {
                "DOWN".to_string()
            } else {
                "up".to_string()
            },
            uptime: c.uptime.map(|u| format!("{u:.2}%")).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct DowntimeRow {
    started: String,
    ended: String,
    duration: String,
    error: String,
}

impl From<&Downtime> for DowntimeRow {
    fn from(d: &Downtime) -> Self {
        Self {
            started: d.started_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            ended: d
                .ended_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "ongoing".to_string()),
            duration: d.duration.map(|s| format!("{s}s")).unwrap_or_default(),
            error: d.error.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct MetricRow {
    key: String,
    apdex: String,
    samples: String,
    failures: String,
    #[tabled(rename = "total (ms)")]
    total_ms: String,
}

impl MetricRow {
    fn new(key: &str, m: &updown::Metric) -> Self {
        Self {
            key: key.to_string(),
            apdex: m.apdex.map(|a| format!("{a:.3}")).unwrap_or_default(),
            samples: m
                .requests
                .as_ref()
                .map(|r| r.samples.to_string())
                .unwrap_or_default(),
            failures: m
                .requests
                .as_ref()
                .map(|r| r.failures.to_string())
                .unwrap_or_default(),
            total_ms: m
                .timings
                .as_ref()
                .map(|t| t.total.to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct NodeRow {
    name: String,
    city: String,
    country: String,
    ip: String,
}

impl From<&Node> for NodeRow {
    fn from(n: &Node) -> Self {
        Self {
            name: n.name.clone(),
            city: n.city.clone().unwrap_or_default(),
            country: n.country.clone().unwrap_or_default(),
            ip: n.ip.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct RecipientRow {
    id: String,
    #[tabled(rename = "type")]
    kind: String,
    name: String,
    value: String,
}

impl From<&Recipient> for RecipientRow {
    fn from(r: &Recipient) -> Self {
        Self {
            id: r.id.clone(),
            kind: r.kind.to_string(),
            name: r.name.clone().unwrap_or_default(),
            value: r.value.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct StatusPageRow {
    token: String,
    name: String,
    visibility: String,
    checks: usize,
}

impl From<&StatusPage> for StatusPageRow {
    fn from(p: &StatusPage) -> Self {
        Self {
            token: p.token.clone(),
            name: p.name.clone().unwrap_or_default(),
            visibility: p
                .visibility
                .map(|v| v.as_str().to_string())
                .unwrap_or_default(),
            checks: p.checks.len(),
        }
    }
}
