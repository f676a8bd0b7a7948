//! Topology front-end
//!
//! Parses user-declared service topology YAML into boundary edge records.
//! Two document shapes are accepted and normalized to the same edge list:
//!
//! 1. `services:` as a **list** of `{name, endpoints, dependencies}` blocks
//!    with explicit backoff/circuit-breaker fields per dependency.
//! 2. `services:` as a **map** of `{<name>: {calls: [...]}}` where each call
//!    names its HTTP method and idempotency is derived from it.
//!
//! Validation happens here: missing required fields, unparseable or
//! negative durations, and negative retry counts are rejected before the
//! engine ever sees the input.

pub mod duration;

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use thiserror::Error;

use crate::graph::{EdgeRecord, Node};
use duration::{parse_duration, InvalidDuration};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("parsing YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{context}: missing required field \"{field}\"")]
    MissingField { context: String, field: &'static str },
    #[error("{context}: invalid timeout value {value:?}: {source}")]
    InvalidTimeout {
        context: String,
        value: String,
        source: InvalidDuration,
    },
    #[error("{context}: timeout must not be negative, got {value:?}")]
    NegativeTimeout { context: String, value: String },
    #[error("{context}: max_retries must not be negative, got {value}")]
    NegativeRetries { context: String, value: i64 },
}

/// Normalized parse result: edge records plus every declared service, so
/// isolated services survive into the graph.
#[derive(Debug, Default)]
pub struct ParsedTopology {
    pub edges: Vec<EdgeRecord>,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Deserialize, Default)]
struct RawTopology {
    #[serde(default)]
    services: RawServices,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawServices {
    List(Vec<RawService>),
    Map(BTreeMap<String, RawServiceCalls>),
}

impl Default for RawServices {
    fn default() -> Self {
        RawServices::List(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
struct RawService {
    #[serde(default)]
    name: String,
    #[serde(default)]
    endpoints: Vec<RawEndpoint>,
    #[serde(default)]
    dependencies: Vec<RawDependency>,
}

#[derive(Debug, Deserialize)]
struct RawEndpoint {
    #[serde(default)]
    method: String,
    #[serde(default)]
    path: String,
    /// Explicit override; derived from `method` when absent.
    #[serde(default)]
    idempotent: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawDependency {
    #[serde(default)]
    target: String,
    #[serde(default)]
    timeout: Option<String>,
    #[serde(default)]
    max_retries: i64,
    #[serde(default)]
    backoff_base: Option<String>,
    #[serde(default)]
    backoff_jitter_enabled: bool,
    #[serde(default)]
    circuit_breaker_enabled: bool,
}

#[derive(Debug, Deserialize)]
struct RawServiceCalls {
    #[serde(default)]
    calls: Vec<RawCall>,
}

#[derive(Debug, Deserialize)]
struct RawCall {
    #[serde(default)]
    target: String,
    #[serde(default)]
    timeout: Option<String>,
    #[serde(default)]
    retries: i64,
    #[serde(default)]
    circuit_breaker: bool,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    backoff_jitter: bool,
}

/// Parse and validate a topology document. Empty input is a valid empty
/// topology.
pub fn parse_topology(input: &str) -> Result<ParsedTopology, ParseError> {
    if input.trim().is_empty() {
        return Ok(ParsedTopology::default());
    }
    // A document that is only `---` deserializes as null; treat it like
    // empty input.
    let raw: RawTopology = serde_yaml::from_str::<Option<RawTopology>>(input)?.unwrap_or_default();
    match raw.services {
        RawServices::List(services) => from_service_list(services),
        RawServices::Map(services) => from_service_map(services),
    }
}

fn from_service_list(services: Vec<RawService>) -> Result<ParsedTopology, ParseError> {
    // First pass: validate declarations and record which services only
    // expose idempotent endpoints. A dependency does not name the endpoint
    // it calls, so an edge counts as idempotent when every endpoint of its
    // target does; a target with no declared endpoints defaults to true.
    let mut idempotent_targets: HashMap<&str, bool> = HashMap::new();
    for (i, svc) in services.iter().enumerate() {
        if svc.name.is_empty() {
            return Err(ParseError::MissingField {
                context: format!("services[{i}]"),
                field: "name",
            });
        }
        for (j, ep) in svc.endpoints.iter().enumerate() {
            if ep.method.is_empty() {
                return Err(ParseError::MissingField {
                    context: format!("service {:?} endpoints[{j}]", svc.name),
                    field: "method",
                });
            }
            if ep.path.is_empty() {
                return Err(ParseError::MissingField {
                    context: format!("service {:?} endpoints[{j}]", svc.name),
                    field: "path",
                });
            }
        }
        let idempotent = svc
            .endpoints
            .iter()
            .all(|ep| ep.idempotent.unwrap_or_else(|| method_is_idempotent(Some(&ep.method))));
        idempotent_targets.insert(&svc.name, idempotent);
    }

    let mut topology = ParsedTopology::default();
    for svc in &services {
        topology.nodes.push(Node::new(svc.name.clone()));
        for (j, dep) in svc.dependencies.iter().enumerate() {
            if dep.target.is_empty() {
                return Err(ParseError::MissingField {
                    context: format!("service {:?} dependencies[{j}]", svc.name),
                    field: "target",
                });
            }
            let context = format!(
                "service {:?} dependencies[{j}] (target {:?})",
                svc.name, dep.target
            );
            let timeout = dep.timeout.as_deref().ok_or_else(|| ParseError::MissingField {
                context: context.clone(),
                field: "timeout",
            })?;
            let timeout_ns = parse_timeout(&context, timeout)?;
            if dep.max_retries < 0 {
                return Err(ParseError::NegativeRetries {
                    context,
                    value: dep.max_retries,
                });
            }
            topology.edges.push(EdgeRecord {
                source: svc.name.clone(),
                target: dep.target.clone(),
                timeout_ns,
                max_retries: dep.max_retries,
                has_circuit_breaker: dep.circuit_breaker_enabled,
                idempotent: idempotent_targets
                    .get(dep.target.as_str())
                    .copied()
                    .unwrap_or(true),
                has_backoff: dep
                    .backoff_base
                    .as_deref()
                    .is_some_and(|base| !base.is_empty()),
                backoff_jitter: dep.backoff_jitter_enabled,
            });
        }
    }
    Ok(topology)
}

fn from_service_map(services: BTreeMap<String, RawServiceCalls>) -> Result<ParsedTopology, ParseError> {
    // YAML maps carry no reliable order; the BTreeMap walks services in
    // sorted name order so the edge list is deterministic.
    let mut topology = ParsedTopology::default();
    for (name, svc) in &services {
        topology.nodes.push(Node::new(name.clone()));
        for (j, call) in svc.calls.iter().enumerate() {
            if call.target.is_empty() {
                return Err(ParseError::MissingField {
                    context: format!("service {name:?} calls[{j}]"),
                    field: "target",
                });
            }
            let context = format!("service {name:?} calls[{j}] (target {:?})", call.target);
            let timeout = call.timeout.as_deref().ok_or_else(|| ParseError::MissingField {
                context: context.clone(),
                field: "timeout",
            })?;
            let timeout_ns = parse_timeout(&context, timeout)?;
            if call.retries < 0 {
                return Err(ParseError::NegativeRetries {
                    context,
                    value: call.retries,
                });
            }
            topology.edges.push(EdgeRecord {
                source: name.clone(),
                target: call.target.clone(),
                timeout_ns,
                max_retries: call.retries,
                has_circuit_breaker: call.circuit_breaker,
                idempotent: method_is_idempotent(call.method.as_deref()),
                // The compact schema has no backoff field; a retrying edge
                // is treated as backing off.
                has_backoff: call.retries > 0,
                backoff_jitter: call.backoff_jitter,
            });
        }
    }
    Ok(topology)
}

fn parse_timeout(context: &str, value: &str) -> Result<i64, ParseError> {
    let nanos = parse_duration(value).map_err(|source| ParseError::InvalidTimeout {
        context: context.to_string(),
        value: value.to_string(),
        source,
    })?;
    if nanos < 0 {
        return Err(ParseError::NegativeTimeout {
            context: context.to_string(),
            value: value.to_string(),
        });
    }
    Ok(nanos)
}

/// GET, HEAD, PUT, and OPTIONS are idempotent; POST, PATCH, and DELETE are
/// not. A missing or unrecognized method defaults to idempotent so the
/// analyzer stays silent instead of alarming on missing data.
fn method_is_idempotent(method: Option<&str>) -> bool {
    match method {
        None => true,
        Some(m) => !matches!(
            m.to_ascii_uppercase().as_str(),
            "POST" | "PATCH" | "DELETE"
        ),
    }
}
