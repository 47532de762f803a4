//! Pulls the running containers out of the engine into plain records.

use anyhow::{anyhow, Context, Result};
use bollard::container::{InspectContainerOptions, ListContainersOptions};
use bollard::models::{ContainerInspectResponse, PortBinding, PortMap};
use bollard::Docker;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// The single host binding kept for a published port.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HostBinding {
    #[serde(rename = "HostIp")]
    pub host_ip: String,
    #[serde(rename = "HostPort")]
    pub host_port: String,
}

/// Raw attributes of one running container, as the engine reported them.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ContainerRecord {
    #[serde(skip)]
    pub name: String,
    pub external_ip: String,
    pub internal_ip: String,
    pub created: String,
    pub container_id: String,
    pub image: String,
    pub status: String,
    pub exit_code: i64,
    pub error: String,
    pub paused: bool,
    /// Internal port spec (`80/tcp`) to its first host binding, `None` when unpublished.
    pub ports: BTreeMap<String, Option<HostBinding>>,
}

/// Records keyed by container name, in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerSet {
    records: Vec<ContainerRecord>,
}

impl ContainerSet {
    /// A second record with the same name replaces the first one in place.
    pub fn insert(&mut self, record: ContainerRecord) {
        match self.records.iter_mut().find(|r| r.name == record.name) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ContainerRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContainerRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<ContainerRecord> for ContainerSet {
    fn from_iter<I: IntoIterator<Item = ContainerRecord>>(iter: I) -> Self {
        let mut set = ContainerSet::default();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

impl Serialize for ContainerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.name, record)?;
        }
        map.end()
    }
}

/// Lists the running containers and inspects each one, in list order.
pub async fn running_containers(docker: &Docker, external_ip: &str) -> Result<ContainerSet> {
    let options = Some(ListContainersOptions::<String> {
        all: false,
        ..Default::default()
    });
    let summaries = docker
        .list_containers(options)
        .await
        .context("Couldn't list the running containers")?;
    tracing::debug!(count = summaries.len(), "listed running containers");

    let ids = summaries.into_iter().filter_map(|s| s.id);
    let inspected: Vec<ContainerInspectResponse> = stream::iter(ids)
        .then(|id| async move {
            docker
                .inspect_container(&id, None::<InspectContainerOptions>)
                .await
                .with_context(|| format!("Couldn't inspect container {id}"))
        })
        .try_collect()
        .await?;

    inspected
        .into_iter()
        .map(|response| record_from_inspect(response, external_ip))
        .collect()
}

pub fn record_from_inspect(
    response: ContainerInspectResponse,
    external_ip: &str,
) -> Result<ContainerRecord> {
    let name = response
        .name
        .as_deref()
        .map(|n| n.trim_start_matches('/').to_owned())
        .ok_or_else(|| anyhow!("Container {:?} has no name", response.id))?;
    let config = response
        .config
        .ok_or_else(|| anyhow!("Container {name} has no config section"))?;
    let state = response
        .state
        .ok_or_else(|| anyhow!("Container {name} has no state section"))?;
    let network = response
        .network_settings
        .ok_or_else(|| anyhow!("Container {name} has no network settings"))?;

    Ok(ContainerRecord {
        external_ip: external_ip.to_owned(),
        internal_ip: network.ip_address.unwrap_or_default(),
        created: normalize_created(response.created.as_deref().unwrap_or_default()),
        container_id: config.hostname.unwrap_or_default(),
        image: config.image.unwrap_or_default(),
        status: state.status.map(|s| s.to_string()).unwrap_or_default(),
        exit_code: state.exit_code.unwrap_or_default(),
        error: state.error.unwrap_or_default(),
        paused: state.paused.unwrap_or_default(),
        ports: first_bindings(network.ports.unwrap_or_default()),
        name,
    })
}

/// `2022-05-27T13:12:44.123456789Z` becomes `2022-05-27 13:12:44`.
pub fn normalize_created(raw: &str) -> String {
    let cleaned = raw.replace('Z', "").replace('T', " ");
    match cleaned.split_once('.') {
        Some((whole, _fraction)) => whole.to_owned(),
        None => cleaned,
    }
}

fn first_bindings(ports: PortMap) -> BTreeMap<String, Option<HostBinding>> {
    ports
        .into_iter()
        .map(|(spec, bindings)| {
            let first = bindings
                .unwrap_or_default()
                .into_iter()
                .next()
                .map(|PortBinding { host_ip, host_port }| HostBinding {
                    host_ip: host_ip.unwrap_or_default(),
                    host_port: host_port.unwrap_or_default(),
                });
            (spec, first)
        })
        .collect()
}
