use anyhow::{Context, Result};
use bollard::{Docker, API_DEFAULT_VERSION};
use std::net::{IpAddr, UdpSocket};

use crate::config::PpsConfig;

/// Everything a run needs, set up once and handed to each stage.
pub struct Session {
    pub docker: Docker,
    pub local_ip: String,
    pub colored: bool,
}

impl Session {
    pub fn open(cfg: &PpsConfig) -> Result<Self> {
        let docker = connect(cfg)?;
        let local_ip = match &cfg.external_ip {
            Some(ip) => ip.clone(),
            None => local_ip(&cfg.probe_address)?.to_string(),
        };
        tracing::debug!(%local_ip, "resolved outbound address");

        Ok(Self {
            docker,
            local_ip,
            colored: termion::is_tty(&std::io::stdout()),
        })
    }
}

fn connect(cfg: &PpsConfig) -> Result<Docker> {
    match &cfg.hostname {
        Some(hostname) => {
            let addr = format!("http://{hostname}");
            tracing::debug!(%addr, "connecting to docker over http");
            Docker::connect_with_http(&addr, cfg.timeout, API_DEFAULT_VERSION)
                .with_context(|| format!("Couldn't connect to docker at {addr}"))
        }
        None => {
            tracing::debug!("connecting to the local docker socket");
            Docker::connect_with_local_defaults().context("Couldn't connect to the local docker socket")
        }
    }
}

/// Address of the interface the host would use to reach `probe`.
/// Connecting a UDP socket only picks a route, no packet leaves the machine.
pub fn local_ip(probe: &str) -> Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").context("Couldn't open the address probe socket")?;
    socket
        .connect(probe)
        .with_context(|| format!("Couldn't route towards {probe}"))?;
    Ok(socket.local_addr()?.ip())
}
