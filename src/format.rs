//! Turns raw records into rows meant for people.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use crate::extract::{ContainerRecord, ContainerSet};
use crate::style::{Style, Styled};

/// Layout of `ContainerRecord::created`.
pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub title: Styled,
    pub container_id: String,
    pub image_short: String,
    pub age_text: String,
    pub status: Styled,
    pub internal_address: String,
    /// Internal port spec to its url, empty when the port isn't published.
    pub ports_display: Vec<(String, String)>,
}

pub fn display_rows(
    containers: &ContainerSet,
    local_ip: &str,
    now: NaiveDateTime,
) -> Result<Vec<DisplayRow>> {
    containers
        .iter()
        .map(|record| display_row(record, local_ip, now))
        .collect()
}

fn display_row(record: &ContainerRecord, local_ip: &str, now: NaiveDateTime) -> Result<DisplayRow> {
    let created = NaiveDateTime::parse_from_str(&record.created, CREATED_FORMAT)
        .with_context(|| format!("Container {} has a malformed creation time {:?}", record.name, record.created))?;

    let ports_display = record
        .ports
        .iter()
        .map(|(spec, binding)| {
            let url = binding
                .as_ref()
                .map(|b| port_url(local_ip, &b.host_port))
                .unwrap_or_default();
            (spec.clone(), url)
        })
        .collect();

    Ok(DisplayRow {
        title: Styled::new(format!("\n{}", record.name), Style::Title),
        container_id: record.container_id.clone(),
        image_short: short_image(&record.image).to_owned(),
        age_text: time_ago(now, created),
        status: status_text(&record.status),
        internal_address: record.internal_ip.clone(),
        ports_display,
    })
}

/// Coarse single-unit age. A creation time in the future counts as zero seconds.
pub fn time_ago(now: NaiveDateTime, created: NaiveDateTime) -> String {
    let elapsed = (now - created).num_seconds().max(0);
    let (minutes, seconds) = (elapsed / 60, elapsed % 60);

    if minutes >= 1440 {
        format!("{} days ago", minutes / 1440)
    } else if minutes >= 60 {
        format!("{} hours ago", minutes / 60)
    } else if minutes >= 1 {
        format!("{minutes} minutes ago")
    } else {
        format!("{seconds} seconds ago")
    }
}

/// Last path segment of an image reference. Display only, two images may collide.
pub fn short_image(image: &str) -> &str {
    match image.rsplit_once('/') {
        Some((_, last)) => last,
        None => image,
    }
}

pub fn status_text(status: &str) -> Styled {
    let style = if status == "running" {
        Style::Success
    } else {
        Style::Failure
    };
    Styled::new(status, style)
}

pub fn port_url(ip: &str, host_port: &str) -> String {
    format!("http://{ip}:{host_port} ➔")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::record_from_inspect;
    use crate::extract::tests::{binding, inspect};
    use bollard::models::PortMap;
    use chrono::Duration;
    use std::collections::HashMap;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, CREATED_FORMAT).unwrap()
    }

    fn ago(seconds: i64) -> String {
        let created = at("2022-05-27 13:12:44");
        time_ago(created + Duration::seconds(seconds), created)
    }

    #[test]
    fn age_buckets_switch_on_the_boundaries() {
        assert_eq!(ago(0), "0 seconds ago");
        assert_eq!(ago(59), "59 seconds ago");
        assert_eq!(ago(60), "1 minutes ago");
        assert_eq!(ago(3599), "59 minutes ago");
        assert_eq!(ago(3600), "1 hours ago");
        assert_eq!(ago(86399), "23 hours ago");
        assert_eq!(ago(86400), "1 days ago");
        assert_eq!(ago(3 * 86400 + 5000), "3 days ago");
    }

    #[test]
    fn age_never_moves_to_a_smaller_unit() {
        let rank = |s: &str| match s.split(' ').nth(1) {
            Some("seconds") => 0,
            Some("minutes") => 1,
            Some("hours") => 2,
            Some("days") => 3,
            other => panic!("unexpected unit {other:?}"),
        };
        let mut last = 0;
        for delta in (0..200_000).step_by(37) {
            let r = rank(&ago(delta));
            assert!(r >= last, "unit went down at {delta}s");
            last = r;
        }
    }

    #[test]
    fn future_creation_is_clamped_to_zero() {
        assert_eq!(ago(-120), "0 seconds ago");
    }

    #[test]
    fn image_keeps_the_last_segment() {
        assert_eq!(short_image("docker.io/library/nginx"), "nginx");
        assert_eq!(short_image("ghcr.io/org/app:1.2"), "app:1.2");
        assert_eq!(short_image("nginx"), "nginx");
    }

    #[test]
    fn only_running_is_a_success() {
        assert_eq!(status_text("running").style, Style::Success);
        assert_eq!(status_text("paused").style, Style::Failure);
        assert_eq!(status_text("exited").style, Style::Failure);
    }

    #[test]
    fn ports_resolve_to_urls_or_nothing() {
        let ports: PortMap = HashMap::from([
            ("80/tcp".to_string(), Some(vec![binding("8080"), binding("9090")])),
            ("443/tcp".to_string(), None),
        ]);
        let set: ContainerSet = [record_from_inspect(
            inspect("web", "nginx", "2022-05-27T13:12:44Z", ports),
            "10.0.0.5",
        )
        .unwrap()]
        .into_iter()
        .collect();

        let rows = display_rows(&set, "10.0.0.5", at("2022-05-27 13:12:44")).unwrap();
        assert_eq!(
            rows[0].ports_display,
            vec![
                ("443/tcp".to_string(), String::new()),
                ("80/tcp".to_string(), "http://10.0.0.5:8080 ➔".to_string()),
            ]
        );
    }

    #[test]
    fn rows_follow_discovery_order_and_keep_names() {
        let set: ContainerSet = ["zz", "web-1 (blue)", "aa"]
            .into_iter()
            .map(|name| {
                record_from_inspect(inspect(name, "nginx", "2022-05-27T13:12:44Z", PortMap::new()), "ip")
                    .unwrap()
            })
            .collect();

        let rows = display_rows(&set, "ip", at("2022-05-27 14:00:00")).unwrap();
        let titles: Vec<&str> = rows.iter().map(|r| r.title.text.as_str()).collect();
        assert_eq!(titles, ["\nzz", "\nweb-1 (blue)", "\naa"]);
        assert_eq!(rows[0].age_text, "47 minutes ago");
    }

    #[test]
    fn malformed_creation_time_is_an_error() {
        let mut record = record_from_inspect(
            inspect("web", "nginx", "2022-05-27T13:12:44Z", PortMap::new()),
            "ip",
        )
        .unwrap();
        record.created = "yesterday".into();
        let set: ContainerSet = [record].into_iter().collect();
        assert!(display_rows(&set, "ip", at("2022-05-27 13:12:44")).is_err());
    }
}
