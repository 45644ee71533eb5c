use std::fmt::Write;
use votewatch_domain::projection::empty_message;
use votewatch_domain::{BlockedIp, LogQuery, RenderState, ThreatAlert};

pub fn dashboard(state: &RenderState, query: &LogQuery, is_fetching: bool) -> String {
    let mut out = String::new();
    let filters = match (query.severity, query.status) {
        (None, None) => "none".to_string(),
        (severity, status) => [
            severity.map(|s| format!("severity={}", s)),
            status.map(|s| format!("status={}", s)),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" "),
    };
    let _ = writeln!(
        out,
        "── page {} · filters: {}{}",
        query.page,
        filters,
        if is_fetching { " · refreshing" } else { "" }
    );

    match state {
        RenderState::Loading => {
            let _ = writeln!(out, "Loading security logs...");
        }
        RenderState::Error { message } => {
            let _ = writeln!(out, "Error: {}", message);
        }
        RenderState::Empty { filtered } => {
            let _ = writeln!(out, "{}", empty_message(*filtered));
        }
        RenderState::Populated {
            rows,
            total_records,
            has_more,
        } => {
            for row in rows {
                let risk = row
                    .risk_score
                    .map(|score| format!(" risk={}", score))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "{:<19} {:<9} {:<12} {:<24} {:<15} {} ({}){}",
                    row.timestamp,
                    row.severity_label,
                    row.status_label,
                    row.event,
                    row.ip_address,
                    row.user,
                    row.browser,
                    risk
                );
            }
            let _ = writeln!(
                out,
                "{} of {} records{}",
                rows.len(),
                total_records,
                if *has_more { " · more available (n)" } else { "" }
            );
        }
    }
    out
}

pub fn blocked_ips(ips: &[BlockedIp]) -> String {
    let mut out = String::from("Blocked IP addresses\n");
    if ips.is_empty() {
        out.push_str("  (none)\n");
    }
    for ip in ips {
        let _ = writeln!(out, "  {:<39} {}", ip.ip_address, ip.reason);
    }
    out
}

pub fn threat_alerts(alerts: &[ThreatAlert]) -> String {
    let mut out = String::from("Threat alerts\n");
    if alerts.is_empty() {
        out.push_str("  (none)\n");
    }
    for alert in alerts {
        let severity = alert.severity.map(|s| s.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "  [{}] {:<9} {}{}",
            if alert.resolved { "resolved" } else { "open" },
            severity,
            alert.title,
            alert
                .source_ip
                .as_deref()
                .map(|ip| format!(" from {}", ip))
                .unwrap_or_default()
        );
    }
    out
}
