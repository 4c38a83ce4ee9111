//! Prometheus rendering of a metrics snapshot.
use prometheus::{Encoder, Gauge, IntGauge, Registry, TextEncoder};
use remedy_core::MetricsSnapshot;

/// Render the snapshot as Prometheus text exposition format.
///
/// The registry is rebuilt per scrape; the counters live in
/// `RollingMetrics`, this is only a view of them.
pub fn render(snapshot: &MetricsSnapshot) -> Result<String, prometheus::Error> {
    let registry = Registry::new();

    let int_gauges = [
        ("remedy_logs_ingested_total", "Raw log lines ingested", snapshot.total_logs),
        ("remedy_decisions_total", "Log lines that produced a decision", snapshot.decided),
        ("remedy_self_healed_total", "Decisions resolved by self-heal", snapshot.self_healed),
        ("remedy_tickets_raised_total", "Decisions escalated to a ticket", snapshot.tickets_raised),
    ];
    for (name, help, value) in int_gauges {
        let gauge = IntGauge::new(name, help)?;
        gauge.set(value as i64);
        registry.register(Box::new(gauge))?;
    }

    let hours = Gauge::new("remedy_support_hours_saved", "Estimated support hours saved")?;
    hours.set(snapshot.hours_saved);
    registry.register(Box::new(hours))?;

    encode(&registry)
}

pub fn encode(registry: &Registry) -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_render_exposes_counters() {
        let snapshot = MetricsSnapshot {
            started_at: Utc::now(),
            total_logs: 12,
            decided: 10,
            self_healed: 7,
            tickets_raised: 3,
            hours_saved: 14.5,
            recent_logs: vec![],
            recent_decisions: vec![],
            recent_tickets: vec![],
        };
        let text = render(&snapshot).unwrap();
        assert!(text.contains("remedy_logs_ingested_total 12"));
        assert!(text.contains("remedy_self_healed_total 7"));
        assert!(text.contains("remedy_support_hours_saved 14.5"));
    }
}
