//! Formats the estimate for display. No computation of consequence.

/// Quality band and ancillary suggestion for a signal estimate.
pub fn present(signal_strength: f32) -> (&'static str, &'static str) {
    if signal_strength >= 75.0 {
        ("EXCELLENT", "Connection is strong; no action needed.")
    } else if signal_strength >= 50.0 {
        (
            "GOOD",
            "Connection is serviceable; heavy transfers may slow at peak times.",
        )
    } else if signal_strength >= 25.0 {
        (
            "FAIR",
            "Expect degraded throughput; move closer to an access point if possible.",
        )
    } else {
        (
            "POOR",
            "Connectivity is likely unusable; retry later or switch networks.",
        )
    }
}

pub fn summary_line(
    weather: &str,
    latency_ms: f64,
    users_online: u32,
    signal_strength: f32,
    quality: &str,
) -> String {
    format!(
        "[ predict ] weather={}  latency={:.1}ms  users={}  signal={:.1}  QUALITY={}",
        weather, latency_ms, users_online, signal_strength, quality
    )
}
