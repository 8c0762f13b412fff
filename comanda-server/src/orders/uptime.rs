//! 运行时长日志
//!
//! 30 秒、1/5/15/30 分钟、1 小时各记录一次，之后每整小时一次。

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

const MILESTONES_SECS: [u64; 6] = [30, 60, 300, 900, 1800, 3600];
const HOUR_SECS: u64 = 3600;

/// Next milestone strictly after `elapsed_secs`
pub fn next_milestone(elapsed_secs: u64) -> u64 {
    MILESTONES_SECS
        .iter()
        .copied()
        .find(|&m| m > elapsed_secs)
        .unwrap_or_else(|| (elapsed_secs / HOUR_SECS + 1) * HOUR_SECS)
}

/// Human label: "30s", "5min", "2h"
pub fn format_uptime(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else if secs < HOUR_SECS {
        format!("{}min", secs / 60)
    } else {
        format!("{}h", secs / HOUR_SECS)
    }
}

pub async fn run(started: Instant, shutdown: CancellationToken) {
    let mut elapsed = 0;
    loop {
        let milestone = next_milestone(elapsed);
        let at = started + Duration::from_secs(milestone);
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep_until(at) => {
                tracing::info!(uptime_secs = milestone, "Server up for {}", format_uptime(milestone));
                elapsed = milestone;
            }
        }
    }
}
