use std::time::{Duration, Instant};

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Frames counted over one reporting interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FpsReport {
    pub rendered: u32,
    pub skipped: u32,
}

/// Rendered/skipped frame accounting. Totals are always kept; the per-second
/// report only runs while started.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    interval_start: Option<Instant>,
    rendered: u32,
    skipped: u32,
    rendered_total: u64,
    skipped_total: u64,
    last_report: Option<FpsReport>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: Instant) {
        if self.interval_start.is_some() {
            return;
        }
        self.interval_start = Some(now);
        self.rendered = 0;
        self.skipped = 0;
        tracing::info!("FPS counter started");
    }

    pub fn stop(&mut self) {
        if self.interval_start.take().is_some() {
            tracing::info!("FPS counter stopped");
        }
    }

    pub fn is_started(&self) -> bool {
        self.interval_start.is_some()
    }

    pub fn add_rendered_frame(&mut self, now: Instant) {
        self.rendered_total += 1;
        if self.is_started() {
            self.roll_interval(now);
            self.rendered += 1;
        }
    }

    pub fn add_skipped_frames(&mut self, count: u32, now: Instant) {
        if count == 0 {
            return;
        }
        self.skipped_total += u64::from(count);
        if self.is_started() {
            self.roll_interval(now);
            self.skipped += count;
        }
    }

    pub fn rendered_total(&self) -> u64 {
        self.rendered_total
    }

    pub fn skipped_total(&self) -> u64 {
        self.skipped_total
    }

    pub fn last_report(&self) -> Option<FpsReport> {
        self.last_report
    }

    fn roll_interval(&mut self, now: Instant) {
        let Some(start) = self.interval_start else {
            return;
        };
        if now.saturating_duration_since(start) < REPORT_INTERVAL {
            return;
        }
        let report = FpsReport {
            rendered: self.rendered,
            skipped: self.skipped,
        };
        if report.skipped > 0 {
            tracing::info!(
                "{} fps (+{} frames skipped)",
                report.rendered,
                report.skipped
            );
        } else {
            tracing::info!("{} fps", report.rendered);
        }
        self.last_report = Some(report);
        self.rendered = 0;
        self.skipped = 0;
        self.interval_start = Some(now);
    }
}
