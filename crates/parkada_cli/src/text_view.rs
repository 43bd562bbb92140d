//! Plain-text view target.

use parkada_core::{DashboardView, SlotStatus, ViewError, ViewTarget};
use std::fmt::Write;
use std::sync::Mutex;

const MAP_COLUMNS: usize = 8;

/// Renders each published view into a text buffer; the latest one wins.
pub struct TextView {
    json: bool,
    latest: Mutex<String>,
}

impl TextView {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            latest: Mutex::new(String::new()),
        }
    }

    pub fn latest(&self) -> String {
        self.latest
            .lock()
            .map(|text| text.clone())
            .unwrap_or_default()
    }
}

impl ViewTarget for TextView {
    fn target_id(&self) -> &str {
        "terminal"
    }

    fn render(&self, view: &DashboardView) -> Result<(), ViewError> {
        let text = if self.json {
            serde_json::to_string_pretty(view).map_err(|err| ViewError::new(err.to_string()))?
        } else {
            render_text(view).map_err(|err| ViewError::new(err.to_string()))?
        };
        let mut latest = self
            .latest
            .lock()
            .map_err(|_| ViewError::new("text buffer poisoned"))?;
        *latest = text;
        Ok(())
    }
}

fn render_text(view: &DashboardView) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let stats = &view.stats;
    writeln!(out, "== {} (revision {})", view.route, view.revision)?;
    writeln!(
        out,
        "slots {} | available {} ({}%) | occupied {} ({}%) | reserved {} ({}%) | utilization {}%",
        stats.counts.total,
        stats.counts.available,
        stats.available_pct,
        stats.counts.occupied,
        stats.occupied_pct,
        stats.counts.reserved,
        stats.reserved_pct,
        stats.utilization_pct
    )?;

    writeln!(out, "-- map")?;
    for row in view.full_map.chunks(MAP_COLUMNS) {
        let line: Vec<String> = row
            .iter()
            .map(|cell| format!("{}{}", cell.meta, status_mark(cell.status)))
            .collect();
        writeln!(out, "{}", line.join(" "))?;
    }

    writeln!(out, "-- activity")?;
    for activity in &view.activities {
        writeln!(out, "[{}] {} ({})", activity.icon, activity.text, activity.time)?;
    }

    writeln!(out, "-- payments")?;
    for period in &view.payments {
        writeln!(out, "{}: {}", period.label, period.total_display)?;
        for row in &period.rows {
            writeln!(
                out,
                "  {} {} {} {} {}",
                row.vehicle_type, row.plate, row.status_label, row.date, row.amount
            )?;
        }
    }

    let badge = if view.badge.visible {
        view.badge.count.to_string()
    } else {
        "-".to_string()
    };
    writeln!(out, "-- notifications [{badge}]")?;
    for notice in &view.notifications {
        let marker = if notice.unread { "*" } else { " " };
        writeln!(
            out,
            "{marker} #{} {}: {} ({})",
            notice.id, notice.title, notice.body, notice.time
        )?;
    }
    Ok(out)
}

fn status_mark(status: SlotStatus) -> char {
    match status {
        SlotStatus::Available => '.',
        SlotStatus::Occupied => '#',
        SlotStatus::Reserved => 'r',
    }
}
