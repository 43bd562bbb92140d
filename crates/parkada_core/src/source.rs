//! Entity sources that seed the domain store.
//!
//! # Responsibility
//! - Define the startup contract for loading a full entity snapshot.
//! - Provide the sample source used by the demo dashboard.
//!
//! # Invariants
//! - A seeded [`SampleEntitySource`] is fully deterministic.
//! - Generated slots satisfy the plate/status invariant.

use crate::config::{ConfigError, DashboardConfig};
use crate::model::activity::{ActivityEntry, ActivityKind};
use crate::model::notification::{Notification, NotificationIcon};
use crate::model::payment::{PaymentPeriod, PaymentRecord, PaymentStatus};
use crate::model::slot::{Slot, SlotStatus};
use chrono::{NaiveDate, NaiveTime};
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Plates assigned to generated non-available slots.
pub const SAMPLE_PLATES: &[&str] = &[
    "ABC-1234", "XYZ-7788", "TUV-9001", "KLM-5678", "JPN-2468", "PHL-4321", "MTR-001", "CAR-8888",
];

pub type SourceResult<T> = Result<T, SourceError>;

/// Complete initial state handed to the domain store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub slots: Vec<Slot>,
    pub activities: Vec<ActivityEntry>,
    pub payments: Vec<PaymentPeriod>,
    pub notifications: Vec<Notification>,
}

/// Startup data provider. Called once per store.
pub trait EntitySource {
    fn load(&self) -> SourceResult<EntitySnapshot>;
}

/// Entity source failures.
#[derive(Debug)]
pub enum SourceError {
    Config(ConfigError),
    /// A built-in sample record could not be constructed.
    InvalidSample(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid source config: {err}"),
            Self::InvalidSample(message) => write!(f, "invalid sample record: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::InvalidSample(_) => None,
        }
    }
}

impl From<ConfigError> for SourceError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

/// Demo source: random slot occupancy plus fixed activity, payment and
/// notification samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleEntitySource {
    slot_count: u32,
    section: String,
    since: NaiveTime,
    seed: Option<u64>,
}

impl SampleEntitySource {
    /// Builds a source from validated dashboard config.
    pub fn from_config(config: &DashboardConfig) -> SourceResult<Self> {
        config.validate()?;
        Ok(Self {
            slot_count: config.slot_count,
            section: config.section.trim().to_string(),
            since: config.since_time()?,
            seed: config.seed,
        })
    }

    /// Seeded source with default layout, mainly for tests.
    pub fn seeded(slot_count: u32, seed: u64) -> SourceResult<Self> {
        Self::from_config(&DashboardConfig {
            slot_count,
            seed: Some(seed),
            ..DashboardConfig::default()
        })
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl EntitySource for SampleEntitySource {
    fn load(&self) -> SourceResult<EntitySnapshot> {
        let mut rng = self.rng();
        let slots = generate_slots(&mut rng, self.slot_count, &self.section, self.since);
        info!(
            "event=source_load module=source status=ok slots={} seeded={}",
            slots.len(),
            self.seed.is_some()
        );
        Ok(EntitySnapshot {
            slots,
            activities: sample_activities(),
            payments: sample_payments()?,
            notifications: sample_notifications(),
        })
    }
}

/// Generates `count` slots with uniformly random status.
pub fn generate_slots(
    rng: &mut impl Rng,
    count: u32,
    section: &str,
    since: NaiveTime,
) -> Vec<Slot> {
    (1..=count)
        .map(|id| {
            let status = *SlotStatus::ALL
                .choose(&mut *rng)
                .unwrap_or(&SlotStatus::Available);
            let plate = if status.holds_vehicle() {
                SAMPLE_PLATES.choose(&mut *rng).copied().unwrap_or_default()
            } else {
                ""
            };
            Slot::new(id, section, status, plate, since)
        })
        .collect()
}

pub fn sample_activities() -> Vec<ActivityEntry> {
    vec![
        ActivityEntry::new(
            ActivityKind::Enter,
            "Vehicle ABC-1234 entered at Gate 2",
            "08:15 AM",
        ),
        ActivityEntry::new(
            ActivityKind::Reserve,
            "Slot A-12 reserved for XYZ-7788",
            "08:22 AM",
        ),
        ActivityEntry::new(ActivityKind::Exit, "Vehicle TUV-9001 exited", "08:40 AM"),
        ActivityEntry::new(
            ActivityKind::Enter,
            "Vehicle KLM-5678 entered at Gate 1",
            "09:05 AM",
        ),
    ]
}

pub fn sample_payments() -> SourceResult<Vec<PaymentPeriod>> {
    Ok(vec![
        PaymentPeriod::new(
            "1st Semester, AY 2025-2026",
            vec![
                payment("Car", "ABC-1234", PaymentStatus::Paid, (2025, 8, 15), 2500)?,
                payment(
                    "Motorcycle",
                    "MTR-001",
                    PaymentStatus::Pending,
                    (2025, 8, 20),
                    1200,
                )?,
            ],
        ),
        PaymentPeriod::new(
            "2nd Semester, AY 2024-2025",
            vec![
                payment("Car", "XYZ-7788", PaymentStatus::Paid, (2025, 2, 1), 2500)?,
                payment("Car", "TUV-9001", PaymentStatus::Paid, (2025, 2, 10), 2500)?,
            ],
        ),
    ])
}

pub fn sample_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            title: "Payment reminder".to_string(),
            body: "Semester fee due in 5 days.".to_string(),
            time: "Yesterday".to_string(),
            unread: true,
            icon: NotificationIcon::Bell,
        },
        Notification {
            id: 2,
            title: "Parking alert".to_string(),
            body: "Your vehicle ABC-1234 is parked at A-05.".to_string(),
            time: "1h ago".to_string(),
            unread: true,
            icon: NotificationIcon::Car,
        },
        Notification {
            id: 3,
            title: "Reservation confirmed".to_string(),
            body: "Slot A-12 reserved 10:00 AM - 12:00 PM.".to_string(),
            time: "Today".to_string(),
            unread: false,
            icon: NotificationIcon::Calendar,
        },
    ]
}

fn payment(
    vehicle_type: &str,
    plate: &str,
    status: PaymentStatus,
    (year, month, day): (i32, u32, u32),
    amount: u64,
) -> SourceResult<PaymentRecord> {
    Ok(PaymentRecord {
        vehicle_type: vehicle_type.to_string(),
        plate: plate.to_string(),
        status,
        date: sample_date(year, month, day)?,
        amount,
    })
}

fn sample_date(year: i32, month: u32, day: u32) -> SourceResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        SourceError::InvalidSample(format!("date {year:04}-{month:02}-{day:02} does not exist"))
    })
}

#[cfg(test)]
mod tests {
    use super::{sample_date, EntitySource, SampleEntitySource, SourceError, SAMPLE_PLATES};
    use crate::config::DashboardConfig;

    #[test]
    fn seeded_source_is_deterministic() {
        let first = SampleEntitySource::seeded(48, 42)
            .expect("source")
            .load()
            .expect("first load");
        let second = SampleEntitySource::seeded(48, 42)
            .expect("source")
            .load()
            .expect("second load");
        assert_eq!(first, second);
        assert_eq!(first.slots.len(), 48);
    }

    #[test]
    fn generated_slots_respect_plate_invariant() {
        for seed in 0..16 {
            let snapshot = SampleEntitySource::seeded(48, seed)
                .expect("source")
                .load()
                .expect("load");
            for (index, slot) in snapshot.slots.iter().enumerate() {
                assert_eq!(slot.id as usize, index + 1);
                slot.validate().expect("generated slot should be valid");
                if !slot.plate.is_empty() {
                    assert!(SAMPLE_PLATES.contains(&slot.plate.as_str()));
                }
            }
        }
    }

    #[test]
    fn uses_configured_section_and_since() {
        let config = DashboardConfig {
            slot_count: 3,
            section: "B".to_string(),
            since: "07:30".to_string(),
            seed: Some(1),
            ..DashboardConfig::default()
        };
        let snapshot = SampleEntitySource::from_config(&config)
            .expect("source")
            .load()
            .expect("load");
        assert_eq!(snapshot.slots[0].label, "B-01");
        assert_eq!(snapshot.slots[2].since.format("%H:%M").to_string(), "07:30");
    }

    #[test]
    fn rejects_invalid_config() {
        let config = DashboardConfig {
            slot_count: 0,
            ..DashboardConfig::default()
        };
        assert!(SampleEntitySource::from_config(&config).is_err());
    }

    #[test]
    fn sample_notifications_match_dashboard_defaults() {
        let notifications = super::sample_notifications();
        let ids: Vec<u32> = notifications.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let unread: Vec<bool> = notifications.iter().map(|n| n.unread).collect();
        assert_eq!(unread, vec![true, true, false]);
    }

    #[test]
    fn sample_payment_dates_are_real_calendar_days() {
        let periods = super::sample_payments().expect("sample payments");
        let first = &periods[0].records[0];
        assert_eq!(first.date.format("%Y-%m-%d").to_string(), "2025-08-15");
        for record in periods.iter().flat_map(|period| &period.records) {
            assert_ne!(record.date, chrono::NaiveDate::default());
        }
    }

    #[test]
    fn impossible_sample_date_is_an_error() {
        let err = sample_date(2025, 2, 30).expect_err("february 30th does not exist");
        assert!(matches!(err, SourceError::InvalidSample(_)));
        assert_eq!(
            err.to_string(),
            "invalid sample record: date 2025-02-30 does not exist"
        );
    }
}
