//! Synthetic message generation for exercising the read endpoints.
//!
//! Records get a path from a fixed catalog, a payload size in [`MIN_SIZE`]..=[`MAX_SIZE`]
//! and a timestamp spread uniformly over a trailing window.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StorageError;
use crate::models::MessageRecord;
use crate::repository::MessageStore;

pub const PATH_CATALOG: &[&str] = &[
    "/orders",
    "/orders/refunds",
    "/payments",
    "/payments/webhooks",
    "/users",
    "/users/sessions",
    "/inventory",
    "/notifications",
];

pub const MIN_SIZE: i64 = 64;
pub const MAX_SIZE: i64 = 65_536;

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub created: u64,
    /// Earliest timestamp a generated message may carry.
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Builds `count` records with timestamps in `[window_end - window, window_end]`.
pub fn generate_messages<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    window_end: DateTime<Utc>,
    window: Duration,
) -> Vec<MessageRecord> {
    let window_ms = window.num_milliseconds().max(0);

    (0..count)
        .map(|_| {
            let path = PATH_CATALOG.choose(rng).copied().unwrap_or("/");
            let size = rng.gen_range(MIN_SIZE..=MAX_SIZE);
            let created_at = window_end - Duration::milliseconds(rng.gen_range(0..=window_ms));
            MessageRecord::with_timestamp(path, size, created_at)
        })
        .collect()
}

/// Generates `count` messages ending now and stores them through `store`.
pub async fn simulate<S: MessageStore + ?Sized>(
    store: &S,
    count: u32,
    window: Duration,
) -> Result<SimulationReport, StorageError> {
    let end_date = Utc::now();
    let start_date = end_date.checked_sub_signed(window).ok_or_else(|| {
        StorageError::InvalidRecord(format!(
            "Simulation window of {} days reaches past the supported date range",
            window.num_days()
        ))
    })?;
    let records = {
        let mut rng = rand::thread_rng();
        generate_messages(&mut rng, count as usize, end_date, window)
    };

    let created = store.insert_messages(&records).await?;
    info!(created, %start_date, %end_date, "Simulated messages");

    Ok(SimulationReport {
        created,
        start_date,
        end_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_messages_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let window_end = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let window = Duration::days(30);

        let records = generate_messages(&mut rng, 200, window_end, window);

        assert_eq!(records.len(), 200);
        for record in &records {
            assert!(PATH_CATALOG.contains(&record.path.as_str()));
            assert!((MIN_SIZE..=MAX_SIZE).contains(&record.size));
            assert!(record.created_at <= window_end);
            assert!(record.created_at >= window_end - window);
        }
    }

    #[test]
    fn test_generate_messages_zero_window() {
        let mut rng = StdRng::seed_from_u64(1);
        let window_end = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        let records = generate_messages(&mut rng, 5, window_end, Duration::zero());

        assert!(records.iter().all(|r| r.created_at == window_end));
    }

    #[test]
    fn test_generate_messages_unique_ids() {
        let mut rng = StdRng::seed_from_u64(3);
        let records = generate_messages(&mut rng, 50, Utc::now(), Duration::hours(1));

        let mut ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }
}
