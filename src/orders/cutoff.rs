// Daily cutoff policy for order creation, modification and deletion.
//
// All civil-time comparisons in the system (cutoff, "today" for the daily
// views, the statistics anchor) go through this module so they agree on the
// Europe/Rome calendar.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use chrono_tz::Europe::Rome;
use chrono_tz::Tz;

/// Hour of day (Rome civil time) after which next-day orders are locked.
pub const CUTOFF_HOUR: u32 = 20;

/// Current instant in Rome civil time.
pub fn now_rome() -> DateTime<Tz> {
    chrono::Utc::now().with_timezone(&Rome)
}

/// Current Rome calendar date.
pub fn today() -> NaiveDate {
    now_rome().date_naive()
}

/// Start of tomorrow on the Rome calendar, used as the statistics anchor
/// and the boundary for "future order" cascades.
pub fn start_of_tomorrow() -> NaiveDate {
    today() + Duration::days(1)
}

/// Whether an order with the given delivery date may still be created,
/// modified or cancelled at instant `now`.
///
/// - Delivery after tomorrow: always modifiable.
/// - Delivery today or tomorrow: modifiable only before 20:00.
/// - Delivery before today: never modifiable.
///
/// Pure; evaluated fresh on every request, never stored.
pub fn is_modifiable_at(delivery: NaiveDate, now: DateTime<Tz>) -> bool {
    let today = now.date_naive();
    let tomorrow = today + Duration::days(1);

    if delivery > tomorrow {
        true
    } else if delivery < today {
        false
    } else {
        let cutoff = NaiveTime::from_hms_opt(CUTOFF_HOUR, 0, 0)
            .unwrap_or(NaiveTime::MIN);
        now.time() < cutoff
    }
}

/// Cutoff check against the current Rome time.
pub fn is_modifiable(delivery: NaiveDate) -> bool {
    is_modifiable_at(delivery, now_rome())
}
