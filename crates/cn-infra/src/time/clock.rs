use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use cn_core::ports::ClockPort;

pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Local midnight. When a DST gap swallows midnight the first whole hour
    /// that exists on the local clock is used instead.
    fn start_of_today_ms(&self) -> i64 {
        start_of_day(Local::now().date_naive(), &Local)
            .map(|start| start.timestamp_millis())
            .unwrap_or_else(|| self.now_ms())
    }
}

fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    (0..24)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|local| local.and_local_timezone(tz.clone()).earliest())
}
