/// Wall clock in Unix epoch milliseconds.
pub trait ClockPort: Send + Sync {
    fn now_ms(&self) -> i64;

    /// Start of the current local day, used by history statistics.
    fn start_of_today_ms(&self) -> i64;
}
