//! Derived state intervals

use serde::Serialize;

/// A contiguous time range during which a service held one state
///
/// Intervals are derived on read and never stored. `end_time` is `None`
/// only for the most recent interval of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    #[serde(skip)]
    pub service_name: String,
    pub state: String,
    pub start_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

impl Interval {
    /// Whether the state is still ongoing
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}
