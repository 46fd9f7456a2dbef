use serde::Serialize;

/// Arguments of `getTradesHistory`. Zero means "unbounded".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TradesHistoryArgs {
    pub start: i64,
    pub end: i64,
}
