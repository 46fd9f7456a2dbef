//! Scripted [`Gateway`] for sub-client unit tests.

use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::error::SdkError;
use crate::session::Gateway;
use crate::ws::{Command, Response};

/// Replays canned replies in order and records what was sent.
pub(crate) struct FakeGateway {
    replies: Mutex<Vec<Value>>,
    sent: Mutex<Vec<(Command, Option<Value>)>>,
    now: NaiveDateTime,
}

impl FakeGateway {
    pub(crate) fn new(replies: Vec<Value>) -> Self {
        Self {
            replies: Mutex::new(replies),
            sent: Mutex::new(Vec::new()),
            now: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    pub(crate) fn sent(&self) -> Vec<(Command, Option<Value>)> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn commands(&self) -> Vec<Command> {
        self.sent().into_iter().map(|(c, _)| c).collect()
    }
}

impl Gateway for FakeGateway {
    async fn call(&self, command: Command, arguments: Option<Value>) -> Result<Response, SdkError> {
        self.sent.lock().unwrap().push((command, arguments));
        let reply = self.replies.lock().unwrap().remove(0);
        Ok(serde_json::from_value(reply)?)
    }

    fn local_now(&self) -> NaiveDateTime {
        self.now
    }
}

pub(crate) const SERVER_TIME: i64 = 1_710_504_000_000;

pub(crate) fn server_time_reply() -> Value {
    serde_json::json!({
        "status": true,
        "returnData": {"time": SERVER_TIME, "timeString": "Mar 15, 2024 12:00:00 PM"}
    })
}

pub(crate) fn ok_reply(data: Value) -> Value {
    serde_json::json!({"status": true, "returnData": data})
}

pub(crate) fn rejected_reply(code: &str, description: &str) -> Value {
    serde_json::json!({"status": false, "errorCode": code, "errorDescr": description})
}

/// Chart reply with `n` one-minute candles at 5 digits. Candle `i` has
/// `open = 110_000` and `close = i`.
pub(crate) fn chart_reply(n: usize) -> Value {
    let rates: Vec<Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "ctm": SERVER_TIME - (n - i) as i64 * 60_000,
                "ctmString": format!("candle-{}", i),
                "open": 110_000.0,
                "close": i as f64,
                "high": 10.0,
                "low": -10.0,
                "vol": 1.0
            })
        })
        .collect();
    ok_reply(serde_json::json!({"digits": 5, "rateInfos": rates}))
}
