//! Scripted transport and manual clock shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

use xapi_sdk::error::WsError;
use xapi_sdk::time::Clock;
use xapi_sdk::ws::{Connector, Transport};

// ─── Script ──────────────────────────────────────────────────────────────────

/// What the next `recv()` produces.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(WsError),
    /// Never completes.
    Hang,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Reply::Text(value.to_string())
    }

    pub fn ok(data: Value) -> Self {
        Reply::json(json!({"status": true, "returnData": data}))
    }
}

/// Everything the fake observed, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Connect(usize),
    Send(usize, Value),
    Recv(usize),
    Close(usize),
}

#[derive(Default)]
struct Script {
    connect_failures: VecDeque<WsError>,
    replies: VecDeque<Reply>,
    /// Answer every request with its own command name instead of `replies`.
    echo: bool,
    fail_close: bool,
    connections: usize,
    events: Vec<Event>,
}

/// A [`Connector`] whose transports replay a shared script.
#[derive(Clone, Default)]
pub struct ScriptedConnector {
    script: Arc<Mutex<Script>>,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transports answer `{"status": true, "returnData": {"command": <sent command>}}`.
    pub fn echo() -> Self {
        let connector = Self::default();
        connector.script.lock().unwrap().echo = true;
        connector
    }

    pub fn reply(&self, reply: Reply) -> &Self {
        self.script.lock().unwrap().replies.push_back(reply);
        self
    }

    pub fn reply_ok(&self, data: Value) -> &Self {
        self.reply(Reply::ok(data))
    }

    pub fn fail_next_connect(&self, error: WsError) -> &Self {
        self.script.lock().unwrap().connect_failures.push_back(error);
        self
    }

    pub fn fail_close(&self) -> &Self {
        self.script.lock().unwrap().fail_close = true;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.script.lock().unwrap().events.clone()
    }

    pub fn connections(&self) -> usize {
        self.script.lock().unwrap().connections
    }

    /// Commands sent so far, with the connection each went out on.
    pub fn sent(&self) -> Vec<(usize, Value)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Send(id, v) => Some((id, v)),
                _ => None,
            })
            .collect()
    }

    pub fn sent_commands(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .map(|(_, v)| v["command"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

impl Connector for ScriptedConnector {
    type Transport = ScriptedTransport;

    async fn connect(&self, _url: &str) -> Result<ScriptedTransport, WsError> {
        let mut script = self.script.lock().unwrap();
        if let Some(error) = script.connect_failures.pop_front() {
            return Err(error);
        }
        script.connections += 1;
        let id = script.connections;
        script.events.push(Event::Connect(id));
        Ok(ScriptedTransport {
            id,
            script: self.script.clone(),
            pending: VecDeque::new(),
        })
    }
}

pub struct ScriptedTransport {
    id: usize,
    script: Arc<Mutex<Script>>,
    /// Commands written but not yet answered, for echo mode.
    pending: VecDeque<String>,
}

impl Transport for ScriptedTransport {
    async fn send(&mut self, text: String) -> Result<(), WsError> {
        tokio::task::yield_now().await;
        let value: Value = serde_json::from_str(&text).map_err(|e| WsError::SendFailed(e.to_string()))?;
        self.pending
            .push_back(value["command"].as_str().unwrap_or_default().to_string());
        self.script
            .lock()
            .unwrap()
            .events
            .push(Event::Send(self.id, value));
        Ok(())
    }

    async fn recv(&mut self) -> Result<String, WsError> {
        tokio::task::yield_now().await;
        let reply = {
            let mut script = self.script.lock().unwrap();
            script.events.push(Event::Recv(self.id));
            if script.echo {
                let command = self.pending.pop_front().unwrap_or_default();
                Reply::ok(json!({"command": command}))
            } else {
                script
                    .replies
                    .pop_front()
                    .unwrap_or(Reply::Fail(WsError::ReceiveFailed("script exhausted".into())))
            }
        };
        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Fail(error) => Err(error),
            Reply::Hang => std::future::pending().await,
        }
    }

    async fn close(&mut self) -> Result<(), WsError> {
        let mut script = self.script.lock().unwrap();
        script.events.push(Event::Close(self.id));
        if script.fail_close {
            Err(WsError::SendFailed("close frame rejected".into()))
        } else {
            Ok(())
        }
    }
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// A clock that only moves when told to.
#[derive(Clone)]
pub struct ManualClock {
    state: Arc<Mutex<(Instant, NaiveDateTime)>>,
}

impl ManualClock {
    pub fn new() -> Self {
        let wall = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Self {
            state: Arc::new(Mutex::new((Instant::now(), wall))),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut state = self.state.lock().unwrap();
        state.0 += by;
        state.1 += chrono::Duration::from_std(by).unwrap();
    }
}

impl Clock for ManualClock {
    fn instant(&self) -> Instant {
        self.state.lock().unwrap().0
    }

    fn local_now(&self) -> NaiveDateTime {
        self.state.lock().unwrap().1
    }
}

// ─── Canned replies ──────────────────────────────────────────────────────────

pub const SERVER_TIME: i64 = 1_710_504_000_000;

pub fn login_ok() -> Reply {
    Reply::json(json!({"status": true, "streamSessionId": "8469308861804289383"}))
}

pub fn server_time() -> Reply {
    Reply::ok(json!({"time": SERVER_TIME, "timeString": "Mar 15, 2024 12:00:00 PM"}))
}

pub fn candles(n: usize) -> Reply {
    let rates: Vec<Value> = (0..n)
        .map(|i| {
            json!({
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
    Reply::ok(json!({"digits": 5, "rateInfos": rates}))
}
