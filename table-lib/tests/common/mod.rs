#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use simplelog::{Config, LevelFilter, TestLogger};
use table_lib::{Column, FetchError, Row, RowQuery, RowSource};
use tokio::sync::{mpsc, oneshot};

pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

pub fn product_columns() -> Vec<Column> {
    vec![
        Column::string("images", "Image").renderer(|v| format!("<img src=\"{}\">", v)),
        Column::string("title", "Name").sortable(),
        Column::number("quantity", "Quantity").sortable(),
        Column::number("price", "Price").sortable(),
        Column::number("sales", "Sales"),
    ]
}

pub fn product(id: usize) -> Row {
    Row::new()
        .set("id", format!("product-{id}"))
        .set("images", format!("{id}.png"))
        .set("title", format!("Product {id:03}"))
        .set("quantity", (id % 7) as i64)
        .set("price", (100 + id * 3) as i64)
        .set("sales", (id * 11) as i64)
}

pub fn products(range: std::ops::Range<usize>) -> Vec<Row> {
    range.map(product).collect()
}

pub fn ids(rows: &[Row]) -> Vec<String> {
    rows.iter().map(|r| r.value("id").to_string()).collect()
}

// ============================================================================
// Scripted source: answers immediately from a queue
// ============================================================================

#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<Row>, FetchError>>>,
    calls: Mutex<Vec<RowQuery>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_rows(self, rows: Vec<Row>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(rows));
        self
    }

    pub fn then_error(self, error: FetchError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RowQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RowSource for ScriptedSource {
    async fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<Row>, FetchError> {
        self.calls.lock().unwrap().push(query.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

// ============================================================================
// Gated source: every fetch waits until the test answers it
// ============================================================================

pub struct PendingFetch {
    pub query: RowQuery,
    reply: oneshot::Sender<Result<Vec<Row>, FetchError>>,
}

impl PendingFetch {
    pub fn respond(self, rows: Vec<Row>) {
        let _ = self.reply.send(Ok(rows));
    }

    pub fn fail(self, error: FetchError) {
        let _ = self.reply.send(Err(error));
    }
}

pub struct GatedSource {
    requests: mpsc::UnboundedSender<PendingFetch>,
}

pub fn gated() -> (GatedSource, mpsc::UnboundedReceiver<PendingFetch>) {
    let (requests, pending) = mpsc::unbounded_channel();
    (GatedSource { requests }, pending)
}

#[async_trait]
impl RowSource for GatedSource {
    async fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<Row>, FetchError> {
        let (reply, answer) = oneshot::channel();
        self.requests
            .send(PendingFetch {
                query: query.clone(),
                reply,
            })
            .map_err(|_| FetchError::source("test harness dropped"))?;
        answer
            .await
            .map_err(|_| FetchError::source("fetch was never answered"))?
    }
}
