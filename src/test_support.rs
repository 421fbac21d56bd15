use std::future::Future;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::time::Instant;

use crate::domain::RequestConfig;
use crate::http::{RequestExecutor, RequestOutcome};

pub(crate) const OK_RESPONSE: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK";
pub(crate) const TRUNCATED_RESPONSE: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Length: 64\r\nConnection: close\r\n\r\nOK";

pub(crate) fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

pub(crate) fn request_config(url: &str, method: &str) -> RequestConfig {
    RequestConfig {
        url: url.to_owned(),
        method: method.to_owned(),
        token: "secret".to_owned(),
        delay_ms: 0,
        skip_delay_percent: -1,
        request_timeout: Some(Duration::from_secs(5)),
        connect_timeout: Some(Duration::from_secs(2)),
    }
}

/// URL of a port nothing listens on.
pub(crate) fn closed_port_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind probe listener failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("probe addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}

pub(crate) struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ServerHandle {
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawns a tiny HTTP/1.1 server answering every connection with `response`
/// and recording the raw request head.
pub(crate) fn spawn_http_server(response: &'static [u8]) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let recorded = Arc::clone(&recorded);
                    thread::spawn(move || handle_client(stream, response, &recorded));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}/", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
            requests,
        },
    ))
}

fn handle_client(mut stream: TcpStream, response: &[u8], recorded: &Mutex<Vec<String>>) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let mut buffer = [0u8; 4096];
    let Ok(read) = stream.read(&mut buffer) else {
        return;
    };
    if let (Some(head), Ok(mut requests)) = (buffer.get(..read), recorded.lock()) {
        requests.push(String::from_utf8_lossy(head).into_owned());
    }
    if stream.write_all(response).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// What a [`ScriptedExecutor`] does for a given call.
pub(crate) enum FakeStep {
    /// Succeed and report this latency.
    Succeed(Duration),
    /// Hand the call to the delegate executor.
    Delegate,
}

pub(crate) struct CallRecord {
    pub(crate) worker_id: usize,
    pub(crate) started: Instant,
}

type Script = Box<dyn Fn(usize, u64) -> FakeStep + Send + Sync>;

/// Executor driven by a closure of `(worker_id, global_call_index)`.
pub(crate) struct ScriptedExecutor {
    script: Script,
    delegate: Option<Arc<dyn RequestExecutor>>,
    work_time: Duration,
    next_call: AtomicU64,
    calls: Mutex<Vec<CallRecord>>,
}

impl ScriptedExecutor {
    pub(crate) fn new<F>(script: F) -> Self
    where
        F: Fn(usize, u64) -> FakeStep + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            delegate: None,
            work_time: Duration::ZERO,
            next_call: AtomicU64::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_delegate(mut self, delegate: Arc<dyn RequestExecutor>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub(crate) const fn with_work_time(mut self, work_time: Duration) -> Self {
        self.work_time = work_time;
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    pub(crate) fn calls_for(&self, worker_id: usize) -> usize {
        self.calls
            .lock()
            .map(|calls| {
                calls
                    .iter()
                    .filter(|call| call.worker_id == worker_id)
                    .count()
            })
            .unwrap_or(0)
    }

    pub(crate) fn latest_start(&self) -> Option<Instant> {
        self.calls
            .lock()
            .ok()
            .and_then(|calls| calls.iter().map(|call| call.started).max())
    }
}

#[async_trait]
impl RequestExecutor for ScriptedExecutor {
    async fn execute(&self, worker_id: usize) -> RequestOutcome {
        let index = self.next_call.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(CallRecord {
                worker_id,
                started: Instant::now(),
            });
        }
        if !self.work_time.is_zero() {
            tokio::time::sleep(self.work_time).await;
        }
        match (self.script)(worker_id, index) {
            FakeStep::Succeed(latency) => RequestOutcome::Success {
                latency,
                body: Bytes::from_static(b"{}"),
            },
            FakeStep::Delegate => match self.delegate.as_ref() {
                Some(delegate) => delegate.execute(worker_id).await,
                None => RequestOutcome::Success {
                    latency: Duration::ZERO,
                    body: Bytes::from_static(b"{}"),
                },
            },
        }
    }
}
