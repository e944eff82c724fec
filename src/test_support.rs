//! Test helpers: in-process upstream stubs and ready-made state

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, Uri};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::config::{
    AppState, Config, CorsConfig, LoggingConfig, PerformanceConfig, ServerConfig, UpstreamConfig,
    DEFAULT_ALLOWED_ORIGIN,
};

/// A stub news API answering every request through a closure
pub struct StubUpstream {
    addr: std::net::SocketAddr,
    seen: Arc<Mutex<Vec<String>>>,
}

impl StubUpstream {
    pub fn url(&self) -> String {
        format!("http://{}/svc/search/v2/articlesearch.json", self.addr)
    }

    /// Request URIs received so far, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

pub async fn spawn_stub<F>(respond: F) -> StubUpstream
where
    F: Fn(&Uri) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let respond = Arc::new(respond);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_server = Arc::clone(&seen);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let respond = Arc::clone(&respond);
            let seen = Arc::clone(&seen_by_server);
            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let respond = Arc::clone(&respond);
                    let seen = Arc::clone(&seen);
                    async move {
                        seen.lock().unwrap().push(req.uri().to_string());
                        let (status, body) = respond(req.uri());
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(status)
                                .header("Content-Type", "application/json")
                                .body(Full::new(Bytes::from(body)))
                                .unwrap(),
                        )
                    }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    StubUpstream { addr, seen }
}

/// A news API that accepts connections and never answers
pub async fn spawn_silent_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    format!("http://{addr}/svc/search/v2/articlesearch.json")
}

/// A URL nothing is listening on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/svc/search/v2/articlesearch.json")
}

/// Log output captured from `tracing` events on the current thread
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Route `tracing` output into a buffer until the guard is dropped
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

pub fn test_config(base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            workers: None,
        },
        upstream: UpstreamConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            timeout_secs: Some(5),
        },
        cors: CorsConfig {
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            access_log: false,
            access_log_format: "combined".to_string(),
            access_log_file: None,
        },
        performance: PerformanceConfig {
            keep_alive_timeout: 75,
            header_read_timeout: 30,
            max_connections: None,
        },
    }
}

pub fn test_state(base_url: &str) -> Arc<AppState> {
    Arc::new(AppState::new(&test_config(base_url)).unwrap())
}
