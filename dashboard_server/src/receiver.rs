use crate::query::Router;
use dashboard_common::Result;
use dashboard_common::http::{MAX_REQUEST_HEAD, encode_response, read_request};
use log::{debug, error, info};
use std::io::{BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How long a connection may take to deliver its request head.
const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP listener that serves the dashboard's read endpoints.
///
/// Accepts TCP connections, reads a single request per connection, answers it through
/// the shared [`Router`] and closes the connection. Each connection gets its own thread,
/// so the fixed response latency of one caller never delays another. A connection that
/// stays silent past the read timeout, or sends more than `MAX_REQUEST_HEAD` bytes
/// without finishing its head, is dropped.
pub struct HttpReceiver {
    /// The underlying TCP listening socket.
    pub(crate) socket: TcpListener,
    read_timeout: Duration,
}

impl HttpReceiver {
    /// Bind a new receiver to the provided `bind_addr` (e.g., `127.0.0.1:8080`).
    pub fn new(bind_addr: &str) -> Result<Self> {
        let socket = TcpListener::bind(bind_addr)?;
        Ok(Self {
            socket,
            read_timeout: REQUEST_READ_TIMEOUT,
        })
    }

    /// Override the per-connection read timeout. Zero is raised to one millisecond.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout.max(Duration::from_millis(1));
        self
    }

    /// Address actually bound, useful when binding port 0.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Blocking accept loop. A failing connection is logged and does not stop the loop.
    pub fn serve(self, router: Arc<Router>) -> Result<()> {
        info!("Dashboard HTTP server is started on {}", self.socket.local_addr()?);

        for stream in self.socket.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&router);
                    let read_timeout = self.read_timeout;
                    thread::spawn(move || {
                        if let Err(e) = handle_connection(stream, &router, read_timeout) {
                            error!("Connection error: {}", e);
                        }
                    });
                }
                Err(e) => error!("TCP connection error: {}", e),
            }
        }
        Ok(())
    }
}

/// Read one request from `stream`, answer it and flush.
fn handle_connection(mut stream: TcpStream, router: &Router, read_timeout: Duration) -> Result<()> {
    let peer = stream.peer_addr()?;
    stream.set_read_timeout(Some(read_timeout))?;
    let request = {
        let mut reader = BufReader::new((&stream).take(MAX_REQUEST_HEAD));
        read_request(&mut reader)?
    };

    let response = router.handle(&request);
    debug!(
        "{} {} {} -> {}",
        peer,
        request.method,
        request.target,
        response.status.code()
    );

    stream.write_all(&encode_response(response.status, &response.body))?;
    stream.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::clock::SystemClock;
    use crate::model::directory::Directory;
    use crate::model::store::{SimulatorConfig, Store};
    use crate::query::QueryService;
    use dashboard_common::model::{AccountData, Company};
    use std::time::Instant;

    fn spawn_server(read_timeout: Duration) -> SocketAddr {
        let store = Store::new(Directory::default(), &SimulatorConfig::default(), Arc::new(SystemClock))
            .unwrap()
            .into_shared();
        let router = Arc::new(Router::new(QueryService::new(store), Duration::ZERO));
        let receiver = HttpReceiver::new("127.0.0.1:0")
            .unwrap()
            .with_read_timeout(read_timeout);
        let addr = receiver.local_addr().unwrap();
        thread::spawn(move || receiver.serve(router));
        addr
    }

    fn fetch(addr: SocketAddr, path: &str) -> (u16, String) {
        let response = reqwest::blocking::get(format!("http://{}{}", addr, path)).unwrap();
        let status = response.status().as_u16();
        (status, response.text().unwrap())
    }

    #[test]
    fn serves_companies_over_tcp() {
        let addr = spawn_server(REQUEST_READ_TIMEOUT);
        let (status, body) = fetch(addr, "/companies");
        assert_eq!(status, 200);
        let companies: Vec<Company> = serde_json::from_str(&body).unwrap();
        assert_eq!(companies, Directory::default().companies);
    }

    #[test]
    fn serves_account_data_and_not_found() {
        let addr = spawn_server(REQUEST_READ_TIMEOUT);
        let (status, body) = fetch(addr, "/accounts/a2/data");
        assert_eq!(status, 200);
        let data: AccountData = serde_json::from_str(&body).unwrap();
        assert_eq!(data.stocks.len(), 5);

        let (status, body) = fetch(addr, "/unknown/path");
        assert_eq!(status, 404);
        assert_eq!(body, r#"{"error":"not found"}"#);
    }

    #[test]
    fn garbage_request_does_not_stop_the_listener() {
        let addr = spawn_server(REQUEST_READ_TIMEOUT);
        {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.write_all(b"nonsense\r\n\r\n").unwrap();
            let mut sink = Vec::new();
            let _ = stream.read_to_end(&mut sink);
        }
        let (status, _) = fetch(addr, "/companies");
        assert_eq!(status, 200);
    }

    #[test]
    fn silent_connection_is_closed_after_the_read_timeout() {
        let addr = spawn_server(Duration::from_millis(50));
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.set_read_timeout(Some(Duration::from_secs(10))).unwrap();

        let started = Instant::now();
        let mut sink = Vec::new();
        let _ = stream.read_to_end(&mut sink);
        assert!(sink.is_empty());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn endless_request_line_is_cut_off_without_a_response() {
        let addr = spawn_server(REQUEST_READ_TIMEOUT);
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.set_read_timeout(Some(Duration::from_secs(10))).unwrap();

        let _ = stream.write_all(&vec![b'a'; 4 * MAX_REQUEST_HEAD as usize]);
        let mut sink = Vec::new();
        let _ = stream.read_to_end(&mut sink);
        assert!(sink.is_empty());

        let (status, _) = fetch(addr, "/companies");
        assert_eq!(status, 200);
    }
}
