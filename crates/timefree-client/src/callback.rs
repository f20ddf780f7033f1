//! Loopback listener for the calendar-authorization redirect.
//!
//! The backend finishes the OAuth code exchange itself and redirects the
//! browser to `http://127.0.0.1:<port>/callback?auth=success|error`. The
//! redirect never carries tokens or profile data; session material only
//! ever comes from the credential-exchange response.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, error};

use crate::error::{ClientError, ClientResult};

/// Outcome of the authorization redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The provider granted access.
    Success,
    /// The provider denied access or the grant failed, with an optional
    /// detail from the redirect.
    Denied(Option<String>),
}

/// A one-shot loopback HTTP listener for the authorization redirect.
#[derive(Debug)]
pub struct CallbackServer {
    listener: TcpListener,
    port: u16,
}

impl CallbackServer {
    /// Binds the first available port in `port_range` (inclusive).
    ///
    /// A range of `(0, 0)` binds an OS-assigned ephemeral port.
    pub fn bind(port_range: (u16, u16)) -> ClientResult<Self> {
        for port in port_range.0..=port_range.1 {
            if let Ok(listener) = TcpListener::bind(("127.0.0.1", port)) {
                let port = listener
                    .local_addr()
                    .map_err(|e| ClientError::Callback(format!("failed to read local addr: {}", e)))?
                    .port();
                debug!("bound callback listener on port {}", port);
                return Ok(Self { listener, port });
            }
        }
        Err(ClientError::Callback(format!(
            "no available port in range {}-{}",
            port_range.0, port_range.1
        )))
    }

    /// The port the listener is bound to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The redirect URI the backend should send the browser to.
    pub fn redirect_uri(&self) -> String {
        format!("http://127.0.0.1:{}/callback", self.port)
    }

    /// Waits for the redirect, answering the browser with a small HTML
    /// page, and returns the parsed outcome.
    pub fn wait(self, timeout: Duration) -> ClientResult<CallbackOutcome> {
        let (tx, rx) = mpsc::channel();
        let listener = self.listener;

        // Accept in a separate thread so the wait can time out.
        let _handle = thread::spawn(move || {
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => {
                        if let Some(outcome) = handle_request(stream) {
                            let _ = tx.send(outcome);
                            return;
                        }
                    }
                    Err(e) => {
                        error!("failed to accept connection: {}", e);
                    }
                }
            }
        });

        match rx.recv_timeout(timeout) {
            Ok(outcome) => Ok(outcome),
            Err(mpsc::RecvTimeoutError::Timeout) => Err(ClientError::Callback(
                "timed out waiting for the authorization redirect".to_string(),
            )),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(ClientError::Callback(
                "callback channel disconnected".to_string(),
            )),
        }
    }
}

/// Handles one incoming HTTP request. Returns None for requests that are
/// not the callback (favicon fetches and the like).
fn handle_request(mut stream: TcpStream) -> Option<CallbackOutcome> {
    let mut reader = BufReader::new(&stream);
    let mut request_line = String::new();

    if reader.read_line(&mut request_line).is_err() {
        return None;
    }

    // Request line: GET /callback?auth=... HTTP/1.1
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() < 2 || parts[0] != "GET" {
        return None;
    }

    let path = parts[1];
    if !path.starts_with("/callback") {
        return None;
    }

    let query = path.find('?').map(|i| &path[i + 1..]).unwrap_or("");
    let outcome = parse_callback_query(query);

    let response = match outcome {
        Some(CallbackOutcome::Success) => {
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n\
            <html><body><h1>Calendar Connected</h1>\
            <p>You can close this window and return to the terminal.</p></body></html>"
        }
        _ => {
            "HTTP/1.1 400 Bad Request\r\nContent-Type: text/html\r\n\r\n\
            <html><body><h1>Authorization Failed</h1>\
            <p>You can close this window.</p></body></html>"
        }
    };

    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();

    outcome
}

/// Parses the callback query string.
///
/// Recognizes `auth=success` and `auth=error` (with an optional `error`
/// detail parameter). Any other token-bearing parameters an older backend
/// variant might append are deliberately ignored. Returns None when no
/// `auth` indicator is present.
pub fn parse_callback_query(query: &str) -> Option<CallbackOutcome> {
    let mut auth = None;
    let mut detail = None;

    for param in query.split('&') {
        let mut kv = param.splitn(2, '=');
        if let (Some(key), Some(value)) = (kv.next(), kv.next()) {
            let value = urlencoding::decode(value).unwrap_or_default().into_owned();
            match key {
                "auth" => auth = Some(value),
                "error" => detail = Some(value),
                _ => {}
            }
        }
    }

    match auth.as_deref() {
        Some("success") => Some(CallbackOutcome::Success),
        Some(_) => Some(CallbackOutcome::Denied(detail)),
        None => None,
    }
}
