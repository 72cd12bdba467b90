//! Minimal HTTP/1.1 framing shared by the server listener and the viewer.
//!
//! Server side only: one request line plus headers in, one JSON body out,
//! `Connection: close` on every exchange. Bodies are never chunked. The viewer talks to
//! the server through `reqwest`.
use std::io::BufRead;

use strum_macros::{Display, EnumString};

use crate::error::DashboardError;
use crate::result::Result;

/// Upper bound on the bytes read for a request line plus headers.
pub const MAX_REQUEST_HEAD: u64 = 8 * 1024;

/// Request methods the listener understands.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

/// Response statuses the server emits. `Display` yields the reason phrase.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StatusCode {
    #[strum(serialize = "OK")]
    Ok,
    #[strum(serialize = "Not Found")]
    NotFound,
    #[strum(serialize = "Method Not Allowed")]
    MethodNotAllowed,
    #[strum(serialize = "Internal Server Error")]
    InternalServerError,
}

impl StatusCode {
    /// Numeric status code.
    pub fn code(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }
}

/// Method and target of an incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Request method.
    pub method: Method,
    /// Request target as sent, query string included.
    pub target: String,
}

impl RequestLine {
    /// Parse `GET /companies HTTP/1.1`.
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(DashboardError::Http(format!("malformed request line: {:?}", line)));
        };
        if !version.starts_with("HTTP/1.") {
            return Err(DashboardError::Http(format!("unsupported version: {}", version)));
        }
        let method = method
            .parse::<Method>()
            .map_err(|_| DashboardError::Http(format!("unknown method: {}", method)))?;
        Ok(Self {
            method,
            target: target.to_string(),
        })
    }
}

/// Read a request line and drain the header block that follows it.
///
/// Callers bound `reader` (e.g. with `Read::take(MAX_REQUEST_HEAD)`); a line cut off by
/// that bound or by the peer closing is an error. Request bodies are not read; none of
/// the endpoints accept one.
pub fn read_request<R: BufRead>(reader: &mut R) -> Result<RequestLine> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(DashboardError::Http(String::from("connection closed before request line")));
    }
    if !line.ends_with('\n') {
        return Err(DashboardError::Http(String::from("request line too long or truncated")));
    }
    let request = RequestLine::parse(line.trim_end())?;

    loop {
        let mut header = String::new();
        let read = reader.read_line(&mut header)?;
        if read == 0 || header.trim_end().is_empty() {
            break;
        }
        if !header.ends_with('\n') {
            return Err(DashboardError::Http(String::from("header block too long or truncated")));
        }
    }
    Ok(request)
}

/// Encode a complete JSON response.
pub fn encode_response(status: StatusCode, body: &[u8]) -> Vec<u8> {
    let head = format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Connection: close\r\n\r\n",
        status.code(),
        status,
        body.len()
    );
    let mut out = head.into_bytes();
    out.extend_from_slice(body);
    out
}
