//! Minimal HTTP/1.1 plumbing for the fake API server.
//!
//! Parses one request at a time from a buffered stream (request line,
//! headers, Content-Length body) and writes JSON responses. Enough of
//! the protocol for reqwest to talk to; no chunked encoding, no
//! pipelining.

use std::collections::HashMap;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// A parsed HTTP request.
#[derive(Debug)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Request {
    /// The bearer token from the Authorization header, if present.
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get("authorization")?
            .strip_prefix("Bearer ")
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Parse the body as a form-encoded key/value map.
    pub fn form(&self) -> HashMap<String, String> {
        parse_urlencoded(&String::from_utf8_lossy(&self.body))
    }

    /// Path split on `/`, empty segments removed.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

/// Read one request from the stream. Returns `None` on a clean EOF
/// before the request line (client closed a keep-alive connection).
pub async fn read_request<S: AsyncRead + AsyncWrite + Unpin>(
    reader: &mut BufReader<S>,
) -> std::io::Result<Option<Request>> {
    let mut line = String::new();
    if reader.read_line(&mut line).await? == 0 {
        return Ok(None);
    }

    let mut parts = line.trim_end().splitn(3, ' ');
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default();

    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), parse_urlencoded(q)),
        None => (target.to_string(), HashMap::new()),
    };

    // Headers until the blank line. Names are lowercased so lookups
    // are case-insensitive.
    let mut headers = HashMap::new();
    loop {
        let mut header_line = String::new();
        if reader.read_line(&mut header_line).await? == 0 {
            return Ok(None);
        }
        let trimmed = header_line.trim_end();
        if trimmed.is_empty() {
            break;
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            headers.insert(name.to_lowercase(), value.trim().to_string());
        }
    }

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let mut body = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body).await?;
    }

    Ok(Some(Request {
        method,
        path,
        query,
        headers,
        body,
    }))
}

/// Write a JSON response with the given status.
pub async fn write_json<S: AsyncRead + AsyncWrite + Unpin>(
    reader: &mut BufReader<S>,
    status: u16,
    body: &serde_json::Value,
) -> std::io::Result<()> {
    let payload = body.to_string();
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {len}\r\n\
         \r\n\
         {payload}",
        reason = reason(status),
        len = payload.len(),
    );
    let stream = reader.get_mut();
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Decode `application/x-www-form-urlencoded` pairs.
fn parse_urlencoded(input: &str) -> HashMap<String, String> {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((percent_decode(key), percent_decode(value)))
        })
        .collect()
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                if let (Some(hi), Some(lo)) = (
                    bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16)),
                    bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16)),
                ) {
                    out.push((hi * 16 + lo) as u8);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_escapes_and_plus() {
        assert_eq!(percent_decode("user%40example.com"), "user@example.com");
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("plain"), "plain");
    }

    #[test]
    fn parses_form_pairs() {
        let form = parse_urlencoded("email=a%40b.com&password=p%26q");
        assert_eq!(form["email"], "a@b.com");
        assert_eq!(form["password"], "p&q");
    }

    #[tokio::test]
    async fn reads_request_with_body() {
        let raw = "POST /api/auth/login?x=1 HTTP/1.1\r\n\
                   Host: localhost\r\n\
                   Content-Length: 9\r\n\
                   \r\n\
                   email=a@b";
        let (client, server) = tokio::io::duplex(4096);
        let mut writer = client;
        tokio::io::AsyncWriteExt::write_all(&mut writer, raw.as_bytes())
            .await
            .unwrap();
        drop(writer);

        let mut reader = BufReader::new(server);
        let request = read_request(&mut reader).await.unwrap().unwrap();

        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/auth/login");
        assert_eq!(request.query["x"], "1");
        assert_eq!(request.body, b"email=a@b");
        assert_eq!(request.segments(), vec!["api", "auth", "login"]);
    }

    #[tokio::test]
    async fn eof_before_request_line_is_none() {
        let (client, server) = tokio::io::duplex(64);
        drop(client);
        let mut reader = BufReader::new(server);
        assert!(read_request(&mut reader).await.unwrap().is_none());
    }
}
