// src/core/net.rs

// HTTP/1.0 GET over TCP (std-only). Plain http only; TLS is out of reach here.

use std::{io::{Read, Write}, net::TcpStream, time::Duration};

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::RosterError;

/// `http://host[:port]/path` → (host, port, path)
pub fn split_url(url: &str) -> Result<(String, u16, String), RosterError> {
    let rest = if let Some(r) = url.strip_prefix("http://") {
        r
    } else if url.starts_with("https://") {
        return Err(RosterError::Fetch(format!(
            "https is not supported, save the page and pass the file instead: {url}"
        )));
    } else {
        return Err(RosterError::Fetch(format!("not an http URL: {url}")));
    };

    let (authority, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, "/"),
    };
    let (host, port) = match authority.rsplit_once(':') {
        Some((h, p)) => {
            let port = p.parse::<u16>()
                .map_err(|_| RosterError::Fetch(format!("bad port in {url}")))?;
            (h, port)
        }
        None => (authority, 80),
    };
    if host.is_empty() {
        return Err(RosterError::Fetch(format!("missing host in {url}")));
    }
    Ok((s!(host), port, s!(path)))
}

pub fn http_get(url: &str) -> Result<String, RosterError> {
    let (host, port, path) = split_url(url)?;
    let io = |e: std::io::Error| RosterError::Fetch(format!("{host}:{port}: {e}"));

    let mut s = TcpStream::connect((host.as_str(), port)).map_err(io)?;
    s.set_read_timeout(Some(Duration::from_secs(HTTP_TIMEOUT_SECS))).map_err(io)?;
    s.set_write_timeout(Some(Duration::from_secs(HTTP_TIMEOUT_SECS))).map_err(io)?;

    let req = format!(
        "GET {path} HTTP/1.0\r\nHost: {host}\r\nUser-Agent: {USER_AGENT}\r\nConnection: close\r\n\r\n"
    );
    s.write_all(req.as_bytes()).map_err(io)?;
    s.flush().map_err(io)?;

    let mut buf = Vec::new();
    s.read_to_end(&mut buf).map_err(io)?;
    let resp = String::from_utf8_lossy(&buf);

    let status = resp.split("\r\n").next().unwrap_or("");
    if !status.contains(" 200") {
        return Err(RosterError::Fetch(format!("HTTP error: {status} {url}")));
    }
    let body_idx = resp
        .find("\r\n\r\n")
        .ok_or_else(|| RosterError::Fetch(s!("Malformed HTTP response")))?
        + 4;
    logd!("GET {url}: {} bytes", buf.len());
    Ok(resp[body_idx..].to_string())
}
