//! Minimal in-process HTTP stub for a REST contact collection, used to drive
//! the CLI end to end. Ephemeral loopback port, one thread per connection.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::Value;

pub struct StubServer {
    pub base_url: String,
}

pub fn spawn() -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let store: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let _ = handle(stream, &store);
            });
        }
    });

    StubServer {
        base_url: format!("http://{}", addr),
    }
}

fn handle(stream: TcpStream, store: &Mutex<Vec<Value>>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            break;
        }
        if let Some(value) = trimmed.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    let (status, payload) = route(&method, &path, &body, store);
    respond(stream, status, payload)
}

fn route(
    method: &str,
    path: &str,
    body: &[u8],
    store: &Mutex<Vec<Value>>,
) -> (u16, Option<String>) {
    let mut records = store.lock().expect("lock store");

    match (method, path) {
        ("GET", "/contacts") => {
            let listing = serde_json::to_string(&*records).expect("serialize listing");
            (200, Some(listing))
        }
        ("POST", "/contacts") => match serde_json::from_slice::<Value>(body) {
            Ok(record) => {
                let echoed = record.to_string();
                records.push(record);
                (201, Some(echoed))
            }
            Err(_) => (400, None),
        },
        (_, path) => {
            let Some(id) = path.strip_prefix("/contacts/") else {
                return (404, None);
            };
            let position = records.iter().position(|record| record["id"] == id);
            match (method, position) {
                ("GET", Some(idx)) => (200, Some(records[idx].to_string())),
                ("PUT", Some(idx)) => match serde_json::from_slice::<Value>(body) {
                    Ok(record) => {
                        let echoed = record.to_string();
                        records[idx] = record;
                        (200, Some(echoed))
                    }
                    Err(_) => (400, None),
                },
                ("DELETE", Some(idx)) => {
                    records.remove(idx);
                    (200, Some("{}".to_string()))
                }
                (_, None) => (404, None),
                _ => (405, None),
            }
        }
    }
}

fn respond(mut stream: TcpStream, status: u16, payload: Option<String>) -> std::io::Result<()> {
    let reason = match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Internal Server Error",
    };
    let body = payload.unwrap_or_default();
    write!(
        stream,
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    )?;
    stream.flush()
}
