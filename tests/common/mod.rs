use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

pub struct CannedResponse {
	pub status: u16,
	pub reason: &'static str,
	pub body: String,
}

impl CannedResponse {
	pub fn ok(body: String) -> Self {
		Self { status: 200, reason: "OK", body }
	}
}

/// A tiny blocking HTTP responder: answers one canned response per accepted
/// connection, in order, then shuts down. Request heads are handed back
/// through the returned channel so tests can assert on query parameters.
pub fn serve(responses: Vec<CannedResponse>) -> (SocketAddr, Receiver<String>, JoinHandle<()>) {
	let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind test listener");
	let addr = listener.local_addr().expect("test listener has no address");
	let (tx, rx) = mpsc::channel();

	let handle = thread::spawn(move || {
		for response in responses {
			let (mut stream, _) = listener.accept().expect("failed to accept test connection");
			tx.send(read_head(&mut stream)).expect("failed to hand back test request");

			let payload = format!(
				"HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
				response.status, response.reason, response.body.len(), response.body,
			);
			stream.write_all(payload.as_bytes()).expect("failed to write test response");
		}
	});

	(addr, rx, handle)
}

fn read_head(stream: &mut TcpStream) -> String {
	let mut head: Vec<u8> = Vec::new();
	let mut buf = [0u8; 512];

	while !head.windows(4).any(|w| w == b"\r\n\r\n") {
		let n = stream.read(&mut buf).expect("failed to read test request");
		if n == 0 {
			break;
		}
		head.extend_from_slice(&buf[..n]);
	}

	String::from_utf8_lossy(&head).into_owned()
}

pub fn scheme_body(colors: &[(u8, u8, u8)]) -> String {
	let entries = colors.iter()
		.map(|(r, g, b)| format!("{{\"rgb\":{{\"r\":{r},\"g\":{g},\"b\":{b}}}}}"))
		.collect::<Vec<String>>();
	format!("{{\"colors\":[{}]}}", entries.join(","))
}
