//! Receive loop against real loopback sockets.
//!
//! Datagrams are sent before the loop starts; the kernel queues them on the
//! bound socket, so no second thread is needed.

use indicator_listener::{ListenError, Listener, ListenerConfig, PrintMode, Stop};
use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn listener(mode: PrintMode, count: Option<usize>) -> Listener {
    let mut config = ListenerConfig::new("127.0.0.1", 0);
    config.mode = mode;
    config.count = count;
    config.poll_interval = Duration::from_millis(20);
    Listener::bind(config).unwrap()
}

fn send(listener: &Listener, payloads: &[&[u8]]) -> UdpSocket {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    let target = listener.local_addr().unwrap();
    for payload in payloads {
        socket.send_to(payload, target).unwrap();
    }
    socket
}

fn run(listener: &Listener) -> (Result<Stop, ListenError>, String) {
    let mut out = Vec::new();
    let result = listener.run(&mut out, &AtomicBool::new(false));
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn text_mode_prints_each_datagram() {
    let l = listener(PrintMode::Text, Some(2));
    send(&l, &[b"{\"speed\": \"1\"}", b"hello"]);

    let (result, out) = run(&l);
    assert_eq!(result.unwrap(), Stop::Count(2));
    assert_eq!(out, "{\"speed\": \"1\"}\nhello\n");
}

#[test]
fn raw_lines_decode_as_log_entries() {
    let l = listener(PrintMode::Raw, Some(1));
    let sender = send(&l, &[br#"{"speed": "4.5", "position": "(1.0, 2.0, 3.0)"}"#]);

    let (result, out) = run(&l);
    assert_eq!(result.unwrap(), Stop::Count(1));
    let port = sender.local_addr().unwrap().port();
    assert!(out.ends_with(&format!("('127.0.0.1', {port}))\n")));

    let entry = indicator_tabulate::decode_line(&out).unwrap();
    assert_eq!(entry.get("speed"), Some("4.5"));
    assert_eq!(entry.get("position"), Some("(1.0, 2.0, 3.0)"));
}

#[test]
fn non_ascii_datagram_ends_text_loop() {
    let l = listener(PrintMode::Text, None);
    let sender = send(&l, &[b"ok", b"\xe9t\xe9"]);

    let (result, out) = run(&l);
    assert_eq!(out, "ok\n");
    match result {
        Err(ListenError::NotAscii { sender: from }) => {
            assert_eq!(from, sender.local_addr().unwrap());
        }
        other => panic!("expected NotAscii, got {:?}", other),
    }
}

#[test]
fn raised_flag_stops_idle_loop() {
    let l = listener(PrintMode::Text, None);
    let interrupted = Arc::new(AtomicBool::new(false));

    let flag = interrupted.clone();
    let raiser = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        flag.store(true, Ordering::SeqCst);
    });

    let mut out = Vec::new();
    assert_eq!(l.run(&mut out, &interrupted).unwrap(), Stop::Interrupted);
    assert!(out.is_empty());
    raiser.join().unwrap();
}

#[test]
fn bind_failure_names_address() {
    let taken = UdpSocket::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port();

    match Listener::bind(ListenerConfig::new("127.0.0.1", port)) {
        Err(err @ ListenError::Bind { .. }) => {
            assert!(err.to_string().contains(&format!("127.0.0.1:{port}")));
        }
        other => panic!("expected bind error, got {:?}", other.map(|_| ())),
    }
}
