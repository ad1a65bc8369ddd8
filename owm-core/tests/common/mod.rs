use std::{
    io::{BufRead, BufReader, Write},
    net::{TcpListener, TcpStream},
    sync::mpsc,
    thread,
    time::Duration,
};

use chrono::{TimeZone, Utc};
use owm_core::{Condition, Coordinates, Temperature, WeatherReport, Wind};

pub const AUSTIN: &str = r#"{"coord":{"lon":-97.74,"lat":30.27},"weather":[{"id":800,"main":"Clear","description":"clear sky","icon":"01d"}],"base":"stations","main":{"temp":296.82,"pressure":1012,"humidity":25,"temp_min":296.15,"temp_max":298.15},"visibility":11265,"wind":{"speed":6.2,"deg":200,"gust":9.3},"clouds":{"all":1},"dt":1511561700,"sys":{"type":1,"id":2557,"message":0.1722,"country":"US","sunrise":1511528705,"sunset":1511566248},"id":4671654,"name":"Austin","cod":200}"#;

/// Local HTTP server answering every connection with one canned response.
pub struct StubServer {
    pub base_url: String,
    requests: mpsc::Receiver<String>,
}

#[derive(Clone, Copy)]
enum Reply {
    Respond { status: u16, body: &'static str },
    Stall(Duration),
    StallBody(Duration),
}

impl StubServer {
    pub fn respond(status: u16, body: &'static str) -> Self {
        Self::start(Reply::Respond { status, body })
    }

    /// Accepts connections but never answers.
    pub fn stall(for_how_long: Duration) -> Self {
        Self::start(Reply::Stall(for_how_long))
    }

    /// Sends the status line, headers and part of the body, then goes quiet.
    pub fn stall_body(for_how_long: Duration) -> Self {
        Self::start(Reply::StallBody(for_how_long))
    }

    fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };

                let head = read_head(&stream);
                if tx.send(head).is_err() {
                    break;
                }

                match reply {
                    Reply::Respond { status, body } => write_response(&mut stream, status, body),
                    Reply::Stall(d) => thread::sleep(d),
                    Reply::StallBody(d) => {
                        write_partial_response(&mut stream);
                        thread::sleep(d);
                    }
                }
            }
        });

        Self { base_url: format!("http://{addr}"), requests: rx }
    }

    /// Request line and headers of the next request the server received,
    /// lowercased.
    pub fn next_request(&self) -> String {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("stub server saw no request")
    }

    pub fn saw_no_request(&self) -> bool {
        self.requests.recv_timeout(Duration::from_millis(200)).is_err()
    }
}

/// Base URL of a port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    format!("http://{addr}")
}

fn read_head(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut head = String::new();

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" => break,
            Ok(_) => head.push_str(&line),
        }
    }

    head.to_lowercase()
}

fn write_response(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = if status == 200 { "OK" } else { "Stub" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        body.len()
    );

    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn write_partial_response(stream: &mut TcpStream) {
    let response = "HTTP/1.1 200 OK\r\n\
                    Content-Type: application/json\r\n\
                    Content-Length: 100\r\n\
                    \r\n\
                    {\"name\":\"Aus";

    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

pub fn assert_austin(report: &WeatherReport) {
    assert_eq!(report.location_id, 4671654);
    assert_eq!(report.location_name, "Austin");
    assert_eq!(report.visibility_meters, 11265);
    assert_eq!(report.coordinates, Coordinates { longitude: -97.74, latitude: 30.27 });
    assert_eq!(
        report.conditions,
        [Condition {
            id: 800,
            category: "Clear".into(),
            description: "clear sky".into(),
            icon: "01d".into(),
        }]
    );
    assert_eq!(
        report.atmosphere.temperature,
        Temperature { current: 296.82, min: 296.15, max: 298.15 }
    );
    assert_eq!(report.atmosphere.pressure_hpa, 1012);
    assert_eq!(report.atmosphere.humidity_percent, 25);
    assert_eq!(report.wind, Wind { speed_mps: 6.2, direction_degrees: 200, gust_mps: 9.3 });
    assert_eq!(report.clouds.coverage_percent, 1);
    assert_eq!(report.rain, None);
    assert_eq!(report.snow, None);

    assert_eq!(report.observed_at.as_datetime(), Utc.timestamp_opt(1511561700, 0).unwrap());
    assert_eq!(report.region.country_code, "US");
    assert_eq!(report.region.sunrise.as_datetime(), Utc.timestamp_opt(1511528705, 0).unwrap());
    assert_eq!(report.region.sunset.as_datetime(), Utc.timestamp_opt(1511566248, 0).unwrap());
}
