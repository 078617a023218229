//! Prober against a real HTTP device.

use std::time::Duration;

use target_trigger::config::ProbeConfig;
use target_trigger::lifecycle::startup::build_prober;
use target_trigger::probe::{
    CandidateEndpoint, EndpointProber, HttpTransport, MissReason, ProbeOutcome, TransportError,
};
use url::Url;

mod common;
use common::{start_mock_device, Reply};

fn base_url(addr: std::net::SocketAddr) -> Url {
    Url::parse(&format!("http://{}", addr)).unwrap()
}

fn transport() -> HttpTransport {
    HttpTransport::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
}

#[tokio::test]
async fn test_second_candidate_matches_with_json_post() {
    let (addr, requests) = start_mock_device(vec![
        ("POST", "/a", Reply::Status(404)),
        ("POST", "/b", Reply::Status(200)),
    ])
    .await;
    let prober = EndpointProber::new(transport());
    let candidates = vec![CandidateEndpoint::post("/a"), CandidateEndpoint::post("/b")];

    let outcome = prober.probe(&base_url(addr), &candidates).await.unwrap();

    assert_eq!(outcome, ProbeOutcome::Success(CandidateEndpoint::post("/b")));
    let requests = requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, "POST");
    assert_eq!(requests[1].path, "/b");
    assert_eq!(requests[1].body, "{}");
    assert_eq!(
        requests[1].headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_get_candidate_sends_no_body() {
    let (addr, requests) = start_mock_device(vec![
        ("POST", "/switch/test_button/turn_on", Reply::Status(405)),
        ("GET", "/switch/test_button/turn_on", Reply::Status(200)),
    ])
    .await;
    let prober = EndpointProber::new(transport());
    let candidates = vec![
        CandidateEndpoint::post("/switch/test_button/turn_on"),
        CandidateEndpoint::get("/switch/test_button/turn_on"),
    ];

    let outcome = prober.probe(&base_url(addr), &candidates).await.unwrap();

    assert!(outcome.is_success());
    let requests = requests.lock().unwrap().clone();
    assert_eq!(requests[1].method, "GET");
    assert!(requests[1].body.is_empty());
    assert!(!requests[1].headers.contains_key("content-type"));
}

#[tokio::test]
async fn test_all_server_errors_exhaust_list() {
    let (addr, requests) = start_mock_device(vec![
        ("POST", "/a", Reply::Status(500)),
        ("GET", "/a", Reply::Status(500)),
    ])
    .await;
    let prober = EndpointProber::new(transport());
    let candidates = vec![CandidateEndpoint::post("/a"), CandidateEndpoint::get("/a")];

    let outcome = prober.probe(&base_url(addr), &candidates).await.unwrap();

    let ProbeOutcome::Failure(misses) = outcome else {
        panic!("expected failure");
    };
    assert!(misses.iter().all(|m| m.reason == MissReason::Status(500)));
    assert_eq!(requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_stalled_candidate_times_out_then_next_matches() {
    let (addr, requests) = start_mock_device(vec![
        ("POST", "/slow", Reply::Stall),
        ("POST", "/fast", Reply::Status(200)),
    ])
    .await;
    let prober = EndpointProber::new(transport())
        .with_candidate_timeout(Some(Duration::from_millis(300)));
    let candidates = vec![CandidateEndpoint::post("/slow"), CandidateEndpoint::post("/fast")];

    let outcome = prober.probe(&base_url(addr), &candidates).await.unwrap();

    assert_eq!(outcome, ProbeOutcome::Success(CandidateEndpoint::post("/fast")));
    assert_eq!(requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unreachable_device_is_transport_miss() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let prober = EndpointProber::new(transport());
    let candidates = vec![CandidateEndpoint::post("/a")];

    let outcome = prober.probe(&base_url(addr), &candidates).await.unwrap();

    let ProbeOutcome::Failure(misses) = outcome else {
        panic!("expected failure");
    };
    assert!(matches!(
        misses[0].reason,
        MissReason::Transport(TransportError::Connect(_) | TransportError::Request(_))
    ));
}

#[tokio::test]
async fn test_device_client_ignores_proxy_environment() {
    let (proxy, proxied) = start_mock_device(vec![]).await;
    let (addr, requests) = start_mock_device(vec![("POST", "/a", Reply::Status(200))]).await;
    std::env::set_var("HTTP_PROXY", format!("http://{}", proxy));
    std::env::set_var("http_proxy", format!("http://{}", proxy));

    let prober = build_prober(&ProbeConfig::default()).unwrap();

    std::env::remove_var("HTTP_PROXY");
    std::env::remove_var("http_proxy");

    let outcome = prober
        .probe(&base_url(addr), &[CandidateEndpoint::post("/a")])
        .await
        .unwrap();

    assert_eq!(outcome, ProbeOutcome::Success(CandidateEndpoint::post("/a")));
    assert_eq!(requests.lock().unwrap().len(), 1);
    assert!(proxied.lock().unwrap().is_empty());
}
