//! Client runs against the reference status service.

use futures::future::join_all;
use jobwatch_client::{CancellationToken, ClientConfig, Error, ErrorKind, JobClient, PollError};
use jobwatch_server::{SimulationConfig, serve_listener};
use jobwatch_types::{JobState, PollingConfig, ProgressEvent};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

async fn start_server(delay: Duration, failure_rate: f64) -> (String, CancellationToken) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    let simulation = SimulationConfig {
        min_delay: delay,
        max_delay: delay,
        failure_rate,
    };
    tokio::spawn(serve_listener(listener, simulation, shutdown.clone()));
    (format!("http://{addr}"), shutdown)
}

fn client(base_url: String, max_attempts: u32) -> JobClient {
    let polling = PollingConfig::new(
        max_attempts,
        Duration::from_millis(10),
        Duration::from_millis(40),
        Duration::from_secs(2),
        Duration::from_secs(10),
    )
    .unwrap();
    JobClient::new(ClientConfig {
        base_url,
        polling,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_run_completes_and_reports_progress() {
    let (url, shutdown) = start_server(Duration::from_millis(60), 0.0).await;
    let client = client(url, 50);
    let (tx, mut rx) = mpsc::channel::<ProgressEvent>(64);

    let completed = client.run(&CancellationToken::new(), Some(tx)).await.unwrap();
    assert_eq!(completed.result.state(), JobState::Completed);
    assert!(!completed.job_id.is_empty());

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    assert!(!events.is_empty());
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event.attempt as usize, i + 1);
        assert_eq!(event.to_string(), format!("Attempt {}: job is pending", i + 1));
    }

    shutdown.cancel();
}

#[tokio::test]
async fn test_single_attempt_on_slow_job_exhausts() {
    let (url, shutdown) = start_server(Duration::from_secs(30), 0.0).await;
    let client = client(url, 1);

    let err = client.run(&CancellationToken::new(), None).await.unwrap_err();
    assert!(matches!(err, Error::Poll(PollError::Exhausted { attempts: 1 })));
    assert_eq!(err.kind(), ErrorKind::Exhausted);

    shutdown.cancel();
}

#[tokio::test]
async fn test_failing_job_surfaces_job_failed() {
    let (url, shutdown) = start_server(Duration::from_millis(20), 1.0).await;
    let client = client(url, 50);

    let cancel = CancellationToken::new();
    let job_id = client.create_job(&cancel).await.unwrap();
    let err = client.wait_for_job(&job_id, &cancel).await.unwrap_err();
    let failed = err.failed_result().unwrap();
    assert_eq!(failed.state(), JobState::Failed);

    shutdown.cancel();
}

#[tokio::test]
async fn test_unknown_job_is_a_service_error() {
    let (url, shutdown) = start_server(Duration::from_millis(20), 0.0).await;
    let client = client(url, 5);

    let err = client
        .wait_for_job(&"missing".into(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);

    shutdown.cancel();
}

#[tokio::test]
async fn test_concurrent_runs_do_not_interfere() {
    let (url, shutdown) = start_server(Duration::from_millis(50), 0.0).await;
    let client = client(url, 50);
    let cancel = CancellationToken::new();

    let results = join_all((0..8).map(|_| client.run(&cancel, None))).await;
    let mut ids: Vec<_> = results
        .into_iter()
        .map(|r| r.unwrap().job_id.as_str().to_string())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);

    shutdown.cancel();
}

#[tokio::test]
async fn test_cancel_stops_waiting() {
    let (url, shutdown) = start_server(Duration::from_secs(30), 0.0).await;
    let client = client(url, 1000);
    let cancel = CancellationToken::new();

    let job_id = client.create_job(&cancel).await.unwrap();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });
    let err = client.wait_for_job(&job_id, &cancel).await.unwrap_err();
    assert!(matches!(err, PollError::Cancelled));

    shutdown.cancel();
}
