use offer_rotator::config::ServiceConfig;
use offer_rotator::lifecycle::OfferServer;
use offer_rotator::offer_actor::OfferError;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::oneshot;

fn test_config() -> ServiceConfig {
    ServiceConfig {
        port: 0,
        shutdown_grace: Duration::from_secs(1),
        ..ServiceConfig::default()
    }
}

/// Full end-to-end test over real HTTP: concurrent requests, admin listing, shutdown.
#[tokio::test]
async fn test_concurrent_requests_are_all_counted() {
    let server = OfferServer::bind(test_config())
        .await
        .expect("Failed to bind server");
    let port = server.local_addr().unwrap().port();
    let client = server.client();

    let (stop, stopped) = oneshot::channel::<()>();
    let running = tokio::spawn(server.run(async {
        let _ = stopped.await;
    }));

    let mut handles = vec![];
    for _ in 0..100 {
        let url = format!("http://127.0.0.1:{port}/request");
        handles.push(tokio::spawn(async move {
            let response = reqwest::get(url).await.expect("Request failed");
            assert_eq!(response.status(), reqwest::StatusCode::OK);
            response.text().await.expect("Failed to read body")
        }));
    }
    for handle in handles {
        let payload = handle.await.unwrap();
        assert_eq!(payload.len(), 2);
    }

    let snapshot = client.get_all().await.unwrap();
    assert_eq!(snapshot.total_views(), 100);
    assert_eq!(snapshot.active.len(), 50);

    let listing = reqwest::get(format!("http://127.0.0.1:{port}/admin/requests"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let listed_views: u64 = listing
        .lines()
        .map(|line| {
            let (_, views) = line.rsplit_once(": ").expect("Malformed admin line");
            views.parse::<u64>().expect("Views must be a number")
        })
        .sum();
    assert_eq!(listed_views, 100);

    stop.send(()).unwrap();
    running
        .await
        .unwrap()
        .expect("Server should shut down cleanly");

    assert_eq!(client.get_all().await.unwrap_err(), OfferError::ActorClosed);
}

#[tokio::test]
async fn test_bind_rejects_invalid_config() {
    let config = ServiceConfig {
        offer_count: 0,
        ..test_config()
    };
    assert!(OfferServer::bind(config).await.is_err());
}

/// A request that never finishes must not hold up shutdown beyond the grace period.
#[tokio::test]
async fn test_shutdown_proceeds_after_grace_timeout() {
    let grace = Duration::from_millis(300);
    let server = OfferServer::bind(ServiceConfig {
        shutdown_grace: grace,
        ..test_config()
    })
    .await
    .expect("Failed to bind server");
    let port = server.local_addr().unwrap().port();
    let client = server.client();

    let (stop, stopped) = oneshot::channel::<()>();
    let running = tokio::spawn(server.run(async {
        let _ = stopped.await;
    }));

    // Headers are left unterminated so the connection stays in flight.
    let mut stalled = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
    stalled
        .write_all(b"GET /request HTTP/1.1\r\nHost: localhost\r\n")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let started = Instant::now();
    stop.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), running)
        .await
        .expect("Shutdown should not wait for the stalled request")
        .unwrap();

    assert!(result.is_ok(), "Overrunning the grace period is not an error");
    assert!(started.elapsed() >= grace);
    assert_eq!(client.get_all().await.unwrap_err(), OfferError::ActorClosed);

    drop(stalled);
}
