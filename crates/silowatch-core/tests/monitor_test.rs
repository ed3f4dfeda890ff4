// Integration tests for the tiered fetch policy, the sync path, and
// the monitor lifecycle, against a mocked pair of backends.

use std::time::Duration;

use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use silowatch_api::{Endpoints, StatusClient};
use silowatch_core::{
    CoreError, DeviceClass, DeviceStatusClient, Monitor, MonitorConfig, Origin, Reading, Severity,
    Snapshot,
};

fn endpoints(server: &MockServer) -> Endpoints {
    Endpoints::new(
        Url::parse(&format!("{}/api", server.uri())).unwrap(),
        Url::parse(&format!("{}/api/mariadb", server.uri())).unwrap(),
    )
}

fn client(server: &MockServer) -> DeviceStatusClient {
    DeviceStatusClient::with_api(StatusClient::with_client(
        reqwest::Client::new(),
        endpoints(server),
    ))
}

fn bridge_row(position: i32) -> serde_json::Value {
    json!({
        "id": 1,
        "ocupacion": 1,
        "estado": 2,
        "situacion": 0,
        "posicion": position,
        "timestamp": "2025-05-03T14:35:23Z"
    })
}

fn crane_row(pallet: i64) -> serde_json::Value {
    json!({
        "id": 7,
        "modo": 1,
        "ocupacion": 1,
        "averia": 0,
        "matricula": pallet,
        "pasillo_actual": 2,
        "x_actual": 14,
        "y_actual": 6,
        "z_actual": 1,
        "timestamp": "2025-05-03T14:35:23Z"
    })
}

// ── Tiered fetch ─────────────────────────────────────────────────────

#[tokio::test]
async fn bridge_falls_back_to_gateway_when_mirror_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mariadb/puente"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": bridge_row(6)
            })),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let reading = client.fetch_status(DeviceClass::Bridge).await;

    let snap = reading.snapshot().expect("expected a fresh reading");
    assert!(reading.is_fresh());
    assert_eq!(snap.origin, Origin::Gateway);
    match snap.state {
        silowatch_core::DeviceState::Bridge(ref s) => assert_eq!(s.position, 6),
        ref other => panic!("expected bridge state, got {other:?}"),
    }
}

#[tokio::test]
async fn both_tiers_down_yields_unavailable_not_fabricated_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mariadb/puente"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server);
    let reading = client.fetch_status(DeviceClass::Bridge).await;
    assert_eq!(reading, Reading::Unavailable);

    // Presentation can still render something, but it is the documented
    // placeholder and is labeled as such.
    let now = Utc::now();
    let shown = reading.snapshot_or_placeholder(DeviceClass::Bridge, now);
    assert_eq!(shown, Snapshot::placeholder(DeviceClass::Bridge, now));
    assert_eq!(shown.origin, Origin::Placeholder);
}

#[tokio::test]
async fn failed_poll_degrades_to_stale_after_a_success() {
    let server = MockServer::start().await;

    // One good response, then the mirror goes dark.
    Mock::given(method("GET"))
        .and(path("/api/mariadb/puente"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bridge_row(3)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mariadb/puente"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server);

    let first = client.fetch_status(DeviceClass::Bridge).await;
    assert!(first.is_fresh());
    let good = first.snapshot().unwrap().clone();

    let second = client.fetch_status(DeviceClass::Bridge).await;
    assert_eq!(second, Reading::Stale(good));
    assert_eq!(client.board().latest(DeviceClass::Bridge), second);
}

#[tokio::test]
async fn crane_status_comes_from_the_mirror() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mariadb/tlv2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(crane_row(2042)))
        .mount(&server)
        .await;

    let client = client(&server);
    let reading = client.fetch_status(DeviceClass::Crane2).await;

    let snap = reading.snapshot().expect("expected a fresh reading");
    assert_eq!(snap.origin, Origin::Mirror);
    match snap.state {
        silowatch_core::DeviceState::Crane(ref s) => {
            assert_eq!(s.pallet_id, 2042);
            assert!(s.occupied);
        }
        ref other => panic!("expected crane state, got {other:?}"),
    }
}

// ── Sync ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn transfer_car_sync_failure_is_never_masked() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mariadb/db112/sync"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "PLC offline" })),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client
        .request_sync(DeviceClass::TransferCar)
        .await
        .expect_err("a failed sync must propagate");

    match err {
        CoreError::SyncFailed { device, message } => {
            assert_eq!(device, DeviceClass::TransferCar);
            assert!(message.contains("PLC offline"), "message: {message}");
        }
        other => panic!("expected SyncFailed, got {other}"),
    }
}

#[tokio::test]
async fn crane_sync_is_unsupported() {
    let server = MockServer::start().await;
    let client = client(&server);

    let err = client
        .request_sync(DeviceClass::Crane1)
        .await
        .expect_err("cranes have no sync endpoint");
    assert!(matches!(
        err,
        CoreError::SyncUnsupported {
            device: DeviceClass::Crane1
        }
    ));
    // No request must have left the client.
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn bridge_sync_falls_back_and_publishes_the_fresh_row() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mariadb/puente/sync"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/pt/sync"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": bridge_row(9)
            })),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let snap = client
        .request_sync(DeviceClass::Bridge)
        .await
        .unwrap()
        .expect("bridge sync returns the synchronized row");

    assert_eq!(snap.origin, Origin::Gateway);
    assert_eq!(
        client.board().latest(DeviceClass::Bridge),
        Reading::Fresh(snap)
    );
}

// ── History ──────────────────────────────────────────────────────────

#[tokio::test]
async fn crane_history_passes_the_limit_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mariadb/tlv1/historial"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([crane_row(1), crane_row(2)])),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let history = client.fetch_history(DeviceClass::Crane1, 2).await.unwrap();

    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|s| s.origin == Origin::Mirror));
}

#[tokio::test]
async fn transfer_car_history_is_synthesized_and_labeled() {
    let server = MockServer::start().await;
    let client = client(&server);

    // No reading exists yet, so the series derives from the placeholder.
    let history = client
        .fetch_history(DeviceClass::TransferCar, 3)
        .await
        .unwrap();

    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|s| s.origin == Origin::Placeholder));
    // Entries are spaced one minute apart, newest first.
    let gap = history[0].captured_at - history[1].captured_at;
    assert_eq!(gap.num_seconds(), 60);
    // Synthesizing never touches the network.
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Alarm feed ───────────────────────────────────────────────────────

#[tokio::test]
async fn crane_alarm_feed_maps_severities() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/transelevadores/TRANS-001/alarmas"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "alm-001",
                    "titulo": "Fallo de motor",
                    "descripcion": "Sobrecarga detectada en eje X.",
                    "timestamp": "2025-05-03T14:32:10",
                    "tipo": "error"
                },
                {
                    "id": "alm-003",
                    "titulo": "Ciclo completado",
                    "descripcion": "Ciclo de almacenamiento #4532.",
                    "timestamp": "2025-05-03T13:15:45",
                    "tipo": "success"
                }
            ])),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let alarms = client.fetch_alarms(DeviceClass::Crane1).await.unwrap();

    assert_eq!(alarms.len(), 2);
    assert_eq!(alarms[0].severity, Severity::Critical);
    assert_eq!(alarms[0].device_id, "TRANS-001");
    assert!(alarms[0].message.contains("Fallo de motor"));
    assert_eq!(alarms[1].severity, Severity::Info);
}

// ── Monitor lifecycle ────────────────────────────────────────────────

fn monitor_config(server: &MockServer) -> MonitorConfig {
    MonitorConfig {
        endpoints: endpoints(server),
        timeout: Duration::from_secs(2),
        status_interval: Duration::from_millis(50),
        devices: vec![DeviceClass::Bridge],
        simulate_alarms: false,
        ..MonitorConfig::default()
    }
}

#[tokio::test]
async fn monitor_polls_and_teardown_stops_all_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mariadb/puente"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bridge_row(4)))
        .mount(&server)
        .await;

    let monitor = Monitor::new(monitor_config(&server)).unwrap();
    monitor.start().await;

    // The initial fetch happens before start() returns.
    assert!(monitor.latest(DeviceClass::Bridge).is_fresh());

    // Let a few polls run, then tear down.
    tokio::time::sleep(Duration::from_millis(180)).await;
    monitor.shutdown().await;

    let after_shutdown = server.received_requests().await.unwrap().len();
    assert!(after_shutdown >= 2, "expected polling to have happened");

    // Nothing fires once shutdown has returned.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(
        server.received_requests().await.unwrap().len(),
        after_shutdown
    );
}

#[tokio::test]
async fn monitor_subscription_sees_published_readings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mariadb/puente"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bridge_row(5)))
        .mount(&server)
        .await;

    let monitor = Monitor::new(monitor_config(&server)).unwrap();
    let subscription = monitor.subscribe(DeviceClass::Bridge);
    assert_eq!(subscription.latest(), Reading::Unavailable);

    monitor.start().await;
    assert!(subscription.latest().is_fresh());

    monitor.shutdown().await;
}
