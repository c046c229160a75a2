use maps_gateway::{Coordinate, MapsConfig, MapsError, MapsGateway, OutcomeStatus};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn unknown_provider_fails_construction() {
    let config = MapsConfig::new("unknown_provider", "key");
    match MapsGateway::new(&config) {
        Err(MapsError::Configuration(message)) => {
            assert!(message.contains("unknown_provider"), "{}", message)
        }
        Err(other) => panic!("expected a configuration error, got {:?}", other),
        Ok(_) => panic!("gateway built for an unknown provider"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_do_not_cross_talk() {
    const CALLERS: usize = 24;

    let server = MockServer::start().await;
    for i in 0..CALLERS {
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .and(query_param("address", format!("Caller {}", i)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "results": [{
                            "formatted_address": format!("{} Main St, Springfield", i),
                            "geometry": { "location": { "lat": i as f64, "lng": -(i as f64) } }
                        }],
                        "status": "OK"
                    }))
                    // Stagger replies so responses complete out of order.
                    .set_delay(Duration::from_millis(((CALLERS - i) * 5) as u64)),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let config = MapsConfig::new("google_maps", "key").with_base_url(server.uri());
    let gateway = MapsGateway::new(&config).unwrap();

    let handles: Vec<_> = (0..CALLERS)
        .map(|i| {
            let gateway = gateway.clone();
            tokio::spawn(async move { (i, gateway.geocode(&format!("Caller {}", i)).await) })
        })
        .collect();

    for handle in handles {
        let (i, outcome) = handle.await.unwrap();
        let place = outcome.unwrap();
        assert_eq!(place.address, format!("{} Main St, Springfield", i));
        assert_eq!(place.location, Coordinate::new(i as f64, -(i as f64)).unwrap());
    }
}

#[tokio::test]
async fn unreachable_provider_is_failed() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = MapsConfig::new("here_maps", "key")
        .with_base_url(format!("http://127.0.0.1:{}", port))
        .with_timeout(Duration::from_secs(2));
    let gateway = MapsGateway::new(&config).unwrap();

    let err = gateway.geocode("Berlin").await.unwrap_err();
    assert_eq!(err.status(), OutcomeStatus::Failed);
    assert!(matches!(err, MapsError::Transport(_)));
    assert!(!err.to_string().contains("key"), "{}", err);
}

#[tokio::test]
async fn slow_provider_hits_the_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "results": [], "status": "ZERO_RESULTS" }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = MapsConfig::new("google_maps", "key")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let gateway = MapsGateway::new(&config).unwrap();

    let err = gateway.geocode("Springfield").await.unwrap_err();
    assert_eq!(err.status(), OutcomeStatus::Failed);
    assert!(matches!(err, MapsError::Transport(_)));
}
