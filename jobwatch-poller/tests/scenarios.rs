use std::sync::Arc;
use std::time::Duration;

use jobwatch_client::JobServiceClient;
use jobwatch_core::domain::upload::UploadFile;
use jobwatch_poller::{Config, JobPoller, MemoryPresenter, PresenterEvent};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INTERVAL: Duration = Duration::from_millis(50);

fn poller_for(server: &MockServer, presenter: &MemoryPresenter) -> JobPoller {
    let config = Config::new(server.uri()).with_poll_interval(INTERVAL);
    let client = config.build_client().expect("client");
    JobPoller::new(&config, Arc::new(client), Arc::new(presenter.clone()))
}

async fn requests_to(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == request_path)
        .count()
}

async fn wait_done(poller: &JobPoller) {
    tokio::time::timeout(Duration::from_secs(5), poller.wait())
        .await
        .expect("poll loop should finish");
}

fn json(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_owned(), "application/json")
}

#[tokio::test]
async fn submitted_job_is_polled_until_described() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(json(r#"{"job_id":"abc","status":"queued"}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status/abc"))
        .respond_with(json(r#"{"job_id":"abc","status":"processing"}"#))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status/abc"))
        .respond_with(json(r#"{"job_id":"abc","status":"done"}"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/result/abc"))
        .respond_with(json(
            r#"{"job_id":"abc","status":"done","description":"a photo of a cat"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let presenter = MemoryPresenter::new();
    let poller = poller_for(&server, &presenter);

    let job = poller
        .submit(&UploadFile::new("cat.jpg", b"jpeg bytes".to_vec()))
        .await
        .expect("submit ok");
    assert_eq!(job.job_id, "abc");

    wait_done(&poller).await;
    tokio::time::sleep(INTERVAL * 5).await;

    assert_eq!(requests_to(&server, "/status/abc").await, 2);
    assert_eq!(requests_to(&server, "/result/abc").await, 1);
    assert!(!poller.is_polling());
    assert_eq!(
        presenter.last_output(),
        Some(PresenterEvent::Result("a photo of a cat".to_string()))
    );
}

#[tokio::test]
async fn failed_job_shows_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/abc"))
        .respond_with(json(
            r#"{"job_id":"abc","status":"failed","error":"bad input"}"#,
        ))
        .mount(&server)
        .await;

    let presenter = MemoryPresenter::new();
    let poller = poller_for(&server, &presenter);

    presenter.set_job_id("abc");
    assert!(poller.watch_current());
    wait_done(&poller).await;
    tokio::time::sleep(INTERVAL * 5).await;

    assert_eq!(requests_to(&server, "/status/abc").await, 1);
    assert_eq!(requests_to(&server, "/result/abc").await, 0);
    assert_eq!(
        presenter.last_status(),
        Some(("failed".to_string(), "error: bad input".to_string()))
    );
    assert_eq!(
        presenter.last_output(),
        Some(PresenterEvent::Failed(
            "(job failed — see status error above)".to_string()
        ))
    );
}

#[tokio::test]
async fn accepted_result_keeps_polling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/abc"))
        .respond_with(json(r#"{"job_id":"abc","status":"done"}"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/result/abc"))
        .respond_with(ResponseTemplate::new(202).set_body_string("not ready"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/result/abc"))
        .respond_with(json(r#"{"description":"ready now"}"#))
        .mount(&server)
        .await;

    let presenter = MemoryPresenter::new();
    let poller = poller_for(&server, &presenter);

    poller.start_polling("abc");
    wait_done(&poller).await;

    assert_eq!(requests_to(&server, "/result/abc").await, 3);
    assert!(presenter
        .events()
        .contains(&PresenterEvent::Pending("not ready".to_string())));
    assert!(!presenter.events().iter().any(
        |e| matches!(e, PresenterEvent::Status { status, .. } if status == "error")
    ));
    assert_eq!(
        presenter.last_output(),
        Some(PresenterEvent::Result("ready now".to_string()))
    );
}

#[tokio::test]
async fn server_error_stops_polling_with_body_as_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/abc"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let presenter = MemoryPresenter::new();
    let poller = poller_for(&server, &presenter);

    poller.start_polling("abc");
    wait_done(&poller).await;
    tokio::time::sleep(INTERVAL * 5).await;

    assert_eq!(requests_to(&server, "/status/abc").await, 1);
    assert_eq!(
        presenter.last_status(),
        Some(("error".to_string(), "Internal Server Error".to_string()))
    );
}

#[tokio::test]
async fn submit_error_does_not_start_polling() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid file type"))
        .mount(&server)
        .await;

    let presenter = MemoryPresenter::new();
    let poller = poller_for(&server, &presenter);

    let err = poller
        .submit(&UploadFile::new("notes.txt", b"hello".to_vec()))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid file type");
    assert!(!poller.is_polling());
    assert_eq!(
        presenter.last_status(),
        Some(("error".to_string(), "Invalid file type".to_string()))
    );
}

#[tokio::test]
async fn switching_jobs_stops_requests_for_the_old_one() {
    let server = MockServer::start().await;
    for id in ["a", "b"] {
        Mock::given(method("GET"))
            .and(path(format!("/status/{id}")))
            .respond_with(json(&format!(r#"{{"job_id":"{id}","status":"processing"}}"#)))
            .mount(&server)
            .await;
    }

    let presenter = MemoryPresenter::new();
    let poller = poller_for(&server, &presenter);

    poller.start_polling("a");
    tokio::time::sleep(INTERVAL * 3).await;
    poller.start_polling("b");
    // Let a request for "a" that was already in flight land.
    tokio::time::sleep(INTERVAL).await;
    let a_requests = requests_to(&server, "/status/a").await;

    tokio::time::sleep(INTERVAL * 6).await;
    poller.stop_polling();

    assert!(a_requests >= 1);
    assert_eq!(requests_to(&server, "/status/a").await, a_requests);
    assert!(requests_to(&server, "/status/b").await >= 3);
}
