use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use quote_client::{ClientConfig, run};
use quote_common::{Deadline, ErrorKind};
use quote_server::provider::HttpQuoteProvider;
use quote_server::service::{QuoteService, ServiceDeadlines};
use quote_server::store::SqliteQuoteStore;
use tokio::net::TcpListener;

fn provider_body(bid: &str) -> String {
    format!(
        r#"{{"USDBRL":{{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.0812","low":"5.0301","varBid":"-0.0040","pctChange":"-0.08","bid":"{}","ask":"5.0510","timestamp":"1700000000","create_date":"2023-11-14 19:13:20"}}}}"#,
        bid
    )
}

/// Provider stub whose bid can be changed between runs.
async fn stub_provider(bid: Arc<Mutex<String>>) -> String {
    let router = Router::new()
        .route(
            "/json/last/USD-BRL",
            get(|State(bid): State<Arc<Mutex<String>>>| async move {
                let bid = bid.lock().unwrap().clone();
                provider_body(&bid)
            }),
        )
        .with_state(bid);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/json/last/USD-BRL", addr)
}

async fn start_service(provider_url: String, store: Arc<SqliteQuoteStore>) -> String {
    let service = QuoteService::new(
        Arc::new(HttpQuoteProvider::new(provider_url)),
        store,
        ServiceDeadlines {
            provider: Deadline::from_millis(1_000),
            store: Deadline::from_millis(1_000),
        },
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        quote_server::serve(listener, service, std::future::pending())
            .await
            .unwrap();
    });
    format!("http://{}/cotacao", addr)
}

fn client_config(server_url: String, dir: &tempfile::TempDir) -> ClientConfig {
    ClientConfig {
        server_url,
        output: dir.path().join("cotacao.txt"),
        deadline: Deadline::from_millis(2_000),
    }
}

#[tokio::test]
async fn bid_flows_from_provider_to_artifact() {
    let bid = Arc::new(Mutex::new("5.05".to_string()));
    let provider_url = stub_provider(bid).await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteQuoteStore::open(dir.path().join("quotes.db")).unwrap());
    let server_url = start_service(provider_url, store.clone()).await;
    let config = client_config(server_url, &dir);

    let summary = run(&config).await.unwrap();

    assert_eq!(summary.bid, "5.05");
    assert_eq!(std::fs::read_to_string(&config.output).unwrap(), "Dólar: 5.05");
    assert_eq!(store.count().unwrap(), 1);
}

#[tokio::test]
async fn rerun_overwrites_the_artifact_with_the_latest_bid() {
    let bid = Arc::new(Mutex::new("5.4321".to_string()));
    let provider_url = stub_provider(Arc::clone(&bid)).await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteQuoteStore::open_in_memory().unwrap());
    let server_url = start_service(provider_url, store.clone()).await;
    let config = client_config(server_url, &dir);

    run(&config).await.unwrap();
    assert_eq!(std::fs::read_to_string(&config.output).unwrap(), "Dólar: 5.4321");

    *bid.lock().unwrap() = "5.1".to_string();
    run(&config).await.unwrap();

    assert_eq!(std::fs::read_to_string(&config.output).unwrap(), "Dólar: 5.1");
    assert_eq!(store.count().unwrap(), 2);
}

#[tokio::test]
async fn service_failure_leaves_the_previous_artifact_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("cotacao.txt");
    std::fs::write(&output, "Dólar: 4.99").unwrap();

    // Nothing listens on the provider address, so the service fails the request.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_provider = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);
    let store = Arc::new(SqliteQuoteStore::open_in_memory().unwrap());
    let server_url = start_service(dead_provider, store.clone()).await;
    let config = client_config(server_url, &dir);

    let err = run(&config).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServiceFailure);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Dólar: 4.99");
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/cotacao", listener.local_addr().unwrap());
    drop(listener);
    let dir = tempfile::tempdir().unwrap();

    let err = run(&client_config(url, &dir)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!dir.path().join("cotacao.txt").exists());
}

#[tokio::test]
async fn client_deadline_is_independent_of_the_service_budgets() {
    let router = Router::new().route(
        "/cotacao",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            r#"{"bid":"5.05"}"#
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/cotacao", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig {
        deadline: Deadline::from_millis(50),
        ..client_config(url, &dir)
    };

    let err = run(&config).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(!config.output.exists());
}
