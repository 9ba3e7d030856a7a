use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use client::{ClientError, HttpRecordClient, RecordClient};
use common::types::Record;
use server::SharedStore;
use service::{JsonRecordFile, RecordService};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db_path = std::env::temp_dir().join(format!("e2e_records_{}.json", Uuid::new_v4()));
    service::runtime::ensure_record_file(&db_path).await?;
    let store: SharedStore = Arc::new(RecordService::new(JsonRecordFile::new(&db_path)));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = server::serve(listener, store, std::future::pending()).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, db_path })
}

fn client(app: &TestApp) -> HttpRecordClient {
    HttpRecordClient::new(&app.base_url, Duration::from_secs(3)).expect("client")
}

#[tokio::test]
async fn e2e_status() -> anyhow::Result<()> {
    let app = start_server().await?;
    client(&app).status().await?;
    Ok(())
}

#[tokio::test]
async fn e2e_put_get_round_trip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client(&app);

    let rec = Record::new("x", "https://example.com");
    assert_eq!(c.put(rec.clone()).await?, rec);
    assert_eq!(c.get("x").await?, rec);
    Ok(())
}

#[tokio::test]
async fn e2e_put_updates_in_place() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client(&app);

    c.put(Record::new("n", "https://old.example")).await?;
    c.put(Record::new("n", "https://new.example")).await?;

    let records = c.scan().await?;
    assert_eq!(records, vec![Record::new("n", "https://new.example")]);
    Ok(())
}

#[tokio::test]
async fn e2e_not_found_paths() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client(&app);

    assert!(c.scan().await.unwrap_err().is_not_found());
    assert!(c.get("missing").await.unwrap_err().is_not_found());
    assert!(c.delete("missing").await.unwrap_err().is_not_found());

    c.put(Record::new("d", "https://d.example")).await?;
    c.delete("d").await?;
    assert!(c.get("d").await.unwrap_err().is_not_found());
    assert!(c.delete("d").await.unwrap_err().is_not_found());
    assert!(c.scan().await.unwrap_err().is_not_found());
    Ok(())
}

#[tokio::test]
async fn e2e_redirect_front_door() -> anyhow::Result<()> {
    let app = start_server().await?;
    client(&app).put(Record::new("x", "https://example.com")).await?;

    let http = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let res = http.get(format!("{}/c/x", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()[reqwest::header::LOCATION], "https://example.com");

    let res = http.get(format!("{}/c/unknown", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_wire_status_mapping() -> anyhow::Result<()> {
    let app = start_server().await?;
    let http = reqwest::Client::new();

    let res = http.get(format!("{}/scan", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);

    let res = http
        .post(format!("{}/get", app.base_url))
        .body("{\"name\":")
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "Invalid request");

    let res = http.get(format!("{}/other", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_corrupt_store_is_server_failure() -> anyhow::Result<()> {
    let app = start_server().await?;
    tokio::fs::write(&app.db_path, b"not json").await?;
    let c = client(&app);

    assert!(matches!(c.scan().await, Err(ClientError::Server { status: 500 })));
    assert!(matches!(c.put(Record::new("a", "b")).await, Err(ClientError::Server { status: 500 })));
    c.status().await?;
    Ok(())
}

#[tokio::test]
async fn e2e_connection_refused_is_transport_failure() -> anyhow::Result<()> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let c = HttpRecordClient::new(format!("http://{addr}"), Duration::from_secs(1))?;
    let err = c.get("x").await.unwrap_err();
    assert_eq!(err.kind(), "transport");
    assert!(matches!(c.status().await, Err(ClientError::Transport(_))));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn e2e_concurrent_writers() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client(&app);
    let n = 24;

    let mut handles = Vec::new();
    for i in 0..n {
        let c = c.clone();
        handles.push(tokio::spawn(async move {
            c.put(Record::new(format!("w{i}"), format!("https://{i}.example"))).await
        }));
    }
    for h in handles {
        h.await??;
    }

    let got: HashSet<Record> = c.scan().await?.into_iter().collect();
    let want: HashSet<Record> = (0..n)
        .map(|i| Record::new(format!("w{i}"), format!("https://{i}.example")))
        .collect();
    assert_eq!(got, want);
    Ok(())
}
