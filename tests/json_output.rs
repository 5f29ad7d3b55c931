// tests/json_output.rs
// =============================================================================
// Runs the built binary against a local mock site and checks what lands on
// each output stream.
// =============================================================================

use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_site() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<p>Welcome.</p><a href='/about'>About</a>", "text/html"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>About us.</p>", "text/html"))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_json_flag_keeps_stdout_to_the_report() {
    let server = mock_site().await;
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("site.pdf");

    let output = Command::new(env!("CARGO_BIN_EXE_site2pdf"))
        .arg(format!("{}/", server.uri()))
        .args(["--delay-ms", "0", "--json", "-o"])
        .arg(&pdf)
        .output()
        .await
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["visited"], 2);
    assert_eq!(report["pages"].as_array().unwrap().len(), 2);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Crawling website"));
    assert!(stderr.contains("PDF created"));
    assert!(pdf.exists());
}

#[tokio::test]
async fn test_summary_goes_to_stdout_without_json() {
    let server = mock_site().await;
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("site.pdf");

    let output = Command::new(env!("CARGO_BIN_EXE_site2pdf"))
        .arg(format!("{}/", server.uri()))
        .args(["--delay-ms", "0", "-o"])
        .arg(&pdf)
        .output()
        .await
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Crawling website"));
    assert!(stdout.contains("PDF created"));
}
