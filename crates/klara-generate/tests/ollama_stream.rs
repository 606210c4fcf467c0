//! End-to-end generation against a local mock of Ollama's `/api/generate`.

use std::io::Read;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use klara_generate::{
    GenerateError, GenerationRequest, ModelClient, OllamaClient, generate_tests,
};
use pretty_assertions::assert_eq;

struct Captured {
    method: String,
    url: String,
    body: serde_json::Value,
}

/// Serve one request with `status` and `body`, reporting what was received.
fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<Captured>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock server");
    let port = server
        .server_addr()
        .to_ip()
        .map(|a| a.port())
        .expect("tcp listener");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let Ok(mut request) = server.recv() else {
            return;
        };
        let mut raw = String::new();
        request.as_reader().read_to_string(&mut raw).unwrap();
        let captured = Captured {
            method: request.method().to_string(),
            url: request.url().to_string(),
            body: serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null),
        };
        let response = tiny_http::Response::from_string(body).with_status_code(status);
        let _ = request.respond(response);
        let _ = tx.send(captured);
    });

    (format!("http://127.0.0.1:{port}"), rx)
}

const STREAM: &str = concat!(
    "{\"model\":\"klaradvn\",\"response\":\"```python\\n\",\"done\":false}\n",
    "{\"model\":\"klaradvn\",\"response\":\"import pytest\\n\\n\",\"done\":false}\n",
    "{\"model\":\"klaradvn\",\"response\":\"def test_gt():\\n    assert another_function(1, 2)\\n\",\"done\":false}\n",
    "{\"model\":\"klaradvn\",\"response\":\"```\",\"done\":false}\n",
    "{\"model\":\"klaradvn\",\"response\":\"\",\"done\":true}\n",
);

#[tokio::test]
async fn streams_fragments_in_order() {
    let (base, rx) = serve_once(200, STREAM);
    let client = OllamaClient::new(base, "klaradvn", Duration::from_secs(5)).unwrap();

    let mut fragments = Vec::new();
    let text = client
        .generate("write tests", &mut |chunk: &str| fragments.push(chunk.to_string()))
        .await
        .unwrap();

    assert_eq!(fragments.len(), 4);
    assert_eq!(fragments.concat(), text);
    assert!(text.starts_with("```python\nimport pytest"));

    let captured = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.url, "/api/generate");
    assert_eq!(captured.body["model"], "klaradvn");
    assert_eq!(captured.body["prompt"], "write tests");
    assert_eq!(captured.body["stream"], true);
}

#[tokio::test]
async fn non_success_status_is_api_error() {
    let (base, _rx) = serve_once(404, "{\"error\":\"model 'klaradvn' not found\"}");
    let client = OllamaClient::new(base, "klaradvn", Duration::from_secs(5)).unwrap();

    let err = client.generate("p", &mut |_: &str| {}).await.unwrap_err();
    match err {
        GenerateError::Api { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("not found"), "{message}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_line_in_stream_is_api_error() {
    let (base, _rx) = serve_once(200, "{\"error\":\"out of memory\"}\n");
    let client = OllamaClient::new(base, "klaradvn", Duration::from_secs(5)).unwrap();

    let err = client.generate("p", &mut |_: &str| {}).await.unwrap_err();
    assert!(matches!(err, GenerateError::Api { message, .. } if message == "out of memory"));
}

#[tokio::test]
async fn generate_tests_writes_import_and_code() {
    let (base, _rx) = serve_once(200, STREAM);
    let client = OllamaClient::new(base, "klaradvn", Duration::from_secs(5)).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("package_one").join("lorem_ipsum.py");
    std::fs::create_dir_all(source.parent().unwrap()).unwrap();
    std::fs::write(&source, "def another_function(n1, n2):\n    return n2 > n1\n").unwrap();

    let request = GenerationRequest {
        source_file: &source,
        symbol: "another_function",
        code: "def another_function(n1, n2):\n    return n2 > n1",
        tests_dir: "tests",
    };
    let path = generate_tests(&client, request, &mut |_: &str| {}).await.unwrap();

    assert_eq!(path, tmp.path().join("tests").join("test_lorem_ipsum.py"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "from package_one.lorem_ipsum import another_function\n\n\
         import pytest\n\ndef test_gt():\n    assert another_function(1, 2)"
    );
}
