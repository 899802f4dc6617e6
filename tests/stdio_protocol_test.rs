//! End-to-end tests for the line-delimited JSON-RPC transport.

mod common;

use mcp_calculator::StdioServer;
use serde_json::{json, Value};
use tokio_test::io::Builder;

async fn run(input: &[u8]) -> Vec<Value> {
    common::setup_test_logging();
    let server = StdioServer::new(common::dispatcher());
    let mut output = Vec::new();
    server.serve(input, &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_initialize_returns_descriptor() {
    let responses = run(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\"}\n").await;
    assert_eq!(responses.len(), 1);

    let tools = responses[0]["result"]["capabilites"]["tools"].as_array().unwrap();
    let names: Vec<_> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["add", "sub", "mul", "div"]);
    for tool in tools {
        assert_eq!(tool["input_schema"]["required"], json!(["a", "b"]));
        assert_eq!(tool["input_schema"]["type"], "OBJECT");
    }
}

#[tokio::test]
async fn test_id_is_echoed() {
    let input = format!("{}\n", common::execute_line(json!(5), "mul", 2.0, 4.0));
    let responses = run(input.as_bytes()).await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["jsonrpc"], "2.0");
    assert_eq!(responses[0]["id"], 5);
    assert_eq!(responses[0]["result"], json!({"result": {"value": 8}}));
}

#[tokio::test]
async fn test_null_id_produces_no_output() {
    let input = format!("{}\n", common::execute_line(Value::Null, "add", 1.0, 2.0));
    assert!(run(input.as_bytes()).await.is_empty());
}

#[tokio::test]
async fn test_unparsable_line_does_not_stop_processing() {
    let input = format!(
        "{{\"id\": 1, \"method\"\n{}\n",
        common::execute_line(json!("after"), "sub", 10.0, 4.0)
    );
    let responses = run(input.as_bytes()).await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], "after");
    assert_eq!(responses[0]["result"]["result"]["value"], 6);
}

#[tokio::test]
async fn test_error_payloads_stay_under_result() {
    let input = [
        common::execute_line(json!(1), "div", 1.0, 0.0),
        common::execute_line(json!(2), "mod", 1.0, 2.0),
        r#"{"jsonrpc":"2.0","id":3,"method":"execute","params":{"tool_name":"add","arguments":{"a":1}}}"#
            .to_string(),
        r#"{"jsonrpc":"2.0","id":4,"method":"tools/list"}"#.to_string(),
    ]
    .join("\n");

    let responses = run(input.as_bytes()).await;
    assert_eq!(responses.len(), 4);
    for response in &responses {
        assert!(response.get("error").is_none());
        assert!(response["result"]["error"].is_string());
    }
    assert_eq!(responses[0]["result"]["error"], "Divisior cannot be zero");
    assert_eq!(responses[1]["result"]["error"], "No such tool. Please recheck.");
    assert!(responses[2]["result"]["error"]
        .as_str()
        .unwrap()
        .starts_with("Missing required argument(s): b"));
    assert_eq!(responses[3]["result"]["error"], "Unsupported method: tools/list");
}

#[tokio::test]
async fn test_requests_split_across_reads() {
    common::setup_test_logging();
    let line = common::execute_line(json!(7), "add", 0.1, 0.2);
    let (head, tail) = line.split_at(line.len() / 2);
    let reader = Builder::new()
        .read(head.as_bytes())
        .read(tail.as_bytes())
        .read(b"\n")
        .build();

    let server = StdioServer::new(common::dispatcher());
    let mut output = Vec::new();
    server
        .serve(tokio::io::BufReader::new(reader), &mut output)
        .await
        .unwrap();

    let output = String::from_utf8(output).unwrap();
    assert_eq!(
        output,
        format!("{{\"jsonrpc\":\"2.0\",\"id\":7,\"result\":{{\"result\":{{\"value\":{}}}}}}}\n", 0.1 + 0.2)
    );
}

#[tokio::test]
async fn test_identical_requests_yield_identical_responses() {
    let line = common::execute_line(json!(1), "div", 22.0, 7.0);
    let input = format!("{line}\n{line}\n");
    let responses = run(input.as_bytes()).await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0], responses[1]);
}

#[tokio::test]
async fn test_diagnostics_are_logged_and_kept_off_the_output() {
    let logs = common::CapturedLogs::default();
    let _guard = tracing::subscriber::set_default(logs.subscriber());

    let input = format!(
        "not json\n{}\n\n{}\n",
        common::execute_line(json!(1), "add", 1.0, 2.0),
        common::execute_line(Value::Null, "add", 3.0, 4.0),
    );
    let server = StdioServer::new(common::dispatcher());
    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    assert_eq!(
        output,
        "{\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{\"result\":{\"value\":3}}}\n"
    );

    // One warning per undecodable line (the garbage and the blank line),
    // one trace per decoded line whether or not it was answered.
    assert_eq!(logs.count("WARN", "error decoding request, skipping line"), 2);
    assert_eq!(logs.count("INFO", "processed request"), 2);
    let processed: Vec<_> = logs
        .events()
        .into_iter()
        .filter(|event| event["fields"]["message"] == "processed request")
        .collect();
    assert!(processed.iter().all(|event| event["fields"]["method"] == "execute"));
}
