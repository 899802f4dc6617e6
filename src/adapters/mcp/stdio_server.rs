//! Line-delimited JSON-RPC server over stdin/stdout.
//!
//! Protocol: one JSON request per input line, at most one JSON response per
//! output line. Only requests carrying a non-null `id` get a response.
//! Diagnostics go through `tracing` (stderr); stdout carries protocol
//! messages only.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

use crate::domain::models::{
    CapabilityDescriptor, DispatchResponse, ExecuteParams, SERIALIZATION_FALLBACK,
};
use crate::services::Dispatcher;

const JSONRPC_VERSION: &str = "2.0";

/// Incoming request envelope. `params` stays undecoded until the method is known.
#[derive(Debug, Deserialize)]
struct RequestEnvelope {
    #[serde(default)]
    #[allow(dead_code)]
    jsonrpc: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    method: String,
    #[serde(default)]
    params: Option<Box<RawValue>>,
}

/// Body carried under `result`. Errors travel here too, as `{"error": ...}`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ResultBody<'a> {
    Capabilities(&'a CapabilityDescriptor),
    Dispatch(DispatchResponse),
}

#[derive(Debug, Serialize)]
struct JsonRpcResponse<'a> {
    jsonrpc: &'static str,
    id: &'a Value,
    result: ResultBody<'a>,
}

/// Stdio server exposing the dispatcher as `initialize` / `execute` methods.
pub struct StdioServer {
    dispatcher: Arc<Dispatcher>,
}

impl StdioServer {
    pub const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Run the server loop on the process's stdin/stdout.
    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Process `reader` line by line until end of input, writing responses
    /// to `writer`.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("stdio server started");

        let mut lines = reader.split(b'\n');
        loop {
            let line = match lines.next_segment().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "error reading from standard input");
                    break;
                }
            };

            if let Some(output) = self.handle_line(&line) {
                if let Err(e) = write_line(&mut writer, &output).await {
                    error!(error = %e, "error writing response to standard output");
                }
            }
        }

        info!("stdio server stopped");
        Ok(())
    }

    /// Handle one raw input line, returning the serialized response if one
    /// is owed.
    fn handle_line(&self, line: &[u8]) -> Option<String> {
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        let request: RequestEnvelope = match serde_json::from_slice(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "error decoding request, skipping line");
                return None;
            }
        };

        let output = request.id.as_ref().filter(|id| !id.is_null()).map(|id| {
            let response = JsonRpcResponse {
                jsonrpc: JSONRPC_VERSION,
                id,
                result: self.handle_method(&request),
            };
            serde_json::to_string(&response).unwrap_or_else(|e| {
                error!(error = %e, method = %request.method, "error serializing response");
                fallback_response(id)
            })
        });

        info!(method = %request.method, id = ?request.id, "processed request");
        output
    }

    fn handle_method(&self, request: &RequestEnvelope) -> ResultBody<'_> {
        match request.method.as_str() {
            "initialize" => ResultBody::Capabilities(self.dispatcher.describe()),
            "execute" => {
                let params = request
                    .params
                    .as_deref()
                    .map(|raw| ExecuteParams::from_json(raw.get().as_bytes()));
                match params {
                    Some(Ok(params)) => ResultBody::Dispatch(
                        self.dispatcher.execute(&params.tool_name, &params.arguments),
                    ),
                    _ => ResultBody::Dispatch(DispatchResponse::error(
                        "Invalid parameters structure for 'execute'",
                    )),
                }
            }
            other => ResultBody::Dispatch(DispatchResponse::error(format!(
                "Unsupported method: {other}"
            ))),
        }
    }
}

/// Response used when the real body cannot be encoded.
fn fallback_response(id: &Value) -> String {
    format!(r#"{{"jsonrpc":"{JSONRPC_VERSION}","id":{id},"result":{SERIALIZATION_FALLBACK}}}"#)
}

async fn write_line<W>(writer: &mut W, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut bytes = Vec::with_capacity(line.len() + 1);
    bytes.extend_from_slice(line.as_bytes());
    bytes.push(b'\n');
    writer.write_all(&bytes).await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> StdioServer {
        StdioServer::new(Arc::new(Dispatcher::default()))
    }

    fn parse(output: &str) -> Value {
        serde_json::from_str(output).unwrap()
    }

    #[test]
    fn test_execute_with_id() {
        let out = server()
            .handle_line(br#"{"jsonrpc":"2.0","id":5,"method":"execute","params":{"tool_name":"add","arguments":{"a":2,"b":3}}}"#)
            .unwrap();
        assert_eq!(out, r#"{"jsonrpc":"2.0","id":5,"result":{"result":{"value":5}}}"#);
    }

    #[test]
    fn test_null_id_is_fire_and_forget() {
        let out = server().handle_line(
            br#"{"jsonrpc":"2.0","id":null,"method":"execute","params":{"tool_name":"add","arguments":{"a":2,"b":3}}}"#,
        );
        assert!(out.is_none());
    }

    #[test]
    fn test_absent_id_is_fire_and_forget() {
        assert!(server().handle_line(br#"{"method":"initialize"}"#).is_none());
    }

    #[test]
    fn test_string_id_passes_through() {
        let out = server()
            .handle_line(br#"{"jsonrpc":"2.0","id":"req-1","method":"initialize"}"#)
            .unwrap();
        let value = parse(&out);
        assert_eq!(value["id"], "req-1");
        assert_eq!(value["result"]["capabilites"]["tools"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_unparsable_line_is_skipped() {
        assert!(server().handle_line(b"{not json").is_none());
        assert!(server().handle_line(b"").is_none());
        assert!(server().handle_line(&[0xff, 0xfe]).is_none());
    }

    #[test]
    fn test_unsupported_method() {
        let out = server()
            .handle_line(br#"{"jsonrpc":"2.0","id":1,"method":"shutdown"}"#)
            .unwrap();
        assert_eq!(parse(&out)["result"]["error"], "Unsupported method: shutdown");
    }

    #[test]
    fn test_invalid_execute_params() {
        for line in [
            br#"{"jsonrpc":"2.0","id":1,"method":"execute"}"#.as_slice(),
            br#"{"jsonrpc":"2.0","id":1,"method":"execute","params":[1,2]}"#.as_slice(),
            br#"{"jsonrpc":"2.0","id":1,"method":"execute","params":{"tool_name":"add","arguments":{"a":"x"}}}"#.as_slice(),
        ] {
            let out = server().handle_line(line).unwrap();
            assert_eq!(
                parse(&out)["result"]["error"],
                "Invalid parameters structure for 'execute'"
            );
        }
    }

    #[test]
    fn test_null_params_and_fields_decode_to_zero_values() {
        let out = server()
            .handle_line(br#"{"jsonrpc":"2.0","id":1,"method":"execute","params":null}"#)
            .unwrap();
        assert_eq!(parse(&out)["result"]["error"], "No such tool. Please recheck.");

        let out = server()
            .handle_line(br#"{"jsonrpc":"2.0","id":2,"method":"execute","params":{"tool_name":null,"arguments":{"a":1,"b":2}}}"#)
            .unwrap();
        assert_eq!(parse(&out)["result"]["error"], "No such tool. Please recheck.");

        let out = server()
            .handle_line(br#"{"jsonrpc":"2.0","id":3,"method":"execute","params":{"tool_name":"add","arguments":{"a":null,"b":2}}}"#)
            .unwrap();
        assert_eq!(out, r#"{"jsonrpc":"2.0","id":3,"result":{"result":{"value":2}}}"#);
    }

    #[test]
    fn test_errors_are_carried_under_result() {
        let out = server()
            .handle_line(br#"{"jsonrpc":"2.0","id":2,"method":"execute","params":{"tool_name":"div","arguments":{"a":1,"b":0}}}"#)
            .unwrap();
        let value = parse(&out);
        assert!(value.get("error").is_none());
        assert_eq!(value["result"]["error"], "Divisior cannot be zero");
    }

    #[test]
    fn test_unencodable_result_uses_fallback() {
        let out = server()
            .handle_line(br#"{"jsonrpc":"2.0","id":3,"method":"execute","params":{"tool_name":"mul","arguments":{"a":1e308,"b":10}}}"#)
            .unwrap();
        assert_eq!(
            out,
            r#"{"jsonrpc":"2.0","id":3,"result":{"error":"Internal Server Error Marshalling the Json Result"}}"#
        );
    }

    #[test]
    fn test_crlf_line_ending() {
        let out = server()
            .handle_line(b"{\"id\":9,\"method\":\"execute\",\"params\":{\"tool_name\":\"sub\",\"arguments\":{\"a\":1,\"b\":3}}}\r")
            .unwrap();
        assert_eq!(parse(&out)["result"]["result"]["value"], -2);
    }

    #[tokio::test]
    async fn test_serve_writes_one_line_per_identified_request() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
            "\n",
            "garbage\n",
            r#"{"jsonrpc":"2.0","method":"execute","params":{"tool_name":"add","arguments":{"a":1,"b":1}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"execute","params":{"tool_name":"add","arguments":{"a":1,"b":1}}}"#,
        );
        let mut output = Vec::new();
        server().serve(input.as_bytes(), &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(parse(lines[0])["id"], 1);
        assert_eq!(lines[1], r#"{"jsonrpc":"2.0","id":2,"result":{"result":{"value":2}}}"#);
        assert!(output.ends_with('\n'));
    }
}
