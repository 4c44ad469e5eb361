//! Unitwise MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdio. Logs go to stderr.
//!
//! Tools:
//! - convert: Convert a value between two units of a category
//! - in_units: Convert with a "from->to" spec, category inferred
//! - list_units: Units of a category with display labels
//! - list_categories: Categories with their base unit
//! - help: Documentation for the unit functions

mod config;

use config::ServerConfig;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use unitwise::{format_number, parse_conversion, Severity, Unitwise, Value};

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "unitwise";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    /// `null` when the request id could not be read
    id: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn parse_error(details: impl std::fmt::Display) -> Self {
        Self { code: -32700, message: format!("Parse error: {}", details), data: None }
    }

    fn method_not_found(method: &str) -> Self {
        Self { code: -32601, message: format!("Method not found: {}", method), data: None }
    }

    fn invalid_params(details: impl Into<String>) -> Self {
        Self { code: -32602, message: details.into(), data: None }
    }
}

/// Everything a request handler needs
struct Server {
    engine: Unitwise,
    config: ServerConfig,
}

impl Server {
    fn new(config: ServerConfig) -> Self {
        let engine = Unitwise::with_standard_library().with_fraction_digits(config.fraction_digits);
        Self { engine, config }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("unitwise=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    init_logging();

    let config = ServerConfig::from_env();
    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Unitwise MCP server started");
    info!(
        fraction_digits = config.fraction_digits,
        default_category = %config.default_category,
        "configuration loaded"
    );

    let server = Server::new(config);
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let Some(response) = handle_line(&server, line) else {
                    continue;
                };

                if let Err(e) = write_response(&response) {
                    error!(error = %e, "failed to write response");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "failed to read input");
                break;
            }
        }
    }

    info!("server shutting down");
}

fn write_response(response: &McpResponse) -> io::Result<()> {
    let response_json = serde_json::to_string(response)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", response_json)?;
    stdout.flush()
}

/// Handle one input line. Notifications (no id) get no response.
fn handle_line(server: &Server, line: &str) -> Option<McpResponse> {
    debug!(bytes = line.len(), "received");

    let request: McpRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "unparseable request");
            return Some(McpResponse {
                jsonrpc: "2.0".to_string(),
                id: JsonValue::Null,
                result: None,
                error: Some(McpError::parse_error(e)),
            });
        }
    };

    let response = handle_request(server, &request);
    if request.id.is_none() {
        debug!(method = %request.method, "notification processed");
        return None;
    }
    Some(response)
}

fn handle_request(server: &Server, request: &McpRequest) -> McpResponse {
    debug!(method = %request.method, "processing");

    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(server, &request.params),

        _ => Err(McpError::method_not_found(&request.method)),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone().unwrap_or(JsonValue::Null),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone().unwrap_or(JsonValue::Null),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit conversion for length, area, temperature and weight"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Use list_categories and list_units to discover unit keys, then convert. Keys are lowercase and exact (e.g. \"nauticalmile\", \"squarefoot\")."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let category_schema = json!({
        "type": "string",
        "enum": ["length", "area", "temperature", "weight"]
    });

    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value from one unit to another within a category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": ["number", "string"],
                            "description": "Value to convert; strings are parsed as numbers"
                        },
                        "from_unit": { "type": "string", "description": "Source unit key" },
                        "to_unit": { "type": "string", "description": "Target unit key" },
                        "category": category_schema
                    },
                    "required": ["value", "from_unit", "to_unit", "category"]
                }
            },
            {
                "name": "in_units",
                "description": "Convert a value with a \"from->to\" spec such as \"mile->kilometer\".",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": { "type": ["number", "string"] },
                        "conversion": { "type": "string", "description": "Spec like \"celsius->kelvin\"" }
                    },
                    "required": ["value", "conversion"]
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category with display labels.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": category_schema
                    }
                }
            },
            {
                "name": "list_categories",
                "description": "List unit categories with their base unit.",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "help",
                "description": "Documentation for a unit function, or an overview.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "Function name (optional)" }
                    }
                }
            }
        ]
    }))
}

fn handle_tool_call(server: &Server, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
    info!(tool = name, "tool call");

    match name {
        "convert" => tool_convert(server, &args),
        "in_units" => tool_in_units(server, &args),
        "list_units" => tool_list_units(server, &args),
        "list_categories" => Ok(tool_result(&server.engine.call("list_categories", &[]))),
        "help" => tool_help(server, &args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

/// Fetch a named argument as a `Value`; missing arguments become `Null`
fn arg(args: &JsonValue, name: &str) -> Value {
    args.get(name).map(Value::from_json).unwrap_or(Value::Null)
}

fn require(args: &JsonValue, names: &[&str]) -> Result<(), McpError> {
    let missing: Vec<&str> = names.iter()
        .copied()
        .filter(|n| args.get(*n).map_or(true, |v| v.is_null()))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(McpError::invalid_params(format!("Missing arguments: {}", missing.join(", "))))
    }
}

fn tool_convert(server: &Server, args: &JsonValue) -> Result<JsonValue, McpError> {
    require(args, &["value", "from_unit", "to_unit", "category"])?;
    let call_args = [
        arg(args, "value"),
        arg(args, "from_unit"),
        arg(args, "to_unit"),
        arg(args, "category"),
    ];
    let result = server.engine.call("convert", &call_args);
    let unit = call_args[2].as_text().unwrap_or_default();
    Ok(conversion_result(server, &result, unit))
}

fn tool_in_units(server: &Server, args: &JsonValue) -> Result<JsonValue, McpError> {
    require(args, &["value", "conversion"])?;
    let call_args = [arg(args, "value"), arg(args, "conversion")];
    let result = server.engine.call("in_units", &call_args);
    let unit = call_args[1]
        .as_text()
        .and_then(|spec| parse_conversion(spec).ok())
        .map(|(_, to)| to.key())
        .unwrap_or_default();
    Ok(conversion_result(server, &result, unit))
}

fn tool_list_units(server: &Server, args: &JsonValue) -> Result<JsonValue, McpError> {
    let category = match arg(args, "category") {
        Value::Null => Value::Text(server.config.default_category.key().to_string()),
        other => other,
    };
    Ok(tool_result(&server.engine.call("list_units", &[category])))
}

fn tool_help(server: &Server, args: &JsonValue) -> Result<JsonValue, McpError> {
    let name = args.get("name").and_then(|n| n.as_str());
    Ok(tool_result(&server.engine.help(name)))
}

/// Tool result for a numeric conversion: formatted text plus the raw value
fn conversion_result(server: &Server, result: &Value, unit: &str) -> JsonValue {
    match result.as_number() {
        Some(n) => {
            let formatted = format_number(n, server.engine.fraction_digits());
            let text = if unit.is_empty() { formatted.clone() } else { format!("{} {}", formatted, unit) };
            json!({
                "content": [{ "type": "text", "text": text }],
                "structuredContent": { "value": n, "formatted": formatted, "unit": unit },
                "isError": false
            })
        }
        None => tool_result(result),
    }
}

/// Wrap a function result as MCP tool output. Errors set `isError`.
fn tool_result(value: &Value) -> JsonValue {
    let is_error = value.is_error();
    let structured = value.to_json();
    let text = match value {
        Value::Error(e) => e.to_string(),
        _ => serde_json::to_string_pretty(&structured).unwrap_or_else(|_| value.to_string()),
    };

    match value {
        Value::Error(e) if e.severity == Severity::Warning => debug!(error = %text, "tool lookup missed"),
        Value::Error(_) => warn!(error = %text, "tool returned error"),
        _ => {}
    }

    json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": structured,
        "isError": is_error
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> Server {
        Server::new(ServerConfig::default())
    }

    fn call(server: &Server, line: &str) -> JsonValue {
        let response = handle_line(server, line).expect("response expected");
        serde_json::to_value(&response).unwrap()
    }

    #[test]
    fn test_initialize() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-06-18","clientInfo":{"name":"test"}}}"#);
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["result"]["protocolVersion"], "2025-06-18");
        assert_eq!(resp["result"]["serverInfo"]["name"], "unitwise");
    }

    #[test]
    fn test_notification_gets_no_response() {
        let line = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(handle_line(&server(), line).is_none());
    }

    #[test]
    fn test_parse_error() {
        let resp = call(&server(), "{not json");
        assert_eq!(resp["error"]["code"], -32700);
        let obj = resp.as_object().unwrap();
        assert!(obj.contains_key("id"));
        assert!(obj["id"].is_null());
    }

    #[test]
    fn test_unknown_method() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#);
        assert_eq!(resp["error"]["code"], -32601);
    }

    #[test]
    fn test_tools_list() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":3,"method":"tools/list"}"#);
        let tools = resp["result"]["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(names, vec!["convert", "in_units", "list_units", "list_categories", "help"]);
    }

    #[test]
    fn test_convert_tool() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"convert","arguments":{"value":100,"from_unit":"celsius","to_unit":"kelvin","category":"temperature"}}}"#);
        let result = &resp["result"];
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["text"], "373.15 kelvin");
        assert_eq!(result["structuredContent"]["value"], 373.15);
    }

    #[test]
    fn test_convert_tool_text_value() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"convert","arguments":{"value":"1","from_unit":"kilometer","to_unit":"meter","category":"length"}}}"#);
        assert_eq!(resp["result"]["content"][0]["text"], "1000 meter");
    }

    #[test]
    fn test_convert_tool_invalid_input() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"convert","arguments":{"value":"abc","from_unit":"meter","to_unit":"foot","category":"length"}}}"#);
        let result = &resp["result"];
        assert_eq!(result["isError"], true);
        assert_eq!(result["structuredContent"]["error"]["code"], "INVALID_INPUT");
    }

    #[test]
    fn test_convert_tool_unknown_unit() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"convert","arguments":{"value":1,"from_unit":"meter","to_unit":"league","category":"length"}}}"#);
        let result = &resp["result"];
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"].as_str().unwrap().contains("league"));
    }

    #[test]
    fn test_convert_tool_missing_argument() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":8,"method":"tools/call","params":{"name":"convert","arguments":{"value":1}}}"#);
        assert_eq!(resp["error"]["code"], -32602);
        assert!(resp["error"]["message"].as_str().unwrap().contains("from_unit"));
    }

    #[test]
    fn test_in_units_tool() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":9,"method":"tools/call","params":{"name":"in_units","arguments":{"value":0,"conversion":"celsius->fahrenheit"}}}"#);
        assert_eq!(resp["result"]["content"][0]["text"], "32 fahrenheit");
    }

    #[test]
    fn test_list_units_default_category() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":10,"method":"tools/call","params":{"name":"list_units","arguments":{}}}"#);
        let units = resp["result"]["structuredContent"].as_array().unwrap();
        assert_eq!(units.len(), 10);
        assert_eq!(units[0]["value"], "kilometer");
    }

    #[test]
    fn test_list_categories_tool() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":11,"method":"tools/call","params":{"name":"list_categories"}}"#);
        let categories = resp["result"]["structuredContent"].as_array().unwrap();
        assert_eq!(categories.len(), 4);
    }

    #[test]
    fn test_help_tool_unknown_name() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":13,"method":"tools/call","params":{"name":"help","arguments":{"name":"triple"}}}"#);
        let result = &resp["result"];
        assert_eq!(result["isError"], true);
        assert_eq!(result["structuredContent"]["error"]["severity"], "warning");
    }

    #[test]
    fn test_unknown_tool() {
        let resp = call(&server(), r#"{"jsonrpc":"2.0","id":12,"method":"tools/call","params":{"name":"eval"}}"#);
        assert_eq!(resp["error"]["code"], -32602);
    }
}
