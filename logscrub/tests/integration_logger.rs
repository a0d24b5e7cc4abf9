//! End-to-end tests for `Logger` writing JSON lines.
//!
//! Every test builds a logger over an in-memory buffer and parses what was
//! written, so these cover the builder, `RedactingHandler`, `JsonHandler`
//! and `Config` together.

use std::{
    io::{self, Write},
    sync::Arc,
    thread,
};

use logscrub::{
    attrs, Attr, BuildError, Config, Context, Level, Logger, LoggerBuilder, OptionError, ToValue,
    REQUEST_ID_KEY,
};
use parking_lot::Mutex;
use serde_json::{json, Value as JsonValue};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<JsonValue> {
        let bytes = self.0.lock().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn single(&self) -> JsonValue {
        let mut lines = self.lines();
        assert_eq!(lines.len(), 1, "expected exactly one line: {lines:?}");
        lines.remove(0)
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn logger_with(builder: LoggerBuilder) -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let logger = builder.writer(buffer.clone()).build().unwrap();
    (logger, buffer)
}

fn logger() -> (Logger, SharedBuffer) {
    logger_with(Logger::builder().env("test").source("logscrub-tests"))
}

#[test]
fn test_record_layout() {
    let (logger, buffer) = logger();
    logger
        .info(&Context::background(), "hello", attrs!["count" => 3_u64])
        .unwrap();

    let line = buffer.single();
    assert_eq!(line["level"], "INFO");
    assert_eq!(line["msg"], "hello");
    assert_eq!(line["source"], "logscrub-tests");
    assert_eq!(line["env"], "test");
    assert_eq!(line["count"], 3);
    assert!(line["time"].as_str().unwrap().ends_with('Z'));
    assert!(line.get("caller").is_none());

    let keys: Vec<&str> = line.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["time", "level", "msg", "source", "env", "count"]);
}

#[test]
fn test_grouped_user_record_is_censored() {
    let (logger, buffer) = logger();
    logger
        .info(
            &Context::background(),
            "user signed in",
            vec![Attr::group(
                "user",
                attrs![
                    "id" => 42_u64,
                    "email" => "ada@example.com",
                    "credentials" => r#"{"password":"hunter2","scheme":"basic-auth"}"#,
                    "note" => "not json {",
                ],
            )],
        )
        .unwrap();

    let line = buffer.single();
    assert_eq!(line["user"]["id"], 42);
    assert_eq!(line["user"]["email"], "*");
    assert_eq!(line["user"]["note"], "not json {");

    let credentials: JsonValue =
        serde_json::from_str(line["user"]["credentials"].as_str().unwrap()).unwrap();
    assert_eq!(credentials, json!({ "password": "*", "scheme": "basic-auth" }));
}

#[test]
fn test_debug_mode_forwards_values_verbatim() {
    let (logger, buffer) = logger_with(Logger::builder().debug_mode(true));
    logger
        .debug(
            &Context::background(),
            "local only",
            attrs!["password" => "secret123"],
        )
        .unwrap();
    assert_eq!(buffer.single()["password"], "secret123");
}

#[test]
fn test_context_attributes_come_first_and_are_censored() {
    let (logger, buffer) = logger();
    let ctx = Context::background()
        .with_request_id("req-1")
        .with("token", &"abc");

    logger.warn(&ctx, "slow", attrs!["elapsed_ms" => 1500_u64]).unwrap();

    let line = buffer.single();
    assert_eq!(line[REQUEST_ID_KEY], "req-1");
    assert_eq!(line["token"], "*");
    assert_eq!(line["elapsed_ms"], 1500);

    let keys: Vec<&str> = line.as_object().unwrap().keys().map(String::as_str).collect();
    let request_id = keys.iter().position(|k| *k == REQUEST_ID_KEY).unwrap();
    let elapsed = keys.iter().position(|k| *k == "elapsed_ms").unwrap();
    assert!(request_id < elapsed);
}

#[test]
fn test_generated_request_id_is_a_uuid() {
    let (logger, buffer) = logger();
    let ctx = Context::background().with_generated_request_id();
    logger.info(&ctx, "ping", attrs![]).unwrap();

    let line = buffer.single();
    let id = line[REQUEST_ID_KEY].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok(), "not a uuid: {id}");
}

#[test]
fn test_bound_attributes_and_groups_are_censored() {
    let (logger, buffer) = logger();
    let scoped = logger
        .with(attrs!["session" => "s-123", "tenant" => "acme"])
        .with_group("http");

    scoped
        .info(
            &Context::background(),
            "request",
            attrs!["path" => "/login", "authorization" => "Bearer xyz"],
        )
        .unwrap();

    let line = buffer.single();
    assert_eq!(line["session"], "*");
    assert_eq!(line["tenant"], "acme");
    assert_eq!(
        line["http"],
        json!({ "path": "/login", "authorization": "*" })
    );
}

#[test]
fn test_empty_groups_are_omitted() {
    let (logger, buffer) = logger();
    logger
        .with_group("empty")
        .info(&Context::background(), "nothing grouped", attrs![])
        .unwrap();
    assert!(buffer.single().get("empty").is_none());
}

#[test]
fn test_custom_keys_and_marker() {
    let (logger, buffer) = logger_with(
        Logger::builder()
            .sensitive_keys(["deviceId"])
            .redaction_marker("[REDACTED]"),
    );
    logger
        .info(
            &Context::background(),
            "registered",
            attrs!["device_id" => "D-1", "password" => "p", "model" => "X1"],
        )
        .unwrap();

    let line = buffer.single();
    assert_eq!(line["device_id"], "[REDACTED]");
    assert_eq!(line["password"], "[REDACTED]");
    assert_eq!(line["model"], "X1");
}

#[test]
fn test_level_floor_drops_records() {
    let (logger, buffer) = logger_with(Logger::builder().level(Level::Warn));
    let ctx = Context::background();
    logger.debug(&ctx, "dropped", attrs![]).unwrap();
    logger.info(&ctx, "dropped", attrs![]).unwrap();
    logger.error(&ctx, "kept", attrs![]).unwrap();

    let line = buffer.single();
    assert_eq!(line["msg"], "kept");
    assert_eq!(line["level"], "ERROR");
}

#[test]
fn test_level_follows_http_status() {
    let (logger, buffer) = logger();
    let ctx = Context::background();
    for status in [200_u16, 404, 503] {
        logger
            .log(
                &ctx,
                Level::from_http_status(status),
                "response",
                attrs!["status" => status],
            )
            .unwrap();
    }

    let levels: Vec<JsonValue> = buffer.lines().into_iter().map(|l| l["level"].clone()).collect();
    assert_eq!(levels, [json!("INFO"), json!("WARN"), json!("ERROR")]);
}

#[test]
fn test_call_site_is_recorded() {
    let (logger, buffer) = logger_with(Logger::builder().add_source(true).source("svc"));
    let line_no = line!() + 1;
    logger.info(&Context::background(), "here", attrs![]).unwrap();

    let line = buffer.single();
    assert_eq!(line["caller"]["file"], file!());
    assert_eq!(line["caller"]["line"], line_no);
    assert_eq!(line["source"], "svc");
}

#[test]
fn test_header_fields_cannot_be_overwritten() {
    let (logger, buffer) = logger();
    logger
        .with(attrs!["time" => "yesterday"])
        .info(
            &Context::background(),
            "real message",
            attrs!["msg" => "forged", "level" => "DEBUG"],
        )
        .unwrap();

    let line = buffer.single();
    assert_eq!(line["msg"], "real message");
    assert_eq!(line["level"], "INFO");
    assert_ne!(line["time"], "yesterday");
    assert_eq!(line["fields.msg"], "forged");
    assert_eq!(line["fields.level"], "DEBUG");
    assert_eq!(line["fields.time"], "yesterday");
}

#[test]
fn test_error_chains_are_logged() {
    #[derive(Debug, thiserror::Error)]
    #[error("request failed")]
    struct RequestFailed(#[source] io::Error);

    let (logger, buffer) = logger();
    let err = RequestFailed(io::Error::new(io::ErrorKind::TimedOut, "upstream timed out"));
    logger
        .error(
            &Context::background(),
            "call failed",
            vec![Attr::error("error", &err)],
        )
        .unwrap();

    assert_eq!(
        buffer.single()["error"],
        json!({ "msg": "request failed", "causes": ["upstream timed out"] })
    );
}

#[test]
fn test_derived_records_are_censored() {
    #[derive(ToValue)]
    struct Signup {
        #[serde(rename = "firstName")]
        given_name: String,
        plan: String,
        #[sensitive]
        referral_code: String,
    }

    let (logger, buffer) = logger();
    let signup = Signup {
        given_name: "Ada".into(),
        plan: "pro".into(),
        referral_code: "FRIEND".into(),
    };
    logger
        .info(&Context::background(), "signup", attrs!["signup" => signup])
        .unwrap();

    assert_eq!(
        buffer.single()["signup"],
        json!({ "firstName": "*", "plan": "pro", "referral_code": "*" })
    );
}

#[test]
fn test_invalid_options_abort_construction() {
    let err = Logger::builder()
        .redaction_marker("")
        .writer(io::sink())
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::InvalidOption {
            option: "redaction_marker",
            source: OptionError::EmptyRedactionMarker,
        }
    ));

    let err = Logger::builder()
        .sensitive_keys(["  "])
        .writer(io::sink())
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::InvalidOption {
            option: "sensitive_keys",
            source: OptionError::EmptySensitiveKey(_),
        }
    ));
}

#[test]
fn test_config_drives_the_builder() {
    let config = Config::from_toml_str(
        r#"
        env = "production"
        source = "deeplink-api"
        level = "info"
        sensitive_keys = ["device_id"]
        redact_message = "[x]"
        "#,
    )
    .unwrap();

    let (logger, buffer) = logger_with(config.builder());
    let ctx = Context::background();
    logger.debug(&ctx, "too quiet", attrs![]).unwrap();
    logger
        .info(&ctx, "opened", attrs!["deviceId" => "D-9", "email" => "e@x.y"])
        .unwrap();

    let line = buffer.single();
    assert_eq!(line["env"], "production");
    assert_eq!(line["source"], "deeplink-api");
    assert_eq!(line["deviceId"], "[x]");
    assert_eq!(line["email"], "[x]");
}

#[test]
fn test_concurrent_logging_produces_whole_lines() {
    let (logger, buffer) = logger();

    thread::scope(|scope| {
        for worker in 0..100_u64 {
            let logger = logger.clone();
            scope.spawn(move || {
                let ctx = Context::background().with_request_id(format!("req-{worker}"));
                logger
                    .info(
                        &ctx,
                        "work",
                        attrs!["worker" => worker, "email" => format!("w{worker}@example.com")],
                    )
                    .unwrap();
            });
        }
    });

    let lines = buffer.lines();
    assert_eq!(lines.len(), 100);
    let mut workers: Vec<u64> = lines
        .iter()
        .map(|line| {
            assert_eq!(line["email"], "*");
            let worker = line["worker"].as_u64().unwrap();
            assert_eq!(line[REQUEST_ID_KEY], format!("req-{worker}"));
            worker
        })
        .collect();
    workers.sort_unstable();
    assert_eq!(workers, (0..100).collect::<Vec<_>>());
}
