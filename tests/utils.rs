#![allow(dead_code)]

use std::process::Output;

use assert_cmd::Command;

pub(crate) fn run_taskpulse(stdin: Option<&str>) -> Output {
    let mut cmd = Command::cargo_bin("taskpulse").unwrap();
    if let Some(stdin) = stdin {
        cmd.write_stdin(stdin);
    }

    cmd.env("TASKPULSE_LOG", "trace")
        .env(
            "TASKPULSE_LOG_FILE",
            "./target/test_logs/taskpulse.log.${datetime}",
        )
        .output()
        .unwrap()
}

/// Splits a stream of back-to-back JSON documents. There is no separator on
/// the wire, so framing goes through serde_json's streaming deserializer.
pub(crate) fn frame_documents(bytes: &[u8]) -> Vec<serde_json::Value> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<serde_json::Value>()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}
