//! Stream event-source policy: read access to DynamoDB and Kinesis streams.

use log::debug;
use serde_json::Value;

use super::policy::{Policy, Statement};
use crate::diagnostics::DiagnosticSink;
use crate::model::EventDeclaration;

const DYNAMODB_STREAM_ACTIONS: [&str; 4] = [
    "dynamodb:GetRecords",
    "dynamodb:GetShardIterator",
    "dynamodb:DescribeStream",
    "dynamodb:ListStreams",
];

const KINESIS_STREAM_ACTIONS: [&str; 4] = [
    "kinesis:GetRecords",
    "kinesis:GetShardIterator",
    "kinesis:DescribeStream",
    "kinesis:ListStreams",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamKind {
    DynamoDb,
    Kinesis,
}

/// Stream references partitioned by resolved type.
#[derive(Debug, Default)]
struct StreamBuckets {
    dynamodb: Vec<Value>,
    kinesis: Vec<Value>,
}

/// Build the `streams` policy for a function's stream event sources.
///
/// Returns `None` when the function has no events or none of its stream
/// declarations resolve to a known stream type. Malformed declarations are
/// skipped with one diagnostic each and never fail the pass.
pub fn streams_policy(
    function_name: &str,
    events: Option<&[EventDeclaration]>,
    sink: &dyn DiagnosticSink,
) -> Option<Policy> {
    let events = events?;

    let mut buckets = StreamBuckets::default();
    for event in events {
        let Some(stream) = &event.stream else {
            continue;
        };

        let Some(reference) = stream.event_source() else {
            sink.emit(&format!(
                "WARNING: Stream event source for function '{function_name}' is not configured properly. IAM permissions will not be set properly."
            ));
            continue;
        };

        match resolve_stream_kind(stream.declared_type(), &reference) {
            Some(StreamKind::DynamoDb) => buckets.dynamodb.push(reference),
            Some(StreamKind::Kinesis) => buckets.kinesis.push(reference),
            None => sink.emit(&format!(
                "WARNING: Stream event type for function '{function_name}' is not configured properly. IAM permissions will not be set properly."
            )),
        }
    }

    debug!(
        "function '{}': {} dynamodb / {} kinesis stream resources",
        function_name,
        buckets.dynamodb.len(),
        buckets.kinesis.len()
    );

    let mut statements = Vec::new();
    if !buckets.dynamodb.is_empty() {
        statements.push(stream_statement(&DYNAMODB_STREAM_ACTIONS, buckets.dynamodb));
    }
    if !buckets.kinesis.is_empty() {
        statements.push(stream_statement(&KINESIS_STREAM_ACTIONS, buckets.kinesis));
    }

    Policy::from_statements("streams", Some(statements))
}

/// Resolve a declaration's stream type: an explicit `type` field wins,
/// otherwise the third colon-delimited ARN segment. Inference only works on
/// literal ARN strings; a deferred template expression without an explicit
/// type resolves to no kind.
fn resolve_stream_kind(declared: Option<&str>, reference: &Value) -> Option<StreamKind> {
    let stream_type = declared.or_else(|| {
        reference
            .as_str()
            .and_then(|arn| arn.split(':').nth(2))
    })?;

    match stream_type {
        "dynamodb" => Some(StreamKind::DynamoDb),
        "kinesis" => Some(StreamKind::Kinesis),
        _ => None,
    }
}

fn stream_statement(actions: &[&str], resources: Vec<Value>) -> Value {
    Statement::allow(
        actions.iter().map(ToString::to_string).collect(),
        resources,
    )
    .into()
}
