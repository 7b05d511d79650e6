use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::format_term;

/// Format output as a field/value table using the tabled crate.
///
/// Plan output arrives wrapped in the computation envelope; the result
/// record becomes the table and warnings plus methodology follow as a
/// footer. Bare objects (e.g. the remaining-debt query) print as-is.
pub fn print_table(value: &Value) {
    match value.as_object() {
        Some(map) => {
            if let Some(result) = map.get("result") {
                print_record(result);
                print_footer(map);
            } else {
                print_record(value);
            }
        }
        None => println!("{}", value),
    }
}

fn print_record(record: &Value) {
    let Some(map) = record.as_object() else {
        println!("{}", record);
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_field(key, val)]);
    }
    let table = Table::from(builder);
    println!("{}", table);
}

fn print_footer(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn format_field(key: &str, value: &Value) -> String {
    if key == "term" {
        if let Some(rendered) = format_term(value) {
            return rendered;
        }
    }

    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
