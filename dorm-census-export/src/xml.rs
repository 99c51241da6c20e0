//! XML rendering of report results.
//!
//! Layout contract: one `<sort>` element per report, holding a
//! `<sort_type_value>` text child with the report name followed by one
//! `<data>` child per record.

use dorm_census_db::ReportResult;
use serde_json::Value;

/// Render the results under a `<Result>` root element.
pub fn render(results: &[ReportResult]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\"?>\n");
    xml.push_str("<Result>\n");

    for result in results {
        xml.push_str("  <sort>\n");
        write_tag(&mut xml, 4, "sort_type_value", &result.name);

        for record in &result.records {
            xml.push_str("    <data>\n");
            for (key, value) in record {
                write_tag(&mut xml, 6, key, &scalar_text(value));
            }
            xml.push_str("    </data>\n");
        }

        xml.push_str("  </sort>\n");
    }

    xml.push_str("</Result>\n");
    xml
}

fn write_tag(xml: &mut String, indent: usize, tag: &str, value: &str) {
    for _ in 0..indent {
        xml.push(' ');
    }
    xml.push('<');
    xml.push_str(tag);
    xml.push('>');
    xml.push_str(&escape_xml(value));
    xml.push_str("</");
    xml.push_str(tag);
    xml.push_str(">\n");
}

/// Stringify a record value for element text. Null becomes empty text.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dorm_census_db::Record;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn records_nest_under_their_own_sort() {
        let results = vec![
            ReportResult {
                name: "by_students".to_string(),
                records: vec![record(json!({"room_id": 1, "room_name": "A"}))],
            },
            ReportResult {
                name: "by_age_difference".to_string(),
                records: vec![],
            },
        ];

        let xml = render(&results);

        let first_sort_end = xml.find("</sort>").unwrap();
        let data_start = xml.find("<data>").unwrap();
        assert!(
            data_start < first_sort_end,
            "records must sit inside the first report's <sort>",
        );
        assert!(xml.contains("<sort_type_value>by_students</sort_type_value>"));
        assert!(xml.contains("<room_id>1</room_id>"));
        assert!(xml.contains("<room_name>A</room_name>"));
        // The empty report still gets its own <sort> with no <data> children.
        assert!(xml.contains("<sort_type_value>by_age_difference</sort_type_value>"));
        assert_eq!(xml.matches("<data>").count(), 1);
    }

    #[test]
    fn text_is_escaped() {
        let results = vec![ReportResult {
            name: "by_students".to_string(),
            records: vec![record(json!({"room_name": "A&B <\"mixed\">"}))],
        }];
        let xml = render(&results);
        assert!(xml.contains("<room_name>A&amp;B &lt;&quot;mixed&quot;&gt;</room_name>"));
    }

    #[test]
    fn null_values_render_as_empty_text() {
        let results = vec![ReportResult {
            name: "by_age_difference".to_string(),
            records: vec![record(json!({"age_difference": null}))],
        }];
        let xml = render(&results);
        assert!(xml.contains("<age_difference></age_difference>"));
    }

    #[test]
    fn empty_results_render_bare_root() {
        let xml = render(&[]);
        assert_eq!(xml, "<?xml version=\"1.0\"?>\n<Result>\n</Result>\n");
    }
}
