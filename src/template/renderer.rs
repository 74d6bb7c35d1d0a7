//! Template renderer
//!
//! Projects a record through a compiled template. Literal segments are
//! appended verbatim; variable segments resolve their dot-path against
//! the record. Resolution failures either substitute an empty string
//! and report through tracing (the default) or abort the render,
//! depending on the configured policy.

use tracing::warn;

use crate::config::MissingFieldPolicy;
use crate::error::SearchError;
use crate::record::Record;
use crate::template::compiler::{CompiledTemplate, TemplateSegment};

/// Render `record` through `tpl`.
pub fn render(
    tpl: &CompiledTemplate,
    record: &Record,
    policy: MissingFieldPolicy,
) -> Result<String, SearchError> {
    let mut output = String::new();

    for segment in tpl.segments() {
        match segment {
            TemplateSegment::Literal(text) => output.push_str(text),
            TemplateSegment::Variable(path) => match record.resolve_path(path) {
                Ok(text) => output.push_str(text),
                Err(err) => match policy {
                    MissingFieldPolicy::SubstituteEmpty => {
                        warn!(path = %path.join("."), "unresolved template variable");
                    }
                    MissingFieldPolicy::Fail => return Err(err),
                },
            },
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;
    use crate::template::compiler::compile;

    fn ada() -> Record {
        let mut record = Record::new();
        record.insert("name", Value::Text("Ada".to_string()));
        record
    }

    #[test]
    fn test_hello_ada() {
        let tpl = compile("Hello {{name}}!", '{', '}').unwrap();
        let out = render(&tpl, &ada(), MissingFieldPolicy::SubstituteEmpty).unwrap();
        assert_eq!(out, "Hello Ada!");
    }

    #[test]
    fn test_literal_template_round_trip() {
        let source = "nothing to { substitute } here";
        let tpl = compile(source, '{', '}').unwrap();
        let out = render(&tpl, &ada(), MissingFieldPolicy::SubstituteEmpty).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn test_nested_path() {
        let mut user = Record::new();
        user.insert("name", Value::Text("Mo".to_string()));
        let mut record = Record::new();
        record.insert("user", Value::Nested(user));

        let tpl = compile("{{user.name}}", '{', '}').unwrap();
        let out = render(&tpl, &record, MissingFieldPolicy::SubstituteEmpty).unwrap();
        assert_eq!(out, "Mo");
    }

    #[test]
    fn test_missing_field_substitutes_empty() {
        let tpl = compile("<{{title}}>", '{', '}').unwrap();
        let out = render(&tpl, &ada(), MissingFieldPolicy::SubstituteEmpty).unwrap();
        assert_eq!(out, "<>");
    }

    #[test]
    fn test_missing_field_fail_policy() {
        let tpl = compile("{{user.name}}", '{', '}').unwrap();
        let err = render(&tpl, &ada(), MissingFieldPolicy::Fail).unwrap_err();
        assert_eq!(err.to_string(), "Missing field at path 'user.name'");
    }

    #[test]
    fn test_missing_field_reports_through_diagnostics() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl Write for Capture {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Capture {
            type Writer = Capture;
            fn make_writer(&'a self) -> Self::Writer {
                self.clone()
            }
        }

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::fmt()
            .with_writer(Capture(Arc::clone(&buffer)))
            .with_max_level(tracing::Level::WARN)
            .finish();

        let tpl = compile("{{user.name}}", '{', '}').unwrap();
        let out = tracing::subscriber::with_default(subscriber, || {
            render(&tpl, &ada(), MissingFieldPolicy::SubstituteEmpty).unwrap()
        });

        assert_eq!(out, "");
        let logged = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("unresolved template variable"));
        assert!(logged.contains("user.name"));
    }

    #[test]
    fn test_remaining_segments_render_after_miss() {
        let mut record = ada();
        record.insert("tail", Value::Text("end".to_string()));
        let tpl = compile("{{missing}}{{name}}-{{tail}}", '{', '}').unwrap();
        let out = render(&tpl, &record, MissingFieldPolicy::SubstituteEmpty).unwrap();
        assert_eq!(out, "Ada-end");
    }
}
