use serde_json::Value;

/// Resolve a dotted path against a JSON document.
///
/// Segments are object keys, `[n]` array indices (chainable, and allowed at
/// the start of the path for top-level arrays) or `len()` for the length of
/// an array, object or string. Missing keys resolve to `Value::Null`.
pub fn resolve_path(root: &Value, path: &str) -> Value {
    let mut current = root.clone();
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        if segment == "len()" {
            let len = match &current {
                Value::Array(a) => a.len(),
                Value::Object(o) => o.len(),
                Value::String(s) => s.chars().count(),
                other => panic!("len() applied to non-collection {other} in path \"{path}\""),
            };
            current = Value::from(len);
            continue;
        }

        let (field, mut indices) = match segment.find('[') {
            Some(pos) => (&segment[..pos], &segment[pos..]),
            None => (segment, ""),
        };
        if !field.is_empty() {
            current = current.get(field).cloned().unwrap_or(Value::Null);
        }
        while let Some(rest) = indices.strip_prefix('[') {
            let end = rest
                .find(']')
                .unwrap_or_else(|| panic!("unclosed bracket in path \"{path}\""));
            let index: usize = rest[..end]
                .parse()
                .unwrap_or_else(|_| panic!("non-numeric index in path \"{path}\""));
            current = current.get(index).cloned().unwrap_or(Value::Null);
            indices = &rest[end + 1..];
        }
    }
    current
}
