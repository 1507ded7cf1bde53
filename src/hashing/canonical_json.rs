use serde_json::Value;

/// Forma estable de una configuración de step para su huella: claves de
/// objeto en orden lexicográfico, arrays en su orden, sin espacios.
pub fn to_canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        // Escalares: la salida compacta de serde_json ya es canónica.
        scalar => out.push_str(&scalar.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::to_canonical_json;
    use serde_json::json;

    #[test]
    fn scalar_parameters_render_compact() {
        assert_eq!(to_canonical_json(&json!(null)), "null");
        assert_eq!(to_canonical_json(&json!(false)), "false");
        assert_eq!(to_canonical_json(&json!(100)), "100");
        assert_eq!(to_canonical_json(&json!("vec \"a\"")), "\"vec \\\"a\\\"\"");
    }

    #[test]
    fn query_config_keys_are_ordered_at_every_level() {
        let val = json!({ "k": 10, "field_name": "vec", "nested": { "z": [2, 1], "a": null } });
        assert_eq!(to_canonical_json(&val), "{\"field_name\":\"vec\",\"k\":10,\"nested\":{\"a\":null,\"z\":[2,1]}}");
    }

    #[test]
    fn empty_containers() {
        assert_eq!(to_canonical_json(&json!({ "setup": [], "implicit": {} })), "{\"implicit\":{},\"setup\":[]}");
    }
}
