//! Lookup of a value inside an arbitrary JSON tree by a dotted path.
//!
//! Segments are separated by `.`. A segment is either an object key, a bare
//! array index (`data.0.embedding`), or a key followed by one or more bracket
//! indices (`data[0].embedding`, `grid[1][2]`). A numeric segment applied to an
//! object is treated as a key.

use serde_json::Value;

#[derive(Debug, PartialEq, Eq)]
enum Step<'p> {
    Key(&'p str),
    Index(usize),
}

fn parse_segment(segment: &str) -> Option<Vec<Step<'_>>> {
    let Some(open) = segment.find('[') else {
        return Some(vec![Step::Key(segment)]);
    };

    let mut steps = Vec::new();
    let key = &segment[..open];
    if !key.is_empty() {
        steps.push(Step::Key(key));
    }

    let mut rest = &segment[open..];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        let index = inner[..close].trim().parse::<usize>().ok()?;
        steps.push(Step::Index(index));
        rest = &inner[close + 1..];
    }
    Some(steps)
}

fn apply<'a>(value: &'a Value, step: &Step<'_>) -> Option<&'a Value> {
    match (value, step) {
        (Value::Object(map), Step::Key(key)) => map.get(*key),
        (Value::Object(map), Step::Index(index)) => map.get(&index.to_string()),
        (Value::Array(items), Step::Key(key)) => {
            let index = key.parse::<usize>().ok()?;
            items.get(index)
        }
        (Value::Array(items), Step::Index(index)) => items.get(*index),
        _ => None,
    }
}

/// Resolve `path` against `value`. Returns `None` for an empty path, a
/// malformed segment, or any step that does not exist.
pub fn resolve<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    let mut current = value;
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }
        for step in parse_segment(segment)? {
            current = apply(current, &step)?;
        }
    }
    Some(current)
}

/// Resolve `path` and return it as a string slice when it is a JSON string.
pub fn resolve_str<'a>(value: &'a Value, path: &str) -> Option<&'a str> {
    resolve(value, path).and_then(Value::as_str)
}
