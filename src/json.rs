//! Facade over `serde_json` for the dynamic header / grant objects.
//!
//! Objects are `serde_json::Map`s; with the crate's default `BTreeMap`
//! backing, iteration and serialization visit keys in byte-lexicographic
//! order at every nesting level, which is what makes token emission
//! deterministic. Compact dumps carry no insignificant whitespace; pretty
//! dumps indent four spaces.

use serde::{
    de::{Error as DeError, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use serde_json::{ser::PrettyFormatter, Map, Serializer, Value};

use core::fmt;

use crate::Error;

/// JSON object keyed by strings, as used for headers, grants and required
/// grants.
pub(crate) type JsonObject = Map<String, Value>;

/// Parses a JSON object, tolerating repeated keys (the last occurrence wins).
pub(crate) fn parse_object(bytes: &[u8]) -> Result<JsonObject, Error> {
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(object)) => Ok(object),
        _ => Err(Error::Invalid),
    }
}

/// Parses a JSON object, rejecting repeated keys and non-object roots.
pub(crate) fn parse_object_strict(text: &str) -> Result<JsonObject, Error> {
    serde_json::from_str::<StrictObject>(text)
        .map(|object| object.0)
        .map_err(|_| Error::Invalid)
}

struct StrictObject(JsonObject);

impl<'de> Deserialize<'de> for StrictObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ObjectVisitor;

        impl<'de> Visitor<'de> for ObjectVisitor {
            type Value = JsonObject;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a JSON object without repeated keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut object = JsonObject::new();
                while let Some((name, value)) = access.next_entry::<String, Value>()? {
                    if object.contains_key(&name) {
                        return Err(DeError::custom(format_args!("repeated key `{name}`")));
                    }
                    object.insert(name, value);
                }
                Ok(object)
            }
        }

        deserializer.deserialize_map(ObjectVisitor).map(Self)
    }
}

/// Serializes any JSON value with sorted keys and no insignificant
/// whitespace.
pub(crate) fn dump_compact(value: &Value) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|_| Error::Invalid)
}

/// Serializes an object with sorted keys and no insignificant whitespace.
pub(crate) fn dump_object_compact(object: &JsonObject) -> Result<String, Error> {
    serde_json::to_string(object).map_err(|_| Error::Invalid)
}

/// Serializes an object with sorted keys and four-space indentation.
pub(crate) fn dump_object_pretty(object: &JsonObject) -> Result<String, Error> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    object.serialize(&mut serializer).map_err(|_| Error::Invalid)?;
    String::from_utf8(buffer).map_err(|_| Error::Invalid)
}

/// Looks up a string value. `None` if the key is missing or holds a
/// different kind.
pub(crate) fn str_value<'a>(object: &'a JsonObject, name: &str) -> Option<&'a str> {
    object.get(name)?.as_str()
}

/// Looks up an integer value. `None` if the key is missing or holds a
/// different kind.
pub(crate) fn int_value(object: &JsonObject, name: &str) -> Option<i64> {
    object.get(name)?.as_i64()
}

fn check_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        Err(Error::Invalid)
    } else {
        Ok(())
    }
}

/// Inserts an entry, failing with [`Error::Exists`] if the name is taken
/// (regardless of the existing value's kind). The object is untouched on
/// failure.
pub(crate) fn add_entry(object: &mut JsonObject, name: &str, value: Value) -> Result<(), Error> {
    check_name(name)?;
    if object.contains_key(name) {
        return Err(Error::Exists);
    }
    object.insert(name.to_owned(), value);
    Ok(())
}

/// Parses `blob` strictly and merges its entries into `object`, overwriting
/// entries with matching names.
pub(crate) fn merge_str(object: &mut JsonObject, blob: &str) -> Result<(), Error> {
    let parsed = parse_object_strict(blob)?;
    for (name, value) in parsed {
        object.insert(name, value);
    }
    Ok(())
}

/// Typed string lookup with the accessor error contract.
pub(crate) fn entry_str<'a>(object: &'a JsonObject, name: &str) -> Result<&'a str, Error> {
    check_name(name)?;
    match object.get(name) {
        None => Err(Error::NotPresent),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(Error::Invalid),
    }
}

/// Typed integer lookup with the accessor error contract.
pub(crate) fn entry_int(object: &JsonObject, name: &str) -> Result<i64, Error> {
    check_name(name)?;
    match object.get(name) {
        None => Err(Error::NotPresent),
        Some(value) => value.as_i64().ok_or(Error::Invalid),
    }
}

/// Typed boolean lookup with the accessor error contract.
pub(crate) fn entry_bool(object: &JsonObject, name: &str) -> Result<bool, Error> {
    check_name(name)?;
    match object.get(name) {
        None => Err(Error::NotPresent),
        Some(Value::Bool(value)) => Ok(*value),
        Some(_) => Err(Error::Invalid),
    }
}

/// Dumps the named subtree (any value kind), or the whole object when `name`
/// is absent or empty.
pub(crate) fn dump_entry(object: &JsonObject, name: Option<&str>) -> Result<String, Error> {
    match name {
        Some(name) if !name.is_empty() => {
            let value = object.get(name).ok_or(Error::NotPresent)?;
            dump_compact(value)
        }
        _ => dump_object_compact(object),
    }
}

/// Removes the named entry, or clears the object when `name` is absent or
/// empty.
pub(crate) fn remove_entry(object: &mut JsonObject, name: Option<&str>) {
    match name {
        Some(name) if !name.is_empty() => {
            object.remove(name);
        }
        _ => object.clear(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_object() -> JsonObject {
        parse_object(br#"{"zeta": 1, "alpha": {"b": 2, "a": [1, "x"]}}"#).unwrap()
    }

    #[test]
    fn compact_dump_sorts_keys_at_every_level() {
        let object = sample_object();
        assert_eq!(
            dump_object_compact(&object).unwrap(),
            r#"{"alpha":{"a":[1,"x"],"b":2},"zeta":1}"#
        );
    }

    #[test]
    fn pretty_dump_indents_four_spaces() {
        let object = parse_object(br#"{"alg": "none"}"#).unwrap();
        assert_eq!(
            dump_object_pretty(&object).unwrap(),
            "{\n    \"alg\": \"none\"\n}"
        );
    }

    #[test]
    fn strict_parse_rejects_repeated_keys() {
        assert_eq!(
            parse_object_strict(r#"{"a": 1, "a": 2}"#).unwrap_err(),
            Error::Invalid
        );
        // Lenient parsing keeps the last occurrence instead.
        let object = parse_object(br#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(object["a"], Value::from(2));
    }

    #[test]
    fn strict_parse_rejects_non_objects() {
        assert_eq!(parse_object_strict("[1, 2]").unwrap_err(), Error::Invalid);
        assert_eq!(parse_object_strict("42").unwrap_err(), Error::Invalid);
        assert_eq!(parse_object(b"[1, 2]").unwrap_err(), Error::Invalid);
    }

    #[test]
    fn add_entry_rejects_any_existing_kind() {
        let mut object = JsonObject::new();
        add_entry(&mut object, "x", Value::from("text")).unwrap();
        assert_eq!(
            add_entry(&mut object, "x", Value::from(1)).unwrap_err(),
            Error::Exists
        );
        assert_eq!(object["x"], Value::from("text"));
    }

    #[test]
    fn typed_lookups() {
        let object = parse_object(br#"{"s": "v", "i": 7, "b": true}"#).unwrap();
        assert_eq!(entry_str(&object, "s").unwrap(), "v");
        assert_eq!(entry_int(&object, "i").unwrap(), 7);
        assert!(entry_bool(&object, "b").unwrap());

        assert_eq!(entry_str(&object, "missing").unwrap_err(), Error::NotPresent);
        assert_eq!(entry_str(&object, "i").unwrap_err(), Error::Invalid);
        assert_eq!(entry_int(&object, "s").unwrap_err(), Error::Invalid);
        assert_eq!(entry_str(&object, "").unwrap_err(), Error::Invalid);
    }

    #[test]
    fn dump_entry_accepts_any_root() {
        let object = sample_object();
        assert_eq!(dump_entry(&object, Some("zeta")).unwrap(), "1");
        assert_eq!(
            dump_entry(&object, Some("alpha")).unwrap(),
            r#"{"a":[1,"x"],"b":2}"#
        );
        assert_eq!(
            dump_entry(&object, None).unwrap(),
            dump_entry(&object, Some("")).unwrap()
        );
        assert_eq!(
            dump_entry(&object, Some("missing")).unwrap_err(),
            Error::NotPresent
        );
    }

    #[test]
    fn remove_entry_clears_on_empty_name() {
        let mut object = sample_object();
        remove_entry(&mut object, Some("zeta"));
        assert!(!object.contains_key("zeta"));
        remove_entry(&mut object, None);
        assert!(object.is_empty());
    }
}
