//! Wire models for the console backend.

use dirview_core::Error;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::Result;

/// Search scope of a directory object query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearchScope {
    /// The named object only.
    Base,
    /// Immediate children of the named object.
    Level,
}

impl SearchScope {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "BASE",
            Self::Level => "LEVEL",
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/get/domainobject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectQuery {
    /// Distinguished name the search starts from.
    pub searchbase: String,
    /// Search scope.
    pub search_scope: SearchScope,
}

impl ObjectQuery {
    /// Query with an explicit scope.
    #[must_use]
    pub fn new(searchbase: impl Into<String>, search_scope: SearchScope) -> Self {
        Self {
            searchbase: searchbase.into(),
            search_scope,
        }
    }

    /// Query for exactly the named object.
    #[must_use]
    pub fn base(searchbase: impl Into<String>) -> Self {
        Self::new(searchbase, SearchScope::Base)
    }

    /// Query for the immediate children of the named object.
    #[must_use]
    pub fn level(searchbase: impl Into<String>) -> Self {
        Self::new(searchbase, SearchScope::Level)
    }
}

/// Response of `GET /api/get/domaininfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainInfo {
    /// Root distinguished name of the domain (e.g. `DC=corp,DC=local`).
    pub root_dn: String,
    /// DNS domain name.
    #[serde(default)]
    pub domain: String,
    /// NetBIOS (flat) domain name.
    #[serde(rename = "flatName", default)]
    pub flat_name: String,
}

/// Value of a directory attribute: one string or an ordered list of strings.
///
/// Non-string JSON scalars are kept as their JSON text and `null` becomes the
/// empty string, so exotic attribute syntaxes never fail a whole object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Single-valued attribute.
    Single(String),
    /// Multi-valued attribute, in server order.
    Multi(Vec<String>),
}

impl AttributeValue {
    /// All values as a slice (a single value is a one-element slice).
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }

    /// Iterates over the values in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.as_slice().iter().map(String::as_str)
    }

    /// First value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.iter().next()
    }

    /// Returns true if any value equals `needle` exactly.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.iter().any(|value| value == needle)
    }

    /// Returns true for sequence values.
    #[must_use]
    pub const fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Multi(items.into_iter().map(scalar_text).collect()),
            other => Self::Single(scalar_text(other)),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multi(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// Attribute map that keeps the order the backend sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, AttributeValue)>);

impl Attributes {
    /// Create an empty attribute map.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Looks up an attribute by exact name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Inserts or replaces an attribute, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(name, _)| *name == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Iterates over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> + '_ {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

impl Serialize for Attributes {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct AttributesVisitor;

impl<'de> Visitor<'de> for AttributesVisitor {
    type Value = Attributes;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of attribute names to values")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut attributes = Attributes::new();
        while let Some((key, value)) = access.next_entry::<String, AttributeValue>()? {
            attributes.insert(key, value);
        }
        Ok(attributes)
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AttributesVisitor)
    }
}

/// A directory object as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryObject {
    /// Distinguished name.
    pub dn: String,
    /// Attributes in server order.
    #[serde(default)]
    pub attributes: Attributes,
}

impl DirectoryObject {
    /// Create an object with the given attributes.
    #[must_use]
    pub fn new(dn: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            dn: dn.into(),
            attributes,
        }
    }

    /// The `name` attribute, if present and non-empty.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attributes
            .get("name")
            .and_then(AttributeValue::first)
            .filter(|name| !name.is_empty())
    }

    /// Display label: `name`, falling back to the DN.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name().unwrap_or(&self.dn)
    }

    /// Returns true if `objectClass` lists the given class.
    #[must_use]
    pub fn has_object_class(&self, class: &str) -> bool {
        self.attributes
            .get("objectClass")
            .is_some_and(|classes| classes.contains(class))
    }
}

/// Normalises a `domainobject` response body into a list of objects.
///
/// The backend answers with an array, a single object, or nothing at all
/// (empty body, `null`, `{}`) when nothing matched.
///
/// # Errors
///
/// Returns [`Error::ParseError`] for invalid JSON or objects that do not decode
/// and [`Error::UnexpectedPayload`] for any other JSON shape.
pub fn parse_object_response(body: &str) -> Result<Vec<DirectoryObject>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(body)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(Error::from))
            .collect(),
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        object @ Value::Object(_) => Ok(vec![serde_json::from_value(object)?]),
        other => Err(Error::UnexpectedPayload(format!(
            "expected an array or object of directory entries, got `{other}`"
        ))),
    }
}

/// Response of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    /// `OK` when the backend's directory connection is up.
    pub status: String,
}

impl ConnectionStatus {
    /// Returns true if the backend reports `OK`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// Severity of a command log entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogType {
    /// `INFO`
    Info,
    /// `WARNING`
    Warning,
    /// `SUCCESS`
    Success,
    /// `ERROR`
    Error,
    /// Anything else, verbatim.
    Other(String),
}

impl LogType {
    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::Other(other) => other,
        }
    }
}

impl Default for LogType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for LogType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "INFO" => Self::Info,
            "WARNING" => Self::Warning,
            "SUCCESS" => Self::Success,
            "ERROR" => Self::Error,
            _ => Self::Other(value),
        }
    }
}

impl From<LogType> for String {
    fn from(value: LogType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Sortable timestamp text.
    #[serde(default)]
    pub timestamp: String,
    /// Severity.
    #[serde(default)]
    pub log_type: LogType,
    /// Logged command / message.
    #[serde(default)]
    pub debug_message: String,
}

impl LogEntry {
    /// Create a log entry.
    #[must_use]
    pub fn new(
        timestamp: impl Into<String>,
        log_type: LogType,
        debug_message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            log_type,
            debug_message: debug_message.into(),
        }
    }
}

/// Response of `GET /api/logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    /// Log entries.
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// Error body the backend attaches to failed requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error.
    #[serde(default)]
    pub error: Option<String>,
}

/// Query parameters for `GET /api/logs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogQuery {
    limit: Option<u32>,
}

impl LogQuery {
    /// All entries.
    #[must_use]
    pub const fn new() -> Self {
        Self { limit: None }
    }

    /// Only the most recent entry.
    #[must_use]
    pub const fn latest() -> Self {
        Self { limit: Some(1) }
    }

    /// Limit the number of entries.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn to_params(self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_query_serializes_uppercase_scope() {
        let query = ObjectQuery::level("DC=corp,DC=local");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"searchbase": "DC=corp,DC=local", "search_scope": "LEVEL"})
        );
    }

    #[test]
    fn attributes_keep_server_order() {
        let object: DirectoryObject = serde_json::from_str(
            r#"{"dn": "CN=x", "attributes": {"zeta": "1", "alpha": ["a", "b"], "mid": 3}}"#,
        )
        .unwrap();

        let keys: Vec<_> = object.attributes.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(object.attributes.get("mid"), Some(&AttributeValue::from("3")));
        assert!(object.attributes.get("alpha").unwrap().is_multi());
    }

    #[test]
    fn non_string_values_are_stringified() {
        let value: AttributeValue = serde_json::from_value(json!([1, true, null, "x"])).unwrap();
        assert_eq!(value.as_slice(), ["1", "true", "", "x"]);
    }

    #[test]
    fn label_falls_back_to_dn() {
        let named = DirectoryObject::new(
            "CN=Users,DC=corp,DC=local",
            [("name", "Users")].into_iter().collect(),
        );
        assert_eq!(named.label(), "Users");

        let empty_name = DirectoryObject::new(
            "CN=Users,DC=corp,DC=local",
            [("name", "")].into_iter().collect(),
        );
        assert_eq!(empty_name.label(), "CN=Users,DC=corp,DC=local");
    }

    #[test]
    fn object_class_matches_whole_values() {
        let object = DirectoryObject::new(
            "CN=Admins,DC=corp,DC=local",
            [("objectClass", vec!["top", "group"])].into_iter().collect(),
        );
        assert!(object.has_object_class("group"));
        assert!(!object.has_object_class("grou"));
    }

    #[test]
    fn parse_object_response_keeps_attribute_order() {
        let body = r#"[
            {"dn": "CN=Admins,DC=corp,DC=local",
             "attributes": {"objectClass": ["top", "group"], "cn": "Admins", "member": [], "adminCount": 1}}
        ]"#;
        let objects = parse_object_response(body).unwrap();
        let keys: Vec<_> = objects[0].attributes.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["objectClass", "cn", "member", "adminCount"]);

        let single = parse_object_response(
            r#"{"dn": "DC=corp,DC=local", "attributes": {"whenCreated": "x", "dc": "corp", "auditingPolicy": "y"}}"#,
        )
        .unwrap();
        let keys: Vec<_> = single[0].attributes.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["whenCreated", "dc", "auditingPolicy"]);
    }

    #[test]
    fn parse_object_response_shapes() {
        assert!(parse_object_response("").unwrap().is_empty());
        assert!(parse_object_response("null").unwrap().is_empty());
        assert!(parse_object_response("{}").unwrap().is_empty());
        assert!(parse_object_response("[]").unwrap().is_empty());

        let single = parse_object_response(r#"{"dn": "DC=corp,DC=local", "attributes": {}}"#)
            .unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].dn, "DC=corp,DC=local");

        let err = parse_object_response("42").unwrap_err();
        assert!(matches!(err, Error::UnexpectedPayload(_)));

        let err = parse_object_response("[{\"attributes\": {}}]").unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[test]
    fn log_type_round_trips_unknown_values() {
        let entry: LogEntry = serde_json::from_value(json!({
            "timestamp": "2024-01-01T00:00:00Z",
            "log_type": "DEBUG",
            "debug_message": "Get-DomainUser"
        }))
        .unwrap();
        assert_eq!(entry.log_type, LogType::Other("DEBUG".to_string()));
        assert_eq!(serde_json::to_value(&entry).unwrap()["log_type"], "DEBUG");

        let known: LogType = serde_json::from_value(json!("WARNING")).unwrap();
        assert_eq!(known, LogType::Warning);
    }

    #[test]
    fn log_entries_tolerate_missing_fields() {
        let response: LogsResponse = serde_json::from_value(json!({"logs": [
            {"timestamp": "2024-05-01 10:00:00", "log_type": "INFO", "debug_message": "Get-DomainUser"},
            {"log_type": "ERROR", "debug_message": "no timestamp"},
            {"timestamp": "2024-05-01 10:00:02", "debug_message": "no type"}
        ]}))
        .unwrap();

        assert_eq!(response.logs.len(), 3);
        assert_eq!(response.logs[1].timestamp, "");
        assert_eq!(response.logs[1].log_type, LogType::Error);
        assert_eq!(response.logs[2].log_type, LogType::Other(String::new()));
    }

    #[test]
    fn log_query_params() {
        assert!(LogQuery::new().to_params().is_empty());
        assert_eq!(LogQuery::latest().to_params(), vec![("limit", "1".to_string())]);
    }

    #[test]
    fn connection_status_ok_is_exact() {
        assert!(ConnectionStatus { status: "OK".into() }.is_ok());
        assert!(!ConnectionStatus { status: "ok".into() }.is_ok());
        assert!(!ConnectionStatus { status: "KO".into() }.is_ok());
    }
}
