use serde_json::Value;

/// Read access to a loosely-typed, possibly multi-valued request parameter bag.
pub trait ParamLookup {
    /// First value recorded for `key`.
    fn get(&self, key: &str) -> Option<&str>;

    /// Every value recorded for `key`, in arrival order.
    fn get_all(&self, key: &str) -> Vec<&str>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Ordered key/value pairs, the shape of a decoded query string or form body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Flattens a JSON object body: arrays become repeated keys, nested objects
    /// are kept as JSON text, `null` entries are dropped.
    pub fn from_json(body: &Value) -> Self {
        let mut params = Self::new();
        if let Value::Object(map) = body {
            for (key, value) in map {
                match value {
                    Value::Array(items) => {
                        for item in items {
                            if let Some(text) = scalar_text(item) {
                                params.pairs.push((key.clone(), text));
                            }
                        }
                    }
                    other => {
                        if let Some(text) = scalar_text(other) {
                            params.pairs.push((key.clone(), text));
                        }
                    }
                }
            }
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(if *flag { "1" } else { "0" }.to_string()),
        Value::Number(number) => Some(number.to_string()),
        nested => Some(nested.to_string()),
    }
}

impl ParamLookup for QueryParams {
    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

/// Query-string truthiness: anything except empty, `0`, `false`, `no`, `off`.
pub fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}
