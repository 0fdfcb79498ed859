use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;




// ============================================================================
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    B(bool),
    I(i64),
    F(f64),
    S(String),
}

impl From<bool> for Value { fn from(a: bool) -> Self { Value::B(a) } }
impl From<i64>  for Value { fn from(a: i64)  -> Self { Value::I(a) } }
impl From<f64>  for Value { fn from(a: f64)  -> Self { Value::F(a) } }
impl From<&str> for Value { fn from(a: &str) -> Self { Value::S(a.into()) } }

impl Value {
    pub fn same_kind_as(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
    pub fn as_bool  (&self) -> Option<bool>   { match self { Value::B(x) => Some(*x), _ => None } }
    pub fn as_int   (&self) -> Option<i64>    { match self { Value::I(x) => Some(*x), _ => None } }
    pub fn as_float (&self) -> Option<f64>    { match self { Value::F(x) => Some(*x), _ => None } }
    pub fn as_string(&self) -> Option<String> { match self { Value::S(x) => Some(x.clone()), _ => None } }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::B(x) => x.fmt(f),
            Value::I(x) => x.fmt(f),
            Value::F(x) => x.fmt(f),
            Value::S(x) => x.fmt(f),
        }
    }
}




// ============================================================================
#[derive(Clone, Debug)]
pub struct Parameter {
    pub value: Value,
    pub about: String,
}




// ============================================================================
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config key '{key}' {why}")]
    Key { key: String, why: String },

    #[error("could not read config file {path}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn new(key: &str, why: &str) -> ConfigError {
        ConfigError::Key{key: key.into(), why: why.into()}
    }
}




// ============================================================================
/**
 * A set of named model parameters, each with a default value that fixes its
 * type, and an about message. Values are overridden by merging in string
 * maps, e.g. from command line key=value pairs or a parameter file; the merge
 * fails on unknown keys and on values that do not parse as the declared
 * type.
 */
#[derive(Clone, Debug, Default)]
pub struct Form {
    parameter_map: BTreeMap<String, Parameter>
}




// ============================================================================
impl Form {
    pub fn new() -> Form {
        Form{parameter_map: BTreeMap::new()}
    }

    pub fn item<T: Into<Value>>(&self, key: &str, default: T, about: &str) -> Self {
        let mut parameter_map = self.parameter_map.clone();
        parameter_map.insert(key.into(), Parameter{value: default.into(), about: about.into()});
        Form{parameter_map}
    }

    pub fn merge_string_map(&self, dict: HashMap<String, String>) -> Result<Self, ConfigError> {
        use Value::*;
        let mut parameter_map = self.parameter_map.clone();
        for (k, v) in &dict {
            let parameter = self.parameter_map.get(k).ok_or_else(|| ConfigError::new(k, "is not a valid key"))?;
            let new_value = match parameter.value {
                B(_) => v.parse().map(B).map_err(|_| ConfigError::new(k, "is a badly formed bool")),
                I(_) => v.parse().map(I).map_err(|_| ConfigError::new(k, "is a badly formed int")),
                F(_) => v.parse().map(F).map_err(|_| ConfigError::new(k, "is a badly formed float")),
                S(_) => Ok(S(v.clone())),
            }?;
            parameter_map.entry(k.into()).and_modify(|p| p.value = new_value);
        }
        Ok(Form{parameter_map})
    }

    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        self.parameter_map
            .get(key)
            .map(|p| &p.value)
            .ok_or_else(|| ConfigError::new(key, "is not a valid key"))
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        self.get(key)?.as_bool().ok_or_else(|| ConfigError::new(key, "is not a bool"))
    }

    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        self.get(key)?.as_int().ok_or_else(|| ConfigError::new(key, "is not an int"))
    }

    pub fn get_float(&self, key: &str) -> Result<f64, ConfigError> {
        self.get(key)?.as_float().ok_or_else(|| ConfigError::new(key, "is not a float"))
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)?.as_string().ok_or_else(|| ConfigError::new(key, "is not a string"))
    }
}




// ============================================================================
impl<'a> IntoIterator for &'a Form {
    type Item     = <&'a BTreeMap<String, Parameter> as IntoIterator>::Item;
    type IntoIter = <&'a BTreeMap<String, Parameter> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.parameter_map.iter()
    }
}




// ============================================================================
pub fn to_string_map_from_key_val_pairs<T: Iterator<Item=String>>(args: T) -> Result<HashMap<String, String>, ConfigError> {

    fn left_and_right_hand_side(a: &str) -> Result<(&str, &str), ConfigError> {
        let lr: Vec<&str> = a.split('=').collect();
        if lr.len() != 2 {
            Err(ConfigError::new(a, "is a badly formed argument"))
        } else {
            Ok((lr[0].trim(), lr[1].trim()))
        }
    }

    let mut result = HashMap::new();
    for arg in args {
        let (key, value) = left_and_right_hand_side(&arg)?;
        if result.contains_key(key) {
            return Err(ConfigError::new(key, "duplicate parameter"));
        }
        result.insert(key.to_string(), value.to_string());
    }
    Ok(result)
}




// ============================================================================
/**
 * Read key=value pairs from a parameter file, one per line. Blank lines and
 * lines starting with '#' are skipped.
 */
pub fn to_string_map_from_file<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::File{path: path.display().to_string(), source})?;
    to_string_map_from_key_val_pairs(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from))
}
