//! Typed description of the properties of an avatar style
//!
//! A style ships a JSON schema listing its customizable properties along with
//! their defaults. The schema is turned once into a [`StyleSchema`] whose
//! properties keep the order in which they were declared, that order drives
//! the sequence of random draws during synthesis.
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::AvatarError;

/// suffix of the properties that control whether a feature is applied or not
pub const PROBABILITY_SUFFIX: &str = "Probability";

/// probability used when a probability property has no numeric default
pub const DEFAULT_PROBABILITY: f64 = 50.0;

/// the probability property paired with a list property, e.g. `headProbability` for `head`
#[derive(Debug, Clone, PartialEq)]
pub struct PairedProbability {
    pub name: String,
    /// in percent
    pub default: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// any default that is not a list, there is no way to synthesize these
    Scalar { default: Value },
    /// an ordered list of candidate values, one of which will be picked
    List {
        candidates: Vec<Value>,
        probability: Option<PairedProbability>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleSchema {
    pub title: Option<String>,
    properties: Vec<(String, Property)>,
}

impl StyleSchema {
    /// builds the schema from its JSON representation
    ///
    /// - every property whose name ends with [`PROBABILITY_SUFFIX`] is folded
    ///   into the property it refers to, if any, and dropped otherwise
    /// - every other property is a [`Property::List`] if its default is an
    ///   array and a [`Property::Scalar`] otherwise
    ///
    /// invalid JSON gives an [`AvatarError::Json`], valid JSON that does not
    /// look like a schema gives an [`AvatarError::InvalidSchema`].
    pub fn from_json(json: &str) -> Result<Self, AvatarError> {
        let document: Value = serde_json::from_str(json)?;
        let document = document.as_object().ok_or_else(|| {
            AvatarError::InvalidSchema(format!("schema should be an object, found {}", document))
        })?;
        let raw_properties: &Map<String, Value> = match document.get("properties") {
            Some(Value::Object(properties)) => properties,
            Some(other) => {
                return Err(AvatarError::InvalidSchema(format!(
                    "`properties` should be an object, found {}",
                    other
                )))
            }
            None => return Err(AvatarError::InvalidSchema("missing `properties`".to_string())),
        };
        let title = match document.get("title") {
            None | Some(Value::Null) => None,
            Some(Value::String(title)) => Some(title.clone()),
            Some(other) => {
                return Err(AvatarError::InvalidSchema(format!(
                    "`title` should be a string, found {}",
                    other
                )))
            }
        };

        let mut properties = vec![];
        for (name, definition) in raw_properties {
            if !definition.is_object() {
                return Err(AvatarError::InvalidSchema(format!(
                    "property `{}` should be an object, found {}",
                    name, definition
                )));
            }

            if name.ends_with(PROBABILITY_SUFFIX) {
                continue;
            }

            let property = match definition.get("default") {
                Some(Value::Array(candidates)) => {
                    let probability_name = format!("{}{}", name, PROBABILITY_SUFFIX);
                    let probability =
                        raw_properties
                            .get(&probability_name)
                            .map(|p| PairedProbability {
                                name: probability_name.clone(),
                                default: p
                                    .get("default")
                                    .and_then(Value::as_f64)
                                    .unwrap_or(DEFAULT_PROBABILITY),
                            });
                    Property::List {
                        candidates: candidates.clone(),
                        probability,
                    }
                }
                default => Property::Scalar {
                    default: default.cloned().unwrap_or(Value::Null),
                },
            };

            debug!("schema property `{}`: {:?}", name, property);
            properties.push((name.clone(), property));
        }

        Ok(Self { title, properties })
    }

    /// the properties, in declaration order, without the probability ones
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.properties.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
