//! Synthesize the options of an avatar from a style schema and a seed
//!
//! The options of an avatar are a plain JSON object mapping the name of each
//! property of the style to the values it can take. After synthesis, every
//! list holds at most one value and every probability is either `0` or `100`,
//! so rendering the same options always gives the same avatar.
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    error::AvatarError,
    prng::{Prng, SeededPrng},
    schema::{Property, StyleSchema, PROBABILITY_SUFFIX},
};

/// probability recorded when a feature has been dropped from the avatar
pub const NOT_APPLIED: u8 = 0;
/// probability recorded when a feature has been kept in the avatar
pub const APPLIED: u8 = 100;

/// the options of a single avatar, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options(Map<String, Value>);

impl Options {
    /// starts the options of an avatar with its `seed` and `size`
    pub fn new(seed: &str, size: u32) -> Self {
        let mut map = Map::new();
        map.insert("seed".to_string(), Value::from(seed));
        map.insert("size".to_string(), Value::from(size));
        Self(map)
    }

    pub fn seed(&self) -> Option<&str> {
        self.0.get("seed").and_then(Value::as_str)
    }

    pub fn size(&self) -> Option<u64> {
        self.0.get("size").and_then(Value::as_u64)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: &str, value: Value) -> Option<Value> {
        self.0.insert(name.to_string(), value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// adds all the `other` options, overwriting the ones already there
    pub fn extend(&mut self, other: Options) {
        self.0.extend(other.0);
    }

    /// resolves the value of a list property the way a style reads it
    ///
    /// - if there is a numeric `{name}Probability` option and the `prng` says
    ///   no, the feature is absent
    /// - otherwise one value of the list is picked, if any
    ///
    /// with synthesized options, the probabilities are either `0` or `100`,
    /// which makes the result independent of the `prng`.
    pub fn resolve(&self, name: &str, prng: &mut impl Prng) -> Option<&Value> {
        let probability = self
            .0
            .get(&format!("{}{}", name, PROBABILITY_SUFFIX))
            .and_then(Value::as_f64);
        if let Some(probability) = probability {
            if !prng.bool(probability) {
                return None;
            }
        }

        match self.0.get(name) {
            Some(Value::Array(values)) => prng.pick(values),
            _ => None,
        }
    }

    /// the content of the `.json` file that accompanies each avatar
    pub fn to_json_pretty(&self) -> Result<String, AvatarError> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// synthesizes the options of an avatar from its `seed`
///
/// > **Note**
/// >
/// > this is a wrapper around [`synthesize_with`] with a fresh [`SeededPrng`].
pub fn synthesize(schema: &StyleSchema, seed: &str) -> Result<Options, AvatarError> {
    synthesize_with(schema, &mut SeededPrng::new(seed))
}

/// synthesizes options by walking the `schema` in declaration order
///
/// - a [`Property::Scalar`] is an error
/// - a [`Property::List`] gets exactly one of its candidates, picked with `prng`
/// - if the list is paired with a probability, a boolean is drawn with it:
///   `true` empties the list and records [`NOT_APPLIED`] as the probability,
///   `false` records [`APPLIED`]
pub fn synthesize_with(
    schema: &StyleSchema,
    prng: &mut impl Prng,
) -> Result<Options, AvatarError> {
    let mut options = Options::default();

    for (name, property) in schema.properties() {
        let (candidates, probability) = match property {
            Property::List {
                candidates,
                probability,
            } => (candidates, probability),
            Property::Scalar { .. } => {
                return Err(AvatarError::UnsupportedProperty(name.to_string()))
            }
        };

        let picked = prng
            .pick(candidates)
            .ok_or_else(|| AvatarError::EmptyCandidates(name.to_string()))?
            .clone();
        options.insert(name, Value::Array(vec![picked]));

        if let Some(probability) = probability {
            if prng.bool(probability.default) {
                options.insert(&probability.name, Value::from(NOT_APPLIED));
                options.insert(name, Value::Array(vec![]));
            } else {
                options.insert(&probability.name, Value::from(APPLIED));
            }
        }

        debug!("option `{}`: {}", name, options.0[name]);
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use serde_json::{json, Value};

    use super::{synthesize, synthesize_with, Options, APPLIED, NOT_APPLIED};
    use crate::{
        error::AvatarError,
        prng::SeededPrng,
        schema::{Property, StyleSchema},
    };

    fn schema() -> StyleSchema {
        StyleSchema::from_json(
            &json!({
                "properties": {
                    "head": { "default": ["bald", "short", "long"] },
                    "headProbability": { "default": 80 },
                    "face": { "default": ["smile", "calm"] },
                    "accessories": { "default": ["glasses", "eyepatch"] },
                    "accessoriesProbability": { "default": "sometimes" }
                }
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn deterministic() {
        let schema = schema();
        for i in 0..50 {
            let seed = i.to_string();
            let a = synthesize(&schema, &seed).unwrap();
            let b = synthesize(&schema, &seed).unwrap();
            assert_eq!(a, b, "seed {}", seed);
            assert_eq!(a.to_json_pretty().unwrap(), b.to_json_pretty().unwrap());
        }
    }

    #[test]
    fn complete() {
        let schema = schema();
        let options = synthesize(&schema, "0").unwrap();
        for (name, _) in schema.properties() {
            let value = options.get(name).unwrap();
            let len = value.as_array().unwrap().len();
            assert!(len <= 1, "`{}` has {} values", name, len);
        }
        let keys: Vec<&str> = options.keys().collect();
        assert_eq!(
            keys,
            vec![
                "head",
                "headProbability",
                "face",
                "accessories",
                "accessoriesProbability"
            ]
        );
    }

    #[test]
    fn probabilities_are_consistent() {
        let schema = schema();
        let (mut applied, mut not_applied) = (0, 0);
        for i in 0..1_000 {
            let options = synthesize(&schema, &i.to_string()).unwrap();
            for (name, property) in schema.properties() {
                let (candidates, probability) = match property {
                    Property::List {
                        candidates,
                        probability: Some(probability),
                    } => (candidates, probability),
                    _ => continue,
                };
                let values = options.get(name).unwrap().as_array().unwrap();
                match options.get(&probability.name).and_then(Value::as_u64) {
                    Some(p) if p == NOT_APPLIED as u64 => {
                        assert!(values.is_empty());
                        if name == "head" {
                            not_applied += 1;
                        }
                    }
                    Some(p) if p == APPLIED as u64 => {
                        assert_eq!(values.len(), 1);
                        assert!(candidates.contains(&values[0]));
                        if name == "head" {
                            applied += 1;
                        }
                    }
                    p => panic!("unexpected probability {:?} for `{}`", p, name),
                }
            }
        }

        // the head is dropped about 80% of the time
        assert!((700..900).contains(&not_applied), "{}", not_applied);
        assert_eq!(applied + not_applied, 1_000);
    }

    #[test]
    fn scalars_are_unsupported() {
        let schema = StyleSchema::from_json(
            r#"{ "properties": { "face": { "default": ["smile"] }, "flip": { "default": true } } }"#,
        )
        .unwrap();
        match synthesize(&schema, "0") {
            Err(AvatarError::UnsupportedProperty(name)) => assert_eq!(name, "flip"),
            other => panic!("expected an unsupported property, found {:?}", other),
        }
    }

    #[test]
    fn empty_candidates() {
        let schema =
            StyleSchema::from_json(r#"{ "properties": { "face": { "default": [] } } }"#).unwrap();
        assert!(matches!(
            synthesize(&schema, "0"),
            Err(AvatarError::EmptyCandidates(name)) if name == "face"
        ));
    }

    #[test]
    fn replayed_draws() {
        let schema = schema();

        // always the first candidate and always `true`: every feature with a probability is dropped
        let options = synthesize_with(&schema, &mut StepRng::new(0x8000_0000, 0)).unwrap();
        assert_eq!(options.get("head"), Some(&json!([])));
        assert_eq!(options.get("headProbability"), Some(&json!(0)));
        assert_eq!(options.get("face"), Some(&json!(["smile"])));
        assert_eq!(options.get("accessories"), Some(&json!([])));
        assert_eq!(options.get("accessoriesProbability"), Some(&json!(0)));

        // always the last candidate and always `false`: every feature is kept
        let options = synthesize_with(&schema, &mut StepRng::new(0x7fff_ffff, 0)).unwrap();
        assert_eq!(options.get("head"), Some(&json!(["long"])));
        assert_eq!(options.get("headProbability"), Some(&json!(100)));
        assert_eq!(options.get("face"), Some(&json!(["calm"])));
        assert_eq!(options.get("accessories"), Some(&json!(["eyepatch"])));
        assert_eq!(options.get("accessoriesProbability"), Some(&json!(100)));
    }

    #[test]
    fn seed_and_size_come_first() {
        let mut options = Options::new("7", 200);
        options.extend(synthesize(&schema(), "7").unwrap());

        assert_eq!(options.seed(), Some("7"));
        assert_eq!(options.size(), Some(200));
        let keys: Vec<&str> = options.keys().take(3).collect();
        assert_eq!(keys, vec!["seed", "size", "head"]);

        let json = options.to_json_pretty().unwrap();
        assert!(json.starts_with("{\n  \"seed\": \"7\",\n  \"size\": 200,"));
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["seed"], json!("7"));
        assert_eq!(parsed["size"], json!(200));
    }

    #[test]
    fn resolve_follows_the_sentinel() {
        let options = Options::from(
            json!({
                "head": [],
                "headProbability": 0,
                "face": ["calm"],
                "faceProbability": 100,
                "eyes": ["open"],
                "mouth": []
            })
            .as_object()
            .unwrap()
            .clone(),
        );

        let mut prng = SeededPrng::new("resolve");
        assert_eq!(options.resolve("head", &mut prng), None);
        assert_eq!(options.resolve("face", &mut prng), Some(&json!("calm")));
        assert_eq!(options.resolve("eyes", &mut prng), Some(&json!("open")));
        assert_eq!(options.resolve("mouth", &mut prng), None);
        assert_eq!(options.resolve("nose", &mut prng), None);
    }
}
