//! Peeps, a simple hand-drawn-like bust
//!
//! The schema of the style is embedded from `styles/peeps.json`. All the
//! shapes are drawn in the `100 x 100` view box of [`Avatar`], roughly:
//! hair behind the head, the body, the head, hair in front of it, then the
//! face and whatever covers it.
use serde_json::Value;
use tracing::debug;

use super::Style;
use crate::{
    avatar::{Avatar, Color, Shape},
    error::AvatarError,
    options::Options,
    prng::SeededPrng,
    schema::StyleSchema,
};

const SCHEMA: &str = include_str!("../../styles/peeps.json");

const INK: Color = Color::rgb(0x1f, 0x1f, 0x1f);
const TONGUE: Color = Color::rgb(0xe5, 0x73, 0x73);
const LENS: Color = Color::rgba(0xff, 0xff, 0xff, 0x40);
const MASK: Color = Color::rgb(0xd6, 0xe8, 0xf2);

const SKIN: Color = Color::rgb(0xff, 0xdb, 0xb4);
const HAIR: Color = Color::rgb(0x2c, 0x1b, 0x18);
const CLOTHING: Color = Color::rgb(0x8f, 0xa7, 0xdf);

fn circle(cx: f64, cy: f64, r: f64, fill: Color) -> Shape {
    Shape::Circle { cx, cy, r, fill }
}

fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64, fill: Color) -> Shape {
    Shape::Ellipse {
        cx,
        cy,
        rx,
        ry,
        fill,
    }
}

fn rect(x: f64, y: f64, width: f64, height: f64, radius: f64, fill: Color) -> Shape {
    Shape::Rect {
        x,
        y,
        width,
        height,
        radius,
        fill,
    }
}

fn polygon(points: &[(f64, f64)], fill: Color) -> Shape {
    Shape::Polygon {
        points: points.to_vec(),
        fill,
    }
}

/// reads the options the way the style expects them
struct Resolver<'a> {
    seed: &'a str,
    options: &'a Options,
    prng: SeededPrng,
}

impl<'a> Resolver<'a> {
    fn error(&self, reason: String) -> AvatarError {
        AvatarError::Render {
            seed: self.seed.to_string(),
            reason,
        }
    }

    fn value(&mut self, name: &str) -> Result<Option<&'a str>, AvatarError> {
        let options = self.options;
        match options.resolve(name, &mut self.prng) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(value) => Err(self.error(format!(
                "`{}` should be a string, found {}",
                name, value
            ))),
        }
    }

    fn color(&mut self, name: &str, fallback: Color) -> Result<Color, AvatarError> {
        match self.value(name)? {
            None => Ok(fallback),
            Some(hex) => Color::from_hex(hex)
                .ok_or_else(|| self.error(format!("`{}` is not a valid color: {:?}", name, hex))),
        }
    }

    fn unknown(&self, name: &str, value: &str) -> AvatarError {
        self.error(format!("unknown `{}`: {:?}", name, value))
    }
}

/// the _Peeps_ avatar style
#[derive(Debug, Clone)]
pub struct Peeps {
    schema: StyleSchema,
}

impl Peeps {
    /// the style with its embedded schema
    pub fn new() -> Result<Self, AvatarError> {
        Ok(Self::with_schema(StyleSchema::from_json(SCHEMA)?))
    }

    /// the style with another schema, e.g. one that narrows down the candidates
    pub fn with_schema(schema: StyleSchema) -> Self {
        Self { schema }
    }
}

impl Style for Peeps {
    fn schema(&self) -> &StyleSchema {
        &self.schema
    }

    fn render(&self, options: &Options) -> Result<Avatar, AvatarError> {
        let seed = options.seed().ok_or_else(|| AvatarError::Render {
            seed: String::new(),
            reason: "missing seed".to_string(),
        })?;
        let mut resolver = Resolver {
            seed,
            options,
            prng: SeededPrng::new(seed),
        };
        let size = options
            .size()
            .and_then(|s| u32::try_from(s).ok())
            .ok_or_else(|| resolver.error("missing or invalid size".to_string()))?;

        let background = resolver.value("backgroundColor")?;
        let skin = resolver.color("skinColor", SKIN)?;
        let hair = resolver.color("hairColor", HAIR)?;
        let clothing = resolver.color("clothingColor", CLOTHING)?;
        let head = resolver.value("head")?;
        let face = resolver.value("face")?;
        let facial_hair = resolver.value("facialHair")?;
        let accessories = resolver.value("accessories")?;
        let mask = resolver.value("mask")?;
        debug!(
            "rendering peep {}: head {:?}, face {:?}, facial hair {:?}, accessories {:?}, mask {:?}",
            seed, head, face, facial_hair, accessories, mask
        );

        let mut avatar = Avatar::new(size);
        avatar.background = match background {
            Some(hex) => Some(Color::from_hex(hex).ok_or_else(|| {
                resolver.error(format!("`backgroundColor` is not a valid color: {:?}", hex))
            })?),
            None => None,
        };

        // behind the head
        match head {
            Some("long") => {
                avatar.push(rect(25.0, 28.0, 50.0, 52.0, 12.0, hair));
            }
            Some("bun") => {
                avatar.push(circle(50.0, 16.0, 11.0, hair));
            }
            Some("afro") => {
                avatar.push(circle(50.0, 36.0, 31.0, hair));
            }
            _ => {}
        }

        avatar
            .push(ellipse(50.0, 100.0, 34.0, 24.0, clothing))
            .push(rect(43.0, 60.0, 14.0, 20.0, 3.0, skin.darken(0.1)))
            .push(circle(28.0, 47.0, 5.0, skin))
            .push(circle(72.0, 47.0, 5.0, skin))
            .push(ellipse(50.0, 45.0, 22.0, 25.0, skin));

        // in front of the head
        match head {
            None | Some("bald") => {}
            Some("short") => {
                avatar.push(ellipse(50.0, 29.0, 23.0, 12.0, hair));
            }
            Some("long") => {
                avatar.push(ellipse(50.0, 28.0, 24.0, 12.0, hair));
            }
            Some("bun") => {
                avatar.push(ellipse(50.0, 29.0, 23.0, 11.0, hair));
            }
            Some("afro") => {
                avatar.push(ellipse(50.0, 27.0, 25.0, 10.0, hair));
            }
            Some("mohawk") => {
                avatar.push(rect(45.0, 8.0, 10.0, 28.0, 4.0, hair));
            }
            Some(other) => return Err(resolver.unknown("head", other)),
        }

        // frames sit below the eyes, dark lenses on top of them
        match accessories {
            Some("glasses") => {
                avatar
                    .push(rect(33.0, 39.0, 16.0, 12.0, 3.0, INK))
                    .push(rect(34.5, 40.5, 13.0, 9.0, 2.0, skin))
                    .push(rect(51.0, 39.0, 16.0, 12.0, 3.0, INK))
                    .push(rect(52.5, 40.5, 13.0, 9.0, 2.0, skin))
                    .push(rect(48.0, 43.0, 4.0, 1.5, 0.0, INK));
            }
            Some("roundGlasses") => {
                avatar
                    .push(circle(41.0, 45.0, 7.5, INK))
                    .push(circle(41.0, 45.0, 6.0, skin))
                    .push(circle(59.0, 45.0, 7.5, INK))
                    .push(circle(59.0, 45.0, 6.0, skin))
                    .push(rect(48.0, 43.5, 4.0, 1.5, 0.0, INK));
            }
            None | Some("sunglasses") | Some("eyepatch") => {}
            Some(other) => return Err(resolver.unknown("accessories", other)),
        }

        match face {
            Some("surprised") => {
                avatar
                    .push(circle(41.0, 45.0, 3.2, INK))
                    .push(circle(59.0, 45.0, 3.2, INK));
            }
            Some("blank") => {
                avatar
                    .push(rect(38.0, 44.5, 6.0, 1.5, 0.75, INK))
                    .push(rect(56.0, 44.5, 6.0, 1.5, 0.75, INK));
            }
            Some("serious") => {
                avatar
                    .push(circle(41.0, 45.0, 2.6, INK))
                    .push(circle(59.0, 45.0, 2.6, INK))
                    .push(polygon(
                        &[
                            (35.0, 37.0),
                            (46.0, 39.0),
                            (46.0, 41.0),
                            (35.0, 39.0),
                        ],
                        INK,
                    ))
                    .push(polygon(
                        &[
                            (54.0, 39.0),
                            (65.0, 37.0),
                            (65.0, 39.0),
                            (54.0, 41.0),
                        ],
                        INK,
                    ));
            }
            _ => {
                avatar
                    .push(circle(41.0, 45.0, 2.6, INK))
                    .push(circle(59.0, 45.0, 2.6, INK));
            }
        }

        match facial_hair {
            None => {}
            Some("beard") => {
                avatar.push(polygon(
                    &[
                        (28.0, 48.0),
                        (35.0, 54.0),
                        (65.0, 54.0),
                        (72.0, 48.0),
                        (70.0, 63.0),
                        (60.0, 73.0),
                        (50.0, 76.0),
                        (40.0, 73.0),
                        (30.0, 63.0),
                    ],
                    hair,
                ));
            }
            Some("moustache") => {
                avatar.push(polygon(
                    &[
                        (41.0, 56.0),
                        (50.0, 53.0),
                        (59.0, 56.0),
                        (56.0, 57.5),
                        (50.0, 55.5),
                        (44.0, 57.5),
                    ],
                    hair,
                ));
            }
            Some("goatee") => {
                avatar.push(ellipse(50.0, 66.0, 6.0, 5.0, hair));
            }
            Some("stubble") => {
                avatar.push(ellipse(
                    50.0,
                    61.0,
                    18.0,
                    10.0,
                    Color::rgba(hair.r, hair.g, hair.b, 0x40),
                ));
            }
            Some(other) => return Err(resolver.unknown("facialHair", other)),
        }

        match face {
            None | Some("blank") => {}
            Some("smile") => {
                avatar
                    .push(ellipse(50.0, 58.0, 7.0, 4.0, INK))
                    .push(ellipse(50.0, 56.0, 7.5, 3.5, skin));
            }
            Some("cheeky") => {
                avatar
                    .push(ellipse(50.0, 58.0, 7.0, 4.0, INK))
                    .push(ellipse(50.0, 56.0, 7.5, 3.5, skin))
                    .push(circle(52.0, 61.0, 2.5, TONGUE));
            }
            Some("calm") => {
                avatar.push(rect(44.0, 58.0, 12.0, 2.0, 1.0, INK));
            }
            Some("serious") => {
                avatar.push(rect(45.0, 59.0, 10.0, 1.6, 0.8, INK));
            }
            Some("surprised") => {
                avatar.push(ellipse(50.0, 60.0, 3.5, 4.5, INK));
            }
            Some(other) => return Err(resolver.unknown("face", other)),
        }

        match mask {
            None => {}
            Some("medical") => {
                avatar
                    .push(rect(28.0, 48.0, 44.0, 1.2, 0.0, MASK.darken(0.2)))
                    .push(rect(31.0, 51.0, 38.0, 17.0, 5.0, MASK));
            }
            Some(other) => return Err(resolver.unknown("mask", other)),
        }

        match accessories {
            Some("sunglasses") => {
                avatar
                    .push(rect(32.0, 40.0, 17.0, 10.0, 4.0, INK))
                    .push(rect(51.0, 40.0, 17.0, 10.0, 4.0, INK))
                    .push(rect(47.0, 42.0, 6.0, 1.5, 0.0, INK))
                    .push(rect(36.0, 41.5, 5.0, 2.0, 1.0, LENS))
                    .push(rect(55.0, 41.5, 5.0, 2.0, 1.0, LENS));
            }
            Some("eyepatch") => {
                avatar
                    .push(polygon(
                        &[
                            (27.0, 36.0),
                            (73.0, 49.0),
                            (73.0, 51.0),
                            (27.0, 38.0),
                        ],
                        INK,
                    ))
                    .push(ellipse(41.0, 45.0, 6.5, 5.5, INK));
            }
            _ => {}
        }

        Ok(avatar)
    }
}
