//! The vector representation of a rendered avatar
//!
//! An [`Avatar`] is a flat list of filled shapes drawn in order on top of a
//! background, inside a `100 x 100` view box. It can be turned into SVG markup
//! as is, which is also what gets rasterized by [`crate::encode`].
use std::fmt;

/// width and height of the coordinate system of all the shapes
pub const VIEW_BOX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// parses `rrggbb` or `rrggbbaa`, with or without a leading `#`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if hex.len() == 8 { channel(6)? } else { 255 },
        })
    }

    /// darkens the color by `amount`, between `0.0` and `1.0`
    pub fn darken(self, amount: f64) -> Self {
        let f = |c: u8| (c as f64 * (1.0 - amount.clamp(0.0, 1.0))).round() as u8;
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
            a: self.a,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// a shape, filled with a single [`Color`]
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Color,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        fill: Color,
    },
    /// `radius` rounds the corners
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        fill: Color,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: Color,
    },
}

impl Shape {
    pub fn fill(&self) -> Color {
        match self {
            Shape::Circle { fill, .. }
            | Shape::Ellipse { fill, .. }
            | Shape::Rect { fill, .. }
            | Shape::Polygon { fill, .. } => *fill,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let fill = self.fill();
        match self {
            Shape::Circle { cx, cy, r, .. } => {
                write!(f, r#"<circle cx="{}" cy="{}" r="{}""#, cx, cy, r)?
            }
            Shape::Ellipse { cx, cy, rx, ry, .. } => write!(
                f,
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
                cx, cy, rx, ry
            )?,
            Shape::Rect {
                x,
                y,
                width,
                height,
                radius,
                ..
            } => {
                write!(
                    f,
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    x, y, width, height
                )?;
                if *radius > 0.0 {
                    write!(f, r#" rx="{}""#, radius)?;
                }
            }
            Shape::Polygon { points, .. } => {
                write!(f, r#"<polygon points=""#)?;
                for (i, (x, y)) in points.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{},{}", x, y)?;
                }
                write!(f, "\"")?;
            }
        }
        write!(f, r#" fill="{}""#, fill)?;
        if fill.a < 255 {
            write!(f, r#" fill-opacity="{:.3}""#, fill.a as f64 / 255.0)?;
        }
        write!(f, "/>")
    }
}

/// a rendered avatar, ready to be encoded
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    /// width and height in pixels
    pub size: u32,
    pub background: Option<Color>,
    pub shapes: Vec<Shape>,
}

impl Avatar {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            background: None,
            shapes: vec![],
        }
    }

    pub fn push(&mut self, shape: Shape) -> &mut Self {
        self.shapes.push(shape);
        self
    }

    /// the raw SVG markup of the avatar
    ///
    /// > **Note**
    /// >
    /// > this is the same as the [`fmt::Display`] implementation.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {v} {v}" width="{s}" height="{s}">"#,
            v = VIEW_BOX,
            s = self.size
        )?;
        if let Some(background) = self.background {
            write!(
                f,
                "{}",
                Shape::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: VIEW_BOX,
                    height: VIEW_BOX,
                    radius: 0.0,
                    fill: background,
                }
            )?;
        }
        for shape in &self.shapes {
            write!(f, "{}", shape)?;
        }
        write!(f, "</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::{Avatar, Color, Shape};

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn parse_hex_colors() {
        assert_eq!(Color::from_hex("ff0000"), Some(RED));
        assert_eq!(Color::from_hex("#00ff0080"), Some(Color::rgba(0, 255, 0, 128)));
        assert_eq!(Color::from_hex("fff"), None);
        assert_eq!(Color::from_hex("gg0000"), None);
        assert_eq!(Color::from_hex("ééé"), None);
        assert_eq!(RED.to_string(), "#ff0000");
        assert_eq!(Color::rgb(200, 100, 50).darken(0.5), Color::rgb(100, 50, 25));
    }

    #[test]
    fn svg_markup() {
        let mut avatar = Avatar::new(64);
        avatar.background = Some(Color::rgb(0, 0, 255));
        avatar
            .push(Shape::Circle {
                cx: 50.0,
                cy: 40.0,
                r: 25.5,
                fill: RED,
            })
            .push(Shape::Polygon {
                points: vec![(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)],
                fill: Color::rgba(0, 0, 0, 51),
            });

        assert_eq!(
            avatar.to_svg(),
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" width="64" height="64">"#,
                r##"<rect x="0" y="0" width="100" height="100" fill="#0000ff"/>"##,
                r##"<circle cx="50" cy="40" r="25.5" fill="#ff0000"/>"##,
                r##"<polygon points="0,0 10,0 5,8" fill="#000000" fill-opacity="0.200"/>"##,
                "</svg>",
            )
        );
    }
}
