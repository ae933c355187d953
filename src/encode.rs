//! Encode rendered avatars into image files
//!
//! The configured format string selects the encoder:
//! - `png` rasterizes the SVG markup and encodes it as PNG
//! - `jpg` and `jpeg` rasterize the SVG markup and encode it as JPEG
//! - anything else keeps the raw SVG markup untouched
use std::{fmt, str::FromStr};

use image::{
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
    ExtendedColorType, ImageEncoder,
};
use resvg::{
    tiny_skia::{self, Pixmap, Transform},
    usvg::{self, Tree},
};
use tracing::debug;

use crate::{avatar::Avatar, error::AvatarError};

/// quality of the JPEG encoder, between `1` and `100`
pub const JPEG_QUALITY: u8 = 80;

/// JPEG has no alpha channel, transparent pixels are flattened onto this color
pub const JPEG_BACKGROUND: tiny_skia::Color = tiny_skia::Color::WHITE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    Png,
    /// `extension` is either `jpg` or `jpeg`
    Jpeg { extension: String },
    /// the avatar is written as is, with any `extension`
    Raw { extension: String },
}

impl Format {
    /// the extension of the files, i.e. the format string it has been parsed from
    pub fn extension(&self) -> &str {
        match self {
            Format::Png => "png",
            Format::Jpeg { extension } | Format::Raw { extension } => extension,
        }
    }
}

impl FromStr for Format {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "png" => Format::Png,
            "jpg" | "jpeg" => Format::Jpeg {
                extension: s.to_string(),
            },
            _ => Format::Raw {
                extension: s.to_string(),
            },
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// parses the SVG `markup` and draws it into a `size x size` pixmap
///
/// the pixmap is first filled with `background`, if any, and is otherwise
/// transparent.
fn rasterize(
    markup: &str,
    size: u32,
    background: Option<tiny_skia::Color>,
) -> Result<Pixmap, AvatarError> {
    let tree = Tree::from_str(markup, &usvg::Options::default())?;
    let mut pixmap = Pixmap::new(size, size).ok_or(AvatarError::EmptyImage(size))?;
    if let Some(background) = background {
        pixmap.fill(background);
    }

    let transform = Transform::from_scale(
        size as f32 / tree.size().width(),
        size as f32 / tree.size().height(),
    );
    debug!("rasterizing markup into {}x{} pixels", size, size);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap)
}

/// encodes the avatar into the bytes of a file in the given `format`
///
/// the raw SVG markup of the avatar is what gets rasterized, so all formats
/// show the same picture.
pub fn encode(avatar: &Avatar, format: &Format) -> Result<Vec<u8>, AvatarError> {
    let size = avatar.size;
    let markup = avatar.to_svg();
    let mut bytes = vec![];
    match format {
        Format::Png => {
            let pixmap = rasterize(&markup, size, None)?;
            // the pixmap is premultiplied, PNG is not
            let pixels: Vec<u8> = pixmap
                .pixels()
                .iter()
                .flat_map(|p| {
                    let c = p.demultiply();
                    [c.red(), c.green(), c.blue(), c.alpha()]
                })
                .collect();
            debug!("encoding {}x{} pixels as PNG", size, size);
            PngEncoder::new(&mut bytes).write_image(
                &pixels,
                size,
                size,
                ExtendedColorType::Rgba8,
            )?;
        }
        Format::Jpeg { .. } => {
            let pixmap = rasterize(&markup, size, Some(JPEG_BACKGROUND))?;
            // every pixel is opaque after filling the background
            let pixels: Vec<u8> = pixmap
                .pixels()
                .iter()
                .flat_map(|p| [p.red(), p.green(), p.blue()])
                .collect();
            debug!("encoding {}x{} pixels as JPEG", size, size);
            JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).write_image(
                &pixels,
                size,
                size,
                ExtendedColorType::Rgb8,
            )?;
        }
        Format::Raw { extension } => {
            debug!("keeping the raw markup for `.{}`", extension);
            bytes = markup.into_bytes();
        }
    }

    Ok(bytes)
}
