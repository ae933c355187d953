//! Generate a whole batch of avatars
//!
//! Avatars are generated one after the other, the `i`-th one with the seed
//! `i.to_string()`. The first error stops the batch, files written by the
//! previous iterations are left untouched.
use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    encode::{encode, Format},
    error::AvatarError,
    fs,
    options::{synthesize, Options},
    style::Style,
};

/// number of avatars to create
pub const COUNT: usize = 100;
/// directory the avatars are written to
pub const TARGET: &str = "avatars";
/// format of the avatars
pub const FORMAT: &str = "png";
/// width and height of the avatars, in pixels
pub const SIZE: u32 = 200;

/// the files written for a single avatar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub seed: String,
    pub options: PathBuf,
    pub image: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub count: usize,
    pub target: PathBuf,
    pub format: Format,
    pub size: u32,
}

impl Default for Batch {
    fn default() -> Self {
        Self {
            count: COUNT,
            target: PathBuf::from(TARGET),
            format: Format::Png,
            size: SIZE,
        }
    }
}

impl Batch {
    pub fn new(count: usize, target: &Path, format: Format, size: u32) -> Self {
        Self {
            count,
            target: target.to_path_buf(),
            format,
            size,
        }
    }

    /// generates all the avatars of the batch, in order
    pub fn run(&self, style: &impl Style) -> Result<Vec<Generated>, AvatarError> {
        (0..self.count).map(|i| self.generate(style, i)).collect()
    }

    /// generates the avatar with the given `index`
    ///
    /// 1. synthesizes the options of the avatar
    /// 2. makes sure the target directory exists
    /// 3. writes the options to `{seed}.json`
    /// 4. renders the avatar
    /// 5. encodes and writes it to `{seed}.{format}`
    pub fn generate(&self, style: &impl Style, index: usize) -> Result<Generated, AvatarError> {
        info!("creating avatar {}", index);
        let seed = index.to_string();

        let mut options = Options::new(&seed, self.size);
        options.extend(synthesize(style.schema(), &seed)?);

        fs::ensure_dir(&self.target)?;
        let options_path = fs::dump(
            options.to_json_pretty()?.as_bytes(),
            &self.target,
            &format!("{}.json", seed),
        )?;

        let avatar = style.render(&options)?;
        let bytes = encode(&avatar, &self.format)?;
        let image_path = fs::dump(
            &bytes,
            &self.target,
            &format!("{}.{}", seed, self.format.extension()),
        )?;

        Ok(Generated {
            seed,
            options: options_path,
            image: image_path,
        })
    }
}
