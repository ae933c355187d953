//! Avatars: generate batches of seeded avatars
//!
//! For each index of a batch, the options of an avatar are synthesized from
//! the schema of a [`style::Style`] and the index used as a seed, then the
//! avatar is rendered, encoded and written next to its options.
//!
//! # Example
//! ```no_run
//! use std::path::Path;
//!
//! use avatars::{batch::Batch, encode::Format, style::Peeps};
//!
//! let batch = Batch::new(10, Path::new("avatars"), Format::Png, 200);
//! batch.run(&Peeps::new()?)?;
//! # Ok::<(), avatars::error::AvatarError>(())
//! ```
pub mod avatar;
pub mod batch;
pub mod encode;
pub mod error;
pub mod fs;
pub mod options;
pub mod prng;
pub mod schema;
pub mod style;
