//! Avatar styles
//!
//! A style bundles the schema of its properties with the renderer that turns
//! synthesized [`Options`] into an [`Avatar`].
use crate::{avatar::Avatar, error::AvatarError, options::Options, schema::StyleSchema};

mod peeps;

pub use peeps::Peeps;

pub trait Style {
    /// the properties that can be customized, in the order they are synthesized
    fn schema(&self) -> &StyleSchema;

    /// draws the avatar described by the `options`
    ///
    /// rendering is deterministic: the same options always give the same avatar.
    fn render(&self, options: &Options) -> Result<Avatar, AvatarError>;
}
