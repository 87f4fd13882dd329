//! Turns a decoded Aseprite sheet into a runtime [`Atlas`].
//!
//! The binary decoder and the packer live elsewhere; this crate starts from
//! their output ([`DecodedSheet`]), or from Aseprite's own JSON sheet export
//! together with the packed PNG.

use anyhow::Result;
use spriteatlas_model::{Atlas, PackingOptions};

pub mod aseprite;
mod options;
pub mod png;
mod premultiply;
mod sheet;
mod translate;

pub use options::ImportOptions;
pub use premultiply::{convert_pixels, premultiply};
pub use sheet::{DecodedFrame, DecodedSheet, DecodedSlice, DecodedTag, SourcePoint, SourceRect};
pub use translate::translate;

/// Imports an Aseprite JSON sheet export and its packed PNG.
pub fn import_aseprite(
    json: &str,
    png: &[u8],
    packing: PackingOptions,
    options: &ImportOptions,
) -> Result<Atlas> {
    let document = aseprite::SheetDocument::decode(json)?;
    let pixels = png::decode_png(png)?;
    let sheet = document.to_decoded_sheet(pixels, packing)?;

    Ok(translate(sheet, options)?)
}
