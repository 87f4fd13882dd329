//! Sprite atlas model and the Aseprite import translator.
//!
//! ```no_run
//! use spriteatlas::import::{import_aseprite, ImportOptions};
//! use spriteatlas::model::PackingOptions;
//!
//! # fn main() -> anyhow::Result<()> {
//! let json = std::fs::read_to_string("hero.json")?;
//! let png = std::fs::read("hero.png")?;
//! let atlas = import_aseprite(&json, &png, PackingOptions::default(), &ImportOptions::default())?;
//!
//! for walk in atlas.animations_by_name("walk")? {
//!     for frame in atlas.animation_frames(walk)? {
//!         println!("{:?} for {:?}", frame.source_rectangle, frame.duration);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub use spriteatlas_collections as collections;
pub use spriteatlas_geometry as geometry;
pub use spriteatlas_import as import;
pub use spriteatlas_model as model;
