pub mod name_multi_map;

pub use name_multi_map::{EmptyName, Handle, NameMultiMap, Named};
