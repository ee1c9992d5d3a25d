/// Image decoding and natural-size probing.
pub mod decode;
/// Input folder listing and shuffling.
pub mod discover;
/// Caption font resolution.
pub mod font;
