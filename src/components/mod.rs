mod ink_swatch;

pub use ink_swatch::InkSwatch;
