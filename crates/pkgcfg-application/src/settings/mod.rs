mod layered;

pub use layered::LayeredSettings;
