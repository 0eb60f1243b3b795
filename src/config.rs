//! Configuration for layout processing.

/// Reference page width used when a record carries no `imageWidth`.
pub const DEFAULT_IMAGE_WIDTH: f32 = 3000.0;

/// Layout processing configuration.
///
/// All tunables of the geometric pipeline live here and are passed explicitly
/// into the components that need them; nothing in the crate reads module-level
/// globals.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Number of vertical reading bands a page is divided into.
    pub band_count: u32,

    /// Vertical tolerance (layout units) when deciding whether another shape
    /// sits "below" a column's bottommost body-text shape. The search window
    /// is `[bottom - tolerance, bottom + 3 * tolerance]`.
    pub below_tolerance: f32,

    /// An advertisement wider than this multiple of the average band width
    /// is treated as full-width (band 0).
    pub wide_ad_ratio: f32,

    /// Fallback page width for records that omit `imageWidth`.
    pub default_image_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Create a new configuration with defaults matching the scanned
    /// broadsheet corpus this crate was built for: 3 bands, 50-unit
    /// bottom-edge tolerance, 1.5x ad width ratio.
    pub fn new() -> Self {
        Self {
            band_count: 3,
            below_tolerance: 50.0,
            wide_ad_ratio: 1.5,
            default_image_width: DEFAULT_IMAGE_WIDTH,
        }
    }

    /// Set the vertical tolerance for the bottom-edge corrector.
    pub fn with_below_tolerance(mut self, tolerance: f32) -> Self {
        self.below_tolerance = tolerance;
        self
    }

    /// Set the full-width advertisement ratio.
    pub fn with_wide_ad_ratio(mut self, ratio: f32) -> Self {
        self.wide_ad_ratio = ratio;
        self
    }

    /// Set the fallback page width.
    pub fn with_default_image_width(mut self, width: f32) -> Self {
        self.default_image_width = width;
        self
    }

    /// Average width of one band on a page of the given width.
    pub fn band_width(&self, image_width: f32) -> f32 {
        image_width / self.band_count as f32
    }
}
