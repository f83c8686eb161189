/// Pipeline configuration, threaded by reference into every call that needs
/// it. Values are plain data; construct one, adjust fields, and share it.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Z per cutting pass; negative is into the work.
    pub depth_step: f64,
    /// Safe lift height between paths.
    pub evacuation_height: f64,
    /// Feed while cutting.
    pub cut_speed: f64,
    /// Feed while plunging.
    pub penetrate_speed: f64,
    /// Feed for rapid positioning moves.
    pub fast_travel_speed: f64,
    /// Spindle speed for the program header.
    pub spindle_rpm: f64,
    /// Return to origin and dwell between paths instead of lifting.
    pub dwell_after_block: bool,
    /// Visit paths in greedy nearest-start order.
    pub sort_blocks: bool,
    /// Rewrite circular moves to straight ones during sanitization.
    pub decurve: bool,
    /// Prefix rendered lines with position/block markers and suffix
    /// classification tags.
    pub diagnostics: bool,
    /// `N`-number every non-blank rendered line.
    pub number_lines: bool,
    /// `O`-number every block start.
    pub number_blocks: bool,
    /// Rounding limit for rendered coordinates.
    pub decimal_places: u32,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            depth_step: -0.25,
            evacuation_height: 1.0,
            cut_speed: 50.0,
            penetrate_speed: 50.0,
            fast_travel_speed: 800.0,
            spindle_rpm: 1000.0,
            dwell_after_block: false,
            sort_blocks: true,
            decurve: false,
            diagnostics: false,
            number_lines: false,
            number_blocks: false,
            decimal_places: 6,
        }
    }
}
