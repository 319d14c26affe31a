/* # wind rose */

pub const NUM_INT: usize = 500; // quadrature points per angular bin
pub const MIN_NUM_INT: usize = 4; // each half of the seam bin needs two nodes
pub const PADDING: i64 = 3; // samples borrowed from across the seam on each side
pub const FREQ_TOLERANCE: f64 = 1e-3; // allowed drift of the input frequency sum from one
pub const FULL_TURN: f64 = 360.0;

/* # farm */

pub const BOUNDARY_RADIUS: f64 = 1500.0; // metres
pub const BLADE_SCALE: f64 = 70.0; // rotor diameter the reference blade profile is drawn for
pub const BLADE_OFFSET: f64 = 1.5; // shifts the profile onto the pitch axis

/* # rendering */

pub const RENDER_DIR: &str = "bounce";
pub const CANVAS: f64 = 512.0; // side of a rose chart in user units
pub const ROSE_FILL: &str = "rgb(51, 122, 184)";
pub const TURBINE_FILL: &str = "rgb(184, 51, 65)";
