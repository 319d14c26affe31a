use geo::{Coordinate, Rect};
use log::{error, info};
use pretty_env_logger;
use windscape::{
    farm::{
        boundary::{boundary_polygon, circular_boundary},
        frame::{downwind_order, wind_frame},
        turbine::Turbine,
    },
    render::{self, Quantity},
    rose::sample::{sample_wind_rose, WindRose},
    units::{Bearing, Unit},
    vars::*,
    Result,
};

// measured wind rose, 72 directions five degrees apart
const FREQUENCIES: [f64; 72] = [
    1.17812570e-02, 1.09958570e-02, 9.60626600e-03, 1.21236860e-02, 1.04722450e-02,
    1.00695140e-02, 9.68687400e-03, 1.00090550e-02, 1.03715390e-02, 1.12172280e-02,
    1.52249700e-02, 1.56279300e-02, 1.57488780e-02, 1.70577560e-02, 1.93535770e-02,
    1.41980570e-02, 1.20632100e-02, 1.20229000e-02, 1.32111160e-02, 1.74605400e-02,
    1.72994400e-02, 1.43993790e-02, 7.87436000e-03, 0.00000000e+00, 2.01390000e-05,
    0.00000000e+00, 3.42360000e-04, 3.56458900e-03, 7.18957000e-03, 8.80068000e-03,
    1.13583200e-02, 1.41576700e-02, 1.66951900e-02, 1.63125500e-02, 1.31709000e-02,
    1.09153300e-02, 9.48553000e-03, 1.01097900e-02, 1.18819700e-02, 1.26069900e-02,
    1.58895900e-02, 1.77021600e-02, 2.04208100e-02, 2.27972500e-02, 2.95438600e-02,
    3.02891700e-02, 2.69861000e-02, 2.21527500e-02, 2.12465500e-02, 1.82861400e-02,
    1.66147400e-02, 1.90111800e-02, 1.90514500e-02, 1.63932050e-02, 1.76215200e-02,
    1.65341460e-02, 1.44597600e-02, 1.40370300e-02, 1.65745000e-02, 1.56278200e-02,
    1.53459200e-02, 1.75210100e-02, 1.59702700e-02, 1.51041500e-02, 1.45201100e-02,
    1.34527800e-02, 1.47819600e-02, 1.33923300e-02, 1.10562900e-02, 1.04521380e-02,
    1.16201970e-02, 1.10562700e-02,
];

const SPEEDS: [f64; 72] = [
    6.53163342, 6.11908394, 6.13415514, 6.0614625, 6.21344602, 5.87000793, 5.62161519,
    5.96779107, 6.33589422, 6.4668016, 7.9854581, 7.6894432, 7.5089221, 7.48638098, 7.65764618,
    6.82414044, 6.36728201, 5.95982999, 6.05942132, 6.1176321, 5.50987893, 4.18461796,
    4.82863115, 0.0, 0.0, 0.0, 5.94115843, 5.94914252, 5.59386528, 6.42332524, 7.67904937,
    7.89618066, 8.84560463, 8.51601497, 8.40826823, 7.89479475, 7.86194762, 7.9242645,
    8.56269962, 8.94563889, 9.82636368, 10.11153102, 9.71402212, 9.95233636, 10.35446959,
    9.67156182, 9.62462527, 8.83545158, 8.18011771, 7.9372492, 7.68726143, 7.88134508,
    7.31394723, 7.01839896, 6.82858346, 7.06213432, 7.01949894, 7.00575122, 7.78735165,
    7.52836352, 7.21392201, 7.4356621, 7.54099962, 7.61335262, 7.90293531, 7.16021596,
    7.19617087, 7.5593657, 7.03278586, 6.76105501, 6.48004694, 6.94716392,
];

fn demo_rose() -> Result<()> {
    let directions = (0..FREQUENCIES.len())
        .map(|i| i as f64 * FULL_TURN / FREQUENCIES.len() as f64)
        .collect::<Vec<f64>>();
    let measured = WindRose {
        directions: directions.clone(),
        frequencies: FREQUENCIES.to_vec(),
        speeds: SPEEDS.to_vec(),
    };
    render::save(
        &render::rose_chart(&measured, Quantity::Frequency),
        "rose-measured-frequency",
    )?;

    let sampled = sample_wind_rose(50, &directions, &FREQUENCIES, &SPEEDS, NUM_INT)?;
    let mean = sampled.iter().map(|(_, f, s)| f * s).sum::<f64>();
    info!("resampled onto {} directions, mean speed {:.3}", sampled.len(), mean);
    render::save(&render::rose_chart(&sampled, Quantity::Frequency), "rose-frequency")?;
    render::save(&render::rose_chart(&sampled, Quantity::Speed), "rose-speed")?;
    Ok(())
}

fn demo_layout() -> Result<()> {
    let positions = (0..25)
        .map(|k| Coordinate {
            x: 500.0 * (k / 5) as f64 - 1000.0,
            y: 500.0 * (k % 5) as f64 - 1000.0,
        })
        .collect::<Vec<Coordinate<f64>>>();
    let wind = Bearing::confine(225.0);
    let order = downwind_order(wind, &positions);
    info!("downwind order for a south-westerly: {:?}", order);

    let ring = circular_boundary(180, BOUNDARY_RADIUS, Coordinate { x: 0.0, y: 0.0 })?;
    let boundary = boundary_polygon(&ring);
    render::save(
        &render::layout_chart(&positions, &[100.0; 25], Some(&boundary), None)?,
        "layout",
    )?;

    // fixed view so that frames for different winds line up
    let extent = BOUNDARY_RADIUS + 200.0;
    let bounds = Rect::new(
        Coordinate {
            x: -extent,
            y: -extent,
        },
        Coordinate {
            x: extent,
            y: extent,
        },
    );
    let framed = wind_frame(wind, &positions);
    render::save(
        &render::layout_chart(&framed, &[100.0; 25], None, Some(bounds))?,
        "layout-wind",
    )?;

    let turbine = Turbine::new(100.0, 100.0, [6.0, 4.0, 3.0]);
    render::save(&render::turbine_chart(&turbine.silhouette(75.0)), "turbine")?;
    Ok(())
}

fn main() {
    pretty_env_logger::init_timed();
    info!("initialising windscape");
    if let Err(err) = demo_rose().and_then(|_| demo_layout()) {
        error!("{}", err);
        std::process::exit(1);
    }
    info!("images written to {}", RENDER_DIR)
}
