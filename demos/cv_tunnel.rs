//! A car drives through a tunnel and loses its position fix.
//!
//! Only the velocity in x and y is known, from the wheel speed and the yaw rate sensor. A constant velocity Kalman
//! filter estimates the position from it. Each step is printed as a CSV row for plotting: the state estimate, the
//! measurement, the state variances and the gain applied to the x velocity measurement.
//!
//! Set `CV_TUNNEL_TRACE` in the environment to log each filter step.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use cv_estimate::simulation::VelocitySensor;
use cv_estimate::{CvConfig, CvFilter, FilterError};

fn main() -> Result<(), FilterError> {
    let level = if std::env::var_os("CV_TUNNEL_TRACE").is_some() {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // 200 measurements of a car driving at (20, 10)
    let sensor = VelocitySensor::new(20., 10., 1.)?;
    let mut rng = StdRng::seed_from_u64(42);
    let measurements = sensor.measurements(&mut rng, 200);

    // Acceleration noise of a vehicle 8.8 m/s^2, velocity sensor noise 10 m/s
    let mut filter = CvFilter::new(CvConfig::new(0.1, 8.8, [10., 10.]))?;
    info!(steps = measurements.len(), "filtering");

    println!("step,x,y,dx,dy,zx,zy,Px,Py,Pdx,Pdy,Kx,Ky,Kdx,Kdy");
    for (n, z) in measurements.iter().enumerate() {
        let out = filter.step(z.as_slice())?;
        let k = out.gain_column(0);
        println!(
            "{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.6},{:.6},{:.6},{:.6}",
            n,
            out.state[0],
            out.state[1],
            out.state[2],
            out.state[3],
            z[0],
            z[1],
            out.covariance_diagonal[0],
            out.covariance_diagonal[1],
            out.covariance_diagonal[2],
            out.covariance_diagonal[3],
            k[0],
            k[1],
            k[2],
            k[3],
        );
    }

    let x = filter.state();
    info!(
        x = x[0],
        y = x[1],
        dx = x[2],
        dy = x[3],
        "final estimate"
    );
    Ok(())
}
