use rand::rngs::StdRng;
use rand::SeedableRng;

use cv_estimate::simulation::VelocitySensor;
use cv_estimate::FilterError;

#[test]
fn test_measurements_scatter_about_velocity() {
    let sensor = VelocitySensor::new(20., 10., 1.).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let zs = sensor.measurements(&mut rng, 10000);
    assert_eq!(zs.len(), 10000);

    let n = zs.len() as f64;
    let mean = zs.iter().fold(nalgebra::Vector2::<f64>::zeros(), |acc, z| acc + z) / n;
    approx::assert_abs_diff_eq!(mean, sensor.velocity().clone(), epsilon = 0.05);

    let var_x = zs.iter().map(|z| (z[0] - mean[0]).powi(2)).sum::<f64>() / n;
    approx::assert_abs_diff_eq!(var_x, 1.0, epsilon = 0.1);
}

#[test]
fn test_seeded_measurements_repeat() {
    let sensor = VelocitySensor::new(20., 10., 1.).unwrap();
    let first = sensor.measurements(&mut StdRng::seed_from_u64(11), 50);
    let second = sensor.measurements(&mut StdRng::seed_from_u64(11), 50);
    assert_eq!(first, second);
}

#[test]
fn test_noiseless_sensor() {
    let sensor = VelocitySensor::new(3., -4., 0.).unwrap();
    let z = sensor.sample(&mut StdRng::seed_from_u64(0));
    assert_eq!(z, nalgebra::Vector2::new(3., -4.));
}

#[test]
fn test_negative_noise_rejected() {
    match VelocitySensor::new(20., 10., -1.) {
        Err(FilterError::InvalidConfiguration(_)) => {}
        other => panic!("accepted {:?}", other),
    }
}
