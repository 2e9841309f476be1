//! Test the constant velocity filter engine.
//!
//! The reference scenario is a vehicle driving with a constant velocity of (20, 10) observed by a velocity sensor
//! with unit noise, while the filter assumes a much noisier sensor.

use nalgebra::{Matrix4, Vector2};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cv_estimate::matrix::asymmetry;
use cv_estimate::simulation::VelocitySensor;
use cv_estimate::{CvConfig, CvFilter, FilterError, StepOutput};

const DT: f64 = 0.1;
const SIGMA_A: f64 = 8.8;
const SIGMA_Z: f64 = 10.0;
const M: usize = 200;
const VX: f64 = 20.;
const VY: f64 = 10.;

fn reference_config() -> CvConfig {
    CvConfig::new(DT, SIGMA_A, [SIGMA_Z, SIGMA_Z])
}

fn reference_measurements(seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    VelocitySensor::new(VX, VY, 1.0).unwrap().measurements(&mut rng, M)
}

fn run(filter: &mut CvFilter, measurements: &[Vector2<f64>]) -> Vec<StepOutput> {
    filter.run(measurements.iter().map(|z| z.as_slice())).unwrap()
}

#[test]
fn test_reference_scenario() {
    let mut filter = CvFilter::new(reference_config()).unwrap();
    let outputs = run(&mut filter, &reference_measurements(1));

    assert_eq!(outputs.len(), M);
    assert_eq!(filter.steps(), M as u64);

    let last = outputs.last().unwrap();
    assert!((last.state[2] - VX).abs() < 1.0, "dx {}", last.state[2]);
    assert!((last.state[3] - VY).abs() < 1.0, "dy {}", last.state[3]);
    assert!(last.covariance_diagonal[2] <= 0.1 * 1000., "P dx {}", last.covariance_diagonal[2]);
    assert!(last.covariance_diagonal[3] <= 0.1 * 1000., "P dy {}", last.covariance_diagonal[3]);
}

#[test]
fn test_velocity_uncertainty_never_grows() {
    let mut filter = CvFilter::new(reference_config()).unwrap();
    let outputs = run(&mut filter, &reference_measurements(2));

    let mut previous = [1000., 1000.];
    for out in outputs.iter() {
        for (i, prev) in previous.iter_mut().enumerate() {
            let p = out.covariance_diagonal[2 + i];
            assert!(p <= *prev + 1e-9, "velocity variance grew {} -> {}", prev, p);
            *prev = p;
        }
    }
}

#[test]
fn test_covariance_symmetric_and_non_negative() {
    let mut filter = CvFilter::new(reference_config()).unwrap();
    for z in reference_measurements(3).iter() {
        let out = filter.step(z.as_slice()).unwrap();
        let cov = filter.covariance();
        assert!(asymmetry(cov) < 1e-9 * cov.amax(), "asymmetry {}", asymmetry(cov));
        assert!(out.covariance_diagonal.iter().all(|p| *p >= 0.));
        assert_eq!(out.covariance_diagonal, cov.diagonal());
    }
}

#[test]
fn test_exact_channels_keep_covariance_symmetric_and_non_negative() {
    for noise_std in [[0.0, SIGMA_Z], [0.0, 0.0]].iter() {
        let mut filter = CvFilter::new(CvConfig::new(DT, SIGMA_A, *noise_std)).unwrap();
        let measurements = reference_measurements(6);
        for (k, z) in measurements.iter().cycle().take(5 * M).enumerate() {
            let out = filter.step(z.as_slice()).unwrap();
            let cov = filter.covariance();
            assert_eq!(asymmetry(cov), 0., "{:?} step {} asymmetric {}", noise_std, k, cov);
            assert!(
                out.covariance_diagonal.iter().all(|p| *p >= 0.),
                "{:?} step {} diagonal {}",
                noise_std,
                k,
                out.covariance_diagonal
            );
            assert!(out.state.iter().all(|x| x.is_finite()));
        }
    }
}

#[test]
fn test_runs_are_deterministic() {
    let measurements = reference_measurements(4);

    let mut first = CvFilter::new(reference_config()).unwrap();
    let mut second = CvFilter::new(reference_config()).unwrap();
    assert_eq!(run(&mut first, &measurements), run(&mut second, &measurements));

    // Batching the steps differently gives the same trajectory
    let mut batched = CvFilter::new(reference_config()).unwrap();
    let mut outputs = run(&mut batched, &measurements[..M / 2]);
    for z in measurements[M / 2..].iter() {
        outputs.push(batched.step(z.as_slice()).unwrap());
    }
    let mut whole = CvFilter::new(reference_config()).unwrap();
    assert_eq!(outputs, run(&mut whole, &measurements));
    assert_eq!(batched.state(), whole.state());
    assert_eq!(batched.covariance(), whole.covariance());
}

#[test]
fn test_zero_process_noise_follows_trajectory() {
    let config = CvConfig::new(DT, 1e-9, [SIGMA_Z, SIGMA_Z])
        .with_initial_state([0., 0., VX, VY])
        .with_initial_covariance_diagonal([0.; 4]);
    let mut filter = CvFilter::new(config).unwrap();

    for k in 1..=50 {
        let out = filter.step(&[VX, VY]).unwrap();
        approx::assert_abs_diff_eq!(out.innovation[0], 0.0, epsilon = 1e-9);
        approx::assert_abs_diff_eq!(out.innovation[1], 0.0, epsilon = 1e-9);
        approx::assert_relative_eq!(out.state[0], VX * DT * k as f64, max_relative = 1e-9);
        approx::assert_relative_eq!(out.state[1], VY * DT * k as f64, max_relative = 1e-9);
        approx::assert_relative_eq!(out.state[2], VX, max_relative = 1e-12);
        approx::assert_relative_eq!(out.state[3], VY, max_relative = 1e-12);
    }
}

#[test]
fn test_exact_channel() {
    let config = CvConfig::new(DT, SIGMA_A, [0.0, SIGMA_Z]);
    let mut filter = CvFilter::new(config).unwrap();

    let out = filter.step(&[21.5, 9.0]).unwrap();
    assert!(out.gain.iter().all(|k| k.is_finite()));
    assert!(out.state.iter().all(|x| x.is_finite()));
    approx::assert_abs_diff_eq!(out.state[2], 21.5, epsilon = 1e-9);
    approx::assert_abs_diff_eq!(out.gain_column(0)[2], 1.0, epsilon = 1e-9);
    // The exactly observed velocity is certain
    approx::assert_abs_diff_eq!(out.covariance_diagonal[2], 0.0, epsilon = 1e-9);
}

#[test]
fn test_singular_innovation_covariance() {
    // No observation noise and a certain initial state: S = H.Q.H' which has rank 1
    let config = CvConfig::new(DT, SIGMA_A, [0.0, 0.0]).with_initial_covariance_diagonal([0.; 4]);
    let mut filter = CvFilter::new(config).unwrap();

    for _ in 0..10 {
        let out = filter.step(&[VX, VY]).unwrap();
        assert!(out.innovation_rcond < 1e-12, "rcond {}", out.innovation_rcond);
        assert!(out.gain.iter().all(|k| k.is_finite()));
        assert!(out.state.iter().all(|x| x.is_finite()));
        assert!(filter.covariance().iter().all(|p| p.is_finite()));
    }
}

#[test]
fn test_invalid_configuration() {
    for config in [
        CvConfig::new(0.0, SIGMA_A, [SIGMA_Z, SIGMA_Z]),
        CvConfig::new(DT, -1.0, [SIGMA_Z, SIGMA_Z]),
        CvConfig::new(DT, SIGMA_A, [SIGMA_Z, -SIGMA_Z]),
    ]
    .iter()
    {
        match CvFilter::new(config.clone()) {
            Err(FilterError::InvalidConfiguration(_)) => {}
            other => panic!("{:?} gave {:?}", config, other.map(|f| f.steps())),
        }
    }
}

#[test]
fn test_invalid_measurement_leaves_state() {
    let mut filter = CvFilter::new(reference_config()).unwrap();
    filter.step(&[VX, VY]).unwrap();
    let before = filter.kalman_state();

    for bad in [&[VX][..], &[VX, VY, 0.][..], &[][..], &[f64::NAN, VY][..], &[VX, f64::INFINITY][..]].iter() {
        match filter.step(bad) {
            Err(FilterError::InvalidMeasurement(_)) => {}
            other => panic!("{:?} gave {:?}", bad, other),
        }
    }
    assert_eq!(filter.kalman_state(), before);
    assert_eq!(filter.steps(), 1);

    // A run stops at the first invalid measurement
    let steps: Vec<Vec<f64>> = vec![vec![VX, VY], vec![VX], vec![VX, VY]];
    assert!(filter.run(steps.iter()).is_err());
    assert_eq!(filter.steps(), 2);
}

#[test]
fn test_independent_filters() {
    let measurements = reference_measurements(5);
    let expected = run(&mut CvFilter::new(reference_config()).unwrap(), &measurements);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let measurements = measurements.clone();
            std::thread::spawn(move || {
                let mut filter = CvFilter::new(reference_config()).unwrap();
                run(&mut filter, &measurements)
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_process_noise_closed_form() {
    let filter = CvFilter::new(reference_config()).unwrap();
    let q = filter.model().predict_noise.Q.clone();

    let dt2 = DT * DT;
    let dt3 = dt2 * DT;
    let dt4 = dt2 * dt2;
    let s2 = SIGMA_A * SIGMA_A;
    #[rustfmt::skip]
    let expected = Matrix4::new(
        dt4 / 4., dt4 / 4., dt3 / 2., dt3 / 2.,
        dt4 / 4., dt4 / 4., dt3 / 2., dt3 / 2.,
        dt3 / 2., dt3 / 2., dt2, dt2,
        dt3 / 2., dt3 / 2., dt2, dt2,
    ) * s2;
    approx::assert_relative_eq!(q, expected, max_relative = 1e-12);

    let r = &filter.model().observe_noise.Q;
    assert_eq!(r[(0, 0)], SIGMA_Z * SIGMA_Z);
    assert_eq!(r[(1, 1)], SIGMA_Z * SIGMA_Z);
    assert_eq!(r[(0, 1)], 0.);
}
