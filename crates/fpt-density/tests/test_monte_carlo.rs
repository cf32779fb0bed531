//! Recursion vs. Euler–Maruyama simulation.
//!
//! Paths of `dx = μ dt + dW` are simulated with a fine step until they
//! leave `±b(t)`. The hit probability and the mean decision time must
//! match the moments of the computed densities up to Monte Carlo noise and
//! the discrete-monitoring bias of the simulation.

use approx::assert_abs_diff_eq;
use fpt_density::{boundary_derivative, solve_fpt, DiffusionSchedule};
use rand::prelude::*;
use rand_distr::StandardNormal;

type Real = f64;

const PATHS: usize = 10_000;
const SIM_STEP: Real = 1e-3;
const MAX_TIME: Real = 20.0;

struct Moments {
    p_upper: Real,
    mean_time: Real,
}

fn simulate(mu: Real, bound: impl Fn(Real) -> Real, seed: u64) -> Moments {
    let mut rng = StdRng::seed_from_u64(seed);
    let sqrt_step = SIM_STEP.sqrt();
    let (mut upper_hits, mut total_time) = (0usize, 0.0);
    for _ in 0..PATHS {
        let (mut x, mut t): (Real, Real) = (0.0, 0.0);
        while t < MAX_TIME {
            let z: Real = rng.sample(StandardNormal);
            x += mu * SIM_STEP + sqrt_step * z;
            t += SIM_STEP;
            let b = bound(t);
            if x >= b {
                upper_hits += 1;
                break;
            }
            if x <= -b {
                break;
            }
        }
        total_time += t;
    }
    Moments {
        p_upper: upper_hits as Real / PATHS as Real,
        mean_time: total_time / PATHS as Real,
    }
}

fn recursion(mu: Real, bound: impl Fn(Real) -> Real, delta_t: Real, k_max: usize) -> Moments {
    let upper: Vec<Real> = (0..k_max).map(|k| bound((k + 1) as Real * delta_t)).collect();
    let lower: Vec<Real> = upper.iter().map(|b| -b).collect();
    let up_d = boundary_derivative(&upper, delta_t).unwrap();
    let lo_d = boundary_derivative(&lower, delta_t).unwrap();
    let drift = vec![mu; k_max];
    let var = vec![1.0; k_max];
    let s = DiffusionSchedule::new(&drift, &var, &lower, &upper, &lo_d, &up_d, delta_t);

    let (mut g1, mut g2) = (vec![0.0; k_max], vec![0.0; k_max]);
    solve_fpt(&s, &mut g1, &mut g2).unwrap();

    let total: Real = g1.iter().chain(&g2).sum();
    let mean_time = (0..k_max)
        .map(|k| (k + 1) as Real * delta_t * (g1[k] + g2[k]))
        .sum::<Real>()
        / total;
    Moments {
        p_upper: g1.iter().sum::<Real>() * delta_t,
        mean_time,
    }
}

#[test]
fn constant_bound_matches_simulation() {
    let bound = |_t: Real| 1.0;
    let sim = simulate(1.0, bound, 42);
    let rec = recursion(1.0, bound, 0.01, 500);
    assert_abs_diff_eq!(rec.p_upper, sim.p_upper, epsilon = 0.025);
    assert_abs_diff_eq!(rec.mean_time, sim.mean_time, epsilon = 0.05);
}

#[test]
fn collapsing_bound_matches_simulation() {
    let bound = |t: Real| 1.0 / (1.0 + t);
    let sim = simulate(1.0, bound, 7);
    let rec = recursion(1.0, bound, 0.01, 500);
    assert_abs_diff_eq!(rec.p_upper, sim.p_upper, epsilon = 0.025);
    assert_abs_diff_eq!(rec.mean_time, sim.mean_time, epsilon = 0.05);
}
