//! Scratch-allocation failure paths.
//!
//! A scratch budget smaller than what a solver needs makes one of its
//! buffer requests fail. The call must report `Error::Allocation` and leave
//! the caller's density buffers exactly as they were.

use fpt_core::Error;
use fpt_density::{DiffusionSchedule, FptSolver, Settings};

const SENTINEL: f64 = -7.5;
const K_MAX: usize = 64;

fn solver_with_budget(limit: usize) -> FptSolver {
    FptSolver::new(Settings::new().with_scratch_limit(limit))
}

fn sentinel_buffers() -> (Vec<f64>, Vec<f64>) {
    (vec![SENTINEL; K_MAX], vec![SENTINEL; K_MAX])
}

fn assert_untouched(g1: &[f64], g2: &[f64]) {
    assert!(g1.iter().chain(g2).all(|&g| g == SENTINEL));
}

fn assert_allocation_failure(result: fpt_core::Result<()>) {
    match result {
        Err(Error::Allocation { requested }) => assert_eq!(requested, K_MAX),
        other => panic!("expected allocation failure, got {other:?}"),
    }
}

#[test]
fn general_recursion_fails_on_second_buffer() {
    let ones = vec![1.0; K_MAX];
    let lower = vec![-1.0; K_MAX];
    let zero = vec![0.0; K_MAX];
    let s = DiffusionSchedule::new(&ones, &ones, &lower, &ones, &zero, &zero, 0.01);
    let (mut g1, mut g2) = sentinel_buffers();
    assert_allocation_failure(solver_with_budget(K_MAX).solve(&s, &mut g1, &mut g2));
    assert_untouched(&g1, &g2);

    // room for both cumulative-statistics buffers
    solver_with_budget(2 * K_MAX).solve(&s, &mut g1, &mut g2).unwrap();
    assert!(g1.iter().all(|&g| g >= 0.0));
}

#[test]
fn leaky_recursion_fails_on_discount_buffers() {
    let ones = vec![1.0; K_MAX];
    let lower = vec![-1.0; K_MAX];
    let zero = vec![0.0; K_MAX];
    let s = DiffusionSchedule::new(&ones, &ones, &lower, &ones, &zero, &zero, 0.01);
    let (mut g1, mut g2) = sentinel_buffers();
    assert_allocation_failure(solver_with_budget(3 * K_MAX).solve_leak(&s, 0.5, &mut g1, &mut g2));
    assert_untouched(&g1, &g2);

    solver_with_budget(4 * K_MAX).solve_leak(&s, 0.5, &mut g1, &mut g2).unwrap();
}

#[test]
fn symmetric_variants_fail_cleanly() {
    let drift = vec![0.8; K_MAX];
    let bound = vec![1.0; K_MAX];
    let solver = solver_with_budget(K_MAX);

    let (mut g1, mut g2) = sentinel_buffers();
    assert_allocation_failure(solver.solve_symmetric(&drift, &bound, 0.01, &mut g1, &mut g2));
    assert_untouched(&g1, &g2);

    assert_allocation_failure(solver.solve_const_drift(0.8, &bound, 0.01, &mut g1, &mut g2));
    assert_untouched(&g1, &g2);

    assert_allocation_failure(solver.solve_weighted(&drift, &bound, 0.8, 0.01, &mut g1, &mut g2));
    assert_untouched(&g1, &g2);
}

#[test]
fn zero_budget_fails_on_first_buffer() {
    let bound = vec![1.0; K_MAX];
    let (mut g1, mut g2) = sentinel_buffers();
    let err = solver_with_budget(0)
        .solve_const_drift(1.0, &bound, 0.01, &mut g1, &mut g2)
        .unwrap_err();
    assert!(err.is_retryable());
    assert_untouched(&g1, &g2);
}

#[test]
fn closed_form_needs_no_scratch() {
    let (mut g1, mut g2) = sentinel_buffers();
    solver_with_budget(0)
        .const_bound_density(1.0, 1.0, 0.01, &mut g1, &mut g2)
        .unwrap();
    solver_with_budget(0)
        .asym_bound_density(1.0, 1.0, -0.5, 0.01, &mut g1, &mut g2)
        .unwrap();
    assert!(g1.iter().chain(&g2).all(|&g| g >= 0.0));
}

#[test]
fn preconditions_checked_before_writing() {
    let bound = vec![1.0; K_MAX - 1];
    let (mut g1, mut g2) = sentinel_buffers();
    let err = FptSolver::default()
        .solve_const_drift(1.0, &bound, 0.01, &mut g1, &mut g2)
        .unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { name: "bound", .. }));
    assert!(!err.is_retryable());
    assert_untouched(&g1, &g2);

    let err = FptSolver::default()
        .const_bound_density(1.0, 1.0, -0.01, &mut g1, &mut g2)
        .unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
    assert_untouched(&g1, &g2);
}
