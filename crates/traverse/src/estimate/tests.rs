use super::*;
use crate::error::{ConfigError, DegenerateInputError, EstimateError};
use crate::geom::{Box2, Polygon};
use crate::traverse::rand::{draw_traverse_radial, RadialCfg, ReplayToken, VertexCount};
use crate::traverse::{build_polygon, measurements_from_values};
use nalgebra::vector;
use proptest::prelude::*;

/// Shoelace area, reference only.
fn shoelace(p: &Polygon) -> f64 {
    p.edges()
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<f64>()
        .abs()
        * 0.5
}

fn inset_square() -> (Polygon, Box2) {
    let p = Polygon::closed(vec![
        vector![1.0, 1.0],
        vector![1.0, 9.0],
        vector![9.0, 9.0],
        vector![9.0, 1.0],
    ])
    .unwrap();
    (p, Box2::new(0.0, 0.0, 10.0, 10.0))
}

fn traverse(values: &[f64]) -> (Polygon, Box2) {
    build_polygon(&measurements_from_values(values).unwrap()).unwrap()
}

fn assert_brackets(est: &AreaEstimate, exact: f64, tol: f64) {
    let slack = 1e-9 * exact;
    assert!(est.area <= exact + slack, "area {} above exact {}", est.area, exact);
    assert!(
        est.upper_bound() >= exact - slack,
        "upper bound {} below exact {}",
        est.upper_bound(),
        exact
    );
    assert!(est.unresolved <= tol * est.area + slack);
}

#[test]
fn square_traverse_within_tolerance() {
    let (p, b) = traverse(&[0.0, 10.0, 90.0, 10.0, 180.0, 10.0, 270.0, 10.0]);
    for tol in [0.01, 0.05, 0.1, 0.3, 0.49] {
        let est = estimate_area(&p, &b, tol).unwrap();
        assert!(est.area >= 0.0 && est.area <= b.area());
        assert!(
            (100.0 - est.area) / 100.0 <= tol,
            "tol {tol}: area {}",
            est.area
        );
        assert!(est.relative_error() <= tol);
    }
}

#[test]
fn triangle_and_l_shape_bracket_exact_area() {
    let (tri, tb) = traverse(&[0.0, 3.0, 120.0, 3.0, 240.0, 3.0]);
    let est = estimate_area(&tri, &tb, 0.05).unwrap();
    assert_brackets(&est, shoelace(&tri), 0.05);

    let (l, lb) = traverse(&[
        0.0, 20.0, 90.0, 10.0, 180.0, 10.0, 90.0, 10.0, 180.0, 10.0, 270.0, 20.0,
    ]);
    assert!((shoelace(&l) - 300.0).abs() < 1e-9);
    let est = estimate_area(&l, &lb, 0.02).unwrap();
    assert_brackets(&est, 300.0, 0.02);
}

#[test]
fn confirmed_boxes_sum_to_area() {
    let (p, b) = inset_square();
    let est = estimate_area(&p, &b, 0.05).unwrap();
    assert_brackets(&est, 64.0, 0.05);
    let total: f64 = est.boxes.iter().map(Box2::area).sum();
    assert!((total - est.area).abs() < 1e-9);
    for bx in &est.boxes {
        assert!(bx.min_x >= 1.0 && bx.max_x <= 9.0 && bx.min_y >= 1.0 && bx.max_y <= 9.0);
    }
}

#[test]
fn out_of_range_tolerance_is_config_error() {
    let (p, b) = inset_square();
    for bad in [0.6, 0.5, 0.0, -0.1, f64::NAN, f64::INFINITY] {
        let err = estimate_area(&p, &b, bad).unwrap_err();
        assert!(
            matches!(err, EstimateError::Config(ConfigError::MaxRelativeError { .. })),
            "{bad}: {err:?}"
        );
    }
    let cfg = EstimateCfg {
        max_depth: 0,
        ..EstimateCfg::default()
    };
    assert_eq!(
        estimate_area_with(&p, &b, &cfg).unwrap_err(),
        EstimateError::Config(ConfigError::ZeroBudget { field: "max_depth" })
    );
}

#[test]
fn config_error_precedes_degenerate_bounds() {
    let (p, _) = inset_square();
    let flat = Box2::new(0.0, 0.0, 10.0, 0.0);
    assert!(matches!(
        estimate_area(&p, &flat, 0.6),
        Err(EstimateError::Config(_))
    ));
    assert!(matches!(
        estimate_area(&p, &flat, 0.1),
        Err(EstimateError::Degenerate(DegenerateInputError::ZeroAreaBounds { .. }))
    ));
}

#[test]
fn identical_inputs_identical_results() {
    let (p, b) = traverse(&[10.0, 7.0, 100.0, 5.0, 200.0, 9.0, 300.0, 4.0]);
    for order in [QueueOrder::Fifo, QueueOrder::LargestFirst] {
        let cfg = EstimateCfg {
            order,
            ..EstimateCfg::with_max_rel_error(0.05)
        };
        let a = estimate_area_with(&p, &b, &cfg).unwrap();
        let c = estimate_area_with(&p, &b, &cfg).unwrap();
        assert_eq!(a.area.to_bits(), c.area.to_bits());
        assert_eq!(a.boxes, c.boxes);
        assert_eq!(a.stats, c.stats);
    }
}

#[test]
fn tighter_tolerance_never_does_less_work() {
    let (p, b) = traverse(&[0.0, 3.0, 120.0, 3.0, 240.0, 3.0]);
    for order in [QueueOrder::Fifo, QueueOrder::LargestFirst] {
        let mut prev = 0usize;
        for tol in [0.4, 0.2, 0.1, 0.05, 0.02, 0.01] {
            let cfg = EstimateCfg {
                order,
                ..EstimateCfg::with_max_rel_error(tol)
            };
            let est = estimate_area_with(&p, &b, &cfg).unwrap();
            assert!(est.stats.classified >= prev);
            assert!(est.relative_error() <= tol);
            prev = est.stats.classified;
        }
    }
}

#[test]
fn fifo_confirms_boxes_breadth_first() {
    let (p, b) = inset_square();
    let est = estimate_area(&p, &b, 0.05).unwrap();
    let areas: Vec<f64> = est.boxes.iter().map(Box2::area).collect();
    assert!(areas.windows(2).all(|w| w[0] >= w[1]));
    let smallest = areas.last().copied().unwrap();
    let level = (b.area() / smallest).log(4.0).round() as u32;
    assert!(est.stats.deepest >= level);
    assert!(est.stats.subdivisions > 0);
}

#[test]
fn depth_cap_strands_boundary_boxes() {
    let (p, b) = inset_square();
    let cfg = EstimateCfg {
        max_depth: 2,
        ..EstimateCfg::with_max_rel_error(0.01)
    };
    assert_eq!(
        estimate_area_with(&p, &b, &cfg).unwrap_err(),
        EstimateError::Degenerate(DegenerateInputError::BudgetExhausted {
            classified: 20,
            area: 25.0,
            unresolved: 75.0,
        })
    );
}

#[test]
fn classification_budget_is_enforced() {
    let (p, b) = inset_square();
    let cfg = EstimateCfg {
        max_classifications: 10,
        ..EstimateCfg::with_max_rel_error(0.01)
    };
    match estimate_area_with(&p, &b, &cfg) {
        Err(EstimateError::Degenerate(DegenerateInputError::BudgetExhausted {
            classified,
            area,
            ..
        })) => {
            assert_eq!(classified, 10);
            assert!(area > 0.0);
        }
        other => panic!("expected budget exhaustion, got {other:?}"),
    }
}

#[test]
fn sliver_traverse_has_flat_bounds() {
    let (p, b) = traverse(&[0.0, 10.0, 180.0, 10.0, 0.0, 10.0, 180.0, 10.0]);
    assert!(matches!(
        estimate_area(&p, &b, 0.1),
        Err(EstimateError::Degenerate(DegenerateInputError::ZeroAreaBounds { .. }))
    ));
}

#[test]
fn out_and_back_traverse_terminates_without_interior() {
    let (p, b) = traverse(&[0.0, 10.0, 90.0, 10.0, 270.0, 10.0, 180.0, 10.0]);
    let cfg = EstimateCfg {
        max_classifications: 20_000,
        ..EstimateCfg::with_max_rel_error(0.1)
    };
    let err = estimate_area_with(&p, &b, &cfg).unwrap_err();
    assert!(matches!(err, EstimateError::Degenerate(_)), "{err:?}");
}

#[test]
fn polygon_smaller_than_bounds_is_still_found() {
    // Bounds much wider than the polygon: the whole ring sits in one quadrant.
    let p = Polygon::closed(vec![
        vector![1.0, 1.0],
        vector![3.0, 1.0],
        vector![3.0, 2.0],
        vector![1.0, 2.0],
    ])
    .unwrap();
    let b = Box2::new(0.0, 0.0, 40.0, 40.0);
    let est = estimate_area(&p, &b, 0.1).unwrap();
    assert_brackets(&est, 2.0, 0.1);
}

#[test]
fn diamond_with_diagonal_edges_brackets_exact_area() {
    // Every edge runs corner-to-corner through the boxes it cuts.
    let p = Polygon::closed(vec![
        vector![0.0, 0.0],
        vector![4.0, 4.0],
        vector![8.0, 0.0],
        vector![4.0, -4.0],
    ])
    .unwrap();
    let b = Box2::new(0.0, -4.0, 8.0, 4.0);
    for tol in [0.1, 0.01] {
        let est = estimate_area(&p, &b, tol).unwrap();
        assert_brackets(&est, 32.0, tol);
        assert!(est.stats.subdivisions > 0);
    }
}

#[test]
fn polygon_outside_bounds_is_rejected() {
    let (p, _) = inset_square();
    let short = Box2::new(0.0, 0.0, 10.0, 5.0);
    assert_eq!(
        estimate_area(&p, &short, 0.1).unwrap_err(),
        EstimateError::Degenerate(DegenerateInputError::PolygonOutsideBounds {
            vertex: 1,
            x: 1.0,
            y: 9.0,
        })
    );
    // Vertices on the bounds' edge are contained.
    let tight = Box2::new(1.0, 1.0, 9.0, 9.0);
    let est = estimate_area(&p, &tight, 0.1).unwrap();
    assert_brackets(&est, 64.0, 0.1);
}

fn sampled(seed: u64, index: u64) -> (Polygon, Box2) {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Uniform { min: 3, max: 10 },
        ..RadialCfg::default()
    };
    let ms = draw_traverse_radial(cfg, ReplayToken { seed, index });
    build_polygon(&ms).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn area_stays_within_bounds_and_brackets_exact(index in 0u64..10_000) {
        let (p, b) = sampled(7, index);
        let est = estimate_area(&p, &b, 0.1).unwrap();
        prop_assert!(est.area >= 0.0);
        prop_assert!(est.area <= b.area());
        let exact = shoelace(&p);
        let slack = 1e-9 * b.area();
        prop_assert!(est.area <= exact + slack);
        prop_assert!(est.upper_bound() >= exact - slack);
    }

    #[test]
    fn queue_orders_agree_on_the_bound(index in 0u64..10_000) {
        let (p, b) = sampled(11, index);
        let fifo = estimate_area(&p, &b, 0.05).unwrap();
        let cfg = EstimateCfg {
            order: QueueOrder::LargestFirst,
            ..EstimateCfg::with_max_rel_error(0.05)
        };
        let largest = estimate_area_with(&p, &b, &cfg).unwrap();
        let exact = shoelace(&p);
        for est in [&fifo, &largest] {
            prop_assert!(est.area >= exact / 1.05 - 1e-9 * exact);
            prop_assert!(est.area <= exact * (1.0 + 1e-9));
        }
    }
}
