//! Stock calculation and aggregation over synthetic blades.

mod common;

use approx::assert_relative_eq;
use common::*;
use pramana::core::mean_stock;
use pramana::stock::{SpecialRegionParams, area_stock_pair, special_stock};
use pramana::{ExecutionMode, Side, StockParams, Workpiece, compute_stock};

#[test]
fn test_values_never_exceed_clamp() {
    let template = template();
    let measured = with_noise(&thick_scan(0.75, 0.75), 0.08, 7);
    let params = StockParams::default();

    let mut valid = 0;
    let mut missing = 0;
    for side in [Side::Convex, Side::Concave] {
        for s in SECTIONS {
            let m = measured.get(side).section(s).unwrap();
            let t = template.get(side).section(s).unwrap();
            let stock = compute_stock(m, t, side, &params).unwrap();
            assert_eq!(stock.len(), m.len());
            for v in stock {
                match v {
                    Some(v) => {
                        assert!(v.abs() <= params.clamp, "section {s}: {v}");
                        valid += 1;
                    }
                    None => missing += 1,
                }
            }
        }
    }
    assert!(valid > 0);
    assert!(missing > 0, "noise should push some points past the clamp");
}

#[test]
fn test_points_outside_template_domain() {
    let template = template();
    let params = StockParams::default();

    // Trailing overhang
    let measured = shifted_scan(0.2, 0.0);
    for s in SECTIONS {
        let t = template.convex.section(s).unwrap();
        let m = measured.convex.section(s).unwrap();
        let max_x = t.max_x().unwrap();
        let stock = compute_stock(m, t, Side::Convex, &params).unwrap();
        for (p, v) in m.iter().zip(&stock) {
            if p.x > max_x + 1e-9 {
                assert!(v.is_none(), "section {s}: {p:?} beyond trailing edge");
            }
        }
    }

    // Leading overhang below the template's first point
    let measured = shifted_scan(-0.2, -0.1);
    for s in SECTIONS {
        let t = template.convex.section(s).unwrap();
        let m = measured.convex.section(s).unwrap();
        let leading = t.first().unwrap();
        let stock = compute_stock(m, t, Side::Convex, &params).unwrap();
        let skipped = m
            .iter()
            .zip(&stock)
            .filter(|(p, _)| p.x < leading.x && p.y < leading.y)
            .inspect(|(p, v)| assert!(v.is_none(), "section {s}: {p:?}"))
            .count();
        assert!(skipped > 0);
    }
}

#[test]
fn test_sign_follows_material() {
    let template = template();
    let measured = thick_scan(0.3, 0.2);
    let params = StockParams::default();

    for s in SECTIONS {
        let convex = compute_stock(
            measured.convex.section(s).unwrap(),
            template.convex.section(s).unwrap(),
            Side::Convex,
            &params,
        )
        .unwrap();
        for v in convex {
            let v = v.unwrap();
            assert!(v > 0.25 && v < 0.32, "convex section {s}: {v}");
        }

        let concave = compute_stock(
            measured.concave.section(s).unwrap(),
            template.concave.section(s).unwrap(),
            Side::Concave,
            &params,
        )
        .unwrap();
        for v in concave {
            let v = v.unwrap();
            assert!(v > 0.18 && v < 0.22, "concave section {s}: {v}");
        }
    }

    // Thin part: both sides negative
    let measured = thick_scan(-0.1, -0.1);
    let stock = compute_stock(
        measured.concave.section(14).unwrap(),
        template.concave.section(14).unwrap(),
        Side::Concave,
        &params,
    )
    .unwrap();
    assert!(stock.iter().flatten().all(|&v| v < 0.0));
}

#[test]
fn test_zone_means_aggregate_their_matrix() {
    let wp = Workpiece::new(
        test_config(),
        template(),
        with_noise(&thick_scan(0.1, 0.05), 0.01, 11),
    )
    .unwrap();
    let stock = wp.area_stock().unwrap();

    for area in [&stock.convex, &stock.concave] {
        assert_eq!(area.zones.len(), 6);
        for zone in &area.zones {
            assert_eq!(zone.mean, mean_stock(zone.matrix.values().map(Some)));
            assert_eq!(zone.mean, zone.matrix.mean());
        }
        // Leading zones of all three bands cover every area section once
        let mut covered: Vec<usize> = [1, 3, 5]
            .iter()
            .flat_map(|&id| area.zone(id).unwrap().matrix.rows().map(|(s, _)| s))
            .collect();
        covered.sort_unstable();
        assert_eq!(covered, wp.config().area_sections());
    }

    assert_relative_eq!(stock.convex.zone(1).unwrap().mean.unwrap(), 0.1, epsilon = 0.015);
    assert_relative_eq!(stock.concave.zone(6).unwrap().mean.unwrap(), 0.05, epsilon = 0.015);
}

#[test]
fn test_execution_modes_identical() {
    let config = test_config();
    let template = template();
    let measured = with_noise(&thick_scan(0.2, 0.1), 0.03, 3);
    let sections = config.area_sections();
    let params = config.stock_params();

    let run = |mode| {
        area_stock_pair(&measured, &template, &sections, &params, 1.0, mode).unwrap()
    };
    assert_eq!(run(ExecutionMode::Sequential), run(ExecutionMode::Parallel));
}

#[test]
fn test_special_region_domain() {
    let template = template();
    let sections: Vec<usize> = (10..19).collect();
    let params = StockParams::default();
    let region = SpecialRegionParams::default();

    // Bump on the convex side: first pass trips, full chord is used
    let bumped = thick_scan(0.15, 0.0);
    let result = special_stock(
        &bumped.convex,
        &template.convex,
        &sections,
        &sections,
        &region,
        &params,
    )
    .unwrap();
    assert!(result.anomaly_detected);
    assert!(result.full_domain);
    for zone in &result.stock.zones {
        for (_, row) in zone.matrix.rows() {
            assert_eq!(row.len(), POINTS);
        }
    }

    // Clean scan: chord narrowed to the width range
    let clean = thick_scan(0.02, 0.0);
    let result = special_stock(
        &clean.convex,
        &template.convex,
        &sections,
        &sections,
        &region,
        &params,
    )
    .unwrap();
    assert!(!result.anomaly_detected);
    assert!(!result.full_domain);
    for zone in &result.stock.zones {
        for (_, row) in zone.matrix.rows() {
            // x in [-2, 2] at 0.05 spacing
            assert_eq!(row.len(), 81);
        }
    }

    // Detection without switching
    let region = SpecialRegionParams {
        check_anomaly: false,
        ..SpecialRegionParams::default()
    };
    let result = special_stock(
        &bumped.convex,
        &template.convex,
        &sections,
        &sections,
        &region,
        &params,
    )
    .unwrap();
    assert!(result.anomaly_detected);
    assert!(!result.full_domain);
}
