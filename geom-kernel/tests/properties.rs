//! Properties that hold for every geometry kind.

use std::cmp::Ordering;

use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;

use geom_kernel::algorithm::orientation_index;
use geom_kernel::{
    FactoryConfig, Geom, Geometry, GeometryError, GeometryFactory, PrecisionModel, VertexId,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const SQUARE: [[f64; 2]; 5] = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]];
const HOLE: [[f64; 2]; 4] = [[1.0, 1.0], [2.0, 1.0], [1.0, 2.0], [1.0, 1.0]];

fn samples(factory: &GeometryFactory) -> Vec<Geom> {
    let line = factory
        .line_string(&[[3.0, 1.0], [0.0, 0.0], [2.0, 5.0]])
        .expect("valid line");
    let polygon = factory
        .polygon_from_rings(&[&SQUARE, &HOLE])
        .expect("valid polygon");
    let far = factory
        .line_string(&[[9.0, 9.0], [8.0, 8.0]])
        .expect("valid line");
    let multi_line = factory
        .multi_line_string(vec![line.clone(), far])
        .expect("valid multilinestring");

    vec![
        factory.point_xy(1.0, 2.0).into(),
        line.clone().into(),
        factory.linear_ring(&SQUARE).expect("valid ring").into(),
        polygon.clone().into(),
        factory
            .multi_point_from_vertices(&[[5.0, 5.0], [1.0, 1.0]])
            .expect("valid multipoint")
            .into(),
        multi_line.into(),
        factory
            .multi_polygon(vec![polygon.clone()])
            .expect("valid multipolygon")
            .into(),
        factory
            .geometry_collection(vec![line.into(), polygon.into()])
            .expect("valid collection")
            .into(),
        factory.empty_polygon().into(),
    ]
}

#[test]
fn reverse_twice_is_identity() {
    let factory = GeometryFactory::default();
    for geometry in samples(&factory) {
        let kind = geometry.geometry_type();
        assert_eq!(geometry.reverse().reverse(), geometry, "{kind:?}");
    }
}

#[test]
fn measures_ignore_orientation() {
    let factory = GeometryFactory::default();
    for geometry in samples(&factory) {
        let reversed = geometry.reverse();
        assert_abs_diff_eq!(reversed.area(), geometry.area(), epsilon = 1e-9);
        assert_abs_diff_eq!(reversed.length(), geometry.length(), epsilon = 1e-9);
        assert_abs_diff_eq!(geometry.normalize().area(), geometry.area(), epsilon = 1e-9);
        assert_eq!(reversed.vertex_count(), geometry.vertex_count());
        assert_eq!(reversed.bounding_box(), geometry.bounding_box());
    }
}

#[test]
fn normalize_is_idempotent() {
    let factory = GeometryFactory::default();
    for geometry in samples(&factory) {
        let normalized = geometry.normalize();
        let kind = geometry.geometry_type();
        assert_eq!(normalized.normalize(), normalized, "{kind:?}");
        let reversed = geometry.reverse().normalize();
        assert_eq!(normalized.compare(&reversed), Ordering::Equal);
    }
}

#[test]
fn copy_into_same_factory_is_equal() {
    let factory = GeometryFactory::default();
    for geometry in samples(&factory) {
        let copy = geometry.copy(&factory).expect("copied");
        assert_eq!(copy, geometry);
    }
}

#[test]
fn copy_rounds_to_target_precision() {
    init_logger();
    let factory = GeometryFactory::default();
    let precision = PrecisionModel::fixed_xy(10.0);
    let fixed = GeometryFactory::fixed(0, 2, precision).expect("valid factory");

    let line: Geom = factory
        .line_string(&[[0.123, 0.456], [1.0, 1.0]])
        .expect("valid line")
        .into();
    let copy = line.copy(&fixed).expect("copied");
    assert_eq!(copy.coordinates(), vec![0.1, 0.5, 1.0, 1.0]);
    assert_eq!(copy.copy(&fixed).expect("copied"), copy);
}

#[test]
fn closed_lines_start_where_they_end() {
    let factory = GeometryFactory::default();
    let open = factory
        .line_string(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]])
        .expect("valid line");
    let closed = open.append_vertex(&[0.0, 0.0]).expect("appended");

    assert!(!open.is_closed());
    assert!(closed.is_closed());
    assert!(factory.empty_line_string().is_closed());
}

#[test]
fn merged_line_shares_one_vertex() {
    init_logger();
    let factory = GeometryFactory::default();
    let line = |vertices: &[[f64; 2]]| factory.line_string(vertices).expect("valid line");

    let start = line(&[[0.0, 0.0], [1.0, 0.0]]);
    let others = [
        line(&[[1.0, 0.0], [2.0, 0.0], [3.0, 1.0]]),
        line(&[[-1.0, 0.0], [0.0, 0.0]]),
        line(&[[0.0, 0.0], [0.0, 1.0]]),
        line(&[[2.0, 2.0], [1.0, 0.0]]),
    ];

    for other in others {
        let merged = start.merge(&other).expect("lines touch");
        let expected = start.vertex_count() + other.vertex_count() - 1;
        assert_eq!(merged.vertex_count(), expected);
        let total = start.length() + other.length();
        assert_abs_diff_eq!(merged.length(), total, epsilon = 1e-9);
    }

    let merged = line(&[[0.0, 0.0], [1.0, 1.0]])
        .merge(&line(&[[1.0, 1.0], [2.0, 2.0]]))
        .expect("lines touch");
    assert_eq!(merged.coordinates(), vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
}

#[test]
fn disjoint_lines_are_not_merged() {
    let factory = GeometryFactory::default();
    let a = factory
        .line_string(&[[0.0, 0.0], [1.0, 1.0]])
        .expect("valid line");
    let b = factory
        .line_string(&[[5.0, 5.0], [6.0, 6.0]])
        .expect("valid line");

    assert_matches!(a.merge(&b), Err(GeometryError::DisjointLines));
    let empty = factory.empty_line_string();
    assert_matches!(a.merge(&empty), Err(GeometryError::DisjointLines));
}

#[test]
fn short_ring_is_rejected() {
    let factory = GeometryFactory::default();
    assert_matches!(
        factory.linear_ring(&[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]),
        Err(GeometryError::InvalidGeometry(_))
    );
    assert_matches!(
        factory.linear_ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
        Err(GeometryError::InvalidGeometry(_))
    );
}

#[test]
fn polygon_measures_and_addressing() {
    let factory = GeometryFactory::default();
    let polygon = factory
        .polygon_from_rings(&[&SQUARE, &HOLE])
        .expect("valid polygon");

    assert_eq!(polygon.area(), 15.5);
    assert_eq!(polygon.vertex_count(), 9);
    assert_eq!(polygon.segments().count(), 7);

    let last: Vec<VertexId> = polygon.vertices().map(|v| v.id()).skip(5).take(1).collect();
    assert_eq!(last, vec![VertexId::RingVertex { ring: 1, vertex: 0 }]);
}

#[test]
fn orientation_signs() {
    let a = [0.0, 0.0];
    let b = [4.0, 0.0];
    assert_eq!(orientation_index(&a, &b, &[2.0, 2.0]), 1);
    assert_eq!(orientation_index(&a, &b, &[2.0, -2.0]), -1);
    assert_eq!(orientation_index(&a, &b, &[8.0, 0.0]), 0);
}

#[test]
fn factory_config_round_trip() {
    let factory = GeometryFactory::builder()
        .with_srid(3857)
        .with_axis_count(3)
        .with_scale_xy(100.0)
        .build()
        .expect("valid factory");

    let config = FactoryConfig::from(&factory);
    let json = serde_json::to_string(&config).expect("serialized");
    let parsed: FactoryConfig = serde_json::from_str(&json).expect("deserialized");
    assert_eq!(parsed, config);

    let rebuilt = parsed.build().expect("valid factory");
    assert_eq!(rebuilt.srid(), 3857);
    assert_eq!(rebuilt.axis_count(), 3);
    assert_eq!(rebuilt.make_precise(0, 1.234), 1.23);
}
