//! Geometries are immutable and can be shared between threads.

use std::thread;

use geom_kernel::{
    BoundingBox, Coordinates, Geom, Geometry, GeometryCollection, GeometryFactory, LineString,
    LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, PreparedGeometry,
    Segments, Vertices,
};

const SQUARE: [[f64; 2]; 5] = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]];
const HOLE: [[f64; 2]; 4] = [[1.0, 1.0], [2.0, 1.0], [1.0, 2.0], [1.0, 1.0]];

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn public_types_are_send_and_sync() {
    assert_send_sync::<Geom>();
    assert_send_sync::<Point>();
    assert_send_sync::<LineString>();
    assert_send_sync::<LinearRing>();
    assert_send_sync::<Polygon>();
    assert_send_sync::<MultiPoint>();
    assert_send_sync::<MultiLineString>();
    assert_send_sync::<MultiPolygon>();
    assert_send_sync::<GeometryCollection>();
    assert_send_sync::<GeometryFactory>();
    assert_send_sync::<Coordinates>();
    assert_send_sync::<PreparedGeometry>();
    assert_send_sync::<Vertices<'static>>();
    assert_send_sync::<Segments<'static>>();
}

#[test]
fn bounding_box_is_computed_once_for_all_threads() {
    let factory = GeometryFactory::default();
    let polygon = factory
        .polygon_from_rings(&[&SQUARE, &HOLE])
        .expect("valid polygon");
    let expected = BoundingBox::new(0.0, 0.0, 4.0, 4.0);

    let boxes: Vec<BoundingBox> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| polygon.bounding_box().clone()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread finished"))
            .collect()
    });

    assert_eq!(boxes.len(), 4);
    for bbox in &boxes {
        assert_eq!(bbox, &expected);
    }
    assert_eq!(polygon.bounding_box(), &expected);
}

#[test]
fn geometries_move_between_threads() {
    let factory = GeometryFactory::default();
    let line: Geom = factory
        .line_string(&[[0.0, 0.0], [3.0, 4.0]])
        .expect("valid line")
        .into();

    let length = thread::spawn(move || line.length())
        .join()
        .expect("thread finished");
    assert_eq!(length, 5.0);
}
