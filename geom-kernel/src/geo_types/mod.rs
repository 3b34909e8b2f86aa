//! Conversions between the kernel geometries and [`geo_types`] structs.

mod line_string;
mod point;
mod polygon;
