// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! PLY point cloud loader

use crate::error::{EvalError, Result};
use crate::geometry::PointCloud;
use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property, PropertyType};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const VERTEX: &str = "vertex";
const AXES: [&str; 3] = ["x", "y", "z"];

/// Read the vertex positions of an ASCII or binary PLY file.
///
/// Coordinates of any scalar type are widened to `f64`. A file without a
/// `vertex` element, without scalar `x`/`y`/`z` properties, or with zero
/// vertices is rejected.
pub fn read_point_cloud(path: impl AsRef<Path>) -> Result<PointCloud> {
    let path = path.as_ref();
    let read_err = |source| EvalError::PlyRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();
    let ply = parser.read_ply(&mut reader).map_err(read_err)?;

    let element = ply
        .header
        .elements
        .get(VERTEX)
        .ok_or_else(|| EvalError::MissingVertexElement(path.to_path_buf()))?;

    for axis in AXES {
        let is_scalar = matches!(
            element.properties.get(axis).map(|p| &p.data_type),
            Some(PropertyType::Scalar(_))
        );
        if !is_scalar {
            return Err(EvalError::MissingVertexProperty {
                path: path.to_path_buf(),
                property: axis,
            });
        }
    }

    let vertices = ply.payload.get(VERTEX).map(Vec::as_slice).unwrap_or(&[]);
    let mut cloud = PointCloud::with_capacity(vertices.len());

    for vertex in vertices {
        let mut coords = [0.0; 3];
        for (coord, axis) in coords.iter_mut().zip(AXES) {
            *coord = vertex
                .get(axis)
                .and_then(scalar_value)
                .ok_or_else(|| EvalError::MissingVertexProperty {
                    path: path.to_path_buf(),
                    property: axis,
                })?;
        }
        cloud.push(Point3::new(coords[0], coords[1], coords[2]));
    }

    if cloud.is_empty() {
        return Err(EvalError::EmptyPointCloud);
    }

    log::debug!("Loaded {} points from {}", cloud.len(), path.display());
    Ok(cloud)
}

fn scalar_value(property: &Property) -> Option<f64> {
    match *property {
        Property::Char(v) => Some(v as f64),
        Property::UChar(v) => Some(v as f64),
        Property::Short(v) => Some(v as f64),
        Property::UShort(v) => Some(v as f64),
        Property::Int(v) => Some(v as f64),
        Property::UInt(v) => Some(v as f64),
        Property::Float(v) => Some(v as f64),
        Property::Double(v) => Some(v),
        _ => None,
    }
}
