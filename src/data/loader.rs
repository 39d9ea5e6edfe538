//! CSV file handling for swarm topologies

use crate::data::points::{Point, PointId, PointSet};
use crate::error::AnalysisError;
use anyhow::Result;
use polars::prelude::*;
use std::path::Path;

pub const ID_COLUMN: &str = "sat_id";
pub const COORDINATE_COLUMNS: [&str; 3] = ["x", "y", "z"];

/// Load a swarm topology (`sat_id,x,y,z` with a header row) into a validated point set
pub fn load_point_set(path: impl AsRef<Path>) -> Result<PointSet> {
    let path = path.as_ref();
    log::info!("Reading topology file: {}", path.display());

    if !path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()?
        .collect()?;

    log::debug!("File schema: {:?}", df.schema());

    let points = point_set_from_frame(&df)?;
    log::info!("Loaded {} satellites from {}", points.len(), path.display());

    Ok(points)
}

/// Convert an already loaded frame into a point set, row order preserved
pub fn point_set_from_frame(df: &DataFrame) -> Result<PointSet> {
    let ids = read_ids(df)?;

    let mut coordinates = Vec::with_capacity(COORDINATE_COLUMNS.len());
    for name in COORDINATE_COLUMNS {
        let series = df
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        coordinates.push(series);
    }

    let xs = coordinates[0].f64()?;
    let ys = coordinates[1].f64()?;
    let zs = coordinates[2].f64()?;

    let mut points = Vec::with_capacity(df.height());
    for (row, id) in ids.into_iter().enumerate() {
        let (x, y, z) = match (xs.get(row), ys.get(row), zs.get(row)) {
            (Some(x), Some(y), Some(z)) => (x, y, z),
            _ => {
                return Err(AnalysisError::InvalidInput(format!(
                    "row {} (satellite {}) is missing a coordinate",
                    row, id
                ))
                .into())
            }
        };
        points.push(Point { id, position: [x, y, z] });
    }

    Ok(PointSet::new(points)?)
}

fn read_ids(df: &DataFrame) -> Result<Vec<PointId>> {
    let column = df.column(ID_COLUMN)?.as_materialized_series();

    let ids = if column.dtype().is_integer() {
        let cast = column.cast(&DataType::Int64)?;
        cast.i64()?
            .into_iter()
            .map(|id| id.map(PointId::Int))
            .collect::<Vec<_>>()
    } else {
        let cast = column.cast(&DataType::String)?;
        cast.str()?
            .into_iter()
            .map(|id| id.map(PointId::from))
            .collect::<Vec<_>>()
    };

    ids.into_iter()
        .enumerate()
        .map(|(row, id)| {
            id.ok_or_else(|| {
                AnalysisError::InvalidInput(format!("row {} has no {}", row, ID_COLUMN)).into()
            })
        })
        .collect()
}
