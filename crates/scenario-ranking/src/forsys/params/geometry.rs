use geo::{LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize, Serializer};

use super::error::RequestParamsError;
use crate::forsys::repository::StoredGeometry;

/// Coordinate reference system assumed when a geometry does not name one.
pub const DEFAULT_SRID: i32 = 4269;

const MIN_RING_POINTS: usize = 4;

/// A project area or planning area: an id-tagged, SRID-tagged multipolygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectAreaGeometry {
    id: i64,
    srid: i32,
    polygons: MultiPolygon<f64>,
}

impl ProjectAreaGeometry {
    pub fn from_stored(id: i64, stored: &StoredGeometry) -> Self {
        Self {
            id,
            srid: stored.srid,
            polygons: stored.polygons.clone(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn polygons(&self) -> &MultiPolygon<f64> {
        &self.polygons
    }

    /// Exterior ring coordinates of every polygon, in input order.
    pub fn rings(&self) -> Vec<Vec<(f64, f64)>> {
        self.polygons
            .0
            .iter()
            .map(|polygon| polygon.exterior().coords().map(|c| (c.x, c.y)).collect())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct GeometryPayload {
    id: Option<i64>,
    srid: Option<i32>,
    polygons: Option<Vec<PolygonPayload>>,
}

#[derive(Debug, Deserialize)]
struct PolygonPayload {
    coordinates: Vec<[f64; 2]>,
}

/// Parses one JSON geometry record carried by the url parameter `field`.
pub(crate) fn parse_geometry(
    field: &'static str,
    raw: &str,
) -> Result<ProjectAreaGeometry, RequestParamsError> {
    let payload: GeometryPayload = serde_json::from_str(raw)
        .map_err(|source| RequestParamsError::MalformedField { field, source })?;

    let id = payload.id.ok_or_else(|| {
        RequestParamsError::MissingField(format!("url params, {field}, missing field, \"id\""))
    })?;
    let polygons = payload.polygons.ok_or_else(|| {
        RequestParamsError::MissingField(format!(
            "url parameter, {field}, missing field, \"polygons\""
        ))
    })?;
    if polygons.is_empty() {
        return Err(RequestParamsError::EmptyList(format!(
            "url parameter, {field}, field, \"polygons\" is an empty list"
        )));
    }

    let polygons = polygons
        .iter()
        .map(|polygon| polygon_from_ring(field, &polygon.coordinates))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProjectAreaGeometry {
        id,
        srid: payload.srid.unwrap_or(DEFAULT_SRID),
        polygons: MultiPolygon::new(polygons),
    })
}

fn polygon_from_ring(
    field: &'static str,
    coordinates: &[[f64; 2]],
) -> Result<Polygon<f64>, RequestParamsError> {
    if coordinates.len() < MIN_RING_POINTS {
        return Err(RequestParamsError::GeometryConstruction(format!(
            "invalid polygon in url parameter, {field}: LinearRing requires at least {MIN_RING_POINTS} points, got {}",
            coordinates.len()
        )));
    }
    if coordinates
        .iter()
        .any(|[x, y]| !x.is_finite() || !y.is_finite())
    {
        return Err(RequestParamsError::GeometryConstruction(format!(
            "invalid polygon in url parameter, {field}: coordinates must be finite"
        )));
    }

    // Polygon::new closes the exterior ring when the input leaves it open.
    let ring: LineString<f64> = coordinates.iter().copied().collect();
    Ok(Polygon::new(ring, Vec::new()))
}

/// Builds a geometry from literal rings; used for built-in defaults.
pub(crate) fn geometry_from_rings(id: i64, rings: &[&[[f64; 2]]]) -> ProjectAreaGeometry {
    let polygons = rings
        .iter()
        .map(|ring| Polygon::new(ring.iter().copied().collect(), Vec::new()))
        .collect();
    ProjectAreaGeometry {
        id,
        srid: DEFAULT_SRID,
        polygons: MultiPolygon::new(polygons),
    }
}

#[derive(Serialize)]
struct GeometryView {
    id: i64,
    srid: i32,
    polygons: Vec<PolygonView>,
}

#[derive(Serialize)]
struct PolygonView {
    coordinates: Vec<[f64; 2]>,
}

impl Serialize for ProjectAreaGeometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GeometryView {
            id: self.id,
            srid: self.srid,
            polygons: self
                .rings()
                .into_iter()
                .map(|ring| PolygonView {
                    coordinates: ring.into_iter().map(|(x, y)| [x, y]).collect(),
                })
                .collect(),
        }
        .serialize(serializer)
    }
}
