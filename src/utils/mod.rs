pub mod coordinates;
pub mod geojson;
