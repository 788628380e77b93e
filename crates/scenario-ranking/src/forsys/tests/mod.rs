mod common;
mod params;
