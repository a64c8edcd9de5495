pub mod sea_points;
