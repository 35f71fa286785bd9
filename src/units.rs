// For simulating
pub type Real = f64;
pub type Point = cgmath::Point2<Real>;
pub type Vector = cgmath::Vector2<Real>;
