pub mod bitmap;
pub mod buffer;
pub mod color;
pub mod drawing;
pub mod genome;
pub mod point;
pub mod triangle;
