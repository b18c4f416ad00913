pub mod bvh;

pub use bvh::{BVHNode, BVHPrimitive, BVHStats};
