//! Small-dimension vector and matrix algebra.

pub mod mat4;
pub mod vec3;
pub mod vec4;
