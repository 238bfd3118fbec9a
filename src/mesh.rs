//! Mesh store: vertex attributes plus triangle faces that index into them.
//!
//! Positions, texture coordinates and normals live in separate lists and a
//! face corner carries one index into each, the way Wavefront OBJ stores
//! them (`f v/vt/vn`). All indices are 0-based once loaded.

use std::fmt;
use std::path::Path;

use log::{info, warn};

use crate::math::vec3::Vec3;

/// One triangle corner: an index into each attribute list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexRef {
    pub position: usize,
    pub texcoord: usize,
    pub normal: usize,
}

impl VertexRef {
    pub const fn new(position: usize, texcoord: usize, normal: usize) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

/// A triangle. Corner order is the winding order and decides which side
/// faces the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub corners: [VertexRef; 3],
}

/// Errors that can occur while building or loading a mesh.
#[derive(Debug)]
pub enum LoadError {
    /// The OBJ file could not be opened or parsed.
    Obj(tobj::LoadError),
    /// An object's faces lack texture coordinate or normal indices.
    MissingAttribute {
        object: String,
        attribute: &'static str,
    },
    /// A face refers past the end of an attribute list.
    IndexOutOfRange {
        face: usize,
        attribute: &'static str,
        index: usize,
        len: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "OBJ error: {}", e),
            LoadError::MissingAttribute { object, attribute } => {
                write!(f, "object '{}' has faces without {} indices", object, attribute)
            }
            LoadError::IndexOutOfRange {
                face,
                attribute,
                index,
                len,
            } => write!(
                f,
                "face {} uses {} index {} but only {} are defined",
                face, attribute, index, len
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    texcoords: Vec<Vec3>,
    normals: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh, checking every face index against its attribute list.
    pub fn new(
        positions: Vec<Vec3>,
        texcoords: Vec<Vec3>,
        normals: Vec<Vec3>,
        faces: Vec<Face>,
    ) -> Result<Self, LoadError> {
        for (i, face) in faces.iter().enumerate() {
            for corner in &face.corners {
                check_index(i, "position", corner.position, positions.len())?;
                check_index(i, "texture coordinate", corner.texcoord, texcoords.len())?;
                check_index(i, "normal", corner.normal, normals.len())?;
            }
        }

        Ok(Self {
            positions,
            texcoords,
            normals,
            faces,
        })
    }

    /// Load every object of an OBJ file into one mesh.
    ///
    /// Polygons are triangulated as a fan. Each face must carry position,
    /// texture and normal indices (`f v/vt/vn ...`).
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            single_index: false,
            triangulate: true,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;

        let mut positions = Vec::new();
        let mut texcoords = Vec::new();
        let mut normals = Vec::new();
        let mut faces = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            if mesh.texcoord_indices.len() != mesh.indices.len() {
                return Err(LoadError::MissingAttribute {
                    object: model.name.clone(),
                    attribute: "texture coordinate",
                });
            }
            if mesh.normal_indices.len() != mesh.indices.len() {
                return Err(LoadError::MissingAttribute {
                    object: model.name.clone(),
                    attribute: "normal",
                });
            }

            // Indices are local to each object; shift them past what earlier
            // objects already contributed.
            let (pos_base, tex_base, norm_base) = (positions.len(), texcoords.len(), normals.len());

            positions.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            texcoords.extend(
                mesh.texcoords
                    .chunks_exact(2)
                    .map(|t| Vec3::new(t[0], t[1], 0.0)),
            );
            normals.extend(
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| Vec3::new(n[0], n[1], n[2])),
            );

            for tri in 0..mesh.indices.len() / 3 {
                let corner = |k: usize| {
                    let i = 3 * tri + k;
                    VertexRef::new(
                        pos_base + mesh.indices[i] as usize,
                        tex_base + mesh.texcoord_indices[i] as usize,
                        norm_base + mesh.normal_indices[i] as usize,
                    )
                };
                faces.push(Face {
                    corners: [corner(0), corner(1), corner(2)],
                });
            }
        }

        let mesh = Self::new(positions, texcoords, normals, faces)?;
        info!(
            "loaded mesh {}: {} vertices, {} faces",
            path.display(),
            mesh.vertex_count(),
            mesh.face_count()
        );
        if mesh.face_count() == 0 {
            warn!("mesh {} has no faces; the render will be blank", path.display());
        }
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn position(&self, i: usize) -> Vec3 {
        self.positions[i]
    }

    /// Texture coordinate `i`; only `x` (u) and `y` (v) are meaningful.
    pub fn texture_coord(&self, i: usize) -> Vec3 {
        self.texcoords[i]
    }

    pub fn normal(&self, i: usize) -> Vec3 {
        self.normals[i]
    }

    pub fn face(&self, i: usize) -> Face {
        self.faces[i]
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }
}

fn check_index(face: usize, attribute: &'static str, index: usize, len: usize) -> Result<(), LoadError> {
    if index < len {
        Ok(())
    } else {
        Err(LoadError::IndexOutOfRange {
            face,
            attribute,
            index,
            len,
        })
    }
}
