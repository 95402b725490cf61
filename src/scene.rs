use crate::geometry::{Material, Shape3D, Vec3f};

#[derive(Clone, Debug)]
pub struct Primitive {
    pub shape: Shape3D,
    pub material: Material,
}

/// Immutable scene description, built once and passed by reference into
/// the tracer. Primitives are tested in list order.
#[derive(Debug)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    /// Independent paths traced per pixel per frame.
    pub samples: i32,
    /// Bounce limit per path.
    pub ray_depth: i32,
}

/// The stock scene: an area light, five room-bounding quads and one
/// rough-specular sphere.
pub fn cornell_box() -> Scene {
    let light_material = Material {
        albedo: Vec3f::zeros(),
        emissive: Vec3f::new(1.0, 0.9, 0.7) * 25.0,
        specular_color: Vec3f::zeros(),
        specular: 0.0,
        roughness: 0.0,
    };
    let wall_material = Material {
        albedo: Vec3f::new(0.7, 0.7, 0.7),
        emissive: Vec3f::zeros(),
        specular_color: Vec3f::zeros(),
        specular: 0.0,
        roughness: 0.0,
    };
    let red_material = Material {
        albedo: Vec3f::new(0.7, 0.1, 0.1),
        ..wall_material.clone()
    };
    let green_material = Material {
        albedo: Vec3f::new(0.1, 0.7, 0.1),
        ..wall_material.clone()
    };
    let sphere_material = Material {
        albedo: Vec3f::new(0.5, 0.9, 0.9),
        emissive: Vec3f::zeros(),
        specular_color: Vec3f::new(1.0, 1.0, 1.0),
        specular: 1.0,
        roughness: 0.7,
    };

    let quad = |verts: [Vec3f; 4], material: &Material| Primitive {
        shape: Shape3D::Quad { verts },
        material: material.clone(),
    };

    let light = quad(
        [
            Vec3f::new(-0.6, 1.28, 3.0),
            Vec3f::new(0.6, 1.28, 3.0),
            Vec3f::new(0.6, 1.28, 3.7),
            Vec3f::new(-0.6, 1.28, 3.7),
        ],
        &light_material,
    );
    let back_wall = quad(
        [
            Vec3f::new(-1.3, -1.3, 4.0),
            Vec3f::new(1.3, -1.3, 4.0),
            Vec3f::new(1.3, 1.3, 4.0),
            Vec3f::new(-1.3, 1.3, 4.0),
        ],
        &wall_material,
    );
    let ceiling = quad(
        [
            Vec3f::new(-1.3, 1.3, 4.0),
            Vec3f::new(1.3, 1.3, 4.0),
            Vec3f::new(1.3, 1.3, 2.7),
            Vec3f::new(-1.3, 1.3, 2.7),
        ],
        &wall_material,
    );
    let floor = quad(
        [
            Vec3f::new(-1.3, -1.3, 4.0),
            Vec3f::new(1.3, -1.3, 4.0),
            Vec3f::new(1.3, -1.3, 2.7),
            Vec3f::new(-1.3, -1.3, 2.7),
        ],
        &wall_material,
    );
    let left_wall = quad(
        [
            Vec3f::new(-1.3, -1.31, 4.0),
            Vec3f::new(-1.3, -1.31, 2.7),
            Vec3f::new(-1.3, 1.31, 2.7),
            Vec3f::new(-1.3, 1.31, 4.0),
        ],
        &red_material,
    );
    let right_wall = quad(
        [
            Vec3f::new(1.3, -1.31, 4.0),
            Vec3f::new(1.3, -1.31, 2.7),
            Vec3f::new(1.3, 1.31, 2.7),
            Vec3f::new(1.3, 1.31, 4.0),
        ],
        &green_material,
    );
    let sphere = Primitive {
        shape: Shape3D::Sphere {
            origin: Vec3f::new(0.0, 0.0, 3.35),
            radius: 0.4,
        },
        material: sphere_material,
    };

    Scene {
        // light first, then walls, then the sphere
        primitives: vec![
            light, back_wall, ceiling, floor, left_wall, right_wall, sphere,
        ],
        samples: 16,
        ray_depth: 8,
    }
}
