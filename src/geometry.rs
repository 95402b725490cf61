use nalgebra::{Vector3, Vector4};

pub type Fp = f32;
pub type Vec3f = Vector3<Fp>;
pub type Vec4f = Vector4<Fp>;

// offset applied along the surface normal after a bounce so the new ray
// does not re-intersect the surface it just left
pub static NUDGE_DIST: Fp = 0.01;
// "no hit" sentinel distance
pub static MAX_DIST: Fp = 10000.0;

#[derive(Clone, Debug)]
pub struct Ray {
    pub origin: Vec3f,
    pub direction: Vec3f,
}

/// Hit record for a single primitive test. `offset` is the ray parameter
/// of the hit point, strictly positive.
#[derive(Clone, Debug)]
pub struct Hit {
    pub offset: Fp,
    pub normal: Vec3f,
}

#[derive(Clone, Debug)]
pub struct Material {
    pub albedo: Vec3f,
    pub emissive: Vec3f,
    pub specular_color: Vec3f,
    /// Probability of a mirror-like bounce instead of a diffuse one.
    pub specular: Fp,
    /// Blends the mirror direction toward the diffuse one by roughness^2.
    pub roughness: Fp,
}

#[derive(Clone, Debug)]
pub enum Shape3D {
    Sphere { origin: Vec3f, radius: Fp },
    Quad { verts: [Vec3f; 4] },
}

pub fn point_at(ray: &Ray, offset: Fp) -> Vec3f {
    ray.origin + ray.direction * offset
}

pub fn get_reflection_ray(ray: &Vec3f, normal: &Vec3f) -> Vec3f {
    let projection = -ray.dot(normal);
    ray + normal * projection * 2.0
}

pub fn scalar_triple(u: &Vec3f, v: &Vec3f, w: &Vec3f) -> Fp {
    u.cross(v).dot(w)
}

pub fn intersect_shape(ray: &Ray, shape: &Shape3D) -> Option<Hit> {
    match shape {
        Shape3D::Sphere { origin, radius } => intersect_sphere(ray, origin, *radius),
        Shape3D::Quad { verts } => intersect_quad(ray, verts),
    }
}

fn intersect_sphere(ray: &Ray, origin: &Vec3f, radius: Fp) -> Option<Hit> {
    let to_ray = ray.origin - origin;
    let a = ray.direction.dot(&ray.direction);
    let b = 2.0 * ray.direction.dot(&to_ray);
    let c = to_ray.dot(&to_ray) - radius * radius;
    let discr = b * b - 4.0 * a * c;
    if discr < 0.0 {
        return None;
    }
    // only the near root counts, so a ray born inside the sphere misses it
    let offset = (-b - discr.sqrt()) / (2.0 * a);
    if offset > 0.0 {
        let normal = (point_at(ray, offset) - origin).normalize();
        Some(Hit { offset, normal })
    } else {
        None
    }
}

// Two-triangle decomposition with signed-volume containment tests. The quad
// is double-sided: when the ray approaches the back face, both the normal
// and the winding are flipped so the normal always faces the incoming ray.
// Vertices are assumed coplanar, convex and consistently wound; degenerate
// quads give wrong but finite results.
fn intersect_quad(ray: &Ray, verts: &[Vec3f; 4]) -> Option<Hit> {
    let [mut a, mut b, mut c, mut d] = *verts;

    let mut normal = (c - a).cross(&(c - b)).normalize();
    let facing = normal.dot(&ray.direction);
    if facing == 0.0 {
        return None;
    }
    if facing > 0.0 {
        normal = -normal;
        std::mem::swap(&mut a, &mut d);
        std::mem::swap(&mut b, &mut c);
    }

    let p = ray.origin;
    let q = ray.origin + ray.direction;
    let pq = q - p;
    let pa = a - p;
    let pb = b - p;
    let pc = c - p;

    // which of the two triangles does the line p->q pierce?
    let m = pc.cross(&pq);
    let v = pa.dot(&m);
    let intersect_pos = if v >= 0.0 {
        let u = -pb.dot(&m);
        if u < 0.0 {
            return None;
        }
        let w = scalar_triple(&pq, &pb, &pa);
        if w < 0.0 {
            return None;
        }
        let denom = 1.0 / (u + v + w);
        (u * a + v * b + w * c) * denom
    } else {
        let pd = d - p;
        let u = pd.dot(&m);
        if u < 0.0 {
            return None;
        }
        let w = scalar_triple(&pq, &pa, &pd);
        if w < 0.0 {
            return None;
        }
        let v = -v;
        let denom = 1.0 / (u + v + w);
        (u * a + v * d + w * c) * denom
    };

    // back-solve the ray parameter along the dominant direction axis to
    // stay clear of near-zero divisors
    let axis = ray.direction.iamax();
    let offset = (intersect_pos[axis] - ray.origin[axis]) / ray.direction[axis];
    if offset > 0.0 {
        Some(Hit { offset, normal })
    } else {
        None
    }
}
