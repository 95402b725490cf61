use rayon::prelude::*;

use crate::accumulation::Accumulator;
use crate::geometry::{
    get_reflection_ray, intersect_shape, point_at, Fp, Hit, Material, Ray, Vec3f, Vec4f, MAX_DIST,
    NUDGE_DIST,
};
use crate::sampling::PixelRng;
use crate::scene::Scene;
use crate::tonemap;

/// Host-supplied uniforms for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub width: u32,
    pub height: u32,
    /// Elapsed seconds; reserved, not consumed by the tracer yet.
    pub time: Fp,
    /// Drives per-pixel seeding and the accumulation weight.
    pub frame: u32,
}

/// Nearest hit over the whole scene, primitives tested in list order.
pub fn intersect_scene<'a>(ray: &Ray, scene: &'a Scene) -> Option<(Hit, &'a Material)> {
    scene
        .primitives
        .iter()
        .filter_map(|primitive| {
            intersect_shape(ray, &primitive.shape).map(|hit| (hit, &primitive.material))
        })
        .filter(|(hit, _)| hit.offset < MAX_DIST)
        .min_by(|a, b| a.0.offset.partial_cmp(&b.0.offset).unwrap())
}

/// One path sample: walk the ray through the scene up to the bounce
/// limit, adding each surface's emission weighted by the throughput
/// carried through all prior bounces.
pub fn trace_path(scene: &Scene, ray: &Ray, rng: &mut PixelRng) -> Vec3f {
    let mut color = Vec3f::zeros();
    let mut throughput = Vec3f::new(1.0, 1.0, 1.0);

    let mut ray_origin = ray.origin;
    let mut ray_dir = ray.direction;

    for _ in 0..scene.ray_depth {
        let ray = Ray {
            origin: ray_origin,
            direction: ray_dir,
        };
        let Some((hit, material)) = intersect_scene(&ray, scene) else {
            // missed everything; the path stops contributing
            break;
        };

        ray_origin = point_at(&ray, hit.offset) + hit.normal * NUDGE_DIST;

        let is_specular = rng.next_float() < material.specular;
        let diffuse_dir = (hit.normal + rng.next_unit_vector()).normalize();
        let specular_dir = get_reflection_ray(&ray_dir, &hit.normal)
            .lerp(&diffuse_dir, material.roughness * material.roughness)
            .normalize();
        ray_dir = if is_specular { specular_dir } else { diffuse_dir };

        color += material.emissive.component_mul(&throughput);
        throughput.component_mul_assign(if is_specular {
            &material.specular_color
        } else {
            &material.albedo
        });
    }
    color
}

/// Primary ray from the pinhole camera: eye at the origin, image plane at
/// z = 1, vertical extent 1, horizontal extent scaled by aspect ratio.
/// `y` counts up from the bottom of the viewport.
pub fn pixel_ray(x: u32, y: u32, width: u32, height: u32) -> Ray {
    let u = (x as Fp + 0.5) / width as Fp;
    let v = (y as Fp + 0.5) / height as Fp;
    let aspect_ratio = width as Fp / height as Fp;
    Ray {
        origin: Vec3f::zeros(),
        direction: Vec3f::new(aspect_ratio * (u - 0.5), v - 0.5, 1.0),
    }
}

/// Single-frame estimate for one pixel: the mean of `scene.samples`
/// independent paths, one RNG stream threaded through all of them.
pub fn render_pixel(scene: &Scene, ray: &Ray, rng: &mut PixelRng) -> Vec3f {
    let mut color = Vec3f::zeros();
    for _ in 0..scene.samples {
        color += trace_path(scene, ray, rng) / scene.samples as Fp;
    }
    color
}

/// One invocation of the per-pixel kernel over the whole viewport. Rows
/// render in parallel; every pixel owns its RNG state and output slot, so
/// nothing is shared within a frame. Row 0 is the top of the image.
pub fn render_frame(scene: &Scene, input: &FrameInput) -> Vec<Vec3f> {
    log::debug!("frame {} at t={:.3}s", input.frame, input.time);
    let width = input.width as usize;
    let mut estimate = vec![Vec3f::zeros(); width * input.height as usize];
    estimate
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, pixels)| {
            let y = input.height - 1 - row as u32;
            for (x, pixel) in pixels.iter_mut().enumerate() {
                let x = x as u32;
                let mut rng = PixelRng::from_pixel(x, y, input.frame);
                let ray = pixel_ray(x, y, input.width, input.height);
                *pixel = render_pixel(scene, &ray, &mut rng);
            }
        });
    estimate
}

/// Ties the per-frame kernel to the cross-frame average: render, blend,
/// tone-map. Frames are strictly sequential; the accumulator's role swap
/// is the only state carried between them.
pub struct ProgressiveRenderer {
    pub scene: Scene,
    accumulator: Accumulator,
    width: u32,
    height: u32,
    pub exposure: Fp,
}

impl ProgressiveRenderer {
    pub fn new(scene: Scene, width: u32, height: u32, frame_cap: u32, exposure: Fp) -> Self {
        ProgressiveRenderer {
            scene,
            accumulator: Accumulator::new((width * height) as usize, frame_cap),
            width,
            height,
            exposure,
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.accumulator.frame_count()
    }

    pub fn converged(&self) -> bool {
        self.accumulator.converged()
    }

    /// Renders the next frame and folds it into the running average.
    /// Once the accumulator is frozen the frame is skipped entirely.
    pub fn advance(&mut self, time: Fp) {
        if self.accumulator.converged() {
            log::debug!("frame skipped, accumulator is frozen");
            return;
        }
        let input = FrameInput {
            width: self.width,
            height: self.height,
            time,
            frame: self.accumulator.frame_count(),
        };
        let estimate = render_frame(&self.scene, &input);
        self.accumulator.accumulate(&estimate);
    }

    /// Restarts the progressive average.
    pub fn reset(&mut self) {
        self.accumulator.reset();
    }

    /// Tone-mapped display buffer, RGBA with every channel in [0, 1].
    pub fn display(&self) -> Vec<Vec4f> {
        self.accumulator
            .current()
            .iter()
            .map(|&hdr| {
                let rgb = tonemap::tone_map(hdr, self.exposure);
                Vec4f::new(rgb.x, rgb.y, rgb.z, 1.0)
            })
            .collect()
    }
}
