mod accumulation;
mod geometry;
mod rendering;
mod sampling;
mod scene;
mod tonemap;

extern crate nalgebra as na;

use std::fs::File;
use std::io::Write;
use std::time::Instant;

use image::{ImageFormat, Rgba, RgbaImage};
use indicatif::{ProgressBar, ProgressStyle};

use crate::geometry::{Fp, Vec4f};
use crate::rendering::ProgressiveRenderer;
use crate::scene::cornell_box;
use crate::tonemap::EXPOSURE;

static FRAME_CAP: u32 = 500;

fn main() {
    env_logger::init();

    // WIDTH HEIGHT FRAMES OUT_PNG [OUT_PPM]
    let args: Vec<String> = std::env::args().collect();
    let parse = |index: usize, default: u32| -> u32 {
        args.get(index)
            .map(|arg| arg.parse().expect("expected an unsigned integer argument"))
            .unwrap_or(default)
    };
    let width = parse(1, 512);
    let height = parse(2, 512);
    let frames = parse(3, 64);
    let png_path = args.get(4).cloned().unwrap_or_else(|| "render.png".into());

    let scene = cornell_box();
    let mut renderer = ProgressiveRenderer::new(scene, width, height, FRAME_CAP, EXPOSURE);

    let start = Instant::now();
    let progress = ProgressBar::new(frames as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{wide_bar}] {pos}/{len} frames")
            .unwrap()
            .progress_chars("#>-"),
    );
    for _ in 0..frames {
        if renderer.converged() {
            break;
        }
        renderer.advance(start.elapsed().as_secs_f32());
        progress.inc(1);
    }
    progress.finish();

    log::info!(
        "accumulated {} frames at {}x{} in {:.2?} ({} paths per pixel)",
        renderer.frame_count(),
        width,
        height,
        start.elapsed(),
        renderer.frame_count() as i64 * renderer.scene.samples as i64,
    );

    let display = renderer.display();
    let mut img = RgbaImage::new(width, height);
    for (pixel, rgba) in img.pixels_mut().zip(&display) {
        *pixel = Rgba([
            to_byte(rgba.x),
            to_byte(rgba.y),
            to_byte(rgba.z),
            to_byte(rgba.w),
        ]);
    }
    img.save_with_format(&png_path, ImageFormat::Png)
        .expect("failed writing png");
    println!("wrote {}", png_path);

    if let Some(ppm_path) = args.get(5) {
        let mut out_file = File::create(ppm_path).expect("failed opening ppm");
        dump_rendered_to_ppm(width, height, &display, &mut out_file);
        println!("wrote {}", ppm_path);
    }
}

fn to_byte(channel: Fp) -> u8 {
    (channel * 255.0).round() as u8
}

fn dump_rendered_to_ppm(width: u32, height: u32, display: &[Vec4f], out_file: &mut File) {
    out_file.write_all(b"P6\n").unwrap();
    out_file
        .write_all(format!("{} {}\n", width, height).as_bytes())
        .unwrap();
    out_file.write_all(b"255\n").unwrap();
    let mut bytes = Vec::with_capacity(display.len() * 3);
    for rgba in display {
        bytes.push(to_byte(rgba.x));
        bytes.push(to_byte(rgba.y));
        bytes.push(to_byte(rgba.z));
    }
    out_file.write_all(&bytes).unwrap();
}
