#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Carving Example
//!
//! Builds up density with overlapping thick curves, carves a ring out of it,
//! then paints through the host framebuffer and exports two color ramps.
//!
//! Run with: `cargo run --example carving`

use trueno_canvas::prelude::*;

fn main() {
    println!("Carving Example");
    println!("===============\n");

    let mut canvas = Canvas::new(400, 400).expect("Failed to create canvas");

    // Step 1: a fan of cubic curves
    println!("1. Drawing 40 overlapping cubic curves...");
    canvas.set_weight(6.0);
    canvas.set_intensity(0.4);
    for i in 0..40 {
        let t = i as f32 / 40.0;
        canvas.cubic_bezier(
            20.0,
            380.0,
            40.0 + 320.0 * t,
            20.0,
            360.0 - 320.0 * t,
            380.0,
            380.0,
            20.0,
        );
    }
    println!("   Max intensity: {:.2}\n", canvas.max_value());

    // Step 2: carve a ring
    println!("2. Carving a ring through the center...");
    canvas.set_carve(true);
    canvas.set_centered(true);
    canvas.set_intensity(4.0);
    canvas.set_weight(14.0);
    canvas.circle(200.0, 200.0, 120.0);
    canvas.set_carve(false);
    println!("   Max intensity: {:.2}\n", canvas.max_value());

    // Step 3: free-form pixels through the host buffer
    println!("3. Stamping a block through the host framebuffer...");
    canvas.set_intensity(1.5);
    let host = canvas.buffer_canvas();
    host.fill_rect(180, 180, 40, 40, Rgba::WHITE);
    for r in (0..60u32).step_by(4) {
        let alpha = 200 - (r * 3) as u8;
        for x in 200 - r..200 + r {
            host.blend_pixel(x, 200 - r, Rgba::new(255, 255, 255, alpha));
            host.blend_pixel(x, 200 + r, Rgba::new(255, 255, 255, alpha));
        }
    }
    canvas.apply_buffer();

    // Step 4: export with an RGB ramp
    println!("4. Exporting RGB ramp...");
    canvas.set_start_color(10.0, 10.0, 30.0);
    canvas.set_target_color(255.0, 220.0, 160.0);
    canvas.save_png("carving_rgb.png").expect("Failed to write PNG");
    println!("   Saved: carving_rgb.png\n");

    // Step 5: same grid, HSB ramp
    println!("5. Exporting HSB ramp...");
    canvas.set_hsb(true);
    canvas.set_start_color(240.0, 90.0, 15.0);
    canvas.set_target_color(40.0, 80.0, 100.0);
    canvas.save_png("carving_hsb.png").expect("Failed to write PNG");
    println!("   Saved: carving_hsb.png");
}
