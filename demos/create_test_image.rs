use image::{Rgb, RgbImage};

fn main() {
    let width = 800u32;
    let height = 600u32;
    let mut img = RgbImage::new(width, height);

    // Soft vertical gradient for the background
    for y in 0..height {
        for x in 0..width {
            let shade = 140 + (y * 80 / height) as u8;
            img.put_pixel(x, y, Rgb([shade, shade, shade]));
        }
    }

    // Darker S-curved band down the middle, roughly where a spine would sit
    for y in 0..height {
        let t = y as f64 / height as f64;
        let center = width as f64 / 2.0 + 30.0 * (t * std::f64::consts::PI).sin();
        for x in 0..width {
            let dist = (x as f64 - center).abs();
            if dist < 25.0 {
                let shade = 60 + (dist * 3.0) as u8;
                img.put_pixel(x, y, Rgb([shade, shade, shade]));
            }
        }
    }

    img.save("test_spine.jpg").unwrap();
    println!("Created test_spine.jpg ({}x{} synthetic posture frame)", width, height);
}
