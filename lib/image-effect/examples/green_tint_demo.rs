use image::ImageReader;
use image_effect::{Effect, GreenTint};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img_path = std::env::args().nth(1).unwrap_or("data/test.png".to_string());
    let mut img = ImageReader::open(&img_path)?.decode()?.to_rgba8();

    GreenTint.apply(&mut img);
    img.save(output_dir.join("green_tint_effect.png"))?;

    println!("✓ Green tint effect applied successfully!");
    println!("  Input: {img_path}");
    println!("  Effect: tmp/green_tint_effect.png");

    Ok(())
}
