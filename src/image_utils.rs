use image::{Rgb, RgbImage, imageops::FilterType};
use ndarray::Array3;

pub fn rgb_to_array(image: &RgbImage) -> Array3<f64> {
    let (width, height) = image.dimensions();
    let mut arr = Array3::zeros((height as usize, width as usize, 3));

    for (x, y, pixel) in image.enumerate_pixels() {
        for c in 0..3 {
            arr[[y as usize, x as usize, c]] = pixel[c] as f64;
        }
    }

    arr
}

pub fn array_to_rgb(arr: &Array3<f64>) -> RgbImage {
    let (height, width, _) = arr.dim();
    let mut image = RgbImage::new(width as u32, height as u32);

    for y in 0..height {
        for x in 0..width {
            let pixel = Rgb([
                arr[[y, x, 0]].round().clamp(0.0, 255.0) as u8,
                arr[[y, x, 1]].round().clamp(0.0, 255.0) as u8,
                arr[[y, x, 2]].round().clamp(0.0, 255.0) as u8,
            ]);
            image.put_pixel(x as u32, y as u32, pixel);
        }
    }

    image
}

/// Bilinear resize; the classifier input contract depends on this filter choice.
pub fn resize_bilinear(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    image::imageops::resize(image, width, height, FilterType::Triangle)
}

/// Rescale 8-bit channels to f32 in [0, 1].
pub fn to_unit_tensor(image: &RgbImage) -> Array3<f32> {
    let (width, height) = image.dimensions();
    let mut arr = Array3::zeros((height as usize, width as usize, 3));

    for (x, y, pixel) in image.enumerate_pixels() {
        for c in 0..3 {
            arr[[y as usize, x as usize, c]] = pixel[c] as f32 / 255.0;
        }
    }

    arr
}
