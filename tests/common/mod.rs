use camsnap::config_loader::CameraSet;
use image::DynamicImage;
use std::collections::BTreeMap;
use std::io::Cursor;

/// A small but real JPEG body for mock cameras to serve.
pub fn tiny_jpeg() -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        4,
        4,
        image::Rgb([200, 30, 30]),
    ));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
        .unwrap();
    bytes
}

pub fn camera_set(entries: &[(&str, &str)]) -> CameraSet {
    CameraSet::from_fragments(entries.iter().map(|(name, subdir)| {
        let mut fragment = BTreeMap::new();
        fragment.insert(name.to_string(), subdir.to_string());
        fragment
    }))
}
