//! Textures: decoded images and their GPU uploads.

use std::path::{Path, PathBuf};
use thiserror::Error;
use wgpu::util::DeviceExt;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A decoded RGBA8 image.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, path)
    }

    /// Decode an in-memory image; `origin` is only used in errors.
    pub fn from_bytes(bytes: &[u8], origin: &Path) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|source| AssetError::Decode {
            path: origin.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}

/// UV scale that makes an image cover the whole screen, cropping the
/// overflowing axis around the centre.
pub fn cover_uv_scale(image_w: u32, image_h: u32, screen_w: u32, screen_h: u32) -> [f32; 2] {
    if image_w == 0 || image_h == 0 || screen_w == 0 || screen_h == 0 {
        return [1.0, 1.0];
    }
    let image_aspect = image_w as f32 / image_h as f32;
    let screen_aspect = screen_w as f32 / screen_h as f32;
    if image_aspect > screen_aspect {
        [screen_aspect / image_aspect, 1.0]
    } else {
        [1.0, image_aspect / screen_aspect]
    }
}

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Upload an sRGB colour image with linear filtering.
    pub fn from_image(device: &wgpu::Device, queue: &wgpu::Queue, image: &ImageData, label: &str) -> Self {
        Self::upload(
            device,
            queue,
            label,
            image.width,
            image.height,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            &image.rgba,
            wgpu::FilterMode::Linear,
        )
    }

    /// The bitmap font atlas, sampled with nearest filtering.
    pub fn font_atlas(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let (pixels, w, h) = crate::vertex::generate_font_atlas();
        Self::upload(
            device,
            queue,
            "Font Atlas",
            w,
            h,
            wgpu::TextureFormat::R8Unorm,
            &pixels,
            wgpu::FilterMode::Nearest,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        data: &[u8],
        filter: wgpu::FilterMode,
    ) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: filter,
            min_filter: filter,
            ..Default::default()
        });
        Self {
            texture,
            view,
            sampler,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ImageData::load(Path::new("does/not/exist.jpg")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(err.to_string().contains("exist.jpg"));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = ImageData::from_bytes(b"not an image", Path::new("bg.jpg")).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn png_decodes_to_rgba() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let data = ImageData::from_bytes(&bytes, Path::new("mem.png")).unwrap();
        assert_eq!((data.width, data.height), (3, 2));
        assert_eq!(data.rgba.len(), 3 * 2 * 4);
        assert_eq!(&data.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn cover_crops_the_wider_axis() {
        // Wide image on a 4:3 screen: crop horizontally.
        let [sx, sy] = cover_uv_scale(1920, 1080, 800, 600);
        assert!((sx - (4.0 / 3.0) / (16.0 / 9.0)).abs() < 1e-6);
        assert_eq!(sy, 1.0);
        // Tall image: crop vertically.
        let [sx, sy] = cover_uv_scale(600, 800, 1280, 720);
        assert_eq!(sx, 1.0);
        assert!(sy < 1.0);
        assert_eq!(cover_uv_scale(0, 10, 10, 10), [1.0, 1.0]);
    }
}
