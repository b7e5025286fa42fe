//! PNG rasterization and RGBA image helpers.
//!
//! Charts are rendered to SVG, rasterized with `resvg` and encoded with the
//! `png` crate. The same helpers decode and stitch existing PNGs for
//! side-by-side comparisons.

use std::io::Cursor;

use resvg::{tiny_skia, usvg};

use super::{Chart, ChartRenderer, svg};

/// 8-bit RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl RgbaImage {
    /// Fully transparent image.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Copy `src` into this image with its top-left corner at `(x, y)`.
    /// Pixels falling outside the canvas are dropped.
    pub fn blit(&mut self, src: &RgbaImage, x: u32, y: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let copy_w = src.width.min(self.width - x) as usize;
        let copy_h = src.height.min(self.height - y);
        for row in 0..copy_h {
            let src_start = (row * src.width) as usize * 4;
            let dst_start = ((y + row) * self.width + x) as usize * 4;
            self.data[dst_start..dst_start + copy_w * 4]
                .copy_from_slice(&src.data[src_start..src_start + copy_w * 4]);
        }
    }
}

/// Place `right` to the right of `left` on a canvas as tall as the taller one.
pub fn side_by_side(left: &RgbaImage, right: &RgbaImage) -> RgbaImage {
    let mut canvas = RgbaImage::blank(left.width + right.width, left.height.max(right.height));
    canvas.blit(left, 0, 0);
    canvas.blit(right, left.width, 0);
    canvas
}

/// Encode RGBA pixels as PNG.
pub fn encode(image: &RgbaImage) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(|e| e.to_string())?;
        writer
            .write_image_data(&image.data)
            .map_err(|e| e.to_string())?;
        writer.finish().map_err(|e| e.to_string())?;
    }
    Ok(out)
}

/// Decode a PNG of any 8/16-bit color type into RGBA.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, String> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(|e| e.to_string())?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(|e| e.to_string())?;
    buf.truncate(info.buffer_size());

    let data = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::Indexed => return Err("indexed PNG was not expanded".to_string()),
    };

    Ok(RgbaImage {
        width: info.width,
        height: info.height,
        data,
    })
}

/// Rasterize an SVG document into an RGBA image of the given size.
pub fn rasterize(markup: &str, options: &usvg::Options<'_>, width: u32, height: u32) -> Result<RgbaImage, String> {
    let tree = usvg::Tree::from_data(markup.as_bytes(), options)
        .map_err(|e| format!("SVG parse failed: {e}"))?;
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or("pixmap allocation failed")?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // The chart background is opaque, so premultiplied and straight alpha agree.
    Ok(RgbaImage {
        width,
        height,
        data: pixmap.take(),
    })
}

/// Chart backend producing PNG images.
pub struct PngRenderer {
    options: usvg::Options<'static>,
}

impl PngRenderer {
    /// Create a renderer with the system font database loaded.
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        Self { options }
    }
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for PngRenderer {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn render(&self, chart: &Chart<'_>) -> Result<Vec<u8>, String> {
        let markup = svg::markup(chart);
        let image = rasterize(&markup, &self.options, chart.layout.width, chart.layout.height)?;
        encode(&image)
    }
}
