use imageprocessor_rust::filters::pixel::opaque_rgb;
use imageprocessor_rust::PixelBuffer;

/// Solid-color buffer.
pub fn solid(width: usize, height: usize, r: u8, g: u8, b: u8) -> PixelBuffer {
    PixelBuffer::filled(width, height, opaque_rgb(r, g, b)).expect("valid dimensions")
}

/// Buffer whose pixels sweep through the color cube.
pub fn color_sweep(width: usize, height: usize) -> PixelBuffer {
    let pixels = (0..width * height)
        .map(|i| {
            let r = (i * 37 % 256) as u8;
            let g = (i * 91 % 256) as u8;
            let b = (i * 13 % 256) as u8;
            opaque_rgb(r, g, b)
        })
        .collect();
    PixelBuffer::new(width, height, pixels).expect("valid dimensions")
}
