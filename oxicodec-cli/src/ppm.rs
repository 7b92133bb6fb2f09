//! Binary PPM (P6) reading and writing.

use oxicodec::quantize::{ColorModel, RasterImage};
use std::io;

fn invalid(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.into())
}

/// Header tokenizer that skips whitespace and `#` comments.
struct Header<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Header<'a> {
    fn skip_space(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> io::Result<&'a [u8]> {
        self.skip_space();
        let start = self.pos;
        while self
            .data
            .get(self.pos)
            .is_some_and(|b| !b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(invalid("truncated PPM header"));
        }
        let data = self.data;
        Ok(&data[start..self.pos])
    }

    fn number(&mut self, what: &str) -> io::Result<u32> {
        let token = self.token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| invalid(format!("invalid PPM {what}")))
    }
}

/// Parse a P6 image with a maximum sample value of 255.
pub fn read_ppm(data: &[u8]) -> io::Result<RasterImage> {
    let mut header = Header { data, pos: 0 };
    if header.token()? != b"P6" {
        return Err(invalid("not a binary PPM (P6) file"));
    }
    let width = header.number("width")?;
    let height = header.number("height")?;
    let max_value = header.number("maximum value")?;
    if max_value != 255 {
        return Err(invalid(format!(
            "only 8-bit PPM is supported, maximum value is {max_value}"
        )));
    }
    // Exactly one whitespace byte separates the header from the raster.
    let start = header.pos + 1;
    let end = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .and_then(|n| n.checked_add(start))
        .ok_or_else(|| invalid(format!("PPM dimensions {width}x{height} are too large")))?;
    let samples = data
        .get(start..end)
        .ok_or_else(|| invalid("PPM raster is truncated"))?;

    RasterImage::new(width, height, ColorModel::Rgb, samples.to_vec())
        .map_err(|e| invalid(e.to_string()))
}

/// Serialise `image` as P6. RGBA rasters lose their alpha channel.
pub fn write_ppm(image: &RasterImage) -> Vec<u8> {
    let mut out = format!("P6\n{} {}\n255\n", image.width(), image.height()).into_bytes();
    match image.model() {
        ColorModel::Rgb => out.extend_from_slice(image.samples()),
        ColorModel::Rgba => {
            for pixel in image.samples().chunks_exact(4) {
                out.extend_from_slice(&pixel[..3]);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let image =
            RasterImage::new(2, 1, ColorModel::Rgb, vec![1, 2, 3, 250, 251, 252]).unwrap();
        let bytes = write_ppm(&image);
        assert!(bytes.starts_with(b"P6\n2 1\n255\n"));
        assert_eq!(read_ppm(&bytes).unwrap(), image);
    }

    #[test]
    fn test_comments_in_header() {
        let mut bytes = b"P6\n# made by hand\n1 1\n# depth\n255\n".to_vec();
        bytes.extend_from_slice(&[9, 8, 7]);
        assert_eq!(read_ppm(&bytes).unwrap().samples(), &[9, 8, 7]);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(read_ppm(b"P3\n1 1\n255\n1 2 3").is_err());
        assert!(read_ppm(b"P6\n1 1\n65535\n\0\0\0\0\0\0").is_err());
        assert!(read_ppm(b"P6\n2 2\n255\n\0\0\0").is_err());
        assert!(read_ppm(b"P6\n").is_err());
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let image = RasterImage::new(1, 1, ColorModel::Rgba, vec![4, 5, 6, 7]).unwrap();
        assert_eq!(write_ppm(&image), b"P6\n1 1\n255\n\x04\x05\x06".to_vec());
    }
}
