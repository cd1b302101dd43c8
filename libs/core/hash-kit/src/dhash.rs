// [libs/core/hash-kit/src/dhash.rs]
//! Perceptual difference-hash (Krawetz dHash) for decoded raster images.

use image::{imageops::FilterType, GenericImageView};
use thiserror::Error;

/// Fallos durante la decodificación o el cálculo del dHash.
#[derive(Error, Debug)]
pub enum HashKitError {
    #[error("IMAGE_DECODE_FAULT: unable to decode image bytes: {0}")]
    Decode(#[from] image::ImageError),
}

const ROW_WIDTH: u32 = 9;
const ROW_HEIGHT: u32 = 8;
const COL_WIDTH: u32 = 8;
const COL_HEIGHT: u32 = 9;

/// Decodes `image_bytes`, computes the canonical 8x8 row-difference hash and
/// the 8x8 column-difference hash (each a full 64-bit Krawetz dHash over its
/// own 9x8 / 8x9 grayscale grid), and folds both into one 64-bit value.
///
/// Literal concatenation of two 64-bit hashes would not fit the 16-hex-char
/// (64-bit) `image_sim_hash` field width the store uses, so the two
/// directional hashes are XOR-folded rather than bit-packed side by side —
/// this keeps the output a function of both row and column brightness
/// transitions while respecting the field's width.
pub fn image_dhash(image_bytes: &[u8]) -> Result<u64, HashKitError> {
    let decoded = image::load_from_memory(image_bytes)?;

    let row_hash = directional_hash(&decoded, ROW_WIDTH, ROW_HEIGHT, Direction::Row);
    let col_hash = directional_hash(&decoded, COL_WIDTH, COL_HEIGHT, Direction::Column);

    Ok(row_hash ^ col_hash)
}

/// `image_dhash` formatted as 16 lowercase hex characters.
pub fn image_dhash_hex(image_bytes: &[u8]) -> Result<String, HashKitError> {
    Ok(format!("{:016x}", image_dhash(image_bytes)?))
}

enum Direction {
    Row,
    Column,
}

fn directional_hash(image: &image::DynamicImage, width: u32, height: u32, dir: Direction) -> u64 {
    let small = image
        .resize_exact(width, height, FilterType::Lanczos3)
        .to_luma8();

    let mut hash: u64 = 0;
    let mut bit = 0u32;
    match dir {
        Direction::Row => {
            for y in 0..height {
                for x in 0..(width - 1) {
                    let left = small.get_pixel(x, y)[0];
                    let right = small.get_pixel(x + 1, y)[0];
                    if left > right {
                        hash |= 1 << bit;
                    }
                    bit += 1;
                }
            }
        }
        Direction::Column => {
            for x in 0..width {
                for y in 0..(height - 1) {
                    let top = small.get_pixel(x, y)[0];
                    let bottom = small.get_pixel(x, y + 1)[0];
                    if top > bottom {
                        hash |= 1 << bit;
                    }
                    bit += 1;
                }
            }
        }
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    fn encode_png_gradient(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, _y| {
            Luma([(x * 255 / width.max(1)) as u8])
        });
        let mut bytes: Vec<u8> = Vec::new();
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode test png");
        bytes
    }

    #[test]
    fn dhash_of_identical_images_is_identical() {
        let png = encode_png_gradient(32, 32);
        let hash_a = image_dhash(&png).expect("decode a");
        let hash_b = image_dhash(&png).expect("decode b");
        assert_eq!(hash_a, hash_b);
    }

    #[test]
    fn dhash_hex_is_sixteen_lowercase_chars() {
        let png = encode_png_gradient(16, 16);
        let hex = image_dhash_hex(&png).expect("hash");
        assert_eq!(hex.len(), 16);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn decode_failure_on_garbage_bytes_is_reported_not_panicked() {
        let garbage = vec![0u8, 1, 2, 3, 4, 5];
        assert!(image_dhash(&garbage).is_err());
    }
}
