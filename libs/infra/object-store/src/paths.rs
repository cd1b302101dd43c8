// [libs/infra/object-store/src/paths.rs]
//! Content-addressed path derivation. Pure functions of the input hash, so
//! the same bytes always resolve to the same object key.

const VIDEO_HASH_SEGMENT_LENGTH: usize = 4;

/// `hash[0:4]/hash[4:8]/.../{hash}.jpg`, one directory level per 4-hex
/// chunk of the hash with no trailing partial segment dropped (image
/// hashes are fixed-length in practice, but the slicing is derived
/// dynamically so it tolerates whatever length the hash function
/// produces).
pub fn image_path(image_hash: &str) -> String {
    chunked_path(image_hash, VIDEO_HASH_SEGMENT_LENGTH, "jpg")
}

/// `hash[0:4]/hash[4:8]/.../{hash}.mp4`, splitting the SHA-256 into 4-char
/// segments and omitting the final partial segment (a 64-hex SHA-256
/// divides evenly into 4-char chunks, so there is none in practice, but
/// the omission mirrors the source's `range` stopping short of the tail).
pub fn video_path(video_sha256_hash: &str) -> String {
    chunked_path(video_sha256_hash, VIDEO_HASH_SEGMENT_LENGTH, "mp4")
}

/// `{archive_id}.png` — screenshots are not content-addressed.
pub fn screenshot_path(archive_id: i64) -> String {
    format!("{archive_id}.png")
}

fn chunked_path(hash: &str, segment_length: usize, extension: &str) -> String {
    let bytes: Vec<char> = hash.chars().collect();
    let mut segments = Vec::new();
    let mut start = 0;
    while start + segment_length < bytes.len() {
        let end = start + segment_length;
        segments.push(bytes[start..end].iter().collect::<String>());
        start = end;
    }
    segments.push(format!("{hash}.{extension}"));
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_path_splits_into_four_hex_directory_levels() {
        let hash = "0123456789abcdef0123456789abcdef";
        let path = image_path(hash);
        assert_eq!(
            path,
            "0123/4567/89ab/cdef/0123/4567/89ab/cdef0123456789abcdef0123456789abcdef.jpg"
        );
    }

    #[test]
    fn video_path_omits_the_final_partial_segment() {
        let hash = "a".repeat(64);
        let path = video_path(&hash);
        let expected_dirs = 15; // (64 - 4) / 4 = 15 full leading chunks
        assert_eq!(path.matches('/').count(), expected_dirs);
        assert!(path.ends_with(&format!("{hash}.mp4")));
    }

    #[test]
    fn screenshot_path_is_archive_id_dot_png() {
        assert_eq!(screenshot_path(12345), "12345.png");
    }

    #[test]
    fn derivation_is_a_pure_function_of_the_hash() {
        let hash = "deadbeefcafebabe0011223344556677";
        assert_eq!(image_path(hash), image_path(hash));
    }
}
