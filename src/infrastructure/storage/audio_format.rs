/// MIME type of an audio payload, read from its leading bytes.
///
/// Artifacts always carry the `.mp3` extension, but local engines emit WAV,
/// so the name alone cannot be trusted. Unknown payloads are assumed MPEG.
pub fn sniff_content_type(bytes: &[u8]) -> &'static str {
    match bytes {
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'A', b'V', b'E', ..] => "audio/wav",
        [b'O', b'g', b'g', b'S', ..] => "audio/ogg",
        [b'f', b'L', b'a', b'C', ..] => "audio/flac",
        _ => "audio/mpeg",
    }
}
