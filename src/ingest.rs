//! File ingestion: raw bytes to data URIs, decoded previews, and video
//! poster derivation.
//!
//! Runs on the worker thread. Images decode to a preview the UI turns into a
//! texture; videos additionally get a first-frame JPEG poster. Poster and
//! preview failures never drop the upload, they degrade to a painted
//! fallback.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use egui::ColorImage;
use ffmpeg_next as ffmpeg;
use image::DynamicImage;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

use crate::media::MediaItem;

/// Quality of the first-frame JPEG poster.
const POSTER_JPEG_QUALITY: u8 = 85;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("video decode failed: {0}")]
    Video(#[from] ffmpeg::Error),
    #[error("{0} contains no video stream")]
    NoVideoStream(String),
    #[error("{0} contains no decodable frame")]
    NoDecodableFrame(String),
    #[error("poster encode failed: {0}")]
    PosterEncode(#[from] image::ImageError),
    #[error("poster frame had an unexpected pixel layout")]
    PosterLayout,
}

/// Reads the picked file and builds the media item plus an optional decoded
/// preview for the texture cache.
///
/// Videos block on the poster attempt, so the returned item is complete
/// before it ever becomes visible in a media list; images return as soon as
/// they are decoded.
pub fn ingest_file(path: &Path) -> Result<(MediaItem, Option<ColorImage>), IngestError> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mime = sniff_mime(&bytes, path);
    let src = data_uri(&mime, &bytes);
    let title = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("untitled")
        .to_string();

    if mime.starts_with("video/") {
        match video_poster(path) {
            Ok((preview, poster_uri)) => {
                Ok((MediaItem::video(src, Some(poster_uri), title), Some(preview)))
            }
            Err(err) => {
                log::warn!("no poster for {}: {err}", path.display());
                Ok((MediaItem::video(src, None, title), None))
            }
        }
    } else {
        let preview = match decode_preview(&bytes) {
            Ok(image) => Some(image),
            Err(err) => {
                log::warn!("no preview for {}: {err}", path.display());
                None
            }
        };
        Ok((MediaItem::image(src, title), preview))
    }
}

/// MIME sniffed from the bytes, falling back to the file extension for the
/// container formats the `image` crate does not know.
pub fn sniff_mime(bytes: &[u8], path: &Path) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("mp4" | "m4v") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("mkv") => "video/x-matroska",
        _ => "application/octet-stream",
    }
    .to_string()
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

fn decode_preview(bytes: &[u8]) -> Result<ColorImage, String> {
    let image =
        image::load_from_memory(bytes).map_err(|err| format!("Failed to decode image: {err}"))?;
    Ok(color_image_from_dynamic(image))
}

fn color_image_from_dynamic(image: DynamicImage) -> ColorImage {
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, &rgba.into_raw())
}

/// Decodes the first ready frame of the video and re-encodes it as a JPEG
/// data URI, returning the frame itself as the preview.
fn video_poster(path: &Path) -> Result<(ColorImage, String), IngestError> {
    ffmpeg::init()?;

    let mut input = ffmpeg::format::input(&path)?;
    let stream = input
        .streams()
        .best(ffmpeg::media::Type::Video)
        .ok_or_else(|| IngestError::NoVideoStream(path.display().to_string()))?;
    let stream_index = stream.index();

    let context = ffmpeg::codec::context::Context::from_parameters(stream.parameters())?;
    let mut decoder = context.decoder().video()?;
    let mut scaler = ffmpeg::software::scaling::Context::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        ffmpeg::format::Pixel::RGB24,
        decoder.width(),
        decoder.height(),
        ffmpeg::software::scaling::Flags::BILINEAR,
    )?;

    let mut frame = ffmpeg::frame::Video::empty();
    for (stream, packet) in input.packets() {
        if stream.index() != stream_index {
            continue;
        }
        decoder.send_packet(&packet)?;
        if decoder.receive_frame(&mut frame).is_ok() {
            return poster_from_frame(&mut scaler, &frame);
        }
    }

    decoder.send_eof()?;
    if decoder.receive_frame(&mut frame).is_ok() {
        return poster_from_frame(&mut scaler, &frame);
    }

    Err(IngestError::NoDecodableFrame(path.display().to_string()))
}

fn poster_from_frame(
    scaler: &mut ffmpeg::software::scaling::Context,
    frame: &ffmpeg::frame::Video,
) -> Result<(ColorImage, String), IngestError> {
    let mut rgb = ffmpeg::frame::Video::empty();
    scaler.run(frame, &mut rgb)?;

    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    let stride = rgb.stride(0);
    let data = rgb.data(0);

    // The scaler pads rows to the stride; repack tightly.
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        let offset = y * stride;
        pixels.extend_from_slice(&data[offset..offset + width * 3]);
    }

    let rgb_image = image::RgbImage::from_raw(width as u32, height as u32, pixels.clone())
        .ok_or(IngestError::PosterLayout)?;
    let mut jpeg = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(
        &mut Cursor::new(&mut jpeg),
        POSTER_JPEG_QUALITY,
    )
    .encode_image(&rgb_image)?;

    let preview = ColorImage::from_rgb([width, height], &pixels);
    Ok((preview, data_uri("image/jpeg", &jpeg)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    const JPEG_MAGIC: &[u8] = &[0xff, 0xd8, 0xff, 0xe0];

    #[test]
    fn sniffs_image_mime_from_magic_bytes() {
        let path = PathBuf::from("whatever.bin");
        assert_eq!(sniff_mime(PNG_MAGIC, &path), "image/png");
        assert_eq!(sniff_mime(JPEG_MAGIC, &path), "image/jpeg");
    }

    #[test]
    fn falls_back_to_extension_for_video_containers() {
        let garbage = [0u8; 16];
        assert_eq!(sniff_mime(&garbage, &PathBuf::from("a.mp4")), "video/mp4");
        assert_eq!(sniff_mime(&garbage, &PathBuf::from("a.MOV")), "video/quicktime");
        assert_eq!(sniff_mime(&garbage, &PathBuf::from("a.webm")), "video/webm");
        assert_eq!(
            sniff_mime(&garbage, &PathBuf::from("a")),
            "application/octet-stream"
        );
    }

    #[test]
    fn data_uri_round_trips() {
        let uri = data_uri("image/png", b"hello");
        assert!(uri.starts_with("data:image/png;base64,"));
        let payload = uri.split_once(',').unwrap().1;
        assert_eq!(BASE64.decode(payload).unwrap(), b"hello");
    }

    #[test]
    fn preview_decodes_a_real_png() {
        // Encode a tiny image and decode it back through the preview path.
        let mut png = Vec::new();
        let buffer = image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]));
        DynamicImage::ImageRgba8(buffer)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let preview = decode_preview(&png).unwrap();
        assert_eq!(preview.size, [3, 2]);
    }

    #[test]
    fn preview_rejects_garbage() {
        assert!(decode_preview(&[0u8; 32]).is_err());
    }
}
