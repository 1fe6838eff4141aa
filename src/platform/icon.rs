//! Best-effort icon lookup for files.
//!
//! Nothing here ever fails: missing files, undecodable formats, and platform
//! errors all collapse to `None`. Callers that want an icon take it if one
//! comes back and move on if not.

use std::path::Path;

/// Decoded icon pixels, row-major RGBA, 4 bytes per pixel.
#[derive(Debug, Clone)]
pub struct IconData {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Try to derive an icon for `path`.
///
/// On Windows the shell association is asked first; everywhere the fallback
/// is decoding icon-like image files directly.
pub fn extract_associated_icon(path: &Path) -> Option<IconData> {
    if !path.is_file() {
        return None;
    }

    #[cfg(windows)]
    if let Some(icon) = shell_icon(path) {
        return Some(icon);
    }

    decode_image_icon(path)
}

/// Decode .ico-like files with the image crate.
fn decode_image_icon(path: &Path) -> Option<IconData> {
    const DECODABLE: &[&str] = &["ico", "png", "bmp"];

    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    if !DECODABLE.contains(&extension.as_str()) {
        return None;
    }

    let decoded = match image::open(path) {
        Ok(decoded) => decoded.into_rgba8(),
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "cannot decode icon file");
            return None;
        }
    };
    let (width, height) = decoded.dimensions();
    Some(IconData {
        rgba: decoded.into_raw(),
        width,
        height,
    })
}

/// Ask the Windows shell for the icon associated with the file.
#[cfg(windows)]
fn shell_icon(path: &Path) -> Option<IconData> {
    use std::os::windows::ffi::OsStrExt;
    use windows::core::PCWSTR;
    use windows::Win32::Storage::FileSystem::FILE_FLAGS_AND_ATTRIBUTES;
    use windows::Win32::UI::Shell::{SHGetFileInfoW, SHFILEINFOW, SHGFI_ICON, SHGFI_LARGEICON};
    use windows::Win32::UI::WindowsAndMessaging::DestroyIcon;

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    let mut info = SHFILEINFOW::default();

    let result = unsafe {
        SHGetFileInfoW(
            PCWSTR(wide.as_ptr()),
            FILE_FLAGS_AND_ATTRIBUTES(0),
            Some(&mut info),
            std::mem::size_of::<SHFILEINFOW>() as u32,
            SHGFI_ICON | SHGFI_LARGEICON,
        )
    };
    if result == 0 || info.hIcon.is_invalid() {
        return None;
    }

    let pixels = unsafe { icon_pixels(info.hIcon) };
    unsafe {
        let _ = DestroyIcon(info.hIcon);
    }
    pixels
}

/// Read an HICON's color bitmap into RGBA pixels.
///
/// Monochrome icons (no color bitmap) are not supported and yield `None`.
#[cfg(windows)]
unsafe fn icon_pixels(
    icon: windows::Win32::UI::WindowsAndMessaging::HICON,
) -> Option<IconData> {
    use windows::Win32::Graphics::Gdi::{
        DeleteObject, GetDC, GetDIBits, GetObjectW, ReleaseDC, BITMAP, BITMAPINFO,
        BITMAPINFOHEADER, DIB_RGB_COLORS, HGDIOBJ,
    };
    use windows::Win32::UI::WindowsAndMessaging::{GetIconInfo, ICONINFO};

    let mut icon_info = ICONINFO::default();
    GetIconInfo(icon, &mut icon_info).ok()?;
    let color = icon_info.hbmColor;
    let mask = icon_info.hbmMask;

    let mut bitmap = BITMAP::default();
    let have_bitmap = !color.is_invalid()
        && GetObjectW(
            HGDIOBJ(color.0),
            std::mem::size_of::<BITMAP>() as i32,
            Some(&mut bitmap as *mut BITMAP as *mut _),
        ) != 0;

    let mut rgba = None;
    if have_bitmap && bitmap.bmWidth > 0 && bitmap.bmHeight > 0 {
        let width = bitmap.bmWidth;
        let height = bitmap.bmHeight;

        let mut header = BITMAPINFO::default();
        header.bmiHeader = BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            // Negative height requests top-down row order.
            biHeight: -height,
            biPlanes: 1,
            biBitCount: 32,
            ..Default::default()
        };

        let mut pixels = vec![0u8; (width as usize) * (height as usize) * 4];
        let screen = GetDC(None);
        let copied = GetDIBits(
            screen,
            color,
            0,
            height as u32,
            Some(pixels.as_mut_ptr() as *mut _),
            &mut header,
            DIB_RGB_COLORS,
        );
        ReleaseDC(None, screen);

        if copied == height {
            // GetDIBits hands back BGRA.
            for pixel in pixels.chunks_exact_mut(4) {
                pixel.swap(0, 2);
            }
            // Icons without an alpha channel come back fully transparent.
            if pixels.chunks_exact(4).all(|pixel| pixel[3] == 0) {
                for pixel in pixels.chunks_exact_mut(4) {
                    pixel[3] = 255;
                }
            }
            rgba = Some(IconData {
                rgba: pixels,
                width: width as u32,
                height: height as u32,
            });
        }
    }

    if !color.is_invalid() {
        let _ = DeleteObject(HGDIOBJ(color.0));
    }
    if !mask.is_invalid() {
        let _ = DeleteObject(HGDIOBJ(mask.0));
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_has_no_icon() {
        assert!(extract_associated_icon(Path::new("/nonexistent/app.exe")).is_none());
    }

    // The Windows shell can associate an icon with any extension, so this
    // holds only for the decode fallback.
    #[cfg(not(windows))]
    #[test]
    fn test_unsupported_extension_has_no_icon() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "plain text").unwrap();
        assert!(extract_associated_icon(&file).is_none());
    }

    #[cfg(not(windows))]
    #[test]
    fn test_corrupt_ico_is_swallowed() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("broken.ico");
        std::fs::write(&file, b"not an icon at all").unwrap();
        assert!(extract_associated_icon(&file).is_none());
    }

    #[test]
    fn test_png_decodes_to_rgba() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("tiny.png");
        let mut pixel = image::RgbaImage::new(2, 2);
        pixel.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        pixel.save(&file).unwrap();

        let icon = extract_associated_icon(&file).expect("png should decode");
        assert_eq!((icon.width, icon.height), (2, 2));
        assert_eq!(icon.rgba.len(), 16);
        assert_eq!(&icon.rgba[..4], &[255, 0, 0, 255]);
    }
}
