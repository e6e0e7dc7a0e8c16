use std::path::{Path, PathBuf};
use std::{io, fs};

use png::HasParameters;

/// Text after the last `/`, empty if path has no separator
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => "",
    }
}

/// Text before the last `.`, empty if name has no extension
pub fn basename_prefix(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => &name[..pos],
        None => "",
    }
}

/// Path of the PNG file for 1-based frame number `n`
pub fn frame_path(out_dir: &Path, stem: &str, n: usize) -> PathBuf {
    out_dir.join(format!("{}{}.png", stem, n))
}

/// Creates the last component of `dir` if it does not exist yet
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() { return Ok(()); }
    match fs::create_dir(dir) {
        Err(ref err) if err.kind() == io::ErrorKind::AlreadyExists
            && dir.is_dir() => Ok(()),
        Err(ref err) if err.kind() == io::ErrorKind::AlreadyExists =>
            Err(io::Error::new(io::ErrorKind::AlreadyExists,
                format!("not a directory: {}", dir.display()))),
        res => res,
    }
}

/// Writes packed 8-bit RGB data to PNG, replacing existing file
pub fn save_png(
    path: &Path, data: &[u8], width: u32, height: u32,
) -> io::Result<()> {
    assert_eq!(data.len() as u64, 3*(width as u64)*(height as u64));

    let file = fs::File::create(path)?;
    let writer = io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set(png::ColorType::RGB).set(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
}
