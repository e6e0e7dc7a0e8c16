use std::io::Write;
use std::path::PathBuf;
use std::{io, fs, fmt, error};

use yuv_utils::conversions::nv2rgb;
use yuv_utils::{FrameGeometry, YuvFile};

use super::cli::Config;
use super::utils::{basename, basename_prefix, ensure_dir, frame_path, save_png};

#[derive(Debug)]
pub enum ConvertError {
    /// Frame dimensions can't describe a 4:2:0 frame
    Geometry(io::Error),
    /// Input file can't be opened or mapped
    Unreadable(io::Error),
    /// Input file does not hold a single frame
    TooSmall { frame_size: u128, file_size: u64 },
    /// Output directory or PNG file can't be written
    Output { path: PathBuf, err: io::Error },
    /// Written path can't be reported on stdout, e.g. closed pipe
    Report(io::Error),
}

impl ConvertError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvertError::Geometry(_) | ConvertError::Unreadable(_) => 1,
            ConvertError::TooSmall { .. } => 2,
            ConvertError::Output { .. } | ConvertError::Report(_) => 3,
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConvertError::Geometry(err) => write!(f, "invalid geometry: {}", err),
            ConvertError::Unreadable(err) => write!(f, "can't read input: {}", err),
            ConvertError::TooSmall { frame_size, file_size } => write!(f,
                "input has {} bytes, but a single frame needs {}",
                file_size, frame_size),
            ConvertError::Output { path, err } => write!(f,
                "can't write {}: {}", path.display(), err),
            ConvertError::Report(err) => write!(f, "can't report progress: {}", err),
        }
    }
}

impl error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ConvertError::Geometry(err)
            | ConvertError::Unreadable(err)
            | ConvertError::Report(err) => Some(err),
            ConvertError::TooSmall { .. } => None,
            ConvertError::Output { err, .. } => Some(err),
        }
    }
}

fn open_input(opt: &Config) -> Result<YuvFile, ConvertError> {
    let file = fs::File::open(&opt.input).map_err(ConvertError::Unreadable)?;
    let meta = file.metadata().map_err(ConvertError::Unreadable)?;
    if !meta.is_file() {
        Err(ConvertError::Unreadable(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a regular file: {}", opt.input),
        )))?
    }
    // checked before building the geometry, frames larger than the address
    // space can't fit into any input either
    let frame_size = opt.width as u128 * opt.height as u128 * 3 / 2;
    if frame_size > meta.len() as u128 {
        Err(ConvertError::TooSmall { frame_size, file_size: meta.len() })?
    }
    let geometry = FrameGeometry::new(opt.width, opt.height)
        .map_err(ConvertError::Geometry)?;
    YuvFile::map(&file, geometry).map_err(ConvertError::Unreadable)
}

/// Converts every whole frame of the input into a PNG file and returns
/// number of written frames. Written paths are printed to stdout.
pub fn convert(opt: &Config) -> Result<usize, ConvertError> {
    let stdout = io::stdout();
    let mut report = stdout.lock();
    convert_with(opt, &mut report)
}

/// Same as `convert`, but written paths go to `report`
pub fn convert_with<W: Write>(
    opt: &Config, report: &mut W,
) -> Result<usize, ConvertError> {
    let input = open_input(opt)?;
    let geometry = input.geometry();

    ensure_dir(&opt.output).map_err(|err| ConvertError::Output {
        path: opt.output.clone(), err,
    })?;

    let stem = basename_prefix(basename(&opt.input));
    let mut rgb = vec![0u8; 3*geometry.luma_size()];

    for (i, frame) in input.frames().enumerate() {
        let path = frame_path(&opt.output, stem, i + 1);
        nv2rgb(&frame, opt.layout, &mut rgb);
        save_png(&path, &rgb, opt.width, opt.height)
            .map_err(|err| ConvertError::Output { path: path.clone(), err })?;
        writeln!(report, "{}", path.display())
            .and_then(|()| report.flush())
            .map_err(ConvertError::Report)?;
    }

    Ok(input.frame_count())
}
