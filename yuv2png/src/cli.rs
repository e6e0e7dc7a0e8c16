use std::ffi::OsString;
use std::path::PathBuf;

use structopt::StructOpt;
use structopt::clap::ErrorKind;

use yuv_utils::Layout;

fn parse_dimension(s: &str) -> Result<u32, String> {
    let res: u32 = s.parse().map_err(|err| format!("{}", err))?;
    match res {
        0 => Err("frame dimension must be positive".to_string()),
        n if n % 2 != 0 => Err("frame dimension must be even".to_string()),
        _ => Ok(res),
    }
}

fn parse_layout(s: &str) -> Layout {
    Layout::from_name(s)
}

#[derive(StructOpt)]
#[structopt(name = "yuv2png",
    about = "Convert raw NV12/NV21 captures into PNG frames",
    after_help = "e.g.:\n    yuv2png --input test.yuv --output dir",
    raw(setting = "structopt::clap::AppSettings::AllArgsOverrideSelf"))]
struct Cli {
    /// Input YUV file
    #[structopt(short = "i", long = "input", raw(allow_hyphen_values = "true"))]
    input: Option<String>,
    /// Output directory [default: .]
    #[structopt(short = "o", long = "output", parse(from_os_str),
        raw(allow_hyphen_values = "true"))]
    output: Option<PathBuf>,
    /// Frame width in pixels
    #[structopt(short = "W", long = "width", default_value = "1280",
        parse(try_from_str = "parse_dimension"),
        raw(allow_hyphen_values = "true"))]
    width: u32,
    /// Frame height in pixels
    #[structopt(short = "H", long = "height", default_value = "720",
        parse(try_from_str = "parse_dimension"),
        raw(allow_hyphen_values = "true"))]
    height: u32,
    /// Chroma layout: nv12 or nv21. Unknown values are treated as nv12.
    #[structopt(short = "f", long = "format", default_value = "nv12",
        parse(from_str = "parse_layout"),
        raw(allow_hyphen_values = "true"))]
    layout: Layout,
    /// Non-option operands are accepted and ignored
    #[structopt(raw(hidden = "true"))]
    #[allow(dead_code)]
    operands: Vec<String>,
}

/// Conversion settings, immutable once resolved
#[derive(Clone, Debug)]
pub struct Config {
    pub input: String,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub layout: Layout,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let output = match cli.output {
            Some(ref dir) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => PathBuf::from("."),
        };
        Config {
            input: cli.input.unwrap_or_default(),
            output,
            width: cli.width,
            height: cli.height,
            layout: cli.layout,
        }
    }
}

/// Outcome of command line parsing
#[derive(Debug)]
pub enum Resolved {
    Config(Config),
    /// Help or version text which should be printed to stdout
    Help(String),
    /// Malformed command line, message already contains usage
    Error(String),
}

pub fn resolve<I>(args: I) -> Resolved
    where I: IntoIterator, I::Item: Into<OsString> + Clone
{
    match Cli::from_iter_safe(args) {
        Ok(cli) => Resolved::Config(cli.into()),
        Err(err) => match err.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed =>
                Resolved::Help(err.message),
            _ => Resolved::Error(err.message),
        },
    }
}
