use std::io::Write;

use yuv_utils::conversions::{nv2rgb, yuv2rgb_pixel};
use yuv_utils::{FrameGeometry, Layout, NvFrame, YuvFile};

const W: u32 = 16;
const H: u32 = 8;

fn solid_frame(y: u8, c0: u8, c1: u8) -> Vec<u8> {
    let luma = (W*H) as usize;
    let mut buf = vec![y; luma];
    for _ in 0..luma/4 {
        buf.push(c0);
        buf.push(c1);
    }
    buf
}

fn convert(data: &[u8], layout: Layout) -> Vec<u8> {
    let g = FrameGeometry::new(W, H).unwrap();
    let frame = NvFrame::new(data, g).unwrap();
    let mut rgb = vec![0u8; 3*g.luma_size()];
    nv2rgb(&frame, layout, &mut rgb);
    rgb
}

/// Floating point BT.601 limited range reference
fn reference(y: u8, u: u8, v: u8) -> [f32; 3] {
    let c = 1.164*(y as f32 - 16.0);
    let d = u as f32 - 128.0;
    let e = v as f32 - 128.0;
    let clamp = |x: f32| x.max(0.0).min(255.0);
    [
        clamp(c + 1.596*e),
        clamp(c - 0.391*d - 0.813*e),
        clamp(c + 2.018*d),
    ]
}

fn assert_close(rgb: &[u8], expected: [f32; 3]) {
    for (got, exp) in rgb.iter().zip(expected.iter()) {
        assert!((*got as f32 - exp).abs() <= 2.0,
            "got {:?}, expected {:?}", rgb, expected);
    }
}

#[test]
fn test_solid_colors() {
    let samples = [
        (16, 128, 128), (235, 128, 128), (128, 128, 128),
        (81, 90, 240), (145, 54, 34), (41, 240, 110), (200, 30, 220),
    ];
    for &(y, u, v) in samples.iter() {
        let rgb = convert(&solid_frame(y, u, v), Layout::Nv12);
        let expected = reference(y, u, v);
        for pix in rgb.chunks(3) {
            assert_close(pix, expected);
        }
        assert_close(&yuv2rgb_pixel(y, u, v), expected);
    }
}

#[test]
fn test_black_and_white() {
    assert_eq!(yuv2rgb_pixel(16, 128, 128), [0, 0, 0]);
    assert_eq!(yuv2rgb_pixel(0, 128, 128), [0, 0, 0]);
    assert_eq!(yuv2rgb_pixel(235, 128, 128), [255, 255, 255]);
    assert_eq!(yuv2rgb_pixel(255, 128, 128), [255, 255, 255]);
}

#[test]
fn test_chroma_order() {
    let data = solid_frame(100, 60, 200);
    let nv12 = convert(&data, Layout::Nv12);
    let nv21 = convert(&data, Layout::Nv21);
    assert!(nv12 != nv21);
    // NV12 is red-ish, NV21 interprets the same bytes as blue-ish
    assert!(nv12[0] > nv12[2]);
    assert!(nv21[2] > nv21[0]);

    let swapped = solid_frame(100, 200, 60);
    assert_eq!(nv12, convert(&swapped, Layout::Nv21));
}

#[test]
fn test_chroma_subsampling() {
    let g = FrameGeometry::new(W, H).unwrap();
    let mut data = solid_frame(128, 128, 128);
    // second chroma pair of the first chroma row covers pixels 2..4 of rows 0..2
    let pos = g.luma_size() + 2;
    data[pos] = 240;
    data[pos + 1] = 16;
    let rgb = convert(&data, Layout::Nv12);
    let pixel = |x: usize, y: usize| {
        let p = 3*(y*W as usize + x);
        [rgb[p], rgb[p + 1], rgb[p + 2]]
    };
    let gray = yuv2rgb_pixel(128, 128, 128);
    let tinted = yuv2rgb_pixel(128, 240, 16);
    assert_ne!(gray, tinted);
    for y in 0..2 {
        assert_eq!(pixel(1, y), gray);
        assert_eq!(pixel(2, y), tinted);
        assert_eq!(pixel(3, y), tinted);
        assert_eq!(pixel(4, y), gray);
    }
    assert_eq!(pixel(2, 2), gray);
}

#[test]
fn test_layout_names() {
    assert_eq!(Layout::from_name("nv21"), Layout::Nv21);
    assert_eq!(Layout::from_name("nv12"), Layout::Nv12);
    assert_eq!(Layout::from_name("foo"), Layout::Nv12);
    assert_eq!(Layout::from_name("NV21"), Layout::Nv12);
    assert_eq!(Layout::default(), Layout::Nv12);
}

#[test]
fn test_mapped_frames() {
    let g = FrameGeometry::new(W, H).unwrap();
    let mut file = tempfile::tempfile().unwrap();
    for n in 0..2u8 {
        file.write_all(&solid_frame(n + 1, 128, 128)).unwrap();
    }
    // partial trailing frame
    file.write_all(&[7u8; 10]).unwrap();
    file.flush().unwrap();

    let input = YuvFile::map(&file, g).unwrap();
    assert_eq!(input.len(), 2*g.frame_size() + 10);
    assert_eq!(input.frame_count(), 2);
    let frames: Vec<_> = input.frames().collect();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].luma_row(0)[0], 1);
    assert_eq!(frames[1].luma_row(H as usize - 1)[0], 2);
    assert_eq!(input.frame(1).unwrap().luma_row(0)[0], 2);
    assert!(input.frame(2).is_none());
}

#[test]
fn test_map_too_small() {
    let g = FrameGeometry::new(W, H).unwrap();
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(&[0u8; 10]).unwrap();
    file.flush().unwrap();
    assert!(YuvFile::map(&file, g).is_err());
}
