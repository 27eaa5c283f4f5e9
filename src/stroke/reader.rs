//! On-disk stroke library reader
//!
//! A library is a directory tree of stroke images. Descriptor attributes are
//! encoded in the relative path as alphabetic tags followed by integers, for
//! example `pt3/w4l20/a30s40.png`:
//!
//! | tag | meaning |
//! |-----|---------|
//! | `pt` | skeleton point count |
//! | `w` | width (mm) |
//! | `l` | length (mm) |
//! | `a` | bend away from straight (degrees) |
//! | `s` | first segment share (percent) |
//!
//! The first occurrence of a tag wins. A stroke `name.png` may be paired
//! with a normal map `namen.png` next to it.

use crate::canvas::color::{Canvas, Rgb};
use crate::canvas::grid::{Grid, Point};
use crate::io::configuration::{
    BLACK_BORDER_MEDIUM, MAX_STROKE_POINTS, MM_TO_PX, NORMAL_MAP_BACKGROUND, NORMAL_MAP_SUFFIX,
};
use crate::io::error::{PainterError, Result, stroke_file_error};
use crate::io::image::load_canvas;
use crate::stroke::descriptor::StrokeDescriptor;
use crate::stroke::template::StrokeTemplate;
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Image extensions recognised as stroke files
const STROKE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Read every usable template under `root`, in parallel
///
/// Files that cannot be decoded or described are logged and skipped.
///
/// # Errors
///
/// Returns an error if a directory of the tree cannot be listed.
pub fn read_templates(root: &Path) -> Result<Vec<StrokeTemplate>> {
    let files = stroke_files(root)?;
    debug!("Reading {} stroke files under {}", files.len(), root.display());

    let templates = files
        .par_iter()
        .filter_map(|path| match read_template(root, path) {
            Ok(template) => Some(template),
            Err(error) => {
                warn!("Skipping stroke file: {error}");
                None
            }
        })
        .collect();

    Ok(templates)
}

/// Stroke image files under `root`, normal maps excluded, sorted by path
///
/// # Errors
///
/// Returns an error if a directory cannot be listed.
pub fn stroke_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(directory) = pending.pop() {
        let entries = std::fs::read_dir(&directory).map_err(|e| PainterError::FileSystem {
            path: directory.clone(),
            operation: "list directory",
            source: e,
        })?;
        for entry in entries {
            let path = entry
                .map_err(|e| PainterError::FileSystem {
                    path: directory.clone(),
                    operation: "read directory entry",
                    source: e,
                })?
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if is_image(&path) {
                images.push(path);
            }
        }
    }

    let mut strokes: Vec<PathBuf> = images
        .iter()
        .filter(|path| !is_normal_map(path))
        .cloned()
        .collect();
    strokes.sort();
    Ok(strokes)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            STROKE_EXTENSIONS
                .iter()
                .any(|known| extension.eq_ignore_ascii_case(known))
        })
}

/// Path of the normal map paired with `stroke`
pub fn normal_map_path(stroke: &Path) -> PathBuf {
    let stem = stroke
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}{NORMAL_MAP_SUFFIX}");
    if let Some(extension) = stroke.extension() {
        name.push('.');
        name.push_str(&extension.to_string_lossy());
    }
    stroke.with_file_name(name)
}

// A normal map is a file `<stem>n.<ext>` whose stroke `<stem>.<ext>` exists
fn is_normal_map(path: &Path) -> bool {
    let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
        return false;
    };
    let Some(base) = stem.strip_suffix(NORMAL_MAP_SUFFIX) else {
        return false;
    };
    if base.is_empty() {
        return false;
    }
    let mut stroke = path.with_file_name(base);
    if let Some(extension) = path.extension() {
        stroke.set_extension(extension);
    }
    stroke.is_file()
}

/// Split a path component into `(tag, value)` pairs: `w4l20` → `w=4, l=20`
///
/// Letters without digits and digits without letters are ignored.
pub fn parse_tags(component: &str) -> Vec<(String, u32)> {
    let mut tags = Vec::new();
    let mut chars = component.chars().peekable();

    while chars.peek().is_some() {
        let mut tag = String::new();
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            tag.push(c);
            chars.next();
        }

        let mut digits = String::new();
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            chars.next();
        }

        match (tag.is_empty(), digits.parse::<u32>()) {
            (false, Ok(value)) => tags.push((tag, value)),
            _ if tag.is_empty() && digits.is_empty() => {
                chars.next();
            }
            _ => {}
        }
    }

    tags
}

/// Tags of every component of `path` relative to `root`, extension removed
pub fn path_tags(root: &Path, path: &Path) -> HashMap<String, u32> {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    let mut tags = HashMap::new();
    for component in relative.components() {
        for (tag, value) in parse_tags(&component.as_os_str().to_string_lossy()) {
            tags.entry(tag).or_insert(value);
        }
    }
    tags
}

/// Descriptor in canvas pixels from path tags
///
/// # Errors
///
/// Returns an error if the point count or width tag is missing, or the
/// point count is outside `1..=3`.
pub fn descriptor_from_tags(path: &Path, tags: &HashMap<String, u32>) -> Result<StrokeDescriptor> {
    let tag = |name: &str| tags.get(name).copied();

    let points = tag("pt").ok_or_else(|| stroke_file_error(path, &"missing 'pt' tag"))? as usize;
    if points == 0 || points > MAX_STROKE_POINTS {
        return Err(stroke_file_error(
            path,
            &format!("point count {points} is outside 1..={MAX_STROKE_POINTS}"),
        ));
    }
    let width = tag("w").ok_or_else(|| stroke_file_error(path, &"missing 'w' tag"))?;

    let descriptor = StrokeDescriptor {
        points,
        width: f64::from(width) * MM_TO_PX,
        length: f64::from(tag("l").unwrap_or(0)) * MM_TO_PX,
        length_to_width: 0.0,
        angle: tag("a").map_or(0.0, |bend| 180.0 - f64::from(bend)),
        fraction: tag("s").map_or(0.0, f64::from),
    };
    Ok(descriptor.with_ratio())
}

/// Gray level with weights 0.3 / 0.59 / 0.11, truncated
pub fn gray_level(color: Rgb) -> u8 {
    let value = 0.11_f64.mul_add(
        f64::from(color.b),
        0.3_f64.mul_add(f64::from(color.r), 0.59 * f64::from(color.g)),
    );
    value.clamp(0.0, 255.0) as u8
}

/// Inclusive bounding box of the cells matching `is_content`
pub fn content_bounds<T>(grid: &Grid<T>, is_content: impl Fn(&T) -> bool) -> Option<(Point, Point)> {
    grid.iter()
        .filter(|(_, value)| is_content(value))
        .fold(None, |bounds, (point, _)| match bounds {
            None => Some((point, point)),
            Some((min, max)) => Some((
                Point::new(min.x.min(point.x), min.y.min(point.y)),
                Point::new(max.x.max(point.x), max.y.max(point.y)),
            )),
        })
}

/// Load one stroke file and its normal map
///
/// # Errors
///
/// Returns an error if the image cannot be decoded, has no paint pixel, or
/// its path tags do not describe a stroke.
pub fn read_template(root: &Path, path: &Path) -> Result<StrokeTemplate> {
    let descriptor = descriptor_from_tags(path, &path_tags(root, path))?;

    let image = load_canvas(path)?;
    let gray = image.map(|&color| gray_level(color));
    let (min, max) = content_bounds(&gray, |&alpha| alpha < BLACK_BORDER_MEDIUM)
        .ok_or_else(|| stroke_file_error(path, &"no paint pixels"))?;

    let mut template = StrokeTemplate::new(gray.crop(min, max), descriptor);

    let normal_path = normal_map_path(path);
    if normal_path.is_file() {
        match load_canvas(&normal_path) {
            Ok(normal_map) => {
                template = template.with_normal_map(crop_normal_map(&normal_map, &image, min, max));
            }
            Err(error) => warn!("Ignoring normal map: {error}"),
        }
    }

    Ok(template)
}

// Co-registered maps share the stroke's crop; others are cropped to their
// own non-background area
fn crop_normal_map(normal_map: &Canvas, stroke: &Canvas, min: Point, max: Point) -> Canvas {
    if normal_map.width() == stroke.width() && normal_map.height() == stroke.height() {
        return normal_map.crop(min, max);
    }
    content_bounds(normal_map, |color| color.r != NORMAL_MAP_BACKGROUND).map_or_else(
        || normal_map.clone(),
        |(own_min, own_max)| normal_map.crop(own_min, own_max),
    )
}
