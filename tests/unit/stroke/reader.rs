//! Tests for stroke file discovery and tag parsing

#[cfg(test)]
mod tests {
    use image::{Rgb as Pixel, RgbImage};
    use std::collections::HashMap;
    use std::fs;
    use std::path::{Path, PathBuf};
    use strokepaint::canvas::color::Rgb;
    use strokepaint::canvas::grid::{Grid, Point};
    use strokepaint::io::configuration::MM_TO_PX;
    use strokepaint::stroke::reader::{
        content_bounds, descriptor_from_tags, gray_level, normal_map_path, parse_tags, path_tags,
        read_template, read_templates, stroke_files,
    };
    use tempfile::TempDir;

    fn tags(pairs: &[(&str, u32)]) -> HashMap<String, u32> {
        pairs
            .iter()
            .map(|&(tag, value)| (tag.to_string(), value))
            .collect()
    }

    // Black block at columns 3..7, rows 2..9 of a 10×12 white image
    fn write_stroke(path: &Path) {
        let image = RgbImage::from_fn(10, 12, |x, y| {
            if (3..7).contains(&x) && (2..9).contains(&y) {
                Pixel([0, 0, 0])
            } else {
                Pixel([255, 255, 255])
            }
        });
        image.save(path).unwrap();
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            parse_tags("w4l20"),
            vec![("w".to_string(), 4), ("l".to_string(), 20)]
        );
        assert_eq!(parse_tags("pt3"), vec![("pt".to_string(), 3)]);
        assert_eq!(parse_tags("a30_s40"), vec![("a".to_string(), 30), ("s".to_string(), 40)]);
        assert!(parse_tags("brush").is_empty());
        assert!(parse_tags("123").is_empty());
    }

    // Tests that the first occurrence of a tag wins
    #[test]
    fn test_path_tags_first_wins() {
        let root = Path::new("/library");
        let path = Path::new("/library/pt3/w4l20/w9a30s40.png");
        let found = path_tags(root, path);
        assert_eq!(found.get("pt"), Some(&3));
        assert_eq!(found.get("w"), Some(&4));
        assert_eq!(found.get("l"), Some(&20));
        assert_eq!(found.get("a"), Some(&30));
        assert_eq!(found.get("s"), Some(&40));
    }

    #[test]
    fn test_descriptor_from_tags() {
        let path = Path::new("stroke.png");
        let descriptor =
            descriptor_from_tags(path, &tags(&[("pt", 3), ("w", 4), ("l", 20), ("a", 30), ("s", 40)]))
                .unwrap();
        assert_eq!(descriptor.points, 3);
        assert!((descriptor.width - 4.0 * MM_TO_PX).abs() < 1e-9);
        assert!((descriptor.length - 20.0 * MM_TO_PX).abs() < 1e-9);
        assert!((descriptor.length_to_width - 5.0).abs() < 1e-9);
        assert!((descriptor.angle - 150.0).abs() < 1e-9);
        assert!((descriptor.fraction - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_descriptor_from_tags_errors() {
        let path = Path::new("stroke.png");
        assert!(descriptor_from_tags(path, &tags(&[("w", 4)])).is_err());
        assert!(descriptor_from_tags(path, &tags(&[("pt", 2)])).is_err());
        assert!(descriptor_from_tags(path, &tags(&[("pt", 0), ("w", 4)])).is_err());
        assert!(descriptor_from_tags(path, &tags(&[("pt", 4), ("w", 4)])).is_err());
        assert!(descriptor_from_tags(path, &tags(&[("pt", 1), ("w", 4)])).is_ok());
    }

    #[test]
    fn test_normal_map_path() {
        assert_eq!(
            normal_map_path(Path::new("/lib/pt1/w3/dab.png")),
            PathBuf::from("/lib/pt1/w3/dabn.png")
        );
    }

    #[test]
    fn test_gray_level() {
        assert_eq!(gray_level(Rgb::BLACK), 0);
        assert_eq!(gray_level(Rgb::new(100, 0, 0)), 30);
        assert_eq!(gray_level(Rgb::new(0, 0, 9)), 0);
    }

    #[test]
    fn test_content_bounds() {
        let grid = Grid::from_fn(6, 6, |point| u8::from(point == Point::new(1, 4) || point == Point::new(3, 2)));
        assert_eq!(
            content_bounds(&grid, |&value| value == 1),
            Some((Point::new(1, 2), Point::new(3, 4)))
        );
        assert_eq!(content_bounds(&grid, |&value| value == 2), None);
    }

    // Tests directory walk order and normal map exclusion
    #[test]
    fn test_stroke_files_skip_normal_maps() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let nested = root.join("pt2").join("w4");
        fs::create_dir_all(&nested).unwrap();
        write_stroke(&nested.join("b.png"));
        write_stroke(&nested.join("bn.png"));
        write_stroke(&nested.join("an.png"));
        write_stroke(&root.join("pt1w3.png"));
        fs::write(nested.join("readme.md"), "skip").unwrap();

        let files = stroke_files(root).unwrap();
        assert_eq!(
            files,
            vec![
                root.join("pt1w3.png"),
                nested.join("an.png"),
                nested.join("b.png"),
            ]
        );
    }

    #[test]
    fn test_read_template_crops_to_paint() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let directory = root.join("pt2").join("w4l20");
        fs::create_dir_all(&directory).unwrap();
        let stroke = directory.join("a.png");
        write_stroke(&stroke);
        let normal_map = RgbImage::from_pixel(10, 12, Pixel([128, 128, 255]));
        normal_map.save(normal_map_path(&stroke)).unwrap();

        let template = read_template(root, &stroke).unwrap();
        assert_eq!((template.texture.width(), template.texture.height()), (4, 7));
        assert!(template.texture.iter().all(|(_, &alpha)| alpha == 0));
        let normals = template.normal_map.unwrap();
        assert_eq!((normals.width(), normals.height()), (4, 7));
    }

    // Tests that unusable files are skipped when reading a tree
    #[test]
    fn test_read_templates_skips_bad_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let directory = root.join("pt1").join("w5");
        fs::create_dir_all(&directory).unwrap();
        write_stroke(&directory.join("good.png"));
        RgbImage::from_pixel(5, 5, Pixel([255, 255, 255]))
            .save(directory.join("blank.png"))
            .unwrap();
        write_stroke(&root.join("untagged.png"));

        let templates = read_templates(root).unwrap();
        assert_eq!(templates.len(), 1);
        assert!(templates.first().is_some_and(|template| template.normal_map.is_none()));
    }
}
