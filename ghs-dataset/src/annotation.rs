//! YOLO-style annotation files.
//!
//! Each non-blank line holds `label center_x center_y width height`, with the
//! box normalized to the image size.

use crate::{
    common::*,
    error::{Error, Result},
    translate::{translate_bbox, CoordRounding, PixelBox},
};
use bbox::{CyCxHW, HW};
use label::Label;

/// A class label with its normalized box.
pub type Annotation = Label<CyCxHW<R64>, usize>;

const TOKENS_PER_LINE: usize = 5;

/// The annotation file paired with an image: same path, `.txt` extension.
pub fn annotation_path(image_path: impl AsRef<Path>) -> PathBuf {
    image_path.as_ref().with_extension("txt")
}

/// Read and parse the annotation file at `path`.
pub fn read_annotations(path: impl AsRef<Path>) -> Result<Vec<Annotation>> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let annotations = parse_annotations(&text, path)?;
    if annotations.is_empty() {
        warn!("no annotations found in '{}'", path.display());
    }
    Ok(annotations)
}

/// Read the annotation file at `path` and translate every box to pixel
/// corners of an image of `image_size`.
///
/// Returns parallel box and label vectors. A box whose corners do not fit the
/// pixel grid is reported as a malformed line.
pub fn read_pixel_annotations(
    path: impl AsRef<Path>,
    image_size: &HW<usize>,
    rounding: CoordRounding,
) -> Result<(Vec<PixelBox>, Vec<usize>)> {
    let path = path.as_ref();
    let text = read_text(path)?;

    let labels: Vec<_> = numbered_lines(&text)
        .map(|(line, content)| {
            parse_line(content)
                .and_then(|annotation| {
                    let rect = translate_bbox(image_size, &annotation.rect, rounding)
                        .map_err(|err| err.to_string())?;
                    Ok(annotation.map_rect(|_| rect))
                })
                .map_err(|reason| malformed(path, line, reason))
        })
        .collect::<Result<_>>()?;

    if labels.is_empty() {
        warn!("no annotations found in '{}'", path.display());
    }
    Ok(label::unzip_labels(labels))
}

/// Parse annotation text. `path` is only used for error reports.
pub fn parse_annotations(text: &str, path: impl AsRef<Path>) -> Result<Vec<Annotation>> {
    let path = path.as_ref();
    numbered_lines(text)
        .map(|(line, content)| parse_line(content).map_err(|reason| malformed(path, line, reason)))
        .collect()
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::MissingAnnotationFile {
            path: path.to_owned(),
        },
        _ => Error::Io {
            path: path.to_owned(),
            source,
        },
    })
}

/// Non-blank lines with their 1-based line numbers.
fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, line))
}

fn malformed(path: &Path, line: usize, reason: String) -> Error {
    Error::MalformedAnnotation {
        path: path.to_owned(),
        line,
        reason,
    }
}

fn parse_line(line: &str) -> Result<Annotation, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [label, cx, cy, w, h]: [&str; TOKENS_PER_LINE] =
        tokens.as_slice().try_into().map_err(|_| {
            format!(
                "expect {} tokens, but get {}",
                TOKENS_PER_LINE,
                tokens.len()
            )
        })?;

    let class: usize = label
        .parse()
        .map_err(|_| format!("invalid class label '{}'", label))?;
    let [cx, cy, w, h] = [cx, cy, w, h].map(parse_coord);
    let rect =
        CyCxHW::try_from_cxcywh([cx?, cy?, w?, h?]).map_err(|err| err.to_string())?;

    Ok(Label::new(rect, class))
}

fn parse_coord(token: &str) -> Result<R64, String> {
    let value: f64 = token
        .parse()
        .map_err(|_| format!("invalid coordinate '{}'", token))?;
    R64::try_new(value).ok_or_else(|| format!("coordinate '{}' is not finite", token))
}

/// Split annotations into parallel box and label vectors.
pub fn split_annotations(annotations: Vec<Annotation>) -> (Vec<CyCxHW<R64>>, Vec<usize>) {
    label::unzip_labels(annotations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbox::Rect;

    fn parse(text: &str) -> Result<Vec<Annotation>> {
        parse_annotations(text, "inline.txt")
    }

    #[test]
    fn single_record() {
        let annotations = parse("3 0.5 0.5 0.2 0.4").unwrap();
        assert_eq!(annotations.len(), 1);
        let Label { rect, class } = annotations[0];
        assert_eq!(class, 3);
        assert_eq!(rect.cxcywh(), [r64(0.5), r64(0.5), r64(0.2), r64(0.4)]);
        assert_eq!(rect.h(), r64(0.4));
    }

    #[test]
    fn empty_text_gives_empty_sequences() {
        let (bboxes, labels) = split_annotations(parse("").unwrap());
        assert!(bboxes.is_empty());
        assert!(labels.is_empty());

        let (bboxes, labels) = split_annotations(parse("\n  \n\t\n").unwrap());
        assert!(bboxes.is_empty());
        assert!(labels.is_empty());
    }

    #[test]
    fn keeps_line_order() {
        let text = "0 0.1 0.1 0.1 0.1\n\n8 0.9 0.9 0.1 0.1\r\n4 0.5 0.5 1 1\n";
        let (_, labels) = split_annotations(parse(text).unwrap());
        assert_eq!(labels, vec![0, 8, 4]);
    }

    #[test]
    fn wrong_token_count() {
        for (text, line) in [
            ("1 0.5 0.5 0.2", 1),
            ("1 0.5 0.5 0.2 0.2 0.9", 1),
            ("1 0.5 0.5 0.2 0.2\n\n2 0.5", 3),
        ] {
            match parse(text) {
                Err(Error::MalformedAnnotation { line: got, .. }) => assert_eq!(got, line),
                other => panic!("unexpected result {:?} for {:?}", other, text),
            }
        }
    }

    #[test]
    fn unparseable_fields() {
        for text in [
            "x 0.5 0.5 0.2 0.2",
            "1.5 0.5 0.5 0.2 0.2",
            "-1 0.5 0.5 0.2 0.2",
            "1 0.5 abc 0.2 0.2",
            "1 0.5 0.5 NaN 0.2",
            "1 0.5 0.5 inf 0.2",
            "1 0.5 0.5 -0.2 0.2",
        ] {
            assert!(
                matches!(parse(text), Err(Error::MalformedAnnotation { .. })),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn txt_extension_replaces_image_extension() {
        assert_eq!(
            annotation_path("data/ghs.v1/img_001.jpg"),
            Path::new("data/ghs.v1/img_001.txt")
        );
        assert_eq!(annotation_path("img_002"), Path::new("img_002.txt"));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        assert!(matches!(
            read_annotations(&path),
            Err(Error::MissingAnnotationFile { .. })
        ));
    }

    #[test]
    fn pixel_annotations_follow_image_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.txt");
        fs::write(&path, "5 0.5 0.5 1.0 1.0\n\n2 0.25 0.5 0.5 0.2\n").unwrap();

        let size = HW::from_unsigned_hw([100, 200]);
        let (bboxes, labels) = read_pixel_annotations(&path, &size, CoordRounding::Round).unwrap();
        assert_eq!(labels, vec![5, 2]);
        assert_eq!(bboxes[0].tlbr(), [0, 0, 100, 200]);
        assert_eq!(bboxes[1].tlbr(), [40, 0, 60, 100]);
    }

    #[test]
    fn oversized_coordinate_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.txt");
        fs::write(&path, "1 0.5 0.5 0.1 0.1\n\n0 1e308 0.5 0.1 0.1\n").unwrap();

        let size = HW::from_unsigned_hw([10, 10]);
        match read_pixel_annotations(&path, &size, CoordRounding::Round) {
            Err(Error::MalformedAnnotation { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result {:?}", other),
        }

        // the normalized form alone is still accepted
        assert_eq!(read_annotations(&path).unwrap().len(), 2);
    }

    #[test]
    fn empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();
        assert!(read_annotations(&path).unwrap().is_empty());
    }
}
