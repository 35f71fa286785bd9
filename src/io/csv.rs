use super::PositionSink;
use crate::units::*;
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Separates the particles of one frame.
pub const FIELD_DELIMITER: char = ';';
/// Separates x and y of one particle.
pub const COORDINATE_DELIMITER: char = ' ';
/// Fixed-point fractional digits per coordinate.
pub const PRECISION: usize = 10;

/// Writes one line per frame: `x y` pairs separated by `;`.
///
/// The destination is truncated once on creation, afterwards frames are only appended.
pub struct CsvPositionWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    line: String,
}

impl CsvPositionWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<CsvPositionWriter> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).with_context(|| format!("truncate position stream {}", path.display()))?;
        Ok(CsvPositionWriter {
            path,
            writer: BufWriter::new(file),
            line: String::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PositionSink for CsvPositionWriter {
    fn write_frame(&mut self, positions: &[Point]) -> Result<()> {
        use std::fmt::Write as _;

        self.line.clear();
        for (i, p) in positions.iter().enumerate() {
            if i > 0 {
                self.line.push(FIELD_DELIMITER);
            }
            write!(self.line, "{:.*}{}{:.*}", PRECISION, p.x, COORDINATE_DELIMITER, PRECISION, p.y)?;
        }
        self.line.push('\n');

        self.writer
            .write_all(self.line.as_bytes())
            .and_then(|_| self.writer.flush())
            .with_context(|| format!("append frame to {}", self.path.display()))
    }
}

/// Parses one line written by [`CsvPositionWriter`].
pub fn parse_frame(line: &str) -> Result<Vec<Point>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Ok(Vec::new());
    }
    line.split(FIELD_DELIMITER)
        .enumerate()
        .map(|(i, field)| {
            let mut coordinates = field.split_whitespace();
            let mut next = |axis: &str| -> Result<Real> {
                let value = coordinates
                    .next()
                    .ok_or_else(|| anyhow!("particle {}: missing {} coordinate in {:?}", i, axis, field))?;
                value
                    .parse::<Real>()
                    .with_context(|| format!("particle {}: invalid {} coordinate {:?}", i, axis, value))
            };
            let x = next("x")?;
            let y = next("y")?;
            Ok(Point::new(x, y))
        })
        .collect()
}

/// Reads a whole trajectory, one entry per frame.
pub fn read_trajectory(path: impl AsRef<Path>) -> Result<Vec<Vec<Point>>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open position stream {}", path.display()))?;
    BufReader::new(file)
        .lines()
        .enumerate()
        .map(|(frame, line)| {
            let line = line.with_context(|| format!("read frame {} of {}", frame, path.display()))?;
            parse_frame(&line).with_context(|| format!("parse frame {} of {}", frame, path.display()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vsph2d-{}-{}.csv", name, std::process::id()))
    }

    #[test]
    fn line_format() {
        let path = temp_path("line_format");
        let mut writer = CsvPositionWriter::create(&path).unwrap();
        writer.write_frame(&[Point::new(1.5, -0.25), Point::new(300.0, 1.0 / 3.0)]).unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1.5000000000 -0.2500000000;300.0000000000 0.3333333333\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn truncates_once_then_appends() {
        let path = temp_path("truncate");
        std::fs::write(&path, "stale content\n").unwrap();

        let mut writer = CsvPositionWriter::create(&path).unwrap();
        writer.write_frame(&[Point::new(1.0, 2.0)]).unwrap();
        writer.write_frame(&[Point::new(3.0, 4.0)]).unwrap();
        drop(writer);

        let trajectory = read_trajectory(&path).unwrap();
        assert_eq!(trajectory, vec![vec![Point::new(1.0, 2.0)], vec![Point::new(3.0, 4.0)]]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn parse_rejects_malformed_fields() {
        assert_eq!(parse_frame("").unwrap(), Vec::<Point>::new());
        assert_eq!(parse_frame("0.5 1.5;2 3\n").unwrap(), vec![Point::new(0.5, 1.5), Point::new(2.0, 3.0)]);
        assert!(parse_frame("0.5").is_err());
        assert!(parse_frame("0.5 x").is_err());
        assert!(parse_frame("1 2;;3 4").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let path = temp_path("does_not_exist");
        let error = read_trajectory(&path).unwrap_err();
        assert!(format!("{:#}", error).contains("does_not_exist"));
    }
}
