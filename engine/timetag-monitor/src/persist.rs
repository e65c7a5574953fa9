//! Writes paired result columns to a uniquely named text file.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::MonitorError;

/// Store paired x/y columns under `result_path`, never overwriting.
///
/// The filename is `{stem}_{label}_{NNN}.txt` with the smallest zero-padded
/// 3-digit index whose path does not exist yet. The filesystem is the source
/// of truth, so indices keep increasing across restarts. The file is opened
/// with `create_new`, so a concurrent writer landing on the same index makes
/// this call move on to the next one instead of overwriting.
pub fn save_data(
  xdata: &[f64],
  ydata: &[f64],
  data_file: &Path,
  result_path: &Path,
  label: &str,
  header: Option<&str>,
) -> Result<PathBuf, MonitorError> {
  if xdata.len() != ydata.len() {
    return Err(MonitorError::LengthMismatch {
      xlen: xdata.len(),
      ylen: ydata.len(),
    });
  }

  fs::create_dir_all(result_path)?;

  let stem = data_file
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_default();

  let mut index: u32 = 0;
  loop {
    let candidate = result_path.join(format!("{}_{}_{:03}.txt", stem, label, index));
    match fs::OpenOptions::new()
      .write(true)
      .create_new(true)
      .open(&candidate)
    {
      Ok(file) => {
        write_columns(file, xdata, ydata, header)?;
        return Ok(candidate);
      }
      Err(e) if e.kind() == ErrorKind::AlreadyExists => index += 1,
      Err(e) => return Err(e.into()),
    }
  }
}

fn write_columns(
  file: fs::File,
  xdata: &[f64],
  ydata: &[f64],
  header: Option<&str>,
) -> Result<(), MonitorError> {
  let mut out = BufWriter::new(file);
  if let Some(h) = header {
    writeln!(out, "# {}", h)?;
  }
  for (x, y) in xdata.iter().zip(ydata) {
    writeln!(out, "{}\t{}", x, y)?;
  }
  out.flush()?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn xy() -> (Vec<f64>, Vec<f64>) {
    (vec![0.0, 1.0, 2.0], vec![3.0, 10.5, 7.0])
  }

  #[test]
  fn first_save_gets_index_zero() {
    let dir = tempfile::tempdir().unwrap();
    let (x, y) = xy();
    let written = save_data(
      &x,
      &y,
      Path::new("run7.dat"),
      dir.path(),
      "g2",
      None,
    )
    .unwrap();
    assert_eq!(written.file_name().unwrap(), "run7_g2_000.txt");
  }

  #[test]
  fn existing_indices_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("foo_bar_000.txt"), "").unwrap();
    fs::write(dir.path().join("foo_bar_001.txt"), "").unwrap();

    let (x, y) = xy();
    let written = save_data(&x, &y, Path::new("foo.dat"), dir.path(), "bar", None).unwrap();
    assert_eq!(written.file_name().unwrap(), "foo_bar_002.txt");
  }

  #[test]
  fn repeated_saves_increment_the_index() {
    let dir = tempfile::tempdir().unwrap();
    let (x, y) = xy();
    for expected in ["a_b_000.txt", "a_b_001.txt", "a_b_002.txt"] {
      let written = save_data(&x, &y, Path::new("a.dat"), dir.path(), "b", None).unwrap();
      assert_eq!(written.file_name().unwrap(), expected);
    }
  }

  #[test]
  fn creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("analyzed").join("today");
    let (x, y) = xy();
    let written = save_data(&x, &y, Path::new("run.dat"), &nested, "hist", None).unwrap();
    assert!(written.exists());
    assert!(written.starts_with(&nested));
  }

  #[test]
  fn columns_are_tab_separated_with_comment_header() {
    let dir = tempfile::tempdir().unwrap();
    let (x, y) = xy();
    let written = save_data(
      &x,
      &y,
      Path::new("run.dat"),
      dir.path(),
      "hist",
      Some("delay histogram"),
    )
    .unwrap();

    let body = fs::read_to_string(written).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines[0], "# delay histogram");
    assert_eq!(lines[1], "0\t3");
    assert_eq!(lines[2], "1\t10.5");
    assert_eq!(lines.len(), 4);
  }

  #[test]
  fn unpaired_columns_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = save_data(
      &[0.0],
      &[1.0, 2.0],
      Path::new("run.dat"),
      dir.path(),
      "hist",
      None,
    )
    .unwrap_err();
    assert!(matches!(err, MonitorError::LengthMismatch { .. }));
  }
}
