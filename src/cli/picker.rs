//! Interactive CSV picker.
//!
//! Used when `analyze`/`summary` is run without a file argument: the CSV files
//! under the current directory are listed and the user picks one by number or
//! types a path.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// How deep below the current directory CSV files are searched for.
const SEARCH_DEPTH: usize = 3;

/// Prompt on stdin/stdout for a CSV file.
pub fn prompt_for_csv_path() -> Result<PathBuf, AppError> {
    let files = discover_csv_files(Path::new("."), SEARCH_DEPTH);
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv files found here. Pass one with `temp-trend analyze <file.csv>`.",
        ));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    pick_from(&files, &mut stdin.lock(), &mut stdout)
}

fn pick_from(files: &[PathBuf], input: &mut impl BufRead, output: &mut impl Write) -> Result<PathBuf, AppError> {
    let io_err = |e: io::Error| AppError::new(2, format!("Terminal I/O failed: {e}"));

    writeln!(output, "CSV files in this directory:").map_err(io_err)?;
    for (idx, path) in files.iter().enumerate() {
        writeln!(output, "{:>3}) {}", idx + 1, display_path(path)).map_err(io_err)?;
    }

    loop {
        write!(output, "Pick a file (1-{}), type a path, or q to quit: ", files.len()).map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(AppError::new(2, "No file selected."));
        }

        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        let candidate = match answer.parse::<usize>() {
            Ok(n) if (1..=files.len()).contains(&n) => files[n - 1].clone(),
            Ok(n) => {
                writeln!(output, "No file numbered {n}.").map_err(io_err)?;
                continue;
            }
            Err(_) => PathBuf::from(answer),
        };

        match validate_csv_path(&candidate) {
            Ok(path) => return Ok(path),
            Err(err) => writeln!(output, "{err}").map_err(io_err)?,
        }
    }
}

/// Check that `path` is an existing `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.is_file() {
        let what = if path.is_dir() { "is a directory" } else { "does not exist" };
        return Err(AppError::new(2, format!("{} {what}", path.display())));
    }
    if !has_csv_extension(path) {
        return Err(AppError::new(
            2,
            format!("{} is not a .csv file", path.display()),
        ));
    }
    Ok(path.to_path_buf())
}

/// Find `*.csv` files below `root`, sorted by path.
///
/// Hidden directories and build output (`target`, `node_modules`) are skipped.
pub fn discover_csv_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![(root.to_path_buf(), 0usize)];

    while let Some((dir, depth)) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                if depth < max_depth && !skip_dir(&path) {
                    pending.push((path, depth + 1));
                }
            } else if file_type.is_file() && has_csv_extension(&path) {
                found.push(path);
            }
        }
    }

    found.sort_by_key(|p| display_path(p));
    found
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    name.starts_with('.') || matches!(name, "target" | "node_modules")
}

fn display_path(path: &Path) -> String {
    path.strip_prefix("./").unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("temp-trend-picker-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn discovers_csv_files_in_sorted_order() {
        let dir = scratch_dir("discover");
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::create_dir_all(dir.join(".hidden")).unwrap();
        fs::write(dir.join("b.csv"), "").unwrap();
        fs::write(dir.join("a.CSV"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::write(dir.join("sub").join("c.csv"), "").unwrap();
        fs::write(dir.join(".hidden").join("d.csv"), "").unwrap();

        let found = discover_csv_files(&dir, 3);
        let names: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(&dir).unwrap().display().to_string())
            .collect();
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(names, vec!["a.CSV", "b.csv", format!("sub{}c.csv", std::path::MAIN_SEPARATOR).as_str()]);
    }

    #[test]
    fn validate_rejects_missing_dirs_and_other_extensions() {
        let dir = scratch_dir("validate");
        let txt = dir.join("t.txt");
        let csv = dir.join("t.csv");
        fs::write(&txt, "").unwrap();
        fs::write(&csv, "").unwrap();

        assert!(validate_csv_path(&dir.join("missing.csv")).is_err());
        assert!(validate_csv_path(&dir).is_err());
        assert!(validate_csv_path(&txt).is_err());
        assert_eq!(validate_csv_path(&csv).unwrap(), csv);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn pick_by_number_after_invalid_choice() {
        let dir = scratch_dir("pick");
        let csv = dir.join("temp.csv");
        fs::write(&csv, "").unwrap();

        let mut input = io::Cursor::new("7\n1\n");
        let mut output: Vec<u8> = Vec::new();
        let picked = pick_from(&[csv.clone()], &mut input, &mut output).unwrap();
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(picked, csv);
        assert!(String::from_utf8(output).unwrap().contains("No file numbered 7."));
    }

    #[test]
    fn quitting_or_eof_cancels() {
        let files = [PathBuf::from("x.csv")];
        assert!(pick_from(&files, &mut io::Cursor::new("q\n"), &mut Vec::<u8>::new()).is_err());
        assert!(pick_from(&files, &mut io::Cursor::new(""), &mut Vec::<u8>::new()).is_err());
    }
}
