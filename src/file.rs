// src/file.rs

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// `<name>.tmp` next to the target, so the final rename stays on one filesystem.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` to the temp sibling of `path`, synced, ready to rename.
fn stage(path: &Path, contents: &[u8]) -> io::Result<PathBuf> {
    ensure_parent(path)?;
    let tmp = temp_sibling(path);
    let written = File::create(&tmp).and_then(|mut f| {
        f.write_all(contents)?;
        f.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(tmp)
}

/// Replace `path` with `contents` all-or-nothing: readers see either the old
/// file or the complete new one, never a torn write.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let tmp = stage(path, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

/// Several files as one unit: every file is staged before any target is
/// replaced. A failure while staging leaves all targets untouched; the error
/// carries the path that failed.
pub fn write_atomic_all(files: &[(&Path, &[u8])]) -> Result<(), (PathBuf, io::Error)> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());
    for &(path, contents) in files {
        match stage(path, contents) {
            Ok(tmp) => staged.push((tmp, path)),
            Err(e) => {
                for (tmp, _) in &staged {
                    let _ = fs::remove_file(tmp);
                }
                return Err((path.to_path_buf(), e));
            }
        }
    }
    // Renames only from here on; a failure leaves earlier targets replaced.
    let mut pending = staged.into_iter();
    while let Some((tmp, path)) = pending.next() {
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            for (rest, _) in pending {
                let _ = fs::remove_file(rest);
            }
            return Err((path.to_path_buf(), e));
        }
    }
    Ok(())
}
