use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use rusqlite::Connection;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally as a .zip.
    /// Asks before overwriting unless `force`. Returns the final path, or
    /// `None` when the user declined.
    pub fn backup(
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() && !force && !confirm_overwrite(dest)? {
            warning("Backup cancelled by user.");
            return Ok(None);
        }

        // "--file x.zip --compress" copies to x.sqlite first, then zips it
        let raw_copy = if compress && dest.extension().is_some_and(|e| e == "zip") {
            dest.with_extension("sqlite")
        } else {
            dest.to_path_buf()
        };

        fs::copy(src, &raw_copy)?;
        success(format!("Backup created: {}", raw_copy.display()));

        let final_path = if compress {
            let compressed = compress_backup(&raw_copy)?;
            if let Err(e) = fs::remove_file(&raw_copy) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }
            compressed
        } else {
            raw_copy
        };

        if let Ok(conn) = Connection::open(src) {
            ttlog_quiet(
                &conn,
                "backup",
                &final_path.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            );
        }

        Ok(Some(final_path))
    }
}

fn confirm_overwrite(dest: &Path) -> AppResult<bool> {
    warning(format!("The file '{}' already exists.", dest.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "studycal.sqlite".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options)?;
    io::copy(&mut f, &mut zip)?;
    zip.finish()?;

    success(format!("📦 Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
