use crate::error::Result;
use crate::structs::Record;
use csv::Writer;
use log::debug;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::Builder;

/// Writes the transformed rows to a CSV file with formatted numeric values.
///
/// The header row is `name,height,weight`; measurements carry exactly two
/// decimals and no row-index column is written. The data goes to a temporary
/// file next to `output_path` which then replaces any existing file, so a
/// failed write never leaves a truncated table behind.
///
/// # Arguments
/// * `results` - Slice of Record structs in meters and kilograms
/// * `output_path` - Path where the CSV file will be created or replaced
///
/// # Returns
/// Returns `Ok(())` on success.
///
/// # Errors
/// Returns an I/O error if the destination directory is not writable or the
/// rename fails.
pub fn write_csv(results: &[Record], output_path: &Path) -> Result<()> {
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // Mode 0666 lets the umask decide, as `File::create` would.
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut staged = builder.tempfile_in(dir)?;

    {
        let mut writer = Writer::from_writer(staged.as_file_mut());
        writer
            .write_record(["name", "height", "weight"])
            .map_err(io::Error::from)?;

        for record in results {
            writer
                .write_record(&[
                    record.name.clone(),
                    format!("{:.2}", record.height),
                    format!("{:.2}", record.weight),
                ])
                .map_err(io::Error::from)?;
        }

        writer.flush()?;
    }

    if let Ok(existing) = fs::metadata(output_path) {
        staged.as_file().set_permissions(existing.permissions())?;
    }

    staged.persist(output_path).map_err(|e| e.error)?;
    debug!("Wrote {} rows to {}", results.len(), output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_write_csv_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transformed_data.csv");
        let rows = vec![
            Record::new("alex", 1.67, 51.25),
            Record::new("Smith, Jo", 1.7, 68.0),
        ];

        write_csv(&rows, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "name,height,weight\nalex,1.67,51.25\n\"Smith, Jo\",1.70,68.00\n"
        );
    }

    #[test]
    fn test_write_csv_header_only_for_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "name,height,weight\n");
    }

    #[test]
    fn test_write_csv_overwrites_and_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale contents that are longer than the new table\n").unwrap();
        let rows = vec![Record::new("jack", 1.74, 50.97)];

        write_csv(&rows, &path).unwrap();
        let first = fs::read(&path).unwrap();
        write_csv(&rows, &path).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, b"name,height,weight\njack,1.74,50.97\n");
    }

    #[test]
    fn test_write_csv_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/out.csv");

        let err = write_csv(&[], &path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_csv_permissions_follow_umask() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let reference = dir.path().join("reference.csv");
        fs::File::create(&reference).unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&[], &path).unwrap();
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&reference));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_csv_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        write_csv(&[Record::new("jack", 1.74, 50.97)], &path).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o600);
    }
}
