//! CSV latency sink: `ID,send_timestamp,recv_timestamp` rows, one per
//! packet id, written to `latencies/latency_<wall-clock>.csv`.

use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use agni_common::{AgniError, AgniResult};
use chrono::{DateTime, Local};

const LATENCIES_DIR: &str = "latencies";

fn ensure_directory_exists() -> AgniResult<()> {
    match fs::metadata(LATENCIES_DIR) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(AgniError::Metrics(format!(
            "'{LATENCIES_DIR}' exists but is not a directory"
        ))),
        Err(_) => {
            fs::create_dir(LATENCIES_DIR)?;
            fs::set_permissions(LATENCIES_DIR, fs::Permissions::from_mode(0o755))?;
            Ok(())
        }
    }
}

fn generate_filename(captured_at: DateTime<Local>) -> PathBuf {
    let timestamp = captured_at.format("%Y-%m-%d_%H-%M-%S");
    PathBuf::from(LATENCIES_DIR).join(format!("latency_{timestamp}.csv"))
}

/// Write the CSV latency report. `send_ts`/`recv_ts` are 0-indexed arrays
/// where index `i` corresponds to packet id `i + 1`; a value of 0 means
/// "never sent"/"never received". Returns the path written on success.
pub fn save_metrics_to_csv(
    send_ts: &[u64],
    recv_ts: &[u64],
    captured_at: DateTime<Local>,
) -> AgniResult<PathBuf> {
    if send_ts.is_empty() || recv_ts.is_empty() || send_ts.len() != recv_ts.len() {
        return Err(AgniError::Metrics("invalid timestamp arrays".to_string()));
    }

    ensure_directory_exists()?;
    let path = generate_filename(captured_at);

    let mut file = File::create(&path)?;
    writeln!(file, "ID,send_timestamp,recv_timestamp")?;
    for (i, (&send, &recv)) in send_ts.iter().zip(recv_ts.iter()).enumerate() {
        writeln!(file, "{},{},{}", i + 1, send, recv)?;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn in_temp_dir<F: FnOnce()>(f: F) {
        let dir = tempfile::tempdir().unwrap();
        let prev = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        f();
        std::env::set_current_dir(prev).unwrap();
    }

    #[test]
    fn writes_header_and_rows() {
        in_temp_dir(|| {
            let ts = Local.with_ymd_and_hms(2026, 7, 27, 10, 0, 0).unwrap();
            let send = vec![100, 200, 300];
            let recv = vec![150, 0, 320];

            let path = save_metrics_to_csv(&send, &recv, ts).unwrap();
            let contents = fs::read_to_string(&path).unwrap();
            let mut lines = contents.lines();
            assert_eq!(lines.next().unwrap(), "ID,send_timestamp,recv_timestamp");
            assert_eq!(lines.next().unwrap(), "1,100,150");
            assert_eq!(lines.next().unwrap(), "2,200,0");
            assert_eq!(lines.next().unwrap(), "3,300,320");
        });
    }

    #[test]
    fn rejects_mismatched_array_lengths() {
        in_temp_dir(|| {
            let ts = Local.with_ymd_and_hms(2026, 7, 27, 10, 0, 0).unwrap();
            let err = save_metrics_to_csv(&[1, 2], &[1], ts).unwrap_err();
            assert!(matches!(err, AgniError::Metrics(_)));
        });
    }

    #[test]
    fn directory_is_created_with_mode_0755() {
        in_temp_dir(|| {
            let ts = Local.with_ymd_and_hms(2026, 7, 27, 10, 0, 0).unwrap();
            save_metrics_to_csv(&[1], &[1], ts).unwrap();
            let meta = fs::metadata(LATENCIES_DIR).unwrap();
            assert_eq!(meta.permissions().mode() & 0o777, 0o755);
        });
    }
}
