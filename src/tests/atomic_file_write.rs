#[cfg(test)]
mod tests {
    use std::fs;

    use crate::helpers::fs::write_atomic;

    #[tokio::test]
    async fn atomic_write_replaces_content_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        fs::write(&path, "previous").unwrap();

        write_atomic(&path, b"token-value-123", Some(0o600)).await.expect("atomic write");

        let got = fs::read_to_string(&path).expect("read file");
        assert_eq!(got, "token-value-123", "file content mismatch");
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["tokens.json".to_owned()]);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).expect("meta").permissions().mode() & 0o777;
            assert_eq!(mode, 0o600, "permissions mismatch (expected 0600)");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_writers_of_one_file_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let payloads: Vec<String> = (0..4).map(|i| "x".repeat(16 << i)).collect();

        for _ in 0..25 {
            let writers: Vec<_> = payloads
                .iter()
                .cloned()
                .map(|payload| {
                    let path = path.clone();
                    tokio::spawn(async move { write_atomic(&path, payload.as_bytes(), Some(0o600)).await })
                })
                .collect();
            for writer in writers {
                writer.await.unwrap().expect("concurrent atomic write");
            }

            let got = fs::read_to_string(&path).unwrap();
            assert!(payloads.contains(&got), "mixed content of {} bytes", got.len());
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1, "temp files left behind");
    }

    #[tokio::test]
    async fn failed_write_keeps_the_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("accounts.csv");

        assert!(write_atomic(&path, b"new", None).await.is_err());
        assert!(!path.exists());
    }
}
